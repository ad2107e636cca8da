//! `${Section:key}` interpolation of configuration values.
//!
//! Supported forms:
//! - `${key}` refers to a key in the section the value came from,
//! - `${Section:key}` refers to any section,
//! - `$$` is a literal `$`.
//!
//! Referenced values are expanded recursively in their own section.

use crate::error::ConfigError;
use crate::types::Config;

/// Maximum nesting of references before expansion is abandoned.
const MAX_DEPTH: usize = 10;

/// Expands all references in `text`.
///
/// `section` is the section `text` belongs to; it resolves bare `${key}`
/// references. Pass `None` for free-standing text such as rule-file entries,
/// in which case only qualified references are allowed.
pub fn interpolate(config: &Config, text: &str, section: Option<&str>) -> Result<String, ConfigError> {
    expand(config, text, section, 0)
}

fn expand(
    config: &Config,
    text: &str,
    section: Option<&str>,
    depth: usize,
) -> Result<String, ConfigError> {
    if depth > MAX_DEPTH {
        return Err(ConfigError::InterpolationDepth(text.to_string()));
    }
    let bad = |reason| ConfigError::BadInterpolation {
        text: text.to_string(),
        reason,
    };

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
            continue;
        }

        let body = after
            .strip_prefix('{')
            .ok_or_else(|| bad("'$' must be followed by '{' or '$'"))?;
        let end = body.find('}').ok_or_else(|| bad("unterminated '${'"))?;
        let reference = &body[..end];
        if reference.is_empty() {
            return Err(bad("empty reference"));
        }

        let (ref_section, key) = match reference.split_once(':') {
            Some((s, k)) => (s, k),
            None => (
                section.ok_or_else(|| bad("unqualified reference outside a section"))?,
                reference,
            ),
        };
        let raw = config
            .get(ref_section, key)
            .ok_or_else(|| ConfigError::UnknownReference(format!("{ref_section}:{key}")))?;
        out.push_str(&expand(config, raw, Some(ref_section), depth + 1)?);

        rest = &body[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut c = Config::new();
        c.set("PROJECT", "RootDirectory", "/work/poc");
        c.set("CONFIG.DirectoryNames", "NetlistFiles", "netlist");
        c.set(
            "CONFIG.DirectoryNames",
            "NetlistPath",
            "${PROJECT:RootDirectory}/${NetlistFiles}",
        );
        c.set("SPECIAL", "Device", "5CSEMA5F31C6");
        c
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(interpolate(&config(), "no refs", None).unwrap(), "no refs");
    }

    #[test]
    fn qualified_reference() {
        let out = interpolate(&config(), "${SPECIAL:Device}.qsf", None).unwrap();
        assert_eq!(out, "5CSEMA5F31C6.qsf");
    }

    #[test]
    fn nested_and_local_references() {
        let c = config();
        let out = c.interpolated("CONFIG.DirectoryNames", "NetlistPath").unwrap();
        assert_eq!(out, "/work/poc/netlist");
    }

    #[test]
    fn dollar_escape() {
        let out = interpolate(&config(), "cost: $$5", None).unwrap();
        assert_eq!(out, "cost: $5");
    }

    #[test]
    fn unknown_reference_errors() {
        let err = interpolate(&config(), "${SPECIAL:Nope}", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownReference(r) if r == "SPECIAL:Nope"));
    }

    #[test]
    fn unqualified_without_section_errors() {
        let err = interpolate(&config(), "${Device}", None).unwrap_err();
        assert!(matches!(err, ConfigError::BadInterpolation { .. }));
    }

    #[test]
    fn unterminated_errors() {
        let err = interpolate(&config(), "${SPECIAL:Device", None).unwrap_err();
        assert!(matches!(err, ConfigError::BadInterpolation { reason, .. } if reason.contains("unterminated")));
    }

    #[test]
    fn lone_dollar_errors() {
        let err = interpolate(&config(), "5$", None).unwrap_err();
        assert!(matches!(err, ConfigError::BadInterpolation { .. }));
    }

    #[test]
    fn cycle_hits_depth_limit() {
        let mut c = Config::new();
        c.set("A", "x", "${B:y}");
        c.set("B", "y", "${A:x}");
        let err = c.interpolated("A", "x").unwrap_err();
        assert!(matches!(err, ConfigError::InterpolationDepth(_)));
    }
}
