//! Fully-qualified netlist names and wildcard entity specifications.
//!
//! A fully-qualified name (FQN) is a dot-separated path such as `PoC.fifo.cc`.
//! A trailing `*` segment turns it into a wildcard that selects every netlist
//! below the prefix: `PoC.fifo.*` matches `PoC.fifo.cc` and `PoC.fifo.ic_got`,
//! but not `PoC.fifo` itself.

use std::fmt;
use std::str::FromStr;

/// A job specification: one concrete netlist or all netlists under an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntitySpec {
    /// A single netlist, named by its full FQN.
    Concrete(String),
    /// Every netlist whose FQN lies strictly below this prefix.
    WildCard(String),
}

impl EntitySpec {
    /// Returns `true` if `fqn` is selected by this specification.
    pub fn matches(&self, fqn: &str) -> bool {
        match self {
            Self::Concrete(name) => name == fqn,
            Self::WildCard(prefix) => fqn
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1),
        }
    }

    /// Returns `true` for wildcard specifications.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::WildCard(_))
    }
}

impl fmt::Display for EntitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(name) => f.write_str(name),
            Self::WildCard(prefix) => write!(f, "{prefix}.*"),
        }
    }
}

/// Error type for parsing entity specifications.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid netlist name '{input}': {reason}")]
pub struct ParseFqnError {
    /// The input string that failed to parse.
    pub input: String,
    /// Why the input was rejected.
    pub reason: &'static str,
}

impl FromStr for EntitySpec {
    type Err = ParseFqnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = |reason| ParseFqnError {
            input: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(err("name is empty"));
        }

        let segments: Vec<&str> = s.split('.').collect();
        let (last, init) = segments
            .split_last()
            .ok_or_else(|| err("name is empty"))?;

        if init.iter().any(|seg| seg.contains('*')) {
            return Err(err("'*' is only allowed as the last segment"));
        }
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(err("empty segment"));
        }
        if segments
            .iter()
            .filter(|seg| **seg != "*")
            .any(|seg| !seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        {
            return Err(err("segments may only contain letters, digits, '_' and '-'"));
        }

        if *last == "*" {
            if init.is_empty() {
                return Err(err("a wildcard needs a namespace prefix"));
            }
            Ok(EntitySpec::WildCard(init.join(".")))
        } else if last.contains('*') {
            Err(err("'*' must form a whole segment"))
        } else {
            Ok(EntitySpec::Concrete(s.to_string()))
        }
    }
}
