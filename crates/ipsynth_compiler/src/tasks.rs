//! Pre- and post-processing tasks from `.rules` files.
//!
//! Every string of a task is interpolated against the job configuration
//! before use. Relative paths resolve against the project root.

use std::fs;

use ipsynth_project::{CopyRule, DeleteRule, ReplaceRule};
use regex::RegexBuilder;

use crate::context::JobContext;
use crate::error::CompilationError;

/// Copies files, creating missing destination directories.
pub fn run_copy(ctx: &JobContext, rules: &[CopyRule]) -> Result<(), CompilationError> {
    for rule in rules {
        let source = ctx.expand_path(&rule.source)?;
        let destination = ctx.expand_path(&rule.destination)?;
        if !source.is_file() {
            return Err(CompilationError::MissingCopySource { path: source });
        }
        log::debug!("Copying '{}' to '{}'", source.display(), destination.display());
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| CompilationError::io(parent, e))?;
        }
        fs::copy(&source, &destination).map_err(|e| CompilationError::io(&destination, e))?;
    }
    Ok(())
}

/// Applies regex substitutions to files in place.
///
/// The replacement may refer to capture groups as `$1` (written `$$1` in the
/// rules file, since `$` starts an interpolation there).
pub fn run_replace(ctx: &JobContext, rules: &[ReplaceRule]) -> Result<(), CompilationError> {
    for rule in rules {
        let file = ctx.expand_path(&rule.file)?;
        let pattern = ctx.expand(&rule.search)?;
        let replacement = ctx.expand(&rule.replace)?;

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(rule.case_insensitive)
            .multi_line(rule.multi_line)
            .dot_matches_new_line(rule.dot_all)
            .build()
            .map_err(|source| CompilationError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;

        log::debug!("Replacing '{}' in '{}'", pattern, file.display());
        let content = fs::read_to_string(&file).map_err(|e| CompilationError::io(&file, e))?;
        if !regex.is_match(&content) {
            log::warn!("Search pattern '{}' not found in '{}'", pattern, file.display());
            continue;
        }
        let updated = regex.replace_all(&content, replacement.as_str());
        fs::write(&file, updated.as_bytes()).map_err(|e| CompilationError::io(&file, e))?;
    }
    Ok(())
}

/// Deletes intermediate files. Missing files only produce a warning.
pub fn run_delete(ctx: &JobContext, rules: &[DeleteRule]) -> Result<(), CompilationError> {
    for rule in rules {
        let file = ctx.expand_path(&rule.file)?;
        if !file.exists() {
            log::warn!("File to delete not found: '{}'", file.display());
            continue;
        }
        log::debug!("Deleting '{}'", file.display());
        fs::remove_file(&file).map_err(|e| CompilationError::io(&file, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CompilerOptions;
    use ipsynth_common::{Device, DeviceFamily};
    use ipsynth_config::{Config, DirectoryLayout};
    use std::path::Path;
    use tempfile::TempDir;

    fn context(root: &Path) -> JobContext {
        let layout = DirectoryLayout {
            root: root.to_path_buf(),
            temp: root.join("temp"),
            working: root.join("temp/quartus"),
            netlist: root.join("netlist"),
        };
        JobContext::new(
            &Config::new(),
            &layout,
            &Device::new("5CSEMA5F31C6", DeviceFamily::CycloneV),
            CompilerOptions::default(),
        )
    }

    fn copy(source: &str, destination: &str) -> CopyRule {
        CopyRule {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }

    fn replace(file: &str, search: &str, replace: &str) -> ReplaceRule {
        ReplaceRule {
            file: file.to_string(),
            search: search.to_string(),
            replace: replace.to_string(),
            case_insensitive: false,
            multi_line: false,
            dot_all: false,
        }
    }

    #[test]
    fn copy_into_device_output_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        fs::write(dir.path().join("fifo.vqm"), "netlist").unwrap();

        run_copy(
            &ctx,
            &[copy("fifo.vqm", "netlist/${SPECIAL:Device}/fifo_cc.vqm")],
        )
        .unwrap();

        let copied = dir.path().join("netlist/5CSEMA5F31C6/fifo_cc.vqm");
        assert_eq!(fs::read_to_string(copied).unwrap(), "netlist");
    }

    #[test]
    fn copy_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        let err = run_copy(&ctx, &[copy("nope.vqm", "out.vqm")]).unwrap_err();
        assert!(matches!(err, CompilationError::MissingCopySource { .. }));
    }

    #[test]
    fn replace_with_capture_groups() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("top.vhdl");
        fs::write(&file, "entity fifo_cc is\nend entity fifo_cc;\n").unwrap();

        run_replace(&ctx, &[replace("top.vhdl", "entity (\\w+)", "entity poc_$$1")]).unwrap();

        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "entity poc_fifo_cc is\nend entity poc_fifo_cc;\n"
        );
    }

    #[test]
    fn replace_flags() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("a.txt");
        fs::write(&file, "BEGIN\nbody\nEND\n").unwrap();

        let mut rule = replace("a.txt", "begin.*end", "X");
        rule.case_insensitive = true;
        rule.dot_all = true;
        run_replace(&ctx, &[rule]).unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "X\n");
    }

    #[test]
    fn replace_without_match_leaves_file() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        let file = dir.path().join("a.txt");
        fs::write(&file, "unchanged").unwrap();
        run_replace(&ctx, &[replace("a.txt", "missing", "X")]).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "unchanged");
    }

    #[test]
    fn replace_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        let err = run_replace(&ctx, &[replace("a.txt", "(unclosed", "X")]).unwrap_err();
        assert!(matches!(err, CompilationError::Pattern { .. }));
    }

    #[test]
    fn delete_tolerates_missing_files() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path());
        fs::write(dir.path().join("junk.txt"), "x").unwrap();
        run_delete(
            &ctx,
            &[
                DeleteRule {
                    file: "junk.txt".to_string(),
                },
                DeleteRule {
                    file: "gone.txt".to_string(),
                },
            ],
        )
        .unwrap();
        assert!(!dir.path().join("junk.txt").exists());
    }
}
