//! Parser for `.files` source lists.
//!
//! One statement per line; `#` starts a comment outside of quotes:
//!
//! ```text
//! # FIFO with common clock
//! include "src/common/common.files"
//! vhdl    poc "src/fifo/fifo_cc.vhdl"
//! verilog     "src/misc/sync.v"
//! sdc         "src/fifo/fifo_cc.sdc"
//! ```
//!
//! Paths are relative to the project root. Included lists are expanded in
//! place, so the resulting order is the textual order after inclusion.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ProjectError;

/// The kind of a source file, which decides its Quartus assignment name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A VHDL file compiled into the named library.
    Vhdl {
        /// Target VHDL library (e.g., "poc").
        library: String,
    },
    /// A Verilog-2005 file.
    Verilog,
    /// A SystemVerilog file.
    SystemVerilog,
    /// A Synopsys Design Constraints (timing) file.
    Sdc,
}

/// A source file collected from a `.files` list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    /// What kind of file this is.
    pub kind: SourceKind,
    /// Path resolved against the project root.
    pub path: PathBuf,
}

/// Parses a `.files` list, following includes, and returns its source files.
pub fn parse_files_file(path: &Path, root: &Path) -> Result<Vec<SourceFile>, ProjectError> {
    let mut files = Vec::new();
    let mut active = HashSet::new();
    parse_into(path, root, &mut active, &mut files)?;
    Ok(files)
}

fn parse_into(
    path: &Path,
    root: &Path,
    active: &mut HashSet<PathBuf>,
    files: &mut Vec<SourceFile>,
) -> Result<(), ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !active.insert(key.clone()) {
        return Err(ProjectError::IncludeCycle {
            path: path.to_path_buf(),
        });
    }

    for (idx, line) in content.lines().enumerate() {
        let syntax = |message: String| ProjectError::Syntax {
            path: path.to_path_buf(),
            line: idx + 1,
            message,
        };

        let tokens = tokenize(line).map_err(|m| syntax(m.to_string()))?;
        let Some((keyword, args)) = tokens.split_first() else {
            continue;
        };

        let kind = match (keyword.as_str(), args.len()) {
            ("include", 1) => {
                parse_into(&root.join(&args[0]), root, active, files)?;
                continue;
            }
            ("vhdl", 2) => SourceKind::Vhdl {
                library: args[0].clone(),
            },
            ("verilog", 1) => SourceKind::Verilog,
            ("systemverilog", 1) => SourceKind::SystemVerilog,
            ("sdc", 1) => SourceKind::Sdc,
            ("vhdl", n) => return Err(syntax(format!("'vhdl' expects a library and a path, got {n} argument(s)"))),
            ("include" | "verilog" | "systemverilog" | "sdc", n) => {
                return Err(syntax(format!("'{keyword}' expects one path, got {n} argument(s)")))
            }
            (other, _) => return Err(syntax(format!("unknown statement '{other}'"))),
        };

        let file_path = args.last().map(|p| root.join(p)).unwrap_or_default();
        files.push(SourceFile {
            kind,
            path: file_path,
        });
    }

    active.remove(&key);
    Ok(())
}

/// Splits a line into words and quoted strings, dropping comments.
fn tokenize(line: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '#' {
            break;
        } else if c == '"' {
            chars.next();
            let mut token = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return Err("unterminated string"),
                }
            }
            if token.is_empty() {
                return Err("empty path");
            }
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() || ch == '"' || ch == '#' {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            tokens.push(token);
        }
    }
    Ok(tokens)
}
