//! The netlist job: one hardware module to be synthesized.

use std::path::PathBuf;

/// A netlist to synthesize, as resolved from the catalog.
///
/// Created by the caller before invocation. The compiler fills in
/// [`project_file`](Netlist::project_file) during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Netlist {
    /// Fully-qualified name of the netlist (e.g., "PoC.fifo.cc").
    pub fqn: String,
    /// Name of the top-level HDL module.
    pub module_name: String,
    /// Path to the `.files` source list.
    pub files_file: PathBuf,
    /// Optional path to the `.rules` pre/post processing file.
    pub rules_file: Option<PathBuf>,
    /// Generated vendor project file, set by the compiler.
    pub project_file: Option<PathBuf>,
}

impl Netlist {
    /// Creates a netlist job without a rules file.
    pub fn new(
        fqn: impl Into<String>,
        module_name: impl Into<String>,
        files_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fqn: fqn.into(),
            module_name: module_name.into(),
            files_file: files_file.into(),
            rules_file: None,
            project_file: None,
        }
    }

    /// Attaches a rules file.
    pub fn with_rules_file(mut self, rules_file: impl Into<PathBuf>) -> Self {
        self.rules_file = Some(rules_file.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_outputs() {
        let n = Netlist::new("PoC.fifo.cc", "fifo_cc", "src/fifo/fifo_cc.files");
        assert_eq!(n.module_name, "fifo_cc");
        assert!(n.rules_file.is_none());
        assert!(n.project_file.is_none());
    }

    #[test]
    fn with_rules() {
        let n = Netlist::new("PoC.fifo.cc", "fifo_cc", "a.files").with_rules_file("a.rules");
        assert_eq!(n.rules_file, Some(PathBuf::from("a.rules")));
    }
}
