//! `ipsynth list`: show the netlist catalog.

use ipsynth_common::Netlist;
use ipsynth_config::{expand_netlist, netlist_catalog};

use crate::pipeline::load_project_config;
use crate::GlobalArgs;

/// Prints every catalog netlist whose FQN contains `filter`.
pub fn run(filter: Option<&str>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_project_config(global)?;
    let root = config.root_directory()?;
    // Entries that refer to the device context stay unexpanded.
    let netlists: Vec<Netlist> = netlist_catalog(&config)
        .into_iter()
        .map(|n| expand_netlist(&config, root, &n).unwrap_or(n))
        .collect();
    print!("{}", render(&netlists, filter));
    Ok(0)
}

fn render(netlists: &[Netlist], filter: Option<&str>) -> String {
    let selected: Vec<&Netlist> = netlists
        .iter()
        .filter(|n| filter.map_or(true, |f| n.fqn.contains(f)))
        .collect();
    let width = selected.iter().map(|n| n.fqn.len()).max().unwrap_or(0);
    selected
        .iter()
        .map(|n| format!("{:<width$}  {}\n", n.fqn, n.module_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Netlist> {
        vec![
            Netlist::new("PoC.fifo.cc", "fifo_cc", "a.files"),
            Netlist::new("PoC.fifo.ic_got", "fifo_ic_got", "b.files"),
            Netlist::new("PoC.misc.sync", "sync_bits", "c.files"),
        ]
    }

    #[test]
    fn lists_all_aligned() {
        let text = render(&catalog(), None);
        assert_eq!(
            text,
            "PoC.fifo.cc      fifo_cc\n\
             PoC.fifo.ic_got  fifo_ic_got\n\
             PoC.misc.sync    sync_bits\n"
        );
    }

    #[test]
    fn filter_by_substring() {
        let text = render(&catalog(), Some("misc"));
        assert_eq!(text, "PoC.misc.sync  sync_bits\n");
    }

    #[test]
    fn empty_selection() {
        assert_eq!(render(&catalog(), Some("uart")), "");
    }
}
