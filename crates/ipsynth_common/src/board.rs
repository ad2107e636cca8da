//! Development boards carrying a target device.

use crate::device::Device;
use std::fmt;

/// A named board and the FPGA mounted on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Board name as used in the configuration (e.g., "DE1-SoC").
    pub name: String,
    /// The FPGA on this board.
    pub device: Device,
}

impl Board {
    /// Creates a board from its name and device.
    pub fn new(name: impl Into<String>, device: Device) -> Self {
        Self {
            name: name.into(),
            device,
        }
    }

    /// Creates an anonymous board for a bare device, named after the part.
    pub fn for_device(device: Device) -> Self {
        Self {
            name: device.short_name().to_string(),
            device,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_device() {
        let board = Board::new("DE1-SoC", "5CSEMA5F31C6".parse().unwrap());
        assert_eq!(board.to_string(), "DE1-SoC (5CSEMA5F31C6)");
    }

    #[test]
    fn bare_device_board() {
        let board = Board::for_device("10m50daf484c7g".parse().unwrap());
        assert_eq!(board.name, "10M50DAF484C7G");
        assert_eq!(board.device.series(), "MAX 10");
    }
}
