//! Intel (formerly Altera) FPGA devices identified by part number.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Intel FPGA device families recognized from part-number prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceFamily {
    /// Cyclone II (`EP2C...`).
    CycloneII,
    /// Cyclone III (`EP3C...`).
    CycloneIII,
    /// Cyclone IV E (`EP4CE...`).
    CycloneIVE,
    /// Cyclone IV GX (`EP4CGX...`).
    CycloneIVGX,
    /// Cyclone V, including the SoC variants (`5C...`).
    CycloneV,
    /// Cyclone 10 LP (`10CL...`).
    Cyclone10Lp,
    /// MAX 10 (`10M...`).
    Max10,
    /// Arria II GX (`EP2AGX...`).
    ArriaIIGX,
    /// Arria V (`5A...`).
    ArriaV,
    /// Stratix IV (`EP4S...`).
    StratixIV,
    /// Stratix V (`5S...`).
    StratixV,
}

/// Part-number prefixes, longest first so that `EP4CGX` wins over `EP4C`.
const FAMILY_PREFIXES: &[(&str, DeviceFamily)] = &[
    ("EP2AGX", DeviceFamily::ArriaIIGX),
    ("EP4CGX", DeviceFamily::CycloneIVGX),
    ("EP4CE", DeviceFamily::CycloneIVE),
    ("10CL", DeviceFamily::Cyclone10Lp),
    ("EP2C", DeviceFamily::CycloneII),
    ("EP3C", DeviceFamily::CycloneIII),
    ("EP4S", DeviceFamily::StratixIV),
    ("10M", DeviceFamily::Max10),
    ("5C", DeviceFamily::CycloneV),
    ("5A", DeviceFamily::ArriaV),
    ("5S", DeviceFamily::StratixV),
];

impl DeviceFamily {
    /// Returns the family name as Quartus spells it in a `FAMILY` assignment.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CycloneII => "Cyclone II",
            Self::CycloneIII => "Cyclone III",
            Self::CycloneIVE => "Cyclone IV E",
            Self::CycloneIVGX => "Cyclone IV GX",
            Self::CycloneV => "Cyclone V",
            Self::Cyclone10Lp => "Cyclone 10 LP",
            Self::Max10 => "MAX 10",
            Self::ArriaIIGX => "Arria II GX",
            Self::ArriaV => "Arria V",
            Self::StratixIV => "Stratix IV",
            Self::StratixV => "Stratix V",
        }
    }

    /// Detects the family from a part number, ignoring case.
    pub fn from_part_number(part: &str) -> Option<Self> {
        let upper = part.to_ascii_uppercase();
        FAMILY_PREFIXES
            .iter()
            .find(|(prefix, _)| upper.starts_with(prefix))
            .map(|(_, family)| *family)
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete FPGA device, e.g. `5CSEMA5F31C6` of the Cyclone V family.
///
/// Displays as its short name, which is also the directory name used for
/// per-device netlist output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Device {
    short_name: String,
    family: DeviceFamily,
}

impl Device {
    /// Creates a device from an explicit short name and family.
    pub fn new(short_name: impl Into<String>, family: DeviceFamily) -> Self {
        Self {
            short_name: short_name.into(),
            family,
        }
    }

    /// Returns the normalized (upper-case) part number.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Returns the device family.
    pub fn family(&self) -> DeviceFamily {
        self.family
    }

    /// Returns the device series name, e.g. `"Cyclone V"`.
    pub fn series(&self) -> &'static str {
        self.family.name()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name)
    }
}

/// Error type for parsing device part numbers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized device part number: '{input}'")]
pub struct ParseDeviceError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Device {
    type Err = ParseDeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let family = DeviceFamily::from_part_number(s).ok_or_else(|| ParseDeviceError {
            input: s.to_string(),
        })?;
        Ok(Device::new(s.to_ascii_uppercase(), family))
    }
}
