//! Shared foundational types used across the ipsynth netlist compiler.
//!
//! This crate provides the device and board descriptors, fully-qualified
//! netlist names (including wildcard entities), and the [`Netlist`] job type
//! handed from the catalog to the compiler.

#![warn(missing_docs)]

pub mod board;
pub mod device;
pub mod fqn;
pub mod netlist;

pub use board::Board;
pub use device::{Device, DeviceFamily, ParseDeviceError};
pub use fqn::{EntitySpec, ParseFqnError};
pub use netlist::Netlist;
