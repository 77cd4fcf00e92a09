//! Subcommand modules for the `gaqc` binary.

pub mod size;
pub mod uniq;
