//! CLI subcommand implementations.

pub mod analyze;
pub mod effects;
pub mod generate;
pub mod process;
