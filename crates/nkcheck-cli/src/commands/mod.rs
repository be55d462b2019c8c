//! CLI subcommands.

pub mod analyze;
pub mod config;
pub mod extract;
pub mod regions;
