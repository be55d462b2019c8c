//! Data models for bills, regional baselines, and analysis results.

pub mod analysis;
pub mod bill;
pub mod config;
pub mod region;
