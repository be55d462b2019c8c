//! Core library for German utility bill (Nebenkostenabrechnung) analysis.
//!
//! This crate provides:
//! - Field extraction from OCR text (postal code, floor area, period, costs)
//! - Postal-code resolution to regional cost baselines
//! - Cost normalization to €/m²/month and comparison against baselines
//! - Savings estimation and a data-quality confidence score

pub mod analysis;
pub mod energy;
pub mod error;
pub mod extract;
pub mod models;
pub mod region;

pub use analysis::{BillAnalyzer, Comparator, ConfidenceScorer, SavingsEstimator};
pub use energy::{EnergyLookup, HttpEnergyLookup, StaticEnergyLookup};
pub use error::{LocationError, NkError, Result, ValidationError};
pub use extract::{BillParser, FieldExtractor};
pub use models::analysis::{AnalysisResult, Band, Comparison, NormalizedCosts, SavingsEstimate};
pub use models::bill::{BillDraft, BillRecord, BillingPeriod, CostBreakdown};
pub use models::config::AnalyzerConfig;
pub use models::region::{DataQuality, RegionalProfile};
pub use region::{HttpResolver, LocationResolver, StaticResolver};
