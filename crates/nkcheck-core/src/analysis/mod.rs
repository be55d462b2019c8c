//! Analysis pipeline: normalization, comparison, savings, confidence.

pub mod analyzer;
pub mod compare;
pub mod confidence;
pub mod normalize;
pub mod savings;

pub use analyzer::BillAnalyzer;
pub use compare::Comparator;
pub use confidence::ConfidenceScorer;
pub use normalize::normalize;
pub use savings::SavingsEstimator;
