//! Mortgage Engine - eligibility, product classification and amortization decisions
//!
//! This library provides:
//! - Normalization of loosely shaped lead records into a canonical profile
//! - Six subscore curves and a weighted composite creditworthiness score
//! - Product classification (subsidized, pension fund, private bank)
//! - Hard eligibility rules per product
//! - Amortization schedules with a stress-tested payment
//! - Rate inference when no explicit rate is available

pub mod profile;
pub mod scoring;
pub mod classification;
pub mod eligibility;
pub mod amortization;
pub mod engine;
pub mod config;
pub mod error;
pub mod scenario;

// Re-export commonly used types
pub use profile::{FinancialProfile, Normalizer, RawProfileInput};
pub use classification::{ProductCategory, ProductClassification, ProductClassifier};
pub use eligibility::{check_eligibility, EligibilityResult};
pub use scoring::{ScoreBreakdown, ScoreCategory};
pub use amortization::{infer_rate, AmortizationSchedule, RateRange};
pub use engine::{evaluate, project_amortization, Assessment, Evaluation, MortgageEngine};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use scenario::ScenarioRunner;
