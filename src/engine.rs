//! Decision engine entry points
//!
//! Control flow for one applicant:
//! normalize -> classify -> eligibility gate -> composite score -> amortization.
//! Everything is pure; the engine holds only immutable configuration and can
//! be shared freely across threads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amortization::{infer_rate, AmortizationProjector, AmortizationSchedule, RateRange};
use crate::classification::{ProductCategory, ProductClassification, ProductClassifier};
use crate::config::EngineConfig;
use crate::eligibility::{check_eligibility, EligibilityResult};
use crate::profile::{DeclaredRatios, FinancialProfile, NormalizedProfile, Normalizer, RawProfileInput};
use crate::scoring::{score, ScoreBreakdown, ScoreContext, ScoreInputs};

/// Result of the core decision call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub classification: ProductClassification,
    pub eligibility: EligibilityResult,
    pub score: ScoreBreakdown,
}

/// Evaluation plus the projected loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub profile: FinancialProfile,
    pub evaluation: Evaluation,
    pub schedule: AmortizationSchedule,
}

/// Configured engine
#[derive(Debug, Clone)]
pub struct MortgageEngine {
    config: EngineConfig,
    normalizer: Normalizer,
    classifier: ProductClassifier,
    projector: AmortizationProjector,
}

impl MortgageEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.normalizer.clone()),
            classifier: ProductClassifier::new(config.policy.clone()),
            projector: AmortizationProjector::new(config.amortization.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Classify, gate and score a normalized profile
    ///
    /// Without a property value the LTV falls back to the normalizer default,
    /// exactly as it does for raw records.
    pub fn evaluate(&self, profile: &FinancialProfile) -> Evaluation {
        let ltv = self.normalizer.resolve_ltv(profile, None);
        self.evaluate_at(profile, ltv, &DeclaredRatios::default())
    }

    /// Normalize a raw record, then evaluate it
    ///
    /// Ratios declared on the record take precedence over derived ones.
    pub fn evaluate_raw(&self, raw: &RawProfileInput) -> (NormalizedProfile, Evaluation) {
        let normalized = self.normalizer.normalize(raw);
        let evaluation = self.evaluate_normalized(&normalized);
        (normalized, evaluation)
    }

    /// Normalize and evaluate a JSON record
    pub fn evaluate_value(&self, value: Value) -> (NormalizedProfile, Evaluation) {
        self.evaluate_raw(&RawProfileInput::from_value(value))
    }

    pub fn evaluate_normalized(&self, normalized: &NormalizedProfile) -> Evaluation {
        let ltv = normalized.ratios.ltv.unwrap_or(normalized.ltv);
        self.evaluate_at(&normalized.profile, ltv, &normalized.ratios)
    }

    /// Price, gate and score at a resolved LTV; a declared DTI replaces the derived one
    fn evaluate_at(&self, profile: &FinancialProfile, ltv: f64, ratios: &DeclaredRatios) -> Evaluation {
        let classification = self.classifier.classify_with_ltv(profile, ltv);
        let inputs = ScoreInputs::derive(profile, &classification)
            .with_ltv(ltv)
            .with_declared(ratios);

        let eligibility = check_eligibility(profile, classification.category, &self.config.eligibility);
        let context = ScoreContext {
            profile,
            classification: &classification,
            rules: &self.config.eligibility,
        };
        let score = score(&inputs, &context);

        log::debug!(
            "evaluation: {} eligible={} score={}",
            classification.category,
            eligibility.eligible,
            score.score
        );

        Evaluation {
            classification,
            eligibility,
            score,
        }
    }

    /// Evaluate and project the loan with the classified rate and term
    pub fn assess(&self, profile: &FinancialProfile, horizon_months: Option<u32>) -> Assessment {
        let evaluation = self.evaluate(profile);
        let schedule = self.projector.project(
            profile.principal(),
            evaluation.classification.nominal_rate,
            evaluation.classification.term_months,
            horizon_months,
        );
        Assessment {
            profile: profile.clone(),
            evaluation,
            schedule,
        }
    }

    /// Standalone projection; `annual_rate_pct` in percent, `None` infers the private rate
    pub fn project_amortization(
        &self,
        principal: f64,
        annual_rate_pct: Option<f64>,
        term_years: u32,
        horizon_months: Option<u32>,
    ) -> AmortizationSchedule {
        self.projector
            .project_pct(principal, annual_rate_pct, term_years, horizon_months)
    }

    /// Standalone projection falling back to `category`'s inferred rate
    pub fn project_amortization_for(
        &self,
        category: Option<ProductCategory>,
        principal: f64,
        annual_rate_pct: Option<f64>,
        term_years: u32,
        horizon_months: Option<u32>,
    ) -> AmortizationSchedule {
        self.projector
            .project_for(category, principal, annual_rate_pct, term_years, horizon_months)
    }

    pub fn infer_rate(&self, category: Option<ProductCategory>) -> RateRange {
        infer_rate(category)
    }
}

impl Default for MortgageEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Evaluate with the reference configuration
pub fn evaluate(profile: &FinancialProfile) -> Evaluation {
    MortgageEngine::default().evaluate(profile)
}

/// Project with the reference configuration
pub fn project_amortization(
    principal: f64,
    annual_rate_pct: Option<f64>,
    term_years: u32,
    horizon_months: Option<u32>,
) -> AmortizationSchedule {
    AmortizationProjector::default().project_pct(principal, annual_rate_pct, term_years, horizon_months)
}
