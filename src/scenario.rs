//! What-if runner
//!
//! Holds one configured engine and re-evaluates a profile under alternative
//! down payments or rates, e.g. for a "what if I put down more" preview.

use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSchedule;
use crate::config::EngineConfig;
use crate::engine::{Assessment, MortgageEngine};
use crate::profile::FinancialProfile;

/// One point of a rate sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateScenario {
    /// Annual rate in percent
    pub annual_rate_pct: f64,
    pub schedule: AmortizationSchedule,
}

/// Pre-configured scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for assessment in runner.run_down_payments(&profile, &[10_000.0, 20_000.0]) {
///     println!("{} -> {}", assessment.profile.down_payment, assessment.evaluation.score.score);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: MortgageEngine,
}

impl ScenarioRunner {
    /// Runner with the reference configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: MortgageEngine::new(config),
        }
    }

    pub fn engine(&self) -> &MortgageEngine {
        &self.engine
    }

    /// Assess the profile once per down payment
    pub fn run_down_payments(&self, profile: &FinancialProfile, down_payments: &[f64]) -> Vec<Assessment> {
        down_payments
            .iter()
            .map(|&down_payment| {
                let variant = FinancialProfile {
                    down_payment: down_payment.max(0.0),
                    ..profile.clone()
                };
                self.engine.assess(&variant, None)
            })
            .collect()
    }

    /// Project the profile's loan at each rate (percent), keeping its term
    pub fn run_rates(&self, profile: &FinancialProfile, rates_pct: &[f64], term_years: u32) -> Vec<RateScenario> {
        rates_pct
            .iter()
            .map(|&rate| RateScenario {
                annual_rate_pct: rate,
                schedule: self
                    .engine
                    .project_amortization(profile.principal(), Some(rate), term_years, None),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> FinancialProfile {
        FinancialProfile {
            monthly_income: 2_000.0,
            monthly_debts: 200.0,
            property_value: 100_000.0,
            down_payment: 5_000.0,
            stability_years: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_larger_down_payment_never_hurts() {
        let runner = ScenarioRunner::new();
        let results = runner.run_down_payments(&test_profile(), &[5_000.0, 20_000.0, 40_000.0]);
        assert_eq!(results.len(), 3);

        for pair in results.windows(2) {
            assert!(pair[1].evaluation.score.score >= pair[0].evaluation.score.score);
            assert!(pair[1].schedule.monthly_payment < pair[0].schedule.monthly_payment);
        }
    }

    #[test]
    fn test_rate_sweep() {
        let runner = ScenarioRunner::new();
        let results = runner.run_rates(&test_profile(), &[5.0, 7.0, 9.0], 20);
        assert_eq!(results.len(), 3);
        assert!(results[2].schedule.monthly_payment > results[0].schedule.monthly_payment);
        assert!(results.iter().all(|r| r.schedule.term_months == 240));
    }
}
