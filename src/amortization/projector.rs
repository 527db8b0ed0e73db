//! Fixed-rate annuity payment and month-by-month schedule

use serde::{Deserialize, Serialize};

use super::rates::infer_rate;
use super::schedule::{AmortizationRow, AmortizationSchedule};
use crate::classification::ProductCategory;

/// Projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmortizationSettings {
    /// Rows produced when the caller does not ask for a horizon
    pub default_horizon_months: u32,
    /// Rate shock for the stress payment, in percentage points
    pub stress_delta_pct_points: f64,
}

impl Default for AmortizationSettings {
    fn default() -> Self {
        Self {
            default_horizon_months: 12,
            stress_delta_pct_points: 2.0,
        }
    }
}

/// Level monthly payment that repays `principal` over `n_months`
///
/// `P·r / (1 − (1+r)^−n)`, or `P/n` when the rate is zero.
pub fn annuity_payment(principal: f64, monthly_rate: f64, n_months: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    if n_months == 0 {
        return principal;
    }
    let n = n_months as f64;
    if monthly_rate <= 0.0 {
        return principal / n;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-n))
}

/// Builds amortization schedules
#[derive(Debug, Clone, Default)]
pub struct AmortizationProjector {
    settings: AmortizationSettings,
}

impl AmortizationProjector {
    pub fn new(settings: AmortizationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AmortizationSettings {
        &self.settings
    }

    /// Project with an explicit annual rate given as a fraction
    ///
    /// `horizon_months` defaults to the configured horizon and never exceeds
    /// the term.
    pub fn project(
        &self,
        principal: f64,
        annual_rate: f64,
        term_months: u32,
        horizon_months: Option<u32>,
    ) -> AmortizationSchedule {
        let principal = if principal.is_finite() { principal.max(0.0) } else { 0.0 };
        let annual_rate = if annual_rate.is_finite() { annual_rate.max(0.0) } else { 0.0 };
        let term_months = term_months.max(1);
        let horizon = horizon_months
            .unwrap_or(self.settings.default_horizon_months)
            .min(term_months);

        let monthly_rate = annual_rate / 12.0;
        let payment = annuity_payment(principal, monthly_rate, term_months);

        let stress_rate = annual_rate + self.settings.stress_delta_pct_points / 100.0;
        let stress_payment = annuity_payment(principal, stress_rate / 12.0, term_months);

        let mut schedule = AmortizationSchedule::new(
            principal,
            annual_rate,
            term_months,
            payment,
            stress_rate,
            stress_payment,
        );

        let mut balance = principal;
        for month in 1..=horizon {
            let interest = balance * monthly_rate;
            let principal_part = (payment - interest).min(balance);
            let mut next = (balance - principal_part).max(0.0);
            if month == term_months {
                next = 0.0;
            }

            schedule.add_row(AmortizationRow {
                month,
                payment: interest + principal_part,
                interest,
                principal: principal_part,
                balance: next,
            });
            balance = next;
        }

        log::debug!(
            "projected {horizon} of {term_months} months: principal {principal:.2}, rate {annual_rate:.4}, payment {payment:.2}, stress {stress_payment:.2}"
        );

        schedule
    }

    /// Project from a rate in percent (e.g. `4.99`) and a term in years
    ///
    /// A missing rate falls back to the private bank midpoint.
    pub fn project_pct(
        &self,
        principal: f64,
        annual_rate_pct: Option<f64>,
        term_years: u32,
        horizon_months: Option<u32>,
    ) -> AmortizationSchedule {
        self.project_for(None, principal, annual_rate_pct, term_years, horizon_months)
    }

    /// As [`project_pct`](Self::project_pct), falling back to the category's midpoint
    pub fn project_for(
        &self,
        category: Option<ProductCategory>,
        principal: f64,
        annual_rate_pct: Option<f64>,
        term_years: u32,
        horizon_months: Option<u32>,
    ) -> AmortizationSchedule {
        let annual_rate = match annual_rate_pct.filter(|r| r.is_finite()) {
            Some(pct) => pct / 100.0,
            None => {
                let inferred = infer_rate(category).mid;
                log::debug!("no explicit rate, using inferred {inferred:.4}");
                inferred
            }
        };
        self.project(principal, annual_rate, term_years.saturating_mul(12), horizon_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_closed_form_payment() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project_pct(71_500.0, Some(4.99), 20, None);

        let r: f64 = 0.0499 / 12.0;
        let n = 240.0;
        let expected = 71_500.0 * r / (1.0 - (1.0 + r).powf(-n));
        assert_relative_eq!(schedule.monthly_payment, expected, max_relative = 1e-6);
        assert_eq!(schedule.rows.len(), 12);
        assert_eq!(schedule.term_months, 240);
    }

    #[test]
    fn test_first_row_split() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project(120_000.0, 0.06, 360, Some(1));
        let row = schedule.rows[0];

        assert_eq!(row.month, 1);
        assert_abs_diff_eq!(row.interest, 600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.principal, schedule.monthly_payment - 600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.balance, 120_000.0 - row.principal, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule.totals.ending_balance, row.balance, epsilon = 1e-12);
    }

    #[test]
    fn test_full_term_repays_principal() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project(75_000.0, 0.0499, 300, Some(300));

        assert_eq!(schedule.rows.len(), 300);
        assert_abs_diff_eq!(schedule.totals.principal_sum, 75_000.0, epsilon = 1e-6);
        assert_eq!(schedule.totals.ending_balance, 0.0);
        assert_abs_diff_eq!(
            schedule.totals.interest_sum,
            schedule.total_interest_full_term(),
            epsilon = 1e-6
        );

        let mut prev = schedule.principal;
        for row in &schedule.rows {
            assert!(row.balance <= prev);
            assert!(row.balance >= 0.0);
            prev = row.balance;
        }
    }

    #[test]
    fn test_horizon_capped_at_term() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project(10_000.0, 0.05, 24, Some(600));
        assert_eq!(schedule.rows.len(), 24);
        assert_eq!(schedule.rows.last().map(|r| r.balance), Some(0.0));
    }

    #[test]
    fn test_zero_rate() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project(12_000.0, 0.0, 12, None);
        assert_abs_diff_eq!(schedule.monthly_payment, 1_000.0, epsilon = 1e-12);
        assert!(schedule.rows.iter().all(|r| r.interest == 0.0));
        assert_eq!(schedule.totals.ending_balance, 0.0);
    }

    #[test]
    fn test_stress_payment() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project(100_000.0, 0.0499, 240, None);

        assert_abs_diff_eq!(schedule.stress_rate, 0.0699, epsilon = 1e-12);
        let expected = annuity_payment(100_000.0, 0.0699 / 12.0, 240);
        assert_relative_eq!(schedule.stress_payment, expected, max_relative = 1e-12);
        assert!(schedule.stress_increase() > 0.0);

        // Stress does not touch the schedule itself
        let unstressed = AmortizationProjector::new(AmortizationSettings {
            stress_delta_pct_points: 0.0,
            ..Default::default()
        })
        .project(100_000.0, 0.0499, 240, None);
        assert_eq!(unstressed.rows, schedule.rows);
    }

    #[test]
    fn test_missing_rate_falls_back() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project_pct(50_000.0, None, 20, None);
        assert_eq!(schedule.annual_rate, 0.097);

        let schedule = projector.project_for(Some(ProductCategory::PensionFund), 50_000.0, None, 20, None);
        assert_eq!(schedule.annual_rate, 0.056);

        let schedule = projector.project_for(Some(ProductCategory::PensionFund), 50_000.0, Some(6.9), 20, None);
        assert_abs_diff_eq!(schedule.annual_rate, 0.069, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_principal() {
        let projector = AmortizationProjector::default();
        let schedule = projector.project(0.0, 0.08, 240, None);
        assert_eq!(schedule.monthly_payment, 0.0);
        assert_eq!(schedule.stress_payment, 0.0);
        assert!(schedule.rows.iter().all(|r| r.payment == 0.0 && r.balance == 0.0));
    }
}
