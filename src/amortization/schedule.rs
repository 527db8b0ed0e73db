//! Amortization schedule output structures

use serde::{Deserialize, Serialize};

/// One month of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Outstanding balance after this month's payment
    pub balance: f64,
}

/// Sums over the projected rows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScheduleTotals {
    pub payment_sum: f64,
    pub interest_sum: f64,
    pub principal_sum: f64,
    pub ending_balance: f64,
}

/// Complete projection for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: f64,
    /// Annual nominal rate actually used, as a fraction
    pub annual_rate: f64,
    pub term_months: u32,
    pub monthly_payment: f64,
    pub rows: Vec<AmortizationRow>,
    pub totals: ScheduleTotals,
    /// Payment at the stressed rate, same principal and term
    pub stress_payment: f64,
    /// Stressed annual rate, as a fraction
    pub stress_rate: f64,
}

impl AmortizationSchedule {
    pub(crate) fn new(
        principal: f64,
        annual_rate: f64,
        term_months: u32,
        monthly_payment: f64,
        stress_rate: f64,
        stress_payment: f64,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
            monthly_payment,
            rows: Vec::new(),
            totals: ScheduleTotals {
                ending_balance: principal,
                ..Default::default()
            },
            stress_payment,
            stress_rate,
        }
    }

    /// Append a row and fold it into the totals
    pub(crate) fn add_row(&mut self, row: AmortizationRow) {
        self.totals.payment_sum += row.payment;
        self.totals.interest_sum += row.interest;
        self.totals.principal_sum += row.principal;
        self.totals.ending_balance = row.balance;
        self.rows.push(row);
    }

    /// Extra monthly cost under the stressed rate
    pub fn stress_increase(&self) -> f64 {
        self.stress_payment - self.monthly_payment
    }

    /// Interest paid over the whole term, whatever the projected horizon
    pub fn total_interest_full_term(&self) -> f64 {
        (self.monthly_payment * self.term_months as f64 - self.principal).max(0.0)
    }

    pub fn horizon_months(&self) -> u32 {
        self.rows.len() as u32
    }
}
