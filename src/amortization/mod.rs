//! Loan amortization: annuity payment, schedules, stress test and rate inference

mod projector;
mod rates;
mod schedule;

pub use projector::{annuity_payment, AmortizationProjector, AmortizationSettings};
pub use rates::{
    infer_rate, infer_rate_from_label, RateRange, PENSION_FUND_RANGE, PRIVATE_RANGE,
    SUBSIDIZED_LOW_RANGE, SUBSIDIZED_MID_RANGE,
};
pub use schedule::{AmortizationRow, AmortizationSchedule, ScheduleTotals};
