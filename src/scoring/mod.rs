//! Subscore curves and the weighted composite score

pub mod curves;
mod composite;

pub use composite::{
    score, MetricValue, ScoreBreakdown, ScoreCategory, ScoreContext, ScoreInputs, Subscore,
    MAX_DTI, WEIGHT_AGE, WEIGHT_BUREAU, WEIGHT_DTI, WEIGHT_INCOME_TYPE, WEIGHT_LTV,
    WEIGHT_STABILITY,
};
