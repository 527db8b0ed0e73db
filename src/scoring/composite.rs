//! Weighted composite creditworthiness score

use serde::{Deserialize, Serialize};

use super::curves;
use crate::amortization::annuity_payment;
use crate::classification::{ProductCategory, ProductClassification};
use crate::eligibility::EligibilityRules;
use crate::profile::{BureauStatus, DeclaredRatios, FinancialProfile, IncomeType};

pub const WEIGHT_DTI: f64 = 0.30;
pub const WEIGHT_LTV: f64 = 0.25;
pub const WEIGHT_STABILITY: f64 = 0.20;
pub const WEIGHT_AGE: f64 = 0.10;
pub const WEIGHT_INCOME_TYPE: f64 = 0.10;
pub const WEIGHT_BUREAU: f64 = 0.05;

/// Highest DTI the engine reports
pub const MAX_DTI: f64 = 2.0;

// Subscores below these thresholds emit a recommendation
const DTI_THRESHOLD: u8 = 75;
const LTV_THRESHOLD: u8 = 70;
const STABILITY_THRESHOLD: u8 = 65;
const AGE_THRESHOLD: u8 = 70;
const INCOME_TYPE_THRESHOLD: u8 = 85;
const BUREAU_THRESHOLD: u8 = 70;

pub const REC_REDUCE_DEBT: &str = "Reduce your monthly debt payments to lower your debt-to-income ratio";
pub const REC_INCREASE_DOWN_PAYMENT: &str =
    "Increase your down payment to reduce the financed share of the property";
pub const REC_BUILD_STABILITY: &str = "Build more time in your current job or business before applying";
pub const REC_AGE: &str = "Consider a shorter term or adding a co-borrower";
pub const REC_DOCUMENT_INCOME: &str =
    "Prepare tax returns and bank statements that document your independent income";
pub const REC_BUREAU: &str = "Regularize your credit bureau record before applying";
pub const REC_CITIZENSHIP: &str =
    "Subsidized products require citizenship; a private bank mortgage may be an alternative";

/// Score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    #[serde(rename = "alto")]
    High,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "bajo")]
    Low,
}

impl ScoreCategory {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreCategory::High
        } else if score >= 60 {
            ScoreCategory::Medium
        } else {
            ScoreCategory::Low
        }
    }
}

/// Raw value a subscore was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscore {
    pub score: u8,
    pub weight: f64,
    pub value: MetricValue,
}

impl Subscore {
    fn weighted(&self) -> f64 {
        self.score as f64 * self.weight
    }
}

/// Metrics fed into the curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Debt-to-income including the prospective mortgage payment
    pub dti: f64,
    pub ltv: f64,
    pub stability_years: f64,
    pub age: f64,
    pub income_type: IncomeType,
    pub bureau_status: BureauStatus,
}

impl ScoreInputs {
    /// Derive metrics from a profile and the product it was classified into
    pub fn derive(profile: &FinancialProfile, classification: &ProductClassification) -> Self {
        let payment = annuity_payment(
            profile.principal(),
            classification.nominal_rate / 12.0,
            classification.term_months,
        );
        let income = profile.household_income();
        let dti = if income > 0.0 {
            ((profile.monthly_debts + payment) / income).clamp(0.0, MAX_DTI)
        } else {
            MAX_DTI
        };

        Self {
            dti,
            ltv: profile.loan_to_value(),
            stability_years: profile.stability_years,
            age: profile.age,
            income_type: profile.income_type,
            bureau_status: profile.credit_bureau_status,
        }
    }

    /// Replace derived ratios with ratios declared on the source record
    pub fn with_declared(mut self, ratios: &DeclaredRatios) -> Self {
        if let Some(ltv) = ratios.ltv {
            self.ltv = ltv;
        }
        if let Some(dti) = ratios.dti {
            self.dti = dti;
        }
        self
    }

    pub fn with_ltv(mut self, ltv: f64) -> Self {
        self.ltv = ltv;
        self
    }
}

/// Product and pension context the recommendations depend on
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    pub profile: &'a FinancialProfile,
    pub classification: &'a ProductClassification,
    pub rules: &'a EligibilityRules,
}

/// Full scoring output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dti: Subscore,
    pub ltv: Subscore,
    pub stability: Subscore,
    pub age: Subscore,
    pub income_type: Subscore,
    pub bureau: Subscore,
    /// Weighted composite in [0, 100]
    pub score: u8,
    pub category: ScoreCategory,
    pub recommendations: Vec<String>,
}

impl ScoreBreakdown {
    /// Subscores in weight order
    pub fn subscores(&self) -> [&Subscore; 6] {
        [
            &self.dti,
            &self.ltv,
            &self.stability,
            &self.age,
            &self.income_type,
            &self.bureau,
        ]
    }
}

/// Score a set of metrics
pub fn score(inputs: &ScoreInputs, context: &ScoreContext<'_>) -> ScoreBreakdown {
    let dti = Subscore {
        score: curves::dti_score(inputs.dti),
        weight: WEIGHT_DTI,
        value: MetricValue::Number(inputs.dti),
    };
    let ltv = Subscore {
        score: curves::ltv_score(inputs.ltv),
        weight: WEIGHT_LTV,
        value: MetricValue::Number(inputs.ltv),
    };
    let stability = Subscore {
        score: curves::stability_score(inputs.stability_years),
        weight: WEIGHT_STABILITY,
        value: MetricValue::Number(inputs.stability_years),
    };
    let age = Subscore {
        score: curves::age_score(inputs.age),
        weight: WEIGHT_AGE,
        value: MetricValue::Number(inputs.age),
    };
    let income_type = Subscore {
        score: curves::income_type_score(inputs.income_type),
        weight: WEIGHT_INCOME_TYPE,
        value: MetricValue::Label(label(&inputs.income_type)),
    };
    let bureau = Subscore {
        score: curves::bureau_score(inputs.bureau_status),
        weight: WEIGHT_BUREAU,
        value: MetricValue::Label(label(&inputs.bureau_status)),
    };

    let total: f64 = [&dti, &ltv, &stability, &age, &income_type, &bureau]
        .iter()
        .map(|s| s.weighted())
        .sum();
    let composite = total.round().clamp(0.0, 100.0) as u8;

    let mut recommendations = Vec::new();
    let factor_checks = [
        (dti.score, DTI_THRESHOLD, REC_REDUCE_DEBT),
        (ltv.score, LTV_THRESHOLD, REC_INCREASE_DOWN_PAYMENT),
        (stability.score, STABILITY_THRESHOLD, REC_BUILD_STABILITY),
        (age.score, AGE_THRESHOLD, REC_AGE),
        (income_type.score, INCOME_TYPE_THRESHOLD, REC_DOCUMENT_INCOME),
        (bureau.score, BUREAU_THRESHOLD, REC_BUREAU),
    ];
    for (subscore, threshold, message) in factor_checks {
        if subscore < threshold {
            recommendations.push(message.to_string());
        }
    }
    recommendations.extend(context_recommendations(context));

    ScoreBreakdown {
        dti,
        ltv,
        stability,
        age,
        income_type,
        bureau,
        score: composite,
        category: ScoreCategory::from_score(composite),
        recommendations,
    }
}

fn context_recommendations(context: &ScoreContext<'_>) -> Vec<String> {
    let profile = context.profile;
    let rules = context.rules;
    let mut out = Vec::new();

    match context.classification.category {
        ProductCategory::PensionFund => {
            if profile.pension_contributions_total < rules.min_pension_contributions_total {
                out.push(format!(
                    "Keep contributing to the pension fund until you reach {} total contributions",
                    rules.min_pension_contributions_total
                ));
            }
            if profile.pension_contributions_consecutive < rules.min_pension_contributions_consecutive {
                out.push(format!(
                    "Maintain {} consecutive monthly pension contributions before applying",
                    rules.min_pension_contributions_consecutive
                ));
            }
        }
        category if category.is_subsidized() && !profile.nationality.is_domestic() => {
            out.push(REC_CITIZENSHIP.to_string());
        }
        _ => {}
    }

    out
}

fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}
