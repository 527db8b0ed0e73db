//! Hard eligibility rules per product category
//!
//! Independent of the composite score. Reasons are data, produced in a fixed
//! order: nationality, then contribution total, then consecutive months.

use serde::{Deserialize, Serialize};

use crate::classification::ProductCategory;
use crate::profile::FinancialProfile;

pub const REASON_SUBSIDIZED_CITIZENS_ONLY: &str = "subsidized products restricted to citizens";

/// Contribution requirements for the pension-fund product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    pub min_pension_contributions_total: f64,
    pub min_pension_contributions_consecutive: f64,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            min_pension_contributions_total: 36.0,
            min_pension_contributions_consecutive: 13.0,
        }
    }
}

/// Outcome of the eligibility gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub reasons: Vec<String>,
}

impl EligibilityResult {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            eligible: reasons.is_empty(),
            reasons,
        }
    }
}

/// Evaluate the hard rules for `category`
pub fn check_eligibility(
    profile: &FinancialProfile,
    category: ProductCategory,
    rules: &EligibilityRules,
) -> EligibilityResult {
    let mut reasons = Vec::new();

    if category.is_subsidized() && !profile.nationality.is_domestic() {
        reasons.push(REASON_SUBSIDIZED_CITIZENS_ONLY.to_string());
    }

    if category == ProductCategory::PensionFund {
        if profile.pension_contributions_total < rules.min_pension_contributions_total {
            reasons.push(format!(
                "pension-fund product requires at least {} total monthly contributions ({} declared)",
                rules.min_pension_contributions_total, profile.pension_contributions_total
            ));
        }
        if profile.pension_contributions_consecutive < rules.min_pension_contributions_consecutive {
            reasons.push(format!(
                "pension-fund product requires at least {} consecutive monthly contributions ({} declared)",
                rules.min_pension_contributions_consecutive, profile.pension_contributions_consecutive
            ));
        }
    }

    EligibilityResult::from_reasons(reasons)
}
