//! Policy constants for product classification
//!
//! Reference values follow the housing programme limits in force when the
//! engine was calibrated. Every value can be overridden through
//! `EngineConfig`.

use serde::{Deserialize, Serialize};

use super::ProductCategory;

/// Nominal annual rate and term for one product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductTerms {
    /// Annual nominal rate as a fraction
    pub nominal_rate: f64,
    pub term_months: u32,
}

/// Price and income ceilings plus the terms of each product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyLimits {
    pub low_income_price_ceiling: f64,
    pub low_income_income_ceiling: f64,
    pub mid_income_price_ceiling: f64,
    pub mid_income_income_ceiling: f64,

    pub subsidized_low: ProductTerms,
    pub subsidized_mid: ProductTerms,
    pub pension_fund: ProductTerms,

    /// Private bank terms for loans at or below `private_ltv_break`
    pub private_standard: ProductTerms,
    /// Private bank terms above `private_ltv_break`
    pub private_high_ltv: ProductTerms,
    pub private_ltv_break: f64,
}

impl Default for PolicyLimits {
    fn default() -> Self {
        Self {
            low_income_price_ceiling: 83_660.0,
            low_income_income_ceiling: 1_380.0,
            mid_income_price_ceiling: 107_630.0,
            mid_income_income_ceiling: 2_300.0,
            subsidized_low: ProductTerms {
                nominal_rate: 0.0488,
                term_months: 240,
            },
            subsidized_mid: ProductTerms {
                nominal_rate: 0.0499,
                term_months: 300,
            },
            pension_fund: ProductTerms {
                nominal_rate: 0.069,
                term_months: 240,
            },
            private_standard: ProductTerms {
                nominal_rate: 0.099,
                term_months: 240,
            },
            private_high_ltv: ProductTerms {
                nominal_rate: 0.115,
                term_months: 240,
            },
            private_ltv_break: 0.80,
        }
    }
}

impl PolicyLimits {
    /// Terms for a category; private uses the LTV tier
    pub fn terms_for(&self, category: ProductCategory, ltv: f64) -> ProductTerms {
        match category {
            ProductCategory::SubsidizedLow => self.subsidized_low,
            ProductCategory::SubsidizedMid => self.subsidized_mid,
            ProductCategory::PensionFund => self.pension_fund,
            ProductCategory::Private if ltv > self.private_ltv_break => self.private_high_ltv,
            ProductCategory::Private => self.private_standard,
        }
    }

    /// Check internal consistency, returning a description of the first problem
    pub fn validate(&self) -> Result<(), String> {
        let amounts = [
            ("low_income_price_ceiling", self.low_income_price_ceiling),
            ("low_income_income_ceiling", self.low_income_income_ceiling),
            ("mid_income_price_ceiling", self.mid_income_price_ceiling),
            ("mid_income_income_ceiling", self.mid_income_income_ceiling),
            ("private_ltv_break", self.private_ltv_break),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        if self.mid_income_price_ceiling < self.low_income_price_ceiling {
            return Err("mid_income_price_ceiling is below low_income_price_ceiling".to_string());
        }
        if self.mid_income_income_ceiling < self.low_income_income_ceiling {
            return Err("mid_income_income_ceiling is below low_income_income_ceiling".to_string());
        }

        let products = [
            ("subsidized_low", self.subsidized_low),
            ("subsidized_mid", self.subsidized_mid),
            ("pension_fund", self.pension_fund),
            ("private_standard", self.private_standard),
            ("private_high_ltv", self.private_high_ltv),
        ];
        for (name, terms) in products {
            if !terms.nominal_rate.is_finite() || terms.nominal_rate < 0.0 {
                return Err(format!("{name}.nominal_rate must be a non-negative fraction"));
            }
            if terms.term_months == 0 {
                return Err(format!("{name}.term_months must be positive"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PolicyLimits::default().validate().is_ok());
    }

    #[test]
    fn test_private_tiers() {
        let limits = PolicyLimits::default();
        assert_eq!(limits.terms_for(ProductCategory::Private, 0.80).nominal_rate, 0.099);
        assert_eq!(limits.terms_for(ProductCategory::Private, 0.81).nominal_rate, 0.115);
        assert_eq!(limits.terms_for(ProductCategory::SubsidizedMid, 0.95).term_months, 300);
    }

    #[test]
    fn test_inverted_ceilings_rejected() {
        let limits = PolicyLimits {
            mid_income_price_ceiling: 50_000.0,
            ..Default::default()
        };
        assert!(limits.validate().is_err());

        let limits = PolicyLimits {
            pension_fund: ProductTerms {
                nominal_rate: 0.069,
                term_months: 0,
            },
            ..Default::default()
        };
        assert!(limits.validate().is_err());
    }
}
