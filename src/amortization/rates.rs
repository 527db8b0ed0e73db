//! Rate inference when no explicit rate is available

use serde::{Deserialize, Serialize};

use crate::classification::ProductCategory;

/// Annual rate range, fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
    /// Point estimate used when a single rate is needed
    pub mid: f64,
}

impl RateRange {
    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }
}

pub const PRIVATE_RANGE: RateRange = RateRange {
    min: 0.089,
    max: 0.105,
    mid: 0.097,
};

pub const PENSION_FUND_RANGE: RateRange = RateRange {
    min: 0.0499,
    max: 0.062,
    mid: 0.056,
};

pub const SUBSIDIZED_MID_RANGE: RateRange = RateRange {
    min: 0.0499,
    max: 0.07,
    mid: 0.060,
};

pub const SUBSIDIZED_LOW_RANGE: RateRange = RateRange {
    min: 0.0488,
    max: 0.084,
    mid: 0.066,
};

/// Market range for a category; unknown categories get the private bank range
pub fn infer_rate(category: Option<ProductCategory>) -> RateRange {
    match category {
        Some(ProductCategory::SubsidizedLow) => SUBSIDIZED_LOW_RANGE,
        Some(ProductCategory::SubsidizedMid) => SUBSIDIZED_MID_RANGE,
        Some(ProductCategory::PensionFund) => PENSION_FUND_RANGE,
        Some(ProductCategory::Private) | None => PRIVATE_RANGE,
    }
}

/// Same as [`infer_rate`] for a free-form label
pub fn infer_rate_from_label(label: &str) -> RateRange {
    let category = ProductCategory::parse(label);
    if category.is_none() {
        log::debug!("unrecognized product label {label:?}, using private bank range");
    }
    infer_rate(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_midpoints() {
        assert_eq!(infer_rate(Some(ProductCategory::Private)).mid, 0.097);
        assert_eq!(infer_rate(Some(ProductCategory::PensionFund)).mid, 0.056);
        assert_eq!(infer_rate(Some(ProductCategory::SubsidizedMid)).mid, 0.060);
        assert_eq!(infer_rate(Some(ProductCategory::SubsidizedLow)).mid, 0.066);
    }

    #[test]
    fn test_missing_category_defaults_to_private() {
        assert_eq!(infer_rate(None), PRIVATE_RANGE);
        assert_eq!(infer_rate_from_label(""), PRIVATE_RANGE);
        assert_eq!(infer_rate_from_label("unknown product"), PRIVATE_RANGE);
        assert_eq!(infer_rate_from_label("BIESS"), PENSION_FUND_RANGE);
    }

    #[test]
    fn test_ranges_are_ordered() {
        for category in ProductCategory::ALL {
            let range = infer_rate(Some(category));
            assert!(range.min <= range.mid && range.mid <= range.max, "{category}");
            assert!(range.contains(range.mid));
        }
    }
}
