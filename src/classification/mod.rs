//! Mortgage product categories and the classifier that selects one

mod classifier;
mod policy;

pub use classifier::{ProductClassification, ProductClassifier};
pub use policy::{PolicyLimits, ProductTerms};

use serde::{Deserialize, Serialize};

/// Mortgage product families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Government-backed, lowest price and income ceilings
    SubsidizedLow,
    /// Government-backed, middle price and income ceilings
    SubsidizedMid,
    /// Issued through the public pension lender
    PensionFund,
    /// Commercial bank mortgage
    Private,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::SubsidizedLow,
        ProductCategory::SubsidizedMid,
        ProductCategory::PensionFund,
        ProductCategory::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::SubsidizedLow => "subsidized-low",
            ProductCategory::SubsidizedMid => "subsidized-mid",
            ProductCategory::PensionFund => "pension-fund",
            ProductCategory::Private => "private",
        }
    }

    pub fn is_subsidized(&self) -> bool {
        matches!(self, ProductCategory::SubsidizedLow | ProductCategory::SubsidizedMid)
    }

    /// Lenient label parsing (English or Spanish product names)
    pub fn parse(label: &str) -> Option<Self> {
        let folded = label.trim().to_lowercase().replace(['_', ' '], "-");
        match folded.as_str() {
            "subsidized-low" | "vis" | "vivienda-interes-social" | "vivienda-de-interes-social" => {
                Some(ProductCategory::SubsidizedLow)
            }
            "subsidized-mid" | "vip" | "vivienda-interes-publico" | "vivienda-de-interes-publico" => {
                Some(ProductCategory::SubsidizedMid)
            }
            "pension-fund" | "pension" | "biess" | "iess" => Some(ProductCategory::PensionFund),
            "private" | "bank" | "private-bank" | "banca-privada" | "banco" => {
                Some(ProductCategory::Private)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(ProductCategory::parse("VIS"), Some(ProductCategory::SubsidizedLow));
        assert_eq!(ProductCategory::parse("subsidized_mid"), Some(ProductCategory::SubsidizedMid));
        assert_eq!(ProductCategory::parse("BIESS"), Some(ProductCategory::PensionFund));
        assert_eq!(ProductCategory::parse("Banca privada"), Some(ProductCategory::Private));
        assert_eq!(ProductCategory::parse("crypto"), None);

        for category in ProductCategory::ALL {
            assert_eq!(ProductCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ProductCategory::PensionFund).unwrap();
        assert_eq!(json, "\"pension-fund\"");
    }
}
