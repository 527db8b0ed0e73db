//! Product classification decision tree

use serde::{Deserialize, Serialize};

use super::policy::PolicyLimits;
use super::ProductCategory;
use crate::profile::FinancialProfile;

/// Selected product with its nominal terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductClassification {
    pub category: ProductCategory,
    /// Annual nominal rate as a fraction
    pub nominal_rate: f64,
    pub term_months: u32,
}

impl ProductClassification {
    pub fn term_years(&self) -> u32 {
        self.term_months.div_ceil(12)
    }
}

/// Evaluates the decision tree against a set of policy limits
#[derive(Debug, Clone, Default)]
pub struct ProductClassifier {
    limits: PolicyLimits,
}

impl ProductClassifier {
    pub fn new(limits: PolicyLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &PolicyLimits {
        &self.limits
    }

    /// Pick the product category; first matching branch wins
    ///
    /// 1. first home, price and income under the low ceilings -> subsidized low
    /// 2. first home, price and income under the mid ceilings -> subsidized mid
    /// 3. pension affiliated -> pension fund
    /// 4. otherwise private bank
    pub fn category(&self, profile: &FinancialProfile) -> ProductCategory {
        let limits = &self.limits;
        let first_home = !profile.owns_property;
        let income = profile.effective_income();
        let price = profile.property_value;

        if first_home
            && price <= limits.low_income_price_ceiling
            && income <= limits.low_income_income_ceiling
        {
            ProductCategory::SubsidizedLow
        } else if first_home
            && price <= limits.mid_income_price_ceiling
            && income <= limits.mid_income_income_ceiling
        {
            ProductCategory::SubsidizedMid
        } else if profile.pension_affiliated {
            ProductCategory::PensionFund
        } else {
            ProductCategory::Private
        }
    }

    /// Classify a profile and attach the category's terms
    pub fn classify(&self, profile: &FinancialProfile) -> ProductClassification {
        self.classify_with_ltv(profile, profile.loan_to_value())
    }

    /// As [`classify`](Self::classify), pricing the private tier at `ltv`
    /// instead of the profile's computed LTV
    pub fn classify_with_ltv(&self, profile: &FinancialProfile, ltv: f64) -> ProductClassification {
        let category = self.category(profile);
        let terms = self.limits.terms_for(category, ltv);

        log::trace!(
            "classified as {} (price {:.2}, effective income {:.2}, owns property {})",
            category.as_str(),
            profile.property_value,
            profile.effective_income(),
            profile.owns_property,
        );

        ProductClassification {
            category,
            nominal_rate: terms.nominal_rate,
            term_months: terms.term_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CivilStatus;

    fn profile(income: f64, property_value: f64, down_payment: f64) -> FinancialProfile {
        FinancialProfile {
            monthly_income: income,
            property_value,
            down_payment,
            ..Default::default()
        }
    }

    #[test]
    fn test_subsidized_low() {
        let classifier = ProductClassifier::default();
        let c = classifier.classify(&profile(1_200.0, 80_000.0, 8_000.0));
        assert_eq!(c.category, ProductCategory::SubsidizedLow);
        assert_eq!(c.nominal_rate, 0.0488);
        assert_eq!(c.term_months, 240);
    }

    #[test]
    fn test_price_over_low_ceiling_falls_to_mid() {
        // 90,000 is over the 83,660 low ceiling but under the 107,630 mid ceiling
        let classifier = ProductClassifier::default();
        let c = classifier.classify(&profile(1_200.0, 90_000.0, 15_000.0));
        assert_eq!(c.category, ProductCategory::SubsidizedMid);
        assert_eq!(c.nominal_rate, 0.0499);
        assert_eq!(c.term_months, 300);
        assert_eq!(c.term_years(), 25);
    }

    #[test]
    fn test_falls_through_to_private_when_over_every_ceiling() {
        let limits = PolicyLimits {
            mid_income_price_ceiling: 85_000.0,
            ..Default::default()
        };
        let classifier = ProductClassifier::new(limits);
        let c = classifier.classify(&profile(1_200.0, 90_000.0, 15_000.0));
        assert_eq!(c.category, ProductCategory::Private);
        // LTV 0.8333 is above the private tier break
        assert_eq!(c.nominal_rate, 0.115);
        assert_eq!(c.term_months, 240);
    }

    #[test]
    fn test_private_tier_priced_at_supplied_ltv() {
        let classifier = ProductClassifier::default();
        // computed LTV 0.50 would price at the standard tier
        let p = profile(5_000.0, 200_000.0, 100_000.0);
        assert_eq!(classifier.classify(&p).nominal_rate, 0.099);

        let c = classifier.classify_with_ltv(&p, 0.92);
        assert_eq!(c.category, ProductCategory::Private);
        assert_eq!(c.nominal_rate, 0.115);
        assert_eq!(classifier.classify_with_ltv(&p, 0.80).nominal_rate, 0.099);
    }

    #[test]
    fn test_owner_skips_subsidized_branches() {
        let classifier = ProductClassifier::default();
        let mut p = profile(1_000.0, 60_000.0, 20_000.0);
        p.owns_property = true;
        assert_eq!(classifier.category(&p), ProductCategory::Private);

        p.pension_affiliated = true;
        assert_eq!(classifier.category(&p), ProductCategory::PensionFund);
    }

    #[test]
    fn test_income_over_mid_ceiling() {
        let classifier = ProductClassifier::default();
        let mut p = profile(3_500.0, 100_000.0, 30_000.0);
        assert_eq!(classifier.category(&p), ProductCategory::Private);
        assert_eq!(classifier.classify(&p).nominal_rate, 0.099);

        p.pension_affiliated = true;
        let c = classifier.classify(&p);
        assert_eq!(c.category, ProductCategory::PensionFund);
        assert_eq!(c.nominal_rate, 0.069);
    }

    #[test]
    fn test_partner_income_substituted_not_summed() {
        let classifier = ProductClassifier::default();
        let mut p = profile(3_000.0, 80_000.0, 10_000.0);
        p.partner_monthly_income = 1_000.0;
        assert_eq!(classifier.category(&p), ProductCategory::Private);

        // Married: only the partner's 1,000 counts against the ceilings
        p.civil_status = CivilStatus::Married;
        assert_eq!(classifier.category(&p), ProductCategory::SubsidizedLow);

        // Partner income alone decides, even when the applicant earns less
        let mut q = profile(500.0, 80_000.0, 10_000.0);
        q.partner_monthly_income = 2_000.0;
        q.civil_status = CivilStatus::RegisteredUnion;
        assert_eq!(classifier.category(&q), ProductCategory::SubsidizedMid);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = ProductClassifier::default();
        let p = profile(1_800.0, 100_000.0, 20_000.0);
        let first = classifier.classify(&p);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&p), first);
        }
    }
}
