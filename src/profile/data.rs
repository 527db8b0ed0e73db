//! Canonical financial profile consumed by every engine component

use serde::{Deserialize, Serialize};

/// How the applicant earns their income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    /// Payroll employee
    #[default]
    Salaried,
    /// Self-employed / freelance
    Independent,
    /// Both payroll and independent income
    Mixed,
}

impl IncomeType {
    /// Parse a declared income type, accepting English and Spanish labels
    pub fn parse(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "salaried" | "employee" | "dependiente" | "asalariado" | "relacion de dependencia" => {
                Some(IncomeType::Salaried)
            }
            "independent" | "self-employed" | "selfemployed" | "independiente" | "negocio propio" => {
                Some(IncomeType::Independent)
            }
            "mixed" | "mixto" | "ambos" => Some(IncomeType::Mixed),
            _ => None,
        }
    }
}

/// Status reported by the credit bureau
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BureauStatus {
    /// No negative records
    #[default]
    None,
    /// Past arrears, now settled
    Regularized,
    /// Open arrears or write-offs
    Adverse,
}

impl BureauStatus {
    pub fn parse(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "none" | "clean" | "ninguno" | "sin deudas" | "limpio" | "normal" => Some(BureauStatus::None),
            "regularized" | "regularizado" | "al dia" => Some(BureauStatus::Regularized),
            "adverse" | "moroso" | "vencido" | "castigado" | "en mora" => Some(BureauStatus::Adverse),
            _ => None,
        }
    }
}

/// Citizenship as far as subsidized products are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nationality {
    #[default]
    Domestic,
    Foreign,
}

impl Nationality {
    pub fn parse(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "" => None,
            "domestic" | "citizen" | "ecuatoriana" | "ecuatoriano" | "ecuador" | "ec" | "nacional" => {
                Some(Nationality::Domestic)
            }
            _ => Some(Nationality::Foreign),
        }
    }

    pub fn is_domestic(&self) -> bool {
        matches!(self, Nationality::Domestic)
    }
}

/// Declared civil status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CivilStatus {
    #[default]
    Single,
    Married,
    RegisteredUnion,
    Divorced,
    Widowed,
}

impl CivilStatus {
    pub fn parse(label: &str) -> Option<Self> {
        match fold(label).as_str() {
            "single" | "soltero" | "soltera" => Some(CivilStatus::Single),
            "married" | "casado" | "casada" => Some(CivilStatus::Married),
            "registered_union" | "registered union" | "union de hecho" | "union libre" => {
                Some(CivilStatus::RegisteredUnion)
            }
            "divorced" | "divorciado" | "divorciada" => Some(CivilStatus::Divorced),
            "widowed" | "viudo" | "viuda" => Some(CivilStatus::Widowed),
            _ => None,
        }
    }

    /// Married or in a registered union
    pub fn is_formal_partnership(&self) -> bool {
        matches!(self, CivilStatus::Married | CivilStatus::RegisteredUnion)
    }
}

/// Lowercase, trim and strip the accents that show up in declared labels
fn fold(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            _ => c,
        })
        .collect()
}

/// Normalized applicant profile
///
/// Every numeric field is finite and non-negative. Money is monthly where the
/// name says so, otherwise a single amount in the product currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub partner_monthly_income: f64,
    pub monthly_debts: f64,
    pub property_value: f64,
    pub down_payment: f64,
    pub age: f64,
    pub income_type: IncomeType,
    pub stability_years: f64,
    pub credit_bureau_status: BureauStatus,
    pub nationality: Nationality,
    #[serde(default)]
    pub civil_status: CivilStatus,
    pub owns_property: bool,
    pub pension_affiliated: bool,
    pub pension_contributions_total: f64,
    pub pension_contributions_consecutive: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            monthly_income: 0.0,
            partner_monthly_income: 0.0,
            monthly_debts: 0.0,
            property_value: 0.0,
            down_payment: 0.0,
            age: 32.0,
            income_type: IncomeType::default(),
            stability_years: 0.0,
            credit_bureau_status: BureauStatus::default(),
            nationality: Nationality::default(),
            civil_status: CivilStatus::default(),
            owns_property: false,
            pension_affiliated: false,
            pension_contributions_total: 0.0,
            pension_contributions_consecutive: 0.0,
        }
    }
}

impl FinancialProfile {
    /// Amount to finance (never negative)
    pub fn principal(&self) -> f64 {
        (self.property_value - self.down_payment).max(0.0)
    }

    /// Financed amount over property value, 0 when there is no property value
    pub fn loan_to_value(&self) -> f64 {
        if self.property_value > 0.0 {
            (self.principal() / self.property_value).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Income used by the product ceilings
    ///
    /// Under a formal partnership the partner's income replaces the
    /// applicant's own; the two are never added together here.
    pub fn effective_income(&self) -> f64 {
        if self.civil_status.is_formal_partnership() {
            self.partner_monthly_income
        } else {
            self.monthly_income
        }
    }

    /// Income available to service debt
    pub fn household_income(&self) -> f64 {
        if self.civil_status.is_formal_partnership() {
            self.monthly_income + self.partner_monthly_income
        } else {
            self.monthly_income
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!(IncomeType::parse("Dependiente"), Some(IncomeType::Salaried));
        assert_eq!(IncomeType::parse(" independent "), Some(IncomeType::Independent));
        assert_eq!(IncomeType::parse("MIXTO"), Some(IncomeType::Mixed));
        assert_eq!(IncomeType::parse("retired"), None);

        assert_eq!(BureauStatus::parse("Regularizado"), Some(BureauStatus::Regularized));
        assert_eq!(BureauStatus::parse("castigado"), Some(BureauStatus::Adverse));

        assert_eq!(Nationality::parse("Ecuatoriana"), Some(Nationality::Domestic));
        assert_eq!(Nationality::parse("colombiana"), Some(Nationality::Foreign));
        assert_eq!(Nationality::parse("  "), None);

        assert_eq!(CivilStatus::parse("Unión de hecho"), Some(CivilStatus::RegisteredUnion));
        assert_eq!(CivilStatus::parse("casada"), Some(CivilStatus::Married));
    }

    #[test]
    fn test_label_defaults() {
        assert_eq!(IncomeType::default(), IncomeType::Salaried);
        assert_eq!(BureauStatus::default(), BureauStatus::None);
        assert_eq!(Nationality::default(), Nationality::Domestic);
        assert_eq!(CivilStatus::default(), CivilStatus::Single);
    }

    #[test]
    fn test_effective_income_substitutes_partner() {
        let mut profile = FinancialProfile {
            monthly_income: 1_500.0,
            partner_monthly_income: 900.0,
            ..Default::default()
        };
        assert_eq!(profile.effective_income(), 1_500.0);
        assert_eq!(profile.household_income(), 1_500.0);

        profile.civil_status = CivilStatus::Married;
        assert_eq!(profile.effective_income(), 900.0);
        assert_eq!(profile.household_income(), 2_400.0);
    }

    #[test]
    fn test_principal_and_ltv() {
        let profile = FinancialProfile {
            property_value: 80_000.0,
            down_payment: 4_000.0,
            ..Default::default()
        };
        assert_eq!(profile.principal(), 76_000.0);
        assert_eq!(profile.loan_to_value(), 0.95);

        let overpaid = FinancialProfile {
            property_value: 50_000.0,
            down_payment: 60_000.0,
            ..Default::default()
        };
        assert_eq!(overpaid.principal(), 0.0);
        assert_eq!(overpaid.loan_to_value(), 0.0);
        assert_eq!(FinancialProfile::default().loan_to_value(), 0.0);
    }
}
