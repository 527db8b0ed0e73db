//! Raw record -> FinancialProfile
//!
//! Each canonical field has a fixed, ordered table of `(scope, key, transform)`
//! sources. Resolution walks the table in order:
//! - null, empty and unparseable values are skipped
//! - the first non-zero number wins
//! - a literal 0 only wins when no other source carries a non-zero value
//! - when nothing resolves, the field takes its documented default
//!
//! Nothing here fails; malformed input degrades to defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::data::{BureauStatus, CivilStatus, FinancialProfile, IncomeType, Nationality};
use super::raw::{RawProfileInput, Scope};
use super::raw::Scope::{Input, Resultado, Root};

/// Tunables for the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerRules {
    /// Age used when no usable age is declared
    pub default_age: f64,
    /// LTV used when neither a declared LTV nor a property value is available
    pub default_ltv: f64,
    /// Declared LTV values above this are read as percentages
    pub ltv_percent_threshold: f64,
    /// Declared DTI values above this are read as percentages
    pub dti_percent_threshold: f64,
}

impl Default for NormalizerRules {
    fn default() -> Self {
        Self {
            default_age: 32.0,
            default_ltv: 0.95,
            ltv_percent_threshold: 1.5,
            dti_percent_threshold: 2.0,
        }
    }
}

/// Conversion applied to a numeric source before it competes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    /// Source is expressed in months, field in years
    MonthsToYears,
}

impl Transform {
    fn apply(self, value: f64) -> f64 {
        match self {
            Transform::Identity => value,
            Transform::MonthsToYears => value / 12.0,
        }
    }
}

/// One place a field may be found
#[derive(Debug, Clone, Copy)]
pub struct Source {
    pub scope: Scope,
    pub key: &'static str,
    pub transform: Transform,
}

const fn src(scope: Scope, key: &'static str) -> Source {
    Source {
        scope,
        key,
        transform: Transform::Identity,
    }
}

const fn months(scope: Scope, key: &'static str) -> Source {
    Source {
        scope,
        key,
        transform: Transform::MonthsToYears,
    }
}

pub const MONTHLY_INCOME: &[Source] = &[
    src(Input, "ingresoMensual"),
    src(Input, "ingresos"),
    src(Root, "ingresoMensual"),
    src(Root, "ingresos"),
    src(Root, "monthlyIncome"),
    src(Resultado, "ingresoMensual"),
];

pub const PARTNER_MONTHLY_INCOME: &[Source] = &[
    src(Input, "ingresoPareja"),
    src(Input, "ingresoConyuge"),
    src(Root, "ingresoPareja"),
    src(Root, "ingresoConyuge"),
    src(Root, "partnerMonthlyIncome"),
];

pub const MONTHLY_DEBTS: &[Source] = &[
    src(Input, "deudasMensuales"),
    src(Input, "deudas"),
    src(Root, "deudasMensuales"),
    src(Root, "deudas"),
    src(Root, "monthlyDebts"),
    src(Resultado, "deudasMensuales"),
];

pub const PROPERTY_VALUE: &[Source] = &[
    src(Input, "valorVivienda"),
    src(Input, "valorPropiedad"),
    src(Root, "valorVivienda"),
    src(Root, "valorPropiedad"),
    src(Root, "propertyValue"),
    src(Resultado, "valorVivienda"),
];

pub const DOWN_PAYMENT: &[Source] = &[
    src(Input, "entrada"),
    src(Input, "cuotaInicial"),
    src(Root, "entrada"),
    src(Root, "cuotaInicial"),
    src(Root, "downPayment"),
    src(Resultado, "entrada"),
];

pub const AGE: &[Source] = &[
    src(Input, "edad"),
    src(Root, "edad"),
    src(Root, "age"),
    src(Resultado, "edad"),
];

pub const STABILITY_YEARS: &[Source] = &[
    src(Input, "aniosEstabilidad"),
    months(Input, "mesesEstabilidad"),
    src(Root, "aniosEstabilidad"),
    src(Root, "stabilityYears"),
    months(Root, "mesesEstabilidad"),
    months(Root, "stabilityMonths"),
];

pub const PENSION_CONTRIBUTIONS_TOTAL: &[Source] = &[
    src(Input, "aportesTotales"),
    src(Root, "aportesTotales"),
    src(Root, "pensionContributionsTotal"),
    src(Resultado, "aportesTotales"),
];

pub const PENSION_CONTRIBUTIONS_CONSECUTIVE: &[Source] = &[
    src(Input, "aportesConsecutivos"),
    src(Root, "aportesConsecutivos"),
    src(Root, "pensionContributionsConsecutive"),
    src(Resultado, "aportesConsecutivos"),
];

pub const INCOME_TYPE: &[Source] = &[
    src(Input, "tipoIngreso"),
    src(Root, "tipoIngreso"),
    src(Root, "incomeType"),
];

pub const BUREAU_STATUS: &[Source] = &[
    src(Input, "estadoBuro"),
    src(Input, "buro"),
    src(Root, "estadoBuro"),
    src(Root, "buro"),
    src(Root, "creditBureauStatus"),
];

pub const NATIONALITY: &[Source] = &[
    src(Input, "nacionalidad"),
    src(Root, "nacionalidad"),
    src(Root, "nationality"),
];

pub const CIVIL_STATUS: &[Source] = &[
    src(Input, "estadoCivil"),
    src(Root, "estadoCivil"),
    src(Root, "civilStatus"),
];

pub const OWNS_PROPERTY: &[Source] = &[
    src(Input, "tieneVivienda"),
    src(Root, "tieneVivienda"),
    src(Root, "ownsProperty"),
];

pub const PENSION_AFFILIATED: &[Source] = &[
    src(Input, "afiliadoIess"),
    src(Root, "afiliadoIess"),
    src(Root, "pensionAffiliated"),
];

pub const LTV: &[Source] = &[
    src(Input, "ltv"),
    src(Root, "ltv"),
    src(Resultado, "ltv"),
];

pub const DTI: &[Source] = &[
    src(Input, "dti"),
    src(Root, "dti"),
    src(Resultado, "dtiConHipoteca"),
    src(Resultado, "dti"),
];

/// Ratios that a record may already carry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeclaredRatios {
    /// Loan-to-value in [0, 1]
    pub ltv: Option<f64>,
    /// Debt-to-income in [0, 2]
    pub dti: Option<f64>,
}

/// Output of normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProfile {
    pub profile: FinancialProfile,
    pub ratios: DeclaredRatios,
    /// LTV after falling back to the computed value and then the default
    pub ltv: f64,
}

/// Resolves raw records against the field tables
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    rules: NormalizerRules,
}

impl Normalizer {
    pub fn new(rules: NormalizerRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &NormalizerRules {
        &self.rules
    }

    /// Normalize a raw record
    pub fn normalize(&self, raw: &RawProfileInput) -> NormalizedProfile {
        let age = match resolve_number(raw, AGE) {
            Some(age) if age > 0.0 => age,
            _ => {
                log::debug!("age unresolved, using default {}", self.rules.default_age);
                self.rules.default_age
            }
        };

        let profile = FinancialProfile {
            monthly_income: number_or_zero(raw, MONTHLY_INCOME, "monthly_income"),
            partner_monthly_income: number_or_zero(raw, PARTNER_MONTHLY_INCOME, "partner_monthly_income"),
            monthly_debts: number_or_zero(raw, MONTHLY_DEBTS, "monthly_debts"),
            property_value: number_or_zero(raw, PROPERTY_VALUE, "property_value"),
            down_payment: number_or_zero(raw, DOWN_PAYMENT, "down_payment"),
            age,
            income_type: resolve_label(raw, INCOME_TYPE, IncomeType::parse).unwrap_or_default(),
            stability_years: number_or_zero(raw, STABILITY_YEARS, "stability_years"),
            credit_bureau_status: resolve_label(raw, BUREAU_STATUS, BureauStatus::parse)
                .unwrap_or_default(),
            nationality: resolve_label(raw, NATIONALITY, Nationality::parse).unwrap_or_default(),
            civil_status: resolve_label(raw, CIVIL_STATUS, CivilStatus::parse).unwrap_or_default(),
            owns_property: resolve_flag(raw, OWNS_PROPERTY).unwrap_or(false),
            pension_affiliated: resolve_flag(raw, PENSION_AFFILIATED).unwrap_or(false),
            pension_contributions_total: number_or_zero(
                raw,
                PENSION_CONTRIBUTIONS_TOTAL,
                "pension_contributions_total",
            ),
            pension_contributions_consecutive: number_or_zero(
                raw,
                PENSION_CONTRIBUTIONS_CONSECUTIVE,
                "pension_contributions_consecutive",
            ),
        };

        let ratios = DeclaredRatios {
            ltv: resolve_number(raw, LTV)
                .map(|v| normalize_ratio(v, self.rules.ltv_percent_threshold, 1.0)),
            dti: resolve_number(raw, DTI)
                .map(|v| normalize_ratio(v, self.rules.dti_percent_threshold, 2.0)),
        };

        let ltv = self.resolve_ltv(&profile, ratios.ltv);

        NormalizedProfile { profile, ratios, ltv }
    }

    /// Declared LTV, else the profile's own LTV, else the configured default
    pub fn resolve_ltv(&self, profile: &FinancialProfile, declared: Option<f64>) -> f64 {
        match declared {
            Some(ltv) => ltv,
            None if profile.property_value > 0.0 => profile.loan_to_value(),
            None => {
                log::debug!("ltv unresolved, using default {}", self.rules.default_ltv);
                self.rules.default_ltv
            }
        }
    }

    /// Normalize a JSON value directly
    pub fn normalize_value(&self, value: Value) -> NormalizedProfile {
        self.normalize(&RawProfileInput::from_value(value))
    }
}

/// Read a ratio that may have been written as a percentage
///
/// Values above `percent_threshold` are divided by 100, then the result is
/// clamped to `[0, max]`.
pub fn normalize_ratio(value: f64, percent_threshold: f64, max: f64) -> f64 {
    let ratio = if value > percent_threshold { value / 100.0 } else { value };
    ratio.clamp(0.0, max)
}

/// Numeric reading of a raw value
///
/// Strings keep only their digits and decimal point before parsing, so
/// `"$1,200.50"` reads as 1200.5. A minus sign ahead of the first digit makes
/// the value negative. Negative values of either kind clamp to 0, so the
/// result is always finite and non-negative.
pub fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let negative = s
                .chars()
                .take_while(|c| !c.is_ascii_digit())
                .any(|c| c == '-');
            let digits: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
            if digits.is_empty() {
                None
            } else {
                digits
                    .parse::<f64>()
                    .ok()
                    .map(|v| if negative { -v } else { v })
            }
        }
        _ => None,
    }?;

    parsed.is_finite().then(|| parsed.max(0.0))
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "si" | "sí" | "s" | "y" | "1" => Some(true),
            "false" | "no" | "n" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// First non-zero source wins; zero only when every present source is zero
pub fn resolve_number(raw: &RawProfileInput, sources: &[Source]) -> Option<f64> {
    let mut zero_seen = false;
    for source in sources {
        let Some(value) = raw.get(source.scope, source.key).and_then(parse_number) else {
            continue;
        };
        let value = source.transform.apply(value);
        if value > 0.0 {
            return Some(value);
        }
        zero_seen = true;
    }
    zero_seen.then_some(0.0)
}

fn number_or_zero(raw: &RawProfileInput, sources: &[Source], field: &str) -> f64 {
    resolve_number(raw, sources).unwrap_or_else(|| {
        log::debug!("{field} unresolved, using 0");
        0.0
    })
}

fn resolve_label<T>(raw: &RawProfileInput, sources: &[Source], parse: fn(&str) -> Option<T>) -> Option<T> {
    sources.iter().find_map(|source| match raw.get(source.scope, source.key) {
        Some(Value::String(s)) if !s.trim().is_empty() => parse(s),
        _ => None,
    })
}

fn resolve_flag(raw: &RawProfileInput, sources: &[Source]) -> Option<bool> {
    sources
        .iter()
        .find_map(|source| raw.get(source.scope, source.key).and_then(parse_flag))
}
