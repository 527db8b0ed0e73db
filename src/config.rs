//! Engine configuration
//!
//! Every section defaults to the reference values, so a config file only
//! needs the keys it overrides:
//!
//! ```json
//! { "policy": { "low_income_price_ceiling": 90000 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationSettings;
use crate::classification::PolicyLimits;
use crate::eligibility::EligibilityRules;
use crate::error::{Error, Result};
use crate::profile::NormalizerRules;

/// Environment variable naming a config file for the binaries
pub const CONFIG_ENV_VAR: &str = "MORTGAGE_ENGINE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: PolicyLimits,
    pub normalizer: NormalizerRules,
    pub eligibility: EligibilityRules,
    pub amortization: AmortizationSettings,
}

impl EngineConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        log::info!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Explicit path, then `MORTGAGE_ENGINE_CONFIG`, then defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_json_path(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_path(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.policy.validate().map_err(Error::InvalidConfig)?;

        let n = &self.normalizer;
        if !(0.0..=1.0).contains(&n.default_ltv) {
            return Err(Error::InvalidConfig(format!(
                "normalizer.default_ltv must be within [0, 1], got {}",
                n.default_ltv
            )));
        }
        if !(n.default_age.is_finite() && n.default_age > 0.0) {
            return Err(Error::InvalidConfig("normalizer.default_age must be positive".to_string()));
        }
        if !(n.ltv_percent_threshold >= 1.0 && n.dti_percent_threshold >= 1.0) {
            return Err(Error::InvalidConfig(
                "normalizer percentage thresholds must be at least 1".to_string(),
            ));
        }

        let e = &self.eligibility;
        if !(e.min_pension_contributions_total >= 0.0 && e.min_pension_contributions_consecutive >= 0.0) {
            return Err(Error::InvalidConfig(
                "eligibility contribution minimums must be non-negative".to_string(),
            ));
        }

        let delta = self.amortization.stress_delta_pct_points;
        if !(delta.is_finite() && delta >= 0.0) {
            return Err(Error::InvalidConfig(
                "amortization.stress_delta_pct_points must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
