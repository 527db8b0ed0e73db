//! Applicant profile data, raw record shapes and normalization

mod data;
mod raw;
pub mod loader;
pub mod normalizer;

pub use data::{BureauStatus, CivilStatus, FinancialProfile, IncomeType, Nationality};
pub use raw::{RawProfileInput, RawSection, Scope};
pub use normalizer::{DeclaredRatios, NormalizedProfile, Normalizer, NormalizerRules};
pub use loader::{load_profiles, load_profiles_from_reader, load_raw_from_reader};
