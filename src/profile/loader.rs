//! Load raw applicant rows from CSV
//!
//! Column names are the same keys the normalizer understands at the root of a
//! record (`ingresoMensual`, `valorVivienda`, `monthlyIncome`, ...). Every row
//! goes through the normalizer, so blank or malformed cells degrade to the
//! usual defaults instead of failing the batch.

use std::path::Path;

use super::normalizer::{NormalizedProfile, Normalizer};
use super::raw::RawProfileInput;
use crate::error::{Error, Result};

/// Read raw records from any CSV source
pub fn load_raw_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RawProfileInput>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let raw = RawProfileInput::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .filter(|(_, value)| !value.trim().is_empty()),
        );
        records.push(raw);
    }

    Ok(records)
}

/// Load and normalize every row of a CSV source
pub fn load_profiles_from_reader<R: std::io::Read>(
    reader: R,
    normalizer: &Normalizer,
) -> Result<Vec<NormalizedProfile>> {
    let raw = load_raw_from_reader(reader)?;
    Ok(raw.iter().map(|r| normalizer.normalize(r)).collect())
}

/// Load and normalize every row of a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P, normalizer: &Normalizer) -> Result<Vec<NormalizedProfile>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_profiles_from_reader(file, normalizer)
}
