use scene::registry::{CountryRecord, CountryRegistry};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    Json(String),
    InvalidRecord { index: usize, reason: String },
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Json(e) => write!(f, "JSON parse error: {e}"),
            RegistryError::InvalidRecord { index, reason } => {
                write!(f, "invalid country record at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Accepts either a bare array of records or `{"countries": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryDocument {
    List(Vec<CountryRecord>),
    Wrapped { countries: Vec<CountryRecord> },
}

pub fn registry_from_json_str(payload: &str) -> Result<CountryRegistry, RegistryError> {
    let doc: RegistryDocument =
        serde_json::from_str(payload).map_err(|e| RegistryError::Json(e.to_string()))?;
    let records = match doc {
        RegistryDocument::List(records) => records,
        RegistryDocument::Wrapped { countries } => countries,
    };

    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() {
            return Err(RegistryError::InvalidRecord {
                index,
                reason: "empty id".to_string(),
            });
        }
        if record.name.trim().is_empty() {
            return Err(RegistryError::InvalidRecord {
                index,
                reason: "empty name".to_string(),
            });
        }
    }

    Ok(CountryRegistry::new(records))
}
