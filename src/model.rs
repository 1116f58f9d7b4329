//! The example data model.
//!
//! `ExampleRecord` is a placeholder showing where validated domain records go.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only accepted value of [`ExampleRecord::name`].
pub const EXPECTED_NAME: &str = "adriaan";

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid name {found:?}, expected {expected:?}")]
    InvalidName {
        expected: &'static str,
        found: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExampleRecord")]
pub struct ExampleRecord {
    pub name: String,
}

#[derive(Deserialize)]
struct RawExampleRecord {
    name: String,
}

impl TryFrom<RawExampleRecord> for ExampleRecord {
    type Error = ModelError;

    fn try_from(raw: RawExampleRecord) -> Result<Self, Self::Error> {
        Self::new(raw.name)
    }
}

impl ExampleRecord {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name != EXPECTED_NAME {
            return Err(ModelError::InvalidName {
                expected: EXPECTED_NAME,
                found: name,
            });
        }
        Ok(Self { name })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_accepts_expected_name() {
        let record = ExampleRecord::new("adriaan").unwrap();
        assert_eq!(record.name, "adriaan");
    }

    #[test]
    fn test_rejects_other_names() {
        let err = ExampleRecord::new("bob").unwrap_err();
        assert_eq!(err.to_string(), r#"Invalid name "bob", expected "adriaan""#);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ExampleRecord = serde_json::from_str(r#"{"name": "adriaan"}"#).unwrap();
        assert_eq!(ok, ExampleRecord::new("adriaan").unwrap());

        let err = serde_json::from_str::<ExampleRecord>(r#"{"name": "bob"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid name"));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "adriaan"}}"#).unwrap();

        let record = ExampleRecord::from_json_file(file.path()).unwrap();
        assert_eq!(record.name, EXPECTED_NAME);

        let missing = ExampleRecord::from_json_file(Path::new("/nonexistent/record.json"));
        assert!(matches!(missing, Err(ModelError::Io(_))));
    }
}
