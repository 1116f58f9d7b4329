use thiserror::Error;

use crate::ServiceKey;

/// Failures of the strict lookups (`get`, `get_named`).
///
/// Injection never produces these: a missing or mismatched entry simply
/// means nothing is injected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Service not found in registry: {key}")]
    NotFound { key: ServiceKey },

    #[error("Type mismatch in registry for {key}: expected {expected}")]
    TypeMismatch {
        key: ServiceKey,
        expected: &'static str,
    },
}

impl RegistryError {
    pub fn key(&self) -> &ServiceKey {
        match self {
            Self::NotFound { key } | Self::TypeMismatch { key, .. } => key,
        }
    }
}
