use std::fmt;

use crate::ServiceKey;

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`
/// and are also logged at `trace` level.
///
/// # Examples
///
/// ```rust
/// use svc_registry::{RegistryEvent, ServiceKey};
///
/// let event = RegistryEvent::Register { key: ServiceKey::named("glue_client") };
/// assert_eq!(event.to_string(), "register { key: glue_client }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A value was stored (or replaced) under `key`.
    Register { key: ServiceKey },

    /// A value was requested.
    Get {
        key: ServiceKey,
        /// Whether a value of the requested type was found
        found: bool,
    },

    /// An existence check was performed.
    Contains { key: ServiceKey, found: bool },

    /// An entry removal was requested.
    Deregister {
        key: ServiceKey,
        /// Whether an entry was actually removed
        found: bool,
    },

    /// The registry was cleared.
    Clear {},
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Register { key } => write!(f, "register {{ key: {key} }}"),
            RegistryEvent::Get { key, found } => {
                write!(f, "get {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Contains { key, found } => {
                write!(f, "contains {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Deregister { key, found } => {
                write!(f, "deregister {{ key: {key}, found: {found} }}")
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
