//! Registry keys and the `Service` tag trait.
//!
//! Every entry in a [`ServiceRegistry`](crate::ServiceRegistry) lives under a
//! [`ServiceKey`]. Keys come from one of two places:
//!
//! - a type implementing [`Service`], whose `TYPE_NAME` is turned into a
//!   snake-case key (`DnsClient` becomes `dns_client`);
//! - a caller-supplied name, stored verbatim (used for plain functions and
//!   handles that don't warrant a dedicated type).
//!
//! The set of types that can be registered by type is closed: a type has to
//! opt in by implementing [`Service`], usually through the
//! [`service!`](crate::service) macro.

use std::borrow::{Borrow, Cow};
use std::fmt;

use crate::util::camel_to_snake;

/// A type that can be registered and injected by type.
///
/// # Examples
///
/// ```rust
/// use svc_registry::{Service, ServiceKey};
///
/// struct DnsClient;
///
/// impl Service for DnsClient {
///     const TYPE_NAME: &'static str = "DnsClient";
/// }
///
/// assert_eq!(DnsClient::key(), ServiceKey::named("dns_client"));
/// ```
pub trait Service: Send + Sync + 'static {
    /// The display name the registry key is derived from.
    const TYPE_NAME: &'static str;

    /// The registry key for this type.
    fn key() -> ServiceKey {
        ServiceKey::from_type_name(Self::TYPE_NAME)
    }
}

/// Key of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey(Cow<'static, str>);

impl ServiceKey {
    /// Key for a [`Service`] type.
    pub fn of<T: Service>() -> Self {
        T::key()
    }

    /// Derives a key from a type's display name.
    ///
    /// ```rust
    /// use svc_registry::ServiceKey;
    ///
    /// assert_eq!(ServiceKey::from_type_name("DnsClient").as_str(), "dns_client");
    /// assert_eq!(ServiceKey::from_type_name("Client").as_str(), "client");
    /// ```
    pub fn from_type_name(type_name: &str) -> Self {
        Self(Cow::Owned(camel_to_snake(type_name)))
    }

    /// A caller-supplied key, kept as-is.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ServiceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServiceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ServiceKey {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for ServiceKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}
