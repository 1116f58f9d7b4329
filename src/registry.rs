//! The service registry: a key-to-instance table of live service clients.
//!
//! A [`ServiceRegistry`] is an explicit context object. Clones are cheap and
//! share the same table, so the registry can be handed to every component
//! that needs service lookup (and each test can build its own).
//!
//! # Examples
//!
//! ```
//! use svc_registry::{service, ServiceRegistry};
//! use std::sync::Arc;
//!
//! struct DnsClient {
//!     resolver: String,
//! }
//! service!(DnsClient);
//!
//! let registry = ServiceRegistry::new();
//! registry.register(DnsClient { resolver: "1.1.1.1".to_string() });
//!
//! let dns: Arc<DnsClient> = registry.get().unwrap();
//! assert_eq!(dns.resolver, "1.1.1.1");
//! assert!(registry.contains_key("dns_client"));
//! ```

use std::{
    any::{type_name, Any},
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{trace, warn};

use crate::{RegistryError, RegistryEvent, Service, ServiceKey};

type Entry = Arc<dyn Any + Send + Sync>;
type Storage = HashMap<ServiceKey, Entry>;

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the registry is
/// interacted with. It must be thread-safe because the registry may be shared.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

#[derive(Default)]
struct Inner {
    storage: Mutex<Storage>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

/// Thread-safe table of registered services.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    inner: Arc<Inner>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked on every registry interaction.
    ///
    /// The callback runs outside the storage lock, so it may itself use the registry.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.inner.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables registry tracing).
    pub fn clear_trace_callback(&self) {
        let mut guard = self.inner.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: &RegistryEvent) {
        trace!(%event, "registry event");

        let callback = self
            .inner
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    // Entries are plain inserts and removes, so a poisoned table is still consistent.
    fn storage(&self) -> MutexGuard<'_, Storage> {
        self.inner.storage.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn insert(&self, key: ServiceKey, value: Entry) {
        self.emit_event(&RegistryEvent::Register { key: key.clone() });

        // The replaced value is dropped after the lock is released.
        let _previous = self.storage().insert(key, value);
    }

    /// Registers `instance` under the key derived from `T`'s type name.
    ///
    /// A previous instance under the same key is replaced.
    pub fn register<T: Service>(&self, instance: T) {
        self.register_arc(Arc::new(instance));
    }

    /// Registers an `Arc<T>`, keeping the caller's reference shared with the registry.
    pub fn register_arc<T: Service>(&self, instance: Arc<T>) {
        self.insert(T::key(), instance);
    }

    /// Registers `value` under a caller-supplied name and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use svc_registry::ServiceRegistry;
    /// use std::sync::Arc;
    ///
    /// let registry = ServiceRegistry::new();
    /// let greet = registry.register_named("greet", (|n: &str| format!("hi {n}")) as fn(&str) -> String);
    ///
    /// let looked_up: Arc<fn(&str) -> String> = registry.get_named("greet").unwrap();
    /// assert!(Arc::ptr_eq(&greet, &looked_up));
    /// ```
    pub fn register_named<V: Send + Sync + 'static>(
        &self,
        name: impl Into<ServiceKey>,
        value: V,
    ) -> Arc<V> {
        self.register_named_arc(name, Arc::new(value))
    }

    pub fn register_named_arc<V: Send + Sync + 'static>(
        &self,
        name: impl Into<ServiceKey>,
        value: Arc<V>,
    ) -> Arc<V> {
        self.insert(name.into(), value.clone());
        value
    }

    fn fetch<V: Send + Sync + 'static>(&self, key: &ServiceKey) -> Result<Arc<V>, RegistryError> {
        let entry = self.storage().get(key.as_str()).cloned();

        let result = match entry {
            Some(entry) => entry
                .downcast::<V>()
                .map_err(|_| RegistryError::TypeMismatch {
                    key: key.clone(),
                    expected: type_name::<V>(),
                }),
            None => Err(RegistryError::NotFound { key: key.clone() }),
        };

        self.emit_event(&RegistryEvent::Get {
            key: key.clone(),
            found: result.is_ok(),
        });

        result
    }

    /// Retrieves the instance registered for `T`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] if nothing is registered under `T`'s key
    /// - [`RegistryError::TypeMismatch`] if the key holds a value of another type
    pub fn get<T: Service>(&self) -> Result<Arc<T>, RegistryError> {
        self.fetch(&T::key())
    }

    /// Retrieves the value registered under `name`.
    pub fn get_named<V: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<V>, RegistryError> {
        self.fetch(&ServiceKey::named(name.to_owned()))
    }

    /// Best-effort lookup by key.
    ///
    /// Missing entries yield `None`. A value of the wrong type is logged and
    /// also yields `None`.
    pub fn lookup_key<V: Send + Sync + 'static>(&self, key: &ServiceKey) -> Option<Arc<V>> {
        match self.fetch::<V>(key) {
            Ok(value) => Some(value),
            Err(RegistryError::NotFound { .. }) => None,
            Err(err) => {
                warn!(%err, "registered value has an unexpected type, not injecting it");
                None
            }
        }
    }

    pub fn lookup<T: Service>(&self) -> Option<Arc<T>> {
        self.lookup_key(&T::key())
    }

    pub fn lookup_named<V: Send + Sync + 'static>(&self, name: &str) -> Option<Arc<V>> {
        self.lookup_key(&ServiceKey::named(name.to_owned()))
    }

    /// Checks if something is registered under `T`'s key.
    pub fn contains<T: Service>(&self) -> bool {
        self.contains_key(T::key().as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        let found = self.storage().contains_key(name);

        self.emit_event(&RegistryEvent::Contains {
            key: ServiceKey::named(name.to_owned()),
            found,
        });

        found
    }

    /// Removes the entry for `key`, returning whether one was present.
    pub fn deregister_key(&self, key: &ServiceKey) -> bool {
        // Dropped outside the lock, like replaced values.
        let removed = self.storage().remove(key.as_str());
        let found = removed.is_some();

        self.emit_event(&RegistryEvent::Deregister {
            key: key.clone(),
            found,
        });

        found
    }

    /// Removes `T`'s entry. Absent entries are a no-op.
    pub fn deregister<T: Service>(&self) -> bool {
        self.deregister_key(&T::key())
    }

    pub fn deregister_named(&self, name: &str) -> bool {
        self.deregister_key(&ServiceKey::named(name.to_owned()))
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<ServiceKey> {
        let mut keys: Vec<ServiceKey> = self.storage().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.storage().len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    /// Removes every entry. Already-retrieved `Arc`s stay valid.
    #[doc(hidden)]
    pub fn clear(&self) {
        self.emit_event(&RegistryEvent::Clear {});

        let _drained = std::mem::take(&mut *self.storage());
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
