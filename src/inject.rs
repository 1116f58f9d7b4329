//! Injection of registered services into plain functions.
//!
//! A wrapped function names its dependency in its own signature: it receives
//! `Option<Arc<T>>` (or a tuple of them) as its last parameter. The wrapper
//! fills that parameter from the registry at call time.
//!
//! - Injection is best-effort: an absent service is passed as `None`.
//! - Explicit values win: [`Injected::call_with`] only falls back to the
//!   registry for the dependencies the caller left as `None`.
//!
//! ```
//! use svc_registry::{service, ServiceRegistry};
//! use std::sync::Arc;
//!
//! struct DnsClient;
//! impl DnsClient {
//!     fn resolve(&self, host: &str) -> String {
//!         format!("{host} -> 10.0.0.1")
//!     }
//! }
//! service!(DnsClient);
//!
//! let registry = ServiceRegistry::new();
//! let resolve = registry
//!     .inject_by_type::<(DnsClient,)>()
//!     .wrap(|host: &str, client: Option<Arc<DnsClient>>| {
//!         client.map(|c| c.resolve(host))
//!     });
//!
//! assert_eq!(resolve.call("example.com"), None);
//!
//! registry.register(DnsClient);
//! assert_eq!(resolve.call("example.com").as_deref(), Some("example.com -> 10.0.0.1"));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{Service, ServiceKey, ServiceRegistry};

/// A set of [`Service`] types resolved together.
///
/// Implemented for tuples of one to four services. A one-element tuple
/// resolves to a bare `Option<Arc<T>>`; larger tuples resolve to a tuple with
/// one `Option` per type.
pub trait Dependencies {
    type Resolved;

    /// Nothing supplied by the caller.
    fn absent() -> Self::Resolved;

    /// Fills every `None` in `explicit` from the registry.
    fn resolve(registry: &ServiceRegistry, explicit: Self::Resolved) -> Self::Resolved;
}

impl<A: Service> Dependencies for (A,) {
    type Resolved = Option<Arc<A>>;

    fn absent() -> Self::Resolved {
        None
    }

    fn resolve(registry: &ServiceRegistry, explicit: Self::Resolved) -> Self::Resolved {
        explicit.or_else(|| registry.lookup::<A>())
    }
}

macro_rules! impl_dependencies {
    ($($t:ident $idx:tt),+) => {
        impl<$($t: Service),+> Dependencies for ($($t,)+) {
            type Resolved = ($(Option<Arc<$t>>,)+);

            fn absent() -> Self::Resolved {
                ($(None::<Arc<$t>>,)+)
            }

            fn resolve(registry: &ServiceRegistry, explicit: Self::Resolved) -> Self::Resolved {
                ($(explicit.$idx.or_else(|| registry.lookup::<$t>()),)+)
            }
        }
    };
}

impl_dependencies!(A 0, B 1);
impl_dependencies!(A 0, B 1, C 2);
impl_dependencies!(A 0, B 1, C 2, D 3);

/// Builder returned by [`ServiceRegistry::inject_by_type`].
pub struct Inject<D> {
    registry: ServiceRegistry,
    _deps: PhantomData<fn() -> D>,
}

impl<D: Dependencies> Inject<D> {
    /// Wraps `f`, whose last parameter receives the resolved services.
    pub fn wrap<A, R, F>(self, f: F) -> Injected<D, F>
    where
        F: Fn(A, D::Resolved) -> R,
    {
        Injected {
            registry: self.registry,
            f,
            _deps: PhantomData,
        }
    }
}

/// A function with its services injected by type.
pub struct Injected<D, F> {
    registry: ServiceRegistry,
    f: F,
    _deps: PhantomData<fn() -> D>,
}

impl<D: Dependencies, F> Injected<D, F> {
    /// Calls the function with whatever the registry holds right now.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A, D::Resolved) -> R,
    {
        self.call_with(args, D::absent())
    }

    /// Calls the function, preferring the caller's `Some` values over registered ones.
    pub fn call_with<A, R>(&self, args: A, explicit: D::Resolved) -> R
    where
        F: Fn(A, D::Resolved) -> R,
    {
        (self.f)(args, D::resolve(&self.registry, explicit))
    }
}

impl<D, F> fmt::Debug for Injected<D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injected")
            .field("services", &std::any::type_name::<D>())
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`ServiceRegistry::inject_by_name`].
pub struct InjectNamed<V> {
    registry: ServiceRegistry,
    key: ServiceKey,
    _value: PhantomData<fn() -> V>,
}

impl<V: Send + Sync + 'static> InjectNamed<V> {
    pub fn wrap<A, R, F>(self, f: F) -> InjectedNamed<V, F>
    where
        F: Fn(A, Option<Arc<V>>) -> R,
    {
        InjectedNamed {
            registry: self.registry,
            key: self.key,
            f,
            _value: PhantomData,
        }
    }
}

/// A function with one value injected by name.
pub struct InjectedNamed<V, F> {
    registry: ServiceRegistry,
    key: ServiceKey,
    f: F,
    _value: PhantomData<fn() -> V>,
}

impl<V: Send + Sync + 'static, F> InjectedNamed<V, F> {
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A, Option<Arc<V>>) -> R,
    {
        self.call_with(args, None)
    }

    pub fn call_with<A, R>(&self, args: A, explicit: Option<Arc<V>>) -> R
    where
        F: Fn(A, Option<Arc<V>>) -> R,
    {
        // An empty name never injects.
        let value = match explicit {
            Some(value) => Some(value),
            None if self.key.is_empty() => None,
            None => self.registry.lookup_key::<V>(&self.key),
        };
        (self.f)(args, value)
    }

    pub fn key(&self) -> &ServiceKey {
        &self.key
    }
}

impl<V, F> fmt::Debug for InjectedNamed<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedNamed")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl ServiceRegistry {
    /// Starts wrapping a function that depends on the services in `D`.
    pub fn inject_by_type<D: Dependencies>(&self) -> Inject<D> {
        Inject {
            registry: self.clone(),
            _deps: PhantomData,
        }
    }

    /// Starts wrapping a function that depends on the value registered as `name`.
    pub fn inject_by_name<V: Send + Sync + 'static>(
        &self,
        name: impl Into<ServiceKey>,
    ) -> InjectNamed<V> {
        InjectNamed {
            registry: self.clone(),
            key: name.into(),
            _value: PhantomData,
        }
    }
}
