//! Macros for declaring services and isolated registries.

/// Implements [`Service`](crate::Service) for one or more types, using each
/// type's identifier as its `TYPE_NAME`.
///
/// ```rust
/// use svc_registry::{service, Service};
///
/// struct DnsClient;
/// struct GitClient;
/// service!(DnsClient, GitClient);
///
/// assert_eq!(DnsClient::key().as_str(), "dns_client");
/// assert_eq!(GitClient::key().as_str(), "git_client");
/// ```
#[macro_export]
macro_rules! service {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::Service for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);
            }
        )+
    };
}

/// Creates a module holding a lazily created static registry.
///
/// The macro generates a module containing a hidden `LazyLock<ServiceRegistry>`
/// and free functions delegating to it. Each invocation is isolated from
/// every other one.
///
/// # Examples
///
/// ```rust
/// use svc_registry::{define_registry, service};
/// use std::sync::Arc;
///
/// struct DnsClient(&'static str);
/// service!(DnsClient);
///
/// define_registry!(clients);
/// define_registry!(mocks);
///
/// clients::register(DnsClient("real"));
///
/// let dns: Arc<DnsClient> = clients::get().unwrap();
/// assert_eq!(dns.0, "real");
/// assert!(!mocks::contains::<DnsClient>());
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            use $crate::{
                Dependencies, Inject, InjectNamed, RegistryError, RegistryEvent, ScopedService,
                Service, ServiceKey, ServiceRegistry,
            };

            // Created on first use, never torn down.
            static REGISTRY: LazyLock<ServiceRegistry> = LazyLock::new(ServiceRegistry::new);

            /// The underlying registry, for passing it on as a context object.
            pub fn registry() -> &'static ServiceRegistry {
                &REGISTRY
            }

            /// Register an instance under its type's key.
            pub fn register<T: Service>(instance: T) {
                REGISTRY.register(instance)
            }

            /// Register an Arc-wrapped instance under its type's key.
            pub fn register_arc<T: Service>(instance: Arc<T>) {
                REGISTRY.register_arc(instance)
            }

            /// Register a value under a caller-supplied name.
            pub fn register_named<V: Send + Sync + 'static>(
                name: impl Into<ServiceKey>,
                value: V,
            ) -> Arc<V> {
                REGISTRY.register_named(name, value)
            }

            /// Retrieve the instance registered for `T`.
            pub fn get<T: Service>() -> ::std::result::Result<Arc<T>, RegistryError> {
                REGISTRY.get()
            }

            /// Retrieve the value registered under `name`.
            pub fn get_named<V: Send + Sync + 'static>(name: &str) -> ::std::result::Result<Arc<V>, RegistryError> {
                REGISTRY.get_named(name)
            }

            pub fn lookup<T: Service>() -> ::std::option::Option<Arc<T>> {
                REGISTRY.lookup()
            }

            pub fn lookup_named<V: Send + Sync + 'static>(name: &str) -> ::std::option::Option<Arc<V>> {
                REGISTRY.lookup_named(name)
            }

            /// Check if `T` is registered.
            pub fn contains<T: Service>() -> bool {
                REGISTRY.contains::<T>()
            }

            pub fn deregister<T: Service>() -> bool {
                REGISTRY.deregister::<T>()
            }

            pub fn deregister_named(name: &str) -> bool {
                REGISTRY.deregister_named(name)
            }

            /// Register `instance` until the returned guard is dropped.
            pub fn scoped<T: Service>(instance: T) -> ScopedService<T> {
                REGISTRY.scoped(instance)
            }

            pub fn inject_by_type<D: Dependencies>() -> Inject<D> {
                REGISTRY.inject_by_type()
            }

            pub fn inject_by_name<V: Send + Sync + 'static>(name: impl Into<ServiceKey>) -> InjectNamed<V> {
                REGISTRY.inject_by_name(name)
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }

            #[doc(hidden)]
            pub fn clear() {
                REGISTRY.clear()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    struct Counter(u32);
    crate::service!(Counter);

    #[test]
    fn test_define_registry_macro() {
        define_registry!(test_reg);

        test_reg::register(Counter(100));
        let value: Arc<Counter> = test_reg::get().unwrap();
        assert_eq!(value.0, 100);

        assert!(test_reg::contains::<Counter>());
        assert!(test_reg::deregister::<Counter>());
        assert!(!test_reg::contains::<Counter>());
    }

    #[test]
    fn test_multiple_registries() {
        define_registry!(reg_a);
        define_registry!(reg_b);

        reg_a::register(Counter(1));
        reg_b::register(Counter(2));

        assert_eq!(reg_a::get::<Counter>().unwrap().0, 1);
        assert_eq!(reg_b::get::<Counter>().unwrap().0, 2);
    }

    #[test]
    fn test_registry_accessor_shares_storage() {
        define_registry!(shared);

        let ctx = shared::registry().clone();
        ctx.register_named("answer", 42u8);
        assert_eq!(*shared::get_named::<u8>("answer").unwrap(), 42);
    }
}
