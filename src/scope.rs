//! Scoped registration.
//!
//! A [`ScopedService`] registers an instance for as long as the guard lives.
//! Dropping the guard runs the optional `on_close` callback once, then
//! deregisters the key. Drop also runs while unwinding, so the entry is
//! released on every exit path of the scope.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::{Service, ServiceRegistry};

type OnClose<T> = Box<dyn FnOnce(&T)>;

/// Guard for an instance registered by [`ServiceRegistry::scoped`].
#[must_use = "the service is deregistered as soon as the guard is dropped"]
pub struct ScopedService<T: Service> {
    registry: ServiceRegistry,
    instance: Arc<T>,
    on_close: Option<OnClose<T>>,
}

impl<T: Service> ScopedService<T> {
    /// Sets the callback invoked with the instance when the scope ends.
    pub fn on_close(mut self, on_close: impl FnOnce(&T) + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn instance(&self) -> &Arc<T> {
        &self.instance
    }

    /// Runs `body` inside the scope, then releases it.
    pub fn run<R>(self, body: impl FnOnce(&Arc<T>) -> R) -> R {
        body(&self.instance)
    }
}

impl<T: Service> Drop for ScopedService<T> {
    fn drop(&mut self) {
        // Dropped after `on_close`, including when `on_close` panics.
        let _release = Release::<T>(&self.registry, PhantomData);
        if let Some(on_close) = self.on_close.take() {
            on_close(&self.instance);
        }
    }
}

struct Release<'a, T: Service>(&'a ServiceRegistry, PhantomData<fn() -> T>);

impl<T: Service> Drop for Release<'_, T> {
    fn drop(&mut self) {
        self.0.deregister::<T>();
        debug!(key = %T::key(), "scoped registration released");
    }
}

impl<T: Service> fmt::Debug for ScopedService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedService")
            .field("key", &T::key())
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

impl ServiceRegistry {
    /// Registers `instance` until the returned guard is dropped.
    ///
    /// ```
    /// use svc_registry::{service, ServiceRegistry};
    ///
    /// struct MockDns;
    /// service!(MockDns);
    ///
    /// let registry = ServiceRegistry::new();
    /// {
    ///     let _scope = registry.scoped(MockDns);
    ///     assert!(registry.contains::<MockDns>());
    /// }
    /// assert!(!registry.contains::<MockDns>());
    /// ```
    pub fn scoped<T: Service>(&self, instance: T) -> ScopedService<T> {
        self.scoped_arc(Arc::new(instance))
    }

    pub fn scoped_arc<T: Service>(&self, instance: Arc<T>) -> ScopedService<T> {
        self.register_arc(instance.clone());
        ScopedService {
            registry: self.clone(),
            instance,
            on_close: None,
        }
    }

    /// Registers `instance`, runs `body`, calls `on_close` if given, then deregisters.
    pub fn with_scoped_registration<T, C, R>(
        &self,
        instance: T,
        on_close: Option<C>,
        body: impl FnOnce(&Arc<T>) -> R,
    ) -> R
    where
        T: Service,
        C: FnOnce(&T) + 'static,
    {
        let scope = match on_close {
            Some(on_close) => self.scoped(instance).on_close(on_close),
            None => self.scoped(instance),
        };
        scope.run(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    #[derive(Debug)]
    struct MockGit {
        id: u32,
    }

    crate::service!(MockGit);

    #[test]
    fn test_visible_only_inside_scope() {
        let registry = ServiceRegistry::new();

        let seen = registry
            .scoped(MockGit { id: 1 })
            .run(|_| registry.get::<MockGit>().map(|g| g.id));

        assert_eq!(seen, Ok(1));
        assert!(!registry.contains::<MockGit>());
    }

    #[test]
    fn test_on_close_called_once_with_instance() {
        let registry = ServiceRegistry::new();
        let closed = Rc::new(Cell::new(Vec::<u32>::new()));
        let closed_clone = closed.clone();

        registry.with_scoped_registration(
            MockGit { id: 7 },
            Some(move |git: &MockGit| {
                let mut ids = closed_clone.take();
                ids.push(git.id);
                closed_clone.set(ids);
            }),
            |git| assert_eq!(git.id, 7),
        );

        assert_eq!(closed.take(), vec![7]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_released_on_panic() {
        let registry = ServiceRegistry::new();
        let closed = Rc::new(Cell::new(0));
        let closed_clone = closed.clone();

        let result = catch_unwind(AssertUnwindSafe(|| {
            registry.with_scoped_registration(
                MockGit { id: 3 },
                Some(move |_: &MockGit| closed_clone.set(closed_clone.get() + 1)),
                |_| panic!("body failed"),
            )
        }));

        assert!(result.is_err());
        assert_eq!(closed.get(), 1);
        assert!(!registry.contains::<MockGit>());
    }

    #[test]
    fn test_guard_replaces_and_removes_existing() {
        let registry = ServiceRegistry::new();
        registry.register(MockGit { id: 1 });

        {
            let scope = registry.scoped(MockGit { id: 2 });
            assert_eq!(scope.instance().id, 2);
            assert_eq!(registry.get::<MockGit>().unwrap().id, 2);
        }

        // The scope owns the key; the earlier instance is not restored.
        assert!(!registry.contains::<MockGit>());
    }
}
