//! Integration tests for registering trait objects.
//!
//! The usual reason to put a client in the registry is to swap the real
//! implementation for a mock in tests. Business logic depends on a trait;
//! the registered service wraps whichever implementation is live.

use std::sync::{Arc, Mutex};
use svc_registry::{service, ServiceRegistry};

trait ObjectStore: Send + Sync {
    fn put(&self, key: &str, body: &str) -> String;
}

struct S3Store {
    bucket: String,
}

impl ObjectStore for S3Store {
    fn put(&self, key: &str, _body: &str) -> String {
        format!("s3://{}/{key}", self.bucket)
    }
}

#[derive(Default)]
struct MemoryStore {
    writes: Mutex<Vec<(String, String)>>,
}

impl ObjectStore for MemoryStore {
    fn put(&self, key: &str, body: &str) -> String {
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), body.to_string()));
        format!("memory://{key}")
    }
}

/// Registered service wrapping the live store.
struct StoreClient(Arc<dyn ObjectStore>);

service!(StoreClient);

fn upload(registry: &ServiceRegistry, key: &str) -> Option<String> {
    let upload = registry
        .inject_by_type::<(StoreClient,)>()
        .wrap(|(key, body): (&str, &str), client: Option<Arc<StoreClient>>| {
            client.map(|store| store.0.put(key, body))
        });
    upload.call((key, "payload"))
}

#[test]
fn test_real_implementation() {
    let registry = ServiceRegistry::new();
    registry.register(StoreClient(Arc::new(S3Store {
        bucket: "reports".to_string(),
    })));

    assert_eq!(upload(&registry, "daily.csv").as_deref(), Some("s3://reports/daily.csv"));
}

#[test]
fn test_mock_swapped_in_for_a_scope() {
    let registry = ServiceRegistry::new();
    registry.register(StoreClient(Arc::new(S3Store {
        bucket: "reports".to_string(),
    })));

    let mock = Arc::new(MemoryStore::default());
    let location = registry
        .scoped(StoreClient(mock.clone()))
        .run(|_| upload(&registry, "daily.csv"));

    assert_eq!(location.as_deref(), Some("memory://daily.csv"));
    assert_eq!(
        *mock.writes.lock().unwrap(),
        vec![("daily.csv".to_string(), "payload".to_string())]
    );

    // The scope owned the key, so nothing is left behind.
    assert_eq!(upload(&registry, "daily.csv"), None);
}

#[test]
fn test_trait_object_by_name() {
    let registry = ServiceRegistry::new();
    let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::default());
    registry.register_named("archive_store", store);

    let archive: Arc<Arc<dyn ObjectStore>> = registry.get_named("archive_store").unwrap();
    assert_eq!(archive.put("old.csv", "x"), "memory://old.csv");
}
