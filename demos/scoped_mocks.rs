//! Scoped registration example for svc-registry.
//!
//! Demonstrates:
//! - Swapping a real client for a mock within a scope
//! - The `on_close` callback running when the scope ends
//! - The scope being released even when the body panics
//!
//! Run with: `cargo run --example scoped_mocks`

use std::panic;
use std::sync::{Arc, Mutex};
use svc_registry::{service, ServiceRegistry};

#[derive(Debug, Default)]
struct MailClient {
    sent: Mutex<Vec<String>>,
}

impl MailClient {
    fn send(&self, to: &str) {
        self.sent.lock().unwrap().push(to.to_string());
    }
}

service!(MailClient);

fn main() {
    println!("=== svc-registry: Scoped Mocks ===\n");

    let registry = ServiceRegistry::new();
    let notify = registry
        .inject_by_type::<(MailClient,)>()
        .wrap(|to: &str, mail: Option<Arc<MailClient>>| match mail {
            Some(mail) => {
                mail.send(to);
                true
            }
            None => false,
        });

    // -------------------------------------------------------------------------
    // 1. No client registered
    // -------------------------------------------------------------------------
    println!("1. Without a client: sent = {}", notify.call("ops@example.com"));

    // -------------------------------------------------------------------------
    // 2. Mock registered for a scope
    // -------------------------------------------------------------------------
    println!("\n2. Within a scope...");

    registry.with_scoped_registration(
        MailClient::default(),
        Some(|mock: &MailClient| println!("   on_close saw: {:?}", mock.sent.lock().unwrap())),
        |_| {
            println!("   sent = {}", notify.call("ops@example.com"));
            println!("   sent = {}", notify.call("dev@example.com"));
        },
    );

    println!("   After the scope: registered = {}", registry.contains::<MailClient>());

    // -------------------------------------------------------------------------
    // 3. A failing scope still cleans up
    // -------------------------------------------------------------------------
    println!("\n3. When the scope panics...");

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        registry
            .scoped(MailClient::default())
            .on_close(|_| println!("   on_close ran during unwinding"))
            .run(|_| panic!("simulated test failure"))
    }));

    println!("   panicked = {}", result.is_err());
    println!("   registered = {}", registry.contains::<MailClient>());

    println!("\n=== Example Complete ===");
}
