//! Basic usage example for svc-registry.
//!
//! Demonstrates:
//! - Declaring services with `service!`
//! - Registering by type and by name
//! - Injecting services into plain functions
//! - Handling missing services gracefully
//!
//! Run with: `cargo run --example basic_usage`

use std::sync::Arc;
use svc_registry::cloud::{ClientFactory, ClientHandle, RegionalClientFactory};
use svc_registry::{service, ServiceRegistry};

/// A client that would talk to a DNS API.
#[derive(Debug)]
struct DnsClient {
    zone: String,
}

impl DnsClient {
    fn record(&self, host: &str) -> String {
        format!("{host}.{}", self.zone)
    }
}

/// A client that would talk to a git server.
#[derive(Debug)]
struct GitClient {
    remote: String,
}

service!(DnsClient, GitClient);

fn main() {
    println!("=== svc-registry: Basic Usage ===\n");

    let registry = ServiceRegistry::new();

    // -------------------------------------------------------------------------
    // 1. Register services by type
    // -------------------------------------------------------------------------
    println!("1. Registering services by type...");

    registry.register(DnsClient {
        zone: "example.com".to_string(),
    });

    println!("   Keys: {:?}", registry.keys());

    // -------------------------------------------------------------------------
    // 2. Register a client handle by name
    // -------------------------------------------------------------------------
    println!("\n2. Registering a client handle by name...");

    match RegionalClientFactory.client("glue", "eu-west-1") {
        Ok(handle) => {
            let stored = registry.register_named("glue_client", handle);
            println!("   glue_client -> {stored:?}");
        }
        Err(e) => println!("   Could not create client: {e}"),
    }

    // -------------------------------------------------------------------------
    // 3. Inject by type
    // -------------------------------------------------------------------------
    println!("\n3. Injecting services by type...");

    let deploy = registry.inject_by_type::<(DnsClient, GitClient)>().wrap(
        |host: &str, (dns, git): (Option<Arc<DnsClient>>, Option<Arc<GitClient>>)| {
            let record = dns.map_or_else(|| host.to_string(), |dns| dns.record(host));
            let remote = git.map_or_else(|| "<no git client>".to_string(), |git| git.remote.clone());
            format!("{record} from {remote}")
        },
    );

    println!("   Before GitClient: {}", deploy.call("api"));
    registry.register(GitClient {
        remote: "origin".to_string(),
    });
    println!("   After GitClient:  {}", deploy.call("api"));

    // -------------------------------------------------------------------------
    // 4. Inject by name
    // -------------------------------------------------------------------------
    println!("\n4. Injecting a handle by name...");

    let describe = registry
        .inject_by_name::<ClientHandle>("glue_client")
        .wrap(|(), glue: Option<Arc<ClientHandle>>| match glue {
            Some(glue) => format!("{} in {}", glue.service, glue.region),
            None => "no glue client".to_string(),
        });

    println!("   {}", describe.call(()));

    // -------------------------------------------------------------------------
    // 5. Handle missing services gracefully
    // -------------------------------------------------------------------------
    println!("\n5. Handling missing services...");

    registry.deregister::<DnsClient>();
    match registry.get::<DnsClient>() {
        Ok(dns) => println!("   Found DnsClient: {dns:?}"),
        Err(e) => println!("   Error (expected): {e}"),
    }
    println!("   Injection still works: {}", deploy.call("api"));

    println!("\n=== Example Complete ===");
}
