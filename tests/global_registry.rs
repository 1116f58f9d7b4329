//! Integration tests for the process-wide default registry.
//!
//! NOTE: All tests use #[serial] because they share `svc_registry::global`.

use serial_test::serial;
use std::sync::Arc;
use svc_registry::cli::{execute, Commands, GLUE_CLIENT};
use svc_registry::cloud::{ClientHandle, RegionalClientFactory};
use svc_registry::config::Config;
use svc_registry::{global, service};

struct DnsClient(&'static str);
service!(DnsClient);

#[test]
#[serial]
fn test_register_then_deregister() {
    global::clear();

    global::register(DnsClient("global"));
    assert!(global::contains::<DnsClient>());
    assert_eq!(global::get::<DnsClient>().unwrap().0, "global");

    assert!(global::deregister::<DnsClient>());
    assert!(!global::contains::<DnsClient>());
    // Absent is a no-op.
    assert!(!global::deregister::<DnsClient>());
}

#[test]
#[serial]
fn test_injection_and_scope() {
    global::clear();

    let zone = global::inject_by_type::<(DnsClient,)>()
        .wrap(|(), dns: Option<Arc<DnsClient>>| dns.map(|d| d.0));

    {
        let _mock = global::scoped(DnsClient("mock"));
        assert_eq!(zone.call(()), Some("mock"));
    }
    assert_eq!(zone.call(()), None);
}

#[test]
#[serial]
fn test_example_command_against_global() {
    global::clear();

    let mut out = Vec::new();
    execute(
        &Commands::ExampleCliFunction {
            name: "adriaan".to_string(),
        },
        &Config::default(),
        global::registry(),
        &RegionalClientFactory,
        &mut out,
    )
    .unwrap();

    assert_eq!(out, b"adriaan\n");
    let glue = global::get_named::<ClientHandle>(GLUE_CLIENT).unwrap();
    assert_eq!(glue.service, "glue");

    global::clear();
}
