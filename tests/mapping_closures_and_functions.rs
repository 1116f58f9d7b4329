//! Integration tests for registering plain functions and closures by name.
//!
//! Functions don't warrant a dedicated service type, so they are registered
//! under a caller-supplied name and injected with `inject_by_name`.
//!
//! NOTE: All tests use #[serial] because they share the same registry.

use serial_test::serial;
use std::sync::Arc;
use svc_registry::define_registry;

define_registry!(functions);

type Callback = Box<dyn Fn(String) + Send + Sync>;

#[test]
#[serial]
fn test_register_named_returns_stored_function() {
    functions::clear();

    let multiply_by_two: fn(i32) -> i32 = |x| x * 2;
    let stored = functions::register_named("doubler", multiply_by_two);

    let func: Arc<fn(i32) -> i32> = functions::get_named("doubler").unwrap();
    assert!(Arc::ptr_eq(&stored, &func));
    assert_eq!(func(21), 42);
}

#[test]
#[serial]
fn test_register_boxed_closure_with_state() {
    functions::clear();

    let multiplier = 3;
    let multiply: Box<dyn Fn(i32) -> i32 + Send + Sync> = Box::new(move |x| x * multiplier);
    functions::register_named("multiply", multiply);

    let func: Arc<Box<dyn Fn(i32) -> i32 + Send + Sync>> = functions::get_named("multiply").unwrap();
    assert_eq!(func(14), 42);
}

#[test]
#[serial]
fn test_inject_function_by_name() {
    functions::clear();

    let greet = functions::inject_by_name::<fn(&str) -> String>("greeter").wrap(
        |who: &str, greeter: Option<Arc<fn(&str) -> String>>| match greeter {
            Some(greeter) => greeter(who),
            None => format!("(no greeter) {who}"),
        },
    );

    assert_eq!(greet.call("World"), "(no greeter) World");

    let hello: fn(&str) -> String = |s| format!("Hello, {}!", s);
    functions::register_named("greeter", hello);
    assert_eq!(greet.call("World"), "Hello, World!");
}

#[test]
#[serial]
fn test_explicit_function_overrides_registered() {
    functions::clear();

    let hello: fn(&str) -> String = |s| format!("Hello, {}!", s);
    functions::register_named("greeter", hello);

    let greet = functions::inject_by_name::<fn(&str) -> String>("greeter")
        .wrap(|who: &str, greeter: Option<Arc<fn(&str) -> String>>| greeter.map(|g| g(who)));

    let bye: fn(&str) -> String = |s| format!("Bye, {}!", s);
    assert_eq!(
        greet.call_with("World", Some(Arc::new(bye))).as_deref(),
        Some("Bye, World!")
    );
    assert_eq!(greet.call("World").as_deref(), Some("Hello, World!"));
}

#[test]
#[serial]
fn test_register_callback_pattern() {
    functions::clear();

    let messages = Arc::new(std::sync::Mutex::new(Vec::new()));
    let messages_clone = messages.clone();

    let callback: Callback = Box::new(move |msg| {
        messages_clone.lock().unwrap().push(msg);
    });
    functions::register_named("on_message", callback);

    let notify = functions::inject_by_name::<Callback>("on_message")
        .wrap(|msg: String, cb: Option<Arc<Callback>>| {
            if let Some(cb) = cb {
                cb(msg);
            }
        });
    notify.call("Test message".to_string());

    let msgs = messages.lock().unwrap();
    assert_eq!(*msgs, vec!["Test message".to_string()]);
}
