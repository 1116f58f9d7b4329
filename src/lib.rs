//! # svc-registry
//!
//! A command-line scaffold built around a small service registry.
//!
//! Real side-effecting clients (network services, disk, cloud SDKs) are
//! constructed once and registered; business-logic functions receive them
//! through explicit injection instead of building them themselves. Tests swap
//! in mocks with scoped registration.
//!
//! ## Quick Start
//!
//! ```rust
//! use svc_registry::{service, ServiceRegistry};
//! use std::sync::Arc;
//!
//! struct GitClient {
//!     remote: String,
//! }
//! service!(GitClient);
//!
//! let registry = ServiceRegistry::new();
//! registry.register(GitClient { remote: "origin".to_string() });
//!
//! let describe = registry
//!     .inject_by_type::<(GitClient,)>()
//!     .wrap(|branch: &str, client: Option<Arc<GitClient>>| match client {
//!         Some(git) => format!("{}/{branch}", git.remote),
//!         None => branch.to_string(),
//!     });
//!
//! assert_eq!(describe.call("main"), "origin/main");
//! ```
//!
//! ## Main Types
//!
//! - [`ServiceRegistry`] - the key-to-instance table, passed around as a context object
//! - [`Service`] / [`service!`] - declare which types can be registered by type
//! - [`ServiceRegistry::inject_by_type`] / [`ServiceRegistry::inject_by_name`] - injection
//! - [`ServiceRegistry::scoped`] - registration bounded to a scope
//! - [`global`] - the process-wide default registry
//! - [`define_registry!`] - further isolated static registries

#[macro_use]
mod macros;

mod inject;
mod key;
mod registry;
mod registry_error;
mod registry_event;
mod scope;

pub mod cli;
pub mod cloud;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod util;

pub use inject::{Dependencies, Inject, InjectNamed, Injected, InjectedNamed};
pub use key::{Service, ServiceKey};
pub use registry::{ServiceRegistry, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use scope::ScopedService;

pub use error::{AppError, Result};

// Process-wide default registry, created on first use.
define_registry!(global);
