//! Small helpers: case conversion, key masking and a safe-call wrapper.

use std::collections::HashSet;
use std::fmt::Display;

use serde_json::{Map, Value};
use tracing::warn;

/// `CamelCase` to `snake_case`.
///
/// An underscore goes before every ASCII uppercase letter that is not the
/// first character, then the whole string is lower-cased.
///
/// ```
/// use svc_registry::util::camel_to_snake;
///
/// assert_eq!(camel_to_snake("DnsClient"), "dns_client");
/// assert_eq!(camel_to_snake("Client"), "client");
/// ```
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c);
    }
    out.to_lowercase()
}

/// `snake_case` to `CamelCase`: every `_`-separated word is title-cased.
pub fn snake_to_camel(name: &str) -> String {
    name.split('_').map(title_case).collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Renames the keys of a JSON object to `snake_case`.
pub fn snake_case_keys(input: Map<String, Value>) -> Map<String, Value> {
    input
        .into_iter()
        .map(|(k, v)| (camel_to_snake(&k), v))
        .collect()
}

/// Renames the keys of a JSON object to `CamelCase`.
pub fn camel_case_keys(input: Map<String, Value>) -> Map<String, Value> {
    input
        .into_iter()
        .map(|(k, v)| (snake_to_camel(&k), v))
        .collect()
}

/// Keeps only the entries whose key is in `keys`.
pub fn filter_keys(mapping: &Map<String, Value>, keys: &HashSet<&str>) -> Map<String, Value> {
    mapping
        .iter()
        .filter(|(k, _)| keys.contains(k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Runs `f`, turning any error into a warning and `None`.
///
/// Every failure is swallowed, so only use this where the result is optional.
///
/// ```
/// use svc_registry::util::try_exec;
///
/// assert_eq!(try_exec("parse", || "42".parse::<u8>()), Some(42));
/// assert_eq!(try_exec("parse", || "nope".parse::<u8>()), None);
/// ```
pub fn try_exec<T, E, F>(label: &str, f: F) -> Option<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match f() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%err, "{label} failed, returning None");
            None
        }
    }
}
