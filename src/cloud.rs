//! Cloud client handles and the paginated listing helper.
//!
//! The registry only ever stores whatever [`ClientFactory`] hands back; it
//! never looks inside a [`ClientHandle`].

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloudError {
    #[error("Invalid client request: {0}")]
    InvalidClient(String),

    #[error("Page of {operation} has no list field `{field}`")]
    MissingField { operation: String, field: String },

    #[error("Pagination of {operation} repeated continuation token {token}")]
    RepeatedToken { operation: String, token: String },

    #[error("Request {operation} failed: {message}")]
    Request { operation: String, message: String },
}

/// A region-scoped handle for one cloud service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHandle {
    pub service: String,
    pub region: String,
}

/// Builds region-scoped client handles.
pub trait ClientFactory {
    fn client(&self, service: &str, region: &str) -> Result<ClientHandle, CloudError>;
}

/// Default factory: a handle is just the service and region names.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionalClientFactory;

impl ClientFactory for RegionalClientFactory {
    fn client(&self, service: &str, region: &str) -> Result<ClientHandle, CloudError> {
        if service.trim().is_empty() {
            return Err(CloudError::InvalidClient("service name is empty".to_string()));
        }
        if region.trim().is_empty() {
            return Err(CloudError::InvalidClient(format!(
                "region for {service} is empty"
            )));
        }

        debug!(service, region, "creating client handle");
        Ok(ClientHandle {
            service: service.to_string(),
            region: region.to_string(),
        })
    }
}

/// One page of a listing operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub body: Value,
    pub next_token: Option<String>,
}

/// A client able to fetch listing pages.
pub trait Paginator {
    fn fetch_page(
        &self,
        operation: &str,
        params: &Map<String, Value>,
        next_token: Option<&str>,
    ) -> Result<Page, CloudError>;
}

/// Fetches every page of `operation` and concatenates the `root_element`
/// arrays into one list.
///
/// # Errors
///
/// Fails when a page lacks `root_element` (or it is not an array), when a
/// continuation token comes back twice, or when fetching a page fails.
pub fn get_all_entries<P: Paginator + ?Sized>(
    client: &P,
    operation: &str,
    root_element: &str,
    params: &Map<String, Value>,
) -> Result<Vec<Value>, CloudError> {
    let mut entries = Vec::new();
    let mut seen_tokens: Vec<String> = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = client.fetch_page(operation, params, token.as_deref())?;

        match page.body.get(root_element) {
            Some(Value::Array(items)) => entries.extend(items.iter().cloned()),
            _ => {
                return Err(CloudError::MissingField {
                    operation: operation.to_string(),
                    field: root_element.to_string(),
                })
            }
        }

        match page.next_token {
            None => break,
            Some(next) if seen_tokens.contains(&next) => {
                return Err(CloudError::RepeatedToken {
                    operation: operation.to_string(),
                    token: next,
                })
            }
            Some(next) => {
                seen_tokens.push(next.clone());
                token = Some(next);
            }
        }
    }

    debug!(operation, pages = seen_tokens.len() + 1, entries = entries.len(), "listing complete");
    Ok(entries)
}
