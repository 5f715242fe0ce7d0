//! Remote store adapter for Taskdeck.
//!
//! # Architecture
//!
//! The controller layer only sees the [`TaskStore`] capability contract:
//! four operations on a named collection of documents, each carrying an
//! opaque id and a `name` field. [`RemoteStore`] implements the contract
//! against the Firestore REST v1 surface.
//!
//! # Error Handling
//!
//! Every operation resolves to a single [`StoreError`] or success. Nothing
//! is retried and no per-request timeout is enforced at this layer; a
//! connect timeout on the shared HTTP client is the only transport tuning.

pub mod firestore;

pub use firestore::RemoteStore;

use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::redirect::Policy;
use taskdeck_types::{Task, TaskId, TaskName};
use thiserror::Error;

const CONNECT_TIMEOUT_SECS: u64 = 30;

// Cap stored error bodies so a misbehaving backend can't flood logs or the
// status line.
const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Capability contract required from the remote store.
///
/// Implementations are cheap to clone (`reqwest::Client` is reference
/// counted) so each user action can move a handle into its spawned call.
pub trait TaskStore: Clone + Send + Sync + 'static {
    /// Fetch every task in the collection. Eventually consistent with prior
    /// writes; ordering unspecified.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Persist a new record and return it with its store-assigned id.
    fn create(&self, name: &TaskName) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Overwrite the record's name. Fails if `id` does not exist.
    fn update(
        &self,
        id: &TaskId,
        name: &TaskName,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove the record. Succeeds even if `id` is already gone.
    fn delete(&self, id: &TaskId) -> impl Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed store response: {0}")]
    Decode(String),

    #[error("invalid store endpoint {url}: {source}")]
    Endpoint {
        url: String,
        source: url::ParseError,
    },
}

/// Shared HTTP client for all store calls.
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {e}. Falling back to defaults.");
                reqwest::Client::new()
            })
    })
}

pub(crate) async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => cap_error_body(body),
        Err(_) => String::new(),
    };
    StoreError::Api { status, body }
}

fn cap_error_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_BYTES {
        let mut end = MAX_ERROR_BODY_BYTES;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...(truncated)");
    }
    body
}
