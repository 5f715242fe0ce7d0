//! Shared fixtures for the integration suite.
//!
//! Tests drive a real [`App`] over a real [`RemoteStore`] against a
//! wiremock server speaking the document store's wire format, so the
//! whole path from user intent to HTTP round trip is exercised.

#![allow(dead_code)]

use std::time::Duration;

use tokio::time::sleep;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck_core::App;
use taskdeck_store::RemoteStore;

pub const COLLECTION_PATH: &str = "/v1/projects/demo/databases/(default)/documents/tasks";

pub fn remote_store(server: &MockServer) -> RemoteStore {
    RemoteStore::new(&server.uri(), "demo", "tasks", None).expect("mock server uri is valid")
}

/// A document as the store returns it: full resource path plus a single
/// `stringValue` field.
pub fn task_doc(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": format!("projects/demo/databases/(default)/documents/tasks/{id}"),
        "fields": { "name": { "stringValue": name } }
    })
}

pub async fn mount_list(server: &MockServer, docs: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "documents": docs })),
        )
        .mount(server)
        .await;
}

pub async fn mount_empty_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(server)
        .await;
}

pub fn type_str(app: &mut App<RemoteStore>, text: &str) {
    for ch in text.chars() {
        app.enter_char(ch);
    }
}

pub fn clear_draft(app: &mut App<RemoteStore>) {
    app.move_cursor_end();
    while !app.draft().is_empty() {
        app.delete_char();
    }
}

/// Poll store completions into the app until `pred` holds. Panics when
/// the condition never materializes, so a hung call fails loudly instead
/// of timing out the whole suite.
pub async fn settle_until<P>(app: &mut App<RemoteStore>, pred: P)
where
    P: Fn(&App<RemoteStore>) -> bool,
{
    for _ in 0..400 {
        app.process_store_events();
        if pred(app) {
            return;
        }
        sleep(Duration::from_millis(5)).await;
    }
    panic!("store call did not settle within 2s");
}
