//! The full lifecycle of a task, driven through the real HTTP path.

use std::time::Duration;

use tokio::time::sleep;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck_core::App;

use crate::common::{
    COLLECTION_PATH, clear_draft, mount_empty_list, remote_store, settle_until, task_doc, type_str,
};

#[tokio::test]
async fn create_update_delete_round_trip() {
    let server = MockServer::start().await;
    mount_empty_list(&server).await;

    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .and(body_json(serde_json::json!({
            "fields": { "name": { "stringValue": "Buy milk" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_doc("t1", "Buy milk")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{COLLECTION_PATH}/t1")))
        .and(query_param("updateMask.fieldPaths", "name"))
        .and(query_param("currentDocument.exists", "true"))
        .and(body_json(serde_json::json!({
            "fields": { "name": { "stringValue": "Buy bread" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_doc("t1", "Buy bread")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION_PATH}/t1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new(remote_store(&server));
    app.load();
    settle_until(&mut app, |app| app.tasks().is_empty() && app.status().is_none()).await;

    // Create
    type_str(&mut app, "Buy milk");
    app.submit();
    settle_until(&mut app, |app| app.tasks().len() == 1).await;
    assert_eq!(app.tasks()[0].id.as_str(), "t1");
    assert!(app.draft().is_empty(), "draft clears once the create lands");

    // Update in place
    app.begin_edit_selected();
    assert_eq!(app.draft().text(), "Buy milk");
    clear_draft(&mut app);
    type_str(&mut app, "Buy bread");
    app.submit();
    settle_until(&mut app, |app| !app.is_editing()).await;
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.tasks()[0].id.as_str(), "t1");
    assert_eq!(app.tasks()[0].name.as_str(), "Buy bread");
    assert!(app.draft().is_empty());

    // Delete
    app.delete_selected();
    settle_until(&mut app, |app| app.tasks().is_empty()).await;
    assert_eq!(app.selected(), None);
}

#[tokio::test]
async fn blank_submit_never_reaches_the_wire() {
    let server = MockServer::start().await;

    // No POST mock mounted: any create request would 404 and surface as
    // an error status, which the assertions below would catch.
    let mut app = App::new(remote_store(&server));

    type_str(&mut app, "   ");
    app.submit();

    sleep(Duration::from_millis(50)).await;
    app.process_store_events();

    assert!(app.tasks().is_empty());
    let status = app.status().expect("validation message is shown");
    assert_eq!(status.text, "Please enter a task name.");
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}
