//! Remote failures surface as a status line and never mutate the list.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck_core::{App, StatusKind};

use crate::common::{
    COLLECTION_PATH, clear_draft, mount_list, remote_store, settle_until, task_doc, type_str,
};

#[tokio::test]
async fn failed_create_keeps_draft_and_list_intact() {
    let server = MockServer::start().await;
    mount_list(&server, vec![task_doc("t1", "Buy milk")]).await;

    Mock::given(method("POST"))
        .and(path(COLLECTION_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new(remote_store(&server));
    app.load();
    settle_until(&mut app, |app| app.tasks().len() == 1).await;

    type_str(&mut app, "Walk dog");
    app.submit();
    settle_until(&mut app, |app| app.status().is_some()).await;

    let status = app.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("add the task"));

    assert_eq!(app.tasks().len(), 1, "failure never appends");
    assert_eq!(app.draft().text(), "Walk dog", "draft survives");
}

#[tokio::test]
async fn failed_update_leaves_the_edit_armed() {
    let server = MockServer::start().await;
    mount_list(&server, vec![task_doc("gone", "Buy milk")]).await;

    Mock::given(method("PATCH"))
        .and(path(format!("{COLLECTION_PATH}/gone")))
        .respond_with(ResponseTemplate::new(404).set_body_string("no entity to update"))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new(remote_store(&server));
    app.load();
    settle_until(&mut app, |app| app.tasks().len() == 1).await;

    app.begin_edit_selected();
    clear_draft(&mut app);
    type_str(&mut app, "Buy bread");
    app.submit();
    settle_until(&mut app, |app| app.status().is_some()).await;

    let status = app.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("update the task"));

    assert_eq!(app.tasks()[0].name.as_str(), "Buy milk", "name unchanged");
    assert!(app.is_editing(), "target stays armed for a retry");
    assert_eq!(app.draft().text(), "Buy bread");
}

#[tokio::test]
async fn failed_delete_keeps_the_row() {
    let server = MockServer::start().await;
    mount_list(&server, vec![task_doc("t1", "Buy milk")]).await;

    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION_PATH}/t1")))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new(remote_store(&server));
    app.load();
    settle_until(&mut app, |app| app.tasks().len() == 1).await;

    app.delete_selected();
    settle_until(&mut app, |app| app.status().is_some()).await;

    assert_eq!(app.tasks().len(), 1, "row stays until a delete succeeds");
    assert!(app.status().unwrap().text.contains("delete the task"));
}
