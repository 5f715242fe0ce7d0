use std::time::Duration;

use tokio::time::sleep;
use wiremock::MockServer;

use taskdeck_core::App;

use crate::common::{mount_empty_list, mount_list, remote_store, settle_until, task_doc};

#[tokio::test]
async fn startup_load_populates_the_list() {
    let server = MockServer::start().await;
    mount_list(
        &server,
        vec![task_doc("t1", "Buy milk"), task_doc("t2", "Walk dog")],
    )
    .await;

    let mut app = App::new(remote_store(&server));
    app.load();
    settle_until(&mut app, |app| app.tasks().len() == 2).await;

    assert_eq!(app.tasks()[0].id.as_str(), "t1");
    assert_eq!(app.tasks()[0].name.as_str(), "Buy milk");
    assert_eq!(app.tasks()[1].name.as_str(), "Walk dog");
    assert_eq!(app.selected(), Some(0));
    assert!(app.status().is_none());
}

#[tokio::test]
async fn startup_with_empty_collection_shows_nothing() {
    let server = MockServer::start().await;
    mount_empty_list(&server).await;

    let mut app = App::new(remote_store(&server));
    app.load();

    // Nothing to wait on in state, so settle on the call having resolved
    // without leaving an error behind.
    sleep(Duration::from_millis(50)).await;
    app.process_store_events();

    assert!(app.tasks().is_empty());
    assert_eq!(app.selected(), None);
    assert!(app.status().is_none());
}
