mod common;

use std::sync::Arc;

use area_core::api::RemoteCall;
use area_core::{DeletionRequest, EditorError, EditorSession, GateState};
use tokio::task::JoinHandle;

use common::{start, Call, FakeApi};

/// Starts a deletion and waits until it is parked on the gate.
async fn request_deletion(
    session: &Arc<EditorSession>,
    nodes: &[&str],
    edges: &[&str],
) -> JoinHandle<Result<bool, EditorError>> {
    let mut prompt = session.subscribe_deletions();
    let nodes: Vec<String> = nodes.iter().map(|s| s.to_string()).collect();
    let edges: Vec<String> = edges.iter().map(|s| s.to_string()).collect();

    let task = {
        let session = session.clone();
        tokio::spawn(async move { session.on_delete_request(nodes, edges).await })
    };

    prompt.wait_for(Option::is_some).await.unwrap();
    task
}

#[tokio::test]
async fn test_cancel_changes_nothing() {
    let api = FakeApi::new();
    let session = start(&api);
    let graph = session.graph().await;
    let playground = session.playground().await;

    let task = request_deletion(&session, &["action:7"], &[]).await;
    assert_eq!(session.deletion_state(), GateState::AwaitingConfirmation);
    assert!(session.cancel_deletion());

    assert!(!task.await.unwrap().unwrap());
    assert_eq!(session.graph().await, graph);
    assert_eq!(session.playground().await, playground);
    assert!(api.calls().is_empty());
    assert_eq!(session.deletion_state(), GateState::Idle);
}

#[tokio::test]
async fn test_dismiss_is_cancel() {
    let api = FakeApi::new();
    let session = start(&api);

    let task = request_deletion(&session, &["reaction:3"], &[]).await;
    assert!(session.dismiss_deletion());

    assert!(!task.await.unwrap().unwrap());
    assert!(session.graph().await.contains_node("reaction:3"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_confirm_deletes_node_and_cascades() {
    let api = FakeApi::new();
    let session = start(&api);

    let task = request_deletion(&session, &["action:7"], &[]).await;
    assert_eq!(
        session.pending_deletion(),
        Some(DeletionRequest::new(vec!["action:7".to_string()], vec![]))
    );
    assert!(session.confirm_deletion());
    assert!(task.await.unwrap().unwrap());

    assert_eq!(
        api.calls(),
        vec![Call {
            call: RemoteCall::DeleteActionFromPlayground,
            args: (1, 7),
        }]
    );

    let graph = session.graph().await;
    assert!(!graph.contains_node("action:7"));
    assert!(!graph.contains_edge("link:action:1"));
    assert_eq!(graph.nodes.len(), 2);

    let pg = session.playground().await;
    assert!(pg.actions.is_empty());
    assert!(pg.action_links.is_empty());
}

#[tokio::test]
async fn test_edge_deletion_is_local() {
    let api = FakeApi::new();
    let session = start(&api);

    let task = request_deletion(&session, &[], &["link:action:1"]).await;
    session.confirm_deletion();
    assert!(task.await.unwrap().unwrap());

    assert!(api.calls().is_empty());
    let graph = session.graph().await;
    assert!(graph.edges.is_empty());
    assert_eq!(graph.nodes.len(), 3);
}

#[tokio::test]
async fn test_second_request_is_busy() {
    let api = FakeApi::new();
    let session = start(&api);

    let first = request_deletion(&session, &["action:7"], &[]).await;

    let err = session
        .on_delete_request(vec!["reaction:9".to_string()], vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::GateBusy));

    // The first request is still the one on screen.
    assert_eq!(
        session.pending_deletion().map(|r| r.nodes),
        Some(vec!["action:7".to_string()])
    );
    session.cancel_deletion();
    assert!(!first.await.unwrap().unwrap());
}

#[tokio::test]
async fn test_graph_updated_before_remote_delete() {
    let api = FakeApi::new();
    let latch = api.hold_next();
    let session = start(&api);

    let task = request_deletion(&session, &["reaction:3"], &[]).await;
    session.confirm_deletion();

    latch.entered.notified().await;
    let graph = session.graph().await;
    assert!(!graph.contains_node("reaction:3"));
    assert!(!graph.contains_edge("link:action:1"));
    // Playground only changes once the backend answers.
    assert_eq!(session.playground().await.reactions.len(), 2);

    latch.release.notify_one();
    assert!(task.await.unwrap().unwrap());
    assert_eq!(session.playground().await.reactions.len(), 1);
}

#[tokio::test]
async fn test_failed_delete_is_rolled_back() {
    let api = FakeApi::new();
    api.fail(RemoteCall::DeleteReactionFromPlayground);
    let session = start(&api);

    let task = request_deletion(&session, &["reaction:3"], &[]).await;
    session.confirm_deletion();
    assert!(task.await.unwrap().unwrap());

    let graph = session.graph().await;
    assert!(graph.contains_node("reaction:3"));
    assert!(graph.contains_edge("link:action:1"));
    assert_eq!(session.playground().await.reactions.len(), 2);
}
