//! Integration tests for the idempotent importer: create, conflict
//! resolution, and the inconsistency path.

mod helpers;

use helpers::MockIdentityServer;
use passage_domain::{CandidateRecord, RawCandidate};
use passage_identity_client::{ImportFailureKind, ImportOutcome, Importer, PayloadDefaults};
use std::sync::Arc;

fn candidate(email: &str) -> CandidateRecord {
    CandidateRecord::new(
        42,
        RawCandidate {
            primary_email: Some(email.to_string()),
            username: Some("jdoe".to_string()),
            password_digest: Some("$2b$10$abc".to_string()),
            password_algorithm: Some("Bcrypt".to_string()),
            ..Default::default()
        },
    )
}

fn importer(server: &MockIdentityServer) -> Importer {
    Importer::new(Arc::new(server.client()), PayloadDefaults::default())
}

#[tokio::test]
async fn fresh_candidate_is_created() {
    let server = MockIdentityServer::start().await;
    server.mock_create_success("remote-1").await;

    let outcome = importer(&server).import(&candidate("a@b.com")).await;

    assert_eq!(outcome, ImportOutcome::Created("remote-1".to_string()));
}

#[tokio::test]
async fn conflict_resolves_to_update_of_existing_identity() {
    let server = MockIdentityServer::start().await;
    server.mock_create_conflict().await;
    server.mock_search_by_email("a@b.com", &["remote-7"]).await;
    server.mock_update_success("remote-7").await;

    let outcome = importer(&server).import(&candidate("a@b.com")).await;

    assert_eq!(outcome, ImportOutcome::Updated("remote-7".to_string()));

    // The update must not attempt to change the immutable fields.
    let requests = server
        .inner()
        .received_requests()
        .await
        .expect("request recording enabled");
    let patch = requests
        .iter()
        .find(|r| r.method.as_str() == "PATCH")
        .expect("update request sent");
    let body: serde_json::Value =
        serde_json::from_slice(&patch.body).expect("patch body is JSON");
    assert!(body.get("primaryEmail").is_none());
    assert!(body.get("passwordDigest").is_none());
    assert!(body.get("passwordAlgorithm").is_none());
    assert_eq!(body["username"], "jdoe");
}

#[tokio::test]
async fn conflict_with_empty_lookup_is_inconsistent() {
    let server = MockIdentityServer::start().await;
    server.mock_create_conflict().await;
    server.mock_search_by_email("a@b.com", &[]).await;

    let outcome = importer(&server).import(&candidate("a@b.com")).await;

    match outcome {
        ImportOutcome::Failed(failure) => {
            assert_eq!(failure.kind, ImportFailureKind::Inconsistent);
        }
        other => panic!("expected inconsistency failure, got {other:?}"),
    }
}

#[tokio::test]
async fn remote_error_is_surfaced_not_retried() {
    let server = MockIdentityServer::start().await;
    server.mock_create_server_error().await;

    let outcome = importer(&server).import(&candidate("a@b.com")).await;

    match outcome {
        ImportOutcome::Failed(failure) => {
            assert_eq!(failure.kind, ImportFailureKind::Remote);
            assert!(failure.message.contains("500"));
        }
        other => panic!("expected remote failure, got {other:?}"),
    }

    // Exactly one create attempt: the importer performs no retries.
    let requests = server
        .inner()
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(
        requests
            .iter()
            .filter(|r| r.method.as_str() == "POST")
            .count(),
        1
    );
}

#[tokio::test]
async fn update_failure_after_conflict_is_remote_failure() {
    let server = MockIdentityServer::start().await;
    server.mock_create_conflict().await;
    server.mock_search_by_email("a@b.com", &["remote-7"]).await;
    server.mock_update_failure().await;

    let outcome = importer(&server).import(&candidate("a@b.com")).await;

    match outcome {
        ImportOutcome::Failed(failure) => {
            assert_eq!(failure.kind, ImportFailureKind::Remote);
            assert!(failure.message.contains("user.invalid_fields"));
        }
        other => panic!("expected remote failure, got {other:?}"),
    }
}
