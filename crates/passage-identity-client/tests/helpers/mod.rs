//! Mock identity service built on wiremock for integration testing.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use passage_identity_client::HttpIdentityClient;

/// A mock remote identity service with canned scenarios.
pub struct MockIdentityServer {
    server: MockServer,
}

impl MockIdentityServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A client pointed at this mock server.
    pub fn client(&self) -> HttpIdentityClient {
        HttpIdentityClient::with_http_client(
            &self.server.uri(),
            "test-token-123",
            reqwest::Client::new(),
        )
    }

    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// POST /api/users succeeds with the given remote id.
    pub async fn mock_create_success(&self, remote_id: &str) {
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "id": remote_id })),
            )
            .mount(&self.server)
            .await;
    }

    /// POST /api/users fails with the email-in-use conflict pair.
    pub async fn mock_create_conflict(&self) {
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "code": "user.email_already_in_use",
                "message": "This email is associated with an existing account.",
            })))
            .mount(&self.server)
            .await;
    }

    /// POST /api/users fails with a generic server error.
    pub async fn mock_create_server_error(&self) {
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "code": "internal.server_error",
                "message": "unexpected error",
            })))
            .mount(&self.server)
            .await;
    }

    /// GET /api/users?email=... returns the given identities.
    pub async fn mock_search_by_email(&self, email: &str, ids: &[&str]) {
        let body: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("email", email))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// PATCH /api/users/:id succeeds, echoing the id.
    pub async fn mock_update_success(&self, remote_id: &str) {
        Mock::given(method("PATCH"))
            .and(path(format!("/api/users/{remote_id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": remote_id })),
            )
            .mount(&self.server)
            .await;
    }

    /// PATCH on any user fails with a generic error.
    pub async fn mock_update_failure(&self) {
        Mock::given(method("PATCH"))
            .and(path_regex(r"^/api/users/.+$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "user.invalid_fields",
                "message": "payload rejected",
            })))
            .mount(&self.server)
            .await;
    }
}
