//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod request;
mod response;
mod tasks;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

#[inline]
async fn fallback_handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Health probe payload.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Reports service liveness. Requires no authentication.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Returns a [`Router`] with all routes.
///
/// Task routes are grouped by capability behind the authentication layer,
/// so a request without a valid session is rejected before any capability
/// check runs. The health probe stays public.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(tasks::routes(state.clone()).with_authentication(state))
        .route("/health", get(health))
        .fallback(fallback_handler)
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use taskboard_clerk::{
        AuthRequest, AuthService, Error, ErrorKind, RequestState, Result, SessionClaims,
        SessionProvider,
    };

    use crate::handler::routes;
    use crate::service::ServiceState;

    /// Provider returning canned outcomes keyed by the bearer token.
    ///
    /// Tokens map to fixed sessions; `down` simulates an unreachable
    /// provider, anything unknown is a rejected credential.
    struct FakeProvider;

    fn claims(
        sub: Option<&str>,
        org_id: Option<&str>,
        org_permissions: Option<&[&str]>,
        permissions: Option<&[&str]>,
    ) -> SessionClaims {
        SessionClaims {
            sub: sub.map(str::to_owned),
            org_id: org_id.map(str::to_owned),
            org_permissions: org_permissions
                .map(|p| p.iter().map(|s| (*s).to_owned()).collect()),
            permissions: permissions.map(|p| p.iter().map(|s| (*s).to_owned()).collect()),
            ..SessionClaims::default()
        }
    }

    const ALL_PERMISSIONS: &[&str] = &[
        "org:tasks:view",
        "org:tasks:edit",
        "org:tasks:create",
        "org:tasks:delete",
    ];

    #[async_trait::async_trait]
    impl SessionProvider for FakeProvider {
        async fn authenticate(&self, request: &AuthRequest) -> Result<RequestState> {
            let state = match request.bearer_token() {
                None => RequestState::signed_out(),
                Some("down") => {
                    return Err(Error::new(ErrorKind::ServiceUnavailable)
                        .with_message("connection refused"));
                }
                Some("no-sub") => {
                    RequestState::signed_in(claims(None, Some("org_a"), None, None))
                }
                Some("no-org") => {
                    RequestState::signed_in(claims(Some("user_1"), None, None, None))
                }
                Some("viewer") => RequestState::signed_in(claims(
                    Some("user_viewer"),
                    Some("org_a"),
                    Some(&["org:tasks:view"]),
                    None,
                )),
                Some("legacy-admin") => RequestState::signed_in(claims(
                    Some("user_legacy"),
                    Some("org_a"),
                    None,
                    Some(ALL_PERMISSIONS),
                )),
                Some("admin-a") => RequestState::signed_in(claims(
                    Some("user_admin_a"),
                    Some("org_a"),
                    Some(ALL_PERMISSIONS),
                    None,
                )),
                Some("admin-b") => RequestState::signed_in(claims(
                    Some("user_admin_b"),
                    Some("org_b"),
                    Some(ALL_PERMISSIONS),
                    None,
                )),
                Some(_) => RequestState::signed_out(),
            };

            Ok(state)
        }
    }

    /// Returns a new [`TestServer`] backed by the fake provider.
    fn create_test_server() -> anyhow::Result<TestServer> {
        let state = ServiceState::with_auth_service(AuthService::new(FakeProvider));
        let app = routes(state.clone()).with_state(state);
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn health_is_public() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_return_structured_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/nope").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn requests_without_a_session_are_unauthenticated() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/tasks").await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "unauthenticated");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_credentials_are_unauthenticated() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/tasks").authorization_bearer("garbage").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn sessions_without_a_user_id_are_unauthenticated() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/tasks").authorization_bearer("no-sub").await;
        response.assert_status_unauthorized();
        Ok(())
    }

    #[tokio::test]
    async fn sessions_without_an_organization_are_bad_requests() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/tasks").authorization_bearer("no-org").await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "missing_organization");
        Ok(())
    }

    #[tokio::test]
    async fn provider_outages_surface_as_server_errors() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/tasks").authorization_bearer("down").await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        assert_eq!(body["name"], "auth_service_unavailable");
        let context = body["context"].as_str().unwrap_or_default();
        assert!(context.contains("connection refused"));
        Ok(())
    }

    #[tokio::test]
    async fn view_only_users_cannot_mutate() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/tasks").authorization_bearer("viewer").await;
        response.assert_status_ok();

        let response = server
            .post("/tasks")
            .authorization_bearer("viewer")
            .json(&json!({"title": "nope"}))
            .await;
        response.assert_status_forbidden();
        assert_eq!(
            response.json::<Value>()["message"],
            "Insufficient permissions to create tasks."
        );

        let task_id = uuid::Uuid::now_v7();
        let response = server
            .patch(&format!("/tasks/{task_id}"))
            .authorization_bearer("viewer")
            .json(&json!({"completed": true}))
            .await;
        response.assert_status_forbidden();
        assert_eq!(
            response.json::<Value>()["message"],
            "Insufficient permissions to edit tasks."
        );

        let response = server
            .delete(&format!("/tasks/{task_id}"))
            .authorization_bearer("viewer")
            .await;
        response.assert_status_forbidden();
        assert_eq!(
            response.json::<Value>()["message"],
            "Insufficient permissions to delete tasks."
        );
        Ok(())
    }

    #[tokio::test]
    async fn legacy_permission_claims_still_grant_access() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/tasks")
            .authorization_bearer("legacy-admin")
            .json(&json!({"title": "migrated"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        Ok(())
    }

    #[tokio::test]
    async fn task_lifecycle_round_trip() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/tasks")
            .authorization_bearer("admin-a")
            .json(&json!({"title": "write handlers", "description": "axum"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let created = response.json::<Value>();
        let task_id = created["id"].as_str().unwrap().to_owned();
        assert_eq!(created["title"], "write handlers");
        assert_eq!(created["completed"], false);
        assert_eq!(created["createdBy"], "user_admin_a");

        let response = server
            .patch(&format!("/tasks/{task_id}"))
            .authorization_bearer("admin-a")
            .json(&json!({"completed": true}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["completed"], true);

        let response = server
            .get(&format!("/tasks/{task_id}"))
            .authorization_bearer("admin-a")
            .await;
        response.assert_status_ok();

        let response = server
            .delete(&format!("/tasks/{task_id}"))
            .authorization_bearer("admin-a")
            .await;
        response.assert_status(axum::http::StatusCode::NO_CONTENT);

        let response = server
            .get(&format!("/tasks/{task_id}"))
            .authorization_bearer("admin-a")
            .await;
        response.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn tasks_are_scoped_to_the_organization() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/tasks")
            .authorization_bearer("admin-a")
            .json(&json!({"title": "org-a only"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let task_id = response.json::<Value>()["id"].as_str().unwrap().to_owned();

        let response = server.get("/tasks").authorization_bearer("admin-b").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["total"], 0);

        let response = server
            .get(&format!("/tasks/{task_id}"))
            .authorization_bearer("admin-b")
            .await;
        response.assert_status_not_found();

        let response = server
            .delete(&format!("/tasks/{task_id}"))
            .authorization_bearer("admin-b")
            .await;
        response.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payloads_are_bad_requests() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .post("/tasks")
            .authorization_bearer("admin-a")
            .json(&json!({"title": ""}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "bad_request");
        Ok(())
    }

    #[tokio::test]
    async fn authentication_is_checked_before_capabilities() -> anyhow::Result<()> {
        let server = create_test_server()?;

        // A missing session must surface as 401, never as a capability
        // denial.
        let response = server.post("/tasks").json(&json!({"title": "nope"})).await;
        response.assert_status_unauthorized();
        assert_eq!(response.json::<Value>()["name"], "unauthenticated");

        let response = server
            .post("/tasks")
            .authorization_bearer("no-org")
            .json(&json!({"title": "nope"}))
            .await;
        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "missing_organization");
        Ok(())
    }

    /// Handler observing the identity as optional, like a public route
    /// that personalizes its response for signed-in callers.
    async fn whoami(auth_user: Option<crate::extract::AuthUser>) -> String {
        match auth_user {
            Some(auth_user) => auth_user.user_id().to_owned(),
            None => "anonymous".to_owned(),
        }
    }

    fn create_whoami_server() -> anyhow::Result<TestServer> {
        let state = ServiceState::with_auth_service(AuthService::new(FakeProvider));
        let app = axum::Router::new()
            .route("/whoami", axum::routing::get(whoami))
            .with_state(state);
        Ok(TestServer::new(app)?)
    }

    #[tokio::test]
    async fn optional_identity_is_absent_for_anonymous_requests() -> anyhow::Result<()> {
        let server = create_whoami_server()?;

        let response = server.get("/whoami").await;
        response.assert_status_ok();
        response.assert_text("anonymous");

        let response = server.get("/whoami").authorization_bearer("admin-a").await;
        response.assert_status_ok();
        response.assert_text("user_admin_a");
        Ok(())
    }

    #[tokio::test]
    async fn optional_identity_still_surfaces_provider_outages() -> anyhow::Result<()> {
        let server = create_whoami_server()?;

        let response = server.get("/whoami").authorization_bearer("down").await;
        response.assert_status_internal_server_error();
        assert_eq!(
            response.json::<Value>()["name"],
            "auth_service_unavailable"
        );
        Ok(())
    }

    #[tokio::test]
    async fn malformed_task_ids_are_bad_requests() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server
            .get("/tasks/not-a-uuid")
            .authorization_bearer("admin-a")
            .await;
        response.assert_status_bad_request();
        Ok(())
    }
}
