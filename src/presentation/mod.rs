// Presentation layer - HTTP routes over the view router
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    authenticate, current_page, delete_contact, export_contacts, health_check, login, logout, navigate,
    set_theme, view_contact,
};
use axum::{
    Router,
    routing::{any, get, post, put},
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/auth", any(authenticate))
        .route("/api/page", get(current_page))
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
        .route("/api/navigate/:section", post(navigate))
        .route("/api/theme", put(set_theme))
        .route("/api/contacts/export", get(export_contacts))
        .route("/api/contacts/:id", get(view_contact).delete(delete_contact))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::credential_verifier::CredentialVerifier;
    use crate::application::document_store::StoreHandle;
    use crate::application::session_store::SessionStore;
    use crate::application::view_router::ViewRouter;
    use crate::domain::contact::CONTACTS_COLLECTION;
    use crate::domain::document::{Document, FieldValue};
    use crate::infrastructure::config::TransitionSettings;
    use crate::infrastructure::file_storage::MemoryStorage;
    use crate::infrastructure::memory_store::MemoryStore;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn create_test_app(with_contact: bool) -> Router {
        let memory = Arc::new(MemoryStore::new());
        if with_contact {
            let doc = Document::new("c1")
                .with_field("name", FieldValue::String("Asha".to_string()))
                .with_field("email", FieldValue::String("asha@example.com".to_string()))
                .with_field("subject", FieldValue::String("Pricing".to_string()))
                .with_field("message", FieldValue::String("Need a plan".to_string()))
                .with_field(
                    "timestamp",
                    FieldValue::Timestamp(Utc.with_ymd_and_hms(2025, 5, 2, 8, 0, 0).unwrap()),
                );
            memory.insert(CONTACTS_COLLECTION, doc).await;
        }

        let verifier = CredentialVerifier::new(Some("admin".to_string()), Some("pw".to_string()));
        let router = ViewRouter::new(
            StoreHandle::initialize(memory).await,
            SessionStore::new(Arc::new(MemoryStorage::default())),
            verifier.clone(),
            TransitionSettings::default(),
        );
        router.start().await;

        build_router(Arc::new(AppState {
            router: Arc::new(router),
            verifier,
        }))
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn logged_in_app(with_contact: bool) -> Router {
        let app = create_test_app(with_contact).await;
        let response = app
            .clone()
            .oneshot(request("POST", "/api/session/login", r#"{"username":"admin","password":"pw"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        app
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app(false).await;
        let response = app.oneshot(request("GET", "/healthz", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_rejects_non_post() {
        let app = create_test_app(false).await;
        let response = app.oneshot(request("GET", "/api/auth", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_body(response).await, serde_json::json!({ "error": "Method not allowed" }));
    }

    #[tokio::test]
    async fn test_auth_accepts_matching_credentials() {
        let app = create_test_app(false).await;
        let response = app
            .oneshot(request("POST", "/api/auth", r#"{"username":"admin","password":"pw"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Authentication successful");
    }

    #[tokio::test]
    async fn test_auth_malformed_body_is_unauthorized() {
        let app = create_test_app(false).await;
        let response = app.oneshot(request("POST", "/api/auth", "not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_rejected_login_returns_alert() {
        let app = create_test_app(false).await;
        let response = app
            .oneshot(request("POST", "/api/session/login", r#"{"username":"admin","password":"no"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["outcome"], "rejected");
        assert_eq!(body["page"]["login"]["alert"], "Login failed: Invalid credentials");
    }

    #[tokio::test]
    async fn test_unknown_section_is_bad_request() {
        let app = logged_in_app(false).await;
        let response = app.oneshot(request("POST", "/api/navigate/reports", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_navigate_to_contacts_lists_rows() {
        let app = logged_in_app(true).await;
        let response = app.oneshot(request("POST", "/api/navigate/contacts", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["transition"]["target"], "contacts");
        assert_eq!(body["page"]["contacts"]["state"], "rows");
        assert_eq!(body["page"]["contacts"]["rows"][0]["id"], "c1");
    }

    #[tokio::test]
    async fn test_export_download() {
        let app = logged_in_app(true).await;
        let response = app.oneshot(request("GET", "/api/contacts/export", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"grosity-contacts-"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Date,Name,Email,Subject,Message,Status\n"));
        assert!(text.contains("\"Asha\",\"asha@example.com\",\"Pricing\",\"Need a plan\",\"new\""));
    }

    #[tokio::test]
    async fn test_export_without_contacts() {
        let app = logged_in_app(false).await;
        let response = app.oneshot(request("GET", "/api/contacts/export", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["message"], "No contacts to export");
    }

    #[tokio::test]
    async fn test_delete_without_confirmation_is_cancelled() {
        let app = logged_in_app(true).await;
        let response = app
            .clone()
            .oneshot(request("DELETE", "/api/contacts/c1", ""))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["outcome"], "cancelled");

        let response = app
            .oneshot(request("DELETE", "/api/contacts/c1?confirm=true", ""))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["outcome"], "deleted");
        assert_eq!(body["page"]["summary"]["totalContacts"], "0");
    }

    #[tokio::test]
    async fn test_view_contact_requires_session() {
        let app = create_test_app(true).await;
        let response = app.oneshot(request("GET", "/api/contacts/c1", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_theme_update() {
        let app = logged_in_app(false).await;
        let response = app
            .oneshot(request("PUT", "/api/theme", r#"{"theme":"dark"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["theme"], "dark");
    }

    #[tokio::test]
    async fn test_unknown_theme_is_json_bad_request() {
        let app = logged_in_app(false).await;
        let response = app
            .oneshot(request("PUT", "/api/theme", r#"{"theme":"purple"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
    }
}
