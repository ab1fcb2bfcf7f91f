// HTTP request handlers
use crate::application::credential_verifier::Credentials;
use crate::application::view_router::{DeleteOutcome, LoginOutcome, NavigationOutcome};
use crate::domain::contact::ContactDetails;
use crate::domain::session::Theme;
use crate::domain::view::{Page, Section};
use crate::infrastructure::http_response::csv_attachment;
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub outcome: DeleteOutcome,
    pub page: Page,
}

/// Malformed or missing bodies count as absent fields
fn parse_credentials(body: &[u8]) -> Credentials {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Stateless credential check; only POST is accepted
pub async fn authenticate(method: Method, State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "error": "Method not allowed" })),
        )
            .into_response();
    }

    let verdict = state.verifier.verify(&parse_credentials(&body));
    let status = if verdict.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(verdict)).into_response()
}

pub async fn current_page(State(state): State<Arc<AppState>>) -> Json<Page> {
    Json(state.router.page().await)
}

pub async fn login(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Response> {
    let outcome = state.router.login(parse_credentials(&body)).await?;
    let status = match outcome {
        LoginOutcome::Accepted { .. } => StatusCode::OK,
        LoginOutcome::Rejected { .. } => StatusCode::UNAUTHORIZED,
    };
    Ok((status, Json(outcome)).into_response())
}

pub async fn logout(State(state): State<Arc<AppState>>) -> ApiResult<Json<Page>> {
    Ok(Json(state.router.logout().await?))
}

pub async fn navigate(
    Path(section): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<NavigationOutcome>> {
    let section = Section::parse(&section)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown section: {}", section)))?;
    Ok(Json(state.router.navigate(section).await))
}

pub async fn set_theme(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult<Json<Page>> {
    let request: ThemeRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid theme request: {}", e)))?;
    Ok(Json(state.router.set_theme(request.theme).await?))
}

pub async fn view_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ContactDetails>> {
    Ok(Json(state.router.view_contact(&id).await?))
}

pub async fn delete_contact(
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DeleteResponse>> {
    let outcome = state.router.delete_contact(&id, query.confirm).await?;
    Ok(Json(DeleteResponse {
        outcome,
        page: state.router.page().await,
    }))
}

pub async fn export_contacts(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let export = state.router.export_contacts(Utc::now()).await?;
    csv_attachment(export).map_err(|_| ApiError::Internal)
}
