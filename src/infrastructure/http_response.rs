// HTTP response utilities for file downloads
use crate::infrastructure::csv_export::CsvExport;
use axum::{
    body::Body,
    http::{HeaderValue, Response, StatusCode, header},
};

/// CSV body served as an attachment under the export's filename
pub fn csv_attachment(export: CsvExport) -> Result<Response<Body>, StatusCode> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.filename))
        .map_err(|e| {
            tracing::error!(error = %e, filename = %export.filename, "Invalid download filename");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, export.body.len())
        .body(Body::from(export.body))
        .map_err(|e| {
            tracing::error!(error = %e, "Response build error");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
