use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use invex_core::{AssemblyError, DocumentKind, InvexError};

use crate::server::AppState;

/// Upload cap: 10 MB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Error body shared by every failure response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

fn reject(status: StatusCode, detail: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
        .into_response()
}

/// `GET /health`
pub async fn health_check() -> Response {
    Json(HealthBody { status: "healthy" }).into_response()
}

/// `POST /parse-invoice` — multipart upload with a single `file` field.
///
/// Upload constraints are checked here, before any model call; pipeline
/// failures map to the documented 500 bodies.
pub async fn parse_invoice(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return reject(StatusCode::BAD_REQUEST, "Missing upload field `file`."),
        Err(e) => {
            return reject(
                StatusCode::BAD_REQUEST,
                format!("Malformed multipart body: {e}"),
            );
        }
    };

    if field.name() != Some("file") {
        return reject(StatusCode::BAD_REQUEST, "Missing upload field `file`.");
    }

    let declared_type = field.content_type().unwrap_or_default().to_string();
    let Some(kind) = DocumentKind::from_content_type(&declared_type) else {
        return reject(
            StatusCode::BAD_REQUEST,
            format!("Invalid file type: {declared_type}. Accepted: PNG and PDF."),
        );
    };

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => return reject(StatusCode::BAD_REQUEST, format!("Failed to read upload: {e}")),
    };

    if data.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "Uploaded file is empty.");
    }
    if data.len() > MAX_FILE_SIZE {
        return reject(StatusCode::BAD_REQUEST, "File size exceeds the 10 MB limit.");
    }

    match state.pipeline.parse(kind, &data).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => {
            warn!(error = %e, "invoice processing failed");
            processing_error(&e)
        }
    }
}

/// Map pipeline failures to the documented 500 bodies.
fn processing_error(error: &InvexError) -> Response {
    let detail = match error {
        InvexError::Assembly(AssemblyError::LineItemsJson(_)) => {
            "Failed to parse line items from invoice.".to_string()
        }
        _ => format!("Failed to process invoice: {error}"),
    };
    reject(StatusCode::INTERNAL_SERVER_ERROR, detail)
}
