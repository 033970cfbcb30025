//! CSV export endpoint

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{Error, server::ServerState};
use engine::export_csv;

/// Streams the full inventory report as a CSV attachment.
///
/// The export either succeeds as a whole or fails as a whole; clients get a
/// generic error body while the detail goes to the log.
pub async fn export(State(state): State<ServerState>) -> Response {
    let engine = state.engine.read().await;

    match export_csv(&*engine, Utc::now().date_naive()) {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ],
            export.content,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("export failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Error {
                    error: "Export failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}
