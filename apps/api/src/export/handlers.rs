//! Axum route handler for the PDF export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::{render_packages, EXPORT_FILE_NAME};
use crate::generation::packaging::JobPackage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub packages: Vec<JobPackage>,
}

/// POST /api/v1/packages/export
///
/// Renders the posted packages (as returned by the generate endpoint) into one PDF
/// and returns it as a download. Nothing is written to disk.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    if request.packages.is_empty() {
        return Err(AppError::Validation(
            "packages cannot be empty".to_string(),
        ));
    }

    let layout = state.export_layout.clone();
    let package_count = request.packages.len();
    let pdf = tokio::task::spawn_blocking(move || render_packages(&request.packages, &layout))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    info!(
        packages = package_count,
        bytes = pdf.len(),
        "Exported application package"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
