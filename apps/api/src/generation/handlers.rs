//! Axum route handler for the generation pipeline.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::packaging::{run_generation, GenerationRun};
use crate::resume::extractor::extract_resume_text;
use crate::resume::handlers::UploadForm;
use crate::state::AppState;

/// POST /api/v1/packages
///
/// Multipart form with `resume` (PDF) and `job_title`.
/// Full pipeline: extract text → keywords → listings → per-listing cover letter
/// and interview prep. Either every package is returned or the request fails.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerationRun>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let job_title = form.take_job_title()?;
    let resume_bytes = form.take_resume()?;

    let resume_text = extract_resume_text(resume_bytes).await?;
    let run = run_generation(state.llm.as_ref(), resume_text, job_title).await?;

    Ok(Json(run))
}
