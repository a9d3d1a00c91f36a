use axum::{extract::Multipart, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::resume::extractor::extract_resume_text;

/// Multipart field carrying the PDF.
pub const RESUME_FIELD: &str = "resume";
/// Multipart field carrying the target job title.
pub const JOB_TITLE_FIELD: &str = "job_title";

/// Fields read from an upload form. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<Vec<u8>>,
    pub job_title: Option<String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            match field.name() {
                Some(RESUME_FIELD) => {
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read resume upload: {e}"))
                    })?;
                    form.resume = Some(bytes.to_vec());
                }
                Some(JOB_TITLE_FIELD) => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Failed to read job_title: {e}"))
                    })?;
                    form.job_title = Some(text);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn take_resume(&mut self) -> Result<Vec<u8>, AppError> {
        self.resume
            .take()
            .ok_or_else(|| AppError::Validation("resume file is required".to_string()))
    }

    /// The trimmed job title; blank counts as missing.
    pub fn take_job_title(&mut self) -> Result<String, AppError> {
        self.job_title
            .take()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("job_title cannot be empty".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_text: String,
    pub char_count: usize,
}

/// POST /api/v1/resume/extract
///
/// Returns the text extracted from the uploaded resume so the client can preview it.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let resume_text = extract_resume_text(form.take_resume()?).await?;

    Ok(Json(ExtractResponse {
        char_count: resume_text.chars().count(),
        resume_text,
    }))
}
