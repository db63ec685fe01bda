//! crates/syllabus_core/src/pipeline.rs
//!
//! The upload flow: file-type check, text extraction, length check, analysis.
//! Either one `Course` comes out or nothing does.

use crate::domain::{Course, SyllabusUpload};
use crate::extract::extract_text;
use crate::ports::{AnalysisError, SyllabusAnalysisService};
use crate::validation::{ensure_pdf, ensure_usable_text, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

pub async fn process_upload(
    analyzer: &dyn SyllabusAnalysisService,
    upload: SyllabusUpload,
) -> Result<Course, UploadError> {
    ensure_pdf(upload.content_type.as_deref(), &upload.file_name)?;

    let text = extract_text(&upload.bytes);
    ensure_usable_text(&text)?;

    Ok(analyzer.analyze(&text, &upload.file_name).await?)
}
