pub mod fonts;
pub mod layout;
pub mod writer;

use crate::analysis::analysis_model::AnalysisResult;
use crate::error::ExportError;
use crate::export::export_model::{CHECKLIST_TITLE, ExportOptions};

/// Render an analysis result as an A4 PDF checklist.
pub fn to_pdf(result: &AnalysisResult, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let document = layout::layout_checklist(result, options)?;
    tracing::debug!(
        pages = document.pages.len(),
        items = document.items.len(),
        "checklist laid out"
    );
    writer::write_pdf(
        &document,
        CHECKLIST_TITLE,
        &result.generated_on.format("%Y%m%d").to_string(),
    )
}
