use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::catalog_model::HeuristicId;

// ============================================================================
// Export options
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://a11y-heuristics.dev";
pub const DEFAULT_PREFIX: &str = "accessibility-checklist";

pub const CHECKLIST_TITLE: &str = "Accessibility Heuristics Checklist";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Documentation site root, without trailing slash.
    pub base_url: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ExportOptions {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Documentation URL of a heuristic.
    pub fn guide_url(&self, id: &HeuristicId) -> String {
        format!("{}/docs/{}", self.base_url.trim_end_matches('/'), id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
