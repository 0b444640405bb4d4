use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::catalog_model::{ElementTag, HeuristicId};
use crate::repository::heuristic_model::{HeuristicRecord, Role};

// ============================================================================
// Analysis values: created and discarded within one request
// ============================================================================

/// What was detected (or selected) for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedComponent {
    pub summary: String,

    /// Distinct element tags in detection order.
    pub elements: Vec<ElementTag>,

    /// Absent for explicit element selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// One matched heuristic, ready for display and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicMatch {
    pub slug: HeuristicId,
    pub category: String,
    pub title: String,
    pub owner: Vec<Role>,
    pub keywords: Vec<String>,
    pub preview: String,
}

impl HeuristicMatch {
    pub fn from_record(slug: HeuristicId, record: HeuristicRecord) -> Self {
        Self {
            slug,
            category: record.category,
            title: record.title,
            owner: record.owner,
            keywords: record.keywords,
            preview: record.preview,
        }
    }
}

/// Output of the pipeline and sole input of the exporters.
///
/// `heuristics` holds no duplicate identifiers and is sorted by canonical
/// category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub detected: DetectedComponent,
    pub heuristics: Vec<HeuristicMatch>,
    pub generated_on: NaiveDate,
}

impl AnalysisResult {
    /// Heuristics grouped by category, groups in first-appearance order.
    pub fn category_groups(&self) -> Vec<(&str, Vec<&HeuristicMatch>)> {
        let mut groups: Vec<(&str, Vec<&HeuristicMatch>)> = Vec::new();
        for h in &self.heuristics {
            match groups.iter_mut().find(|(category, _)| *category == h.category) {
                Some((_, items)) => items.push(h),
                None => groups.push((&h.category, vec![h])),
            }
        }
        groups
    }
}
