use chrono::NaiveDate;

use a11y_heuristics::analysis::analysis_model::{AnalysisResult, DetectedComponent, HeuristicMatch};
use a11y_heuristics::catalog::catalog_model::{ElementTag, HeuristicId};
use a11y_heuristics::catalog::element_catalog::all_heuristic_ids;
use a11y_heuristics::repository::heuristic_model::{HeuristicRecord, Role};
use a11y_heuristics::repository::repository::{FsHeuristicRepository, InMemoryHeuristicRepository};

pub fn bundled_content_root() -> String {
    format!("{}/content/heuristics", env!("CARGO_MANIFEST_DIR"))
}

pub fn bundled_repository() -> FsHeuristicRepository {
    FsHeuristicRepository::new(bundled_content_root())
}

pub fn id(raw: &str) -> HeuristicId {
    HeuristicId::parse(raw).unwrap()
}

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

pub fn record_for(id: &HeuristicId) -> HeuristicRecord {
    HeuristicRecord {
        title: format!("Title of {}", id.slug()),
        category: id.category().to_string(),
        owner: vec![Role::Developer],
        keywords: vec![id.slug().to_string()],
        preview: String::new(),
    }
}

/// In-memory repository holding a record for every catalog identifier.
pub fn catalog_repository() -> InMemoryHeuristicRepository {
    let mut repo = InMemoryHeuristicRepository::new();
    for id in all_heuristic_ids() {
        let record = record_for(&id);
        repo.insert(id, record);
    }
    repo
}

pub fn heuristic(raw_id: &str, title: &str) -> HeuristicMatch {
    let slug = id(raw_id);
    HeuristicMatch {
        category: slug.category().to_string(),
        title: title.to_string(),
        owner: vec![Role::Designer, Role::Developer],
        keywords: vec![],
        preview: String::new(),
        slug,
    }
}

pub fn result_with(heuristics: Vec<HeuristicMatch>) -> AnalysisResult {
    AnalysisResult {
        detected: DetectedComponent {
            summary: "Component with 1 text input and 1 button".to_string(),
            elements: vec![ElementTag::TextInput, ElementTag::Button],
            confidence: Some(0.85),
        },
        heuristics,
        generated_on: fixed_date(),
    }
}

pub fn sample_result() -> AnalysisResult {
    result_with(vec![
        heuristic("forms-and-inputs/visible-labels", "Visible Labels"),
        heuristic("forms-and-inputs/error-identification", "Error Identification"),
        heuristic("interaction/keyboard-focus-visible", "Keyboard Focus Visible"),
        heuristic("visual-design/color-contrast", "Color Contrast"),
    ])
}

/// A result with `count` heuristics spread over every category.
pub fn large_result(count: usize) -> AnalysisResult {
    let categories = [
        "navigation",
        "forms-and-inputs",
        "interaction",
        "content-and-media",
        "visual-design",
        "assistive-technology",
    ];
    let per_category = count.div_ceil(categories.len());

    let mut heuristics = Vec::new();
    for category in categories {
        for i in 0..per_category {
            if heuristics.len() == count {
                break;
            }
            let title = if i % 3 == 0 {
                format!(
                    "Heuristic {} in {} with a deliberately long title that has to wrap onto a second and maybe a third line of the page",
                    i, category
                )
            } else {
                format!("Heuristic {} in {}", i, category)
            };
            heuristics.push(heuristic(&format!("{}/item-{}", category, i), &title));
        }
    }

    result_with(heuristics)
}
