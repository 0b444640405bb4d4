use crate::analysis::analysis_model::AnalysisResult;
use crate::catalog::catalog_model::category_display_name;
use crate::export::export_model::{CHECKLIST_TITLE, ExportOptions};

// ============================================================================
// Markdown checklist
// ============================================================================

/// Render an analysis result as a Markdown task list.
///
/// Produces output like:
/// ```text
/// # Accessibility Heuristics Checklist
///
/// Generated: 2025-01-15
/// Component: Component with 1 button
///
/// ## Interaction
///
/// - [ ] **Keyboard Focus Visible** - [View Guide](https://…/docs/interaction/keyboard-focus-visible)
/// ```
///
/// Categories appear in the order the heuristics already have.
pub fn to_markdown(result: &AnalysisResult, options: &ExportOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", CHECKLIST_TITLE));
    out.push_str(&format!(
        "Generated: {}\n",
        result.generated_on.format("%Y-%m-%d")
    ));
    out.push_str(&format!("Component: {}\n", single_line(&result.detected.summary)));

    for (category, items) in result.category_groups() {
        out.push_str(&format!("\n## {}\n\n", category_display_name(category)));

        for h in items {
            out.push_str(&format!(
                "- [ ] **{}** - [View Guide]({})\n",
                single_line(&h.title),
                options.guide_url(&h.slug)
            ));
        }
    }

    out
}

/// Keep a value on one line so it cannot break the template.
fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
