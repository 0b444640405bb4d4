use std::collections::HashSet;

use tracing::debug;

use crate::catalog::catalog_model::{ElementTag, HeuristicId};

// ============================================================================
// Static element → heuristic table
// ============================================================================

/// Heuristic identifiers mapped from one element tag, in presentation order.
fn entries(tag: ElementTag) -> &'static [&'static str] {
    match tag {
        ElementTag::TextInput => &[
            "forms-and-inputs/visible-labels",
            "forms-and-inputs/input-instructions",
            "forms-and-inputs/error-identification",
            "interaction/keyboard-focus-visible",
            "visual-design/color-contrast",
            "assistive-technology/accessible-names",
        ],
        ElementTag::Textarea => &[
            "forms-and-inputs/visible-labels",
            "forms-and-inputs/input-instructions",
            "interaction/keyboard-focus-visible",
            "visual-design/text-resize-and-reflow",
        ],
        ElementTag::Select => &[
            "forms-and-inputs/visible-labels",
            "interaction/keyboard-operable",
            "interaction/keyboard-focus-visible",
            "assistive-technology/accessible-names",
        ],
        ElementTag::Checkbox => &[
            "forms-and-inputs/visible-labels",
            "forms-and-inputs/grouped-controls",
            "interaction/target-size",
            "interaction/keyboard-focus-visible",
            "assistive-technology/aria-roles-and-states",
        ],
        ElementTag::RadioGroup => &[
            "forms-and-inputs/grouped-controls",
            "forms-and-inputs/visible-labels",
            "interaction/keyboard-operable",
            "interaction/keyboard-focus-visible",
        ],
        ElementTag::Button => &[
            "assistive-technology/accessible-names",
            "interaction/keyboard-operable",
            "interaction/keyboard-focus-visible",
            "interaction/target-size",
            "visual-design/color-contrast",
        ],
        ElementTag::Link => &[
            "navigation/descriptive-links",
            "interaction/keyboard-focus-visible",
            "visual-design/color-not-sole-indicator",
        ],
        ElementTag::Image => &["content-and-media/text-alternatives"],
        ElementTag::Icon => &[
            "content-and-media/text-alternatives",
            "assistive-technology/accessible-names",
            "visual-design/color-contrast",
        ],
        ElementTag::Video => &[
            "content-and-media/captions-and-transcripts",
            "content-and-media/media-controls",
            "visual-design/motion-and-animation",
        ],
        ElementTag::Audio => &[
            "content-and-media/captions-and-transcripts",
            "content-and-media/media-controls",
        ],
        ElementTag::Modal => &[
            "interaction/focus-management",
            "interaction/keyboard-operable",
            "assistive-technology/aria-roles-and-states",
            "assistive-technology/reading-order",
        ],
        ElementTag::Dropdown => &[
            "interaction/keyboard-operable",
            "assistive-technology/aria-roles-and-states",
            "interaction/focus-management",
        ],
        ElementTag::Navigation => &[
            "navigation/skip-links",
            "navigation/consistent-navigation",
            "navigation/page-landmarks",
            "interaction/keyboard-focus-visible",
        ],
        ElementTag::Tabs => &[
            "assistive-technology/aria-roles-and-states",
            "interaction/keyboard-operable",
            "interaction/focus-management",
        ],
        ElementTag::Accordion => &[
            "assistive-technology/aria-roles-and-states",
            "interaction/keyboard-operable",
        ],
        ElementTag::Carousel => &[
            "visual-design/motion-and-animation",
            "content-and-media/media-controls",
            "interaction/keyboard-operable",
            "assistive-technology/live-region-announcements",
        ],
        ElementTag::Table => &[
            "content-and-media/data-table-structure",
            "assistive-technology/reading-order",
        ],
        ElementTag::Form => &[
            "forms-and-inputs/error-identification",
            "forms-and-inputs/input-instructions",
            "forms-and-inputs/grouped-controls",
            "assistive-technology/live-region-announcements",
        ],
        ElementTag::Tooltip => &[
            "interaction/keyboard-operable",
            "assistive-technology/accessible-names",
            "visual-design/text-resize-and-reflow",
        ],
        ElementTag::Alert => &[
            "assistive-technology/live-region-announcements",
            "visual-design/color-not-sole-indicator",
        ],
        ElementTag::Slider => &[
            "interaction/keyboard-operable",
            "assistive-technology/aria-roles-and-states",
            "interaction/target-size",
            "forms-and-inputs/visible-labels",
        ],
    }
}

/// Heuristic identifiers for an element tag.
pub fn lookup(tag: ElementTag) -> Vec<HeuristicId> {
    entries(tag)
        .iter()
        .map(|raw| HeuristicId::from_static(raw))
        .collect()
}

/// Lookup by raw tag string. Unknown tags map to nothing.
pub fn lookup_str(raw: &str) -> Vec<HeuristicId> {
    match raw.parse::<ElementTag>() {
        Ok(tag) => lookup(tag),
        Err(reason) => {
            debug!(tag = raw, %reason, "ignoring unknown element tag");
            Vec::new()
        }
    }
}

/// Union of heuristic identifiers for a list of tags, in first-production order.
pub fn union_for(elements: &[ElementTag]) -> Vec<HeuristicId> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for tag in elements {
        for id in lookup(*tag) {
            if seen.insert(id.clone()) {
                ids.push(id);
            }
        }
    }

    ids
}

/// Every identifier the catalog references.
pub fn all_heuristic_ids() -> Vec<HeuristicId> {
    union_for(&ElementTag::ALL)
}
