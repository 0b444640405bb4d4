use serde::{Deserialize, Serialize};

use crate::analysis::analysis_model::DetectedComponent;
use crate::catalog::catalog_model::ElementTag;

// ============================================================================
// Detection summary and confidence
// ============================================================================

/// Where the detected elements came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Image,
    Description,
    /// Elements chosen explicitly by the user.
    Selection,
}

impl DetectionSource {
    fn prefix(&self) -> &'static str {
        match self {
            DetectionSource::Image => "Component",
            DetectionSource::Description => "Component description",
            DetectionSource::Selection => "Selected elements",
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            DetectionSource::Image => "No UI elements detected in the image",
            DetectionSource::Description => "No UI elements detected in the description",
            DetectionSource::Selection => "No UI elements selected",
        }
    }
}

/// Human-readable summary such as "Component with 2 buttons and 1 link".
pub fn summarize(elements: &[ElementTag], source: DetectionSource) -> String {
    if elements.is_empty() {
        return source.empty_message().to_string();
    }

    // Group by tag, first occurrence order
    let mut counts: Vec<(ElementTag, usize)> = Vec::new();
    for tag in elements {
        match counts.iter_mut().find(|(t, _)| t == tag) {
            Some((_, n)) => *n += 1,
            None => counts.push((*tag, 1)),
        }
    }

    let phrases: Vec<String> = counts
        .iter()
        .map(|(tag, n)| {
            let plural = if *n > 1 { "s" } else { "" };
            format!("{} {}{}", n, tag.display_name(), plural)
        })
        .collect();

    format!("{} with {}", source.prefix(), join_phrases(&phrases))
}

/// "a", "a and b", "a, b, and c".
fn join_phrases(phrases: &[String]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Coarse detection confidence derived from the element count.
pub fn confidence(elements: &[ElementTag]) -> f32 {
    match elements.len() {
        0 => 0.0,
        1 => 0.7,
        2..=3 => 0.85,
        _ => 0.95,
    }
}

/// Build the `DetectedComponent` for a set of elements.
///
/// Selection carries no confidence; classification sources do.
pub fn detect(elements: &[ElementTag], source: DetectionSource) -> DetectedComponent {
    let summary = summarize(elements, source);
    let confidence = match source {
        DetectionSource::Selection => None,
        DetectionSource::Image | DetectionSource::Description => Some(confidence(elements)),
    };

    let mut distinct: Vec<ElementTag> = Vec::with_capacity(elements.len());
    for tag in elements {
        if !distinct.contains(tag) {
            distinct.push(*tag);
        }
    }

    DetectedComponent {
        summary,
        elements: distinct,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_three_uses_serial_comma() {
        let phrases = vec!["1 a".to_string(), "2 bs".to_string(), "1 c".to_string()];
        assert_eq!(join_phrases(&phrases), "1 a, 2 bs, and 1 c");
    }
}
