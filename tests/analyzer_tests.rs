use std::path::Path;

use a11y_heuristics::analysis::analyzer::{ComponentAnalyzer, mime_from_extension};
use a11y_heuristics::catalog::catalog_model::ElementTag;
use a11y_heuristics::catalog::element_catalog::union_for;
use a11y_heuristics::detection::classifier::{ClassificationInput, Classifier, StaticClassifier};
use a11y_heuristics::error::{AnalyzeError, ClassifierError};

use crate::common::fixtures::{
    bundled_repository, catalog_repository, fixed_date, heuristic, result_with,
};

mod common;

struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn classify(&self, _input: &ClassificationInput) -> Result<Vec<String>, ClassifierError> {
        Err(ClassifierError::EmptyResponse)
    }
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn selection_runs_the_full_pipeline() {
    let repo = bundled_repository();
    let result = ComponentAnalyzer::new(&repo)
        .with_date(fixed_date())
        .analyze_selection(&["text-input", "button"])
        .unwrap();

    assert_eq!(
        result.detected.summary,
        "Selected elements with 1 text input and 1 button"
    );
    assert_eq!(result.detected.confidence, None);
    assert_eq!(result.generated_on, fixed_date());
    assert_eq!(
        result.heuristics.len(),
        union_for(&[ElementTag::TextInput, ElementTag::Button]).len()
    );
}

#[test]
fn selection_ignores_unknown_tags() {
    let repo = catalog_repository();
    let result = ComponentAnalyzer::new(&repo)
        .analyze_selection(&["hologram", "link"])
        .unwrap();
    assert_eq!(result.detected.elements, vec![ElementTag::Link]);
}

#[test]
fn empty_selection_is_rejected() {
    let repo = catalog_repository();
    let analyzer = ComponentAnalyzer::new(&repo);

    let none: [&str; 0] = [];
    assert!(matches!(
        analyzer.analyze_selection(&none),
        Err(AnalyzeError::InvalidInput(_))
    ));
    assert!(matches!(
        analyzer.analyze_selection(&["hologram"]),
        Err(AnalyzeError::InvalidInput(_))
    ));
}

// ============================================================================
// Description
// ============================================================================

#[test]
fn description_uses_the_classifier() {
    let repo = catalog_repository();
    let classifier = StaticClassifier::new(&["button", "button", "link", "spaceship"]);
    let result = ComponentAnalyzer::new(&repo)
        .with_classifier(&classifier)
        .with_date(fixed_date())
        .analyze_description("A card with a call to action and a link")
        .unwrap();

    assert_eq!(result.detected.summary, "Component description with 1 button and 1 link");
    assert_eq!(result.detected.elements, vec![ElementTag::Button, ElementTag::Link]);
    assert_eq!(result.detected.confidence, Some(0.85));
    assert!(!result.heuristics.is_empty());
}

#[test]
fn description_limits_are_enforced() {
    let repo = catalog_repository();
    let classifier = StaticClassifier::new(&["button"]);
    let analyzer = ComponentAnalyzer::new(&repo).with_classifier(&classifier);

    assert!(matches!(
        analyzer.analyze_description("   "),
        Err(AnalyzeError::InvalidInput(_))
    ));
    assert!(matches!(
        analyzer.analyze_description(&"x".repeat(2001)),
        Err(AnalyzeError::InvalidInput(_))
    ));
    assert!(analyzer.analyze_description(&"x".repeat(2000)).is_ok());
}

#[test]
fn description_without_classifier_is_unavailable() {
    let repo = catalog_repository();
    let err = ComponentAnalyzer::new(&repo)
        .analyze_description("a button")
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::ClassifierUnavailable("description")));
}

#[test]
fn classifier_failure_is_reported() {
    let repo = catalog_repository();
    let err = ComponentAnalyzer::new(&repo)
        .with_classifier(&FailingClassifier)
        .analyze_description("a button")
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::Classification(_)));
}

#[test]
fn nothing_detected_yields_empty_result() {
    let repo = catalog_repository();
    let classifier = StaticClassifier::new(&["spaceship"]);
    let result = ComponentAnalyzer::new(&repo)
        .with_classifier(&classifier)
        .analyze_description("an abstract painting")
        .unwrap();

    assert_eq!(result.detected.summary, "No UI elements detected in the description");
    assert!(result.detected.elements.is_empty());
    assert_eq!(result.detected.confidence, Some(0.0));
    assert!(result.heuristics.is_empty());
}

// ============================================================================
// Image
// ============================================================================

#[test]
fn image_uses_the_classifier() {
    let repo = catalog_repository();
    let classifier = StaticClassifier::new(&["image", "carousel", "button", "link"]);
    let result = ComponentAnalyzer::new(&repo)
        .with_classifier(&classifier)
        .analyze_image(b"\x89PNG fake", "image/png")
        .unwrap();

    assert!(result.detected.summary.starts_with("Component with 1 image"));
    assert_eq!(result.detected.confidence, Some(0.95));
}

#[test]
fn image_input_is_validated() {
    let repo = catalog_repository();
    let classifier = StaticClassifier::new(&["image"]);
    let analyzer = ComponentAnalyzer::new(&repo).with_classifier(&classifier);

    assert!(matches!(
        analyzer.analyze_image(&[], "image/png"),
        Err(AnalyzeError::InvalidInput(_))
    ));
    assert!(matches!(
        analyzer.analyze_image(b"%PDF", "application/pdf"),
        Err(AnalyzeError::InvalidInput(_))
    ));

    let no_classifier = ComponentAnalyzer::new(&repo);
    assert!(matches!(
        no_classifier.analyze_image(b"bytes", "image/jpeg"),
        Err(AnalyzeError::ClassifierUnavailable("image"))
    ));
}

#[test]
fn unavailable_repository_fails_analysis() {
    let mut repo = catalog_repository();
    repo.set_unavailable("offline");

    let err = ComponentAnalyzer::new(&repo)
        .analyze_selection(&["button"])
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::Match(_)));
}

#[test]
fn mime_type_is_guessed_from_extension() {
    assert_eq!(mime_from_extension(Path::new("shot.PNG")), Some("image/png"));
    assert_eq!(mime_from_extension(Path::new("a/b.jpg")), Some("image/jpeg"));
    assert_eq!(mime_from_extension(Path::new("x.jpeg")), Some("image/jpeg"));
    assert_eq!(mime_from_extension(Path::new("x.webp")), Some("image/webp"));
    assert_eq!(mime_from_extension(Path::new("x.gif")), Some("image/gif"));
    assert_eq!(mime_from_extension(Path::new("x.bmp")), None);
    assert_eq!(mime_from_extension(Path::new("noext")), None);
}

// ============================================================================
// Result grouping
// ============================================================================

#[test]
fn category_groups_collect_each_category_once() {
    let result = result_with(vec![
        heuristic("navigation/skip-links", "Skip Links"),
        heuristic("interaction/target-size", "Target Size"),
        heuristic("navigation/descriptive-links", "Descriptive Links"),
    ]);

    let groups: Vec<(&str, Vec<&str>)> = result
        .category_groups()
        .into_iter()
        .map(|(category, items)| (category, items.iter().map(|h| h.title.as_str()).collect()))
        .collect();

    assert_eq!(
        groups,
        vec![
            ("navigation", vec!["Skip Links", "Descriptive Links"]),
            ("interaction", vec!["Target Size"]),
        ]
    );
}
