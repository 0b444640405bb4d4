use a11y_heuristics::catalog::catalog_model::ElementTag;
use a11y_heuristics::detection::classifier::{
    ClassificationInput, Classifier, OllamaClassifier, StaticClassifier, filter_known_tags,
};
use a11y_heuristics::detection::summarizer::{DetectionSource, confidence, detect, summarize};
use a11y_heuristics::error::ClassifierError;

// ============================================================================
// Summary text
// ============================================================================

#[test]
fn single_element_summary() {
    assert_eq!(
        summarize(&[ElementTag::Button], DetectionSource::Image),
        "Component with 1 button"
    );
}

#[test]
fn repeated_elements_are_counted_and_pluralized() {
    let elements = [ElementTag::Button, ElementTag::Button, ElementTag::Link];
    assert_eq!(
        summarize(&elements, DetectionSource::Image),
        "Component with 2 buttons and 1 link"
    );
}

#[test]
fn groups_follow_first_occurrence_order() {
    let elements = [
        ElementTag::Link,
        ElementTag::TextInput,
        ElementTag::Link,
        ElementTag::Checkbox,
    ];
    assert_eq!(
        summarize(&elements, DetectionSource::Description),
        "Component description with 2 links, 1 text input, and 1 checkbox"
    );
}

#[test]
fn selection_uses_its_own_prefix() {
    assert_eq!(
        summarize(&[ElementTag::RadioGroup], DetectionSource::Selection),
        "Selected elements with 1 radio group"
    );
}

#[test]
fn empty_detection_has_a_source_specific_message() {
    assert_eq!(
        summarize(&[], DetectionSource::Image),
        "No UI elements detected in the image"
    );
    assert_eq!(
        summarize(&[], DetectionSource::Description),
        "No UI elements detected in the description"
    );
    assert_eq!(summarize(&[], DetectionSource::Selection), "No UI elements selected");
}

// ============================================================================
// Confidence
// ============================================================================

#[test]
fn confidence_steps_with_element_count() {
    let tags = [
        ElementTag::Button,
        ElementTag::Link,
        ElementTag::Image,
        ElementTag::Modal,
        ElementTag::Form,
    ];

    assert_eq!(confidence(&[]), 0.0);
    assert_eq!(confidence(&tags[..1]), 0.7);
    assert_eq!(confidence(&tags[..2]), 0.85);
    assert_eq!(confidence(&tags[..3]), 0.85);
    assert_eq!(confidence(&tags[..4]), 0.95);
    assert_eq!(confidence(&tags), 0.95);
}

#[test]
fn detect_reports_distinct_elements_and_confidence() {
    let detected = detect(
        &[ElementTag::Button, ElementTag::Button, ElementTag::Link],
        DetectionSource::Image,
    );

    assert_eq!(detected.elements, vec![ElementTag::Button, ElementTag::Link]);
    assert_eq!(detected.confidence, Some(0.85));
    assert_eq!(detected.summary, "Component with 2 buttons and 1 link");
}

#[test]
fn selection_has_no_confidence() {
    let detected = detect(&[ElementTag::Slider], DetectionSource::Selection);
    assert_eq!(detected.confidence, None);

    let json = serde_json::to_value(&detected).unwrap();
    assert!(json.get("confidence").is_none());
}

// ============================================================================
// Classifier output handling
// ============================================================================

#[test]
fn unknown_tags_are_discarded() {
    let raw: Vec<String> = ["button", "hologram", "Link", "button", " image "]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(
        filter_known_tags(&raw),
        vec![ElementTag::Button, ElementTag::Link, ElementTag::Image]
    );
}

#[test]
fn static_classifier_returns_its_tags() {
    let classifier = StaticClassifier::new(&["modal", "button"]);
    let raw = classifier
        .classify(&ClassificationInput::Description("a dialog".into()))
        .unwrap();
    assert_eq!(raw, vec!["modal", "button"]);
}

#[test]
fn ollama_response_accepts_object_or_list() {
    assert_eq!(
        OllamaClassifier::parse_response(r#"{"elements": ["button", "link"]}"#).unwrap(),
        vec!["button", "link"]
    );
    assert_eq!(
        OllamaClassifier::parse_response(" [\"tabs\"] \n").unwrap(),
        vec!["tabs"]
    );
}

#[test]
fn ollama_response_errors() {
    assert!(matches!(
        OllamaClassifier::parse_response("  "),
        Err(ClassifierError::EmptyResponse)
    ));
    assert!(matches!(
        OllamaClassifier::parse_response("the component has a button"),
        Err(ClassifierError::Decode(_))
    ));
}

#[test]
fn prompt_lists_the_vocabulary() {
    let prompt = OllamaClassifier::build_prompt(&ClassificationInput::Description(
        "Login form with email field".into(),
    ));

    assert!(prompt.contains("Login form with email field"));
    for tag in ElementTag::ALL {
        assert!(prompt.contains(tag.as_str()), "prompt misses {}", tag);
    }

    let image_prompt = OllamaClassifier::build_prompt(&ClassificationInput::Image {
        bytes: vec![1, 2, 3],
        mime_type: "image/png".into(),
    });
    assert!(image_prompt.contains("screenshot"));
}
