use chrono::NaiveDate;
use tracing::info;

use crate::analysis::analysis_model::AnalysisResult;
use crate::catalog::catalog_model::ElementTag;
use crate::detection::classifier::{
    ClassificationInput, Classifier, MAX_DESCRIPTION_CHARS, SUPPORTED_IMAGE_TYPES,
    filter_known_tags,
};
use crate::detection::summarizer::{DetectionSource, detect};
use crate::error::AnalyzeError;
use crate::matcher::matcher::HeuristicMatcher;
use crate::repository::repository::HeuristicRepository;

// ============================================================================
// ComponentAnalyzer: input → detected component → matched heuristics
// ============================================================================

/// Runs one analysis request end to end. Collaborators are injected; the
/// classifier is only needed for image and description input.
pub struct ComponentAnalyzer<'a> {
    repository: &'a dyn HeuristicRepository,
    classifier: Option<&'a dyn Classifier>,
    date: Option<NaiveDate>,
}

impl<'a> ComponentAnalyzer<'a> {
    pub fn new(repository: &'a dyn HeuristicRepository) -> Self {
        Self {
            repository,
            classifier: None,
            date: None,
        }
    }

    pub fn with_classifier(mut self, classifier: &'a dyn Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Pin the generation date stamped on results (defaults to today).
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Analyze an explicit element selection.
    pub fn analyze_selection<S: AsRef<str>>(&self, tags: &[S]) -> Result<AnalysisResult, AnalyzeError> {
        let raw: Vec<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();
        let elements = filter_known_tags(&raw);

        if elements.is_empty() {
            return Err(AnalyzeError::InvalidInput(
                "select at least one known element".to_string(),
            ));
        }

        self.finish(&elements, DetectionSource::Selection)
    }

    /// Analyze a free-text component description through the classifier.
    pub fn analyze_description(&self, text: &str) -> Result<AnalysisResult, AnalyzeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AnalyzeError::InvalidInput("description is empty".to_string()));
        }
        let length = text.chars().count();
        if length > MAX_DESCRIPTION_CHARS {
            return Err(AnalyzeError::InvalidInput(format!(
                "description is {} characters, limit is {}",
                length, MAX_DESCRIPTION_CHARS
            )));
        }

        let classifier = self
            .classifier
            .ok_or(AnalyzeError::ClassifierUnavailable("description"))?;
        let raw = classifier.classify(&ClassificationInput::Description(text.to_string()))?;

        self.finish(&filter_known_tags(&raw), DetectionSource::Description)
    }

    /// Analyze an uploaded image through the classifier.
    pub fn analyze_image(&self, bytes: &[u8], mime_type: &str) -> Result<AnalysisResult, AnalyzeError> {
        if bytes.is_empty() {
            return Err(AnalyzeError::InvalidInput("image is empty".to_string()));
        }
        if !SUPPORTED_IMAGE_TYPES.contains(&mime_type) {
            return Err(AnalyzeError::InvalidInput(format!(
                "unsupported image type '{}'",
                mime_type
            )));
        }

        let classifier = self
            .classifier
            .ok_or(AnalyzeError::ClassifierUnavailable("image"))?;
        let raw = classifier.classify(&ClassificationInput::Image {
            bytes: bytes.to_vec(),
            mime_type: mime_type.to_string(),
        })?;

        self.finish(&filter_known_tags(&raw), DetectionSource::Image)
    }

    fn finish(
        &self,
        elements: &[ElementTag],
        source: DetectionSource,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let detected = detect(elements, source);
        let heuristics = HeuristicMatcher::new(self.repository).match_elements(&detected.elements)?;

        info!(
            source = ?source,
            elements = detected.elements.len(),
            heuristics = heuristics.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            detected,
            heuristics,
            generated_on: self
                .date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        })
    }
}

/// Guess an image MIME type from a file extension.
pub fn mime_from_extension(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
