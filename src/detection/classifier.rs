use std::collections::HashSet;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::catalog_model::ElementTag;
use crate::error::ClassifierError;

// ============================================================================
// Classifier trait: external image/text → element tag service
// ============================================================================

/// Maximum accepted description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Image MIME types the classification service accepts.
pub const SUPPORTED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/webp", "image/gif"];

/// Input handed to a classification service.
#[derive(Debug, Clone)]
pub enum ClassificationInput {
    Image { bytes: Vec<u8>, mime_type: String },
    Description(String),
}

/// Turns an image or a description into raw element tag strings.
///
/// Output is untrusted: callers pass it through `filter_known_tags`.
pub trait Classifier {
    fn classify(&self, input: &ClassificationInput) -> Result<Vec<String>, ClassifierError>;
}

/// Keep only known element tags, dropping duplicates but keeping order.
pub fn filter_known_tags(raw: &[String]) -> Vec<ElementTag> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for value in raw {
        match value.parse::<ElementTag>() {
            Ok(tag) => {
                if seen.insert(tag) {
                    tags.push(tag);
                }
            }
            Err(_) => debug!(tag = %value, "discarding tag outside the vocabulary"),
        }
    }

    tags
}

// ============================================================================
// Ollama backend
// ============================================================================

pub struct OllamaClassifier {
    pub endpoint: String,
    pub model: String,
}

impl Default for OllamaClassifier {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "llava:7b".to_string(),
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ElementsPayload {
    Object { elements: Vec<String> },
    List(Vec<String>),
}

impl OllamaClassifier {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        }
    }

    pub fn build_prompt(input: &ClassificationInput) -> String {
        let vocabulary = ElementTag::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let subject = match input {
            ClassificationInput::Image { .. } => {
                "Identify the UI elements visible in the attached screenshot.".to_string()
            }
            ClassificationInput::Description(text) => format!(
                "Identify the UI elements described in this component description:\n\"\"\"\n{}\n\"\"\"",
                text
            ),
        };

        format!(
r#"{subject}

Use ONLY these element types: {vocabulary}

Return ONLY valid JSON of the form {{"elements": ["button", "text-input"]}}, no explanation."#,
            subject = subject,
            vocabulary = vocabulary,
        )
    }

    /// Parse the model's JSON answer into raw tag strings.
    pub fn parse_response(response: &str) -> Result<Vec<String>, ClassifierError> {
        let trimmed = response.trim();
        if trimmed.is_empty() {
            return Err(ClassifierError::EmptyResponse);
        }

        match serde_json::from_str::<ElementsPayload>(trimmed) {
            Ok(ElementsPayload::Object { elements }) | Ok(ElementsPayload::List(elements)) => {
                Ok(elements)
            }
            Err(e) => Err(ClassifierError::Decode(e.to_string())),
        }
    }
}

impl Classifier for OllamaClassifier {
    fn classify(&self, input: &ClassificationInput) -> Result<Vec<String>, ClassifierError> {
        let images = match input {
            ClassificationInput::Image { bytes, .. } => vec![STANDARD.encode(bytes)],
            ClassificationInput::Description(_) => Vec::new(),
        };

        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: Self::build_prompt(input),
            stream: false,
            format: "json",
            images,
        };

        info!(endpoint = %self.endpoint, model = %self.model, "requesting element classification");

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&self.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?;

        let ollama_response: OllamaResponse = response.json()?;
        Self::parse_response(&ollama_response.response)
    }
}

// ============================================================================
// Static backend (offline use and tests)
// ============================================================================

/// Classifier that always answers with the same tags.
pub struct StaticClassifier {
    pub tags: Vec<String>,
}

impl StaticClassifier {
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }
}

impl Classifier for StaticClassifier {
    fn classify(&self, _input: &ClassificationInput) -> Result<Vec<String>, ClassifierError> {
        Ok(self.tags.clone())
    }
}
