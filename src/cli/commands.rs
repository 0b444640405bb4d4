use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::analysis::analysis_model::AnalysisResult;
use crate::analysis::analyzer::{ComponentAnalyzer, mime_from_extension};
use crate::catalog::catalog_model::ElementTag;
use crate::catalog::element_catalog::lookup;
use crate::cli::config::{OutputFormat, ResolvedSettings};
use crate::detection::classifier::OllamaClassifier;
use crate::error::AnalyzeError;
use crate::export::export_model::{ExportFormat, ExportOptions};
use crate::export::markdown::to_markdown;
use crate::export::output::{export_filename, write_export};
use crate::export::pdf::to_pdf;
use crate::repository::repository::FsHeuristicRepository;

/// The one analysis input the user supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeInput {
    Elements(Vec<String>),
    Description(String),
    Image { path: String, mime: Option<String> },
}

impl AnalyzeInput {
    /// Pick the input from the parsed `analyze` arguments.
    pub fn from_args(
        elements: Vec<String>,
        description: Option<String>,
        image: Option<String>,
        mime: Option<String>,
    ) -> Result<Self, AnalyzeError> {
        match (elements.is_empty(), description, image) {
            (false, None, None) => Ok(AnalyzeInput::Elements(elements)),
            (true, Some(text), None) => Ok(AnalyzeInput::Description(text)),
            (true, None, Some(path)) => Ok(AnalyzeInput::Image { path, mime }),
            (true, None, None) => Err(AnalyzeError::InvalidInput(
                "provide one of --elements, --description or --image".to_string(),
            )),
            _ => Err(AnalyzeError::InvalidInput(
                "--elements, --description and --image are mutually exclusive".to_string(),
            )),
        }
    }
}

// ============================================================================
// analyze subcommand
// ============================================================================

pub fn cmd_analyze(
    input: AnalyzeInput,
    format: OutputFormat,
    output: Option<&str>,
    date: Option<&str>,
    settings: &ResolvedSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository = FsHeuristicRepository::new(&settings.content_root);
    let classifier = build_classifier(settings);
    let date = parse_date(date)?;

    let mut analyzer = ComponentAnalyzer::new(&repository).with_classifier(&classifier);
    if let Some(d) = date {
        analyzer = analyzer.with_date(d);
    }

    info!(content_root = %settings.content_root, "loading heuristics");

    let result = match input {
        AnalyzeInput::Elements(tags) => analyzer.analyze_selection(tags.as_slice())?,
        AnalyzeInput::Description(text) => analyzer.analyze_description(&text)?,
        AnalyzeInput::Image { path, mime } => {
            let bytes = std::fs::read(&path)?;
            let mime = match mime {
                Some(m) => m,
                None => mime_from_extension(Path::new(&path))
                    .ok_or_else(|| {
                        AnalyzeError::InvalidInput(format!(
                            "cannot infer image type of {}, pass --mime",
                            path
                        ))
                    })?
                    .to_string(),
            };
            analyzer.analyze_image(&bytes, &mime)?
        }
    };

    // stdout carries only the JSON document in this mode
    let Some(export_format) = format.export_format() else {
        println!("{}", render_json(&result)?);
        return Ok(());
    };

    print!("{}", render_status(&result));

    let path = write_checklist(&result, export_format, output, settings)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// The analysis result as a pretty-printed JSON document.
pub fn render_json(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Human-readable status lines printed before a checklist is written.
pub fn render_status(result: &AnalysisResult) -> String {
    let mut out = format!("{}\n", result.detected.summary);
    if let Some(c) = result.detected.confidence {
        out.push_str(&format!("Confidence: {:.0}%\n", c * 100.0));
    }
    out.push_str(&format!("Matched {} heuristics\n", result.heuristics.len()));
    out
}

/// Render and write the checklist; returns the written path.
pub fn write_checklist(
    result: &AnalysisResult,
    format: ExportFormat,
    output: Option<&str>,
    settings: &ResolvedSettings,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let options = ExportOptions::new(&settings.base_url);

    // Render fully before touching the filesystem
    let bytes = match format {
        ExportFormat::Markdown => to_markdown(result, &options).into_bytes(),
        ExportFormat::Pdf => to_pdf(result, &options)?,
    };

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => Path::new(&settings.output_dir).join(export_filename(
            &settings.prefix,
            result.generated_on,
            format,
        )),
    };

    Ok(write_export(&path, &bytes)?)
}

// ============================================================================
// catalog / elements subcommands
// ============================================================================

/// Render the element → heuristic table as text.
pub fn format_catalog() -> String {
    let mut out = String::new();
    for tag in ElementTag::ALL {
        out.push_str(&format!("{}\n", tag));
        for id in lookup(tag) {
            out.push_str(&format!("  - {}\n", id));
        }
    }
    out
}

pub fn cmd_catalog() {
    print!("{}", format_catalog());
}

pub fn cmd_elements() {
    for tag in ElementTag::ALL {
        println!("{:<14} {}", tag.as_str(), tag.display_name());
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn build_classifier(settings: &ResolvedSettings) -> OllamaClassifier {
    let defaults = OllamaClassifier::default();
    OllamaClassifier::new(
        settings
            .ollama_endpoint
            .as_deref()
            .unwrap_or(&defaults.endpoint),
        settings.ollama_model.as_deref().unwrap_or(&defaults.model),
    )
}

/// Parse an optional `YYYY-MM-DD` date argument.
pub fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AnalyzeError> {
    raw.map(|s| {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|e| AnalyzeError::InvalidInput(format!("invalid date '{}': {}", s, e)))
    })
    .transpose()
}
