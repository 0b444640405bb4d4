use std::io::Write;

use a11y_heuristics::analysis::analyzer::ComponentAnalyzer;
use a11y_heuristics::cli::commands::{
    AnalyzeInput, format_catalog, parse_date, render_json, render_status, write_checklist,
};
use a11y_heuristics::cli::config::{
    AppConfig, Cli, Commands, OutputFormat, ResolvedSettings, load_config, resolve_settings,
};
use a11y_heuristics::error::AnalyzeError;
use a11y_heuristics::export::export_model::{DEFAULT_BASE_URL, DEFAULT_PREFIX, ExportFormat};
use clap::Parser;

use crate::common::fixtures::{bundled_content_root, bundled_repository, fixed_date};

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_analyze_elements() {
    let cli = Cli::parse_from(["a11y-heuristics", "analyze", "--elements", "text-input,button"]);
    match cli.command {
        Commands::Analyze {
            elements,
            description,
            image,
            mime,
            format,
            output,
            date,
        } => {
            assert_eq!(elements, vec!["text-input", "button"]);
            assert!(description.is_none());
            assert!(image.is_none());
            assert!(mime.is_none());
            assert_eq!(format, OutputFormat::Md);
            assert!(output.is_none());
            assert!(date.is_none());
        }
        _ => panic!("Expected Analyze command"),
    }
}

#[test]
fn cli_parse_analyze_all_args() {
    let cli = Cli::parse_from([
        "a11y-heuristics",
        "analyze",
        "--image",
        "shot.jpg",
        "--mime",
        "image/png",
        "--format",
        "pdf",
        "-o",
        "out/checklist.pdf",
        "--date",
        "2025-01-15",
    ]);
    match cli.command {
        Commands::Analyze {
            image,
            mime,
            format,
            output,
            date,
            ..
        } => {
            assert_eq!(image.as_deref(), Some("shot.jpg"));
            assert_eq!(mime.as_deref(), Some("image/png"));
            assert_eq!(format, OutputFormat::Pdf);
            assert_eq!(output.as_deref(), Some("out/checklist.pdf"));
            assert_eq!(date.as_deref(), Some("2025-01-15"));
        }
        _ => panic!("Expected Analyze command"),
    }
}

#[test]
fn cli_rejects_conflicting_inputs() {
    let result = Cli::try_parse_from([
        "a11y-heuristics",
        "analyze",
        "--elements",
        "button",
        "--description",
        "a button",
    ]);
    assert!(result.is_err());

    let mime_without_image =
        Cli::try_parse_from(["a11y-heuristics", "analyze", "--mime", "image/png"]);
    assert!(mime_without_image.is_err());
}

#[test]
fn cli_parse_catalog_and_elements() {
    let cli = Cli::parse_from(["a11y-heuristics", "catalog"]);
    assert!(matches!(cli.command, Commands::Catalog));

    let cli = Cli::parse_from(["a11y-heuristics", "elements"]);
    assert!(matches!(cli.command, Commands::Elements));
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from([
        "a11y-heuristics",
        "-vv",
        "catalog",
        "--content-root",
        "docs/heuristics",
        "--ollama-endpoint",
        "http://gpu:11434/api/generate",
        "--ollama-model",
        "llava:13b",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.content_root.as_deref(), Some("docs/heuristics"));
    assert_eq!(cli.ollama_endpoint.as_deref(), Some("http://gpu:11434/api/generate"));
    assert_eq!(cli.ollama_model.as_deref(), Some("llava:13b"));
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.content.root, "content/heuristics");
    assert_eq!(config.export.base_url, DEFAULT_BASE_URL);
}

#[test]
fn config_default_values() {
    let config = AppConfig::default();
    assert_eq!(config.export.prefix, DEFAULT_PREFIX);
    assert_eq!(config.export.output_dir, ".");
    assert!(config.ollama.endpoint.is_none());
    assert!(config.ollama.model.is_none());
}

#[test]
fn config_partial_yaml() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    let yaml = "export:\n  base_url: https://docs.example.org\nollama:\n  model: llava:13b\n";
    f.write_all(yaml.as_bytes()).unwrap();

    let config = load_config(f.path().to_str());
    assert_eq!(config.export.base_url, "https://docs.example.org");
    assert_eq!(config.export.prefix, DEFAULT_PREFIX);
    assert_eq!(config.content.root, "content/heuristics");
    assert_eq!(config.ollama.model.as_deref(), Some("llava:13b"));
}

#[test]
fn config_malformed_yaml_falls_back_to_defaults() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"export: [not, a, map").unwrap();

    let config = load_config(f.path().to_str());
    assert_eq!(config.export.base_url, DEFAULT_BASE_URL);
}

#[test]
fn cli_flags_override_config() {
    let cli = Cli::parse_from([
        "a11y-heuristics",
        "catalog",
        "--content-root",
        "override/root",
        "--ollama-model",
        "cli-model",
    ]);
    let mut config = AppConfig::default();
    config.content.root = "config/root".to_string();
    config.ollama.model = Some("config-model".to_string());
    config.ollama.endpoint = Some("http://config:11434/api/generate".to_string());

    let settings = resolve_settings(&cli, &config);
    assert_eq!(settings.content_root, "override/root");
    assert_eq!(settings.ollama_model.as_deref(), Some("cli-model"));
    assert_eq!(
        settings.ollama_endpoint.as_deref(),
        Some("http://config:11434/api/generate")
    );
    assert_eq!(settings.base_url, DEFAULT_BASE_URL);
}

// ============================================================================
// Command Helpers
// ============================================================================

#[test]
fn analyze_input_requires_exactly_one_source() {
    assert_eq!(
        AnalyzeInput::from_args(vec!["button".into()], None, None, None).unwrap(),
        AnalyzeInput::Elements(vec!["button".into()])
    );
    assert_eq!(
        AnalyzeInput::from_args(vec![], None, Some("a.png".into()), None).unwrap(),
        AnalyzeInput::Image {
            path: "a.png".into(),
            mime: None
        }
    );
    assert!(matches!(
        AnalyzeInput::from_args(vec![], None, None, None),
        Err(AnalyzeError::InvalidInput(_))
    ));
    assert!(matches!(
        AnalyzeInput::from_args(vec![], Some("text".into()), Some("a.png".into()), None),
        Err(AnalyzeError::InvalidInput(_))
    ));
}

#[test]
fn date_argument_parsing() {
    assert_eq!(parse_date(None).unwrap(), None);
    assert_eq!(parse_date(Some(" 2025-01-15 ")).unwrap(), Some(fixed_date()));
    assert!(parse_date(Some("15/01/2025")).is_err());
}

#[test]
fn catalog_listing_covers_every_tag() {
    let listing = format_catalog();
    assert!(listing.starts_with("text-input\n  - "));
    assert!(listing.contains("slider\n"));
    assert!(listing.matches("  - interaction/keyboard-focus-visible").count() >= 2);
}

#[test]
fn write_checklist_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ResolvedSettings {
        content_root: bundled_content_root(),
        base_url: "https://docs.example.org/".to_string(),
        prefix: "Login Form".to_string(),
        output_dir: dir.path().to_string_lossy().into_owned(),
        ollama_endpoint: None,
        ollama_model: None,
    };

    let repo = bundled_repository();
    let result = ComponentAnalyzer::new(&repo)
        .with_date(fixed_date())
        .analyze_selection(&["text-input", "button"])
        .unwrap();

    let md = write_checklist(&result, ExportFormat::Markdown, None, &settings).unwrap();
    assert_eq!(md, dir.path().join("login-form-2025-01-15.md"));
    let text = std::fs::read_to_string(&md).unwrap();
    assert!(text.contains("Component: Selected elements with 1 text input and 1 button"));
    assert!(text.contains("](https://docs.example.org/docs/interaction/keyboard-focus-visible)"));
    assert_eq!(text.matches("- [ ] ").count(), result.heuristics.len());

    let pdf_path = dir.path().join("custom.pdf");
    let pdf = write_checklist(
        &result,
        ExportFormat::Pdf,
        pdf_path.to_str(),
        &settings,
    )
    .unwrap();
    assert_eq!(pdf, pdf_path);
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-1.4"));
}

#[test]
fn json_output_is_one_parsable_document() {
    let repo = bundled_repository();
    let result = ComponentAnalyzer::new(&repo)
        .with_date(fixed_date())
        .analyze_selection(&["button"])
        .unwrap();

    let json = render_json(&result).unwrap();
    assert!(json.starts_with('{'));
    assert!(!json.contains("Matched "));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["detected"]["summary"], "Selected elements with 1 button");
    assert_eq!(value["generated_on"], "2025-01-15");
    assert_eq!(
        value["heuristics"].as_array().unwrap().len(),
        result.heuristics.len()
    );
}

#[test]
fn status_lines_summarize_the_result() {
    let repo = bundled_repository();
    let result = ComponentAnalyzer::new(&repo)
        .analyze_selection(&["button"])
        .unwrap();

    let status = render_status(&result);
    let lines: Vec<&str> = status.lines().collect();
    assert_eq!(lines[0], "Selected elements with 1 button");
    assert_eq!(lines[1], format!("Matched {} heuristics", result.heuristics.len()));
    assert_eq!(lines.len(), 2);
}
