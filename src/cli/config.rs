use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::export::export_model::{DEFAULT_BASE_URL, DEFAULT_PREFIX, ExportFormat};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "a11y-heuristics",
    version,
    about = "Match UI components to accessibility heuristics and export checklists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: a11y-heuristics.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding heuristic documents
    #[arg(long, global = true)]
    pub content_root: Option<String>,

    /// Ollama API endpoint
    #[arg(long, global = true)]
    pub ollama_endpoint: Option<String>,

    /// Ollama model name
    #[arg(long, global = true)]
    pub ollama_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown task list
    Md,
    /// Paginated A4 PDF
    Pdf,
    /// Analysis result as JSON (stdout)
    Json,
}

impl OutputFormat {
    pub fn export_format(&self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Md => Some(ExportFormat::Markdown),
            OutputFormat::Pdf => Some(ExportFormat::Pdf),
            OutputFormat::Json => None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a component and export its heuristics checklist
    Analyze {
        /// Comma-separated element tags (e.g. text-input,button)
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["description", "image"])]
        elements: Vec<String>,

        /// Free-text component description (classified via Ollama)
        #[arg(long, conflicts_with = "image")]
        description: Option<String>,

        /// Screenshot of the component (classified via Ollama)
        #[arg(long)]
        image: Option<String>,

        /// Image MIME type (default: guessed from the file extension)
        #[arg(long, requires = "image")]
        mime: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Md)]
        format: OutputFormat,

        /// Output file path (default: <output_dir>/<prefix>-<date>.<ext>)
        #[arg(short, long)]
        output: Option<String>,

        /// Generation date stamped on the checklist (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print the element → heuristic catalog
    Catalog,

    /// List the recognized element tags
    Elements,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `a11y-heuristics.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_root")]
    pub root: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OllamaConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

// Serde default helpers
fn default_content_root() -> String { "content/heuristics".to_string() }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_prefix() -> String { DEFAULT_PREFIX.to_string() }
fn default_output_dir() -> String { ".".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("a11y-heuristics.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// Settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub content_root: String,
    pub base_url: String,
    pub prefix: String,
    pub output_dir: String,
    pub ollama_endpoint: Option<String>,
    pub ollama_model: Option<String>,
}

/// Resolve settings: CLI > config > defaults.
pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> ResolvedSettings {
    ResolvedSettings {
        content_root: cli
            .content_root
            .clone()
            .unwrap_or_else(|| config.content.root.clone()),
        base_url: config.export.base_url.clone(),
        prefix: config.export.prefix.clone(),
        output_dir: config.export.output_dir.clone(),
        ollama_endpoint: cli
            .ollama_endpoint
            .clone()
            .or_else(|| config.ollama.endpoint.clone()),
        ollama_model: cli
            .ollama_model
            .clone()
            .or_else(|| config.ollama.model.clone()),
    }
}
