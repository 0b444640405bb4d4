use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Error taxonomy
// ============================================================================
//
// Per-item failures (a broken heuristic reference, a missing preview, an
// unknown element tag) are recovered where they happen and never show up
// here. Only whole-request failures are represented as errors.

/// Failures raised by a `HeuristicRepository`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store cannot be reached at all.
    #[error("heuristic repository unavailable: {0}")]
    Unavailable(String),

    /// No record exists for the identifier.
    #[error("heuristic not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record exists but its frontmatter is missing or malformed.
    #[error("invalid frontmatter in {id}: {reason}")]
    Frontmatter { id: String, reason: String },

    #[error("invalid heuristic identifier '{0}': expected '<category>/<slug>'")]
    InvalidId(String),
}

/// Failures raised by the external classification service.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode classifier response: {0}")]
    Decode(String),

    #[error("classifier returned an empty response")]
    EmptyResponse,
}

/// Total failures of a match call.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("cannot match heuristics: {0}")]
    RepositoryUnavailable(#[source] RepositoryError),
}

/// Failures of a full analysis request.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Rejected before the matcher runs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no classifier configured for {0} analysis")]
    ClassifierUnavailable(&'static str),

    #[error(transparent)]
    Classification(#[from] ClassifierError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Export failures. Always fatal to the export call.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("checklist layout failed: {0}")]
    Layout(String),

    #[error("failed to write export to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
