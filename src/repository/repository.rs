use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::catalog::catalog_model::HeuristicId;
use crate::error::RepositoryError;
use crate::repository::heuristic_model::{HeuristicRecord, parse_document};

// ============================================================================
// HeuristicRepository trait: lookup boundary for heuristic content
// ============================================================================

/// Resolves heuristic identifiers to their records.
///
/// Implementations must be safe to call from several threads at once: the
/// matcher resolves identifiers concurrently.
pub trait HeuristicRepository: Sync {
    /// Probe whether the store is reachable at all.
    fn check_available(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn resolve(&self, id: &HeuristicId) -> Result<HeuristicRecord, RepositoryError>;
}

// ============================================================================
// Filesystem repository: `<root>/<category>/<slug>.mdx`
// ============================================================================

const DOCUMENT_EXTENSIONS: [&str; 2] = ["mdx", "md"];

pub struct FsHeuristicRepository {
    root: PathBuf,
}

impl FsHeuristicRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document_path(&self, id: &HeuristicId) -> Option<PathBuf> {
        let dir = self.root.join(id.category());
        DOCUMENT_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", id.slug(), ext)))
            .find(|p| p.is_file())
    }
}

impl HeuristicRepository for FsHeuristicRepository {
    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable(format!(
                "content directory {} does not exist",
                self.root.display()
            )))
        }
    }

    fn resolve(&self, id: &HeuristicId) -> Result<HeuristicRecord, RepositoryError> {
        let path = self
            .document_path(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        debug!(heuristic = %id, path = %path.display(), "reading heuristic document");

        let source = std::fs::read_to_string(&path).map_err(|source| RepositoryError::Io {
            path: path.clone(),
            source,
        })?;

        parse_document(id, &source)
    }
}

// ============================================================================
// In-memory repository
// ============================================================================

enum Entry {
    Record(HeuristicRecord),
    Broken(String),
}

/// Map-backed repository for embedding and tests. Entries can be marked
/// broken to simulate failing references.
#[derive(Default)]
pub struct InMemoryHeuristicRepository {
    entries: HashMap<HeuristicId, Entry>,
    unavailable: Option<String>,
}

impl InMemoryHeuristicRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: HeuristicId, record: HeuristicRecord) {
        self.entries.insert(id, Entry::Record(record));
    }

    /// Parse and insert a Markdown document with YAML frontmatter.
    pub fn insert_document(&mut self, id: HeuristicId, source: &str) -> Result<(), RepositoryError> {
        let record = parse_document(&id, source)?;
        self.insert(id, record);
        Ok(())
    }

    /// Make every resolution of `id` fail with `reason`.
    pub fn insert_broken(&mut self, id: HeuristicId, reason: &str) {
        self.entries.insert(id, Entry::Broken(reason.to_string()));
    }

    /// Make the whole repository report itself unavailable.
    pub fn set_unavailable(&mut self, reason: &str) {
        self.unavailable = Some(reason.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HeuristicRepository for InMemoryHeuristicRepository {
    fn check_available(&self) -> Result<(), RepositoryError> {
        match &self.unavailable {
            Some(reason) => Err(RepositoryError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn resolve(&self, id: &HeuristicId) -> Result<HeuristicRecord, RepositoryError> {
        match self.entries.get(id) {
            Some(Entry::Record(record)) => Ok(record.clone()),
            Some(Entry::Broken(reason)) => Err(RepositoryError::Frontmatter {
                id: id.to_string(),
                reason: reason.clone(),
            }),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}
