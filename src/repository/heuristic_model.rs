use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::catalog_model::HeuristicId;
use crate::error::RepositoryError;
use crate::repository::preview::extract_preview;

// ============================================================================
// Resolved heuristic content
// ============================================================================

/// A role that owns a heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Designer,
    Developer,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "designer" | "designers" | "design" => Some(Role::Designer),
            "developer" | "developers" | "dev" | "engineering" => Some(Role::Developer),
            _ => None,
        }
    }
}

/// The full content of one heuristic, as returned by a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicRecord {
    pub title: String,

    /// Category slug, taken from the identifier's first segment.
    pub category: String,

    pub owner: Vec<Role>,
    pub keywords: Vec<String>,

    /// First paragraph of the overview section. Empty when unavailable.
    pub preview: String,
}

// ============================================================================
// Frontmatter (repository boundary)
// ============================================================================

/// Either a comma-separated string or a YAML list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Text(String),
    List(Vec<String>),
}

impl StringOrList {
    /// Normalize both forms into trimmed, non-empty entries.
    pub fn into_vec(self) -> Vec<String> {
        let items: Vec<String> = match self {
            StringOrList::Text(text) => text.split(',').map(str::to_string).collect(),
            StringOrList::List(list) => list,
        };

        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// YAML frontmatter of a heuristic document. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    #[serde(default)]
    pub owner: Option<StringOrList>,
    #[serde(default)]
    pub keywords: Option<StringOrList>,
}

/// Split a document into its frontmatter block and its body.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Parse a heuristic document (YAML frontmatter + Markdown body) into a record.
pub fn parse_document(id: &HeuristicId, source: &str) -> Result<HeuristicRecord, RepositoryError> {
    let frontmatter_error = |reason: String| RepositoryError::Frontmatter {
        id: id.to_string(),
        reason,
    };

    let (yaml, body) =
        split_frontmatter(source).ok_or_else(|| frontmatter_error("missing '---' block".into()))?;

    let frontmatter: Frontmatter =
        serde_yaml::from_str(yaml).map_err(|e| frontmatter_error(e.to_string()))?;

    let title = frontmatter
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| frontmatter_error("missing 'title'".into()))?;

    let mut owner = Vec::new();
    for raw in frontmatter.owner.map(StringOrList::into_vec).unwrap_or_default() {
        match Role::parse(&raw) {
            Some(role) if !owner.contains(&role) => owner.push(role),
            Some(_) => {}
            None => debug!(heuristic = %id, role = %raw, "dropping unknown owner role"),
        }
    }

    let keywords = frontmatter
        .keywords
        .map(StringOrList::into_vec)
        .unwrap_or_default();

    let preview = extract_preview(body).unwrap_or_else(|| {
        debug!(heuristic = %id, "no overview paragraph, using empty preview");
        String::new()
    });

    Ok(HeuristicRecord {
        title,
        category: id.category().to_string(),
        owner,
        keywords,
        preview,
    })
}
