use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

// ============================================================================
// Element tags: the closed vocabulary of recognized UI element types
// ============================================================================

/// A UI element type the analyzer knows how to map to heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementTag {
    TextInput,
    Textarea,
    Select,
    Checkbox,
    RadioGroup,
    Button,
    Link,
    Image,
    Icon,
    Video,
    Audio,
    Modal,
    Dropdown,
    Navigation,
    Tabs,
    Accordion,
    Carousel,
    Table,
    Form,
    Tooltip,
    Alert,
    Slider,
}

impl ElementTag {
    pub const ALL: [ElementTag; 22] = [
        ElementTag::TextInput,
        ElementTag::Textarea,
        ElementTag::Select,
        ElementTag::Checkbox,
        ElementTag::RadioGroup,
        ElementTag::Button,
        ElementTag::Link,
        ElementTag::Image,
        ElementTag::Icon,
        ElementTag::Video,
        ElementTag::Audio,
        ElementTag::Modal,
        ElementTag::Dropdown,
        ElementTag::Navigation,
        ElementTag::Tabs,
        ElementTag::Accordion,
        ElementTag::Carousel,
        ElementTag::Table,
        ElementTag::Form,
        ElementTag::Tooltip,
        ElementTag::Alert,
        ElementTag::Slider,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementTag::TextInput => "text-input",
            ElementTag::Textarea => "textarea",
            ElementTag::Select => "select",
            ElementTag::Checkbox => "checkbox",
            ElementTag::RadioGroup => "radio-group",
            ElementTag::Button => "button",
            ElementTag::Link => "link",
            ElementTag::Image => "image",
            ElementTag::Icon => "icon",
            ElementTag::Video => "video",
            ElementTag::Audio => "audio",
            ElementTag::Modal => "modal",
            ElementTag::Dropdown => "dropdown",
            ElementTag::Navigation => "navigation",
            ElementTag::Tabs => "tabs",
            ElementTag::Accordion => "accordion",
            ElementTag::Carousel => "carousel",
            ElementTag::Table => "table",
            ElementTag::Form => "form",
            ElementTag::Tooltip => "tooltip",
            ElementTag::Alert => "alert",
            ElementTag::Slider => "slider",
        }
    }

    /// Human-readable singular name: internal separators become spaces.
    pub fn display_name(&self) -> String {
        self.as_str().replace(['-', '_'], " ")
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ElementTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| format!("unknown element tag '{}'", s.trim()))
    }
}

// ============================================================================
// Heuristic categories
// ============================================================================

/// The six heuristic categories, declared in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Navigation,
    FormsAndInputs,
    Interaction,
    ContentAndMedia,
    VisualDesign,
    AssistiveTechnology,
}

impl Category {
    pub const ORDER: [Category; 6] = [
        Category::Navigation,
        Category::FormsAndInputs,
        Category::Interaction,
        Category::ContentAndMedia,
        Category::VisualDesign,
        Category::AssistiveTechnology,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Navigation => "navigation",
            Category::FormsAndInputs => "forms-and-inputs",
            Category::Interaction => "interaction",
            Category::ContentAndMedia => "content-and-media",
            Category::VisualDesign => "visual-design",
            Category::AssistiveTechnology => "assistive-technology",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Navigation => "Navigation",
            Category::FormsAndInputs => "Forms & Inputs",
            Category::Interaction => "Interaction",
            Category::ContentAndMedia => "Content & Media",
            Category::VisualDesign => "Visual Design",
            Category::AssistiveTechnology => "Assistive Technology",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ORDER.iter().copied().find(|c| c.slug() == slug)
    }

    /// Position in the canonical display order.
    pub fn rank(&self) -> usize {
        *self as usize
    }
}

/// Display name for a category slug. Unmapped slugs pass through verbatim.
pub fn category_display_name(slug: &str) -> String {
    Category::from_slug(slug)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| slug.to_string())
}

/// Sort key for a category slug: ranked categories first, unranked last.
pub fn category_rank(slug: &str) -> usize {
    Category::from_slug(slug)
        .map(|c| c.rank())
        .unwrap_or(Category::ORDER.len())
}

// ============================================================================
// Heuristic identifiers
// ============================================================================

/// `{category}/{slug}` identifier of a single heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HeuristicId(String);

impl HeuristicId {
    pub fn parse(raw: &str) -> Result<Self, RepositoryError> {
        let raw = raw.trim();
        let valid_part = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        };

        match raw.split_once('/') {
            Some((category, slug)) if valid_part(category) && valid_part(slug) => {
                Ok(HeuristicId(raw.to_string()))
            }
            _ => Err(RepositoryError::InvalidId(raw.to_string())),
        }
    }

    /// Build from a static catalog entry. Validity is covered by the catalog tests.
    pub(crate) fn from_static(raw: &'static str) -> Self {
        HeuristicId(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> &str {
        self.0.split_once('/').map(|(c, _)| c).unwrap_or("")
    }

    pub fn slug(&self) -> &str {
        self.0.split_once('/').map(|(_, s)| s).unwrap_or(&self.0)
    }
}

impl fmt::Display for HeuristicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HeuristicId {
    type Error = RepositoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HeuristicId::parse(&value)
    }
}

impl From<HeuristicId> for String {
    fn from(id: HeuristicId) -> Self {
        id.0
    }
}

impl FromStr for HeuristicId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeuristicId::parse(s)
    }
}
