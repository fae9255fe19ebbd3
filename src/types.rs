use serde::{Deserialize, Serialize};

use crate::constants;

/// One instructional exercise as captured from a provider page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Stable identifier, unique within a provider namespace (`provider:slug`).
    /// Immutable once assigned; the join key for tag overrides. Defaults to
    /// empty when absent so one bad record is excluded per-record by the
    /// pipeline instead of failing the whole collection at deserialization.
    #[serde(default)]
    pub id: String,
    /// Original markup fragment as captured from the source. Never mutated.
    #[serde(default)]
    pub raw_description: String,
    /// Clean markup derived from `raw_description`; recomputed on every pass.
    #[serde(default)]
    pub description: String,
    /// Lowercase tag strings, kept sorted for output stability.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Which provider convention produced this record.
    pub source: SourceConvention,
}

/// The two heading conventions seen in source pages. Determines which
/// content-root selector applies during segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceConvention {
    /// Wiki-style pages with explicit heading elements
    Improwiki,
    /// Pages that use bold-only paragraphs in place of real headings
    Encyclopedia,
}

impl SourceConvention {
    /// CSS selector for the provider's main content column
    pub fn content_root(&self) -> &'static str {
        match self {
            SourceConvention::Improwiki => constants::IMPROWIKI_CONTENT_ROOT,
            SourceConvention::Encyclopedia => constants::ENCYCLOPEDIA_CONTENT_ROOT,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            SourceConvention::Improwiki => constants::IMPROWIKI_PROVIDER,
            SourceConvention::Encyclopedia => constants::ENCYCLOPEDIA_PROVIDER,
        }
    }
}

/// Attribution block carried alongside each provider's record collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    pub source_name: String,
    pub source_url: String,
    pub license: String,
    /// Free-text note; the pipeline updates this after a processing pass
    #[serde(default)]
    pub last_modified_note: String,
}

/// A provider's full document collection as supplied by the scraping stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCollection {
    pub attribution: Attribution,
    pub exercises: Vec<ExerciseRecord>,
}
