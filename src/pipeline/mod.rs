pub mod filter;
pub mod tag_merge;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::html::compose::compose;
use crate::html::segment::segment;
use crate::types::{ExerciseCollection, ExerciseRecord};

/// Per-run report enumerating what happened to the collection. All per-record
/// problems are collected here; none of them abort the batch.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    /// Records whose description was recomputed
    pub cleaned: usize,
    /// Records that gained at least one override tag
    pub merged: usize,
    /// Records removed as non-exercise content
    pub removed_by_filter: usize,
    /// Ids whose fragment yielded no sections despite non-empty raw markup
    pub malformed: Vec<String>,
    /// Override-map ids that matched no record
    pub orphaned_overrides: Vec<String>,
    /// Input positions of records excluded for having no id
    pub skipped_invalid: Vec<String>,
}

/// The content-extraction and normalization pipeline: clean descriptions,
/// merge curated tag overrides, then filter out non-exercise records. A pure,
/// single-pass batch transform; safe to re-run on its own output.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn process(
        &self,
        collection: ExerciseCollection,
    ) -> Result<(ExerciseCollection, RunSummary)> {
        if collection.exercises.is_empty() {
            return Err(PipelineError::EmptyCollection);
        }

        let mut summary = RunSummary::default();
        let mut records: Vec<ExerciseRecord> = Vec::new();

        for (position, mut record) in collection.exercises.into_iter().enumerate() {
            // A record without an id cannot be joined against overrides or
            // filtered meaningfully; exclude it and report by position.
            if record.id.trim().is_empty() {
                let err = PipelineError::MissingField("id".to_string());
                warn!(position, %err, "record excluded from output");
                summary.skipped_invalid.push(format!("record #{}: {}", position, err));
                continue;
            }

            let sections = segment(&record.raw_description, record.source, &self.config.skip_sections);
            let description = compose(&sections);
            if description.is_empty() && !record.raw_description.trim().is_empty() {
                warn!(id = %record.id, "fragment yielded no sections; description degraded to empty");
                summary.malformed.push(record.id.clone());
            }
            record.description = description;
            summary.cleaned += 1;
            records.push(record);
        }

        let (merged, stats) = tag_merge::merge(records, &self.config.overrides);
        summary.merged = stats.records_updated;
        for id in &stats.orphaned_ids {
            warn!(%id, "override entry matched no record");
        }
        summary.orphaned_overrides = stats.orphaned_ids.into_iter().collect();

        let (kept, removed_count) = filter::filter(merged, &self.config.blocked_tags);
        summary.removed_by_filter = removed_count;

        let mut attribution = collection.attribution;
        attribution.last_modified_note = format!(
            "Descriptions cleaned and tags normalized on {}",
            Utc::now().format("%Y-%m-%d")
        );

        info!(
            cleaned = summary.cleaned,
            merged = summary.merged,
            removed = summary.removed_by_filter,
            orphaned = summary.orphaned_overrides.len(),
            malformed = summary.malformed.len(),
            "pipeline pass complete"
        );

        Ok((
            ExerciseCollection {
                attribution,
                exercises: kept,
            },
            summary,
        ))
    }
}
