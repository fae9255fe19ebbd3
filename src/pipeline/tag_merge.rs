use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::types::ExerciseRecord;

/// Curated tag -> exercise-id assignments. These have no other source of
/// truth: they are never derived from scraped markup and must survive any
/// re-extraction of `raw_description`.
pub type TagOverrideMap = BTreeMap<String, BTreeSet<String>>;

/// Records that have been through the override merge. The exercise filter
/// accepts only this type, so filtering cannot run before merging.
#[derive(Debug)]
pub struct MergedRecords(Vec<ExerciseRecord>);

impl MergedRecords {
    pub fn records(&self) -> &[ExerciseRecord] {
        &self.0
    }

    pub(crate) fn into_inner(self) -> Vec<ExerciseRecord> {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct MergeStats {
    /// Records that gained at least one tag
    pub records_updated: usize,
    /// Override ids that matched no input record
    pub orphaned_ids: BTreeSet<String>,
}

/// Unions curated override tags into each record's tag set. A record's tags
/// are re-sorted and deduplicated only when something was actually added, so
/// repeated runs with the same map are no-ops. Ids in the map that match no
/// record are surfaced in the stats rather than dropped, since a typo there
/// would otherwise be invisible.
pub fn merge(
    mut records: Vec<ExerciseRecord>,
    overrides: &TagOverrideMap,
) -> (MergedRecords, MergeStats) {
    // Invert tag -> ids into id -> tags for the per-record lookup
    let mut tags_by_id: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (tag, ids) in overrides {
        for id in ids {
            tags_by_id.entry(id.as_str()).or_default().push(tag.as_str());
        }
    }

    let known_ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let orphaned_ids: BTreeSet<String> = tags_by_id
        .keys()
        .filter(|id| !known_ids.contains(**id))
        .map(|id| id.to_string())
        .collect();

    let mut records_updated = 0;
    for record in &mut records {
        let extra_tags = match tags_by_id.get(record.id.as_str()) {
            Some(tags) => tags,
            None => continue,
        };
        let mut added = false;
        for tag in extra_tags {
            if !record.tags.iter().any(|t| t == tag) {
                record.tags.push(tag.to_string());
                added = true;
            }
        }
        if added {
            record.tags.sort();
            record.tags.dedup();
            records_updated += 1;
            debug!(id = %record.id, "merged override tags");
        }
    }

    (
        MergedRecords(records),
        MergeStats {
            records_updated,
            orphaned_ids,
        },
    )
}
