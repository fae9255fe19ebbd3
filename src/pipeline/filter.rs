use std::collections::HashSet;

use tracing::info;

use crate::pipeline::tag_merge::MergedRecords;
use crate::types::ExerciseRecord;

/// Drops records whose tag set intersects the blocked set (case-insensitive).
/// A matching record is removed wholesale; the relative order of the rest is
/// preserved. Takes `MergedRecords` because merged-in override tags can
/// themselves trigger removal.
pub fn filter(
    records: MergedRecords,
    blocked_tags: &HashSet<String>,
) -> (Vec<ExerciseRecord>, usize) {
    let mut kept = Vec::new();
    let mut removed_count = 0;

    for record in records.into_inner() {
        let blocked = record
            .tags
            .iter()
            .any(|tag| blocked_tags.contains(&tag.to_lowercase()));
        if blocked {
            info!(id = %record.id, "removed non-exercise record");
            removed_count += 1;
        } else {
            kept.push(record);
        }
    }

    (kept, removed_count)
}
