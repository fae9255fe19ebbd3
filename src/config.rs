use serde::Deserialize;
use std::collections::HashSet;
use std::fs;

use crate::error::{PipelineError, Result};
use crate::pipeline::tag_merge::TagOverrideMap;

/// Static configuration consumed (not owned) by the pipeline: which section
/// titles to omit, which tags disqualify a record, and the curated tag
/// overrides. All matching is case-insensitive, so everything is lowercased
/// once at load time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Section titles to drop during segmentation (e.g. "Synonyms", "Credits")
    #[serde(default)]
    pub skip_sections: HashSet<String>,
    /// Tags that mark a record as non-exercise content
    #[serde(default)]
    pub blocked_tags: HashSet<String>,
    /// Curated tag -> exercise-id assignments, independent of scraped data
    #[serde(default)]
    pub overrides: TagOverrideMap,
}

impl PipelineConfig {
    pub fn load(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: PipelineConfig = toml::from_str(&config_content)?;
        Ok(config.normalized())
    }

    /// Lowercase every title and tag so later comparisons are case-insensitive.
    pub fn normalized(self) -> Self {
        PipelineConfig {
            skip_sections: self.skip_sections.into_iter().map(|s| s.to_lowercase()).collect(),
            blocked_tags: self.blocked_tags.into_iter().map(|t| t.to_lowercase()).collect(),
            overrides: self
                .overrides
                .into_iter()
                .map(|(tag, ids)| (tag.to_lowercase(), ids))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_normalize() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
skip_sections = ["Synonyms", "Credits"]
blocked_tags = ["Theater"]

[overrides]
Heightening = ["encyclopedia:yes-and"]
"#
        )
        .unwrap();

        let config = PipelineConfig::load(file.path().to_str().unwrap()).unwrap();
        assert!(config.skip_sections.contains("credits"));
        assert!(config.blocked_tags.contains("theater"));
        assert!(config.overrides.contains_key("heightening"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = PipelineConfig::load("no-such-config.toml").unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
