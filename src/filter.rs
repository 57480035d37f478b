//! Per-page selection, release rules and output shaping
//!
//! The pipeline is built once from [QueryOptions] and applied to every page:
//!
//! 1. keep records whose sha starts with any hash OR whose searchable text
//!    matches any pattern (no terms at all keeps everything)
//! 2. in Releases mode drop pre-releases when asked, and drafts unless asked
//! 3. project to the tag name unless JSON output was requested
//! 4. apply the `--jq` map stage, if any
//! 5. keep only the first result unless `--all`

use regex::Regex;
use serde_json::Value;

use crate::domain::{QueryMode, QueryOptions, ReleaseFlags, TagRecord};
use crate::error::{QueryTagsError, Result};
use crate::jq::MapStage;

pub struct FilterPipeline {
    hashes: Vec<String>,
    patterns: Vec<Regex>,
    mode: QueryMode,
    release: ReleaseFlags,
    json: bool,
    all: bool,
    map_stage: Option<Box<dyn MapStage>>,
}

impl FilterPipeline {
    /// Compile the pipeline. Invalid patterns are rejected here, before any
    /// page is fetched.
    pub fn new(options: &QueryOptions, map_stage: Option<Box<dyn MapStage>>) -> Result<Self> {
        let patterns = options
            .terms
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| QueryTagsError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FilterPipeline {
            hashes: options.terms.hashes.iter().cloned().collect(),
            patterns,
            mode: options.mode(),
            release: options.release,
            json: options.json_output(),
            all: options.all,
            map_stage,
        })
    }

    /// Hash-or-pattern predicate. With no terms every record passes.
    pub fn matches(&self, record: &TagRecord) -> bool {
        if self.hashes.is_empty() && self.patterns.is_empty() {
            return true;
        }

        self.hashes.iter().any(|hash| record.sha.starts_with(hash.as_str()))
            || record
                .searchable_text()
                .into_iter()
                .any(|text| self.patterns.iter().any(|re| re.is_match(text)))
    }

    /// Draft and pre-release rules; a no-op outside Releases mode.
    pub fn passes_release_rules(&self, record: &TagRecord) -> bool {
        if self.mode != QueryMode::Releases {
            return true;
        }
        if self.release.exclude_prerelease && record.is_prerelease() {
            return false;
        }
        self.release.include_draft || !record.is_draft()
    }

    fn shape(&self, record: &TagRecord) -> Result<Value> {
        if self.json {
            Ok(serde_json::to_value(record)?)
        } else {
            Ok(Value::String(record.name.clone()))
        }
    }

    /// Run the whole pipeline over one page. An empty result means the page
    /// had no match.
    pub fn apply(&self, records: &[TagRecord]) -> Result<Vec<Value>> {
        let mut values = records
            .iter()
            .filter(|record| self.matches(record) && self.passes_release_rules(record))
            .map(|record| self.shape(record))
            .collect::<Result<Vec<_>>>()?;

        if values.is_empty() {
            return Ok(values);
        }

        if let Some(stage) = &self.map_stage {
            values = stage.map(values)?;
        }

        if !self.all {
            values.truncate(1);
        }

        Ok(values)
    }

    pub fn is_all(&self) -> bool {
        self.all
    }
}
