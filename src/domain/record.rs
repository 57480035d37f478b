use serde::{Deserialize, Serialize};

/// Release metadata attached to a tag in Releases mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub created_at: String,
    pub is_draft: bool,
    pub is_latest: bool,
    pub is_prerelease: bool,
    pub name: Option<String>,
    pub published_at: Option<String>,
    pub description: Option<String>,
}

/// One candidate tag, in the canonical shape printed by `--json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
}

impl TagRecord {
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        TagRecord {
            name: name.into(),
            sha: sha.into(),
            release: None,
        }
    }

    pub fn with_release(mut self, release: Release) -> Self {
        self.release = Some(release);
        self
    }

    /// Text fields a pattern may match: the tag name, plus every string
    /// field of the release. Boolean and absent fields are never offered.
    pub fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(release) = &self.release {
            fields.push(release.created_at.as_str());
            fields.extend(
                [&release.name, &release.published_at, &release.description]
                    .into_iter()
                    .flatten()
                    .map(String::as_str),
            );
        }
        fields
    }

    pub fn is_draft(&self) -> bool {
        self.release.as_ref().is_some_and(|r| r.is_draft)
    }

    pub fn is_prerelease(&self) -> bool {
        self.release.as_ref().is_some_and(|r| r.is_prerelease)
    }
}

/// One page of query results with its continuation state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
    pub records: Vec<TagRecord>,
}
