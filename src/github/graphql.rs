//! GraphQL documents and response decoding

use serde::Deserialize;

use crate::domain::{Page, QueryMode, Release, TagRecord};
use crate::error::{QueryTagsError, Result};

/// Selection that resolves a ref target to a commit id, peeling one
/// annotated tag object if present.
const TARGET_SELECTION: &str = "target { __typename oid ... on Tag { target { oid } } }";

/// Build the query document for `mode`, fetching `page_size` nodes per page.
///
/// Variables: `$owner`, `$name` and the optional `$endCursor`.
pub fn document(mode: QueryMode, page_size: u32) -> String {
    match mode {
        QueryMode::TagRefs => format!(
            r#"query($owner: String!, $name: String!, $endCursor: String) {{
  repository(owner: $owner, name: $name) {{
    refs(refPrefix: "refs/tags/", first: {page_size}, after: $endCursor, orderBy: {{field: TAG_COMMIT_DATE, direction: DESC}}) {{
      pageInfo {{ hasNextPage endCursor }}
      nodes {{ name {TARGET_SELECTION} }}
    }}
  }}
}}"#
        ),
        QueryMode::Releases => format!(
            r#"query($owner: String!, $name: String!, $endCursor: String) {{
  repository(owner: $owner, name: $name) {{
    releases(first: {page_size}, after: $endCursor, orderBy: {{field: CREATED_AT, direction: DESC}}) {{
      pageInfo {{ hasNextPage endCursor }}
      nodes {{
        createdAt isDraft isLatest isPrerelease name publishedAt description
        tag {{ name {TARGET_SELECTION} }}
      }}
    }}
  }}
}}"#
        ),
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Data {
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    refs: Option<Connection<RefNode>>,
    releases: Option<Connection<ReleaseNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Connection<T> {
    page_info: PageInfo,
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefNode {
    name: String,
    target: Option<Target>,
}

#[derive(Debug, Deserialize)]
struct Target {
    #[serde(rename = "__typename")]
    typename: String,
    oid: String,
    target: Option<ObjectId>,
}

#[derive(Debug, Deserialize)]
struct ObjectId {
    oid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseNode {
    created_at: String,
    is_draft: bool,
    is_latest: bool,
    is_prerelease: bool,
    name: Option<String>,
    published_at: Option<String>,
    description: Option<String>,
    tag: Option<RefNode>,
}

impl Target {
    fn commit_oid(self) -> String {
        match (self.typename.as_str(), self.target) {
            ("Tag", Some(peeled)) => peeled.oid,
            _ => self.oid,
        }
    }
}

impl RefNode {
    fn into_record(self) -> TagRecord {
        let sha = self.target.map(Target::commit_oid).unwrap_or_default();
        TagRecord::new(self.name, sha)
    }
}

impl ReleaseNode {
    /// Releases without a tag (unpublished drafts) cannot be identified and
    /// are dropped.
    fn into_record(self) -> Option<TagRecord> {
        let tag = self.tag?;
        let release = Release {
            created_at: self.created_at,
            is_draft: self.is_draft,
            is_latest: self.is_latest,
            is_prerelease: self.is_prerelease,
            name: self.name,
            published_at: self.published_at,
            description: self.description,
        };
        Some(tag.into_record().with_release(release))
    }
}

fn page_of<T>(connection: Connection<T>, convert: impl Fn(T) -> Option<TagRecord>) -> Page {
    Page {
        has_next_page: connection.page_info.has_next_page,
        end_cursor: connection
            .page_info
            .end_cursor
            .filter(|cursor| !cursor.is_empty()),
        records: connection
            .nodes
            .into_iter()
            .flatten()
            .filter_map(convert)
            .collect(),
    }
}

/// Decode a raw `gh api graphql` response body into a [Page].
pub fn decode_page(mode: QueryMode, body: &str) -> Result<Page> {
    let response: Response = serde_json::from_str(body)?;

    let repository = response.data.and_then(|data| data.repository);
    let Some(repository) = repository else {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(QueryTagsError::upstream(if messages.is_empty() {
            "response has no repository".to_string()
        } else {
            messages.join("; ")
        }));
    };

    match mode {
        QueryMode::TagRefs => repository
            .refs
            .map(|refs| page_of(refs, |node| Some(node.into_record())))
            .ok_or_else(|| QueryTagsError::upstream("response has no refs connection")),
        QueryMode::Releases => repository
            .releases
            .map(|releases| page_of(releases, ReleaseNode::into_record))
            .ok_or_else(|| QueryTagsError::upstream("response has no releases connection")),
    }
}
