//! Page lookup and creation services
//!
//! Resolves human-supplied titles to page IDs through the search
//! endpoint and creates pages whose children are converted markup.
//! Search results arrive as loosely-shaped JSON; extraction here is
//! defensive and skips what it cannot read instead of failing.

use crate::client::{ApiClient, ApiError};
use crate::page_model::parse_document;
use serde_json::{json, Value};
use thiserror::Error;

/// Number of search results requested per lookup
const SEARCH_PAGE_SIZE: u32 = 10;

/// Property names under which a page's title may be stored
const TITLE_PROPERTY_NAMES: [&str; 4] = ["title", "Title", "name", "Name"];

/// Errors from page lookup and creation
#[derive(Error, Debug)]
pub enum PageError {
    /// The search request failed
    #[error("search failed: {0}")]
    Search(#[source] ApiError),

    /// The search succeeded but nothing matched
    #[error("no pages found matching title: {0}")]
    NoMatches(String),

    /// The page-create request failed
    #[error("page creation failed: {0}")]
    Create(#[source] ApiError),

    /// The page-create response carried no page ID
    #[error("no page ID in the creation response")]
    MissingPageId,
}

/// Kind of object returned by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// An ordinary page
    Page,
    /// A database
    Database,
}

impl ObjectKind {
    /// Parse the API's `object` field
    fn from_api(value: &str) -> Option<Self> {
        match value {
            "page" => Some(Self::Page),
            "database" => Some(Self::Database),
            _ => None,
        }
    }

    /// The API's name for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Database => "database",
        }
    }
}

/// Where a new page is attached
#[derive(Debug, Clone)]
pub enum Parent {
    /// Under an existing page
    Page(String),
    /// As an entry of a database
    Database(String),
}

impl Parent {
    /// Build the parent for an object found via search
    pub fn for_kind(kind: ObjectKind, id: String) -> Self {
        match kind {
            ObjectKind::Page => Self::Page(id),
            ObjectKind::Database => Self::Database(id),
        }
    }

    /// The `parent` reference object of a page-create request
    fn to_reference(&self) -> Value {
        match self {
            Parent::Page(id) => json!({ "page_id": id }),
            Parent::Database(id) => json!({ "database_id": id }),
        }
    }
}

/// Page or database information extracted from a search result
#[derive(Debug, Clone)]
pub struct PageSummary {
    /// Object ID
    pub id: String,

    /// Title, or "Untitled" when none could be extracted
    pub title: String,

    /// Whether this is a page or a database
    pub kind: ObjectKind,

    /// ID of the containing page or database, when reported
    pub parent_id: Option<String>,

    /// Browser URL of the object
    pub url: Option<String>,

    /// Last-edited timestamp as reported by the API
    pub last_edited_time: Option<String>,
}

/// How closely a search candidate matched the requested title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    /// Case-insensitive equality with the query
    Exact,
    /// The query appears within the title
    Partial,
    /// Nothing matched textually; the most recently edited candidate
    MostRecent,
}

impl MatchQuality {
    /// Human-readable description used in messages
    pub fn describe(self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::Partial => "similar match",
            Self::MostRecent => "potential match",
        }
    }
}

/// Result of resolving a title against the search endpoint
#[derive(Debug)]
pub struct PageMatch {
    /// Best-matching page
    pub page: PageSummary,

    /// How the best match was selected
    pub quality: MatchQuality,

    /// Every readable candidate, most recently edited first
    pub candidates: Vec<PageSummary>,
}

/// Find pages by title and pick the best match.
///
/// # Parameters
/// * `client` - API client to search with
/// * `title` - Human-supplied title to resolve
/// * `kind` - Restrict candidates to pages or databases when set
///
/// # Returns
/// * `Ok(PageMatch)` - Best match plus all candidates
/// * `Err(PageError)` - Search failure or no matching candidates
pub fn find_page(
    client: &ApiClient,
    title: &str,
    kind: Option<ObjectKind>,
) -> Result<PageMatch, PageError> {
    let body = json!({
        "query": title,
        "sort": { "direction": "descending", "timestamp": "last_edited_time" },
        "page_size": SEARCH_PAGE_SIZE,
    });

    let response = client.post("search", &body).map_err(PageError::Search)?;

    let mut candidates = Vec::new();
    if let Some(results) = response.get("results").and_then(Value::as_array) {
        for result in results {
            match parse_page_summary(result) {
                Some(summary) => {
                    if kind.is_none_or(|kind| summary.kind == kind) {
                        candidates.push(summary);
                    }
                }
                None => log::warn!("skipping search result without id/object fields"),
            }
        }
    }

    if candidates.is_empty() {
        return Err(PageError::NoMatches(title.to_string()));
    }

    let (index, quality) = find_best_match(&candidates, title);
    let page = candidates[index].clone();
    log::info!(
        "found {} for '{}': '{}' ({} candidates)",
        quality.describe(),
        title,
        page.title,
        candidates.len()
    );

    Ok(PageMatch {
        page,
        quality,
        candidates,
    })
}

/// Create a page whose children are the converted markup content.
///
/// # Parameters
/// * `client` - API client to create through
/// * `parent` - Page or database the new page is attached to
/// * `title` - Title for the new page
/// * `content` - Markup content converted into the page's children
///
/// # Returns
/// * `Ok(String)` - ID of the created page
/// * `Err(PageError)` - Creation failure or a response without an ID
pub fn create_page(
    client: &ApiClient,
    parent: &Parent,
    title: &str,
    content: &str,
) -> Result<String, PageError> {
    let body = page_create_body(parent, title, content);

    let response = client.post("pages", &body).map_err(PageError::Create)?;

    response
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(PageError::MissingPageId)
}

/// Build the full page-create request body
fn page_create_body(parent: &Parent, title: &str, content: &str) -> Value {
    let children = parse_document(content);
    log::info!("creating page '{}' with {} blocks", title, children.len());

    json!({
        "parent": parent.to_reference(),
        "properties": {
            "title": { "title": [ { "type": "text", "text": { "content": title } } ] }
        },
        "children": children,
    })
}

/// Extract page information from one search-result object
fn parse_page_summary(result: &Value) -> Option<PageSummary> {
    let id = result.get("id")?.as_str()?.to_string();
    let kind = ObjectKind::from_api(result.get("object")?.as_str()?)?;

    Some(PageSummary {
        id,
        kind,
        title: extract_title(result),
        parent_id: extract_parent_id(result),
        url: result
            .get("url")
            .and_then(Value::as_str)
            .map(str::to_string),
        last_edited_time: result
            .get("last_edited_time")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Find the title under any of the known property names.
///
/// The first property holding a non-empty `title` array decides the
/// outcome; a first item without text content still means "Untitled".
fn extract_title(result: &Value) -> String {
    for name in TITLE_PROPERTY_NAMES {
        let first_item = result
            .get("properties")
            .and_then(|properties| properties.get(name))
            .and_then(|property| property.get("title"))
            .and_then(Value::as_array)
            .and_then(|items| items.first());
        let Some(item) = first_item else {
            continue;
        };
        return item
            .get("text")
            .and_then(|text| text.get("content"))
            .and_then(Value::as_str)
            .unwrap_or("Untitled")
            .to_string();
    }

    String::from("Untitled")
}

/// The parent object stores its ID under a key named by its `type` field
fn extract_parent_id(result: &Value) -> Option<String> {
    let parent = result.get("parent")?;
    let key = parent.get("type")?.as_str()?;
    Some(parent.get(key)?.as_str()?.to_string())
}

/// Pick the best matching candidate from a non-empty list.
///
/// Exact title equality wins, then substring containment; otherwise the
/// first candidate (the most recently edited, given the search sort) is
/// the fallback. Comparison is case-insensitive.
fn find_best_match(pages: &[PageSummary], query: &str) -> (usize, MatchQuality) {
    let query = query.to_lowercase();

    if let Some(index) = pages
        .iter()
        .position(|page| page.title.to_lowercase() == query)
    {
        return (index, MatchQuality::Exact);
    }

    if let Some(index) = pages
        .iter()
        .position(|page| page.title.to_lowercase().contains(&query))
    {
        return (index, MatchQuality::Partial);
    }

    (0, MatchQuality::MostRecent)
}
