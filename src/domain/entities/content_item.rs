//! Content item entity and its publication lifecycle.
//!
//! Articles, projects, and certificates share one shape and differ only in
//! which fields publishing requires. The lifecycle is a small forward-only
//! state machine with a single back edge (unpublish).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind discriminator for content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Article,
    Project,
    Certificate,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Project => "project",
            ContentKind::Certificate => "certificate",
        }
    }
}

/// Publication state of a content item.
///
/// `Draft -> Published -> Archived`, with `Published -> Draft` as the only
/// backward transition. Archived is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationState {
    Draft,
    Published,
    Archived,
}

impl PublicationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PublicationState::Archived)
    }
}

/// A content item: an article, a project, or a certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub kind: ContentKind,
    pub title: String,
    /// Unique within `kind`, not across kinds.
    pub slug: String,
    /// Free-form marked-up text; required for publishing articles.
    pub body: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    /// Reference to an externally stored binary asset. The asset itself is
    /// owned by the storage collaborator; certificates must carry a non-empty
    /// reference before they can be published.
    pub asset_ref: Option<String>,
    pub state: PublicationState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Creates a new ContentItem instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        kind: ContentKind,
        title: String,
        slug: String,
        body: Option<String>,
        category_id: Option<i64>,
        tag_ids: Vec<i64>,
        asset_ref: Option<String>,
        state: PublicationState,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            title,
            slug,
            body,
            category_id,
            tag_ids,
            asset_ref,
            state,
            created_at,
            updated_at,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.state == PublicationState::Draft
    }

    pub fn is_published(&self) -> bool {
        self.state == PublicationState::Published
    }

    pub fn is_archived(&self) -> bool {
        self.state == PublicationState::Archived
    }

    /// Names the fields that block publication, empty when the item is
    /// publishable as far as its own payload is concerned.
    ///
    /// Title and slug are always required; articles additionally need a
    /// body, certificates a non-empty asset reference. Reference existence
    /// (category, tags) is checked against persistence by the service.
    pub fn missing_publish_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.slug.trim().is_empty() {
            missing.push("slug");
        }
        if self.kind == ContentKind::Article
            && self.body.as_deref().is_none_or(|b| b.trim().is_empty())
        {
            missing.push("body");
        }
        if self.kind == ContentKind::Certificate
            && self.asset_ref.as_deref().is_none_or(|r| r.trim().is_empty())
        {
            missing.push("asset_ref");
        }

        missing
    }
}

/// Caller payload for creating a content item.
///
/// When `slug` is absent one is derived from `title`. Items always start in
/// `Draft`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContentItem {
    pub kind: ContentKind,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    pub asset_ref: Option<String>,
}

/// Fully resolved item row handed to persistence.
#[derive(Debug, Clone)]
pub struct ContentRecord {
    pub kind: ContentKind,
    pub title: String,
    pub slug: String,
    pub body: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub asset_ref: Option<String>,
}

/// Partial update for an existing content item.
///
/// `None` fields are left unchanged.
/// `body: Some(None)` clears the body; `Some(Some(text))` sets it. The same
/// double-`Option` semantics apply to `category_id` and `asset_ref`.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<Option<String>>,
    pub category_id: Option<Option<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub asset_ref: Option<Option<String>>,
}
