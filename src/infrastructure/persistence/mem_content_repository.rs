//! In-memory implementation of the content repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    ContentItem, ContentKind, ContentPatch, ContentRecord, PublicationState,
};
use crate::domain::repositories::ContentRepository;
use crate::error::AppError;

/// Non-durable content item storage with a unique index on `(kind, slug)`.
pub struct MemContentRepository {
    rows: RwLock<BTreeMap<i64, ContentItem>>,
    next_id: AtomicI64,
}

impl MemContentRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("using in-memory content repository");
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemContentRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn slug_taken(
    rows: &BTreeMap<i64, ContentItem>,
    kind: ContentKind,
    slug: &str,
    exclude: Option<i64>,
) -> bool {
    rows.values()
        .any(|item| item.kind == kind && item.slug == slug && Some(item.id) != exclude)
}

#[async_trait]
impl ContentRepository for MemContentRepository {
    async fn insert(&self, record: ContentRecord) -> Result<ContentItem, AppError> {
        let mut rows = self.rows.write().expect("content store poisoned");

        if slug_taken(&rows, record.kind, &record.slug, None) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({
                    "constraint": "content_items_kind_slug_key",
                    "kind": record.kind.as_str(),
                    "slug": record.slug,
                }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let item = ContentItem::new(
            id,
            record.kind,
            record.title,
            record.slug,
            record.body,
            record.category_id,
            record.tag_ids,
            record.asset_ref,
            PublicationState::Draft,
            now,
            now,
        );
        rows.insert(id, item.clone());
        Ok(item)
    }

    async fn find(&self, id: i64) -> Result<Option<ContentItem>, AppError> {
        let rows = self.rows.read().expect("content store poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_slug(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ContentItem>, AppError> {
        let rows = self.rows.read().expect("content store poisoned");
        Ok(rows
            .values()
            .find(|item| item.kind == kind && item.slug == slug)
            .cloned())
    }

    async fn list(
        &self,
        kind: ContentKind,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ContentItem>, AppError> {
        let rows = self.rows.read().expect("content store poisoned");
        let mut items: Vec<ContentItem> =
            rows.values().filter(|item| item.kind == kind).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = ((page - 1) * page_size).max(0) as usize;
        Ok(items
            .into_iter()
            .skip(offset)
            .take(page_size.max(0) as usize)
            .collect())
    }

    async fn count(&self, kind: ContentKind) -> Result<i64, AppError> {
        let rows = self.rows.read().expect("content store poisoned");
        Ok(rows.values().filter(|item| item.kind == kind).count() as i64)
    }

    async fn update(&self, id: i64, patch: ContentPatch) -> Result<ContentItem, AppError> {
        let mut rows = self.rows.write().expect("content store poisoned");

        let current = rows.get(&id).ok_or_else(|| {
            AppError::not_found("Content item not found", json!({ "id": id }))
        })?;

        if let Some(slug) = &patch.slug {
            if slug_taken(&rows, current.kind, slug, Some(id)) {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({
                        "constraint": "content_items_kind_slug_key",
                        "kind": current.kind.as_str(),
                        "slug": slug,
                    }),
                ));
            }
        }

        let item = rows.get_mut(&id).expect("row checked above");
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(slug) = patch.slug {
            item.slug = slug;
        }
        if let Some(body) = patch.body {
            item.body = body;
        }
        if let Some(category_id) = patch.category_id {
            item.category_id = category_id;
        }
        if let Some(tag_ids) = patch.tag_ids {
            item.tag_ids = tag_ids;
        }
        if let Some(asset_ref) = patch.asset_ref {
            item.asset_ref = asset_ref;
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn set_state(
        &self,
        id: i64,
        state: PublicationState,
    ) -> Result<ContentItem, AppError> {
        let mut rows = self.rows.write().expect("content store poisoned");
        let item = rows.get_mut(&id).ok_or_else(|| {
            AppError::not_found("Content item not found", json!({ "id": id }))
        })?;
        item.state = state;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.rows.write().expect("content store poisoned");
        Ok(rows.remove(&id).is_some())
    }

    async fn reassign_category(&self, from: i64, to: Option<i64>) -> Result<u64, AppError> {
        let mut rows = self.rows.write().expect("content store poisoned");
        let now = Utc::now();
        let mut touched = 0;
        for item in rows.values_mut() {
            if item.category_id == Some(from) {
                item.category_id = to;
                item.updated_at = now;
                touched += 1;
            }
        }
        Ok(touched)
    }
}
