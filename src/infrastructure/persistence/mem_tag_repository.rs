//! In-memory implementation of the tag repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Tag;
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

/// Non-durable tag storage with a unique index on the normalized label.
///
/// The existence check and the insert happen under one write lock, so two
/// concurrent inserts of the same label cannot both succeed; the loser gets
/// [`AppError::Conflict`], exactly like a relational unique index would
/// answer.
pub struct MemTagRepository {
    rows: RwLock<BTreeMap<i64, Tag>>,
    next_id: AtomicI64,
}

impl MemTagRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("using in-memory tag repository");
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemTagRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagRepository for MemTagRepository {
    async fn insert(&self, label: &str) -> Result<Tag, AppError> {
        let mut rows = self.rows.write().expect("tag store poisoned");

        if rows.values().any(|t| t.label == label) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "tags_label_key", "label": label }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tag = Tag::new(id, label.to_string(), Utc::now());
        rows.insert(id, tag.clone());
        Ok(tag)
    }

    async fn find_by_label(&self, label: &str) -> Result<Option<Tag>, AppError> {
        let rows = self.rows.read().expect("tag store poisoned");
        Ok(rows.values().find(|t| t.label == label).cloned())
    }

    async fn find(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let rows = self.rows.read().expect("tag store poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError> {
        let rows = self.rows.read().expect("tag store poisoned");
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let rows = self.rows.read().expect("tag store poisoned");
        let mut tags: Vec<Tag> = rows.values().cloned().collect();
        tags.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(tags)
    }
}
