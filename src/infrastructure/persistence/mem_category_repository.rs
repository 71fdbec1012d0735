//! In-memory implementation of the category repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Category, CategoryRecord};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

/// Non-durable category storage with the same constraints a relational
/// backend would enforce: a sequence for ids and a unique index on `slug`.
///
/// Each call is atomic under an internal lock; cross-call consistency is the
/// job of [`crate::application::services::CategoryService`], which
/// serializes structural mutations.
pub struct MemCategoryRepository {
    rows: RwLock<BTreeMap<i64, Category>>,
    next_id: AtomicI64,
}

impl MemCategoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("using in-memory category repository");
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for MemCategoryRepository {
    async fn insert(&self, record: CategoryRecord) -> Result<Category, AppError> {
        let mut rows = self.rows.write().expect("category store poisoned");

        if rows.values().any(|c| c.slug == record.slug) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "categories_slug_key", "slug": record.slug }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let category = Category::new(id, record.name, record.slug, record.parent_id, now, now);
        rows.insert(id, category.clone());
        Ok(category)
    }

    async fn find(&self, id: i64) -> Result<Option<Category>, AppError> {
        let rows = self.rows.read().expect("category store poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let rows = self.rows.read().expect("category store poisoned");
        Ok(rows.values().any(|c| c.slug == slug))
    }

    async fn children_of(&self, id: i64) -> Result<Vec<Category>, AppError> {
        let rows = self.rows.read().expect("category store poisoned");
        Ok(rows
            .values()
            .filter(|c| c.parent_id == Some(id))
            .cloned()
            .collect())
    }

    async fn set_parent(&self, id: i64, parent_id: Option<i64>) -> Result<Category, AppError> {
        let mut rows = self.rows.write().expect("category store poisoned");
        let category = rows.get_mut(&id).ok_or_else(|| {
            AppError::not_found("Category not found", json!({ "id": id }))
        })?;
        category.parent_id = parent_id;
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn remove(&self, id: i64) -> Result<bool, AppError> {
        let mut rows = self.rows.write().expect("category store poisoned");
        Ok(rows.remove(&id).is_some())
    }
}
