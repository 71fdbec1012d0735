//! Content item lifecycle service.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::entities::{
    ContentItem, ContentKind, ContentPatch, ContentRecord, NewContentItem, PublicationState,
};
use crate::domain::repositories::{CategoryRepository, ContentRepository, TagRepository};
use crate::error::{map_validation_errors, AppError};
use crate::utils::slug::{slugify, validate_slug};
use serde_json::json;
use validator::Validate;

/// Service enforcing the publication state machine and its preconditions.
///
/// `Draft -> Published -> Archived`, forward-only except the explicit
/// unpublish step back to `Draft`. Category and tag references are checked
/// against persistence on create, update, and publish; slug uniqueness is
/// scoped per item kind.
pub struct ContentService<I: ContentRepository, C: CategoryRepository, T: TagRepository> {
    items: Arc<I>,
    categories: Arc<C>,
    tags: Arc<T>,
    config: Config,
}

impl<I: ContentRepository, C: CategoryRepository, T: TagRepository> ContentService<I, C, T> {
    /// Creates a new content service.
    pub fn new(items: Arc<I>, categories: Arc<C>, tags: Arc<T>, config: Config) -> Self {
        Self {
            items,
            categories,
            tags,
            config,
        }
    }

    /// Creates a content item in `Draft` state.
    ///
    /// The slug defaults to a slugified `title` when not supplied and must
    /// be unique within the item's kind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad payload,
    /// [`AppError::NotFound`] for a missing category or tag reference, and
    /// [`AppError::Conflict`] on a slug collision within the kind.
    pub async fn create(&self, payload: NewContentItem) -> Result<ContentItem, AppError> {
        payload.validate().map_err(map_validation_errors)?;

        let slug = match payload.slug {
            Some(slug) => slug,
            None => slugify(&payload.title).ok_or_else(|| {
                AppError::validation(
                    "Cannot derive a slug from this title",
                    json!({ "title": payload.title }),
                )
            })?,
        };
        validate_slug(&slug, self.config.max_slug_length)?;

        if let Some(category_id) = payload.category_id {
            self.require_category(category_id).await?;
        }

        let tag_ids = dedupe_ids(&payload.tag_ids);
        self.require_tags(&tag_ids).await?;

        if self
            .items
            .find_by_slug(payload.kind, &slug)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "Slug already in use for this kind",
                json!({ "kind": payload.kind.as_str(), "slug": slug }),
            ));
        }

        let created = self
            .items
            .insert(ContentRecord {
                kind: payload.kind,
                title: payload.title,
                slug,
                body: payload.body,
                category_id: payload.category_id,
                tag_ids,
                asset_ref: payload.asset_ref,
            })
            .await?;

        tracing::info!(
            id = created.id,
            kind = created.kind.as_str(),
            slug = %created.slug,
            "content item created"
        );
        Ok(created)
    }

    /// Partially updates an item.
    ///
    /// Archived items are immutable. A changed slug is revalidated for
    /// uniqueness within the kind; changed category/tag references must
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for a missing item or reference,
    /// [`AppError::InvalidOperation`] for an archived item, and
    /// [`AppError::Conflict`] on a slug collision.
    pub async fn update(&self, id: i64, mut patch: ContentPatch) -> Result<ContentItem, AppError> {
        let item = self.require(id).await?;

        if item.is_archived() {
            return Err(AppError::invalid_operation(
                "Archived items cannot be edited",
                json!({ "id": id }),
            ));
        }

        if let Some(slug) = &patch.slug {
            validate_slug(slug, self.config.max_slug_length)?;
            if slug != &item.slug
                && self.items.find_by_slug(item.kind, slug).await?.is_some()
            {
                return Err(AppError::conflict(
                    "Slug already in use for this kind",
                    json!({ "kind": item.kind.as_str(), "slug": slug }),
                ));
            }
        }

        if let Some(Some(category_id)) = patch.category_id {
            self.require_category(category_id).await?;
        }

        if let Some(tag_ids) = patch.tag_ids.take() {
            let tag_ids = dedupe_ids(&tag_ids);
            self.require_tags(&tag_ids).await?;
            patch.tag_ids = Some(tag_ids);
        }

        let updated = self.items.update(id, patch).await?;
        tracing::debug!(id, "content item updated");
        Ok(updated)
    }

    /// Publishes a draft.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidOperation`] unless the item is in `Draft`,
    /// and [`AppError::Validation`] when a required field is empty (title,
    /// slug, article body, certificate asset reference) or a referenced
    /// category/tag no longer exists.
    pub async fn publish(&self, id: i64) -> Result<ContentItem, AppError> {
        let item = self.require(id).await?;

        match item.state {
            PublicationState::Draft => {}
            PublicationState::Published => {
                return Err(AppError::invalid_operation(
                    "Item is already published",
                    json!({ "id": id }),
                ));
            }
            PublicationState::Archived => {
                return Err(AppError::invalid_operation(
                    "Archived items cannot be published",
                    json!({ "id": id }),
                ));
            }
        }

        let missing = item.missing_publish_fields();
        if !missing.is_empty() {
            return Err(AppError::validation(
                "Item is missing required fields for publication",
                json!({ "id": id, "missing": missing }),
            ));
        }

        if let Some(category_id) = item.category_id {
            if self.categories.find(category_id).await?.is_none() {
                return Err(AppError::validation(
                    "Referenced category no longer exists",
                    json!({ "id": id, "category_id": category_id }),
                ));
            }
        }

        let known = self.tags.find_many(&item.tag_ids).await?;
        if known.len() != item.tag_ids.len() {
            let known_ids: HashSet<i64> = known.iter().map(|t| t.id).collect();
            let missing_tags: Vec<i64> = item
                .tag_ids
                .iter()
                .copied()
                .filter(|id| !known_ids.contains(id))
                .collect();
            return Err(AppError::validation(
                "Referenced tags no longer exist",
                json!({ "id": id, "tag_ids": missing_tags }),
            ));
        }

        let published = self
            .items
            .set_state(id, PublicationState::Published)
            .await?;
        tracing::info!(id, kind = published.kind.as_str(), "content item published");
        Ok(published)
    }

    /// Returns a published item to `Draft`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidOperation`] unless the item is
    /// `Published`.
    pub async fn unpublish(&self, id: i64) -> Result<ContentItem, AppError> {
        let item = self.require(id).await?;

        if !item.is_published() {
            return Err(AppError::invalid_operation(
                "Only published items can be unpublished",
                json!({ "id": id, "state": item.state }),
            ));
        }

        let draft = self.items.set_state(id, PublicationState::Draft).await?;
        tracing::info!(id, "content item unpublished");
        Ok(draft)
    }

    /// Archives an item from any state. Irreversible; archiving an already
    /// archived item is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    pub async fn archive(&self, id: i64) -> Result<ContentItem, AppError> {
        let item = self.require(id).await?;

        if item.is_archived() {
            return Ok(item);
        }

        let archived = self.items.set_state(id, PublicationState::Archived).await?;
        tracing::info!(id, "content item archived");
        Ok(archived)
    }

    /// Retrieves an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    pub async fn get(&self, id: i64) -> Result<ContentItem, AppError> {
        self.require(id).await
    }

    /// Retrieves an item by kind and slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no item matches.
    pub async fn get_by_slug(&self, kind: ContentKind, slug: &str) -> Result<ContentItem, AppError> {
        self.items.find_by_slug(kind, slug).await?.ok_or_else(|| {
            AppError::not_found(
                "Content item not found",
                json!({ "kind": kind.as_str(), "slug": slug }),
            )
        })
    }

    /// Lists items of a kind, newest first.
    ///
    /// `page` is 1-indexed and clamped to at least 1; `page_size` falls back
    /// to the configured default and is capped at the configured maximum.
    pub async fn list(
        &self,
        kind: ContentKind,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Vec<ContentItem>, AppError> {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);
        self.items.list(kind, page, page_size).await
    }

    /// Counts items of a kind.
    pub async fn count(&self, kind: ContentKind) -> Result<i64, AppError> {
        self.items.count(kind).await
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.items.remove(id).await? {
            return Err(AppError::not_found(
                "Content item not found",
                json!({ "id": id }),
            ));
        }
        tracing::info!(id, "content item deleted");
        Ok(())
    }

    async fn require(&self, id: i64) -> Result<ContentItem, AppError> {
        self.items.find(id).await?.ok_or_else(|| {
            AppError::not_found("Content item not found", json!({ "id": id }))
        })
    }

    async fn require_category(&self, category_id: i64) -> Result<(), AppError> {
        if self.categories.find(category_id).await?.is_none() {
            return Err(AppError::not_found(
                "Category not found",
                json!({ "category_id": category_id }),
            ));
        }
        Ok(())
    }

    async fn require_tags(&self, tag_ids: &[i64]) -> Result<(), AppError> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        let known = self.tags.find_many(tag_ids).await?;
        if known.len() != tag_ids.len() {
            let known_ids: HashSet<i64> = known.iter().map(|t| t.id).collect();
            let missing: Vec<i64> = tag_ids
                .iter()
                .copied()
                .filter(|id| !known_ids.contains(id))
                .collect();
            return Err(AppError::not_found(
                "Tags not found",
                json!({ "tag_ids": missing }),
            ));
        }
        Ok(())
    }
}

/// Deduplicates ids preserving first-seen order.
fn dedupe_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
