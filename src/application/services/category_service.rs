//! Category forest maintenance service.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::entities::{Category, CategoryRecord, DeletePolicy, NewCategory};
use crate::domain::repositories::{CategoryRepository, ContentRepository};
use crate::error::{map_validation_errors, AppError};
use crate::utils::slug::{slugify, validate_slug};
use serde_json::json;
use tokio::sync::Mutex;
use validator::Validate;

/// Service maintaining a consistent forest of categories.
///
/// Owns every structural invariant: global slug uniqueness, cycle
/// prevention, the depth ceiling, and deletion policies. Structural
/// mutations (create/move/delete) are serialized through an internal writer
/// lock so each invariant check and the mutation it guards run against the
/// same snapshot; ancestry and subtree reads take no lock.
///
/// Content items referencing a deleted category are re-pointed through the
/// [`ContentRepository`], never deleted.
pub struct CategoryService<C: CategoryRepository, I: ContentRepository> {
    categories: Arc<C>,
    content: Arc<I>,
    config: Config,
    tree_lock: Mutex<()>,
}

impl<C: CategoryRepository, I: ContentRepository> CategoryService<C, I> {
    /// Creates a new category service.
    pub fn new(categories: Arc<C>, content: Arc<I>, config: Config) -> Self {
        Self {
            categories,
            content,
            config,
            tree_lock: Mutex::new(()),
        }
    }

    /// Creates a category, optionally under an existing parent.
    ///
    /// The slug defaults to a slugified `name` when not supplied and must be
    /// unique across the whole forest, not just among siblings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad payload or underivable
    /// slug, [`AppError::NotFound`] if the parent is missing,
    /// [`AppError::InvalidOperation`] if the depth ceiling is exceeded, and
    /// [`AppError::Conflict`] on a slug collision.
    pub async fn create(&self, payload: NewCategory) -> Result<Category, AppError> {
        payload.validate().map_err(map_validation_errors)?;

        let slug = match payload.slug {
            Some(slug) => slug,
            None => slugify(&payload.name).ok_or_else(|| {
                AppError::validation(
                    "Cannot derive a slug from this name",
                    json!({ "name": payload.name }),
                )
            })?,
        };
        validate_slug(&slug, self.config.max_slug_length)?;

        let _guard = self.tree_lock.lock().await;

        if let Some(parent_id) = payload.parent_id {
            let parent = self.require(parent_id).await?;
            let parent_depth = self.depth_of(&parent).await?;
            if parent_depth + 1 > self.config.max_tree_depth {
                return Err(AppError::invalid_operation(
                    "Category tree depth limit exceeded",
                    json!({
                        "parent_id": parent_id,
                        "max_depth": self.config.max_tree_depth,
                    }),
                ));
            }
        }

        if self.categories.slug_exists(&slug).await? {
            return Err(AppError::conflict(
                "Category slug already in use",
                json!({ "slug": slug }),
            ));
        }

        let created = self
            .categories
            .insert(CategoryRecord {
                name: payload.name,
                slug,
                parent_id: payload.parent_id,
            })
            .await?;

        tracing::info!(id = created.id, slug = %created.slug, "category created");
        Ok(created)
    }

    /// Moves a node under a new parent, or to the roots when `new_parent_id`
    /// is `None`.
    ///
    /// Cycle prevention walks ancestors from the proposed parent up to its
    /// root and rejects the move if the node itself is encountered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if node or parent is missing and
    /// [`AppError::InvalidOperation`] for a self-parent, a move under a
    /// descendant, or a depth overflow.
    pub async fn move_node(
        &self,
        node_id: i64,
        new_parent_id: Option<i64>,
    ) -> Result<Category, AppError> {
        let _guard = self.tree_lock.lock().await;

        self.require(node_id).await?;
        let subtree_height = self.subtree_height(node_id).await?;

        if let Some(parent_id) = new_parent_id {
            if parent_id == node_id {
                return Err(AppError::invalid_operation(
                    "Category cannot be its own parent",
                    json!({ "id": node_id }),
                ));
            }

            let parent = self.require(parent_id).await?;

            let mut cursor = Some(parent.clone());
            while let Some(current) = cursor {
                if current.id == node_id {
                    return Err(AppError::invalid_operation(
                        "Cannot move a category under its own descendant",
                        json!({ "id": node_id, "new_parent_id": parent_id }),
                    ));
                }
                cursor = match current.parent_id {
                    Some(pid) => self.categories.find(pid).await?,
                    None => None,
                };
            }

            let parent_depth = self.depth_of(&parent).await?;
            if parent_depth + subtree_height > self.config.max_tree_depth {
                return Err(AppError::invalid_operation(
                    "Category tree depth limit exceeded",
                    json!({
                        "id": node_id,
                        "new_parent_id": parent_id,
                        "max_depth": self.config.max_tree_depth,
                    }),
                ));
            }
        }

        let moved = self.categories.set_parent(node_id, new_parent_id).await?;
        tracing::info!(
            id = node_id,
            parent = ?new_parent_id,
            "category moved"
        );
        Ok(moved)
    }

    /// Deletes a node, applying `policy` (or the configured default) to its
    /// children. Returns the ids of every removed category.
    ///
    /// Items referencing removed categories are re-pointed to the deleted
    /// node's parent under [`DeletePolicy::ReassignChildrenToParent`] and
    /// detached otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the node is missing and
    /// [`AppError::Conflict`] when [`DeletePolicy::BlockIfHasChildren`]
    /// finds children.
    pub async fn delete(
        &self,
        node_id: i64,
        policy: Option<DeletePolicy>,
    ) -> Result<Vec<i64>, AppError> {
        let policy = policy.unwrap_or(self.config.default_delete_policy);
        let _guard = self.tree_lock.lock().await;

        let node = self.require(node_id).await?;
        let children = self.categories.children_of(node_id).await?;

        let removed = match policy {
            DeletePolicy::BlockIfHasChildren => {
                if !children.is_empty() {
                    return Err(AppError::conflict(
                        "Category has children and the policy blocks deletion",
                        json!({ "id": node_id, "child_count": children.len() }),
                    ));
                }
                self.categories.remove(node_id).await?;
                self.content.reassign_category(node_id, None).await?;
                vec![node_id]
            }
            DeletePolicy::ReassignChildrenToParent => {
                for child in &children {
                    self.categories.set_parent(child.id, node.parent_id).await?;
                }
                self.categories.remove(node_id).await?;
                self.content
                    .reassign_category(node_id, node.parent_id)
                    .await?;
                vec![node_id]
            }
            DeletePolicy::CascadeDelete => {
                let mut subtree = vec![node_id];
                let mut queue: Vec<i64> = children.iter().map(|c| c.id).collect();
                while let Some(id) = queue.pop() {
                    subtree.push(id);
                    for child in self.categories.children_of(id).await? {
                        queue.push(child.id);
                    }
                }
                for &id in subtree.iter().rev() {
                    self.categories.remove(id).await?;
                    self.content.reassign_category(id, None).await?;
                }
                subtree
            }
        };

        tracing::info!(
            id = node_id,
            policy = ?policy,
            removed = removed.len(),
            "category deleted"
        );
        Ok(removed)
    }

    /// Returns the strict ancestors of a node, nearest parent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the node does not exist.
    pub async fn ancestors_of(&self, node_id: i64) -> Result<Vec<Category>, AppError> {
        let node = self.require(node_id).await?;
        self.collect_ancestors(&node).await
    }

    /// Returns the strict descendants of a node in depth-first preorder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the node does not exist.
    pub async fn descendants_of(&self, node_id: i64) -> Result<Vec<Category>, AppError> {
        self.require(node_id).await?;

        let mut result = Vec::new();
        let mut stack = self.categories.children_of(node_id).await?;
        stack.reverse();
        while let Some(category) = stack.pop() {
            let mut children = self.categories.children_of(category.id).await?;
            children.reverse();
            result.push(category);
            stack.extend(children);
        }
        Ok(result)
    }

    async fn require(&self, id: i64) -> Result<Category, AppError> {
        self.categories.find(id).await?.ok_or_else(|| {
            AppError::not_found("Category not found", json!({ "id": id }))
        })
    }

    async fn collect_ancestors(&self, node: &Category) -> Result<Vec<Category>, AppError> {
        let mut ancestors = Vec::new();
        let mut cursor = node.parent_id;
        while let Some(pid) = cursor {
            let parent = self.categories.find(pid).await?.ok_or_else(|| {
                AppError::internal(
                    "Dangling parent reference",
                    json!({ "child": node.id, "parent_id": pid }),
                )
            })?;
            cursor = parent.parent_id;
            ancestors.push(parent);
            if ancestors.len() > self.config.max_tree_depth {
                return Err(AppError::internal(
                    "Ancestor walk exceeded the depth limit",
                    json!({ "id": node.id }),
                ));
            }
        }
        Ok(ancestors)
    }

    /// Depth of a node counted from its root; a root sits at depth 1.
    async fn depth_of(&self, node: &Category) -> Result<usize, AppError> {
        Ok(self.collect_ancestors(node).await?.len() + 1)
    }

    /// Height of the subtree rooted at `node_id`; a leaf has height 1.
    async fn subtree_height(&self, node_id: i64) -> Result<usize, AppError> {
        let mut height = 1;
        let mut frontier = vec![(node_id, 1usize)];
        while let Some((id, level)) = frontier.pop() {
            for child in self.categories.children_of(id).await? {
                height = height.max(level + 1);
                frontier.push((child.id, level + 1));
            }
        }
        Ok(height)
    }
}
