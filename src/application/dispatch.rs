//! Command dispatch decoupling operations from their invocation.
//!
//! Each operation of the domain is a small command struct declaring its
//! output type and the capability it requires. [`Dispatcher`] is a plain
//! command-to-handler mapping: it authorizes the caller's role, then routes
//! the command to the owning service. No framework pipeline is involved;
//! the consuming presentation layer constructs commands and calls
//! [`Dispatcher::dispatch`] with the pre-authenticated role.

use std::sync::Arc;

use crate::domain::access::{Capability, Role};
use crate::domain::entities::{
    Category, ContentItem, ContentKind, ContentPatch, DeletePolicy, NewCategory, NewContentItem,
    Tag,
};
use crate::domain::repositories::{CategoryRepository, ContentRepository, TagRepository};
use crate::error::AppError;
use async_trait::async_trait;

use super::services::{CategoryService, ContentService, TagService};

/// A dispatchable operation.
pub trait Command: Send {
    /// What a successful dispatch returns.
    type Output: Send;
    /// Capability the caller's role must grant.
    const CAPABILITY: Capability;
    /// Stable name used in logs.
    const NAME: &'static str;
}

/// Handles one command type.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Output, AppError>;
}

/// Routes commands to the owning service after a role check.
pub struct Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    categories: Arc<CategoryService<C, I>>,
    content: Arc<ContentService<I, C, T>>,
    tags: Arc<TagService<T>>,
}

impl<C, I, T> Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    /// Creates a new dispatcher over the three services.
    pub fn new(
        categories: Arc<CategoryService<C, I>>,
        content: Arc<ContentService<I, C, T>>,
        tags: Arc<TagService<T>>,
    ) -> Self {
        Self {
            categories,
            content,
            tags,
        }
    }

    /// Authorizes `role` for the command's capability, then executes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] when the role lacks the capability;
    /// otherwise whatever the underlying operation returns.
    pub async fn dispatch<Cmd>(&self, role: Role, command: Cmd) -> Result<Cmd::Output, AppError>
    where
        Cmd: Command,
        Self: CommandHandler<Cmd>,
    {
        role.authorize(Cmd::CAPABILITY)?;
        tracing::debug!(command = Cmd::NAME, role = ?role, "dispatching command");
        self.handle(command).await
    }
}

// ── Category commands ───────────────────────────────────────────────────

/// Creates a category.
pub struct CreateCategory(pub NewCategory);

impl Command for CreateCategory {
    type Output = Category;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "create_category";
}

/// Re-parents a category; `None` makes it a root.
pub struct MoveCategory {
    pub node_id: i64,
    pub new_parent_id: Option<i64>,
}

impl Command for MoveCategory {
    type Output = Category;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "move_category";
}

/// Deletes a category under a child policy.
pub struct DeleteCategory {
    pub node_id: i64,
    pub policy: Option<DeletePolicy>,
}

impl Command for DeleteCategory {
    type Output = Vec<i64>;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "delete_category";
}

/// Lists a category's strict ancestors, nearest first.
pub struct ListAncestors {
    pub node_id: i64,
}

impl Command for ListAncestors {
    type Output = Vec<Category>;
    const CAPABILITY: Capability = Capability::Read;
    const NAME: &'static str = "list_ancestors";
}

/// Lists a category's strict descendants in depth-first preorder.
pub struct ListDescendants {
    pub node_id: i64,
}

impl Command for ListDescendants {
    type Output = Vec<Category>;
    const CAPABILITY: Capability = Capability::Read;
    const NAME: &'static str = "list_descendants";
}

// ── Content commands ────────────────────────────────────────────────────

/// Creates a content item in draft state.
pub struct CreateItem(pub NewContentItem);

impl Command for CreateItem {
    type Output = ContentItem;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "create_item";
}

/// Partially updates a content item.
pub struct UpdateItem {
    pub id: i64,
    pub patch: ContentPatch,
}

impl Command for UpdateItem {
    type Output = ContentItem;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "update_item";
}

/// Publishes a draft.
pub struct PublishItem {
    pub id: i64,
}

impl Command for PublishItem {
    type Output = ContentItem;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "publish_item";
}

/// Returns a published item to draft.
pub struct UnpublishItem {
    pub id: i64,
}

impl Command for UnpublishItem {
    type Output = ContentItem;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "unpublish_item";
}

/// Archives an item; irreversible.
pub struct ArchiveItem {
    pub id: i64,
}

impl Command for ArchiveItem {
    type Output = ContentItem;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "archive_item";
}

/// Deletes a content item.
pub struct DeleteItem {
    pub id: i64,
}

impl Command for DeleteItem {
    type Output = ();
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "delete_item";
}

/// Fetches a content item by id.
pub struct GetItem {
    pub id: i64,
}

impl Command for GetItem {
    type Output = ContentItem;
    const CAPABILITY: Capability = Capability::Read;
    const NAME: &'static str = "get_item";
}

/// Lists content items of one kind with pagination.
pub struct ListItems {
    pub kind: ContentKind,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Command for ListItems {
    type Output = Vec<ContentItem>;
    const CAPABILITY: Capability = Capability::Read;
    const NAME: &'static str = "list_items";
}

// ── Tag commands ────────────────────────────────────────────────────────

/// Resolves a raw label to a tag, creating it on first use.
pub struct ResolveTag {
    pub label: String,
}

impl Command for ResolveTag {
    type Output = Tag;
    const CAPABILITY: Capability = Capability::Write;
    const NAME: &'static str = "resolve_tag";
}

/// Lists the tag vocabulary.
pub struct ListTags;

impl Command for ListTags {
    type Output = Vec<Tag>;
    const CAPABILITY: Capability = Capability::Read;
    const NAME: &'static str = "list_tags";
}

// ── Handler mapping ─────────────────────────────────────────────────────

#[async_trait]
impl<C, I, T> CommandHandler<CreateCategory> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: CreateCategory) -> Result<Category, AppError> {
        self.categories.create(command.0).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<MoveCategory> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: MoveCategory) -> Result<Category, AppError> {
        self.categories
            .move_node(command.node_id, command.new_parent_id)
            .await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<DeleteCategory> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: DeleteCategory) -> Result<Vec<i64>, AppError> {
        self.categories.delete(command.node_id, command.policy).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<ListAncestors> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: ListAncestors) -> Result<Vec<Category>, AppError> {
        self.categories.ancestors_of(command.node_id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<ListDescendants> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: ListDescendants) -> Result<Vec<Category>, AppError> {
        self.categories.descendants_of(command.node_id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<CreateItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: CreateItem) -> Result<ContentItem, AppError> {
        self.content.create(command.0).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<UpdateItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: UpdateItem) -> Result<ContentItem, AppError> {
        self.content.update(command.id, command.patch).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<PublishItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: PublishItem) -> Result<ContentItem, AppError> {
        self.content.publish(command.id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<UnpublishItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: UnpublishItem) -> Result<ContentItem, AppError> {
        self.content.unpublish(command.id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<ArchiveItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: ArchiveItem) -> Result<ContentItem, AppError> {
        self.content.archive(command.id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<DeleteItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: DeleteItem) -> Result<(), AppError> {
        self.content.delete(command.id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<GetItem> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: GetItem) -> Result<ContentItem, AppError> {
        self.content.get(command.id).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<ListItems> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: ListItems) -> Result<Vec<ContentItem>, AppError> {
        self.content
            .list(command.kind, command.page, command.page_size)
            .await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<ResolveTag> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, command: ResolveTag) -> Result<Tag, AppError> {
        self.tags.resolve(&command.label).await
    }
}

#[async_trait]
impl<C, I, T> CommandHandler<ListTags> for Dispatcher<C, I, T>
where
    C: CategoryRepository,
    I: ContentRepository,
    T: TagRepository,
{
    async fn handle(&self, _command: ListTags) -> Result<Vec<Tag>, AppError> {
        self.tags.list().await
    }
}
