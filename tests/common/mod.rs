#![allow(dead_code)]

use portfolio_cms::application::dispatch::Dispatcher;
use portfolio_cms::application::services::{CategoryService, ContentService, TagService};
use portfolio_cms::config::Config;
use portfolio_cms::domain::entities::{NewCategory, NewContentItem};
use portfolio_cms::infrastructure::persistence::{
    MemCategoryRepository, MemContentRepository, MemTagRepository,
};
use std::sync::Arc;

pub type Categories = CategoryService<MemCategoryRepository, MemContentRepository>;
pub type Content = ContentService<MemContentRepository, MemCategoryRepository, MemTagRepository>;
pub type Tags = TagService<MemTagRepository>;
pub type Dispatch = Dispatcher<MemCategoryRepository, MemContentRepository, MemTagRepository>;

/// Full service stack wired over fresh in-memory repositories.
pub struct TestStack {
    pub categories: Arc<Categories>,
    pub content: Arc<Content>,
    pub tags: Arc<Tags>,
    pub dispatcher: Dispatch,
}

/// Installs a compact subscriber once so `RUST_LOG=debug cargo test` shows
/// service logging.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn stack() -> TestStack {
    stack_with(Config::default())
}

pub fn stack_with(config: Config) -> TestStack {
    init_tracing();

    let category_repo = Arc::new(MemCategoryRepository::new());
    let content_repo = Arc::new(MemContentRepository::new());
    let tag_repo = Arc::new(MemTagRepository::new());

    let categories = Arc::new(CategoryService::new(
        category_repo.clone(),
        content_repo.clone(),
        config.clone(),
    ));
    let content = Arc::new(ContentService::new(
        content_repo,
        category_repo,
        tag_repo.clone(),
        config.clone(),
    ));
    let tags = Arc::new(TagService::new(tag_repo, config));

    let dispatcher = Dispatcher::new(categories.clone(), content.clone(), tags.clone());

    TestStack {
        categories,
        content,
        tags,
        dispatcher,
    }
}

pub fn new_category(name: &str, slug: Option<&str>, parent_id: Option<i64>) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        slug: slug.map(str::to_string),
        parent_id,
    }
}

pub fn new_article(title: &str, body: Option<&str>) -> NewContentItem {
    NewContentItem {
        kind: portfolio_cms::domain::entities::ContentKind::Article,
        title: title.to_string(),
        slug: None,
        body: body.map(str::to_string),
        category_id: None,
        tag_ids: vec![],
        asset_ref: None,
    }
}
