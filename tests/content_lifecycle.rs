mod common;

use portfolio_cms::domain::entities::{
    ContentKind, ContentPatch, DeletePolicy, NewContentItem, PublicationState,
};
use portfolio_cms::error::AppError;

fn new_item(kind: ContentKind, title: &str) -> NewContentItem {
    NewContentItem {
        kind,
        title: title.to_string(),
        slug: None,
        body: None,
        category_id: None,
        tag_ids: vec![],
        asset_ref: None,
    }
}

#[tokio::test]
async fn test_article_draft_to_archived_scenario() {
    let stack = common::stack();

    // Draft article without a body cannot be published.
    let article = stack
        .content
        .create(common::new_article("Why Rust", None))
        .await
        .unwrap();
    assert!(article.is_draft());

    let publish = stack.content.publish(article.id).await;
    assert!(matches!(publish.unwrap_err(), AppError::Validation { .. }));

    // Fill in the body, publish, then archive.
    stack
        .content
        .update(
            article.id,
            ContentPatch {
                body: Some(Some("Fearless concurrency.".to_string())),
                ..ContentPatch::default()
            },
        )
        .await
        .unwrap();

    let published = stack.content.publish(article.id).await.unwrap();
    assert_eq!(published.state, PublicationState::Published);

    let archived = stack.content.archive(article.id).await.unwrap();
    assert_eq!(archived.state, PublicationState::Archived);

    // Archived is terminal.
    let republish = stack.content.publish(article.id).await;
    assert!(matches!(
        republish.unwrap_err(),
        AppError::InvalidOperation { .. }
    ));
}

#[tokio::test]
async fn test_unpublish_returns_to_draft() {
    let stack = common::stack();

    let article = stack
        .content
        .create(common::new_article("Why Rust", Some("Because.")))
        .await
        .unwrap();

    stack.content.publish(article.id).await.unwrap();
    let draft = stack.content.unpublish(article.id).await.unwrap();
    assert!(draft.is_draft());

    // And the cycle is allowed again.
    let published = stack.content.publish(article.id).await.unwrap();
    assert!(published.is_published());

    // Unpublishing a draft is illegal.
    stack.content.unpublish(article.id).await.unwrap();
    let again = stack.content.unpublish(article.id).await;
    assert!(matches!(
        again.unwrap_err(),
        AppError::InvalidOperation { .. }
    ));
}

#[tokio::test]
async fn test_certificate_requires_asset_reference() {
    let stack = common::stack();

    let certificate = stack
        .content
        .create(new_item(ContentKind::Certificate, "CKA"))
        .await
        .unwrap();

    let publish = stack.content.publish(certificate.id).await;
    assert!(matches!(publish.unwrap_err(), AppError::Validation { .. }));

    stack
        .content
        .update(
            certificate.id,
            ContentPatch {
                asset_ref: Some(Some("assets/certificates/cka.png".to_string())),
                ..ContentPatch::default()
            },
        )
        .await
        .unwrap();

    let published = stack.content.publish(certificate.id).await.unwrap();
    assert!(published.is_published());
}

#[tokio::test]
async fn test_project_publishes_with_title_and_slug_only() {
    let stack = common::stack();

    let project = stack
        .content
        .create(new_item(ContentKind::Project, "Crawler"))
        .await
        .unwrap();

    let published = stack.content.publish(project.id).await.unwrap();
    assert!(published.is_published());
}

#[tokio::test]
async fn test_slug_unique_per_kind_not_across_kinds() {
    let stack = common::stack();

    stack
        .content
        .create(new_item(ContentKind::Article, "Crawler"))
        .await
        .unwrap();

    // Same slug in a different kind is fine.
    let project = stack
        .content
        .create(new_item(ContentKind::Project, "Crawler"))
        .await
        .unwrap();
    assert_eq!(project.slug, "crawler");

    // Same slug in the same kind conflicts.
    let duplicate = stack
        .content
        .create(new_item(ContentKind::Article, "Crawler"))
        .await;
    assert!(matches!(duplicate.unwrap_err(), AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_update_slug_collision_within_kind() {
    let stack = common::stack();

    stack
        .content
        .create(new_item(ContentKind::Article, "First"))
        .await
        .unwrap();
    let second = stack
        .content
        .create(new_item(ContentKind::Article, "Second"))
        .await
        .unwrap();

    let result = stack
        .content
        .update(
            second.id,
            ContentPatch {
                slug: Some("first".to_string()),
                ..ContentPatch::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_create_with_missing_category_or_tags() {
    let stack = common::stack();

    let mut payload = new_item(ContentKind::Article, "Orphan");
    payload.category_id = Some(404);
    let result = stack.content.create(payload).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));

    let mut payload = new_item(ContentKind::Article, "Tagged");
    payload.tag_ids = vec![404];
    let result = stack.content.create(payload).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_category_delete_detaches_items() {
    let stack = common::stack();

    let category = stack
        .categories
        .create(common::new_category("Engineering", None, None))
        .await
        .unwrap();

    let mut payload = common::new_article("Why Rust", Some("Because."));
    payload.category_id = Some(category.id);
    let article = stack.content.create(payload).await.unwrap();

    stack
        .categories
        .delete(category.id, Some(DeletePolicy::BlockIfHasChildren))
        .await
        .unwrap();

    // The item survives with its reference cleared, so it still publishes.
    let reloaded = stack.content.get(article.id).await.unwrap();
    assert_eq!(reloaded.category_id, None);

    let published = stack.content.publish(article.id).await.unwrap();
    assert!(published.is_published());
}

#[tokio::test]
async fn test_items_follow_category_on_reassign_delete() {
    let stack = common::stack();

    let root = stack
        .categories
        .create(common::new_category("Root", None, None))
        .await
        .unwrap();
    let child = stack
        .categories
        .create(common::new_category("Child", None, Some(root.id)))
        .await
        .unwrap();

    let mut payload = common::new_article("Filed", Some("Body."));
    payload.category_id = Some(child.id);
    let article = stack.content.create(payload).await.unwrap();

    stack
        .categories
        .delete(child.id, Some(DeletePolicy::ReassignChildrenToParent))
        .await
        .unwrap();

    let reloaded = stack.content.get(article.id).await.unwrap();
    assert_eq!(reloaded.category_id, Some(root.id));
}

#[tokio::test]
async fn test_list_is_paginated_newest_first() {
    let stack = common::stack();

    for n in 1..=5 {
        stack
            .content
            .create(new_item(ContentKind::Project, &format!("Project {n}")))
            .await
            .unwrap();
    }

    let first_page = stack
        .content
        .list(ContentKind::Project, Some(1), Some(2))
        .await
        .unwrap();
    assert_eq!(first_page.len(), 2);

    let third_page = stack
        .content
        .list(ContentKind::Project, Some(3), Some(2))
        .await
        .unwrap();
    assert_eq!(third_page.len(), 1);

    assert_eq!(stack.content.count(ContentKind::Project).await.unwrap(), 5);
    assert_eq!(stack.content.count(ContentKind::Article).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_item() {
    let stack = common::stack();

    let article = stack
        .content
        .create(common::new_article("Ephemeral", None))
        .await
        .unwrap();

    stack.content.delete(article.id).await.unwrap();

    let result = stack.content.get(article.id).await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));

    let again = stack.content.delete(article.id).await;
    assert!(matches!(again.unwrap_err(), AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_get_by_slug() {
    let stack = common::stack();

    stack
        .content
        .create(common::new_article("Why Rust", Some("Because.")))
        .await
        .unwrap();

    let found = stack
        .content
        .get_by_slug(ContentKind::Article, "why-rust")
        .await
        .unwrap();
    assert_eq!(found.title, "Why Rust");

    let missing = stack
        .content
        .get_by_slug(ContentKind::Project, "why-rust")
        .await;
    assert!(matches!(missing.unwrap_err(), AppError::NotFound { .. }));
}
