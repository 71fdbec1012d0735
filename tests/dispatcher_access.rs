mod common;

use portfolio_cms::application::dispatch::{
    ArchiveItem, CreateCategory, CreateItem, ListAncestors, ListTags, PublishItem, ResolveTag,
};
use portfolio_cms::domain::access::Role;
use portfolio_cms::error::AppError;

#[tokio::test]
async fn test_user_cannot_mutate() {
    let stack = common::stack();

    let denied = stack
        .dispatcher
        .dispatch(
            Role::User,
            CreateCategory(common::new_category("Engineering", None, None)),
        )
        .await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden { .. }));

    let denied = stack
        .dispatcher
        .dispatch(
            Role::User,
            ResolveTag {
                label: "rust".to_string(),
            },
        )
        .await;
    assert!(matches!(denied.unwrap_err(), AppError::Forbidden { .. }));

    // Denial happens before the handler runs; nothing was created.
    let tags = stack
        .dispatcher
        .dispatch(Role::User, ListTags)
        .await
        .unwrap();
    assert!(tags.is_empty());
}

#[tokio::test]
async fn test_user_can_read() {
    let stack = common::stack();

    let category = stack
        .dispatcher
        .dispatch(
            Role::Admin,
            CreateCategory(common::new_category("Engineering", None, None)),
        )
        .await
        .unwrap();

    let ancestors = stack
        .dispatcher
        .dispatch(
            Role::User,
            ListAncestors {
                node_id: category.id,
            },
        )
        .await
        .unwrap();
    assert!(ancestors.is_empty());
}

#[tokio::test]
async fn test_admin_full_lifecycle_through_dispatcher() {
    let stack = common::stack();

    let article = stack
        .dispatcher
        .dispatch(
            Role::Admin,
            CreateItem(common::new_article("Why Rust", Some("Because."))),
        )
        .await
        .unwrap();

    let published = stack
        .dispatcher
        .dispatch(Role::Admin, PublishItem { id: article.id })
        .await
        .unwrap();
    assert!(published.is_published());

    let archived = stack
        .dispatcher
        .dispatch(Role::Admin, ArchiveItem { id: article.id })
        .await
        .unwrap();
    assert!(archived.is_archived());
}

#[tokio::test]
async fn test_domain_errors_pass_through_dispatcher() {
    let stack = common::stack();

    let result = stack
        .dispatcher
        .dispatch(Role::Admin, PublishItem { id: 404 })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
}
