//! Business logic services for the application layer.

pub mod category_service;
pub mod content_service;
pub mod tag_service;

pub use category_service::CategoryService;
pub use content_service::ContentService;
pub use tag_service::TagService;
