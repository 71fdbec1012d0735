//! Domain policy configuration loaded from environment variables.
//!
//! Depth ceiling, default deletion policy, and identifier length bounds are
//! deployment policy rather than code, so they load from the environment
//! once at startup and are handed to the services.
//!
//! ## Variables
//!
//! - `CMS_MAX_TREE_DEPTH` - Maximum category nesting depth (default: 10)
//! - `CMS_DEFAULT_DELETE_POLICY` - `block`, `reassign`, or `cascade`
//!   (default: `block`)
//! - `CMS_MAX_SLUG_LENGTH` - Maximum slug length (default: 64)
//! - `CMS_MAX_TAG_LENGTH` - Maximum normalized tag label length (default: 64)
//! - `CMS_DEFAULT_PAGE_SIZE` - Listing page size when unspecified (default: 20)
//! - `CMS_MAX_PAGE_SIZE` - Hard cap on listing page size (default: 100)

use crate::domain::entities::DeletePolicy;
use anyhow::Result;
use std::env;

/// Policy knobs consumed by the domain services.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum depth of the category forest; a root sits at depth 1.
    pub max_tree_depth: usize,
    /// Deletion policy applied when the caller does not pick one.
    pub default_delete_policy: DeletePolicy,
    /// Maximum slug length for categories and content items.
    pub max_slug_length: usize,
    /// Maximum length of a normalized tag label.
    pub max_tag_length: usize,
    /// Page size used by listings when the caller passes none.
    pub default_page_size: i64,
    /// Upper bound on caller-supplied page sizes.
    pub max_page_size: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tree_depth: 10,
            default_delete_policy: DeletePolicy::BlockIfHasChildren,
            max_slug_length: 64,
            max_tag_length: 64,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    ///
    /// # Errors
    ///
    /// Returns an error if `CMS_DEFAULT_DELETE_POLICY` is set to an unknown
    /// policy name.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let max_tree_depth = env::var("CMS_MAX_TREE_DEPTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_tree_depth);

        let default_delete_policy = match env::var("CMS_DEFAULT_DELETE_POLICY") {
            Ok(raw) => match raw.parse() {
                Ok(policy) => policy,
                Err(reason) => {
                    anyhow::bail!("Invalid CMS_DEFAULT_DELETE_POLICY '{raw}': {reason}")
                }
            },
            Err(_) => defaults.default_delete_policy,
        };

        let max_slug_length = env::var("CMS_MAX_SLUG_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_slug_length);

        let max_tag_length = env::var("CMS_MAX_TAG_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_tag_length);

        let default_page_size = env::var("CMS_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_page_size);

        let max_page_size = env::var("CMS_MAX_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_page_size);

        Ok(Self {
            max_tree_depth,
            default_delete_policy,
            max_slug_length,
            max_tag_length,
            default_page_size,
            max_page_size,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any bound is zero or outside its sane range.
    pub fn validate(&self) -> Result<()> {
        if self.max_tree_depth == 0 || self.max_tree_depth > 64 {
            anyhow::bail!(
                "CMS_MAX_TREE_DEPTH must be between 1 and 64, got {}",
                self.max_tree_depth
            );
        }

        if self.max_slug_length < 8 || self.max_slug_length > 255 {
            anyhow::bail!(
                "CMS_MAX_SLUG_LENGTH must be between 8 and 255, got {}",
                self.max_slug_length
            );
        }

        if self.max_tag_length == 0 || self.max_tag_length > 255 {
            anyhow::bail!(
                "CMS_MAX_TAG_LENGTH must be between 1 and 255, got {}",
                self.max_tag_length
            );
        }

        if self.default_page_size < 1 {
            anyhow::bail!(
                "CMS_DEFAULT_PAGE_SIZE must be at least 1, got {}",
                self.default_page_size
            );
        }

        if self.max_page_size < self.default_page_size {
            anyhow::bail!(
                "CMS_MAX_PAGE_SIZE must be >= CMS_DEFAULT_PAGE_SIZE, got {} < {}",
                self.max_page_size,
                self.default_page_size
            );
        }

        Ok(())
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
