//! Application state shared across handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use luxury_core::{Catalog, CatalogError};

use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};

/// Catalog fixture compiled into the binary.
pub const DEFAULT_CATALOG: &str = include_str!("../fixtures/catalog.json");

/// Error building the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("content error: {0}")]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is read-only
/// after startup; per-shopper state lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    content: ContentStore,
}

impl AppState {
    /// Create the application state, loading the catalog and content pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fixture cannot be read or is invalid,
    /// or if the content directory cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = load_catalog(config.catalog_path.as_deref())?;
        tracing::info!(
            products = catalog.len(),
            currency = catalog.currency().code(),
            "Catalog loaded"
        );
        let content = ContentStore::load(&config.content_dir)?;
        tracing::info!(pages = content.len(), "Content loaded");

        Ok(Self::from_parts(config, catalog, content))
    }

    /// Assemble the state from already-loaded parts.
    #[must_use]
    pub fn from_parts(config: StorefrontConfig, catalog: Catalog, content: ContentStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                content,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the content pages.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }
}

/// Load the catalog from `path`, or the built-in fixture when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the fixture is invalid.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, StateError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| StateError::CatalogIo {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Catalog::from_json(&json)?)
        }
        None => Ok(Catalog::from_json(DEFAULT_CATALOG)?),
    }
}
