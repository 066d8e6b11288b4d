//! Markdown-based content pages (about, news, delivery, contacts, FAQ).
//!
//! Pages are loaded from `<content_dir>/pages/*.md` at startup, their YAML
//! front matter parsed, and the markdown rendered to HTML once. The file stem
//! is the page slug.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;

/// Front matter of a content page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// A rendered page with metadata and HTML content
#[derive(Debug, Clone)]
pub struct ContentPage {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// Content store that holds all loaded pages in memory
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pages: Arc<HashMap<String, ContentPage>>,
}

impl ContentStore {
    /// Load all pages from `content_dir/pages`.
    ///
    /// A missing directory yields an empty store; a page that fails to parse
    /// is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages directory exists but cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let dir = content_dir.join("pages");
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(Self::default());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_page(&path) {
                    Ok(page) => {
                        tracing::info!("Loaded page: {}", page.slug);
                        pages.insert(page.slug.clone(), page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Load a single page from a markdown file
    fn load_page(path: &Path) -> Result<ContentPage, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        let matter = Matter::<YAML>::new();
        let parsed: ParsedEntity<PageMeta> = matter
            .parse(&content)
            .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
        let meta = parsed
            .data
            .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

        let content_html = render_markdown(&parsed.content);

        Ok(ContentPage {
            slug,
            meta,
            content_html,
        })
    }

    /// Get a page by slug
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&ContentPage> {
        self.pages.get(slug)
    }

    /// Number of loaded pages
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.header_ids = Some(String::new());

    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn content_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
    }

    #[test]
    fn test_loads_menu_pages() {
        let store = ContentStore::load(&content_dir()).unwrap();
        for slug in ["about", "news", "delivery", "contacts", "faq"] {
            let page = store.get_page(slug).unwrap();
            assert_eq!(page.slug, slug);
            assert!(!page.meta.title.is_empty());
            assert!(!page.content_html.is_empty());
        }
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let store = ContentStore::load(Path::new("/nonexistent/luxury-content")).unwrap();
        assert!(store.is_empty());
        assert!(store.get_page("about").is_none());
    }

    #[test]
    fn test_render_markdown() {
        let html = render_markdown("**Free** delivery over ~~100 000~~ 50 000 ₽");
        assert!(html.contains("<strong>Free</strong>"));
        assert!(html.contains("<del>100 000</del>"));
    }

    #[test]
    fn test_raw_html_is_not_rendered() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
