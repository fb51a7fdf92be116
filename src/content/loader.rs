//! Content loader - ingests markdown documents into content records
//!
//! Layout under the content directory:
//!
//! ```text
//! content/
//!   case-studies/
//!     01-scraper/index.md     -> /case-studies/01-scraper/
//!   blog-post/
//!     hello-world.md          -> /blog-post/hello-world/
//! ```
//!
//! The first directory names the post type. A file's record id is its path
//! relative to the content directory.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

use super::{ContentError, ContentRecord, ContentStore, FrontMatter, MarkdownRenderer, PostType};
use crate::Folio;

lazy_static! {
    /// Leading position prefix of a folder or file name (`02-chatbot`)
    static ref ORDER_PREFIX: Regex = Regex::new(r"^(\d+)[-_.]").unwrap();
}

/// Loads content records from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::from_config(&folio.config);
        Self { folio, renderer }
    }

    /// Load every record and index them
    pub fn load_store(&self) -> Result<ContentStore> {
        let records = self.load_records()?;
        let count = records.len();
        let store = ContentStore::new(records).context("Content failed validation")?;
        tracing::info!("Loaded {} content records", count);
        Ok(store)
    }

    /// Load every markdown document below a post type directory.
    ///
    /// Documents that fail to read or parse are skipped with a warning.
    pub fn load_records(&self) -> Result<Vec<ContentRecord>> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_record(path) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {
                    tracing::debug!("Skipping {:?}: not inside a post type directory", path)
                }
                Err(e) => tracing::warn!("Failed to load {:?}: {:#}", path, e),
            }
        }

        Ok(records)
    }

    /// Load a single document; `None` when it sits outside any post type
    pub fn load_record(&self, path: &Path) -> Result<Option<ContentRecord>> {
        let relative = path
            .strip_prefix(&self.folio.content_dir)
            .unwrap_or(path);
        let Some(route) = Route::from_relative(relative) else {
            return Ok(None);
        };

        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        if fm.title.is_none() {
            return Err(ContentError::MissingField {
                id: route.id,
                field: "title",
            }
            .into());
        }

        let rendered = self.renderer.render_body(body)?;

        let order_index = fm
            .order
            .or_else(|| order_from_name(&route.name))
            .unwrap_or(0);

        let mut record = ContentRecord::new(route.id, route.post_type, route.slug);
        record.order_index = order_index;
        record.front_matter = fm;
        record.body = rendered.html;
        record.excerpt = rendered.excerpt;
        record.time_to_read = rendered.time_to_read;

        Ok(Some(record))
    }
}

/// Where a document lives on the site
#[derive(Debug, PartialEq, Eq)]
struct Route {
    id: String,
    post_type: PostType,
    slug: String,
    /// Folder name for `index.md`, file stem otherwise
    name: String,
}

impl Route {
    fn from_relative(relative: &Path) -> Option<Self> {
        let parts: Vec<&str> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();

        // post type directory plus the document itself
        if parts.len() < 2 {
            return None;
        }

        let (file, dirs) = parts.split_last()?;
        let stem = Path::new(file).file_stem()?.to_str()?;

        let mut segments: Vec<&str> = dirs.to_vec();
        if stem != "index" {
            segments.push(stem);
        } else if segments.len() < 2 {
            // `case-studies/index.md` is the listing itself, not an item
            return None;
        }

        let name = segments.last()?.to_string();
        Some(Self {
            id: parts.join("/"),
            post_type: PostType::from(parts[0]),
            slug: format!("/{}/", segments.join("/")),
            name,
        })
    }
}

/// Position prefix of a name, if any
fn order_from_name(name: &str) -> Option<i64> {
    ORDER_PREFIX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path().to_path_buf(), SiteConfig::default());
        (dir, folio)
    }

    #[test]
    fn test_route_for_folder_index() {
        let route = Route::from_relative(Path::new("case-studies/02-chatbot/index.md")).unwrap();
        assert_eq!(route.id, "case-studies/02-chatbot/index.md");
        assert_eq!(route.post_type, PostType::CaseStudies);
        assert_eq!(route.slug, "/case-studies/02-chatbot/");
        assert_eq!(route.name, "02-chatbot");
    }

    #[test]
    fn test_route_for_plain_file() {
        let route = Route::from_relative(Path::new("blog/hello-world.md")).unwrap();
        assert_eq!(route.post_type, PostType::BlogPost);
        assert_eq!(route.slug, "/blog/hello-world/");
    }

    #[test]
    fn test_route_outside_post_type() {
        assert_eq!(Route::from_relative(Path::new("about.md")), None);
        assert_eq!(Route::from_relative(Path::new("blog/index.md")), None);
    }

    #[test]
    fn test_order_from_name() {
        assert_eq!(order_from_name("02-chatbot"), Some(2));
        assert_eq!(order_from_name("10_scraper"), Some(10));
        assert_eq!(order_from_name("chatbot"), None);
        assert_eq!(order_from_name("2020"), None);
    }

    #[test]
    fn test_load_records() {
        let (dir, folio) = site();
        let content = dir.path().join("content");
        write(
            &content,
            "case-studies/01-chatbot/index.md",
            "---\ntitle: Chatbot\niframe: https://codepen.io/x\n---\n\nA chatbot.\n",
        );
        write(
            &content,
            "case-studies/scraper/index.md",
            "---\ntitle: Scraper\norder: 0\n---\n\nA scraper.\n",
        );
        write(&content, "case-studies/scraper/cover.png", "png");
        write(
            &content,
            "blog-post/hello.md",
            "---\ntitle: Hello\nfolder: /blog-post/hello\n---\n\nHello *there*.\n",
        );

        let store = ContentLoader::new(&folio).load_store().unwrap();
        assert_eq!(store.len(), 3);

        let projects: Vec<_> = store
            .list_by_type(&PostType::CaseStudies)
            .map(|r| r.title())
            .collect();
        assert_eq!(projects, vec!["Scraper", "Chatbot"]);

        let hello = store.get_by_slug("/blog-post/hello/").unwrap();
        assert_eq!(hello.id, "blog-post/hello.md");
        assert!(hello.body.contains("<em>there</em>"));
        assert_eq!(hello.excerpt, "Hello there.");
        assert_eq!(hello.time_to_read, 1);
    }

    #[test]
    fn test_missing_title_skips_document() {
        let (dir, folio) = site();
        let content = dir.path().join("content");
        write(&content, "blog-post/untitled.md", "---\nexcerpt: no title\n---\nBody\n");
        write(&content, "blog-post/titled.md", "---\ntitle: Titled\n---\nBody\n");

        let loader = ContentLoader::new(&folio);
        let err = loader
            .load_record(&content.join("blog-post/untitled.md"))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ContentError>(),
            Some(&ContentError::MissingField {
                id: "blog-post/untitled.md".to_string(),
                field: "title",
            })
        );

        let records = loader.load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Titled");
    }

    #[test]
    fn test_malformed_frontmatter_skips_document() {
        let (dir, folio) = site();
        let content = dir.path().join("content");
        write(&content, "blog-post/broken.md", "---\ntitle: [oops\n---\nBody\n");

        let records = ContentLoader::new(&folio).load_records().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_content_dir() {
        let (_dir, folio) = site();
        let store = ContentLoader::new(&folio).load_store().unwrap();
        assert!(store.is_empty());
    }
}
