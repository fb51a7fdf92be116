//! Generator module - writes view-models for every page of the site
//!
//! Output under the public directory:
//! - `projects.json`: the projects listing
//! - `<slug>/index.json`: one post view-model per content record
//! - content assets (images, etc.) copied next to their documents

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::ContentStore;
use crate::view::{PostRenderer, ProjectListBuilder};
use crate::Folio;

/// Listing file name
pub const PROJECTS_FILE: &str = "projects.json";
/// Per-page file name
pub const PAGE_FILE: &str = "index.json";

/// Outcome of one generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages written
    pub pages: usize,
    /// Slugs whose page failed to generate
    pub failed: Vec<String>,
    /// Entries in the projects listing
    pub projects: usize,
    /// Assets copied
    pub assets: usize,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes the site's view-models from a content store
pub struct Generator<'a> {
    folio: &'a Folio,
    store: &'a ContentStore,
}

impl<'a> Generator<'a> {
    pub fn new(folio: &'a Folio, store: &'a ContentStore) -> Self {
        Self { folio, store }
    }

    /// Generate the entire site.
    ///
    /// A page that fails is logged and counted; the remaining pages still build.
    pub fn generate(&self) -> Result<BuildReport> {
        fs::create_dir_all(&self.folio.public_dir).with_context(|| {
            format!("Failed to create public dir {:?}", self.folio.public_dir)
        })?;

        let mut report = BuildReport {
            assets: self.copy_content_assets()?,
            ..Default::default()
        };

        report.projects = self.generate_projects()?;

        let slugs: Vec<String> = self.store.iter().map(|r| r.slug.clone()).collect();
        for slug in slugs {
            match self.generate_post_page(&slug) {
                Ok(()) => report.pages += 1,
                Err(e) => {
                    tracing::error!("Failed to generate {}: {:#}", slug, e);
                    report.failed.push(slug);
                }
            }
        }

        Ok(report)
    }

    /// Write the projects listing
    fn generate_projects(&self) -> Result<usize> {
        let projects = ProjectListBuilder::new(self.store, &self.folio.config).build();
        let output_path = self.folio.public_dir.join(PROJECTS_FILE);
        write_json(&output_path, &projects)?;
        tracing::info!("Generated {} with {} projects", PROJECTS_FILE, projects.len());
        Ok(projects.len())
    }

    /// Write one post page
    pub fn generate_post_page(&self, slug: &str) -> Result<()> {
        let view = PostRenderer::new(self.store, &self.folio.config).render(slug)?;

        // Strip leading slash from the slug to stay inside the public dir
        let clean_path = slug.trim_matches('/');
        let output_path = self.folio.public_dir.join(clean_path).join(PAGE_FILE);
        write_json(&output_path, &view)?;
        tracing::debug!("Generated page: {:?}", output_path);
        Ok(())
    }

    /// Copy non-markdown files from the content directory
    fn copy_content_assets(&self) -> Result<usize> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
