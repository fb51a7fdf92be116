//! folio: content core for a static portfolio and blog
//!
//! Markdown content is ingested into an immutable [`content::ContentStore`].
//! Two builders read the store: [`view::ProjectListBuilder`] produces the
//! projects listing and [`view::PostRenderer`] produces single post pages.
//! The generator serializes their view-models for the page shell to lay out.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (markdown) directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Open a site directory, using default configuration when it has none
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Ingest the content directory into a store
    pub fn load_store(&self) -> Result<content::ContentStore> {
        content::loader::ContentLoader::new(self).load_store()
    }

    /// Generate the site data
    pub fn generate(&self) -> Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
