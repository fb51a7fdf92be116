//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::PostType;

/// Repository path the "edit this post" links point into
pub const DEFAULT_EDIT_SOURCE_BASE: &str =
    "https://github.com/ahmedbesbes/gatsby-blog/blob/master/content";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    /// Base URL prepended to route slugs for canonical links
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Listing
    /// Post type rendered on the projects listing
    pub project_type: PostType,
    /// Icons shown for a project whose front-matter names none
    pub default_tag_icons: Vec<String>,

    // Post page
    /// Prefix for edit links; the post's `folder` and `/index.md` are appended
    pub edit_source_base: String,
    /// Comment widget site name
    pub discussion_shortname: String,
    /// chrono format for post dates
    pub date_format: String,

    // Ingestion
    pub words_per_minute: usize,
    pub excerpt_length: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://example.com".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            project_type: PostType::CaseStudies,
            default_tag_icons: vec!["python".to_string()],

            edit_source_base: DEFAULT_EDIT_SOURCE_BASE.to_string(),
            discussion_shortname: String::new(),
            date_format: "%B %d, %Y".to_string(),

            words_per_minute: 265,
            excerpt_length: 140,
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.project_type, PostType::CaseStudies);
        assert_eq!(config.default_tag_icons, vec!["python"]);
        assert_eq!(config.words_per_minute, 265);
        assert_eq!(config.edit_source_base, DEFAULT_EDIT_SOURCE_BASE);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
url: https://example.dev/
project_type: projects
edit_source_base: https://github.com/me/site/blob/main/content
discussion_shortname: my-site
default_tag_icons: [rust, wasm]
highlight:
  line_number: false
analytics_id: UA-1
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.base_url(), "https://example.dev");
        assert_eq!(config.project_type, PostType::Other("projects".to_string()));
        assert_eq!(config.discussion_shortname, "my-site");
        assert_eq!(config.default_tag_icons, vec!["rust", "wasm"]);
        assert!(!config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.content_dir, "content");
        assert!(config.extra.contains_key("analytics_id"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: On Disk\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "On Disk");
        assert!(SiteConfig::load(dir.path().join("missing.yml")).is_err());
    }
}
