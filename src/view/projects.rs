//! Projects listing view-models

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{ContentRecord, ContentStore};

/// Fixed size of the repository badge frame
pub const BADGE_WIDTH: u32 = 170;
pub const BADGE_HEIGHT: u32 = 20;

/// Marker for previews that embed an interactive demo
const LIVE_DEMO_HOST: &str = "codepen";

/// Where a link opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    SameContext,
    NewContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub target: LinkTarget,
}

impl Link {
    pub fn external(href: &str) -> Self {
        Self {
            href: href.to_string(),
            target: LinkTarget::NewContext,
        }
    }
}

/// A borderless, non-scrolling embedded frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFrame {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub border: u32,
    pub scrolling: bool,
}

impl EmbedFrame {
    pub fn badge(src: &str) -> Self {
        Self {
            src: src.to_string(),
            width: BADGE_WIDTH,
            height: BADGE_HEIGHT,
            border: 0,
            scrolling: false,
        }
    }
}

/// The preview frame next to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub src: String,
    /// Embedded interactive demo rather than a screenshot-backed frame
    pub live_demo: bool,
}

/// One entry of the projects listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectViewModel {
    pub title: String,
    pub description: Option<String>,
    /// Relative route of the project's own page
    pub learn_more_link: String,
    pub demo_link: Option<Link>,
    pub source_link: Option<Link>,
    pub badge: Option<EmbedFrame>,
    pub preview: Option<Preview>,
    pub preview_is_live_demo: bool,
    pub tag_icons: Vec<String>,
}

/// Builds the projects listing from the project partition of a store
pub struct ProjectListBuilder<'a> {
    store: &'a ContentStore,
    config: &'a SiteConfig,
}

impl<'a> ProjectListBuilder<'a> {
    pub fn new(store: &'a ContentStore, config: &'a SiteConfig) -> Self {
        Self { store, config }
    }

    /// One view-model per project record, in store order
    pub fn build(&self) -> Vec<ProjectViewModel> {
        self.store
            .list_by_type(&self.config.project_type)
            .map(|record| self.project(record))
            .collect()
    }

    fn project(&self, record: &ContentRecord) -> ProjectViewModel {
        let fm = &record.front_matter;

        let preview = fm.iframe.as_deref().map(|src| Preview {
            src: src.to_string(),
            live_demo: is_live_demo(src),
        });

        if fm.excerpt.is_none() {
            tracing::debug!("Project {} has no excerpt; description omitted", record.id);
        }

        ProjectViewModel {
            title: record.title().to_string(),
            description: fm.excerpt.clone(),
            learn_more_link: record.slug.clone(),
            demo_link: fm.demo.as_deref().map(Link::external),
            source_link: fm.src.as_deref().map(Link::external),
            badge: fm.badge_url.as_deref().map(EmbedFrame::badge),
            preview_is_live_demo: preview.as_ref().is_some_and(|p| p.live_demo),
            preview,
            tag_icons: fm.icons_or(&self.config.default_tag_icons).to_vec(),
        }
    }
}

/// Case-sensitive substring test on the preview URL
pub fn is_live_demo(iframe: &str) -> bool {
    iframe.contains(LIVE_DEMO_HOST)
}
