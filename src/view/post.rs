//! Single post page view-model

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentRecord, ContentStore};
use crate::helpers::{date_xml, edit_source_url, format_date, full_url, resolve_asset};

/// Handed to the social sharing widget as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialShareConfig {
    pub base_url: String,
    pub title: String,
}

/// Handed to the comment widget as-is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscussionConfig {
    pub shortname: String,
    pub identifier: String,
    pub title: String,
    pub url: String,
}

/// Metadata the page shell turns into head tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub image: Option<String>,
    pub is_blog_post: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostViewModel {
    pub title: String,
    /// Display date
    pub date: Option<String>,
    /// ISO 8601 date
    pub date_iso: Option<String>,
    pub time_to_read: u32,
    pub excerpt: String,
    pub body_html: String,
    pub canonical_url: String,
    pub edit_source_url: Option<String>,
    pub og_image_path: Option<String>,
    pub social_share: SocialShareConfig,
    pub discussion: DiscussionConfig,
    pub seo: SeoMeta,
}

/// Assembles post page view-models from a store
pub struct PostRenderer<'a> {
    store: &'a ContentStore,
    config: &'a SiteConfig,
}

impl<'a> PostRenderer<'a> {
    pub fn new(store: &'a ContentStore, config: &'a SiteConfig) -> Self {
        Self { store, config }
    }

    /// Render the post at `slug`, served at the same route
    pub fn render(&self, slug: &str) -> Result<PostViewModel, ContentError> {
        self.render_route(slug, slug)
    }

    /// Render the post at `slug`, served at `route_slug`
    pub fn render_route(&self, slug: &str, route_slug: &str) -> Result<PostViewModel, ContentError> {
        let record = self.store.get_by_slug(slug)?;
        Ok(self.view_model(record, route_slug))
    }

    fn view_model(&self, record: &ContentRecord, route_slug: &str) -> PostViewModel {
        let fm = &record.front_matter;
        let title = record.title().to_string();
        let canonical_url = full_url(self.config.base_url(), route_slug);

        let edit_source_url = match fm.folder.as_deref() {
            Some(folder) => Some(edit_source_url(&self.config.edit_source_base, folder)),
            None => {
                tracing::debug!("{} has no folder; edit link omitted", record.id);
                None
            }
        };

        // Assets are published next to their source file, not under the slug
        let og_image_path = fm
            .ogimage
            .as_deref()
            .map(|image| resolve_asset(&record.source_dir(), image));

        PostViewModel {
            date: fm
                .date
                .as_deref()
                .and_then(|d| format_date(d, &self.config.date_format)),
            date_iso: fm.parse_date().as_ref().map(date_xml),
            time_to_read: record.time_to_read,
            excerpt: record.excerpt.clone(),
            body_html: record.body.clone(),
            edit_source_url,
            social_share: SocialShareConfig {
                base_url: canonical_url.clone(),
                title: title.clone(),
            },
            discussion: DiscussionConfig {
                shortname: self.config.discussion_shortname.clone(),
                identifier: record.id.clone(),
                title: title.clone(),
                url: canonical_url.clone(),
            },
            seo: SeoMeta {
                title: title.clone(),
                description: record.excerpt.clone(),
                slug: route_slug.to_string(),
                image: og_image_path.clone(),
                is_blog_post: true,
            },
            og_image_path,
            canonical_url,
            title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, PostType};

    fn store() -> ContentStore {
        let mut post = ContentRecord::new(
            "blog-post/attention/index.md",
            PostType::BlogPost,
            "/blog-post/attention/",
        );
        post.front_matter = FrontMatter {
            title: Some("Attention is all you need".to_string()),
            date: Some("2020-03-07".to_string()),
            folder: Some("/blog-post/attention".to_string()),
            ogimage: Some("cover.png".to_string()),
            ..Default::default()
        };
        post.body = "<p>Transformers.</p>\n".to_string();
        post.excerpt = "Transformers.".to_string();
        post.time_to_read = 7;

        let mut bare = ContentRecord::new("blog-post/bare.md", PostType::BlogPost, "/blog-post/bare/");
        bare.front_matter.title = Some("Bare".to_string());

        let mut single =
            ContentRecord::new("blog-post/hello.md", PostType::BlogPost, "/blog-post/hello/");
        single.front_matter.title = Some("Hello".to_string());
        single.front_matter.ogimage = Some("./cover.png".to_string());

        ContentStore::new(vec![post, bare, single]).unwrap()
    }

    fn config() -> SiteConfig {
        SiteConfig {
            url: "https://blog.example.com/".to_string(),
            edit_source_base: "https://github.com/me/blog/blob/master/content".to_string(),
            discussion_shortname: "my-blog".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_post() {
        let store = store();
        let config = config();
        let vm = PostRenderer::new(&store, &config)
            .render("/blog-post/attention/")
            .unwrap();

        assert_eq!(vm.title, "Attention is all you need");
        assert_eq!(vm.body_html, "<p>Transformers.</p>\n");
        assert_eq!(vm.excerpt, "Transformers.");
        assert_eq!(vm.time_to_read, 7);
        assert_eq!(vm.date.as_deref(), Some("March 07, 2020"));
        assert_eq!(vm.date_iso.as_deref(), Some("2020-03-07T00:00:00"));
        assert_eq!(
            vm.canonical_url,
            "https://blog.example.com/blog-post/attention/"
        );
        assert_eq!(
            vm.edit_source_url.as_deref(),
            Some("https://github.com/me/blog/blob/master/content/blog-post/attention/index.md")
        );
        assert_eq!(vm.og_image_path.as_deref(), Some("/blog-post/attention/cover.png"));
        assert_eq!(
            vm.social_share,
            SocialShareConfig {
                base_url: vm.canonical_url.clone(),
                title: vm.title.clone(),
            }
        );
        assert_eq!(
            vm.discussion,
            DiscussionConfig {
                shortname: "my-blog".to_string(),
                identifier: "blog-post/attention/index.md".to_string(),
                title: vm.title.clone(),
                url: vm.canonical_url.clone(),
            }
        );
        assert_eq!(vm.seo.image, vm.og_image_path);
        assert!(vm.seo.is_blog_post);
    }

    #[test]
    fn test_route_slug_drives_canonical_url() {
        let store = store();
        let config = config();
        let vm = PostRenderer::new(&store, &config)
            .render_route("/blog-post/attention/", "/blog/attention")
            .unwrap();
        assert_eq!(vm.canonical_url, "https://blog.example.com/blog/attention");
        assert_eq!(vm.discussion.url, vm.canonical_url);
        assert_eq!(vm.seo.slug, "/blog/attention");
        assert_eq!(vm.og_image_path.as_deref(), Some("/blog-post/attention/cover.png"));
    }

    #[test]
    fn test_single_file_og_image_sits_beside_source() {
        let store = store();
        let config = config();
        let vm = PostRenderer::new(&store, &config)
            .render("/blog-post/hello/")
            .unwrap();
        assert_eq!(vm.og_image_path.as_deref(), Some("/blog-post/cover.png"));
        assert_eq!(vm.seo.image, vm.og_image_path);
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let store = store();
        let config = config();
        let err = PostRenderer::new(&store, &config)
            .render("missing-slug")
            .unwrap_err();
        assert_eq!(err, ContentError::not_found("missing-slug"));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let store = store();
        let config = config();
        let vm = PostRenderer::new(&store, &config)
            .render("/blog-post/bare/")
            .unwrap();
        assert_eq!(vm.edit_source_url, None);
        assert_eq!(vm.og_image_path, None);
        assert_eq!(vm.date, None);
        assert_eq!(vm.seo.image, None);
    }
}
