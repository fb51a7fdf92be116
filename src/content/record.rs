//! Content records and post types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FrontMatter;

/// Partition a content record belongs to.
///
/// Derived at ingestion from the top-level directory under the content root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PostType {
    /// Portfolio entries (`case-studies`)
    CaseStudies,
    /// Blog posts (`blog-post`, or `blog`)
    BlogPost,
    Other(String),
}

impl PostType {
    pub fn as_str(&self) -> &str {
        match self {
            PostType::CaseStudies => "case-studies",
            PostType::BlogPost => "blog-post",
            PostType::Other(name) => name,
        }
    }
}

impl From<&str> for PostType {
    fn from(s: &str) -> Self {
        match s {
            "case-studies" => PostType::CaseStudies,
            "blog-post" | "blog" => PostType::BlogPost,
            other => PostType::Other(other.to_string()),
        }
    }
}

impl From<String> for PostType {
    fn from(s: String) -> Self {
        PostType::from(s.as_str())
    }
}

impl From<PostType> for String {
    fn from(t: PostType) -> Self {
        t.as_str().to_string()
    }
}

impl FromStr for PostType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PostType::from(s))
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingested piece of content: a case study or a blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Stable identifier, unique in a store
    pub id: String,

    pub post_type: PostType,

    /// Route key, unique in a store (`/case-studies/chatbot/`)
    pub slug: String,

    /// Ascending sort key within the post type
    pub order_index: i64,

    pub front_matter: FrontMatter,

    /// Rendered HTML body
    pub body: String,

    /// Plain-text excerpt of the body
    pub excerpt: String,

    /// Estimated reading time in minutes
    pub time_to_read: u32,
}

impl ContentRecord {
    /// Create a record with an empty body
    pub fn new(id: impl Into<String>, post_type: PostType, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            post_type,
            slug: slug.into(),
            order_index: 0,
            front_matter: FrontMatter::default(),
            body: String::new(),
            excerpt: String::new(),
            time_to_read: 1,
        }
    }

    /// Title from front-matter, empty when absent
    pub fn title(&self) -> &str {
        self.front_matter.title.as_deref().unwrap_or_default()
    }

    /// Route of the directory holding the source file (`/blog-post/`)
    pub fn source_dir(&self) -> String {
        match self.id.rsplit_once('/') {
            Some((dir, _)) => format!("/{}/", dir.trim_matches('/')),
            None => "/".to_string(),
        }
    }

    /// Key used to order records within a post type
    pub fn sort_key(&self) -> (i64, &str) {
        (self.order_index, self.id.as_str())
    }
}
