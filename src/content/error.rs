//! Content errors

use thiserror::Error;

/// Errors raised while building or querying the content store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("No content found for slug: {slug}")]
    NotFound { slug: String },

    #[error("Duplicate content id: {id}")]
    DuplicateId { id: String },

    #[error("Duplicate slug: {slug}")]
    DuplicateSlug { slug: String },

    #[error("Missing front-matter field `{field}` in {id}")]
    MissingField { id: String, field: &'static str },
}

impl ContentError {
    pub fn not_found(slug: &str) -> Self {
        Self::NotFound {
            slug: slug.to_string(),
        }
    }

    /// Whether this error is a slug lookup failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
