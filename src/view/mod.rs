//! View-models handed to the page shell
//!
//! Builders read a [`ContentStore`](crate::content::ContentStore) by reference
//! and never mutate it.

mod post;
mod projects;

pub use post::{DiscussionConfig, PostRenderer, PostViewModel, SeoMeta, SocialShareConfig};
pub use projects::{
    is_live_demo, EmbedFrame, Link, LinkTarget, Preview, ProjectListBuilder, ProjectViewModel,
    BADGE_HEIGHT, BADGE_WIDTH,
};
