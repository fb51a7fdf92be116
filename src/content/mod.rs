//! Content module - records, the content store, and ingestion

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod record;
mod store;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::{MarkdownRenderer, RenderedBody};
pub use record::{ContentRecord, PostType};
pub use store::{ContentStore, Listing};
