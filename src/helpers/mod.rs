//! Helper functions shared by the view builders

mod date;
mod url;

pub use date::*;
pub use url::*;
