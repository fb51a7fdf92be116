//! List site content

use anyhow::Result;

use crate::content::{ContentStore, PostType};
use crate::Folio;

/// Print records of one post type, or of every type when none is given
pub fn run(folio: &Folio, post_type: Option<&str>) -> Result<()> {
    let store = folio.load_store()?;
    print!("{}", format_listing(&store, post_type));
    Ok(())
}

/// Listing text, one line per record in store order
pub fn format_listing(store: &ContentStore, post_type: Option<&str>) -> String {
    let types: Vec<PostType> = match post_type {
        Some(t) => vec![PostType::from(t)],
        None => store.post_types().cloned().collect(),
    };

    let mut out = String::new();
    for post_type in types {
        let listing = store.list_by_type(&post_type);
        out.push_str(&format!("{} ({}):\n", post_type, listing.len()));
        for record in listing {
            out.push_str(&format!(
                "  {:>3}  {} [{}]\n",
                record.order_index,
                record.title(),
                record.slug
            ));
        }
    }
    out
}
