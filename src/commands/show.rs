//! Show the view-model of one post

use anyhow::Result;

use crate::view::PostRenderer;
use crate::Folio;

/// Render the post at `slug` as pretty JSON
pub fn render_json(folio: &Folio, slug: &str, route: Option<&str>) -> Result<String> {
    let store = folio.load_store()?;
    let renderer = PostRenderer::new(&store, &folio.config);
    let view = renderer.render_route(slug, route.unwrap_or(slug))?;
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn run(folio: &Folio, slug: &str, route: Option<&str>) -> Result<()> {
    println!("{}", render_json(folio, slug, route)?);
    Ok(())
}
