//! URL helper functions

/// Join a site base URL and a route slug
///
/// # Examples
/// ```ignore
/// full_url("https://example.com/", "blog/post/") // -> "https://example.com/blog/post/"
/// ```
pub fn full_url(base_url: &str, route: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if route.starts_with('/') {
        format!("{}{}", base, route)
    } else {
        format!("{}/{}", base, route)
    }
}

/// Link to a document's source in the content repository.
///
/// Exactly one `/` separates `base` and `folder`, whether or not either side
/// carries its own.
///
/// # Examples
/// ```ignore
/// edit_source_url("https://github.com/me/site/blob/master/content", "/blog/post")
/// // -> "https://github.com/me/site/blob/master/content/blog/post/index.md"
/// ```
pub fn edit_source_url(base: &str, folder: &str) -> String {
    let folder = folder.trim_end_matches('/');
    if folder.is_empty() || folder.starts_with('/') {
        format!("{}{}/index.md", base.trim_end_matches('/'), folder)
    } else {
        format!("{}/{}/index.md", base.trim_end_matches('/'), folder)
    }
}

/// Whether a link points off-site
pub fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}

/// Resolve an asset reference from a document against the document's route
///
/// # Examples
/// ```ignore
/// resolve_asset("/blog/post/", "./cover.png") // -> "/blog/post/cover.png"
/// ```
pub fn resolve_asset(route: &str, asset: &str) -> String {
    if is_external(asset) || asset.starts_with('/') {
        return asset.to_string();
    }
    let asset = asset.trim_start_matches("./");
    format!("{}/{}", route.trim_end_matches('/'), asset)
}
