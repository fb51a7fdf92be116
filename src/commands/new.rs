//! Create a new content item

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::PostType;
use crate::Folio;

/// Create `<content>/<post type>/<slug>/index.md` and return its path
pub fn create_item(folio: &Folio, title: &str, post_type: &PostType) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} has no characters usable in a slug", title);
    }

    let item_dir = folio.content_dir.join(post_type.as_str()).join(&slug);
    let file_path = item_dir.join("index.md");

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let folder = format!("/{}/{}", post_type.as_str(), slug);
    let mut front_matter = format!(
        "---\ntitle: {}\ndate: {}\nfolder: {}\n# excerpt:\n",
        yaml_string(title),
        now.format("%Y-%m-%d %H:%M:%S"),
        folder
    );

    if *post_type == folio.config.project_type {
        let order = folio
            .load_store()
            .map(|store| store.list_by_type(post_type).len())
            .unwrap_or(0);
        front_matter.push_str(&format!(
            "order: {}\n# demo:\n# src:\n# iframe:\n# badgeUrl:\n# icons: []\n",
            order
        ));
    } else {
        front_matter.push_str("# ogimage:\n");
    }
    front_matter.push_str("---\n");

    fs::create_dir_all(&item_dir)?;
    fs::write(&file_path, front_matter)?;
    tracing::info!("Created {} {:?}", post_type, file_path);

    Ok(file_path)
}

/// Quote a scalar for YAML
fn yaml_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Run the new command
pub fn run(folio: &Folio, title: &str, post_type: Option<&str>) -> Result<()> {
    let post_type = post_type
        .map(PostType::from)
        .unwrap_or(PostType::BlogPost);
    let path = create_item(folio, title, &post_type)?;
    println!("Created: {:?}", path);
    Ok(())
}
