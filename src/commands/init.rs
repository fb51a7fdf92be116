//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::DEFAULT_EDIT_SOURCE_BASE;
use crate::CONFIG_FILE;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    fs::create_dir_all(target_dir.join("content/case-studies/01-sample-project"))?;
    fs::create_dir_all(target_dir.join("content/blog-post/hello-world"))?;

    let config_content = format!(
        r#"# Site
title: Folio
description: ''
author: ''

# URL
## Canonical links are url + route slug
url: http://example.com

# Directory
content_dir: content
public_dir: public

# Projects listing
project_type: case-studies
default_tag_icons:
  - python

# Post page
edit_source_base: {}
discussion_shortname: ''
date_format: '%B %d, %Y'

# Ingestion
words_per_minute: 265
excerpt_length: 140
highlight:
  theme: base16-ocean.dark
  line_number: true
"#,
        DEFAULT_EDIT_SOURCE_BASE
    );

    fs::write(&config_path, config_content)?;

    let now = chrono::Local::now();

    let sample_project = r#"---
title: Sample Project
excerpt: A short description shown on the projects listing.
demo: https://example.com
src: https://github.com/example/sample-project
iframe: https://codepen.io/example/embed/sample
folder: /case-studies/01-sample-project
icons:
  - python
---

Describe what the project does and how it was built.
"#;
    fs::write(
        target_dir.join("content/case-studies/01-sample-project/index.md"),
        sample_project,
    )?;

    let sample_post = format!(
        r#"---
title: Hello World
date: {}
folder: /blog-post/hello-world
---

Welcome! This is your very first post.

## Quick Start

```bash
$ folio new "My New Post"
$ folio generate
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(
        target_dir.join("content/blog-post/hello-world/index.md"),
        sample_post,
    )?;

    tracing::debug!("Scaffolded site in {:?}", target_dir);

    Ok(())
}
