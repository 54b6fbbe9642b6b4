//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: Blog
tagline: ''
author: John Doe
language: en

# URL
root: /
permalink: :year/:month/:day/:title/

# Directory
source_dir: source
public_dir: public

# Writing
new_post_name: :title.md
render_drafts: false

# Blog index and sidebar contents
blog:
  posts_per_page: 10
  pagination_dir: page
  sidebar_title: Recent posts
  sidebar_count: ALL

# Sidebar category filter and mobile pagination
sidebar:
  all_label: all
  category_label: 'Category:'
  page_size: 10
  prev_text: Prev
  next_text: Next
  state_pages: true

# Newer/older post navigation
paginator:
  newer_post: Newer post
  older_post: Older post

# Home page hero buttons and feature cards
home:
  buttons: []
  features: []
"#;

const HELLO_POST: &str = r#"---
title: Hello World
categories:
  - general
---

Welcome! Edit or delete this post, then run `blog-sidebar generate`.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Already initialized: {:?} exists", config_path);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let hello = target_dir.join("source/_posts/hello-world.md");
    if !hello.exists() {
        fs::write(&hello, HELLO_POST)?;
    }

    tracing::debug!("Initialized site at {:?}", target_dir);
    Ok(())
}
