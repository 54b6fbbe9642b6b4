//! Generator module - writes the static site into the public directory

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::Post;
use crate::helpers::output_path;
use crate::plugins::GlobalData;
use crate::sidebar::{page_slice, total_pages, Sidebar, SidebarController, StateRoutes, Variant, ViewState};
use crate::theme::{blog_post_paginator, layout, SidebarRenderer};
use crate::Blog;

/// File the global data snapshot is written to, relative to the public directory
pub const GLOBAL_DATA_FILE: &str = ".global-data.json";

/// Static site generator
pub struct Generator {
    blog: Blog,
}

impl Generator {
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Generate the entire site, returning the number of files written
    pub fn generate(&self, posts: &[Post], global_data: &GlobalData) -> Result<usize> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let mut written = 0;
        written += self.write_global_data(global_data)?;
        written += self.generate_index_pages(posts)?;
        written += self.generate_post_pages(posts)?;

        Ok(written)
    }

    fn write_global_data(&self, global_data: &GlobalData) -> Result<usize> {
        let path = self.blog.public_dir.join(GLOBAL_DATA_FILE);
        fs::write(&path, global_data.to_json()?)?;
        tracing::debug!("Generated: {:?}", path);
        Ok(1)
    }

    /// Generate the home page and its `page/N/` continuations
    fn generate_index_pages(&self, posts: &[Post]) -> Result<usize> {
        let config = &self.blog.config;
        let per_page = config.blog.posts_per_page.max(1);
        let total = total_pages(posts.len(), per_page);

        for page_num in 1..=total {
            let page_posts = page_slice(posts, page_num, per_page);
            let html = layout::index_page(config, page_posts, page_num, total);
            self.write_page(&layout::index_url(config, page_num), &html)?;
        }

        Ok(total)
    }

    /// Generate one page per post with its sidebars and paginator, plus a
    /// copy for every other sidebar state when `sidebar.state_pages` is on
    fn generate_post_pages(&self, posts: &[Post]) -> Result<usize> {
        let config = &self.blog.config;
        let sidebar = Sidebar::from_posts(&config.blog.sidebar_title, posts, config.blog.sidebar_count);
        let summaries = sidebar.summaries();

        let initial =
            SidebarController::new(&summaries, config.sidebar.page_size, &config.sidebar.all_label);
        let routes = StateRoutes::from_controller(&initial);
        let renderer = SidebarRenderer::new(&config.sidebar);
        let renderer = if config.sidebar.state_pages {
            renderer.with_routes(&routes)
        } else {
            renderer
        };
        let states = if config.sidebar.state_pages {
            initial.reachable_states()
        } else {
            vec![ViewState::default()]
        };
        tracing::debug!("{} sidebar states per post", states.len());

        let mut written = 0;
        for post in posts {
            let route = post.permalink();
            let paginator = blog_post_paginator(&config.paginator, post, posts);

            for state in &states {
                let Some(url) = routes.url_for(route, state) else {
                    continue;
                };
                let controller = initial.clone().with_state(state.clone());
                let desktop = renderer.render(&sidebar.title, &controller, Variant::Desktop, route);
                let mobile = renderer.render(&sidebar.title, &controller, Variant::Mobile, route);

                let html = layout::post_page(config, post, &desktop, &mobile, &paginator);
                self.write_page(&url, &html)?;
                written += 1;
            }
        }

        Ok(written)
    }

    /// Write `html` for URL path `url`, which includes the site root
    fn write_page(&self, url: &str, html: &str) -> Result<()> {
        let output = self.output_file(url);
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output, html)?;
        tracing::debug!("Generated: {:?}", output);
        Ok(())
    }

    fn output_file(&self, url: &str) -> PathBuf {
        let root = self.blog.config.root.trim_end_matches('/');
        let relative = url.strip_prefix(root).unwrap_or(url);
        self.blog.public_dir.join(output_path(relative))
    }
}
