//! blog-sidebar: a static blog generator with category-filtered post sidebars
//!
//! Posts are loaded from `source/_posts`, projected by the blog category plugin
//! into a read-only post list, and rendered into pages whose sidebars filter
//! that list by category and paginate it on small screens.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod plugins;
pub mod server;
pub mod sidebar;
pub mod theme;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use content::Post;
use plugins::{AllContent, BlogCategoryPlugin, GlobalData, PostList};

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

/// Result of the content phase: posts plus the frozen plugin data
pub struct Build {
    pub posts: Vec<Post>,
    pub global_data: GlobalData,
}

impl Build {
    /// The post list published by the blog category plugin
    pub fn post_list(&self) -> Option<&PostList> {
        self.global_data.blog_posts(BlogCategoryPlugin::NAME)
    }
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Load posts and run the plugins over them
    pub fn build(&self) -> Result<Build> {
        let posts = ContentLoader::new(self).load_posts()?;
        let content = AllContent::with_blog_posts(posts.clone());
        let global_data = plugins::run_plugins(&plugins::default_plugins(), &content)?;
        Ok(Build { posts, global_data })
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, categories: &[String]) -> Result<PathBuf> {
        commands::new::create_post(self, title, categories, None)
    }
}
