//! Publishes post titles, permalinks and categories as global data

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Actions, AllContent, Plugin, PluginData};
use crate::content::Post;

/// Reduced view of a post, enough to build navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub permalink: String,
    pub title: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl PostSummary {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            permalink: post.permalink().to_string(),
            title: post.title().to_string(),
            categories: post.categories().to_vec(),
        }
    }
}

/// Posts in the order the loader produced them (newest first)
pub type PostList = Vec<PostSummary>;

/// Project the blog posts in `content` to summaries
///
/// Returns `None`, after logging a warning, when no blog content was loaded.
pub fn extract(content: &AllContent) -> Option<PostList> {
    let Some(blog) = content.blog() else {
        tracing::warn!("Blog content not found");
        return None;
    };

    Some(blog.blog_posts.iter().map(PostSummary::from).collect())
}

/// Plugin publishing the extracted post list under `blogPosts`
pub struct BlogCategoryPlugin;

impl BlogCategoryPlugin {
    pub const NAME: &'static str = "blog-category-plugin";
}

impl Plugin for BlogCategoryPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn all_content_loaded(&self, content: &AllContent, actions: &mut Actions) -> Result<()> {
        if let Some(blog_posts) = extract(content) {
            tracing::debug!("Extracted {} post summaries", blog_posts.len());
            actions.set_global_data(PluginData { blog_posts });
        }
        Ok(())
    }
}
