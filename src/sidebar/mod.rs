//! Post sidebar: category filter, mobile pagination and the items it is built from

mod controller;
mod routes;
mod state;

use serde::{Deserialize, Serialize};

use crate::config::SidebarCount;
use crate::content::{FrontMatter, Post};
use crate::plugins::PostSummary;

pub use controller::{category_options, filtered_items, page_slice, total_pages, SidebarController};
pub use routes::StateRoutes;
pub use state::{encode_component, parse_query, QueryError, Selection, Variant, ViewState};

/// Sidebar data handed to a page by the blog plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    pub title: String,
    pub items: Vec<SidebarItem>,
}

/// One sidebar entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    pub permalink: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_matter: Option<FrontMatter>,
}

impl Sidebar {
    /// Build from posts in display order, keeping the first `count`
    pub fn from_posts(title: &str, posts: &[Post], count: SidebarCount) -> Self {
        let items = posts
            .iter()
            .take(count.take(posts.len()))
            .map(|post| SidebarItem {
                permalink: post.permalink().to_string(),
                title: post.title().to_string(),
                front_matter: Some(post.metadata.front_matter.clone()),
            })
            .collect();

        Self {
            title: title.to_string(),
            items,
        }
    }

    /// Summaries the controller works on
    pub fn summaries(&self) -> Vec<PostSummary> {
        self.items.iter().map(PostSummary::from).collect()
    }
}

impl From<&SidebarItem> for PostSummary {
    fn from(item: &SidebarItem) -> Self {
        Self {
            permalink: item.permalink.clone(),
            title: item.title.clone(),
            categories: item
                .front_matter
                .as_ref()
                .map(|fm| fm.categories().to_vec())
                .unwrap_or_default(),
        }
    }
}
