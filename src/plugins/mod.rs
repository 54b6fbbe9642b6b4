//! Build-time plugins and the global data they publish
//!
//! Plugins run once after all content has been loaded. Whatever they publish
//! through [`Actions`] is frozen into a [`GlobalData`] snapshot before any page
//! is rendered; renderers only ever read from that snapshot.

pub mod blog_category;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;

use crate::content::Post;

pub use blog_category::{BlogCategoryPlugin, PostList, PostSummary};

/// Name under which the blog posts are registered in [`AllContent`]
pub const BLOG_CONTENT_PLUGIN: &str = "content-blog";

/// Instance id used when a plugin is registered once
pub const DEFAULT_INSTANCE: &str = "default";

/// Content loaded by the blog content plugin
#[derive(Debug, Clone, Default)]
pub struct BlogContent {
    pub blog_posts: Vec<Post>,
}

/// Everything loaded during the content phase, keyed by plugin name and instance id
#[derive(Debug, Clone, Default)]
pub struct AllContent {
    plugins: IndexMap<String, IndexMap<String, BlogContent>>,
}

impl AllContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the posts of the default blog instance
    pub fn with_blog_posts(posts: Vec<Post>) -> Self {
        let mut content = Self::new();
        content.insert(
            BLOG_CONTENT_PLUGIN,
            DEFAULT_INSTANCE,
            BlogContent { blog_posts: posts },
        );
        content
    }

    pub fn insert(&mut self, plugin: &str, instance: &str, content: BlogContent) {
        self.plugins
            .entry(plugin.to_string())
            .or_default()
            .insert(instance.to_string(), content);
    }

    pub fn get(&self, plugin: &str, instance: &str) -> Option<&BlogContent> {
        self.plugins.get(plugin)?.get(instance)
    }

    /// Content of the default blog instance, if it was loaded
    pub fn blog(&self) -> Option<&BlogContent> {
        self.get(BLOG_CONTENT_PLUGIN, DEFAULT_INSTANCE)
    }
}

/// Data a single plugin publishes
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginData {
    pub blog_posts: PostList,
}

/// Collects plugin output during the content phase
#[derive(Debug, Default)]
pub struct Actions {
    current: String,
    data: IndexMap<String, PluginData>,
}

impl Actions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish data for the plugin currently running
    pub fn set_global_data(&mut self, data: PluginData) {
        tracing::debug!("Publishing global data for {}", self.current);
        self.data.insert(self.current.clone(), data);
    }

    /// Freeze everything published so far
    pub fn finish(self) -> GlobalData {
        GlobalData { plugins: self.data }
    }
}

/// A build-time plugin
pub trait Plugin {
    fn name(&self) -> &str;

    /// Called once with all loaded content
    fn all_content_loaded(&self, content: &AllContent, actions: &mut Actions) -> Result<()>;
}

/// Run every plugin over the loaded content and freeze the result
pub fn run_plugins(plugins: &[Box<dyn Plugin>], content: &AllContent) -> Result<GlobalData> {
    let mut actions = Actions::new();
    for plugin in plugins {
        actions.current = plugin.name().to_string();
        plugin.all_content_loaded(content, &mut actions)?;
    }
    Ok(actions.finish())
}

/// Plugins enabled for every build
pub fn default_plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(BlogCategoryPlugin)]
}

/// Immutable, build-scoped data published by plugins
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct GlobalData {
    plugins: IndexMap<String, PluginData>,
}

impl GlobalData {
    pub fn plugin(&self, name: &str) -> Option<&PluginData> {
        self.plugins.get(name)
    }

    /// The post list published by `plugin`, if any
    pub fn blog_posts(&self, plugin: &str) -> Option<&PostList> {
        self.plugin(plugin).map(|d| &d.blog_posts)
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Plugin for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn all_content_loaded(&self, _: &AllContent, _: &mut Actions) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_all_content_lookup() {
        let content = AllContent::with_blog_posts(Vec::new());
        assert!(content.blog().is_some());
        assert!(content.get(BLOG_CONTENT_PLUGIN, "other").is_none());
        assert!(AllContent::new().blog().is_none());
    }

    #[test]
    fn test_plugin_without_output_publishes_nothing() {
        let plugins: Vec<Box<dyn Plugin>> = vec![Box::new(Noop)];
        let data = run_plugins(&plugins, &AllContent::new()).unwrap();
        assert!(data.is_empty());
        assert!(data.plugin("noop").is_none());
    }
}
