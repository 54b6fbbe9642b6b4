//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub tagline: String,
    pub author: String,
    pub language: String,

    // URL
    pub root: String,
    pub permalink: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,
    pub render_drafts: bool,

    // Blog
    #[serde(default)]
    pub blog: BlogConfig,

    // Sidebar
    #[serde(default)]
    pub sidebar: SidebarConfig,

    // Post paginator
    #[serde(default)]
    pub paginator: PaginatorConfig,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            tagline: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            root: "/".to_string(),
            permalink: ":year/:month/:day/:title/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),
            render_drafts: false,

            blog: BlogConfig::default(),
            sidebar: SidebarConfig::default(),
            paginator: PaginatorConfig::default(),
            home: HomeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Blog index and sidebar source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub posts_per_page: usize,
    pub pagination_dir: String,
    pub sidebar_title: String,
    pub sidebar_count: SidebarCount,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_per_page: 10,
            pagination_dir: "page".to_string(),
            sidebar_title: "Recent posts".to_string(),
            sidebar_count: SidebarCount::All,
        }
    }
}

/// How many posts the sidebar receives: `ALL` or a fixed number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarCount {
    All,
    Limit(usize),
}

impl SidebarCount {
    /// Apply the limit to a list length
    pub fn take(&self, len: usize) -> usize {
        match self {
            SidebarCount::All => len,
            SidebarCount::Limit(n) => (*n).min(len),
        }
    }
}

impl Serialize for SidebarCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SidebarCount::All => serializer.serialize_str("ALL"),
            SidebarCount::Limit(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

impl<'de> Deserialize<'de> for SidebarCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct CountVisitor;

        impl<'de> Visitor<'de> for CountVisitor {
            type Value = SidebarCount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"ALL\" or a non-negative integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.eq_ignore_ascii_case("all") {
                    Ok(SidebarCount::All)
                } else {
                    value
                        .parse::<usize>()
                        .map(SidebarCount::Limit)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(SidebarCount::Limit(value as usize))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                usize::try_from(value)
                    .map(SidebarCount::Limit)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
            }
        }

        deserializer.deserialize_any(CountVisitor)
    }
}

/// Sidebar filter and mobile pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Option value meaning "no category filter"
    pub all_label: String,
    pub category_label: String,
    pub page_size: usize,
    pub prev_text: String,
    pub next_text: String,
    /// Write a page for every category/page state under each post
    pub state_pages: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            all_label: "all".to_string(),
            category_label: "Category:".to_string(),
            page_size: 10,
            prev_text: "Prev".to_string(),
            next_text: "Next".to_string(),
            state_pages: true,
        }
    }
}

/// Newer/older post navigation labels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatorConfig {
    pub nav_label: String,
    pub newer_post: String,
    pub older_post: String,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            nav_label: "Blog post page navigation".to_string(),
            newer_post: "Newer post".to_string(),
            older_post: "Older post".to_string(),
        }
    }
}

/// Home page hero buttons and feature cards
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub buttons: Vec<HeroButton>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroButton {
    pub text: String,
    /// Site path (resolved against `root`) or absolute URL
    pub link: String,
    #[serde(default = "default_button_style")]
    pub style: String,
}

fn default_button_style() -> String {
    "secondary".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
