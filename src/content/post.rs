//! Blog post records

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FrontMatter;

/// A loaded blog post, as handed to plugins and the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Routing and front-matter metadata
    pub metadata: PostMetadata,

    /// Raw markdown body (front-matter stripped)
    pub raw: String,

    /// Source file path relative to the source directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,
}

/// Metadata of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    /// URL path of the post, including the site root
    pub permalink: String,

    pub title: String,

    pub date: DateTime<Local>,

    /// Slug used for the `:title` permalink placeholder
    pub slug: String,

    pub description: Option<String>,

    pub front_matter: FrontMatter,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            metadata: PostMetadata {
                permalink: String::new(),
                title,
                date,
                slug,
                description: None,
                front_matter: FrontMatter::default(),
            },
            raw: String::new(),
            full_source: PathBuf::from(&source),
            source,
        }
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn permalink(&self) -> &str {
        &self.metadata.permalink
    }

    /// Categories from front-matter, empty when absent
    pub fn categories(&self) -> &[String] {
        self.metadata.front_matter.categories()
    }

    /// The previous (newer) post in a reverse-chronological list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// The next (older) post in a reverse-chronological list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.source == self.source)?;
        posts.get(pos + 1)
    }
}
