//! Content loader - loads posts from the source directory

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, Post};
use crate::Blog;

/// Loads posts from `source/_posts`
pub struct ContentLoader<'a> {
    blog: &'a Blog,
}

impl<'a> ContentLoader<'a> {
    pub fn new(blog: &'a Blog) -> Self {
        Self { blog }
    }

    /// Load all posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.blog.source_dir.join("_posts");
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) => {
                        if !post.metadata.front_matter.draft || self.blog.config.render_drafts {
                            posts.push(post);
                        } else {
                            tracing::debug!("Skipping draft {:?}", path);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Newest first; same-date posts keep a stable order by source path
        posts.sort_by(|a, b| {
            b.metadata
                .date
                .cmp(&a.metadata.date)
                .then_with(|| a.source.cmp(&b.source))
        });

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let file_stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let title = fm.title.clone().unwrap_or_else(|| file_stem.clone());

        let source = path
            .strip_prefix(&self.blog.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let slug = fm
            .slug
            .clone()
            .unwrap_or_else(|| slug::slugify(&file_stem));

        let mut post = Post::new(title, date, source);
        post.metadata.permalink = self.generate_permalink(&date, &slug, fm.categories());
        post.metadata.slug = slug;
        post.metadata.description = fm.description.clone();
        post.metadata.front_matter = fm;
        post.raw = body.to_string();
        post.full_source = path.to_path_buf();

        Ok(post)
    }

    /// Generate the permalink path based on the configured pattern
    fn generate_permalink(&self, date: &DateTime<Local>, slug: &str, categories: &[String]) -> String {
        generate_permalink(
            &self.blog.config.permalink,
            &self.blog.config.root,
            date,
            slug,
            categories,
        )
    }
}

/// Expand a permalink pattern such as `:year/:month/:day/:title/`
pub fn generate_permalink(
    pattern: &str,
    root: &str,
    date: &DateTime<Local>,
    slug: &str,
    categories: &[String],
) -> String {
    let category = categories
        .first()
        .map(|c| slug::slugify(c))
        .unwrap_or_default();

    let result = pattern
        .replace(":year", &date.format("%Y").to_string())
        .replace(":month", &date.format("%m").to_string())
        .replace(":day", &date.format("%d").to_string())
        .replace(":i_month", &date.format("%-m").to_string())
        .replace(":i_day", &date.format("%-d").to_string())
        .replace(":title", slug)
        .replace(":category", &category);

    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        result.trim_start_matches('/')
    )
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn write_post(dir: &Path, name: &str, front_matter: &str) {
        let posts = dir.join("source/_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join(name),
            format!("---\n{}\n---\n\nBody of {}\n", front_matter, name),
        )
        .unwrap();
    }

    #[test]
    fn test_generate_permalink() {
        let date = Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let link = generate_permalink(
            ":year/:month/:day/:title/",
            "/blog/",
            &date,
            "hello",
            &[],
        );
        assert_eq!(link, "/blog/2024/03/09/hello/");

        let link = generate_permalink(":category/:title/", "/", &date, "hi", &["Go Lang".into()]);
        assert_eq!(link, "/go-lang/hi/");
    }

    #[test]
    fn test_load_posts_sorted_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "old.md", "title: Old\ndate: 2023-01-01");
        write_post(
            dir.path(),
            "new.md",
            "title: New\ndate: 2024-06-01\ncategories: [go]",
        );
        write_post(dir.path(), "mid.md", "title: Mid\ndate: 2023-09-10");

        let blog = Blog::new(dir.path()).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();

        let titles: Vec<_> = posts.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
        assert_eq!(posts[0].categories(), ["go"]);
        assert_eq!(posts[0].permalink(), "/2024/06/01/new/");
        assert!(posts[0].raw.contains("Body of new.md"));
    }

    #[test]
    fn test_drafts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "a.md", "title: A\ndate: 2024-01-01");
        write_post(dir.path(), "b.md", "title: B\ndate: 2024-01-02\ndraft: true");

        let blog = Blog::new(dir.path()).unwrap();
        let posts = ContentLoader::new(&blog).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title(), "A");
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&blog).load_posts().unwrap().is_empty());
    }
}
