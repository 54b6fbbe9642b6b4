//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a new post in `source/_posts`, returning its path
pub fn create_post(
    blog: &Blog,
    title: &str,
    categories: &[String],
    path: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let target_dir = blog.source_dir.join("_posts");
    fs::create_dir_all(&target_dir)?;

    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        blog.config
            .new_post_name
            .replace(":title", &slug::slugify(title))
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };
    let file_path = target_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = format!(
        "---\ntitle: {}\ndate: {}\n",
        serde_yaml::to_string(title)?.trim_end(),
        now.format("%Y-%m-%d %H:%M:%S")
    );
    if categories.is_empty() {
        content.push_str("categories: []\n");
    } else {
        content.push_str("categories:\n");
        for category in categories {
            content.push_str(&format!("  - {}\n", serde_yaml::to_string(category)?.trim_end()));
        }
    }
    content.push_str("---\n");

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;

    #[test]
    fn test_create_post_with_categories() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let path = create_post(&blog, "Go: Tips & Tricks", &["go".into(), "tips".into()], None)
            .unwrap();
        assert!(path.ends_with("go-tips-tricks.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, _) = FrontMatter::parse(&content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Go: Tips & Tricks"));
        assert_eq!(fm.categories(), ["go", "tips"]);
        assert!(fm.parse_date().is_some());

        assert!(create_post(&blog, "Go: Tips & Tricks", &[], None).is_err());
    }
}
