//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Blog, Build};

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let build = blog.build()?;
    write_site(blog, &build)
}

/// Write an already loaded build into the public directory
pub fn write_site(blog: &Blog, build: &Build) -> Result<()> {
    let start = Instant::now();
    tracing::info!("Loaded {} posts", build.posts.len());

    match build.post_list() {
        Some(list) => tracing::debug!("Published {} post summaries", list.len()),
        None => tracing::warn!("No post list published; sidebars will be empty"),
    }

    let written = Generator::new(blog).generate(&build.posts, &build.global_data)?;

    let duration = start.elapsed();
    tracing::info!("Generated {} files in {:.2}s", written, duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(blog.source_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(config_path.as_ref(), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // Reload so config edits take effect
                    let result = Blog::new(&blog.base_dir).and_then(|b| run(&b));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GLOBAL_DATA_FILE;
    use std::fs;
    use std::path::Path;

    fn write_post(base: &Path, name: &str, date: &str, categories: &str) {
        let posts = base.join("source/_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join(format!("{}.md", name)),
            format!(
                "---\ntitle: {}\ndate: {}\ncategories: {}\n---\nBody\n",
                name, date, categories
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_generate_site() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "permalink: :title/\nblog:\n  posts_per_page: 2\n",
        )
        .unwrap();
        write_post(dir.path(), "alpha", "2024-01-01", "[go]");
        write_post(dir.path(), "beta", "2024-02-01", "[rust]");
        write_post(dir.path(), "gamma", "2024-03-01", "[go, web]");

        let blog = Blog::new(dir.path()).unwrap();
        run(&blog).unwrap();

        let public = &blog.public_dir;
        assert!(public.join("index.html").exists());
        assert!(public.join("page/2/index.html").exists());
        assert!(!public.join("page/3/index.html").exists());

        let beta = fs::read_to_string(public.join("beta/index.html")).unwrap();
        assert!(beta.contains(
            r#"<a class="sidebar-item-link sidebar-item-link--active" href="/beta/">beta</a>"#
        ));
        assert!(beta.contains(r#"<option value="/beta/category/web/">web</option>"#));
        // gamma is newer, alpha is older
        assert!(beta.contains(r#"pagination-nav__link--prev" href="/gamma/""#));
        assert!(beta.contains(r#"pagination-nav__link--next" href="/alpha/""#));

        let data = fs::read_to_string(public.join(GLOBAL_DATA_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&data).unwrap();
        let posts = &json["blog-category-plugin"]["blogPosts"];
        assert_eq!(posts.as_array().unwrap().len(), 3);
        assert_eq!(posts[0]["permalink"], "/gamma/");
        assert_eq!(posts[0]["categories"][1], "web");
    }

    #[test]
    fn test_generate_category_state_pages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "permalink: :title/\n").unwrap();
        write_post(dir.path(), "alpha", "2024-01-01", "[go]");
        write_post(dir.path(), "beta", "2024-02-01", "[rust]");
        write_post(dir.path(), "gamma", "2024-03-01", "[go, web]");

        let blog = Blog::new(dir.path()).unwrap();
        run(&blog).unwrap();

        // choosing "go" on beta's page
        let filtered = fs::read_to_string(blog.public_dir.join("beta/category/go/index.html")).unwrap();
        assert!(filtered.contains(r#"data-permalink="/beta/""#));
        assert!(filtered.contains(r#"<option value="/beta/category/go/" selected>go</option>"#));
        assert!(filtered.contains(r#"<option value="/beta/">all</option>"#));
        assert_eq!(filtered.matches(r#"<li class="sidebar-item">"#).count(), 2);
        assert!(!filtered.contains(r#"href="/beta/">beta</a>"#));

        assert!(blog.public_dir.join("beta/category/web/index.html").exists());
        assert!(blog.public_dir.join("alpha/category/rust/index.html").exists());
    }

    #[test]
    fn test_generate_mobile_page_states() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "permalink: :title/\n").unwrap();
        for day in 1..=12 {
            write_post(
                dir.path(),
                &format!("post-{:02}", day),
                &format!("2024-01-{:02}", day),
                "[]",
            );
        }

        let blog = Blog::new(dir.path()).unwrap();
        run(&blog).unwrap();

        let first = fs::read_to_string(blog.public_dir.join("post-01/index.html")).unwrap();
        assert!(first.contains(r#"<a class="button button--sm" href="/post-01/page/2/">Next</a>"#));

        // newest first, so post-01 is the last item and sits on page 2
        let second = fs::read_to_string(blog.public_dir.join("post-01/page/2/index.html")).unwrap();
        assert!(second.contains("2 / 2"));
        assert_eq!(second.matches(r#"<li class="menu__list-item">"#).count(), 2);
        assert!(second.contains(r#"<a class="menu__link menu__link--active" href="/post-01/">"#));
        assert!(second.contains(r#"<a class="button button--sm" href="/post-01/">Prev</a>"#));
        assert!(!blog.public_dir.join("post-01/page/3").exists());
    }

    #[test]
    fn test_generate_without_state_pages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "permalink: :title/\nsidebar:\n  state_pages: false\n",
        )
        .unwrap();
        write_post(dir.path(), "alpha", "2024-01-01", "[go]");

        let blog = Blog::new(dir.path()).unwrap();
        run(&blog).unwrap();

        let page = fs::read_to_string(blog.public_dir.join("alpha/index.html")).unwrap();
        assert!(page.contains(r#"<option value="/alpha/?category=go">go</option>"#));
        assert!(!blog.public_dir.join("alpha/category").exists());
    }

    #[test]
    fn test_generate_empty_site() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        run(&blog).unwrap();
        assert!(blog.public_dir.join("index.html").exists());
    }
}
