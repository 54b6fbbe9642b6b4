//! List site content

use anyhow::Result;

use crate::helpers::category_counts;
use crate::Blog;

/// List posts or categories
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let build = blog.build()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", build.posts.len());
            for post in &build.posts {
                println!(
                    "  {} - {} [{}] {}",
                    post.metadata.date.format("%Y-%m-%d"),
                    post.title(),
                    post.categories().join(", "),
                    post.permalink()
                );
            }
        }
        "category" | "categories" => {
            let Some(list) = build.post_list() else {
                println!("Categories (0):");
                return Ok(());
            };
            let mut categories: Vec<_> = category_counts(list).into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            println!("Categories ({}):", categories.len());
            for (category, count) in categories {
                println!("  {} ({})", category, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, category", content_type);
        }
    }

    Ok(())
}
