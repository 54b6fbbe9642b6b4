//! Newer/older navigation at the bottom of a post

use crate::config::PaginatorConfig;
use crate::content::Post;
use crate::helpers::html_escape;

/// Render the newer/older post links for `post` within `posts` (newest first)
///
/// Returns an empty string for a post that has neither neighbour.
pub fn blog_post_paginator(config: &PaginatorConfig, post: &Post, posts: &[Post]) -> String {
    let newer = post.prev(posts);
    let older = post.next(posts);
    if newer.is_none() && older.is_none() {
        return String::new();
    }

    let mut html = format!(
        r#"<nav class="blog-post-paginator" aria-label="{}"><div class="paginator-container">"#,
        html_escape(&config.nav_label)
    );
    if let Some(newer) = newer {
        html.push_str(&nav_link(newer, &config.newer_post, false));
    }
    if let Some(older) = older {
        html.push_str(&nav_link(older, &config.older_post, true));
    }
    html.push_str("</div></nav>");
    html
}

fn nav_link(post: &Post, sub_label: &str, is_next: bool) -> String {
    let class = if is_next {
        "pagination-nav__link pagination-nav__link--next"
    } else {
        "pagination-nav__link pagination-nav__link--prev"
    };
    format!(
        r#"<a class="{}" href="{}"><div class="pagination-nav__sublabel">{}</div><div class="pagination-nav__label">{}</div></a>"#,
        class,
        html_escape(post.permalink()),
        html_escape(sub_label),
        html_escape(post.title())
    )
}
