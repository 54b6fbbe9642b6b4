//! Page shells for the home/index pages and post pages

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{html_escape, index_page_url, link_to, meta_generator, paginator, truncate, url_for};

/// Wrap `body` in a complete HTML document
pub fn layout(config: &SiteConfig, page_title: &str, body: &str) -> String {
    let title = if page_title.is_empty() || page_title == config.title {
        html_escape(&config.title)
    } else {
        format!("{} | {}", html_escape(page_title), html_escape(&config.title))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{generator}
<title>{title}</title>
</head>
<body>
<nav class="navbar"><a class="navbar__brand" href="{home}">{site}</a></nav>
{body}
</body>
</html>
"#,
        lang = html_escape(&config.language),
        generator = meta_generator(),
        title = title,
        home = url_for(config, "/"),
        site = html_escape(&config.title),
        body = body,
    )
}

/// Hero header shown on the first index page
pub fn hero(config: &SiteConfig) -> String {
    let mut html = String::from(r#"<header class="hero hero--primary"><div class="container">"#);
    html.push_str(&format!(
        r#"<h1 class="hero__title">{}</h1>"#,
        html_escape(&config.title)
    ));
    if !config.tagline.is_empty() {
        html.push_str(&format!(
            r#"<p class="hero__subtitle">{}</p>"#,
            html_escape(&config.tagline)
        ));
    }
    if !config.home.buttons.is_empty() {
        html.push_str(r#"<div class="hero__buttons">"#);
        for button in &config.home.buttons {
            let class = format!("button button--{} button--lg", button.style);
            html.push_str(&link_to(&resolve_link(config, &button.link), &button.text, &class));
        }
        html.push_str("</div>");
    }
    html.push_str("</div></header>");
    html
}

/// Feature cards under the hero; empty when none are configured
pub fn features(config: &SiteConfig) -> String {
    if config.home.features.is_empty() {
        return String::new();
    }

    let mut html = String::from(r#"<section class="features"><div class="container"><div class="feature-list">"#);
    for feature in &config.home.features {
        html.push_str(&format!(
            r#"<div class="feature-card"><h3>{}</h3><p>{}</p></div>"#,
            html_escape(&feature.title),
            html_escape(&feature.description)
        ));
    }
    html.push_str("</div></div></section>");
    html
}

fn resolve_link(config: &SiteConfig, link: &str) -> String {
    if link.contains("://") || link.starts_with("//") {
        link.to_string()
    } else {
        url_for(config, link)
    }
}

/// One page of the blog index
pub fn index_page(config: &SiteConfig, posts: &[Post], current: usize, total: usize) -> String {
    let mut body = String::new();
    if current == 1 {
        body.push_str(&hero(config));
        body.push_str(&features(config));
    }

    body.push_str(r#"<main class="container margin-vert--lg"><ul class="post-list">"#);
    for post in posts {
        body.push_str(r#"<li class="post-list-item">"#);
        body.push_str(&link_to(post.permalink(), post.title(), "post-list-link"));
        body.push_str(&format!(
            r#"<time class="post-list-date">{}</time>"#,
            post.metadata.date.format("%Y-%m-%d")
        ));
        if !post.categories().is_empty() {
            let categories: Vec<_> = post.categories().iter().map(|c| html_escape(c)).collect();
            body.push_str(&format!(
                r#"<span class="post-list-categories">{}</span>"#,
                categories.join(", ")
            ));
        }
        if let Some(description) = &post.metadata.description {
            body.push_str(&format!(
                r#"<p class="post-list-description">{}</p>"#,
                html_escape(&truncate(description, 140, None))
            ));
        }
        body.push_str("</li>");
    }
    body.push_str("</ul>");

    body.push_str(&paginator(
        current,
        total,
        &url_for(config, "/"),
        &config.blog.pagination_dir,
        &config.sidebar.prev_text,
        &config.sidebar.next_text,
        2,
    ));
    body.push_str("</main>");

    let title = if current == 1 {
        config.title.clone()
    } else {
        format!("Page {}", current)
    };
    layout(config, &title, &body)
}

/// URL path of index page `page`
pub fn index_url(config: &SiteConfig, page: usize) -> String {
    index_page_url(&url_for(config, "/"), &config.blog.pagination_dir, page)
}

/// A post page: desktop sidebar, the post source, the post paginator and the mobile sidebar
pub fn post_page(
    config: &SiteConfig,
    post: &Post,
    desktop_sidebar: &str,
    mobile_sidebar: &str,
    post_paginator: &str,
) -> String {
    let body = format!(
        r#"<div class="container margin-vert--lg"><div class="row">{desktop}<main class="col col--7"><article class="blog-post" data-permalink="{permalink}"><h1 class="blog-post-title">{title}</h1><time>{date}</time><pre class="markdown">{raw}</pre></article>{paginator}</main></div><div class="navbar-sidebar">{mobile}</div></div>"#,
        desktop = desktop_sidebar,
        permalink = html_escape(post.permalink()),
        title = html_escape(post.title()),
        date = post.metadata.date.format("%Y-%m-%d"),
        raw = html_escape(&post.raw),
        paginator = post_paginator,
        mobile = mobile_sidebar,
    );
    layout(config, post.title(), &body)
}
