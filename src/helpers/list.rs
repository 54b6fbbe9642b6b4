//! List helpers: category counts and the numbered index pager

use indexmap::IndexMap;

use crate::plugins::PostSummary;

/// Count posts per category, in first-appearance order
pub fn category_counts(posts: &[PostSummary]) -> IndexMap<&str, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for post in posts {
        for category in &post.categories {
            *counts.entry(category.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// URL of index page `page` under `base_url`
pub fn index_page_url(base_url: &str, pagination_dir: &str, page: usize) -> String {
    if page <= 1 {
        base_url.to_string()
    } else {
        format!("{}{}/{}/", base_url, pagination_dir, page)
    }
}

/// Generate the numbered pager for the blog index
pub fn paginator(
    current: usize,
    total: usize,
    base_url: &str,
    pagination_dir: &str,
    prev_text: &str,
    next_text: &str,
    mid_size: usize,
) -> String {
    if total <= 1 {
        return String::new();
    }

    let url = |page: usize| index_page_url(base_url, pagination_dir, page);
    let mut html = r#"<nav class="pagination">"#.to_string();

    if current > 1 {
        html.push_str(&format!(
            r#"<a class="pagination-prev" href="{}">{}</a>"#,
            url(current - 1),
            prev_text
        ));
    } else {
        html.push_str(&format!(
            r#"<span class="pagination-prev disabled">{}</span>"#,
            prev_text
        ));
    }

    html.push_str(r#"<span class="pagination-numbers">"#);

    let start = current.saturating_sub(mid_size).max(1);
    let end = (current + mid_size).min(total);

    if start > 1 {
        html.push_str(&format!(
            r#"<a class="pagination-number" href="{}">1</a>"#,
            url(1)
        ));
        if start > 2 {
            html.push_str(r#"<span class="pagination-ellipsis">…</span>"#);
        }
    }

    for page in start..=end {
        if page == current {
            html.push_str(&format!(
                r#"<span class="pagination-number current">{}</span>"#,
                page
            ));
        } else {
            html.push_str(&format!(
                r#"<a class="pagination-number" href="{}">{}</a>"#,
                url(page),
                page
            ));
        }
    }

    if end < total {
        if end < total - 1 {
            html.push_str(r#"<span class="pagination-ellipsis">…</span>"#);
        }
        html.push_str(&format!(
            r#"<a class="pagination-number" href="{}">{}</a>"#,
            url(total),
            total
        ));
    }

    html.push_str("</span>");

    if current < total {
        html.push_str(&format!(
            r#"<a class="pagination-next" href="{}">{}</a>"#,
            url(current + 1),
            next_text
        ));
    } else {
        html.push_str(&format!(
            r#"<span class="pagination-next disabled">{}</span>"#,
            next_text
        ));
    }

    html.push_str("</nav>");
    html
}
