//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Join the non-empty class names
pub fn class_names(classes: &[&str]) -> String {
    classes
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate an anchor tag; `href` and `text` are escaped
///
/// # Examples
/// ```ignore
/// link_to("/a/", "A & B", "menu__link") // -> <a class="menu__link" href="/a/">A &amp; B</a>
/// ```
pub fn link_to(href: &str, text: &str, class: &str) -> String {
    if class.is_empty() {
        format!(r#"<a href="{}">{}</a>"#, html_escape(href), html_escape(text))
    } else {
        format!(
            r#"<a class="{}" href="{}">{}</a>"#,
            html_escape(class),
            html_escape(href),
            html_escape(text)
        )
    }
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="blog-sidebar {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}
