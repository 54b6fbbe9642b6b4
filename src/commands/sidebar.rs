//! Render a sidebar for a route from the command line

use anyhow::{Context, Result};

use crate::plugins::PostList;
use crate::sidebar::{SidebarController, StateRoutes, Variant, ViewState};
use crate::theme::SidebarRenderer;
use crate::Blog;

/// Options for a one-off sidebar render
#[derive(Debug, Clone)]
pub struct SidebarOptions {
    /// Route the sidebar is rendered for; its link is marked active
    pub route: String,
    /// Category option to select; `None` keeps the "all" sentinel
    pub category: Option<String>,
    /// Page to show (mobile)
    pub page: usize,
    pub variant: Variant,
}

/// Render the sidebar the way a page would after the given user actions
pub fn render(blog: &Blog, list: &PostList, options: &SidebarOptions) -> String {
    let config = &blog.config;
    let items = &list[..config.blog.sidebar_count.take(list.len())];
    let mut controller =
        SidebarController::new(items, config.sidebar.page_size, &config.sidebar.all_label);

    if let Some(category) = &options.category {
        controller.set_category(category);
    }
    let requested = options.page.max(1);
    let state = ViewState {
        selection: controller.state().selection.clone(),
        current_page: requested,
    };
    let controller = controller.with_state(state);
    if controller.current_page() != requested {
        tracing::warn!(
            "Page {} is out of range, showing page {} of {}",
            options.page,
            controller.current_page(),
            controller.total_pages()
        );
    }

    render_controller(blog, &controller, options.variant, &options.route)
}

/// Render the sidebar for a state parsed from a query string
pub fn render_query(
    blog: &Blog,
    list: &PostList,
    route: &str,
    variant: Variant,
    state: ViewState,
) -> String {
    let config = &blog.config;
    let items = &list[..config.blog.sidebar_count.take(list.len())];
    let controller = SidebarController::new(items, config.sidebar.page_size, &config.sidebar.all_label)
        .with_state(state);

    render_controller(blog, &controller, variant, route)
}

/// Controls link to the generated state pages unless those are turned off
fn render_controller(
    blog: &Blog,
    controller: &SidebarController<'_>,
    variant: Variant,
    route: &str,
) -> String {
    let config = &blog.config;
    let routes = StateRoutes::from_controller(controller);
    let renderer = SidebarRenderer::new(&config.sidebar);
    let renderer = if config.sidebar.state_pages {
        renderer.with_routes(&routes)
    } else {
        renderer
    };
    renderer.render(&config.blog.sidebar_title, controller, variant, route)
}

/// Run the sidebar command
pub fn run(blog: &Blog, options: &SidebarOptions) -> Result<()> {
    let build = blog.build()?;
    let list = build
        .post_list()
        .context("No blog posts were published; nothing to render")?;
    println!("{}", render(blog, list, options));
    Ok(())
}
