//! Desktop and mobile sidebar markup

use crate::config::SidebarConfig;
use crate::helpers::{class_names, html_escape, link_to, with_query};
use crate::plugins::PostSummary;
use crate::sidebar::{Selection, SidebarController, StateRoutes, Variant, ViewState};

const NAV_LABEL: &str = "Blog recent posts navigation";

/// Whether a link target is the page being rendered
///
/// Trailing slashes are ignored so `/a/` and `/a` match.
pub fn is_active(permalink: &str, current_route: &str) -> bool {
    permalink.trim_end_matches('/') == current_route.trim_end_matches('/')
}

/// Renders a sidebar for one route
pub struct SidebarRenderer<'c> {
    config: &'c SidebarConfig,
    routes: Option<&'c StateRoutes>,
}

impl<'c> SidebarRenderer<'c> {
    pub fn new(config: &'c SidebarConfig) -> Self {
        Self {
            config,
            routes: None,
        }
    }

    /// Link category and page controls to pre-generated state pages
    ///
    /// Without routes, or for a state with no page, controls link to
    /// `?category=&page=` on the route instead.
    pub fn with_routes(mut self, routes: &'c StateRoutes) -> Self {
        self.routes = Some(routes);
        self
    }

    /// URL showing `state` on `current_route`
    pub fn state_url(
        &self,
        controller: &SidebarController<'_>,
        current_route: &str,
        state: &ViewState,
    ) -> String {
        self.routes
            .and_then(|routes| routes.url_for(current_route, state))
            .unwrap_or_else(|| with_query(current_route, &state.to_query(controller.all_label())))
    }

    /// Render `controller`'s current view; `current_route` marks the active link
    pub fn render(
        &self,
        title: &str,
        controller: &SidebarController<'_>,
        variant: Variant,
        current_route: &str,
    ) -> String {
        match variant {
            Variant::Desktop => self.render_desktop(title, controller, current_route),
            Variant::Mobile => self.render_mobile(controller, current_route),
        }
    }

    fn render_desktop(
        &self,
        title: &str,
        controller: &SidebarController<'_>,
        current_route: &str,
    ) -> String {
        let mut html = String::from(r#"<aside class="col col--2">"#);
        html.push_str(&format!(
            r#"<nav class="sidebar thin-scrollbar" aria-label="{}">"#,
            NAV_LABEL
        ));
        html.push_str(&format!(
            r#"<div class="sidebar-item-title margin-bottom--md">{}</div>"#,
            html_escape(title)
        ));
        html.push_str(&self.category_filter(controller, current_route, "category-select"));

        html.push_str(r#"<ul class="sidebar-item-list clean-list">"#);
        for item in controller.filtered_items() {
            html.push_str(r#"<li class="sidebar-item">"#);
            html.push_str(&item_link(
                item,
                current_route,
                "sidebar-item-link",
                "sidebar-item-link--active",
            ));
            html.push_str("</li>");
        }
        html.push_str("</ul></nav></aside>");
        html
    }

    fn render_mobile(&self, controller: &SidebarController<'_>, current_route: &str) -> String {
        let mut html = String::from(r#"<div class="sidebar-mobile">"#);
        html.push_str(&self.category_filter(controller, current_route, "category-select-mobile"));

        html.push_str(r#"<ul class="menu__list">"#);
        for item in controller.page_items() {
            html.push_str(r#"<li class="menu__list-item">"#);
            html.push_str(&item_link(
                item,
                current_route,
                "menu__link",
                "menu__link--active",
            ));
            html.push_str("</li>");
        }
        html.push_str("</ul>");
        html.push_str(&self.pager(controller, current_route));
        html.push_str("</div>");
        html
    }

    /// Category `<select>`; each option's value is the page showing that category
    fn category_filter(
        &self,
        controller: &SidebarController<'_>,
        current_route: &str,
        id: &str,
    ) -> String {
        let selected = controller.selected_option();
        let mut html = String::from(r#"<div class="category-filter margin-bottom--md">"#);
        html.push_str(&format!(
            r#"<label for="{}" class="category-label">{}</label>"#,
            id,
            html_escape(&self.config.category_label)
        ));
        html.push_str(&format!(
            r#"<select id="{}" class="category-select" onchange="location.href=this.value">"#,
            id
        ));
        for option in controller.categories() {
            // Picking an option lands on page 1 of that category
            let state = ViewState {
                selection: Selection::from_option(option, controller.all_label()),
                current_page: 1,
            };
            let href = html_escape(&self.state_url(controller, current_route, &state));
            let label = html_escape(option);
            if option == selected {
                html.push_str(&format!(
                    r#"<option value="{}" selected>{}</option>"#,
                    href, label
                ));
            } else {
                html.push_str(&format!(r#"<option value="{}">{}</option>"#, href, label));
            }
        }
        html.push_str("</select></div>");
        html
    }

    /// Prev/next controls, disabled at either end
    fn pager(&self, controller: &SidebarController<'_>, current_route: &str) -> String {
        let page = controller.current_page();
        let total = controller.total_pages();
        let link_for = |page: usize| {
            let state = ViewState {
                selection: controller.state().selection.clone(),
                current_page: page,
            };
            self.state_url(controller, current_route, &state)
        };

        let mut html = String::from(r#"<div class="sidebar-pager">"#);
        if controller.has_prev() {
            html.push_str(&link_to(
                &link_for(page - 1),
                &self.config.prev_text,
                "button button--sm",
            ));
        } else {
            html.push_str(&format!(
                r#"<span class="button button--sm disabled">{}</span>"#,
                html_escape(&self.config.prev_text)
            ));
        }
        html.push_str(&format!(
            r#"<span class="sidebar-pager-status">{} / {}</span>"#,
            page, total
        ));
        if controller.has_next() {
            html.push_str(&link_to(
                &link_for(page + 1),
                &self.config.next_text,
                "button button--sm",
            ));
        } else {
            html.push_str(&format!(
                r#"<span class="button button--sm disabled">{}</span>"#,
                html_escape(&self.config.next_text)
            ));
        }
        html.push_str("</div>");
        html
    }
}

fn item_link(item: &PostSummary, current_route: &str, class: &str, active_class: &str) -> String {
    let active = if is_active(&item.permalink, current_route) {
        active_class
    } else {
        ""
    };
    link_to(&item.permalink, &item.title, &class_names(&[class, active]))
}
