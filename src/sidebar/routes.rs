//! Static URLs for sidebar states
//!
//! A static site cannot answer `?category=&page=`, so every reachable
//! [`ViewState`] of a post page is written under the post's permalink:
//! `<permalink>category/<slug>/page/<n>/`. The default state is the post page
//! itself.

use indexmap::{IndexMap, IndexSet};

use super::controller::SidebarController;
use super::state::{Selection, ViewState};

/// Maps sidebar states to the paths of their pre-generated pages
#[derive(Debug, Clone)]
pub struct StateRoutes {
    /// Category option -> URL segment, unique within the option set
    slugs: IndexMap<String, String>,
    all_label: String,
}

impl StateRoutes {
    /// Build the slug table for a set of select options; the sentinel gets none
    pub fn new<'s>(options: impl IntoIterator<Item = &'s str>, all_label: &str) -> Self {
        let mut slugs = IndexMap::new();
        let mut taken = IndexSet::new();

        for option in options {
            if option == all_label || slugs.contains_key(option) {
                continue;
            }
            let base = match slug::slugify(option) {
                s if s.is_empty() => "category".to_string(),
                s => s,
            };
            // `C++` and `C` both slugify to `c`
            let mut candidate = base.clone();
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = format!("{}-{}", base, n);
                n += 1;
            }
            taken.insert(candidate.clone());
            slugs.insert(option.to_string(), candidate);
        }

        Self {
            slugs,
            all_label: all_label.to_string(),
        }
    }

    /// Routes for every category option a controller offers
    pub fn from_controller(controller: &SidebarController<'_>) -> Self {
        Self::new(controller.categories(), controller.all_label())
    }

    pub fn slug(&self, category: &str) -> Option<&str> {
        self.slugs.get(category).map(String::as_str)
    }

    /// Path of the page showing `state` on `route`
    ///
    /// `None` for a category outside the option set, which has no page.
    pub fn url_for(&self, route: &str, state: &ViewState) -> Option<String> {
        let category = match &state.selection {
            Selection::Category(c) if c != &self.all_label => Some(self.slug(c)?),
            _ => None,
        };
        if category.is_none() && state.current_page <= 1 {
            return Some(route.to_string());
        }

        let mut url = state_base(route);
        if let Some(slug) = category {
            url.push_str(&format!("category/{}/", slug));
        }
        if state.current_page > 1 {
            url.push_str(&format!("page/{}/", state.current_page));
        }
        Some(url)
    }
}

/// Directory URL the state pages of `route` live under
fn state_base(route: &str) -> String {
    let route = route.trim_end_matches('/');
    let route = route.strip_suffix(".html").unwrap_or(route);
    format!("{}/", route)
}
