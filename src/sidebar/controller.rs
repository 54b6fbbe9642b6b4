//! Category filtering and pagination over a post list

use indexmap::IndexSet;

use super::state::{Selection, ViewState};
use crate::plugins::PostSummary;

/// Items matching `selection`, in list order
pub fn filtered_items<'a>(items: &'a [PostSummary], selection: &Selection) -> Vec<&'a PostSummary> {
    items.iter().filter(|item| selection.matches(item)).collect()
}

/// Number of pages needed for `count` items; at least 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// The `page`-th (1-based) slice of `items`, clipped to the available length
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Select options: the sentinel, then every category in first-appearance order
pub fn category_options<'a>(items: &'a [PostSummary], all_label: &'a str) -> IndexSet<&'a str> {
    let mut options = IndexSet::new();
    options.insert(all_label);
    for item in items {
        for category in &item.categories {
            options.insert(category.as_str());
        }
    }
    options
}

/// Drives one sidebar instance: owns its [`ViewState`], borrows the post list
#[derive(Debug, Clone)]
pub struct SidebarController<'a> {
    items: &'a [PostSummary],
    state: ViewState,
    page_size: usize,
    all_label: String,
}

impl<'a> SidebarController<'a> {
    pub fn new(items: &'a [PostSummary], page_size: usize, all_label: &str) -> Self {
        Self {
            items,
            state: ViewState::default(),
            page_size: page_size.max(1),
            all_label: all_label.to_string(),
        }
    }

    /// Start from an existing state, clamping its page into range
    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self.state.current_page = self.state.current_page.clamp(1, self.total_pages());
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn items(&self) -> &'a [PostSummary] {
        self.items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn all_label(&self) -> &str {
        &self.all_label
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// The select option currently chosen
    pub fn selected_option(&self) -> &str {
        self.state.selection.as_option(&self.all_label)
    }

    /// Select a category option and go back to the first page
    ///
    /// Unknown categories are accepted; they simply match nothing.
    pub fn set_category(&mut self, option: &str) {
        self.state.selection = Selection::from_option(option, &self.all_label);
        self.state.current_page = 1;
        tracing::debug!("Sidebar category set to {:?}", self.state.selection);
    }

    pub fn categories(&self) -> IndexSet<&str> {
        category_options(self.items, &self.all_label)
    }

    pub fn filtered_items(&self) -> Vec<&'a PostSummary> {
        filtered_items(self.items, &self.state.selection)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_items().len(), self.page_size)
    }

    /// Items on the current page of the filtered list
    pub fn page_items(&self) -> Vec<&'a PostSummary> {
        let filtered = self.filtered_items();
        page_slice(&filtered, self.state.current_page, self.page_size).to_vec()
    }

    pub fn has_next(&self) -> bool {
        self.state.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.state.current_page > 1
    }

    /// Advance one page; no-op on the last page
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.state.current_page += 1;
        }
    }

    /// Go back one page; no-op on the first page
    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.state.current_page -= 1;
        }
    }

    /// Every state a visitor can reach by picking a category and paging forward
    pub fn reachable_states(&self) -> Vec<ViewState> {
        let mut states = Vec::new();
        let mut walker = self.clone();
        for option in self.categories() {
            walker.set_category(option);
            loop {
                states.push(walker.state().clone());
                if !walker.has_next() {
                    break;
                }
                walker.next_page();
            }
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(i: usize, categories: &[&str]) -> PostSummary {
        PostSummary {
            permalink: format!("/posts/{}/", i),
            title: format!("Post {}", i),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn untagged(n: usize) -> Vec<PostSummary> {
        (0..n).map(|i| summary(i, &[])).collect()
    }

    #[test]
    fn test_filter_returns_matching_subset_in_order() {
        let items = vec![
            summary(0, &["go"]),
            summary(1, &["rust"]),
            summary(2, &["rust", "go"]),
            summary(3, &[]),
        ];
        let mut sidebar = SidebarController::new(&items, 10, "all");
        sidebar.set_category("go");

        let permalinks: Vec<_> = sidebar
            .filtered_items()
            .iter()
            .map(|p| p.permalink.as_str())
            .collect();
        assert_eq!(permalinks, vec!["/posts/0/", "/posts/2/"]);
    }

    #[test]
    fn test_all_sentinel_is_identity() {
        let items = vec![summary(0, &["go"]), summary(1, &[]), summary(2, &["x"])];
        let sidebar = SidebarController::new(&items, 10, "all");
        let filtered: Vec<PostSummary> = sidebar.filtered_items().into_iter().cloned().collect();
        assert_eq!(filtered, items);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let items = vec![summary(0, &["go"])];
        let mut sidebar = SidebarController::new(&items, 10, "all");
        sidebar.set_category("haskell");
        assert!(sidebar.filtered_items().is_empty());
        assert!(sidebar.page_items().is_empty());
        assert_eq!(sidebar.total_pages(), 1);
        assert_eq!(sidebar.current_page(), 1);
    }

    #[test]
    fn test_category_options_deduplicated() {
        let items = vec![
            summary(0, &["go", "web"]),
            summary(1, &["rust"]),
            summary(2, &["web", "go"]),
        ];
        let sidebar = SidebarController::new(&items, 10, "すべて");
        let options: Vec<_> = sidebar.categories().into_iter().collect();
        assert_eq!(options, vec!["すべて", "go", "web", "rust"]);
    }

    #[test]
    fn test_category_named_like_sentinel_is_shadowed() {
        let items = vec![
            summary(0, &["all", "go"]),
            summary(1, &["go"]),
            summary(2, &[]),
        ];
        let mut sidebar = SidebarController::new(&items, 10, "all");
        let options: Vec<_> = sidebar.categories().into_iter().collect();
        assert_eq!(options, vec!["all", "go"]);

        sidebar.set_category("go");
        sidebar.set_category("all");
        assert_eq!(sidebar.state().selection, Selection::All);
        assert_eq!(sidebar.filtered_items().len(), 3);
    }

    #[test]
    fn test_reachable_states() {
        let mut items = untagged(12);
        items[0].categories.push("go".into());
        let sidebar = SidebarController::new(&items, 10, "all");

        let states = sidebar.reachable_states();
        let pages: Vec<_> = states
            .iter()
            .map(|s| (s.selection.as_option("all"), s.current_page))
            .collect();
        assert_eq!(pages, vec![("all", 1), ("all", 2), ("go", 1)]);
        // the walk does not disturb the original
        assert_eq!(sidebar.state(), &ViewState::default());
    }

    #[test]
    fn test_total_pages_formula() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_last_page_length() {
        for n in 1..=35 {
            let items = untagged(n);
            let mut sidebar = SidebarController::new(&items, 10, "all");
            let pages = sidebar.total_pages();
            for _ in 1..pages {
                sidebar.next_page();
            }
            assert_eq!(sidebar.current_page(), pages);
            let last = sidebar.page_items().len();
            assert_eq!(last, n - 10 * (pages - 1));
            assert!((1..=10).contains(&last));
        }
    }

    #[test]
    fn test_empty_list() {
        let items: Vec<PostSummary> = Vec::new();
        let mut sidebar = SidebarController::new(&items, 10, "all");
        assert_eq!(sidebar.total_pages(), 1);
        assert!(sidebar.page_items().is_empty());
        sidebar.next_page();
        assert_eq!(sidebar.current_page(), 1);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let items = untagged(15);
        let mut sidebar = SidebarController::new(&items, 10, "all");
        sidebar.prev_page();
        assert_eq!(sidebar.current_page(), 1);
        sidebar.next_page();
        assert_eq!(sidebar.current_page(), 2);
        sidebar.next_page();
        assert_eq!(sidebar.current_page(), 2);
    }

    #[test]
    fn test_category_change_resets_page() {
        let mut items = untagged(25);
        items[3].categories.push("go".into());
        let mut sidebar = SidebarController::new(&items, 10, "all");
        sidebar.next_page();
        sidebar.next_page();
        assert_eq!(sidebar.current_page(), 3);

        sidebar.set_category("go");
        assert_eq!(sidebar.current_page(), 1);

        sidebar.set_category("all");
        assert_eq!(sidebar.current_page(), 1);
        assert_eq!(sidebar.filtered_items().len(), 25);
    }

    #[test]
    fn test_twelve_posts_five_tagged() {
        let items: Vec<_> = (0..12)
            .map(|i| if i % 2 == 0 && i < 10 { summary(i, &["go"]) } else { summary(i, &[]) })
            .collect();
        let mut sidebar = SidebarController::new(&items, 10, "all");
        sidebar.set_category("go");

        assert_eq!(sidebar.filtered_items().len(), 5);
        assert_eq!(sidebar.total_pages(), 1);
        assert_eq!(sidebar.page_items(), sidebar.filtered_items());
    }

    #[test]
    fn test_twenty_five_untagged() {
        let items = untagged(25);
        let mut sidebar = SidebarController::new(&items, 10, "all");

        assert_eq!(sidebar.total_pages(), 3);
        assert_eq!(sidebar.page_items().len(), 10);
        assert_eq!(sidebar.page_items()[0].permalink, "/posts/0/");

        sidebar.next_page();
        sidebar.next_page();
        assert_eq!(sidebar.current_page(), 3);
        assert_eq!(sidebar.page_items().len(), 5);
        assert_eq!(sidebar.page_items()[0].permalink, "/posts/20/");

        sidebar.next_page();
        assert_eq!(sidebar.current_page(), 3);
    }

    #[test]
    fn test_with_state_clamps_page() {
        let items = untagged(12);
        let state = ViewState {
            selection: Selection::All,
            current_page: 9,
        };
        let sidebar = SidebarController::new(&items, 10, "all").with_state(state);
        assert_eq!(sidebar.current_page(), 2);
    }

    #[test]
    fn test_page_slice_clips() {
        let data = [1, 2, 3];
        assert_eq!(page_slice(&data, 1, 2), &[1, 2]);
        assert_eq!(page_slice(&data, 2, 2), &[3]);
        assert!(page_slice(&data, 5, 2).is_empty());
    }
}
