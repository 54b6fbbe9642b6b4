//! Theme components: sidebars, post paginator and page layouts

pub mod layout;
mod paginator;
mod sidebar;

pub use paginator::blog_post_paginator;
pub use sidebar::{is_active, SidebarRenderer};
