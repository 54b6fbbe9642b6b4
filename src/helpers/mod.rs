//! Helper functions shared by the page renderers

mod html;
mod list;
mod url;

pub use html::*;
pub use list::*;
pub use url::*;
