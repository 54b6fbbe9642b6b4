//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::Feature;
pub use site::HeroButton;
pub use site::HomeConfig;
pub use site::PaginatorConfig;
pub use site::SidebarConfig;
pub use site::SidebarCount;
pub use site::SiteConfig;
