//! Shared UI crate for Adlens. Parsing, aggregation and every view live here;
//! the `web` and `desktop` crates only provide routing and launch.

pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
