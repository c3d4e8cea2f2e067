//! Session-wide dashboard state.
//!
//! The shells call [`provide_dashboard_session`] in their root `App`, above the
//! router, so the loaded dataset and filters outlive any single page.

use dioxus::prelude::*;

use super::DashboardState;

/// Create the session's `Signal<DashboardState>` and expose it as context.
pub fn provide_dashboard_session() -> Signal<DashboardState> {
    use_context_provider(|| Signal::new(DashboardState::default()))
}

/// The session state provided by [`provide_dashboard_session`].
pub fn use_dashboard_state() -> Signal<DashboardState> {
    use_context::<Signal<DashboardState>>()
}
