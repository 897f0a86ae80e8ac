//! UI modules for the admin dashboard
//!
//! One module per screen plus the shared theme and components. Screens get
//! the store, navigator and toasts lent through `ScreenContext`.

pub mod components;
mod add_project;
mod dashboard;
pub mod theme;
mod update_profile;
mod update_project;

use std::sync::Arc;

pub use add_project::AddProjectScreen;
pub use dashboard::render_dashboard;
pub use update_profile::UpdateProfileScreen;
pub use update_project::UpdateProjectScreen;

use crate::api::PortfolioApi;
use crate::nav::Navigator;
use crate::notify::Toasts;
use crate::store::AppStore;
use theme::Theme;

/// Everything a screen may touch during one frame
pub struct ScreenContext<'a> {
    pub theme: &'a Theme,
    pub api: &'a Arc<dyn PortfolioApi>,
    pub store: &'a mut AppStore,
    pub nav: &'a mut Navigator,
    pub toasts: &'a mut Toasts,
}
