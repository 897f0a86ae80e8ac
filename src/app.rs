use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::{self, RichText};

use crate::api::PortfolioApi;
use crate::config::Config;
use crate::form::reflect;
use crate::nav::{Navigator, Route};
use crate::notify::Toasts;
use crate::store::{AppStore, EntityStore, StoreEvent};
use crate::ui::components::render_toasts;
use crate::ui::theme::Theme;
use crate::ui::{
    render_dashboard, AddProjectScreen, ScreenContext, UpdateProfileScreen, UpdateProjectScreen,
};

/// The screen currently mounted. Dropping a variant drops its form tasks.
enum Screen {
    Dashboard,
    AddProject(AddProjectScreen),
    UpdateProject(UpdateProjectScreen),
    UpdateProfile(UpdateProfileScreen),
}

impl Screen {
    fn mount(nav: &Navigator) -> Self {
        match (nav.current(), nav.entity_id()) {
            (Route::AddProject, _) => Screen::AddProject(AddProjectScreen::new()),
            (Route::UpdateProject { .. }, Some(id)) => {
                Screen::UpdateProject(UpdateProjectScreen::new(id.to_string()))
            }
            (Route::UpdateProfile, _) => Screen::UpdateProfile(UpdateProfileScreen::new()),
            _ => Screen::Dashboard,
        }
    }

    /// Cancel in-flight fetches and file reads before the screen is swapped out
    fn abandon(&mut self) {
        match self {
            Screen::Dashboard => {}
            Screen::AddProject(s) => s.abandon(),
            Screen::UpdateProject(s) => s.abandon(),
            Screen::UpdateProfile(s) => s.abandon(),
        }
    }

    fn is_busy(&self) -> bool {
        match self {
            Screen::Dashboard => false,
            Screen::AddProject(s) => s.is_busy(),
            Screen::UpdateProject(s) => s.is_busy(),
            Screen::UpdateProfile(s) => s.is_busy(),
        }
    }
}

/// Main application state
pub struct AdminApp {
    /// Application configuration
    config: Config,
    /// Backend client shared with the store and screens
    api: Arc<dyn PortfolioApi>,
    /// Shared client-side store
    store: AppStore,
    nav: Navigator,
    toasts: Toasts,
    screen: Screen,
    theme: Theme,
    /// Whether the theme must be re-applied on the next frame
    theme_dirty: bool,
}

impl AdminApp {
    /// Create a new application instance
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        api: Arc<dyn PortfolioApi>,
        start: Route,
    ) -> Self {
        let mut store = AppStore::new(api.clone());
        store.projects.refresh();
        store.user.refresh();

        let theme = Theme::from_config(config.ui.dark_theme);
        let toasts = Toasts::new(Duration::from_secs(config.ui.toast_seconds));
        tracing::info!("Opening {} against {}", start, config.api.base_url);
        let nav = Navigator::new(start);
        let screen = Screen::mount(&nav);

        Self {
            config,
            api,
            store,
            nav,
            toasts,
            screen,
            theme,
            theme_dirty: true,
        }
    }

    fn log_store_events(events: Vec<StoreEvent>) {
        for event in events {
            match event {
                StoreEvent::LogError(msg) => tracing::error!("{}", msg),
                StoreEvent::LogInfo(msg) => tracing::info!("{}", msg),
            }
        }
    }

    /// Swap the mounted screen if navigation was requested
    fn apply_navigation(&mut self) {
        if self.nav.take_change().is_some() {
            self.screen.abandon();
            self.screen = Screen::mount(&self.nav);
        }
    }

    /// Show outcomes for slices the mounted screen does not observe
    fn reflect_unobserved(&mut self) {
        let store = &mut self.store;
        match self.screen {
            Screen::Dashboard => {
                reflect(&mut store.projects, &mut self.toasts);
                reflect(&mut store.user, &mut self.toasts);
            }
            Screen::AddProject(_) | Screen::UpdateProject(_) => {
                reflect(&mut store.user, &mut self.toasts);
            }
            Screen::UpdateProfile(_) => reflect(&mut store.projects, &mut self.toasts),
        }
    }

    fn toggle_theme(&mut self) {
        self.config.ui.dark_theme = !self.config.ui.dark_theme;
        self.theme = Theme::from_config(self.config.ui.dark_theme);
        self.theme_dirty = true;
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.theme_dirty {
            self.theme.apply(ctx);
            self.theme_dirty = false;
        }

        Self::log_store_events(self.store.poll());
        self.apply_navigation();
        self.reflect_unobserved();

        let mut cx = ScreenContext {
            theme: &self.theme,
            api: &self.api,
            store: &mut self.store,
            nav: &mut self.nav,
            toasts: &mut self.toasts,
        };

        match &mut self.screen {
            Screen::Dashboard => {}
            Screen::AddProject(s) => s.poll(&mut cx),
            Screen::UpdateProject(s) => s.poll(&mut cx),
            Screen::UpdateProfile(s) => s.poll(&mut cx),
        }

        let mut toggle_theme = false;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.selectable_label(matches!(self.screen, Screen::Dashboard), "Dashboard").clicked() {
                    cx.nav.navigate(Route::Dashboard);
                }
                ui.label(RichText::new(cx.nav.current().path()).color(cx.theme.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if cx.theme.dark { "Light" } else { "Dark" };
                    if ui.button(label).clicked() {
                        toggle_theme = true;
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match &mut self.screen {
                Screen::Dashboard => render_dashboard(&mut cx, ui),
                Screen::AddProject(s) => s.render(&mut cx, ui),
                Screen::UpdateProject(s) => s.render(&mut cx, ui),
                Screen::UpdateProfile(s) => s.render(&mut cx, ui),
            });
        });

        self.toasts.expire(Instant::now());
        render_toasts(ctx, &self.theme, &mut self.toasts);

        if toggle_theme {
            self.toggle_theme();
        }

        if self.store.is_busy() || self.screen.is_busy() || !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for AdminApp {
    fn drop(&mut self) {
        if self.store.projects.status().is_pending() || self.store.user.status().is_pending() {
            tracing::warn!("Closing with a submission still in flight");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_follows_navigator() {
        let mut nav = Navigator::new(Route::UpdateProject { id: "42".into() });
        match Screen::mount(&nav) {
            Screen::UpdateProject(s) => assert_eq!(s.entity_id(), Some("42")),
            _ => panic!("expected the update project screen"),
        }

        nav.navigate(Route::UpdateProfile);
        assert!(nav.take_change().is_some());
        assert!(matches!(Screen::mount(&nav), Screen::UpdateProfile(_)));

        nav.navigate(Route::Dashboard);
        assert!(nav.take_change().is_some());
        assert!(matches!(Screen::mount(&nav), Screen::Dashboard));
    }
}
