//! Update Project screen

use std::sync::Arc;

use eframe::egui::{self, RichText};

use crate::api::PortfolioApi;
use crate::form::{EntityForm, EntitySnapshot, FormMode, UPDATE_PROJECT};
use crate::nav::Route;
use crate::store::EntityStore;
use crate::ui::components::{
    file_field, render_fields, section_frame, submit_button, PreviewTextures,
};
use crate::ui::ScreenContext;

pub struct UpdateProjectScreen {
    form: EntityForm,
    textures: PreviewTextures,
}

impl UpdateProjectScreen {
    pub fn new(id: String) -> Self {
        Self {
            form: EntityForm::new(&UPDATE_PROJECT, FormMode::Update { id }),
            textures: PreviewTextures::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.form.is_busy()
    }

    pub fn abandon(&mut self) {
        self.form.abandon();
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.form.entity_id()
    }

    /// Fetch the project on first poll, then apply finished work.
    pub fn poll(&mut self, cx: &mut ScreenContext<'_>) {
        let api: Arc<dyn PortfolioApi> = Arc::clone(cx.api);
        self.form.fetch_once(move |id| async move {
            api.get_project(&id)
                .await
                .map(|project| EntitySnapshot::from_entity(&project))
        });
        self.form.poll(cx.toasts);
        self.form.reflect(&mut cx.store.projects, cx.toasts);
    }

    pub fn render(&mut self, cx: &mut ScreenContext<'_>, ui: &mut egui::Ui) {
        let theme = cx.theme;
        ui.horizontal(|ui| {
            ui.heading(RichText::new("UPDATE PROJECT").color(theme.text_primary).strong());
            if let Some(id) = self.entity_id() {
                ui.label(RichText::new(id).color(theme.text_muted));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Return to Dashboard").clicked() {
                    cx.nav.navigate(Route::Dashboard);
                }
            });
        });
        ui.add_space(12.0);

        if self.form.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading project...").color(theme.text_muted));
            });
            ui.add_space(8.0);
        }

        section_frame(ui, theme, "Project Banner", |ui| {
            if let Some(spec) = UPDATE_PROJECT.field("projectBanner") {
                file_field(ui, theme, &mut self.form, spec, &mut self.textures);
            }
        });
        ui.add_space(12.0);

        section_frame(ui, theme, "Details", |ui| {
            render_fields(ui, theme, &mut self.form);
        });
        ui.add_space(12.0);

        let pending = cx.store.projects.status().is_pending();
        if submit_button(ui, theme, pending, "Update", "Updating") {
            self.form.submit(&mut cx.store.projects);
        }
    }
}
