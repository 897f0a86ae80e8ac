//! Add Project screen

use eframe::egui::{self, RichText};

use crate::form::{EntityForm, FormMode, SubmitOutcome, ADD_PROJECT};
use crate::store::EntityStore;
use crate::ui::components::{
    file_field, render_fields, section_frame, submit_button, PreviewTextures,
};
use crate::ui::ScreenContext;

pub struct AddProjectScreen {
    form: EntityForm,
    textures: PreviewTextures,
}

impl AddProjectScreen {
    pub fn new() -> Self {
        Self {
            form: EntityForm::new(&ADD_PROJECT, FormMode::Create),
            textures: PreviewTextures::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.form.is_busy()
    }

    pub fn abandon(&mut self) {
        self.form.abandon();
    }

    /// Apply finished work, then show the submission result.
    pub fn poll(&mut self, cx: &mut ScreenContext<'_>) {
        self.form.poll(cx.toasts);
        self.form.reflect(&mut cx.store.projects, cx.toasts);
    }

    pub fn render(&mut self, cx: &mut ScreenContext<'_>, ui: &mut egui::Ui) {
        let theme = cx.theme;
        ui.heading(RichText::new("ADD NEW PROJECT").color(theme.text_primary).strong());
        ui.add_space(12.0);

        section_frame(ui, theme, "Project Banner", |ui| {
            if let Some(spec) = ADD_PROJECT.field("projectBanner") {
                file_field(ui, theme, &mut self.form, spec, &mut self.textures);
            }
        });
        ui.add_space(12.0);

        section_frame(ui, theme, "Details", |ui| {
            render_fields(ui, theme, &mut self.form);
        });
        ui.add_space(12.0);

        let pending = cx.store.projects.status().is_pending();
        if submit_button(ui, theme, pending, "Add Project", "ADDING NEW PROJECT") {
            if let SubmitOutcome::Invalid(errors) = self.form.submit(&mut cx.store.projects) {
                tracing::debug!("Add project blocked by {} field errors", errors.len());
            }
        }
    }
}

impl Default for AddProjectScreen {
    fn default() -> Self {
        Self::new()
    }
}
