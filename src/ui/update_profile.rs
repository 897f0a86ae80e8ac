//! Update Profile screen

use eframe::egui::{self, RichText};

use crate::form::{EntityForm, EntitySnapshot, FormMode, UPDATE_PROFILE};
use crate::store::EntityStore;
use crate::ui::components::{
    file_field, render_fields, section_frame, submit_button, PreviewTextures,
};
use crate::ui::ScreenContext;

pub struct UpdateProfileScreen {
    form: EntityForm,
    textures: PreviewTextures,
}

impl UpdateProfileScreen {
    pub fn new() -> Self {
        Self {
            form: EntityForm::new(&UPDATE_PROFILE, FormMode::Create),
            textures: PreviewTextures::default(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.form.is_busy()
    }

    pub fn abandon(&mut self) {
        self.form.abandon();
    }

    /// Seed from the loaded user once, then apply finished work.
    pub fn poll(&mut self, cx: &mut ScreenContext<'_>) {
        if !self.form.is_seeded() {
            if let Some(user) = &cx.store.user.user {
                self.form.seed_once(&EntitySnapshot::from_entity(user));
            }
        }
        self.form.poll(cx.toasts);
        self.form.reflect(&mut cx.store.user, cx.toasts);
    }

    pub fn render(&mut self, cx: &mut ScreenContext<'_>, ui: &mut egui::Ui) {
        let theme = cx.theme;
        ui.heading(RichText::new("UPDATE PROFILE").color(theme.text_primary).strong());
        ui.add_space(12.0);

        if let Some(ref error) = cx.store.user.load_error {
            ui.colored_label(theme.error, format!("Failed to load profile: {}", error));
            ui.add_space(8.0);
        }

        let resume_url = cx
            .store
            .user
            .user
            .as_ref()
            .and_then(|u| u.resume.as_ref())
            .map(|a| a.url.clone());
        let toasts = &mut *cx.toasts;
        section_frame(ui, theme, "Avatar & Resume", |ui| {
            for spec in UPDATE_PROFILE.file_fields() {
                file_field(ui, theme, &mut self.form, spec, &mut self.textures);
            }

            if let Some(url) = resume_url {
                if ui.button("View Resume").clicked() {
                    if let Err(e) = open::that(&url) {
                        tracing::error!("Failed to open resume {}: {}", url, e);
                        toasts.error(format!("Failed to open resume: {}", e));
                    }
                }
            }
        });
        ui.add_space(12.0);

        section_frame(ui, theme, "Profile", |ui| {
            render_fields(ui, theme, &mut self.form);
        });
        ui.add_space(12.0);

        let pending = cx.store.user.status().is_pending();
        if submit_button(ui, theme, pending, "Update Profile", "Updating") {
            self.form.submit(&mut cx.store.user);
        }
    }
}

impl Default for UpdateProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}
