//! Dashboard: project list and entry points to the edit screens

use eframe::egui::{self, RichText};

use crate::nav::Route;
use crate::store::EntityStore;
use crate::ui::components::section_frame;
use crate::ui::ScreenContext;

/// Render the dashboard content
pub fn render_dashboard(cx: &mut ScreenContext<'_>, ui: &mut egui::Ui) {
    let theme = cx.theme;

    ui.horizontal(|ui| {
        ui.heading(RichText::new("DASHBOARD").color(theme.text_primary).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Update Profile").clicked() {
                cx.nav.navigate(Route::UpdateProfile);
            }
            if ui.button("Add Project").clicked() {
                cx.nav.navigate(Route::AddProject);
            }
        });
    });
    ui.add_space(12.0);

    render_profile_summary(cx, ui);
    ui.add_space(12.0);

    let projects = &cx.store.projects;
    let loading = projects.list_loading();
    let mut refresh = false;
    let mut edit = None;

    section_frame(ui, theme, "Projects", |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} projects", projects.projects.len()))
                    .color(theme.text_muted),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if loading {
                    ui.spinner();
                } else if ui.button("Refresh").clicked() {
                    refresh = true;
                }
            });
        });

        if let Some(ref error) = projects.list_error {
            ui.colored_label(theme.error, format!("Failed to load projects: {}", error));
        }
        ui.add_space(8.0);

        if projects.projects.is_empty() && !loading {
            ui.label(RichText::new("No projects yet").color(theme.text_muted));
            return;
        }

        egui::Grid::new("projects_grid")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Title").color(theme.text_muted).size(11.0));
                ui.label(RichText::new("Stack").color(theme.text_muted).size(11.0));
                ui.label(RichText::new("Deployed").color(theme.text_muted).size(11.0));
                ui.label("");
                ui.end_row();

                for project in &projects.projects {
                    ui.label(
                        RichText::new(project.title.as_deref().unwrap_or("Untitled"))
                            .color(theme.text_primary),
                    );
                    ui.label(project.stack.as_deref().unwrap_or("-"));
                    let deployed = project.deployed.as_deref().unwrap_or("-");
                    let color = if deployed == "Yes" {
                        theme.success
                    } else {
                        theme.text_secondary
                    };
                    ui.label(RichText::new(deployed).color(color));
                    if ui.small_button("Edit").clicked() {
                        edit = Some(project.id.clone());
                    }
                    ui.end_row();
                }
            });
    });

    if refresh {
        cx.store.projects.refresh();
    }
    if let Some(id) = edit {
        cx.nav.navigate(Route::UpdateProject { id });
    }
}

fn render_profile_summary(cx: &mut ScreenContext<'_>, ui: &mut egui::Ui) {
    let theme = cx.theme;
    let slice = &cx.store.user;

    section_frame(ui, theme, "Profile", |ui| match (&slice.user, &slice.load_error) {
        (Some(user), _) => {
            ui.label(
                RichText::new(user.full_name.as_deref().unwrap_or("Unnamed"))
                    .color(theme.text_primary)
                    .size(16.0)
                    .strong(),
            );
            if let Some(ref email) = user.email {
                ui.label(RichText::new(email).color(theme.text_secondary));
            }
        }
        (None, Some(error)) => {
            ui.colored_label(theme.error, format!("Failed to load profile: {}", error));
        }
        (None, None) if slice.loading() => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading profile...").color(theme.text_muted));
            });
        }
        (None, None) => {
            ui.label(RichText::new("No profile loaded").color(theme.text_muted));
        }
    });
}
