//! Shared UI components for the edit screens

use std::collections::HashMap;

use eframe::egui::{self, RichText, Vec2};

use crate::form::preview::decode_data_uri;
use crate::form::{EntityForm, FieldKind, FieldSpec, FileSelection};
use crate::notify::{ToastKind, Toasts};
use crate::ui::theme::Theme;

const FIELD_WIDTH: f32 = 520.0;
const PREVIEW_WIDTH: f32 = 320.0;

/// Render a titled frame around a group of widgets
pub fn section_frame<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(12.0);
            content(ui)
        })
        .inner
}

/// Render one text, textarea or select field bound to the form record
pub fn field_input(ui: &mut egui::Ui, theme: &Theme, form: &mut EntityForm, spec: &FieldSpec) {
    ui.label(RichText::new(spec.label).color(theme.text_secondary));

    let error = form.error_for(spec.name).map(str::to_string);
    let Some(value) = form.record_mut().text_mut(spec.name) else {
        return;
    };

    match spec.kind {
        FieldKind::Text | FieldKind::Email => {
            ui.add(
                egui::TextEdit::singleline(value)
                    .hint_text(spec.placeholder)
                    .desired_width(FIELD_WIDTH),
            );
        }
        FieldKind::TextArea => {
            ui.add(
                egui::TextEdit::multiline(value)
                    .hint_text(spec.placeholder)
                    .desired_rows(4)
                    .desired_width(FIELD_WIDTH),
            );
        }
        FieldKind::Select(options) => {
            let selected = options
                .iter()
                .find(|(v, _)| *v == value.as_str())
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| {
                    if value.is_empty() {
                        spec.placeholder.to_string()
                    } else {
                        value.clone()
                    }
                });
            egui::ComboBox::from_id_salt(spec.name)
                .selected_text(selected)
                .width(FIELD_WIDTH)
                .show_ui(ui, |ui| {
                    for (option, label) in options {
                        ui.selectable_value(value, option.to_string(), *label);
                    }
                });
        }
        FieldKind::File => {}
    }

    if let Some(message) = error {
        ui.colored_label(theme.error, message);
    }
    ui.add_space(8.0);
}

/// Render every non-file field of the form in declaration order
pub fn render_fields(ui: &mut egui::Ui, theme: &Theme, form: &mut EntityForm) {
    let schema = form.record().schema();
    for spec in schema.fields.iter().filter(|f| !f.kind.is_file()) {
        field_input(ui, theme, form, spec);
    }
}

/// Decoded preview textures, rebuilt only when the preview source changes
#[derive(Default)]
pub struct PreviewTextures {
    textures: HashMap<&'static str, (String, Option<egui::TextureHandle>)>,
}

impl PreviewTextures {
    fn texture(
        &mut self,
        ctx: &egui::Context,
        field: &'static str,
        source: &str,
    ) -> Option<&egui::TextureHandle> {
        let stale = self
            .textures
            .get(field)
            .is_none_or(|(cached, _)| cached != source);
        if stale {
            let texture = decode_preview(ctx, field, source);
            self.textures.insert(field, (source.to_string(), texture));
        }
        self.textures.get(field).and_then(|(_, t)| t.as_ref())
    }
}

fn decode_preview(ctx: &egui::Context, field: &str, source: &str) -> Option<egui::TextureHandle> {
    let (mime, bytes) = decode_data_uri(source)?;
    if !mime.starts_with("image/") {
        return None;
    }
    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image.into_rgba8(),
        Err(e) => {
            tracing::warn!("Cannot decode preview for {}: {}", field, e);
            return None;
        }
    };
    let (width, height) = image.dimensions();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        image.as_raw(),
    );
    Some(ctx.load_texture(
        format!("preview-{}", field),
        color_image,
        egui::TextureOptions::default(),
    ))
}

/// Render a file field: its preview and a picker button
pub fn file_field(
    ui: &mut egui::Ui,
    theme: &Theme,
    form: &mut EntityForm,
    spec: &'static FieldSpec,
    textures: &mut PreviewTextures,
) {
    ui.label(RichText::new(spec.label).color(theme.text_secondary));

    match form.preview().get(spec.name).map(str::to_string) {
        Some(source) if source.starts_with("data:") => {
            if let Some(texture) = textures.texture(ui.ctx(), spec.name, &source) {
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::from_handle(texture))
                        .max_width(PREVIEW_WIDTH),
                );
            } else if let Some(file) = form.record().get(spec.name).and_then(|v| v.as_file()) {
                ui.label(RichText::new(&file.file_name).color(theme.text_primary));
            }
        }
        Some(url) => {
            ui.hyperlink_to(RichText::new("Current file").color(theme.accent), url);
        }
        None => {
            ui.label(RichText::new("No file selected").color(theme.text_muted));
        }
    }

    if ui.button("Choose file...").clicked() {
        let selection = rfd::FileDialog::new()
            .set_title(spec.label)
            .pick_file()
            .map(FileSelection::single)
            .unwrap_or_default();
        form.select_file(spec.name, selection);
    }
    ui.add_space(8.0);
}

/// Submit button, replaced by a non-interactive spinner while pending
pub fn submit_button(
    ui: &mut egui::Ui,
    theme: &Theme,
    pending: bool,
    label: &str,
    pending_label: &str,
) -> bool {
    if pending {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new(pending_label).color(theme.text_muted));
        });
        return false;
    }

    let button = egui::Button::new(RichText::new(label).color(egui::Color32::WHITE).strong())
        .fill(theme.accent_muted)
        .min_size(Vec2::new(200.0, 32.0));
    ui.add(button).clicked()
}

/// Render toasts stacked in the bottom-right corner
pub fn render_toasts(ctx: &egui::Context, theme: &Theme, toasts: &mut Toasts) {
    if toasts.is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (i, toast) in toasts.iter().enumerate() {
                let color = match toast.kind {
                    ToastKind::Success => theme.success,
                    ToastKind::Error => theme.error,
                };
                egui::Frame::new()
                    .fill(theme.bg_medium)
                    .corner_radius(6.0)
                    .inner_margin(10.0)
                    .stroke(egui::Stroke::new(1.0, color))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&toast.message).color(color));
                            if ui.small_button("x").clicked() {
                                dismissed = Some(i);
                            }
                        });
                    });
                ui.add_space(6.0);
            }
        });

    if let Some(i) = dismissed {
        toasts.dismiss(i);
    }
}
