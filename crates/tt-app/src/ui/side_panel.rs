use std::path::Path;
use chrono::Utc;
use egui::{Color32, Context, RichText, TextEdit};
use log::{info, warn};
use crate::events::AppEvent;
use crate::ui::{UiComponent, UiContext, UiEvent};
use crate::upload::{IMAGE_EXTENSIONS, ImageFile, UploadInput};

#[derive(Default)]
pub struct SidePanel {
    pub product_name: String,
    pub image: Option<ImageFile>,
    pick_error: Option<String>,
}

impl SidePanel {
    fn load_image(&mut self, path: &Path) {
        match ImageFile::from_path(path) {
            Ok(image) => {
                info!("Selected {} ({})", image.file_name, image.mime);
                self.image = Some(image);
                self.pick_error = None;
            }
            Err(e) => {
                warn!("{}", e);
                self.pick_error = Some(e.to_string());
            }
        }
    }

    fn take_dropped_file(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| {
            i.raw.dropped_files.iter().find_map(|f| f.path.clone())
        });
        if let Some(path) = dropped {
            self.load_image(&path);
        }
    }

    fn show_image_picker(&mut self, ui: &mut egui::Ui) {
        let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke_color = if hovering_files || self.image.is_some() {
            Color32::from_rgb(99, 102, 241)
        } else {
            Color32::from_gray(80)
        };

        let response = egui::Frame::new()
            .stroke(egui::Stroke::new(2.0, stroke_color))
            .corner_radius(12.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| match &self.image {
                    Some(image) => {
                        ui.label(RichText::new("🖼").size(32.0));
                        ui.label(RichText::new(&image.file_name).color(Color32::from_rgb(99, 102, 241)));
                    }
                    None => {
                        ui.label(RichText::new("⬆").size(32.0));
                        ui.label(RichText::new("Click or drop an image here").color(Color32::GRAY));
                    }
                });
            })
            .response
            .interact(egui::Sense::click());

        if response.clicked() {
            let picked = rfd::FileDialog::new()
                .add_filter("Image", IMAGE_EXTENSIONS)
                .pick_file();
            if let Some(path) = picked {
                self.load_image(&path);
            }
        }

        if let Some(ref e) = self.pick_error {
            ui.label(RichText::new(e).small().color(Color32::from_rgb(255, 100, 100)));
        }
    }
}

impl UiComponent for SidePanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext) {
        self.take_dropped_file(ctx);
        let session = &ui_ctx.session;

        egui::SidePanel::left("side_panel")
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Turntable");
                ui.label(
                    RichText::new("Turn one product photo into four side views")
                        .small()
                        .color(Color32::LIGHT_BLUE)
                );
                ui.separator();

                // === Product name ===
                ui.label(RichText::new("📦 Product Name").strong());
                ui.add(
                    TextEdit::singleline(&mut self.product_name)
                        .desired_width(f32::INFINITY)
                        .hint_text("e.g. Neon Cyberpunk Headphones")
                );
                ui.add_space(12.0);

                // === Product image ===
                ui.label(RichText::new("🖼 Product Image").strong());
                self.show_image_picker(ui);
                ui.add_space(12.0);

                let label = if session.loading { "Generating..." } else { "✨ Generate Views" };
                let generate_button = ui.add_enabled(
                    !session.loading,
                    egui::Button::new(RichText::new(label).size(14.0))
                        .min_size(egui::vec2(ui.available_width(), 30.0))
                );

                if generate_button.clicked() {
                    ui_ctx.send_event(UiEvent::Submit(UploadInput::new(
                        self.image.clone(),
                        self.product_name.clone(),
                    )));
                }

                if session.loading {
                    ui.add_space(8.0);
                    egui::Frame::new()
                        .fill(Color32::from_rgb(30, 50, 80))
                        .inner_margin(10.0)
                        .corner_radius(5.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label("Generating side views...");
                            });
                            if let Some(started) = session.started_at {
                                let elapsed = (Utc::now() - started).num_seconds();
                                ui.label(
                                    RichText::new(format!("Elapsed: {}s", elapsed))
                                        .small()
                                        .color(Color32::GRAY)
                                );
                            }
                        });
                }

                // === Error banner ===
                if let Some(ref error) = session.error {
                    ui.add_space(8.0);
                    egui::Frame::new()
                        .fill(Color32::from_rgb(60, 20, 20))
                        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(255, 100, 100)))
                        .inner_margin(10.0)
                        .corner_radius(5.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(error).color(Color32::from_rgb(255, 100, 100)));
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    if ui.small_button("✕").clicked() {
                                        ui_ctx.send_event(UiEvent::DismissError);
                                    }
                                });
                            });
                        });
                }
            });
    }

    fn on_app_event(&mut self, ev: &AppEvent) {
        if let AppEvent::SubmissionStarted = ev {
            self.pick_error = None;
        }
    }
}
