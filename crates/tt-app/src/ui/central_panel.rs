use egui::{Color32, Context, RichText, Ui};
use serde_json::Value;
use tt_core::GenerationResult;
use crate::events::AppEvent;
use crate::textures::TextureStore;
use crate::ui::gallery_view::GalleryView;
use crate::ui::sprite_view::SpriteView;
use crate::ui::{UiComponent, UiContext};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    #[default]
    Gallery,
    Sprite,
}

#[derive(Default)]
pub struct CentralPanel {
    mode: ViewMode,
    gallery: GalleryView,
    sprite: SpriteView,
}

impl CentralPanel {
    fn show_result(&mut self, ui: &mut Ui, result: &GenerationResult, textures: &TextureStore) {
        ui.heading("Generated Assets");
        ui.horizontal(|ui| {
            ui.label(RichText::new(&result.product_name).strong());
            if let Some(label) = result.generated_in_label() {
                ui.separator();
                ui.label(RichText::new(format!("⏱ {}", label)).color(Color32::GRAY));
            }
        });
        if let Some(ref message) = result.message {
            ui.label(RichText::new(message).small().color(Color32::LIGHT_BLUE));
        }
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.mode, ViewMode::Gallery, "🖼 Gallery");
            ui.selectable_value(&mut self.mode, ViewMode::Sprite, "🔄 3D Viewer");
        });
        ui.separator();

        match self.mode {
            ViewMode::Gallery => self.gallery.show(ui, &result.side_views, &result.product_name, textures),
            ViewMode::Sprite => self.sprite.show(ui, &result.side_views, textures),
        }

        if let Some(ref asset) = result.model_3d {
            ui.separator();
            ui.horizontal(|ui| {
                ui.label("3D model:");
                let text = if asset.format.is_empty() {
                    asset.url.clone()
                } else {
                    format!("{} ({})", asset.format.to_uppercase(), asset.kind)
                };
                ui.hyperlink_to(text, &asset.url);
            });
        }

        if let Some(ref analysis) = result.analysis {
            ui.separator();
            ui.collapsing("🔍 Analysis", |ui| {
                egui::Grid::new("analysis_grid").striped(true).show(ui, |ui| {
                    for (key, value) in analysis {
                        ui.label(RichText::new(key).strong());
                        ui.label(format_value(value));
                        ui.end_row();
                    }
                });
            });
        }
    }
}

impl UiComponent for CentralPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(result) = ui_ctx.session.result.clone() else {
                ui.centered_and_justified(|ui| {
                    let hint = if ui_ctx.session.loading {
                        "Generating side views..."
                    } else {
                        "Enter a product name, choose a photo and press Generate."
                    };
                    ui.label(RichText::new(hint).color(Color32::GRAY).size(16.0));
                });
                return;
            };

            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.show_result(ui, &result, &ui_ctx.textures);
                });
        });
    }

    fn on_app_event(&mut self, ev: &AppEvent) {
        match ev {
            // A stale enlarged image must never sit over new results
            AppEvent::SubmissionStarted | AppEvent::ResultReady => {
                self.gallery.reset();
                self.sprite.reset();
            }
            _ => {}
        }
    }
}

/// Compact single-line rendering of an analysis value
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(format_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
