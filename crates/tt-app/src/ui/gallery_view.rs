use egui::{Color32, Context, Rect, RichText, Sense, Ui, Vec2};
use tt_core::gallery::{Gallery, LightboxTarget};
use tt_core::{SideViews, ViewKey};
use crate::textures::{TextureSlot, TextureStore};

const THUMBNAIL_MIN_WIDTH: f32 = 200.0;
const THUMBNAIL_HEIGHT: f32 = 200.0;
const GRID_GAP: f32 = 20.0;

/// Four labeled thumbnails plus the lightbox overlay
#[derive(Default)]
pub struct GalleryView {
    pub gallery: Gallery,
}

impl GalleryView {
    pub fn reset(&mut self) {
        self.gallery.dismiss();
    }

    pub fn show(&mut self, ui: &mut Ui, views: &SideViews, product_name: &str, textures: &TextureStore) {
        ui.heading("Product Views");
        ui.add_space(10.0);

        // Same as a CSS auto-fit grid with a 200px minimum column
        let available = ui.available_width();
        let columns = (((available + GRID_GAP) / (THUMBNAIL_MIN_WIDTH + GRID_GAP)).floor() as usize).clamp(1, 4);
        let cell_width = (available - GRID_GAP * (columns as f32 - 1.0)) / columns as f32;

        let thumbnails = Gallery::thumbnails(views);
        for row in thumbnails.chunks(columns) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = GRID_GAP;
                for thumb in row {
                    if self.show_thumbnail(ui, thumb.key, thumb.label, thumb.url, cell_width, textures) {
                        self.gallery.select(thumb.key);
                    }
                }
            });
            ui.add_space(GRID_GAP);
        }

        self.show_lightbox(ui.ctx(), views, product_name, textures);
    }

    /// Returns true when clicked
    fn show_thumbnail(
        &self,
        ui: &mut Ui,
        key: ViewKey,
        label: &str,
        url: &str,
        width: f32,
        textures: &TextureStore,
    ) -> bool {
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(width, THUMBNAIL_HEIGHT + 36.0),
            Sense::click(),
        );
        let response = response.on_hover_text(url);

        let border = if response.hovered() || self.gallery.selection() == Some(key) {
            Color32::from_rgb(100, 108, 255)
        } else {
            Color32::from_gray(51)
        };

        let painter = ui.painter_at(rect);
        let image_rect = Rect::from_min_size(rect.min, Vec2::new(width, THUMBNAIL_HEIGHT));
        let label_rect = Rect::from_min_max(image_rect.left_bottom(), rect.max);

        painter.rect_filled(image_rect, 8.0, Color32::from_gray(245));
        painter.rect_filled(label_rect, 0.0, Color32::from_gray(26));

        paint_slot(ui, image_rect, textures.get(url));

        painter.text(
            label_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(14.0),
            Color32::WHITE,
        );
        painter.rect_stroke(rect, 8.0, egui::Stroke::new(2.0, border), egui::StrokeKind::Inside);

        response.clicked()
    }

    fn show_lightbox(&mut self, ctx: &Context, views: &SideViews, product_name: &str, textures: &TextureStore) {
        let Some(url) = self.gallery.selected_url(views) else {
            return;
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.gallery.on_escape();
            return;
        }

        let screen = ctx.screen_rect();
        let mut clicked = None;

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                // Background first so the image and close button sit on top of it
                let background = ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(screen, 0.0, Color32::from_black_alpha(230));

                let image_rect = fit_rect(screen, textures.texture(url).map(|t| t.size_vec2()));
                let image = ui.allocate_rect(image_rect, Sense::click());
                paint_slot(ui, image_rect, textures.get(url));
                ui.painter().text(
                    egui::pos2(screen.center().x, screen.max.y - 24.0),
                    egui::Align2::CENTER_CENTER,
                    product_name,
                    egui::FontId::proportional(16.0),
                    Color32::WHITE,
                );

                let close_rect = Rect::from_min_size(
                    egui::pos2(screen.max.x - 60.0, screen.min.y + 20.0),
                    Vec2::splat(40.0),
                );
                let close = ui.put(close_rect, egui::Button::new(RichText::new("✕").size(20.0)));

                if close.clicked() {
                    clicked = Some(LightboxTarget::CloseButton);
                } else if image.clicked() {
                    clicked = Some(LightboxTarget::Image);
                } else if background.clicked() {
                    clicked = Some(LightboxTarget::Background);
                }
            });

        if let Some(target) = clicked {
            self.gallery.on_lightbox_click(target);
        }
    }
}

/// Paint a texture slot into `rect`, letterboxed
fn paint_slot(ui: &Ui, rect: Rect, slot: Option<&TextureSlot>) {
    match slot {
        Some(TextureSlot::Ready(texture)) => {
            let target = fit_rect(rect, Some(texture.size_vec2()));
            egui::Image::new((texture.id(), target.size())).paint_at(ui, target);
        }
        Some(TextureSlot::Failed(reason)) => {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                format!("⚠ {}", reason),
                egui::FontId::proportional(11.0),
                Color32::from_rgb(200, 60, 60),
            );
        }
        Some(TextureSlot::Pending) | None => {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Loading...",
                egui::FontId::proportional(12.0),
                Color32::GRAY,
            );
        }
    }
}

/// Largest rect with the image's aspect ratio inside 90% of `outer`
fn fit_rect(outer: Rect, image_size: Option<Vec2>) -> Rect {
    let bounds = outer.size() * 0.9;
    let size = match image_size {
        Some(size) if size.x > 0.0 && size.y > 0.0 => {
            let scale = (bounds.x / size.x).min(bounds.y / size.y);
            size * scale
        }
        _ => Vec2::splat(bounds.x.min(bounds.y)),
    };
    Rect::from_center_size(outer.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_keeps_aspect() {
        let outer = Rect::from_min_size(egui::Pos2::ZERO, Vec2::new(1000.0, 500.0));
        let fitted = fit_rect(outer, Some(Vec2::new(200.0, 100.0)));
        assert!((fitted.size() - Vec2::new(900.0, 450.0)).length() < 0.01);
        assert!((fitted.center() - outer.center()).length() < 0.01);

        let square = fit_rect(outer, None);
        assert!((square.width() - square.height()).abs() < 0.01);
        assert!((square.height() - 450.0).abs() < 0.01);
    }
}
