use egui::{Color32, Rect, RichText, Sense, Ui, Vec2};
use log::debug;
use tt_core::SideViews;
use tt_core::sprite::SpriteViewer;
use crate::textures::TextureStore;

const VIEWPORT_HEIGHT: f32 = 500.0;

/// Billboard that follows the orbit camera, standing in for a 3D view
#[derive(Default)]
pub struct SpriteView {
    pub viewer: SpriteViewer,
}

impl SpriteView {
    pub fn reset(&mut self) {
        self.viewer.reset();
    }

    pub fn show(&mut self, ui: &mut Ui, views: &SideViews, textures: &TextureStore) {
        let size = Vec2::new(ui.available_width(), VIEWPORT_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

        let mut camera_changed = false;
        if response.dragged() {
            camera_changed |= self.viewer.camera.drag(response.drag_delta().x);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            camera_changed |= self.viewer.camera.zoom(scroll);
        }
        if self.viewer.camera.auto_rotate() {
            let dt = ui.input(|i| i.stable_dt);
            camera_changed |= self.viewer.camera.advance(dt);
            ui.ctx().request_repaint();
        }

        if camera_changed {
            if let Some(key) = self.viewer.sync() {
                debug!("Billboard now shows the {} view", key.id());
            }
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, Color32::from_gray(20));

        let side = rect.height() * self.viewer.quad_screen_fraction();
        let quad = Rect::from_center_size(rect.center(), Vec2::splat(side));
        let url = views.get(self.viewer.current());

        match textures.texture(url) {
            Some(texture) => {
                // Clipped to the viewport when zoomed in
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), quad, uv, Color32::WHITE);
            }
            None => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Loading...",
                    egui::FontId::proportional(14.0),
                    Color32::GRAY,
                );
            }
        }

        painter.text(
            rect.left_top() + Vec2::new(12.0, 12.0),
            egui::Align2::LEFT_TOP,
            format!(
                "{:.0}° · {}",
                self.viewer.camera.yaw_degrees(),
                self.viewer.current().label()
            ),
            egui::FontId::monospace(13.0),
            Color32::WHITE,
        );

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let label = if self.viewer.camera.auto_rotate() { "Stop Rotation" } else { "Auto Rotate" };
            if ui.button(label).clicked() {
                self.viewer.camera.toggle_auto_rotate();
            }
            ui.label(RichText::new("Drag to rotate • Scroll to zoom").color(Color32::GRAY));
        });
    }
}
