use egui::{Color32, Context, RichText};
use crate::events::AppEvent;
use crate::ui::{UiComponent, UiContext};

#[derive(Default)]
pub struct TopPanel {
    last_status: Option<String>,
    last_error: Option<String>,
}

impl UiComponent for TopPanel {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext) {
        let session = &ui_ctx.session;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🎨 Turntable");
                ui.separator();
                ui.label(RichText::new("Status:").color(Color32::LIGHT_BLUE));

                if session.loading {
                    ui.spinner();
                    ui.label("Generating...");
                } else if session.error.is_some() {
                    let failed = ui.label(RichText::new("Failed").color(Color32::from_rgb(255, 100, 100)));
                    if let Some(ref e) = self.last_error {
                        failed.on_hover_text(e);
                    }
                } else if let Some(ref s) = self.last_status {
                    ui.label(RichText::new(s).color(Color32::from_rgb(100, 255, 100)));
                } else {
                    ui.label("Ready");
                }
            });
        });
    }

    fn on_app_event(&mut self, ev: &AppEvent) {
        match ev {
            AppEvent::Status(s) => self.last_status = Some(s.clone()),
            AppEvent::SubmissionStarted => {
                self.last_status = None;
                self.last_error = None;
            }
            AppEvent::SubmissionFailed(e) => {
                self.last_status = None;
                self.last_error = Some(e.clone());
            }
            AppEvent::ResultReady => self.last_error = None,
        }
    }
}
