use std::sync::Arc;
use std::time::Duration;
use egui_wgpu::wgpu;
use egui_wgpu::wgpu::StoreOp;
use futures::future::join_all;
use log::{debug, info, warn};
use tokio::runtime::Handle;
use uuid::Uuid;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;
use tt_core::{GenerationResult, SubmitError};
use crate::api::{GenerationApi, HttpGenerationApi};
use crate::config::AppConfig;
use crate::controller::RequestController;
use crate::events::{AppEvent, GenEvent, TtEvent};
use crate::gfx::GfxState;
use crate::ui;
use crate::ui::{UiEvent, UiState};

/// When egui wants the next frame
pub enum Repaint {
    Now,
    After(Duration),
    Idle,
}

pub struct AppState {
    pub(crate) window: Arc<Window>,
    event_loop_proxy: Arc<EventLoopProxy<TtEvent>>,
    runtime: Handle,

    pub gfx: GfxState,
    pub ui: UiState,

    api: Arc<HttpGenerationApi>,
    controller: RequestController,
}

impl AppState {
    pub async fn new(
        window: Arc<Window>,
        event_loop_proxy: Arc<EventLoopProxy<TtEvent>>,
        config: &AppConfig,
        runtime: Handle,
    ) -> anyhow::Result<Self> {
        let gfx = GfxState::new(window.clone()).await?;
        let mut ui_state = UiState::new(&gfx, window.clone(), event_loop_proxy.clone());

        ui_state.add_component(Box::new(ui::TopPanel::default()));
        ui_state.add_component(Box::new(ui::SidePanel::default()));
        ui_state.add_component(Box::new(ui::CentralPanel::default()));

        info!("Using generation API at {}", config.api_base_url);
        let api = Arc::new(HttpGenerationApi::new(config.api_base_url.clone()));

        Ok(Self {
            window,
            event_loop_proxy,
            runtime,
            gfx,
            ui: ui_state,
            api,
            controller: RequestController::new(),
        })
    }

    fn send(&self, event: TtEvent) {
        if self.event_loop_proxy.send_event(event).is_err() {
            warn!("Event loop closed, dropping event");
        }
    }

    pub fn push_event(&self, event: AppEvent) {
        self.send(TtEvent::App(event));
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gfx.resize(new_size);
    }

    fn sync_session(&mut self) {
        self.ui.set_session(self.controller.session());
    }

    pub fn on_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Submit(input) => {
                match self.controller.begin(input) {
                    Ok(submission) => {
                        self.ui.ui_ctx.textures.begin(submission.id);
                        self.push_event(AppEvent::SubmissionStarted);

                        let api = self.api.clone();
                        let proxy = self.event_loop_proxy.clone();
                        self.runtime.spawn(async move {
                            let outcome = api.generate(&submission.input).await;
                            let event = TtEvent::Gen(GenEvent::Finished { id: submission.id, outcome });
                            if proxy.send_event(event).is_err() {
                                warn!("Event loop closed before submission {} finished", submission.id);
                            }
                        });
                    }
                    Err(SubmitError::Busy) => {
                        debug!("Submission ignored, another one is in flight");
                    }
                    Err(e) => {
                        self.push_event(AppEvent::SubmissionFailed(e.to_string()));
                    }
                }
            }
            UiEvent::DismissError => {
                self.controller.dismiss_error();
            }
        }
        self.sync_session();
    }

    pub fn on_app_event(&mut self, event: AppEvent) {
        self.ui.broadcast(&event);
    }

    /// Handle completions of spawned network work
    pub fn on_gen_event(&mut self, event: GenEvent) {
        match event {
            GenEvent::Finished { id, outcome } => {
                match self.controller.finish(id, outcome) {
                    Some(Ok(result)) => {
                        info!("Generation for '{}' complete", result.product_name);
                        self.fetch_side_views(id, &result);
                        self.push_event(AppEvent::ResultReady);
                        let status = result.generated_in_label().unwrap_or_else(|| "Views ready".into());
                        self.push_event(AppEvent::Status(status));
                    }
                    Some(Err(e)) => {
                        self.push_event(AppEvent::SubmissionFailed(e.to_string()));
                    }
                    None => {}
                }
                self.sync_session();
            }
            GenEvent::ImageFetched { submission, url, image } => match image {
                Ok(image) => {
                    let ctx = self.ui.egui_ctx.clone();
                    self.ui.ui_ctx.textures.insert_image(&ctx, submission, &url, &image);
                }
                Err(reason) => {
                    warn!("{}", reason);
                    self.ui.ui_ctx.textures.insert_failed(submission, &url, reason);
                }
            },
        }
    }

    /// Download the four side views concurrently, each one reported as it lands
    fn fetch_side_views(&mut self, submission: Uuid, result: &GenerationResult) {
        let urls: Vec<String> = result.side_views
            .iter()
            .map(|(_, url)| url.to_string())
            .filter(|url| self.ui.ui_ctx.textures.mark_pending(url))
            .collect();

        let api = self.api.clone();
        let proxy = self.event_loop_proxy.clone();
        self.runtime.spawn(async move {
            join_all(urls.into_iter().map(|url| {
                let api = api.clone();
                let proxy = proxy.clone();
                async move {
                    let image = api.fetch_image(&url).await
                        .map(Arc::new)
                        .map_err(|e| e.to_string());
                    let event = TtEvent::Gen(GenEvent::ImageFetched { submission, url, image });
                    if proxy.send_event(event).is_err() {
                        warn!("Event loop closed, dropping side view download");
                    }
                }
            })).await;
        });
    }

    pub fn render(&mut self) -> anyhow::Result<Repaint> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(Repaint::Idle);
        }

        let output = match self.gfx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gfx.reconfigure();
                return Ok(Repaint::Now);
            }
            Err(e) => return Err(e.into()),
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.gfx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder")
        });

        let full_output = self.ui.draw(&self.window);

        let platform_output = full_output.platform_output.clone();
        self.ui.egui_state.handle_platform_output(&self.window, platform_output);

        let paint_jobs = self.ui.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_desc = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.ui.egui_renderer.update_texture(&self.gfx.device, &self.gfx.queue, *id, delta);
        }

        self.ui.egui_renderer.update_buffers(
            &self.gfx.device,
            &self.gfx.queue,
            &mut encoder,
            &paint_jobs,
            &screen_desc,
        );

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.1, g: 0.1, b: 0.1, a: 1.0 }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            self.ui.egui_renderer.render(&mut rpass.forget_lifetime(), &paint_jobs, &screen_desc);
        }

        for id in &full_output.textures_delta.free {
            self.ui.egui_renderer.free_texture(id);
        }

        self.gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        let repaint = match full_output.viewport_output.get(&egui::ViewportId::ROOT) {
            Some(viewport) if viewport.repaint_delay.is_zero() => Repaint::Now,
            Some(viewport) if viewport.repaint_delay < Duration::MAX => Repaint::After(viewport.repaint_delay),
            _ => Repaint::Idle,
        };

        Ok(repaint)
    }
}
