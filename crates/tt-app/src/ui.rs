mod top_panel;
mod side_panel;
mod central_panel;
mod gallery_view;
mod sprite_view;

pub use top_panel::TopPanel;
pub use side_panel::SidePanel;
pub use central_panel::CentralPanel;

use std::sync::Arc;
use egui::Context;
use log::warn;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;
use crate::controller::Session;
use crate::events::{AppEvent, TtEvent};
use crate::gfx::GfxState;
use crate::textures::TextureStore;
use crate::upload::UploadInput;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Submit(UploadInput),
    DismissError,
}

/// Data shared with every component while drawing
pub struct UiContext {
    pub session: Session,
    pub textures: TextureStore,
    pub event_loop_proxy: Arc<EventLoopProxy<TtEvent>>,
}

impl UiContext {
    pub fn new(event_loop_proxy: Arc<EventLoopProxy<TtEvent>>) -> Self {
        Self {
            session: Session::default(),
            textures: TextureStore::default(),
            event_loop_proxy,
        }
    }

    pub fn send_event(&self, event: UiEvent) {
        if self.event_loop_proxy.send_event(TtEvent::Ui(event)).is_err() {
            warn!("Event loop closed, dropping UI event");
        }
    }
}

pub struct UiState {
    pub(crate) egui_state: egui_winit::State,
    pub(crate) egui_ctx: egui::Context,
    pub(crate) egui_renderer: egui_wgpu::Renderer,

    components: Vec<Box<dyn UiComponent>>,
    pub(crate) ui_ctx: UiContext,
}

impl UiState {
    pub fn new(gfx: &GfxState, window: Arc<Window>, event_loop_proxy: Arc<EventLoopProxy<TtEvent>>) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gfx.device, gfx.config.format, egui_wgpu::RendererOptions::default());

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
            components: Vec::new(),
            ui_ctx: UiContext::new(event_loop_proxy),
        }
    }

    pub fn draw(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);

        self.egui_ctx.run(raw_input, |ctx| {
            for component in self.components.iter_mut() {
                component.show(ctx, &self.ui_ctx);
            }
        })
    }

    pub fn add_component(&mut self, component: Box<dyn UiComponent>) {
        self.components.push(component);
    }

    pub fn set_session(&mut self, session: Session) {
        self.ui_ctx.session = session;
    }

    pub fn broadcast(&mut self, event: &AppEvent) {
        for component in self.components.iter_mut() {
            component.on_app_event(event);
        }
    }
}

pub trait UiComponent {
    fn show(&mut self, ctx: &Context, ui_ctx: &UiContext);

    fn on_app_event(&mut self, _e: &AppEvent) {}
}
