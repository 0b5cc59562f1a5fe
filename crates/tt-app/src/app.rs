use std::sync::Arc;
use std::time::Instant;
use log::error;
use tokio::runtime::Handle;
use winit::{
    event::*,
    event_loop::ActiveEventLoop,
};
use winit::application::ApplicationHandler;
use winit::event_loop::{ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{WindowAttributes, WindowId};
use crate::config::AppConfig;
use crate::events::TtEvent;
use crate::state::{AppState, Repaint};

pub struct App {
    event_loop_proxy: Arc<EventLoopProxy<TtEvent>>,
    config: AppConfig,
    runtime: Handle,
    state: Option<AppState>,
}

impl App {
    pub fn new(event_loop: &mut EventLoop<TtEvent>, config: AppConfig, runtime: Handle) -> Self {
        let event_loop_proxy = Arc::new(event_loop.create_proxy());

        Self {
            event_loop_proxy,
            config,
            runtime,
            state: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        match state.render() {
            Ok(Repaint::Now) => state.window.request_redraw(),
            Ok(Repaint::After(delay)) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + delay));
            }
            Ok(Repaint::Idle) => event_loop.set_control_flow(ControlFlow::Wait),
            Err(e) => error!("Render failed: {}", e),
        }
    }
}

impl ApplicationHandler<TtEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = WindowAttributes::default()
            .with_title("Turntable - Product Views")
            .with_inner_size(winit::dpi::LogicalSize::new(1400.0, 900.0));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let state = pollster::block_on(AppState::new(
            window.clone(),
            self.event_loop_proxy.clone(),
            &self.config,
            self.runtime.clone(),
        ));

        match state {
            Ok(state) => {
                self.state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                error!("Failed to initialize: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(state) = &self.state {
                state.window.request_redraw();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: TtEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            TtEvent::Ui(e) => state.on_ui_event(e),
            TtEvent::App(e) => state.on_app_event(e),
            TtEvent::Gen(e) => state.on_gen_event(e),
        }
        state.window.request_redraw();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        if state.window.id() != window_id {
            return;
        }

        // Let egui handle the event first
        let response = state.ui.egui_state.on_window_event(&state.window, &event);

        if response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                state.resize(physical_size);
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}
