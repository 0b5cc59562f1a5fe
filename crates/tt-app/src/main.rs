mod api;
mod app;
mod config;
mod controller;
mod error;
mod events;
mod gfx;
mod state;
mod textures;
mod ui;
mod upload;

use std::error::Error;
use tokio::runtime::Handle;
use winit::event_loop::{ControlFlow, EventLoop};
use crate::config::AppConfig;
use crate::events::TtEvent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;

    let mut event_loop: EventLoop<TtEvent> = EventLoop::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = app::App::new(&mut event_loop, config, Handle::current());
    event_loop.run_app(&mut app)?;

    Ok(())
}
