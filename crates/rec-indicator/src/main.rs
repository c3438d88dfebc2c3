//! Rec-Indicator: always-on-top overlay showing whether OBS is recording or paused.

mod app;
mod config;
mod error;
mod overlay;
mod ui_command;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    ui_command::{UiCommand, UiSink},
};

use crate::{
    config::Config,
    overlay::{OverlayWindow, TaoOverlay, starts_drag},
};

use rec_indicator_core::Indicator;

use tao::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "rec_indicator=debug,rec_indicator_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };
    config.warn_missing_icons();

    let event_loop = EventLoopBuilder::<UiCommand>::with_user_event().build();
    let ui_proxy = event_loop.create_proxy();

    // The indicator and its window live on the main thread - tao windows
    // must be created and dropped on the event loop thread.
    let mut indicator: Indicator<OverlayWindow> = Indicator::new();
    let settings = config.connection_settings();

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                let app = App {
                    settings: settings.clone(),
                    ui: ui_proxy.clone(),
                };
                let ui_proxy = ui_proxy.clone();

                // Spawn tokio runtime on separate thread.
                // The event loop and overlay window stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            let _ = ui_proxy.send_event(UiCommand::Shutdown { exit_code: 1 });
                            return;
                        }
                    };

                    if let Err(e) = rt.block_on(app.run(tokio::signal::ctrl_c())) {
                        error!(error = ?e, "Failed to connect to control service");
                        let _ = ui_proxy.send_event(UiCommand::Shutdown { exit_code: 1 });
                    }
                });
            }
            Event::UserEvent(UiCommand::Notify(notification)) => {
                let mut display = TaoOverlay::new(target, &config.icons, &config.overlay);
                indicator.process(&mut display, &notification);
            }
            Event::UserEvent(UiCommand::Shutdown { exit_code }) => {
                let mut display = TaoOverlay::new(target, &config.icons, &config.overlay);
                indicator.shutdown(&mut display);
                *control_flow = ControlFlow::ExitWithCode(exit_code);
            }
            Event::WindowEvent {
                window_id,
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                if starts_drag(state, button)
                    && let Some(window) = indicator.window()
                    && window.id() == window_id
                    && let Err(e) = window.drag()
                {
                    warn!(error = ?e, "Failed to move indicator");
                }
            }
            Event::RedrawRequested(window_id) => {
                if let Some(window) = indicator.window_mut()
                    && window.id() == window_id
                    && let Err(e) = window.redraw()
                {
                    error!(error = ?e, "Failed to draw indicator");
                }
            }
            Event::LoopDestroyed => {
                let mut display = TaoOverlay::new(target, &config.icons, &config.overlay);
                indicator.shutdown(&mut display);
            }
            _ => {}
        }
    });
}
