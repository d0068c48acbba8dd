//! Voice Recorder: microphone recording with a tray status surface, global
//! hotkey control, and an attachable console client.

mod app;
mod app_command;
mod config;
mod console_client;
mod console_input;
mod cpal_recorder;
mod error;
mod hotkey_handler;
mod tray_command;
mod tray_icon_state;
mod tray_manager;
mod tray_presenter;
mod tray_status;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_client::ConsoleClient,
    console_input::{CONSOLE_HELP, ConsoleInput},
    cpal_recorder::CpalRecorder,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::{TrayManager, TrayMenuIds},
    tray_presenter::TrayPresenter,
    tray_status::TrayStatus,
};

use crate::config::Config;

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::error;
use tracing_subscriber::EnvFilter;
use voice_recorder_core::{DeliveryRouter, PeakLevelSampler, RecordingSession};

/// Application entry point.
fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("voice_recorder=debug,voice_recorder_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Persists across event loop iterations. Dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::Update(status) => {
                        if let Err(e) = tray_manager.update(&status) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let session_config = match config.session_config() {
                    Ok(sc) => sc,
                    Err(e) => {
                        error!("Invalid timer configuration: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkey on the main thread, where tao's event loop
                // pumps the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkey_id) = match HotkeyHandler::register_hotkey() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let tray_proxy = tray_proxy.clone();
                let menu_ids = tray_manager.menu_ids().clone();

                // Tokio runtime on its own thread. TrayManager and
                // hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let recorder = CpalRecorder::new(config.audio.selected_device.clone());
                        let sampler = match PeakLevelSampler::new(config.sample_interval()) {
                            Ok(sampler) => sampler,
                            Err(e) => {
                                error!("Invalid level configuration: {:?}", e);
                                std::process::exit(1);
                            }
                        };
                        let presenter = Arc::new(TrayPresenter::new(
                            tray_proxy.clone(),
                            sampler.levels(),
                        ));

                        let session = match RecordingSession::new(
                            Box::new(recorder),
                            Box::new(sampler),
                            presenter,
                            session_config,
                        ) {
                            Ok(session) => session,
                            Err(e) => {
                                error!("Failed to create recording session: {:?}", e);
                                std::process::exit(1);
                            }
                        };

                        let router = Arc::new(DeliveryRouter::new(session));

                        let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx.clone());
                        let console = ConsoleClient::new(Arc::clone(&router), command_tx);

                        let app = App {
                            router,
                            tray_proxy,
                            command_rx,
                            shutdown_tx,
                            menu_ids,
                        };

                        let console_shutdown_rx = shutdown_rx.clone();

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = console.run(console_shutdown_rx).await {
                                    error!(error = ?e, "Console client error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });

                    // Stdin reads may still be parked on a blocking thread.
                    rt.shutdown_background();
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
