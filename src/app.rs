use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::error::VitrineError;
use crate::gfx::rendering::RenderEngine;
use crate::stage::{Stage, StageConfig};
use crate::ui::{stage_control_panel, PanelState, UiManager};

pub struct VitrineApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    stage: Stage,
    panel: PanelState,
    pointer: Option<PhysicalPosition<f64>>,
    init_error: Option<VitrineError>,
}

impl VitrineApp {
    /// Create an application around the given stage configuration.
    pub fn new(config: StageConfig) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");
        let stage = Stage::new(config);
        let panel = PanelState::new(&stage);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                stage,
                panel,
                pointer: None,
                init_error: None,
            },
        }
    }

    /// Access the stage for setup before the event loop starts.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.app_state.stage
    }

    /// Run the application (consumes self and starts the event loop)
    ///
    /// Blocks until the window closes. View initialization failures recorded
    /// during startup are returned here rather than panicking mid-loop.
    pub fn run(mut self) -> Result<(), VitrineError> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.init_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.stage.title())
            .with_inner_size(winit::dpi::LogicalSize::new(1200, 800));

        if let Ok(window) = event_loop.create_window(attributes) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();

            let window_clone = window_handle.clone();
            let engine = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            match engine {
                Ok(engine) => {
                    self.stage.resize(width, height);

                    let ui_manager = UiManager::new(
                        engine.device(),
                        engine.queue(),
                        engine.surface_format(),
                        &window_handle,
                    );

                    self.ui_manager = Some(ui_manager);
                    self.render_engine = Some(engine);
                }
                Err(error) => {
                    log::error!("failed to initialise the view: {error}");
                    self.init_error = Some(error);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let Some(window) = self.window.as_ref() else {
            return;
        };

        // UI input first: events the panel captures never reach the stage
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(window, window_id, &event) {
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        ..
                    },
                ..
            } => {
                if matches!(key_code, winit::keyboard::KeyCode::Escape) {
                    self.stage.stop();
                    event_loop.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Some(position);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(position) = self.pointer {
                    let size = window.inner_size();
                    self.stage.pointer_down(
                        position.x as f32,
                        position.y as f32,
                        size.width as f32,
                        size.height as f32,
                    );
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.stage.resize(width, height);
                render_engine.resize(width, height);
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                self.stage.stop();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if !self.stage.is_running() {
                    event_loop.exit();
                    return;
                }

                self.stage.tick();

                // Build the panel before rendering; widget writes land in the
                // same frame's sync
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    let stage = &mut self.stage;
                    let panel = &mut self.panel;
                    ui_manager.update_logic(window, |ui| {
                        stage_control_panel(ui, stage, panel);
                    });
                }

                render_engine.sync_scene(&mut self.stage.scene);

                let frame = match self.ui_manager.as_mut() {
                    Some(ui_manager) => render_engine.render_frame_with_ui(
                        &self.stage.scene,
                        |device, queue, encoder, color_attachment| {
                            ui_manager.render_display_only(
                                device,
                                queue,
                                encoder,
                                color_attachment,
                            );
                        },
                    ),
                    None => render_engine.render_frame_with_ui(&self.stage.scene, |_, _, _, _| {}),
                };

                if let Err(error) = frame {
                    // The overlay callback never ran; close the frame the
                    // panel built so the next redraw can start a new one
                    if let Some(ui_manager) = self.ui_manager.as_mut() {
                        ui_manager.discard_frame();
                    }
                    match error {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            log::warn!("surface lost or outdated, reconfiguring");
                            render_engine.reconfigure();
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            log::error!("surface out of memory, exiting");
                            event_loop.exit();
                        }
                        error => log::warn!("frame skipped: {error}"),
                    }
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.stage.is_running() {
            return;
        }
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
