//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it creates the
//! window and GPU scene on `resumed`, feeds keyboard events into
//! [`KeyboardState`], and on every `RedrawRequested` applies input, advances
//! the [`FrameState`] and draws.

use std::path::PathBuf;
use std::sync::Arc;

use orrery_config::{CliArgs, Config};
use orrery_input::{KeyBindings, KeyboardState};
use orrery_render::{
    DepthBuffer, FrameEncoder, PendingCapture, RenderContext, RenderPassBuilder, SurfaceError,
    capture_path, init_render_context_blocking,
};
use orrery_space::FrameState;
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::controls::{FrameCommands, initial_frame_state, next_frame_state};
use crate::scene::Scene;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

pub struct AppState {
    pub config: Config,
    /// Directory holding `config.ron`; `None` disables reloading.
    pub config_dir: Option<PathBuf>,
    /// Command-line overrides, re-applied on every reload.
    pub cli_args: CliArgs,
    pub window: Option<Arc<Window>>,
    pub gpu: Option<RenderContext>,
    pub depth_buffer: Option<DepthBuffer>,
    pub scene: Option<Scene>,
    pub keyboard_state: KeyboardState,
    pub bindings: KeyBindings,
    /// State of the frame most recently drawn.
    pub frame_state: FrameState,
    /// Frames drawn so far; numbers capture files.
    pub frame_count: u64,
}

impl AppState {
    pub fn with_config(config: Config) -> Self {
        let bindings = KeyBindings::from_overrides(&config.input.keybindings);
        let frame_state = initial_frame_state(&config.simulation, config.camera.initial_mode);
        Self {
            config,
            config_dir: None,
            cli_args: CliArgs::default(),
            window: None,
            gpu: None,
            depth_buffer: None,
            scene: None,
            keyboard_state: KeyboardState::new(),
            bindings,
            frame_state,
            frame_count: 0,
        }
    }

    /// State for a config read from `config_dir` with `cli_args` applied.
    pub fn with_config_dir(config: Config, config_dir: PathBuf, cli_args: CliArgs) -> Self {
        Self {
            config_dir: Some(config_dir),
            cli_args,
            ..Self::with_config(config)
        }
    }

    /// Re-read `config.ron` and apply it.
    ///
    /// Bindings, simulation, camera, scene and capture settings apply at
    /// once; window and surface settings wait for the next start. A file that
    /// fails to load or validate leaves the running config untouched.
    pub fn reload_config(&mut self) {
        let Some(config_dir) = self.config_dir.clone() else {
            warn!("No config directory, nothing to reload");
            return;
        };

        let mut config = match self.config.reload(&config_dir) {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!("Config unchanged");
                return;
            }
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };

        config.apply_cli_overrides(&self.cli_args);
        if let Err(e) = config.validate() {
            warn!("Reloaded config rejected: {e}");
            return;
        }
        if config == self.config {
            info!("Config unchanged");
            return;
        }

        self.bindings = KeyBindings::from_overrides(&config.input.keybindings);
        self.config = config;
        if let Some(gpu) = self.gpu.take() {
            self.initialize_rendering(&gpu);
            self.gpu = Some(gpu);
        }
        info!("Config reloaded from {}", config_dir.display());
    }

    fn initialize_rendering(&mut self, gpu: &RenderContext) {
        self.depth_buffer = Some(DepthBuffer::new(&gpu.device, gpu.width(), gpu.height()));
        self.scene = Some(Scene::new(
            &gpu.device,
            gpu.surface_format,
            DepthBuffer::FORMAT,
            &self.config,
            &self.frame_state,
        ));
        info!(
            "Scene ready: {}x{}, day {}, looking at the {}",
            gpu.width(),
            gpu.height(),
            self.frame_state.day,
            self.frame_state.camera_mode
        );
    }

    /// Apply this frame's input and step the simulation. Returns the
    /// commands so the caller can act on quit and capture.
    fn step(&mut self) -> FrameCommands {
        let commands = FrameCommands::from_actions(self.bindings.triggered(&self.keyboard_state));
        self.keyboard_state.clear_transients();
        self.frame_state = next_frame_state(self.frame_state, &commands, &self.config.simulation);
        commands
    }

    fn render(&mut self, event_loop: &ActiveEventLoop, capture: bool) {
        let (Some(gpu), Some(depth_buffer), Some(scene)) =
            (&mut self.gpu, &self.depth_buffer, &mut self.scene)
        else {
            return;
        };

        scene.update(&gpu.queue, &self.frame_state);

        match gpu.get_current_texture() {
            Ok(surface_texture) => {
                let mut frame = FrameEncoder::new(&gpu.device, &gpu.queue, surface_texture);
                let builder = RenderPassBuilder::new()
                    .clear_rgb(self.config.render.clear_color)
                    .depth(depth_buffer)
                    .label("orrery-frame");
                if let Some(mut pass) = frame.begin_render_pass(&builder) {
                    scene.draw(&mut pass);
                }

                let pending = if !capture {
                    None
                } else if gpu.capture_supported {
                    frame.copy_target_to_buffer(&gpu.device)
                } else {
                    warn!("Frame capture is not supported by this surface");
                    None
                };
                frame.submit();

                if let Some(pending) = pending {
                    self.save_capture(pending);
                }
            }
            Err(SurfaceError::Lost) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    gpu.resize(size.width, size.height);
                }
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
        }
    }

    fn save_capture(&self, pending: PendingCapture) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        let path = capture_path(
            &self.config.capture.directory,
            &self.config.capture.prefix,
            self.frame_state.camera_mode.name(),
            self.frame_count,
        );
        if let Err(e) = pending
            .wait(&gpu.device)
            .and_then(|snapshot| snapshot.write_ppm(&path))
        {
            error!("Frame capture to {} failed: {e}", path.display());
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        match init_render_context_blocking(
            window.clone(),
            self.config.window.vsync,
            self.config.render.srgb,
        ) {
            Ok(ctx) => {
                self.initialize_rendering(&ctx);
                self.gpu = Some(ctx);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    if let Some(depth_buffer) = &mut self.depth_buffer {
                        depth_buffer.resize(&gpu.device, gpu.width(), gpu.height());
                    }
                    info!("Window resized to {}x{}", gpu.width(), gpu.height());
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard_state.process_event(&event);
            }
            WindowEvent::Focused(false) => {
                self.keyboard_state.release_all();
            }
            WindowEvent::RedrawRequested => {
                let commands = self.step();
                if commands.quit {
                    info!("Quit requested, shutting down");
                    event_loop.exit();
                    return;
                }
                if commands.reload_config {
                    self.reload_config();
                }

                self.render(event_loop, commands.capture);
                self.frame_count += 1;

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the orrery with the given config.
///
/// `config_dir` and `cli_args` are kept for reloading. This function blocks
/// until the window is closed.
#[instrument(skip(config, cli_args))]
pub fn run_with_config(config: Config, config_dir: PathBuf, cli_args: CliArgs) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = AppState::with_config_dir(config, config_dir, cli_args);
    event_loop.run_app(&mut app).expect("Event loop failed");
}
