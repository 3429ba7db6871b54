use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use gridwave_input::{Action, InputEvent, InputQueue};
use gridwave_render::{FrameLoop, FrameStatus, GridConfig, MonotonicTime, SceneConfig, TimeSource};
use gridwave_render_wgpu::WgpuBackend;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Parser)]
#[command(name = "gridwave-desktop", about = "Fly over an animated low-poly water grid")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Fixed jitter seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Grid width and depth in world units
    #[arg(long, default_value = "500")]
    size: f32,

    /// Cells along each axis
    #[arg(long, default_value = "1000")]
    segments: u32,

    /// Jitter scale in cell widths; at most 0.25 keeps every triangle unfolded
    #[arg(long, default_value = "0.5")]
    jitter: f32,
}

impl Cli {
    fn scene(&self) -> SceneConfig {
        SceneConfig {
            grid: GridConfig {
                width: self.size,
                depth: self.size,
                segments_x: self.segments,
                segments_z: self.segments,
                jitter_scale: self.jitter,
                seed: self.seed,
            },
            ..SceneConfig::default()
        }
    }
}

fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW => Some(Action::MoveForward),
        KeyCode::KeyS => Some(Action::MoveBackward),
        KeyCode::KeyA => Some(Action::StrafeLeft),
        KeyCode::KeyD => Some(Action::StrafeRight),
        KeyCode::Space => Some(Action::Ascend),
        KeyCode::ShiftLeft => Some(Action::Descend),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

struct App {
    scene: SceneConfig,
    time: MonotonicTime,
    input: InputQueue,
    window: Option<Arc<Window>>,
    backend: Option<WgpuBackend>,
    frame_loop: Option<FrameLoop>,
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(scene: SceneConfig) -> Self {
        Self {
            scene,
            time: MonotonicTime::new(),
            input: InputQueue::new(),
            window: None,
            backend: None,
            frame_loop: None,
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Gridwave")
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            tracing::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);

        let mesh = self
            .scene
            .grid
            .builder()
            .build()
            .context("failed to build grid mesh")?;

        let size = window.inner_size();
        let backend = pollster::block_on(WgpuBackend::new(
            window.clone(),
            size.width,
            size.height,
            &mesh,
        ))
        .context("failed to initialize GPU")?;

        self.input = InputQueue::with_pointer(size.width as f32 * 0.5, size.height as f32 * 0.5);
        self.frame_loop = Some(FrameLoop::new(&self.scene, self.time.now()));
        self.backend = Some(backend);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.fatal = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.input.push(InputEvent::CloseRequested);
            }
            WindowEvent::Resized(new_size) => {
                self.input.push(InputEvent::Resized {
                    width: new_size.width,
                    height: new_size.height,
                });
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(action) = action_for(key) {
                    self.input
                        .set_action(action, state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.input.push(InputEvent::Scrolled { dy });
            }
            WindowEvent::RedrawRequested => {
                let (Some(frame_loop), Some(backend)) = (&mut self.frame_loop, &mut self.backend)
                else {
                    return;
                };
                match frame_loop.run_frame(self.time.now(), &mut self.input, backend) {
                    Ok(FrameStatus::Continue) => {}
                    Ok(FrameStatus::Exit) => {
                        let stats = frame_loop.stats();
                        tracing::info!(
                            frames = frame_loop.frames(),
                            fps = stats.fps(),
                            "exiting"
                        );
                        event_loop.exit();
                    }
                    Err(e) => self.fail(event_loop, e.into()),
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.pointer_delta(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("gridwave-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cli.scene());
    event_loop.run_app(&mut app)?;

    match app.fatal {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_are_bound() {
        assert_eq!(action_for(KeyCode::KeyW), Some(Action::MoveForward));
        assert_eq!(action_for(KeyCode::ShiftLeft), Some(Action::Descend));
        assert_eq!(action_for(KeyCode::Escape), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn cli_flags_shape_the_grid() {
        let cli = Cli::parse_from(["gridwave-desktop", "--seed", "7", "--size", "100", "--segments", "50"]);
        let scene = cli.scene();
        assert_eq!(scene.grid.seed, Some(7));
        assert_eq!(scene.grid.width, 100.0);
        assert_eq!(scene.grid.segments_z, 50);
        assert_eq!(scene.grid.jitter_scale, 0.5);
    }
}
