use glam::Mat4;
use gridwave_input::{InputEvent, InputSource};

use crate::backend::RenderBackend;
use crate::camera::FreeFlyCamera;
use crate::clock::{FrameClock, FrameStats, TimeSource};
use crate::scene::{Lighting, SceneConfig, WaveParams};
use crate::uniform::{ShaderProgram, names};

/// Frames between frame-time log lines.
const STATS_WINDOW: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}

/// Per-frame orchestration: input, camera, clock, uniforms, draw, present.
///
/// Single-threaded. One `run_frame` call completes a whole frame before the
/// next begins.
#[derive(Debug)]
pub struct FrameLoop {
    camera: FreeFlyCamera,
    clock: FrameClock,
    stats: FrameStats,
    model: Mat4,
    waves: WaveParams,
    lighting: Lighting,
    clear_color: [f32; 4],
    frames: u64,
}

impl FrameLoop {
    pub fn new(scene: &SceneConfig, start_time: f32) -> Self {
        Self {
            camera: scene.camera.camera(),
            clock: FrameClock::new(start_time),
            stats: FrameStats::new(STATS_WINDOW),
            model: scene.grid.model_matrix(),
            waves: scene.waves,
            lighting: scene.lighting,
            clear_color: scene.clear_color,
            frames: 0,
        }
    }

    pub fn camera(&self) -> &FreeFlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FreeFlyCamera {
        &mut self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    /// Frames fully presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame at time `now` (seconds). Returns `Exit` without drawing
    /// once a close has been requested.
    pub fn run_frame<I, B>(
        &mut self,
        now: f32,
        input: &mut I,
        backend: &mut B,
    ) -> Result<FrameStatus, B::Error>
    where
        I: InputSource + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let dt = self.clock.tick(now);

        let frame_input = input.poll();
        for event in &frame_input.events {
            match *event {
                InputEvent::Resized { width, height } => {
                    tracing::debug!(width, height, "viewport resized");
                    backend.resize(width, height);
                }
                other => self.camera.handle_event(&other),
            }
        }
        if frame_input.close_requested() {
            tracing::info!(frames = self.frames, "close requested");
            return Ok(FrameStatus::Exit);
        }
        self.camera.apply_movement(&frame_input.held, dt);

        backend.begin_frame(self.clear_color)?;
        let aspect = backend.aspect_ratio();
        self.push_uniforms(backend.shader(), now, aspect);
        backend.draw_mesh()?;
        backend.present()?;

        self.frames += 1;
        self.record_timing(dt);
        Ok(FrameStatus::Continue)
    }

    /// Run frames until the input asks to close. Returns the number of frames
    /// presented by this call.
    pub fn run<T, I, B>(&mut self, time: &T, input: &mut I, backend: &mut B) -> Result<u64, B::Error>
    where
        T: TimeSource + ?Sized,
        I: InputSource + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let start = self.frames;
        while self.run_frame(time.now(), input, backend)? == FrameStatus::Continue {}
        Ok(self.frames - start)
    }

    /// Activate `shader` and push the full uniform set for time `now`.
    pub fn push_uniforms(&self, shader: &mut dyn ShaderProgram, now: f32, aspect_ratio: f32) {
        shader.activate();

        shader.set_uniform(names::PROJECTION, self.camera.projection(aspect_ratio).into());
        shader.set_uniform(names::VIEW, self.camera.view().into());
        shader.set_uniform(names::MODEL, self.model.into());

        shader.set_uniform(names::TIME, now.into());
        shader.set_uniform(names::AMPLITUDE, self.waves.amplitude.into());
        shader.set_uniform(names::FREQUENCY, self.waves.frequency.into());
        shader.set_uniform(names::SPEED, self.waves.speed.into());
        shader.set_uniform(names::NOISE_SCALE, self.waves.noise_scale.into());

        shader.set_uniform(names::LIGHT_DIR, self.lighting.direction.into());
        shader.set_uniform(names::LIGHT_COLOR, self.lighting.color.into());
        shader.set_uniform(names::VIEW_POS, self.camera.position.into());
    }

    fn record_timing(&mut self, dt: f32) {
        self.stats.record(dt);
        if self.frames % STATS_WINDOW as u64 == 0 {
            tracing::debug!(
                frames = self.frames,
                avg_ms = self.stats.average() * 1000.0,
                min_ms = self.stats.min() * 1000.0,
                max_ms = self.stats.max() * 1000.0,
                fps = self.stats.fps(),
                "frame timing"
            );
        }
    }
}
