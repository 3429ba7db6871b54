//! Rendering core: camera, frame timing, and the per-frame uniform stream.
//!
//! # Invariants
//! - The frame loop is the single owner of camera and clock state.
//! - The core never touches GPU handles; it talks to a [`RenderBackend`] and a
//!   [`ShaderProgram`], so any graphics API can sit behind it.
//!
//! [`DebugBackend`] records backend calls instead of drawing. It backs the
//! tests and the headless CLI simulation.

mod backend;
mod camera;
mod clock;
mod debug;
mod frame;
mod scene;
mod uniform;

pub use backend::RenderBackend;
pub use camera::{
    FOV_MAX, FOV_MIN, FreeFlyCamera, MOUSE_SENSITIVITY, MOVE_SPEED, PITCH_LIMIT, Z_FAR, Z_NEAR,
};
pub use clock::{FrameClock, FrameStats, MonotonicTime, TimeSource};
pub use debug::{BackendCall, DebugBackend, DebugBackendError, DebugShader};
pub use frame::{FrameLoop, FrameStatus};
pub use scene::{CameraConfig, GridConfig, Lighting, SceneConfig, WaveParams};
pub use uniform::{ShaderProgram, UniformValue, names};

pub fn crate_info() -> &'static str {
    "gridwave-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
