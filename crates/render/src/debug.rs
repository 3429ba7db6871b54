use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::backend::RenderBackend;
use crate::uniform::{ShaderProgram, UniformValue};

/// One recorded backend operation.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Resize { width: u32, height: u32 },
    BeginFrame { clear_color: [f32; 4] },
    DrawMesh { index_count: u32 },
    Present,
}

#[derive(Debug, thiserror::Error)]
pub enum DebugBackendError {
    #[error("device lost at frame {0}")]
    DeviceLost(u64),
    #[error("{0} called outside begin_frame/present")]
    NoFrame(&'static str),
    #[error("draw issued with no active shader")]
    NoShader,
}

/// Shader stand-in that keeps the latest value of every uniform.
#[derive(Debug, Default)]
pub struct DebugShader {
    active: bool,
    activations: u64,
    uniforms: BTreeMap<String, UniformValue>,
}

impl DebugShader {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms.get(name).copied()
    }

    pub fn uniforms(&self) -> &BTreeMap<String, UniformValue> {
        &self.uniforms
    }
}

impl ShaderProgram for DebugShader {
    fn activate(&mut self) {
        self.active = true;
        self.activations += 1;
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms.insert(name.to_owned(), value);
    }
}

/// Backend that records calls instead of touching a GPU.
///
/// Used by tests and by the headless CLI. It can be told to lose its device
/// on a given frame to exercise fatal-error paths.
#[derive(Debug)]
pub struct DebugBackend {
    width: u32,
    height: u32,
    index_count: u32,
    shader: DebugShader,
    calls: Vec<BackendCall>,
    in_frame: bool,
    frames_begun: u64,
    frames_presented: u64,
    lose_device_at: Option<u64>,
}

impl DebugBackend {
    pub fn new(width: u32, height: u32, index_count: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            index_count,
            shader: DebugShader::default(),
            calls: Vec::new(),
            in_frame: false,
            frames_begun: 0,
            frames_presented: 0,
            lose_device_at: None,
        }
    }

    /// Fail `begin_frame` for the frame with this zero-based number.
    pub fn with_device_loss_at(mut self, frame: u64) -> Self {
        self.lose_device_at = Some(frame);
        self
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn shader_state(&self) -> &DebugShader {
        &self.shader
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Human-readable summary of the last frame's state.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            self.frames_presented, self.width, self.height
        );
        let _ = writeln!(out, "Mesh: {} indices", self.index_count);
        let _ = writeln!(out, "Uniforms:");
        for (name, value) in &self.shader.uniforms {
            let text = match value {
                UniformValue::Float(v) => format!("{v:.3}"),
                UniformValue::Vec3(v) => format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
                UniformValue::Mat4(m) => {
                    let t = m.w_axis;
                    format!("mat4 [w=({:.3}, {:.3}, {:.3}, {:.3})]", t.x, t.y, t.z, t.w)
                }
            };
            let _ = writeln!(out, "  {name} = {text}");
        }
        out
    }
}

impl RenderBackend for DebugBackend {
    type Error = DebugBackendError;

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.calls.push(BackendCall::Resize { width, height });
    }

    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), DebugBackendError> {
        let frame = self.frames_begun;
        if self.lose_device_at == Some(frame) {
            return Err(DebugBackendError::DeviceLost(frame));
        }
        self.frames_begun += 1;
        self.in_frame = true;
        self.shader.active = false;
        self.calls.push(BackendCall::BeginFrame { clear_color });
        Ok(())
    }

    fn shader(&mut self) -> &mut dyn ShaderProgram {
        &mut self.shader
    }

    fn draw_mesh(&mut self) -> Result<(), DebugBackendError> {
        if !self.in_frame {
            return Err(DebugBackendError::NoFrame("draw_mesh"));
        }
        if !self.shader.active {
            return Err(DebugBackendError::NoShader);
        }
        self.calls.push(BackendCall::DrawMesh {
            index_count: self.index_count,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), DebugBackendError> {
        if !self.in_frame {
            return Err(DebugBackendError::NoFrame("present"));
        }
        self.in_frame = false;
        self.frames_presented += 1;
        self.calls.push(BackendCall::Present);
        Ok(())
    }
}
