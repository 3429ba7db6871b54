use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use gridwave_render::{ShaderProgram, UniformValue, names};

/// Host mirror of the WGSL `Uniforms` struct. Field order and padding follow
/// WGSL uniform layout rules: each `vec3` is packed with a trailing scalar.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub time: f32,
    pub light_dir: [f32; 3],
    pub amplitude: f32,
    pub light_color: [f32; 3],
    pub frequency: f32,
    pub speed: f32,
    pub noise_scale: f32,
    pub _pad: [f32; 2],
}

impl Default for WaterUniforms {
    fn default() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            projection: identity,
            view: identity,
            model: identity,
            view_pos: [0.0; 3],
            time: 0.0,
            light_dir: [0.0, 1.0, 0.0],
            amplitude: 0.0,
            light_color: [1.0; 3],
            frequency: 0.0,
            speed: 0.0,
            noise_scale: 1.0,
            _pad: [0.0; 2],
        }
    }
}

/// Name-addressed view over [`WaterUniforms`].
///
/// Unknown names and type mismatches are reported once per name and then
/// ignored, like an unresolved uniform location.
#[derive(Debug, Default)]
pub struct UniformBlock {
    values: WaterUniforms,
    active: bool,
    dirty: bool,
    reported: HashSet<String>,
}

impl UniformBlock {
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &WaterUniforms {
        &self.values
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark inactive at frame start; the next `activate` re-arms the draw.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Bytes to upload if anything changed since the last call.
    pub(crate) fn take_dirty_bytes(&mut self) -> Option<&[u8]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(bytemuck::bytes_of(&self.values))
    }

    fn report_once(&mut self, name: &str, problem: &str) {
        if self.reported.insert(name.to_owned()) {
            tracing::warn!(uniform = name, "{problem}; ignoring");
        }
    }

    fn mat4(&mut self, name: &str, value: UniformValue) -> Option<[[f32; 4]; 4]> {
        match value.as_mat4() {
            Some(m) => Some(m.to_cols_array_2d()),
            None => {
                self.report_once(name, "expected mat4");
                None
            }
        }
    }

    fn vec3(&mut self, name: &str, value: UniformValue) -> Option<[f32; 3]> {
        match value.as_vec3() {
            Some(v) => Some(v.to_array()),
            None => {
                self.report_once(name, "expected vec3");
                None
            }
        }
    }

    fn float(&mut self, name: &str, value: UniformValue) -> Option<f32> {
        let v = value.as_float();
        if v.is_none() {
            self.report_once(name, "expected f32");
        }
        v
    }
}

impl ShaderProgram for UniformBlock {
    fn activate(&mut self) {
        self.active = true;
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let before = self.values;
        match name {
            names::PROJECTION => {
                if let Some(m) = self.mat4(name, value) {
                    self.values.projection = m;
                }
            }
            names::VIEW => {
                if let Some(m) = self.mat4(name, value) {
                    self.values.view = m;
                }
            }
            names::MODEL => {
                if let Some(m) = self.mat4(name, value) {
                    self.values.model = m;
                }
            }
            names::VIEW_POS => {
                if let Some(v) = self.vec3(name, value) {
                    self.values.view_pos = v;
                }
            }
            names::LIGHT_DIR => {
                if let Some(v) = self.vec3(name, value) {
                    self.values.light_dir = v;
                }
            }
            names::LIGHT_COLOR => {
                if let Some(v) = self.vec3(name, value) {
                    self.values.light_color = v;
                }
            }
            names::TIME => {
                if let Some(v) = self.float(name, value) {
                    self.values.time = v;
                }
            }
            names::AMPLITUDE => {
                if let Some(v) = self.float(name, value) {
                    self.values.amplitude = v;
                }
            }
            names::FREQUENCY => {
                if let Some(v) = self.float(name, value) {
                    self.values.frequency = v;
                }
            }
            names::SPEED => {
                if let Some(v) = self.float(name, value) {
                    self.values.speed = v;
                }
            }
            names::NOISE_SCALE => {
                if let Some(v) = self.float(name, value) {
                    self.values.noise_scale = v;
                }
            }
            _ => self.report_once(name, "unknown uniform"),
        }
        self.dirty |= self.values != before;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn layout_matches_wgsl_struct() {
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 256);
        assert_eq!(std::mem::offset_of!(WaterUniforms, view_pos), 192);
        assert_eq!(std::mem::offset_of!(WaterUniforms, time), 204);
        assert_eq!(std::mem::offset_of!(WaterUniforms, light_dir), 208);
        assert_eq!(std::mem::offset_of!(WaterUniforms, light_color), 224);
        assert_eq!(std::mem::offset_of!(WaterUniforms, speed), 240);
        assert_eq!(std::mem::offset_of!(WaterUniforms, noise_scale), 244);
    }

    #[test]
    fn named_values_land_in_fields() {
        let mut block = UniformBlock::new();
        let model = Mat4::from_translation(Vec3::new(-250.0, 0.0, -250.0));
        block.set_uniform(names::MODEL, model.into());
        block.set_uniform(names::TIME, UniformValue::Float(3.5));
        block.set_uniform(names::LIGHT_DIR, Vec3::new(5.0, 2.0, 5.0).into());

        let v = block.values();
        assert_eq!(v.model, model.to_cols_array_2d());
        assert_eq!(v.time, 3.5);
        assert_eq!(v.light_dir, [5.0, 2.0, 5.0]);
    }

    #[test]
    fn unknown_and_mistyped_uniforms_are_ignored() {
        let mut block = UniformBlock::new();
        let before = *block.values();
        block.set_uniform("u_missing", UniformValue::Float(1.0));
        block.set_uniform(names::TIME, Vec3::ONE.into());
        block.set_uniform(names::PROJECTION, UniformValue::Float(2.0));
        assert_eq!(*block.values(), before);
        assert_eq!(block.reported.len(), 3);

        block.set_uniform("u_missing", UniformValue::Float(1.0));
        assert_eq!(block.reported.len(), 3);
    }

    #[test]
    fn dirty_tracking_skips_unchanged_uploads() {
        let mut block = UniformBlock::new();
        assert!(block.take_dirty_bytes().is_some());
        assert!(block.take_dirty_bytes().is_none());

        block.set_uniform(names::SPEED, UniformValue::Float(0.0));
        assert!(block.take_dirty_bytes().is_none());

        block.set_uniform(names::SPEED, UniformValue::Float(0.4));
        let bytes = block.take_dirty_bytes().unwrap();
        assert_eq!(bytes.len(), 256);
    }

    #[test]
    fn activation_is_per_frame() {
        let mut block = UniformBlock::new();
        assert!(!block.is_active());
        block.activate();
        assert!(block.is_active());
        block.deactivate();
        assert!(!block.is_active());
    }
}
