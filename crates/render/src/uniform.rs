use glam::{Mat4, Vec3};

/// A value that can be bound to a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

impl UniformValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            UniformValue::Float(_) => "f32",
            UniformValue::Vec3(_) => "vec3",
            UniformValue::Mat4(_) => "mat4",
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match *self {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_mat4(&self) -> Option<Mat4> {
        match *self {
            UniformValue::Mat4(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        UniformValue::Mat4(v)
    }
}

/// A compiled shader program that accepts uniforms by name.
///
/// How names resolve (and what happens to unknown names) is up to the
/// implementation.
pub trait ShaderProgram {
    /// Make this program current for subsequent draws.
    fn activate(&mut self);

    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// Uniform names understood by the water shader.
pub mod names {
    pub const PROJECTION: &str = "projection";
    pub const VIEW: &str = "view";
    pub const MODEL: &str = "model";
    pub const TIME: &str = "u_time";
    pub const AMPLITUDE: &str = "u_amplitude";
    pub const FREQUENCY: &str = "u_frequency";
    pub const SPEED: &str = "u_speed";
    pub const NOISE_SCALE: &str = "u_noise_scale";
    pub const LIGHT_DIR: &str = "light_dir";
    pub const LIGHT_COLOR: &str = "light_color";
    pub const VIEW_POS: &str = "view_pos";

    pub const ALL: [&str; 11] = [
        PROJECTION,
        VIEW,
        MODEL,
        TIME,
        AMPLITUDE,
        FREQUENCY,
        SPEED,
        NOISE_SCALE,
        LIGHT_DIR,
        LIGHT_COLOR,
        VIEW_POS,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_matching_variant() {
        assert_eq!(UniformValue::from(1.5f32).as_float(), Some(1.5));
        assert_eq!(UniformValue::from(Vec3::X).as_vec3(), Some(Vec3::X));
        assert_eq!(
            UniformValue::from(Mat4::IDENTITY).as_mat4(),
            Some(Mat4::IDENTITY)
        );
        assert_eq!(UniformValue::from(1.5f32).as_vec3(), None);
        assert_eq!(UniformValue::from(Vec3::X).type_name(), "vec3");
    }

    #[test]
    fn uniform_names_are_unique() {
        let mut sorted = names::ALL.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), names::ALL.len());
    }
}
