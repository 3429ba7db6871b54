use glam::{Mat4, Vec3};
use gridwave_mesh::{DEFAULT_JITTER_SCALE, GridMeshBuilder};
use serde::{Deserialize, Serialize};

use crate::camera::{FOV_MAX, FreeFlyCamera};

/// Grid dimensions and jitter for the water surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: f32,
    pub depth: f32,
    pub segments_x: u32,
    pub segments_z: u32,
    pub jitter_scale: f32,
    /// Fixed jitter seed; `None` draws a fresh one from entropy.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            depth: 500.0,
            segments_x: 1000,
            segments_z: 1000,
            jitter_scale: DEFAULT_JITTER_SCALE,
            seed: None,
        }
    }
}

impl GridConfig {
    pub fn builder(&self) -> GridMeshBuilder {
        let builder = GridMeshBuilder::new(self.width, self.depth, self.segments_x, self.segments_z)
            .with_jitter_scale(self.jitter_scale);
        match self.seed {
            Some(seed) => builder.with_seed(seed),
            None => builder,
        }
    }

    /// Translation that moves the grid's center onto the world origin.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-self.width * 0.5, 0.0, -self.depth * 0.5))
    }
}

/// Wave animation constants. The shader owns their interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
    pub noise_scale: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: 0.6,
            frequency: 0.3,
            speed: 0.4,
            noise_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub direction: Vec3,
    pub color: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(5.0, 2.0, 5.0),
            color: Vec3::ONE,
        }
    }
}

/// Starting pose of the camera. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        // Looks along (0, -0.5, -1): slightly down toward the grid.
        Self {
            position: Vec3::new(0.0, 5.0, 10.0),
            yaw: -90.0,
            pitch: -(0.5_f32.atan().to_degrees()),
            fov: FOV_MAX,
        }
    }
}

impl CameraConfig {
    pub fn camera(&self) -> FreeFlyCamera {
        FreeFlyCamera::new(self.position, self.yaw, self.pitch).with_fov(self.fov)
    }
}

/// Everything the frame loop needs that is fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub grid: GridConfig,
    pub waves: WaveParams,
    pub lighting: Lighting,
    pub camera: CameraConfig,
    pub clear_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            waves: WaveParams::default(),
            lighting: Lighting::default(),
            camera: CameraConfig::default(),
            clear_color: [0.4, 0.2, 0.3, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matrix_centers_grid() {
        let grid = GridConfig {
            width: 500.0,
            depth: 300.0,
            ..GridConfig::default()
        };
        let center = grid.model_matrix().transform_point3(Vec3::new(250.0, 0.0, 150.0));
        assert_eq!(center, Vec3::ZERO);
    }

    #[test]
    fn default_camera_looks_down_toward_grid() {
        let cam = CameraConfig::default().camera();
        let expected = Vec3::new(0.0, -0.5, -1.0).normalize();
        assert!((cam.forward() - expected).length() < 1e-4);
        assert_eq!(cam.fov(), FOV_MAX);
    }

    #[test]
    fn builder_carries_grid_settings() {
        let grid = GridConfig {
            width: 4.0,
            depth: 2.0,
            segments_x: 4,
            segments_z: 2,
            jitter_scale: 0.0,
            seed: Some(9),
        };
        let builder = grid.builder();
        assert_eq!(builder.seed(), Some(9));
        let mesh = builder.build().unwrap();
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.vertices()[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn config_serializes_to_json() {
        let json = serde_json::to_string(&SceneConfig::default()).unwrap();
        assert!(json.contains("\"segments_x\":1000"));
        assert!(json.contains("\"amplitude\":0.6"));
        let back: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SceneConfig::default());
    }
}
