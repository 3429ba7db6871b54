use glam::{Mat4, Vec2, Vec3};
use gridwave_input::{Action, HeldActions, InputEvent};

/// Degrees of rotation per pixel of pointer motion.
pub const MOUSE_SENSITIVITY: f32 = 0.1;
/// Translation speed in world units per second.
pub const MOVE_SPEED: f32 = 5.0;
/// Pitch is held inside `[-PITCH_LIMIT, PITCH_LIMIT]` degrees so the view never flips.
pub const PITCH_LIMIT: f32 = 89.0;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 500.0;

/// Free-fly camera driven by pointer look, scroll zoom and held movement keys.
///
/// Angles are stored in degrees. The basis vectors and matrices are derived on
/// demand and never cached, so they cannot drift out of sync with yaw/pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeFlyCamera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    last_pointer: Option<Vec2>,
}

impl Default for FreeFlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, -90.0, 0.0)
    }
}

impl FreeFlyCamera {
    /// Camera at `position` with the given yaw and pitch in degrees and the
    /// widest field of view. Pitch is clamped.
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov: FOV_MAX,
            last_pointer: None,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov.clamp(FOV_MIN, FOV_MAX);
        self
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Forget the pointer reference so the next motion event re-anchors
    /// instead of rotating. Call when the cursor is (re)captured.
    pub fn reset_pointer(&mut self) {
        self.last_pointer = None;
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let current = Vec2::new(x, y);
        let Some(last) = self.last_pointer.replace(current) else {
            return;
        };

        // Screen y grows downward, pitch grows upward.
        let offset = Vec2::new(current.x - last.x, last.y - current.y) * MOUSE_SENSITIVITY;
        self.yaw += offset.x;
        self.pitch = (self.pitch + offset.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn scrolled(&mut self, dy: f32) {
        self.fov = (self.fov - dy).clamp(FOV_MIN, FOV_MAX);
    }

    /// Route an input event to the matching handler. Events that do not
    /// concern the camera are ignored.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMoved { x, y } => self.pointer_moved(x, y),
            InputEvent::Scrolled { dy } => self.scrolled(dy),
            InputEvent::Resized { .. } | InputEvent::CloseRequested => {}
        }
    }

    /// Move for `dt` seconds according to the held actions. Directions add up
    /// without renormalization, so diagonals are faster.
    pub fn apply_movement(&mut self, held: &HeldActions, dt: f32) {
        let step = MOVE_SPEED * dt;
        let forward = self.forward();
        let right = self.right();

        if held.is_held(Action::MoveForward) {
            self.position += forward * step;
        }
        if held.is_held(Action::MoveBackward) {
            self.position -= forward * step;
        }
        if held.is_held(Action::StrafeLeft) {
            self.position -= right * step;
        }
        if held.is_held(Action::StrafeRight) {
            self.position += right * step;
        }
        if held.is_held(Action::Ascend) {
            self.position += Vec3::Y * step;
        }
        if held.is_held(Action::Descend) {
            self.position -= Vec3::Y * step;
        }
    }

    pub fn forward(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Right-handed perspective with a 0..1 depth range.
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect_ratio, Z_NEAR, Z_FAR)
    }
}
