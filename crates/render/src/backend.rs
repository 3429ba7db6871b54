use crate::uniform::ShaderProgram;

/// Graphics context as seen by the frame loop.
///
/// A frame is `begin_frame`, then uniforms on [`RenderBackend::shader`], then
/// `draw_mesh`, then `present`. Any error is fatal to the loop; there is no
/// retry at this level.
pub trait RenderBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resize the drawable surface and any size-dependent attachments.
    fn resize(&mut self, width: u32, height: u32);

    /// Width over height of the current drawable surface.
    fn aspect_ratio(&self) -> f32;

    /// Acquire the next frame and clear it to `clear_color` (RGBA).
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), Self::Error>;

    /// The shader program used for the mesh draw.
    fn shader(&mut self) -> &mut dyn ShaderProgram;

    /// Draw the uploaded mesh with the current shader and uniforms.
    fn draw_mesh(&mut self) -> Result<(), Self::Error>;

    /// Submit and present the frame. May block on display pacing.
    fn present(&mut self) -> Result<(), Self::Error>;
}
