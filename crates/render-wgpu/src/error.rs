/// Errors from GPU setup and per-frame presentation. All of them are fatal
/// to the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("GPU device lost")]
    DeviceLost,
    #[error("cannot upload an empty mesh")]
    EmptyMesh,
    #[error("{what} buffer needs {bytes} bytes, device limit is {limit}")]
    BufferTooLarge {
        what: &'static str,
        bytes: u64,
        limit: u64,
    },
}
