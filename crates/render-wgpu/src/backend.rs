use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gridwave_mesh::Mesh;
use gridwave_render::{RenderBackend, ShaderProgram};

use crate::error::GpuError;
use crate::gpu::WgpuRenderer;

struct AcquiredFrame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    drawn: bool,
}

/// [`RenderBackend`] over a wgpu surface: owns the device, queue, surface
/// configuration and the water renderer.
pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    frame: Option<AcquiredFrame>,
    clear_color: [f32; 4],
    device_lost: Arc<AtomicBool>,
}

impl WgpuBackend {
    /// Create the device for `target`, configure a vsync surface of
    /// `width x height`, and upload `mesh`.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        mesh: &Mesh,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("gridwave_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let device_lost = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&device_lost);
        device.set_device_lost_callback(move |reason, message| {
            tracing::error!(?reason, %message, "GPU device lost");
            flag.store(true, Ordering::SeqCst);
        });

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height, mesh)?;

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            adapter = %adapter.get_info().name,
            format = ?surface_format,
            "GPU initialized"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            frame: None,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            device_lost,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl RenderBackend for WgpuBackend {
    type Error = GpuError;

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.reconfigure();
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), GpuError> {
        if self.device_lost.load(Ordering::SeqCst) {
            return Err(GpuError::DeviceLost);
        }

        self.clear_color = clear_color;
        self.renderer.begin_frame();
        self.frame = match self.surface.get_current_texture() {
            Ok(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Some(AcquiredFrame {
                    texture,
                    view,
                    drawn: false,
                })
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated; reconfiguring and skipping frame");
                self.reconfigure();
                None
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface acquire timed out; skipping frame");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(())
    }

    fn shader(&mut self) -> &mut dyn ShaderProgram {
        self.renderer.uniforms_mut()
    }

    fn draw_mesh(&mut self) -> Result<(), GpuError> {
        let Some(frame) = self.frame.as_mut() else {
            return Ok(());
        };
        self.renderer
            .render(&self.device, &self.queue, &frame.view, self.clear_color);
        frame.drawn = true;
        Ok(())
    }

    fn present(&mut self) -> Result<(), GpuError> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };
        if !frame.drawn {
            self.renderer.begin_frame();
            self.renderer
                .render(&self.device, &self.queue, &frame.view, self.clear_color);
        }
        frame.texture.present();
        if self.device_lost.load(Ordering::SeqCst) {
            return Err(GpuError::DeviceLost);
        }
        Ok(())
    }
}
