use gridwave_mesh::{Mesh, Vertex};
use wgpu::util::DeviceExt;

use crate::error::GpuError;

/// Device-side copy of a [`Mesh`]: one vertex buffer, one `u32` index buffer.
///
/// Uploaded once with no update path. Dropping the handle releases both buffers.
#[derive(Debug)]
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Layout of [`Vertex`] as seen by the vertex stage: position at location 0.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn new(device: &wgpu::Device, mesh: &Mesh) -> Result<Self, GpuError> {
        let _span = tracing::info_span!("mesh_upload").entered();

        if mesh.is_empty() {
            return Err(GpuError::EmptyMesh);
        }

        let limit = device.limits().max_buffer_size;
        let vertex_bytes: &[u8] = bytemuck::cast_slice(mesh.vertices());
        let index_bytes: &[u8] = bytemuck::cast_slice(mesh.indices());
        check_size("vertex", vertex_bytes.len(), limit)?;
        check_size("index", index_bytes.len(), limit)?;
        let index_count = u32::try_from(mesh.index_count()).map_err(|_| GpuError::BufferTooLarge {
            what: "index",
            bytes: index_bytes.len() as u64,
            limit,
        })?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertex_buffer"),
            contents: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_index_buffer"),
            contents: index_bytes,
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::info!(
            vertices = mesh.vertex_count(),
            indices = index_count,
            bytes = vertex_bytes.len() + index_bytes.len(),
            "grid mesh uploaded"
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count,
        })
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind both buffers on `pass` and draw every stored index once.
    /// Bindings end with the pass; nothing outlives it.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn check_size(what: &'static str, bytes: usize, limit: u64) -> Result<(), GpuError> {
    let bytes = bytes as u64;
    if bytes > limit {
        return Err(GpuError::BufferTooLarge { what, bytes, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_vertex() {
        let layout = GpuMesh::vertex_layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn size_check_respects_limit() {
        assert!(check_size("vertex", 256, 256).is_ok());
        let err = check_size("index", 257, 256).unwrap_err();
        assert_eq!(
            err.to_string(),
            "index buffer needs 257 bytes, device limit is 256"
        );
    }
}
