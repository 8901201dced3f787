//! GPU side of the viewer. Owns the wgpu device and surface, the instanced
//! mesh pipeline and the overlay pipeline. `init` builds everything, `layout`
//! handles resizes and `render` records one frame.

use std::sync::Arc;

use anyhow::Result;
use vibecade_engine::{FrameRenderer, FrameView};
use wgpu::SurfaceError;
use winit::{dpi::PhysicalSize, window::Window};

mod init;
mod layout;
mod render;

pub(super) struct PrimitiveBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

pub(super) struct MeshResources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    _depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    sphere: PrimitiveBuffers,
    cube: PrimitiveBuffers,
    cylinder: PrimitiveBuffers,
}

pub(super) struct HudResources {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
}

/// Draws the hub with wgpu; the event loop hands it to the frame scheduler.
pub struct HubRenderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    mesh: MeshResources,
    hud: HudResources,
    background: wgpu::Color,
}

impl HubRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        init::new(window).await
    }

    pub fn window(&self) -> &Window {
        self.window.as_ref()
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        layout::resize(self, new_size);
    }

    fn aspect(&self) -> f32 {
        self.size.width.max(1) as f32 / self.size.height.max(1) as f32
    }
}

impl FrameRenderer for HubRenderer {
    type Error = SurfaceError;

    fn render_frame(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error> {
        render::render(self, frame)
    }
}
