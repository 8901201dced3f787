use bytemuck::cast_slice;
use vibecade_engine::FrameView;
use wgpu::SurfaceError;

use super::super::hud::overlay_vertices;
use super::super::mesh::MeshInstance;
use super::super::scene::{build_instances, scene_uniforms};
use super::super::shaders::HudVertex;
use super::{HubRenderer, PrimitiveBuffers};

pub(super) fn render(state: &mut HubRenderer, frame: &FrameView<'_>) -> Result<(), SurfaceError> {
    let output = state.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());
    let mut encoder = state
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("vibecade-viewer-encoder"),
        });

    draw_scene_meshes(state, frame, &view, &mut encoder);
    if frame.world.overlay_active() {
        draw_overlay(state, &view, &mut encoder);
    }

    state.queue.submit(std::iter::once(encoder.finish()));
    output.present();
    Ok(())
}

#[derive(Clone, Copy, Default)]
struct InstanceRange {
    offset: u32,
    count: u32,
}

/// Append `source` instances into `target`, returning the range to draw.
fn append_instances(target: &mut Vec<MeshInstance>, source: &[MeshInstance]) -> InstanceRange {
    let offset = target.len() as u32;
    target.extend_from_slice(source);
    InstanceRange {
        offset,
        count: source.len() as u32,
    }
}

fn draw_scene_meshes(
    state: &mut HubRenderer,
    frame: &FrameView<'_>,
    view: &wgpu::TextureView,
    encoder: &mut wgpu::CommandEncoder,
) {
    let groups = build_instances(frame.world);
    let total_instances = groups.total_instances();
    ensure_mesh_instance_capacity(state, total_instances);

    let mut combined = Vec::with_capacity(total_instances);
    let sphere_range = append_instances(&mut combined, &groups.sphere);
    let cube_range = append_instances(&mut combined, &groups.cube);
    let cylinder_range = append_instances(&mut combined, &groups.cylinder);

    let mesh = &state.mesh;
    if !combined.is_empty() {
        state
            .queue
            .write_buffer(&mesh.instance_buffer, 0, cast_slice(&combined));
    }
    let uniforms = scene_uniforms(frame.world, frame.camera, state.aspect());
    state
        .queue
        .write_buffer(&mesh.uniform_buffer, 0, cast_slice(&[uniforms]));

    let mut mesh_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("mesh-pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(state.background),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &mesh.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if combined.is_empty() {
        return;
    }

    mesh_pass.set_pipeline(&mesh.pipeline);
    mesh_pass.set_bind_group(0, &mesh.bind_group, &[]);
    let instance_bytes = (combined.len() * std::mem::size_of::<MeshInstance>()) as u64;
    mesh_pass.set_vertex_buffer(1, mesh.instance_buffer.slice(0..instance_bytes));

    for (buffers, range) in [
        (&mesh.sphere, sphere_range),
        (&mesh.cube, cube_range),
        (&mesh.cylinder, cylinder_range),
    ] {
        draw_primitive(&mut mesh_pass, buffers, range);
    }
}

fn draw_primitive<'pass>(
    pass: &mut wgpu::RenderPass<'pass>,
    buffers: &'pass PrimitiveBuffers,
    range: InstanceRange,
) {
    if range.count == 0 {
        return;
    }
    pass.set_vertex_buffer(0, buffers.vertex.slice(..));
    pass.set_index_buffer(buffers.index.slice(..), wgpu::IndexFormat::Uint16);
    pass.draw_indexed(
        0..buffers.index_count,
        0,
        range.offset..(range.offset + range.count),
    );
}

fn draw_overlay(
    state: &mut HubRenderer,
    view: &wgpu::TextureView,
    encoder: &mut wgpu::CommandEncoder,
) {
    let vertices = overlay_vertices(state.size);
    ensure_hud_capacity(state, vertices.len());
    let hud = &state.hud;
    state
        .queue
        .write_buffer(&hud.vertex_buffer, 0, cast_slice(&vertices));

    let mut overlay_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("overlay-pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    let vertex_bytes = (vertices.len() * std::mem::size_of::<HudVertex>()) as u64;
    overlay_pass.set_pipeline(&hud.pipeline);
    overlay_pass.set_vertex_buffer(0, hud.vertex_buffer.slice(0..vertex_bytes));
    overlay_pass.draw(0..vertices.len() as u32, 0..1);
}

/// Grow the shared instance buffer if the current frame needs more slots.
fn ensure_mesh_instance_capacity(state: &mut HubRenderer, required: usize) {
    let mesh = &mut state.mesh;
    if required <= mesh.instance_capacity {
        return;
    }
    let capacity = grown_capacity(mesh.instance_capacity, required);
    let label = format!("mesh-instance-buffer({capacity})");
    mesh.instance_buffer = state.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label.as_str()),
        size: (capacity * std::mem::size_of::<MeshInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    mesh.instance_capacity = capacity;
    log::debug!("mesh instance buffer grown to {capacity}");
}

fn ensure_hud_capacity(state: &mut HubRenderer, required: usize) {
    let hud = &mut state.hud;
    if required <= hud.vertex_capacity {
        return;
    }
    let capacity = grown_capacity(hud.vertex_capacity, required);
    hud.vertex_buffer = state.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("hud-vertex-buffer"),
        size: (capacity * std::mem::size_of::<HudVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    hud.vertex_capacity = capacity;
}

fn grown_capacity(current: usize, required: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < required {
        capacity *= 2;
    }
    capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_doubles_until_it_fits() {
        assert_eq!(grown_capacity(256, 300), 512);
        assert_eq!(grown_capacity(256, 1025), 2048);
        assert_eq!(grown_capacity(0, 3), 4);
    }

    #[test]
    fn ranges_follow_append_order() {
        let instance = MeshInstance::new(glam::Mat4::IDENTITY, [1.0, 1.0, 1.0]);
        let mut combined = Vec::new();
        let first = append_instances(&mut combined, &[instance; 3]);
        let second = append_instances(&mut combined, &[instance; 2]);
        assert_eq!((first.offset, first.count), (0, 3));
        assert_eq!((second.offset, second.count), (3, 2));
        assert_eq!(combined.len(), 5);
    }
}
