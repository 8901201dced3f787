use winit::dpi::PhysicalSize;

use super::HubRenderer;
use super::init::create_depth_texture;

pub(super) fn resize(state: &mut HubRenderer, new_size: PhysicalSize<u32>) {
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    state.size = new_size;
    state.config.width = new_size.width;
    state.config.height = new_size.height;
    state.surface.configure(&state.device, &state.config);

    let (texture, view) = create_depth_texture(&state.device, new_size);
    state.mesh._depth_texture = texture;
    state.mesh.depth_view = view;
    log::debug!("surface resized to {}x{}", new_size.width, new_size.height);
}
