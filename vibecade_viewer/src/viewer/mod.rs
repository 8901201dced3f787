mod hud;
mod mesh;
mod scene;
mod shaders;
mod state;

pub use hud::{PixelRect, close_button_rect};
pub use state::HubRenderer;
