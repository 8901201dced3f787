//! Screen-space geometry for the game overlay: a dark full-window tint and a
//! round red close button in the top-right corner.

use std::f32::consts::{FRAC_PI_4, PI};

use winit::dpi::PhysicalSize;

use super::shaders::HudVertex;

pub const CLOSE_BUTTON_SIZE: f32 = 40.0;
pub const CLOSE_BUTTON_MARGIN: f32 = 20.0;

const TINT_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.9];
const BUTTON_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const CROSS_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const BUTTON_SEGMENTS: u32 = 24;
const CROSS_LENGTH: f32 = 18.0;
const CROSS_THICKNESS: f32 = 3.0;

/// Axis-aligned rectangle in physical pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

pub fn close_button_rect(size: PhysicalSize<u32>) -> PixelRect {
    PixelRect {
        x: size.width as f32 - CLOSE_BUTTON_MARGIN - CLOSE_BUTTON_SIZE,
        y: CLOSE_BUTTON_MARGIN,
        width: CLOSE_BUTTON_SIZE,
        height: CLOSE_BUTTON_SIZE,
    }
}

/// Triangle list for the whole overlay, in clip space.
pub(super) fn overlay_vertices(size: PhysicalSize<u32>) -> Vec<HudVertex> {
    let mut vertices = Vec::with_capacity(6 + BUTTON_SEGMENTS as usize * 3 + 12);
    let full = [[-1.0, 1.0], [1.0, 1.0], [1.0, -1.0], [-1.0, -1.0]];
    push_quad(&mut vertices, full, TINT_COLOR);

    let button = close_button_rect(size);
    let (cx, cy) = button.center();
    let radius = button.width * 0.5;
    for i in 0..BUTTON_SEGMENTS {
        let a0 = i as f32 / BUTTON_SEGMENTS as f32 * PI * 2.0;
        let a1 = (i + 1) as f32 / BUTTON_SEGMENTS as f32 * PI * 2.0;
        for (x, y) in [
            (cx, cy),
            (cx + a0.cos() * radius, cy + a0.sin() * radius),
            (cx + a1.cos() * radius, cy + a1.sin() * radius),
        ] {
            vertices.push(HudVertex {
                position: to_ndc(size, x, y),
                color: BUTTON_COLOR,
            });
        }
    }

    for angle in [FRAC_PI_4, -FRAC_PI_4] {
        let (sin, cos) = angle.sin_cos();
        let corner = |u: f32, v: f32| {
            let x = cx + u * cos - v * sin;
            let y = cy + u * sin + v * cos;
            to_ndc(size, x, y)
        };
        let half_length = CROSS_LENGTH * 0.5;
        let half_thickness = CROSS_THICKNESS * 0.5;
        push_quad(
            &mut vertices,
            [
                corner(-half_length, -half_thickness),
                corner(half_length, -half_thickness),
                corner(half_length, half_thickness),
                corner(-half_length, half_thickness),
            ],
            CROSS_COLOR,
        );
    }

    vertices
}

fn push_quad(vertices: &mut Vec<HudVertex>, corners: [[f32; 2]; 4], color: [f32; 4]) {
    for index in [0, 1, 2, 0, 2, 3] {
        vertices.push(HudVertex {
            position: corners[index],
            color,
        });
    }
}

fn to_ndc(size: PhysicalSize<u32>, x: f32, y: f32) -> [f32; 2] {
    let width = size.width.max(1) as f32;
    let height = size.height.max(1) as f32;
    [x / width * 2.0 - 1.0, 1.0 - y / height * 2.0]
}
