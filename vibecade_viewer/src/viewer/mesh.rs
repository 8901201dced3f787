//! Unit-sized primitive meshes. Every prop, cabinet and character in the hub
//! is drawn as scaled, rotated instances of these three shapes.

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3};

const SPHERE_LAT_DIVS: u32 = 12;
const SPHERE_LON_DIVS: u32 = 18;
const CYLINDER_SEGMENTS: u32 = 20;

/// Neon lights fed to the shader; matches the array length in the WGSL.
pub const MAX_NEON_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub struct MeshPrimitive {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshPrimitive {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    Sphere,
    Cube,
    Cylinder,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, columns padded to vec4.
    pub normal: [[f32; 4]; 3],
    pub color: [f32; 4],
}

impl MeshInstance {
    pub fn new(transform: Mat4, color: [f32; 3]) -> Self {
        let normal = normal_matrix(transform);
        Self {
            model: to_matrix_columns(transform),
            normal: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
            color: [color[0], color[1], color[2], 1.0],
        }
    }
}

/// Maps object-space normals to world space under non-uniform scale.
pub fn normal_matrix(transform: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(transform);
    if linear.determinant().abs() <= f32::EPSILON {
        return linear;
    }
    linear.inverse().transpose()
}

/// Camera plus lighting, laid out for a WGSL uniform block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_projection: [[f32; 4]; 4],
    /// rgb color, w intensity.
    pub ambient: [f32; 4],
    /// xyz direction towards the light, w intensity.
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    /// xyz position, w range.
    pub neon_positions: [[f32; 4]; MAX_NEON_LIGHTS],
    /// rgb color, w current intensity.
    pub neon_colors: [[f32; 4]; MAX_NEON_LIGHTS],
}

pub fn primitive(kind: PrimitiveKind) -> MeshPrimitive {
    match kind {
        PrimitiveKind::Sphere => build_sphere(SPHERE_LAT_DIVS, SPHERE_LON_DIVS),
        PrimitiveKind::Cube => build_cube(),
        PrimitiveKind::Cylinder => build_cylinder(CYLINDER_SEGMENTS),
    }
}

/// Scale the unit primitive to `size`, spin it about +Y, then place it.
pub fn instance_transform(position: Vec3, rotation_y: f32, size: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(size, Quat::from_rotation_y(rotation_y), position)
}

pub fn to_matrix_columns(matrix: Mat4) -> [[f32; 4]; 4] {
    matrix.to_cols_array_2d()
}

fn build_sphere(lat_divisions: u32, lon_divisions: u32) -> MeshPrimitive {
    let lat_steps = lat_divisions.max(3);
    let lon_steps = lon_divisions.max(6);
    let mut vertices = Vec::with_capacity(((lat_steps + 1) * (lon_steps + 1)) as usize);
    let mut indices = Vec::with_capacity((lat_steps * lon_steps * 6) as usize);

    for lat in 0..=lat_steps {
        let theta = lat as f32 / lat_steps as f32 * PI;
        for lon in 0..=lon_steps {
            let phi = lon as f32 / lon_steps as f32 * PI * 2.0;
            let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            vertices.push(MeshVertex {
                position: (normal * 0.5).into(),
                normal: normal.normalize_or_zero().into(),
            });
        }
    }

    let ring = (lon_steps + 1) as usize;
    for lat in 0..lat_steps as usize {
        for lon in 0..lon_steps as usize {
            let current = lat * ring + lon;
            let next = current + ring;
            indices.extend_from_slice(&[
                current as u16,
                (current + 1) as u16,
                next as u16,
                (current + 1) as u16,
                (next + 1) as u16,
                next as u16,
            ]);
        }
    }

    MeshPrimitive::new(vertices, indices)
}

fn build_cube() -> MeshPrimitive {
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (face_index, (normal, right, up)) in faces.iter().enumerate() {
        let base = (face_index * 4) as u16;
        let center = *normal * 0.5;
        for (sx, sy) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            vertices.push(MeshVertex {
                position: (center + *right * sx + *up * sy).into(),
                normal: (*normal).into(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshPrimitive::new(vertices, indices)
}

/// Unit-height cylinder of diameter 1, centered on the origin.
fn build_cylinder(segments: u32) -> MeshPrimitive {
    let ring = segments.max(3);
    let mut vertices = Vec::with_capacity((ring as usize + 1) * 4 + 2);
    let mut indices = Vec::with_capacity(ring as usize * 12);

    let rim = |i: u32| {
        let angle = i as f32 / ring as f32 * PI * 2.0;
        (angle.cos() * 0.5, angle.sin() * 0.5)
    };

    for i in 0..=ring {
        let (x, z) = rim(i);
        let normal = Vec3::new(x, 0.0, z).normalize_or_zero();
        vertices.push(MeshVertex {
            position: [x, -0.5, z],
            normal: normal.into(),
        });
        vertices.push(MeshVertex {
            position: [x, 0.5, z],
            normal: normal.into(),
        });
    }
    for i in 0..ring as u16 {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;
        indices.extend_from_slice(&[bottom, top, next_bottom, next_bottom, top, next_top]);
    }

    for (y, normal) in [(0.5_f32, Vec3::Y), (-0.5, Vec3::NEG_Y)] {
        let center = vertices.len() as u16;
        vertices.push(MeshVertex {
            position: [0.0, y, 0.0],
            normal: normal.into(),
        });
        for i in 0..ring {
            let (x, z) = rim(i);
            vertices.push(MeshVertex {
                position: [x, y, z],
                normal: normal.into(),
            });
        }
        for i in 0..ring {
            let current = center + 1 + i as u16;
            let next = center + 1 + ((i + 1) % ring) as u16;
            if y > 0.0 {
                indices.extend_from_slice(&[center, next, current]);
            } else {
                indices.extend_from_slice(&[center, current, next]);
            }
        }
    }

    MeshPrimitive::new(vertices, indices)
}
