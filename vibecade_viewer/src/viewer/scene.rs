//! Expands the hub world into primitive instances and shader uniforms.

use glam::{Mat4, Quat, Vec3};
use vibecade_engine::{CameraPose, HubWorld, PropKind, SceneProp, catalog::rgb};

use super::mesh::{
    MAX_NEON_LIGHTS, MeshInstance, PrimitiveKind, SceneUniforms, instance_transform,
    to_matrix_columns,
};

pub const FIELD_OF_VIEW_Y_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

const AMBIENT: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
const SUN_DIRECTION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
const SUN_INTENSITY: f32 = 1.0;

const SKIN: u32 = 0xffdbac;
const WOOD: u32 = 0x8b4513;
const NAVY: u32 = 0x2c3e50;
const SHIRT: u32 = 0x3498db;
const GLASS: u32 = 0x88ccff;
const FLOOR: u32 = 0x9a6b3f;
const BRICK: u32 = 0x8e4b3a;
const CEILING: u32 = 0x5d7a3c;
const SCREEN: u32 = 0x101018;
const NPC_PALETTE: [u32; 6] = [0xe67e22, 0x16a085, 0x8e44ad, 0xc0392b, 0x2980b9, 0xd35400];

const SLAB_THICKNESS: f32 = 0.1;
const WALL_THICKNESS: f32 = 0.2;

/// Buckets instances by primitive so each shape is a single draw call.
#[derive(Default)]
pub(super) struct InstanceGroups {
    pub sphere: Vec<MeshInstance>,
    pub cube: Vec<MeshInstance>,
    pub cylinder: Vec<MeshInstance>,
}

impl InstanceGroups {
    pub fn total_instances(&self) -> usize {
        self.sphere.len() + self.cube.len() + self.cylinder.len()
    }

    fn push(&mut self, kind: PrimitiveKind, transform: Mat4, color: [f32; 3]) {
        let instance = MeshInstance::new(transform, color);
        match kind {
            PrimitiveKind::Sphere => self.sphere.push(instance),
            PrimitiveKind::Cube => self.cube.push(instance),
            PrimitiveKind::Cylinder => self.cylinder.push(instance),
        }
    }
}

/// Places parts relative to an anchor that stands on the floor and faces
/// along its own rotation.
struct Assembly<'a> {
    groups: &'a mut InstanceGroups,
    origin: Vec3,
    rotation_y: f32,
}

impl Assembly<'_> {
    fn part(&mut self, kind: PrimitiveKind, offset: Vec3, size: Vec3, color: [f32; 3]) {
        let position = self.origin + Quat::from_rotation_y(self.rotation_y) * offset;
        self.groups
            .push(kind, instance_transform(position, self.rotation_y, size), color);
    }
}

pub(super) fn build_instances(world: &HubWorld) -> InstanceGroups {
    let mut groups = InstanceGroups::default();

    for prop in world.props() {
        push_prop(&mut groups, prop);
    }

    for portal in world.portals().iter() {
        let cabinet = &portal.cabinet;
        let mut assembly = Assembly {
            groups: &mut groups,
            origin: portal.anchor.position,
            rotation_y: portal.anchor.rotation_y,
        };
        assembly.part(
            PrimitiveKind::Cube,
            Vec3::new(0.0, 1.5, 0.0),
            Vec3::new(2.0, 3.0, 1.0),
            cabinet.cabinet_color,
        );
        assembly.part(
            PrimitiveKind::Cube,
            Vec3::new(0.0, 1.5, 0.5),
            Vec3::new(1.7, 1.7, 0.1),
            cabinet.frame_color,
        );
        assembly.part(
            PrimitiveKind::Cube,
            Vec3::new(0.0, 1.5, 0.56),
            Vec3::new(1.5, 1.5, 0.02),
            rgb(SCREEN),
        );
    }

    for (index, agent) in world.agents().iter().enumerate() {
        let entity = agent.entity();
        let mut assembly = Assembly {
            groups: &mut groups,
            origin: entity.position,
            rotation_y: entity.rotation_y,
        };
        assembly.part(
            PrimitiveKind::Cylinder,
            Vec3::new(0.0, 0.4, 0.0),
            Vec3::new(0.6, 0.8, 0.6),
            npc_color(index),
        );
        assembly.part(
            PrimitiveKind::Sphere,
            Vec3::new(0.0, 1.4, 0.0),
            Vec3::splat(0.4),
            rgb(SKIN),
        );
    }

    let avatar = &world.player().entity;
    if avatar.visible {
        push_avatar(&mut groups, avatar.position, avatar.rotation_y);
    }

    groups
}

pub fn npc_color(index: usize) -> [f32; 3] {
    rgb(NPC_PALETTE[index % NPC_PALETTE.len()])
}

fn push_avatar(groups: &mut InstanceGroups, position: Vec3, rotation_y: f32) {
    let mut assembly = Assembly {
        groups,
        origin: position,
        rotation_y,
    };
    use PrimitiveKind::{Cylinder, Sphere};
    assembly.part(Cylinder, Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.6, 0.4, 0.6), rgb(NAVY));
    assembly.part(Cylinder, Vec3::new(0.0, 0.7, 0.0), Vec3::new(0.7, 0.6, 0.7), rgb(SHIRT));
    assembly.part(Cylinder, Vec3::new(0.0, 1.1, 0.0), Vec3::new(0.2, 0.2, 0.2), rgb(SKIN));
    assembly.part(Sphere, Vec3::new(0.0, 1.4, 0.0), Vec3::splat(0.4), rgb(SKIN));
    assembly.part(Sphere, Vec3::new(0.0, 1.5, 0.05), Vec3::splat(0.44), rgb(NAVY));
    for side in [-1.0, 1.0] {
        assembly.part(
            Cylinder,
            Vec3::new(side * 0.45, 0.7, 0.0),
            Vec3::new(0.16, 0.6, 0.16),
            rgb(SHIRT),
        );
        assembly.part(
            Sphere,
            Vec3::new(side * 0.45, 0.35, 0.0),
            Vec3::splat(0.2),
            rgb(SKIN),
        );
    }
}

fn push_prop(groups: &mut InstanceGroups, prop: &SceneProp) {
    let [width, height, depth] = prop.extent;
    let mut assembly = Assembly {
        groups,
        origin: Vec3::from_array(prop.position),
        rotation_y: prop.rotation_y,
    };
    use PrimitiveKind::{Cube, Cylinder, Sphere};
    match prop.kind {
        PropKind::Floor => assembly.part(
            Cube,
            Vec3::new(0.0, -SLAB_THICKNESS * 0.5, 0.0),
            Vec3::new(width, SLAB_THICKNESS, depth),
            rgb(FLOOR),
        ),
        PropKind::Ceiling => assembly.part(
            Cube,
            Vec3::new(0.0, SLAB_THICKNESS * 0.5, 0.0),
            Vec3::new(width, SLAB_THICKNESS, depth),
            rgb(CEILING),
        ),
        PropKind::Wall => assembly.part(
            Cube,
            Vec3::ZERO,
            Vec3::new(width, height, WALL_THICKNESS),
            rgb(BRICK),
        ),
        PropKind::Window => assembly.part(
            Cube,
            Vec3::new(0.0, 0.0, WALL_THICKNESS * 0.5),
            Vec3::new(width, height, 0.05),
            rgb(GLASS),
        ),
        PropKind::Chair => {
            let seat = height * 0.45;
            assembly.part(
                Cylinder,
                Vec3::new(0.0, seat, 0.0),
                Vec3::new(width * 1.2, 0.1, depth * 1.2),
                rgb(WOOD),
            );
            for (x, z) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                assembly.part(
                    Cylinder,
                    Vec3::new(x * width * 0.4, seat * 0.5, z * depth * 0.4),
                    Vec3::new(0.1, seat, 0.1),
                    rgb(WOOD),
                );
            }
            assembly.part(
                Cube,
                Vec3::new(0.0, seat + (height - seat) * 0.5, depth * 0.5),
                Vec3::new(width, height - seat, 0.08),
                rgb(WOOD),
            );
        }
        PropKind::BarCounter => {
            assembly.part(Cube, Vec3::ZERO, Vec3::new(width, height, depth), rgb(WOOD))
        }
        PropKind::BarStool => {
            assembly.part(
                Cylinder,
                Vec3::new(0.0, height, 0.0),
                Vec3::new(width, 0.1, depth),
                rgb(WOOD),
            );
            assembly.part(
                Cylinder,
                Vec3::new(0.0, height * 0.5, 0.0),
                Vec3::new(0.1, height, 0.1),
                rgb(WOOD),
            );
        }
        PropKind::Bartender => {
            assembly.part(
                Cylinder,
                Vec3::new(0.0, 0.4, 0.0),
                Vec3::new(width, 0.8, depth),
                rgb(NAVY),
            );
            assembly.part(
                Cube,
                Vec3::new(0.0, 0.8, depth * 0.5),
                Vec3::new(width, 0.8, 0.1),
                [1.0, 1.0, 1.0],
            );
            assembly.part(
                Sphere,
                Vec3::new(0.0, height - 0.2, 0.0),
                Vec3::splat(0.4),
                rgb(SKIN),
            );
        }
        PropKind::Drink => assembly.part(
            Cylinder,
            Vec3::ZERO,
            Vec3::new(width, height, depth),
            rgb(GLASS),
        ),
    }
}

pub fn view_projection(camera: CameraPose, aspect: f32) -> Mat4 {
    let projection = Mat4::perspective_rh(
        FIELD_OF_VIEW_Y_DEGREES.to_radians(),
        aspect.max(1e-3),
        NEAR_PLANE,
        FAR_PLANE,
    );
    let view = Mat4::look_at_rh(camera.eye, camera.target, Vec3::Y);
    projection * view
}

pub(super) fn scene_uniforms(world: &HubWorld, camera: CameraPose, aspect: f32) -> SceneUniforms {
    let sun = SUN_DIRECTION.normalize();
    let mut uniforms = SceneUniforms {
        view_projection: to_matrix_columns(view_projection(camera, aspect)),
        ambient: AMBIENT,
        sun_direction: [sun.x, sun.y, sun.z, SUN_INTENSITY],
        sun_color: [1.0, 1.0, 1.0, 1.0],
        neon_positions: [[0.0, 0.0, 0.0, 1.0]; MAX_NEON_LIGHTS],
        neon_colors: [[0.0; 4]; MAX_NEON_LIGHTS],
    };
    for (slot, light) in world.lights().iter().take(MAX_NEON_LIGHTS).enumerate() {
        let [x, y, z] = light.position.to_array();
        uniforms.neon_positions[slot] = [x, y, z, light.range];
        let [r, g, b] = light.color;
        uniforms.neon_colors[slot] = [r, g, b, light.intensity];
    }
    uniforms
}
