use bytemuck::{Pod, Zeroable};

pub(super) const MESH_SHADER_SOURCE: &str = r#"
struct SceneUniforms {
    view_projection: mat4x4<f32>,
    ambient: vec4<f32>,
    sun_direction: vec4<f32>,
    sun_color: vec4<f32>,
    neon_positions: array<vec4<f32>, 4>,
    neon_colors: array<vec4<f32>, 4>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) normal_0: vec4<f32>,
    @location(7) normal_1: vec4<f32>,
    @location(8) normal_2: vec4<f32>,
    @location(9) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn mesh_vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(instance.model_0, instance.model_1, instance.model_2, instance.model_3);
    let world = model * vec4<f32>(vertex.position, 1.0);
    var out: VertexOutput;
    out.position = scene.view_projection * world;
    out.world_position = world.xyz;
    let normal_matrix = mat3x3<f32>(
        instance.normal_0.xyz,
        instance.normal_1.xyz,
        instance.normal_2.xyz,
    );
    out.world_normal = normal_matrix * vertex.normal;
    out.color = instance.color;
    return out;
}

@fragment
fn mesh_fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(input.world_normal);
    var light = scene.ambient.rgb * scene.ambient.w;
    let sun = max(dot(normal, normalize(scene.sun_direction.xyz)), 0.0);
    light += scene.sun_color.rgb * scene.sun_direction.w * sun;

    for (var i = 0u; i < 4u; i = i + 1u) {
        let offset = scene.neon_positions[i].xyz - input.world_position;
        let dist = length(offset);
        let reach = scene.neon_positions[i].w;
        let falloff = clamp(1.0 - dist / reach, 0.0, 1.0);
        let facing = max(dot(normal, offset / max(dist, 0.0001)), 0.0);
        light += scene.neon_colors[i].rgb * scene.neon_colors[i].w * falloff * facing;
    }

    return vec4<f32>(input.color.rgb * light, input.color.a);
}
"#;

/// Flat colored triangles in clip space for the overlay tint and close button.
pub(super) const HUD_SHADER_SOURCE: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn hud_vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.position = vec4<f32>(input.position, 0.0, 1.0);
    out.color = input.color;
    return out;
}

@fragment
fn hud_fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct HudVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}
