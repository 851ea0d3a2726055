/// WGSL shader for the cube, its shadow and the ground.
///
/// Color and lighting are resolved per vertex; every face has its own
/// vertices, so shading stays flat.
pub const MESH_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    face_colors: array<vec4<f32>, 6>,
    wire_color: vec4<f32>,
    light_dir: vec4<f32>,
    // x: ambient, y: 1.0 when lit
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) face: u32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);
    let base = uniforms.face_colors[min(vertex.face, 5u)];

    var shade = 1.0;
    if (uniforms.params.y > 0.5) {
        let normal = normalize((uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz);
        let ambient = uniforms.params.x;
        shade = ambient + (1.0 - ambient) * max(dot(normal, uniforms.light_dir.xyz), 0.0);
    }

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.color = vec4<f32>(base.rgb * shade, base.a);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}

@fragment
fn fs_wire(in: VertexOutput) -> @location(0) vec4<f32> {
    return uniforms.wire_color;
}
"#;

/// WGSL shader for the cursor trail, drawn directly in clip space.
pub const TRAIL_SHADER: &str = r#"
struct TrailInput {
    @location(0) ndc: vec2<f32>,
    @location(1) color: vec4<f32>,
};

struct TrailOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_trail(vertex: TrailInput) -> TrailOutput {
    var out: TrailOutput;
    out.clip_position = vec4<f32>(vertex.ndc, 0.0, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_trail(in: TrailOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
