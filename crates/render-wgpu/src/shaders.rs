/// WGSL shader for the terrain: camera * model transform, per-vertex color.
pub const TERRAIN_SHADER: &str = r#"
struct Uniforms {
    camera: mat4x4<f32>,
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_terrain(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.camera * uniforms.model * vec4<f32>(vertex.position, 1.0);
    out.color = vec4<f32>(vertex.color, 1.0);
    return out;
}

@fragment
fn fs_terrain(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

pub const VERTEX_ENTRY: &str = "vs_terrain";
pub const FRAGMENT_ENTRY: &str = "fs_terrain";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_present() {
        assert!(TERRAIN_SHADER.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(TERRAIN_SHADER.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn attribute_locations_match_buffers() {
        assert!(TERRAIN_SHADER.contains("@location(0) position: vec3<f32>"));
        assert!(TERRAIN_SHADER.contains("@location(1) color: vec3<f32>"));
    }
}
