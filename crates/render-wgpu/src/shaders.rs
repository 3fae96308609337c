/// WGSL shader for the instanced globe cubes.
///
/// Instance matrices are local to the globe; `globe` carries the shared
/// world transform so rotating the globe never touches instance data.
pub const GLOBE_SHADER: &str = r#"
struct GlobeUniforms {
    view_proj: mat4x4<f32>,
    globe: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> u: GlobeUniforms;

struct CubeVertex {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct CubeInstance {
    @location(2) col0: vec4<f32>,
    @location(3) col1: vec4<f32>,
    @location(4) col2: vec4<f32>,
    @location(5) col3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct Fragment {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(v: CubeVertex, inst: CubeInstance) -> Fragment {
    let to_world = u.globe * mat4x4<f32>(inst.col0, inst.col1, inst.col2, inst.col3);

    var f: Fragment;
    f.clip = u.view_proj * to_world * vec4<f32>(v.position, 1.0);
    f.normal = normalize((to_world * vec4<f32>(v.normal, 0.0)).xyz);
    f.color = inst.color;
    return f;
}

// Fixed key light plus a sky/ground ambient term.
@fragment
fn fs_main(f: Fragment) -> @location(0) vec4<f32> {
    let key = normalize(vec3<f32>(0.4, 0.8, 0.6));
    let diffuse = max(dot(f.normal, key), 0.0);
    let ambient = mix(0.3, 0.5, f.normal.y * 0.5 + 0.5);
    return vec4<f32>(f.color.rgb * (ambient + 0.55 * diffuse), f.color.a);
}
"#;
