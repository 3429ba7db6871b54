/// WGSL water shader. The vertex stage displaces the flat grid with a few
/// directional sine waves, phase-shifted by value noise; the fragment stage
/// applies diffuse, specular and a fresnel rim.
///
/// Normals use flat interpolation, so each triangle takes its first vertex's
/// normal and the jittered lattice reads as faceted low-poly water.
pub const WATER_SHADER: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    view: mat4x4<f32>,
    model: mat4x4<f32>,
    view_pos: vec3<f32>,
    time: f32,
    light_dir: vec3<f32>,
    amplitude: f32,
    light_color: vec3<f32>,
    frequency: f32,
    speed: f32,
    noise_scale: f32,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) @interpolate(flat) normal: vec3<f32>,
    @location(1) world_pos: vec3<f32>,
    @location(2) height: f32,
};

fn hash2(p: vec2<f32>) -> f32 {
    return fract(sin(dot(p, vec2<f32>(127.1, 311.7))) * 43758.5453);
}

fn value_noise(p: vec2<f32>) -> f32 {
    let i = floor(p);
    let f = fract(p);
    let s = f * f * (3.0 - 2.0 * f);
    let a = hash2(i);
    let b = hash2(i + vec2<f32>(1.0, 0.0));
    let c = hash2(i + vec2<f32>(0.0, 1.0));
    let d = hash2(i + vec2<f32>(1.0, 1.0));
    return mix(mix(a, b, s.x), mix(c, d, s.x), s.y);
}

// Returns (height, d/dx, d/dz) of one directional sine wave.
fn wave(p: vec2<f32>, dir: vec2<f32>, freq: f32, phase: f32) -> vec3<f32> {
    let d = normalize(dir);
    let theta = dot(d, p) * freq + phase;
    let slope = freq * cos(theta);
    return vec3<f32>(sin(theta), d.x * slope, d.y * slope);
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let p = in.position.xz;
    let n = value_noise(p * 0.05 * u.noise_scale) * 6.2831853;
    let t = u.time * u.speed;

    var w = wave(p, vec2<f32>(1.0, 0.3), u.frequency, t * 2.0 + n);
    w += wave(p, vec2<f32>(-0.4, 1.0), u.frequency * 1.7, t * 2.6 + n * 0.5) * 0.5;
    w += wave(p, vec2<f32>(0.7, -0.8), u.frequency * 2.9, t * 3.4) * 0.25;
    w *= u.amplitude;

    let local = vec3<f32>(in.position.x, w.x, in.position.z);
    let world = u.model * vec4<f32>(local, 1.0);

    var out: VertexOutput;
    out.clip_position = u.projection * u.view * world;
    out.normal = normalize(vec3<f32>(-w.y, 1.0, -w.z));
    out.world_pos = world.xyz;
    out.height = w.x;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let l = normalize(u.light_dir);
    let v = normalize(u.view_pos - in.world_pos);
    let h = normalize(l + v);

    let deep = vec3<f32>(0.02, 0.12, 0.22);
    let shallow = vec3<f32>(0.10, 0.45, 0.55);
    let crest = clamp(in.height / max(u.amplitude, 0.001) * 0.5 + 0.5, 0.0, 1.0);
    let base = mix(deep, shallow, crest);

    let diffuse = max(dot(n, l), 0.0);
    let specular = pow(max(dot(n, h), 0.0), 64.0);
    let fresnel = pow(1.0 - max(dot(n, v), 0.0), 3.0);

    let color = base * (0.25 + 0.75 * diffuse) * u.light_color
        + u.light_color * specular * 0.6
        + vec3<f32>(fresnel * 0.15);
    return vec4<f32>(color, 1.0);
}
"#;
