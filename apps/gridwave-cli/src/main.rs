use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use gridwave_input::{Action, InputEvent, InputQueue};
use gridwave_mesh::{DEFAULT_JITTER_SCALE, FOLD_FREE_JITTER, GridMeshBuilder, Mesh};
use gridwave_render::{DebugBackend, FrameLoop, FrameStatus, GridConfig, SceneConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridwave-cli", about = "Inspect water grids and run the frame loop headless")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the default scene
    Info {
        /// Print the default scene as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a grid mesh, check its invariants and print its stats
    Mesh {
        #[arg(long, default_value = "500")]
        width: f32,
        #[arg(long, default_value = "500")]
        depth: f32,
        #[arg(long, default_value = "1000")]
        segments_x: u32,
        #[arg(long, default_value = "1000")]
        segments_z: u32,
        /// Jitter RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_JITTER_SCALE)]
        jitter: f32,
        /// Print stats as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the frame loop against a recording backend with scripted input
    Simulate {
        /// Number of frames to present
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: f32,
        /// Cells along each axis
        #[arg(long, default_value = "100")]
        segments: u32,
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

/// Reject meshes with out-of-range indices. Folded (clockwise) triangles are
/// an error only when `jitter_scale` is small enough that none can occur.
fn check_mesh(mesh: &Mesh, jitter_scale: f32) -> anyhow::Result<()> {
    if let Some(i) = mesh.first_out_of_range_index() {
        bail!(
            "index {i} refers to vertex {} but the mesh has {} vertices",
            mesh.indices()[i],
            mesh.vertex_count()
        );
    }
    let clockwise = mesh.clockwise_triangle_count();
    if clockwise > 0 && jitter_scale <= FOLD_FREE_JITTER {
        bail!(
            "{clockwise} of {} triangles are not counter-clockwise from +Y",
            mesh.triangle_count()
        );
    }
    Ok(())
}

/// Drive `frames` frames of scripted flight, then request a close.
///
/// The first half flies forward, the second half strafes right while
/// ascending. The pointer drifts right every frame, the view zooms in once
/// midway, and the window is resized a third of the way through.
fn simulate(
    frames: u32,
    fps: f32,
    segments: u32,
    seed: u64,
) -> anyhow::Result<(FrameLoop, DebugBackend)> {
    if !(fps.is_finite() && fps > 0.0) {
        bail!("fps must be positive, got {fps}");
    }

    let scene = SceneConfig {
        grid: GridConfig {
            segments_x: segments,
            segments_z: segments,
            seed: Some(seed),
            ..GridConfig::default()
        },
        ..SceneConfig::default()
    };
    let mesh = scene.grid.builder().build()?;
    let index_count = u32::try_from(mesh.index_count()).context("mesh too large")?;

    let mut frame_loop = FrameLoop::new(&scene, 0.0);
    let mut backend = DebugBackend::new(1280, 720, index_count);
    let mut input = InputQueue::with_pointer(640.0, 360.0);
    let step = 1.0 / fps;

    for i in 0..frames {
        let second_half = i >= frames / 2;
        input.set_action(Action::MoveForward, !second_half);
        input.set_action(Action::StrafeRight, second_half);
        input.set_action(Action::Ascend, second_half);
        input.pointer_delta(2.0, 0.0);
        if i == frames / 2 {
            input.push(InputEvent::Scrolled { dy: 5.0 });
        }
        if i == frames / 3 {
            input.push(InputEvent::Resized {
                width: 1920,
                height: 1080,
            });
        }

        let now = (i + 1) as f32 * step;
        if frame_loop.run_frame(now, &mut input, &mut backend)? == FrameStatus::Exit {
            bail!("frame loop exited early at frame {i}");
        }
    }

    input.release_all();
    input.push(InputEvent::CloseRequested);
    let now = (frames + 1) as f32 * step;
    if frame_loop.run_frame(now, &mut input, &mut backend)? != FrameStatus::Exit {
        bail!("frame loop ignored the close request");
    }
    tracing::info!(frames = frame_loop.frames(), "simulation finished");

    Ok((frame_loop, backend))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info { json } => {
            let scene = SceneConfig::default();
            if json {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                println!("gridwave-cli v{}", env!("CARGO_PKG_VERSION"));
                println!("mesh: {}", gridwave_mesh::crate_info());
                println!("input: {}", gridwave_input::crate_info());
                println!("render: {}", gridwave_render::crate_info());
                println!(
                    "grid: {}x{} units, {}x{} segments, jitter {}",
                    scene.grid.width,
                    scene.grid.depth,
                    scene.grid.segments_x,
                    scene.grid.segments_z,
                    scene.grid.jitter_scale
                );
                println!(
                    "waves: amplitude={} frequency={} speed={} noise_scale={}",
                    scene.waves.amplitude,
                    scene.waves.frequency,
                    scene.waves.speed,
                    scene.waves.noise_scale
                );
            }
        }
        Commands::Mesh {
            width,
            depth,
            segments_x,
            segments_z,
            seed,
            jitter,
            json,
        } => {
            let mut builder =
                GridMeshBuilder::new(width, depth, segments_x, segments_z).with_jitter_scale(jitter);
            if let Some(seed) = seed {
                builder = builder.with_seed(seed);
            }
            let mesh = builder.build()?;
            check_mesh(&mesh, jitter)?;

            let stats = mesh.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "Mesh: {} vertices, {} indices, {} triangles",
                    stats.vertex_count, stats.index_count, stats.triangle_count
                );
                println!(
                    "Folded: {} clockwise triangles ({:.2}%)",
                    stats.clockwise_triangles,
                    stats.clockwise_triangles as f64 * 100.0 / stats.triangle_count as f64
                );
                println!(
                    "Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
                    stats.min[0], stats.min[1], stats.min[2], stats.max[0], stats.max[1], stats.max[2]
                );
                println!(
                    "Memory: {} vertex bytes, {} index bytes",
                    stats.vertex_bytes, stats.index_bytes
                );
                println!("Invariants: OK");
            }
        }
        Commands::Simulate {
            frames,
            fps,
            segments,
            seed,
        } => {
            println!("Simulating {frames} frames at {fps} fps (seed={seed})");
            let (frame_loop, backend) = simulate(frames, fps, segments, seed)?;
            let camera = frame_loop.camera();
            print!("{}", backend.report());
            println!(
                "Camera: pos=({:.2}, {:.2}, {:.2}) yaw={:.2} pitch={:.2} fov={:.2}",
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.yaw(),
                camera.pitch(),
                camera.fov()
            );
            let stats = frame_loop.stats();
            println!(
                "Timing: avg={:.2}ms min={:.2}ms max={:.2}ms",
                stats.average() * 1000.0,
                stats.min() * 1000.0,
                stats.max() * 1000.0
            );
        }
    }

    Ok(())
}
