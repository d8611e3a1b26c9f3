use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use terrainview_common::AppConfig;
use terrainview_heightmap::{Heightmap, Pattern, synthesize, write_raw};
use terrainview_input::{Action, InputSnapshot};
use terrainview_mesh::{GridLayout, TerrainMesh};
use terrainview_render::{DebugTextRenderer, RenderView, Renderer};
use terrainview_scene::Scene;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terrainview-cli", about = "CLI tool for terrain heightmaps")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PatternArg {
    Flat,
    Ramp,
    Radial,
}

impl From<PatternArg> for Pattern {
    fn from(p: PatternArg) -> Self {
        match p {
            PatternArg::Flat => Pattern::Flat,
            PatternArg::Ramp => Pattern::Ramp,
            PatternArg::Radial => Pattern::Radial,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Load a heightmap, mesh it and print statistics
    Inspect {
        /// Raw heightmap file
        path: PathBuf,
        /// Grid width in samples
        #[arg(short, long, default_value = "65")]
        width: u32,
        /// Height of a full-scale sample
        #[arg(long, default_value = "10.0")]
        height_scale: f32,
        /// Number of vertices to list
        #[arg(short, long, default_value = "0")]
        samples: usize,
    },
    /// Write a synthetic raw heightmap
    Generate {
        /// Output file
        path: PathBuf,
        /// Grid width in samples
        #[arg(short, long, default_value = "65")]
        width: u32,
        #[arg(short, long, value_enum, default_value = "radial")]
        pattern: PatternArg,
    },
    /// Run the camera update headlessly and print where it ends up
    Fly {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Hold the forward key every frame
        #[arg(long)]
        forward: bool,
        /// Horizontal mouse motion per frame, in pixels
        #[arg(long, default_value = "0.0")]
        turn: f32,
    },
    /// Write the default viewer config as JSON
    DefaultConfig {
        /// Output file
        path: PathBuf,
    },
}

fn inspect(path: &Path, width: u32, height_scale: f32, samples: usize) -> anyhow::Result<String> {
    let heightmap = Heightmap::load(path, width, height_scale)
        .with_context(|| format!("failed to load heightmap {}", path.display()))?;
    let mesh = TerrainMesh::build(&heightmap, &GridLayout::new(width))?;
    let scene = Scene::new(&AppConfig::default());

    let mut out = format!(
        "Heightmap: {} ({}x{}, heights {:.3}..{:.3})\n",
        path.display(),
        heightmap.width(),
        heightmap.width(),
        heightmap.min_height(),
        heightmap.max_height()
    );
    let view = RenderView::from_scene(&scene);
    out.push_str(&DebugTextRenderer::with_samples(samples).render(&mesh, &view));
    Ok(out)
}

fn fly(frames: u32, dt: f32, forward: bool, turn: f32) -> Scene {
    let mut scene = Scene::new(&AppConfig::default());
    let mut input = InputSnapshot::new().with_mouse_delta(turn, 0.0);
    if forward {
        input = input.with_held(Action::MoveForward);
    }
    for _ in 0..frames {
        scene.update(dt, &input);
    }
    scene
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("terrainview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", terrainview_common::crate_info());
            println!("heightmap: {}", terrainview_heightmap::crate_info());
            println!("mesh: {}", terrainview_mesh::crate_info());
            println!("render: {}", terrainview_render::crate_info());
            println!("controls:");
            for action in Action::ALL {
                println!("  {:<6} {action:?}", action.default_key());
            }
        }
        Commands::Inspect {
            path,
            width,
            height_scale,
            samples,
        } => {
            print!("{}", inspect(&path, width, height_scale, samples)?);
        }
        Commands::Generate {
            path,
            width,
            pattern,
        } => {
            let bytes = synthesize(width, pattern.into());
            write_raw(&path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {} bytes to {}", bytes.len(), path.display());
            println!("Generated {width}x{width} {pattern:?} heightmap at {}", path.display());
        }
        Commands::Fly {
            frames,
            dt,
            forward,
            turn,
        } => {
            let scene = fly(frames, dt, forward, turn);
            let cam = &scene.camera;
            let p = cam.position();
            println!("Simulated {} frames at dt={dt}", scene.frame());
            println!("Camera: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            println!(
                "Yaw: {:.2}  Pitch: {:.2}  FOV: {:.1}",
                cam.yaw(),
                cam.pitch(),
                cam.field_of_view()
            );
            println!("Rotation: {:.2}", scene.degrees_rotated());
        }
        Commands::DefaultConfig { path } => {
            AppConfig::default()
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
    }

    Ok(())
}
