use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;
use voxglobe_common::{ConfigArgs, GlobeConfig, SurfaceMaterials};
use voxglobe_input::PointerInput;
use voxglobe_kernel::{Globe, GlobeEvent, voxel_hash};
use voxglobe_render::{DebugTextRenderer, PrimitiveList, RenderView, Renderer};
use voxglobe_tools::GlobeInspector;

#[derive(Parser)]
#[command(name = "voxglobe-cli", about = "Headless tool for the voxel globe")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default configuration
    Info,
    /// Generate a globe and print its summary
    Generate {
        #[command(flatten)]
        config: ConfigArgs,
        /// Print the equatorial slice map
        #[arg(long)]
        slice: bool,
        /// Number of latitude bands to tabulate
        #[arg(long, default_value = "5")]
        bands: usize,
        /// Generate twice and verify both shells hash identically
        #[arg(long)]
        check: bool,
    },
    /// Run the rotation controller through a scripted drag
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,
        /// Total ticks to run
        #[arg(short, long, default_value = "240")]
        ticks: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Tick on which the drag button goes down
        #[arg(long, default_value = "30")]
        drag_at: u64,
        /// Number of ticks the drag is held
        #[arg(long, default_value = "20")]
        drag_ticks: u64,
        /// Pointer travel per tick while dragging, x then y (pixels)
        #[arg(long, num_args = 2, default_values_t = [4.0, -1.0], allow_negative_numbers = true)]
        drag: Vec<f32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("voxglobe-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("default config:");
            println!("{}", serde_json::to_string_pretty(&GlobeConfig::default())?);
        }
        Commands::Generate {
            config,
            slice,
            bands,
            check,
        } => {
            let config = config.resolve()?;
            let mut primitives = PrimitiveList::new();
            let globe = Globe::start(config, SurfaceMaterials::default(), &mut primitives);

            let renderer = DebugTextRenderer { slice };
            print!("{}", renderer.render(&globe, &RenderView::framing(&globe)));
            let summary = GlobeInspector::summary(&globe);
            println!("{summary}");
            println!(
                "Land fraction: {:.1}%  primitives: {}",
                summary.land_fraction() * 100.0,
                primitives.len()
            );

            if bands > 0 && !globe.voxels().is_empty() {
                println!("Latitude bands (north to south):");
                for (i, (land, water)) in GlobeInspector::latitude_bands(&globe, bands)
                    .iter()
                    .enumerate()
                {
                    println!("  band {i}: land={land:>5} water={water:>5}");
                }
            }

            if check {
                let again = regenerated_hash(&config);
                let ok = again == globe.voxel_hash();
                println!("Determinism: {}", if ok { "OK" } else { "MISMATCH" });
                if !ok {
                    tracing::warn!(
                        first = globe.voxel_hash(),
                        second = again,
                        "voxel hashes differ"
                    );
                    anyhow::bail!("regeneration produced a different shell");
                }
            }
        }
        Commands::Simulate {
            config,
            ticks,
            dt,
            drag_at,
            drag_ticks,
            drag,
        } => {
            let config = config.resolve()?;
            let delta = Vec2::new(drag[0], drag[1]);
            let mut primitives = PrimitiveList::new();
            let mut globe = Globe::start(config, SurfaceMaterials::default(), &mut primitives);
            globe.drain_events();

            tracing::info!(ticks, dt, drag_at, drag_ticks, "simulation started");
            println!(
                "Simulating {ticks} ticks at dt={dt:.4}s, drag {:?} px/tick for {drag_ticks} ticks from tick {drag_at}",
                delta.to_array()
            );
            for t in 0..ticks {
                let input = scripted_input(t, drag_at, drag_ticks, delta);
                globe.tick(&input, dt);
                for event in globe.drain_events() {
                    if let GlobeEvent::SpinPhaseChanged { tick, from, to } = event {
                        let w = globe.angular_velocity();
                        println!(
                            "  tick {tick:>4}: {from} -> {to}  spin=({:.1}, {:.1}, {:.1})",
                            w.x, w.y, w.z
                        );
                    }
                }
            }
            tracing::info!(tick = globe.tick_count(), phase = %globe.phase(), "simulation finished");
            println!("{}", GlobeInspector::summary(&globe));
            if let Some(dir) = globe.spin().last_spin_direction {
                println!(
                    "Passive direction: ({:.3}, {:.3}, {:.3})",
                    dir.x, dir.y, dir.z
                );
            }
        }
    }

    Ok(())
}

/// Pointer input for tick `t` of the scripted drag.
fn scripted_input(t: u64, drag_at: u64, drag_ticks: u64, delta: Vec2) -> PointerInput {
    if t == drag_at {
        PointerInput::press()
    } else if t > drag_at && t <= drag_at + drag_ticks {
        PointerInput::held(delta)
    } else {
        PointerInput::IDLE
    }
}

/// Hash of a fresh generation from `config`, independent of any published globe.
fn regenerated_hash(config: &GlobeConfig) -> u64 {
    voxel_hash(&voxglobe_terrain::generate(&config.terrain))
}
