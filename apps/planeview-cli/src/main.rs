use clap::{Parser, Subcommand};
use planeview_camera::OrbitCamera;
use planeview_mesh::GridMesh;
use planeview_render::{DebugTextRenderer, SceneRenderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "planeview-cli", about = "CLI tool for planeview operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build a grid mesh and print its statistics
    Inspect {
        /// Lattice points along X (minimum 2)
        #[arg(long, default_value = "32")]
        resolution_x: u32,
        /// Lattice points along Y (minimum 2)
        #[arg(long, default_value = "32")]
        resolution_y: u32,
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
            println!("planeview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", planeview_render::crate_info());
        }
        Commands::Inspect {
            resolution_x,
            resolution_y,
        } => {
            let mesh = GridMesh::build(resolution_x, resolution_y)?;
            let camera = OrbitCamera::default();

            print!("{}", DebugTextRenderer::new().render(&mesh, &camera));

            let max_index = mesh.indices().iter().copied().max().unwrap_or(0);
            println!(
                "Index range: 0..={} (vertex count {})",
                max_index,
                mesh.vertex_count()
            );
            println!(
                "Triangle check: {} triples cover {} quad cells",
                mesh.index_count() / 3,
                (resolution_x - 1) * (resolution_y - 1)
            );
        }
    }

    Ok(())
}
