/// wire3d Terminal - spinning OBJ wireframe viewer
///
/// Loads an OBJ file (or a built-in cube) and spins it in the terminal.
/// Controls:
///   - Z / X: Zoom in / out
///   - WASD / Arrow Keys: Rotate
///   - E/R: Roll rotation
///   - Q/ESC: Quit
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use wire3d_core::{load_obj, Config, Mesh};
use wire3d_terminal::{dump_mesh, TerminalApp};

#[derive(Debug, Parser)]
#[command(name = "wire3d-terminal", version, about = "Spin an OBJ wireframe in the terminal")]
struct Args {
    /// OBJ file to load; a cube is shown when omitted
    mesh: Option<PathBuf>,

    /// TOML file with capacities and view settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the parsed vertices and edges instead of rendering
    #[arg(long)]
    dump: bool,

    /// Draw each unordered vertex pair once
    #[arg(long)]
    dedupe: bool,

    /// Run the per-vertex pass on all cores
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    config.view.parallel |= args.parallel;

    let mut mesh = match &args.mesh {
        Some(path) => {
            let parsed = load_obj(path, &config.limits);
            if let Some(fatal) = parsed.fatal() {
                bail!("cannot load {}: {fatal}", path.display());
            }
            let warnings = parsed.warnings().count();
            if warnings > 0 {
                warn!("{} produced {warnings} diagnostics", path.display());
            }
            parsed.mesh
        }
        None => {
            info!("no mesh given, showing the built-in cube");
            Mesh::cube(2.0)
        }
    };
    if args.dedupe {
        mesh = mesh.deduplicated();
    }

    info!(
        "loaded {} vertices and {} edges",
        mesh.vertex_count(),
        mesh.edge_count()
    );
    if let Some((min, max)) = mesh.bounds() {
        info!("bounds {min} .. {max}");
    }

    if args.dump {
        dump_mesh(&mesh, &mut io::stdout().lock())?;
        return Ok(());
    }

    let mut app = TerminalApp::new(mesh, &config.view).context("terminal is not available")?;
    app.run()?;

    println!("Vertex count: {}", app.mesh().vertex_count());
    println!("Edge count: {}", app.mesh().edge_count());
    Ok(())
}
