//! Flatland CLI - planar graph layout from the command line.
//!
//! Usage: flatland <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `flatland --help` for available commands. Set `RUST_LOG=debug` for
//! solver diagnostics.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use parking_lot::Mutex;
use serde_json::json;

use flatland::algo::harmonic::{HarmonicOptions, TutteVariant};
use flatland::algo::radial::RadialOptions;
use flatland::algo::spring::SpringOptions;
use flatland::algo::{Embedding, EntityKind, Progress};
use flatland::graph::boundaries;
use flatland::io;
use flatland::shapes::{self, Shape};
use flatland::simulation::{RunnerOptions, SpringRunner};
use flatland::store::EmbeddingStore;

#[derive(Parser)]
#[command(name = "flatland")]
#[command(author, version, about = "Planar graph layout CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display graph information
    Info {
        /// Input graph file (.fold, .json or .obj)
        input: PathBuf,
    },

    /// Tutte embedding with the boundary pinned to the unit circle
    Tutte {
        /// Input graph file
        input: PathBuf,

        /// Output file (.json for coordinates or shapes, .fold/.obj for the graph); stdout if omitted
        output: Option<PathBuf>,

        /// Embed faces instead of vertices
        #[arg(long)]
        faces: bool,

        /// Linear solver
        #[arg(short, long, value_enum, default_value = "qr")]
        solver: Solver,

        /// Write draw primitives instead of coordinates
        #[arg(long)]
        shapes: bool,
    },

    /// Radial layered layout of faces
    Radial {
        /// Input graph file
        input: PathBuf,

        /// Output JSON file; stdout if omitted
        output: Option<PathBuf>,

        /// Radius of the outer ring
        #[arg(short, long, default_value = "1.0")]
        radius: f64,

        /// Write draw primitives instead of coordinates
        #[arg(long)]
        shapes: bool,
    },

    /// Eades spring relaxation of the vertices
    Spring {
        /// Input graph file
        input: PathBuf,

        /// Output file (.json for coordinates or shapes, .fold/.obj for the graph); stdout if omitted
        output: Option<PathBuf>,

        /// Number of ticks
        #[arg(short, long, default_value = "100")]
        ticks: usize,

        /// Attraction divisor
        #[arg(long, default_value = "100.0")]
        goal: f64,

        /// Attraction strength
        #[arg(long, default_value = "1.0")]
        spring: f64,

        /// Repulsion strength
        #[arg(long, default_value = "2.0")]
        repulsion: f64,

        /// Damping decay per tick (1.0 keeps damping constant)
        #[arg(long, default_value = "1.0")]
        decay: f64,

        /// Start from the Tutte embedding instead of the file coordinates
        #[arg(long)]
        from_tutte: bool,

        /// Run on the real-time ticker instead of back to back
        #[arg(long)]
        realtime: bool,

        /// Ticks per second for --realtime
        #[arg(long, default_value = "60.0")]
        fps: f64,

        /// Compute repulsion on all cores
        #[arg(long)]
        parallel: bool,

        /// Write draw primitives instead of coordinates
        #[arg(long)]
        shapes: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Solver {
    /// Dense QR least squares
    Qr,
    /// Conjugate gradient on the symmetrized system
    Cg,
}

impl Solver {
    fn options(self) -> HarmonicOptions {
        match self {
            Solver::Qr => HarmonicOptions::default(),
            Solver::Cg => HarmonicOptions::default().with_conjugate_gradient(),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Tutte {
            input,
            output,
            faces,
            solver,
            shapes,
        } => {
            cmd_tutte(&input, output.as_deref(), faces, solver, shapes)?;
        }

        Commands::Radial {
            input,
            output,
            radius,
            shapes,
        } => {
            cmd_radial(&input, output.as_deref(), radius, shapes)?;
        }

        Commands::Spring {
            input,
            output,
            ticks,
            goal,
            spring,
            repulsion,
            decay,
            from_tutte,
            realtime,
            fps,
            parallel,
            shapes,
        } => {
            let options = SpringOptions {
                goal,
                spring,
                repulsion,
                damping_decay: decay,
                parallel,
            };
            let schedule = if realtime { Some(fps) } else { None };
            cmd_spring(&input, output.as_deref(), ticks, options, from_tutte, schedule, shapes)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Only ever move forward
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        if raw_percent <= previous && raw_percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (raw_percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, raw_percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn load_store(input: &Path) -> Result<EmbeddingStore, Box<dyn std::error::Error>> {
    let graph = io::load(input)?;
    let mut store = EmbeddingStore::new();
    store.set_graph(graph)?;
    Ok(store)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(input)?;
    let graph = store.graph();

    println!("File: {}", input.display());
    println!("Vertices: {}", graph.num_vertices());
    println!("Edges: {}", graph.num_edges());
    println!("Faces: {}", graph.num_faces());

    if graph.vertices_coords.is_empty() {
        println!("Coordinates: none");
    } else {
        let embedding = store.embedding();
        if let Some((min, max)) = embedding.bounding_box() {
            println!(
                "Bounding box: ({:.3}, {:.3}) to ({:.3}, {:.3})",
                min.x, min.y, max.x, max.y
            );
        }
    }

    if graph.has_faces() {
        let loops = boundaries(graph);
        match loops.len() {
            0 => println!("Topology: Closed (no boundary)"),
            1 => println!("Topology: Disk ({} boundary vertices)", loops[0].len()),
            n => println!("Topology: {} boundary loops (not embeddable)", n),
        }
    } else {
        println!("Topology: no faces (spring layout only)");
    }

    Ok(())
}

fn cmd_tutte(
    input: &Path,
    output: Option<&Path>,
    faces: bool,
    solver: Solver,
    as_shapes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store(input)?;
    let variant = if faces { TutteVariant::Faces } else { TutteVariant::Vertices };

    let start = Instant::now();
    if !store.compute_tutte(variant, &solver.options())? {
        return Err("graph has no faces; nothing to embed".into());
    }
    log::info!("tutte embedding computed in {:.2?}", start.elapsed());

    match variant {
        TutteVariant::Vertices => write_vertices(&store, output, as_shapes),
        TutteVariant::Faces => write_faces(&store, output, as_shapes),
    }
}

fn cmd_radial(
    input: &Path,
    output: Option<&Path>,
    radius: f64,
    as_shapes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store(input)?;

    if !store.compute_radial(&RadialOptions::default().with_radius(radius))? {
        return Err("graph has no faces; nothing to lay out".into());
    }
    write_faces(&store, output, as_shapes)
}

fn cmd_spring(
    input: &Path,
    output: Option<&Path>,
    ticks: usize,
    options: SpringOptions,
    from_tutte: bool,
    realtime_fps: Option<f64>,
    as_shapes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = load_store(input)?;
    seed_spring(&mut store, from_tutte)?;

    let progress = create_progress();
    let start = Instant::now();

    let store = match realtime_fps {
        None => {
            store.relax(ticks, &options, &progress)?;
            store
        }
        Some(fps) => {
            let shared = Arc::new(Mutex::new(store));
            let runner_options = RunnerOptions::default().with_fps(fps).with_spring(options);
            let mut runner = SpringRunner::new(Arc::clone(&shared), runner_options)?;

            runner.settings().set_active(true);
            runner.sync()?;
            while runner.ticks() < ticks as u64 {
                progress.report(runner.ticks() as usize, ticks, "Relaxing springs");
                std::thread::sleep(Duration::from_millis(10));
            }
            runner.settings().set_active(false);
            runner.sync()?;
            progress.report(ticks, ticks, "Relaxing springs");
            drop(runner);

            Arc::try_unwrap(shared)
                .map_err(|_| "spring store still shared after the runner stopped")?
                .into_inner()
        }
    };
    log::info!("{} spring ticks in {:.2?}", ticks, start.elapsed());

    write_vertices(&store, output, as_shapes)
}

/// Pick the starting coordinates for a spring run.
fn seed_spring(store: &mut EmbeddingStore, from_tutte: bool) -> Result<(), Box<dyn std::error::Error>> {
    if from_tutte {
        if !store.compute_tutte(TutteVariant::Vertices, &HarmonicOptions::default())? {
            return Err("graph has no faces; cannot start from a Tutte embedding".into());
        }
    } else if store.coords().len() != store.graph().num_vertices() {
        log::info!("graph has no coordinates; starting from the unit circle");
        store.seed_on_circle();
    }
    Ok(())
}

/// Write the vertex layout as shapes, coordinates, or an updated graph file.
fn write_vertices(
    store: &EmbeddingStore,
    output: Option<&Path>,
    as_shapes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output.filter(|p| !is_json(p)) {
        let mut graph = store.graph().clone();
        graph.vertices_coords = store.coords().iter().map(|p| vec![p.x, p.y]).collect();
        io::save(&graph, path)?;
        eprintln!("Saved: {}", path.display());
        return Ok(());
    }

    if as_shapes {
        write_json(output, &json!(store.shapes()))
    } else {
        write_json(output, &coordinates_json(&store.embedding()))
    }
}

/// Write the face layout as shapes or coordinates.
fn write_faces(
    store: &EmbeddingStore,
    output: Option<&Path>,
    as_shapes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = store.face_layout().ok_or("no face layout computed")?;

    if as_shapes {
        let mut out: Vec<Shape> = store.face_shapes();
        out.extend(shapes::bounds(&layout.embedding));
        write_json(output, &json!(out))
    } else {
        write_json(output, &coordinates_json(&layout.embedding))
    }
}

fn coordinates_json(embedding: &Embedding) -> serde_json::Value {
    let kind = match embedding.kind() {
        EntityKind::Vertex => "vertices",
        EntityKind::Face => "faces",
    };
    json!({ "kind": kind, "coords": embedding.to_pairs() })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn write_json(output: Option<&Path>, value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("Saved: {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
