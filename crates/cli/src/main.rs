#![deny(unsafe_code)]
//! CLI binary for the flowfield visualizer.
//!
//! Subcommands:
//! - `render <field>` — run the simulation N frames, write a PNG of the last
//! - `list` — print available field names

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowfield_core::{FieldKind, SceneConfig};
use flowfield_sim::{RasterSurface, Simulation};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Vector field visualizer CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N frames and write a PNG of the final frame.
    Render {
        /// Field name (e.g. "swirl").
        #[arg(default_value = "swirl")]
        field: String,

        /// Canvas width in canvas units.
        #[arg(short = 'W', long, default_value_t = 1200.0)]
        width: f64,

        /// Canvas height in canvas units.
        #[arg(short = 'H', long, default_value_t = 700.0)]
        height: f64,

        /// Arrow grid rows.
        #[arg(long, default_value_t = 30)]
        rows: usize,

        /// Arrow grid columns.
        #[arg(long, default_value_t = 40)]
        cols: usize,

        /// Tracer particle count.
        #[arg(short, long, default_value_t = 8000)]
        particles: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic scatter.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,
    },
    /// List available field names.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let fields = FieldKind::list_fields();
            if cli.json {
                let info = serde_json::json!({ "fields": fields });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for name in fields {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            field,
            width,
            height,
            rows,
            cols,
            particles,
            frames,
            seed,
            params,
            output,
        } => {
            let field_params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let config = SceneConfig {
                canvas_width: width,
                canvas_height: height,
                grid_rows: rows,
                grid_cols: cols,
                num_particles: particles,
                field: field.clone(),
                field_params,
                seed,
                ..Default::default()
            };

            let mut sim = Simulation::new(config)?;
            let mut surface = RasterSurface::for_config(sim.config())?;

            for _ in 0..frames {
                sim.frame(&mut surface);
            }

            surface.write_png(&output)?;

            if cli.json {
                let info = serde_json::json!({
                    "field": field,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "particles": particles,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {field} ({width}x{height}, {frames} frames, {particles} particles, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
