//! circuit-sketch command line: inspect, validate, normalize, render and replay diagrams

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use circuit_sketch::{
    codec,
    editor::{script, Editor},
    render,
    schematic::{DeviceClass, Element},
    transforms::CSPoint,
    Config, Diagram,
};
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "circuit-sketch")]
#[command(about = "Schematic sketch inspection and editing tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file, instead of the per-user one
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print element counts
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check that a document loads
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Rewrite a document in canonical form
    Normalize {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output path, defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a document to SVG
    Svg {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output path, defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report the element under a canvas point
    Hit {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Apply a script of editor inputs to a document and save it
    Replay {
        /// Document to edit, created if missing
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "error:".red().bold(), msg);
    process::exit(1);
}

fn load_or_fail(path: &Path) -> Diagram {
    codec::load(path).unwrap_or_else(|e| fail(e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(p) => Config::load(p),
        None => Config::discover(),
    }
    .unwrap_or_else(|e| fail(e));

    match cli.command {
        Commands::Info { file } => {
            let dg = load_or_fail(&file);
            let mut counts: BTreeMap<&str, usize> =
                DeviceClass::ALL.iter().map(|c| (c.tag(), 0)).collect();
            for (_, d) in dg.devices() {
                *counts.entry(d.class().tag()).or_default() += 1;
            }
            println!("{}", file.display().to_string().bold());
            for (tag, n) in counts {
                println!("  {tag:<12}{n}");
            }
            println!("  {:<12}{}", "Wire", dg.wire_count());
        }
        Commands::Check { file } => {
            let dg = load_or_fail(&file);
            println!(
                "{} {} ({} components, {} wires)",
                "ok".green().bold(),
                file.display(),
                dg.device_count(),
                dg.wire_count()
            );
        }
        Commands::Normalize { file, output } => {
            let dg = load_or_fail(&file);
            let out = output.unwrap_or(file);
            codec::save(&dg, &out).unwrap_or_else(|e| fail(e));
            println!("{} {}", "wrote".green(), out.display());
        }
        Commands::Svg { file, output } => {
            let dg = load_or_fail(&file);
            match output {
                Some(out) => {
                    render::save_svg(&dg, &config, &out).unwrap_or_else(|e| fail(e));
                    println!("{} {}", "wrote".green(), out.display());
                }
                None => print!("{}", render::render_svg(&dg, &config)),
            }
        }
        Commands::Hit { file, x, y } => {
            let dg = load_or_fail(&file);
            match dg.element_at(CSPoint::new(x, y), config.wire_tolerance) {
                Some(Element::Device(h)) => {
                    if let Some(d) = dg.device(h) {
                        let o = d.origin();
                        println!(
                            "{} at ({}, {}) rotation {}",
                            d.class().to_string().cyan(),
                            o.x,
                            o.y,
                            d.rotation().degrees()
                        );
                    }
                }
                Some(Element::Wire(h)) => {
                    if let Some(w) = dg.wire(h) {
                        let (a, b) = w.pts();
                        println!("{} ({}, {}) - ({}, {})", "Wire".cyan(), a.x, a.y, b.x, b.y);
                    }
                }
                None => println!("{}", "nothing".dimmed()),
            }
        }
        Commands::Replay { file, script: script_path } => {
            let src = std::fs::read_to_string(&script_path)
                .unwrap_or_else(|e| fail(format!("{}: {e}", script_path.display())));
            let inputs = script::parse(&src).unwrap_or_else(|e| fail(e));
            let mut editor = Editor::new(config);
            if file.exists() && !editor.load_from_file(&file) {
                fail(format!("could not load {}", file.display()));
            }
            for input in inputs {
                editor.handle(input);
            }
            if !editor.save_to_file(&file) {
                fail(format!("could not save {}", file.display()));
            }
            println!(
                "{} {} ({}, {} components, {} wires)",
                "wrote".green(),
                file.display(),
                editor.mode_label(),
                editor.diagram().device_count(),
                editor.diagram().wire_count()
            );
        }
    }
}
