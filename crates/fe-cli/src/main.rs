//! `fe`: headless FigEdit scene tool.
//!
//! Set `RUST_LOG=debug` to see editor activity.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fe_core::{Color, ShapeKind, Vec2};
use fe_editor::Editor;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "fe", version)]
#[command(about = "Create, inspect, and replay FigEdit scene files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Write one default shape of every kind
    New {
        /// Scene file to create
        out: PathBuf,
    },
    /// Print shape summaries as JSON
    List {
        /// Scene file to read
        scene: PathBuf,
    },
    /// Advance animation a fixed number of ticks and save
    Replay {
        /// Scene file to read
        scene: PathBuf,
        /// Number of ticks
        ticks: u32,
        /// Seconds per tick
        #[arg(value_parser = parse_dt)]
        dt: f32,
        /// Output file (defaults to the input scene)
        out: Option<PathBuf>,
    },
}

fn parse_dt(value: &str) -> Result<f32, String> {
    let dt: f32 = value.parse().map_err(|e| format!("{e}"))?;
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("must be a non-negative number, got {value}"));
    }
    Ok(dt)
}

/// One default shape of every kind, laid out left to right.
fn demo_editor() -> Editor {
    let palette = [
        Color::GREEN,
        Color::BLUE,
        Color::RED,
        Color::CYAN,
        Color::MAGENTA,
        Color::YELLOW,
        Color::WHITE,
        Color::WHITE,
    ];
    let mut editor = Editor::new();
    for (i, (kind, color)) in ShapeKind::ALL.into_iter().zip(palette).enumerate() {
        let position = Vec2::new(100.0 + 150.0 * i as f32, 300.0);
        editor.create_default(kind, position, color);
    }
    editor
}

fn load(scene: &Path) -> anyhow::Result<Editor> {
    let mut editor = Editor::new();
    editor
        .load(scene)
        .with_context(|| format!("loading {}", scene.display()))?;
    Ok(editor)
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::New { out } => {
            let editor = demo_editor();
            editor
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {} shapes to {}", editor.len(), out.display());
        }
        Command::List { scene } => {
            let editor = load(&scene)?;
            println!("{}", serde_json::to_string_pretty(&editor.list())?);
        }
        Command::Replay {
            scene,
            ticks,
            dt,
            out,
        } => {
            let mut editor = load(&scene)?;
            for _ in 0..ticks {
                editor.advance(dt);
            }
            let out = out.unwrap_or(scene);
            editor
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!(
                "advanced {} shapes by {ticks} x {dt}s, saved to {}",
                editor.len(),
                out.display()
            );
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("{:?}", cli.command);
    run(cli.command)
}
