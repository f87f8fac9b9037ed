// src/bin/slotframe-debug.rs
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slotframe::report::{detailed_output, json_output, tree_output};
use slotframe::viewer::EyeViewer;
use slotframe_render::{RecordingRenderer, Renderer};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Tree,
    Detailed,
    Json,
}

#[derive(Parser)]
#[command(name = "slotframe-debug")]
#[command(about = "Builds the eye viewer scene, feeds it pointer input and prints the resulting layout")]
struct Args {
    /// Viewport width of the recording backend
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Viewport height of the recording backend
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,

    /// Pointer position for the frame, as X,Y
    #[arg(long, value_parser = parse_point)]
    hover: Option<Vec2>,

    /// Press the pointer at X,Y. Repeat for several frames.
    #[arg(long, value_parser = parse_point)]
    click: Vec<Vec2>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    output: Option<String>,

    /// Also list the draw commands of the last frame
    #[arg(long)]
    show_commands: bool,

    /// Log at DEBUG level; RUST_LOG directives are added on top
    #[arg(short, long)]
    debug: bool,
}

fn parse_point(value: &str) -> std::result::Result<Vec2, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad X '{}': {}", x, e))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad Y '{}': {}", y, e))?;
    Ok(Vec2::new(x, y))
}

/// `RUST_LOG` directives on top of a base level picked by `--debug`.
fn log_filter(debug: bool) -> EnvFilter {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    EnvFilter::from_default_env().add_directive(level.into())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.debug))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let backend = RecordingRenderer::initialize(Vec2::new(args.width, args.height))
        .context("Failed to create recording backend")?;
    let mut viewer = EyeViewer::new(backend).context("Failed to build viewer scene")?;

    let cursor = args.hover.unwrap_or(Vec2::splat(-1.0));
    let mut commands = viewer.frame(cursor, false)?;
    for position in &args.click {
        commands = viewer.frame(*position, true)?;
        info!("Click at {:?}: eye {}", position, viewer.eye_index());
        if viewer.quit_requested() {
            info!("Quit requested");
            break;
        }
    }
    info!(
        "Rendered {} frames, {} commands in the last one",
        viewer.interface().frame_count(),
        commands
    );

    let interface = viewer.interface();
    let root = interface.root();
    let mut output_text = match args.format {
        Format::Tree => tree_output(interface.tree(), root),
        Format::Detailed => detailed_output(interface.tree(), root),
        Format::Json => json_output(interface.tree(), root),
    }?;

    if args.show_commands {
        if let Some(frame) = interface.renderer().backend().last_frame() {
            output_text.push_str(&format!("\nDraw commands ({}):\n", frame.len()));
            for command in frame {
                output_text.push_str(&format!("  {:?}\n", command));
            }
        }
    }

    if let Some(output_file) = args.output {
        fs::write(&output_file, output_text)
            .with_context(|| format!("Failed to write to file: {}", output_file))?;
        println!("Output written to: {}", output_file);
    } else {
        print!("{}", output_text);
    }

    Ok(())
}
