use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use termframe::{Engine, EngineConfig, FontSource, GridSize};

use crate::input::read_frame;
mod input;

#[derive(Parser)]
#[command(name = "termframe", about = "Render ANSI terminal frames to PNG")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Args)]
struct SizeArgs {
    #[arg(long, default_value_t = GridSize::default().cols)]
    cols: usize,
    #[arg(long, default_value_t = GridSize::default().rows)]
    rows: usize,
    /// Font size in pixels per em
    #[arg(long, default_value_t = GridSize::default().font_size)]
    font_size: f32,
}

impl SizeArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig::new(self.cols, self.rows).font_size(self.font_size)
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Render a frame to a PNG file
    Render {
        /// ANSI input file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
        #[arg(long)]
        regular_font: Option<PathBuf>,
        #[arg(long)]
        bold_font: Option<PathBuf>,
    },
    /// Print the plain-text grid a frame parses to
    Grid {
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
        #[arg(long, default_value_t = GridSize::default().cols)]
        cols: usize,
        #[arg(long, default_value_t = GridSize::default().rows)]
        rows: usize,
    },
    /// Show cell metrics and image size
    Metrics {
        #[command(flatten)]
        size: SizeArgs,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Cmd::Render {
            input,
            output,
            size,
            regular_font,
            bold_font,
        } => {
            let mut config = size.config();
            if let Some(path) = regular_font {
                config = config.regular_font(FontSource::Path(path));
            }
            if let Some(path) = bold_font {
                config = config.bold_font(FontSource::Path(path));
            }
            let engine = Engine::new(config).context("loading fonts")?;
            let frame = read_frame(&input)?;
            engine
                .render_to_file(&frame, &output)
                .with_context(|| format!("rendering to {}", output.display()))?;
            let (width, height) = engine.image_size(engine.cols(), engine.rows());
            info!("wrote {}x{} px to {}", width, height, output.display());
        }
        Cmd::Grid { input, cols, rows } => {
            let frame = read_frame(&input)?;
            println!("{}", termframe::parse(&frame, cols, rows).to_text());
        }
        Cmd::Metrics { size } => {
            let engine = Engine::new(size.config()).context("loading fonts")?;
            let m = engine.metrics();
            let (width, height) = engine.image_size(engine.cols(), engine.rows());
            println!("Font size: {}px", engine.font_size());
            println!("  Cell: {}x{}", m.cell_width, m.cell_height);
            println!("  Baseline: {}", engine.faces().regular.baseline());
            println!("  Grid: {}x{}", engine.cols(), engine.rows());
            println!("  Image: {width}x{height}");
        }
    }
    Ok(())
}
