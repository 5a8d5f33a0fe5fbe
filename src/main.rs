use std::path::{Path, PathBuf};
use std::{fs, process};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use estate_motion::{
    config::StudioConfig,
    engine::{registry::Composition, Engine},
    preview::Preview,
    renderer::Renderer,
    types::Frame,
};

#[derive(Parser)]
#[command(name = "estate-motion")]
#[command(about = "Frame-driven motion graphics for real-estate listings")]
#[command(version)]
struct Cli {
    /// Studio config (theme and preview keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered compositions
    List,

    /// Print the visual tree of one frame as JSON
    Frame {
        /// Composition id
        id: String,

        /// Frame number
        frame: Frame,

        /// Props JSON file
        #[arg(long)]
        props: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Render a frame range into a manifest file
    Render {
        /// Composition id
        id: String,

        /// Output manifest path
        #[arg(short, long)]
        output: PathBuf,

        /// Props JSON file
        #[arg(long)]
        props: Option<PathBuf>,

        /// First frame (inclusive)
        #[arg(long, default_value = "0")]
        from: Frame,

        /// Last frame (exclusive); defaults to the composition's end
        #[arg(long)]
        to: Option<Frame>,

        /// Worker threads (0 = available parallelism)
        #[arg(long, default_value = "0")]
        jobs: usize,
    },

    /// Scrub through a composition in the terminal
    Preview {
        /// Composition id
        id: String,

        /// Props JSON file
        #[arg(long)]
        props: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = StudioConfig::load(cli.config.as_deref()).context("Failed to load studio config")?;

    match cli.command {
        Commands::List => list(&config),
        Commands::Frame {
            id,
            frame,
            props,
            pretty,
        } => print_frame(&config, &id, frame, props.as_deref(), pretty),
        Commands::Render {
            id,
            output,
            props,
            from,
            to,
            jobs,
        } => render(&config, &id, &output, props.as_deref(), from, to, jobs),
        Commands::Preview { id, props } => {
            let composition = build(&config, &id, props.as_deref())?;
            Preview::new(composition, config.preview).run()
        }
    }
}

fn build(config: &StudioConfig, id: &str, props: Option<&Path>) -> Result<Composition> {
    let props = match props {
        Some(path) => {
            let json =
                fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
            let value = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Some(value)
        }
        None => None,
    };
    Ok(Composition::build(id, props, config.theme.clone())?)
}

fn list(config: &StudioConfig) -> Result<()> {
    for composition in Composition::all(&config.theme)? {
        let c = composition.config();
        println!(
            "{:<26} {:>4}x{:<4} {} fps  {} frames",
            c.id, c.canvas.width, c.canvas.height, c.fps, c.duration_in_frames
        );
    }
    Ok(())
}

fn print_frame(
    config: &StudioConfig,
    id: &str,
    frame: Frame,
    props: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let composition = build(config, id, props)?;
    if !(0..composition.duration()).contains(&frame) {
        return Err(estate_motion::Error::FrameOutOfRange {
            id: id.to_string(),
            frame,
            duration: composition.duration(),
        }
        .into());
    }
    let tree = Engine::evaluate(&composition, frame);
    let json = if pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    println!("{json}");
    Ok(())
}

fn render(
    config: &StudioConfig,
    id: &str,
    output: &Path,
    props: Option<&Path>,
    from: Frame,
    to: Option<Frame>,
    jobs: usize,
) -> Result<()> {
    let composition = build(config, id, props)?;
    let to = to.unwrap_or(composition.duration());
    if from >= to {
        bail!("Empty frame range {from}..{to}");
    }

    let manifest = Renderer::render_parallel(&composition, from..to, jobs);
    let json = serde_json::to_string(&manifest)?;
    fs::write(output, &json).with_context(|| format!("Failed to write {}", output.display()))?;

    let holds = manifest
        .frames
        .iter()
        .filter(|f| matches!(f, estate_motion::types::ManifestFrame::Hold))
        .count();
    info!(
        "Rendered {} frames of {} ({} held) -> {}",
        manifest.frames.len(),
        id,
        holds,
        output.display(),
    );

    Ok(())
}
