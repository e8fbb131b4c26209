use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

mod data;
mod mapper;
mod models;
mod report;
mod scale;
mod stats;

use mapper::MapperConfig;
use models::{DailyRecord, Event, Thresholds, TrackEvents};
use scale::{ScaleDefinition, ScaleError, ScaleKind, ScaleWalker};

#[derive(Parser)]
#[command(name = "weather-melody")]
#[command(about = "Turn daily weather observations into melody, storm and snow tracks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScaleArgs {
    /// Root pitch the melody starts from; every emitted pitch stays in 0..=127
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(i32).range(24..=91))]
    root: i32,
    /// Scale name or code (major/0, minor/1)
    #[arg(long, default_value = "major")]
    scale: ScaleKind,
    /// Custom semitone steps, overrides --scale
    #[arg(long, value_delimiter = ',')]
    steps: Vec<u8>,
}

impl ScaleArgs {
    fn definition(&self) -> Result<ScaleDefinition, ScaleError> {
        if self.steps.is_empty() {
            ScaleDefinition::from_kind(self.scale)
        } else {
            ScaleDefinition::new(self.steps.clone())
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storm and snow thresholds for a series
    Thresholds {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Map a series to events and write them as JSON
    Map {
        #[arg(long)]
        csv: PathBuf,
        #[command(flatten)]
        scale: ScaleArgs,
        /// Stop after this many days
        #[arg(long)]
        max_days: Option<usize>,
        #[arg(long, default_value = "events.json")]
        out: PathBuf,
    },
    /// Generate a markdown report of a mapping run
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[command(flatten)]
        scale: ScaleArgs,
        #[arg(long)]
        max_days: Option<usize>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Walk the scale up and then down, printing each note
    Walk {
        #[command(flatten)]
        scale: ScaleArgs,
        #[arg(long, default_value_t = 10)]
        up: usize,
        #[arg(long, default_value_t = 20)]
        down: usize,
    },
}

fn map_csv(
    csv: &Path,
    scale: &ScaleArgs,
    max_days: Option<usize>,
) -> anyhow::Result<(Vec<DailyRecord>, Thresholds, Vec<Event>)> {
    let definition = scale.definition()?;
    let mut records = data::load_records(csv)?;
    let thresholds = Thresholds::from_records(&records);
    info!(
        "Thresholds: storm {:.3}, snow {:.3}",
        thresholds.storm, thresholds.snow
    );

    let config = MapperConfig {
        root_note: scale.root,
        max_days,
        ..MapperConfig::default()
    };
    let events = mapper::map_weather(&records, &definition, &config, &thresholds)?;
    if let Some(limit) = max_days {
        records.truncate(limit);
    }
    info!("Mapped {} days to {} events", records.len(), events.len());
    Ok((records, thresholds, events))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Thresholds { csv } => {
            let records = data::load_records(&csv)?;
            let thresholds = Thresholds::from_records(&records);
            println!("Storm precipitation threshold: {:.4}", thresholds.storm);
            println!("Snowfall threshold: {:.4}", thresholds.snow);
        }
        Commands::Map {
            csv,
            scale,
            max_days,
            out,
        } => {
            let (_, _, events) = map_csv(&csv, &scale, max_days)?;
            let tracks = TrackEvents::partition(&events);
            let json = serde_json::to_string_pretty(&tracks)?;
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Wrote {} melody, {} storm and {} snow events to {}.",
                tracks.melody.len(),
                tracks.storm.len(),
                tracks.snow.len(),
                out.display()
            );
        }
        Commands::Report {
            csv,
            scale,
            max_days,
            out,
        } => {
            let (records, thresholds, events) = map_csv(&csv, &scale, max_days)?;
            let report = report::build_report(
                &csv.display().to_string(),
                scale.root,
                &records,
                &thresholds,
                &events,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Walk { scale, up, down } => {
            let mut walker = ScaleWalker::new(scale.root, scale.definition()?);
            info!(
                "Walking {:?} ({} semitones per cycle) from {}",
                walker.scale().steps(),
                walker.scale().octave_span(),
                walker.root_note()
            );
            for _ in 0..up {
                let note = walker.step_up();
                println!("{}\tstep {}", note, walker.step_index());
            }
            for _ in 0..down {
                let note = walker.step_down();
                println!("{}\tstep {}", note, walker.step_index());
            }
        }
    }

    Ok(())
}
