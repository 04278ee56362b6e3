//! Sprout CLI - audition and render the task garden's procedural sounds
//!
//! This binary lists the sound catalog, renders sounds and sequences to WAV,
//! and inspects or edits persisted sound settings.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use sprout_cli::commands;
use sprout_cli::commands::render::{RenderOptions, DEFAULT_SEED};
use sprout_cli::commands::sequence::SequenceKind;
use sprout_engine::config::DEFAULT_SAMPLE_RATE;
use sprout_spec::SoundCategory;

/// Sprout - procedural sound effects for a task garden
#[derive(Parser)]
#[command(name = "sprout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Catalog JSON file (default: built-in garden catalog)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sounds in the catalog
    List {
        /// Only list one category (ui, plant, achievement, music)
        #[arg(long)]
        category: Option<SoundCategory>,

        /// Print the catalog document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one sound to a WAV file
    Render {
        /// Sound id, e.g. ui_click
        id: String,

        /// Output WAV path
        #[arg(short, long)]
        output: String,

        /// RNG seed for textured sounds
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Volume override (default: the definition volume)
        #[arg(long)]
        volume: Option<f64>,
    },

    /// Render every one-shot sound into a directory
    RenderAll {
        /// Output directory
        #[arg(short, long)]
        output: String,

        /// Base RNG seed; each sound derives its own
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },

    /// Render a multi-sound sequence through the offline engine
    Sequence {
        #[command(subcommand)]
        kind: SequenceCommands,

        /// Engine config JSON file
        #[arg(long, global = true)]
        config: Option<String>,

        /// RNG seed (overrides the config seed)
        #[arg(long, global = true)]
        seed: Option<u32>,
    },

    /// Show engine debug info and settings
    Info {
        /// Settings file to read
        #[arg(long)]
        settings: Option<String>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a persisted setting
    Set {
        /// Storage key, e.g. taskgarden_master_volume
        key: String,

        /// New value
        value: String,

        /// Settings file to edit
        #[arg(long)]
        settings: String,
    },

    /// Play one sound through the default output device
    #[cfg(feature = "device")]
    Play {
        /// Sound id, e.g. plant_water
        id: String,

        /// Settings file whose volumes apply
        #[arg(long, default_value = "sprout-settings.json")]
        settings: String,

        /// Engine config JSON file
        #[arg(long)]
        config: Option<String>,
    },
}

#[derive(Subcommand)]
enum SequenceCommands {
    /// Water, grow, XP, and a stage-up flourish from stage 3
    Growth {
        /// Plant stage after growing
        #[arg(long)]
        stage: Option<u32>,

        /// Output WAV path
        #[arg(short, long)]
        output: String,
    },
    /// XP sparkle, plus a streak fanfare above 50 XP
    Xp {
        /// XP amount gained
        #[arg(long)]
        amount: u32,

        /// Output WAV path
        #[arg(short, long)]
        output: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    sprout_cli::logging::init(cli.verbose);

    let result = commands::load_catalog(cli.catalog.as_deref()).and_then(|catalog| {
        match cli.command {
            Commands::List { category, json } => commands::list::run(&catalog, category, json),
            Commands::Render {
                id,
                output,
                seed,
                sample_rate,
                volume,
            } => {
                let options = RenderOptions {
                    seed,
                    sample_rate,
                    volume,
                };
                commands::render::run(&catalog, &id, &output, &options)
            }
            Commands::RenderAll {
                output,
                seed,
                sample_rate,
            } => {
                let options = RenderOptions {
                    seed,
                    sample_rate,
                    volume: None,
                };
                commands::render::run_all(&catalog, &output, &options)
            }
            Commands::Sequence { kind, config, seed } => {
                commands::load_config(config.as_deref()).and_then(|mut config| {
                    config.seed = seed.or(config.seed).or(Some(DEFAULT_SEED));
                    let (kind, output) = match kind {
                        SequenceCommands::Growth { stage, output } => {
                            (SequenceKind::Growth { stage }, output)
                        }
                        SequenceCommands::Xp { amount, output } => {
                            (SequenceKind::Xp { amount }, output)
                        }
                    };
                    commands::sequence::run(catalog, config, kind, &output)
                })
            }
            Commands::Info { settings, json } => {
                commands::info::run(catalog, settings.as_deref(), json)
            }
            Commands::Set {
                key,
                value,
                settings,
            } => commands::set::run(&settings, &key, &value),
            #[cfg(feature = "device")]
            Commands::Play {
                id,
                settings,
                config,
            } => commands::load_config(config.as_deref())
                .and_then(|config| commands::play::run(catalog, config, &id, &settings)),
        }
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
