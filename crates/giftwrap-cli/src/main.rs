//! giftwrap CLI
//!
//! Command-line interface for giftwrap - build a gift page out of blocks.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use giftwrap_core::{BlockStore, Config, Direction};

mod commands;
mod output;

use commands::block::StyleArgs;
use commands::theme::CustomThemeArgs;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "giftwrap")]
#[command(about = "giftwrap - Build personalized gift pages from blocks")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug output to stderr (or the configured log file)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the block library
    Blocks,
    /// Add a block with default content
    Add {
        /// Block type (see `giftwrap blocks`)
        #[arg(value_name = "TYPE")]
        kind: String,
    },
    /// List blocks in order
    #[command(alias = "ls")]
    List,
    /// Show a block's content and style
    Show {
        /// Block ID (full or prefix)
        id: String,
    },
    /// Replace a block's content
    Edit {
        /// Block ID (full or prefix)
        id: String,
        /// Whole content record as JSON
        content: Option<String>,
        /// Set one content field (key=value, repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Change a block's style
    Style {
        /// Block ID (full or prefix)
        id: String,
        /// transparent, white, primary or dark
        #[arg(long)]
        background: Option<String>,
        /// left, center or right
        #[arg(long)]
        align: Option<String>,
        /// compact, normal or spacious
        #[arg(long)]
        padding: Option<String>,
        /// full or half
        #[arg(long)]
        width: Option<String>,
    },
    /// Move a block one place
    Move {
        /// Block ID (full or prefix)
        id: String,
        #[arg(value_enum)]
        direction: MoveDirection,
    },
    /// Duplicate a block in place
    #[command(alias = "dup")]
    Duplicate {
        /// Block ID (full or prefix)
        id: String,
    },
    /// Delete a block
    #[command(alias = "rm")]
    Remove {
        /// Block ID (full or prefix)
        id: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove every block
    Clear {
        #[arg(short, long)]
        yes: bool,
    },
    /// Toggle blocks in or out of the selection (no IDs: show it)
    Select {
        /// Block IDs (full or prefix)
        ids: Vec<String>,
        /// Select everything, or nothing if everything is selected
        #[arg(long, conflicts_with_all = ["ids", "clear"])]
        all: bool,
        /// Clear the selection
        #[arg(long, conflicts_with = "ids")]
        clear: bool,
    },
    /// Act on the selected blocks
    Bulk {
        #[command(subcommand)]
        command: BulkCommands,
    },
    /// Choose or edit the theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Export the document to a file (`-` for stdout)
    Export {
        /// Destination (default: gift-config.json)
        path: Option<PathBuf>,
    },
    /// Replace the document with an exported file (`-` for stdin)
    Import {
        path: PathBuf,
        #[arg(short, long)]
        yes: bool,
    },
    /// Render the document as text
    Preview {
        /// Show block headers and hidden content
        #[arg(short, long)]
        edit: bool,
    },
    /// Fill a block with AI-written content
    #[command(alias = "ai")]
    Generate {
        /// Block ID (full or prefix)
        id: String,
        /// Keywords or topic
        #[arg(short, long)]
        input: Option<String>,
        /// Tone of a note: fun, sweet or poetic
        #[arg(short, long)]
        tone: Option<String>,
    },
    /// Discard the document and start a blank one
    #[command(alias = "new")]
    Reset {
        #[arg(short, long)]
        yes: bool,
    },
    /// Show status (document, theme, storage)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum BulkCommands {
    /// Duplicate the selection after its last block
    #[command(alias = "dup")]
    Duplicate,
    /// Delete the selection
    #[command(alias = "rm")]
    Delete {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// List themes
    #[command(alias = "ls")]
    List,
    /// Show the active theme
    Show,
    /// Activate a preset or `custom`
    Set { key: String },
    /// Edit the custom theme (no options: show it)
    Custom {
        #[arg(long)]
        name: Option<String>,
        /// Primary colour; the secondary follows it
        #[arg(long)]
        primary: Option<String>,
        /// Page background colour or gradient
        #[arg(long)]
        background: Option<String>,
        #[arg(long)]
        text: Option<String>,
        /// font-sans, font-serif, font-mono or font-handwriting
        #[arg(long)]
        font: Option<String>,
        /// Space separated glyphs
        #[arg(long)]
        particles: Option<String>,
        /// Also switch to the custom theme
        #[arg(long = "use")]
        activate: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, ai_api_key, ai_model, ...)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(d: MoveDirection) -> Self {
        match d {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work even when the config can't be used to open a store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(config_path, &output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, config_path, &output)
            }
        };
    }

    // The block library doesn't touch the document
    if let Commands::Blocks = &cli.command {
        return commands::block::library(&output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config, cli.verbose);

    let mut store = BlockStore::open_with_config(&config)?;
    debug!("Opened document {}", store.document().document_id);
    commands::report_load_warning(&mut store, &config, &output);

    run(cli.command, &mut store, &config, &output).await
}

async fn run(
    command: Commands,
    store: &mut BlockStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        Commands::Blocks | Commands::Config { .. } => unreachable!(), // Handled in main
        Commands::Add { kind } => commands::block::add(store, kind, output),
        Commands::List => commands::block::list(store, output),
        Commands::Show { id } => commands::block::show(store, id, output),
        Commands::Edit {
            id,
            content,
            fields,
        } => commands::block::edit(store, id, content, fields, output),
        Commands::Style {
            id,
            background,
            align,
            padding,
            width,
        } => {
            let args = StyleArgs {
                background,
                align,
                padding,
                width,
            };
            commands::block::style(store, id, args, output)
        }
        Commands::Move { id, direction } => {
            commands::block::move_block(store, id, direction.into(), output)
        }
        Commands::Duplicate { id } => commands::block::duplicate(store, id, output),
        Commands::Remove { id, yes } => commands::block::remove(store, id, yes, output),
        Commands::Clear { yes } => commands::block::clear(store, yes, output),
        Commands::Select { ids, all, clear } => {
            if all {
                commands::selection::select_all(store, output)
            } else if clear {
                commands::selection::clear(store, output)
            } else if ids.is_empty() {
                commands::selection::show(store, output)
            } else {
                commands::selection::toggle(store, ids, output)
            }
        }
        Commands::Bulk { command } => match command {
            BulkCommands::Duplicate => commands::selection::bulk_duplicate(store, output),
            BulkCommands::Delete { yes } => commands::selection::bulk_delete(store, yes, output),
        },
        Commands::Theme { command } => handle_theme_command(command, store, output),
        Commands::Export { path } => commands::transfer::export(store, path, output),
        Commands::Import { path, yes } => commands::transfer::import(store, path, yes, output),
        Commands::Preview { edit } => commands::document::preview(store, edit, output),
        Commands::Generate { id, input, tone } => {
            commands::generate::generate(store, config, id, input, tone, output).await
        }
        Commands::Reset { yes } => commands::document::reset(store, yes, output),
        Commands::Status => commands::document::status(store, config, output),
    }
}

fn handle_theme_command(
    command: Option<ThemeCommands>,
    store: &mut BlockStore,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ThemeCommands::Show) | None => commands::theme::show(store, output),
        Some(ThemeCommands::List) => commands::theme::list(store, output),
        Some(ThemeCommands::Set { key }) => commands::theme::set(store, key, output),
        Some(ThemeCommands::Custom {
            name,
            primary,
            background,
            text,
            font,
            particles,
            activate,
        }) => {
            let args = CustomThemeArgs {
                name,
                primary,
                background,
                text,
                font,
                particles,
                activate,
            };
            commands::theme::custom(store, args, output)
        }
    }
}

/// Initialize logging when GIFTWRAP_LOG is set or `--verbose` is given
///
/// Logs go to the configured log file, or stderr when none is set.
fn init_logging(config: &Config, verbose: bool) {
    let log_level = match std::env::var("GIFTWRAP_LOG") {
        Ok(level) if !level.is_empty() => level,
        _ if verbose => "debug".to_string(),
        _ => return,
    };

    let env_filter = EnvFilter::new(format!(
        "giftwrap_core={},giftwrap_cli={}",
        log_level, log_level
    ));

    // Ignore the error if a subscriber is already installed
    match config.log_file {
        Some(ref path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", path, e);
                    return;
                }
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(log_file)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    debug!("Logging initialized at level {}", log_level);
}
