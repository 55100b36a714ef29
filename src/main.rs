//! criteria-composer: headless driver for the filter-criteria engine
//!
//! Replays recorded filter-panel sessions, normalizes external drafts and
//! fetches field catalogues.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use criteria_composer::{
    config::{self, EngineConfig, Validatable},
    session::{self, InputFormat, Session},
    DimensionSelections,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "criteria-composer")]
#[command(version)]
#[command(about = "Live filter-criteria composition engine", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Replay a recorded session, one JSON event per line
    criteria-composer replay session.yaml

    # Normalize an owner-supplied draft into criteria
    criteria-composer normalize draft.json

    # Fetch the catalogue for two categories
    criteria-composer catalogue steel paper --url https://filters.example.com")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session file and print every outbound event as a JSON line
    Replay {
        /// Session file (.json, .yaml, .yml)
        session: PathBuf,

        /// Print only the final criteria and summary
        #[arg(long)]
        final_only: bool,
    },

    /// Serialize an owner-supplied draft with every dimension at "All"
    Normalize {
        /// Draft file holding a list of filter groups (.json, .yaml, .yml)
        draft: PathBuf,
    },

    /// Fetch the field catalogue for a category scope
    Catalogue {
        /// Categories of the scope (none = unrestricted)
        categories: Vec<String>,

        /// Catalogue service base URL (overrides config)
        #[arg(long, env = "CRITERIA_COMPOSER_CATALOGUE_URL")]
        url: Option<String>,

        /// Ignore cached responses
        #[arg(long)]
        refresh: bool,
    },

    /// Print the JSON schema of the configuration file
    Schema {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print configuration
    Config {
        /// Print an example listing every option instead of the effective config
        #[arg(long)]
        full: bool,

        /// Print a minimal example
        #[arg(long, conflicts_with = "full")]
        example: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<EngineConfig> {
    let (config, loaded_from) = config::load_or_default(explicit);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", listed.join("\n  "));
    }
    Ok(config)
}

#[cfg(feature = "http-catalogue")]
fn fetch_catalogue(config: &EngineConfig, categories: Vec<String>) -> Result<()> {
    use criteria_composer::catalogue::{CatalogueSource, HttpCatalogueSource};
    use criteria_composer::{CatalogueScope, OptionContext};

    config
        .catalogue
        .base_url
        .as_deref()
        .context_none("no catalogue URL; pass --url or set catalogue.base_url")?;

    let source = HttpCatalogueSource::new(&config.catalogue)?;
    let catalogue = source.fetch(&CatalogueScope::new(categories))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&catalogue).context("failed to serialize catalogue")?
    );
    Ok(())
}

#[cfg(not(feature = "http-catalogue"))]
fn fetch_catalogue(_config: &EngineConfig, _categories: Vec<String>) -> Result<()> {
    anyhow::bail!("catalogue fetching requires the `http-catalogue` feature")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value).context("failed to serialize output")?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Replay {
            session: path,
            final_only,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let recorded = Session::load(&path)?;
            let report = session::replay(&recorded, &config);

            if !final_only {
                for event in report.events() {
                    print_json(event)?;
                }
            }
            for warning in report.warnings() {
                tracing::warn!("{warning}");
            }
            print_json(&serde_json::json!({
                "criteria": report.criteria,
                "summary": report.summary,
            }))?;
            eprintln!("{}", report.summary.summary_line());
            Ok(())
        }

        Commands::Normalize { draft } => {
            let config = load_config(cli.config.as_deref())?;
            let format = InputFormat::from_path(&draft)?;
            let content = std::fs::read_to_string(&draft)
                .with_context(|| format!("failed to read {}", draft.display()))?;
            let groups = session::parse_groups(&content, format)?;
            let selections = DimensionSelections::for_context(&config.context);
            let criteria = criteria_composer::serialize(&groups, &selections, &config.context);
            print_json(&criteria)
        }

        Commands::Catalogue {
            categories,
            url,
            refresh,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            let mut overrides = EngineConfig::builder().bypass_cache(refresh);
            if let Some(url) = url {
                overrides = overrides.catalogue_url(url);
            }
            config.merge(&overrides.build());
            fetch_catalogue(&config, categories)
        }

        Commands::Schema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(())
        }

        Commands::Config { full, example } => {
            if full {
                print!("{}", config::generate_full_example_config());
            } else if example {
                print!("{}", config::generate_example_config());
            } else {
                let (effective, loaded_from) = config::load_or_default(cli.config.as_deref());
                match &loaded_from {
                    Some(path) => eprintln!("# Loaded from: {}", path.display()),
                    None => eprintln!("# No config file found; showing defaults"),
                }
                let yaml = serde_yaml::to_string(&effective).context("failed to serialize config")?;
                print!("{yaml}");
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "criteria-composer", &mut io::stdout());
            Ok(())
        }
    }
}
