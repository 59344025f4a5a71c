mod serve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use area_core::catalog::{Service, WidgetRegistry};
use area_core::graph::Projector;
use area_core::{CatalogIndex, Config, Playground};

#[derive(Parser)]
#[command(name = "area")]
#[command(about = "Playground graph editor bridge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the graph projection of a playground
    Project {
        /// Playground snapshot (JSON)
        #[arg(long)]
        playground: PathBuf,
        /// Service catalog (JSON list of services)
        #[arg(long)]
        catalog: PathBuf,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve editing gestures over HTTP for a rendering layer
    Serve {
        /// Playground snapshot (JSON)
        #[arg(long)]
        playground: PathBuf,
        /// Service catalog (JSON list of services)
        #[arg(long)]
        catalog: PathBuf,
        /// Port to listen on
        #[arg(long, default_value_t = area_core::config::DEFAULT_SERVE_PORT)]
        port: u16,
    },
    /// Show the effective configuration
    Config {
        /// Print the built-in defaults instead
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().wrap_err("failed to load configuration")?;

    match cli.command {
        Commands::Project {
            playground,
            catalog,
            pretty,
        } => {
            let playground: Playground = read_json(&playground)?;
            let services: Vec<Service> = read_json(&catalog)?;

            let catalog = CatalogIndex::new(services);
            let widgets = WidgetRegistry::new(&catalog, &config.widgets);
            let graph = Projector::new(&catalog, &widgets, config.layout, &config.editor.default_icon)
                .project(&playground)?;

            let out = if pretty {
                serde_json::to_string_pretty(&graph)?
            } else {
                serde_json::to_string(&graph)?
            };
            println!("{out}");
        }
        Commands::Serve {
            playground,
            catalog,
            port,
        } => {
            let serve_config = serve::ServeConfig {
                port,
                playground: read_json(&playground)?,
                services: read_json(&catalog)?,
                config,
            };
            serve::start_server(serve_config).await?;
        }
        Commands::Config { default } => {
            if default {
                print!("{}", Config::default_config_string());
            } else {
                print!("{}", config.to_toml());
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("failed to parse {}", path.display()))
}
