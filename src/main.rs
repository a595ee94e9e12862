mod api;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod events;
mod export;
mod logging;
mod models;
mod outcome;
mod plot;
mod session;
mod summary;
mod ui;
mod workers;

use crate::api::ApiClient;
use crate::config::{Config, get_config_path};
use crate::environment::{Environment, resolve_environment};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        /// Base URL of the expression API, or `local`.
        #[arg(long, value_name = "URL", env = "PROTEO_DASH_API")]
        api_url: Option<String>,

        /// Run without the terminal UI and print the settled panels.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Gene to select once the volcano plot has loaded. Repeatable; headless only.
        #[arg(long = "select", value_name = "GENE")]
        select: Vec<String>,

        /// Paint a dark background behind the dashboard.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Write the volcano plot (and a gene's panels) as Plotly JSON files.
    Export {
        /// Output directory. Created if missing.
        #[arg(long, value_name = "DIR")]
        out: PathBuf,

        /// Base URL of the expression API, or `local`.
        #[arg(long, value_name = "URL", env = "PROTEO_DASH_API")]
        api_url: Option<String>,

        /// Gene whose boxplot and publications are exported as well.
        #[arg(long = "select", value_name = "GENE")]
        select: Option<String>,
    },
    /// Save the API URL in the config file.
    SetApiUrl {
        /// Base URL of the expression API, or `local`.
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Delete the config file.
    ClearConfig,
}

/// Config file contents, if there is a readable one.
fn load_config(config_path: &Path) -> Option<Config> {
    if !config_path.exists() {
        return None;
    }
    match Config::load_from_file(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            print_cmd_warn!(
                "Ignoring config file",
                "{}: {}",
                config_path.display(),
                e
            );
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = get_config_path()?;
    let args = Args::parse();
    match args.command {
        Command::Start {
            api_url,
            headless,
            select,
            with_background,
        } => {
            let config = load_config(&config_path);
            let environment = resolve_environment(api_url.as_deref(), config.as_ref())?;
            let session = setup_session(environment, config.as_ref())?;
            if headless {
                run_headless_mode(session, select).await
            } else {
                if !select.is_empty() {
                    print_cmd_warn!("Ignoring --select", "selection flags are only used with --headless");
                }
                run_tui_mode(session, with_background).await
            }
        }
        Command::Export {
            out,
            api_url,
            select,
        } => {
            logging::init_console_logger();
            let config = load_config(&config_path);
            let environment = resolve_environment(api_url.as_deref(), config.as_ref())?;
            let client = ApiClient::from_config(environment, config.as_ref())?;
            let written = export::export_figures(&client, &out, select.as_deref())
                .await
                .map_err(|e| {
                    print_cmd_error!("Export failed", &e.to_string());
                    e
                })?;
            for path in written {
                print_cmd_success!("Wrote", "{}", path.display());
            }
            Ok(())
        }
        Command::SetApiUrl { url } => {
            let environment: Environment = url.parse()?;
            let config = match load_config(&config_path) {
                Some(existing) => Config {
                    api_url: environment.api_url(),
                    ..existing
                },
                None => Config::new(environment.api_url()),
            };
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!(
                "API URL saved",
                "{} -> {}",
                config.api_url,
                config_path.display()
            );
            Ok(())
        }
        Command::ClearConfig => {
            print_cmd_info!("Clearing configuration", "{}", config_path.display());
            Config::clear(&config_path).map_err(Into::into)
        }
    }
}
