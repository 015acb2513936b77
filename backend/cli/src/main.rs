mod api;
mod config_cmd;
mod convert_cmd;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use mdplain_config::{config_dir, config_file_path, load_and_prepare, MdplainConfig};
use mdplain_markdown::Converter;

use api::AppState;
use convert_cmd::{ConvertArgs, PrintArgs};

#[derive(Parser)]
#[command(name = "mdplain")]
#[command(about = "mdplain — Markdown to plain text converter")]
#[command(version)]
struct Cli {
    /// Config file (default: $MDPLAIN_CONFIG_DIR/config.yaml or ~/.mdplain/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Markdown file (or stdin) to plain text
    Convert {
        /// Input .md/.markdown/.txt file; stdin when omitted or `-`
        input: Option<PathBuf>,
        /// Output file (default: <outputDir>/converted-text.txt)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Write the converted text to stdout instead of a file
        #[arg(long)]
        stdout: bool,
        /// Print per-rule statistics as JSON to stderr
        #[arg(long)]
        report: bool,
    },
    /// Convert and render a printable HTML document (print or save as PDF)
    Print {
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Document title
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the sample Markdown document
    Sample {
        /// Print the converted sample instead
        #[arg(long)]
        convert: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(long)]
        bind: Option<String>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Show the effective config
    Show,
    /// Validate the effective config
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let (config, report) = load_and_prepare(&config_path).await?;

    // Initialize structured logging
    mdplain_logging::init_logger(config.log_level(), config.log_dir().map(Path::new));
    report.log();

    match cli.command {
        Commands::Convert {
            input,
            output,
            stdout,
            report,
        } => {
            convert_cmd::convert(
                &config,
                ConvertArgs {
                    input,
                    output,
                    stdout,
                    report,
                },
            )
            .await?;
        }
        Commands::Print {
            input,
            output,
            title,
        } => {
            convert_cmd::print(
                &config,
                PrintArgs {
                    input,
                    output,
                    title,
                },
            )
            .await?;
        }
        Commands::Sample { convert } => convert_cmd::sample(convert),
        Commands::Serve { port, bind } => {
            run_server(&config, port, bind).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => config_cmd::init(&config_path, force).await?,
            ConfigAction::Show => config_cmd::show(&config)?,
            ConfigAction::Validate => config_cmd::check(&config)?,
        },
    }

    Ok(())
}

async fn run_server(config: &MdplainConfig, port: Option<u16>, bind: Option<String>) -> Result<()> {
    let port = port.unwrap_or(config.port());
    let bind = bind.unwrap_or_else(|| config.bind().to_string());

    let app_state = Arc::new(AppState {
        converter: Converter::new(),
        print_title: config.print_title().to_string(),
        text_file_name: config.text_file_name().to_string(),
    });
    let app = api::build_router(app_state, config.max_body_bytes());

    let addr = format!("{bind}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
