//! cors-gate
//!
//! Serves a demo endpoint behind the origin policy, or checks a single
//! origin against a config file offline.
//!
//! ```text
//!     Client Request (Origin: https://app.example.com)
//!         → TraceLayer / TimeoutLayer
//!         → cors_middleware ── Policy::authorize ── 403 on reject
//!         → GET /test handler
//!         → Access-Control-Allow-Origin + Vary: Origin
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use cors_gate::config::load_config;
use cors_gate::observability::init_logging;
use cors_gate::HttpServer;

#[derive(Parser)]
#[command(name = "cors-gate")]
#[command(about = "Origin authorization for cross-origin HTTP requests", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "cors-gate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo server behind the origin policy
    Serve,
    /// Evaluate one Origin value and print the decision as JSON
    Check {
        /// Raw Origin header value, e.g. https://app.example.com
        origin: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            init_logging(&config.observability.log_level);
            tracing::info!(config = %cli.config.display(), "cors-gate v0.1.0 starting");

            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            let server = HttpServer::new(config)?;
            server.run(listener).await?;

            tracing::info!("Shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { origin } => {
            let policy = config.cors.to_policy()?;
            let decision = policy.authorize(Some(&origin));
            println!("{}", serde_json::to_string_pretty(&decision)?);

            Ok(if decision.is_allowed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
