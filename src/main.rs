//! CLI entry point for spacetraveling

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version = "0.1.0")]
#[command(about = "A static blog front-end for headless CMS backends", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch content and generate static files
    #[command(alias = "b")]
    Build {
        /// Pre-render every post page instead of only the home page
        #[arg(long)]
        all: bool,
    },

    /// Start a local server with on-demand rendering
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List posts known to the CMS
    List,

    /// Clean the public folder and stamps
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Build { all } => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            tracing::info!("Generating static files...");
            app.build(all).await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;

            // Generate the home page first
            tracing::info!("Generating static files...");
            app.build(false).await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            spacetraveling::server::start(&app, &ip, port).await?;
        }

        Commands::List => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            spacetraveling::commands::list::run(&app).await?;
        }

        Commands::Clean => {
            let app = spacetraveling::Spacetraveling::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
