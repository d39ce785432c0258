//! CLI entry point for prospectus

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prospectus")]
#[command(version)]
#[command(about = "A static site generator for consulting studio marketing sites", long_about = None)]
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
    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Generate and serve the site locally
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List site content
    List {
        /// Type of content to list (team, work, insights, slugs)
        #[arg(default_value = "work")]
        r#type: String,
    },

    /// Scaffold a new content file
    New {
        /// Content kind (team, work, insights)
        kind: String,

        /// Title of the new item
        title: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "prospectus=debug,info"
    } else {
        "prospectus=info"
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
        Commands::Generate => {
            let site = prospectus::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip } => {
            let site = prospectus::Site::new(&base_dir)?;

            // Generate first so there is something to serve
            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            prospectus::server::start(&site, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = prospectus::Site::new(&base_dir)?;
            prospectus::commands::list::run(&site, &r#type)?;
        }

        Commands::New { kind, title } => {
            let site = prospectus::Site::new(&base_dir)?;
            prospectus::commands::new::run(&site, &kind, &title)?;
        }

        Commands::Clean => {
            let site = prospectus::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("prospectus version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
