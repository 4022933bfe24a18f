//! Waypost CLI
//!
//! Redirect resolver and content server for documentation sites.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use waypost::cmd::serve::ServeOverrides;

/// Command-line interface for Waypost.
#[derive(Parser)]
#[command(
    name = "waypost",
    version,
    about = "Redirect resolver and content server for documentation sites"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "waypost.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Serve redirects and the pre-rendered site
    Serve {
        /// Port to listen on (overrides serve.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Interface to bind (overrides serve.host)
        #[arg(long)]
        host: Option<String>,
        /// Directory of pre-rendered pages (overrides serve.root)
        #[arg(long)]
        root: Option<std::path::PathBuf>,
    },
    /// Print where a route redirects to
    Resolve {
        /// Route to resolve (e.g., /docs/tutorials/nextjs)
        route: String,
    },
    /// List redirect rules and published documents
    Routes,
    /// Validate configuration, redirects and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    waypost::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port, host, root } => {
            let overrides = ServeOverrides {
                host: host.as_deref(),
                port,
                root: root.as_deref(),
            };
            waypost::cmd::serve::run(&cli.config, overrides).await?;
        }
        Commands::Resolve { route } => {
            waypost::cmd::resolve::run(&cli.config, &route)?;
        }
        Commands::Routes => {
            waypost::cmd::routes::run(&cli.config)?;
        }
        Commands::Check { strict } => {
            waypost::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
