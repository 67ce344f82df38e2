mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Build-time tooling for a personal portfolio and blog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new site directory
    Init {
        /// Path to site directory (created if missing)
        path: PathBuf,

        /// Author and site name
        #[arg(long)]
        name: Option<String>,

        /// Site URL, e.g. https://example.com
        #[arg(long)]
        url: Option<String>,

        /// Author email
        #[arg(long)]
        email: Option<String>,
    },

    /// Validate site configuration and content
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Print the Open Graph image routes as JSON
    Routes {
        /// Path to site directory
        path: PathBuf,
    },

    /// Render Open Graph images for every page, post and project
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated images
        #[arg(short, long)]
        output: PathBuf,

        /// Write SVG cards instead of rasterized PNGs
        #[arg(long)]
        svg: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            path,
            name,
            url,
            email,
        } => commands::init::run(path, name, url, email).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Routes { path } => commands::routes::run(path).await,
        Command::Build { path, output, svg } => commands::build::run(path, output, svg).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "folio", &mut io::stdout());
            Ok(())
        }
    }
}
