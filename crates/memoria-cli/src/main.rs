use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;

use memoria_cli::input::{parse_role, parse_story, parse_trait};
use memoria_core::models::training::{Memory, PersonalityTrait};
use memoria_core::models::viewer::ViewerRole;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "memoria", about = "Voice memorials from the terminal", version)]
pub struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Local session whose transcripts are used.
    #[arg(long, default_value = "default", global = true)]
    pub session: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags that take precedence over the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// API root, e.g. https://example.org/api. Overrides the config file.
    #[arg(long, env = "MEMORIA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Signed-in user id. Overrides the config file.
    #[arg(long = "user", env = "MEMORIA_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Bearer token. Overrides the config file.
    #[arg(long, env = "MEMORIA_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the config file from the global flags, or show it.
    Configure {
        #[arg(long, value_parser = parse_role)]
        role: Option<ViewerRole>,
        /// Request timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,
        #[arg(long)]
        show: bool,
    },
    /// List your memorials and the tributes that could get one.
    Memorials,
    /// Voice status, setup progress and access for one memorial.
    Status { tribute: String },
    /// Upload a voice sample.
    Upload {
        tribute: String,
        file: PathBuf,
        /// Length of the recording in seconds.
        #[arg(long)]
        duration: f64,
        #[arg(long)]
        content_type: Option<String>,
        /// Delete a pending sample first.
        #[arg(long)]
        replace: bool,
    },
    /// Save stories and personality traits.
    Train {
        tribute: String,
        /// TITLE=TEXT or TITLE@YEAR=TEXT
        #[arg(long = "story", value_parser = parse_story)]
        stories: Vec<Memory>,
        /// NAME=DESCRIPTION
        #[arg(long = "trait", value_parser = parse_trait)]
        traits: Vec<PersonalityTrait>,
    },
    /// Talk with a memorial. Without MESSAGE, starts an interactive session.
    Chat {
        tribute: String,
        message: Option<String>,
        /// Owner of the memorial, when it is not one of yours.
        #[arg(long)]
        owner: Option<String>,
    },
    /// Delete the stored transcript for a memorial.
    Clear { tribute: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json);

    commands::run(cli).await
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
