use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// `dtu-course-bot` - Discord bot that pages DTU course records.
#[derive(Parser, Debug)]
#[command(name = "dtu-course-bot")]
#[command(author = "Chrisser1")]
#[command(version = "0.1.0")]
#[command(about = "Serve DTU course records to Discord as paged embeds.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.dtu-course-bot/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register slash commands and serve the interactions endpoint
    Serve {
        /// Remove the registered slash commands on shutdown
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        rmcmd: bool,

        /// Port to listen on (overrides config; 0 picks a free port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Copy course records from a JSON file into the catalog
    Import {
        /// File holding one course object or an array of them
        file: PathBuf,
    },

    /// List stored courses
    Courses {
        /// Only show courses whose "<number>, <title>" starts with this
        #[arg(long)]
        prefix: Option<String>,
    },
}
