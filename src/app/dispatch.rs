use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use dtu_course_bot::bot::CourseBot;
use dtu_course_bot::catalog::{CourseDirectory, parse_courses};
use dtu_course_bot::config::Config;
use dtu_course_bot::pagination::SessionStore;
use dtu_course_bot::transport::discord::{
    CommandScope, DiscordHttpClient, InteractionVerifier, ServerState, build_default_commands,
    register_commands, remove_commands, run_server,
};

use crate::cli::commands::{Cli, Commands};

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { rmcmd, port, host } => {
            let port = port.unwrap_or(config.server.port);
            let host = host.unwrap_or_else(|| config.server.host.clone());
            serve(config, &host, port, rmcmd).await
        }
        Commands::Import { file } => import_courses(&config, &file),
        Commands::Courses { prefix } => list_courses(&config, prefix.as_deref()),
    }
}

/// Register commands, serve until Ctrl+C, then clean up.
async fn serve(config: Config, host: &str, port: u16, rmcmd: bool) -> Result<()> {
    let credentials = config.require_discord()?;
    let verifier = InteractionVerifier::from_hex(&credentials.public_key)?;

    let http = DiscordHttpClient::new(credentials.bot_token.clone());
    let scope = CommandScope {
        application_id: credentials.application_id.clone(),
        guild_id: credentials.guild_id.clone(),
    };

    let store = Arc::new(SessionStore::new(&config.pagination));
    let bot = Arc::new(CourseBot::new(&config, Arc::clone(&store)));

    let registered = match register_commands(&http, &scope, &build_default_commands()).await {
        Ok(registered) => registered,
        Err(e) => {
            store.stop().await;
            return Err(e.context("register slash commands"));
        }
    };

    if port == 0 {
        info!("Starting course bot on {host} (random port)");
    } else {
        info!("Starting course bot on {host}:{port}");
    }
    let state = ServerState {
        verifier: Arc::new(verifier),
        handler: bot,
    };
    let served = run_server(host, port, state, shutdown_signal()).await;

    if rmcmd {
        info!("Removing commands...");
        let removed = remove_commands(&http, &scope, &registered).await;
        info!(removed, total = registered.len(), "slash commands removed");
    }
    store.stop().await;
    info!("Bot stopped");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl+C, serving until killed: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

fn import_courses(config: &Config, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let courses =
        parse_courses(&json).with_context(|| format!("Failed to parse {}", file.display()))?;

    let catalog = CourseDirectory::new(&config.catalog.dir);
    let total = courses.len();
    for mut course in courses {
        if course.fetched_at.is_none() {
            course.fetched_at = Some(Utc::now());
        }
        let path = catalog.save(&course)?;
        println!("Saved {} -> {}", course.label(), path.display());
    }
    println!("Imported {total} course(s) into {}", catalog.root().display());
    Ok(())
}

fn list_courses(config: &Config, prefix: Option<&str>) -> Result<()> {
    let catalog = CourseDirectory::new(&config.catalog.dir);
    let needle = prefix.unwrap_or("").trim().to_uppercase();

    let mut shown = 0;
    for course in catalog.list()? {
        let label = course.label();
        if label.to_uppercase().starts_with(&needle) {
            println!("{label}");
            shown += 1;
        }
    }
    if shown == 0 {
        println!("No courses stored in {}", catalog.root().display());
    }
    Ok(())
}
