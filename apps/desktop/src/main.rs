use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, Input, USAGE};

#[derive(Parser, Debug)]
#[command(name = "dial-client", about = "Terminal client for the dial guessing game")]
struct Args {
    #[arg(long, default_value = "wavelength.toml")]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    username: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(&args.config)?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(username) = args.username {
        settings.username = Some(username);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let (session, views) = client_core::connect(&settings.server_url)
        .await
        .with_context(|| format!("failed to connect to {}", settings.server_url))?;
    info!(server_url = %settings.server_url, "connected");

    let (actions, action_rx) = mpsc::channel(32);
    let session_task = tokio::spawn(session.run(action_rx));

    let printer = tokio::spawn(render::print_views(views, |text| println!("{text}")));

    println!("{USAGE}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line, settings.username.as_deref()) {
            Ok(Input::Actions(batch)) => {
                for action in batch {
                    if actions.send(action).await.is_err() {
                        warn!("session ended; no longer accepting commands");
                        break;
                    }
                }
            }
            Ok(Input::Help) => println!("{USAGE}"),
            Ok(Input::Quit) => break,
            Ok(Input::Empty) => {}
            Err(err) => println!("{err}"),
        }
        if session_task.is_finished() {
            break;
        }
    }

    drop(actions);
    session_task.await.context("session task panicked")??;
    // The view sender is dropped with the session, so the printer drains and ends.
    printer.await.context("view printer panicked")?;
    Ok(())
}
