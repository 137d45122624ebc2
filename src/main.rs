mod botdata;
mod broadcast;
mod campaign;
mod commands;
mod config;
mod directory;
mod errors;
mod events;
mod liveness;
mod misc;
#[cfg(test)]
mod test_utils;

use std::env;

use anyhow::{Context, Result};
use botdata::{BotData, BotDataKey};
use config::Config;
use events::Handler;
use serenity::prelude::*;
use tokio::signal::unix::{signal, SignalKind};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry RUST_LOG as well, so load it first
    dotenvy::dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let intents =
        GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    log::info!("Mass DM bot initializing");
    let mut client = Client::builder(&config.token, intents)
        .event_handler(Handler)
        .await
        .context("Error creating Discord client")?;
    client.data.write().await.insert::<BotDataKey>(BotData::default());

    // Shut down on ctrl+C or SIGTERM
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(err) = wait_for_shutdown().await {
            log::error!("Unable to listen for shutdown signals: {err}");
            return;
        }
        log::info!("Shutting down, goodbye");
        shard_manager.shutdown_all().await;
    });

    log::info!("Bot is now running. Press CTRL-C to exit.");
    tokio::select! {
        result = client.start() => result.context("Error opening connection")?,
        result = liveness::serve(config.port) => result?,
    }

    Ok(())
}

async fn wait_for_shutdown() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {},
        _ = sigterm.recv() => {},
    }

    Ok(())
}
