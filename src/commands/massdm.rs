use serenity::all::{Context, GuildId, Message};
use tokio::spawn;

use crate::broadcast::broadcast;
use crate::directory::DiscordDirectory;

/// Runs a one-time broadcast in the background so the event handler is free
/// for the next message.
pub fn handle(ctx: Context, msg: &Message, guild_id: GuildId, message: String) {
    let reply_channel = msg.channel_id;
    log::info!("{} requested a mass DM to guild {}", msg.author.name, guild_id);

    spawn(async move {
        let directory = DiscordDirectory::new(ctx);
        if let Err(err) = broadcast(&directory, guild_id, &message, reply_channel).await {
            log::warn!("Mass DM to guild {} aborted: {}", guild_id, err);
        }
    });
}
