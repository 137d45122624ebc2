use std::sync::Arc;

use serenity::all::{Context, GuildId, Message};

use crate::botdata::campaign_controller;
use crate::directory::DiscordDirectory;
use crate::misc::respond;

pub async fn handle(ctx: Context, msg: &Message, guild_id: GuildId, message: String) {
    let Some(controller) = campaign_controller(&ctx).await else {
        return;
    };

    let directory = Arc::new(DiscordDirectory::new(ctx.clone()));
    let reply = match controller.start(directory, guild_id, message, msg.channel_id).await {
        Ok(()) => "Periodic mass DM started. Sending every 2 minutes.".to_string(),
        Err(err) => {
            if let Some((running_guild, _)) = controller.current().await {
                log::info!("Not starting a mass DM to guild {}, guild {} is already being messaged", guild_id, running_guild);
            }
            err.to_string()
        }
    };

    respond(&ctx, msg.channel_id, &reply).await;
}
