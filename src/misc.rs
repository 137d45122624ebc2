use serenity::all::{ChannelId, Context};

/// Sends `text` to `channel_id`, logging instead of failing.
pub async fn respond(ctx: &Context, channel_id: ChannelId, text: &str) {
    if let Err(why) = channel_id.say(&ctx.http, text).await {
        log::error!("Error sending message: {why:?}");
    }
}
