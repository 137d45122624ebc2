use serenity::all::{Context, Message};

use crate::misc::respond;

pub async fn handle(ctx: &Context, msg: &Message) {
    respond(ctx, msg.channel_id, "Pong!").await;
}
