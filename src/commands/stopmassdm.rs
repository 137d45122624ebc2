use serenity::all::{Context, Message};

use crate::botdata::campaign_controller;
use crate::misc::respond;

pub async fn handle(ctx: &Context, msg: &Message) {
    let Some(controller) = campaign_controller(ctx).await else {
        return;
    };

    let reply = match controller.stop().await {
        Ok(()) => "Periodic mass DM stopped.".to_string(),
        Err(err) => err.to_string(),
    };

    respond(ctx, msg.channel_id, &reply).await;
}
