use serenity::all::Ready;
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::*;

use crate::commands::{self, Command};

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        match Command::parse(&msg.content) {
            Ok(Some(command)) => commands::handle_command(ctx, &msg, command).await,
            Ok(None) => {}
            Err(usage) => commands::handle_usage(&ctx, &msg, usage).await,
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        log::info!("Logged in as {}", ready.user.name);
    }
}
