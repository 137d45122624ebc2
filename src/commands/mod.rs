mod massdm;
mod ping;
mod startmassdm;
mod stopmassdm;

use serenity::all::{Context, GuildId, Message};

use crate::botdata::campaign_controller;
use crate::errors::{CampaignError, UsageError};
use crate::misc::respond;

/// A recognised chat command with its arguments already validated.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Ping,
    MassDm { guild_id: GuildId, message: String },
    StartMassDm { guild_id: GuildId, message: String },
    StopMassDm,
}

impl Command {
    /// `Ok(None)` means the message is not addressed to the bot.
    pub fn parse(content: &str) -> Result<Option<Command>, UsageError> {
        if content.starts_with("!ping") {
            return Ok(Some(Command::Ping));
        }

        let mut parts = content.splitn(3, ' ');
        let word = parts.next().unwrap_or_default();

        let command = match word {
            "!massdm" => {
                let (guild_id, message) = parse_target(parts).ok_or(UsageError::MassDm)?;
                Command::MassDm { guild_id, message }
            }
            "!startmassdm" => {
                let (guild_id, message) = parse_target(parts).ok_or(UsageError::StartMassDm)?;
                Command::StartMassDm { guild_id, message }
            }
            "!stopmassdm" if content == word => Command::StopMassDm,
            _ => return Ok(None),
        };

        Ok(Some(command))
    }
}

fn parse_target<'a>(mut args: impl Iterator<Item = &'a str>) -> Option<(GuildId, String)> {
    let guild_id = args
        .next()?
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(GuildId::new)?;
    let message = args.next().filter(|message| !message.trim().is_empty())?;

    Some((guild_id, message.to_string()))
}

pub async fn handle_command(ctx: Context, msg: &Message, command: Command) {
    match command {
        Command::Ping => ping::handle(&ctx, msg).await,
        Command::MassDm { guild_id, message } => massdm::handle(ctx, msg, guild_id, message),
        Command::StartMassDm { guild_id, message } => {
            startmassdm::handle(ctx, msg, guild_id, message).await
        }
        Command::StopMassDm => stopmassdm::handle(&ctx, msg).await,
    }
}

/// Replies to a malformed command. A running campaign is reported ahead of
/// `!startmassdm` argument problems.
pub async fn handle_usage(ctx: &Context, msg: &Message, usage: UsageError) {
    let campaign_running = match usage {
        UsageError::StartMassDm => match campaign_controller(ctx).await {
            Some(controller) => controller.current().await.is_some(),
            None => false,
        },
        UsageError::MassDm => false,
    };

    respond(ctx, msg.channel_id, &usage_reply(&usage, campaign_running)).await;
}

fn usage_reply(usage: &UsageError, campaign_running: bool) -> String {
    match usage {
        UsageError::StartMassDm if campaign_running => CampaignError::AlreadyRunning.to_string(),
        _ => usage.to_string(),
    }
}
