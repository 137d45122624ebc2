use serenity::all::{ChannelId, Context, GuildId, UserId};
use serenity::async_trait;

use crate::broadcast::{MemberDirectory, MemberRecord};
use crate::errors::DeliveryError;

/// Member directory backed by the bot's live Discord session.
pub struct DiscordDirectory {
    ctx: Context,
}

impl DiscordDirectory {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl MemberDirectory for DiscordDirectory {
    async fn members(&self, guild_id: GuildId, limit: u64) -> Result<Vec<MemberRecord>, DeliveryError> {
        // Needs the GUILD_MEMBERS intent, and the bot has to be in the guild
        let members = guild_id
            .members(&self.ctx.http, Some(limit), None::<UserId>)
            .await?;

        Ok(members
            .into_iter()
            .map(|member| MemberRecord {
                id: member.user.id,
                name: member.user.name,
                bot: member.user.bot,
            })
            .collect())
    }

    async fn open_dm(&self, user_id: UserId) -> Result<ChannelId, DeliveryError> {
        let channel = user_id.create_dm_channel(&self.ctx).await?;
        Ok(channel.id)
    }

    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<(), DeliveryError> {
        channel_id.say(&self.ctx.http, content).await?;
        Ok(())
    }

    async fn notify(&self, channel_id: ChannelId, content: &str) {
        if let Err(why) = channel_id.say(&self.ctx.http, content).await {
            log::error!("Error sending message: {why:?}");
        }
    }
}
