/*
 * This file is part of massdm-bot.
 *
 * Copyright (C) 2024-present Polyzium
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use std::time::Duration;

use serenity::all::{ChannelId, GuildId, UserId};
use serenity::async_trait;
use tokio::time::sleep;

use crate::errors::{BroadcastError, DeliveryError};

/// Discord caps a single member listing at this many entries.
pub const MEMBER_FETCH_LIMIT: u64 = 1000;
pub const SEND_DELAY: Duration = Duration::from_millis(1500);
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub id: UserId,
    pub name: String,
    pub bot: bool,
}

/// Everything a broadcast needs from Discord. Implemented over serenity in
/// `directory.rs` and faked in tests.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn members(&self, guild_id: GuildId, limit: u64) -> Result<Vec<MemberRecord>, DeliveryError>;

    /// Opens the DM channel with a user, or returns the existing one.
    async fn open_dm(&self, user_id: UserId) -> Result<ChannelId, DeliveryError>;

    async fn send(&self, channel_id: ChannelId, content: &str) -> Result<(), DeliveryError>;

    /// Posts a progress notice. Failures are logged by the implementation.
    async fn notify(&self, channel_id: ChannelId, content: &str);
}

#[derive(Debug)]
pub enum DeliveryOutcome {
    Sent,
    SkippedBot,
    NoChannel(DeliveryError),
    Failed(DeliveryError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastSummary {
    pub sent: usize,
    pub total: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BroadcastSummary {
    fn record(&mut self, outcome: &DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Sent => self.sent += 1,
            DeliveryOutcome::SkippedBot => self.skipped += 1,
            DeliveryOutcome::NoChannel(_) | DeliveryOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// DMs `message` to every member of `guild_id`, one at a time, posting progress
/// to `reply_channel`.
///
/// Members are walked in listing order with a fixed pause after every send.
/// A rate-limited send pauses the whole walk for [`RATE_LIMIT_COOLDOWN`]; the
/// member that hit it is not retried. Only a failed member listing aborts the run.
pub async fn broadcast<D>(
    directory: &D,
    guild_id: GuildId,
    message: &str,
    reply_channel: ChannelId,
) -> Result<BroadcastSummary, BroadcastError>
where
    D: MemberDirectory + ?Sized,
{
    let members = match directory.members(guild_id, MEMBER_FETCH_LIMIT).await {
        Ok(members) => members,
        Err(err) => {
            let err = BroadcastError::Fetch(err);
            directory.notify(reply_channel, &err.to_string()).await;
            return Err(err);
        }
    };

    let mut summary = BroadcastSummary {
        total: members.len(),
        ..Default::default()
    };
    directory
        .notify(
            reply_channel,
            &format!("Starting mass DM to {} members. This may take time.", summary.total),
        )
        .await;

    for member in &members {
        let outcome = deliver(directory, member, message).await;
        summary.record(&outcome);

        match outcome {
            DeliveryOutcome::SkippedBot => continue,
            DeliveryOutcome::Sent => {}
            DeliveryOutcome::NoChannel(err) => {
                log::warn!("Error creating DM with {}: {}", member.name, err);
                continue;
            }
            DeliveryOutcome::Failed(err) => {
                log::warn!("Error sending DM to {}: {}", member.name, err);
                if err.is_rate_limited() {
                    log::warn!("Rate limited, pausing for {}s", RATE_LIMIT_COOLDOWN.as_secs());
                    sleep(RATE_LIMIT_COOLDOWN).await;
                }
            }
        }

        sleep(SEND_DELAY).await;
    }

    directory
        .notify(
            reply_channel,
            &format!("Mass DM complete. Sent to {}/{} members.", summary.sent, summary.total),
        )
        .await;
    log::info!(
        "Mass DM to guild {} finished: {} sent, {} failed, {} bots skipped, {} total",
        guild_id,
        summary.sent,
        summary.failed,
        summary.skipped,
        summary.total
    );

    Ok(summary)
}

async fn deliver<D>(directory: &D, member: &MemberRecord, message: &str) -> DeliveryOutcome
where
    D: MemberDirectory + ?Sized,
{
    if member.bot {
        return DeliveryOutcome::SkippedBot;
    }

    let channel_id = match directory.open_dm(member.id).await {
        Ok(channel_id) => channel_id,
        Err(err) => return DeliveryOutcome::NoChannel(err),
    };

    match directory.send(channel_id, message).await {
        Ok(()) => DeliveryOutcome::Sent,
        Err(err) => DeliveryOutcome::Failed(err),
    }
}
