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

use std::sync::Arc;
use std::time::Duration;

use serenity::all::{ChannelId, GuildId};
use tokio::spawn;
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::broadcast::{broadcast, MemberDirectory};
use crate::errors::CampaignError;

pub const CAMPAIGN_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// A repeating broadcast. Lives in the controller's slot while it runs.
struct BroadcastJob {
    guild_id: GuildId,
    message: String,
    /// Dropping this ends the ticking loop at its next wait point.
    _stop_handle: Sender<()>,
    _task: JoinHandle<()>,
}

/// Owns the single periodic broadcast the bot may run at a time.
#[derive(Default)]
pub struct CampaignController {
    job: Mutex<Option<BroadcastJob>>,
}

impl CampaignController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts broadcasting `message` to `guild_id` every [`CAMPAIGN_INTERVAL`].
    /// The first broadcast goes out one interval from now.
    pub async fn start(
        &self,
        directory: Arc<dyn MemberDirectory>,
        guild_id: GuildId,
        message: String,
        reply_channel: ChannelId,
    ) -> Result<(), CampaignError> {
        let mut slot = self.job.lock().await;
        if slot.is_some() {
            return Err(CampaignError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = channel::<()>(1);
        let task = spawn(run_campaign(
            directory,
            guild_id,
            message.clone(),
            reply_channel,
            stop_rx,
        ));

        *slot = Some(BroadcastJob {
            guild_id,
            message,
            _stop_handle: stop_tx,
            _task: task,
        });
        log::info!("Periodic mass DM to guild {} started", guild_id);

        Ok(())
    }

    /// Stops the running campaign without waiting for it. A broadcast already
    /// in flight is allowed to finish, nothing fires after it.
    pub async fn stop(&self) -> Result<(), CampaignError> {
        let job = self.job.lock().await.take().ok_or(CampaignError::NotRunning)?;
        log::info!("Periodic mass DM to guild {} stopped", job.guild_id);
        drop(job);

        Ok(())
    }

    /// Guild and message of the running campaign, if any.
    pub async fn current(&self) -> Option<(GuildId, String)> {
        self.job
            .lock()
            .await
            .as_ref()
            .map(|job| (job.guild_id, job.message.clone()))
    }
}

async fn run_campaign(
    directory: Arc<dyn MemberDirectory>,
    guild_id: GuildId,
    message: String,
    reply_channel: ChannelId,
    mut stop_rx: Receiver<()>,
) {
    let mut ticker = interval_at(Instant::now() + CAMPAIGN_INTERVAL, CAMPAIGN_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = stop_rx.recv() => break,
            _ = ticker.tick() => {
                if let Err(err) = broadcast(directory.as_ref(), guild_id, &message, reply_channel).await {
                    log::warn!("Periodic mass DM to guild {} failed: {}", guild_id, err);
                }
            }
        }
    }

    log::debug!("Campaign loop for guild {} exited", guild_id);
}
