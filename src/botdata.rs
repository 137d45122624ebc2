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

use serenity::{all::Context, prelude::TypeMapKey};

use crate::campaign::CampaignController;

pub struct BotDataKey;

#[derive(Default)]
pub struct BotData {
    pub(crate) campaign: Arc<CampaignController>,
}

impl TypeMapKey for BotDataKey {
    type Value = BotData;
}

/// The shared campaign controller, or `None` (logged) if the client was built
/// without bot data.
pub async fn campaign_controller(ctx: &Context) -> Option<Arc<CampaignController>> {
    let data_lock = ctx.data.read().await;
    let controller = data_lock
        .get::<BotDataKey>()
        .map(|botdata| botdata.campaign.clone());
    if controller.is_none() {
        log::error!("Bot data missing from the client, was it inserted at startup?");
    }

    controller
}
