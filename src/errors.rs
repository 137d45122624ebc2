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

use serenity::Error as SerenityError;
use thiserror::Error;

const TOO_MANY_REQUESTS: u16 = 429;

/// Malformed command arguments. The message is sent back verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Usage: !massdm <guild_id> <message>")]
    MassDm,
    #[error("Usage: !startmassdm <guild_id> <message>")]
    StartMassDm,
}

/// Why a single Discord request made on behalf of a broadcast failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("{0}")]
    Other(String),
}

impl DeliveryError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, DeliveryError::RateLimited(_))
    }
}

impl From<SerenityError> for DeliveryError {
    fn from(err: SerenityError) -> Self {
        let rate_limited = match &err {
            SerenityError::Http(http_err) => http_err
                .status_code()
                .is_some_and(|status| status.as_u16() == TOO_MANY_REQUESTS),
            _ => false,
        };

        if rate_limited {
            DeliveryError::RateLimited(err.to_string())
        } else {
            DeliveryError::Other(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("Error fetching members: {0}")]
    Fetch(#[source] DeliveryError),
}

/// Rejected campaign transitions. `Display` is the reply shown to the requester.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CampaignError {
    #[error("Periodic mass DM already running. Use !stopmassdm to stop it first.")]
    AlreadyRunning,
    #[error("No periodic mass DM is running.")]
    NotRunning,
}
