use std::collections::HashMap;
use std::sync::Mutex;

use serenity::all::{ChannelId, GuildId, UserId};
use serenity::async_trait;

use crate::broadcast::{MemberDirectory, MemberRecord};
use crate::errors::DeliveryError;

pub const TEST_GUILD: GuildId = GuildId::new(4242);
pub const REPLY_CHANNEL: ChannelId = ChannelId::new(7);

#[derive(Default)]
struct Recorded {
    fetches: usize,
    send_attempts: Vec<UserId>,
    sent_to: Vec<UserId>,
    notices: Vec<String>,
}

/// In-memory directory. DM channel ids mirror the user id they were opened for.
#[derive(Default)]
pub struct FakeDirectory {
    members: Vec<MemberRecord>,
    fail_fetch: Mutex<bool>,
    fail_dm: Mutex<Vec<UserId>>,
    fail_send: Mutex<HashMap<UserId, bool>>,
    recorded: Mutex<Recorded>,
}

impl FakeDirectory {
    pub fn new(members: Vec<MemberRecord>) -> Self {
        Self {
            members,
            ..Default::default()
        }
    }

    pub fn member(id: u64, name: &str, bot: bool) -> MemberRecord {
        MemberRecord {
            id: UserId::new(id),
            name: name.to_string(),
            bot,
        }
    }

    pub fn fail_fetch(&self) {
        *self.fail_fetch.lock().unwrap() = true;
    }

    pub fn fail_dm(&self, user_id: UserId) {
        self.fail_dm.lock().unwrap().push(user_id);
    }

    pub fn fail_send(&self, user_id: UserId, rate_limited: bool) {
        self.fail_send.lock().unwrap().insert(user_id, rate_limited);
    }

    pub fn fetch_count(&self) -> usize {
        self.recorded.lock().unwrap().fetches
    }

    pub fn send_attempts(&self) -> Vec<UserId> {
        self.recorded.lock().unwrap().send_attempts.clone()
    }

    pub fn sent_to(&self) -> Vec<UserId> {
        self.recorded.lock().unwrap().sent_to.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.recorded.lock().unwrap().notices.clone()
    }
}

#[async_trait]
impl MemberDirectory for FakeDirectory {
    async fn members(&self, _guild_id: GuildId, limit: u64) -> Result<Vec<MemberRecord>, DeliveryError> {
        self.recorded.lock().unwrap().fetches += 1;
        if *self.fail_fetch.lock().unwrap() {
            return Err(DeliveryError::Other("Missing Access".to_string()));
        }
        Ok(self.members.iter().take(limit as usize).cloned().collect())
    }

    async fn open_dm(&self, user_id: UserId) -> Result<ChannelId, DeliveryError> {
        if self.fail_dm.lock().unwrap().contains(&user_id) {
            return Err(DeliveryError::Other("Cannot send messages to this user".to_string()));
        }
        Ok(ChannelId::new(user_id.get()))
    }

    async fn send(&self, channel_id: ChannelId, _content: &str) -> Result<(), DeliveryError> {
        let user_id = UserId::new(channel_id.get());
        let mut recorded = self.recorded.lock().unwrap();
        recorded.send_attempts.push(user_id);

        match self.fail_send.lock().unwrap().get(&user_id).copied() {
            Some(true) => Err(DeliveryError::RateLimited("429 Too Many Requests".to_string())),
            Some(false) => Err(DeliveryError::Other("Unknown Channel".to_string())),
            None => {
                recorded.sent_to.push(user_id);
                Ok(())
            }
        }
    }

    async fn notify(&self, _channel_id: ChannelId, content: &str) {
        self.recorded.lock().unwrap().notices.push(content.to_string());
    }
}
