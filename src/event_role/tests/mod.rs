//! Unit tests for the event-role bounded context.


use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::event_role::{
    adapters::memory::{InMemoryBindingRepository, InMemoryChatPlatform},
    domain::{
        ChannelId, EventBinding, GuildId, InboundMessage, MessageAuthor, MessageId,
        MessageLocation, RoleId, UserId,
    },
    services::{BindingCache, CacheRefreshPolicy, ConfirmationTimers},
};
use mockable::DefaultClock;
use tracing::subscriber::DefaultGuard;

pub(super) const GUILD: &str = "111111111111111111";
pub(super) const CHANNEL: &str = "222222222222222222";
pub(super) const ANNOUNCEMENT: &str = "123456789012345678";
pub(super) const INVOCATION: &str = "444444444444444444";
pub(super) const AUTHOR: &str = "333333333333333333";
pub(super) const MEMBER: &str = "555555555555555555";

pub(super) type MemoryCache = BindingCache<InMemoryBindingRepository, DefaultClock>;

/// A platform with one guild, one channel, an announcement and two members.
pub(super) fn seeded_platform() -> InMemoryChatPlatform {
    let platform = InMemoryChatPlatform::new();
    let guild = GuildId::new(GUILD);
    let channel = ChannelId::new(CHANNEL);
    platform.add_guild(&guild, "Nexus").expect("seed guild");
    platform
        .add_channel(&channel, Some(&guild))
        .expect("seed channel");
    platform
        .add_message(&channel, &MessageId::new(ANNOUNCEMENT))
        .expect("seed announcement");
    platform
        .add_message(&channel, &MessageId::new(INVOCATION))
        .expect("seed invocation");
    platform
        .add_member(&guild, &UserId::new(AUTHOR), "Organiser")
        .expect("seed author");
    platform
        .add_member(&guild, &UserId::new(MEMBER), "Ada")
        .expect("seed member");
    platform
}

/// A guild message sent by the organiser.
pub(super) fn guild_message(content: &str) -> InboundMessage {
    InboundMessage {
        id: MessageId::new(INVOCATION),
        channel_id: ChannelId::new(CHANNEL),
        guild_id: Some(GuildId::new(GUILD)),
        author: MessageAuthor::new(AUTHOR, "Organiser"),
        content: content.to_owned(),
    }
}

/// A private-conversation message sent by the organiser.
pub(super) fn private_message(content: &str) -> InboundMessage {
    InboundMessage {
        guild_id: None,
        channel_id: ChannelId::new("999"),
        ..guild_message(content)
    }
}

/// Location of the seeded announcement.
pub(super) fn announcement() -> MessageLocation {
    MessageLocation {
        guild_id: GuildId::new(GUILD),
        channel_id: ChannelId::new(CHANNEL),
        message_id: MessageId::new(ANNOUNCEMENT),
    }
}

/// Deep link to a message in the seeded guild and channel.
pub(super) fn deep_link(message_id: &str) -> String {
    format!("https://discord.com/channels/{GUILD}/{CHANNEL}/{message_id}")
}

pub(super) fn binding(role_id: &str) -> EventBinding {
    EventBinding::new(announcement(), RoleId::new(role_id), &DefaultClock)
}

pub(super) fn cache_over(repository: &Arc<InMemoryBindingRepository>) -> Arc<MemoryCache> {
    Arc::new(BindingCache::new(
        Arc::clone(repository),
        Arc::new(DefaultClock),
        CacheRefreshPolicy::WhenEmpty,
    ))
}

pub(super) fn timers<P>(platform: &Arc<P>) -> Arc<ConfirmationTimers<P>>
where
    P: crate::event_role::ports::ChatPlatform + 'static,
{
    Arc::new(ConfirmationTimers::new(
        Arc::clone(platform),
        Duration::from_secs(60),
    ))
}

/// Formatted log output recorded on the current thread.
#[derive(Clone, Default)]
pub(super) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Routes this thread's logs into a new capture until the guard drops.
    pub(super) fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        (capture, tracing::subscriber::set_default(subscriber))
    }

    pub(super) fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
