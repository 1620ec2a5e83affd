//! Shared fixtures for in-memory integration tests.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use nexus_bot::config::BotConfig;
use nexus_bot::event_role::{
    adapters::memory::{InMemoryBindingRepository, InMemoryChatPlatform},
    domain::{
        ChannelId, EventBinding, GuildId, InboundMessage, MessageAuthor, MessageId,
        MessageLocation, RoleId, UserId,
    },
    services::EventRoleBot,
};
use rstest::fixture;
use tokio::runtime::Runtime;

/// Guild hosting the announcement.
pub const GUILD: &str = "810000000000000001";
/// Channel hosting the announcement.
pub const CHANNEL: &str = "810000000000000002";
/// The announcement message.
pub const ANNOUNCEMENT: &str = "123456789012345678";
/// The organiser's invoking message.
pub const INVOCATION: &str = "810000000000000003";
/// The organiser.
pub const ORGANISER: &str = "810000000000000004";
/// A guild member who reacts to announcements.
pub const MEMBER: &str = "810000000000000005";

/// Bot type assembled over the in-memory adapters.
pub type MemoryBot = EventRoleBot<InMemoryBindingRepository, InMemoryChatPlatform, DefaultClock>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryBindingRepository {
    InMemoryBindingRepository::new()
}

/// Provides a platform with one guild, channel, announcement and two members.
#[fixture]
pub fn platform() -> InMemoryChatPlatform {
    let platform = InMemoryChatPlatform::new();
    let guild = GuildId::new(GUILD);
    let channel = ChannelId::new(CHANNEL);
    platform.add_guild(&guild, "Nexus").expect("seed guild");
    platform
        .add_channel(&channel, Some(&guild))
        .expect("seed channel");
    for message in [ANNOUNCEMENT, INVOCATION] {
        platform
            .add_message(&channel, &MessageId::new(message))
            .expect("seed message");
    }
    platform
        .add_member(&guild, &UserId::new(ORGANISER), "Organiser")
        .expect("seed organiser");
    platform
        .add_member(&guild, &UserId::new(MEMBER), "Ada")
        .expect("seed member");
    platform
}

/// A bot with default configuration plus its collaborators.
pub struct BotHarness {
    /// Binding store shared with the bot.
    pub repository: Arc<InMemoryBindingRepository>,
    /// Platform shared with the bot.
    pub platform: Arc<InMemoryChatPlatform>,
    /// The bot under test.
    pub bot: MemoryBot,
}

/// Provides a bot wired to fresh in-memory adapters.
#[fixture]
pub fn harness(platform: InMemoryChatPlatform) -> BotHarness {
    let repository = Arc::new(InMemoryBindingRepository::new());
    let platform = Arc::new(platform);
    let bot = EventRoleBot::new(
        &BotConfig::default(),
        Arc::clone(&repository),
        Arc::clone(&platform),
        Arc::new(DefaultClock),
    );
    BotHarness {
        repository,
        platform,
        bot,
    }
}

/// A message from the organiser in the announcement channel.
#[must_use]
pub fn organiser_says(content: &str) -> InboundMessage {
    InboundMessage {
        id: MessageId::new(INVOCATION),
        channel_id: ChannelId::new(CHANNEL),
        guild_id: Some(GuildId::new(GUILD)),
        author: MessageAuthor::new(ORGANISER, "Organiser"),
        content: content.to_owned(),
    }
}

/// A binding in the seeded guild and channel.
#[must_use]
pub fn binding_for(message_id: &str, role_id: &str) -> EventBinding {
    EventBinding::new(
        MessageLocation {
            guild_id: GuildId::new(GUILD),
            channel_id: ChannelId::new(CHANNEL),
            message_id: MessageId::new(message_id),
        },
        RoleId::new(role_id),
        &DefaultClock,
    )
}
