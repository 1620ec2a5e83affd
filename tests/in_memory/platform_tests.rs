//! Behaviour tests for [`InMemoryChatPlatform`].

use crate::in_memory::helpers::{CHANNEL, GUILD, MEMBER, platform};
use nexus_bot::event_role::{
    adapters::memory::{FailingOperation, InMemoryChatPlatform},
    domain::{ChannelId, GuildId, RoleId, UserId},
    ports::{ChatPlatform, ChatPlatformError},
};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn created_roles_can_be_resolved_and_deleted(platform: InMemoryChatPlatform) {
    let guild = GuildId::new(GUILD);
    let role = platform
        .create_role(&guild, "Raiders", "test")
        .await
        .expect("create role");

    let fetched = platform
        .fetch_role(&guild, &role.id)
        .await
        .expect("fetch role");
    assert_eq!(fetched, Some(role.clone()));

    platform
        .delete_role(&guild, &role.id, "test")
        .await
        .expect("delete role");
    let second_delete = platform.delete_role(&guild, &role.id, "test").await;
    assert!(matches!(
        second_delete,
        Err(ChatPlatformError::NotFound { entity: "role", .. })
    ));
}

#[rstest]
#[tokio::test]
async fn roles_are_scoped_to_their_guild(platform: InMemoryChatPlatform) {
    let role = platform
        .create_role(&GuildId::new(GUILD), "Raiders", "test")
        .await
        .expect("create role");

    let elsewhere = platform
        .fetch_role(&GuildId::new("1"), &role.id)
        .await
        .expect("fetch role");
    assert!(elsewhere.is_none());
}

#[rstest]
#[tokio::test]
async fn deleting_a_role_clears_its_holders(platform: InMemoryChatPlatform) {
    let guild = GuildId::new(GUILD);
    let member = UserId::new(MEMBER);
    let role = platform
        .create_role(&guild, "Raiders", "test")
        .await
        .expect("create role");
    platform
        .grant_role(&guild, &member, &role.id, "test")
        .await
        .expect("grant role");
    assert!(platform.has_role(&guild, &member, &role.id).expect("lookup"));

    platform
        .delete_role(&guild, &role.id, "test")
        .await
        .expect("delete role");

    assert!(!platform.has_role(&guild, &member, &role.id).expect("lookup"));
}

#[rstest]
#[tokio::test]
async fn granting_an_unknown_role_fails(platform: InMemoryChatPlatform) {
    let result = platform
        .grant_role(
            &GuildId::new(GUILD),
            &UserId::new(MEMBER),
            &RoleId::new("404"),
            "test",
        )
        .await;

    assert!(matches!(result, Err(ChatPlatformError::NotFound { .. })));
}

#[rstest]
#[tokio::test]
async fn injected_failures_are_permission_errors(platform: InMemoryChatPlatform) {
    platform
        .fail(FailingOperation::SendMessage)
        .expect("inject failure");

    let result = platform
        .send_message(&ChannelId::new(CHANNEL), "hello")
        .await;

    assert!(matches!(result, Err(ChatPlatformError::Forbidden(_))));
}

#[rstest]
#[tokio::test]
async fn posted_messages_can_be_deleted_once(platform: InMemoryChatPlatform) {
    let channel = ChannelId::new(CHANNEL);
    let posted = platform
        .send_message(&channel, "hello")
        .await
        .expect("post");

    platform
        .delete_message(&channel, &posted)
        .await
        .expect("delete");
    let again = platform.delete_message(&channel, &posted).await;

    assert!(matches!(again, Err(ChatPlatformError::NotFound { .. })));
    assert_eq!(
        platform.deleted_messages().expect("deleted"),
        vec![posted]
    );
}
