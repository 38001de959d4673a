//! Gateway Integration Tests
//!
//! Each test runs its own gateway on an ephemeral port; no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use std::sync::Arc;

use chat_core::OutboundMessage;
use integration_tests::*;
use serde_json::json;

const JOKE: &str = "I only know 25 letters of the alphabet. I don't know y.";

async fn gateway() -> TestGateway {
    TestGateway::start(Arc::new(StaticJokes(JOKE)))
        .await
        .expect("Failed to start gateway")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let gateway = gateway().await;

    let response = reqwest::get(format!("{}/health", gateway.base_url()))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

// ============================================================================
// Room Tests
// ============================================================================

#[tokio::test]
async fn test_lobby_conversation() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut bob = gateway.join("lobby", "bob").await.unwrap();
    alice.expect_note("bob joined \"lobby\".").await.unwrap();

    alice.send(&chat("hi")).await.unwrap();
    let expected = OutboundMessage::chat(Some("alice".to_string()), "hi");
    assert_eq!(alice.recv().await.unwrap(), expected);
    assert_eq!(bob.recv().await.unwrap(), expected);

    bob.send(&get_members()).await.unwrap();
    bob.expect_note("Members of \"lobby\": alice, bob.").await.unwrap();
    alice.expect_silence().await.unwrap();

    bob.close().await.unwrap();
    alice.expect_note("bob left lobby.").await.unwrap();
    assert_eq!(gateway.registry.get("lobby").member_names(), vec!["alice"]);
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut carol = gateway.join("kitchen", "carol").await.unwrap();

    alice.send(&chat("anyone here?")).await.unwrap();
    alice.recv().await.unwrap();
    carol.expect_silence().await.unwrap();

    assert_eq!(gateway.registry.room_names(), vec!["kitchen", "lobby"]);
}

#[tokio::test]
async fn test_private_chat() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut bob = gateway.join("lobby", "bob").await.unwrap();
    let mut carol = gateway.join("lobby", "carol").await.unwrap();
    alice.expect_note("bob joined \"lobby\".").await.unwrap();
    alice.expect_note("carol joined \"lobby\".").await.unwrap();
    bob.expect_note("carol joined \"lobby\".").await.unwrap();

    alice.send(&private_chat("bob", "lunch at  noon?")).await.unwrap();

    assert_eq!(
        bob.recv().await.unwrap(),
        OutboundMessage::chat(Some("alice".to_string()), "lunch at  noon?")
    );
    alice.expect_silence().await.unwrap();
    carol.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_private_chat_to_unknown_name_is_dropped() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();

    alice.send(&private_chat("nobody", "hello?")).await.unwrap();
    alice.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_rename() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut bob = gateway.join("lobby", "bob").await.unwrap();
    alice.expect_note("bob joined \"lobby\".").await.unwrap();

    alice.send(&name_change("ally")).await.unwrap();
    alice.expect_note("You are now known as ally.").await.unwrap();
    bob.expect_note("alice is now known as ally.").await.unwrap();

    alice.send(&chat("same me")).await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        OutboundMessage::chat(Some("ally".to_string()), "same me")
    );
}

#[tokio::test]
async fn test_rename_to_taken_name_is_rejected() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut bob = gateway.join("lobby", "bob").await.unwrap();
    alice.expect_note("bob joined \"lobby\".").await.unwrap();

    alice.send(&name_change("bob")).await.unwrap();
    alice
        .expect_note("Cannot rename: Name already taken: bob.")
        .await
        .unwrap();
    bob.expect_silence().await.unwrap();

    assert_eq!(gateway.registry.get("lobby").member_names(), vec!["alice", "bob"]);
}

// ============================================================================
// Joke Tests
// ============================================================================

#[tokio::test]
async fn test_joke_goes_to_requester_only() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut bob = gateway.join("lobby", "bob").await.unwrap();
    alice.expect_note("bob joined \"lobby\".").await.unwrap();

    alice.send(&get_joke()).await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap(),
        OutboundMessage::chat(Some("alice".to_string()), JOKE)
    );
    bob.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_joke_source_down() {
    let gateway = TestGateway::start(Arc::new(NoJokes)).await.unwrap();

    let mut alice = gateway.join("lobby", "alice").await.unwrap();

    alice.send(&get_joke()).await.unwrap();
    alice
        .expect_note("No jokes right now, try again later.")
        .await
        .unwrap();

    // The session survives a failed joke
    alice.send(&chat("oh well")).await.unwrap();
    alice.recv().await.unwrap();
}

// ============================================================================
// Protocol Error Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_type_closes_connection() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let mut bob = gateway.join("lobby", "bob").await.unwrap();
    alice.expect_note("bob joined \"lobby\".").await.unwrap();

    bob.send(&json!({ "type": "dance" })).await.unwrap();

    assert_eq!(bob.recv_close_code().await.unwrap(), Some(4001));
    alice.expect_note("bob left lobby.").await.unwrap();
    assert_eq!(gateway.registry.get("lobby").member_count(), 1);
}

#[tokio::test]
async fn test_malformed_json_closes_connection() {
    let gateway = gateway().await;

    let mut client = gateway.connect("lobby").await.unwrap();
    client.send_raw("{not json").await.unwrap();

    assert_eq!(client.recv_close_code().await.unwrap(), Some(4002));
}

#[tokio::test]
async fn test_missing_fields_close_connection() {
    let gateway = gateway().await;

    let mut client = gateway.connect("lobby").await.unwrap();
    client.send(&json!({ "type": "join" })).await.unwrap();

    assert_eq!(client.recv_close_code().await.unwrap(), Some(4002));
    assert_eq!(gateway.registry.get("lobby").member_count(), 0);
}

#[tokio::test]
async fn test_binary_frame_closes_connection() {
    let gateway = gateway().await;

    let mut client = gateway.connect("lobby").await.unwrap();
    client.send_binary(vec![0xde, 0xad]).await.unwrap();

    assert_eq!(client.recv_close_code().await.unwrap(), Some(4002));
}

#[tokio::test]
async fn test_disconnect_before_join_is_silent() {
    let gateway = gateway().await;

    let mut alice = gateway.join("lobby", "alice").await.unwrap();
    let lurker = gateway.connect("lobby").await.unwrap();

    lurker.close().await.unwrap();
    alice.expect_silence().await.unwrap();
}
