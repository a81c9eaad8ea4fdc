//! Chat service tests: persistence, fan-out, and listener teardown

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_repos::MockMessageRepository;
use fanbase_core::{AuthSession, ChatService, CoreError};
use fanbase_types::UserId;

fn service() -> ChatService<MockMessageRepository> {
    ChatService::new(Arc::new(MockMessageRepository::new()))
}

#[tokio::test]
async fn test_send_persists_and_delivers_to_listener() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();

    let mut sub = chat.subscribe_to_thread(alice, bob);
    let sent = chat
        .send_message(&AuthSession::for_user(alice), bob, "hey bob")
        .await
        .unwrap();

    let received = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("listener timed out")
        .expect("subscription closed");
    assert_eq!(received.id, sent.id);
    assert_eq!(received.body, "hey bob");
    assert_eq!(received.sender_id, alice);
    assert_eq!(received.receiver_id, bob);
}

#[tokio::test]
async fn test_listener_sees_both_directions() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();

    let mut sub = chat.subscribe_to_thread(alice, bob);
    chat.send_message(&AuthSession::for_user(alice), bob, "ping")
        .await
        .unwrap();
    chat.send_message(&AuthSession::for_user(bob), alice, "pong")
        .await
        .unwrap();

    let first = sub.recv().await.unwrap();
    let second = sub.recv().await.unwrap();
    assert_eq!(first.body, "ping");
    assert_eq!(second.body, "pong");
}

#[tokio::test]
async fn test_other_threads_do_not_leak_in() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();
    let carol = UserId::new();

    let mut sub = chat.subscribe_to_thread(alice, bob);
    chat.send_message(&AuthSession::for_user(alice), carol, "secret")
        .await
        .unwrap();
    chat.send_message(&AuthSession::for_user(alice), bob, "public")
        .await
        .unwrap();

    let received = sub.recv().await.unwrap();
    assert_eq!(received.body, "public");
    assert!(received.in_thread(alice, bob));
    assert!(!received.in_thread(alice, carol));
}

#[tokio::test]
async fn test_close_releases_listener() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();

    let mut sub = chat.subscribe_to_thread(alice, bob);
    assert!(sub.is_open());
    sub.close();
    assert!(!sub.is_open());
    assert!(sub.recv().await.is_none());

    // Idempotent, and the thread can be joined again afterwards.
    sub.close();
    let mut again = chat.subscribe_to_thread(alice, bob);
    chat.send_message(&AuthSession::for_user(alice), bob, "still works")
        .await
        .unwrap();
    assert_eq!(again.recv().await.unwrap().body, "still works");
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();

    let err = chat
        .send_message(&AuthSession::for_user(alice), bob, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::EmptyMessage));
    assert!(chat.history(alice, bob, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_without_listener_still_persists() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();

    chat.send_message(&AuthSession::for_user(alice), bob, "offline note")
        .await
        .unwrap();

    let history = chat.history(alice, bob, 10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].body, "offline note");
}

#[tokio::test]
async fn test_history_insertion_order_and_limit() {
    let chat = service();
    let alice = UserId::new();
    let bob = UserId::new();
    let alice_session = AuthSession::for_user(alice);

    for i in 0..5 {
        chat.send_message(&alice_session, bob, &format!("m{i}"))
            .await
            .unwrap();
    }

    let history = chat.history(alice, bob, 3).await.unwrap();
    let bodies: Vec<_> = history.iter().map(|m| m.body.as_str()).collect();
    assert_eq!(bodies, ["m0", "m1", "m2"]);
}
