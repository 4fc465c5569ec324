//! Party flows, daily reset, and snapshot persistence through the handle.

mod common;

use std::sync::Arc;

use game_core::{BreakthroughError, DamageRange, PartyError};
use runtime::{
    Event, FilePlayerRepo, FileSnapshotRepo, PartyEvent, Runtime, RuntimeError, Topic,
};

use common::{boss, content, fast_config, init_tracing};

#[tokio::test]
async fn party_lifecycle_through_the_handle() {
    init_tracing();
    let rt = Runtime::builder()
        .content(content(Vec::new()))
        .config(fast_config())
        .build()
        .await
        .expect("build runtime");
    let handle = rt.handle();

    for id in ["alice", "bob", "carol"] {
        handle.register_player(id, None).await.expect("register");
    }

    let party = handle
        .create_party("alice", "Heaven Seekers")
        .await
        .expect("create");
    assert_eq!(party.leader.as_str(), "alice");

    // Joining without an invite is rejected.
    let err = handle.join_party("bob", "Heaven Seekers").await.unwrap_err();
    assert!(matches!(err, RuntimeError::Party(PartyError::NotInvited(_))));

    handle.invite_to_party("alice", "bob").await.expect("invite");
    handle.invite_to_party("alice", "carol").await.expect("invite");
    // Party names are case-insensitive.
    handle.join_party("bob", "heaven seekers").await.expect("join");
    let party = handle.join_party("carol", "HEAVEN SEEKERS").await.expect("join");
    assert_eq!(party.members.len(), 3);

    // Re-inviting a current member is a silent no-op: the next announced
    // invite is the one for the fresh player.
    handle.register_player("dave", None).await.expect("register");
    let mut party_rx = handle.subscribe(Topic::Party);
    handle.invite_to_party("alice", "bob").await.expect("no-op invite");
    handle.invite_to_party("alice", "dave").await.expect("invite");
    match party_rx.recv().await.expect("party event") {
        Event::Party(PartyEvent::InviteSent { target, .. }) => {
            assert_eq!(target.as_str(), "dave");
        }
        other => panic!("unexpected party event: {other:?}"),
    }

    // Leader leaving hands the party to the earliest remaining member.
    handle.leave_party("alice").await.expect("leave");
    let party = handle
        .party_of("bob")
        .await
        .expect("query")
        .expect("party still exists");
    assert_eq!(party.leader.as_str(), "bob");
    assert!(handle.party_of("alice").await.expect("query").is_none());

    // Only the leader may disband.
    let err = handle.disband_party("carol").await.unwrap_err();
    assert!(matches!(err, RuntimeError::Party(PartyError::NotLeader)));
    handle.disband_party("bob").await.expect("disband");
    assert!(handle.party_of("carol").await.expect("query").is_none());

    rt.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn daily_reset_runs_once_per_day() {
    init_tracing();
    let rt = Runtime::builder()
        .content(content(Vec::new()))
        .config(fast_config())
        .build()
        .await
        .expect("build runtime");
    let handle = rt.handle();

    handle.register_player("alice", None).await.expect("register");

    assert!(handle.daily_reset().await.expect("first reset"));
    // Same calendar day: a second sweep is a no-op.
    assert!(!handle.daily_reset().await.expect("second reset"));

    rt.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn registration_login_and_progression_basics() {
    init_tracing();
    let rt = Runtime::builder()
        .content(content(Vec::new()))
        .config(fast_config())
        .build()
        .await
        .expect("build runtime");
    let handle = rt.handle();

    let err = handle
        .register_player("alice", Some("Ghoul".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownRace(_)));

    let record = handle
        .register_player("alice", Some("Human".into()))
        .await
        .expect("register");
    assert_eq!(record.realm, "Qi Condensation");
    assert_eq!(record.stage, "Early");
    assert_eq!(record.login_streak, 1);

    // Logging in again the same day leaves the streak alone.
    let record = handle.record_login("alice").await.expect("login");
    assert_eq!(record.login_streak, 1);

    // No banked exp yet, so a breakthrough is refused.
    let err = handle.breakthrough("alice").await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Breakthrough(BreakthroughError::NotEnoughExp { .. })
    ));

    let technique = handle.learn_technique("alice").await.expect("technique");
    assert!(!technique.name.is_empty());
    assert!(technique.power_bonus > 0.0);

    let err = handle.player("nobody").await.unwrap_err();
    assert!(matches!(err, RuntimeError::PlayerNotFound(_)));

    rt.shutdown().await.expect("shutdown");
}

/// Players and parties written through one runtime are visible after a
/// restart against the same store directory.
#[tokio::test]
async fn snapshot_survives_restart() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = content(vec![boss("Flame Tyrant", 400, DamageRange { min: 1, max: 2 })]);

    {
        let rt = Runtime::builder()
            .content(catalog.clone())
            .config(fast_config())
            .player_repo(Arc::new(FilePlayerRepo::new(dir.path()).expect("repo")))
            .snapshot_repo(Arc::new(FileSnapshotRepo::new(dir.path()).expect("repo")))
            .build()
            .await
            .expect("build runtime");
        let handle = rt.handle();

        handle.register_player("alice", None).await.expect("register");
        handle
            .create_party("alice", "Heaven Seekers")
            .await
            .expect("create");

        // Shutdown writes the final snapshot.
        rt.shutdown().await.expect("shutdown");
    }

    let rt = Runtime::builder()
        .content(catalog)
        .config(fast_config())
        .player_repo(Arc::new(FilePlayerRepo::new(dir.path()).expect("repo")))
        .snapshot_repo(Arc::new(FileSnapshotRepo::new(dir.path()).expect("repo")))
        .build()
        .await
        .expect("rebuild runtime");
    let handle = rt.handle();

    let err = handle.register_player("alice", None).await.unwrap_err();
    assert!(matches!(err, RuntimeError::AlreadyRegistered(_)));

    let party = handle
        .party_of("alice")
        .await
        .expect("query")
        .expect("party restored");
    assert_eq!(party.name, "Heaven Seekers");

    rt.shutdown().await.expect("shutdown");
}
