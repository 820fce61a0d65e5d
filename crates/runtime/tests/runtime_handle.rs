mod common;

use std::sync::Arc;

use common::*;
use game_core::{EquipSlot, PlayerAction, Trade};
use runtime::{GameEvent, InMemorySaveRepository, PortalOutcome, Runtime, RuntimeError, Topic};

const LEFT: PlayerAction = PlayerAction::Move { dx: -1, dy: 0 };

fn runtime() -> Runtime {
    Runtime::builder()
        .content(content())
        .seed(7)
        .repository(Arc::new(InMemorySaveRepository::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn builder_requires_content() {
    let err = Runtime::builder().build().err().unwrap();
    assert!(matches!(err, RuntimeError::MissingContent));
}

#[tokio::test]
async fn steps_publish_events_by_topic() {
    let runtime = runtime();
    assert_eq!(runtime.seed(), 7);
    let handle = runtime.handle();
    let mut world_rx = handle.subscribe(Topic::World);
    let mut turn_rx = handle.subscribe(Topic::Turn);

    handle.step(LEFT).await.unwrap().unwrap();
    let report = handle.step(LEFT).await.unwrap().unwrap();
    assert_eq!(report.turn, 2);

    match world_rx.try_recv().unwrap() {
        GameEvent::MapChanged { message, transition } => {
            assert_eq!(message, "You enter the Old Crypt!");
            assert_eq!(transition.to_map, "crypt");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        turn_rx.try_recv().unwrap(),
        GameEvent::TurnResolved { turn: 1, .. }
    ));

    let status = handle.status().await.unwrap();
    assert!(status.in_dungeon);
    assert_eq!(status.map_id, "crypt");

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn queue_then_tick_matches_step() {
    let runtime = runtime();
    let handle = runtime.handle();

    assert!(handle.tick().await.unwrap().is_none());
    assert!(handle.queue_action(LEFT).await.unwrap());
    assert!(!handle.queue_action(LEFT).await.unwrap());
    let report = handle.tick().await.unwrap().unwrap();
    assert_eq!(report.turn, 1);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn save_load_and_restart_through_the_handle() {
    let runtime = runtime();
    let handle = runtime.handle();
    let mut persistence_rx = handle.subscribe(Topic::Persistence);

    handle.step(LEFT).await.unwrap();
    handle.save("one").await.unwrap();
    assert_eq!(handle.list_saves().await.unwrap(), vec!["one"]);

    handle.restart().await.unwrap();
    assert_eq!(handle.status().await.unwrap().turn, 0);

    handle.load("one").await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.turn, 1);
    assert_eq!((snapshot.player.grid_x, snapshot.player.grid_y), (2, 1));

    assert!(matches!(
        handle.load("missing").await,
        Err(RuntimeError::SaveNotFound { .. })
    ));

    let events: Vec<_> = std::iter::from_fn(|| persistence_rx.try_recv().ok()).collect();
    assert_eq!(
        events,
        vec![
            GameEvent::GameSaved { slot: "one".into() },
            GameEvent::GameRestarted,
            GameEvent::GameLoaded { slot: "one".into() },
        ]
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn portal_shop_and_gear_through_the_handle() {
    let runtime = runtime();
    let handle = runtime.handle();
    let mut world_rx = handle.subscribe(Topic::World);

    let outcome = handle.use_town_portal().await.unwrap();
    assert!(matches!(outcome, PortalOutcome::Opened(_)));
    assert!(matches!(
        world_rx.try_recv().unwrap(),
        GameEvent::MapChanged { .. }
    ));

    handle.step(PlayerAction::Move { dx: 1, dy: 0 }).await.unwrap();
    assert!(handle.status().await.unwrap().near_shop);
    assert_eq!(handle.shop_stock().await.unwrap()[1].item.name, "Iron Sword");
    assert!(matches!(handle.sell(0).await.unwrap(), Trade::Sold { price: 15, .. }));
    assert!(matches!(
        world_rx.try_recv().unwrap(),
        GameEvent::ItemSold { price: 15, .. }
    ));
    assert_eq!(handle.buy(1).await.unwrap(), Trade::NotEnoughGold);

    assert!(handle.unequip(EquipSlot::Armor).await.unwrap());
    assert!(handle.equip(0).await.unwrap());

    let back = handle.use_return_portal().await.unwrap();
    assert_eq!(back.to_string(), "You return through the portal!");
    assert_eq!(handle.status().await.unwrap().map_id, "world");

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_waits_for_outstanding_handles() {
    let runtime = runtime();
    let handle = runtime.handle();
    let outstanding = handle.clone();
    drop(handle);

    let shutdown = tokio::spawn(runtime.shutdown());
    assert!(outstanding.status().await.is_ok());
    drop(outstanding);
    shutdown.await.unwrap().unwrap();
}
