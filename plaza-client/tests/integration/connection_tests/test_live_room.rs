use crate::utils::*;
use plaza_client::{ConnectionEvent, NegotiationState};
use plaza_core::{RoomConfig, ServerMessage, SignalKind, SpawnPolicy};

fn fixed_spawn_config() -> RoomConfig {
    RoomConfig {
        spawn: SpawnPolicy::Fixed(SPAWN),
        ..RoomConfig::default()
    }
}

#[tokio::test]
async fn test_two_clients_negotiate_through_room() {
    init_tracing();
    let addr = spawn_room_server(fixed_spawn_config()).await;

    let mut a = LiveClient::connect(addr).await;
    assert!(matches!(a.pump().await, ServerMessage::Welcome { .. }));
    assert!(matches!(
        a.pump().await,
        ServerMessage::PlayerAdded { is_self: true, .. }
    ));
    let a_id = a.session.session.local_id().cloned().expect("a welcomed");

    let mut b = LiveClient::connect(addr).await;
    assert!(matches!(b.pump().await, ServerMessage::Welcome { .. }));
    let b_id = b.session.session.local_id().cloned().expect("b welcomed");
    // Existing participants first, then the joiner's own add.
    assert_eq!(
        b.pump().await,
        ServerMessage::PlayerAdded {
            session_id: a_id.clone(),
            position: SPAWN,
            is_self: false,
        }
    );
    assert_eq!(
        b.pump().await,
        ServerMessage::PlayerAdded {
            session_id: b_id.clone(),
            position: SPAWN,
            is_self: true,
        }
    );
    assert_eq!(
        a.pump().await,
        ServerMessage::PlayerAdded {
            session_id: b_id.clone(),
            position: SPAWN,
            is_self: false,
        }
    );

    let (initiator, responder, initiator_id, responder_id) = if a_id > b_id {
        (&mut a, &mut b, a_id.clone(), b_id.clone())
    } else {
        (&mut b, &mut a, b_id.clone(), a_id.clone())
    };

    match responder.pump().await {
        ServerMessage::Signal { from, kind, payload } => {
            assert_eq!(from, initiator_id);
            assert_eq!(kind, SignalKind::Offer);
            assert_eq!(payload, offer_for(&responder_id));
        }
        other => panic!("expected offer, got {:?}", other),
    }
    match initiator.pump().await {
        ServerMessage::Signal { from, kind, payload } => {
            assert_eq!(from, responder_id);
            assert_eq!(kind, SignalKind::Answer);
            assert_eq!(payload, answer_for(&initiator_id));
        }
        other => panic!("expected answer, got {:?}", other),
    }

    assert_eq!(
        initiator.session.session.negotiation_state(&responder_id),
        Some(NegotiationState::Stable)
    );
    assert_eq!(
        responder.session.session.negotiation_state(&initiator_id),
        Some(NegotiationState::Stable)
    );

    // A leaves; the room closes its socket normally and B tears A down.
    assert_eq!(a.session.session.leave().await.unwrap(), 1);
    assert_eq!(
        a.next_event().await,
        ConnectionEvent::Closed { code: Some(1000) }
    );
    assert_eq!(
        b.pump().await,
        ServerMessage::PlayerRemoved {
            session_id: a_id.clone(),
        }
    );
    assert!(b.session.session.peers().is_empty());
    assert!(!b.session.session.mirror().contains(&a_id));
}

#[tokio::test]
async fn test_full_room_closes_with_room_full() {
    init_tracing();
    let addr = spawn_room_server(RoomConfig {
        capacity: 1,
        ..fixed_spawn_config()
    })
    .await;

    let mut first = LiveClient::connect(addr).await;
    assert!(matches!(first.pump().await, ServerMessage::Welcome { .. }));

    let mut second = LiveClient::connect(addr).await;
    assert_eq!(
        second.next_event().await,
        ConnectionEvent::Closed { code: Some(4001) }
    );
}
