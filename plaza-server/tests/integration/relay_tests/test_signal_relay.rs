use plaza_core::{ClientMessage, ServerMessage, SignalEnvelope, SignalKind, WireMessage};
use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{settle, sid};

#[tokio::test]
async fn test_offer_is_relayed_once_and_verbatim() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    room.join(sid("b")).await.unwrap();
    settle(&room).await;
    output.clear();

    let payload = json!({"type": "offer", "sdp": "v=0\r\no=- 42 2 IN IP4 127.0.0.1\r\n"});
    room.signal(
        sid("a"),
        SignalEnvelope {
            to: sid("b"),
            kind: SignalKind::Offer,
            payload: payload.clone(),
        },
    )
    .await
    .unwrap();
    settle(&room).await;

    assert_eq!(
        output.received_by(&sid("b")),
        vec![ServerMessage::Signal {
            from: sid("a"),
            kind: SignalKind::Offer,
            payload,
        }]
    );
    assert!(output.received_by(&sid("a")).is_empty());
}

#[tokio::test]
async fn test_spoofed_from_is_replaced_by_sender() {
    init_tracing();

    let (room, output) = create_test_room();
    for id in ["a", "b", "c"] {
        room.join(sid(id)).await.unwrap();
    }
    settle(&room).await;
    output.clear();

    let frame = r#"{"op":"signal","d":{"to":"b","from":"c","type":"answer","payload":"sdp"}}"#;
    let ClientMessage::Signal(envelope) = ClientMessage::decode(frame).unwrap() else {
        panic!("expected a signal frame");
    };
    room.signal(sid("a"), envelope).await.unwrap();
    settle(&room).await;

    let to_b = output.received_by(&sid("b"));
    assert_eq!(to_b.len(), 1);
    assert!(matches!(
        &to_b[0],
        ServerMessage::Signal { from, kind: SignalKind::Answer, .. } if *from == sid("a")
    ));
}

#[tokio::test]
async fn test_signal_to_unknown_target_is_dropped() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    settle(&room).await;
    output.clear();

    room.signal(
        sid("a"),
        SignalEnvelope {
            to: sid("nobody"),
            kind: SignalKind::Offer,
            payload: json!(null),
        },
    )
    .await
    .unwrap();
    settle(&room).await;

    assert_eq!(output.total(), 0);
}

#[tokio::test]
async fn test_mixed_signal_types_keep_order() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    room.join(sid("b")).await.unwrap();
    settle(&room).await;
    output.clear();

    let kinds = [
        SignalKind::Offer,
        SignalKind::Candidate,
        SignalKind::Candidate,
        SignalKind::Answer,
    ];
    for (i, kind) in kinds.iter().enumerate() {
        room.signal(
            sid("a"),
            SignalEnvelope {
                to: sid("b"),
                kind: *kind,
                payload: json!(i),
            },
        )
        .await
        .unwrap();
    }
    settle(&room).await;

    let relayed: Vec<(SignalKind, serde_json::Value)> = output
        .received_by(&sid("b"))
        .into_iter()
        .filter_map(|msg| match msg {
            ServerMessage::Signal { kind, payload, .. } => Some((kind, payload)),
            _ => None,
        })
        .collect();
    assert_eq!(
        relayed,
        kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (*k, json!(i)))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_ping_is_answered_to_sender_only() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    room.join(sid("b")).await.unwrap();
    settle(&room).await;
    output.clear();

    room.ping(sid("a"), 1234).await.unwrap();
    settle(&room).await;

    assert_eq!(
        output.received_by(&sid("a")),
        vec![ServerMessage::Pong { timestamp: 1234 }]
    );
    assert!(output.received_by(&sid("b")).is_empty());
}
