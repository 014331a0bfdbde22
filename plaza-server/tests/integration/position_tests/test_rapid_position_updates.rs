use plaza_core::Position;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{settle, sid};

#[tokio::test]
async fn test_last_update_wins() {
    init_tracing();

    let (room, _output) = create_test_room();
    room.join(sid("a")).await.unwrap();

    room.update_position(sid("a"), Position::new(10.0, 0.0, 20.0))
        .await
        .unwrap();
    room.update_position(sid("a"), Position::new(-300.0, 0.0, 7.5))
        .await
        .unwrap();

    let players = settle(&room).await;
    assert_eq!(players[0].position, Position::new(-245.0, -1.0, 7.5));
}

#[tokio::test]
async fn test_rapid_position_updates_arrive_in_order() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    room.join(sid("b")).await.unwrap();
    settle(&room).await;
    output.clear();

    for i in 0..100 {
        room.update_position(sid("a"), Position::new(i as f64, 0.0, -(i as f64)))
            .await
            .unwrap();
    }
    settle(&room).await;

    let xs: Vec<f64> = output
        .received_by(&sid("b"))
        .into_iter()
        .map(|msg| match msg {
            plaza_core::ServerMessage::PlayerMoved { position, .. } => position.x,
            other => panic!("unexpected frame {:?}", other),
        })
        .collect();
    let expected: Vec<f64> = (0..100).map(|i| i as f64).collect();
    assert_eq!(xs, expected);
}
