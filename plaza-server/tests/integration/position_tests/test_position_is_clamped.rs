use plaza_core::Position;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{moved, settle, sid};

#[tokio::test]
async fn test_position_is_clamped() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    room.join(sid("b")).await.unwrap();
    settle(&room).await;
    output.clear();

    room.update_position(sid("a"), Position::new(9999.0, 5.0, -9999.0))
        .await
        .unwrap();

    let players = settle(&room).await;
    let expected = Position::new(245.0, -1.0, -245.0);
    assert_eq!(players[0].position, expected);

    // Everybody, the mover included, sees the clamped value.
    assert_eq!(output.take_for(&sid("a")), vec![moved("a", expected)]);
    assert_eq!(output.take_for(&sid("b")), vec![moved("a", expected)]);
}

#[tokio::test]
async fn test_update_from_absent_session_is_ignored() {
    init_tracing();

    let (room, output) = create_test_room();
    room.join(sid("a")).await.unwrap();
    settle(&room).await;
    output.clear();

    room.update_position(sid("ghost"), Position::new(1.0, 1.0, 1.0))
        .await
        .unwrap();

    let players = settle(&room).await;
    assert_eq!(players.len(), 1);
    assert_eq!(output.total(), 0);
}
