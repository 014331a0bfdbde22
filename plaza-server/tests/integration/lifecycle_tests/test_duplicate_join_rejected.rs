use plaza_core::Position;
use plaza_server::RoomError;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{settle, sid};

#[tokio::test]
async fn test_duplicate_join_rejected() {
    init_tracing();

    let (room, output) = create_test_room();

    room.join(sid("a")).await.unwrap();
    room.update_position(sid("a"), Position::new(10.0, 0.0, 10.0))
        .await
        .unwrap();
    settle(&room).await;
    let frames_before = output.total();

    let second = room.join(sid("a")).await;

    assert_eq!(second, Err(RoomError::DuplicateSession(sid("a"))));
    let players = settle(&room).await;
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].position, Position::new(10.0, -1.0, 10.0));
    assert_eq!(output.total(), frames_before, "rejected join must not broadcast");
}

#[tokio::test]
async fn test_rejoin_after_leave_is_allowed() {
    init_tracing();

    let (room, _output) = create_test_room();

    room.join(sid("a")).await.unwrap();
    room.leave(sid("a")).await.unwrap();

    assert!(room.join(sid("a")).await.is_ok());
    assert_eq!(settle(&room).await.len(), 1);
}
