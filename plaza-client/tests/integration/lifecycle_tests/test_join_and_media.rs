use crate::utils::*;
use plaza_client::{InputStrategy, LocalMedia, MoveIntent};
use plaza_core::{ClientMessage, Position, RoomConfig, ServerMessage};

#[tokio::test]
async fn test_welcome_starts_local_media() {
    init_tracing();
    let test = TestSession::joined("b", MockBackend::new()).await;

    assert_eq!(test.session.local_id(), Some(&sid("b")));
    assert_eq!(test.session.local_media(), LocalMedia::Live);
    assert_eq!(test.backend.calls(), vec![BackendCall::StartMedia]);

    let (id, avatar) = test.session.mirror().local().expect("local avatar");
    assert_eq!(id, &sid("b"));
    assert_eq!(avatar.target, SPAWN);
    assert_eq!(avatar.rendered, SPAWN);
}

#[tokio::test]
async fn test_media_denial_does_not_block_session() {
    init_tracing();
    let backend = MockBackend::failing(Failures {
        media: true,
        ..Failures::default()
    });
    let mut test = TestSession::joined("b", backend).await;
    assert_eq!(test.session.local_media(), LocalMedia::Unavailable);

    test.deliver(added("a", false)).await;

    assert!(test.session.mirror().contains(&sid("a")));
    assert!(test.session.peers().contains(&sid("a")));
    assert!(matches!(
        test.drain_sent().as_slice(),
        [ClientMessage::Signal(_)]
    ));
}

#[tokio::test]
async fn test_welcome_applies_room_config() {
    init_tracing();
    let mut test = TestSession::new(MockBackend::new());
    let config = RoomConfig {
        keyboard_speed: 2.0,
        interpolation_factor: 0.5,
        ..RoomConfig::default()
    };

    test.deliver(ServerMessage::Welcome {
        session_id: sid("a"),
        config: config.clone(),
        ice_servers: Vec::new(),
    })
    .await;

    assert_eq!(test.session.config(), &config);
    assert_eq!(test.session.input(), InputStrategy::Keyboard { speed: 2.0 });
    assert_eq!(test.session.mirror().interpolation_factor(), 0.5);
}

#[tokio::test]
async fn test_moves_update_target_and_tick_smooths() {
    init_tracing();
    let mut test = TestSession::joined("a", MockBackend::new()).await;
    test.deliver(added("b", false)).await;

    let destination = Position::new(10.0, -1.0, 0.0);
    test.deliver(ServerMessage::PlayerMoved {
        session_id: sid("b"),
        position: destination,
    })
    .await;

    let avatar = *test.session.mirror().get(&sid("b")).expect("avatar");
    assert_eq!(avatar.target, destination);
    assert_eq!(avatar.rendered, SPAWN);

    test.session.tick();
    let rendered = test.session.mirror().get(&sid("b")).expect("avatar").rendered;
    assert!(rendered.x > 0.0 && rendered.x < 10.0);
}

#[tokio::test]
async fn test_step_input_requests_move() {
    init_tracing();
    let mut test = TestSession::joined("a", MockBackend::new()).await;
    test.drain_sent();

    let next = test
        .session
        .step_input(MoveIntent::new(1.0, 0.0))
        .unwrap()
        .expect("move requested");
    assert_eq!(next, Position::new(0.0, -1.0, -5.0));
    assert_eq!(test.drain_sent(), vec![ClientMessage::UpdatePosition(next)]);

    // Idle input sends nothing.
    assert_eq!(test.session.step_input(MoveIntent::default()).unwrap(), None);
    assert!(test.drain_sent().is_empty());
}

#[tokio::test]
async fn test_step_input_before_welcome_is_noop() {
    init_tracing();
    let mut test = TestSession::new(MockBackend::new());

    assert_eq!(test.session.step_input(MoveIntent::new(1.0, 1.0)).unwrap(), None);
    assert!(test.drain_sent().is_empty());
}

#[tokio::test]
async fn test_closed_outbound_is_reported() {
    init_tracing();
    let mut test = TestSession::joined("a", MockBackend::new()).await;
    drop(test.sent);

    assert!(test.session.ping(7).is_err());
}
