use crate::transport::{
    CLOSE_DUPLICATE_SESSION, CLOSE_INTERNAL_ERROR, CLOSE_NORMAL, CLOSE_ROOM_FULL,
};
use crate::{Outbound, RoomError, SignalingService};
use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use plaza_core::{ClientMessage, SessionId, WireMessage};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const WRITER_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let (mut sender, mut receiver) = socket.split();

    let Some(_seat) = service.try_admit() else {
        info!("Rejecting connection, room is full");
        let _ = send_close(&mut sender, CLOSE_ROOM_FULL, "room full").await;
        return;
    };

    let session_id = SessionId::generate();
    info!("New WebSocket connection: {}", session_id);

    let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();

    // Welcome goes into the queue before the room can broadcast anything.
    let _ = tx.send(Outbound::Message(service.welcome(session_id.clone())));
    service.registry().register(session_id.clone(), tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            match outbound {
                Outbound::Message(msg) => match msg.encode() {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!("Failed to serialize server message: {}", e),
                },
                Outbound::Close { code, reason } => {
                    let _ = send_close(&mut sender, code, reason).await;
                    break;
                }
            }
        }
    });

    if let Err(e) = service.room().join(session_id.clone()).await {
        let code = match e {
            RoomError::DuplicateSession(_) => CLOSE_DUPLICATE_SESSION,
            RoomError::RoomClosed => CLOSE_INTERNAL_ERROR,
        };
        warn!("Join failed for {}: {}", session_id, e);
        service.registry().close(&session_id, code, "join rejected");
        service.registry().unregister(&session_id);
        let _ = tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut send_task).await;
        return;
    }

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let session_id = session_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match ClientMessage::decode(&text) {
                        Ok(ClientMessage::Leave) => {
                            info!("{} asked to leave", session_id);
                            service.registry().close(&session_id, CLOSE_NORMAL, "left");
                            break;
                        }
                        Ok(msg) => {
                            if let Err(e) = dispatch(&service, &session_id, msg).await {
                                error!("Room died: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid frame from {}: {}", session_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    let writer_done = tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
            true
        }
        _ = (&mut recv_task) => false,
    };

    // Disconnects and explicit leaves converge here; the room ignores a
    // leave for a session it no longer holds.
    service.registry().unregister(&session_id);
    if let Err(e) = service.room().leave(session_id.clone()).await {
        error!("Failed to report leave for {}: {}", session_id, e);
    }

    // A finished JoinHandle must not be polled again.
    if !writer_done
        && tokio::time::timeout(WRITER_DRAIN_TIMEOUT, &mut send_task)
            .await
            .is_err()
    {
        send_task.abort();
    }

    info!("WebSocket disconnected: {}", session_id);
}

async fn dispatch(
    service: &SignalingService,
    session_id: &SessionId,
    msg: ClientMessage,
) -> Result<(), RoomError> {
    let room = service.room();
    match msg {
        ClientMessage::UpdatePosition(position) => {
            room.update_position(session_id.clone(), position).await
        }
        ClientMessage::Signal(envelope) => {
            debug!("{} -> {} {:?}", session_id, envelope.to, envelope.kind);
            room.signal(session_id.clone(), envelope).await
        }
        ClientMessage::Ping { timestamp } => room.ping(session_id.clone(), timestamp).await,
        ClientMessage::Leave => Ok(()),
    }
}

async fn send_close(
    sender: &mut SplitSink<WebSocket, Message>,
    code: u16,
    reason: &'static str,
) -> Result<(), axum::Error> {
    sender
        .send(Message::Close(Some(CloseFrame {
            code,
            reason: Utf8Bytes::from_static(reason),
        })))
        .await
}
