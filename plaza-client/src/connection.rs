use crate::ClientError;
use futures::{SinkExt, StreamExt};
use plaza_core::{ClientMessage, ServerMessage, WireMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// What the reader task hands to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Message(ServerMessage),
    /// The room closed the socket, or it dropped. `code` is the close code
    /// when the room sent one.
    Closed { code: Option<u16> },
}

/// Opens a room connection and spawns its reader and writer tasks.
///
/// Frames pushed into the returned sender are written in order; incoming
/// frames and the final close arrive on the receiver.
pub async fn connect(
    url: &str,
) -> Result<
    (
        mpsc::UnboundedSender<ClientMessage>,
        mpsc::UnboundedReceiver<ConnectionEvent>,
    ),
    ClientError,
> {
    let (stream, _) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    info!("Connected to {}", url);

    let (mut ws_writer, mut ws_reader) = stream.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientMessage>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ConnectionEvent>();

    tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let json = match msg.encode() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize client message: {}", e);
                    continue;
                }
            };
            if ws_writer.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_writer.close().await;
    });

    tokio::spawn(async move {
        let mut code = None;
        while let Some(frame) = ws_reader.next().await {
            match frame {
                Ok(Message::Text(text)) => match ServerMessage::decode(text.as_str()) {
                    Ok(msg) => {
                        if event_tx.send(ConnectionEvent::Message(msg)).is_err() {
                            return;
                        }
                    }
                    Err(e) => warn!("Invalid frame from room: {}", e),
                },
                Ok(Message::Close(frame)) => {
                    code = frame.map(|f| u16::from(f.code));
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Room connection error: {}", e);
                    break;
                }
            }
        }
        let _ = event_tx.send(ConnectionEvent::Closed { code });
    });

    Ok((out_tx, event_rx))
}
