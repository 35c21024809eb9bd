//! Websocket transport for [`HostChannel`].

use std::net::TcpStream;

use rushlane_kernel::host::HostStateV1;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use crate::channel::{ChannelError, HostChannel, OutboundMessage};

/// Blocking websocket connection to the host's player endpoint.
pub struct WebSocketChannel {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl WebSocketChannel {
    /// Open a connection to `url` (e.g. `ws://localhost:8000/player`).
    ///
    /// # Errors
    ///
    /// [`ChannelError::Transport`] if the handshake fails.
    pub fn connect(url: &str) -> Result<Self, ChannelError> {
        let (socket, response) = tungstenite::connect(url).map_err(channel_error)?;
        log::debug!("connected to {url} (status {})", response.status());
        Ok(Self { socket })
    }
}

impl HostChannel for WebSocketChannel {
    fn send(&mut self, message: &OutboundMessage) -> Result<(), ChannelError> {
        self.socket
            .send(Message::Text(message.to_json()))
            .map_err(channel_error)
    }

    fn recv(&mut self) -> Result<HostStateV1, ChannelError> {
        loop {
            let text = match self.socket.read().map_err(channel_error)? {
                Message::Text(text) => text,
                Message::Binary(bytes) => {
                    String::from_utf8(bytes).map_err(|e| ChannelError::Decode {
                        detail: e.to_string(),
                    })?
                }
                Message::Close(frame) => {
                    log::debug!("close frame: {frame:?}");
                    return Err(ChannelError::Closed);
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            };
            return HostStateV1::from_json(&text).map_err(|e| ChannelError::Decode {
                detail: e.to_string(),
            });
        }
    }
}

fn channel_error(e: tungstenite::Error) -> ChannelError {
    match e {
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
            ChannelError::Closed
        }
        other => ChannelError::Transport {
            detail: other.to_string(),
        },
    }
}
