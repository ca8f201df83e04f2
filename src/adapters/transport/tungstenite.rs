//! Production WebSocket transport.
//!
//! Thin adapter over `tokio-tungstenite`: JSON control messages go out
//! as text frames, inbound text frames come back raw for the dispatcher
//! to decode. The bearer token rides the connection handshake as an
//! `Authorization` header.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use secrecy::ExposeSecret;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::domain::events::ClientMessage;
use crate::ports::{ConnectParams, Transport, TransportConnection, TransportError};

/// Connects over real WebSockets.
pub struct WebSocketTransport;

impl WebSocketTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebSocketTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn connect(
        &self,
        params: &ConnectParams,
    ) -> Result<Box<dyn TransportConnection>, TransportError> {
        let mut request = params
            .url
            .as_str()
            .into_client_request()
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        if let Some(token) = &params.bearer {
            let value = format!("Bearer {}", token.expose_secret())
                .parse()
                .map_err(|_| TransportError::Connect("bearer token is not a valid header".to_string()))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let (stream, _response) = connect_async(request)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        tracing::debug!(url = params.url, "WebSocket handshake complete");
        Ok(Box::new(WebSocketConnection { stream }))
    }
}

struct WebSocketConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl TransportConnection for WebSocketConnection {
    async fn send(&mut self, message: &ClientMessage) -> Result<(), TransportError> {
        let payload =
            serde_json::to_string(message).map_err(|e| TransportError::Encode(e.to_string()))?;
        self.stream
            .send(Message::Text(payload.into()))
            .await
            .map_err(|e| TransportError::Io(e.to_string()))
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text.as_str().to_owned())),
                Ok(Message::Close(_)) => return None,
                // Pings are answered by the library on the next read;
                // binary frames are not part of this protocol.
                Ok(_) => continue,
                Err(e) => return Some(Err(TransportError::Io(e.to_string()))),
            }
        }
    }

    async fn close(&mut self) {
        if let Err(error) = self.stream.close(None).await {
            tracing::debug!(%error, "WebSocket close handshake failed");
        }
    }
}
