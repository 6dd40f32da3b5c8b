//! `Transport` trait and the two stock implementations.

use async_trait::async_trait;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::sync::mpsc;

use chatsync_core::error::{ChatSyncError, Result};

use crate::transport::codec::InboundFrame;

/// Connection as seen by the session loop.
#[async_trait]
pub trait Transport: Send {
    /// Next inbound frame; `None` once the connection is gone.
    async fn recv(&mut self) -> Option<InboundFrame>;
    /// Write one outbound text frame.
    async fn send(&mut self, frame: String) -> Result<()>;
}

/// In-process transport backed by a pair of tokio channels.
pub struct ChannelTransport {
    inbound: mpsc::Receiver<InboundFrame>,
    outbound: mpsc::Sender<String>,
}

/// The connection-manager side of a `ChannelTransport`.
pub struct ChannelPeer {
    pub tx: mpsc::Sender<InboundFrame>,
    pub rx: mpsc::Receiver<String>,
}

impl ChannelTransport {
    pub fn pair(capacity: usize) -> (ChannelTransport, ChannelPeer) {
        let (in_tx, in_rx) = mpsc::channel(capacity);
        let (out_tx, out_rx) = mpsc::channel(capacity);
        (
            ChannelTransport {
                inbound: in_rx,
                outbound: out_tx,
            },
            ChannelPeer { tx: in_tx, rx: out_rx },
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn recv(&mut self) -> Option<InboundFrame> {
        self.inbound.recv().await
    }

    async fn send(&mut self, frame: String) -> Result<()> {
        self.outbound
            .send(frame)
            .await
            .map_err(|_| ChatSyncError::Transport("outbound channel closed".into()))
    }
}

/// Adapter over any frame stream plus text sink (e.g. a split websocket).
pub struct StreamTransport<St, Si> {
    inbound: St,
    outbound: Si,
}

impl<St, Si> StreamTransport<St, Si> {
    pub fn new(inbound: St, outbound: Si) -> Self {
        Self { inbound, outbound }
    }
}

#[async_trait]
impl<St, Si> Transport for StreamTransport<St, Si>
where
    St: Stream<Item = InboundFrame> + Unpin + Send,
    Si: Sink<String> + Unpin + Send,
    Si::Error: std::fmt::Display,
{
    async fn recv(&mut self) -> Option<InboundFrame> {
        self.inbound.next().await
    }

    async fn send(&mut self, frame: String) -> Result<()> {
        self.outbound
            .send(frame)
            .await
            .map_err(|e| ChatSyncError::Transport(e.to_string()))
    }
}
