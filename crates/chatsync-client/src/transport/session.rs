//! Session loop: the single task that owns the engine.
//!
//! Inbound frames and outbox commands are handled one at a time, each to
//! completion, in the order they are received. Nothing else mutates the
//! pending set or typing state, so no locking is involved.

use tokio::sync::{mpsc, oneshot};

use chatsync_core::error::{ChatSyncError, Result};
use chatsync_core::protocol::OutboundFrame;

use crate::engine::ChatEngine;
use crate::reconcile::{DeliveryBoard, DeliveryStatus, PendingId};
use crate::transport::codec::InboundFrame;
use crate::transport::link::Transport;
use crate::view::{ChatView, IdentityProvider, ViewHandle};

/// Work requested by the send path.
#[derive(Debug)]
pub enum Command {
    /// Register `content` as pending for `handle`, then send it.
    Send {
        content: String,
        handle: ViewHandle,
        reply: oneshot::Sender<Result<PendingId>>,
    },
    /// Tell the server whether the viewer is typing.
    Typing(bool),
}

/// Send-path handle. Cheap to clone; usable from any task.
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::Sender<Command>,
    board: DeliveryBoard,
}

impl Outbox {
    /// Register an optimistically rendered message and send it.
    ///
    /// Resolves once the frame is handed to the transport. If the transport
    /// refuses the frame, nothing stays pending and the error is returned.
    pub async fn send_message(
        &self,
        content: impl Into<String>,
        handle: ViewHandle,
    ) -> Result<PendingId> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Send {
                content: content.into(),
                handle,
                reply,
            })
            .await
            .map_err(|_| ChatSyncError::ChannelClosed)?;
        rx.await.map_err(|_| ChatSyncError::ChannelClosed)?
    }

    pub async fn set_typing(&self, is_typing: bool) -> Result<()> {
        self.tx
            .send(Command::Typing(is_typing))
            .await
            .map_err(|_| ChatSyncError::ChannelClosed)
    }

    pub fn status(&self, id: PendingId) -> Option<DeliveryStatus> {
        self.board.status(id)
    }

    pub fn board(&self) -> &DeliveryBoard {
        &self.board
    }
}

/// Create the outbox for `engine`; pass the receiver to `run_session`.
pub fn outbox<V, I>(
    engine: &ChatEngine<V, I>,
    capacity: usize,
) -> (Outbox, mpsc::Receiver<Command>)
where
    V: ChatView,
    I: IdentityProvider,
{
    let (tx, rx) = mpsc::channel(capacity);
    (
        Outbox {
            tx,
            board: engine.board(),
        },
        rx,
    )
}

/// Drive `engine` until the transport closes.
///
/// Returns the engine on a clean close. A failed transport write ends the
/// session with an error; malformed inbound frames never do.
pub async fn run_session<V, I, T>(
    mut engine: ChatEngine<V, I>,
    mut transport: T,
    mut commands: mpsc::Receiver<Command>,
) -> Result<ChatEngine<V, I>>
where
    V: ChatView,
    I: IdentityProvider,
    T: Transport,
{
    let mut outbox_open = true;

    loop {
        tokio::select! {
            frame = transport.recv() => {
                match frame {
                    Some(InboundFrame::Close) | None => {
                        tracing::debug!("transport closed");
                        break;
                    }
                    Some(frame) => {
                        engine.ingest(frame);
                    }
                }
            }

            cmd = commands.recv(), if outbox_open => {
                match cmd {
                    Some(cmd) => handle_command(&mut engine, &mut transport, cmd).await?,
                    None => outbox_open = false,
                }
            }
        }
    }

    Ok(engine)
}

async fn handle_command<V, I, T>(
    engine: &mut ChatEngine<V, I>,
    transport: &mut T,
    cmd: Command,
) -> Result<()>
where
    V: ChatView,
    I: IdentityProvider,
    T: Transport,
{
    match cmd {
        Command::Send { content, handle, reply } => {
            let frame = OutboundFrame::message(content.as_str()).encode()?;
            let id = match engine.register_pending(content, handle) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(error = %e, handle = handle.0, "pending registration refused");
                    let _ = reply.send(Err(e));
                    return Ok(());
                }
            };
            // the echo cannot be ingested before this send returns
            if let Err(e) = transport.send(frame).await {
                engine.withdraw_pending(id);
                let _ = reply.send(Err(ChatSyncError::Transport(e.to_string())));
                return Err(e);
            }
            let _ = reply.send(Ok(id));
        }
        Command::Typing(is_typing) => {
            transport.send(OutboundFrame::typing(is_typing).encode()?).await?;
        }
    }
    Ok(())
}
