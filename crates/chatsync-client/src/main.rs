//! chatsync replay tool
//!
//! Usage: `chatsync-replay <viewer_id> [config.yaml] < frames.log`
//! - `> text` lines register an optimistic send of `text`
//! - any other non-empty line is an inbound server frame
//! - view callbacks are logged; metrics are printed on exit

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use chatsync_client::{
    config::{self, ClientConfig},
    presence::TypingPresence,
    transport::{self, ChannelPeer, ChannelTransport, InboundFrame},
    ChatEngine, ChatView, IncomingMessage, ViewHandle,
};
use chatsync_core::error::{ChatSyncError, Result};
use chatsync_core::protocol::UserId;

#[derive(Default)]
struct LogView;

impl ChatView for LogView {
    fn display_error(&mut self, message: &str) {
        tracing::info!(%message, "view: error banner");
    }

    fn append_incoming_message(&mut self, msg: &IncomingMessage) {
        tracing::info!(
            sender_id = ?msg.sender_id,
            sender_name = ?msg.sender_name,
            message = ?msg.message,
            "view: append incoming"
        );
    }

    fn mark_delivered(&mut self, handle: ViewHandle) {
        tracing::info!(handle = handle.0, "view: delivered");
    }

    fn typing_changed(&mut self, presence: &TypingPresence) {
        match presence {
            TypingPresence::Hidden => tracing::info!("view: typing hidden"),
            TypingPresence::Visible { user_name, .. } => {
                tracing::info!(%user_name, "view: typing visible")
            }
        }
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = %e.code().as_str(), error = %e, "replay failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let viewer = args.next().ok_or_else(|| {
        ChatSyncError::BadRequest("usage: chatsync-replay <viewer_id> [config.yaml]".into())
    })?;
    let cfg = match args.next() {
        Some(path) => config::load_from_file(&path)?,
        None => ClientConfig::default(),
    };

    let engine = ChatEngine::new(&cfg.engine, LogView, UserId::from(viewer));
    let metrics = engine.metrics();
    let (outbox, commands) = transport::outbox(&engine, cfg.session.outbox_capacity);
    let (link, peer) = ChannelTransport::pair(cfg.session.outbox_capacity);
    let ChannelPeer { tx, mut rx } = peer;

    let session = tokio::spawn(transport::run_session(engine, link, commands));
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            tracing::info!(%frame, "outbound frame");
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_handle = 1u64;
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| ChatSyncError::Internal(format!("read stdin failed: {e}")))?
    {
        if let Some(text) = line.strip_prefix("> ") {
            let id = outbox.send_message(text, ViewHandle(next_handle)).await?;
            tracing::info!(pending = id.0, handle = next_handle, "registered optimistic send");
            next_handle += 1;
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        tx.send(InboundFrame::Text(line))
            .await
            .map_err(|_| ChatSyncError::ChannelClosed)?;
    }

    tx.send(InboundFrame::Close)
        .await
        .map_err(|_| ChatSyncError::ChannelClosed)?;
    drop(outbox);

    let engine = session
        .await
        .map_err(|e| ChatSyncError::Internal(format!("session task failed: {e}")))??;
    let _ = writer.await;

    tracing::info!(still_pending = engine.board().pending_count(), "replay finished");
    print!("{}", metrics.render());
    Ok(())
}
