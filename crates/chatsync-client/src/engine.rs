//! Per-conversation engine: classifier, reconciler, and typing tracker wired
//! to the view layer.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use chatsync_core::error::{ErrorCode, Result};
use chatsync_core::protocol::Envelope;

use crate::config::EngineSection;
use crate::dispatch::{classify, Route};
use crate::obs::EngineMetrics;
use crate::presence::{TypingPresence, TypingTracker, TypingUpdate};
use crate::reconcile::{DeliveryBoard, PendingId, PendingSet};
use crate::transport::codec::{decode_frame, InboundFrame};
use crate::view::{ChatView, IdentityProvider, ViewHandle};

const PREVIEW_CHARS: usize = 120;

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not decodable; logged and dropped.
    Discarded(ErrorCode),
    ServerError,
    Typing(TypingUpdate),
    /// Self-echo that delivered this many pending entries (at least one).
    Delivered(usize),
    /// Self-echo with no pending counterpart.
    EchoUnmatched,
    Incoming,
}

impl FrameOutcome {
    pub fn as_label(&self) -> &'static str {
        match self {
            FrameOutcome::Discarded(_) => "discarded",
            FrameOutcome::ServerError => "server_error",
            FrameOutcome::Typing(TypingUpdate::Ignored) => "typing_ignored",
            FrameOutcome::Typing(_) => "typing",
            FrameOutcome::Delivered(_) => "delivered",
            FrameOutcome::EchoUnmatched => "echo_unmatched",
            FrameOutcome::Incoming => "incoming",
        }
    }
}

pub struct ChatEngine<V, I> {
    view: V,
    identity: I,
    typing: TypingTracker,
    pending: PendingSet,
    max_frame_bytes: usize,
    metrics: Arc<EngineMetrics>,
}

impl<V, I> ChatEngine<V, I>
where
    V: ChatView,
    I: IdentityProvider,
{
    pub fn new(cfg: &EngineSection, view: V, identity: I) -> Self {
        Self {
            view,
            identity,
            typing: TypingTracker::new(cfg.typing_mode),
            pending: PendingSet::new(cfg.match_policy),
            max_frame_bytes: cfg.max_frame_bytes,
            metrics: Arc::new(EngineMetrics::default()),
        }
    }

    /// Handle one raw frame. Never fails: undecodable frames are logged and
    /// dropped so the next frame is processed normally.
    pub fn ingest(&mut self, frame: InboundFrame) -> FrameOutcome {
        let outcome = match decode_frame(&frame, self.max_frame_bytes) {
            Ok(env) => self.apply(env),
            Err(e) if e.is_frame_local() => {
                tracing::warn!(
                    code = %e.code().as_str(),
                    error = %e,
                    raw = %frame.preview(PREVIEW_CHARS),
                    "frame discarded"
                );
                FrameOutcome::Discarded(e.code())
            }
            Err(e) => {
                tracing::error!(code = %e.code().as_str(), error = %e, "frame rejected");
                FrameOutcome::Discarded(e.code())
            }
        };
        self.metrics.record_frame(outcome.as_label());
        outcome
    }

    pub fn ingest_text(&mut self, raw: impl Into<String>) -> FrameOutcome {
        self.ingest(InboundFrame::Text(raw.into()))
    }

    fn apply(&mut self, env: Envelope) -> FrameOutcome {
        let viewer = self.identity.viewer_id();
        let route = classify(env, &viewer);
        tracing::debug!(route = route.as_str(), viewer = %viewer, "envelope classified");

        match route {
            Route::ServerError(text) => {
                tracing::info!(error = %text, "server reported error");
                self.view.display_error(&text);
                FrameOutcome::ServerError
            }
            Route::Typing(signal) => {
                let update = self.typing.apply(&signal, &viewer);
                if update == TypingUpdate::Changed {
                    self.view.typing_changed(self.typing.current());
                }
                FrameOutcome::Typing(update)
            }
            Route::SelfEcho { message } => {
                let Some(text) = message else {
                    tracing::debug!("self-echo without message");
                    return FrameOutcome::EchoUnmatched;
                };
                let delivered = self.pending.reconcile(&text, &mut self.view);
                if delivered == 0 {
                    tracing::debug!("self-echo matched no pending message");
                    return FrameOutcome::EchoUnmatched;
                }
                self.metrics
                    .delivered
                    .fetch_add(delivered as u64, Ordering::Relaxed);
                self.metrics.pending.add(-(delivered as i64));
                FrameOutcome::Delivered(delivered)
            }
            Route::Peer(msg) => {
                self.view.append_incoming_message(&msg);
                FrameOutcome::Incoming
            }
        }
    }

    /// Registrar entry for the send path.
    pub fn register_pending(
        &mut self,
        content: impl Into<String>,
        handle: ViewHandle,
    ) -> Result<PendingId> {
        let id = self.pending.register(content, handle)?;
        self.metrics.pending.add(1);
        Ok(id)
    }

    /// Drop a pending entry whose frame never reached the server.
    pub fn withdraw_pending(&mut self, id: PendingId) -> bool {
        let removed = self.pending.withdraw(id);
        if removed {
            self.metrics.pending.add(-1);
        }
        removed
    }

    pub fn typing(&self) -> &TypingPresence {
        self.typing.current()
    }

    pub fn pending(&self) -> &PendingSet {
        &self.pending
    }

    pub fn board(&self) -> DeliveryBoard {
        self.pending.board()
    }

    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
