//! Recording view shared by the integration tests.

#![allow(dead_code)]

use chatsync_client::presence::TypingPresence;
use chatsync_client::{ChatView, IncomingMessage, ViewHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Error(String),
    Append(IncomingMessage),
    Delivered(ViewHandle),
    Typing(TypingPresence),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn delivered(&self) -> Vec<ViewHandle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Delivered(h) => Some(*h),
                _ => None,
            })
            .collect()
    }

    pub fn appended(&self) -> Vec<&IncomingMessage> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Append(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Error(e) => Some(e.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ChatView for RecordingView {
    fn display_error(&mut self, message: &str) {
        self.calls.push(ViewCall::Error(message.to_owned()));
    }

    fn append_incoming_message(&mut self, msg: &IncomingMessage) {
        self.calls.push(ViewCall::Append(msg.clone()));
    }

    fn mark_delivered(&mut self, handle: ViewHandle) {
        self.calls.push(ViewCall::Delivered(handle));
    }

    fn typing_changed(&mut self, presence: &TypingPresence) {
        self.calls.push(ViewCall::Typing(presence.clone()));
    }
}
