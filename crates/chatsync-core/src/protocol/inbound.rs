//! Inbound envelope (JSON text frame pushed by the server).
//!
//! Every field is optional; the kind is derived from which fields are present.
//! Fields are decoded along the priority chain and only as far as the winning
//! path needs them, so a field the frame never acts on cannot make it
//! undecodable. Unknown fields are ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ChatSyncError, Result};
use crate::protocol::ids::UserId;

/// One decoded server frame.
///
/// Once `error` is set the remaining fields stay `None`; likewise `typing`
/// leaves the content fields unset.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Server-reported error text.
    pub error: Option<String>,
    /// Typing presence of some participant.
    pub typing: Option<TypingSignal>,
    /// Author of a content envelope.
    pub sender_id: Option<UserId>,
    pub sender_name: Option<String>,
    /// Message body of a content envelope.
    pub message: Option<String>,
    /// Account type of the author ("client", "expert", ...). Non-string values read as absent.
    pub sender_type: Option<String>,
    /// Server timestamp (ISO-8601), passed through untouched. Non-string values read as absent.
    pub timestamp: Option<String>,
}

/// `typing` record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypingSignal {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub user_name: Option<String>,
    /// A record without the flag reads as "stopped typing".
    #[serde(default)]
    pub is_typing: bool,
}

impl TypingSignal {
    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or_default()
    }

    /// True when the signal was produced by `viewer` (an echo of our own typing).
    pub fn is_from(&self, viewer: &UserId) -> bool {
        self.user_id.as_ref() == Some(viewer)
    }
}

/// Viewer-independent envelope kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Error,
    Typing,
    Content,
}

impl EnvelopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EnvelopeKind::Error => "error",
            EnvelopeKind::Typing => "typing",
            EnvelopeKind::Content => "content",
        }
    }
}

impl Envelope {
    /// Priority chain, first match wins: error, then typing, then content.
    ///
    /// An envelope carrying both `error` and `typing` is an error: error
    /// signals are never suppressed by anything else in the frame.
    pub fn kind(&self) -> EnvelopeKind {
        if self.error.is_some() {
            EnvelopeKind::Error
        } else if self.typing.is_some() {
            EnvelopeKind::Typing
        } else {
            EnvelopeKind::Content
        }
    }
}

impl Envelope {
    fn from_fields(mut fields: Map<String, Value>) -> Result<Self> {
        let error = take(&mut fields, "error")?;
        if error.is_some() {
            return Ok(Envelope { error, ..Envelope::default() });
        }

        let typing = take(&mut fields, "typing")?;
        if typing.is_some() {
            return Ok(Envelope { typing, ..Envelope::default() });
        }

        Ok(Envelope {
            sender_id: take(&mut fields, "sender_id")?,
            sender_name: take(&mut fields, "sender_name")?,
            message: take(&mut fields, "message")?,
            sender_type: take_text(&mut fields, "sender_type"),
            timestamp: take_text(&mut fields, "timestamp"),
            ..Envelope::default()
        })
    }
}

/// Absent and `null` both read as `None`; any other value must match `T`.
fn take<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Result<Option<T>> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| ChatSyncError::Decode(format!("field `{key}`: {e}"))),
    }
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Decode a text frame. The top level must be a JSON object.
pub fn decode_envelope(raw: &str) -> Result<Envelope> {
    let fields: Map<String, Value> = serde_json::from_str(raw)
        .map_err(|e| ChatSyncError::Decode(format!("invalid envelope json: {e}")))?;
    Envelope::from_fields(fields)
}

/// Decode a frame delivered as raw bytes (validates UTF-8 first).
pub fn decode_envelope_slice(raw: &[u8]) -> Result<Envelope> {
    let s = std::str::from_utf8(raw).map_err(|e| ChatSyncError::InvalidUtf8(e.to_string()))?;
    decode_envelope(s)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn error_beats_typing() {
        let env = decode_envelope(
            r#"{"error":"nope","typing":{"user_id":"u3","user_name":"Bo","is_typing":true}}"#,
        )
        .unwrap();
        assert_eq!(env.kind(), EnvelopeKind::Error);
    }

    #[test]
    fn null_fields_are_absent() {
        let raw = r#"{"error":null,"typing":null,"sender_id":"u1","message":"hi"}"#;
        let env = decode_envelope(raw).unwrap();
        assert_eq!(env.kind(), EnvelopeKind::Content);
    }

    #[test]
    fn empty_error_string_is_still_an_error() {
        let env = decode_envelope(r#"{"error":""}"#).unwrap();
        assert_eq!(env.kind(), EnvelopeKind::Error);
    }

    #[test]
    fn arrays_are_rejected() {
        let err = decode_envelope("[]").unwrap_err();
        assert_eq!(err.code().as_str(), "DECODE_FAILED");
    }

    #[test]
    fn typing_must_be_a_record() {
        assert!(decode_envelope(r#"{"typing": true}"#).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let env = decode_envelope(r#"{"sender_id":7,"message":"yo","room":"r1","v":2}"#).unwrap();
        assert_eq!(env.sender_id, Some(UserId::from("7")));
    }

    #[test]
    fn scalars_are_rejected() {
        for raw in ["", "null", "42", "\"hi\""] {
            assert!(decode_envelope(raw).is_err(), "raw={raw:?}");
        }
    }

    #[test]
    fn error_ignores_ill_typed_siblings() {
        let raw = r#"{"error":"boom","timestamp":1714560000,"sender_id":1.5,"typing":true}"#;
        let env = decode_envelope(raw).unwrap();
        assert_eq!(env.kind(), EnvelopeKind::Error);
        assert_eq!(env.error.as_deref(), Some("boom"));
        assert!(env.typing.is_none() && env.sender_id.is_none());
    }

    #[test]
    fn typing_ignores_content_fields() {
        let raw = r#"{"typing":{"user_id":"u3","is_typing":true},"message":{"nested":1}}"#;
        let env = decode_envelope(raw).unwrap();
        assert_eq!(env.kind(), EnvelopeKind::Typing);
        assert!(env.message.is_none());
    }

    #[test]
    fn ill_typed_passthrough_reads_as_absent() {
        let raw = r#"{"sender_id":"u1","message":"hi","sender_type":3,"timestamp":{"s":1}}"#;
        let env = decode_envelope(raw).unwrap();
        assert_eq!(env.message.as_deref(), Some("hi"));
        assert_eq!(env.sender_type, None);
        assert_eq!(env.timestamp, None);
    }

    #[test]
    fn content_path_fields_stay_strict() {
        assert!(decode_envelope(r#"{"sender_id":1.5,"message":"hi"}"#).is_err());
        assert!(decode_envelope(r#"{"sender_id":"u1","message":7}"#).is_err());
    }

    #[test]
    fn typing_without_flag_means_stopped() {
        let env = decode_envelope(r#"{"typing":{"user_id":"u3"}}"#).unwrap();
        assert_eq!(env.kind(), EnvelopeKind::Typing);
        assert!(!env.typing.unwrap().is_typing);
    }
}
