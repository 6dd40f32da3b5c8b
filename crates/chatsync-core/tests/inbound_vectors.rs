//! Inbound envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use chatsync_core::protocol::inbound::{decode_envelope_slice, EnvelopeKind};

use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn inbound_vectors() {
    let files = [
        "content_peer.json",
        "content_numeric_sender.json",
        "error_only.json",
        "error_and_typing.json",
        "typing_start.json",
        "invalid_utf8.json",
        "not_json.json",
        "typing_bool.json",
        "error_with_ill_typed_fields.json",
        "typing_missing_flag.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let res = decode_envelope_slice(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let env = res.expect("expected envelope");
        let ex = v.expect.expect("missing expect block");
        let d = &v.description;

        assert_eq!(env.kind().as_str(), ex["kind"].as_str().unwrap(), "vector={d}");

        match env.kind() {
            EnvelopeKind::Error => assert!(env.error.is_some(), "vector={d}"),
            EnvelopeKind::Typing => {
                let t = env.typing.as_ref().unwrap();
                let user = t.user_id.as_ref().unwrap();
                assert_eq!(user.as_str(), ex["user_id"].as_str().unwrap(), "vector={d}");
                assert_eq!(t.is_typing, ex["is_typing"].as_bool().unwrap(), "vector={d}");
            }
            EnvelopeKind::Content => {
                let sender = env.sender_id.as_ref().unwrap();
                assert_eq!(sender.as_str(), ex["sender_id"].as_str().unwrap(), "vector={d}");
                assert_eq!(env.sender_name.as_deref(), ex["sender_name"].as_str(), "vector={d}");
                assert_eq!(env.message.as_deref(), ex["message"].as_str(), "vector={d}");
            }
        }
    }
}

#[test]
fn passthrough_fields_survive_decode() {
    let s = load("content_numeric_sender.json");
    let env = decode_envelope_slice(&s.frame.decode()).unwrap();
    assert_eq!(env.sender_type.as_deref(), Some("expert"));
    assert_eq!(env.timestamp.as_deref(), Some("2025-05-01T10:00:00+00:00"));
}
