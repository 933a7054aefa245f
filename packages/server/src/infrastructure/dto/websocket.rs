//! Signaling message DTOs.
//!
//! Every message is a JSON object discriminated by its `type` field.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Message type discriminator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    /// client → server: join a room (echoed back as acknowledgement)
    Join,
    /// server → room members: a new member joined
    Joined,
    /// client → server: SDP offer for a peer
    Call,
    /// server → peer: forwarded SDP offer
    IncomingCall,
    /// client → server → peer: SDP answer
    CallAccepted,
}

/// Join request; also sent back verbatim as the acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinMessage {
    pub r#type: MessageType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room: String,
}

/// Broadcast to existing room members when someone joins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinedMessage {
    pub r#type: MessageType,
    pub email: String,
    #[serde(rename = "socketId")]
    pub socket_id: String,
}

/// WebRTC session description, forwarded untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDescription {
    /// "offer" or "answer"
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub sdp_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sdp: String,
}

/// Offer: `call` inbound, `incomingCall` when forwarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallMessage {
    pub r#type: MessageType,
    /// Target session inbound, sender session once forwarded
    #[serde(rename = "peerSocketId", default, deserialize_with = "null_as_default")]
    pub peer_socket_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offer: SessionDescription,
}

/// Answer: `callAccepted` in both directions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallAcceptedMessage {
    pub r#type: MessageType,
    /// Target session inbound, sender session once forwarded
    #[serde(rename = "peerSocketId", default, deserialize_with = "null_as_default")]
    pub peer_socket_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: SessionDescription,
}

/// Decode `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Errors raised while decoding an inbound payload
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("payload is not a JSON object: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("payload has no string `type` field")]
    MissingType,

    #[error("unknown message type '{0}'")]
    UnknownType(String),

    #[error("invalid '{kind}' payload: {source}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Messages a client may send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Join(JoinMessage),
    Call(CallMessage),
    CallAccepted(CallAcceptedMessage),
}

impl ClientMessage {
    /// Decode an inbound text payload.
    ///
    /// The `type` field is read first and the payload is then decoded into the
    /// single shape registered for that type (`join`, `call`, `callAccepted`).
    /// Missing or `null` fields decode as empty values; unknown fields are ignored.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(ProtocolError::InvalidJson)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or(ProtocolError::MissingType)?
            .to_string();

        match kind.as_str() {
            "join" => decode("join", value).map(ClientMessage::Join),
            "call" => decode("call", value).map(ClientMessage::Call),
            "callAccepted" => decode("callAccepted", value).map(ClientMessage::CallAccepted),
            _ => Err(ProtocolError::UnknownType(kind)),
        }
    }
}

fn decode<T: DeserializeOwned>(
    kind: &'static str,
    value: serde_json::Value,
) -> Result<T, ProtocolError> {
    serde_json::from_value(value).map_err(|source| ProtocolError::InvalidPayload { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        // テスト項目: join メッセージがデコードされる
        // given (前提条件):
        let text = r#"{"type":"join","email":"a@x.com","room":"r1"}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            ClientMessage::Join(JoinMessage {
                r#type: MessageType::Join,
                email: "a@x.com".to_string(),
                room: "r1".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_join_with_missing_fields_uses_empty_strings() {
        // テスト項目: email / room が欠けている join は空文字列として扱われる
        // given (前提条件):
        let text = r#"{"type":"join"}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        match result {
            ClientMessage::Join(join) => {
                assert_eq!(join.email, "");
                assert_eq!(join.room, "");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_join_with_null_fields_uses_empty_strings() {
        // テスト項目: null の email は欠けている場合と同じく空文字列として扱われる
        // given (前提条件):
        let text = r#"{"type":"join","email":null,"room":"r1"}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        match result {
            ClientMessage::Join(join) => {
                assert_eq!(join.email, "");
                assert_eq!(join.room, "r1");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_with_null_offer_uses_empty_description() {
        // テスト項目: null の offer / peerSocketId は空の値として扱われる
        // given (前提条件):
        let texts = [
            r#"{"type":"call","peerSocketId":"s2","offer":null}"#,
            r#"{"type":"call","peerSocketId":null,"offer":{"type":null,"sdp":null}}"#,
        ];

        // when (操作):
        let results = texts.map(|t| ClientMessage::parse(t).unwrap());

        // then (期待する結果):
        match (&results[0], &results[1]) {
            (ClientMessage::Call(first), ClientMessage::Call(second)) => {
                assert_eq!(first.peer_socket_id, "s2");
                assert_eq!(first.offer, SessionDescription::default());
                assert_eq!(second.peer_socket_id, "");
                assert_eq!(second.offer, SessionDescription::default());
            }
            other => panic!("unexpected messages: {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_accepted_with_null_answer_uses_empty_description() {
        // テスト項目: null の answer は空の SessionDescription として扱われる
        // given (前提条件):
        let text = r#"{"type":"callAccepted","peerSocketId":"s1","answer":null}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        match result {
            ClientMessage::CallAccepted(answer) => {
                assert_eq!(answer.peer_socket_id, "s1");
                assert_eq!(answer.answer, SessionDescription::default());
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_keeps_session_description() {
        // テスト項目: call メッセージの SDP がそのまま保持される
        // given (前提条件):
        let text =
            r#"{"type":"call","peerSocketId":"s2","offer":{"type":"offer","sdp":"v=0\r\n"}}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        match result {
            ClientMessage::Call(call) => {
                assert_eq!(call.peer_socket_id, "s2");
                assert_eq!(call.offer.sdp_type, "offer");
                assert_eq!(call.offer.sdp, "v=0\r\n");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_accepted() {
        // テスト項目: callAccepted メッセージがデコードされる
        // given (前提条件):
        let text =
            r#"{"type":"callAccepted","peerSocketId":"s1","answer":{"type":"answer","sdp":"x"}}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        match result {
            ClientMessage::CallAccepted(answer) => {
                assert_eq!(answer.peer_socket_id, "s1");
                assert_eq!(answer.answer.sdp_type, "answer");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_tag_selects_shape_even_with_extra_fields() {
        // テスト項目: 複数の形に当てはまるペイロードでも type で形が決まる
        // given (前提条件):
        let text =
            r#"{"type":"call","email":"a@x.com","room":"r1","peerSocketId":"s2","offer":{}}"#;

        // when (操作):
        let result = ClientMessage::parse(text).unwrap();

        // then (期待する結果):
        assert!(matches!(result, ClientMessage::Call(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        // テスト項目: JSON でないペイロードは InvalidJson になる
        let result = ClientMessage::parse("hello");
        assert!(matches!(result, Err(ProtocolError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_rejects_missing_type() {
        // テスト項目: type のないペイロードは MissingType になる
        let result = ClientMessage::parse(r#"{"email":"a@x.com"}"#);
        assert!(matches!(result, Err(ProtocolError::MissingType)));
    }

    #[test]
    fn test_parse_rejects_server_only_types() {
        // テスト項目: サーバーからのみ送られる type（incomingCall など）は受け付けない
        let result = ClientMessage::parse(r#"{"type":"incomingCall","peerSocketId":"s1"}"#);
        match result {
            Err(ProtocolError::UnknownType(kind)) => assert_eq!(kind, "incomingCall"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_wrong_field_type() {
        // テスト項目: フィールドの型が不正なペイロードは InvalidPayload になる
        let result = ClientMessage::parse(r#"{"type":"join","email":42,"room":"r1"}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidPayload { kind: "join", .. })
        ));
    }

    #[test]
    fn test_joined_message_wire_format() {
        // テスト項目: joined メッセージが socketId フィールド名でシリアライズされる
        // given (前提条件):
        let msg = JoinedMessage {
            r#type: MessageType::Joined,
            email: "b@x.com".to_string(),
            socket_id: "s2".to_string(),
        };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({"type": "joined", "email": "b@x.com", "socketId": "s2"})
        );
    }
}
