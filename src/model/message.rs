//! Publishing through the HTTP API and reading messages back off a queue.
//!
//! Both are diagnostic tools. They are slow and, for `get`, destructive unless the ack mode
//! requeues.

use crate::error::Result;
use crate::serialization::{empty_as_none, Arguments, JsonValue};
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum PayloadEncoding {
        String = "string",
        Base64 = "base64",
    }
}

wire_enum! {
    /// What happens to a message after it has been fetched.
    pub enum AckMode {
        AckRequeueTrue = "ack_requeue_true",
        AckRequeueFalse = "ack_requeue_false",
        RejectRequeueTrue = "reject_requeue_true",
        RejectRequeueFalse = "reject_requeue_false",
    }
}

wire_enum! {
    pub enum GetEncoding {
        Auto = "auto",
        Base64 = "base64",
    }
}

/// Body of a publish POST to an exchange.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PublishInfo {
    pub properties: Arguments,
    pub routing_key: String,
    pub payload: String,
    pub payload_encoding: PayloadEncoding,
}

impl PublishInfo {
    /// `payload_encoding` must be `"string"` or `"base64"`.
    pub fn new(
        routing_key: impl Into<String>,
        payload: impl Into<String>,
        payload_encoding: &str,
    ) -> Result<Self> {
        Ok(Self {
            properties: Arguments::new(),
            routing_key: routing_key.into(),
            payload: payload.into(),
            payload_encoding: payload_encoding.parse()?,
        })
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    pub routed: bool,
}

/// Body of a `get` POST against a queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GetMessagesCriteria {
    pub count: u64,
    pub ackmode: AckMode,
    pub encoding: GetEncoding,
    /// Truncate payloads longer than this many bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate: Option<u64>,
}

impl GetMessagesCriteria {
    pub fn new(count: u64, ackmode: AckMode) -> Self {
        Self {
            count,
            ackmode,
            encoding: GetEncoding::Auto,
            truncate: None,
        }
    }

    pub fn with_encoding(self, encoding: GetEncoding) -> Self {
        Self { encoding, ..self }
    }

    pub fn with_truncate(self, truncate: u64) -> Self {
        Self {
            truncate: Some(truncate),
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub payload_bytes: u64,
    #[serde(default)]
    pub redelivered: bool,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub routing_key: String,
    /// Messages left in the queue after this one was fetched.
    #[serde(default)]
    pub message_count: u64,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub properties: Option<Arguments>,
    pub payload: String,
    pub payload_encoding: PayloadEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn publish_encoding_is_validated() {
        assert!(PublishInfo::new("rk", "hello", "string").is_ok());
        assert!(PublishInfo::new("rk", "aGVsbG8=", "base64").is_ok());
        assert!(PublishInfo::new("rk", "hello", "unknown_payload_encoding")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn publish_body() {
        let info = PublishInfo::new("orders.created", "{}", "string")
            .unwrap()
            .with_property("delivery_mode", 2);
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"properties":{"delivery_mode":2},"routing_key":"orders.created","payload":"{}","payload_encoding":"string"}"#
        );
    }

    #[test]
    fn get_criteria_body() {
        let criteria = GetMessagesCriteria::new(5, AckMode::AckRequeueTrue).with_truncate(50_000);
        assert_eq!(
            serde_json::to_string(&criteria).unwrap(),
            r#"{"count":5,"ackmode":"ack_requeue_true","encoding":"auto","truncate":50000}"#
        );
    }

    #[test]
    fn message_without_properties() {
        let messages: Vec<Message> = serde_json::from_str(
            r#"[{"payload_bytes":5,"redelivered":false,"exchange":"","routing_key":"q","message_count":0,"properties":[],"payload":"hello","payload_encoding":"string"}]"#,
        )
        .unwrap();
        assert_eq!(messages[0].properties, None);
        assert_eq!(messages[0].payload_encoding, PayloadEncoding::String);
    }
}
