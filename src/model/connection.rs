use super::Extra;
use crate::serialization::{empty_as_none, epoch_millis, lenient_int, Arguments, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Properties an AMQP client announced when it connected.
///
/// The set of keys is up to the client library, so this keeps the whole map and offers typed
/// accessors for the common ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientProperties(pub Arguments);

impl ClientProperties {
    fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(JsonValue::as_str)
    }

    pub fn product(&self) -> Option<&str> {
        self.string("product")
    }

    pub fn platform(&self) -> Option<&str> {
        self.string("platform")
    }

    pub fn version(&self) -> Option<&str> {
        self.string("version")
    }

    pub fn information(&self) -> Option<&str> {
        self.string("information")
    }

    pub fn copyright(&self) -> Option<&str> {
        self.string("copyright")
    }

    pub fn connection_name(&self) -> Option<&str> {
        self.string("connection_name")
    }

    pub fn capabilities(&self) -> ClientCapabilities<'_> {
        ClientCapabilities(self.0.get("capabilities").and_then(JsonValue::as_map))
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }
}

/// Read-only view of the `capabilities` table inside [ClientProperties]. Missing flags read as
/// `false`.
#[derive(Clone, Copy, Debug)]
pub struct ClientCapabilities<'a>(Option<&'a Arguments>);

impl ClientCapabilities<'_> {
    fn flag(&self, key: &str) -> bool {
        self.0
            .and_then(|caps| caps.get(key))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
    }

    pub fn publisher_confirms(&self) -> bool {
        self.flag("publisher_confirms")
    }

    pub fn exchange_exchange_bindings(&self) -> bool {
        self.flag("exchange_exchange_bindings")
    }

    pub fn basic_nack(&self) -> bool {
        self.flag("basic.nack")
    }

    pub fn consumer_cancel_notify(&self) -> bool {
        self.flag("consumer_cancel_notify")
    }

    pub fn connection_blocked(&self) -> bool {
        self.flag("connection.blocked")
    }

    pub fn authentication_failure_close(&self) -> bool {
        self.flag("authentication_failure_close")
    }

    pub fn per_consumer_qos(&self) -> bool {
        self.flag("per_consumer_qos")
    }

    pub fn direct_reply_to(&self) -> bool {
        self.flag("direct_reply_to")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub name: String,
    #[serde(default)]
    pub node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub vhost: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_mechanism: Option<String>,
    #[serde(default)]
    pub host: String,
    #[serde(default, with = "lenient_int")]
    pub port: u16,
    #[serde(default)]
    pub peer_host: String,
    #[serde(default, with = "lenient_int")]
    pub peer_port: u16,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_key_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cipher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_cert_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_cert_issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_cert_validity: Option<String>,
    #[serde(default)]
    pub channels: u64,
    #[serde(default)]
    pub channel_max: u64,
    #[serde(default)]
    pub frame_max: u64,
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub recv_oct: u64,
    #[serde(default)]
    pub recv_cnt: u64,
    #[serde(default)]
    pub send_oct: u64,
    #[serde(default)]
    pub send_cnt: u64,
    #[serde(default)]
    pub send_pend: u64,
    #[serde(
        default,
        with = "epoch_millis::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub connected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_provided_name: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub client_properties: Option<ClientProperties>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const AMQP_CONNECTION: &str = r#"{
        "name": "172.17.0.1:40000 -> 172.17.0.2:5672",
        "node": "rabbit@node1",
        "state": "running",
        "type": "network",
        "vhost": "/",
        "user": "guest",
        "protocol": "AMQP 0-9-1",
        "auth_mechanism": "PLAIN",
        "host": "172.17.0.2",
        "port": 5672,
        "peer_host": "172.17.0.1",
        "peer_port": 40000,
        "ssl": false,
        "channels": 2,
        "channel_max": 2047,
        "frame_max": 131072,
        "timeout": 60,
        "connected_at": 1700000000123,
        "client_properties": {
            "product": "RabbitMQ",
            "platform": "Erlang",
            "connection_name": "billing-worker",
            "capabilities": {"publisher_confirms": true, "basic.nack": true, "connection.blocked": false}
        },
        "garbage_collection": {"fullsweep_after": 65535}
    }"#;

    #[test]
    fn decodes_network_connection() {
        let connection: Connection = serde_json::from_str(AMQP_CONNECTION).unwrap();
        assert_eq!(connection.port, 5672);
        assert_eq!(connection.peer_port, 40000);
        assert_eq!(
            connection.connected_at,
            Some(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap())
        );
        let props = connection.client_properties.as_ref().unwrap();
        assert_eq!(props.product(), Some("RabbitMQ"));
        assert_eq!(props.connection_name(), Some("billing-worker"));
        assert_eq!(props.version(), None);
        let caps = props.capabilities();
        assert!(caps.publisher_confirms());
        assert!(caps.basic_nack());
        assert!(!caps.connection_blocked());
        assert!(!caps.direct_reply_to());
        assert!(connection.extra.contains_key("garbage_collection"));
    }

    #[test]
    fn direct_connection_has_placeholder_ports() {
        let connection: Connection = serde_json::from_str(
            r#"{"name":"<rabbit@node1.1.1.0>","type":"direct","port":"unknown","peer_port":"unknown","client_properties":[]}"#,
        )
        .unwrap();
        assert_eq!(connection.port, 0);
        assert_eq!(connection.peer_port, 0);
        assert_eq!(connection.client_properties, None);
        assert!(!ClientProperties::default().capabilities().publisher_confirms());
    }

    #[test]
    fn round_trip() {
        let connection: Connection = serde_json::from_str(AMQP_CONNECTION).unwrap();
        let again: Connection =
            serde_json::from_str(&serde_json::to_string(&connection).unwrap()).unwrap();
        assert_eq!(again, connection);
    }
}
