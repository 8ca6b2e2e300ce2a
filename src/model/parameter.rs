use crate::error::{require_non_empty, Result};
use crate::serialization::{JsonValue, OneOrMany};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A runtime parameter: a component-specific JSON value such as a shovel or a federation
/// upstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub component: String,
    pub vhost: String,
    pub name: String,
    #[serde(default)]
    pub value: JsonValue,
}

impl Parameter {
    /// Build a parameter from any serializable payload.
    pub fn new<T: Serialize>(
        component: impl Into<String>,
        vhost: impl Into<String>,
        name: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        let component = component.into();
        let vhost = vhost.into();
        let name = name.into();
        require_non_empty("parameter component", &component)?;
        require_non_empty("parameter vhost", &vhost)?;
        require_non_empty("parameter name", &name)?;
        Ok(Self {
            component,
            vhost,
            name,
            value: JsonValue::from_serialize(value)?,
        })
    }

    /// Read the payload back as a typed value.
    pub fn value_as<T: DeserializeOwned>(&self) -> Result<T> {
        self.value.deserialize_into()
    }
}

wire_enum! {
    /// When a shovel or federation link acknowledges messages at the source.
    pub enum TransferAckMode {
        OnConfirm = "on-confirm",
        OnPublish = "on-publish",
        NoAck = "no-ack",
    }
}

/// Payload of a `federation-upstream` parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FederationUpstream {
    /// A single URI or a list to fail over between.
    pub uri: OneOrMany<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_mode: Option<TransferAckMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_user_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_ttl: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

impl FederationUpstream {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: OneOrMany::One(uri.into()),
            prefetch_count: None,
            reconnect_delay: None,
            ack_mode: None,
            trust_user_id: None,
            exchange: None,
            max_hops: None,
            expires: None,
            message_ttl: None,
            queue: None,
        }
    }
}

wire_enum! {
    pub enum DeleteAfterMode {
        Never = "never",
        QueueLength = "queue-length",
    }
}

/// `src-delete-after`: either a message count or one of the named modes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeleteAfter {
    Count(u64),
    Mode(DeleteAfterMode),
}

/// Payload of a dynamic `shovel` parameter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShovelDefinition {
    pub src_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_exchange_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_delete_after: Option<DeleteAfter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_prefetch_count: Option<u64>,
    pub dest_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_exchange_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_add_forward_headers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack_mode: Option<TransferAckMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconnect_delay: Option<u64>,
}
