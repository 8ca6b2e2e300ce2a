use super::consumer::ConsumerDetail;
use super::policy::PolicyDefinition;
use super::stats::{MessageStats, Rate};
use super::Extra;
use crate::error::{require_non_empty, Result};
use crate::serialization::{empty_as_none, special_float, Arguments, JsonValue};
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum QueueType {
        Classic = "classic",
        Quorum = "quorum",
        Stream = "stream",
    }
}

wire_enum! {
    pub enum QueueMode {
        Default = "default",
        Lazy = "lazy",
    }
}

wire_enum! {
    /// What a queue does once it reaches its length limit.
    pub enum Overflow {
        DropHead = "drop-head",
        RejectPublish = "reject-publish",
        RejectPublishDlx = "reject-publish-dlx",
    }
}

wire_enum! {
    pub enum DeadLetterStrategy {
        AtMostOnce = "at-most-once",
        AtLeastOnce = "at-least-once",
    }
}

wire_enum! {
    /// Where the leader replica of a new queue is placed.
    pub enum QueueLocator {
        MinMasters = "min-masters",
        ClientLocal = "client-local",
        Random = "random",
        Balanced = "balanced",
    }
}

/// Internal state of a classic queue's backing store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackingQueueStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<QueueMode>,
    pub q1: u64,
    pub q2: u64,
    pub q3: u64,
    pub q4: u64,
    pub len: u64,
    /// `"infinity"` until the broker starts paging.
    #[serde(with = "special_float")]
    pub target_ram_count: f64,
    pub next_seq_id: u64,
    #[serde(with = "special_float")]
    pub avg_ingress_rate: f64,
    #[serde(with = "special_float")]
    pub avg_egress_rate: f64,
    #[serde(with = "special_float")]
    pub avg_ack_ingress_rate: f64,
    #[serde(with = "special_float")]
    pub avg_ack_egress_rate: f64,
    #[serde(skip_serializing_if = "JsonValue::is_null")]
    pub delta: JsonValue,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub name: String,
    pub vhost: String,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub queue_type: Option<QueueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub effective_policy_definition: Option<PolicyDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_consumer_tag: Option<String>,
    #[serde(default)]
    pub consumers: u64,
    #[serde(
        default,
        with = "special_float::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub consumer_utilisation: Option<f64>,
    #[serde(
        default,
        with = "special_float::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub consumer_capacity: Option<f64>,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub messages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_details: Option<Rate>,
    #[serde(default)]
    pub messages_ready: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_ready_details: Option<Rate>,
    #[serde(default)]
    pub messages_unacknowledged: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_unacknowledged_details: Option<Rate>,
    #[serde(default)]
    pub message_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_message_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_since: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub backing_queue_status: Option<BackingQueueStatus>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub message_stats: Option<MessageStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumer_details: Vec<ConsumerDetail>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a queue PUT. The name travels in the path.
///
/// The `with_*` helpers set the well-known `x-` arguments; anything else goes through
/// [QueueInfo::with_argument].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueInfo {
    #[serde(skip)]
    name: String,
    pub auto_delete: bool,
    pub durable: bool,
    pub arguments: Arguments,
}

impl QueueInfo {
    /// A durable queue that is not auto-deleted.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require_non_empty("queue name", &name)?;
        Ok(Self {
            name,
            auto_delete: false,
            durable: true,
            arguments: Arguments::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_durable(self, durable: bool) -> Self {
        Self { durable, ..self }
    }

    pub fn with_auto_delete(self, auto_delete: bool) -> Self {
        Self {
            auto_delete,
            ..self
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_queue_type(self, queue_type: QueueType) -> Self {
        self.with_argument("x-queue-type", queue_type.as_str())
    }

    pub fn with_message_ttl(self, millis: i64) -> Self {
        self.with_argument("x-message-ttl", millis)
    }

    pub fn with_expires(self, millis: i64) -> Self {
        self.with_argument("x-expires", millis)
    }

    pub fn with_max_length(self, max: i64) -> Self {
        self.with_argument("x-max-length", max)
    }

    pub fn with_max_length_bytes(self, max: i64) -> Self {
        self.with_argument("x-max-length-bytes", max)
    }

    pub fn with_overflow(self, overflow: Overflow) -> Self {
        self.with_argument("x-overflow", overflow.as_str())
    }

    pub fn with_dead_letter_exchange(self, exchange: impl Into<String>) -> Self {
        self.with_argument("x-dead-letter-exchange", exchange.into())
    }

    pub fn with_dead_letter_routing_key(self, routing_key: impl Into<String>) -> Self {
        self.with_argument("x-dead-letter-routing-key", routing_key.into())
    }

    pub fn with_dead_letter_strategy(self, strategy: DeadLetterStrategy) -> Self {
        self.with_argument("x-dead-letter-strategy", strategy.as_str())
    }

    pub fn with_queue_mode(self, mode: QueueMode) -> Self {
        self.with_argument("x-queue-mode", mode.as_str())
    }

    pub fn with_single_active_consumer(self, enabled: bool) -> Self {
        self.with_argument("x-single-active-consumer", enabled)
    }

    pub fn with_delivery_limit(self, limit: i64) -> Self {
        self.with_argument("x-delivery-limit", limit)
    }
}
