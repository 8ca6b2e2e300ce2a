use super::exchange::ExchangeType;
use super::stats::{MessageStats, ObjectTotals, QueueTotals};
use super::Extra;
use crate::serialization::{empty_as_none, lenient_int, Arguments};
use serde::{Deserialize, Serialize};

/// A protocol listener on one node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Listener {
    pub node: String,
    pub protocol: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default, with = "lenient_int")]
    pub port: u16,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub socket_opts: Option<Arguments>,
}

/// An HTTP context served by a node, such as the management UI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    /// Reported as a string by most broker versions.
    #[serde(default, with = "lenient_int")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub management_version: String,
    #[serde(default)]
    pub rates_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub rabbitmq_version: String,
    #[serde(default)]
    pub cluster_name: String,
    #[serde(default)]
    pub erlang_version: String,
    #[serde(default)]
    pub erlang_full_version: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub statistics_db_event_queue: u64,
    #[serde(default)]
    pub exchange_types: Vec<ExchangeType>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub message_stats: Option<MessageStats>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub queue_totals: Option<QueueTotals>,
    #[serde(default)]
    pub object_totals: ObjectTotals,
    #[serde(default)]
    pub listeners: Vec<Listener>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterName {
    pub name: String,
}

/// Result of an aliveness test. `status` is `"ok"` when the broker could declare, publish to
/// and consume from a test queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliveness {
    pub status: String,
}

impl Aliveness {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
