use super::consumer::ConsumerDetail;
use super::stats::MessageStats;
use super::Extra;
use crate::serialization::{empty_as_none, lenient_int};
use serde::{Deserialize, Serialize};

/// The channel a consumer sits on, as embedded in consumer listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDetail {
    pub name: String,
    pub number: u32,
    pub user: String,
    pub connection_name: String,
    #[serde(with = "lenient_int")]
    pub peer_port: u16,
    pub peer_host: String,
    pub node: String,
}

/// The connection a channel belongs to, as embedded in channel listings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionDetails {
    pub name: String,
    pub peer_host: String,
    #[serde(with = "lenient_int")]
    pub peer_port: u16,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub vhost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub connection_details: Option<ConnectionDetails>,
    #[serde(default)]
    pub transactional: bool,
    #[serde(default)]
    pub confirm: bool,
    #[serde(default)]
    pub consumer_count: u64,
    #[serde(default)]
    pub messages_unacknowledged: u64,
    #[serde(default)]
    pub messages_unconfirmed: u64,
    #[serde(default)]
    pub messages_uncommitted: u64,
    #[serde(default)]
    pub acks_uncommitted: u64,
    #[serde(default)]
    pub prefetch_count: u64,
    #[serde(default)]
    pub global_prefetch_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_since: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub message_stats: Option<MessageStats>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumer_details: Vec<ConsumerDetail>,
    #[serde(flatten)]
    pub extra: Extra,
}
