use super::channel::ChannelDetail;
use super::name::QueueName;
use crate::serialization::{empty_as_none, Arguments};
use serde::{Deserialize, Serialize};

/// A consumer as listed under `/consumers` and in a channel's `consumer_details`.
///
/// `channel_details`, `queue` and `arguments` are all reported as `[]` when empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumerDetail {
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub channel_details: Option<ChannelDetail>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub queue: Option<QueueName>,
    #[serde(default)]
    pub consumer_tag: String,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default)]
    pub ack_required: bool,
    #[serde(default)]
    pub prefetch_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_status: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Arguments>,
}
