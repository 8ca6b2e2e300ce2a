use super::Extra;
use crate::serialization::empty_as_none;
use serde::{Deserialize, Serialize};

/// The local end of a federation link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FederationChannel {
    pub name: String,
    pub number: u32,
    pub user: String,
    pub connection_name: String,
    pub node: String,
}

/// Status of one federation link, as listed by the federation plugin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Federation {
    #[serde(default)]
    pub node: String,
    #[serde(default)]
    pub vhost: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_queue: Option<String>,
    #[serde(default, rename = "type")]
    pub link_type: String,
    #[serde(default)]
    pub upstream: String,
    #[serde(default)]
    pub id: String,
    /// `starting`, `running` or `error`. Plugin versions add states, so it is left as a string.
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub local_channel: Option<FederationChannel>,
    #[serde(flatten)]
    pub extra: Extra,
}
