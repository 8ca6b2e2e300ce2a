use super::queue::QueueType;
use super::stats::{MessageStats, Rate};
use super::Extra;
use crate::error::{require_non_empty, Result};
use crate::serialization::{empty_as_none, user_tags};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vhost {
    pub name: String,
    #[serde(default)]
    pub tracing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "user_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_queue_type: Option<QueueType>,
    #[serde(default)]
    pub messages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_details: Option<Rate>,
    #[serde(default)]
    pub messages_ready: u64,
    #[serde(default)]
    pub messages_unacknowledged: u64,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub message_stats: Option<MessageStats>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a vhost PUT. The name travels in the path.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VhostInfo {
    #[serde(skip)]
    name: String,
    pub tracing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "user_tags::serialize_comma_separated"
    )]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_queue_type: Option<QueueType>,
}

impl VhostInfo {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require_non_empty("vhost name", &name)?;
        Ok(Self {
            name,
            ..Self::default()
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_tracing(self, tracing: bool) -> Self {
        Self { tracing, ..self }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_default_queue_type(self, queue_type: QueueType) -> Self {
        Self {
            default_queue_type: Some(queue_type),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::JsonValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_keeps_unknown_fields() {
        let vhost: Vhost = serde_json::from_str(
            r#"{"name":"/","tracing":false,"tags":[],"cluster_state":{"rabbit@node1":"running"}}"#,
        )
        .unwrap();
        assert_eq!(vhost.name, "/");
        assert!(vhost.extra.contains_key("cluster_state"));

        let again: Vhost =
            serde_json::from_str(&serde_json::to_string(&vhost).unwrap()).unwrap();
        assert_eq!(again, vhost);
        assert_eq!(
            again.extra["cluster_state"].get("rabbit@node1"),
            Some(&JsonValue::String("running".into()))
        );
    }

    #[test]
    fn info_body_omits_name_and_unset_fields() {
        let info = VhostInfo::new("staging")
            .unwrap()
            .with_tags(vec!["qa", "eu"])
            .with_default_queue_type(QueueType::Quorum);
        assert_eq!(info.name(), "staging");
        assert_eq!(
            serde_json::to_string(&info).unwrap(),
            r#"{"tracing":false,"tags":"qa,eu","default_queue_type":"quorum"}"#
        );
    }

    #[test]
    fn info_requires_name() {
        assert!(VhostInfo::new("").unwrap_err().is_validation());
    }
}
