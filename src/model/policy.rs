use super::queue::{DeadLetterStrategy, Overflow, QueueLocator, QueueMode};
use super::Extra;
use crate::error::{require_non_empty, Result};
use crate::serialization::HaParams;
use serde::{Deserialize, Serialize};

wire_enum! {
    /// Which kind of object a policy matches.
    pub enum ApplyTo {
        All = "all",
        Queues = "queues",
        Exchanges = "exchanges",
        ClassicQueues = "classic_queues",
        QuorumQueues = "quorum_queues",
        Streams = "streams",
    }
}

wire_enum! {
    pub enum HaMode {
        All = "all",
        Exactly = "exactly",
        Nodes = "nodes",
    }
}

wire_enum! {
    pub enum HaSyncMode {
        Manual = "manual",
        Automatic = "automatic",
    }
}

wire_enum! {
    pub enum HaPromote {
        Always = "always",
        WhenSynced = "when-synced",
    }
}

/// The keys a policy sets.
///
/// Every key is optional and an unset key is left out of the body entirely, so a definition
/// written back to the broker sets exactly what it was read with. Keys this type does not know
/// about are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyDefinition {
    #[serde(rename = "ha-mode", default, skip_serializing_if = "Option::is_none")]
    pub ha_mode: Option<HaMode>,
    #[serde(rename = "ha-params", default, skip_serializing_if = "Option::is_none")]
    pub ha_params: Option<HaParams>,
    #[serde(rename = "ha-sync-mode", default, skip_serializing_if = "Option::is_none")]
    pub ha_sync_mode: Option<HaSyncMode>,
    #[serde(
        rename = "ha-sync-batch-size",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ha_sync_batch_size: Option<u64>,
    #[serde(
        rename = "ha-promote-on-shutdown",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ha_promote_on_shutdown: Option<HaPromote>,
    #[serde(
        rename = "ha-promote-on-failure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ha_promote_on_failure: Option<HaPromote>,
    #[serde(
        rename = "federation-upstream",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub federation_upstream: Option<String>,
    #[serde(
        rename = "federation-upstream-set",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub federation_upstream_set: Option<String>,
    #[serde(
        rename = "alternate-exchange",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alternate_exchange: Option<String>,
    #[serde(
        rename = "dead-letter-exchange",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dead_letter_exchange: Option<String>,
    #[serde(
        rename = "dead-letter-routing-key",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dead_letter_routing_key: Option<String>,
    #[serde(
        rename = "dead-letter-strategy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dead_letter_strategy: Option<DeadLetterStrategy>,
    #[serde(rename = "message-ttl", default, skip_serializing_if = "Option::is_none")]
    pub message_ttl: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
    #[serde(rename = "max-length", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(
        rename = "max-length-bytes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length_bytes: Option<u64>,
    /// Stream retention, e.g. `"7D"`.
    #[serde(rename = "max-age", default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Overflow>,
    #[serde(rename = "queue-mode", default, skip_serializing_if = "Option::is_none")]
    pub queue_mode: Option<QueueMode>,
    #[serde(
        rename = "queue-master-locator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub queue_master_locator: Option<QueueLocator>,
    #[serde(
        rename = "delivery-limit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_limit: Option<u64>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    pub vhost: String,
    pub pattern: String,
    #[serde(rename = "apply-to")]
    pub apply_to: ApplyTo,
    pub definition: PolicyDefinition,
    #[serde(default)]
    pub priority: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Policy {
    /// A policy matching `pattern`, applied to everything with priority 0.
    ///
    /// The name and vhost end up in the request path, so both must be non-empty.
    pub fn new(
        name: impl Into<String>,
        vhost: impl Into<String>,
        pattern: impl Into<String>,
        definition: PolicyDefinition,
    ) -> Result<Self> {
        let name = name.into();
        let vhost = vhost.into();
        require_non_empty("policy name", &name)?;
        require_non_empty("policy vhost", &vhost)?;
        Ok(Self {
            name,
            vhost,
            pattern: pattern.into(),
            apply_to: ApplyTo::All,
            definition,
            priority: 0,
            extra: Extra::new(),
        })
    }

    pub fn with_apply_to(self, apply_to: ApplyTo) -> Self {
        Self { apply_to, ..self }
    }

    pub fn with_priority(self, priority: i64) -> Self {
        Self { priority, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{to_kebab_case, NamingPolicy};
    use crate::serialization::JsonValue;
    use pretty_assertions::assert_eq;

    /// Member names of [PolicyDefinition], in the model's own casing.
    const MEMBERS: &[&str] = &[
        "HaMode",
        "HaParams",
        "HaSyncMode",
        "HaSyncBatchSize",
        "HaPromoteOnShutdown",
        "HaPromoteOnFailure",
        "FederationUpstream",
        "FederationUpstreamSet",
        "AlternateExchange",
        "DeadLetterExchange",
        "DeadLetterRoutingKey",
        "DeadLetterStrategy",
        "MessageTtl",
        "Expires",
        "MaxLength",
        "MaxLengthBytes",
        "MaxAge",
        "Overflow",
        "QueueMode",
        "QueueMasterLocator",
        "DeliveryLimit",
    ];

    const KEBAB_CASE: NamingPolicy = NamingPolicy::new('-', &[]);

    fn full_definition() -> PolicyDefinition {
        PolicyDefinition {
            ha_mode: Some(HaMode::Exactly),
            ha_params: Some(HaParams::Count(2)),
            ha_sync_mode: Some(HaSyncMode::Automatic),
            ha_sync_batch_size: Some(100),
            ha_promote_on_shutdown: Some(HaPromote::WhenSynced),
            ha_promote_on_failure: Some(HaPromote::Always),
            federation_upstream: Some("upstream".into()),
            federation_upstream_set: Some("all".into()),
            alternate_exchange: Some("unrouted".into()),
            dead_letter_exchange: Some("dlx".into()),
            dead_letter_routing_key: Some("dead".into()),
            dead_letter_strategy: Some(DeadLetterStrategy::AtLeastOnce),
            message_ttl: Some(60_000),
            expires: Some(3_600_000),
            max_length: Some(1_000),
            max_length_bytes: Some(1 << 20),
            max_age: Some("7D".into()),
            overflow: Some(Overflow::RejectPublish),
            queue_mode: Some(QueueMode::Lazy),
            queue_master_locator: Some(QueueLocator::MinMasters),
            delivery_limit: Some(5),
            extra: Extra::new(),
        }
    }

    #[test]
    fn wire_keys_are_a_bijection_of_member_names() {
        assert_eq!(KEBAB_CASE.check_injective(MEMBERS), Ok(()));

        let encoded = serde_json::to_value(full_definition()).unwrap();
        let mut keys: Vec<String> = encoded.as_object().unwrap().keys().cloned().collect();
        let mut expected: Vec<String> = MEMBERS.iter().map(|m| to_kebab_case(m)).collect();
        keys.sort();
        expected.sort();
        assert_eq!(keys, expected);

        for key in &keys {
            let member = KEBAB_CASE.member_name(key, MEMBERS).unwrap();
            assert_eq!(KEBAB_CASE.wire_name(member), key.as_str());
        }
    }

    #[test]
    fn unset_keys_are_omitted() {
        let definition = PolicyDefinition {
            max_length: Some(10),
            ..PolicyDefinition::default()
        };
        assert_eq!(
            serde_json::to_string(&definition).unwrap(),
            r#"{"max-length":10}"#
        );
    }

    #[test]
    fn round_trip_keeps_ha_params_shape_and_unknown_keys() {
        let text = r#"{"ha-mode":"nodes","ha-params":["rabbit@a","rabbit@b"],"x-custom-key":true}"#;
        let definition: PolicyDefinition = serde_json::from_str(text).unwrap();
        assert_eq!(
            definition.ha_params.as_ref().and_then(HaParams::nodes),
            Some(&["rabbit@a".to_string(), "rabbit@b".to_string()][..])
        );
        assert_eq!(definition.extra["x-custom-key"], JsonValue::Bool(true));
        assert_eq!(serde_json::to_string(&definition).unwrap(), text);

        let full = full_definition();
        let again: PolicyDefinition =
            serde_json::from_str(&serde_json::to_string(&full).unwrap()).unwrap();
        assert_eq!(again, full);
    }

    #[test]
    fn policy_body() {
        let policy = Policy::new("ha-all", "/", "^ha\\.", full_definition())
            .unwrap()
            .with_apply_to(ApplyTo::QuorumQueues)
            .with_priority(1);
        let value = serde_json::to_value(&policy).unwrap();
        assert_eq!(value["apply-to"], "quorum_queues");
        assert_eq!(value["priority"], 1);
        assert_eq!(value["definition"]["ha-params"], 2);
    }

    #[test]
    fn policy_requires_name_and_vhost() {
        assert!(Policy::new("", "/", ".*", PolicyDefinition::default())
            .unwrap_err()
            .is_validation());
        assert!(Policy::new("p", "", ".*", PolicyDefinition::default())
            .unwrap_err()
            .is_validation());
    }
}
