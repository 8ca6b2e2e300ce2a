use super::binding::Binding;
use super::exchange::Exchange;
use super::parameter::Parameter;
use super::permission::{Permission, TopicPermission};
use super::policy::Policy;
use super::queue::Queue;
use super::user::User;
use super::vhost::Vhost;
use super::Extra;
use crate::serialization::JsonValue;
use serde::{Deserialize, Serialize};

/// A cluster-wide parameter such as `cluster_name`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalParameter {
    pub name: String,
    #[serde(default)]
    pub value: JsonValue,
}

/// Export of everything the broker can recreate on import.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    pub rabbit_version: Option<String>,
    pub rabbitmq_version: Option<String>,
    pub product_name: Option<String>,
    pub product_version: Option<String>,
    pub users: Vec<User>,
    pub vhosts: Vec<Vhost>,
    pub permissions: Vec<Permission>,
    pub topic_permissions: Vec<TopicPermission>,
    pub parameters: Vec<Parameter>,
    pub global_parameters: Vec<GlobalParameter>,
    pub policies: Vec<Policy>,
    pub queues: Vec<Queue>,
    pub exchanges: Vec<Exchange>,
    pub bindings: Vec<Binding>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_export() {
        let definitions: Definitions = serde_json::from_str(
            r#"{
                "rabbit_version": "3.12.4",
                "rabbitmq_version": "3.12.4",
                "users": [{"name": "guest", "password_hash": "h", "hashing_algorithm": "rabbit_password_hashing_sha256", "tags": ["administrator"], "limits": {}}],
                "vhosts": [{"name": "/"}],
                "permissions": [{"user": "guest", "vhost": "/", "configure": ".*", "write": ".*", "read": ".*"}],
                "topic_permissions": [],
                "parameters": [],
                "global_parameters": [{"name": "cluster_name", "value": "rabbit@node1"}],
                "policies": [{"vhost": "/", "name": "ttl", "pattern": ".*", "apply-to": "queues", "definition": {"message-ttl": 1000}, "priority": 0}],
                "queues": [{"name": "orders", "vhost": "/", "durable": true, "auto_delete": false, "arguments": {}}],
                "exchanges": [],
                "bindings": []
            }"#,
        )
        .unwrap();
        assert_eq!(definitions.users[0].tags, vec!["administrator".to_string()]);
        assert_eq!(definitions.policies[0].definition.message_ttl, Some(1000));
        assert_eq!(
            definitions.global_parameters[0].value,
            JsonValue::String("rabbit@node1".into())
        );
        assert!(definitions.extra.is_empty());
    }
}
