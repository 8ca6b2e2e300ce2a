use super::exchange::ExchangeType;
use super::overview::Context;
use super::Extra;
use crate::serialization::lenient_int;
use serde::{Deserialize, Serialize};

/// An OTP application running on a node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMechanism {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
}

/// A cluster node and its resource usage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub running: bool,
    #[serde(default, with = "lenient_int")]
    pub os_pid: u64,
    #[serde(default)]
    pub uptime: u64,
    #[serde(default)]
    pub run_queue: u64,
    #[serde(default)]
    pub processors: u64,
    #[serde(default)]
    pub fd_used: u64,
    #[serde(default)]
    pub fd_total: u64,
    #[serde(default)]
    pub sockets_used: u64,
    #[serde(default)]
    pub sockets_total: u64,
    #[serde(default)]
    pub mem_used: u64,
    #[serde(default)]
    pub mem_limit: u64,
    #[serde(default)]
    pub mem_alarm: bool,
    #[serde(default)]
    pub disk_free: u64,
    #[serde(default)]
    pub disk_free_limit: u64,
    #[serde(default)]
    pub disk_free_alarm: bool,
    #[serde(default)]
    pub proc_used: u64,
    #[serde(default)]
    pub proc_total: u64,
    #[serde(default)]
    pub partitions: Vec<String>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    #[serde(default)]
    pub auth_mechanisms: Vec<AuthMechanism>,
    #[serde(default)]
    pub exchange_types: Vec<ExchangeType>,
    #[serde(default)]
    pub enabled_plugins: Vec<String>,
    #[serde(default)]
    pub log_files: Vec<String>,
    #[serde(default)]
    pub config_files: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_node() {
        let node: Node = serde_json::from_str(
            r#"{
                "name": "rabbit@node1",
                "type": "disc",
                "running": true,
                "os_pid": "312",
                "mem_used": 123456,
                "mem_alarm": false,
                "partitions": [],
                "applications": [{"name": "rabbit", "description": "RabbitMQ", "version": "3.12.4"}],
                "contexts": [{"description": "RabbitMQ Management", "path": "/", "port": "15672"}],
                "auth_mechanisms": [{"name": "PLAIN", "description": "SASL PLAIN", "enabled": true}],
                "enabled_plugins": ["rabbitmq_management"],
                "metrics_gc_queue_length": {"queue": 0}
            }"#,
        )
        .unwrap();
        assert_eq!(node.os_pid, 312);
        assert_eq!(node.applications[0].name, "rabbit");
        assert_eq!(node.contexts[0].port, 15672);
        assert!(node.auth_mechanisms[0].enabled);
        assert!(node.extra.contains_key("metrics_gc_queue_length"));
    }
}
