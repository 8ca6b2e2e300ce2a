// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the RabbitMQ Management library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Typed records for the resources exposed by the management API.
//!
//! Types named after a resource (`Queue`, `Exchange`, ...) are what the broker reports. Most of
//! them keep fields they do not declare in an `extra` map, so re-encoding a decoded record loses
//! nothing. Types ending in `Info` are request bodies; their constructors validate the parts that
//! end up in the request path before any request is made.

use crate::serialization::JsonValue;
use std::collections::BTreeMap;

mod binding;
mod channel;
mod connection;
mod consumer;
mod definitions;
mod exchange;
mod federation;
mod message;
mod name;
mod node;
mod overview;
mod page;
mod parameter;
mod permission;
mod policy;
mod queue;
mod stats;
mod user;
mod vhost;

pub use binding::*;
pub use channel::*;
pub use connection::*;
pub use consumer::*;
pub use definitions::*;
pub use exchange::*;
pub use federation::*;
pub use message::*;
pub use name::*;
pub use node::*;
pub use overview::*;
pub use page::*;
pub use parameter::*;
pub use permission::*;
pub use policy::*;
pub use queue::*;
pub use stats::*;
pub use user::*;
pub use vhost::*;

/// Wire fields a record does not declare, keyed by their wire name.
pub type Extra = BTreeMap<String, JsonValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{to_pascal_case, NamingPolicy, SNAKE_CASE};
    use pretty_assertions::assert_eq;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_json::json;
    use std::fmt::Debug;
    use std::str::FromStr;

    /// Members of [Queue] that map mechanically to snake_case, plus the one override.
    const QUEUE_MEMBERS: &[&str] = &[
        "Name",
        "Vhost",
        "Durable",
        "AutoDelete",
        "Exclusive",
        "Arguments",
        "QueueType",
        "Node",
        "State",
        "Policy",
        "EffectivePolicyDefinition",
        "ExclusiveConsumerTag",
        "Consumers",
        "ConsumerUtilisation",
        "ConsumerCapacity",
        "Memory",
        "Messages",
        "MessagesDetails",
        "MessagesReady",
        "MessagesReadyDetails",
        "MessagesUnacknowledged",
        "MessagesUnacknowledgedDetails",
        "MessageBytes",
        "HeadMessageTimestamp",
        "IdleSince",
        "BackingQueueStatus",
        "MessageStats",
        "ConsumerDetails",
    ];

    const QUEUE_NAMING: NamingPolicy = NamingPolicy::new('_', &[("QueueType", "type")]);

    #[test]
    fn queue_wire_names_match_naming_policy() {
        assert_eq!(QUEUE_NAMING.check_injective(QUEUE_MEMBERS), Ok(()));

        let queue = Queue {
            name: "q".into(),
            vhost: "/".into(),
            queue_type: Some(QueueType::Quorum),
            policy: Some("p".into()),
            node: Some("rabbit@node1".into()),
            state: Some("running".into()),
            effective_policy_definition: Some(PolicyDefinition::default()),
            exclusive_consumer_tag: Some("ctag".into()),
            consumer_utilisation: Some(1.0),
            consumer_capacity: Some(1.0),
            messages_details: Some(Rate::default()),
            messages_ready_details: Some(Rate::default()),
            messages_unacknowledged_details: Some(Rate::default()),
            head_message_timestamp: Some(0),
            idle_since: Some("2023-10-01 12:00:00".into()),
            backing_queue_status: Some(BackingQueueStatus::default()),
            message_stats: Some(MessageStats::default()),
            consumer_details: vec![ConsumerDetail::default()],
            ..Queue::default()
        };
        let encoded = serde_json::to_value(&queue).unwrap();
        let keys: Vec<&String> = encoded.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), QUEUE_MEMBERS.len());
        for key in keys {
            let member = QUEUE_NAMING
                .member_name(key, QUEUE_MEMBERS)
                .unwrap_or_else(|| panic!("no member for wire name {}", key));
            assert_eq!(QUEUE_NAMING.wire_name(member), key.as_str());
        }
    }

    #[test]
    fn snake_case_inverts_on_plain_members() {
        for member in QUEUE_MEMBERS.iter().filter(|m| **m != "QueueType") {
            let wire = SNAKE_CASE.wire_name(member);
            assert_eq!(to_pascal_case(&wire), *member);
        }
    }

    fn assert_wire_names_round_trip<T>(names: &[&str])
    where
        T: FromStr + ToString + serde::Serialize + serde::de::DeserializeOwned,
        T::Err: std::fmt::Debug,
    {
        let mut seen = std::collections::BTreeSet::new();
        for name in names {
            assert!(seen.insert(*name), "duplicate wire name {}", name);
            let value: T = name.parse().unwrap();
            assert_eq!(value.to_string(), *name);
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
            let decoded: T = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded.to_string(), *name);
        }
    }

    #[test]
    fn enum_spellings_are_distinct_and_round_trip() {
        assert_wire_names_round_trip::<QueueType>(QueueType::WIRE_NAMES);
        assert_wire_names_round_trip::<QueueMode>(QueueMode::WIRE_NAMES);
        assert_wire_names_round_trip::<Overflow>(Overflow::WIRE_NAMES);
        assert_wire_names_round_trip::<DeadLetterStrategy>(DeadLetterStrategy::WIRE_NAMES);
        assert_wire_names_round_trip::<QueueLocator>(QueueLocator::WIRE_NAMES);
        assert_wire_names_round_trip::<ApplyTo>(ApplyTo::WIRE_NAMES);
        assert_wire_names_round_trip::<HaMode>(HaMode::WIRE_NAMES);
        assert_wire_names_round_trip::<HaSyncMode>(HaSyncMode::WIRE_NAMES);
        assert_wire_names_round_trip::<HaPromote>(HaPromote::WIRE_NAMES);
        assert_wire_names_round_trip::<TransferAckMode>(TransferAckMode::WIRE_NAMES);
        assert_wire_names_round_trip::<DeleteAfterMode>(DeleteAfterMode::WIRE_NAMES);
        assert_wire_names_round_trip::<PayloadEncoding>(PayloadEncoding::WIRE_NAMES);
        assert_wire_names_round_trip::<AckMode>(AckMode::WIRE_NAMES);
        assert_wire_names_round_trip::<GetEncoding>(GetEncoding::WIRE_NAMES);
        assert_wire_names_round_trip::<DestinationType>(DestinationType::WIRE_NAMES);
    }

    /// Decode `fixture`, re-encode it and decode again. The record must come back unchanged,
    /// keep `unknown_key`, and write exactly the wire names of `members` besides it.
    fn assert_record_round_trips<T>(
        naming: &NamingPolicy,
        members: &[&str],
        fixture: serde_json::Value,
        unknown_key: &str,
    ) where
        T: Serialize + DeserializeOwned + PartialEq + Debug,
    {
        assert_eq!(naming.check_injective(members), Ok(()));

        let decoded: T = serde_json::from_value(fixture.clone()).unwrap();
        let encoded = serde_json::to_value(&decoded).unwrap();
        let again: T = serde_json::from_value(encoded.clone()).unwrap();
        assert_eq!(again, decoded);

        let object = encoded.as_object().unwrap();
        assert_eq!(object.get(unknown_key), fixture.get(unknown_key));

        let mut written: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| *key != unknown_key)
            .collect();
        written.sort_unstable();
        let mut expected: Vec<String> = members
            .iter()
            .map(|member| naming.wire_name(member).into_owned())
            .collect();
        expected.sort_unstable();
        assert_eq!(written, expected);
        for key in written {
            let member = naming
                .member_name(key, members)
                .unwrap_or_else(|| panic!("no member for wire name {}", key));
            assert_eq!(naming.wire_name(member), key);
        }
    }

    #[test]
    fn channel_round_trips() {
        const MEMBERS: &[&str] = &[
            "Name",
            "Node",
            "Number",
            "User",
            "Vhost",
            "State",
            "ConnectionDetails",
            "Transactional",
            "Confirm",
            "ConsumerCount",
            "MessagesUnacknowledged",
            "MessagesUnconfirmed",
            "MessagesUncommitted",
            "AcksUncommitted",
            "PrefetchCount",
            "GlobalPrefetchCount",
            "IdleSince",
            "MessageStats",
            "ConsumerDetails",
        ];
        assert_record_round_trips::<Channel>(
            &SNAKE_CASE,
            MEMBERS,
            json!({
                "name": "127.0.0.1:5000 -> 127.0.0.1:5672 (1)",
                "node": "rabbit@node1",
                "number": 1,
                "user": "guest",
                "vhost": "/",
                "state": "running",
                "connection_details": {"name": "127.0.0.1:5000 -> 127.0.0.1:5672", "peer_host": "127.0.0.1", "peer_port": "5000"},
                "transactional": false,
                "confirm": true,
                "consumer_count": 1,
                "messages_unacknowledged": 2,
                "messages_unconfirmed": 0,
                "messages_uncommitted": 0,
                "acks_uncommitted": 0,
                "prefetch_count": 10,
                "global_prefetch_count": 0,
                "idle_since": "2023-10-01 12:00:00",
                "message_stats": {"deliver_get": 4},
                "consumer_details": [{"consumer_tag": "ctag", "arguments": [], "queue": {"name": "q", "vhost": "/"}}],
                "reductions": 12345
            }),
            "reductions",
        );
    }

    #[test]
    fn node_round_trips() {
        const MEMBERS: &[&str] = &[
            "Name",
            "NodeType",
            "Running",
            "OsPid",
            "Uptime",
            "RunQueue",
            "Processors",
            "FdUsed",
            "FdTotal",
            "SocketsUsed",
            "SocketsTotal",
            "MemUsed",
            "MemLimit",
            "MemAlarm",
            "DiskFree",
            "DiskFreeLimit",
            "DiskFreeAlarm",
            "ProcUsed",
            "ProcTotal",
            "Partitions",
            "Applications",
            "Contexts",
            "AuthMechanisms",
            "ExchangeTypes",
            "EnabledPlugins",
            "LogFiles",
            "ConfigFiles",
        ];
        const NAMING: NamingPolicy = NamingPolicy::new('_', &[("NodeType", "type")]);
        assert_record_round_trips::<Node>(
            &NAMING,
            MEMBERS,
            json!({
                "name": "rabbit@node1",
                "type": "disc",
                "running": true,
                "os_pid": "4242",
                "uptime": 60000,
                "run_queue": 0,
                "processors": 8,
                "fd_used": 40,
                "fd_total": 1048576,
                "sockets_used": 2,
                "sockets_total": 943626,
                "mem_used": 100000000,
                "mem_limit": 3000000000u64,
                "mem_alarm": false,
                "disk_free": 50000000000u64,
                "disk_free_limit": 50000000,
                "disk_free_alarm": false,
                "proc_used": 400,
                "proc_total": 1048576,
                "partitions": [],
                "applications": [{"name": "rabbit", "description": "RabbitMQ", "version": "3.12.0"}],
                "contexts": [{"node": "rabbit@node1", "description": "RabbitMQ Management", "path": "/", "port": "15672"}],
                "auth_mechanisms": [{"name": "PLAIN", "description": "SASL PLAIN", "enabled": true}],
                "exchange_types": [{"name": "topic", "description": "AMQP topic exchange", "enabled": true}],
                "enabled_plugins": ["rabbitmq_management"],
                "log_files": ["/var/log/rabbitmq/rabbit.log"],
                "config_files": ["/etc/rabbitmq/rabbitmq.conf"],
                "gc_num": 7
            }),
            "gc_num",
        );
    }

    #[test]
    fn federation_round_trips() {
        const MEMBERS: &[&str] = &[
            "Node",
            "Vhost",
            "Exchange",
            "Queue",
            "UpstreamExchange",
            "UpstreamQueue",
            "LinkType",
            "Upstream",
            "Id",
            "Status",
            "Error",
            "Uri",
            "Timestamp",
            "LocalChannel",
        ];
        const NAMING: NamingPolicy = NamingPolicy::new('_', &[("LinkType", "type")]);
        assert_record_round_trips::<Federation>(
            &NAMING,
            MEMBERS,
            json!({
                "node": "rabbit@node1",
                "vhost": "/",
                "exchange": "events",
                "queue": "jobs",
                "upstream_exchange": "events",
                "upstream_queue": "jobs",
                "type": "exchange",
                "upstream": "dc2",
                "id": "b6f6a8c3",
                "status": "error",
                "error": "connection refused",
                "uri": "amqp://dc2",
                "timestamp": "2023-10-01 12:00:00",
                "local_channel": {"name": "<rabbit@node1.1.2.0> (1)", "number": 1, "user": "none", "connection_name": "link", "node": "rabbit@node1"},
                "local_connection": "<rabbit@node1.1.2.0>"
            }),
            "local_connection",
        );
    }

    #[test]
    fn user_round_trips() {
        const MEMBERS: &[&str] = &["Name", "PasswordHash", "HashingAlgorithm", "Tags", "Limits"];
        assert_record_round_trips::<User>(
            &SNAKE_CASE,
            MEMBERS,
            json!({
                "name": "guest",
                "password_hash": "abc",
                "hashing_algorithm": "rabbit_password_hashing_sha256",
                "tags": "administrator,management",
                "limits": {"max-connections": 10},
                "description": "seeded user"
            }),
            "description",
        );
    }

    #[test]
    fn policy_round_trips() {
        const MEMBERS: &[&str] = &["Name", "Vhost", "Pattern", "ApplyTo", "Definition", "Priority"];
        const NAMING: NamingPolicy = NamingPolicy::new('_', &[("ApplyTo", "apply-to")]);
        assert_record_round_trips::<Policy>(
            &NAMING,
            MEMBERS,
            json!({
                "name": "ha-all",
                "vhost": "/",
                "pattern": "^ha\\.",
                "apply-to": "queues",
                "definition": {"ha-mode": "exactly", "ha-params": 2, "x-vendor-key": true},
                "priority": 1,
                "description": "mirror ha queues"
            }),
            "description",
        );
    }

    #[test]
    fn exchange_round_trips() {
        const MEMBERS: &[&str] = &[
            "Name",
            "Vhost",
            "Kind",
            "Durable",
            "AutoDelete",
            "Internal",
            "Arguments",
            "Policy",
            "UserWhoPerformedAction",
            "MessageStats",
        ];
        const NAMING: NamingPolicy = NamingPolicy::new('_', &[("Kind", "type")]);
        assert_record_round_trips::<Exchange>(
            &NAMING,
            MEMBERS,
            json!({
                "name": "hash",
                "vhost": "/",
                "type": "x-consistent-hash",
                "durable": true,
                "auto_delete": false,
                "internal": false,
                "arguments": {"hash-header": "h"},
                "policy": "p",
                "user_who_performed_action": "guest",
                "message_stats": {"publish_in": 5},
                "recent_activity": 3
            }),
            "recent_activity",
        );
    }
}
