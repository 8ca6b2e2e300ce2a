//! Counters and rate samples reported alongside queues, exchanges, channels and the overview.

use crate::serialization::{empty_as_none, epoch_millis, special_float};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of a counter's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub sample: i64,
    #[serde(with = "epoch_millis")]
    pub timestamp: DateTime<Utc>,
}

/// A `*_details` object: the current rate and, when requested, its history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default, with = "special_float")]
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<Sample>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "special_float::option")]
    pub avg_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "special_float::option")]
    pub avg: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageStats {
    pub publish: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_details: Option<Rate>,
    pub publish_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_in_details: Option<Rate>,
    pub publish_out: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_out_details: Option<Rate>,
    pub confirm: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_details: Option<Rate>,
    pub return_unroutable: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_unroutable_details: Option<Rate>,
    pub deliver: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_details: Option<Rate>,
    pub deliver_no_ack: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_no_ack_details: Option<Rate>,
    pub deliver_get: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_get_details: Option<Rate>,
    pub get: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_details: Option<Rate>,
    pub get_no_ack: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_no_ack_details: Option<Rate>,
    pub ack: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ack_details: Option<Rate>,
    pub redeliver: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeliver_details: Option<Rate>,
    pub disk_reads: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_reads_details: Option<Rate>,
    pub disk_writes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_writes_details: Option<Rate>,
}

/// Cluster-wide message counts. The broker sends `[]` instead of an object while it has not
/// computed them yet, hence the `empty_as_none` on every embedding field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueTotals {
    pub messages: u64,
    #[serde(with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub messages_details: Option<Rate>,
    pub messages_ready: u64,
    #[serde(with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub messages_ready_details: Option<Rate>,
    pub messages_unacknowledged: u64,
    #[serde(with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub messages_unacknowledged_details: Option<Rate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTotals {
    pub consumers: u64,
    pub queues: u64,
    pub exchanges: u64,
    pub connections: u64,
    pub channels: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rate_with_samples_round_trips() {
        let text = r#"{"rate":0.4,"samples":[{"sample":12,"timestamp":1700000005000},{"sample":10,"timestamp":1700000000000}],"avg_rate":0.4,"avg":11.0}"#;
        let rate: Rate = serde_json::from_str(text).unwrap();
        assert_eq!(rate.samples.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            rate.samples.as_ref().unwrap()[0].timestamp.timestamp_millis(),
            1_700_000_005_000
        );
        assert_eq!(serde_json::to_string(&rate).unwrap(), text);
    }

    #[test]
    fn non_finite_rate() {
        let rate: Rate = serde_json::from_str(r#"{"rate":"Infinity"}"#).unwrap();
        assert!(rate.rate.is_infinite());
    }

    #[test]
    fn queue_totals_tolerate_empty_details() {
        let totals: QueueTotals = serde_json::from_str(
            r#"{"messages":3,"messages_details":[],"messages_ready":1,"messages_ready_details":{"rate":0.0}}"#,
        )
        .unwrap();
        assert_eq!(totals.messages, 3);
        assert_eq!(totals.messages_details, None);
        assert_eq!(totals.messages_ready_details, Some(Rate::default()));
    }

    #[test]
    fn message_stats_missing_counters_default() {
        let stats: MessageStats =
            serde_json::from_str(r#"{"publish":7,"publish_details":{"rate":1.5}}"#).unwrap();
        assert_eq!(stats.publish, 7);
        assert_eq!(stats.ack, 0);
        assert_eq!(stats.publish_details.map(|d| d.rate), Some(1.5));
    }
}
