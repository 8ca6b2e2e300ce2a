use crate::serialization::{Arguments, JsonValue};
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum DestinationType {
        Queue = "queue",
        Exchange = "exchange",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Empty for the implicit binding of every queue to the default exchange.
    pub source: String,
    pub vhost: String,
    pub destination: String,
    pub destination_type: DestinationType,
    #[serde(default)]
    pub routing_key: String,
    #[serde(default)]
    pub arguments: Arguments,
    /// Broker-computed key that tells apart bindings with the same source, destination and
    /// routing key. Needed to delete a specific binding.
    #[serde(default)]
    pub properties_key: String,
}

/// Body of a binding POST.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BindingInfo {
    pub routing_key: String,
    pub arguments: Arguments,
}

impl BindingInfo {
    pub fn new(routing_key: impl Into<String>) -> Self {
        Self {
            routing_key: routing_key.into(),
            arguments: Arguments::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }
}
