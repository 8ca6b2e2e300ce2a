use super::stats::MessageStats;
use super::Extra;
use crate::error::{require_non_empty, Result};
use crate::serialization::{empty_as_none, Arguments, JsonValue};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};

/// The exchange type. Plugins register their own types, so anything that is not one of the
/// built-ins is kept as [ExchangeKind::Custom].
///
/// `Custom` is meant for plugin types only. A built-in name inside it decodes back as the
/// built-in variant; build kinds from strings with [ExchangeKind::from] or [ExchangeKind::custom]
/// to get the canonical variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExchangeKind {
    Custom(String),
    #[default]
    Direct,
    Fanout,
    Headers,
    Topic,
}

impl ExchangeKind {
    /// A plugin exchange type. Built-in names map to their own variant.
    pub fn custom(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        match kind.as_str() {
            "direct" | "fanout" | "headers" | "topic" => Self::from(kind.as_str()),
            _ => Self::Custom(kind),
        }
    }

    /// The same kind with a built-in name held in `Custom` replaced by its variant.
    pub fn normalized(self) -> Self {
        match self {
            Self::Custom(kind) => Self::custom(kind),
            other => other,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Custom(c) => c.as_str(),
            Self::Direct => "direct",
            Self::Fanout => "fanout",
            Self::Headers => "headers",
            Self::Topic => "topic",
        }
    }
}

impl From<&str> for ExchangeKind {
    fn from(kind: &str) -> Self {
        match kind {
            "direct" => Self::Direct,
            "fanout" => Self::Fanout,
            "headers" => Self::Headers,
            "topic" => Self::Topic,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl Display for ExchangeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

impl Serialize for ExchangeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.kind())
    }
}

impl<'de> Deserialize<'de> for ExchangeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|kind| ExchangeKind::from(kind.as_str()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub name: String,
    pub vhost: String,
    #[serde(rename = "type")]
    pub kind: ExchangeKind,
    #[serde(default)]
    pub durable: bool,
    #[serde(default)]
    pub auto_delete: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub arguments: Arguments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_who_performed_action: Option<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub message_stats: Option<MessageStats>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// An exchange type offered by the broker, as listed in the overview and node reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Body of an exchange PUT. The name travels in the path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExchangeInfo {
    #[serde(skip)]
    name: String,
    #[serde(rename = "type")]
    pub kind: ExchangeKind,
    pub auto_delete: bool,
    pub durable: bool,
    pub internal: bool,
    pub arguments: Arguments,
}

impl ExchangeInfo {
    /// A durable, non-internal exchange that is not auto-deleted.
    pub fn new(name: impl Into<String>, kind: impl Into<ExchangeKind>) -> Result<Self> {
        let name = name.into();
        require_non_empty("exchange name", &name)?;
        let kind = kind.into().normalized();
        require_non_empty("exchange type", kind.kind())?;
        Ok(Self {
            name,
            kind,
            auto_delete: false,
            durable: true,
            internal: false,
            arguments: Arguments::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_durable(self, durable: bool) -> Self {
        Self { durable, ..self }
    }

    pub fn with_auto_delete(self, auto_delete: bool) -> Self {
        Self {
            auto_delete,
            ..self
        }
    }

    pub fn with_internal(self, internal: bool) -> Self {
        Self { internal, ..self }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_alternate_exchange(self, exchange: impl Into<String>) -> Self {
        self.with_argument("alternate-exchange", exchange.into())
    }
}
