use crate::error::{require_non_empty, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A queue addressed by name within a vhost.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueName {
    pub name: String,
    pub vhost: String,
}

impl QueueName {
    pub fn new(name: impl Into<String>, vhost: impl Into<String>) -> Result<Self> {
        let (name, vhost) = (name.into(), vhost.into());
        require_non_empty("queue name", &name)?;
        require_non_empty("vhost", &vhost)?;
        Ok(Self { name, vhost })
    }
}

impl Display for QueueName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vhost, self.name)
    }
}

/// An exchange addressed by name within a vhost.
///
/// Unlike queues, the empty name is valid here: it is the default exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeName {
    pub name: String,
    pub vhost: String,
}

impl ExchangeName {
    pub fn new(name: impl Into<String>, vhost: impl Into<String>) -> Result<Self> {
        let (name, vhost) = (name.into(), vhost.into());
        require_non_empty("vhost", &vhost)?;
        Ok(Self { name, vhost })
    }

    /// Path segment for this exchange. The default exchange is addressed as `amq.default`.
    pub fn path_name(&self) -> &str {
        if self.name.is_empty() {
            "amq.default"
        } else {
            &self.name
        }
    }
}

impl Display for ExchangeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vhost, self.path_name())
    }
}
