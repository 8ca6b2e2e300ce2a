use serde::{Deserialize, Serialize};

/// Matches every resource name.
pub const ALLOW_ALL: &str = ".*";
/// Matches no resource name.
pub const DENY_ALL: &str = "^$";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub user: String,
    pub vhost: String,
    pub configure: String,
    pub write: String,
    pub read: String,
}

/// Body of a permission PUT. Starts out allowing everything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PermissionInfo {
    configure: String,
    write: String,
    read: String,
}

impl Default for PermissionInfo {
    fn default() -> Self {
        Self {
            configure: ALLOW_ALL.to_string(),
            write: ALLOW_ALL.to_string(),
            read: ALLOW_ALL.to_string(),
        }
    }
}

impl PermissionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&self) -> &str {
        &self.configure
    }

    pub fn write(&self) -> &str {
        &self.write
    }

    pub fn read(&self) -> &str {
        &self.read
    }

    pub fn set_configure(self, regex: impl Into<String>) -> Self {
        Self {
            configure: regex.into(),
            ..self
        }
    }

    pub fn set_write(self, regex: impl Into<String>) -> Self {
        Self {
            write: regex.into(),
            ..self
        }
    }

    pub fn set_read(self, regex: impl Into<String>) -> Self {
        Self {
            read: regex.into(),
            ..self
        }
    }

    pub fn deny_all_configure(self) -> Self {
        self.set_configure(DENY_ALL)
    }

    pub fn deny_all_write(self) -> Self {
        self.set_write(DENY_ALL)
    }

    pub fn deny_all_read(self) -> Self {
        self.set_read(DENY_ALL)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPermission {
    pub user: String,
    pub vhost: String,
    pub exchange: String,
    pub write: String,
    pub read: String,
}

/// Body of a topic permission PUT, scoped to one topic exchange. Starts out allowing every
/// routing key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicPermissionInfo {
    exchange: String,
    write: String,
    read: String,
}

impl TopicPermissionInfo {
    pub fn new(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            write: ALLOW_ALL.to_string(),
            read: ALLOW_ALL.to_string(),
        }
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn write(&self) -> &str {
        &self.write
    }

    pub fn read(&self) -> &str {
        &self.read
    }

    pub fn set_write(self, regex: impl Into<String>) -> Self {
        Self {
            write: regex.into(),
            ..self
        }
    }

    pub fn set_read(self, regex: impl Into<String>) -> Self {
        Self {
            read: regex.into(),
            ..self
        }
    }

    pub fn deny_all_write(self) -> Self {
        self.set_write(DENY_ALL)
    }

    pub fn deny_all_read(self) -> Self {
        self.set_read(DENY_ALL)
    }
}
