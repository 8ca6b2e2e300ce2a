use crate::error::{invalid, require_non_empty, Result};
use humantime::parse_duration;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

/// Connection settings for a management API endpoint.
///
/// Can be deserialized from an application-level configuration section. The `timeout` accepts
/// either a human-readable duration (`"20s"`, `"1m 30s"`) or an integer number of seconds.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    host_url: String,
    port: u16,
    username: String,
    password: String,
    #[serde(deserialize_with = "deserialize_timeout")]
    timeout: Duration,
    path_prefix: Option<String>,
}

impl ClientConfig {
    pub fn new(
        host_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host_url: host_url.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_port(self, port: u16) -> Self {
        Self { port, ..self }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Serve the API from below `prefix`, for brokers behind a path-routing reverse proxy.
    pub fn with_path_prefix(self, prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: Some(prefix.into()),
            ..self
        }
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }

    pub fn validate(&self) -> Result<()> {
        require_non_empty("host_url", &self.host_url)?;
        if !(self.host_url.starts_with("http://") || self.host_url.starts_with("https://")) {
            return Err(invalid(
                "host_url",
                format!("{} must start with http:// or https://", self.host_url),
            ));
        }
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        if self.timeout == Duration::ZERO {
            return Err(invalid("timeout", "must be positive"));
        }
        Ok(())
    }

    /// The API root, always ending in `api/`.
    pub fn base_url(&self) -> String {
        let host = self.host_url.trim_end_matches('/');
        match self
            .path_prefix
            .as_deref()
            .map(|prefix| prefix.trim_matches('/'))
            .filter(|prefix| !prefix.is_empty())
        {
            Some(prefix) => format!("{}:{}/{}/api/", host, self.port, prefix),
            None => format!("{}:{}/api/", host, self.port),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host_url: String::new(),
            port: 15672,
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(20),
            path_prefix: None,
        }
    }
}

// Keeps the password out of logs.
impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host_url", &self.host_url)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimeoutRepr {
    Seconds(u64),
    Human(String),
}

fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match TimeoutRepr::deserialize(deserializer)? {
        TimeoutRepr::Seconds(secs) => Ok(Duration::from_secs(secs)),
        TimeoutRepr::Human(text) => parse_duration(&text).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("http://localhost", "guest", "guest");
        assert_eq!(config.port(), 15672);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.base_url(), "http://localhost:15672/api/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_with_prefix() {
        let config =
            ClientConfig::new("https://broker/", "guest", "guest").with_path_prefix("/rabbit/");
        assert_eq!(config.base_url(), "https://broker:15672/rabbit/api/");
    }

    #[test]
    fn rejects_bad_input() {
        let err = ClientConfig::new("localhost", "guest", "guest")
            .validate()
            .unwrap_err();
        assert!(err.is_validation());

        assert!(ClientConfig::new("http://localhost", "", "guest")
            .validate()
            .is_err());
        assert!(ClientConfig::new("http://localhost", "guest", "")
            .validate()
            .is_err());
    }

    #[test]
    fn deserialize_from_json() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"host_url":"http://rabbit","username":"admin","password":"secret","timeout":"1m 30s"}"#,
        )
        .unwrap();
        assert_eq!(config.host_url(), "http://rabbit");
        assert_eq!(config.port(), 15672);
        assert_eq!(config.timeout(), Duration::from_secs(90));

        let config: ClientConfig =
            serde_json::from_str(r#"{"host_url":"http://rabbit","port":8080,"timeout":5}"#)
                .unwrap();
        assert_eq!(config.port(), 8080);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn debug_hides_password() {
        let config = ClientConfig::new("http://localhost", "guest", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
