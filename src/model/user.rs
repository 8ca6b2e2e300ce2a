use super::Extra;
use crate::error::{invalid, require_non_empty, Result};
use crate::serialization::{empty_as_none, user_tags, Arguments};
use serde::{Deserialize, Serialize};

/// Tags the management plugin understands.
pub const USER_TAGS: &[&str] = &[
    "administrator",
    "monitoring",
    "management",
    "policymaker",
    "impersonator",
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default)]
    pub hashing_algorithm: String,
    #[serde(default, with = "user_tags")]
    pub tags: Vec<String>,
    #[serde(default, with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub limits: Option<Arguments>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The authenticated user, as reported by `whoami`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    #[serde(default, with = "user_tags")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of a user PUT. The name travels in the path.
///
/// Exactly one of `password` and `password_hash` is set. An empty hash is accepted and creates
/// a user that cannot log in with a password.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserInfo {
    #[serde(skip)]
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password_hash: Option<String>,
    #[serde(serialize_with = "user_tags::serialize_comma_separated")]
    tags: Vec<String>,
}

impl UserInfo {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let password = password.into();
        require_non_empty("user name", &name)?;
        require_non_empty("password", &password)?;
        Ok(Self {
            name,
            password: Some(password),
            password_hash: None,
            tags: Vec::new(),
        })
    }

    /// A user with a pre-hashed password, as produced by `rabbitmqctl hash_password`.
    pub fn with_hash(name: impl Into<String>, password_hash: impl Into<String>) -> Result<Self> {
        let name = name.into();
        require_non_empty("user name", &name)?;
        Ok(Self {
            name,
            password: None,
            password_hash: Some(password_hash.into()),
            tags: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Carry over tags the broker already holds for this user, without checking them.
    pub(crate) fn with_existing_tags(self, tags: Vec<String>) -> Self {
        Self { tags, ..self }
    }

    /// Add a tag from [USER_TAGS]. Adding a tag twice is an error.
    pub fn add_tag(mut self, tag: &str) -> Result<Self> {
        if !USER_TAGS.contains(&tag) {
            return Err(invalid(
                "user tag",
                format!("{:?} is not one of {:?}", tag, USER_TAGS),
            ));
        }
        if self.tags.iter().any(|t| t == tag) {
            return Err(invalid("user tag", format!("{:?} is already set", tag)));
        }
        self.tags.push(tag.to_string());
        Ok(self)
    }
}
