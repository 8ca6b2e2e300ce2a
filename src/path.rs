//! Composition of management API resource paths and query strings.
//!
//! Paths are relative to the API root (see [ClientConfig::base_url](crate::ClientConfig::base_url)).
//! Each segment is escaped independently according to what it holds, so a `/` inside a queue
//! name never becomes a path separator.

use crate::error::{EncodeSnafu, Result};
use crate::naming::SNAKE_CASE;
use crate::sanitize::{escape_properties_key, sanitize_name, sanitize_vhost};
use itertools::Itertools;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use serde_json::Value;
use snafu::ResultExt;
use std::any::type_name;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'=')
    .add(b'?');

// The sanitizer characters (`/ + # : [ ]`) are left out so they keep their own spellings.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).into()
}

/// An ordered set of query-string parameters.
///
/// Keys go through the same snake_case rule as model field names, so `PageSize` and `page_size`
/// both end up as `page_size`. Values are percent-encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        self.pairs
            .push((SNAKE_CASE.wire_name(key).into_owned(), value.to_string()));
        self
    }

    /// Flatten a serializable criteria struct into query parameters. `None` and `null` fields are
    /// skipped; nested objects and arrays are not supported by the API and are skipped too.
    pub fn from_criteria<T: Serialize>(criteria: Option<&T>) -> Result<Self> {
        let mut query = Self::new();
        let criteria = match criteria {
            Some(criteria) => criteria,
            None => return Ok(query),
        };
        let value = serde_json::to_value(criteria).context(EncodeSnafu {
            target: type_name::<T>(),
        })?;
        if let Value::Object(map) = value {
            for (key, value) in map {
                query = match value {
                    Value::String(s) => query.push(&key, s),
                    Value::Number(n) => query.push(&key, n),
                    Value::Bool(b) => query.push(&key, b),
                    Value::Null | Value::Array(_) | Value::Object(_) => query,
                };
            }
        }
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.pairs
                .iter()
                .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, QUERY_ENCODE_SET)))
                .join("&")
        )
    }
}

/// Builder for a relative resource path such as `queues/%2f/my-queue/bindings`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
    query: Query,
}

impl ResourcePath {
    pub fn new(root: &'static str) -> Self {
        Self {
            segments: vec![root.to_string()],
            query: Query::new(),
        }
    }

    /// A fixed path segment, inserted verbatim.
    pub fn segment(mut self, segment: &'static str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    pub fn vhost(mut self, vhost: &str) -> Self {
        let encoded = encode_segment(vhost);
        self.segments.push(sanitize_vhost(&encoded).into_owned());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        let encoded = encode_segment(name);
        self.segments.push(sanitize_name(&encoded).into_owned());
        self
    }

    pub fn properties_key(mut self, properties_key: &str) -> Self {
        self.segments
            .push(escape_properties_key(properties_key).into_owned());
        self
    }

    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join("/"))?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}
