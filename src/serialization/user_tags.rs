//! User tags, which older brokers report as a comma-separated string and newer ones as an array.
//!
//! Both shapes decode to the same ordered list. [serialize] writes an array;
//! [serialize_comma_separated] writes the string form, which every broker version accepts in a
//! user PUT body.

use itertools::Itertools;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserializer, Serialize, Serializer};
use std::fmt::{self, Formatter};

pub fn serialize<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    tags.serialize(serializer)
}

pub fn serialize_comma_separated<S: Serializer>(
    tags: &[String],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&tags.iter().join(","))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    deserializer.deserialize_any(Tags)
}

/// Split a comma-separated tag string, dropping blanks.
pub fn split(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

struct Tags;

impl<'de> Visitor<'de> for Tags {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a comma-separated tag string or an array of tags")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Vec<String>, E> {
        Ok(split(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
        let mut tags = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(tag) = seq.next_element::<String>()? {
            tags.push(tag);
        }
        Ok(tags)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Vec<String>, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Vec<String>, E> {
        Ok(Vec::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Vec<String>, D::Error> {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Tagged {
        #[serde(default, with = "super")]
        tags: Vec<String>,
    }

    fn tags(text: &str) -> Vec<String> {
        serde_json::from_str::<Tagged>(text).unwrap().tags
    }

    #[test]
    fn string_and_array_forms_agree() {
        let expected = vec!["administrator".to_string(), "management".to_string()];
        assert_eq!(tags(r#"{"tags":"administrator,management"}"#), expected);
        assert_eq!(tags(r#"{"tags":["administrator","management"]}"#), expected);
        assert_eq!(tags(r#"{"tags":" administrator , management ,"}"#), expected);
    }

    #[test]
    fn empty_forms() {
        assert!(tags(r#"{"tags":""}"#).is_empty());
        assert!(tags(r#"{"tags":[]}"#).is_empty());
        assert!(tags(r#"{"tags":null}"#).is_empty());
        assert!(tags("{}").is_empty());
    }

    #[test]
    fn rejects_numbers() {
        assert!(serde_json::from_str::<Tagged>(r#"{"tags":5}"#).is_err());
    }

    #[test]
    fn writes_array() {
        let tagged = Tagged {
            tags: vec!["monitoring".into()],
        };
        assert_eq!(
            serde_json::to_string(&tagged).unwrap(),
            r#"{"tags":["monitoring"]}"#
        );
    }
}
