use serde::{Deserialize, Serialize};
use std::vec::IntoIter;

/// A value the broker accepts either as a single item or as a list, e.g. a federation upstream
/// `uri`. The shape that was read is the shape that gets written back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(many) => many.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(one) => Some(one),
            OneOrMany::Many(many) => many.first(),
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(one: T) -> Self {
        OneOrMany::One(one)
    }
}

impl<T> IntoIterator for OneOrMany<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::One(one) => vec![one].into_iter(),
            Self::Many(many) => many.into_iter(),
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keeps_shape() {
        let one: OneOrMany<String> = serde_json::from_str(r#""amqp://a""#).unwrap();
        assert_eq!(one, OneOrMany::One("amqp://a".to_string()));
        assert_eq!(serde_json::to_string(&one).unwrap(), r#""amqp://a""#);

        let many: OneOrMany<String> = serde_json::from_str(r#"["amqp://a","amqp://b"]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many.first().map(String::as_str), Some("amqp://a"));
        assert_eq!(
            serde_json::to_string(&many).unwrap(),
            r#"["amqp://a","amqp://b"]"#
        );
        assert_eq!(Vec::from(many), vec!["amqp://a".to_string(), "amqp://b".to_string()]);
    }
}
