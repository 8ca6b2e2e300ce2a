use serde::de::{self, SeqAccess, Unexpected, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Formatter};

/// The `ha-params` policy key: a replica count for `ha-mode: exactly`, or a node list for
/// `ha-mode: nodes`.
///
/// The two shapes are not interchangeable, so the variant read from the wire is kept and written
/// back in the same shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HaParams {
    Count(u64),
    Nodes(Vec<String>),
}

impl HaParams {
    pub fn count(&self) -> Option<u64> {
        match self {
            HaParams::Count(n) => Some(*n),
            HaParams::Nodes(_) => None,
        }
    }

    pub fn nodes(&self) -> Option<&[String]> {
        match self {
            HaParams::Count(_) => None,
            HaParams::Nodes(nodes) => Some(nodes),
        }
    }
}

impl Serialize for HaParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HaParams::Count(n) => serializer.serialize_u64(*n),
            HaParams::Nodes(nodes) => {
                let mut seq = serializer.serialize_seq(Some(nodes.len()))?;
                for node in nodes {
                    seq.serialize_element(node)?;
                }
                seq.end()
            }
        }
    }
}

struct HaParamsVisitor;

impl<'de> Visitor<'de> for HaParamsVisitor {
    type Value = HaParams;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a replica count or a list of node names")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<HaParams, E> {
        Ok(HaParams::Count(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<HaParams, E> {
        if v < 0 {
            Err(E::invalid_value(Unexpected::Signed(v), &self))
        } else {
            Ok(HaParams::Count(v as u64))
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<HaParams, A::Error> {
        let mut nodes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(node) = seq.next_element::<String>()? {
            nodes.push(node);
        }
        Ok(HaParams::Nodes(nodes))
    }
}

impl<'de> Deserialize<'de> for HaParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(HaParamsVisitor)
    }
}
