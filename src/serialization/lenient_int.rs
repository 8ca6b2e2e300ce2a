//! Integers the broker sometimes replaces with a placeholder.
//!
//! Connection `port` and `peer_port` come back as `"unknown"` for direct (in-node) connections.
//! A JSON number decodes normally, including an integral float such as `5672.0`. A numeric string
//! is parsed. Anything else decodes to zero instead of failing the whole response. Numbers that
//! overflow the target type or have a fractional part are still an error.

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserializer, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt::{self, Formatter};
use std::marker::PhantomData;
use std::str::FromStr;

pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    value.serialize(serializer)
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + TryFrom<u64> + FromStr + Default,
{
    deserializer.deserialize_any(LenientInt(PhantomData))
}

struct LenientInt<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for LenientInt<T>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr + Default,
{
    type Value = T;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("an integer in range")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<T, E> {
        if !v.is_finite() || v.fract() != 0.0 || v < i64::MIN as f64 || v >= u64::MAX as f64 {
            return Err(E::invalid_value(Unexpected::Float(v), &self));
        }
        if v < 0.0 {
            self.visit_i64(v as i64)
        } else {
            self.visit_u64(v as u64)
        }
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        Ok(v.trim().parse().unwrap_or_default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<T, E> {
        Ok(T::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
        deserializer.deserialize_any(self)
    }
}
