// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the RabbitMQ Management library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! JSON encoding and the converters for the broker's irregular wire shapes.
//!
//! Converters are plain `#[serde(with = "...")]` modules and visitor-based types. They hold no
//! state, so there is no process-wide serializer configuration to set up: the set of converters a
//! type uses is fixed by its own attributes.

#[macro_use]
mod wire_enum;

pub mod empty_as_none;
pub mod epoch_millis;
mod ha_params;
pub mod lenient_int;
mod one_or_many;
pub mod special_float;
pub mod user_tags;
mod value;

pub use ha_params::HaParams;
pub use one_or_many::OneOrMany;
pub use value::{Arguments, JsonValue};

use crate::error::{DecodeSnafu, EncodeSnafu, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use snafu::ResultExt;
use std::any::type_name;

/// Decode a response body.
///
/// Errors carry the name of the type being decoded, and serde_json's message carries the
/// converter's expectation and the position in the body.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).context(DecodeSnafu {
        target: type_name::<T>(),
    })
}

/// Encode a request body.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).context(EncodeSnafu {
        target: type_name::<T>(),
    })
}

/// Render a value as compact JSON, for [Display](std::fmt::Display) implementations.
pub fn fmt_as_json<T: Serialize>(v: &T, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let string = serde_json::to_string(v).map_err(|_| std::fmt::Error)?;
    write!(f, "{}", string)
}
