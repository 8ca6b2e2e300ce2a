// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the RabbitMQ Management library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::transport::Method;
use snafu::{IntoError, Snafu};

/// Errors produced by the management client.
///
/// The variants fall into three groups. [Error::Validation] is raised before any I/O, while a
/// request payload or an identifier is being put together. [Error::Decode] and [Error::Encode]
/// come out of the serialization layer. [Error::UnexpectedStatus] and [Error::Transport] depend on
/// a round trip to the broker. None of them are retried by this crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("invalid {}: {}", field, reason))]
    Validation { field: &'static str, reason: String },

    #[snafu(display("failed to decode {}: {}", target, source))]
    Decode {
        target: &'static str,
        source: serde_json::Error,
    },

    #[snafu(display("failed to encode {}: {}", target, source))]
    Encode {
        target: &'static str,
        source: serde_json::Error,
    },

    #[snafu(display("unexpected status {} for {} {}", status, method, path))]
    UnexpectedStatus {
        method: Method,
        path: String,
        status: u16,
        body: Option<String>,
    },

    #[snafu(display("transport failure: {}", message))]
    Transport { message: String },

    #[snafu(display("invalid url {}: {}", url, source))]
    InvalidUrl {
        url: String,
        source: surf::http::url::ParseError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// The HTTP status reported by the broker, if this error came from a completed round trip.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Convert a [surf::Error] raised by the HTTP stack into a transport error.
    ///
    /// [surf::Error] does not implement [std::error::Error], so it is flattened into its
    /// [Display](std::fmt::Display) form rather than kept as a source.
    pub fn from_client_error(source: surf::Error) -> Self {
        Error::Transport {
            message: format!("{} ({})", source, source.status()),
        }
    }
}

/// Build a validation error for `field`.
pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::Validation {
        field,
        reason: reason.into(),
    }
}

/// Fail with a validation error if `value` is empty.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(invalid(field, "must not be empty"))
    } else {
        Ok(())
    }
}

/// Context for embedding [surf] errors into [Error].
///
/// This type implements the [IntoError] trait from SNAFU, so it can be used with
/// [ResultExt::context](snafu::ResultExt::context) just like automatically generated SNAFU
/// contexts. Calling `some_result.context(ClientError)` converts a potential [surf::Error] using
/// [Error::from_client_error].
pub struct ClientError;

impl IntoError<Error> for ClientError {
    type Source = surf::Error;

    fn into_error(self, source: Self::Source) -> Error {
        Error::from_client_error(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_only_for_round_trip_errors() {
        let err = Error::UnexpectedStatus {
            method: Method::Get,
            path: "api/queues/%2f/missing".into(),
            status: 404,
            body: None,
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "unexpected status 404 for GET api/queues/%2f/missing"
        );

        let err = invalid("name", "must not be empty");
        assert_eq!(err.status(), None);
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "invalid name: must not be empty");
    }

    #[test]
    fn require_non_empty_rejects_empty() {
        assert!(require_non_empty("vhost", "/").is_ok());
        assert!(require_non_empty("vhost", "").unwrap_err().is_validation());
    }
}
