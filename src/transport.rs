// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the RabbitMQ Management library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The HTTP collaborator used by [ManagementClient](crate::ManagementClient).
//!
//! The client only needs "send a request, get back a status code and a body". [Transport] is that
//! seam; [SurfTransport] is the default implementation on top of [surf].

use crate::config::ClientConfig;
use crate::error::{ClientError, Error, InvalidUrlSnafu, Result};
use base64::Engine;
use futures::future::BoxFuture;
use snafu::ResultExt;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use surf::http::mime;
use surf::{Client, Request, Url};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    /// Status codes the management API answers with when an operation of this kind succeeds.
    pub fn accepted_statuses(self) -> &'static [u16] {
        match self {
            Method::Get => &[200],
            Method::Put | Method::Post => &[200, 201, 204],
            Method::Delete => &[204],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for surf::http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => surf::http::Method::Get,
            Method::Put => surf::http::Method::Put,
            Method::Post => surf::http::Method::Post,
            Method::Delete => surf::http::Method::Delete,
        }
    }
}

/// A request to the management API. `path_and_query` is relative to the API root and already
/// escaped.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub path_and_query: String,
    pub body: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends requests to a management API endpoint.
///
/// Implementations own connection handling, authentication headers and timeouts. They must not
/// interpret status codes; that is the client's job.
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>>;
}

/// [Transport] backed by a [surf::Client] with HTTP basic authentication.
pub struct SurfTransport {
    client: Client,
    base_url: Url,
    authorization: String,
}

impl SurfTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url();
        let base_url = Url::parse(&base_url).context(InvalidUrlSnafu { url: base_url })?;
        let client = Client::try_from(surf::Config::new().set_timeout(Some(config.timeout())))
            .map_err(|err| Error::Transport {
                message: format!("unable to build http client: {}", err),
            })?;
        let credentials = format!("{}:{}", config.username(), config.password());
        let authorization = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        );
        Ok(Self {
            client,
            base_url,
            authorization,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send_request(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = self
            .base_url
            .join(&request.path_and_query)
            .context(InvalidUrlSnafu {
                url: request.path_and_query.clone(),
            })?;
        let mut req = Request::new(request.method.into(), url);
        req.insert_header("Authorization", self.authorization.as_str());
        req.insert_header("Accept", "application/json");
        if let Some(body) = request.body {
            req.set_body(body);
            req.set_content_type(mime::JSON);
        }
        let mut res = self.client.send(req).await.context(ClientError)?;
        let body = res.body_bytes().await.context(ClientError)?;
        Ok(TransportResponse {
            status: res.status() as u16,
            body,
        })
    }
}

impl Transport for SurfTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse>> {
        Box::pin(self.send_request(request))
    }
}

impl TryFrom<&ClientConfig> for SurfTransport {
    type Error = Error;

    fn try_from(config: &ClientConfig) -> Result<Self> {
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepted_statuses_per_method() {
        assert_eq!(Method::Get.accepted_statuses(), &[200]);
        assert_eq!(Method::Put.accepted_statuses(), &[200, 201, 204]);
        assert_eq!(Method::Post.accepted_statuses(), &[200, 201, 204]);
        assert_eq!(Method::Delete.accepted_statuses(), &[204]);
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn transport_targets_configured_base_url() {
        let config = ClientConfig::new("http://localhost", "guest", "guest").with_port(15673);
        let transport = SurfTransport::new(&config).unwrap();
        assert_eq!(transport.base_url().as_str(), "http://localhost:15673/api/");
        assert_eq!(
            transport
                .base_url()
                .join("queues/%2f/q%2Bplus")
                .unwrap()
                .as_str(),
            "http://localhost:15673/api/queues/%2f/q%2Bplus"
        );
    }
}
