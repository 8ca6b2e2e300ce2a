// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the RabbitMQ Management library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Typed client for the RabbitMQ management HTTP API.
//!
//! Everything the management plugin reports or accepts corresponds to a Rust data structure in
//! [model] via serde. The broker's JSON is not always regular: optional objects are sometimes sent
//! as `[]`, some numbers arrive as strings, some floats as `"NaN"` or `"Infinity"`, and a few
//! fields are either a scalar or a list. The converters in [serialization] absorb these
//! differences so that the model types can stay plain, and fields a model type does not declare
//! are kept so that re-encoding a decoded value loses nothing.
//!
//! [ManagementClient] issues the requests. Resource names are escaped segment by segment by
//! [path] and [sanitize] before they go into a URL, and request payloads are validated when they
//! are built, so invalid input is rejected before any I/O. The HTTP layer sits behind the
//! [Transport](transport::Transport) trait; the default implementation uses `surf`.
//!
//! ```no_run
//! # use rabbitmq_management::{ClientConfig, ManagementClient, QueueInfo, QueueName};
//! # async fn example() -> rabbitmq_management::Result<()> {
//! let config = ClientConfig::new("http://localhost", "guest", "guest");
//! let client = ManagementClient::new(&config)?;
//! client.create_queue("/", &QueueInfo::new("orders")?).await?;
//! let queue = client.get_queue(&QueueName::new("orders", "/")?, None).await?;
//! println!("{} has {} messages", queue.name, queue.messages);
//! # Ok(())
//! # }
//! ```

#[macro_use]
pub mod serialization;

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod path;
pub mod sanitize;
pub mod transport;

pub use client::ManagementClient;
pub use config::ClientConfig;
pub use error::*;
pub use model::*;
