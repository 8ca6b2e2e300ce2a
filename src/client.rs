// Copyright (c) 2022 Espresso Systems (espressosys.com)
// This file is part of the RabbitMQ Management library.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The management client facade.
//!
//! Every operation follows the same steps: validate the arguments, build a [ResourcePath], encode
//! the body if there is one, hand the request to the [Transport], check the status against what
//! the method is expected to return, and decode the response. Validation failures never reach
//! the transport.

use crate::config::ClientConfig;
use crate::error::{invalid, require_non_empty, Error, Result};
use crate::model::*;
use crate::path::{Query, ResourcePath};
use crate::serialization::{decode, encode};
use crate::transport::{Method, SurfTransport, Transport, TransportRequest, TransportResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{event, Level};

/// Decode the body of a successful response.
pub fn response_body<T: DeserializeOwned>(res: &TransportResponse) -> Result<T> {
    decode(&res.body)
}

/// Turn a response whose status is not accepted for `method` into an error.
///
/// The body, if any, is kept in the error as text, since the broker explains most rejections
/// there (`{"error":"not_found","reason":"Object Not Found"}`).
pub fn response_to_result(
    method: Method,
    path: &str,
    res: TransportResponse,
) -> Result<TransportResponse> {
    if method.accepted_statuses().contains(&res.status) {
        Ok(res)
    } else {
        let body = if res.body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&res.body).into_owned())
        };
        event!(
            Level::WARN,
            %method,
            path,
            status = res.status,
            "management API returned an unexpected status"
        );
        Err(Error::UnexpectedStatus {
            method,
            path: path.to_string(),
            status: res.status,
            body,
        })
    }
}

#[derive(Serialize)]
struct TracingBody {
    tracing: bool,
}

/// Client for the RabbitMQ management HTTP API.
///
/// The client is generic over its [Transport] so it can run against anything that answers
/// "status code and body" for a request. [ManagementClient::new] builds the default
/// [SurfTransport].
pub struct ManagementClient<T = SurfTransport> {
    transport: T,
}

impl ManagementClient<SurfTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(SurfTransport::new(config)?))
    }
}

impl<T: Transport> ManagementClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(
        &self,
        method: Method,
        path: ResourcePath,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse> {
        let path_and_query = path.to_string();
        event!(Level::DEBUG, %method, path = %path_and_query, "management request");
        let res = self
            .transport
            .send(TransportRequest {
                method,
                path_and_query: path_and_query.clone(),
                body,
            })
            .await?;
        response_to_result(method, &path_and_query, res)
    }

    async fn get<R: DeserializeOwned>(&self, path: ResourcePath) -> Result<R> {
        let res = self.send(Method::Get, path, None).await?;
        response_body(&res)
    }

    async fn put<B: Serialize>(&self, path: ResourcePath, body: &B) -> Result<()> {
        self.send(Method::Put, path, Some(encode(body)?)).await?;
        Ok(())
    }

    async fn post<B: Serialize>(&self, path: ResourcePath, body: &B) -> Result<TransportResponse> {
        self.send(Method::Post, path, Some(encode(body)?)).await
    }

    async fn delete(&self, path: ResourcePath) -> Result<()> {
        self.send(Method::Delete, path, None).await?;
        Ok(())
    }

    // Cluster

    pub async fn get_overview(&self) -> Result<Overview> {
        self.get(ResourcePath::new("overview")).await
    }

    pub async fn get_nodes(&self) -> Result<Vec<Node>> {
        self.get(ResourcePath::new("nodes")).await
    }

    pub async fn get_node(&self, name: &str) -> Result<Node> {
        require_non_empty("node name", name)?;
        self.get(ResourcePath::new("nodes").name(name)).await
    }

    pub async fn get_definitions(&self) -> Result<Definitions> {
        self.get(ResourcePath::new("definitions")).await
    }

    pub async fn get_cluster_name(&self) -> Result<ClusterName> {
        self.get(ResourcePath::new("cluster-name")).await
    }

    pub async fn set_cluster_name(&self, name: &str) -> Result<()> {
        require_non_empty("cluster name", name)?;
        let body = ClusterName {
            name: name.to_string(),
        };
        self.put(ResourcePath::new("cluster-name"), &body).await
    }

    /// Run the broker's aliveness test in `vhost`: declare a test queue, publish to it and
    /// consume from it.
    pub async fn is_alive(&self, vhost: &str) -> Result<bool> {
        require_non_empty("vhost", vhost)?;
        let aliveness: Aliveness = self
            .get(ResourcePath::new("aliveness-test").vhost(vhost))
            .await?;
        Ok(aliveness.is_ok())
    }

    pub async fn whoami(&self) -> Result<CurrentUser> {
        self.get(ResourcePath::new("whoami")).await
    }

    // Connections, channels and consumers

    pub async fn get_connections(&self) -> Result<Vec<Connection>> {
        self.get(ResourcePath::new("connections")).await
    }

    pub async fn get_connection(&self, name: &str) -> Result<Connection> {
        require_non_empty("connection name", name)?;
        self.get(ResourcePath::new("connections").name(name)).await
    }

    pub async fn close_connection(&self, name: &str) -> Result<()> {
        require_non_empty("connection name", name)?;
        self.delete(ResourcePath::new("connections").name(name))
            .await
    }

    pub async fn get_channels(&self) -> Result<Vec<Channel>> {
        self.get(ResourcePath::new("channels")).await
    }

    pub async fn get_connection_channels(&self, connection: &str) -> Result<Vec<Channel>> {
        require_non_empty("connection name", connection)?;
        self.get(
            ResourcePath::new("connections")
                .name(connection)
                .segment("channels"),
        )
        .await
    }

    pub async fn get_channel(&self, name: &str) -> Result<Channel> {
        require_non_empty("channel name", name)?;
        self.get(ResourcePath::new("channels").name(name)).await
    }

    pub async fn get_consumers(&self) -> Result<Vec<ConsumerDetail>> {
        self.get(ResourcePath::new("consumers")).await
    }

    pub async fn get_vhost_consumers(&self, vhost: &str) -> Result<Vec<ConsumerDetail>> {
        require_non_empty("vhost", vhost)?;
        self.get(ResourcePath::new("consumers").vhost(vhost)).await
    }

    // Exchanges

    pub async fn get_exchanges(&self) -> Result<Vec<Exchange>> {
        self.get(ResourcePath::new("exchanges")).await
    }

    pub async fn get_vhost_exchanges(&self, vhost: &str) -> Result<Vec<Exchange>> {
        require_non_empty("vhost", vhost)?;
        self.get(ResourcePath::new("exchanges").vhost(vhost)).await
    }

    pub async fn get_exchange(&self, exchange: &ExchangeName) -> Result<Exchange> {
        self.get(exchange_path(exchange)?).await
    }

    pub async fn create_exchange(&self, vhost: &str, info: &ExchangeInfo) -> Result<()> {
        require_non_empty("vhost", vhost)?;
        require_non_empty("exchange name", info.name())?;
        self.put(
            ResourcePath::new("exchanges").vhost(vhost).name(info.name()),
            info,
        )
        .await
    }

    pub async fn delete_exchange(&self, exchange: &ExchangeName) -> Result<()> {
        require_non_empty("exchange name", &exchange.name)?;
        self.delete(exchange_path(exchange)?).await
    }

    /// Publish a message through `exchange`. Returns whether it was routed to any queue.
    pub async fn publish(
        &self,
        exchange: &ExchangeName,
        info: &PublishInfo,
    ) -> Result<PublishResult> {
        let res = self
            .post(exchange_path(exchange)?.segment("publish"), info)
            .await?;
        response_body(&res)
    }

    /// Bindings in which `exchange` is the source.
    pub async fn get_bindings_with_source(&self, exchange: &ExchangeName) -> Result<Vec<Binding>> {
        self.get(
            exchange_path(exchange)?
                .segment("bindings")
                .segment("source"),
        )
        .await
    }

    /// Bindings in which `exchange` is the destination.
    pub async fn get_bindings_with_destination(
        &self,
        exchange: &ExchangeName,
    ) -> Result<Vec<Binding>> {
        self.get(
            exchange_path(exchange)?
                .segment("bindings")
                .segment("destination"),
        )
        .await
    }

    // Queues

    pub async fn get_queues(&self) -> Result<Vec<Queue>> {
        self.get(ResourcePath::new("queues")).await
    }

    pub async fn get_vhost_queues(&self, vhost: &str) -> Result<Vec<Queue>> {
        require_non_empty("vhost", vhost)?;
        self.get(ResourcePath::new("queues").vhost(vhost)).await
    }

    pub async fn get_queues_by_page(&self, criteria: &PageCriteria) -> Result<PageResult<Queue>> {
        let query = Query::from_criteria(Some(criteria))?;
        self.get(ResourcePath::new("queues").query(query)).await
    }

    /// Fetch one queue. `stats` asks the broker for rate and length samples over a window.
    pub async fn get_queue(
        &self,
        queue: &QueueName,
        stats: Option<&StatsCriteria>,
    ) -> Result<Queue> {
        let query = Query::from_criteria(stats)?;
        self.get(queue_path(queue)?.query(query)).await
    }

    pub async fn create_queue(&self, vhost: &str, info: &QueueInfo) -> Result<()> {
        require_non_empty("vhost", vhost)?;
        require_non_empty("queue name", info.name())?;
        self.put(
            ResourcePath::new("queues").vhost(vhost).name(info.name()),
            info,
        )
        .await
    }

    pub async fn delete_queue(&self, queue: &QueueName) -> Result<()> {
        self.delete(queue_path(queue)?).await
    }

    /// Remove every ready message from `queue`.
    pub async fn purge_queue(&self, queue: &QueueName) -> Result<()> {
        self.delete(queue_path(queue)?.segment("contents")).await
    }

    /// Fetch messages off `queue`. Whether they stay in the queue depends on the criteria's ack
    /// mode.
    pub async fn get_messages_from_queue(
        &self,
        queue: &QueueName,
        criteria: &GetMessagesCriteria,
    ) -> Result<Vec<Message>> {
        let res = self.post(queue_path(queue)?.segment("get"), criteria).await?;
        response_body(&res)
    }

    pub async fn get_queue_bindings(&self, queue: &QueueName) -> Result<Vec<Binding>> {
        self.get(queue_path(queue)?.segment("bindings")).await
    }

    // Bindings

    pub async fn get_bindings(&self) -> Result<Vec<Binding>> {
        self.get(ResourcePath::new("bindings")).await
    }

    pub async fn get_vhost_bindings(&self, vhost: &str) -> Result<Vec<Binding>> {
        require_non_empty("vhost", vhost)?;
        self.get(ResourcePath::new("bindings").vhost(vhost)).await
    }

    /// Bindings from `exchange` to `queue`.
    pub async fn get_queue_bindings_between(
        &self,
        exchange: &ExchangeName,
        queue: &QueueName,
    ) -> Result<Vec<Binding>> {
        self.get(queue_binding_path(exchange, queue)?).await
    }

    /// Bindings from `source` to `destination`.
    pub async fn get_exchange_bindings_between(
        &self,
        source: &ExchangeName,
        destination: &ExchangeName,
    ) -> Result<Vec<Binding>> {
        self.get(exchange_binding_path(source, destination)?).await
    }

    pub async fn create_queue_binding(
        &self,
        exchange: &ExchangeName,
        queue: &QueueName,
        info: &BindingInfo,
    ) -> Result<()> {
        self.post(queue_binding_path(exchange, queue)?, info)
            .await?;
        Ok(())
    }

    pub async fn create_exchange_binding(
        &self,
        source: &ExchangeName,
        destination: &ExchangeName,
        info: &BindingInfo,
    ) -> Result<()> {
        self.post(exchange_binding_path(source, destination)?, info)
            .await?;
        Ok(())
    }

    /// Delete the binding identified by its source, destination and properties key.
    pub async fn delete_binding(&self, binding: &Binding) -> Result<()> {
        require_non_empty("vhost", &binding.vhost)?;
        if binding.source.is_empty() {
            return Err(invalid(
                "binding source",
                "bindings of the default exchange cannot be deleted",
            ));
        }
        require_non_empty("binding destination", &binding.destination)?;
        require_non_empty("properties key", &binding.properties_key)?;
        let kind = match binding.destination_type {
            DestinationType::Queue => "q",
            DestinationType::Exchange => "e",
        };
        let path = ResourcePath::new("bindings")
            .vhost(&binding.vhost)
            .segment("e")
            .name(&binding.source)
            .segment(kind)
            .name(&binding.destination)
            .properties_key(&binding.properties_key);
        self.delete(path).await
    }

    // Vhosts

    pub async fn get_vhosts(&self) -> Result<Vec<Vhost>> {
        self.get(ResourcePath::new("vhosts")).await
    }

    pub async fn get_vhost(&self, name: &str) -> Result<Vhost> {
        require_non_empty("vhost", name)?;
        self.get(ResourcePath::new("vhosts").vhost(name)).await
    }

    pub async fn create_vhost(&self, info: &VhostInfo) -> Result<()> {
        require_non_empty("vhost", info.name())?;
        self.put(ResourcePath::new("vhosts").vhost(info.name()), info)
            .await
    }

    pub async fn delete_vhost(&self, name: &str) -> Result<()> {
        require_non_empty("vhost", name)?;
        self.delete(ResourcePath::new("vhosts").vhost(name)).await
    }

    pub async fn enable_tracing(&self, vhost: &str) -> Result<()> {
        self.set_tracing(vhost, true).await
    }

    pub async fn disable_tracing(&self, vhost: &str) -> Result<()> {
        self.set_tracing(vhost, false).await
    }

    async fn set_tracing(&self, vhost: &str, tracing: bool) -> Result<()> {
        require_non_empty("vhost", vhost)?;
        self.put(
            ResourcePath::new("vhosts").vhost(vhost),
            &TracingBody { tracing },
        )
        .await
    }

    // Users and permissions

    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.get(ResourcePath::new("users")).await
    }

    pub async fn get_user(&self, name: &str) -> Result<User> {
        require_non_empty("user name", name)?;
        self.get(ResourcePath::new("users").name(name)).await
    }

    pub async fn create_user(&self, info: &UserInfo) -> Result<()> {
        require_non_empty("user name", info.name())?;
        self.put(ResourcePath::new("users").name(info.name()), info)
            .await
    }

    pub async fn delete_user(&self, name: &str) -> Result<()> {
        require_non_empty("user name", name)?;
        self.delete(ResourcePath::new("users").name(name)).await
    }

    /// Replace a user's password, keeping its tags.
    ///
    /// The broker's user PUT replaces the whole user, so this reads the user first.
    pub async fn change_user_password(&self, name: &str, password: &str) -> Result<()> {
        let info = UserInfo::new(name, password)?;
        let user = self.get_user(name).await?;
        let info = info.with_existing_tags(user.tags);
        self.create_user(&info).await
    }

    pub async fn get_permissions(&self) -> Result<Vec<Permission>> {
        self.get(ResourcePath::new("permissions")).await
    }

    pub async fn create_permission(
        &self,
        vhost: &str,
        user: &str,
        info: &PermissionInfo,
    ) -> Result<()> {
        self.put(permission_path("permissions", vhost, user)?, info)
            .await
    }

    pub async fn delete_permission(&self, vhost: &str, user: &str) -> Result<()> {
        self.delete(permission_path("permissions", vhost, user)?)
            .await
    }

    pub async fn get_topic_permissions(&self) -> Result<Vec<TopicPermission>> {
        self.get(ResourcePath::new("topic-permissions")).await
    }

    pub async fn create_topic_permission(
        &self,
        vhost: &str,
        user: &str,
        info: &TopicPermissionInfo,
    ) -> Result<()> {
        require_non_empty("topic exchange", info.exchange())?;
        self.put(permission_path("topic-permissions", vhost, user)?, info)
            .await
    }

    /// Remove every topic permission `user` holds in `vhost`.
    pub async fn delete_topic_permission(&self, vhost: &str, user: &str) -> Result<()> {
        self.delete(permission_path("topic-permissions", vhost, user)?)
            .await
    }

    // Policies, parameters and federation

    pub async fn get_policies(&self) -> Result<Vec<Policy>> {
        self.get(ResourcePath::new("policies")).await
    }

    pub async fn create_policy(&self, policy: &Policy) -> Result<()> {
        require_non_empty("policy name", &policy.name)?;
        require_non_empty("policy vhost", &policy.vhost)?;
        self.put(
            ResourcePath::new("policies")
                .vhost(&policy.vhost)
                .name(&policy.name),
            policy,
        )
        .await
    }

    pub async fn delete_policy(&self, vhost: &str, name: &str) -> Result<()> {
        require_non_empty("policy vhost", vhost)?;
        require_non_empty("policy name", name)?;
        self.delete(ResourcePath::new("policies").vhost(vhost).name(name))
            .await
    }

    pub async fn get_parameters(&self) -> Result<Vec<Parameter>> {
        self.get(ResourcePath::new("parameters")).await
    }

    pub async fn create_parameter(&self, parameter: &Parameter) -> Result<()> {
        self.put(
            parameter_path(&parameter.component, &parameter.vhost, &parameter.name)?,
            parameter,
        )
        .await
    }

    pub async fn delete_parameter(&self, component: &str, vhost: &str, name: &str) -> Result<()> {
        self.delete(parameter_path(component, vhost, name)?).await
    }

    /// Status of every federation link. Requires the federation management plugin.
    pub async fn get_federations(&self) -> Result<Vec<Federation>> {
        self.get(ResourcePath::new("federation-links")).await
    }
}

fn exchange_path(exchange: &ExchangeName) -> Result<ResourcePath> {
    require_non_empty("vhost", &exchange.vhost)?;
    Ok(ResourcePath::new("exchanges")
        .vhost(&exchange.vhost)
        .name(exchange.path_name()))
}

fn queue_path(queue: &QueueName) -> Result<ResourcePath> {
    require_non_empty("vhost", &queue.vhost)?;
    require_non_empty("queue name", &queue.name)?;
    Ok(ResourcePath::new("queues")
        .vhost(&queue.vhost)
        .name(&queue.name))
}

fn same_vhost(source: &str, destination: &str) -> Result<()> {
    require_non_empty("vhost", source)?;
    if source != destination {
        return Err(invalid(
            "vhost",
            format!(
                "source is in {:?} but destination is in {:?}",
                source, destination
            ),
        ));
    }
    Ok(())
}

fn queue_binding_path(exchange: &ExchangeName, queue: &QueueName) -> Result<ResourcePath> {
    same_vhost(&exchange.vhost, &queue.vhost)?;
    require_non_empty("queue name", &queue.name)?;
    Ok(ResourcePath::new("bindings")
        .vhost(&exchange.vhost)
        .segment("e")
        .name(exchange.path_name())
        .segment("q")
        .name(&queue.name))
}

fn exchange_binding_path(
    source: &ExchangeName,
    destination: &ExchangeName,
) -> Result<ResourcePath> {
    same_vhost(&source.vhost, &destination.vhost)?;
    Ok(ResourcePath::new("bindings")
        .vhost(&source.vhost)
        .segment("e")
        .name(source.path_name())
        .segment("e")
        .name(destination.path_name()))
}

fn permission_path(root: &'static str, vhost: &str, user: &str) -> Result<ResourcePath> {
    require_non_empty("vhost", vhost)?;
    require_non_empty("user name", user)?;
    Ok(ResourcePath::new(root).vhost(vhost).name(user))
}

fn parameter_path(component: &str, vhost: &str, name: &str) -> Result<ResourcePath> {
    require_non_empty("parameter component", component)?;
    require_non_empty("parameter vhost", vhost)?;
    require_non_empty("parameter name", name)?;
    Ok(ResourcePath::new("parameters")
        .name(component)
        .vhost(vhost)
        .name(name))
}
