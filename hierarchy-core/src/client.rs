//! # Hierarchy Client
//!
//! This module wraps the generated tonic client for the hierarchy service and exposes the
//! handful of operations the tools need in terms of the domain [`model`](crate::model).
//!
//! ## Error Handling
//!
//! - **[`ClientConnectError`]**: the endpoint could not be built, the TLS material could not
//!   be loaded, the connection failed or the service did not answer its health check.
//!   These are fatal for a run.
//! - **[`RemoteCallError`]**: a single call failed. Callers collect these per node and keep
//!   going.
//!
//! ## The `HierarchyApi` seam
//!
//! The exporter and the seeder are written against the [`HierarchyApi`] trait rather than
//! against [`HierarchyClient`] directly, so they can be driven by any implementation
//! (an in-memory hierarchy in tests, for instance).
use crate::{
    BoxError,
    config::ConnectionSettings,
    grpc::pb::{self, hierarchy_client},
    model::{NewNode, Node},
};
use http_body::Body as HttpBody;
use std::path::{Path, PathBuf};
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};

/// Errors that can occur when connecting to the hierarchy service.
#[derive(Debug, thiserror::Error)]
pub enum ClientConnectError {
    #[error("Invalid endpoint '{0}': {1}")]
    InvalidEndpoint(String, #[source] tonic::transport::Error),
    #[error("Failed to read certificate file '{path}': {source}")]
    ReadCertificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TLS configuration: {0}")]
    Tls(#[source] tonic::transport::Error),
    #[error("Failed to connect to '{0}': {1}")]
    ConnectionFailed(String, #[source] tonic::transport::Error),
    #[error("Health check failed: {0}")]
    HealthCheck(#[source] RemoteCallError),
}

/// Errors that can occur during a single call to the hierarchy service.
#[derive(Debug, thiserror::Error)]
pub enum RemoteCallError {
    #[error("Server returned status {:?}: '{}'", .0.code(), .0.message())]
    Status(#[from] tonic::Status),
    #[error("Server returned an empty response to {0}")]
    EmptyResponse(&'static str),
}

/// The operations of the hierarchy service used by the exporter and the seeder.
#[allow(async_fn_in_trait)]
pub trait HierarchyApi {
    /// Lists the direct children of a node.
    async fn list_children(&mut self, node_id: &str) -> Result<Vec<Node>, RemoteCallError>;

    /// Creates `node` under `parent_id` on behalf of `actor_id` and returns the new node id.
    async fn create_node(
        &mut self,
        node: NewNode,
        parent_id: &str,
        actor_id: &str,
    ) -> Result<String, RemoteCallError>;
}

/// A client for the hierarchy service.
///
/// Dropping the client closes the underlying channel.
#[derive(Debug, Clone)]
pub struct HierarchyClient<S = Channel> {
    inner: hierarchy_client::HierarchyClient<S>,
}

impl HierarchyClient<Channel> {
    /// Connects to the service described by `settings` and checks that it is healthy.
    ///
    /// Unless `settings.plaintext` is set, the connection uses mutual TLS with the
    /// certificates referenced by `settings.tls`.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self, ClientConnectError> {
        let uri = settings.uri();

        let mut endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| ClientConnectError::InvalidEndpoint(uri.clone(), e))?
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout());

        if !settings.plaintext {
            endpoint = endpoint
                .tls_config(tls_config(settings)?)
                .map_err(ClientConnectError::Tls)?;
        }

        tracing::debug!(%uri, "connecting to hierarchy service");

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ClientConnectError::ConnectionFailed(uri.clone(), e))?;

        let mut client = Self::from_service(channel);

        client
            .health_check()
            .await
            .map_err(ClientConnectError::HealthCheck)?;

        tracing::info!(%uri, "connected to hierarchy service");
        Ok(client)
    }
}

impl<S> HierarchyClient<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    /// Creates a client from an existing Tonic service/channel.
    pub fn from_service(service: S) -> Self {
        Self {
            inner: hierarchy_client::HierarchyClient::new(service),
        }
    }

    /// Asks the service to check itself and its dependencies.
    pub async fn health_check(&mut self) -> Result<(), RemoteCallError> {
        self.inner.deep_ping(pb::Void {}).await?;
        Ok(())
    }
}

impl<S> HierarchyApi for HierarchyClient<S>
where
    S: tonic::client::GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    async fn list_children(&mut self, node_id: &str) -> Result<Vec<Node>, RemoteCallError> {
        let request = pb::PrimitiveString {
            value: node_id.to_string(),
        };

        let nodes = self.inner.get_child_nodes(request).await?.into_inner();

        Ok(nodes.nodes.into_iter().map(Node::from).collect())
    }

    async fn create_node(
        &mut self,
        node: NewNode,
        parent_id: &str,
        actor_id: &str,
    ) -> Result<String, RemoteCallError> {
        let request = pb::SaveNodeInput {
            node: Some(pb::Node::from(node)),
            parent_id: parent_id.to_string(),
            user_id: actor_id.to_string(),
        };

        let id = self.inner.save_node(request).await?.into_inner().value;

        if id.is_empty() {
            return Err(RemoteCallError::EmptyResponse("SaveNode"));
        }

        Ok(id)
    }
}

fn tls_config(settings: &ConnectionSettings) -> Result<ClientTlsConfig, ClientConnectError> {
    let tls = &settings.tls;

    let ca = Certificate::from_pem(read_pem(&tls.ca_cert)?);
    let identity = Identity::from_pem(read_pem(&tls.client_cert)?, read_pem(&tls.client_key)?);
    let domain = tls.domain_name.as_deref().unwrap_or(&settings.host);

    Ok(ClientTlsConfig::new()
        .domain_name(domain)
        .ca_certificate(ca)
        .identity(identity))
}

fn read_pem(path: &Path) -> Result<Vec<u8>, ClientConnectError> {
    std::fs::read(path).map_err(|source| ClientConnectError::ReadCertificate {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TlsSettings;

    #[test]
    fn missing_certificate_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ConnectionSettings {
            tls: TlsSettings {
                ca_cert: dir.path().join("ca.crt"),
                ..Default::default()
            },
            ..Default::default()
        };

        match tls_config(&settings) {
            Err(ClientConnectError::ReadCertificate { path, .. }) => {
                assert_eq!(path, dir.path().join("ca.crt"))
            }
            other => panic!("expected a certificate read error, got {other:?}"),
        }
    }

    #[test]
    fn status_errors_keep_code_and_message() {
        let err = RemoteCallError::from(tonic::Status::not_found("node F1 not found"));
        assert_eq!(
            err.to_string(),
            "Server returned status NotFound: 'node F1 not found'"
        );
    }
}
