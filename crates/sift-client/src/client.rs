//! Canonicalization client.

use std::future::Future;

use reqwest::StatusCode;
use tracing::warn;

use sift_expr::FilterNode;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::protocol::Rejection;

/// The remote authority a filter is canonicalized against.
///
/// The production implementation is [`CanonicalClient`]; the trait exists so
/// the [`crate::coordinator::CheckCoordinator`] is testable without a
/// network.
pub trait CanonicalAuthority {
    /// Resolve the tree against the live dataset schema: the canonical tree
    /// on success, [`Error::Rejected`] when a reference is stale.
    fn check(&self, filter: &FilterNode)
        -> impl Future<Output = Result<FilterNode, Error>> + Send;
}

/// HTTP client for the remote canonicalization endpoint.
///
/// # Example
///
/// ```ignore
/// use sift_client::{CanonicalClient, ClientConfig};
/// use sift_expr::FilterNode;
///
/// # async fn run() -> Result<(), sift_client::Error> {
/// let client = CanonicalClient::new(ClientConfig::localhost())?;
/// let filter = FilterNode::is_one_of("topic", vec!["economy".into()]);
/// let canonical = client.check_validity(&filter).await?;
/// # Ok(())
/// # }
/// ```
pub struct CanonicalClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CanonicalClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Create a client for the default local endpoint.
    pub fn localhost() -> Result<Self, Error> {
        Self::new(ClientConfig::localhost())
    }

    /// Send a locally normalized tree for remote canonicalization.
    ///
    /// The authority resolves column and value references against the live
    /// dataset schema and may rewrite or reject them. Only a tree returned
    /// by this call is fit to apply to the query layer.
    pub async fn check_validity(&self, filter: &FilterNode) -> Result<FilterNode, Error> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .json(filter)
            .send()
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<FilterNode>()
                .await
                .map_err(|err| Error::Protocol(format!("malformed canonical tree: {err}")));
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let rejection: Rejection = response
                .json()
                .await
                .map_err(|err| Error::Protocol(format!("malformed rejection body: {err}")))?;
            warn!(
                issues = rejection.errors.len(),
                "canonicalization authority rejected filter"
            );
            return Err(Error::Rejected(rejection.errors));
        }

        Err(Error::Protocol(format!("unexpected status {status}")))
    }
}

impl CanonicalAuthority for CanonicalClient {
    fn check(
        &self,
        filter: &FilterNode,
    ) -> impl Future<Output = Result<FilterNode, Error>> + Send {
        self.check_validity(filter)
    }
}
