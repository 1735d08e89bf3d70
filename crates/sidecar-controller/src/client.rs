//! Controller Client
//!
//! Request/response exchanges with the tenant control service: sidecar
//! registration, conditional proxy-configuration fetch, and credential
//! retrieval. Every call is a single attempt; HTTP outcomes map onto
//! [`ControllerError`](crate::ControllerError) and callers decide on
//! retries and polling cadence.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::credentials::{TenantCredentials, TenantRegistration};
use crate::{ControllerError, Result};

/// Outcome of a conditional proxy-configuration fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigFetch {
    /// The controller holds a configuration newer than the supplied
    /// version; the body is opaque configuration text.
    Updated(String),
    /// No change since the supplied version; keep the cached text.
    Unchanged,
}

/// Status disposition shared by all controller exchanges. Each operation
/// matches exhaustively on the subset it understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Disposition {
    Created,
    Ok,
    NoContent,
    Conflict,
    NotFound,
    Other(StatusCode),
}

impl From<StatusCode> for Disposition {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::CREATED => Self::Created,
            StatusCode::OK => Self::Ok,
            StatusCode::NO_CONTENT => Self::NoContent,
            StatusCode::CONFLICT => Self::Conflict,
            StatusCode::NOT_FOUND => Self::NotFound,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsEnvelope {
    credentials: TenantCredentials,
}

/// Client for the tenant control service.
///
/// Holds only an immutable configuration snapshot and a transport handle,
/// so one instance is safe to share across tasks. Timeouts, TLS policy,
/// and connection pooling belong to the supplied [`reqwest::Client`].
pub struct ControllerClient {
    base_url: String,
    config: Config,
    client: Client,
}

impl ControllerClient {
    /// Create a client with a default transport.
    pub fn new(config: Config) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create a client over an injected transport.
    pub fn with_client(config: Config, client: Client) -> Self {
        Self {
            base_url: config.controller.url.trim_end_matches('/').to_string(),
            config,
            client,
        }
    }

    /// Register this sidecar with the control service.
    ///
    /// A 409 surfaces as [`ControllerError::AlreadyRegistered`]; callers
    /// should treat it as "already present" rather than a failure.
    pub async fn register(&self) -> Result<()> {
        let registration = TenantRegistration {
            id: self.config.tenant.id.clone(),
            credentials: self.config.credentials(),
            port: self.config.proxy.port,
        };

        let url = format!("{}/v1/tenants", self.base_url);
        debug!(tenant_id = %self.config.tenant.id, "POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.config.tenant.token)
            .json(&registration)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match Disposition::from(status) {
            Disposition::Created => Ok(()),
            Disposition::Conflict => {
                warn!(tenant_id = %self.config.tenant.id, "tenant already registered");
                Err(ControllerError::AlreadyRegistered { detail: body })
            }
            _ => {
                warn!(
                    tenant_id = %self.config.tenant.id,
                    status = %status,
                    "controller rejected registration"
                );
                Err(ControllerError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Fetch the tenant's proxy configuration.
    ///
    /// `version` is the conditional-fetch cursor: the timestamp of the
    /// configuration the caller already holds, sent as an RFC 3339
    /// `version` query parameter. The controller answers 204 when nothing
    /// newer exists; omitting the cursor requests the current
    /// configuration unconditionally.
    pub async fn get_proxy_config(&self, version: Option<DateTime<Utc>>) -> Result<ConfigFetch> {
        let url = format!(
            "{}/v1/tenants/{}/nginx",
            self.base_url, self.config.tenant.id
        );
        debug!(tenant_id = %self.config.tenant.id, "GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Authorization", &self.config.tenant.token);
        if let Some(version) = version {
            request = request.query(&[(
                "version",
                version.to_rfc3339_opts(SecondsFormat::Secs, true),
            )]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        match Disposition::from(status) {
            Disposition::NoContent => {
                debug!(tenant_id = %self.config.tenant.id, "proxy configuration unchanged");
                Ok(ConfigFetch::Unchanged)
            }
            Disposition::Ok => Ok(ConfigFetch::Updated(body)),
            _ => {
                warn!(
                    tenant_id = %self.config.tenant.id,
                    status = %status,
                    "controller returned bad response code for proxy configuration"
                );
                Err(ControllerError::UnexpectedStatus { status, body })
            }
        }
    }

    /// Fetch the tenant's current credential bundle.
    pub async fn get_credentials(&self) -> Result<TenantCredentials> {
        let url = format!("{}/v1/tenants/{}", self.base_url, self.config.tenant.id);
        debug!(tenant_id = %self.config.tenant.id, "GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.config.tenant.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match Disposition::from(status) {
            Disposition::Ok => {
                let envelope: CredentialsEnvelope =
                    serde_json::from_str(&body).map_err(ControllerError::Decode)?;
                Ok(envelope.credentials)
            }
            Disposition::NotFound => {
                warn!(tenant_id = %self.config.tenant.id, "tenant unknown to controller");
                Err(ControllerError::TenantNotFound { detail: body })
            }
            _ => {
                warn!(
                    tenant_id = %self.config.tenant.id,
                    status = %status,
                    "controller returned bad response code for credentials"
                );
                Err(ControllerError::UnexpectedStatus { status, body })
            }
        }
    }
}
