//! Client for the site deployment endpoint.

use std::time::Duration;

use reqwest::{Client, Proxy};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use url::Url;

use crate::config::DeployConfig;
use crate::{Error, Result};

/// Message used when the endpoint gives no reason of its own
pub const DEFAULT_FAILURE: &str = "Deployment failed";

#[derive(Debug, Clone, Serialize)]
pub struct DeployRequest<'a> {
    pub html_content: &'a str,
    pub project_name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct DeployResponse {
    url: Option<String>,
    error: Option<String>,
}

/// A successful deployment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deployment {
    pub project_name: String,
    pub url: String,
}

/// Something that can publish a page of HTML
#[async_trait::async_trait]
pub trait Deployer: Send + Sync {
    /// Publish `html` under `project_name`
    async fn deploy(&self, html: &str, project_name: &str) -> Result<Deployment>;

    /// Name used when the caller does not supply one
    fn project_name(&self) -> String;
}

/// `"{prefix}-{unix millis}"`
pub fn project_name(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_millis())
}

/// Deployer speaking JSON over HTTP
pub struct HttpDeployer {
    client: Client,
    endpoint: Url,
    prefix: String,
}

impl HttpDeployer {
    pub fn new(config: &DeployConfig) -> Result<Self> {
        let client = Self::build_client(config.request_timeout_secs, &config.proxy_url)?;
        Ok(Self {
            client,
            endpoint: Url::parse(&config.endpoint)?,
            prefix: config.project_prefix.clone(),
        })
    }

    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder().timeout(Duration::from_secs(timeout_secs));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            info!("Using HTTP proxy for deployment");
        }

        builder.build().map_err(Error::Http)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Deployer for HttpDeployer {
    async fn deploy(&self, html: &str, project_name: &str) -> Result<Deployment> {
        if html.trim().is_empty() {
            return Err(Error::Deploy("No HTML content to deploy".to_string()));
        }

        let request = DeployRequest {
            html_content: html,
            project_name,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: DeployResponse = serde_json::from_str(&body).unwrap_or_default();

        match parsed.url {
            Some(url) if status.is_success() => {
                info!("Deployed {} to {}", project_name, url);
                Ok(Deployment {
                    project_name: project_name.to_string(),
                    url,
                })
            }
            _ => {
                let reason = parsed.error.unwrap_or_else(|| DEFAULT_FAILURE.to_string());
                error!("Deployment of {} failed ({}): {}", project_name, status, reason);
                Err(Error::Deploy(reason))
            }
        }
    }

    fn project_name(&self) -> String {
        project_name(&self.prefix)
    }
}
