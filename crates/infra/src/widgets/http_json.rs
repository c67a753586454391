//! HTTP JSON widget: fetches a URL and yields its JSON body
//!
//! Each successful call produces
//! `{"widget": <name>, "fetched_at": <RFC 3339 UTC>, "data": <body>}`.
//! Non-2xx responses, transport errors and bodies that are not JSON fail the
//! call; the rotation decides what happens next, so there is no retry here.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use rotaboard_core::Widget;
use rotaboard_domain::{Rank, Result, RotaboardError, WidgetConfig, WidgetPayload};
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::InfraError;

/// Widget backed by a JSON HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpJsonWidget {
    name: String,
    url: Url,
    rank: Rank,
    headers: HeaderMap,
    client: Client,
}

impl HttpJsonWidget {
    /// Build a widget from its configuration, sharing `client`.
    ///
    /// # Errors
    /// Returns `RotaboardError::Config` for an unparsable URL or header.
    pub fn new(client: Client, config: &WidgetConfig) -> Result<Self> {
        let url = Url::parse(&config.url).map_err(|e| {
            RotaboardError::Config(format!(
                "widget {}: invalid url {:?}: {}",
                config.name, config.url, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                RotaboardError::Config(format!(
                    "widget {}: invalid header name {:?}: {}",
                    config.name, key, e
                ))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                RotaboardError::Config(format!(
                    "widget {}: invalid value for header {}: {}",
                    config.name, key, e
                ))
            })?;
            headers.insert(name, value);
        }

        Ok(Self { name: config.name.clone(), url, rank: config.rank, headers, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch(&self) -> std::result::Result<Value, InfraError> {
        let response = self
            .client
            .get(self.url.clone())
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        let body = response.json::<Value>().await?;
        debug!(widget = %self.name, url = %self.url, %status, "Widget endpoint responded");
        Ok(body)
    }
}

#[async_trait]
impl Widget for HttpJsonWidget {
    fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> Rank {
        self.rank
    }

    async fn rule(&self) -> Result<WidgetPayload> {
        let data = self.fetch().await.map_err(RotaboardError::from)?;

        Ok(json!({
            "widget": self.name,
            "fetched_at": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "data": data,
        }))
    }
}

/// Build one [`HttpJsonWidget`] per entry, sharing a single HTTP client.
///
/// `request_timeout` bounds each request at the transport level.
///
/// # Errors
/// Returns `RotaboardError::Config` if any entry is invalid, or a network
/// error if the client cannot be constructed.
pub fn build_http_widgets(
    configs: &[WidgetConfig],
    request_timeout: Duration,
) -> Result<Vec<Arc<dyn Widget>>> {
    let client = Client::builder()
        .timeout(request_timeout)
        .user_agent(concat!("rotaboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| RotaboardError::from(InfraError::from(err)))?;

    widgets_with_client(&client, configs)
}

/// Like [`build_http_widgets`], but sharing a caller-provided client.
///
/// # Errors
/// Returns `RotaboardError::Config` if any entry is invalid.
pub fn widgets_with_client(
    client: &Client,
    configs: &[WidgetConfig],
) -> Result<Vec<Arc<dyn Widget>>> {
    configs
        .iter()
        .map(|config| -> Result<Arc<dyn Widget>> {
            let widget = HttpJsonWidget::new(client.clone(), config)?;
            debug!(widget = %widget.name, url = %widget.url(), "Configured HTTP widget");
            Ok(Arc::new(widget) as Arc<dyn Widget>)
        })
        .collect()
}
