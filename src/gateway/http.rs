//! HTTP-backed fetch gateway

use super::types::{parse_page, FetchGateway};
use crate::error::{FetchError, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{cursor_label, Cursor, Page};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Fetches pages from a collection endpoint over HTTP
#[derive(Debug)]
pub struct HttpGateway {
    client: HttpClient,
    endpoint: Url,
}

impl HttpGateway {
    /// Create a gateway for `endpoint` with a default client
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, HttpClientConfig::default())
    }

    /// Create a gateway for `endpoint` with a custom client configuration
    pub fn with_config(endpoint: &str, config: HttpClientConfig) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let client = HttpClient::with_config(config)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve the request target for a cursor
    ///
    /// Absolute cursors are used as-is; relative ones are joined onto the
    /// endpoint URL.
    pub fn resolve(&self, cursor: Option<&Cursor>) -> std::result::Result<Url, FetchError> {
        match cursor {
            None => Ok(self.endpoint.clone()),
            Some(cursor) => self.endpoint.join(cursor.as_str()).map_err(|e| {
                FetchError::parse(format!("cursor '{cursor}' is not a valid URL: {e}"))
            }),
        }
    }
}

#[async_trait]
impl FetchGateway for HttpGateway {
    async fn fetch(&self, cursor: Option<&Cursor>) -> std::result::Result<Page, FetchError> {
        let target = self.resolve(cursor)?;
        debug!("Fetching page {} from {}", cursor_label(cursor), target);

        let body = self.client.get_text(&target).await?;
        let page = parse_page(&body)?;

        debug!(
            "Fetched {} items for {} (next: {}, previous: {})",
            page.len(),
            cursor_label(cursor),
            page.has_next(),
            page.has_previous()
        );
        Ok(page)
    }
}
