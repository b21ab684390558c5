//! Design API client over libcurl.

use anyhow::{Context, Result};
use url::Url;

use crate::config::IconsyncConfig;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::tree::AssetNode;

use super::error::ApiError;
use super::http::{self, HttpOptions};
use super::parse;
use super::{DesignApi, UrlBatch};

const TOKEN_HEADER: &str = "X-Figma-Token";

/// Client for one design document.
///
/// The access token is sent only to the API itself, not to the resolved
/// download locations (those are pre-signed).
pub struct FigmaClient {
    base_url: String,
    file_key: String,
    token: String,
    http: HttpOptions,
    retry: RetryPolicy,
}

impl std::fmt::Debug for FigmaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigmaClient")
            .field("base_url", &self.base_url)
            .field("file_key", &self.file_key)
            .field("http", &self.http)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl FigmaClient {
    pub fn new(
        base_url: &str,
        file_key: &str,
        token: &str,
        http: HttpOptions,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).with_context(|| format!("invalid API base URL: {}", base_url))?;
        if file_key.trim().is_empty() {
            anyhow::bail!("file key is empty");
        }
        Ok(Self {
            base_url,
            file_key: file_key.trim().to_string(),
            token: token.to_string(),
            http,
            retry,
        })
    }

    /// Build a client from loaded config and an already-resolved token.
    pub fn from_config(cfg: &IconsyncConfig, token: &str) -> Result<Self> {
        Self::new(
            &cfg.api_base_url,
            &cfg.file_key,
            token,
            cfg.http_options(),
            RetryPolicy::from(&cfg.retry_config()),
        )
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| ApiError::Decode(format!("bad endpoint {}: {}", path, e)))
    }

    pub(crate) fn nodes_url(&self, root_id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&format!("files/{}/nodes", self.file_key))?;
        url.query_pairs_mut().append_pair("ids", root_id);
        Ok(url)
    }

    pub(crate) fn images_url(&self, ids: &[String]) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&format!("images/{}", self.file_key))?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("format", "svg");
        Ok(url)
    }

    fn api_get(&self, url: &Url) -> Result<Vec<u8>, ApiError> {
        let headers = [
            (TOKEN_HEADER, self.token.as_str()),
            ("Accept", "application/json"),
        ];
        run_with_retry(&self.retry, || http::get(url.as_str(), &headers, self.http))
    }
}

impl DesignApi for FigmaClient {
    fn fetch_node_tree(&self, root_id: &str) -> Result<AssetNode, ApiError> {
        let url = self.nodes_url(root_id)?;
        tracing::debug!(root = root_id, "fetching node tree");
        let body = self.api_get(&url)?;
        parse::parse_node_tree(&body, root_id)
    }

    fn resolve_image_urls(&self, ids: &[String]) -> Result<UrlBatch, ApiError> {
        let url = self.images_url(ids)?;
        tracing::debug!(count = ids.len(), "resolving image URLs");
        let body = self.api_get(&url)?;
        parse::parse_image_urls(&body)
    }

    fn fetch_content(&self, url: &str) -> Result<String, ApiError> {
        let body = run_with_retry(&self.retry, || {
            http::get(url, &[("Accept", "image/svg+xml")], self.http)
        })?;
        http::into_text(body)
    }
}

/// Converts a node id in URL form (`2403-4364`) to API form (`2403:4364`).
/// Only the first `-` is replaced; ids already in API form pass through.
pub fn api_node_id(node_id: &str) -> String {
    node_id.trim().replacen('-', ":", 1)
}
