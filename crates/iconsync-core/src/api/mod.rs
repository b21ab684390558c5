//! Remote design-asset API.
//!
//! The pipeline only depends on the `DesignApi` trait; `FigmaClient` is the
//! curl-backed implementation. Methods are blocking; the pipeline calls them
//! from `spawn_blocking`.

mod error;
mod figma;
mod http;
mod parse;

use std::collections::BTreeMap;

use crate::tree::AssetNode;

pub use error::ApiError;
pub use figma::{api_node_id, FigmaClient};
pub use http::HttpOptions;

/// Identifier to download location; `None` when the API could not render the asset.
pub type UrlBatch = BTreeMap<String, Option<String>>;

/// The three remote calls the pipeline consumes.
pub trait DesignApi: Send + Sync {
    /// Fetch the document subtree rooted at `root_id`.
    fn fetch_node_tree(&self, root_id: &str) -> Result<AssetNode, ApiError>;

    /// Resolve SVG download locations for one batch of identifiers.
    fn resolve_image_urls(&self, ids: &[String]) -> Result<UrlBatch, ApiError>;

    /// Download the raw markup at a resolved location.
    fn fetch_content(&self, url: &str) -> Result<String, ApiError>;
}
