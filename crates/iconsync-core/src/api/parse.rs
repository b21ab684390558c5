//! Response bodies of the design API.

use std::collections::HashMap;

use serde::Deserialize;

use crate::tree::{AssetNode, NodeKind};

use super::error::ApiError;
use super::UrlBatch;

/// `GET /files/{key}/nodes?ids=...`
#[derive(Debug, Deserialize)]
pub(crate) struct NodesResponse {
    #[serde(default)]
    pub nodes: HashMap<String, Option<NodeEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeEntry {
    pub document: RawNode,
}

/// A document node; only the fields extraction needs.
#[derive(Debug, Deserialize)]
pub(crate) struct RawNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl From<RawNode> for AssetNode {
    fn from(raw: RawNode) -> Self {
        let kind = NodeKind::from_api_type(&raw.node_type);
        let children = match kind {
            NodeKind::Container => raw.children.into_iter().map(AssetNode::from).collect(),
            NodeKind::LeafInstance | NodeKind::Other => Vec::new(),
        };
        AssetNode {
            id: raw.id,
            name: raw.name,
            kind,
            children,
        }
    }
}

/// `GET /images/{key}?ids=...&format=svg`
#[derive(Debug, Deserialize)]
pub(crate) struct ImagesResponse {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// Pick the document for `root_id` out of a nodes response body.
pub(crate) fn parse_node_tree(body: &[u8], root_id: &str) -> Result<AssetNode, ApiError> {
    let mut resp: NodesResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    match resp.nodes.remove(root_id) {
        Some(Some(entry)) => Ok(entry.document.into()),
        _ => Err(ApiError::Rejected(format!(
            "node {} not found in document",
            root_id
        ))),
    }
}

/// Parse an images response into a URL batch.
pub(crate) fn parse_image_urls(body: &[u8]) -> Result<UrlBatch, ApiError> {
    let resp: ImagesResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if let Some(err) = resp.err {
        return Err(ApiError::Rejected(err));
    }
    Ok(resp.images.into_iter().collect())
}
