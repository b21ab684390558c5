//! In-process `DesignApi` with scripted trees, URLs and contents.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use iconsync_core::api::{ApiError, DesignApi, UrlBatch};
use iconsync_core::progress::ProgressObserver;
use iconsync_core::pipeline::CollectionState;
use iconsync_core::tree::AssetNode;

pub const SVG_RED: &str = "<svg width=\"24\" height=\"24\" viewBox=\"0 0 24 24\" fill=\"none\">\n<path d=\"M1 1\" fill=\"#FF0000\"/>\n</svg>\n";

pub fn url_for(id: &str) -> String {
    format!("https://cdn.test/{}.svg", id.replace(':', "-"))
}

#[derive(Default)]
pub struct FakeApi {
    pub trees: HashMap<String, AssetNode>,
    /// Download URL to markup; other URLs answer 404.
    pub contents: HashMap<String, String>,
    /// Ids resolved to `null`.
    pub null_urls: HashSet<String>,
    /// Ids whose resolution chunk fails with HTTP 500.
    pub poisoned: HashSet<String>,
    pub resolve_calls: Mutex<Vec<usize>>,
}

impl FakeApi {
    /// Register `root` and serve `SVG_RED`-style content for every leaf under it.
    pub fn with_tree(mut self, root: AssetNode) -> Self {
        let mut stack = vec![&root];
        while let Some(node) = stack.pop() {
            for child in &node.children {
                if child.children.is_empty() {
                    self.contents.insert(
                        url_for(&child.id),
                        SVG_RED.replace("M1 1", &format!("M{}", child.id)),
                    );
                }
                stack.push(child);
            }
        }
        self.trees.insert(root.id.clone(), root);
        self
    }
}

impl DesignApi for FakeApi {
    fn fetch_node_tree(&self, root_id: &str) -> Result<AssetNode, ApiError> {
        self.trees
            .get(root_id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected(format!("node {} not found in document", root_id)))
    }

    fn resolve_image_urls(&self, ids: &[String]) -> Result<UrlBatch, ApiError> {
        self.resolve_calls.lock().unwrap().push(ids.len());
        if ids.iter().any(|id| self.poisoned.contains(id)) {
            return Err(ApiError::Status(500));
        }
        Ok(ids
            .iter()
            .map(|id| {
                let url = (!self.null_urls.contains(id)).then(|| url_for(id));
                (id.clone(), url)
            })
            .collect())
    }

    fn fetch_content(&self, url: &str) -> Result<String, ApiError> {
        self.contents.get(url).cloned().ok_or(ApiError::Status(404))
    }
}

/// Observer that records everything it is told.
#[derive(Default)]
pub struct Recorder {
    pub transitions: Mutex<Vec<(String, CollectionState)>>,
    pub warnings: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn states_for(&self, collection: &str) -> Vec<CollectionState> {
        self.transitions
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == collection)
            .map(|(_, s)| *s)
            .collect()
    }
}

impl ProgressObserver for Recorder {
    fn report(&self, _current: usize, _total: usize) {}

    fn transition(&self, collection: &str, state: CollectionState) {
        self.transitions
            .lock()
            .unwrap()
            .push((collection.to_string(), state));
    }

    fn warn(&self, line: &str) {
        self.warnings.lock().unwrap().push(line.to_string());
    }

    fn error(&self, line: &str) {
        self.errors.lock().unwrap().push(line.to_string());
    }
}
