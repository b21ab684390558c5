//! Drive one or more collections through the pipeline.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{api_node_id, DesignApi};
use crate::codegen::{self, IconSource};
use crate::config::{CollectionConfig, IconsyncConfig};
use crate::error::{PartialFetchWarning, PipelineError};
use crate::fetch::{fetch_all, FetchedAsset};
use crate::normalize;
use crate::progress::ProgressObserver;
use crate::resolve::resolve_urls;
use crate::storage::{self, WriteOutcome};
use crate::tree::{extract_icons, ExtractedIcon};

use super::outcome::CollectionOutcome;
use super::state::CollectionState;

/// Knobs the orchestrator needs; everything else comes from the API client.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub url_batch_size: usize,
    pub file_batch_size: usize,
}

impl PipelineSettings {
    pub fn from_config(cfg: &IconsyncConfig) -> Self {
        Self {
            output_dir: cfg.output_dir.clone(),
            url_batch_size: cfg.url_batch_size,
            file_batch_size: cfg.file_batch_size,
        }
    }
}

/// Orchestrates collection runs against one design API.
pub struct Pipeline {
    api: Arc<dyn DesignApi>,
    settings: PipelineSettings,
    observer: Arc<dyn ProgressObserver>,
}

/// Tracks the state of one collection and tells the observer about each move.
struct Tracker<'a> {
    collection: &'a str,
    state: CollectionState,
    observer: &'a dyn ProgressObserver,
}

impl Tracker<'_> {
    fn advance(&mut self, next: CollectionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::debug!(collection = self.collection, from = ?self.state, to = ?next, "transition");
        self.state = next;
        self.observer.transition(self.collection, next);
    }
}

/// What a successful run produced.
struct Persisted {
    icons_written: usize,
    write: WriteOutcome,
    warning: Option<PartialFetchWarning>,
}

impl Pipeline {
    pub fn new(
        api: Arc<dyn DesignApi>,
        settings: PipelineSettings,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self {
            api,
            settings,
            observer,
        }
    }

    /// Where the module for `collection` is written.
    pub fn artifact_path(&self, collection: &str) -> PathBuf {
        artifact_path(&self.settings.output_dir, collection)
    }

    /// Run every collection in order. Failures do not stop later collections.
    pub async fn run_collections(&self, collections: &[CollectionConfig]) -> Vec<CollectionOutcome> {
        let mut outcomes = Vec::with_capacity(collections.len());
        for collection in collections {
            outcomes.push(self.run_collection(collection).await);
        }
        outcomes
    }

    /// Run one collection to `Persisted` or `Failed`.
    pub async fn run_collection(&self, collection: &CollectionConfig) -> CollectionOutcome {
        let artifact = self.artifact_path(&collection.name);
        let mut tracker = Tracker {
            collection: &collection.name,
            state: CollectionState::Idle,
            observer: self.observer.as_ref(),
        };
        tracing::info!(collection = %collection.name, node = %collection.node_id, "collection started");

        match self.execute(collection, &artifact, &mut tracker).await {
            Ok(done) => {
                tracker.advance(CollectionState::Persisted);
                tracing::info!(
                    collection = %collection.name,
                    icons = done.icons_written,
                    "collection persisted to {}",
                    artifact.display()
                );
                CollectionOutcome {
                    name: collection.name.clone(),
                    state: tracker.state,
                    artifact,
                    icons_written: done.icons_written,
                    write: Some(done.write),
                    warning: done.warning,
                    error: None,
                }
            }
            Err(err) => {
                tracker.advance(CollectionState::Failed);
                tracing::error!(collection = %collection.name, error = %err, "collection failed");
                self.observer
                    .error(&format!("collection {} failed: {}", collection.name, err));
                CollectionOutcome {
                    name: collection.name.clone(),
                    state: tracker.state,
                    artifact,
                    icons_written: 0,
                    write: None,
                    warning: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn execute(
        &self,
        collection: &CollectionConfig,
        artifact: &Path,
        tracker: &mut Tracker<'_>,
    ) -> Result<Persisted, PipelineError> {
        let observer = self.observer.as_ref();

        tracker.advance(CollectionState::Extracting);
        let root_id = api_node_id(&collection.node_id);
        let icons = self.extract(&root_id).await?;
        report_name_collisions(&icons, observer);

        tracker.advance(CollectionState::ResolvingUrls);
        let ids: Vec<String> = icons.iter().map(|icon| icon.id.clone()).collect();
        let resolution = resolve_urls(
            Arc::clone(&self.api),
            &ids,
            self.settings.url_batch_size,
            observer,
        )
        .await?;
        if !resolution.unresolved.is_empty() {
            observer.warn(&format!(
                "{} icons have no download URL: {}",
                resolution.unresolved.len(),
                resolution.unresolved.join(", ")
            ));
        }

        tracker.advance(CollectionState::FetchingContent);
        let assets = resolution.attach(&icons);
        let report = fetch_all(
            Arc::clone(&self.api),
            assets,
            self.settings.file_batch_size,
            observer,
        )
        .await;

        tracker.advance(CollectionState::Normalizing);
        let sources: Vec<IconSource> = report
            .fetched
            .iter()
            .map(|asset| normalize_asset(asset, observer))
            .collect();

        tracker.advance(CollectionState::Generating);
        let module = codegen::build_module(sources, &collection.name);
        let icons_written = module.functions.len();
        let write = storage::write_artifact(artifact, &module.render())
            .map_err(PipelineError::Persist)?;

        let warning = (report.fetched.len() < icons.len()).then(|| PartialFetchWarning {
            requested: icons.len(),
            fetched: report.fetched.len(),
            unresolved: resolution.unresolved.len(),
        });
        if let Some(w) = &warning {
            observer.warn(&format!("{}. Check the logs for more details.", w));
        }

        Ok(Persisted {
            icons_written,
            write,
            warning,
        })
    }

    async fn extract(&self, root_id: &str) -> Result<Vec<ExtractedIcon>, PipelineError> {
        let api = Arc::clone(&self.api);
        let root = root_id.to_string();
        let tree = tokio::task::spawn_blocking(move || api.fetch_node_tree(&root))
            .await
            .map_err(|e| PipelineError::NodeTree {
                root: root_id.to_string(),
                message: format!("task join: {}", e),
            })?
            .map_err(|e| PipelineError::NodeTree {
                root: root_id.to_string(),
                message: e.to_string(),
            })?;
        extract_icons(&tree)
    }
}

/// `<output_dir>/<collection>.ts`
pub fn artifact_path(output_dir: &Path, collection: &str) -> PathBuf {
    output_dir.join(format!("{}.ts", collection))
}

fn normalize_asset(asset: &FetchedAsset, observer: &dyn ProgressObserver) -> IconSource {
    if !normalize::has_wrapper(&asset.content) {
        observer.warn(&format!(
            "{} ({}) has no <svg> wrapper; emitting it as is",
            asset.name, asset.id
        ));
    }
    IconSource::new(asset.name.clone(), normalize::normalize(&asset.content))
}

/// Warn about distinct assets that normalize to the same name. Only one of
/// them ends up in the registry.
fn report_name_collisions(icons: &[ExtractedIcon], observer: &dyn ProgressObserver) {
    let mut by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for icon in icons {
        by_name.entry(&icon.name).or_default().push(&icon.id);
    }
    for (name, ids) in by_name.into_iter().filter(|(_, ids)| ids.len() > 1) {
        observer.warn(&format!(
            "icons {} all normalize to {}; only one will be kept",
            ids.join(", "),
            name
        ));
    }
}
