//! Batch URL resolver: identifiers to download locations, in sequential chunks.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::api::{ApiError, DesignApi, UrlBatch};
use crate::batch::chunk_ranges;
use crate::error::PipelineError;
use crate::progress::ProgressObserver;
use crate::tree::ExtractedIcon;

/// An icon with the location its markup can be downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Merged result of all resolution chunks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UrlResolution {
    /// Identifier to download location.
    pub urls: BTreeMap<String, String>,
    /// Requested identifiers the API gave no location for, sorted.
    pub unresolved: Vec<String>,
}

impl UrlResolution {
    /// Pair extracted icons with their locations; unresolved icons are left out.
    pub fn attach(&self, icons: &[ExtractedIcon]) -> Vec<ResolvedAsset> {
        icons
            .iter()
            .filter_map(|icon| {
                self.urls.get(&icon.id).map(|url| ResolvedAsset {
                    id: icon.id.clone(),
                    name: icon.name.clone(),
                    url: url.clone(),
                })
            })
            .collect()
    }
}

/// Resolves download locations for `ids`, at most `batch_size` per request.
///
/// Chunks run strictly one after another. Progress is reported after each
/// chunk. Any failed chunk fails the whole call with `Resolution`; no partial
/// mapping is returned.
pub async fn resolve_urls(
    api: Arc<dyn DesignApi>,
    ids: &[String],
    batch_size: usize,
    observer: &dyn ProgressObserver,
) -> Result<UrlResolution, PipelineError> {
    let total = ids.len();
    let mut resolution = UrlResolution::default();

    for range in chunk_ranges(total, batch_size) {
        let chunk: Vec<String> = ids[range.clone()].to_vec();
        let batch = tokio::task::spawn_blocking({
            let api = Arc::clone(&api);
            move || -> Result<(Vec<String>, UrlBatch), ApiError> {
                let batch = api.resolve_image_urls(&chunk)?;
                Ok((chunk, batch))
            }
        })
        .await
        .map_err(|e| PipelineError::Resolution {
            start: range.start,
            end: range.end,
            status: None,
            message: format!("resolution task join: {}", e),
        })?;

        let (chunk, mut batch) = batch.map_err(|e| {
            tracing::error!(start = range.start, end = range.end, error = %e, "URL resolution chunk failed");
            PipelineError::resolution(range.clone(), &e)
        })?;

        merge_chunk(&mut resolution, chunk, &mut batch);
        observer.report(range.end, total);
    }

    resolution.unresolved.sort();
    Ok(resolution)
}

fn merge_chunk(resolution: &mut UrlResolution, chunk: Vec<String>, batch: &mut UrlBatch) {
    let requested: HashSet<&str> = chunk.iter().map(String::as_str).collect();
    let extra = batch
        .keys()
        .filter(|id| !requested.contains(id.as_str()))
        .count();
    if extra > 0 {
        tracing::debug!(extra, "ignoring ids the API returned but were not requested");
    }
    for id in chunk {
        match batch.remove(&id).flatten() {
            Some(url) => {
                resolution.urls.insert(id, url);
            }
            None => {
                tracing::warn!(asset = %id, "no download URL returned");
                resolution.unresolved.push(id);
            }
        }
    }
}
