//! Batch content fetcher.
//!
//! Downloads resolved assets in consecutive batches of `batch_size`. Every
//! request in a batch runs concurrently and the batch settles completely
//! (successes and failures) before the next one starts, so at most
//! `batch_size` requests are in flight at any time. A failed asset is recorded
//! and logged; it never aborts its siblings or the call.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::api::{ApiError, DesignApi};
use crate::batch::chunk_ranges;
use crate::error::{FetchFailure, PartialFetchWarning};
use crate::progress::ProgressObserver;
use crate::resolve::ResolvedAsset;

/// Raw markup downloaded for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub id: String,
    pub name: String,
    pub content: String,
}

/// Settled outcome of a whole fetch.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Number of assets handed to the fetcher.
    pub requested: usize,
    /// Successful downloads, in input order.
    pub fetched: Vec<FetchedAsset>,
    /// Failed downloads, in input order.
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    /// Warning describing the shortfall, if any asset was dropped.
    pub fn shortfall(&self) -> Option<PartialFetchWarning> {
        (self.fetched.len() < self.requested).then(|| PartialFetchWarning {
            requested: self.requested,
            fetched: self.fetched.len(),
            unresolved: 0,
        })
    }
}

type Tagged = (usize, Result<String, ApiError>);

/// Fetches the markup of every asset, `batch_size` at a time.
pub async fn fetch_all(
    api: Arc<dyn DesignApi>,
    assets: Vec<ResolvedAsset>,
    batch_size: usize,
    observer: &dyn ProgressObserver,
) -> FetchReport {
    let total = assets.len();
    let mut report = FetchReport {
        requested: total,
        ..FetchReport::default()
    };

    for range in chunk_ranges(total, batch_size) {
        let settled = run_batch(&api, &assets, range.clone()).await;
        for (index, outcome) in settled {
            let asset = &assets[index];
            match outcome {
                Ok(content) => report.fetched.push(FetchedAsset {
                    id: asset.id.clone(),
                    name: asset.name.clone(),
                    content,
                }),
                Err(error) => {
                    let failure = FetchFailure {
                        id: asset.id.clone(),
                        name: asset.name.clone(),
                        error,
                    };
                    tracing::error!(asset = %failure.id, name = %failure.name, error = %failure.error, "fetch failed");
                    observer.error(&failure.to_string());
                    report.failures.push(failure);
                }
            }
        }
        observer.report(range.end, total);
    }

    if let Some(warning) = report.shortfall() {
        tracing::warn!("{}", warning);
    }
    report
}

/// Runs one batch to full settlement and returns outcomes sorted by asset index.
async fn run_batch(
    api: &Arc<dyn DesignApi>,
    assets: &[ResolvedAsset],
    range: std::ops::Range<usize>,
) -> Vec<Tagged> {
    let mut join_set: JoinSet<Tagged> = JoinSet::new();
    let mut pending: BTreeSet<usize> = range.clone().collect();

    for index in range {
        let api = Arc::clone(api);
        let url = assets[index].url.clone();
        join_set.spawn_blocking(move || (index, api.fetch_content(&url)));
    }

    let mut settled = Vec::with_capacity(pending.len());
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                pending.remove(&index);
                settled.push((index, outcome));
            }
            Err(e) => tracing::error!("fetch task join: {}", e),
        }
    }
    // Tasks that panicked never reported their index.
    for index in pending {
        settled.push((
            index,
            Err(ApiError::Rejected("fetch task panicked".to_string())),
        ));
    }
    settled.sort_by_key(|(index, _)| *index);
    settled
}
