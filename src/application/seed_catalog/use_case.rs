use super::{
    dto::{CollectionSummary, FailedWrite, LoadOptions, LoadReport, RejectedRecord, SeedEntry},
    staging::{StagedEntry, StagingArea},
};
use crate::domain::{
    record::SeedRecord,
    shared::collection::Collection,
    store::{errors::StoreError, repository::DocumentStore},
};
use futures_util::{StreamExt, future, stream};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument, warn};

/// Validates a batch of seed documents and writes the accepted ones to a
/// document store.
///
/// The run is a single validate-then-write pass:
/// 1. every entry is shape-checked, validated and staged in memory
/// 2. foreign keys are resolved against the fully staged batch
/// 3. accepted records are upserted with bounded write fan-out
///
/// Bad records never abort the batch. A store that becomes unreachable does:
/// no further writes are issued, writes already in flight are awaited, and the
/// report says so. Other write failures are listed per record in
/// `failed_writes` without changing which records were accepted.
pub struct SeedCatalogUseCase {
    store: Arc<dyn DocumentStore>,
    options: LoadOptions,
}

impl SeedCatalogUseCase {
    pub fn new(store: Arc<dyn DocumentStore>, options: LoadOptions) -> Self {
        Self { store, options }
    }

    #[instrument(skip(self, entries), fields(
        entries = entries.len(),
        dry_run = self.options.dry_run,
        write_concurrency = self.options.write_concurrency
    ))]
    pub async fn execute(&self, entries: Vec<SeedEntry>) -> LoadReport {
        let total = entries.len();

        let mut staging = StagingArea::default();
        for entry in entries {
            staging.stage(entry);
        }
        let unresolved = staging.resolve_references();
        let staged = staging.into_entries();
        debug!(unresolved, "Reference resolution finished");

        let outcome = if self.options.dry_run {
            info!("Dry run, skipping store writes");
            WriteOutcome::default()
        } else {
            self.write_accepted(&staged).await
        };

        let report = build_report(total, staged, outcome, self.options.dry_run);
        info!(
            total = report.total,
            accepted = report.accepted,
            written = report.written,
            rejected = report.rejected.len(),
            failed_writes = report.failed_writes.len(),
            aborted = report.aborted.is_some(),
            "Seed load finished"
        );
        report
    }

    /// Reads a record back from the store and decodes it.
    pub async fn get_record(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<SeedRecord>, StoreError> {
        let Some(document) = self.store.get(collection, id).await? else {
            return Ok(None);
        };
        SeedRecord::decode(collection, &document)
            .map(Some)
            .map_err(|violations| {
                let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
                StoreError::Serialization(format!(
                    "stored {collection}/{id} is not a valid record: {}",
                    reasons.join("; ")
                ))
            })
    }

    /// Upserts every accepted entry with at most `write_concurrency` writes
    /// in flight.
    async fn write_accepted(&self, staged: &[StagedEntry]) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();
        let mut pending = Vec::new();
        for (index, entry) in staged.iter().enumerate() {
            let Some(record) = entry.record.as_ref().filter(|_| entry.is_accepted()) else {
                continue;
            };
            match record.to_document() {
                Ok(document) => pending.push((index, record.collection(), record.id(), document)),
                Err(e) => outcome.fail(index, record.collection(), record.id(), e.to_string()),
            }
        }

        let store = &self.store;
        let stop = AtomicBool::new(false);
        let mut writes = stream::iter(pending)
            .take_while(|_| future::ready(!stop.load(Ordering::Relaxed)))
            .map(|(index, collection, id, document)| async move {
                let result = store.put(collection, id, &document).await;
                (index, collection, id, result)
            })
            .buffer_unordered(self.options.write_concurrency.max(1));

        while let Some((index, collection, id, result)) = writes.next().await {
            match result {
                Ok(()) => {
                    debug!(%collection, %id, "Record written");
                    outcome.written.insert(index);
                }
                Err(e) if e.is_unavailable() => {
                    if outcome.aborted.is_none() {
                        error!(
                            %collection, %id, error = %e,
                            "Store unavailable, no further writes will be issued"
                        );
                        stop.store(true, Ordering::Relaxed);
                        outcome.aborted = Some(e.to_string());
                    }
                }
                Err(e) => {
                    warn!(%collection, %id, error = %e, "Record write failed");
                    outcome.fail(index, collection, id, e.to_string());
                }
            }
        }

        outcome
    }
}

#[derive(Debug, Default)]
struct WriteOutcome {
    written: HashSet<usize>,
    failed: HashMap<usize, FailedWrite>,
    aborted: Option<String>,
}

impl WriteOutcome {
    fn fail(&mut self, index: usize, collection: Collection, id: &str, error: String) {
        self.failed.insert(
            index,
            FailedWrite {
                collection,
                id: id.to_string(),
                error,
            },
        );
    }
}

fn build_report(
    total: usize,
    staged: Vec<StagedEntry>,
    mut outcome: WriteOutcome,
    dry_run: bool,
) -> LoadReport {
    let mut collections: BTreeMap<Collection, CollectionSummary> = Collection::ALL
        .into_iter()
        .map(|collection| (collection, CollectionSummary::default()))
        .collect();
    let mut rejected = Vec::new();
    let mut failed_writes = Vec::new();
    let mut accepted = 0;

    for (index, entry) in staged.into_iter().enumerate() {
        let is_accepted = entry.is_accepted();
        if is_accepted {
            accepted += 1;
        }

        if let Some(collection) = entry.collection {
            let summary = collections.entry(collection).or_default();
            summary.received += 1;
            if is_accepted {
                summary.accepted += 1;
            } else {
                summary.rejected += 1;
            }
            if outcome.written.contains(&index) {
                summary.written += 1;
            }
            if let Some(failed) = outcome.failed.remove(&index) {
                summary.failed += 1;
                failed_writes.push(failed);
            }
        }

        if !is_accepted {
            debug!(
                collection = %entry.collection_name,
                id = ?entry.id,
                violations = entry.violations.len(),
                "Record rejected"
            );
            rejected.push(RejectedRecord {
                collection: entry.collection_name,
                id: entry.id,
                violations: entry.violations,
            });
        }
    }

    LoadReport {
        total,
        accepted,
        written: outcome.written.len(),
        dry_run,
        collections,
        rejected,
        failed_writes,
        aborted: outcome.aborted,
    }
}
