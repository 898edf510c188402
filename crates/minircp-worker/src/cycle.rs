// One ingestion cycle: read -> parse -> store -> archive
//
// A missing source file is the normal state between deliveries (archiving
// consumes the file), so it ends the cycle quietly. Everything else that
// goes wrong aborts the cycle; the transactional batch insert guarantees an
// aborted cycle leaves no partial batch behind.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use minircp_core::{parser, AppConfig, EventStore, PointClassifier, Result};

use crate::archive;

/// What a single cycle run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No events file at the configured path; nothing to do this cycle
    SourceMissing,
    /// A batch was persisted and the source file rotated into the archive
    Ingested {
        inserted: u64,
        archived_to: PathBuf,
    },
}

/// Seam between the scheduler and the actual cycle, so scheduling can be
/// tested with a fake runner.
#[async_trait]
pub trait CycleRunner: Send + Sync {
    async fn run_once(&self) -> Result<CycleOutcome>;
}

/// The production cycle over the configured events file and an event store.
pub struct IngestCycle {
    events_file: PathBuf,
    archive_dir: PathBuf,
    classifier: PointClassifier,
    store: Arc<dyn EventStore>,
}

impl IngestCycle {
    pub fn new(config: &AppConfig, store: Arc<dyn EventStore>) -> Self {
        Self {
            events_file: config.events_file.clone(),
            archive_dir: config.archive_folder.clone(),
            classifier: config.classifier(),
            store,
        }
    }
}

#[async_trait]
impl CycleRunner for IngestCycle {
    async fn run_once(&self) -> Result<CycleOutcome> {
        tracing::info!(events_file = %self.events_file.display(), "starting ingestion cycle");

        tokio::fs::create_dir_all(&self.archive_dir).await?;

        let bytes = match tokio::fs::read(&self.events_file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("no events file delivered, nothing to ingest");
                return Ok(CycleOutcome::SourceMissing);
            }
            Err(e) => return Err(e.into()),
        };

        let text = parser::decode_events_file(&bytes)?;
        let records = parser::parse_records(&text)?;
        let records = self.classifier.filter_known(records);

        let inserted = self.store.insert_batch(&records).await?;
        tracing::info!(inserted, "inserted events into store");

        let archived_to = archive::archive_file(&self.events_file, &self.archive_dir)?;
        tracing::info!("ingestion cycle completed");

        Ok(CycleOutcome::Ingested {
            inserted,
            archived_to,
        })
    }
}
