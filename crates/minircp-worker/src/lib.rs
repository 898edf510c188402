// Ingestion worker
//
// Drives the periodic ingestion cycle: read the delivered events file, parse
// and filter it, append the batch to the event store, then rotate the file
// into the numbered archive. The scheduler retries forever on a fixed
// interval and stops cleanly on a shutdown signal.

pub mod archive;
pub mod cycle;
pub mod scheduler;

pub use archive::archive_file;
pub use cycle::{CycleOutcome, CycleRunner, IngestCycle};
pub use scheduler::Scheduler;
