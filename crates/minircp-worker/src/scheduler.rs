// Interval scheduler for the ingestion cycle
//
// Runs the first cycle immediately, then one per period. A failed cycle is
// logged (and reported to the optional failure hook) and the loop keeps
// going; only the shutdown signal stops it.

use std::sync::Arc;
use std::time::Duration;

use minircp_core::RcpError;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::cycle::{CycleOutcome, CycleRunner};

type FailureHook = Box<dyn Fn(&RcpError) + Send + Sync>;

pub struct Scheduler {
    period: Duration,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    on_failure: Option<FailureHook>,
}

impl Scheduler {
    pub fn new(period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            period,
            shutdown_tx,
            shutdown_rx,
            on_failure: None,
        }
    }

    /// Install a hook invoked with every cycle failure (the scheduler keeps
    /// running either way).
    pub fn with_failure_hook(
        mut self,
        hook: impl Fn(&RcpError) + Send + Sync + 'static,
    ) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    /// Signal the running loop to stop after the current cycle.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Run cycles until shutdown.
    pub async fn run(&self, runner: Arc<dyn CycleRunner>) {
        tracing::info!(period_secs = self.period.as_secs(), "scheduler starting");

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut shutdown_rx = self.shutdown_rx.clone();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match runner.run_once().await {
                        Ok(CycleOutcome::SourceMissing) => {}
                        Ok(CycleOutcome::Ingested { inserted, .. }) => {
                            tracing::info!(inserted, "ingestion cycle succeeded");
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "ingestion cycle failed, retrying next interval");
                            if let Some(hook) = &self.on_failure {
                                hook(&e);
                            }
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    break;
                }
            }
        }

        tracing::info!("scheduler stopped");
    }
}
