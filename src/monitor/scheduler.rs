//! Recurring monitoring cycle.
//!
//! [`VitalSignsMonitor`] owns the timer: `start()` spawns the loop task and
//! `stop()` cancels it, letting an in-flight cycle finish. The cycle runs
//! inline in the loop task and the interval skips overdue ticks, so two
//! cycles can never run concurrently.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::alert::{AlertSink, CriticalAlert};
use crate::models::VitalSigns;
use crate::monitor::{generator, thresholds};
use crate::store::{PatientStore, StoreError};

/// Outcome of one monitoring cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Records fetched from the store.
    pub processed: usize,
    /// Records whose vitals were persisted.
    pub updated: usize,
    /// Records skipped because the vitals update failed.
    pub update_failures: usize,
    pub alerts_sent: usize,
    pub alert_failures: usize,
}

/// Drives the periodic generate → persist → evaluate → alert pipeline.
pub struct VitalSignsMonitor {
    store: Arc<dyn PatientStore>,
    sink: Arc<dyn AlertSink>,
    interval: Duration,
    admin_email: String,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl VitalSignsMonitor {
    pub fn new(
        store: Arc<dyn PatientStore>,
        sink: Arc<dyn AlertSink>,
        interval: Duration,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            store,
            sink,
            interval,
            admin_email: admin_email.into(),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    /// Arm the recurring timer. The first cycle fires one full interval
    /// after this call. Calling `start` on a running monitor is a no-op.
    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.is_some() {
            warn!("vital signs monitor already running");
            return;
        }

        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.sink);
        let admin_email = self.admin_email.clone();
        let cancel = self.cancel.clone();
        let period = self.interval;

        *task = Some(tokio::spawn(async move {
            let first = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(first, period);
            // a cycle that outlives the period skips the overdue fire
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        match run_cycle(store.as_ref(), sink.as_ref(), &admin_email).await {
                            Ok(summary) => info!(
                                processed = summary.processed,
                                updated = summary.updated,
                                update_failures = summary.update_failures,
                                alerts_sent = summary.alerts_sent,
                                alert_failures = summary.alert_failures,
                                "vital signs cycle complete"
                            ),
                            Err(e) => error!(error = %e, "vital signs cycle failed"),
                        }
                    }
                }
            }
        }));

        info!(
            interval_secs = self.interval.as_secs(),
            "vital signs monitor started"
        );
    }

    /// Cancel the timer and wait for the loop task to finish. An in-flight
    /// cycle is allowed to complete; no new cycle is scheduled.
    pub async fn stop(&self) {
        self.cancel.cancel();
        let task = self.task.lock().await.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!(error = %e, "monitor task join failed");
            }
        }
        info!("vital signs monitor stopped");
    }
}

/// Run one full pass over the record set.
///
/// Per-record failures are isolated: a failed vitals update skips that
/// record but the cycle continues, and a failed alert dispatch never aborts
/// the remaining rules or records. Only a failed record fetch fails the
/// cycle as a whole.
pub async fn run_cycle(
    store: &dyn PatientStore,
    sink: &dyn AlertSink,
    admin_email: &str,
) -> Result<CycleSummary, StoreError> {
    run_cycle_with(store, sink, admin_email, generator::generate).await
}

async fn run_cycle_with<F>(
    store: &dyn PatientStore,
    sink: &dyn AlertSink,
    admin_email: &str,
    mut next_vitals: F,
) -> Result<CycleSummary, StoreError>
where
    F: FnMut() -> VitalSigns,
{
    let patients = store.list_patients().await?;
    let mut summary = CycleSummary {
        processed: patients.len(),
        ..Default::default()
    };

    for patient in &patients {
        let vitals = next_vitals();

        match store.update_vitals(patient.id, &vitals).await {
            Ok(()) => summary.updated += 1,
            Err(e) => {
                warn!(patient_id = %patient.id, error = %e, "vitals update failed");
                summary.update_failures += 1;
                continue;
            }
        }

        let name = patient.full_name();
        for message in thresholds::evaluate(&name, &vitals) {
            let alert = CriticalAlert::new(admin_email, patient.email.as_deref(), message);
            match sink.send(&alert).await {
                Ok(()) => summary.alerts_sent += 1,
                Err(e) => {
                    warn!(patient_id = %patient.id, error = %e, "alert dispatch failed");
                    summary.alert_failures += 1;
                }
            }
        }
    }

    Ok(summary)
}
