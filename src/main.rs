//! VitalWatch service
//!
//! Main entry point: wires the record store, the alert sink and the
//! monitoring scheduler, then runs until interrupted.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitalwatch::alert::LogAlertSink;
use vitalwatch::config;
use vitalwatch::models::Patient;
use vitalwatch::monitor::VitalSignsMonitor;
use vitalwatch::store::MemoryPatientStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = config::load_config().context("failed to load configuration")?;

    // Seed the record store
    let store = Arc::new(MemoryPatientStore::new());
    if let Some(path) = &settings.seed.patients_file {
        let count = seed_patients(&store, path).await?;
        info!(count, path = %path, "seeded patient records");
    }

    // Start the monitoring scheduler
    let monitor = VitalSignsMonitor::new(
        store,
        Arc::new(LogAlertSink::new()),
        Duration::from_secs(settings.monitoring.interval_secs),
        settings.monitoring.admin_email.clone(),
    );
    monitor.start().await;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown requested");
    monitor.stop().await;

    Ok(())
}

async fn seed_patients(store: &MemoryPatientStore, path: &str) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path))?;
    let patients: Vec<Patient> =
        serde_json::from_str(&raw).context("failed to parse seed file")?;
    let count = patients.len();
    for patient in patients {
        store.add_patient(patient).await;
    }
    Ok(count)
}
