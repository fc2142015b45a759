//! VitalWatch core library
//!
//! Periodic patient vitals monitoring with threshold alerting, plus
//! on-demand statistics over the patient record set.

pub mod alert;
pub mod models;
pub mod monitor;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

/// Application configuration
pub mod config {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Settings {
        pub monitoring: MonitoringSettings,
        #[serde(default)]
        pub seed: SeedSettings,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MonitoringSettings {
        /// Seconds between monitoring cycles.
        #[serde(default = "default_interval_secs")]
        pub interval_secs: u64,
        /// Address every critical alert is sent to.
        pub admin_email: String,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct SeedSettings {
        /// Optional JSON file of patient records loaded at startup.
        pub patients_file: Option<String>,
    }

    fn default_interval_secs() -> u64 {
        30
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Settings, config::ConfigError> {
        // Start with default settings, override with environment-specific
        // settings, then with environment variables
        let env = std::env::var("VITALWATCH_ENV").unwrap_or_else(|_| "development".into());
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("VITALWATCH").separator("__"))
            .build()?
            .try_deserialize()
    }
}
