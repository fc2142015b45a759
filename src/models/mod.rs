//! Data models for the monitoring service.

pub mod patient;

pub use patient::{Patient, VitalSigns};
