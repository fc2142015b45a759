//! Critical-condition thresholds.

use crate::models::VitalSigns;

/// Evaluate a freshly generated snapshot against the alert rules.
///
/// Rules are checked in a fixed order (temperature, pressure, pulse) and
/// fire independently; several can trigger for one snapshot. All
/// comparisons are strictly greater-than. Diastolic pressure never alerts
/// on its own; it only appears in the pressure message.
pub fn evaluate(name: &str, vitals: &VitalSigns) -> Vec<String> {
    let mut alerts = Vec::new();

    if vitals.temperature > 40.0 {
        alerts.push(format!(
            "patient {} temperature {:.1}°C",
            name, vitals.temperature
        ));
    }

    if vitals.systolic > 140 {
        alerts.push(format!(
            "patient {} pressure {}/{}",
            name, vitals.systolic, vitals.diastolic
        ));
    }

    if vitals.pulse > 120 {
        alerts.push(format!("patient {} pulse {}", name, vitals.pulse));
    }

    alerts
}
