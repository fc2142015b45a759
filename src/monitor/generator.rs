//! Synthetic vitals generation.

use rand::Rng;

use crate::models::VitalSigns;

/// Produce a new vitals snapshot, each field sampled independently and
/// uniformly: temperature 35.0–41.0 °C (one decimal), systolic 100–150,
/// diastolic 60–100, pulse 60–130.
pub fn generate() -> VitalSigns {
    with_rng(&mut rand::thread_rng())
}

pub fn with_rng<R: Rng>(rng: &mut R) -> VitalSigns {
    VitalSigns {
        // sampled in tenths so the value always carries one decimal digit
        temperature: rng.gen_range(350..=410) as f64 / 10.0,
        systolic: rng.gen_range(100..=150),
        diastolic: rng.gen_range(60..=100),
        pulse: rng.gen_range(60..=130),
    }
}
