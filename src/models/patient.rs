use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One set of generated vitals for a patient. Overwritten on every
/// monitoring cycle, never historized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    /// Body temperature in °C, one decimal digit.
    pub temperature: f64,
    /// Systolic blood pressure in mmHg.
    pub systolic: i32,
    /// Diastolic blood pressure in mmHg.
    pub diastolic: i32,
    /// Pulse in bpm.
    pub pulse: i32,
}

/// A stored patient record: demographics, address, medical profile and the
/// current vitals snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    // Personal info
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub birthday: NaiveDate,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,

    // Address
    pub postal_code: String,
    pub region: String,
    pub city: String,
    pub street: String,
    pub house_number: String,

    // Medical profile
    pub blood_type: Option<String>,
    pub chronic_diseases: Vec<String>,
    pub is_other_diseases: bool,
    #[serde(default)]
    pub other_chronic_diseases: Vec<String>,
    pub allergies: Vec<String>,
    pub is_other_allergies: bool,
    #[serde(default)]
    pub other_allergies: Vec<String>,

    /// Unset until the first monitoring cycle writes one.
    #[serde(default)]
    pub vitals: Option<VitalSigns>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Display name used in alert messages: "last first middle", with the
    /// middle name omitted when absent.
    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.last_name,
            self.first_name,
            self.middle_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient_named(last: &str, first: &str, middle: Option<&str>) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            middle_name: middle.map(str::to_string),
            birthday: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            gender: "female".to_string(),
            phone: "+7 900 000-00-00".to_string(),
            email: None,
            postal_code: "101000".to_string(),
            region: "Moscow".to_string(),
            city: "Moscow".to_string(),
            street: "Tverskaya".to_string(),
            house_number: "1".to_string(),
            blood_type: Some("A+".to_string()),
            chronic_diseases: vec![],
            is_other_diseases: false,
            other_chronic_diseases: vec![],
            allergies: vec![],
            is_other_allergies: false,
            other_allergies: vec![],
            vitals: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn full_name_includes_middle_name() {
        let p = patient_named("Ivanova", "Anna", Some("Petrovna"));
        assert_eq!(p.full_name(), "Ivanova Anna Petrovna");
    }

    #[test]
    fn full_name_trims_missing_middle_name() {
        let p = patient_named("Ivanova", "Anna", None);
        assert_eq!(p.full_name(), "Ivanova Anna");
    }
}
