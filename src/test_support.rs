//! Shared builders for unit tests.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::Patient;

pub(crate) fn sample_patient(last: &str, first: &str) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        middle_name: None,
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
