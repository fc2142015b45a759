//! On-demand statistics over the patient record set.
//!
//! Four independent read-only queries: attendance over time and frequency
//! counts for allergies, chronic diseases, and blood types. Safe to run
//! concurrently with monitoring cycles and with each other.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::store::{PatientStore, StoreError};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("unknown attendance period: {0}")]
    UnknownPeriod(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reporting window for attendance statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendancePeriod {
    LastWeek,
    LastMonth,
    LastYear,
}

impl FromStr for AttendancePeriod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, StatsError> {
        match s {
            "last-week" => Ok(Self::LastWeek),
            "last-month" => Ok(Self::LastMonth),
            "last-year" => Ok(Self::LastYear),
            other => Err(StatsError::UnknownPeriod(other.to_string())),
        }
    }
}

/// One time bucket: day ("YYYY-MM-DD") or month ("YYYY-MM") and the number
/// of records created in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendancePoint {
    pub date: String,
    pub value: u64,
}

/// One categorical bucket: a known label or the sentinel "other".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub value: u64,
}

/// Read-only aggregation over the record store.
pub struct StatisticsService {
    store: Arc<dyn PatientStore>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// Attendance counts bucketed over the requested window, ending now.
    pub async fn attendance(
        &self,
        period: AttendancePeriod,
    ) -> Result<Vec<AttendancePoint>, StatsError> {
        self.attendance_at(period, Utc::now()).await
    }

    /// Attendance counts with the window anchored at an explicit instant.
    ///
    /// Every bucket in the range appears in the output, zero counts
    /// included, in chronological order.
    pub async fn attendance_at(
        &self,
        period: AttendancePeriod,
        now: DateTime<Utc>,
    ) -> Result<Vec<AttendancePoint>, StatsError> {
        let today = now.date_naive();
        match period {
            AttendancePeriod::LastWeek => {
                self.daily_points(today - Duration::days(6), today).await
            }
            AttendancePeriod::LastMonth => {
                let start = today
                    .checked_sub_months(Months::new(1))
                    .expect("date arithmetic stays in range");
                self.daily_points(start, today).await
            }
            AttendancePeriod::LastYear => {
                let start = NaiveDate::from_ymd_opt(today.year() - 1, today.month(), 1)
                    .expect("first day of month is always valid");
                self.monthly_points(start, today).await
            }
        }
    }

    async fn daily_points(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendancePoint>, StatsError> {
        let mut points = Vec::new();
        let mut day = start;
        while day <= end {
            let next = day + Duration::days(1);
            let value = self
                .store
                .count_created_between(day_start(day), day_start(next))
                .await?;
            points.push(AttendancePoint {
                date: day.format("%Y-%m-%d").to_string(),
                value,
            });
            day = next;
        }
        Ok(points)
    }

    async fn monthly_points(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendancePoint>, StatsError> {
        let mut points = Vec::new();
        let mut month = first_of_month(start);
        let last = first_of_month(end);
        while month <= last {
            let next = next_month(month);
            let value = self
                .store
                .count_created_between(day_start(month), day_start(next))
                .await?;
            points.push(AttendancePoint {
                date: month.format("%Y-%m").to_string(),
                value,
            });
            month = next;
        }
        Ok(points)
    }

    /// Allergy frequencies across all records, most frequent first.
    pub async fn allergies(&self) -> Result<Vec<CategoryCount>, StatsError> {
        let patients = self.store.list_patients().await?;
        Ok(count_with_other(patients.iter().map(|p| {
            (
                p.allergies.as_slice(),
                p.is_other_allergies,
                p.other_allergies.as_slice(),
            )
        })))
    }

    /// Chronic-disease frequencies across all records, most frequent first.
    pub async fn chronic_diseases(&self) -> Result<Vec<CategoryCount>, StatsError> {
        let patients = self.store.list_patients().await?;
        Ok(count_with_other(patients.iter().map(|p| {
            (
                p.chronic_diseases.as_slice(),
                p.is_other_diseases,
                p.other_chronic_diseases.as_slice(),
            )
        })))
    }

    /// Blood-type frequencies across all records, most frequent first.
    /// Records without a blood type are skipped.
    pub async fn blood_types(&self) -> Result<Vec<CategoryCount>, StatsError> {
        let patients = self.store.list_patients().await?;
        let mut counts: HashMap<String, u64> = HashMap::new();
        for patient in &patients {
            if let Some(blood_type) = patient.blood_type.as_deref().filter(|s| !s.is_empty()) {
                *counts.entry(blood_type.to_string()).or_insert(0) += 1;
            }
        }
        let mut entries: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(label, value)| CategoryCount { label, value })
            .collect();
        sort_by_count(&mut entries);
        Ok(entries)
    }
}

fn count_with_other<'a, I>(records: I) -> Vec<CategoryCount>
where
    I: Iterator<Item = (&'a [String], bool, &'a [String])>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut other = 0u64;

    for (values, is_other, other_values) in records {
        for value in values {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        // one per qualifying record, not one per free-text entry
        if is_other && !other_values.is_empty() {
            other += 1;
        }
    }

    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, value)| CategoryCount { label, value })
        .collect();
    if other > 0 {
        entries.push(CategoryCount {
            label: "other".to_string(),
            value: other,
        });
    }
    sort_by_count(&mut entries);
    entries
}

/// Count descending; ties break on label ascending so output is stable.
fn sort_by_count(entries: &mut [CategoryCount]) {
    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1)
        .expect("first day of month is always valid")
}

fn next_month(month: NaiveDate) -> NaiveDate {
    let (year, month) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of month is always valid")
}
