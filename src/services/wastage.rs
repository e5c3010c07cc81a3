use chrono::{Datelike, NaiveDate, Utc};

use crate::errors::ApiError;
use crate::models::menu::Weekday;
use crate::models::wastage::{WastageEntry, WastageLog, YesterdayImpact};

/// Kilograms one student eats in a meal, for the could-have-fed estimate.
const KG_PER_STUDENT: f64 = 0.7;

/// The series covers one menu cycle.
const MAX_ENTRIES: usize = 7;

pub struct WastageService;

impl WastageService {
    /// Records (or re-records) today's figures. Validation is
    /// field-specific and happens before any state change.
    pub fn record(
        log: &mut WastageLog,
        cooked: f64,
        wasted: f64,
        date: NaiveDate,
    ) -> Result<WastageEntry, ApiError> {
        if !cooked.is_finite() || cooked < 0.0 {
            return Err(ApiError::Validation(
                "Please enter a valid cooked amount".into(),
            ));
        }
        if !wasted.is_finite() || wasted < 0.0 {
            return Err(ApiError::Validation(
                "Please enter a valid wasted amount".into(),
            ));
        }
        if wasted > cooked {
            return Err(ApiError::Validation(
                "Wasted amount cannot exceed cooked amount".into(),
            ));
        }

        let entry = WastageEntry {
            date,
            day: Weekday::from_chrono(date.weekday()),
            cooked,
            wasted,
            recorded_at: Utc::now(),
        };

        // One entry per date: re-recording replaces, then the series is
        // trimmed to the most recent 7 dates.
        log.entries.retain(|e| e.date != date);
        log.entries.push(entry.clone());
        log.entries.sort_by_key(|e| e.date);
        let overflow = log.entries.len().saturating_sub(MAX_ENTRIES);
        log.entries.drain(..overflow);

        Ok(entry)
    }

    /// The entry dated exactly one day before `today`, with the derived
    /// could-have-fed figure. None when nothing was recorded yesterday.
    pub fn yesterday(log: &WastageLog, today: NaiveDate) -> Option<YesterdayImpact> {
        let target = today.pred_opt()?;
        log.entries.iter().find(|e| e.date == target).map(|e| YesterdayImpact {
            date: e.date,
            cooked: e.cooked,
            wasted: e.wasted,
            students_fed: students_fed(e.wasted),
        })
    }
}

/// How many students yesterday's waste could have fed, at a fixed ration
/// per student. Zero or missing input maps to 0.
pub fn students_fed(wasted_kg: f64) -> u32 {
    if !wasted_kg.is_finite() || wasted_kg <= 0.0 {
        return 0;
    }
    (wasted_kg / KG_PER_STUDENT).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_wasted_cannot_exceed_cooked() {
        let mut log = WastageLog::default();
        let result = WastageService::record(&mut log, 10.0, 15.0, date("2025-12-15"));
        assert!(result.is_err());
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_valid_record_accepted() {
        let mut log = WastageLog::default();
        let entry = WastageService::record(&mut log, 10.0, 5.0, date("2025-12-15")).unwrap();
        assert_eq!(entry.cooked, 10.0);
        assert_eq!(entry.wasted, 5.0);
        assert_eq!(entry.day, Weekday::Monday);
        assert_eq!(log.entries.len(), 1);
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        let mut log = WastageLog::default();
        assert!(WastageService::record(&mut log, -1.0, 0.0, date("2025-12-15")).is_err());
        assert!(WastageService::record(&mut log, 10.0, -1.0, date("2025-12-15")).is_err());
        assert!(WastageService::record(&mut log, f64::NAN, 0.0, date("2025-12-15")).is_err());
        assert!(WastageService::record(&mut log, 10.0, f64::NAN, date("2025-12-15")).is_err());
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_students_fed_rounds_to_nearest() {
        assert_eq!(students_fed(5.0), 7); // 5 / 0.7 = 7.14…
        assert_eq!(students_fed(0.7), 1);
        assert_eq!(students_fed(0.0), 0);
        assert_eq!(students_fed(-3.0), 0);
    }

    #[test]
    fn test_same_date_replaces() {
        let mut log = WastageLog::default();
        WastageService::record(&mut log, 10.0, 5.0, date("2025-12-15")).unwrap();
        WastageService::record(&mut log, 12.0, 3.0, date("2025-12-15")).unwrap();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].cooked, 12.0);
        assert_eq!(log.entries[0].wasted, 3.0);
    }

    #[test]
    fn test_eighth_date_evicts_oldest() {
        let mut log = WastageLog::default();
        for offset in 0..8i64 {
            let d = date("2025-12-01") + chrono::Duration::days(offset);
            WastageService::record(&mut log, 10.0, 1.0, d).unwrap();
        }
        assert_eq!(log.entries.len(), 7);
        // 2025-12-01 was evicted; the series now starts at 12-02
        assert_eq!(log.entries[0].date, date("2025-12-02"));
        assert_eq!(log.entries[6].date, date("2025-12-08"));
    }

    #[test]
    fn test_yesterday_picks_exactly_the_prior_date() {
        let mut log = WastageLog::default();
        WastageService::record(&mut log, 10.0, 5.0, date("2025-12-14")).unwrap();
        WastageService::record(&mut log, 10.0, 2.0, date("2025-12-13")).unwrap();

        let impact = WastageService::yesterday(&log, date("2025-12-15")).unwrap();
        assert_eq!(impact.date, date("2025-12-14"));
        assert_eq!(impact.wasted, 5.0);
        assert_eq!(impact.students_fed, 7);

        assert!(WastageService::yesterday(&log, date("2025-12-17")).is_none());
    }
}
