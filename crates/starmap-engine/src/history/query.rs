use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use super::observation::ObservationRecord;
use crate::error::{Result, StarmapError};

/// Filters for the history list.
///
/// Dates are compared in the viewer's time zone, given as a fixed UTC offset,
/// so an observation at 23:30 local shows up under that local day.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    /// Case-insensitive substring of the star name. Empty matches all.
    pub name: String,
    /// Calendar day the observation was made on.
    pub date: Option<NaiveDate>,
    pub offset: FixedOffset,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            name: String::new(),
            date: None,
            offset: utc(),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Parse a `YYYY-MM-DD` filter. Empty input clears the date filter.
    pub fn with_date_str(mut self, date: &str) -> Result<Self> {
        let date = date.trim();
        self.date = if date.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|_| StarmapError::InvalidDate(date.to_string()))?,
            )
        };
        Ok(self)
    }

    /// Offset in minutes east of UTC. Out-of-range values fall back to UTC.
    pub fn with_offset_minutes(mut self, minutes: i32) -> Self {
        self.offset = FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| {
            log::warn!("ignoring invalid utc offset of {} minutes", minutes);
            utc()
        });
        self
    }

    pub fn matches(&self, record: &ObservationRecord) -> bool {
        if !self.name.is_empty()
            && !record
                .name()
                .to_lowercase()
                .contains(&self.name.to_lowercase())
        {
            return false;
        }
        match self.date {
            Some(day) => record.observed_at.with_timezone(&self.offset).date_naive() == day,
            None => true,
        }
    }

    /// Matching records, newest first. Ties keep their input order.
    pub fn apply<'a>(&self, records: &'a [ObservationRecord]) -> Vec<&'a ObservationRecord> {
        let mut out: Vec<_> = records.iter().filter(|r| self.matches(r)).collect();
        out.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::observation::{ObjectKind, Observation};
    use chrono::TimeZone;

    fn record(id: u64, name: &str, y: i32, m: u32, d: u32, h: u32) -> ObservationRecord {
        ObservationRecord {
            id,
            user_id: "u".into(),
            observation: Observation {
                name: name.into(),
                kind: ObjectKind::Star,
                magnitude: 1.0,
                distance: 1.0,
                ra: 0.0,
                dec: 0.0,
                description: String::new(),
            },
            observed_at: Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<ObservationRecord> {
        vec![
            record(1, "Sirius", 2025, 1, 10, 20),
            record(2, "Vega", 2025, 1, 12, 2),
            record(3, "Sirius", 2025, 1, 12, 22),
            record(4, "Deneb", 2025, 1, 11, 9),
        ]
    }

    fn ids(records: Vec<&ObservationRecord>) -> Vec<u64> {
        records.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn empty_query_lists_all_newest_first() {
        let records = sample();
        assert_eq!(ids(HistoryQuery::new().apply(&records)), vec![3, 2, 4, 1]);
    }

    #[test]
    fn name_filter_is_case_insensitive() {
        let records = sample();
        assert_eq!(ids(HistoryQuery::new().with_name("SIR").apply(&records)), vec![3, 1]);
    }

    #[test]
    fn date_filter_matches_calendar_day() {
        let records = sample();
        let q = HistoryQuery::new().with_date_str("2025-01-12").unwrap();
        assert_eq!(ids(q.apply(&records)), vec![3, 2]);
    }

    #[test]
    fn date_filter_uses_the_viewer_offset() {
        let records = sample();
        // UTC-5: Vega at 02:00Z on the 12th is the evening of the 11th.
        let q = HistoryQuery::new()
            .with_offset_minutes(-300)
            .with_date_str("2025-01-11")
            .unwrap();
        assert_eq!(ids(q.apply(&records)), vec![2, 4]);
    }

    #[test]
    fn name_and_date_combine() {
        let records = sample();
        let q = HistoryQuery::new()
            .with_name("sirius")
            .with_date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(ids(q.apply(&records)), vec![1]);
    }

    #[test]
    fn bad_date_is_an_error_and_blank_clears() {
        assert!(matches!(
            HistoryQuery::new().with_date_str("12/01/2025"),
            Err(StarmapError::InvalidDate(_))
        ));
        let q = HistoryQuery::new().with_date_str("  ").unwrap();
        assert!(q.date.is_none());
    }

    #[test]
    fn absurd_offset_falls_back_to_utc() {
        let q = HistoryQuery::new().with_offset_minutes(100_000);
        assert_eq!(q.offset.local_minus_utc(), 0);
    }
}
