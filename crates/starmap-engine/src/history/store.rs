use chrono::{DateTime, Utc};

use super::observation::{Observation, ObservationRecord};
use super::query::HistoryQuery;
use crate::error::{Result, StarmapError};

/// Where observations end up. The browser build keeps them in memory and
/// mirrors them to the hosted database through the host page.
pub trait HistoryStore {
    /// Record that `user_id` observed something at `at`.
    fn insert(
        &mut self,
        user_id: &str,
        observation: Observation,
        at: DateTime<Utc>,
    ) -> Result<ObservationRecord>;

    /// All of one user's records matching `query`, newest first.
    fn list(&self, user_id: &str, query: &HistoryQuery) -> Vec<ObservationRecord>;

    /// Delete one record. Deleting someone else's record is an error.
    fn delete(&mut self, user_id: &str, id: u64) -> Result<()>;

    /// Drop every record for `user_id`. Returns how many were removed.
    fn clear(&mut self, user_id: &str) -> usize;

    /// Swap `user_id`'s records for `records` as read back from the hosted
    /// database. Rows keep their ids. Returns how many were loaded.
    fn replace(&mut self, user_id: &str, records: Vec<ObservationRecord>) -> usize;
}

/// Vec-backed store. Re-observing a star updates the existing row's
/// timestamp instead of adding a duplicate.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    records: Vec<ObservationRecord>,
    next_id: u64,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for InMemoryHistory {
    fn insert(
        &mut self,
        user_id: &str,
        observation: Observation,
        at: DateTime<Utc>,
    ) -> Result<ObservationRecord> {
        if user_id.is_empty() {
            return Err(StarmapError::History("observation without a user".into()));
        }

        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|r| r.user_id == user_id && r.observation.name == observation.name)
        {
            existing.observation = observation;
            existing.observed_at = at;
            log::debug!("history: refreshed {} for {}", existing.name(), user_id);
            return Ok(existing.clone());
        }

        self.next_id += 1;
        let record = ObservationRecord {
            id: self.next_id,
            user_id: user_id.to_string(),
            observation,
            observed_at: at,
        };
        log::debug!("history: added {} for {}", record.name(), user_id);
        self.records.push(record.clone());
        Ok(record)
    }

    fn list(&self, user_id: &str, query: &HistoryQuery) -> Vec<ObservationRecord> {
        let mine: Vec<ObservationRecord> = self
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        query.apply(&mine).into_iter().cloned().collect()
    }

    fn delete(&mut self, user_id: &str, id: u64) -> Result<()> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id && r.user_id == user_id)
            .ok_or_else(|| StarmapError::History(format!("no record {} for this user", id)))?;
        self.records.remove(idx);
        Ok(())
    }

    fn clear(&mut self, user_id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.user_id != user_id);
        before - self.records.len()
    }

    fn replace(&mut self, user_id: &str, records: Vec<ObservationRecord>) -> usize {
        self.clear(user_id);
        let count = records.len();
        for mut record in records {
            record.user_id = user_id.to_string();
            self.next_id = self.next_id.max(record.id);
            self.records.push(record);
        }
        log::debug!("history: loaded {} rows for {}", count, user_id);
        count
    }
}
