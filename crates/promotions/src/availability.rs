//! Daily pack availability counter.
//!
//! Pack Black releases a fixed number of packs per day. The counter is
//! persisted behind the storage port and resets the first time it is read
//! on a new day. Callers pass `today` in, which keeps the reset logic
//! testable without faking the clock.

use chrono::NaiveDate;

use crate::storage::{StorageError, StoragePort, keys};

/// Stored-date format, e.g. `2026-08-26`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Counts packs remaining for the current day.
#[derive(Debug, Clone, Copy)]
pub struct PackAvailability {
    daily_limit: u32,
}

impl PackAvailability {
    /// A counter releasing `daily_limit` packs per day.
    #[must_use]
    pub const fn new(daily_limit: u32) -> Self {
        Self { daily_limit }
    }

    /// Packs still available today, resetting the counter when the stored
    /// date is not `today`. An unreadable stored count or date also resets:
    /// a fresh day's worth of packs is the only safe interpretation.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    pub fn remaining(
        &self,
        storage: &dyn StoragePort,
        today: NaiveDate,
    ) -> Result<u32, StorageError> {
        let stored_date = storage
            .get(keys::PACKS_RESET_DATE)?
            .and_then(|raw| NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok());

        if stored_date != Some(today) {
            tracing::debug!(%today, limit = self.daily_limit, "Resetting daily pack counter");
            self.reset(storage, today)?;
            return Ok(self.daily_limit);
        }

        let remaining = storage
            .get(keys::PACKS_REMAINING)?
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(self.daily_limit);
        Ok(remaining)
    }

    /// Record a pack purchase. Returns `false` when today's packs are sold
    /// out, leaving the counter untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend fails.
    pub fn record_purchase(
        &self,
        storage: &dyn StoragePort,
        today: NaiveDate,
    ) -> Result<bool, StorageError> {
        let remaining = self.remaining(storage, today)?;
        if remaining == 0 {
            return Ok(false);
        }
        storage.set(keys::PACKS_REMAINING, &(remaining - 1).to_string())?;
        Ok(true)
    }

    fn reset(&self, storage: &dyn StoragePort, today: NaiveDate) -> Result<(), StorageError> {
        storage.set(
            keys::PACKS_RESET_DATE,
            &today.format(DATE_FORMAT).to_string(),
        )?;
        storage.set(keys::PACKS_REMAINING, &self.daily_limit.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStorage;

    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).expect("valid date")
    }

    #[test]
    fn test_first_read_seeds_the_daily_limit() {
        let storage = MemoryStorage::new();
        let packs = PackAvailability::new(15);

        assert_eq!(packs.remaining(&storage, day("2026-08-26")).expect("read"), 15);
    }

    #[test]
    fn test_purchases_decrement_until_sold_out() {
        let storage = MemoryStorage::new();
        let packs = PackAvailability::new(2);
        let today = day("2026-08-26");

        assert!(packs.record_purchase(&storage, today).expect("buy"));
        assert!(packs.record_purchase(&storage, today).expect("buy"));
        assert!(!packs.record_purchase(&storage, today).expect("sold out"));
        assert_eq!(packs.remaining(&storage, today).expect("read"), 0);
    }

    #[test]
    fn test_new_day_resets_the_counter() {
        let storage = MemoryStorage::new();
        let packs = PackAvailability::new(15);
        let monday = day("2026-08-24");

        packs.record_purchase(&storage, monday).expect("buy");
        assert_eq!(packs.remaining(&storage, monday).expect("read"), 14);

        assert_eq!(packs.remaining(&storage, day("2026-08-25")).expect("read"), 15);
    }

    #[test]
    fn test_garbage_stored_state_resets() {
        let storage = MemoryStorage::new();
        storage.set(keys::PACKS_RESET_DATE, "not-a-date").expect("set");
        storage.set(keys::PACKS_REMAINING, "banana").expect("set");

        let packs = PackAvailability::new(15);
        assert_eq!(packs.remaining(&storage, day("2026-08-26")).expect("read"), 15);
    }
}
