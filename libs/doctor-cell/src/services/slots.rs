// libs/doctor-cell/src/services/slots.rs
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::SlotError;

type DayLedger = HashMap<NaiveDate, BTreeSet<String>>;

/// Pure occupancy bookkeeping for doctor time slots, keyed by
/// `(doctor_id, date, time-label)`. Knows nothing about appointments.
///
/// Every reserve/release for one doctor runs inside that doctor's own
/// mutex, so concurrent reserve calls on the same key see exactly one
/// winner. The outer map lock is only held while looking up or creating
/// the per-doctor ledger handle, never across a reservation.
pub struct SlotStore {
    ledgers: RwLock<HashMap<Uuid, Arc<Mutex<DayLedger>>>>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self {
            ledgers: RwLock::new(HashMap::new()),
        }
    }

    /// Atomically add a time label to the doctor's occupancy for `date`.
    /// Exactly one of any set of concurrent callers for the same key
    /// succeeds; the rest observe `SlotError::Conflict`.
    pub async fn reserve(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
        time: &str,
    ) -> Result<(), SlotError> {
        let ledger = self.ledger(doctor_id).await;
        let mut days = ledger.lock().await;

        let taken = days.entry(date).or_default();
        if !taken.insert(time.to_string()) {
            debug!("Slot {} {} already booked for doctor {}", date, time, doctor_id);
            return Err(SlotError::Conflict);
        }

        debug!("Reserved slot {} {} for doctor {}", date, time, doctor_id);
        Ok(())
    }

    /// Remove a time label from the doctor's occupancy. Releasing a free
    /// or never-reserved key is a no-op: cancellations may be retried or
    /// arrive after a prior release.
    pub async fn release(&self, doctor_id: Uuid, date: NaiveDate, time: &str) {
        let existing = {
            let ledgers = self.ledgers.read().await;
            ledgers.get(&doctor_id).cloned()
        };

        let Some(ledger) = existing else {
            warn!("Release for unknown doctor {} ignored", doctor_id);
            return;
        };

        let mut days = ledger.lock().await;
        if let Some(taken) = days.get_mut(&date) {
            taken.remove(time);
            if taken.is_empty() {
                days.remove(&date);
            }
        }
        debug!("Released slot {} {} for doctor {}", date, time, doctor_id);
    }

    pub async fn is_booked(&self, doctor_id: Uuid, date: NaiveDate, time: &str) -> bool {
        let existing = {
            let ledgers = self.ledgers.read().await;
            ledgers.get(&doctor_id).cloned()
        };

        match existing {
            Some(ledger) => {
                let days = ledger.lock().await;
                days.get(&date).map(|t| t.contains(time)).unwrap_or(false)
            }
            None => false,
        }
    }

    /// Point-in-time copy of the doctor's occupancy map.
    pub async fn snapshot(&self, doctor_id: Uuid) -> DayLedger {
        let existing = {
            let ledgers = self.ledgers.read().await;
            ledgers.get(&doctor_id).cloned()
        };

        match existing {
            Some(ledger) => ledger.lock().await.clone(),
            None => HashMap::new(),
        }
    }

    async fn ledger(&self, doctor_id: Uuid) -> Arc<Mutex<DayLedger>> {
        {
            let ledgers = self.ledgers.read().await;
            if let Some(ledger) = ledgers.get(&doctor_id) {
                return Arc::clone(ledger);
            }
        }

        let mut ledgers = self.ledgers.write().await;
        Arc::clone(ledgers.entry(doctor_id).or_default())
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}
