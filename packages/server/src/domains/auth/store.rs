//! In-memory OTP record store.
//!
//! One async mutex guards the whole map. Verification is a
//! read-modify-write, so callers that need atomicity run their entire
//! decision inside [`OtpStore::update`]; the closure executes under the
//! lock, which rules out lost attempt decrements and double-consumed
//! codes for the same identity. At this load a single lock is adequate;
//! operations on different identities only contend on the map itself.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::models::{OtpRecord, PhoneNumber};

#[derive(Default)]
pub struct OtpStore {
    records: Mutex<HashMap<PhoneNumber, OtpRecord>>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a record, unconditionally replacing any outstanding one for
    /// the same identity.
    pub async fn insert(&self, record: OtpRecord) {
        let mut records = self.records.lock().await;
        records.insert(record.identity.clone(), record);
    }

    pub async fn get(&self, identity: &PhoneNumber) -> Option<OtpRecord> {
        let records = self.records.lock().await;
        records.get(identity).cloned()
    }

    pub async fn remove(&self, identity: &PhoneNumber) -> Option<OtpRecord> {
        let mut records = self.records.lock().await;
        records.remove(identity)
    }

    /// Run `f` with exclusive access to the slot for `identity`.
    ///
    /// The closure receives the current record as `&mut Option<OtpRecord>`;
    /// leaving `None` deletes the record, a `Some` is written back. The
    /// whole call happens under the store lock.
    pub async fn update<R>(
        &self,
        identity: &PhoneNumber,
        f: impl FnOnce(&mut Option<OtpRecord>) -> R,
    ) -> R {
        let mut records = self.records.lock().await;
        let mut slot = records.remove(identity);
        let result = f(&mut slot);
        if let Some(record) = slot {
            records.insert(identity.clone(), record);
        }
        result
    }

    /// Evict expired records. Purely housekeeping: expiry is also checked
    /// lazily at verification time, so correctness never depends on this.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}
