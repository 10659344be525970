use std::collections::{BTreeMap, HashMap, VecDeque};

use parking_lot::Mutex;

use crate::domain::{MemoryEntry, PersonalityId};

/// Bounded caption history per personality, shared across requests.
///
/// The set of personalities is fixed at construction, so the outer map is
/// never mutated and only the per-personality buffers are locked. Operations
/// on different personalities never contend.
pub struct PersonalityMemory {
    capacity: usize,
    buckets: HashMap<PersonalityId, Mutex<VecDeque<MemoryEntry>>>,
}

impl PersonalityMemory {
    pub fn new(ids: impl IntoIterator<Item = PersonalityId>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let buckets = ids
            .into_iter()
            .map(|id| (id, Mutex::new(VecDeque::with_capacity(capacity))))
            .collect();

        Self { capacity, buckets }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores `entry` as the newest item, evicting the oldest when full.
    pub fn append(&self, id: PersonalityId, entry: MemoryEntry) -> Result<(), MemoryError> {
        let bucket = self.bucket(id)?;
        let mut entries = bucket.lock();
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
        tracing::trace!(personality = %id, stored = entries.len(), "Memory entry appended");
        Ok(())
    }

    /// Up to `k` most recent entries, oldest first.
    pub fn recent(&self, id: PersonalityId, k: usize) -> Result<Vec<MemoryEntry>, MemoryError> {
        let bucket = self.bucket(id)?;
        let entries = bucket.lock();
        let skip = entries.len().saturating_sub(k);
        Ok(entries.iter().skip(skip).cloned().collect())
    }

    pub fn stats(&self) -> BTreeMap<PersonalityId, usize> {
        self.buckets
            .iter()
            .map(|(id, bucket)| (*id, bucket.lock().len()))
            .collect()
    }

    fn bucket(&self, id: PersonalityId) -> Result<&Mutex<VecDeque<MemoryEntry>>, MemoryError> {
        self.buckets
            .get(&id)
            .ok_or_else(|| MemoryError::InvalidPersonality(id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryError {
    #[error("personality not in catalog: {0}")]
    InvalidPersonality(String),
}
