//! # Policy Store
//!
//! In-memory mapping from [`PolicyId`] to [`PolicySummary`].
//!
//! The store is an explicit value owned by whoever runs the pipeline. It is
//! never global, lives as long as its owner, and holds at most `limit`
//! records. Iteration follows `PolicyId` order (BTreeMap).
//!
//! `PolicyStore` is `Send` but not internally synchronised; concurrent
//! runs must share it behind a lock so that id generation and insertion
//! happen under one guard.

use crate::primitives::MAX_POLICY_RECORDS;
use crate::{CrudAction, EchoError, PolicyId, PolicyRecord, PolicySummary, SummaryPatch};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct PolicyStore {
    records: BTreeMap<PolicyId, PolicySummary>,
    limit: usize,
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::with_limit(MAX_POLICY_RECORDS)
    }
}

impl PolicyStore {
    /// Create an empty store with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `limit` records.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: BTreeMap::new(),
            limit,
        }
    }

    /// Insert a summary under a freshly generated id.
    pub fn create(&mut self, summary: PolicySummary) -> Result<PolicyId, EchoError> {
        if self.records.len() >= self.limit {
            return Err(EchoError::CapacityExceeded(self.limit));
        }

        let mut id = PolicyId::new();
        while self.records.contains_key(&id) {
            id = PolicyId::new();
        }
        self.records.insert(id, summary);
        Ok(id)
    }

    /// Get a stored summary.
    #[must_use]
    pub fn get(&self, id: &PolicyId) -> Option<&PolicySummary> {
        self.records.get(id)
    }

    /// Get an owned copy of a record.
    #[must_use]
    pub fn read(&self, id: &PolicyId) -> Option<PolicyRecord> {
        self.records.get(id).map(|summary| PolicyRecord {
            id: *id,
            summary: summary.clone(),
        })
    }

    /// Shallow-merge `patch` into an existing summary.
    ///
    /// The store is untouched when `id` is absent.
    pub fn update(&mut self, id: &PolicyId, patch: &SummaryPatch) -> Result<(), EchoError> {
        let summary = self
            .records
            .get_mut(id)
            .ok_or(EchoError::PolicyNotFound {
                id: *id,
                action: CrudAction::Update,
            })?;
        patch.apply_to(summary);
        Ok(())
    }

    /// Remove a record, returning it.
    pub fn delete(&mut self, id: &PolicyId) -> Result<PolicyRecord, EchoError> {
        self.records
            .remove(id)
            .map(|summary| PolicyRecord { id: *id, summary })
            .ok_or(EchoError::PolicyNotFound {
                id: *id,
                action: CrudAction::Delete,
            })
    }

    #[must_use]
    pub fn contains(&self, id: &PolicyId) -> bool {
        self.records.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over stored records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&PolicyId, &PolicySummary)> {
        self.records.iter()
    }

    /// Owned copies of all records, in id order.
    #[must_use]
    pub fn records(&self) -> Vec<PolicyRecord> {
        self.records
            .iter()
            .map(|(id, summary)| PolicyRecord {
                id: *id,
                summary: summary.clone(),
            })
            .collect()
    }
}
