// storage/src/sequence.rs

use std::sync::Arc;

use tracing::warn;

use models::{ClinicError, ClinicResult, CodePrefix};

use crate::store::ClinicStore;

/// Hands out unique, monotonically increasing integers per named counter.
///
/// All synchronization is delegated to the store's atomic
/// upsert-and-increment: the allocator holds no locks and caches nothing,
/// so any number of process instances can allocate concurrently. Numbers
/// are never reused — a caller that aborts after drawing one leaves a gap
/// in the display sequence, which is accepted; duplicates are not.
#[derive(Clone)]
pub struct SequenceAllocator {
    store: Arc<dyn ClinicStore>,
}

impl SequenceAllocator {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        SequenceAllocator { store }
    }

    /// Returns the next value of the named sequence, creating it at 1 when
    /// absent.
    ///
    /// If the increment primitive yields no post-update document (an
    /// at-least-once gap in some engines), the counter is re-read exactly
    /// once before surfacing `StorageUnavailable`. No other retries.
    pub async fn allocate(&self, name: &str) -> ClinicResult<u64> {
        if name.is_empty() {
            return Err(ClinicError::Validation(
                "sequence name must not be empty".to_string(),
            ));
        }

        if let Some(value) = self.store.increment_counter(name).await? {
            return Ok(value);
        }

        warn!("counter '{}' missing after upsert, re-reading once", name);
        match self.store.read_counter(name).await? {
            Some(value) => Ok(value),
            None => Err(ClinicError::StorageUnavailable(format!(
                "counter '{}' unreadable after upsert",
                name
            ))),
        }
    }

    /// Allocates from the prefix's sequence and formats the display code
    /// (`PT-001`, `V-002`, `B-003`).
    pub async fn next_code(&self, prefix: CodePrefix) -> ClinicResult<String> {
        let number = self.allocate(prefix.sequence_name()).await?;
        Ok(prefix.code(number))
    }
}
