//! Where candidate sync codes come from.

use std::sync::atomic::{AtomicUsize, Ordering};
use sync_types::SyncCode;

/// Supplies candidate codes for new records.
pub trait CodeSource: Send + Sync {
    /// Next candidate. May repeat; the store decides whether it is free.
    fn next_code(&self) -> SyncCode;
}

/// Uniformly random codes from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodes;

impl CodeSource for RandomCodes {
    fn next_code(&self) -> SyncCode {
        SyncCode::random()
    }
}

/// Cycles through a fixed list of codes.
///
/// Makes collisions reproducible.
#[derive(Debug)]
pub struct SequenceCodes {
    codes: Vec<SyncCode>,
    next: AtomicUsize,
}

impl SequenceCodes {
    /// Create a source that yields `codes` in order, wrapping around.
    ///
    /// # Panics
    ///
    /// Panics if `codes` is empty.
    pub fn new(codes: Vec<SyncCode>) -> Self {
        assert!(!codes.is_empty(), "SequenceCodes needs at least one code");
        Self {
            codes,
            next: AtomicUsize::new(0),
        }
    }
}

impl CodeSource for SequenceCodes {
    fn next_code(&self) -> SyncCode {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.codes.len();
        self.codes[index].clone()
    }
}
