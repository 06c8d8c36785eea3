use std::collections::HashSet;

use crate::error::{AllocError, OverlapError};

/// Issues output addresses in order and refuses to issue any address twice.
///
/// Relocation only moves the cursor; landing on an address that was already
/// issued is reported when that address is next requested.
#[derive(Debug, Clone)]
pub struct LocationAllocator {
    /// `None` once `u64::MAX` has been issued.
    cursor: Option<u64>,
    issued: HashSet<u64>,
}

impl Default for LocationAllocator {
    fn default() -> Self {
        Self { cursor: Some(0), issued: HashSet::new() }
    }
}

impl LocationAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The address the next call to [`get_next`](Self::get_next) will try.
    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    pub fn get_next(&mut self) -> Result<u64, AllocError> {
        let address = self.cursor.ok_or(AllocError::Exhausted)?;
        if !self.issued.insert(address) {
            return Err(OverlapError { address }.into());
        }
        self.cursor = address.checked_add(1);
        tracing::trace!(address, "issued");
        Ok(address)
    }

    pub fn set_start(&mut self, address: u64) {
        tracing::debug!(from = ?self.cursor, to = address, "relocate");
        self.cursor = Some(address);
    }

    pub fn is_issued(&self, address: u64) -> bool {
        self.issued.contains(&address)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    /// Lowest and highest issued addresses, if any.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        let lo = self.issued.iter().min()?;
        let hi = self.issued.iter().max()?;
        Some((*lo, *hi))
    }
}
