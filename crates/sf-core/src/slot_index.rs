//! Validated index into the four-slot registry

use serde::{Deserialize, Serialize};

use crate::error::{SfError, SfResult};

/// Number of effect slots in a context's registry.
pub const SLOT_COUNT: usize = 4;

/// Index of one effect slot within a context, guaranteed in `0..4`.
///
/// Absence (no target, no primary slot) is `Option<SlotIndex>`; there is no
/// sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const SLOT_0: SlotIndex = SlotIndex(0);
    pub const SLOT_1: SlotIndex = SlotIndex(1);
    pub const SLOT_2: SlotIndex = SlotIndex(2);
    pub const SLOT_3: SlotIndex = SlotIndex(3);

    pub fn new(index: usize) -> SfResult<Self> {
        if index >= SLOT_COUNT {
            return Err(SfError::invalid_value(format!("slot index {index} out of range")));
        }
        Ok(Self(index as u8))
    }

    #[inline]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Iterate all four indices in order.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..SLOT_COUNT as u8).map(SlotIndex)
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_enforced() {
        assert!(SlotIndex::new(0).is_ok());
        assert!(SlotIndex::new(3).is_ok());
        assert!(SlotIndex::new(4).is_err());
    }

    #[test]
    fn all_yields_four() {
        let indices: Vec<_> = SlotIndex::all().map(SlotIndex::get).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
