//! The four-slot registry
//!
//! Owns the fixed array of effect slots, the primary-slot index, and the
//! routing rules that need a whole-registry view: target cycle rejection and
//! the legacy startup locks.

use log::debug;
use sf_core::{SLOT_COUNT, SfError, SfResult, SlotIndex};

use crate::slot::{EffectSlot, SlotLock};

pub struct SlotRegistry {
    slots: [Option<EffectSlot>; SLOT_COUNT],
    primary: Option<SlotIndex>,
    legacy_locks_released: bool,
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotRegistry {
    /// An empty registry; slots are allocated on demand.
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
            primary: None,
            legacy_locks_released: false,
        }
    }

    /// Bring up all four slots with the legacy defaults and make slot 0
    /// primary. Idempotent; existing slots are left alone.
    pub fn ensure_legacy_defaults(&mut self) {
        for index in SlotIndex::all() {
            if self.slots[index.get()].is_none() {
                self.slots[index.get()] = Some(EffectSlot::with_legacy_defaults(index));
            }
        }
        if self.primary.is_none() {
            self.primary = Some(SlotIndex::SLOT_0);
        }
    }

    /// Allocate the lowest free slot.
    pub fn create_slot(&mut self) -> SfResult<SlotIndex> {
        for index in SlotIndex::all() {
            if self.slots[index.get()].is_none() {
                self.slots[index.get()] = Some(EffectSlot::new(index));
                debug!("created effect slot {index}");
                return Ok(index);
            }
        }
        Err(SfError::OutOfMemory("all effect slots are allocated".into()))
    }

    /// Free a slot. Fails while sources are still attached.
    pub fn delete_slot(&mut self, index: SlotIndex) -> SfResult<()> {
        let slot = self.slot(index)?;
        if slot.in_use() {
            return Err(SfError::invalid_operation(format!(
                "slot {index} still has {} attached sources",
                slot.ref_count()
            )));
        }
        // Drop dangling references to the deleted slot.
        for other in self.slots.iter_mut().flatten() {
            if other.target() == Some(index) {
                other.set_target_unchecked(None);
            }
        }
        if self.primary == Some(index) {
            self.primary = None;
        }
        self.slots[index.get()] = None;
        debug!("deleted effect slot {index}");
        Ok(())
    }

    pub fn slot(&self, index: SlotIndex) -> SfResult<&EffectSlot> {
        self.slots[index.get()]
            .as_ref()
            .ok_or_else(|| SfError::InvalidName(format!("slot {index} does not exist")))
    }

    pub fn slot_mut(&mut self, index: SlotIndex) -> SfResult<&mut EffectSlot> {
        self.slots[index.get()]
            .as_mut()
            .ok_or_else(|| SfError::InvalidName(format!("slot {index} does not exist")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectSlot> {
        self.slots.iter().flatten()
    }

    /// Retarget a slot's output. Rejects any chain that would lead back to
    /// the slot itself; with four slots the walk is bounded by four hops.
    pub fn set_target(&mut self, index: SlotIndex, target: Option<SlotIndex>) -> SfResult<()> {
        self.slot(index)?;
        if let Some(first) = target {
            self.slot(first)?;
            let mut current = first;
            for _ in 0..SLOT_COUNT {
                if current == index {
                    return Err(SfError::invalid_operation(format!(
                        "targeting slot {target} from slot {index} would form a cycle",
                        target = first
                    )));
                }
                match self.slot(current)?.target() {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        self.slot_mut(index)?.set_target_unchecked(target);
        Ok(())
    }

    pub fn primary(&self) -> Option<SlotIndex> {
        self.primary
    }

    /// Set the primary slot. `None` clears it.
    pub fn set_primary(&mut self, primary: Option<SlotIndex>) -> SfResult<()> {
        if let Some(index) = primary {
            self.slot(index)?;
        }
        self.primary = primary;
        Ok(())
    }

    /// Unlock slots 0 and 1. The oldest property sets hard-wired their
    /// effects; the first 5.0-versioned call lifts that restriction. Runs
    /// once.
    pub fn release_legacy_locks(&mut self) {
        if self.legacy_locks_released {
            return;
        }
        self.legacy_locks_released = true;
        for index in [SlotIndex::SLOT_0, SlotIndex::SLOT_1] {
            if let Some(slot) = self.slots[index.get()].as_mut() {
                slot.set_lock(SlotLock::Unlocked);
            }
        }
        debug!("legacy slot locks released");
    }

    /// Commit every slot; returns whether any of them changed.
    pub fn commit_all(&mut self) -> bool {
        let mut changed = false;
        for slot in self.slots.iter_mut().flatten() {
            changed |= slot.commit();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_fx::EffectType;

    #[test]
    fn create_until_full() {
        let mut registry = SlotRegistry::new();
        for expected in 0..SLOT_COUNT {
            let index = registry.create_slot().unwrap();
            assert_eq!(index.get(), expected);
        }
        assert!(matches!(registry.create_slot(), Err(SfError::OutOfMemory(_))));
    }

    #[test]
    fn delete_requires_no_sources() {
        let mut registry = SlotRegistry::new();
        let index = registry.create_slot().unwrap();
        registry.slot_mut(index).unwrap().acquire();
        assert!(registry.delete_slot(index).is_err());
        registry.slot_mut(index).unwrap().release().unwrap();
        registry.delete_slot(index).unwrap();
        assert!(registry.slot(index).is_err());
    }

    #[test]
    fn missing_slot_is_an_invalid_name() {
        let mut registry = SlotRegistry::new();
        assert!(matches!(registry.slot(SlotIndex::SLOT_3), Err(SfError::InvalidName(_))));

        let index = registry.create_slot().unwrap();
        registry.delete_slot(index).unwrap();
        assert!(matches!(registry.slot(index), Err(SfError::InvalidName(_))));
        assert!(matches!(registry.slot_mut(index), Err(SfError::InvalidName(_))));
    }

    #[test]
    fn delete_clears_references() {
        let mut registry = SlotRegistry::new();
        let a = registry.create_slot().unwrap();
        let b = registry.create_slot().unwrap();
        registry.set_target(a, Some(b)).unwrap();
        registry.set_primary(Some(b)).unwrap();
        registry.delete_slot(b).unwrap();
        assert_eq!(registry.slot(a).unwrap().target(), None);
        assert_eq!(registry.primary(), None);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut registry = SlotRegistry::new();
        let a = registry.create_slot().unwrap();
        let b = registry.create_slot().unwrap();
        let c = registry.create_slot().unwrap();

        assert!(registry.set_target(a, Some(a)).is_err());

        registry.set_target(a, Some(b)).unwrap();
        registry.set_target(b, Some(c)).unwrap();
        // c -> a would close the loop a -> b -> c -> a.
        assert!(registry.set_target(c, Some(a)).is_err());
        assert_eq!(registry.slot(c).unwrap().target(), None);

        // A diamond is fine; only cycles are rejected.
        registry.set_target(c, Some(b)).unwrap();
    }

    #[test]
    fn legacy_defaults_and_unlock() {
        let mut registry = SlotRegistry::new();
        registry.ensure_legacy_defaults();
        assert_eq!(registry.primary(), Some(SlotIndex::SLOT_0));
        assert_eq!(
            registry.slot(SlotIndex::SLOT_0).unwrap().effect().effect_type(),
            EffectType::Reverb
        );
        assert_eq!(registry.slot(SlotIndex::SLOT_1).unwrap().lock(), SlotLock::Locked);

        registry.release_legacy_locks();
        assert_eq!(registry.slot(SlotIndex::SLOT_0).unwrap().lock(), SlotLock::Unlocked);
        assert_eq!(registry.slot(SlotIndex::SLOT_1).unwrap().lock(), SlotLock::Unlocked);
    }
}
