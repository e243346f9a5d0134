//! Wait-free snapshot publication to the mix thread
//!
//! The commit pipeline runs on the API thread under the context mutex; the
//! mix thread must never take that mutex. Committed state crosses over
//! through a triple buffer: the writer fills the spare buffer and swaps it
//! in with one release CAS, the reader claims the freshest buffer with one
//! acquire CAS. Neither side ever waits on the other.

use std::cell::UnsafeCell;

use portable_atomic::{AtomicU8, Ordering};
use sf_core::{SLOT_COUNT, SlotIndex};
use sf_fx::{EffectParams, EffectType};

use crate::slot::PlaybackState;

/// Committed state of one slot, as the mixer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlotSnapshot {
    pub effect_type: EffectType,
    pub params: EffectParams,
    pub gain: f32,
    pub auto_send: bool,
    pub target: Option<SlotIndex>,
    pub playback: PlaybackState,
}

/// Committed state of the whole registry plus the context-level properties
/// the mixer consumes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextSnapshot {
    /// Monotonic commit counter; lets the mixer detect change cheaply.
    pub generation: u64,
    pub slots: [SlotSnapshot; SLOT_COUNT],
    pub primary: Option<SlotIndex>,
    pub distance_factor: f32,
    pub air_absorption_hf: f32,
    pub hf_reference: f32,
}

/// Single-writer single-reader triple buffer.
///
/// Index state packs three 2-bit buffer indices into one atomic byte:
/// bits 0-1 the write buffer, bits 2-3 the ready buffer, bits 4-5 the read
/// buffer; bit 6 marks the ready buffer as unread. Publish swaps write/ready
/// and raises the fresh bit; read swaps ready/read only while the bit is up,
/// so re-reads return the last published value instead of an older buffer.
pub struct TripleBuffer<T> {
    buffers: [UnsafeCell<T>; 3],
    state: AtomicU8,
}

const FRESH: u8 = 0b100_0000;

// Access is serialized through the packed index state: the writer only
// touches the write buffer, the reader only the read buffer, and the CAS
// swaps transfer ownership with AcqRel ordering.
unsafe impl<T: Send> Send for TripleBuffer<T> {}
unsafe impl<T: Send> Sync for TripleBuffer<T> {}

impl<T: Clone> TripleBuffer<T> {
    pub fn new(initial: T) -> Self {
        Self {
            buffers: [
                UnsafeCell::new(initial.clone()),
                UnsafeCell::new(initial.clone()),
                UnsafeCell::new(initial),
            ],
            // write=0, ready=1, read=2
            state: AtomicU8::new(0b10_01_00),
        }
    }

    /// Store a value and make it visible to the reader.
    pub fn publish(&self, value: T) {
        let state = self.state.load(Ordering::Acquire);
        let write_idx = (state & 0b11) as usize;
        // The write buffer is exclusively ours until the swap below.
        unsafe {
            *self.buffers[write_idx].get() = value;
        }
        loop {
            let state = self.state.load(Ordering::Acquire);
            let write_idx = state & 0b11;
            let ready_idx = (state >> 2) & 0b11;
            let read_idx = (state >> 4) & 0b11;
            let swapped = ready_idx | (write_idx << 2) | (read_idx << 4) | FRESH;
            if self
                .state
                .compare_exchange_weak(state, swapped, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                break;
            }
        }
    }

    /// Claim the freshest published value. Wait-free; returns the previous
    /// value again when nothing new was published.
    pub fn read(&self) -> &T {
        let mut state = self.state.load(Ordering::Acquire);
        while state & FRESH != 0 {
            let write_idx = state & 0b11;
            let ready_idx = (state >> 2) & 0b11;
            let read_idx = (state >> 4) & 0b11;
            let swapped = write_idx | (read_idx << 2) | (ready_idx << 4);
            match self.state.compare_exchange_weak(
                state,
                swapped,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    state = swapped;
                    break;
                }
                Err(observed) => state = observed,
            }
        }
        let read_idx = ((state >> 4) & 0b11) as usize;
        unsafe { &*self.buffers[read_idx].get() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_then_read() {
        let buffer = TripleBuffer::new(0_i32);
        buffer.publish(42);
        assert_eq!(*buffer.read(), 42);
        buffer.publish(7);
        buffer.publish(8);
        assert_eq!(*buffer.read(), 8);
    }

    #[test]
    fn read_without_publish_keeps_last() {
        let buffer = TripleBuffer::new(1_i32);
        assert_eq!(*buffer.read(), 1);
        buffer.publish(2);
        assert_eq!(*buffer.read(), 2);
        assert_eq!(*buffer.read(), 2);
    }

    #[test]
    fn repeated_reads_return_the_newest_publish() {
        let buffer = TripleBuffer::new(0_i32);
        buffer.publish(42);
        assert_eq!(*buffer.read(), 42);
        assert_eq!(*buffer.read(), 42);
        assert_eq!(*buffer.read(), 42);
        buffer.publish(5);
        buffer.publish(6);
        assert_eq!(*buffer.read(), 6);
        assert_eq!(*buffer.read(), 6);
    }

    #[test]
    fn snapshot_defaults() {
        let snapshot = ContextSnapshot::default();
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.slots.len(), SLOT_COUNT);
        assert!(snapshot.primary.is_none());
    }
}
