//! sf-slot: effect slots, registry and commit pipeline for SlotForge
//!
//! ## Modules
//! - `slot` - one auxiliary effect slot (routing, playback, refcount, legacy
//!   bookkeeping)
//! - `registry` - the fixed four-slot array, primary index, cycle rejection
//! - `context` - context properties, deferral and the commit pipeline
//! - `publish` - wait-free snapshot handoff to the mix thread

pub mod context;
pub mod publish;
pub mod registry;
pub mod slot;

pub use context::{Context, ContextProps, MixerView, Session};
pub use publish::{ContextSnapshot, SlotSnapshot, TripleBuffer};
pub use registry::SlotRegistry;
pub use slot::{EffectSlot, PlaybackState, SlotLock};
