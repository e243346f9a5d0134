//! sf-core: shared primitives for SlotForge
//!
//! ## Modules
//! - `error` - Error taxonomy shared by every surface
//! - `gain` - Millibel (mB) level math
//! - `guid` - 128-bit property-set and effect identifiers
//! - `slot_index` - Validated index into the four-slot registry

pub mod error;
pub mod gain;
pub mod guid;
pub mod slot_index;

pub use error::{SfError, SfResult};
pub use gain::{SILENCE_MB, gain_to_mb, mb_to_gain};
pub use guid::Guid;
pub use slot_index::{SLOT_COUNT, SlotIndex};
