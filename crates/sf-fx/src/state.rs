//! Effect state with deferred-commit semantics
//!
//! An `EffectState` keeps two parameter records: the live record the mixer
//! last received, and the shadow record accumulating validated writes.
//! Reads always see the shadow, so a caller observes its own sets before
//! commit. `commit` publishes shadow to live and feeds the kernel.
//!
//! Changing the effect type constructs the replacement kernel immediately
//! (so failure leaves the previous state untouched) but swaps it in at
//! commit, keeping the live view consistent until then.

use sf_core::{SfError, SfResult};

use crate::kernel::{Kernel, create_kernel};
use crate::{EffectParams, EffectType, Value};

pub struct EffectState {
    live_type: EffectType,
    live: EffectParams,
    shadow_type: EffectType,
    shadow: EffectParams,
    kernel: Box<dyn Kernel>,
    pending_kernel: Option<Box<dyn Kernel>>,
    dirty: bool,
}

impl Default for EffectState {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectState {
    /// An empty state with no effect loaded and nothing to commit.
    pub fn new() -> Self {
        Self {
            live_type: EffectType::None,
            live: EffectParams::None,
            shadow_type: EffectType::None,
            shadow: EffectParams::None,
            kernel: create_kernel(EffectType::None),
            pending_kernel: None,
            dirty: false,
        }
    }

    /// A state with `effect_type` loaded at defaults, dirty so the first
    /// commit publishes it.
    pub fn with_type(effect_type: EffectType) -> Self {
        let mut state = Self::new();
        state.set_type(effect_type);
        state
    }

    /// The effect type as the API sees it (including an uncommitted change).
    pub fn effect_type(&self) -> EffectType {
        self.shadow_type
    }

    /// The committed effect type the mixer is running.
    pub fn live_type(&self) -> EffectType {
        self.live_type
    }

    /// Replace the loaded effect. Parameters reset to the new type's
    /// defaults; the swap reaches the mixer at the next commit.
    pub fn set_type(&mut self, effect_type: EffectType) {
        if effect_type == self.shadow_type {
            return;
        }
        self.pending_kernel = Some(create_kernel(effect_type));
        self.shadow_type = effect_type;
        self.shadow = EffectParams::default_for(effect_type);
        self.dirty = true;
    }

    /// Read one property from the shadow record.
    pub fn get_property(&self, prop: u32) -> SfResult<Value> {
        self.shadow.get(prop)
    }

    /// Validate and write one property into the shadow record.
    pub fn set_property(&mut self, prop: u32, value: Value) -> SfResult<()> {
        self.shadow.set(prop, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace the whole shadow record. All-or-nothing: a rejected field
    /// leaves the record untouched.
    pub fn set_all(&mut self, params: EffectParams) -> SfResult<()> {
        if params.effect_type() != self.shadow_type {
            return Err(SfError::invalid_operation(format!(
                "record for {:?} does not match loaded effect {:?}",
                params.effect_type(),
                self.shadow_type,
            )));
        }
        self.shadow = params.sanitize()?;
        self.dirty = true;
        Ok(())
    }

    /// The shadow record (what gets would serialize).
    pub fn params(&self) -> &EffectParams {
        &self.shadow
    }

    /// The committed record.
    pub fn live_params(&self) -> &EffectParams {
        &self.live
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Publish shadow to live and feed the kernel. Returns whether anything
    /// changed; a clean state is a no-op.
    pub fn commit(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(kernel) = self.pending_kernel.take() {
            self.kernel = kernel;
        }
        self.live_type = self.shadow_type;
        self.live = self.shadow;
        self.kernel.update(&self.live);
        self.dirty = false;
        true
    }
}

impl std::fmt::Debug for EffectState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectState")
            .field("live_type", &self.live_type)
            .field("shadow_type", &self.shadow_type)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
