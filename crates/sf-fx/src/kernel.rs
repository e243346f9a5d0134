//! DSP kernel seam
//!
//! The commit pipeline hands committed parameter records to a kernel; the
//! mixer owns the kernels' processing state. Kernels here hold the committed
//! snapshot and their reset behavior; rendering lives behind the trait so
//! the slot machinery never depends on a concrete DSP implementation.

use crate::{EffectParams, EffectType};

/// One loaded effect realization.
pub trait Kernel: Send {
    /// The effect type this kernel realizes.
    fn effect_type(&self) -> EffectType;

    /// Feed a committed parameter record. Called on the API thread at
    /// commit; must not block.
    fn update(&mut self, params: &EffectParams);

    /// Drop accumulated processing state (delay lines, envelopes).
    fn reset(&mut self);
}

/// Kernel for an empty slot; processes nothing.
#[derive(Debug, Default)]
pub struct NullKernel;

impl Kernel for NullKernel {
    fn effect_type(&self) -> EffectType {
        EffectType::None
    }

    fn update(&mut self, _params: &EffectParams) {}

    fn reset(&mut self) {}
}

/// Kernel holding the committed snapshot for a loaded effect type.
#[derive(Debug)]
pub struct EffectKernel {
    effect_type: EffectType,
    params: EffectParams,
}

impl EffectKernel {
    pub fn new(effect_type: EffectType) -> Self {
        Self { effect_type, params: EffectParams::default_for(effect_type) }
    }

    /// The last committed record.
    pub fn params(&self) -> &EffectParams {
        &self.params
    }
}

impl Kernel for EffectKernel {
    fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    fn update(&mut self, params: &EffectParams) {
        debug_assert_eq!(params.effect_type(), self.effect_type);
        self.params = *params;
    }

    fn reset(&mut self) {}
}

/// Construct the kernel realizing an effect type.
pub fn create_kernel(effect_type: EffectType) -> Box<dyn Kernel> {
    match effect_type {
        EffectType::None => Box::new(NullKernel),
        other => Box::new(EffectKernel::new(other)),
    }
}
