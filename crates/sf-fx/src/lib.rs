//! sf-fx: effect taxonomy and effect state for SlotForge
//!
//! Static descriptions of every effect type and its parameters (ranges,
//! defaults, clamp vs. reject policy), the 26-entry reverb preset table, the
//! DSP kernel seam, and the dirty/clean effect state machine.
//!
//! ## Modules
//! - `reverb`, `chorus`, `distortion`, `echo`, `equalizer`, `flanger`,
//!   `fshifter`, `vmorpher`, `pshifter`, `modulator`, `autowah`,
//!   `compressor` - per-effect parameter records and range tables
//! - `presets` - the reverb environment tables (full and legacy forms)
//! - `kernel` - the seam to the DSP processors the mixer runs
//! - `state` - live/shadow parameter state with commit semantics

pub mod autowah;
pub mod chorus;
pub mod compressor;
pub mod distortion;
pub mod echo;
pub mod equalizer;
pub mod flanger;
pub mod fshifter;
pub mod kernel;
pub mod modulator;
pub mod presets;
pub mod pshifter;
pub mod reverb;
pub mod state;
pub mod vmorpher;

use serde::{Deserialize, Serialize};
use sf_core::{SfError, SfResult};

pub use kernel::{Kernel, create_kernel};
pub use state::EffectState;

/// The closed set of effect types a slot can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EffectType {
    #[default]
    None,
    Reverb,
    Chorus,
    Distortion,
    Echo,
    Equalizer,
    Flanger,
    FrequencyShifter,
    VocalMorpher,
    PitchShifter,
    RingModulator,
    AutoWah,
    Compressor,
}

/// The kind of value a property carries on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    I32,
    U32,
    F32,
    Vec3,
}

impl ValueKind {
    /// Wire size of one value of this kind, in bytes.
    pub const fn byte_size(self) -> usize {
        match self {
            ValueKind::I32 | ValueKind::U32 | ValueKind::F32 => 4,
            ValueKind::Vec3 => 12,
        }
    }
}

/// A single property value in transit between the dispatcher and a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    U32(u32),
    F32(f32),
    Vec3([f32; 3]),
}

impl Value {
    pub fn kind(self) -> ValueKind {
        match self {
            Value::I32(_) => ValueKind::I32,
            Value::U32(_) => ValueKind::U32,
            Value::F32(_) => ValueKind::F32,
            Value::Vec3(_) => ValueKind::Vec3,
        }
    }

    pub fn as_i32(self) -> SfResult<i32> {
        match self {
            Value::I32(v) => Ok(v),
            other => Err(SfError::invalid_value(format!("expected i32, got {other:?}"))),
        }
    }

    pub fn as_u32(self) -> SfResult<u32> {
        match self {
            Value::U32(v) => Ok(v),
            other => Err(SfError::invalid_value(format!("expected u32, got {other:?}"))),
        }
    }

    pub fn as_f32(self) -> SfResult<f32> {
        match self {
            Value::F32(v) => Ok(v),
            other => Err(SfError::invalid_value(format!("expected f32, got {other:?}"))),
        }
    }

    pub fn as_vec3(self) -> SfResult<[f32; 3]> {
        match self {
            Value::Vec3(v) => Ok(v),
            other => Err(SfError::invalid_value(format!("expected vec3, got {other:?}"))),
        }
    }
}

/// Parameter records for every effect type, as a tagged union.
///
/// The variant always satisfies the range table of its type; mutation goes
/// through [`EffectParams::set`] or [`EffectParams::sanitize`], never raw
/// field writes from outside the crate's taxonomy modules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum EffectParams {
    #[default]
    None,
    Reverb(reverb::ReverbParams),
    Chorus(chorus::ChorusParams),
    Distortion(distortion::DistortionParams),
    Echo(echo::EchoParams),
    Equalizer(equalizer::EqualizerParams),
    Flanger(flanger::FlangerParams),
    FrequencyShifter(fshifter::FrequencyShifterParams),
    VocalMorpher(vmorpher::VocalMorpherParams),
    PitchShifter(pshifter::PitchShifterParams),
    RingModulator(modulator::RingModulatorParams),
    AutoWah(autowah::AutoWahParams),
    Compressor(compressor::CompressorParams),
}

impl EffectParams {
    /// The taxonomy default record for an effect type.
    pub fn default_for(effect_type: EffectType) -> Self {
        match effect_type {
            EffectType::None => EffectParams::None,
            EffectType::Reverb => EffectParams::Reverb(Default::default()),
            EffectType::Chorus => EffectParams::Chorus(Default::default()),
            EffectType::Distortion => EffectParams::Distortion(Default::default()),
            EffectType::Echo => EffectParams::Echo(Default::default()),
            EffectType::Equalizer => EffectParams::Equalizer(Default::default()),
            EffectType::Flanger => EffectParams::Flanger(Default::default()),
            EffectType::FrequencyShifter => EffectParams::FrequencyShifter(Default::default()),
            EffectType::VocalMorpher => EffectParams::VocalMorpher(Default::default()),
            EffectType::PitchShifter => EffectParams::PitchShifter(Default::default()),
            EffectType::RingModulator => EffectParams::RingModulator(Default::default()),
            EffectType::AutoWah => EffectParams::AutoWah(Default::default()),
            EffectType::Compressor => EffectParams::Compressor(Default::default()),
        }
    }

    pub fn effect_type(&self) -> EffectType {
        match self {
            EffectParams::None => EffectType::None,
            EffectParams::Reverb(_) => EffectType::Reverb,
            EffectParams::Chorus(_) => EffectType::Chorus,
            EffectParams::Distortion(_) => EffectType::Distortion,
            EffectParams::Echo(_) => EffectType::Echo,
            EffectParams::Equalizer(_) => EffectType::Equalizer,
            EffectParams::Flanger(_) => EffectType::Flanger,
            EffectParams::FrequencyShifter(_) => EffectType::FrequencyShifter,
            EffectParams::VocalMorpher(_) => EffectType::VocalMorpher,
            EffectParams::PitchShifter(_) => EffectType::PitchShifter,
            EffectParams::RingModulator(_) => EffectType::RingModulator,
            EffectParams::AutoWah(_) => EffectType::AutoWah,
            EffectParams::Compressor(_) => EffectType::Compressor,
        }
    }

    /// The value kind a property id carries for this record's effect type,
    /// or `None` when the id does not apply.
    pub fn param_kind(effect_type: EffectType, prop: u32) -> Option<ValueKind> {
        match effect_type {
            EffectType::None => None,
            EffectType::Reverb => reverb::ReverbParams::param_kind(prop),
            EffectType::Chorus => chorus::ChorusParams::param_kind(prop),
            EffectType::Distortion => distortion::DistortionParams::param_kind(prop),
            EffectType::Echo => echo::EchoParams::param_kind(prop),
            EffectType::Equalizer => equalizer::EqualizerParams::param_kind(prop),
            EffectType::Flanger => flanger::FlangerParams::param_kind(prop),
            EffectType::FrequencyShifter => fshifter::FrequencyShifterParams::param_kind(prop),
            EffectType::VocalMorpher => vmorpher::VocalMorpherParams::param_kind(prop),
            EffectType::PitchShifter => pshifter::PitchShifterParams::param_kind(prop),
            EffectType::RingModulator => modulator::RingModulatorParams::param_kind(prop),
            EffectType::AutoWah => autowah::AutoWahParams::param_kind(prop),
            EffectType::Compressor => compressor::CompressorParams::param_kind(prop),
        }
    }

    /// Read one property.
    pub fn get(&self, prop: u32) -> SfResult<Value> {
        match self {
            EffectParams::None => Err(SfError::invalid_operation("no effect loaded")),
            EffectParams::Reverb(p) => p.get(prop),
            EffectParams::Chorus(p) => p.get(prop),
            EffectParams::Distortion(p) => p.get(prop),
            EffectParams::Echo(p) => p.get(prop),
            EffectParams::Equalizer(p) => p.get(prop),
            EffectParams::Flanger(p) => p.get(prop),
            EffectParams::FrequencyShifter(p) => p.get(prop),
            EffectParams::VocalMorpher(p) => p.get(prop),
            EffectParams::PitchShifter(p) => p.get(prop),
            EffectParams::RingModulator(p) => p.get(prop),
            EffectParams::AutoWah(p) => p.get(prop),
            EffectParams::Compressor(p) => p.get(prop),
        }
    }

    /// Validate and write one property. Scalar ranges clamp; enumerations
    /// and flag fields out of range are rejected.
    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match self {
            EffectParams::None => Err(SfError::invalid_operation("no effect loaded")),
            EffectParams::Reverb(p) => p.set(prop, value),
            EffectParams::Chorus(p) => p.set(prop, value),
            EffectParams::Distortion(p) => p.set(prop, value),
            EffectParams::Echo(p) => p.set(prop, value),
            EffectParams::Equalizer(p) => p.set(prop, value),
            EffectParams::Flanger(p) => p.set(prop, value),
            EffectParams::FrequencyShifter(p) => p.set(prop, value),
            EffectParams::VocalMorpher(p) => p.set(prop, value),
            EffectParams::PitchShifter(p) => p.set(prop, value),
            EffectParams::RingModulator(p) => p.set(prop, value),
            EffectParams::AutoWah(p) => p.set(prop, value),
            EffectParams::Compressor(p) => p.set(prop, value),
        }
    }

    /// Validate a whole record, returning the clamped copy that would be
    /// stored. Any rejected field rejects the record as a whole.
    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(match self {
            EffectParams::None => EffectParams::None,
            EffectParams::Reverb(p) => EffectParams::Reverb(p.sanitize()?),
            EffectParams::Chorus(p) => EffectParams::Chorus(p.sanitize()?),
            EffectParams::Distortion(p) => EffectParams::Distortion(p.sanitize()?),
            EffectParams::Echo(p) => EffectParams::Echo(p.sanitize()?),
            EffectParams::Equalizer(p) => EffectParams::Equalizer(p.sanitize()?),
            EffectParams::Flanger(p) => EffectParams::Flanger(p.sanitize()?),
            EffectParams::FrequencyShifter(p) => EffectParams::FrequencyShifter(p.sanitize()?),
            EffectParams::VocalMorpher(p) => EffectParams::VocalMorpher(p.sanitize()?),
            EffectParams::PitchShifter(p) => EffectParams::PitchShifter(p.sanitize()?),
            EffectParams::RingModulator(p) => EffectParams::RingModulator(p.sanitize()?),
            EffectParams::AutoWah(p) => EffectParams::AutoWah(p.sanitize()?),
            EffectParams::Compressor(p) => EffectParams::Compressor(p.sanitize()?),
        })
    }
}

// ============================================================================
// Range helpers shared by the taxonomy modules
// ============================================================================

/// Clamp a float scalar into its taxonomy range.
#[inline]
pub(crate) fn clamp_f32(v: f32, min: f32, max: f32) -> f32 {
    v.clamp(min, max)
}

/// Clamp an integer scalar (millibel gains, phases, tunings) into range.
/// The legacy API models these as soft limits.
#[inline]
pub(crate) fn clamp_i32(v: i32, min: i32, max: i32) -> i32 {
    v.clamp(min, max)
}

/// Reject an enumeration outside its range.
#[inline]
pub(crate) fn check_enum(name: &str, v: u32, max: u32) -> SfResult<u32> {
    if v > max {
        return Err(SfError::invalid_value(format!("{name} {v} out of range 0..={max}")));
    }
    Ok(v)
}

/// Reject a flags field carrying reserved bits.
#[inline]
pub(crate) fn check_flags(name: &str, v: u32, reserved_mask: u32) -> SfResult<u32> {
    if v & reserved_mask != 0 {
        return Err(SfError::invalid_value(format!("{name} {v:#x} sets reserved bits")));
    }
    Ok(v)
}

/// Error for a property id that does not apply to the effect type.
pub(crate) fn bad_prop(effect: &str, prop: u32) -> SfError {
    SfError::invalid_operation(format!("property {prop} does not apply to {effect}"))
}
