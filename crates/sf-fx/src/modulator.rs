//! Ring modulator parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, check_enum, clamp_f32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const FREQUENCY: u32 = 2;
    pub const HIGHPASSCUTOFF: u32 = 3;
    pub const WAVEFORM: u32 = 4;
}

pub const WAVEFORM_SINUSOID: u32 = 0;
pub const WAVEFORM_SAWTOOTH: u32 = 1;
pub const WAVEFORM_SQUARE: u32 = 2;
pub const MAX_WAVEFORM: u32 = 2;

pub const MIN_FREQUENCY: f32 = 0.0;
pub const MAX_FREQUENCY: f32 = 8_000.0;
pub const MIN_HIGHPASS_CUTOFF: f32 = 0.0;
pub const MAX_HIGHPASS_CUTOFF: f32 = 24_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingModulatorParams {
    pub frequency: f32,
    pub highpass_cutoff: f32,
    pub waveform: u32,
}

impl Default for RingModulatorParams {
    fn default() -> Self {
        Self { frequency: 440.0, highpass_cutoff: 800.0, waveform: WAVEFORM_SINUSOID }
    }
}

impl RingModulatorParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::FREQUENCY | prop::HIGHPASSCUTOFF => ValueKind::F32,
            prop::WAVEFORM => ValueKind::U32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::FREQUENCY => Value::F32(self.frequency),
            prop::HIGHPASSCUTOFF => Value::F32(self.highpass_cutoff),
            prop::WAVEFORM => Value::U32(self.waveform),
            other => return Err(bad_prop("ring modulator", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::FREQUENCY => {
                self.frequency = clamp_f32(value.as_f32()?, MIN_FREQUENCY, MAX_FREQUENCY);
            }
            prop::HIGHPASSCUTOFF => {
                self.highpass_cutoff =
                    clamp_f32(value.as_f32()?, MIN_HIGHPASS_CUTOFF, MAX_HIGHPASS_CUTOFF);
            }
            prop::WAVEFORM => {
                self.waveform = check_enum("modulator waveform", value.as_u32()?, MAX_WAVEFORM)?;
            }
            other => return Err(bad_prop("ring modulator", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            frequency: clamp_f32(self.frequency, MIN_FREQUENCY, MAX_FREQUENCY),
            highpass_cutoff: clamp_f32(
                self.highpass_cutoff,
                MIN_HIGHPASS_CUTOFF,
                MAX_HIGHPASS_CUTOFF,
            ),
            waveform: check_enum("modulator waveform", self.waveform, MAX_WAVEFORM)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_enum_policy() {
        let mut params = RingModulatorParams::default();
        assert!(params.set(prop::WAVEFORM, Value::U32(3)).is_err());
        params.set(prop::WAVEFORM, Value::U32(WAVEFORM_SQUARE)).unwrap();
        assert_eq!(params.waveform, WAVEFORM_SQUARE);
    }
}
