//! Distortion parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, clamp_f32, clamp_i32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const EDGE: u32 = 2;
    pub const GAIN: u32 = 3;
    pub const LOWPASSCUTOFF: u32 = 4;
    pub const EQCENTER: u32 = 5;
    pub const EQBANDWIDTH: u32 = 6;
}

pub const MIN_EDGE: f32 = 0.0;
pub const MAX_EDGE: f32 = 1.0;
pub const MIN_GAIN: i32 = -6_000;
pub const MAX_GAIN: i32 = 0;
pub const MIN_LOWPASS_CUTOFF: f32 = 80.0;
pub const MAX_LOWPASS_CUTOFF: f32 = 24_000.0;
pub const MIN_EQ_CENTER: f32 = 80.0;
pub const MAX_EQ_CENTER: f32 = 24_000.0;
pub const MIN_EQ_BANDWIDTH: f32 = 80.0;
pub const MAX_EQ_BANDWIDTH: f32 = 24_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistortionParams {
    pub edge: f32,
    pub gain: i32,
    pub lowpass_cutoff: f32,
    pub eq_center: f32,
    pub eq_bandwidth: f32,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            edge: 0.2,
            gain: -2_600,
            lowpass_cutoff: 8_000.0,
            eq_center: 3_600.0,
            eq_bandwidth: 3_600.0,
        }
    }
}

impl DistortionParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::GAIN => ValueKind::I32,
            prop::EDGE | prop::LOWPASSCUTOFF | prop::EQCENTER | prop::EQBANDWIDTH => ValueKind::F32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::EDGE => Value::F32(self.edge),
            prop::GAIN => Value::I32(self.gain),
            prop::LOWPASSCUTOFF => Value::F32(self.lowpass_cutoff),
            prop::EQCENTER => Value::F32(self.eq_center),
            prop::EQBANDWIDTH => Value::F32(self.eq_bandwidth),
            other => return Err(bad_prop("distortion", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::EDGE => self.edge = clamp_f32(value.as_f32()?, MIN_EDGE, MAX_EDGE),
            prop::GAIN => self.gain = clamp_i32(value.as_i32()?, MIN_GAIN, MAX_GAIN),
            prop::LOWPASSCUTOFF => {
                self.lowpass_cutoff =
                    clamp_f32(value.as_f32()?, MIN_LOWPASS_CUTOFF, MAX_LOWPASS_CUTOFF);
            }
            prop::EQCENTER => {
                self.eq_center = clamp_f32(value.as_f32()?, MIN_EQ_CENTER, MAX_EQ_CENTER);
            }
            prop::EQBANDWIDTH => {
                self.eq_bandwidth = clamp_f32(value.as_f32()?, MIN_EQ_BANDWIDTH, MAX_EQ_BANDWIDTH);
            }
            other => return Err(bad_prop("distortion", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            edge: clamp_f32(self.edge, MIN_EDGE, MAX_EDGE),
            gain: clamp_i32(self.gain, MIN_GAIN, MAX_GAIN),
            lowpass_cutoff: clamp_f32(self.lowpass_cutoff, MIN_LOWPASS_CUTOFF, MAX_LOWPASS_CUTOFF),
            eq_center: clamp_f32(self.eq_center, MIN_EQ_CENTER, MAX_EQ_CENTER),
            eq_bandwidth: clamp_f32(self.eq_bandwidth, MIN_EQ_BANDWIDTH, MAX_EQ_BANDWIDTH),
        })
    }
}
