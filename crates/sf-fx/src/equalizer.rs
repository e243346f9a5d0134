//! Four-band equalizer parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, clamp_f32, clamp_i32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const LOWGAIN: u32 = 2;
    pub const LOWCUTOFF: u32 = 3;
    pub const MID1GAIN: u32 = 4;
    pub const MID1CENTER: u32 = 5;
    pub const MID1WIDTH: u32 = 6;
    pub const MID2GAIN: u32 = 7;
    pub const MID2CENTER: u32 = 8;
    pub const MID2WIDTH: u32 = 9;
    pub const HIGHGAIN: u32 = 10;
    pub const HIGHCUTOFF: u32 = 11;
}

pub const MIN_BAND_GAIN: i32 = -1_800;
pub const MAX_BAND_GAIN: i32 = 1_800;
pub const MIN_LOW_CUTOFF: f32 = 50.0;
pub const MAX_LOW_CUTOFF: f32 = 800.0;
pub const MIN_MID1_CENTER: f32 = 200.0;
pub const MAX_MID1_CENTER: f32 = 3_000.0;
pub const MIN_MID2_CENTER: f32 = 1_000.0;
pub const MAX_MID2_CENTER: f32 = 8_000.0;
pub const MIN_MID_WIDTH: f32 = 0.01;
pub const MAX_MID_WIDTH: f32 = 1.0;
pub const MIN_HIGH_CUTOFF: f32 = 4_000.0;
pub const MAX_HIGH_CUTOFF: f32 = 16_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqualizerParams {
    pub low_gain: i32,
    pub low_cutoff: f32,
    pub mid1_gain: i32,
    pub mid1_center: f32,
    pub mid1_width: f32,
    pub mid2_gain: i32,
    pub mid2_center: f32,
    pub mid2_width: f32,
    pub high_gain: i32,
    pub high_cutoff: f32,
}

impl Default for EqualizerParams {
    fn default() -> Self {
        Self {
            low_gain: 0,
            low_cutoff: 200.0,
            mid1_gain: 0,
            mid1_center: 500.0,
            mid1_width: 1.0,
            mid2_gain: 0,
            mid2_center: 3_000.0,
            mid2_width: 1.0,
            high_gain: 0,
            high_cutoff: 6_000.0,
        }
    }
}

impl EqualizerParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::LOWGAIN | prop::MID1GAIN | prop::MID2GAIN | prop::HIGHGAIN => ValueKind::I32,
            prop::LOWCUTOFF
            | prop::MID1CENTER
            | prop::MID1WIDTH
            | prop::MID2CENTER
            | prop::MID2WIDTH
            | prop::HIGHCUTOFF => ValueKind::F32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::LOWGAIN => Value::I32(self.low_gain),
            prop::LOWCUTOFF => Value::F32(self.low_cutoff),
            prop::MID1GAIN => Value::I32(self.mid1_gain),
            prop::MID1CENTER => Value::F32(self.mid1_center),
            prop::MID1WIDTH => Value::F32(self.mid1_width),
            prop::MID2GAIN => Value::I32(self.mid2_gain),
            prop::MID2CENTER => Value::F32(self.mid2_center),
            prop::MID2WIDTH => Value::F32(self.mid2_width),
            prop::HIGHGAIN => Value::I32(self.high_gain),
            prop::HIGHCUTOFF => Value::F32(self.high_cutoff),
            other => return Err(bad_prop("equalizer", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::LOWGAIN => {
                self.low_gain = clamp_i32(value.as_i32()?, MIN_BAND_GAIN, MAX_BAND_GAIN);
            }
            prop::LOWCUTOFF => {
                self.low_cutoff = clamp_f32(value.as_f32()?, MIN_LOW_CUTOFF, MAX_LOW_CUTOFF);
            }
            prop::MID1GAIN => {
                self.mid1_gain = clamp_i32(value.as_i32()?, MIN_BAND_GAIN, MAX_BAND_GAIN);
            }
            prop::MID1CENTER => {
                self.mid1_center = clamp_f32(value.as_f32()?, MIN_MID1_CENTER, MAX_MID1_CENTER);
            }
            prop::MID1WIDTH => {
                self.mid1_width = clamp_f32(value.as_f32()?, MIN_MID_WIDTH, MAX_MID_WIDTH);
            }
            prop::MID2GAIN => {
                self.mid2_gain = clamp_i32(value.as_i32()?, MIN_BAND_GAIN, MAX_BAND_GAIN);
            }
            prop::MID2CENTER => {
                self.mid2_center = clamp_f32(value.as_f32()?, MIN_MID2_CENTER, MAX_MID2_CENTER);
            }
            prop::MID2WIDTH => {
                self.mid2_width = clamp_f32(value.as_f32()?, MIN_MID_WIDTH, MAX_MID_WIDTH);
            }
            prop::HIGHGAIN => {
                self.high_gain = clamp_i32(value.as_i32()?, MIN_BAND_GAIN, MAX_BAND_GAIN);
            }
            prop::HIGHCUTOFF => {
                self.high_cutoff = clamp_f32(value.as_f32()?, MIN_HIGH_CUTOFF, MAX_HIGH_CUTOFF);
            }
            other => return Err(bad_prop("equalizer", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            low_gain: clamp_i32(self.low_gain, MIN_BAND_GAIN, MAX_BAND_GAIN),
            low_cutoff: clamp_f32(self.low_cutoff, MIN_LOW_CUTOFF, MAX_LOW_CUTOFF),
            mid1_gain: clamp_i32(self.mid1_gain, MIN_BAND_GAIN, MAX_BAND_GAIN),
            mid1_center: clamp_f32(self.mid1_center, MIN_MID1_CENTER, MAX_MID1_CENTER),
            mid1_width: clamp_f32(self.mid1_width, MIN_MID_WIDTH, MAX_MID_WIDTH),
            mid2_gain: clamp_i32(self.mid2_gain, MIN_BAND_GAIN, MAX_BAND_GAIN),
            mid2_center: clamp_f32(self.mid2_center, MIN_MID2_CENTER, MAX_MID2_CENTER),
            mid2_width: clamp_f32(self.mid2_width, MIN_MID_WIDTH, MAX_MID_WIDTH),
            high_gain: clamp_i32(self.high_gain, MIN_BAND_GAIN, MAX_BAND_GAIN),
            high_cutoff: clamp_f32(self.high_cutoff, MIN_HIGH_CUTOFF, MAX_HIGH_CUTOFF),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_gains_clamp() {
        let mut params = EqualizerParams::default();
        params.set(prop::MID1GAIN, Value::I32(5_000)).unwrap();
        assert_eq!(params.mid1_gain, MAX_BAND_GAIN);
    }
}
