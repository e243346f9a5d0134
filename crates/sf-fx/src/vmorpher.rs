//! Vocal morpher parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, check_enum, clamp_f32, clamp_i32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const PHONEMEA: u32 = 2;
    pub const PHONEMEACOARSETUNING: u32 = 3;
    pub const PHONEMEB: u32 = 4;
    pub const PHONEMEBCOARSETUNING: u32 = 5;
    pub const WAVEFORM: u32 = 6;
    pub const RATE: u32 = 7;
}

pub const MAX_PHONEME: u32 = 29;
pub const MIN_COARSE_TUNING: i32 = -24;
pub const MAX_COARSE_TUNING: i32 = 24;
pub const MAX_WAVEFORM: u32 = 2;
pub const MIN_RATE: f32 = 0.0;
pub const MAX_RATE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VocalMorpherParams {
    pub phoneme_a: u32,
    pub phoneme_a_coarse_tuning: i32,
    pub phoneme_b: u32,
    pub phoneme_b_coarse_tuning: i32,
    pub waveform: u32,
    pub rate: f32,
}

impl Default for VocalMorpherParams {
    fn default() -> Self {
        Self {
            phoneme_a: 0,
            phoneme_a_coarse_tuning: 0,
            phoneme_b: 10,
            phoneme_b_coarse_tuning: 0,
            waveform: 0,
            rate: 1.41,
        }
    }
}

impl VocalMorpherParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::PHONEMEA | prop::PHONEMEB | prop::WAVEFORM => ValueKind::U32,
            prop::PHONEMEACOARSETUNING | prop::PHONEMEBCOARSETUNING => ValueKind::I32,
            prop::RATE => ValueKind::F32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::PHONEMEA => Value::U32(self.phoneme_a),
            prop::PHONEMEACOARSETUNING => Value::I32(self.phoneme_a_coarse_tuning),
            prop::PHONEMEB => Value::U32(self.phoneme_b),
            prop::PHONEMEBCOARSETUNING => Value::I32(self.phoneme_b_coarse_tuning),
            prop::WAVEFORM => Value::U32(self.waveform),
            prop::RATE => Value::F32(self.rate),
            other => return Err(bad_prop("vocal morpher", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::PHONEMEA => {
                self.phoneme_a = check_enum("phoneme A", value.as_u32()?, MAX_PHONEME)?;
            }
            prop::PHONEMEACOARSETUNING => {
                self.phoneme_a_coarse_tuning =
                    clamp_i32(value.as_i32()?, MIN_COARSE_TUNING, MAX_COARSE_TUNING);
            }
            prop::PHONEMEB => {
                self.phoneme_b = check_enum("phoneme B", value.as_u32()?, MAX_PHONEME)?;
            }
            prop::PHONEMEBCOARSETUNING => {
                self.phoneme_b_coarse_tuning =
                    clamp_i32(value.as_i32()?, MIN_COARSE_TUNING, MAX_COARSE_TUNING);
            }
            prop::WAVEFORM => {
                self.waveform = check_enum("morpher waveform", value.as_u32()?, MAX_WAVEFORM)?;
            }
            prop::RATE => self.rate = clamp_f32(value.as_f32()?, MIN_RATE, MAX_RATE),
            other => return Err(bad_prop("vocal morpher", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            phoneme_a: check_enum("phoneme A", self.phoneme_a, MAX_PHONEME)?,
            phoneme_a_coarse_tuning: clamp_i32(
                self.phoneme_a_coarse_tuning,
                MIN_COARSE_TUNING,
                MAX_COARSE_TUNING,
            ),
            phoneme_b: check_enum("phoneme B", self.phoneme_b, MAX_PHONEME)?,
            phoneme_b_coarse_tuning: clamp_i32(
                self.phoneme_b_coarse_tuning,
                MIN_COARSE_TUNING,
                MAX_COARSE_TUNING,
            ),
            waveform: check_enum("morpher waveform", self.waveform, MAX_WAVEFORM)?,
            rate: clamp_f32(self.rate, MIN_RATE, MAX_RATE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phoneme_rejected_out_of_range() {
        let mut params = VocalMorpherParams::default();
        assert!(params.set(prop::PHONEMEA, Value::U32(30)).is_err());
    }

    #[test]
    fn tuning_clamps() {
        let mut params = VocalMorpherParams::default();
        params.set(prop::PHONEMEACOARSETUNING, Value::I32(-100)).unwrap();
        assert_eq!(params.phoneme_a_coarse_tuning, MIN_COARSE_TUNING);
    }
}
