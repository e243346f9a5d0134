//! Pitch shifter parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, clamp_i32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const COARSETUNE: u32 = 2;
    pub const FINETUNE: u32 = 3;
}

pub const MIN_COARSE_TUNE: i32 = -12;
pub const MAX_COARSE_TUNE: i32 = 12;
pub const MIN_FINE_TUNE: i32 = -50;
pub const MAX_FINE_TUNE: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchShifterParams {
    pub coarse_tune: i32,
    pub fine_tune: i32,
}

impl Default for PitchShifterParams {
    fn default() -> Self {
        Self { coarse_tune: 12, fine_tune: 0 }
    }
}

impl PitchShifterParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        match prop {
            prop::COARSETUNE | prop::FINETUNE => Some(ValueKind::I32),
            _ => None,
        }
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::COARSETUNE => Value::I32(self.coarse_tune),
            prop::FINETUNE => Value::I32(self.fine_tune),
            other => return Err(bad_prop("pitch shifter", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::COARSETUNE => {
                self.coarse_tune = clamp_i32(value.as_i32()?, MIN_COARSE_TUNE, MAX_COARSE_TUNE);
            }
            prop::FINETUNE => {
                self.fine_tune = clamp_i32(value.as_i32()?, MIN_FINE_TUNE, MAX_FINE_TUNE);
            }
            other => return Err(bad_prop("pitch shifter", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            coarse_tune: clamp_i32(self.coarse_tune, MIN_COARSE_TUNE, MAX_COARSE_TUNE),
            fine_tune: clamp_i32(self.fine_tune, MIN_FINE_TUNE, MAX_FINE_TUNE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunes_clamp() {
        let mut params = PitchShifterParams::default();
        params.set(prop::COARSETUNE, Value::I32(24)).unwrap();
        assert_eq!(params.coarse_tune, MAX_COARSE_TUNE);
        params.set(prop::FINETUNE, Value::I32(-60)).unwrap();
        assert_eq!(params.fine_tune, MIN_FINE_TUNE);
    }
}
