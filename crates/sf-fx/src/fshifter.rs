//! Frequency shifter parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, check_enum, clamp_f32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const FREQUENCY: u32 = 2;
    pub const LEFTDIRECTION: u32 = 3;
    pub const RIGHTDIRECTION: u32 = 4;
}

pub const DIRECTION_DOWN: u32 = 0;
pub const DIRECTION_UP: u32 = 1;
pub const DIRECTION_OFF: u32 = 2;
pub const MAX_DIRECTION: u32 = 2;

pub const MIN_FREQUENCY: f32 = 0.0;
pub const MAX_FREQUENCY: f32 = 24_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyShifterParams {
    pub frequency: f32,
    pub left_direction: u32,
    pub right_direction: u32,
}

impl Default for FrequencyShifterParams {
    fn default() -> Self {
        Self { frequency: 0.0, left_direction: DIRECTION_DOWN, right_direction: DIRECTION_DOWN }
    }
}

impl FrequencyShifterParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::FREQUENCY => ValueKind::F32,
            prop::LEFTDIRECTION | prop::RIGHTDIRECTION => ValueKind::U32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::FREQUENCY => Value::F32(self.frequency),
            prop::LEFTDIRECTION => Value::U32(self.left_direction),
            prop::RIGHTDIRECTION => Value::U32(self.right_direction),
            other => return Err(bad_prop("frequency shifter", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::FREQUENCY => {
                self.frequency = clamp_f32(value.as_f32()?, MIN_FREQUENCY, MAX_FREQUENCY);
            }
            prop::LEFTDIRECTION => {
                self.left_direction = check_enum("left direction", value.as_u32()?, MAX_DIRECTION)?;
            }
            prop::RIGHTDIRECTION => {
                self.right_direction =
                    check_enum("right direction", value.as_u32()?, MAX_DIRECTION)?;
            }
            other => return Err(bad_prop("frequency shifter", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            frequency: clamp_f32(self.frequency, MIN_FREQUENCY, MAX_FREQUENCY),
            left_direction: check_enum("left direction", self.left_direction, MAX_DIRECTION)?,
            right_direction: check_enum("right direction", self.right_direction, MAX_DIRECTION)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_enum_rejected() {
        let mut params = FrequencyShifterParams::default();
        assert!(params.set(prop::LEFTDIRECTION, Value::U32(3)).is_err());
        params.set(prop::LEFTDIRECTION, Value::U32(DIRECTION_OFF)).unwrap();
        assert_eq!(params.left_direction, DIRECTION_OFF);
    }
}
