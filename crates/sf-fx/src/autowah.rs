//! Auto-wah parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, clamp_f32, clamp_i32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const ATTACKTIME: u32 = 2;
    pub const RELEASETIME: u32 = 3;
    pub const RESONANCE: u32 = 4;
    pub const PEAKLEVEL: u32 = 5;
}

pub const MIN_ATTACK_TIME: f32 = 0.0001;
pub const MAX_ATTACK_TIME: f32 = 1.0;
pub const MIN_RELEASE_TIME: f32 = 0.0001;
pub const MAX_RELEASE_TIME: f32 = 1.0;
pub const MIN_RESONANCE: i32 = 600;
pub const MAX_RESONANCE: i32 = 6_000;
pub const MIN_PEAK_LEVEL: i32 = -9_000;
pub const MAX_PEAK_LEVEL: i32 = 9_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoWahParams {
    pub attack_time: f32,
    pub release_time: f32,
    pub resonance: i32,
    pub peak_level: i32,
}

impl Default for AutoWahParams {
    fn default() -> Self {
        Self { attack_time: 0.06, release_time: 0.06, resonance: 6_000, peak_level: 2_100 }
    }
}

impl AutoWahParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::ATTACKTIME | prop::RELEASETIME => ValueKind::F32,
            prop::RESONANCE | prop::PEAKLEVEL => ValueKind::I32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::ATTACKTIME => Value::F32(self.attack_time),
            prop::RELEASETIME => Value::F32(self.release_time),
            prop::RESONANCE => Value::I32(self.resonance),
            prop::PEAKLEVEL => Value::I32(self.peak_level),
            other => return Err(bad_prop("auto-wah", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::ATTACKTIME => {
                self.attack_time = clamp_f32(value.as_f32()?, MIN_ATTACK_TIME, MAX_ATTACK_TIME);
            }
            prop::RELEASETIME => {
                self.release_time = clamp_f32(value.as_f32()?, MIN_RELEASE_TIME, MAX_RELEASE_TIME);
            }
            prop::RESONANCE => {
                self.resonance = clamp_i32(value.as_i32()?, MIN_RESONANCE, MAX_RESONANCE);
            }
            prop::PEAKLEVEL => {
                self.peak_level = clamp_i32(value.as_i32()?, MIN_PEAK_LEVEL, MAX_PEAK_LEVEL);
            }
            other => return Err(bad_prop("auto-wah", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            attack_time: clamp_f32(self.attack_time, MIN_ATTACK_TIME, MAX_ATTACK_TIME),
            release_time: clamp_f32(self.release_time, MIN_RELEASE_TIME, MAX_RELEASE_TIME),
            resonance: clamp_i32(self.resonance, MIN_RESONANCE, MAX_RESONANCE),
            peak_level: clamp_i32(self.peak_level, MIN_PEAK_LEVEL, MAX_PEAK_LEVEL),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_level_clamps() {
        let mut params = AutoWahParams::default();
        params.set(prop::PEAKLEVEL, Value::I32(20_000)).unwrap();
        assert_eq!(params.peak_level, MAX_PEAK_LEVEL);
    }
}
