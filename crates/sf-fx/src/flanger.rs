//! Flanger parameter record
//!
//! Same shape as chorus with a shorter delay range and its own defaults.

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, check_enum, clamp_f32, clamp_i32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const WAVEFORM: u32 = 2;
    pub const PHASE: u32 = 3;
    pub const RATE: u32 = 4;
    pub const DEPTH: u32 = 5;
    pub const FEEDBACK: u32 = 6;
    pub const DELAY: u32 = 7;
}

pub const MAX_WAVEFORM: u32 = 1;
pub const MIN_PHASE: i32 = -180;
pub const MAX_PHASE: i32 = 180;
pub const MIN_RATE: f32 = 0.0;
pub const MAX_RATE: f32 = 10.0;
pub const MIN_DEPTH: f32 = 0.0;
pub const MAX_DEPTH: f32 = 1.0;
pub const MIN_FEEDBACK: f32 = -1.0;
pub const MAX_FEEDBACK: f32 = 1.0;
pub const MIN_DELAY: f32 = 0.0002;
pub const MAX_DELAY: f32 = 0.004;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlangerParams {
    pub waveform: u32,
    pub phase: i32,
    pub rate: f32,
    pub depth: f32,
    pub feedback: f32,
    pub delay: f32,
}

impl Default for FlangerParams {
    fn default() -> Self {
        Self {
            waveform: 1,
            phase: 0,
            rate: 0.27,
            depth: 1.0,
            feedback: -0.5,
            delay: 0.002,
        }
    }
}

impl FlangerParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::WAVEFORM => ValueKind::U32,
            prop::PHASE => ValueKind::I32,
            prop::RATE | prop::DEPTH | prop::FEEDBACK | prop::DELAY => ValueKind::F32,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::WAVEFORM => Value::U32(self.waveform),
            prop::PHASE => Value::I32(self.phase),
            prop::RATE => Value::F32(self.rate),
            prop::DEPTH => Value::F32(self.depth),
            prop::FEEDBACK => Value::F32(self.feedback),
            prop::DELAY => Value::F32(self.delay),
            other => return Err(bad_prop("flanger", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::WAVEFORM => {
                self.waveform = check_enum("flanger waveform", value.as_u32()?, MAX_WAVEFORM)?;
            }
            prop::PHASE => self.phase = clamp_i32(value.as_i32()?, MIN_PHASE, MAX_PHASE),
            prop::RATE => self.rate = clamp_f32(value.as_f32()?, MIN_RATE, MAX_RATE),
            prop::DEPTH => self.depth = clamp_f32(value.as_f32()?, MIN_DEPTH, MAX_DEPTH),
            prop::FEEDBACK => self.feedback = clamp_f32(value.as_f32()?, MIN_FEEDBACK, MAX_FEEDBACK),
            prop::DELAY => self.delay = clamp_f32(value.as_f32()?, MIN_DELAY, MAX_DELAY),
            other => return Err(bad_prop("flanger", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            waveform: check_enum("flanger waveform", self.waveform, MAX_WAVEFORM)?,
            phase: clamp_i32(self.phase, MIN_PHASE, MAX_PHASE),
            rate: clamp_f32(self.rate, MIN_RATE, MAX_RATE),
            depth: clamp_f32(self.depth, MIN_DEPTH, MAX_DEPTH),
            feedback: clamp_f32(self.feedback, MIN_FEEDBACK, MAX_FEEDBACK),
            delay: clamp_f32(self.delay, MIN_DELAY, MAX_DELAY),
        })
    }
}
