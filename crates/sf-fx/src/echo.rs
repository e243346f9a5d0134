//! Echo parameter record

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, clamp_f32};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const DELAY: u32 = 2;
    pub const LRDELAY: u32 = 3;
    pub const DAMPING: u32 = 4;
    pub const FEEDBACK: u32 = 5;
    pub const SPREAD: u32 = 6;
}

pub const MIN_DELAY: f32 = 0.002;
pub const MAX_DELAY: f32 = 0.207;
pub const MIN_LR_DELAY: f32 = 0.0;
pub const MAX_LR_DELAY: f32 = 0.404;
pub const MIN_DAMPING: f32 = 0.0;
pub const MAX_DAMPING: f32 = 0.99;
pub const MIN_FEEDBACK: f32 = 0.0;
pub const MAX_FEEDBACK: f32 = 1.0;
pub const MIN_SPREAD: f32 = -1.0;
pub const MAX_SPREAD: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EchoParams {
    pub delay: f32,
    pub lr_delay: f32,
    pub damping: f32,
    pub feedback: f32,
    pub spread: f32,
}

impl Default for EchoParams {
    fn default() -> Self {
        Self { delay: 0.1, lr_delay: 0.1, damping: 0.5, feedback: 0.5, spread: -1.0 }
    }
}

impl EchoParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        match prop {
            prop::DELAY | prop::LRDELAY | prop::DAMPING | prop::FEEDBACK | prop::SPREAD => {
                Some(ValueKind::F32)
            }
            _ => None,
        }
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::DELAY => Value::F32(self.delay),
            prop::LRDELAY => Value::F32(self.lr_delay),
            prop::DAMPING => Value::F32(self.damping),
            prop::FEEDBACK => Value::F32(self.feedback),
            prop::SPREAD => Value::F32(self.spread),
            other => return Err(bad_prop("echo", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::DELAY => self.delay = clamp_f32(value.as_f32()?, MIN_DELAY, MAX_DELAY),
            prop::LRDELAY => self.lr_delay = clamp_f32(value.as_f32()?, MIN_LR_DELAY, MAX_LR_DELAY),
            prop::DAMPING => self.damping = clamp_f32(value.as_f32()?, MIN_DAMPING, MAX_DAMPING),
            prop::FEEDBACK => {
                self.feedback = clamp_f32(value.as_f32()?, MIN_FEEDBACK, MAX_FEEDBACK);
            }
            prop::SPREAD => self.spread = clamp_f32(value.as_f32()?, MIN_SPREAD, MAX_SPREAD),
            other => return Err(bad_prop("echo", other)),
        }
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self {
            delay: clamp_f32(self.delay, MIN_DELAY, MAX_DELAY),
            lr_delay: clamp_f32(self.lr_delay, MIN_LR_DELAY, MAX_LR_DELAY),
            damping: clamp_f32(self.damping, MIN_DAMPING, MAX_DAMPING),
            feedback: clamp_f32(self.feedback, MIN_FEEDBACK, MAX_FEEDBACK),
            spread: clamp_f32(self.spread, MIN_SPREAD, MAX_SPREAD),
        })
    }
}
