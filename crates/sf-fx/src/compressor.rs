//! Compressor parameter record
//!
//! A single on/off switch; the smallest record in the taxonomy.

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{Value, ValueKind, bad_prop, check_enum};

pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const ONOFF: u32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressorParams {
    pub on_off: u32,
}

impl Default for CompressorParams {
    fn default() -> Self {
        Self { on_off: 1 }
    }
}

impl CompressorParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        match prop {
            prop::ONOFF => Some(ValueKind::U32),
            _ => None,
        }
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        match prop {
            prop::ONOFF => Ok(Value::U32(self.on_off)),
            other => Err(bad_prop("compressor", other)),
        }
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::ONOFF => {
                self.on_off = check_enum("compressor on/off", value.as_u32()?, 1)?;
                Ok(())
            }
            other => Err(bad_prop("compressor", other)),
        }
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        Ok(Self { on_off: check_enum("compressor on/off", self.on_off, 1)? })
    }
}
