//! Reverb parameter record
//!
//! The richest effect in the taxonomy: 24 fields including two pan vectors,
//! a flags word and the environment index that keys the preset table.
//! Setting the environment loads a whole preset; writing any other field
//! afterwards marks the environment as undefined.

use serde::{Deserialize, Serialize};
use sf_core::SfResult;

use crate::{ValueKind, Value, bad_prop, check_enum, check_flags, clamp_f32, clamp_i32};

/// Property ids within the reverb effect.
pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const ENVIRONMENT: u32 = 2;
    pub const ENVIRONMENTSIZE: u32 = 3;
    pub const ENVIRONMENTDIFFUSION: u32 = 4;
    pub const ROOM: u32 = 5;
    pub const ROOMHF: u32 = 6;
    pub const ROOMLF: u32 = 7;
    pub const DECAYTIME: u32 = 8;
    pub const DECAYHFRATIO: u32 = 9;
    pub const DECAYLFRATIO: u32 = 10;
    pub const REFLECTIONS: u32 = 11;
    pub const REFLECTIONSDELAY: u32 = 12;
    pub const REFLECTIONSPAN: u32 = 13;
    pub const REVERB: u32 = 14;
    pub const REVERBDELAY: u32 = 15;
    pub const REVERBPAN: u32 = 16;
    pub const ECHOTIME: u32 = 17;
    pub const ECHODEPTH: u32 = 18;
    pub const MODULATIONTIME: u32 = 19;
    pub const MODULATIONDEPTH: u32 = 20;
    pub const AIRABSORPTIONHF: u32 = 21;
    pub const HFREFERENCE: u32 = 22;
    pub const LFREFERENCE: u32 = 23;
    pub const ROOMROLLOFFFACTOR: u32 = 24;
    pub const FLAGS: u32 = 25;
}

/// Number of named reverb environments.
pub const ENVIRONMENT_COUNT: u32 = 26;
/// Sentinel index meaning the record no longer matches a named environment.
pub const ENVIRONMENT_UNDEFINED: u32 = ENVIRONMENT_COUNT;

pub const FLAG_DECAY_TIME_SCALE: u32 = 0x0000_0001;
pub const FLAG_REFLECTIONS_SCALE: u32 = 0x0000_0002;
pub const FLAG_REFLECTIONS_DELAY_SCALE: u32 = 0x0000_0004;
pub const FLAG_REVERB_SCALE: u32 = 0x0000_0008;
pub const FLAG_REVERB_DELAY_SCALE: u32 = 0x0000_0010;
pub const FLAG_DECAY_HF_LIMIT: u32 = 0x0000_0020;
pub const FLAG_ECHO_TIME_SCALE: u32 = 0x0000_0040;
pub const FLAG_MODULATION_TIME_SCALE: u32 = 0x0000_0080;
pub const FLAGS_RESERVED: u32 = 0xFFFF_FF00;

pub const MIN_ENVIRONMENT_SIZE: f32 = 1.0;
pub const MAX_ENVIRONMENT_SIZE: f32 = 100.0;
pub const MIN_DIFFUSION: f32 = 0.0;
pub const MAX_DIFFUSION: f32 = 1.0;
pub const MIN_ROOM: i32 = -10_000;
pub const MAX_ROOM: i32 = 0;
pub const MIN_ROOM_HF: i32 = -10_000;
pub const MAX_ROOM_HF: i32 = 0;
pub const MIN_ROOM_LF: i32 = -10_000;
pub const MAX_ROOM_LF: i32 = 0;
pub const MIN_DECAY_TIME: f32 = 0.1;
pub const MAX_DECAY_TIME: f32 = 20.0;
pub const MIN_DECAY_HF_RATIO: f32 = 0.1;
pub const MAX_DECAY_HF_RATIO: f32 = 2.0;
pub const MIN_DECAY_LF_RATIO: f32 = 0.1;
pub const MAX_DECAY_LF_RATIO: f32 = 2.0;
pub const MIN_REFLECTIONS: i32 = -10_000;
pub const MAX_REFLECTIONS: i32 = 1_000;
pub const MIN_REFLECTIONS_DELAY: f32 = 0.0;
pub const MAX_REFLECTIONS_DELAY: f32 = 0.3;
pub const MIN_REVERB: i32 = -10_000;
pub const MAX_REVERB: i32 = 2_000;
pub const MIN_REVERB_DELAY: f32 = 0.0;
pub const MAX_REVERB_DELAY: f32 = 0.1;
pub const MIN_ECHO_TIME: f32 = 0.075;
pub const MAX_ECHO_TIME: f32 = 0.25;
pub const MIN_ECHO_DEPTH: f32 = 0.0;
pub const MAX_ECHO_DEPTH: f32 = 1.0;
pub const MIN_MODULATION_TIME: f32 = 0.04;
pub const MAX_MODULATION_TIME: f32 = 4.0;
pub const MIN_MODULATION_DEPTH: f32 = 0.0;
pub const MAX_MODULATION_DEPTH: f32 = 1.0;
pub const MIN_AIR_ABSORPTION_HF: f32 = -100.0;
pub const MAX_AIR_ABSORPTION_HF: f32 = 0.0;
pub const MIN_HF_REFERENCE: f32 = 1_000.0;
pub const MAX_HF_REFERENCE: f32 = 20_000.0;
pub const MIN_LF_REFERENCE: f32 = 20.0;
pub const MAX_LF_REFERENCE: f32 = 1_000.0;
pub const MIN_ROOM_ROLLOFF_FACTOR: f32 = 0.0;
pub const MAX_ROOM_ROLLOFF_FACTOR: f32 = 10.0;

pub const DEFAULT_FLAGS: u32 = FLAG_DECAY_TIME_SCALE
    | FLAG_REFLECTIONS_SCALE
    | FLAG_REFLECTIONS_DELAY_SCALE
    | FLAG_REVERB_SCALE
    | FLAG_REVERB_DELAY_SCALE
    | FLAG_DECAY_HF_LIMIT;

/// The full reverb parameter record, matching the 112-byte wire layout field
/// for field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReverbParams {
    pub environment: u32,
    pub environment_size: f32,
    pub environment_diffusion: f32,
    pub room: i32,
    pub room_hf: i32,
    pub room_lf: i32,
    pub decay_time: f32,
    pub decay_hf_ratio: f32,
    pub decay_lf_ratio: f32,
    pub reflections: i32,
    pub reflections_delay: f32,
    pub reflections_pan: [f32; 3],
    pub reverb: i32,
    pub reverb_delay: f32,
    pub reverb_pan: [f32; 3],
    pub echo_time: f32,
    pub echo_depth: f32,
    pub modulation_time: f32,
    pub modulation_depth: f32,
    pub air_absorption_hf: f32,
    pub hf_reference: f32,
    pub lf_reference: f32,
    pub room_rolloff_factor: f32,
    pub flags: u32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        crate::presets::REVERB_PRESETS[0]
    }
}

impl ReverbParams {
    pub fn param_kind(prop: u32) -> Option<ValueKind> {
        Some(match prop {
            prop::ENVIRONMENT | prop::FLAGS => ValueKind::U32,
            prop::ROOM | prop::ROOMHF | prop::ROOMLF | prop::REFLECTIONS | prop::REVERB => {
                ValueKind::I32
            }
            prop::ENVIRONMENTSIZE
            | prop::ENVIRONMENTDIFFUSION
            | prop::DECAYTIME
            | prop::DECAYHFRATIO
            | prop::DECAYLFRATIO
            | prop::REFLECTIONSDELAY
            | prop::REVERBDELAY
            | prop::ECHOTIME
            | prop::ECHODEPTH
            | prop::MODULATIONTIME
            | prop::MODULATIONDEPTH
            | prop::AIRABSORPTIONHF
            | prop::HFREFERENCE
            | prop::LFREFERENCE
            | prop::ROOMROLLOFFFACTOR => ValueKind::F32,
            prop::REFLECTIONSPAN | prop::REVERBPAN => ValueKind::Vec3,
            _ => return None,
        })
    }

    pub fn get(&self, prop: u32) -> SfResult<Value> {
        Ok(match prop {
            prop::ENVIRONMENT => Value::U32(self.environment),
            prop::ENVIRONMENTSIZE => Value::F32(self.environment_size),
            prop::ENVIRONMENTDIFFUSION => Value::F32(self.environment_diffusion),
            prop::ROOM => Value::I32(self.room),
            prop::ROOMHF => Value::I32(self.room_hf),
            prop::ROOMLF => Value::I32(self.room_lf),
            prop::DECAYTIME => Value::F32(self.decay_time),
            prop::DECAYHFRATIO => Value::F32(self.decay_hf_ratio),
            prop::DECAYLFRATIO => Value::F32(self.decay_lf_ratio),
            prop::REFLECTIONS => Value::I32(self.reflections),
            prop::REFLECTIONSDELAY => Value::F32(self.reflections_delay),
            prop::REFLECTIONSPAN => Value::Vec3(self.reflections_pan),
            prop::REVERB => Value::I32(self.reverb),
            prop::REVERBDELAY => Value::F32(self.reverb_delay),
            prop::REVERBPAN => Value::Vec3(self.reverb_pan),
            prop::ECHOTIME => Value::F32(self.echo_time),
            prop::ECHODEPTH => Value::F32(self.echo_depth),
            prop::MODULATIONTIME => Value::F32(self.modulation_time),
            prop::MODULATIONDEPTH => Value::F32(self.modulation_depth),
            prop::AIRABSORPTIONHF => Value::F32(self.air_absorption_hf),
            prop::HFREFERENCE => Value::F32(self.hf_reference),
            prop::LFREFERENCE => Value::F32(self.lf_reference),
            prop::ROOMROLLOFFFACTOR => Value::F32(self.room_rolloff_factor),
            prop::FLAGS => Value::U32(self.flags),
            other => return Err(bad_prop("reverb", other)),
        })
    }

    pub fn set(&mut self, prop: u32, value: Value) -> SfResult<()> {
        match prop {
            prop::ENVIRONMENT => {
                let env = check_enum("environment", value.as_u32()?, ENVIRONMENT_UNDEFINED)?;
                if env < ENVIRONMENT_COUNT {
                    *self = crate::presets::REVERB_PRESETS[env as usize];
                } else {
                    self.environment = env;
                }
                return Ok(());
            }
            prop::ENVIRONMENTSIZE => {
                self.environment_size =
                    clamp_f32(value.as_f32()?, MIN_ENVIRONMENT_SIZE, MAX_ENVIRONMENT_SIZE);
            }
            prop::ENVIRONMENTDIFFUSION => {
                self.environment_diffusion =
                    clamp_f32(value.as_f32()?, MIN_DIFFUSION, MAX_DIFFUSION);
            }
            prop::ROOM => self.room = clamp_i32(value.as_i32()?, MIN_ROOM, MAX_ROOM),
            prop::ROOMHF => self.room_hf = clamp_i32(value.as_i32()?, MIN_ROOM_HF, MAX_ROOM_HF),
            prop::ROOMLF => self.room_lf = clamp_i32(value.as_i32()?, MIN_ROOM_LF, MAX_ROOM_LF),
            prop::DECAYTIME => {
                self.decay_time = clamp_f32(value.as_f32()?, MIN_DECAY_TIME, MAX_DECAY_TIME);
            }
            prop::DECAYHFRATIO => {
                self.decay_hf_ratio =
                    clamp_f32(value.as_f32()?, MIN_DECAY_HF_RATIO, MAX_DECAY_HF_RATIO);
            }
            prop::DECAYLFRATIO => {
                self.decay_lf_ratio =
                    clamp_f32(value.as_f32()?, MIN_DECAY_LF_RATIO, MAX_DECAY_LF_RATIO);
            }
            prop::REFLECTIONS => {
                self.reflections = clamp_i32(value.as_i32()?, MIN_REFLECTIONS, MAX_REFLECTIONS);
            }
            prop::REFLECTIONSDELAY => {
                self.reflections_delay =
                    clamp_f32(value.as_f32()?, MIN_REFLECTIONS_DELAY, MAX_REFLECTIONS_DELAY);
            }
            prop::REFLECTIONSPAN => self.reflections_pan = value.as_vec3()?,
            prop::REVERB => self.reverb = clamp_i32(value.as_i32()?, MIN_REVERB, MAX_REVERB),
            prop::REVERBDELAY => {
                self.reverb_delay = clamp_f32(value.as_f32()?, MIN_REVERB_DELAY, MAX_REVERB_DELAY);
            }
            prop::REVERBPAN => self.reverb_pan = value.as_vec3()?,
            prop::ECHOTIME => {
                self.echo_time = clamp_f32(value.as_f32()?, MIN_ECHO_TIME, MAX_ECHO_TIME);
            }
            prop::ECHODEPTH => {
                self.echo_depth = clamp_f32(value.as_f32()?, MIN_ECHO_DEPTH, MAX_ECHO_DEPTH);
            }
            prop::MODULATIONTIME => {
                self.modulation_time =
                    clamp_f32(value.as_f32()?, MIN_MODULATION_TIME, MAX_MODULATION_TIME);
            }
            prop::MODULATIONDEPTH => {
                self.modulation_depth =
                    clamp_f32(value.as_f32()?, MIN_MODULATION_DEPTH, MAX_MODULATION_DEPTH);
            }
            prop::AIRABSORPTIONHF => {
                self.air_absorption_hf =
                    clamp_f32(value.as_f32()?, MIN_AIR_ABSORPTION_HF, MAX_AIR_ABSORPTION_HF);
            }
            prop::HFREFERENCE => {
                self.hf_reference = clamp_f32(value.as_f32()?, MIN_HF_REFERENCE, MAX_HF_REFERENCE);
            }
            prop::LFREFERENCE => {
                self.lf_reference = clamp_f32(value.as_f32()?, MIN_LF_REFERENCE, MAX_LF_REFERENCE);
            }
            prop::ROOMROLLOFFFACTOR => {
                self.room_rolloff_factor =
                    clamp_f32(value.as_f32()?, MIN_ROOM_ROLLOFF_FACTOR, MAX_ROOM_ROLLOFF_FACTOR);
            }
            prop::FLAGS => {
                self.flags = check_flags("reverb flags", value.as_u32()?, FLAGS_RESERVED)?;
            }
            other => return Err(bad_prop("reverb", other)),
        }
        // Free-form parameterization detaches the record from its named
        // environment.
        self.environment = ENVIRONMENT_UNDEFINED;
        Ok(())
    }

    pub fn sanitize(&self) -> SfResult<Self> {
        let mut out = *self;
        out.environment = check_enum("environment", self.environment, ENVIRONMENT_UNDEFINED)?;
        out.flags = check_flags("reverb flags", self.flags, FLAGS_RESERVED)?;
        out.environment_size =
            clamp_f32(self.environment_size, MIN_ENVIRONMENT_SIZE, MAX_ENVIRONMENT_SIZE);
        out.environment_diffusion =
            clamp_f32(self.environment_diffusion, MIN_DIFFUSION, MAX_DIFFUSION);
        out.room = clamp_i32(self.room, MIN_ROOM, MAX_ROOM);
        out.room_hf = clamp_i32(self.room_hf, MIN_ROOM_HF, MAX_ROOM_HF);
        out.room_lf = clamp_i32(self.room_lf, MIN_ROOM_LF, MAX_ROOM_LF);
        out.decay_time = clamp_f32(self.decay_time, MIN_DECAY_TIME, MAX_DECAY_TIME);
        out.decay_hf_ratio = clamp_f32(self.decay_hf_ratio, MIN_DECAY_HF_RATIO, MAX_DECAY_HF_RATIO);
        out.decay_lf_ratio = clamp_f32(self.decay_lf_ratio, MIN_DECAY_LF_RATIO, MAX_DECAY_LF_RATIO);
        out.reflections = clamp_i32(self.reflections, MIN_REFLECTIONS, MAX_REFLECTIONS);
        out.reflections_delay =
            clamp_f32(self.reflections_delay, MIN_REFLECTIONS_DELAY, MAX_REFLECTIONS_DELAY);
        out.reverb = clamp_i32(self.reverb, MIN_REVERB, MAX_REVERB);
        out.reverb_delay = clamp_f32(self.reverb_delay, MIN_REVERB_DELAY, MAX_REVERB_DELAY);
        out.echo_time = clamp_f32(self.echo_time, MIN_ECHO_TIME, MAX_ECHO_TIME);
        out.echo_depth = clamp_f32(self.echo_depth, MIN_ECHO_DEPTH, MAX_ECHO_DEPTH);
        out.modulation_time =
            clamp_f32(self.modulation_time, MIN_MODULATION_TIME, MAX_MODULATION_TIME);
        out.modulation_depth =
            clamp_f32(self.modulation_depth, MIN_MODULATION_DEPTH, MAX_MODULATION_DEPTH);
        out.air_absorption_hf =
            clamp_f32(self.air_absorption_hf, MIN_AIR_ABSORPTION_HF, MAX_AIR_ABSORPTION_HF);
        out.hf_reference = clamp_f32(self.hf_reference, MIN_HF_REFERENCE, MAX_HF_REFERENCE);
        out.lf_reference = clamp_f32(self.lf_reference, MIN_LF_REFERENCE, MAX_LF_REFERENCE);
        out.room_rolloff_factor =
            clamp_f32(self.room_rolloff_factor, MIN_ROOM_ROLLOFF_FACTOR, MAX_ROOM_ROLLOFF_FACTOR);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_generic() {
        let params = ReverbParams::default();
        assert_eq!(params.environment, 0);
        assert_eq!(params.room, -1_000);
        assert_eq!(params.room_hf, -100);
        assert_relative_eq!(params.decay_time, 1.49);
        assert_eq!(params.flags, DEFAULT_FLAGS);
    }

    #[test]
    fn environment_loads_preset() {
        let mut params = ReverbParams::default();
        params.set(prop::ENVIRONMENT, Value::U32(3)).unwrap();
        assert_eq!(params.environment, 3);
        assert_relative_eq!(params.decay_time, 1.49);
        assert_eq!(params.room_hf, -1_200);
        assert_relative_eq!(params.reflections_delay, 0.007);
    }

    #[test]
    fn environment_out_of_range_rejected() {
        let mut params = ReverbParams::default();
        assert!(params.set(prop::ENVIRONMENT, Value::U32(27)).is_err());
        assert_eq!(params.environment, 0);
    }

    #[test]
    fn free_form_set_marks_undefined() {
        let mut params = ReverbParams::default();
        params.set(prop::DECAYTIME, Value::F32(2.0)).unwrap();
        assert_eq!(params.environment, ENVIRONMENT_UNDEFINED);
    }

    #[test]
    fn room_clamps() {
        let mut params = ReverbParams::default();
        params.set(prop::ROOM, Value::I32(-20_000)).unwrap();
        assert_eq!(params.room, MIN_ROOM);
        params.set(prop::ROOM, Value::I32(1_000)).unwrap();
        assert_eq!(params.room, MAX_ROOM);
    }

    #[test]
    fn reserved_flag_bits_rejected() {
        let mut params = ReverbParams::default();
        assert!(params.set(prop::FLAGS, Value::U32(0x100)).is_err());
        params.set(prop::FLAGS, Value::U32(0x3F)).unwrap();
        assert_eq!(params.flags, 0x3F);
    }

    #[test]
    fn wrong_kind_rejected() {
        let mut params = ReverbParams::default();
        assert!(params.set(prop::DECAYTIME, Value::U32(1)).is_err());
    }
}
