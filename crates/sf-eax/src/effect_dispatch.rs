//! Property dispatch for a slot's loaded effect
//!
//! Listener property sets (1.0 through 3.0) and fx-slot ids below the slot
//! range both land here. From 3.0 on the property ids are the effect's own
//! numbering; 2.0 ids were already translated during call decoding. The 1.0
//! surface is its own little world: a four-value reverb record stored
//! verbatim next to the real parameters.

use sf_core::{SfError, SfResult, SlotIndex};
use sf_fx::presets::{LEGACY_REVERB_PRESETS, LegacyReverbParams};
use sf_fx::reverb::{self, ENVIRONMENT_COUNT};
use sf_fx::{EffectParams, EffectType, Value};
use sf_slot::Context;

use crate::call::PropertyCall;
use crate::records;

/// Property ids of the 1.0 listener set.
pub mod legacy_prop {
    pub const ALL: u32 = 0;
    pub const ENVIRONMENT: u32 = 1;
    pub const VOLUME: u32 = 2;
    pub const DECAYTIME: u32 = 3;
    pub const DAMPING: u32 = 4;
}

pub const MIN_LEGACY_VOLUME: f32 = 0.0;
pub const MAX_LEGACY_VOLUME: f32 = 1.0;
pub const MIN_LEGACY_DECAY_TIME: f32 = 0.1;
pub const MAX_LEGACY_DECAY_TIME: f32 = 20.0;
pub const MIN_LEGACY_DAMPING: f32 = 0.0;
pub const MAX_LEGACY_DAMPING: f32 = 2.0;

fn call_slot(call: &PropertyCall) -> SfResult<SlotIndex> {
    call.slot
        .ok_or_else(|| SfError::invalid_operation("effect call without a slot"))
}

pub fn set(context: &Context, call: &PropertyCall, buf: &[u8]) -> SfResult<()> {
    let slot = call_slot(call)?;
    if call.version == 1 {
        return set_legacy(context, slot, call.property, buf);
    }

    let effect_type = context.with_slot(slot, |s| Ok(s.effect().effect_type()))?;
    if call.property == 0 {
        return Ok(());
    }
    if effect_type == EffectType::None {
        return Err(SfError::NoEffectLoaded(slot.get() as u32));
    }
    // The listener property sets address the reverb model specifically.
    if call.version <= 3 && effect_type != EffectType::Reverb {
        return Err(SfError::invalid_operation(format!(
            "slot {slot} is not running a reverb"
        )));
    }

    if call.property == 1 {
        let current = context.with_slot(slot, |s| Ok(*s.effect().params()))?;
        let params = records::decode_effect_all(effect_type, call.version, &current, buf)?;
        return context.set_effect_all(slot, params);
    }

    let kind = EffectParams::param_kind(effect_type, call.property).ok_or_else(|| {
        SfError::invalid_operation(format!(
            "property {} does not apply to {effect_type:?}",
            call.property
        ))
    })?;
    let value = records::read_value(kind, buf)?;
    context.set_effect_property(slot, call.property, value)
}

pub fn get(context: &Context, call: &PropertyCall, buf: &mut [u8]) -> SfResult<()> {
    let slot = call_slot(call)?;
    if call.version == 1 {
        return get_legacy(context, slot, call.property, buf);
    }

    let effect_type = context.with_slot(slot, |s| Ok(s.effect().effect_type()))?;
    if call.property == 0 {
        return Ok(());
    }
    if effect_type == EffectType::None {
        return Err(SfError::NoEffectLoaded(slot.get() as u32));
    }
    if call.version <= 3 && effect_type != EffectType::Reverb {
        return Err(SfError::invalid_operation(format!(
            "slot {slot} is not running a reverb"
        )));
    }

    if call.property == 1 {
        let params = context.with_slot(slot, |s| Ok(*s.effect().params()))?;
        records::encode_effect_all(&params, call.version, buf)?;
        return Ok(());
    }

    let value = context.get_effect_property(slot, call.property)?;
    records::write_value(value, buf)
}

// ----------------------------------------------------------------------
// The 1.0 model
// ----------------------------------------------------------------------

fn set_legacy(context: &Context, slot: SlotIndex, property: u32, buf: &[u8]) -> SfResult<()> {
    match property {
        legacy_prop::ALL => {
            let record = records::decode_legacy_reverb(buf)?;
            apply_legacy_environment(context, slot, record.environment)?;
            let clamped = LegacyReverbParams {
                environment: record.environment,
                volume: record.volume.clamp(MIN_LEGACY_VOLUME, MAX_LEGACY_VOLUME),
                decay_time: record
                    .decay_time
                    .clamp(MIN_LEGACY_DECAY_TIME, MAX_LEGACY_DECAY_TIME),
                damping: record.damping.clamp(MIN_LEGACY_DAMPING, MAX_LEGACY_DAMPING),
            };
            context.with_slot_mut(slot, |s| {
                s.set_legacy_reverb(clamped);
                Ok(())
            })
        }
        legacy_prop::ENVIRONMENT => {
            let environment = records::Reader::new(buf).read_u32()?;
            apply_legacy_environment(context, slot, environment)?;
            // Selecting an environment resets the whole legacy record.
            context.with_slot_mut(slot, |s| {
                s.set_legacy_reverb(LEGACY_REVERB_PRESETS[environment as usize]);
                Ok(())
            })
        }
        legacy_prop::VOLUME => {
            let volume = records::Reader::new(buf).read_f32()?;
            update_legacy(context, slot, |record| {
                record.volume = volume.clamp(MIN_LEGACY_VOLUME, MAX_LEGACY_VOLUME);
            })
        }
        legacy_prop::DECAYTIME => {
            let decay_time = records::Reader::new(buf).read_f32()?;
            update_legacy(context, slot, |record| {
                record.decay_time =
                    decay_time.clamp(MIN_LEGACY_DECAY_TIME, MAX_LEGACY_DECAY_TIME);
            })
        }
        legacy_prop::DAMPING => {
            let damping = records::Reader::new(buf).read_f32()?;
            update_legacy(context, slot, |record| {
                record.damping = damping.clamp(MIN_LEGACY_DAMPING, MAX_LEGACY_DAMPING);
            })
        }
        other => Err(SfError::invalid_operation(format!("unknown 1.0 listener property {other}"))),
    }
}

fn get_legacy(context: &Context, slot: SlotIndex, property: u32, buf: &mut [u8]) -> SfResult<()> {
    let record = context.with_slot(slot, |s| Ok(*s.legacy_reverb()))?;
    match property {
        legacy_prop::ALL => {
            records::encode_legacy_reverb(&record, buf)?;
            Ok(())
        }
        legacy_prop::ENVIRONMENT => records::write_value(Value::U32(record.environment), buf),
        legacy_prop::VOLUME => records::write_value(Value::F32(record.volume), buf),
        legacy_prop::DECAYTIME => records::write_value(Value::F32(record.decay_time), buf),
        legacy_prop::DAMPING => records::write_value(Value::F32(record.damping), buf),
        other => Err(SfError::invalid_operation(format!("unknown 1.0 listener property {other}"))),
    }
}

/// Selecting a 1.0 environment loads the full preset on the slot's reverb.
fn apply_legacy_environment(context: &Context, slot: SlotIndex, environment: u32) -> SfResult<()> {
    if environment >= ENVIRONMENT_COUNT {
        return Err(SfError::invalid_value(format!(
            "environment {environment} out of range 0..{ENVIRONMENT_COUNT}"
        )));
    }
    context.set_effect_property(slot, reverb::prop::ENVIRONMENT, Value::U32(environment))
}

fn update_legacy(
    context: &Context,
    slot: SlotIndex,
    f: impl FnOnce(&mut LegacyReverbParams),
) -> SfResult<()> {
    context.with_slot_mut(slot, |s| {
        let mut record = *s.legacy_reverb();
        f(&mut record);
        s.set_legacy_reverb(record);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallTarget;
    use sf_fx::presets::REVERB_PRESETS;

    fn reverb_context() -> Context {
        let context = Context::new();
        context.ensure_legacy_defaults();
        context
    }

    fn effect_call(version: u32, property: u32) -> PropertyCall {
        PropertyCall {
            version,
            target: CallTarget::FxSlotEffect,
            slot: Some(SlotIndex::SLOT_0),
            property,
            deferred: false,
        }
    }

    #[test]
    fn single_property_set_and_get() {
        let context = reverb_context();
        let buf = 2.5f32.to_le_bytes();
        set(&context, &effect_call(4, reverb::prop::DECAYTIME), &buf).unwrap();

        let mut out = [0u8; 4];
        get(&context, &effect_call(4, reverb::prop::DECAYTIME), &mut out).unwrap();
        assert_eq!(f32::from_le_bytes(out), 2.5);
    }

    #[test]
    fn all_parameters_round_trip() {
        let context = reverb_context();
        let mut buf = [0u8; 112];
        records::encode_effect_all(&EffectParams::Reverb(REVERB_PRESETS[8]), 4, &mut buf).unwrap();
        set(&context, &effect_call(4, reverb::prop::ALLPARAMETERS), &buf).unwrap();

        let mut out = [0u8; 112];
        get(&context, &effect_call(4, reverb::prop::ALLPARAMETERS), &mut out).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn empty_slot_reports_no_effect() {
        let context = reverb_context();
        let call = PropertyCall { slot: Some(SlotIndex::SLOT_2), ..effect_call(4, 5) };
        let buf = [0u8; 4];
        assert!(matches!(
            set(&context, &call, &buf),
            Err(SfError::NoEffectLoaded(2))
        ));
    }

    #[test]
    fn legacy_environment_loads_preset_and_record() {
        let context = reverb_context();
        let buf = 3u32.to_le_bytes();
        set(&context, &effect_call(1, legacy_prop::ENVIRONMENT), &buf).unwrap();

        // The full reverb follows the Bathroom preset.
        assert_eq!(
            context
                .get_effect_property(SlotIndex::SLOT_0, reverb::prop::DECAYTIME)
                .unwrap(),
            Value::F32(REVERB_PRESETS[3].decay_time)
        );
        // The four-value record comes from its own table.
        let mut out = [0u8; 16];
        get(&context, &effect_call(1, legacy_prop::ALL), &mut out).unwrap();
        let record = records::decode_legacy_reverb(&out).unwrap();
        assert_eq!(record, LEGACY_REVERB_PRESETS[3]);
    }

    #[test]
    fn legacy_scalars_touch_only_the_record() {
        let context = reverb_context();
        let before = context
            .get_effect_property(SlotIndex::SLOT_0, reverb::prop::DECAYTIME)
            .unwrap();

        let buf = 4.0f32.to_le_bytes();
        set(&context, &effect_call(1, legacy_prop::DECAYTIME), &buf).unwrap();

        let mut out = [0u8; 4];
        get(&context, &effect_call(1, legacy_prop::DECAYTIME), &mut out).unwrap();
        assert_eq!(f32::from_le_bytes(out), 4.0);
        assert_eq!(
            context
                .get_effect_property(SlotIndex::SLOT_0, reverb::prop::DECAYTIME)
                .unwrap(),
            before
        );
    }

    #[test]
    fn legacy_environment_out_of_range() {
        let context = reverb_context();
        let buf = 26u32.to_le_bytes();
        assert!(set(&context, &effect_call(1, legacy_prop::ENVIRONMENT), &buf).is_err());
    }
}
