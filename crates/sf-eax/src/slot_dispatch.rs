//! Property dispatch for an fx slot itself
//!
//! Slot properties live in their own id range above the loaded effect's ids
//! and are never deferrable: loading an effect, setting the slot volume or
//! lock, and the 5.0 occlusion pair all apply on the spot.

use sf_core::{SfError, SfResult, SlotIndex};
use sf_slot::slot::{FLAG_ENVIRONMENT, FLAG_UPMIX};
use sf_slot::{Context, SlotLock};

use crate::call::PropertyCall;
use crate::records::{self, FxSlotRecord, Reader};
use crate::guids;

/// Property ids of the fx-slot set. Ids below `NONE` address the loaded
/// effect instead.
pub mod prop {
    pub const PARAMETER: u32 = 0;
    pub const NONE: u32 = 0x0001_0000;
    pub const ALLPARAMETERS: u32 = 0x0001_0001;
    pub const LOADEFFECT: u32 = 0x0001_0002;
    pub const VOLUME: u32 = 0x0001_0003;
    pub const LOCK: u32 = 0x0001_0004;
    pub const FLAGS: u32 = 0x0001_0005;
    pub const OCCLUSION: u32 = 0x0001_0006;
    pub const OCCLUSIONLFRATIO: u32 = 0x0001_0007;
}

pub const LOCK_UNLOCKED: i32 = 0;
pub const LOCK_LOCKED: i32 = 1;

fn call_slot(call: &PropertyCall) -> SfResult<SlotIndex> {
    call.slot
        .ok_or_else(|| SfError::invalid_operation("fx-slot call without a slot"))
}

fn decode_lock(lock: i32) -> SfResult<SlotLock> {
    match lock {
        LOCK_UNLOCKED => Ok(SlotLock::Unlocked),
        LOCK_LOCKED => Ok(SlotLock::Locked),
        other => Err(SfError::invalid_value(format!("fx-slot lock {other} is not 0 or 1"))),
    }
}

fn check_flags(version: u32, flags: u32) -> SfResult<()> {
    let reserved = if version >= 5 {
        !(FLAG_ENVIRONMENT | FLAG_UPMIX)
    } else {
        !FLAG_ENVIRONMENT
    };
    if flags & reserved != 0 {
        return Err(SfError::invalid_value(format!(
            "fx-slot flags {flags:#x} set reserved bits"
        )));
    }
    Ok(())
}

fn check_version5(call: &PropertyCall, what: &str) -> SfResult<()> {
    if call.version < 5 {
        return Err(SfError::IncompatibleVersion(format!(
            "{what} needs interface version 5, call used {}",
            call.version
        )));
    }
    Ok(())
}

pub fn set(context: &Context, call: &PropertyCall, buf: &[u8]) -> SfResult<()> {
    let slot = call_slot(call)?;
    match call.property {
        prop::NONE => Ok(()),
        prop::ALLPARAMETERS => {
            let record = records::decode_fx_slot_all(call.version, buf)?;
            let effect_type = guids::effect_type_for_guid(&record.effect_guid)
                .ok_or_else(|| SfError::UnknownEffect(record.effect_guid.to_string()))?;
            let lock = decode_lock(record.lock)?;
            check_flags(call.version, record.flags)?;
            let version = call.version;
            context.with_slot_mut(slot, |s| {
                s.load_effect(effect_type)?;
                s.set_volume_mb(record.volume_mb);
                s.set_lock(lock);
                s.set_flags(record.flags)?;
                if version >= 5 {
                    s.set_occlusion_mb(record.occlusion_mb);
                    s.set_occlusion_lf_ratio(record.occlusion_lf_ratio);
                }
                Ok(())
            })
        }
        prop::LOADEFFECT => {
            let guid = Reader::new(buf).read_guid()?;
            let effect_type = guids::effect_type_for_guid(&guid)
                .ok_or_else(|| SfError::UnknownEffect(guid.to_string()))?;
            context.load_effect(slot, effect_type)
        }
        prop::VOLUME => {
            let volume_mb = Reader::new(buf).read_i32()?;
            context.with_slot_mut(slot, |s| {
                s.set_volume_mb(volume_mb);
                Ok(())
            })
        }
        prop::LOCK => {
            let lock = decode_lock(Reader::new(buf).read_i32()?)?;
            context.with_slot_mut(slot, |s| {
                s.set_lock(lock);
                Ok(())
            })
        }
        prop::FLAGS => {
            let flags = Reader::new(buf).read_u32()?;
            check_flags(call.version, flags)?;
            context.with_slot_mut(slot, |s| s.set_flags(flags))
        }
        prop::OCCLUSION => {
            check_version5(call, "fx-slot occlusion")?;
            let occlusion_mb = Reader::new(buf).read_i32()?;
            context.with_slot_mut(slot, |s| {
                s.set_occlusion_mb(occlusion_mb);
                Ok(())
            })
        }
        prop::OCCLUSIONLFRATIO => {
            check_version5(call, "fx-slot occlusion LF ratio")?;
            let ratio = Reader::new(buf).read_f32()?;
            context.with_slot_mut(slot, |s| {
                s.set_occlusion_lf_ratio(ratio);
                Ok(())
            })
        }
        other => Err(SfError::invalid_operation(format!("unknown fx-slot property {other:#x}"))),
    }
}

pub fn get(context: &Context, call: &PropertyCall, buf: &mut [u8]) -> SfResult<()> {
    let slot = call_slot(call)?;
    match call.property {
        prop::NONE => Ok(()),
        prop::ALLPARAMETERS => {
            let record = context.with_slot(slot, |s| {
                Ok(FxSlotRecord {
                    effect_guid: guids::guid_for_effect_type(s.effect().effect_type()),
                    volume_mb: s.volume_mb(),
                    lock: match s.lock() {
                        SlotLock::Unlocked => LOCK_UNLOCKED,
                        SlotLock::Locked => LOCK_LOCKED,
                    },
                    flags: s.flags(),
                    occlusion_mb: s.occlusion_mb(),
                    occlusion_lf_ratio: s.occlusion_lf_ratio(),
                })
            })?;
            records::encode_fx_slot_all(&record, call.version, buf)?;
            Ok(())
        }
        prop::LOADEFFECT => {
            let guid = context
                .with_slot(slot, |s| Ok(guids::guid_for_effect_type(s.effect().effect_type())))?;
            records::Writer::new(buf).write_guid(&guid)
        }
        prop::VOLUME => {
            let volume_mb = context.with_slot(slot, |s| Ok(s.volume_mb()))?;
            records::Writer::new(buf).write_i32(volume_mb)
        }
        prop::LOCK => {
            let lock = context.with_slot(slot, |s| {
                Ok(match s.lock() {
                    SlotLock::Unlocked => LOCK_UNLOCKED,
                    SlotLock::Locked => LOCK_LOCKED,
                })
            })?;
            records::Writer::new(buf).write_i32(lock)
        }
        prop::FLAGS => {
            let flags = context.with_slot(slot, |s| Ok(s.flags()))?;
            records::Writer::new(buf).write_u32(flags)
        }
        prop::OCCLUSION => {
            check_version5(call, "fx-slot occlusion")?;
            let occlusion_mb = context.with_slot(slot, |s| Ok(s.occlusion_mb()))?;
            records::Writer::new(buf).write_i32(occlusion_mb)
        }
        prop::OCCLUSIONLFRATIO => {
            check_version5(call, "fx-slot occlusion LF ratio")?;
            let ratio = context.with_slot(slot, |s| Ok(s.occlusion_lf_ratio()))?;
            records::Writer::new(buf).write_f32(ratio)
        }
        other => Err(SfError::invalid_operation(format!("unknown fx-slot property {other:#x}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallTarget;
    use sf_fx::EffectType;

    fn slot_call(version: u32, slot: SlotIndex, property: u32) -> PropertyCall {
        PropertyCall {
            version,
            target: CallTarget::FxSlot,
            slot: Some(slot),
            property,
            deferred: false,
        }
    }

    #[test]
    fn load_effect_by_guid() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let buf = guids::ECHO_EFFECT.to_bytes();
        set(&context, &slot_call(4, SlotIndex::SLOT_2, prop::LOADEFFECT), &buf).unwrap();
        context
            .with_slot(SlotIndex::SLOT_2, |s| {
                assert_eq!(s.effect().effect_type(), EffectType::Echo);
                Ok(())
            })
            .unwrap();

        let bogus = sf_core::Guid::new(1, 2, 3, [4; 8]).to_bytes();
        assert!(matches!(
            set(&context, &slot_call(4, SlotIndex::SLOT_2, prop::LOADEFFECT), &bogus),
            Err(SfError::UnknownEffect(_))
        ));
    }

    #[test]
    fn locked_slot_rejects_load() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let buf = guids::ECHO_EFFECT.to_bytes();
        assert!(set(&context, &slot_call(4, SlotIndex::SLOT_0, prop::LOADEFFECT), &buf).is_err());
    }

    #[test]
    fn null_guid_releases_effect() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let buf = guids::NULL_GUID.to_bytes();
        set(&context, &slot_call(4, SlotIndex::SLOT_2, prop::LOADEFFECT), &buf).unwrap();
        context
            .with_slot(SlotIndex::SLOT_2, |s| {
                assert_eq!(s.effect().effect_type(), EffectType::None);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn volume_drives_gain() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let buf = (-2_000i32).to_le_bytes();
        set(&context, &slot_call(4, SlotIndex::SLOT_3, prop::VOLUME), &buf).unwrap();
        let gain = context.with_slot(SlotIndex::SLOT_3, |s| Ok(s.gain())).unwrap();
        assert!((gain - 0.1).abs() < 1e-6);
    }

    #[test]
    fn occlusion_needs_version_5() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let buf = (-600i32).to_le_bytes();
        assert!(matches!(
            set(&context, &slot_call(4, SlotIndex::SLOT_3, prop::OCCLUSION), &buf),
            Err(SfError::IncompatibleVersion(_))
        ));
        set(&context, &slot_call(5, SlotIndex::SLOT_3, prop::OCCLUSION), &buf).unwrap();
    }

    #[test]
    fn upmix_flag_is_version_5_only() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let buf = (FLAG_ENVIRONMENT | FLAG_UPMIX).to_le_bytes();
        assert!(set(&context, &slot_call(4, SlotIndex::SLOT_2, prop::FLAGS), &buf).is_err());
        set(&context, &slot_call(5, SlotIndex::SLOT_2, prop::FLAGS), &buf).unwrap();
    }

    #[test]
    fn all_parameters_get_reports_state() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let mut buf = [0u8; 36];
        get(&context, &slot_call(5, SlotIndex::SLOT_0, prop::ALLPARAMETERS), &mut buf).unwrap();
        let record = records::decode_fx_slot_all(5, &buf).unwrap();
        assert_eq!(record.effect_guid, guids::REVERB_EFFECT);
        assert_eq!(record.lock, LOCK_LOCKED);
        assert_eq!(record.flags & FLAG_ENVIRONMENT, FLAG_ENVIRONMENT);
    }
}
