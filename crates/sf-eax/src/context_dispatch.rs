//! Property dispatch for the context set
//!
//! Context properties cover the rendering globals (distance factor, air
//! absorption, HF reference), the primary-slot selection, the 5.0 session
//! record, and the read-only speaker layout. The last-error id is handled
//! one level up so a failing read of it cannot clobber itself.

use sf_core::{Guid, SfError, SfResult, SlotIndex};
use sf_slot::Context;

use crate::call::PropertyCall;
use crate::records::{self, ContextRecord, Reader, Writer};
use crate::guids;

/// Property ids of the context set.
pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const PRIMARYFXSLOTID: u32 = 2;
    pub const DISTANCEFACTOR: u32 = 3;
    pub const AIRABSORPTIONHF: u32 = 4;
    pub const HFREFERENCE: u32 = 5;
    pub const LASTERROR: u32 = 6;
    pub const SPEAKERCONFIG: u32 = 7;
    pub const EAXSESSION: u32 = 8;
    pub const MACROFXFACTOR: u32 = 9;
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

/// A primary-slot GUID is either null (no primary) or a slot id from
/// either versioned family.
fn primary_from_guid(guid: &Guid) -> SfResult<Option<SlotIndex>> {
    if guid.is_null() {
        return Ok(None);
    }
    let index = guids::slot_index_for_guid(guid)
        .ok_or_else(|| SfError::invalid_value(format!("{guid} is not an fx slot id")))?;
    Ok(Some(SlotIndex::new(index)?))
}

fn primary_to_guid(version: u32, primary: Option<SlotIndex>) -> Guid {
    match primary {
        Some(index) => guids::guid_for_slot_index(version, index.get()),
        None => Guid::NULL,
    }
}

pub fn set(context: &Context, call: &PropertyCall, buf: &[u8]) -> SfResult<()> {
    let mut r = Reader::new(buf);
    match call.property {
        prop::NONE => Ok(()),
        prop::ALLPARAMETERS => {
            let record = records::decode_context_all(call.version, buf)?;
            // Validate everything before the first write so a bad record
            // leaves the context untouched.
            let primary = primary_from_guid(&record.primary_guid)?;
            if !(record.distance_factor.is_finite() && record.distance_factor > 0.0) {
                return Err(SfError::invalid_value(format!(
                    "distance factor {} must be positive",
                    record.distance_factor
                )));
            }
            context.set_primary_slot(primary)?;
            context.set_distance_factor(record.distance_factor)?;
            context.set_air_absorption_hf(record.air_absorption_hf)?;
            context.set_hf_reference(record.hf_reference)?;
            if call.version >= 5 {
                context.set_macro_fx_factor(record.macro_fx_factor)?;
            }
            Ok(())
        }
        prop::PRIMARYFXSLOTID => {
            let primary = primary_from_guid(&r.read_guid()?)?;
            context.set_primary_slot(primary)
        }
        prop::DISTANCEFACTOR => context.set_distance_factor(r.read_f32()?),
        prop::AIRABSORPTIONHF => context.set_air_absorption_hf(r.read_f32()?),
        prop::HFREFERENCE => context.set_hf_reference(r.read_f32()?),
        prop::LASTERROR => {
            Err(SfError::invalid_operation("the last-error id is read-only"))
        }
        prop::SPEAKERCONFIG => {
            check_version5(call, "speaker config")?;
            Err(SfError::invalid_operation("the speaker config is read-only"))
        }
        prop::EAXSESSION => {
            check_version5(call, "the session record")?;
            context.set_session(records::decode_session(buf)?)
        }
        prop::MACROFXFACTOR => {
            check_version5(call, "macro FX factor")?;
            context.set_macro_fx_factor(r.read_f32()?)
        }
        other => Err(SfError::invalid_operation(format!("unknown context property {other}"))),
    }
}

pub fn get(context: &Context, call: &PropertyCall, buf: &mut [u8]) -> SfResult<()> {
    let mut w = Writer::new(buf);
    match call.property {
        prop::NONE => Ok(()),
        prop::ALLPARAMETERS => {
            let props = context.props();
            let record = ContextRecord {
                primary_guid: primary_to_guid(call.version, context.primary_slot()),
                distance_factor: props.distance_factor,
                air_absorption_hf: props.air_absorption_hf,
                hf_reference: props.hf_reference,
                macro_fx_factor: props.macro_fx_factor,
            };
            records::encode_context_all(&record, call.version, buf)?;
            Ok(())
        }
        prop::PRIMARYFXSLOTID => {
            w.write_guid(&primary_to_guid(call.version, context.primary_slot()))
        }
        prop::DISTANCEFACTOR => w.write_f32(context.props().distance_factor),
        prop::AIRABSORPTIONHF => w.write_f32(context.props().air_absorption_hf),
        prop::HFREFERENCE => w.write_f32(context.props().hf_reference),
        prop::LASTERROR => {
            Err(SfError::invalid_operation("the last-error id is handled by the interface"))
        }
        prop::SPEAKERCONFIG => {
            check_version5(call, "speaker config")?;
            w.write_u32(context.speaker_config())
        }
        prop::EAXSESSION => {
            check_version5(call, "the session record")?;
            records::encode_session(&context.session(), buf)?;
            Ok(())
        }
        prop::MACROFXFACTOR => {
            check_version5(call, "macro FX factor")?;
            w.write_f32(context.props().macro_fx_factor)
        }
        other => Err(SfError::invalid_operation(format!("unknown context property {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallTarget;
    use sf_slot::context::{SESSION_VERSION_5, Session};

    fn context_call(version: u32, property: u32) -> PropertyCall {
        PropertyCall {
            version,
            target: CallTarget::Context,
            slot: None,
            property,
            deferred: false,
        }
    }

    #[test]
    fn primary_slot_by_guid() {
        let context = Context::new();
        context.ensure_legacy_defaults();

        let buf = guids::EAX4_FX_SLOT_2.to_bytes();
        set(&context, &context_call(4, prop::PRIMARYFXSLOTID), &buf).unwrap();
        assert_eq!(context.primary_slot(), Some(SlotIndex::SLOT_2));

        let buf = Guid::NULL.to_bytes();
        set(&context, &context_call(4, prop::PRIMARYFXSLOTID), &buf).unwrap();
        assert_eq!(context.primary_slot(), None);

        let bogus = Guid::new(1, 2, 3, [4; 8]).to_bytes();
        assert!(set(&context, &context_call(4, prop::PRIMARYFXSLOTID), &bogus).is_err());
    }

    #[test]
    fn primary_guid_reports_in_call_family() {
        let context = Context::new();
        context.ensure_legacy_defaults();

        let mut buf = [0u8; 16];
        get(&context, &context_call(4, prop::PRIMARYFXSLOTID), &mut buf).unwrap();
        assert_eq!(Guid::from_bytes(&buf), guids::EAX4_FX_SLOT_0);
        get(&context, &context_call(5, prop::PRIMARYFXSLOTID), &mut buf).unwrap();
        assert_eq!(Guid::from_bytes(&buf), guids::EAX5_FX_SLOT_0);
    }

    #[test]
    fn bad_all_record_leaves_context_untouched() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let before = context.props();

        let record = ContextRecord {
            primary_guid: guids::EAX4_FX_SLOT_1,
            distance_factor: -1.0,
            air_absorption_hf: -2.0,
            hf_reference: 4_000.0,
            macro_fx_factor: 0.0,
        };
        let mut buf = [0u8; 28];
        records::encode_context_all(&record, 4, &mut buf).unwrap();
        assert!(set(&context, &context_call(4, prop::ALLPARAMETERS), &buf).is_err());
        assert_eq!(context.props(), before);
        assert_eq!(context.primary_slot(), Some(SlotIndex::SLOT_0));
    }

    #[test]
    fn session_record_round_trip() {
        let context = Context::new();
        let session = Session { version: SESSION_VERSION_5, max_active_sends: 4 };
        let mut buf = [0u8; 8];
        records::encode_session(&session, &mut buf).unwrap();

        assert!(matches!(
            set(&context, &context_call(4, prop::EAXSESSION), &buf),
            Err(SfError::IncompatibleVersion(_))
        ));
        set(&context, &context_call(5, prop::EAXSESSION), &buf).unwrap();
        assert_eq!(context.session(), session);
    }

    #[test]
    fn speaker_config_is_read_only() {
        let context = Context::new();
        let buf = 3u32.to_le_bytes();
        assert!(set(&context, &context_call(5, prop::SPEAKERCONFIG), &buf).is_err());
        let mut out = [0u8; 4];
        get(&context, &context_call(5, prop::SPEAKERCONFIG), &mut out).unwrap();
    }
}
