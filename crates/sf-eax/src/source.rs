//! Per-source legacy properties
//!
//! A source carries the path-filter scalars (direct, room, obstruction,
//! occlusion, exclusion), a flags word, and from 4.0 on a per-slot send
//! table plus the list of slots it feeds. The engine stores and reports
//! these; the mixer-facing output is the per-slot send-level vector.

use sf_core::{Guid, SLOT_COUNT, SfError, SfResult, SlotIndex, mb_to_gain};
use sf_slot::{Context, Session};

use crate::call::PropertyCall;
use crate::records::{Reader, Writer};
use crate::guids;

/// Property ids of the source set (3.0+ numbering; 2.0 ids are translated
/// during call decoding).
pub mod prop {
    pub const NONE: u32 = 0;
    pub const ALLPARAMETERS: u32 = 1;
    pub const OBSTRUCTIONPARAMETERS: u32 = 2;
    pub const OCCLUSIONPARAMETERS: u32 = 3;
    pub const EXCLUSIONPARAMETERS: u32 = 4;
    pub const DIRECT: u32 = 5;
    pub const DIRECTHF: u32 = 6;
    pub const ROOM: u32 = 7;
    pub const ROOMHF: u32 = 8;
    pub const OBSTRUCTION: u32 = 9;
    pub const OBSTRUCTIONLFRATIO: u32 = 10;
    pub const OCCLUSION: u32 = 11;
    pub const OCCLUSIONLFRATIO: u32 = 12;
    pub const OCCLUSIONROOMRATIO: u32 = 13;
    pub const OCCLUSIONDIRECTRATIO: u32 = 14;
    pub const EXCLUSION: u32 = 15;
    pub const EXCLUSIONLFRATIO: u32 = 16;
    pub const OUTSIDEVOLUMEHF: u32 = 17;
    pub const DOPPLERFACTOR: u32 = 18;
    pub const ROLLOFFFACTOR: u32 = 19;
    pub const ROOMROLLOFFFACTOR: u32 = 20;
    pub const AIRABSORPTIONFACTOR: u32 = 21;
    pub const FLAGS: u32 = 22;
    pub const SENDPARAMETERS: u32 = 23;
    pub const ALLSENDPARAMETERS: u32 = 24;
    pub const OCCLUSIONSENDPARAMETERS: u32 = 25;
    pub const EXCLUSIONSENDPARAMETERS: u32 = 26;
    pub const ACTIVEFXSLOTID: u32 = 27;
    pub const MACROFXFACTOR: u32 = 28;
    pub const SPEAKERLEVELS: u32 = 29;
    pub const ALL2DPARAMETERS: u32 = 30;
}

/// Property ids of the 1.0 buffer set.
pub mod legacy_prop {
    pub const ALL: u32 = 0;
    pub const REVERBMIX: u32 = 1;
}

pub const FLAG_DIRECT_HF_AUTO: u32 = 0x0000_0001;
pub const FLAG_ROOM_AUTO: u32 = 0x0000_0002;
pub const FLAG_ROOM_HF_AUTO: u32 = 0x0000_0004;
pub const FLAG_ELEVATION_FILTER: u32 = 0x0000_0008;
pub const FLAG_UPMIX: u32 = 0x0000_0010;
pub const FLAG_APPLY_SPEAKER_LEVELS: u32 = 0x0000_0020;

pub const DEFAULT_FLAGS: u32 = FLAG_DIRECT_HF_AUTO | FLAG_ROOM_AUTO | FLAG_ROOM_HF_AUTO;

pub const MIN_SEND_MB: i32 = -10_000;
pub const MAX_SEND_MB: i32 = 0;
pub const MIN_DIRECT_MB: i32 = -10_000;
pub const MAX_DIRECT_MB: i32 = 1_000;
pub const MIN_ROOM_MB: i32 = -10_000;
pub const MAX_ROOM_MB: i32 = 1_000;
pub const MIN_ATTENUATION_MB: i32 = -10_000;
pub const MAX_ATTENUATION_MB: i32 = 0;
pub const MIN_RATIO: f32 = 0.0;
pub const MAX_LF_RATIO: f32 = 1.0;
pub const MAX_ROOM_RATIO: f32 = 10.0;
pub const MIN_FACTOR: f32 = 0.0;
pub const MAX_FACTOR: f32 = 10.0;

/// 1.0 reverb-mix sentinel: derive the mix from source distance.
pub const REVERB_MIX_USE_DISTANCE: f32 = -1.0;

fn check_flags(version: u32, flags: u32) -> SfResult<u32> {
    let reserved = if version >= 5 {
        !(DEFAULT_FLAGS | FLAG_ELEVATION_FILTER | FLAG_UPMIX | FLAG_APPLY_SPEAKER_LEVELS)
    } else {
        !DEFAULT_FLAGS
    };
    if flags & reserved != 0 {
        return Err(SfError::invalid_value(format!(
            "source flags {flags:#x} set reserved bits"
        )));
    }
    Ok(flags)
}

/// Resolves source handles to engine objects. The renderer that owns the
/// real source table plugs in here; without one every handle is accepted.
pub trait SourceLookup: Send + Sync {
    fn source_exists(&self, source_id: u32) -> bool;
}

/// One send from a source into a receiving slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendProps {
    pub send_mb: i32,
    pub send_hf_mb: i32,
    pub occlusion_mb: i32,
    pub occlusion_lf_ratio: f32,
    pub occlusion_room_ratio: f32,
    pub occlusion_direct_ratio: f32,
    pub exclusion_mb: i32,
    pub exclusion_lf_ratio: f32,
}

impl Default for SendProps {
    fn default() -> Self {
        Self {
            send_mb: 0,
            send_hf_mb: 0,
            occlusion_mb: 0,
            occlusion_lf_ratio: 0.25,
            occlusion_room_ratio: 1.5,
            occlusion_direct_ratio: 1.0,
            exclusion_mb: 0,
            exclusion_lf_ratio: 1.0,
        }
    }
}

/// Everything the legacy surface stores per source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProps {
    pub direct_mb: i32,
    pub direct_hf_mb: i32,
    pub room_mb: i32,
    pub room_hf_mb: i32,
    pub obstruction_mb: i32,
    pub obstruction_lf_ratio: f32,
    pub occlusion_mb: i32,
    pub occlusion_lf_ratio: f32,
    pub occlusion_room_ratio: f32,
    pub occlusion_direct_ratio: f32,
    pub exclusion_mb: i32,
    pub exclusion_lf_ratio: f32,
    pub outside_volume_hf_mb: i32,
    pub doppler_factor: f32,
    pub rolloff_factor: f32,
    pub room_rolloff_factor: f32,
    pub air_absorption_factor: f32,
    pub flags: u32,
    pub macro_fx_factor: f32,
    pub reverb_mix: f32,
    pub sends: [SendProps; SLOT_COUNT],
    pub active: [Guid; SLOT_COUNT],
}

impl Default for SourceProps {
    fn default() -> Self {
        Self {
            direct_mb: 0,
            direct_hf_mb: 0,
            room_mb: 0,
            room_hf_mb: 0,
            obstruction_mb: 0,
            obstruction_lf_ratio: 0.0,
            occlusion_mb: 0,
            occlusion_lf_ratio: 0.25,
            occlusion_room_ratio: 1.5,
            occlusion_direct_ratio: 1.0,
            exclusion_mb: 0,
            exclusion_lf_ratio: 1.0,
            outside_volume_hf_mb: 0,
            doppler_factor: 1.0,
            rolloff_factor: 0.0,
            room_rolloff_factor: 0.0,
            air_absorption_factor: 0.0,
            flags: DEFAULT_FLAGS,
            macro_fx_factor: 1.0,
            reverb_mix: REVERB_MIX_USE_DISTANCE,
            sends: [SendProps::default(); SLOT_COUNT],
            active: [
                Guid::NULL,
                guids::PRIMARY_FX_SLOT_ID,
                Guid::NULL,
                Guid::NULL,
            ],
        }
    }
}

impl SourceProps {
    /// Linear send gains per receiving slot, with the primary marker
    /// resolved against the current primary. Inactive slots stay silent.
    pub fn send_gains(&self, primary: Option<SlotIndex>) -> [f32; SLOT_COUNT] {
        let mut gains = [0.0; SLOT_COUNT];
        for guid in &self.active {
            let index = if *guid == guids::PRIMARY_FX_SLOT_ID {
                match primary {
                    Some(index) => index,
                    None => continue,
                }
            } else {
                match guids::slot_index_for_guid(guid) {
                    Some(index) => match SlotIndex::new(index) {
                        Ok(index) => index,
                        Err(_) => continue,
                    },
                    None => continue,
                }
            };
            gains[index.get()] = mb_to_gain(self.sends[index.get()].send_mb);
        }
        gains
    }
}

/// Resolve a receiving-slot GUID in a send record.
fn resolve_send_slot(context: &Context, guid: &Guid) -> SfResult<SlotIndex> {
    if *guid == guids::PRIMARY_FX_SLOT_ID {
        return context
            .primary_slot()
            .ok_or_else(|| SfError::invalid_operation("no primary fx slot set"));
    }
    guids::slot_index_for_guid(guid)
        .map(SlotIndex::new)
        .transpose()?
        .ok_or_else(|| SfError::invalid_value(format!("{guid} is not an fx slot id")))
}

fn check_version(call: &PropertyCall, minimum: u32, what: &str) -> SfResult<()> {
    if call.version < minimum {
        return Err(SfError::IncompatibleVersion(format!(
            "{what} needs interface version {minimum}, call used {}",
            call.version
        )));
    }
    Ok(())
}

pub fn set(
    context: &Context,
    session: Session,
    call: &PropertyCall,
    props: &mut SourceProps,
    buf: &[u8],
) -> SfResult<()> {
    if call.version == 1 {
        return set_legacy(call.property, props, buf);
    }
    let mut r = Reader::new(buf);
    match call.property {
        prop::NONE => Ok(()),
        prop::ALLPARAMETERS => set_all(call.version, props, &mut r),
        prop::OBSTRUCTIONPARAMETERS => {
            props.obstruction_mb =
                r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            props.obstruction_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            Ok(())
        }
        prop::OCCLUSIONPARAMETERS => {
            props.occlusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            props.occlusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            props.occlusion_room_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
            props.occlusion_direct_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
            Ok(())
        }
        prop::EXCLUSIONPARAMETERS => {
            props.exclusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            props.exclusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            Ok(())
        }
        prop::DIRECT => {
            props.direct_mb = r.read_i32()?.clamp(MIN_DIRECT_MB, MAX_DIRECT_MB);
            Ok(())
        }
        prop::DIRECTHF => {
            props.direct_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            Ok(())
        }
        prop::ROOM => {
            props.room_mb = r.read_i32()?.clamp(MIN_ROOM_MB, MAX_ROOM_MB);
            Ok(())
        }
        prop::ROOMHF => {
            props.room_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            Ok(())
        }
        prop::OBSTRUCTION => {
            props.obstruction_mb =
                r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            Ok(())
        }
        prop::OBSTRUCTIONLFRATIO => {
            props.obstruction_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            Ok(())
        }
        prop::OCCLUSION => {
            props.occlusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            Ok(())
        }
        prop::OCCLUSIONLFRATIO => {
            props.occlusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            Ok(())
        }
        prop::OCCLUSIONROOMRATIO => {
            props.occlusion_room_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
            Ok(())
        }
        prop::OCCLUSIONDIRECTRATIO => {
            props.occlusion_direct_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
            Ok(())
        }
        prop::EXCLUSION => {
            props.exclusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            Ok(())
        }
        prop::EXCLUSIONLFRATIO => {
            props.exclusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            Ok(())
        }
        prop::OUTSIDEVOLUMEHF => {
            props.outside_volume_hf_mb =
                r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
            Ok(())
        }
        prop::DOPPLERFACTOR => {
            props.doppler_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
            Ok(())
        }
        prop::ROLLOFFFACTOR => {
            props.rolloff_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
            Ok(())
        }
        prop::ROOMROLLOFFFACTOR => {
            props.room_rolloff_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
            Ok(())
        }
        prop::AIRABSORPTIONFACTOR => {
            props.air_absorption_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
            Ok(())
        }
        prop::FLAGS => {
            props.flags = check_flags(call.version, r.read_u32()?)?;
            Ok(())
        }
        prop::SENDPARAMETERS => {
            check_version(call, 4, "send parameters")?;
            while r.remaining() >= Guid::SIZE + 8 {
                let slot = resolve_send_slot(context, &r.read_guid()?)?;
                let send = &mut props.sends[slot.get()];
                send.send_mb = r.read_i32()?.clamp(MIN_SEND_MB, MAX_SEND_MB);
                send.send_hf_mb = r.read_i32()?.clamp(MIN_SEND_MB, MAX_SEND_MB);
            }
            Ok(())
        }
        prop::ALLSENDPARAMETERS => {
            check_version(call, 4, "send parameters")?;
            while r.remaining() >= Guid::SIZE + 32 {
                let slot = resolve_send_slot(context, &r.read_guid()?)?;
                let send = &mut props.sends[slot.get()];
                send.send_mb = r.read_i32()?.clamp(MIN_SEND_MB, MAX_SEND_MB);
                send.send_hf_mb = r.read_i32()?.clamp(MIN_SEND_MB, MAX_SEND_MB);
                send.occlusion_mb =
                    r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
                send.occlusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
                send.occlusion_room_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
                send.occlusion_direct_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
                send.exclusion_mb =
                    r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
                send.exclusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            }
            Ok(())
        }
        prop::OCCLUSIONSENDPARAMETERS => {
            check_version(call, 4, "send parameters")?;
            while r.remaining() >= Guid::SIZE + 16 {
                let slot = resolve_send_slot(context, &r.read_guid()?)?;
                let send = &mut props.sends[slot.get()];
                send.occlusion_mb =
                    r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
                send.occlusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
                send.occlusion_room_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
                send.occlusion_direct_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
            }
            Ok(())
        }
        prop::EXCLUSIONSENDPARAMETERS => {
            check_version(call, 4, "send parameters")?;
            while r.remaining() >= Guid::SIZE + 8 {
                let slot = resolve_send_slot(context, &r.read_guid()?)?;
                let send = &mut props.sends[slot.get()];
                send.exclusion_mb =
                    r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
                send.exclusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
            }
            Ok(())
        }
        prop::ACTIVEFXSLOTID => {
            check_version(call, 4, "active fx slot list")?;
            set_active_slots(session, call.version, props, buf)
        }
        prop::MACROFXFACTOR => {
            check_version(call, 5, "macro FX factor")?;
            props.macro_fx_factor = r.read_f32()?.clamp(0.0, 1.0);
            Ok(())
        }
        prop::SPEAKERLEVELS | prop::ALL2DPARAMETERS => Err(SfError::invalid_operation(
            "speaker-level properties are not supported by this renderer",
        )),
        other => Err(SfError::invalid_operation(format!("unknown source property {other}"))),
    }
}

fn set_all(version: u32, props: &mut SourceProps, r: &mut Reader) -> SfResult<()> {
    let mut next = *props;
    if version == 2 {
        // The 2.0 record is a subset in its own order.
        next.direct_mb = r.read_i32()?.clamp(MIN_DIRECT_MB, MAX_DIRECT_MB);
        next.direct_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.room_mb = r.read_i32()?.clamp(MIN_ROOM_MB, MAX_ROOM_MB);
        next.room_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.room_rolloff_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
        next.obstruction_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.obstruction_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
        next.occlusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.occlusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
        next.occlusion_room_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
        next.outside_volume_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.air_absorption_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
        next.flags = check_flags(version, r.read_u32()?)?;
    } else {
        next.direct_mb = r.read_i32()?.clamp(MIN_DIRECT_MB, MAX_DIRECT_MB);
        next.direct_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.room_mb = r.read_i32()?.clamp(MIN_ROOM_MB, MAX_ROOM_MB);
        next.room_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.obstruction_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.obstruction_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
        next.occlusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.occlusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
        next.occlusion_room_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
        next.occlusion_direct_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_ROOM_RATIO);
        next.exclusion_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.exclusion_lf_ratio = r.read_f32()?.clamp(MIN_RATIO, MAX_LF_RATIO);
        next.outside_volume_hf_mb = r.read_i32()?.clamp(MIN_ATTENUATION_MB, MAX_ATTENUATION_MB);
        next.doppler_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
        next.rolloff_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
        next.room_rolloff_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
        next.air_absorption_factor = r.read_f32()?.clamp(MIN_FACTOR, MAX_FACTOR);
        next.flags = check_flags(version, r.read_u32()?)?;
        if version >= 5 {
            next.macro_fx_factor = r.read_f32()?.clamp(0.0, 1.0);
        }
    }
    *props = next;
    Ok(())
}

fn set_active_slots(
    session: Session,
    version: u32,
    props: &mut SourceProps,
    buf: &[u8],
) -> SfResult<()> {
    let count = buf.len() / Guid::SIZE;
    let limit = if version >= 5 { session.max_active_sends as usize } else { 2 };
    if count == 0 || count > limit {
        return Err(SfError::invalid_value(format!(
            "active slot list holds {count} ids, limit is {limit}"
        )));
    }
    let mut r = Reader::new(buf);
    let mut active = [Guid::NULL; SLOT_COUNT];
    for entry in active.iter_mut().take(count) {
        let guid = r.read_guid()?;
        if !guid.is_null()
            && guid != guids::PRIMARY_FX_SLOT_ID
            && guids::slot_index_for_guid(&guid).is_none()
        {
            return Err(SfError::invalid_value(format!("{guid} is not an fx slot id")));
        }
        *entry = guid;
    }
    props.active = active;
    Ok(())
}

pub fn get(call: &PropertyCall, props: &SourceProps, buf: &mut [u8]) -> SfResult<()> {
    if call.version == 1 {
        return match call.property {
            legacy_prop::ALL | legacy_prop::REVERBMIX => {
                Writer::new(buf).write_f32(props.reverb_mix)
            }
            other => {
                Err(SfError::invalid_operation(format!("unknown 1.0 buffer property {other}")))
            }
        };
    }
    let mut w = Writer::new(buf);
    match call.property {
        prop::NONE => Ok(()),
        prop::ALLPARAMETERS => get_all(call.version, props, &mut w),
        prop::OBSTRUCTIONPARAMETERS => {
            w.write_i32(props.obstruction_mb)?;
            w.write_f32(props.obstruction_lf_ratio)
        }
        prop::OCCLUSIONPARAMETERS => {
            w.write_i32(props.occlusion_mb)?;
            w.write_f32(props.occlusion_lf_ratio)?;
            w.write_f32(props.occlusion_room_ratio)?;
            w.write_f32(props.occlusion_direct_ratio)
        }
        prop::EXCLUSIONPARAMETERS => {
            w.write_i32(props.exclusion_mb)?;
            w.write_f32(props.exclusion_lf_ratio)
        }
        prop::DIRECT => w.write_i32(props.direct_mb),
        prop::DIRECTHF => w.write_i32(props.direct_hf_mb),
        prop::ROOM => w.write_i32(props.room_mb),
        prop::ROOMHF => w.write_i32(props.room_hf_mb),
        prop::OBSTRUCTION => w.write_i32(props.obstruction_mb),
        prop::OBSTRUCTIONLFRATIO => w.write_f32(props.obstruction_lf_ratio),
        prop::OCCLUSION => w.write_i32(props.occlusion_mb),
        prop::OCCLUSIONLFRATIO => w.write_f32(props.occlusion_lf_ratio),
        prop::OCCLUSIONROOMRATIO => w.write_f32(props.occlusion_room_ratio),
        prop::OCCLUSIONDIRECTRATIO => w.write_f32(props.occlusion_direct_ratio),
        prop::EXCLUSION => w.write_i32(props.exclusion_mb),
        prop::EXCLUSIONLFRATIO => w.write_f32(props.exclusion_lf_ratio),
        prop::OUTSIDEVOLUMEHF => w.write_i32(props.outside_volume_hf_mb),
        prop::DOPPLERFACTOR => w.write_f32(props.doppler_factor),
        prop::ROLLOFFFACTOR => w.write_f32(props.rolloff_factor),
        prop::ROOMROLLOFFFACTOR => w.write_f32(props.room_rolloff_factor),
        prop::AIRABSORPTIONFACTOR => w.write_f32(props.air_absorption_factor),
        prop::FLAGS => w.write_u32(props.flags),
        prop::ALLSENDPARAMETERS => {
            check_version(call, 4, "send parameters")?;
            for (index, send) in props.sends.iter().enumerate() {
                if w.remaining() < Guid::SIZE + 32 {
                    break;
                }
                w.write_guid(&guids::guid_for_slot_index(call.version, index))?;
                w.write_i32(send.send_mb)?;
                w.write_i32(send.send_hf_mb)?;
                w.write_i32(send.occlusion_mb)?;
                w.write_f32(send.occlusion_lf_ratio)?;
                w.write_f32(send.occlusion_room_ratio)?;
                w.write_f32(send.occlusion_direct_ratio)?;
                w.write_i32(send.exclusion_mb)?;
                w.write_f32(send.exclusion_lf_ratio)?;
            }
            Ok(())
        }
        prop::ACTIVEFXSLOTID => {
            check_version(call, 4, "active fx slot list")?;
            let count = (w.remaining() / Guid::SIZE).min(SLOT_COUNT);
            if count == 0 {
                return Err(SfError::invalid_value("payload too small for an fx slot id"));
            }
            for guid in props.active.iter().take(count) {
                w.write_guid(guid)?;
            }
            Ok(())
        }
        prop::MACROFXFACTOR => {
            check_version(call, 5, "macro FX factor")?;
            w.write_f32(props.macro_fx_factor)
        }
        prop::SENDPARAMETERS
        | prop::OCCLUSIONSENDPARAMETERS
        | prop::EXCLUSIONSENDPARAMETERS => Err(SfError::invalid_operation(
            "send sub-records are write-only; read the full send parameters",
        )),
        prop::SPEAKERLEVELS | prop::ALL2DPARAMETERS => Err(SfError::invalid_operation(
            "speaker-level properties are not supported by this renderer",
        )),
        other => Err(SfError::invalid_operation(format!("unknown source property {other}"))),
    }
}

fn get_all(version: u32, props: &SourceProps, w: &mut Writer) -> SfResult<()> {
    if version == 2 {
        w.write_i32(props.direct_mb)?;
        w.write_i32(props.direct_hf_mb)?;
        w.write_i32(props.room_mb)?;
        w.write_i32(props.room_hf_mb)?;
        w.write_f32(props.room_rolloff_factor)?;
        w.write_i32(props.obstruction_mb)?;
        w.write_f32(props.obstruction_lf_ratio)?;
        w.write_i32(props.occlusion_mb)?;
        w.write_f32(props.occlusion_lf_ratio)?;
        w.write_f32(props.occlusion_room_ratio)?;
        w.write_i32(props.outside_volume_hf_mb)?;
        w.write_f32(props.air_absorption_factor)?;
        return w.write_u32(props.flags);
    }
    w.write_i32(props.direct_mb)?;
    w.write_i32(props.direct_hf_mb)?;
    w.write_i32(props.room_mb)?;
    w.write_i32(props.room_hf_mb)?;
    w.write_i32(props.obstruction_mb)?;
    w.write_f32(props.obstruction_lf_ratio)?;
    w.write_i32(props.occlusion_mb)?;
    w.write_f32(props.occlusion_lf_ratio)?;
    w.write_f32(props.occlusion_room_ratio)?;
    w.write_f32(props.occlusion_direct_ratio)?;
    w.write_i32(props.exclusion_mb)?;
    w.write_f32(props.exclusion_lf_ratio)?;
    w.write_i32(props.outside_volume_hf_mb)?;
    w.write_f32(props.doppler_factor)?;
    w.write_f32(props.rolloff_factor)?;
    w.write_f32(props.room_rolloff_factor)?;
    w.write_f32(props.air_absorption_factor)?;
    w.write_u32(props.flags)?;
    if version >= 5 {
        w.write_f32(props.macro_fx_factor)?;
    }
    Ok(())
}

fn set_legacy(property: u32, props: &mut SourceProps, buf: &[u8]) -> SfResult<()> {
    match property {
        legacy_prop::ALL | legacy_prop::REVERBMIX => {
            let mix = Reader::new(buf).read_f32()?;
            props.reverb_mix = if mix == REVERB_MIX_USE_DISTANCE {
                mix
            } else {
                mix.clamp(0.0, 1.0)
            };
            Ok(())
        }
        other => Err(SfError::invalid_operation(format!("unknown 1.0 buffer property {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallTarget;

    fn source_call(version: u32, property: u32) -> PropertyCall {
        PropertyCall { version, target: CallTarget::Source, slot: None, property, deferred: false }
    }

    fn default_session() -> Session {
        Session::default()
    }

    #[test]
    fn scalars_clamp() {
        let context = Context::new();
        let mut props = SourceProps::default();
        let buf = (-20_000i32).to_le_bytes();
        set(&context, default_session(), &source_call(4, prop::OCCLUSION), &mut props, &buf)
            .unwrap();
        assert_eq!(props.occlusion_mb, MIN_ATTENUATION_MB);

        let buf = 5_000i32.to_le_bytes();
        set(&context, default_session(), &source_call(4, prop::ROOM), &mut props, &buf).unwrap();
        assert_eq!(props.room_mb, MAX_ROOM_MB);
    }

    #[test]
    fn flags_reserved_bits_by_version() {
        let context = Context::new();
        let mut props = SourceProps::default();
        let buf = FLAG_UPMIX.to_le_bytes();
        assert!(
            set(&context, default_session(), &source_call(4, prop::FLAGS), &mut props, &buf)
                .is_err()
        );
        set(&context, default_session(), &source_call(5, prop::FLAGS), &mut props, &buf).unwrap();
        assert_eq!(props.flags, FLAG_UPMIX);
    }

    #[test]
    fn send_parameters_resolve_slot_guids() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let mut props = SourceProps::default();

        let mut buf = Vec::new();
        buf.extend_from_slice(&guids::EAX4_FX_SLOT_1.to_bytes());
        buf.extend_from_slice(&(-1_200i32).to_le_bytes());
        buf.extend_from_slice(&(-300i32).to_le_bytes());
        set(
            &context,
            default_session(),
            &source_call(4, prop::SENDPARAMETERS),
            &mut props,
            &buf,
        )
        .unwrap();
        assert_eq!(props.sends[1].send_mb, -1_200);
        assert_eq!(props.sends[1].send_hf_mb, -300);
    }

    #[test]
    fn primary_marker_resolves_through_registry() {
        let context = Context::new();
        context.ensure_legacy_defaults();
        let mut props = SourceProps::default();

        let mut buf = Vec::new();
        buf.extend_from_slice(&guids::PRIMARY_FX_SLOT_ID.to_bytes());
        buf.extend_from_slice(&(-600i32).to_le_bytes());
        buf.extend_from_slice(&0i32.to_le_bytes());
        set(
            &context,
            default_session(),
            &source_call(4, prop::SENDPARAMETERS),
            &mut props,
            &buf,
        )
        .unwrap();
        // Primary defaults to slot 0.
        assert_eq!(props.sends[0].send_mb, -600);
    }

    #[test]
    fn active_slot_list_limit() {
        let context = Context::new();
        let mut props = SourceProps::default();
        let session = Session { version: 6, max_active_sends: 4 };

        let mut buf = Vec::new();
        for guid in
            [guids::EAX5_FX_SLOT_0, guids::EAX5_FX_SLOT_1, guids::EAX5_FX_SLOT_2]
        {
            buf.extend_from_slice(&guid.to_bytes());
        }
        // Three entries exceed the version-4 limit of two.
        assert!(
            set(&context, session, &source_call(4, prop::ACTIVEFXSLOTID), &mut props, &buf)
                .is_err()
        );
        set(&context, session, &source_call(5, prop::ACTIVEFXSLOTID), &mut props, &buf).unwrap();
        assert_eq!(props.active[0], guids::EAX5_FX_SLOT_0);
        assert_eq!(props.active[3], Guid::NULL);
    }

    #[test]
    fn send_gains_follow_active_list() {
        let props = SourceProps {
            sends: {
                let mut sends = [SendProps::default(); SLOT_COUNT];
                sends[0].send_mb = -2_000;
                sends[2].send_mb = -2_000;
                sends
            },
            active: [guids::EAX4_FX_SLOT_0, Guid::NULL, Guid::NULL, Guid::NULL],
            ..SourceProps::default()
        };
        let gains = props.send_gains(None);
        assert!((gains[0] - 0.1).abs() < 1e-6);
        // Slot 2 has a send level but is not active.
        assert_eq!(gains[2], 0.0);
    }

    #[test]
    fn all_parameters_round_trip() {
        let context = Context::new();
        let mut props = SourceProps::default();
        props.direct_mb = -123;
        props.doppler_factor = 2.0;
        props.macro_fx_factor = 0.5;

        let mut buf = [0u8; 76];
        get(&source_call(5, prop::ALLPARAMETERS), &props, &mut buf).unwrap();

        let mut decoded = SourceProps::default();
        set(
            &context,
            default_session(),
            &source_call(5, prop::ALLPARAMETERS),
            &mut decoded,
            &buf,
        )
        .unwrap();
        assert_eq!(decoded.direct_mb, -123);
        assert_eq!(decoded.doppler_factor, 2.0);
        assert_eq!(decoded.macro_fx_factor, 0.5);
    }

    #[test]
    fn legacy_reverb_mix() {
        let mut props = SourceProps::default();
        assert_eq!(props.reverb_mix, REVERB_MIX_USE_DISTANCE);
        let buf = 1.5f32.to_le_bytes();
        set_legacy(legacy_prop::REVERBMIX, &mut props, &buf).unwrap();
        assert_eq!(props.reverb_mix, 1.0);
    }
}
