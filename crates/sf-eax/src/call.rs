//! Property-call decoding
//!
//! A legacy call arrives as a property-set GUID plus a property id. Decoding
//! resolves the interface version, the addressed object (context, fx slot,
//! the slot's loaded effect, or a source), the slot index where one applies,
//! and strips the deferred bit. Calls through the 2.0 property sets carry
//! 2.0 property ids; those are translated to the 3.0+ numbering here so the
//! dispatchers only ever see one id space.

use sf_core::{Guid, SfError, SfResult, SlotIndex};
use sf_fx::reverb;

use crate::{guids, slot_dispatch, source};

/// High bit of a property id: apply at the next commit instead of now.
pub const DEFERRED_FLAG: u32 = 0x8000_0000;

/// What a decoded call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallTarget {
    Context,
    FxSlot,
    FxSlotEffect,
    Source,
}

/// One decoded legacy property call.
#[derive(Debug, Clone, Copy)]
pub struct PropertyCall {
    pub version: u32,
    pub target: CallTarget,
    pub slot: Option<SlotIndex>,
    pub property: u32,
    pub deferred: bool,
}

impl PropertyCall {
    /// Decode a property-set GUID and property id into a routed call.
    pub fn decode(property_set: &Guid, property_id: u32) -> SfResult<Self> {
        let deferred = property_id & DEFERRED_FLAG != 0;
        let property = property_id & !DEFERRED_FLAG;

        let (version, target, slot) = match *property_set {
            guids::EAX1_LISTENER => (1, CallTarget::FxSlotEffect, Some(SlotIndex::SLOT_0)),
            guids::EAX1_BUFFER => (1, CallTarget::Source, None),
            guids::EAX2_LISTENER => (2, CallTarget::FxSlotEffect, Some(SlotIndex::SLOT_0)),
            guids::EAX2_BUFFER => (2, CallTarget::Source, None),
            guids::EAX3_LISTENER => (3, CallTarget::FxSlotEffect, Some(SlotIndex::SLOT_0)),
            guids::EAX3_BUFFER => (3, CallTarget::Source, None),
            guids::EAX4_CONTEXT => (4, CallTarget::Context, None),
            guids::EAX5_CONTEXT => (5, CallTarget::Context, None),
            guids::EAX4_SOURCE => (4, CallTarget::Source, None),
            guids::EAX5_SOURCE => (5, CallTarget::Source, None),
            other => {
                let index = guids::slot_index_for_guid(&other).ok_or_else(|| {
                    SfError::invalid_operation(format!("unsupported property set {other}"))
                })?;
                let version = match other {
                    guids::EAX4_FX_SLOT_0
                    | guids::EAX4_FX_SLOT_1
                    | guids::EAX4_FX_SLOT_2
                    | guids::EAX4_FX_SLOT_3 => 4,
                    _ => 5,
                };
                // Ids below the fx-slot range address the slot's loaded
                // effect rather than the slot itself.
                let target = if property < slot_dispatch::prop::NONE {
                    CallTarget::FxSlotEffect
                } else {
                    CallTarget::FxSlot
                };
                (version, target, Some(SlotIndex::new(index)?))
            }
        };

        let property = match (version, target) {
            (2, CallTarget::FxSlotEffect) => translate_eax2_listener(property)?,
            (2, CallTarget::Source) => translate_eax2_source(property)?,
            _ => property,
        };

        Ok(Self { version, target, slot, property, deferred })
    }

    /// Whether the call carries a payload. Property id zero (or the fx-slot
    /// "none" id) is a valid empty call used to trigger a commit.
    pub fn needs_buffer(&self) -> bool {
        match self.target {
            CallTarget::FxSlot => self.property != slot_dispatch::prop::NONE,
            _ => self.property != 0,
        }
    }
}

/// Map a 2.0 listener property id onto the 3.0+ reverb numbering.
fn translate_eax2_listener(property: u32) -> SfResult<u32> {
    Ok(match property {
        0 => reverb::prop::NONE,
        1 => reverb::prop::ALLPARAMETERS,
        2 => reverb::prop::ROOM,
        3 => reverb::prop::ROOMHF,
        4 => reverb::prop::ROOMROLLOFFFACTOR,
        5 => reverb::prop::DECAYTIME,
        6 => reverb::prop::DECAYHFRATIO,
        7 => reverb::prop::REFLECTIONS,
        8 => reverb::prop::REFLECTIONSDELAY,
        9 => reverb::prop::REVERB,
        10 => reverb::prop::REVERBDELAY,
        11 => reverb::prop::ENVIRONMENT,
        12 => reverb::prop::ENVIRONMENTSIZE,
        13 => reverb::prop::ENVIRONMENTDIFFUSION,
        14 => reverb::prop::AIRABSORPTIONHF,
        15 => reverb::prop::FLAGS,
        other => {
            return Err(SfError::invalid_value(format!("unknown 2.0 listener property {other}")));
        }
    })
}

/// Map a 2.0 buffer property id onto the 3.0+ source numbering.
fn translate_eax2_source(property: u32) -> SfResult<u32> {
    Ok(match property {
        0 => source::prop::NONE,
        1 => source::prop::ALLPARAMETERS,
        2 => source::prop::DIRECT,
        3 => source::prop::DIRECTHF,
        4 => source::prop::ROOM,
        5 => source::prop::ROOMHF,
        6 => source::prop::ROOMROLLOFFFACTOR,
        7 => source::prop::OBSTRUCTION,
        8 => source::prop::OBSTRUCTIONLFRATIO,
        9 => source::prop::OCCLUSION,
        10 => source::prop::OCCLUSIONLFRATIO,
        11 => source::prop::OCCLUSIONROOMRATIO,
        12 => source::prop::OUTSIDEVOLUMEHF,
        13 => source::prop::AIRABSORPTIONFACTOR,
        14 => source::prop::FLAGS,
        other => {
            return Err(SfError::invalid_value(format!("unknown 2.0 buffer property {other}")));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_bit_is_stripped() {
        let call = PropertyCall::decode(
            &guids::EAX4_FX_SLOT_0,
            reverb::prop::DECAYTIME | DEFERRED_FLAG,
        )
        .unwrap();
        assert!(call.deferred);
        assert_eq!(call.property, reverb::prop::DECAYTIME);
        assert_eq!(call.target, CallTarget::FxSlotEffect);
        assert_eq!(call.slot, Some(SlotIndex::SLOT_0));
    }

    #[test]
    fn fx_slot_ids_split_slot_and_effect() {
        let effect =
            PropertyCall::decode(&guids::EAX5_FX_SLOT_2, reverb::prop::ROOM).unwrap();
        assert_eq!(effect.target, CallTarget::FxSlotEffect);
        assert_eq!(effect.version, 5);
        assert_eq!(effect.slot, Some(SlotIndex::SLOT_2));

        let slot =
            PropertyCall::decode(&guids::EAX4_FX_SLOT_1, slot_dispatch::prop::VOLUME).unwrap();
        assert_eq!(slot.target, CallTarget::FxSlot);
        assert_eq!(slot.version, 4);
        assert_eq!(slot.slot, Some(SlotIndex::SLOT_1));
    }

    #[test]
    fn eax2_listener_ids_are_translated() {
        // 2.0 id 5 is decay time; untranslated it would read as room.
        let call = PropertyCall::decode(&guids::EAX2_LISTENER, 5).unwrap();
        assert_eq!(call.version, 2);
        assert_eq!(call.property, reverb::prop::DECAYTIME);

        let call = PropertyCall::decode(&guids::EAX2_BUFFER, 4).unwrap();
        assert_eq!(call.property, source::prop::ROOM);

        assert!(PropertyCall::decode(&guids::EAX2_LISTENER, 99).is_err());
    }

    #[test]
    fn unknown_property_set_is_rejected() {
        let bogus = Guid::new(0x0102_0304, 5, 6, [7; 8]);
        assert!(PropertyCall::decode(&bogus, 0).is_err());
    }

    #[test]
    fn empty_calls_need_no_buffer() {
        let commit = PropertyCall::decode(&guids::EAX4_CONTEXT, 0).unwrap();
        assert!(!commit.needs_buffer());
        let none =
            PropertyCall::decode(&guids::EAX4_FX_SLOT_0, slot_dispatch::prop::NONE).unwrap();
        assert!(!none.needs_buffer());
        let set = PropertyCall::decode(&guids::EAX4_CONTEXT, 3).unwrap();
        assert!(set.needs_buffer());
    }
}
