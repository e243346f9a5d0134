//! End-to-End Property Surface Integration Tests
//!
//! Drives the byte-level entry points the way a legacy title would:
//! - environment presets through the 1.0 listener set
//! - deferred batches and the explicit commit
//! - slot management, locks, and routing guards
//! - per-source sends feeding the wet-path mixer

use std::sync::Arc;

use approx::assert_relative_eq;
use sf_core::{Guid, SLOT_COUNT, SfError, SlotIndex};
use sf_eax::{DEFERRED_FLAG, EAX_OK, EaxInterface};
use sf_eax::{
    EAXERR_INCOMPATIBLE_EAX_VERSION, EAXERR_INVALID_OPERATION, EAXERR_UNKNOWN_EFFECT,
    context_dispatch, guids, records, slot_dispatch, source,
};
use sf_fx::presets::REVERB_PRESETS;
use sf_fx::{EffectParams, EffectType, reverb};
use sf_slot::Context;

fn interface() -> EaxInterface {
    let _ = env_logger::builder().is_test(true).try_init();
    EaxInterface::new(Arc::new(Context::new()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT PRESETS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_legacy_environment_reaches_the_mixer() {
    let iface = interface();
    let view = iface.context().mixer_view();

    // 1.0 environment 3 is the bathroom preset.
    let buf = 3u32.to_le_bytes();
    assert_eq!(iface.eax_set(&guids::EAX1_LISTENER, 1, 0, &buf), EAX_OK);

    let snapshot = view.snapshot();
    let slot = &snapshot.slots[0];
    assert_eq!(slot.effect_type, EffectType::Reverb);
    match slot.params {
        EffectParams::Reverb(params) => {
            assert_eq!(params.decay_time, REVERB_PRESETS[3].decay_time);
            assert_eq!(params.environment, 3);
        }
        other => panic!("slot 0 is not a reverb: {other:?}"),
    }
}

#[test]
fn test_eax2_listener_ids_drive_the_reverb() {
    let iface = interface();

    // 2.0 id 5 is the decay time.
    let buf = 4.0f32.to_le_bytes();
    assert_eq!(iface.eax_set(&guids::EAX2_LISTENER, 5, 0, &buf), EAX_OK);

    let mut out = [0u8; 4];
    assert_eq!(
        iface.eax_get(&guids::EAX4_FX_SLOT_0, reverb::prop::DECAYTIME, 0, &mut out),
        EAX_OK
    );
    assert_eq!(f32::from_le_bytes(out), 4.0);
}

#[test]
fn test_effect_parameters_clamp_to_range() {
    let iface = interface();

    // Room level floors at -10000 mB.
    let buf = (-20_000i32).to_le_bytes();
    assert_eq!(
        iface.eax_set(&guids::EAX4_FX_SLOT_0, reverb::prop::ROOM, 0, &buf),
        EAX_OK
    );
    let mut out = [0u8; 4];
    iface.eax_get(&guids::EAX4_FX_SLOT_0, reverb::prop::ROOM, 0, &mut out);
    assert_eq!(i32::from_le_bytes(out), -10_000);
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEFERRED BATCHES
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_deferred_batch_commits_atomically() {
    let iface = interface();
    let view = iface.context().mixer_view();
    // Settle the default slot layout so the generation only moves for the
    // batch under test.
    assert_eq!(iface.eax_set(&guids::EAX4_CONTEXT, 0, 0, &[]), EAX_OK);
    let before = view.snapshot().generation;

    let decay = 6.0f32.to_le_bytes();
    let room = (-1_500i32).to_le_bytes();
    assert_eq!(
        iface.eax_set(
            &guids::EAX4_FX_SLOT_0,
            reverb::prop::DECAYTIME | DEFERRED_FLAG,
            0,
            &decay,
        ),
        EAX_OK
    );
    assert_eq!(
        iface.eax_set(&guids::EAX4_FX_SLOT_0, reverb::prop::ROOM | DEFERRED_FLAG, 0, &room),
        EAX_OK
    );

    // Nothing published yet.
    assert_eq!(view.snapshot().generation, before);

    // An immediate empty call is the commit; both writes land in one
    // generation step.
    assert_eq!(iface.eax_set(&guids::EAX4_CONTEXT, 0, 0, &[]), EAX_OK);
    let snapshot = view.snapshot();
    assert_eq!(snapshot.generation, before + 1);
    match snapshot.slots[0].params {
        EffectParams::Reverb(params) => {
            assert_eq!(params.decay_time, 6.0);
            assert_eq!(params.room, -1_500);
        }
        other => panic!("slot 0 is not a reverb: {other:?}"),
    }
}

#[test]
fn test_any_immediate_call_flushes_the_batch() {
    let iface = interface();
    let view = iface.context().mixer_view();

    let decay = 7.5f32.to_le_bytes();
    iface.eax_set(
        &guids::EAX4_FX_SLOT_0,
        reverb::prop::DECAYTIME | DEFERRED_FLAG,
        0,
        &decay,
    );

    // A plain immediate write elsewhere carries the deferred one with it.
    let factor = 2.0f32.to_le_bytes();
    assert_eq!(
        iface.eax_set(&guids::EAX4_CONTEXT, context_dispatch::prop::DISTANCEFACTOR, 0, &factor),
        EAX_OK
    );
    match view.snapshot().slots[0].params {
        EffectParams::Reverb(params) => assert_eq!(params.decay_time, 7.5),
        other => panic!("slot 0 is not a reverb: {other:?}"),
    }
    assert_eq!(view.snapshot().distance_factor, 2.0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SLOT MANAGEMENT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_listener_slots_stay_locked_until_version_5() {
    let iface = interface();
    let echo = guids::ECHO_EFFECT.to_bytes();

    // Slots 0 and 1 are reserved for the listener sets under version 4.
    assert_eq!(
        iface.eax_set(&guids::EAX4_FX_SLOT_0, slot_dispatch::prop::LOADEFFECT, 0, &echo),
        EAXERR_INVALID_OPERATION
    );
    assert_eq!(
        iface.eax_set(&guids::EAX4_FX_SLOT_1, slot_dispatch::prop::LOADEFFECT, 0, &echo),
        EAXERR_INVALID_OPERATION
    );
    // Slots 2 and 3 are free.
    assert_eq!(
        iface.eax_set(&guids::EAX4_FX_SLOT_2, slot_dispatch::prop::LOADEFFECT, 0, &echo),
        EAX_OK
    );

    // The first 5.0 call releases the reservation.
    assert_eq!(
        iface.eax_set(&guids::EAX5_FX_SLOT_0, slot_dispatch::prop::LOADEFFECT, 0, &echo),
        EAX_OK
    );
}

#[test]
fn test_unknown_effect_guid_is_rejected() {
    let iface = interface();
    let bogus = Guid::new(0xDEAD_BEEF, 1, 2, [3; 8]).to_bytes();
    assert_eq!(
        iface.eax_set(&guids::EAX4_FX_SLOT_2, slot_dispatch::prop::LOADEFFECT, 0, &bogus),
        EAXERR_UNKNOWN_EFFECT
    );
}

#[test]
fn test_slot_routing_rejects_cycles() {
    let iface = interface();
    let context = iface.context();
    context.ensure_legacy_defaults();

    context.set_slot_target(SlotIndex::SLOT_2, Some(SlotIndex::SLOT_3)).unwrap();
    assert!(context.set_slot_target(SlotIndex::SLOT_3, Some(SlotIndex::SLOT_2)).is_err());
    assert!(context.set_slot_target(SlotIndex::SLOT_2, Some(SlotIndex::SLOT_2)).is_err());
}

#[test]
fn test_attached_sources_are_reference_counted() {
    let iface = interface();
    let context = iface.context();
    context.ensure_legacy_defaults();

    context.attach_source(SlotIndex::SLOT_2).unwrap();
    context.attach_source(SlotIndex::SLOT_2).unwrap();
    assert!(matches!(
        context.delete_slot(SlotIndex::SLOT_2),
        Err(SfError::InvalidOperation(_))
    ));
    context.detach_source(SlotIndex::SLOT_2).unwrap();
    context.detach_source(SlotIndex::SLOT_2).unwrap();
    assert!(context.detach_source(SlotIndex::SLOT_2).is_err());

    context.delete_slot(SlotIndex::SLOT_2).unwrap();
    assert!(matches!(
        context.with_slot(SlotIndex::SLOT_2, |slot| Ok(slot.gain())),
        Err(SfError::InvalidName(_))
    ));
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT AND SESSION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_session_record_is_validated() {
    let iface = interface();

    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(&7u32.to_le_bytes());
    buf[4..].copy_from_slice(&2u32.to_le_bytes());
    assert_eq!(
        iface.eax_set(&guids::EAX5_CONTEXT, context_dispatch::prop::EAXSESSION, 0, &buf),
        EAXERR_INCOMPATIBLE_EAX_VERSION
    );

    buf[..4].copy_from_slice(&6u32.to_le_bytes());
    buf[4..].copy_from_slice(&4u32.to_le_bytes());
    assert_eq!(
        iface.eax_set(&guids::EAX5_CONTEXT, context_dispatch::prop::EAXSESSION, 0, &buf),
        EAX_OK
    );
}

#[test]
fn test_last_error_survives_until_read() {
    let iface = interface();
    let bogus = Guid::new(1, 2, 3, [4; 8]);
    iface.eax_set(&bogus, 0, 0, &[]);

    // A successful call in between does not clear it.
    let factor = 1.5f32.to_le_bytes();
    iface.eax_set(&guids::EAX4_CONTEXT, context_dispatch::prop::DISTANCEFACTOR, 0, &factor);

    let mut out = [0u8; 4];
    iface.eax_get(&guids::EAX4_CONTEXT, context_dispatch::prop::LASTERROR, 0, &mut out);
    assert_eq!(i32::from_le_bytes(out), EAXERR_INVALID_OPERATION);
    iface.eax_get(&guids::EAX4_CONTEXT, context_dispatch::prop::LASTERROR, 0, &mut out);
    assert_eq!(i32::from_le_bytes(out), EAX_OK);
}

#[test]
fn test_primary_slot_switches_by_guid() {
    let iface = interface();
    let buf = guids::EAX4_FX_SLOT_1.to_bytes();
    assert_eq!(
        iface.eax_set(&guids::EAX4_CONTEXT, context_dispatch::prop::PRIMARYFXSLOTID, 0, &buf),
        EAX_OK
    );
    assert_eq!(iface.context().primary_slot(), Some(SlotIndex::SLOT_1));
}

// ═══════════════════════════════════════════════════════════════════════════════
// SOURCE SENDS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_source_sends_feed_the_wet_path() {
    let iface = interface();
    const SOURCE: u32 = 11;

    // Route the source at slot 1 alongside the primary.
    let mut active = Vec::new();
    active.extend_from_slice(&guids::PRIMARY_FX_SLOT_ID.to_bytes());
    active.extend_from_slice(&guids::EAX4_FX_SLOT_1.to_bytes());
    assert_eq!(
        iface.eax_set(&guids::EAX4_SOURCE, source::prop::ACTIVEFXSLOTID, SOURCE, &active),
        EAX_OK
    );

    let mut send = Vec::new();
    send.extend_from_slice(&guids::EAX4_FX_SLOT_1.to_bytes());
    send.extend_from_slice(&(-2_000i32).to_le_bytes());
    send.extend_from_slice(&0i32.to_le_bytes());
    assert_eq!(
        iface.eax_set(&guids::EAX4_SOURCE, source::prop::SENDPARAMETERS, SOURCE, &send),
        EAX_OK
    );

    let gains = iface.send_gains(SOURCE);
    // Primary (slot 0) at the default full level, slot 1 at -2000 mB.
    assert_relative_eq!(gains[0], 1.0);
    assert_relative_eq!(gains[1], 0.1, epsilon = 1e-6);
    assert_eq!(gains[2], 0.0);
    assert_eq!(gains[3], 0.0);

    // Unknown handles report the default routing into the primary only.
    let defaults = iface.send_gains(999);
    assert_relative_eq!(defaults[0], 1.0);
    assert_eq!(defaults[1..], [0.0; SLOT_COUNT - 1]);
}

#[test]
fn test_source_record_round_trips_per_version() {
    let iface = interface();
    const SOURCE: u32 = 5;

    let mut record = [0u8; 76];
    {
        let mut w = records::Writer::new(&mut record);
        // direct, direct_hf, room, room_hf
        w.write_i32(-100).unwrap();
        w.write_i32(-200).unwrap();
        w.write_i32(-300).unwrap();
        w.write_i32(-400).unwrap();
        // obstruction pair, occlusion quad
        w.write_i32(-500).unwrap();
        w.write_f32(0.5).unwrap();
        w.write_i32(-600).unwrap();
        w.write_f32(0.4).unwrap();
        w.write_f32(1.2).unwrap();
        w.write_f32(0.8).unwrap();
        // exclusion pair
        w.write_i32(-700).unwrap();
        w.write_f32(0.9).unwrap();
        // outside volume, factors, flags, macro
        w.write_i32(-800).unwrap();
        w.write_f32(1.0).unwrap();
        w.write_f32(0.0).unwrap();
        w.write_f32(0.0).unwrap();
        w.write_f32(0.3).unwrap();
        w.write_u32(7).unwrap();
        w.write_f32(0.6).unwrap();
    }
    assert_eq!(
        iface.eax_set(&guids::EAX5_SOURCE, source::prop::ALLPARAMETERS, SOURCE, &record),
        EAX_OK
    );

    let mut out = [0u8; 76];
    assert_eq!(
        iface.eax_get(&guids::EAX5_SOURCE, source::prop::ALLPARAMETERS, SOURCE, &mut out),
        EAX_OK
    );
    assert_eq!(out, record);

    // The same state read through the 4.0 set drops the macro FX tail.
    let mut v4 = [0u8; 72];
    assert_eq!(
        iface.eax_get(&guids::EAX4_SOURCE, source::prop::ALLPARAMETERS, SOURCE, &mut v4),
        EAX_OK
    );
    assert_eq!(v4[..], record[..72]);
}
