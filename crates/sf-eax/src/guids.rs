//! Property-set and effect GUID constants
//!
//! Every identifier the legacy surface understands, transcribed from the
//! published headers. Routing is a `match` over these constants.

use sf_core::Guid;
use sf_fx::EffectType;

pub const NULL_GUID: Guid = Guid::NULL;

// Version 1 property sets (listener-wide reverb and per-buffer mix).
pub const EAX1_LISTENER: Guid =
    Guid::new(0x4A4E_6FC1, 0xC341, 0x11D1, [0xB7, 0x3A, 0x44, 0x45, 0x53, 0x54, 0x00, 0x00]);
pub const EAX1_BUFFER: Guid =
    Guid::new(0x4A4E_6FC0, 0xC341, 0x11D1, [0xB7, 0x3A, 0x44, 0x45, 0x53, 0x54, 0x00, 0x00]);

// Version 2 property sets.
pub const EAX2_LISTENER: Guid =
    Guid::new(0x0306_A6A8, 0xB224, 0x11D2, [0x99, 0xE5, 0x00, 0x00, 0xE8, 0xD8, 0xC7, 0x22]);
pub const EAX2_BUFFER: Guid =
    Guid::new(0x0306_A6A7, 0xB224, 0x11D2, [0x99, 0xE5, 0x00, 0x00, 0xE8, 0xD8, 0xC7, 0x22]);

// Version 3 property sets.
pub const EAX3_LISTENER: Guid =
    Guid::new(0xA8FA_6882, 0xB476, 0x11D3, [0xBD, 0xB9, 0x00, 0xC0, 0xF0, 0x2D, 0xDF, 0x87]);
pub const EAX3_BUFFER: Guid =
    Guid::new(0xA8FA_6881, 0xB476, 0x11D3, [0xBD, 0xB9, 0x00, 0xC0, 0xF0, 0x2D, 0xDF, 0x87]);

// Version 4 and 5 property sets.
pub const EAX4_CONTEXT: Guid =
    Guid::new(0x1D48_70AD, 0x0DEF, 0x43C0, [0xA4, 0x0C, 0x52, 0x36, 0x32, 0x29, 0x63, 0x42]);
pub const EAX5_CONTEXT: Guid =
    Guid::new(0x57E1_3437, 0xB932, 0x4AB2, [0xB8, 0xBD, 0x52, 0x66, 0xC1, 0xA8, 0x87, 0xEE]);

pub const EAX4_FX_SLOT_0: Guid =
    Guid::new(0xC4D7_9F1E, 0xF1AC, 0x436B, [0xA8, 0x1D, 0xA7, 0x38, 0xE7, 0x04, 0x54, 0x69]);
pub const EAX5_FX_SLOT_0: Guid =
    Guid::new(0x91F9_590F, 0xC388, 0x407A, [0x84, 0xB0, 0x1B, 0xAE, 0x0E, 0xF7, 0x1A, 0xBC]);
pub const EAX4_FX_SLOT_1: Guid =
    Guid::new(0x08C0_0E96, 0x74BE, 0x4491, [0x93, 0xAA, 0xE8, 0xAD, 0x35, 0xA4, 0x91, 0x17]);
pub const EAX5_FX_SLOT_1: Guid =
    Guid::new(0x8F5F_7ACA, 0x9608, 0x4965, [0x81, 0x37, 0x82, 0x13, 0xC7, 0xB9, 0xD9, 0xDE]);
pub const EAX4_FX_SLOT_2: Guid =
    Guid::new(0x1D43_3B88, 0xF0F6, 0x4637, [0x91, 0x9F, 0x60, 0xE7, 0xE0, 0x6B, 0x5E, 0xDD]);
pub const EAX5_FX_SLOT_2: Guid =
    Guid::new(0x3C0F_5252, 0x9834, 0x46F0, [0xA1, 0xD8, 0x5B, 0x95, 0xC4, 0xA0, 0x0A, 0x30]);
pub const EAX4_FX_SLOT_3: Guid =
    Guid::new(0xEFFF_08EA, 0xC7D8, 0x44AB, [0x93, 0xAD, 0x6D, 0xBD, 0x5F, 0x91, 0x00, 0x64]);
pub const EAX5_FX_SLOT_3: Guid =
    Guid::new(0xE2EB_0EAA, 0xE806, 0x45E7, [0x9F, 0x86, 0x06, 0xC1, 0x57, 0x1A, 0x6F, 0xA3]);

pub const EAX4_SOURCE: Guid =
    Guid::new(0x1B86_B823, 0x22DF, 0x4EAE, [0x8B, 0x3C, 0x12, 0x78, 0xCE, 0x54, 0x42, 0x27]);
pub const EAX5_SOURCE: Guid =
    Guid::new(0x5EDF_82F0, 0x24A7, 0x4F38, [0x8E, 0x64, 0x2F, 0x09, 0xCA, 0x05, 0xDE, 0xE1]);

/// Marker GUID naming "whatever the primary slot is" as a send target.
pub const PRIMARY_FX_SLOT_ID: Guid =
    Guid::new(0xF317_866D, 0x924C, 0x450C, [0x86, 0x1B, 0xE6, 0xDA, 0xA2, 0x5E, 0x7C, 0x20]);

/// Default primary slot identifier (slot 0, version 4 naming).
pub const DEFAULT_PRIMARY_FX_SLOT_ID: Guid = EAX4_FX_SLOT_0;

// Effect GUIDs accepted by the slot load-effect property.
pub const REVERB_EFFECT: Guid =
    Guid::new(0x0CF9_5C8F, 0xA3CC, 0x4849, [0xB0, 0xB6, 0x83, 0x2E, 0xCC, 0x18, 0x22, 0xDF]);
pub const AGC_COMPRESSOR_EFFECT: Guid =
    Guid::new(0xBFB7_A01E, 0x7825, 0x4039, [0x92, 0x7F, 0x03, 0xAA, 0xBD, 0xA0, 0xC5, 0x60]);
pub const AUTOWAH_EFFECT: Guid =
    Guid::new(0xEC31_30C0, 0xAC7A, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const CHORUS_EFFECT: Guid =
    Guid::new(0xDE6D_6FE0, 0xAC79, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const DISTORTION_EFFECT: Guid =
    Guid::new(0x975A_4CE0, 0xAC7E, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const ECHO_EFFECT: Guid =
    Guid::new(0x0E9F_1BC0, 0xAC82, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const EQUALIZER_EFFECT: Guid =
    Guid::new(0x65F9_4CE0, 0x9793, 0x11D3, [0x93, 0x9D, 0x00, 0xC0, 0xF0, 0x2D, 0xD6, 0xF0]);
pub const FLANGER_EFFECT: Guid =
    Guid::new(0xA700_07C0, 0x07D2, 0x11D3, [0x9B, 0x1E, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const FREQUENCY_SHIFTER_EFFECT: Guid =
    Guid::new(0xDC3E_1880, 0x9212, 0x11D3, [0x93, 0x9D, 0x00, 0xC0, 0xF0, 0x2D, 0xD6, 0xF0]);
pub const VOCAL_MORPHER_EFFECT: Guid =
    Guid::new(0xE41C_F10C, 0x3383, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const PITCH_SHIFTER_EFFECT: Guid =
    Guid::new(0xE790_5100, 0xAFB2, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);
pub const RING_MODULATOR_EFFECT: Guid =
    Guid::new(0x0B89_FE60, 0xAFB5, 0x11D2, [0x88, 0xDD, 0x00, 0xA0, 0x24, 0xD1, 0x3C, 0xE1]);

/// Map an effect GUID to its taxonomy type. The null GUID releases the
/// loaded effect.
pub fn effect_type_for_guid(guid: &Guid) -> Option<EffectType> {
    Some(match *guid {
        NULL_GUID => EffectType::None,
        REVERB_EFFECT => EffectType::Reverb,
        CHORUS_EFFECT => EffectType::Chorus,
        DISTORTION_EFFECT => EffectType::Distortion,
        ECHO_EFFECT => EffectType::Echo,
        EQUALIZER_EFFECT => EffectType::Equalizer,
        FLANGER_EFFECT => EffectType::Flanger,
        FREQUENCY_SHIFTER_EFFECT => EffectType::FrequencyShifter,
        VOCAL_MORPHER_EFFECT => EffectType::VocalMorpher,
        PITCH_SHIFTER_EFFECT => EffectType::PitchShifter,
        RING_MODULATOR_EFFECT => EffectType::RingModulator,
        AUTOWAH_EFFECT => EffectType::AutoWah,
        AGC_COMPRESSOR_EFFECT => EffectType::Compressor,
        _ => return None,
    })
}

/// The effect GUID reported for a taxonomy type.
pub fn guid_for_effect_type(effect_type: EffectType) -> Guid {
    match effect_type {
        EffectType::None => NULL_GUID,
        EffectType::Reverb => REVERB_EFFECT,
        EffectType::Chorus => CHORUS_EFFECT,
        EffectType::Distortion => DISTORTION_EFFECT,
        EffectType::Echo => ECHO_EFFECT,
        EffectType::Equalizer => EQUALIZER_EFFECT,
        EffectType::Flanger => FLANGER_EFFECT,
        EffectType::FrequencyShifter => FREQUENCY_SHIFTER_EFFECT,
        EffectType::VocalMorpher => VOCAL_MORPHER_EFFECT,
        EffectType::PitchShifter => PITCH_SHIFTER_EFFECT,
        EffectType::RingModulator => RING_MODULATOR_EFFECT,
        EffectType::AutoWah => AUTOWAH_EFFECT,
        EffectType::Compressor => AGC_COMPRESSOR_EFFECT,
    }
}

/// The slot GUID reported for an index, in the version's own family.
pub fn guid_for_slot_index(version: u32, index: usize) -> Guid {
    if version >= 5 {
        match index {
            0 => EAX5_FX_SLOT_0,
            1 => EAX5_FX_SLOT_1,
            2 => EAX5_FX_SLOT_2,
            _ => EAX5_FX_SLOT_3,
        }
    } else {
        match index {
            0 => EAX4_FX_SLOT_0,
            1 => EAX4_FX_SLOT_1,
            2 => EAX4_FX_SLOT_2,
            _ => EAX4_FX_SLOT_3,
        }
    }
}

/// Map a slot property-set GUID (either versioned family) to its index.
pub fn slot_index_for_guid(guid: &Guid) -> Option<usize> {
    Some(match *guid {
        EAX4_FX_SLOT_0 | EAX5_FX_SLOT_0 => 0,
        EAX4_FX_SLOT_1 | EAX5_FX_SLOT_1 => 1,
        EAX4_FX_SLOT_2 | EAX5_FX_SLOT_2 => 2,
        EAX4_FX_SLOT_3 | EAX5_FX_SLOT_3 => 3,
        _ => return None,
    })
}
