//! Reverb environment preset tables
//!
//! Two parallel tables keyed by the same 26 environment indices: the full
//! parameter records used by the modern reverb model, and the legacy
//! four-value records (environment, volume, decay time, damping) used by the
//! oldest property sets. The legacy values are historical data, stored
//! verbatim and never derived from the full table.

use serde::{Deserialize, Serialize};

use crate::reverb::{DEFAULT_FLAGS, ReverbParams};

/// Named environment indices, in table order.
pub mod environment {
    pub const GENERIC: u32 = 0;
    pub const PADDED_CELL: u32 = 1;
    pub const ROOM: u32 = 2;
    pub const BATHROOM: u32 = 3;
    pub const LIVING_ROOM: u32 = 4;
    pub const STONE_ROOM: u32 = 5;
    pub const AUDITORIUM: u32 = 6;
    pub const CONCERT_HALL: u32 = 7;
    pub const CAVE: u32 = 8;
    pub const ARENA: u32 = 9;
    pub const HANGAR: u32 = 10;
    pub const CARPETED_HALLWAY: u32 = 11;
    pub const HALLWAY: u32 = 12;
    pub const STONE_CORRIDOR: u32 = 13;
    pub const ALLEY: u32 = 14;
    pub const FOREST: u32 = 15;
    pub const CITY: u32 = 16;
    pub const MOUNTAINS: u32 = 17;
    pub const QUARRY: u32 = 18;
    pub const PLAIN: u32 = 19;
    pub const PARKING_LOT: u32 = 20;
    pub const SEWER_PIPE: u32 = 21;
    pub const UNDERWATER: u32 = 22;
    pub const DRUGGED: u32 = 23;
    pub const DIZZY: u32 = 24;
    pub const PSYCHOTIC: u32 = 25;
}

/// A legacy four-value reverb record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyReverbParams {
    pub environment: u32,
    pub volume: f32,
    pub decay_time: f32,
    pub damping: f32,
}

#[allow(clippy::too_many_arguments)]
const fn preset(
    environment: u32,
    environment_size: f32,
    environment_diffusion: f32,
    room_hf: i32,
    decay_time: f32,
    decay_hf_ratio: f32,
    reflections: i32,
    reflections_delay: f32,
    reverb: i32,
    reverb_delay: f32,
    echo_time: f32,
    echo_depth: f32,
    modulation_time: f32,
    modulation_depth: f32,
    flags: u32,
) -> ReverbParams {
    ReverbParams {
        environment,
        environment_size,
        environment_diffusion,
        room: -1_000,
        room_hf,
        room_lf: 0,
        decay_time,
        decay_hf_ratio,
        decay_lf_ratio: 1.0,
        reflections,
        reflections_delay,
        reflections_pan: [0.0; 3],
        reverb,
        reverb_delay,
        reverb_pan: [0.0; 3],
        echo_time,
        echo_depth,
        modulation_time,
        modulation_depth,
        air_absorption_hf: -5.0,
        hf_reference: 5_000.0,
        lf_reference: 250.0,
        room_rolloff_factor: 0.0,
        flags,
    }
}

/// Full reverb records for the 26 named environments.
#[rustfmt::skip]
pub const REVERB_PRESETS: [ReverbParams; 26] = [
    preset(0, 7.5, 1.0, -100, 1.49, 0.83, -2_602, 0.007, 200, 0.011, 0.25, 0.0, 0.25, 0.0, DEFAULT_FLAGS),
    preset(1, 1.4, 1.0, -6_000, 0.17, 0.10, -1_204, 0.001, 207, 0.002, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(2, 1.9, 1.0, -454, 0.40, 0.83, -1_646, 0.002, 53, 0.003, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(3, 1.4, 1.0, -1_200, 1.49, 0.54, -370, 0.007, 1_030, 0.011, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(4, 2.5, 1.0, -6_000, 0.50, 0.10, -1_376, 0.003, -1_104, 0.004, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(5, 11.6, 1.0, -300, 2.31, 0.64, -711, 0.012, 83, 0.017, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(6, 21.6, 1.0, -476, 4.32, 0.59, -789, 0.020, -289, 0.030, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(7, 19.6, 1.0, -500, 3.92, 0.70, -1_230, 0.020, -2, 0.029, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(8, 14.6, 1.0, 0, 2.91, 1.30, -602, 0.015, -302, 0.022, 0.25, 0.0, 0.25, 0.0, 0x1F),
    preset(9, 36.2, 1.0, -698, 7.24, 0.33, -1_166, 0.020, 16, 0.030, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(10, 50.3, 1.0, -1_000, 10.05, 0.23, -602, 0.020, 198, 0.030, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(11, 1.9, 1.0, -4_000, 0.30, 0.10, -1_831, 0.002, -1_630, 0.030, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(12, 1.8, 1.0, -300, 1.49, 0.59, -1_219, 0.007, 441, 0.011, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(13, 13.5, 1.0, -237, 2.70, 0.79, -1_214, 0.013, 395, 0.020, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(14, 7.5, 0.300, -270, 1.49, 0.86, -1_204, 0.007, -4, 0.011, 0.125, 0.950, 0.25, 0.0, 0x3F),
    preset(15, 38.0, 0.300, -3_300, 1.49, 0.54, -2_560, 0.162, -229, 0.088, 0.125, 1.0, 0.25, 0.0, 0x3F),
    preset(16, 7.5, 0.500, -800, 1.49, 0.67, -2_273, 0.007, -1_691, 0.011, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(17, 100.0, 0.270, -2_500, 1.49, 0.21, -2_780, 0.300, -1_434, 0.100, 0.25, 1.0, 0.25, 0.0, 0x1F),
    preset(18, 17.5, 1.0, -1_000, 1.49, 0.83, -10_000, 0.061, 500, 0.025, 0.125, 0.700, 0.25, 0.0, 0x3F),
    preset(19, 42.5, 0.210, -2_000, 1.49, 0.50, -2_466, 0.179, -1_926, 0.100, 0.25, 1.0, 0.25, 0.0, 0x3F),
    preset(20, 8.3, 1.0, 0, 1.65, 1.50, -1_363, 0.008, -1_153, 0.012, 0.25, 0.0, 0.25, 0.0, 0x1F),
    preset(21, 1.7, 0.800, -1_000, 2.81, 0.14, 429, 0.014, 1_023, 0.021, 0.25, 0.0, 0.25, 0.0, 0x3F),
    preset(22, 1.8, 1.0, -4_000, 1.49, 0.10, -449, 0.007, 1_700, 0.011, 0.25, 0.0, 1.180, 0.348, 0x3F),
    preset(23, 1.9, 0.500, 0, 8.39, 1.39, -115, 0.002, 985, 0.030, 0.25, 0.0, 0.25, 1.0, 0x1F),
    preset(24, 1.8, 0.600, -400, 17.23, 0.56, -1_713, 0.020, -613, 0.030, 0.25, 1.0, 0.810, 0.310, 0x1F),
    preset(25, 1.0, 0.500, -151, 7.56, 0.91, -626, 0.020, 774, 0.030, 0.25, 0.0, 4.0, 1.0, 0x1F),
];

const fn legacy(environment: u32, volume: f32, decay_time: f32, damping: f32) -> LegacyReverbParams {
    LegacyReverbParams { environment, volume, decay_time, damping }
}

/// Legacy four-value records for the same 26 environments.
#[rustfmt::skip]
pub const LEGACY_REVERB_PRESETS: [LegacyReverbParams; 26] = [
    legacy(0, 0.5, 1.493, 0.5),
    legacy(1, 0.25, 0.1, 0.0),
    legacy(2, 0.417, 0.4, 0.666),
    legacy(3, 0.653, 1.499, 0.166),
    legacy(4, 0.208, 0.478, 0.0),
    legacy(5, 0.5, 2.309, 0.888),
    legacy(6, 0.403, 4.279, 0.5),
    legacy(7, 0.5, 3.961, 0.5),
    legacy(8, 0.5, 2.886, 1.304),
    legacy(9, 0.361, 7.284, 0.332),
    legacy(10, 0.5, 10.0, 0.3),
    legacy(11, 0.153, 0.259, 2.0),
    legacy(12, 0.361, 1.493, 0.0),
    legacy(13, 0.444, 2.697, 0.638),
    legacy(14, 0.25, 1.752, 0.776),
    legacy(15, 0.111, 3.145, 0.472),
    legacy(16, 0.111, 2.767, 0.224),
    legacy(17, 0.194, 7.841, 0.472),
    legacy(18, 1.0, 1.499, 0.5),
    legacy(19, 0.097, 2.767, 0.224),
    legacy(20, 0.208, 1.652, 1.5),
    legacy(21, 0.652, 2.886, 0.25),
    legacy(22, 1.0, 1.499, 0.0),
    legacy(23, 0.875, 8.392, 1.388),
    legacy(24, 0.139, 17.234, 0.666),
    legacy(25, 0.486, 7.563, 0.806),
];
