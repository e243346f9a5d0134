//! Little-endian wire codecs for the legacy records
//!
//! Every payload on the legacy surface is a packed little-endian struct.
//! `Reader` and `Writer` walk a caller-supplied byte buffer and fail with an
//! invalid-value error when it is shorter than the record; a longer buffer
//! is fine and the tail is left untouched.

use sf_core::{Guid, SfError, SfResult};
use sf_fx::presets::LegacyReverbParams;
use sf_fx::reverb::ReverbParams;
use sf_fx::{EffectParams, EffectType, Value, ValueKind};
use sf_slot::Session;

/// Sequential little-endian reads over a payload buffer.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> SfResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(SfError::invalid_value(format!(
                "payload too small: need {} bytes, got {}",
                self.pos + n,
                self.buf.len()
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn read_u32(&mut self) -> SfResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> SfResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&mut self) -> SfResult<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_vec3(&mut self) -> SfResult<[f32; 3]> {
        Ok([self.read_f32()?, self.read_f32()?, self.read_f32()?])
    }

    pub fn read_guid(&mut self) -> SfResult<Guid> {
        let b = self.take(Guid::SIZE)?;
        let mut bytes = [0u8; Guid::SIZE];
        bytes.copy_from_slice(b);
        Ok(Guid::from_bytes(&bytes))
    }
}

/// Sequential little-endian writes into a payload buffer.
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn written(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn put(&mut self, bytes: &[u8]) -> SfResult<()> {
        if self.buf.len() - self.pos < bytes.len() {
            return Err(SfError::invalid_value(format!(
                "payload too small: need {} bytes, got {}",
                self.pos + bytes.len(),
                self.buf.len()
            )));
        }
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> SfResult<()> {
        self.put(&v.to_le_bytes())
    }

    pub fn write_i32(&mut self, v: i32) -> SfResult<()> {
        self.put(&v.to_le_bytes())
    }

    pub fn write_f32(&mut self, v: f32) -> SfResult<()> {
        self.put(&v.to_le_bytes())
    }

    pub fn write_vec3(&mut self, v: [f32; 3]) -> SfResult<()> {
        for c in v {
            self.write_f32(c)?;
        }
        Ok(())
    }

    pub fn write_guid(&mut self, guid: &Guid) -> SfResult<()> {
        self.put(&guid.to_bytes())
    }
}

// ----------------------------------------------------------------------
// Single values
// ----------------------------------------------------------------------

/// Read one property value of the given kind from the front of a buffer.
pub fn read_value(kind: ValueKind, buf: &[u8]) -> SfResult<Value> {
    let mut r = Reader::new(buf);
    Ok(match kind {
        ValueKind::I32 => Value::I32(r.read_i32()?),
        ValueKind::U32 => Value::U32(r.read_u32()?),
        ValueKind::F32 => Value::F32(r.read_f32()?),
        ValueKind::Vec3 => Value::Vec3(r.read_vec3()?),
    })
}

/// Write one property value to the front of a buffer.
pub fn write_value(value: Value, buf: &mut [u8]) -> SfResult<()> {
    let mut w = Writer::new(buf);
    match value {
        Value::I32(v) => w.write_i32(v),
        Value::U32(v) => w.write_u32(v),
        Value::F32(v) => w.write_f32(v),
        Value::Vec3(v) => w.write_vec3(v),
    }
}

// ----------------------------------------------------------------------
// Effect all-parameters records
// ----------------------------------------------------------------------

/// Wire size of an effect's all-parameters record for an interface version.
pub fn effect_record_size(effect_type: EffectType, version: u32) -> Option<usize> {
    Some(match effect_type {
        EffectType::None => return None,
        EffectType::Reverb => {
            if version == 2 {
                56
            } else {
                112
            }
        }
        EffectType::Chorus | EffectType::Flanger | EffectType::VocalMorpher => 24,
        EffectType::Distortion | EffectType::Echo => 20,
        EffectType::Equalizer => 40,
        EffectType::FrequencyShifter | EffectType::RingModulator => 12,
        EffectType::PitchShifter => 8,
        EffectType::AutoWah => 16,
        EffectType::Compressor => 4,
    })
}

/// Decode an all-parameters payload for the given effect type. The 2.0
/// listener record only covers part of the reverb, so the missing fields are
/// carried over from `current`.
pub fn decode_effect_all(
    effect_type: EffectType,
    version: u32,
    current: &EffectParams,
    buf: &[u8],
) -> SfResult<EffectParams> {
    let mut r = Reader::new(buf);
    Ok(match effect_type {
        EffectType::None => {
            return Err(SfError::invalid_operation("no effect loaded"));
        }
        EffectType::Reverb => {
            let base = match current {
                EffectParams::Reverb(p) => *p,
                _ => ReverbParams::default(),
            };
            if version == 2 {
                EffectParams::Reverb(decode_eax2_listener(base, &mut r)?)
            } else {
                EffectParams::Reverb(decode_reverb(&mut r)?)
            }
        }
        EffectType::Chorus => EffectParams::Chorus(sf_fx::chorus::ChorusParams {
            waveform: r.read_u32()?,
            phase: r.read_i32()?,
            rate: r.read_f32()?,
            depth: r.read_f32()?,
            feedback: r.read_f32()?,
            delay: r.read_f32()?,
        }),
        EffectType::Distortion => EffectParams::Distortion(sf_fx::distortion::DistortionParams {
            edge: r.read_f32()?,
            gain: r.read_i32()?,
            lowpass_cutoff: r.read_f32()?,
            eq_center: r.read_f32()?,
            eq_bandwidth: r.read_f32()?,
        }),
        EffectType::Echo => EffectParams::Echo(sf_fx::echo::EchoParams {
            delay: r.read_f32()?,
            lr_delay: r.read_f32()?,
            damping: r.read_f32()?,
            feedback: r.read_f32()?,
            spread: r.read_f32()?,
        }),
        EffectType::Equalizer => EffectParams::Equalizer(sf_fx::equalizer::EqualizerParams {
            low_gain: r.read_i32()?,
            low_cutoff: r.read_f32()?,
            mid1_gain: r.read_i32()?,
            mid1_center: r.read_f32()?,
            mid1_width: r.read_f32()?,
            mid2_gain: r.read_i32()?,
            mid2_center: r.read_f32()?,
            mid2_width: r.read_f32()?,
            high_gain: r.read_i32()?,
            high_cutoff: r.read_f32()?,
        }),
        EffectType::Flanger => EffectParams::Flanger(sf_fx::flanger::FlangerParams {
            waveform: r.read_u32()?,
            phase: r.read_i32()?,
            rate: r.read_f32()?,
            depth: r.read_f32()?,
            feedback: r.read_f32()?,
            delay: r.read_f32()?,
        }),
        EffectType::FrequencyShifter => {
            EffectParams::FrequencyShifter(sf_fx::fshifter::FrequencyShifterParams {
                frequency: r.read_f32()?,
                left_direction: r.read_u32()?,
                right_direction: r.read_u32()?,
            })
        }
        EffectType::VocalMorpher => {
            EffectParams::VocalMorpher(sf_fx::vmorpher::VocalMorpherParams {
                phoneme_a: r.read_u32()?,
                phoneme_a_coarse_tuning: r.read_i32()?,
                phoneme_b: r.read_u32()?,
                phoneme_b_coarse_tuning: r.read_i32()?,
                waveform: r.read_u32()?,
                rate: r.read_f32()?,
            })
        }
        EffectType::PitchShifter => {
            EffectParams::PitchShifter(sf_fx::pshifter::PitchShifterParams {
                coarse_tune: r.read_i32()?,
                fine_tune: r.read_i32()?,
            })
        }
        EffectType::RingModulator => {
            EffectParams::RingModulator(sf_fx::modulator::RingModulatorParams {
                frequency: r.read_f32()?,
                highpass_cutoff: r.read_f32()?,
                waveform: r.read_u32()?,
            })
        }
        EffectType::AutoWah => EffectParams::AutoWah(sf_fx::autowah::AutoWahParams {
            attack_time: r.read_f32()?,
            release_time: r.read_f32()?,
            resonance: r.read_i32()?,
            peak_level: r.read_i32()?,
        }),
        EffectType::Compressor => {
            EffectParams::Compressor(sf_fx::compressor::CompressorParams { on_off: r.read_u32()? })
        }
    })
}

/// Encode an all-parameters record; returns the number of bytes written.
pub fn encode_effect_all(params: &EffectParams, version: u32, buf: &mut [u8]) -> SfResult<usize> {
    let mut w = Writer::new(buf);
    match params {
        EffectParams::None => {
            return Err(SfError::invalid_operation("no effect loaded"));
        }
        EffectParams::Reverb(p) => {
            if version == 2 {
                encode_eax2_listener(p, &mut w)?;
            } else {
                encode_reverb(p, &mut w)?;
            }
        }
        EffectParams::Chorus(p) => {
            w.write_u32(p.waveform)?;
            w.write_i32(p.phase)?;
            w.write_f32(p.rate)?;
            w.write_f32(p.depth)?;
            w.write_f32(p.feedback)?;
            w.write_f32(p.delay)?;
        }
        EffectParams::Distortion(p) => {
            w.write_f32(p.edge)?;
            w.write_i32(p.gain)?;
            w.write_f32(p.lowpass_cutoff)?;
            w.write_f32(p.eq_center)?;
            w.write_f32(p.eq_bandwidth)?;
        }
        EffectParams::Echo(p) => {
            w.write_f32(p.delay)?;
            w.write_f32(p.lr_delay)?;
            w.write_f32(p.damping)?;
            w.write_f32(p.feedback)?;
            w.write_f32(p.spread)?;
        }
        EffectParams::Equalizer(p) => {
            w.write_i32(p.low_gain)?;
            w.write_f32(p.low_cutoff)?;
            w.write_i32(p.mid1_gain)?;
            w.write_f32(p.mid1_center)?;
            w.write_f32(p.mid1_width)?;
            w.write_i32(p.mid2_gain)?;
            w.write_f32(p.mid2_center)?;
            w.write_f32(p.mid2_width)?;
            w.write_i32(p.high_gain)?;
            w.write_f32(p.high_cutoff)?;
        }
        EffectParams::Flanger(p) => {
            w.write_u32(p.waveform)?;
            w.write_i32(p.phase)?;
            w.write_f32(p.rate)?;
            w.write_f32(p.depth)?;
            w.write_f32(p.feedback)?;
            w.write_f32(p.delay)?;
        }
        EffectParams::FrequencyShifter(p) => {
            w.write_f32(p.frequency)?;
            w.write_u32(p.left_direction)?;
            w.write_u32(p.right_direction)?;
        }
        EffectParams::VocalMorpher(p) => {
            w.write_u32(p.phoneme_a)?;
            w.write_i32(p.phoneme_a_coarse_tuning)?;
            w.write_u32(p.phoneme_b)?;
            w.write_i32(p.phoneme_b_coarse_tuning)?;
            w.write_u32(p.waveform)?;
            w.write_f32(p.rate)?;
        }
        EffectParams::PitchShifter(p) => {
            w.write_i32(p.coarse_tune)?;
            w.write_i32(p.fine_tune)?;
        }
        EffectParams::RingModulator(p) => {
            w.write_f32(p.frequency)?;
            w.write_f32(p.highpass_cutoff)?;
            w.write_u32(p.waveform)?;
        }
        EffectParams::AutoWah(p) => {
            w.write_f32(p.attack_time)?;
            w.write_f32(p.release_time)?;
            w.write_i32(p.resonance)?;
            w.write_i32(p.peak_level)?;
        }
        EffectParams::Compressor(p) => {
            w.write_u32(p.on_off)?;
        }
    }
    Ok(w.written())
}

fn decode_reverb(r: &mut Reader) -> SfResult<ReverbParams> {
    Ok(ReverbParams {
        environment: r.read_u32()?,
        environment_size: r.read_f32()?,
        environment_diffusion: r.read_f32()?,
        room: r.read_i32()?,
        room_hf: r.read_i32()?,
        room_lf: r.read_i32()?,
        decay_time: r.read_f32()?,
        decay_hf_ratio: r.read_f32()?,
        decay_lf_ratio: r.read_f32()?,
        reflections: r.read_i32()?,
        reflections_delay: r.read_f32()?,
        reflections_pan: r.read_vec3()?,
        reverb: r.read_i32()?,
        reverb_delay: r.read_f32()?,
        reverb_pan: r.read_vec3()?,
        echo_time: r.read_f32()?,
        echo_depth: r.read_f32()?,
        modulation_time: r.read_f32()?,
        modulation_depth: r.read_f32()?,
        air_absorption_hf: r.read_f32()?,
        hf_reference: r.read_f32()?,
        lf_reference: r.read_f32()?,
        room_rolloff_factor: r.read_f32()?,
        flags: r.read_u32()?,
    })
}

fn encode_reverb(p: &ReverbParams, w: &mut Writer) -> SfResult<()> {
    w.write_u32(p.environment)?;
    w.write_f32(p.environment_size)?;
    w.write_f32(p.environment_diffusion)?;
    w.write_i32(p.room)?;
    w.write_i32(p.room_hf)?;
    w.write_i32(p.room_lf)?;
    w.write_f32(p.decay_time)?;
    w.write_f32(p.decay_hf_ratio)?;
    w.write_f32(p.decay_lf_ratio)?;
    w.write_i32(p.reflections)?;
    w.write_f32(p.reflections_delay)?;
    w.write_vec3(p.reflections_pan)?;
    w.write_i32(p.reverb)?;
    w.write_f32(p.reverb_delay)?;
    w.write_vec3(p.reverb_pan)?;
    w.write_f32(p.echo_time)?;
    w.write_f32(p.echo_depth)?;
    w.write_f32(p.modulation_time)?;
    w.write_f32(p.modulation_depth)?;
    w.write_f32(p.air_absorption_hf)?;
    w.write_f32(p.hf_reference)?;
    w.write_f32(p.lf_reference)?;
    w.write_f32(p.room_rolloff_factor)?;
    w.write_u32(p.flags)
}

// The 2.0 listener record covers 14 of the reverb's fields in its own order.
fn decode_eax2_listener(mut base: ReverbParams, r: &mut Reader) -> SfResult<ReverbParams> {
    base.room = r.read_i32()?;
    base.room_hf = r.read_i32()?;
    base.room_rolloff_factor = r.read_f32()?;
    base.decay_time = r.read_f32()?;
    base.decay_hf_ratio = r.read_f32()?;
    base.reflections = r.read_i32()?;
    base.reflections_delay = r.read_f32()?;
    base.reverb = r.read_i32()?;
    base.reverb_delay = r.read_f32()?;
    base.environment = r.read_u32()?;
    base.environment_size = r.read_f32()?;
    base.environment_diffusion = r.read_f32()?;
    base.air_absorption_hf = r.read_f32()?;
    base.flags = r.read_u32()?;
    Ok(base)
}

fn encode_eax2_listener(p: &ReverbParams, w: &mut Writer) -> SfResult<()> {
    w.write_i32(p.room)?;
    w.write_i32(p.room_hf)?;
    w.write_f32(p.room_rolloff_factor)?;
    w.write_f32(p.decay_time)?;
    w.write_f32(p.decay_hf_ratio)?;
    w.write_i32(p.reflections)?;
    w.write_f32(p.reflections_delay)?;
    w.write_i32(p.reverb)?;
    w.write_f32(p.reverb_delay)?;
    w.write_u32(p.environment)?;
    w.write_f32(p.environment_size)?;
    w.write_f32(p.environment_diffusion)?;
    w.write_f32(p.air_absorption_hf)?;
    w.write_u32(p.flags)
}

// ----------------------------------------------------------------------
// Legacy four-value reverb record
// ----------------------------------------------------------------------

pub const LEGACY_REVERB_SIZE: usize = 16;

pub fn decode_legacy_reverb(buf: &[u8]) -> SfResult<LegacyReverbParams> {
    let mut r = Reader::new(buf);
    Ok(LegacyReverbParams {
        environment: r.read_u32()?,
        volume: r.read_f32()?,
        decay_time: r.read_f32()?,
        damping: r.read_f32()?,
    })
}

pub fn encode_legacy_reverb(p: &LegacyReverbParams, buf: &mut [u8]) -> SfResult<usize> {
    let mut w = Writer::new(buf);
    w.write_u32(p.environment)?;
    w.write_f32(p.volume)?;
    w.write_f32(p.decay_time)?;
    w.write_f32(p.damping)?;
    Ok(w.written())
}

// ----------------------------------------------------------------------
// Fx-slot and context records
// ----------------------------------------------------------------------

/// The fx-slot all-parameters record. Version 4 stops after the flags; the
/// occlusion pair is a 5.0 addition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FxSlotRecord {
    pub effect_guid: Guid,
    pub volume_mb: i32,
    pub lock: i32,
    pub flags: u32,
    pub occlusion_mb: i32,
    pub occlusion_lf_ratio: f32,
}

pub fn decode_fx_slot_all(version: u32, buf: &[u8]) -> SfResult<FxSlotRecord> {
    let mut r = Reader::new(buf);
    let mut record = FxSlotRecord {
        effect_guid: r.read_guid()?,
        volume_mb: r.read_i32()?,
        lock: r.read_i32()?,
        flags: r.read_u32()?,
        occlusion_mb: 0,
        occlusion_lf_ratio: 0.25,
    };
    if version >= 5 {
        record.occlusion_mb = r.read_i32()?;
        record.occlusion_lf_ratio = r.read_f32()?;
    }
    Ok(record)
}

pub fn encode_fx_slot_all(record: &FxSlotRecord, version: u32, buf: &mut [u8]) -> SfResult<usize> {
    let mut w = Writer::new(buf);
    w.write_guid(&record.effect_guid)?;
    w.write_i32(record.volume_mb)?;
    w.write_i32(record.lock)?;
    w.write_u32(record.flags)?;
    if version >= 5 {
        w.write_i32(record.occlusion_mb)?;
        w.write_f32(record.occlusion_lf_ratio)?;
    }
    Ok(w.written())
}

/// The context all-parameters record. The macro FX factor is 5.0-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextRecord {
    pub primary_guid: Guid,
    pub distance_factor: f32,
    pub air_absorption_hf: f32,
    pub hf_reference: f32,
    pub macro_fx_factor: f32,
}

pub fn decode_context_all(version: u32, buf: &[u8]) -> SfResult<ContextRecord> {
    let mut r = Reader::new(buf);
    let mut record = ContextRecord {
        primary_guid: r.read_guid()?,
        distance_factor: r.read_f32()?,
        air_absorption_hf: r.read_f32()?,
        hf_reference: r.read_f32()?,
        macro_fx_factor: 0.0,
    };
    if version >= 5 {
        record.macro_fx_factor = r.read_f32()?;
    }
    Ok(record)
}

pub fn encode_context_all(record: &ContextRecord, version: u32, buf: &mut [u8]) -> SfResult<usize> {
    let mut w = Writer::new(buf);
    w.write_guid(&record.primary_guid)?;
    w.write_f32(record.distance_factor)?;
    w.write_f32(record.air_absorption_hf)?;
    w.write_f32(record.hf_reference)?;
    if version >= 5 {
        w.write_f32(record.macro_fx_factor)?;
    }
    Ok(w.written())
}

pub fn decode_session(buf: &[u8]) -> SfResult<Session> {
    let mut r = Reader::new(buf);
    Ok(Session { version: r.read_u32()?, max_active_sends: r.read_u32()? })
}

pub fn encode_session(session: &Session, buf: &mut [u8]) -> SfResult<usize> {
    let mut w = Writer::new(buf);
    w.write_u32(session.version)?;
    w.write_u32(session.max_active_sends)?;
    Ok(w.written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_fx::presets::REVERB_PRESETS;
    use sf_slot::context::SESSION_VERSION_4;

    #[test]
    fn reverb_record_is_112_bytes() {
        let params = EffectParams::Reverb(REVERB_PRESETS[3]);
        let mut buf = [0u8; 128];
        let written = encode_effect_all(&params, 4, &mut buf).unwrap();
        assert_eq!(written, 112);
        assert_eq!(effect_record_size(EffectType::Reverb, 4), Some(112));

        let decoded = decode_effect_all(EffectType::Reverb, 4, &EffectParams::None, &buf).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn eax2_listener_record_keeps_unlisted_fields() {
        let bathroom = REVERB_PRESETS[3];
        let mut buf = [0u8; 56];
        encode_effect_all(&EffectParams::Reverb(bathroom), 2, &mut buf).unwrap();
        assert_eq!(effect_record_size(EffectType::Reverb, 2), Some(56));

        let generic = EffectParams::Reverb(REVERB_PRESETS[0]);
        let decoded = match decode_effect_all(EffectType::Reverb, 2, &generic, &buf).unwrap() {
            EffectParams::Reverb(p) => p,
            other => panic!("unexpected params {other:?}"),
        };
        assert_eq!(decoded.decay_time, bathroom.decay_time);
        assert_eq!(decoded.room_hf, bathroom.room_hf);
        // Fields the 2.0 record does not carry stay as they were.
        assert_eq!(decoded.lf_reference, REVERB_PRESETS[0].lf_reference);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let params = EffectParams::Reverb(REVERB_PRESETS[0]);
        let mut buf = [0u8; 60];
        assert!(encode_effect_all(&params, 4, &mut buf).is_err());
        assert!(decode_effect_all(EffectType::Reverb, 4, &params, &buf[..40]).is_err());
    }

    #[test]
    fn fx_slot_record_sizes_by_version() {
        let record = FxSlotRecord {
            effect_guid: crate::guids::REVERB_EFFECT,
            volume_mb: -600,
            lock: 1,
            flags: 1,
            occlusion_mb: -500,
            occlusion_lf_ratio: 0.5,
        };
        let mut buf = [0u8; 64];
        assert_eq!(encode_fx_slot_all(&record, 4, &mut buf).unwrap(), 28);
        assert_eq!(encode_fx_slot_all(&record, 5, &mut buf).unwrap(), 36);

        let v4 = decode_fx_slot_all(4, &buf[..28]).unwrap();
        assert_eq!(v4.volume_mb, -600);
        assert_eq!(v4.occlusion_mb, 0);

        let v5 = decode_fx_slot_all(5, &buf).unwrap();
        assert_eq!(v5.occlusion_mb, -500);
    }

    #[test]
    fn session_round_trip() {
        let session = Session { version: SESSION_VERSION_4, max_active_sends: 3 };
        let mut buf = [0u8; 8];
        assert_eq!(encode_session(&session, &mut buf).unwrap(), 8);
        assert_eq!(decode_session(&buf).unwrap(), session);
    }

    #[test]
    fn value_codecs() {
        let mut buf = [0u8; 12];
        write_value(Value::Vec3([1.0, 2.0, 3.0]), &mut buf).unwrap();
        assert_eq!(
            read_value(ValueKind::Vec3, &buf).unwrap(),
            Value::Vec3([1.0, 2.0, 3.0])
        );
        assert!(read_value(ValueKind::U32, &buf[..2]).is_err());
    }
}
