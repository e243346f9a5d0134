//! Millibel level math
//!
//! The legacy property surface expresses gains in millibels (mB, hundredths
//! of a decibel). The mixer works in linear amplitude. These conversions are
//! the single place the two unit systems meet.

/// Lowest level the legacy surface can express, treated as silence.
pub const SILENCE_MB: i32 = -10_000;

/// Convert a millibel level to a linear amplitude gain.
///
/// Levels at or below [`SILENCE_MB`] map to zero so a fully attenuated send
/// is truly silent rather than -100 dB of residue.
#[inline]
pub fn mb_to_gain(mb: i32) -> f32 {
    if mb <= SILENCE_MB {
        return 0.0;
    }
    10.0_f32.powf(mb as f32 / 2_000.0)
}

/// Convert a linear amplitude gain to a millibel level.
///
/// Non-positive gains map to [`SILENCE_MB`].
#[inline]
pub fn gain_to_mb(gain: f32) -> i32 {
    if gain <= 0.0 {
        return SILENCE_MB;
    }
    (2_000.0 * gain.log10()).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unity_is_zero_mb() {
        assert_relative_eq!(mb_to_gain(0), 1.0);
        assert_eq!(gain_to_mb(1.0), 0);
    }

    #[test]
    fn silence_floor() {
        assert_eq!(mb_to_gain(SILENCE_MB), 0.0);
        assert_eq!(mb_to_gain(-20_000), 0.0);
        assert_eq!(gain_to_mb(0.0), SILENCE_MB);
    }

    #[test]
    fn round_trip_mid_levels() {
        for mb in [-6_000, -2_602, -1_000, -100, -1] {
            let gain = mb_to_gain(mb);
            assert_eq!(gain_to_mb(gain), mb);
        }
    }
}
