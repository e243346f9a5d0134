//! One auxiliary effect slot
//!
//! A slot owns an effect state plus its routing parameters: output gain,
//! auto-send flag, optional target slot, playback state and a reference
//! count of attached sources. The legacy bookkeeping (millibel volume, lock,
//! flags, occlusion, the four-value reverb record) lives here too so both
//! property surfaces observe one slot.

use sf_core::{SfError, SfResult, SlotIndex, mb_to_gain};
use sf_fx::presets::{LEGACY_REVERB_PRESETS, LegacyReverbParams};
use sf_fx::{EffectState, EffectType};

/// Slot playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Initial,
    Playing,
    Stopped,
}

/// Whether the loaded effect may be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLock {
    Unlocked,
    Locked,
}

/// Routes environment sends through this slot.
pub const FLAG_ENVIRONMENT: u32 = 0x0000_0001;
pub const FLAG_UPMIX: u32 = 0x0000_0002;
pub const FLAGS_RESERVED: u32 = !(FLAG_ENVIRONMENT | FLAG_UPMIX);

pub const MIN_VOLUME_MB: i32 = -10_000;
pub const MAX_VOLUME_MB: i32 = 0;
pub const DEFAULT_VOLUME_MB: i32 = 0;

pub const MIN_OCCLUSION_MB: i32 = -10_000;
pub const MAX_OCCLUSION_MB: i32 = 0;
pub const DEFAULT_OCCLUSION_MB: i32 = 0;

pub const MIN_OCCLUSION_LF_RATIO: f32 = 0.0;
pub const MAX_OCCLUSION_LF_RATIO: f32 = 1.0;
pub const DEFAULT_OCCLUSION_LF_RATIO: f32 = 0.25;

pub const DEFAULT_FLAGS: u32 = FLAG_ENVIRONMENT;

pub struct EffectSlot {
    index: SlotIndex,
    effect: EffectState,
    gain: f32,
    auto_send: bool,
    target: Option<SlotIndex>,
    playback: PlaybackState,
    ref_count: u32,
    volume_mb: i32,
    lock: SlotLock,
    flags: u32,
    occlusion_mb: i32,
    occlusion_lf_ratio: f32,
    legacy_reverb: LegacyReverbParams,
    dirty: bool,
}

impl EffectSlot {
    /// A fresh unlocked slot with no effect loaded.
    pub fn new(index: SlotIndex) -> Self {
        Self {
            index,
            effect: EffectState::new(),
            gain: 1.0,
            auto_send: true,
            target: None,
            playback: PlaybackState::Initial,
            ref_count: 0,
            volume_mb: DEFAULT_VOLUME_MB,
            lock: SlotLock::Unlocked,
            flags: DEFAULT_FLAGS,
            occlusion_mb: DEFAULT_OCCLUSION_MB,
            occlusion_lf_ratio: DEFAULT_OCCLUSION_LF_RATIO,
            legacy_reverb: LEGACY_REVERB_PRESETS[0],
            dirty: true,
        }
    }

    /// A slot carrying the legacy startup defaults: slot 0 runs a reverb and
    /// slot 1 a chorus, both locked; slots 2 and 3 start empty and unlocked.
    pub fn with_legacy_defaults(index: SlotIndex) -> Self {
        let mut slot = Self::new(index);
        match index.get() {
            0 => {
                slot.effect.set_type(EffectType::Reverb);
                slot.lock = SlotLock::Locked;
            }
            1 => {
                slot.effect.set_type(EffectType::Chorus);
                slot.lock = SlotLock::Locked;
            }
            _ => {}
        }
        slot
    }

    pub fn index(&self) -> SlotIndex {
        self.index
    }

    pub fn effect(&self) -> &EffectState {
        &self.effect
    }

    /// Mutable effect access; the caller is responsible for committing.
    pub fn effect_mut(&mut self) -> &mut EffectState {
        self.dirty = true;
        &mut self.effect
    }

    /// Replace the loaded effect type. Honors the slot lock.
    pub fn load_effect(&mut self, effect_type: EffectType) -> SfResult<()> {
        if self.lock == SlotLock::Locked && effect_type != self.effect.effect_type() {
            return Err(SfError::invalid_operation(format!(
                "slot {} is locked",
                self.index
            )));
        }
        self.effect.set_type(effect_type);
        self.dirty = true;
        Ok(())
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Output gain, silently clamped to `[0, 1]`.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
        self.dirty = true;
    }

    pub fn auto_send(&self) -> bool {
        self.auto_send
    }

    pub fn set_auto_send(&mut self, auto_send: bool) {
        self.auto_send = auto_send;
        if auto_send {
            self.flags |= FLAG_ENVIRONMENT;
        } else {
            self.flags &= !FLAG_ENVIRONMENT;
        }
        self.dirty = true;
    }

    pub fn target(&self) -> Option<SlotIndex> {
        self.target
    }

    /// Raw target write; cycle checking happens in the registry, which can
    /// see the whole chain.
    pub(crate) fn set_target_unchecked(&mut self, target: Option<SlotIndex>) {
        self.target = target;
        self.dirty = true;
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn play(&mut self) {
        self.playback = PlaybackState::Playing;
        self.dirty = true;
    }

    pub fn stop(&mut self) {
        self.playback = PlaybackState::Stopped;
        self.dirty = true;
    }

    pub fn reset_playback(&mut self) {
        self.playback = PlaybackState::Initial;
        self.dirty = true;
    }

    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }

    pub fn in_use(&self) -> bool {
        self.ref_count > 0
    }

    /// A source attached to this slot.
    pub fn acquire(&mut self) {
        self.ref_count += 1;
    }

    /// A source detached from this slot.
    pub fn release(&mut self) -> SfResult<()> {
        if self.ref_count == 0 {
            return Err(SfError::invalid_operation(format!(
                "slot {} has no attached sources",
                self.index
            )));
        }
        self.ref_count -= 1;
        Ok(())
    }

    pub fn volume_mb(&self) -> i32 {
        self.volume_mb
    }

    /// Legacy volume in millibels, clamped to its range; the linear gain
    /// follows it.
    pub fn set_volume_mb(&mut self, volume_mb: i32) {
        self.volume_mb = volume_mb.clamp(MIN_VOLUME_MB, MAX_VOLUME_MB);
        self.gain = mb_to_gain(self.volume_mb);
        self.dirty = true;
    }

    pub fn lock(&self) -> SlotLock {
        self.lock
    }

    pub fn set_lock(&mut self, lock: SlotLock) {
        self.lock = lock;
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    /// Legacy flags word; reserved bits are rejected. The environment bit
    /// doubles as the auto-send switch.
    pub fn set_flags(&mut self, flags: u32) -> SfResult<()> {
        if flags & FLAGS_RESERVED != 0 {
            return Err(SfError::invalid_value(format!(
                "slot flags {flags:#x} set reserved bits"
            )));
        }
        self.flags = flags;
        self.auto_send = flags & FLAG_ENVIRONMENT != 0;
        self.dirty = true;
        Ok(())
    }

    pub fn occlusion_mb(&self) -> i32 {
        self.occlusion_mb
    }

    pub fn set_occlusion_mb(&mut self, occlusion_mb: i32) {
        self.occlusion_mb = occlusion_mb.clamp(MIN_OCCLUSION_MB, MAX_OCCLUSION_MB);
        self.dirty = true;
    }

    pub fn occlusion_lf_ratio(&self) -> f32 {
        self.occlusion_lf_ratio
    }

    pub fn set_occlusion_lf_ratio(&mut self, ratio: f32) {
        self.occlusion_lf_ratio = ratio.clamp(MIN_OCCLUSION_LF_RATIO, MAX_OCCLUSION_LF_RATIO);
        self.dirty = true;
    }

    /// The four-value legacy reverb record, stored verbatim.
    pub fn legacy_reverb(&self) -> &LegacyReverbParams {
        &self.legacy_reverb
    }

    pub fn set_legacy_reverb(&mut self, record: LegacyReverbParams) {
        self.legacy_reverb = record;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.effect.is_dirty()
    }

    /// Commit the effect state and clear the slot's dirty mark. Returns
    /// whether anything changed.
    pub fn commit(&mut self) -> bool {
        let effect_changed = self.effect.commit();
        let changed = self.dirty || effect_changed;
        self.dirty = false;
        changed
    }
}

impl std::fmt::Debug for EffectSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectSlot")
            .field("index", &self.index)
            .field("effect", &self.effect.effect_type())
            .field("gain", &self.gain)
            .field("target", &self.target)
            .field("playback", &self.playback)
            .field("ref_count", &self.ref_count)
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}
