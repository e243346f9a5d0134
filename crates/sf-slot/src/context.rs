//! Context state and the commit pipeline
//!
//! The context owns the slot registry and the context-level properties
//! behind one mutex, serializing every property write. Reads and writes go
//! to shadow state; `commit` publishes shadow to live, bumps the commit
//! generation and hands a fresh snapshot to the mix thread through the
//! triple buffer.
//!
//! Deferred mode only changes who calls `commit`: with updates deferred the
//! caller batches writes and commits once, otherwise each mutating call
//! commits on its way out.

use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;
use sf_core::{SfError, SfResult, SlotIndex};
use sf_fx::{EffectParams, EffectType, Value};

use crate::publish::{ContextSnapshot, SlotSnapshot, TripleBuffer};
use crate::registry::SlotRegistry;
use crate::slot::EffectSlot;

pub const MIN_AIR_ABSORPTION_HF: f32 = -100.0;
pub const MAX_AIR_ABSORPTION_HF: f32 = 0.0;
pub const MIN_HF_REFERENCE: f32 = 1_000.0;
pub const MAX_HF_REFERENCE: f32 = 20_000.0;
pub const MIN_MACRO_FX_FACTOR: f32 = 0.0;
pub const MAX_MACRO_FX_FACTOR: f32 = 1.0;

/// Interface versions a session can request.
pub const SESSION_VERSION_4: u32 = 5;
pub const SESSION_VERSION_5: u32 = 6;

pub const MIN_MAX_ACTIVE_SENDS: u32 = 2;
pub const MAX_MAX_ACTIVE_SENDS: u32 = 4;
pub const DEFAULT_MAX_ACTIVE_SENDS: u32 = 2;

/// Reported speaker layouts. The renderer derives this from the device; it
/// is read-only through the property surface.
pub mod speaker_config {
    pub const HEADPHONES: u32 = 0;
    pub const SPEAKERS_2: u32 = 1;
    pub const SPEAKERS_4: u32 = 2;
    pub const SPEAKERS_5_1: u32 = 3;
    pub const SPEAKERS_6_1: u32 = 4;
    pub const SPEAKERS_7_1: u32 = 5;
}

/// Context-level rendering properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextProps {
    pub distance_factor: f32,
    pub air_absorption_hf: f32,
    pub hf_reference: f32,
    pub macro_fx_factor: f32,
}

impl Default for ContextProps {
    fn default() -> Self {
        Self {
            distance_factor: 1.0,
            air_absorption_hf: -5.0,
            hf_reference: 5_000.0,
            macro_fx_factor: 0.0,
        }
    }
}

/// Requested interface version and send budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub version: u32,
    pub max_active_sends: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self { version: SESSION_VERSION_4, max_active_sends: DEFAULT_MAX_ACTIVE_SENDS }
    }
}

struct Inner {
    registry: SlotRegistry,
    props: ContextProps,
    props_shadow: ContextProps,
    props_dirty: bool,
    session: Session,
    speaker_config: u32,
    defer: bool,
    generation: u64,
}

pub struct Context {
    inner: Mutex<Inner>,
    snapshots: Arc<TripleBuffer<ContextSnapshot>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::with_speaker_config(speaker_config::SPEAKERS_2)
    }

    pub fn with_speaker_config(speaker_config: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                registry: SlotRegistry::new(),
                props: ContextProps::default(),
                props_shadow: ContextProps::default(),
                props_dirty: false,
                session: Session::default(),
                speaker_config,
                defer: false,
                generation: 0,
            }),
            snapshots: Arc::new(TripleBuffer::new(ContextSnapshot::default())),
        }
    }

    /// A handle for the mix thread. Reading never takes the context mutex.
    pub fn mixer_view(&self) -> MixerView {
        MixerView { snapshots: Arc::clone(&self.snapshots) }
    }

    // ------------------------------------------------------------------
    // Deferral and commit
    // ------------------------------------------------------------------

    pub fn is_deferred(&self) -> bool {
        self.inner.lock().defer
    }

    /// Stop committing on every mutation; writes accumulate in shadow state.
    pub fn defer_updates(&self) {
        self.inner.lock().defer = true;
    }

    /// Leave deferred mode and commit the accumulated writes.
    pub fn process_updates(&self) {
        let mut inner = self.inner.lock();
        inner.defer = false;
        Self::commit_inner(&mut inner, &self.snapshots);
    }

    /// Commit everything dirty. A clean context is a no-op and publishes
    /// nothing.
    pub fn commit(&self) {
        let mut inner = self.inner.lock();
        Self::commit_inner(&mut inner, &self.snapshots);
    }

    /// The number of commits that reached the mixer.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    fn commit_inner(inner: &mut Inner, snapshots: &TripleBuffer<ContextSnapshot>) {
        let slots_changed = inner.registry.commit_all();
        let props_changed = inner.props_dirty;
        if !slots_changed && !props_changed {
            return;
        }
        if props_changed {
            inner.props = inner.props_shadow;
            inner.props_dirty = false;
        }
        inner.generation += 1;
        trace!("commit generation {}", inner.generation);

        let mut snapshot = ContextSnapshot {
            generation: inner.generation,
            slots: Default::default(),
            primary: inner.registry.primary(),
            distance_factor: inner.props.distance_factor,
            air_absorption_hf: inner.props.air_absorption_hf,
            hf_reference: inner.props.hf_reference,
        };
        for slot in inner.registry.iter() {
            snapshot.slots[slot.index().get()] = SlotSnapshot {
                effect_type: slot.effect().live_type(),
                params: *slot.effect().live_params(),
                gain: slot.gain(),
                auto_send: slot.auto_send(),
                target: slot.target(),
                playback: slot.playback(),
            };
        }
        snapshots.publish(snapshot);
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut Inner) -> SfResult<R>) -> SfResult<R> {
        let mut inner = self.inner.lock();
        let result = f(&mut inner)?;
        if !inner.defer {
            Self::commit_inner(&mut inner, &self.snapshots);
        }
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Slot lifecycle and routing
    // ------------------------------------------------------------------

    pub fn create_slot(&self) -> SfResult<SlotIndex> {
        self.mutate(|inner| inner.registry.create_slot())
    }

    pub fn delete_slot(&self, index: SlotIndex) -> SfResult<()> {
        self.mutate(|inner| inner.registry.delete_slot(index))
    }

    /// Bring up the legacy four-slot layout (idempotent).
    pub fn ensure_legacy_defaults(&self) {
        let _ = self.mutate(|inner| {
            inner.registry.ensure_legacy_defaults();
            Ok(())
        });
    }

    /// Unlock slots 0 and 1 (first 5.0-versioned call).
    pub fn release_legacy_locks(&self) {
        let _ = self.mutate(|inner| {
            inner.registry.release_legacy_locks();
            Ok(())
        });
    }

    pub fn primary_slot(&self) -> Option<SlotIndex> {
        self.inner.lock().registry.primary()
    }

    pub fn set_primary_slot(&self, primary: Option<SlotIndex>) -> SfResult<()> {
        self.mutate(|inner| inner.registry.set_primary(primary))
    }

    pub fn set_slot_gain(&self, index: SlotIndex, gain: f32) -> SfResult<()> {
        self.mutate(|inner| {
            inner.registry.slot_mut(index)?.set_gain(gain);
            Ok(())
        })
    }

    pub fn set_slot_auto_send(&self, index: SlotIndex, auto_send: bool) -> SfResult<()> {
        self.mutate(|inner| {
            inner.registry.slot_mut(index)?.set_auto_send(auto_send);
            Ok(())
        })
    }

    pub fn set_slot_target(&self, index: SlotIndex, target: Option<SlotIndex>) -> SfResult<()> {
        self.mutate(|inner| inner.registry.set_target(index, target))
    }

    pub fn load_effect(&self, index: SlotIndex, effect_type: EffectType) -> SfResult<()> {
        self.mutate(|inner| inner.registry.slot_mut(index)?.load_effect(effect_type))
    }

    pub fn play_slot(&self, index: SlotIndex) -> SfResult<()> {
        self.mutate(|inner| {
            inner.registry.slot_mut(index)?.play();
            Ok(())
        })
    }

    pub fn stop_slot(&self, index: SlotIndex) -> SfResult<()> {
        self.mutate(|inner| {
            inner.registry.slot_mut(index)?.stop();
            Ok(())
        })
    }

    pub fn reset_slot(&self, index: SlotIndex) -> SfResult<()> {
        self.mutate(|inner| {
            inner.registry.slot_mut(index)?.reset_playback();
            Ok(())
        })
    }

    /// Attach a source to a slot (reference counting only).
    pub fn attach_source(&self, index: SlotIndex) -> SfResult<()> {
        let mut inner = self.inner.lock();
        inner.registry.slot_mut(index)?.acquire();
        Ok(())
    }

    pub fn detach_source(&self, index: SlotIndex) -> SfResult<()> {
        let mut inner = self.inner.lock();
        inner.registry.slot_mut(index)?.release()
    }

    // ------------------------------------------------------------------
    // Effect parameters
    // ------------------------------------------------------------------

    pub fn set_effect_property(&self, index: SlotIndex, prop: u32, value: Value) -> SfResult<()> {
        self.mutate(|inner| inner.registry.slot_mut(index)?.effect_mut().set_property(prop, value))
    }

    pub fn get_effect_property(&self, index: SlotIndex, prop: u32) -> SfResult<Value> {
        self.inner.lock().registry.slot(index)?.effect().get_property(prop)
    }

    pub fn set_effect_all(&self, index: SlotIndex, params: EffectParams) -> SfResult<()> {
        self.mutate(|inner| inner.registry.slot_mut(index)?.effect_mut().set_all(params))
    }

    /// Run a read-only closure against a slot.
    pub fn with_slot<R>(
        &self,
        index: SlotIndex,
        f: impl FnOnce(&EffectSlot) -> SfResult<R>,
    ) -> SfResult<R> {
        f(self.inner.lock().registry.slot(index)?)
    }

    /// Run a mutating closure against a slot; commits afterwards unless
    /// updates are deferred.
    pub fn with_slot_mut<R>(
        &self,
        index: SlotIndex,
        f: impl FnOnce(&mut EffectSlot) -> SfResult<R>,
    ) -> SfResult<R> {
        self.mutate(|inner| f(inner.registry.slot_mut(index)?))
    }

    // ------------------------------------------------------------------
    // Context properties
    // ------------------------------------------------------------------

    /// The shadow record: reads see prior writes even before commit.
    pub fn props(&self) -> ContextProps {
        self.inner.lock().props_shadow
    }

    pub fn set_distance_factor(&self, factor: f32) -> SfResult<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(SfError::invalid_value(format!(
                "distance factor {factor} must be positive"
            )));
        }
        self.mutate(|inner| {
            inner.props_shadow.distance_factor = factor;
            inner.props_dirty = true;
            Ok(())
        })
    }

    pub fn set_air_absorption_hf(&self, level: f32) -> SfResult<()> {
        self.mutate(|inner| {
            inner.props_shadow.air_absorption_hf =
                level.clamp(MIN_AIR_ABSORPTION_HF, MAX_AIR_ABSORPTION_HF);
            inner.props_dirty = true;
            Ok(())
        })
    }

    pub fn set_hf_reference(&self, reference: f32) -> SfResult<()> {
        self.mutate(|inner| {
            inner.props_shadow.hf_reference = reference.clamp(MIN_HF_REFERENCE, MAX_HF_REFERENCE);
            inner.props_dirty = true;
            Ok(())
        })
    }

    /// Macro FX scaling factor. Stored and reported; the renderer applies no
    /// macro processing.
    pub fn set_macro_fx_factor(&self, factor: f32) -> SfResult<()> {
        self.mutate(|inner| {
            inner.props_shadow.macro_fx_factor =
                factor.clamp(MIN_MACRO_FX_FACTOR, MAX_MACRO_FX_FACTOR);
            inner.props_dirty = true;
            Ok(())
        })
    }

    // ------------------------------------------------------------------
    // Session and device facts
    // ------------------------------------------------------------------

    pub fn session(&self) -> Session {
        self.inner.lock().session
    }

    /// Select the interface version and send budget. The budget binds
    /// sources configured after the call; existing sends keep running.
    pub fn set_session(&self, session: Session) -> SfResult<()> {
        if !(SESSION_VERSION_4..=SESSION_VERSION_5).contains(&session.version) {
            return Err(SfError::IncompatibleVersion(format!(
                "unsupported session version {}",
                session.version
            )));
        }
        if !(MIN_MAX_ACTIVE_SENDS..=MAX_MAX_ACTIVE_SENDS).contains(&session.max_active_sends) {
            return Err(SfError::invalid_value(format!(
                "max active sends {} out of range",
                session.max_active_sends
            )));
        }
        self.inner.lock().session = session;
        Ok(())
    }

    pub fn speaker_config(&self) -> u32 {
        self.inner.lock().speaker_config
    }
}

/// Wait-free read side of the commit pipeline.
pub struct MixerView {
    snapshots: Arc<TripleBuffer<ContextSnapshot>>,
}

impl MixerView {
    /// The freshest committed snapshot.
    pub fn snapshot(&self) -> ContextSnapshot {
        self.snapshots.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_fx::echo;

    #[test]
    fn immediate_mode_commits_each_write() {
        let context = Context::new();
        let index = context.create_slot().unwrap();
        context.load_effect(index, EffectType::Echo).unwrap();
        let generation = context.generation();

        context
            .set_effect_property(index, echo::prop::DELAY, Value::F32(0.2))
            .unwrap();
        assert_eq!(context.generation(), generation + 1);

        let snapshot = context.mixer_view().snapshot();
        match snapshot.slots[index.get()].params {
            EffectParams::Echo(params) => assert_eq!(params.delay, 0.2),
            other => panic!("unexpected params {other:?}"),
        }
    }

    #[test]
    fn deferred_batch_lands_at_once() {
        let context = Context::new();
        let index = context.create_slot().unwrap();
        context.load_effect(index, EffectType::Echo).unwrap();
        let view = context.mixer_view();
        let before = context.generation();

        context.defer_updates();
        context
            .set_effect_property(index, echo::prop::DELAY, Value::F32(0.05))
            .unwrap();
        context
            .set_effect_property(index, echo::prop::FEEDBACK, Value::F32(0.9))
            .unwrap();
        // Nothing published yet; gets still see the new values.
        assert_eq!(context.generation(), before);
        assert_eq!(
            context.get_effect_property(index, echo::prop::DELAY).unwrap(),
            Value::F32(0.05)
        );
        assert_eq!(view.snapshot().generation, before);

        context.process_updates();
        assert_eq!(context.generation(), before + 1);
        let snapshot = view.snapshot();
        match snapshot.slots[index.get()].params {
            EffectParams::Echo(params) => {
                assert_eq!(params.delay, 0.05);
                assert_eq!(params.feedback, 0.9);
            }
            other => panic!("unexpected params {other:?}"),
        }
    }

    #[test]
    fn clean_commit_publishes_nothing() {
        let context = Context::new();
        let index = context.create_slot().unwrap();
        context.load_effect(index, EffectType::Reverb).unwrap();
        let generation = context.generation();
        context.commit();
        assert_eq!(context.generation(), generation);
    }

    #[test]
    fn session_validation() {
        let context = Context::new();
        assert!(context
            .set_session(Session { version: SESSION_VERSION_5, max_active_sends: 4 })
            .is_ok());
        assert!(context
            .set_session(Session { version: 7, max_active_sends: 2 })
            .is_err());
        assert!(context
            .set_session(Session { version: SESSION_VERSION_4, max_active_sends: 5 })
            .is_err());
    }

    #[test]
    fn distance_factor_rejects_non_positive() {
        let context = Context::new();
        assert!(context.set_distance_factor(0.0).is_err());
        assert!(context.set_distance_factor(-1.0).is_err());
        context.set_distance_factor(0.3048).unwrap();
        assert_eq!(context.props().distance_factor, 0.3048);
    }
}
