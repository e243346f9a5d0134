//! Legacy property-set surface
//!
//! This crate speaks the GUID-addressed property protocol on top of the
//! slot engine: calls arrive as a property-set GUID, a property id, an
//! optional source handle, and a raw byte payload. Decoding resolves the
//! interface version and the addressed object, the dispatchers translate
//! packed little-endian records into engine operations, and results come
//! back as the protocol's signed status codes with the last failure
//! readable through the context set.

pub mod call;
pub mod context_dispatch;
pub mod effect_dispatch;
pub mod guids;
pub mod records;
pub mod slot_dispatch;
pub mod source;

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use parking_lot::Mutex;
use sf_core::{Guid, SLOT_COUNT, SfError, SfResult};
use sf_slot::Context;

pub use call::{CallTarget, DEFERRED_FLAG, PropertyCall};
pub use source::{SendProps, SourceLookup, SourceProps};

/// Status codes returned to callers of the byte-level entry points.
pub const EAX_OK: i32 = 0;
pub const EAXERR_INVALID_OPERATION: i32 = -1;
pub const EAXERR_INVALID_VALUE: i32 = -2;
pub const EAXERR_NO_EFFECT_LOADED: i32 = -3;
pub const EAXERR_UNKNOWN_EFFECT: i32 = -4;
pub const EAXERR_INCOMPATIBLE_SOURCE_TYPE: i32 = -5;
pub const EAXERR_INCOMPATIBLE_EAX_VERSION: i32 = -6;

/// Map an engine error onto the protocol's status code.
pub fn error_code(err: &SfError) -> i32 {
    match err {
        SfError::InvalidValue(_) => EAXERR_INVALID_VALUE,
        SfError::NoEffectLoaded(_) => EAXERR_NO_EFFECT_LOADED,
        SfError::UnknownEffect(_) => EAXERR_UNKNOWN_EFFECT,
        SfError::IncompatibleSourceType(_) => EAXERR_INCOMPATIBLE_SOURCE_TYPE,
        SfError::IncompatibleVersion(_) => EAXERR_INCOMPATIBLE_EAX_VERSION,
        SfError::InvalidName(_) | SfError::InvalidOperation(_) | SfError::OutOfMemory(_) => {
            EAXERR_INVALID_OPERATION
        }
    }
}

/// The GUID-addressed property interface over one context.
///
/// Source property state lives here rather than in the engine: the engine
/// only ever sees the per-slot send gains derived from it.
pub struct EaxInterface {
    context: Arc<Context>,
    sources: Mutex<HashMap<u32, SourceProps>>,
    lookup: Option<Box<dyn SourceLookup>>,
    last_error: Mutex<i32>,
}

impl EaxInterface {
    pub fn new(context: Arc<Context>) -> Self {
        Self {
            context,
            sources: Mutex::new(HashMap::new()),
            lookup: None,
            last_error: Mutex::new(EAX_OK),
        }
    }

    /// Attach the renderer's source table so unknown handles are rejected.
    pub fn with_source_lookup(mut self, lookup: Box<dyn SourceLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Byte-level set entry point. Failures are logged, recorded as the
    /// last error, and reported as a status code.
    pub fn eax_set(
        &self,
        property_set: &Guid,
        property_id: u32,
        source_id: u32,
        buf: &[u8],
    ) -> i32 {
        match self.set(property_set, property_id, source_id, buf) {
            Ok(()) => EAX_OK,
            Err(err) => {
                warn!("set {property_set} property {property_id:#x} failed: {err}");
                let code = error_code(&err);
                *self.last_error.lock() = code;
                code
            }
        }
    }

    /// Byte-level get entry point.
    pub fn eax_get(
        &self,
        property_set: &Guid,
        property_id: u32,
        source_id: u32,
        buf: &mut [u8],
    ) -> i32 {
        match self.get(property_set, property_id, source_id, buf) {
            Ok(()) => EAX_OK,
            Err(err) => {
                warn!("get {property_set} property {property_id:#x} failed: {err}");
                let code = error_code(&err);
                *self.last_error.lock() = code;
                code
            }
        }
    }

    pub fn set(
        &self,
        property_set: &Guid,
        property_id: u32,
        source_id: u32,
        buf: &[u8],
    ) -> SfResult<()> {
        let call = PropertyCall::decode(property_set, property_id)?;
        self.context.ensure_legacy_defaults();
        if call.version >= 5 {
            self.context.release_legacy_locks();
        }
        // Slot management is immediate by definition.
        if call.deferred && call.target == CallTarget::FxSlot {
            return Err(SfError::invalid_operation(
                "fx-slot properties cannot be deferred",
            ));
        }
        if call.needs_buffer() && buf.is_empty() {
            return Err(SfError::invalid_value("call needs a payload"));
        }
        if call.deferred {
            self.context.defer_updates();
        }
        self.apply_set(&call, source_id, buf)?;
        if !call.deferred {
            // Any immediate call also commits whatever was deferred before
            // it; an empty immediate call is the explicit commit.
            self.context.process_updates();
        }
        Ok(())
    }

    pub fn get(
        &self,
        property_set: &Guid,
        property_id: u32,
        source_id: u32,
        buf: &mut [u8],
    ) -> SfResult<()> {
        let call = PropertyCall::decode(property_set, property_id)?;
        self.context.ensure_legacy_defaults();
        if call.version >= 5 {
            self.context.release_legacy_locks();
        }
        if call.target == CallTarget::Context
            && call.property == context_dispatch::prop::LASTERROR
        {
            let code = std::mem::replace(&mut *self.last_error.lock(), EAX_OK);
            return records::Writer::new(buf).write_i32(code);
        }
        if call.needs_buffer() && buf.is_empty() {
            return Err(SfError::invalid_value("call needs a payload"));
        }
        match call.target {
            CallTarget::Context => context_dispatch::get(&self.context, &call, buf),
            CallTarget::FxSlot => slot_dispatch::get(&self.context, &call, buf),
            CallTarget::FxSlotEffect => effect_dispatch::get(&self.context, &call, buf),
            CallTarget::Source => {
                self.check_source(source_id)?;
                let mut sources = self.sources.lock();
                let props = sources.entry(source_id).or_default();
                source::get(&call, props, buf)
            }
        }
    }

    fn apply_set(&self, call: &PropertyCall, source_id: u32, buf: &[u8]) -> SfResult<()> {
        match call.target {
            CallTarget::Context => context_dispatch::set(&self.context, call, buf),
            CallTarget::FxSlot => slot_dispatch::set(&self.context, call, buf),
            CallTarget::FxSlotEffect => effect_dispatch::set(&self.context, call, buf),
            CallTarget::Source => {
                self.check_source(source_id)?;
                let session = self.context.session();
                let mut sources = self.sources.lock();
                let props = sources.entry(source_id).or_default();
                source::set(&self.context, session, call, props, buf)
            }
        }
    }

    fn check_source(&self, source_id: u32) -> SfResult<()> {
        if source_id == 0 {
            return Err(SfError::InvalidName("source handle 0".into()));
        }
        if let Some(lookup) = &self.lookup {
            if !lookup.source_exists(source_id) {
                return Err(SfError::InvalidName(format!("source {source_id}")));
            }
        }
        Ok(())
    }

    /// Drop the stored state of a deleted source.
    pub fn forget_source(&self, source_id: u32) {
        self.sources.lock().remove(&source_id);
    }

    /// Per-slot linear send gains for a source, for the wet-path mixer.
    /// Unknown handles report the default routing.
    pub fn send_gains(&self, source_id: u32) -> [f32; SLOT_COUNT] {
        let primary = self.context.primary_slot();
        self.sources
            .lock()
            .get(&source_id)
            .copied()
            .unwrap_or_default()
            .send_gains(primary)
    }

    /// The most recent failure code, cleared on read.
    pub fn last_error(&self) -> i32 {
        std::mem::replace(&mut *self.last_error.lock(), EAX_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_fx::reverb;

    fn interface() -> EaxInterface {
        EaxInterface::new(Arc::new(Context::new()))
    }

    #[test]
    fn set_reports_status_codes() {
        let iface = interface();
        let buf = 2.5f32.to_le_bytes();
        assert_eq!(
            iface.eax_set(&guids::EAX4_FX_SLOT_0, reverb::prop::DECAYTIME, 0, &buf),
            EAX_OK
        );

        let bogus = Guid::new(1, 2, 3, [4; 8]);
        assert_eq!(
            iface.eax_set(&bogus, reverb::prop::DECAYTIME, 0, &buf),
            EAXERR_INVALID_OPERATION
        );
    }

    #[test]
    fn last_error_is_read_and_cleared() {
        let iface = interface();
        let bogus = Guid::new(1, 2, 3, [4; 8]);
        iface.eax_set(&bogus, 0, 0, &[]);

        let mut buf = [0u8; 4];
        assert_eq!(
            iface.eax_get(&guids::EAX5_CONTEXT, context_dispatch::prop::LASTERROR, 0, &mut buf),
            EAX_OK
        );
        assert_eq!(i32::from_le_bytes(buf), EAXERR_INVALID_OPERATION);

        iface.eax_get(&guids::EAX5_CONTEXT, context_dispatch::prop::LASTERROR, 0, &mut buf);
        assert_eq!(i32::from_le_bytes(buf), EAX_OK);
    }

    #[test]
    fn fx_slot_calls_cannot_defer() {
        let iface = interface();
        let buf = (-600i32).to_le_bytes();
        assert_eq!(
            iface.eax_set(
                &guids::EAX4_FX_SLOT_0,
                slot_dispatch::prop::VOLUME | DEFERRED_FLAG,
                0,
                &buf,
            ),
            EAXERR_INVALID_OPERATION
        );
    }

    #[test]
    fn missing_payload_is_rejected() {
        let iface = interface();
        assert_eq!(
            iface.eax_set(&guids::EAX4_CONTEXT, context_dispatch::prop::DISTANCEFACTOR, 0, &[]),
            EAXERR_INVALID_VALUE
        );
        // An empty property-zero call is the commit and needs no payload.
        assert_eq!(iface.eax_set(&guids::EAX4_CONTEXT, 0, 0, &[]), EAX_OK);
    }

    #[test]
    fn source_calls_need_a_handle() {
        let iface = interface();
        let buf = (-600i32).to_le_bytes();
        assert_eq!(
            iface.eax_set(&guids::EAX4_SOURCE, source::prop::ROOM, 0, &buf),
            EAXERR_INVALID_OPERATION
        );
        assert_eq!(
            iface.eax_set(&guids::EAX4_SOURCE, source::prop::ROOM, 7, &buf),
            EAX_OK
        );
        let mut out = [0u8; 4];
        assert_eq!(
            iface.eax_get(&guids::EAX4_SOURCE, source::prop::ROOM, 7, &mut out),
            EAX_OK
        );
        assert_eq!(i32::from_le_bytes(out), -600);
    }

    struct EvenHandles;
    impl SourceLookup for EvenHandles {
        fn source_exists(&self, source_id: u32) -> bool {
            source_id % 2 == 0
        }
    }

    #[test]
    fn source_lookup_filters_handles() {
        let iface = interface().with_source_lookup(Box::new(EvenHandles));
        let buf = (-600i32).to_le_bytes();
        assert_eq!(
            iface.eax_set(&guids::EAX4_SOURCE, source::prop::ROOM, 3, &buf),
            EAXERR_INVALID_OPERATION
        );
        assert_eq!(
            iface.eax_set(&guids::EAX4_SOURCE, source::prop::ROOM, 4, &buf),
            EAX_OK
        );
    }

    #[test]
    fn forgetting_a_source_resets_it() {
        let iface = interface();
        let buf = (-2_000i32).to_le_bytes();
        iface.eax_set(&guids::EAX4_SOURCE, source::prop::ROOM, 9, &buf);
        iface.forget_source(9);
        let mut out = [0u8; 4];
        iface.eax_get(&guids::EAX4_SOURCE, source::prop::ROOM, 9, &mut out);
        assert_eq!(i32::from_le_bytes(out), 0);
    }

    #[test]
    fn version_5_calls_release_the_legacy_locks() {
        let iface = interface();
        let buf = guids::ECHO_EFFECT.to_bytes();
        // Slot 0 starts locked for the listener sets.
        assert_eq!(
            iface.eax_set(&guids::EAX4_FX_SLOT_0, slot_dispatch::prop::LOADEFFECT, 0, &buf),
            EAXERR_INVALID_OPERATION
        );
        assert_eq!(
            iface.eax_set(&guids::EAX5_FX_SLOT_0, slot_dispatch::prop::LOADEFFECT, 0, &buf),
            EAX_OK
        );
    }
}
