//! # oscbank
//!
//! Parameter synchronization for an oscillator-bank synthesizer.
//!
//! ## Architecture
//!
//! ```text
//! Your UI (implements ParameterListener)
//!        ↑ UiDispatch
//! ParameterSyncBridge
//!        ↓
//! SynthUnit + ParameterTree (OscillatorBankUnit or a platform unit)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use oscbank::prelude::*;
//!
//! let (queue, ui) = UiQueue::new();
//! let bridge = ParameterSyncBridge::new(Arc::new(queue));
//!
//! bridge.add_listener(Arc::new(CallbackListener::for_parameters(
//!     &[SynthParameter::Cutoff],
//!     |update| println!("{} = {}", update.parameter, update.display),
//! )));
//!
//! bridge.set_parameter(SynthParameter::Cutoff, 2000.0);
//! bridge.play_note(NoteNumber::A4, Velocity::MAX);
//!
//! // In the UI loop:
//! ui.run_pending();
//! ```

pub use oscbank_bridge as bridge;
pub use oscbank_core as core;
pub use oscbank_host as host;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use oscbank::prelude::*;
/// ```
pub mod prelude {
    pub use oscbank_core::{
        // Parameters
        Formatter, ParameterInfo, ParameterSet, SynthParameter,
        // Notes
        NoteNumber, Velocity,
        // Waveforms
        WaveformBank, WaveformKind, WaveformTable,
        // Configuration
        ComponentDescription, ComponentType, FourCharCode, SynthConfig, DEFAULT_CONFIG,
        // Errors
        SynthError, SynthResult,
    };

    pub use oscbank_host::{
        ComponentRegistry, HostError, HostResult, ObserverToken, OscillatorBankUnit,
        ParameterTree, SynthUnit,
    };

    pub use oscbank_bridge::{
        BridgeStatus, CallbackListener, ListenerRegistry, ParameterListener, ParameterSyncBridge,
        ParameterUpdate, SharedListener, ThreadExecutor, UiDispatch, UiQueue, UiQueueReceiver,
    };

    pub use oscbank_core::fourcc;
}
