//! The audio unit interface the bridge drives.
//!
//! [`SynthUnit`] is the seam between the bridge and whatever actually
//! renders audio. [`OscillatorBankUnit`](crate::OscillatorBankUnit) is the
//! in-process implementation; a platform audio unit wrapper implements the
//! same trait.
//!
//! All methods take `&self`: units are shared between the application thread,
//! the instantiation callback and the parameter tree's notification context,
//! so implementations use interior mutability (atomics or short locks).

use std::sync::Arc;

use oscbank_core::{NoteNumber, TreeValue, Velocity};

use crate::tree::ParameterTree;

/// An instantiated oscillator-bank audio unit.
pub trait SynthUnit: Send + Sync {
    /// The unit's live parameter tree.
    fn parameter_tree(&self) -> Arc<ParameterTree>;

    /// Whether the unit has finished its own setup (waveforms loaded).
    fn is_set_up(&self) -> bool;

    /// Snapshot of the unit's raw parameter array, in index order.
    fn parameters(&self) -> Vec<TreeValue>;

    /// Replace the unit's raw parameter array.
    ///
    /// This writes the unit's storage directly and does not notify tree
    /// observers. Extra values are ignored; missing values leave the
    /// corresponding entries unchanged.
    fn set_parameters(&self, values: &[TreeValue]);

    /// Write one entry of the raw parameter array.
    fn set_parameter(&self, index: usize, value: TreeValue);

    /// Start (or retrigger) a note.
    fn start_note(&self, note: NoteNumber, velocity: Velocity, frequency: f32);

    /// Release a note.
    fn stop_note(&self, note: NoteNumber);

    /// Stop all notes and clear transient state.
    fn reset(&self);

    /// Allocate waveform slot `slot` with `size` samples.
    fn setup_waveform(&self, slot: u32, size: usize);

    /// Write one sample of waveform slot `slot`.
    fn set_waveform(&self, slot: u32, value: f32, index: usize);

    /// Current parameter ramp time in seconds.
    fn ramp_time(&self) -> f64;

    /// Set the parameter ramp time in seconds.
    fn set_ramp_time(&self, seconds: f64);
}
