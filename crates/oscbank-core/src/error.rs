//! Error types shared across oscbank crates.

use thiserror::Error;

/// Errors raised by parameter-set and configuration operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// A values sequence did not have one entry per parameter.
    #[error("expected {expected} parameter values, got {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    /// A waveform table was built with no samples.
    #[error("waveform table must contain at least one sample")]
    EmptyWaveform,

    /// A note or velocity outside the MIDI range 0..=127.
    #[error("MIDI value {0} is out of range (0..=127)")]
    MidiValueOutOfRange(u32),
}

/// Result type alias for oscbank core operations.
pub type SynthResult<T> = Result<T, SynthError>;
