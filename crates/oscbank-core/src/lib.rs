//! # oscbank-core
//!
//! Core types for the oscbank oscillator-bank binding.
//!
//! This crate has no platform code. It defines the fixed parameter
//! enumeration shared by application code, the parameter tree and UI
//! listeners, plus the values the bridge pushes into the unit at setup.
//!
//! ## Types
//!
//! - [`SynthParameter`] - Fixed index ↔ identity parameter enumeration
//! - [`ParameterInfo`] - Parameter metadata (range, default, display)
//! - [`ParameterSet`] - Index-ordered parameter values
//! - [`Formatter`] - Value-to-display-text conversion
//! - [`WaveformTable`] / [`WaveformBank`] - Waveforms uploaded into unit slots
//! - [`NoteNumber`] / [`Velocity`] - Note event values
//! - [`SynthConfig`] / [`ComponentDescription`] - Component and tuning config
//! - [`SynthError`] - Error types

pub mod config;
pub mod error;
pub mod note;
pub mod parameter_format;
pub mod parameter_info;
pub mod parameter_set;
pub mod parameters;
pub mod types;
pub mod waveform;

pub use config::{ComponentDescription, ComponentType, FourCharCode, SynthConfig, DEFAULT_CONFIG};
pub use error::{SynthError, SynthResult};
pub use note::{NoteNumber, Velocity};
pub use parameter_format::Formatter;
pub use parameter_info::ParameterInfo;
pub use parameter_set::ParameterSet;
pub use parameters::SynthParameter;
pub use types::{
    ParameterAddress, ParameterValue, TreeValue, DEFAULT_RAMP_TIME, DEFAULT_WAVEFORM_SIZE,
    WAVEFORM_SLOTS,
};
pub use waveform::{WaveformBank, WaveformKind, WaveformTable};
