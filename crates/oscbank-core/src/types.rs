//! Common types used throughout oscbank.

/// Parameter tree address.
///
/// Addresses are dense: the address of a parameter equals its index in the
/// parameter set, so `0..SynthParameter::COUNT` covers every known parameter.
pub type ParameterAddress = u64;

/// Parameter value as seen by application code (plain units, not normalized).
pub type ParameterValue = f64;

/// Parameter value as stored in the parameter tree and the unit's raw mirror.
///
/// The audio unit works in single precision. Conversions between
/// [`ParameterValue`] and `TreeValue` happen at the bridge boundary.
pub type TreeValue = f32;

/// Default ramp time in seconds applied to parameter changes inside the unit.
pub const DEFAULT_RAMP_TIME: f64 = 0.0002;

/// Default number of samples in a generated waveform table.
pub const DEFAULT_WAVEFORM_SIZE: usize = 4096;

/// Number of waveform slots the oscillator bank exposes.
pub const WAVEFORM_SLOTS: usize = 4;
