//! Component and instrument configuration.
//!
//! [`ComponentDescription`] identifies the audio unit component to register
//! and instantiate. [`SynthConfig`] bundles it with the instrument metadata
//! and tuning defaults the bridge applies once the unit is ready.
//!
//! # Example
//!
//! ```
//! use oscbank_core::{fourcc, ComponentDescription, SynthConfig};
//!
//! pub static CONFIG: SynthConfig = SynthConfig::new(
//!     "My Bank",
//!     ComponentDescription::instrument(fourcc!(b"mybk"), fourcc!(b"Demo")),
//! )
//! .with_vendor("My Company")
//! .with_ramp_time(0.001);
//! ```

use crate::types::{DEFAULT_RAMP_TIME, DEFAULT_WAVEFORM_SIZE};

/// Audio component type (4-character code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Music device/instrument (aumu) - generates audio from notes.
    MusicDevice,
}

impl ComponentType {
    /// Get the component type as a 4-character string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MusicDevice => "aumu",
        }
    }
}

/// Four-character code (FourCC) for component identifiers.
///
/// Must be exactly 4 ASCII characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCharCode(pub [u8; 4]);

impl FourCharCode {
    /// Create a new FourCharCode from a 4-byte array.
    ///
    /// # Panics
    /// Debug builds will panic if any byte is not ASCII.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        debug_assert!(bytes[0].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[1].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[2].is_ascii(), "FourCC bytes must be ASCII");
        debug_assert!(bytes[3].is_ascii(), "FourCC bytes must be ASCII");
        Self(*bytes)
    }

    /// Get the FourCC as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl std::fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Macro for creating FourCharCode at compile time with validation.
///
/// The macro fails to compile if the input is not exactly 4 ASCII bytes.
#[macro_export]
macro_rules! fourcc {
    ($s:literal) => {{
        const BYTES: &[u8] = $s;
        const _: () = assert!(BYTES.len() == 4, "FourCC must be exactly 4 bytes");
        const _: () = assert!(BYTES[0].is_ascii(), "FourCC byte 0 must be ASCII");
        const _: () = assert!(BYTES[1].is_ascii(), "FourCC byte 1 must be ASCII");
        const _: () = assert!(BYTES[2].is_ascii(), "FourCC byte 2 must be ASCII");
        const _: () = assert!(BYTES[3].is_ascii(), "FourCC byte 3 must be ASCII");
        $crate::FourCharCode::new(&[BYTES[0], BYTES[1], BYTES[2], BYTES[3]])
    }};
}

/// Identity of an audio unit component: type, subtype, manufacturer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentDescription {
    pub component_type: ComponentType,
    pub subtype: FourCharCode,
    pub manufacturer: FourCharCode,
}

impl ComponentDescription {
    /// Describe an instrument (`aumu`) component.
    pub const fn instrument(subtype: FourCharCode, manufacturer: FourCharCode) -> Self {
        Self {
            component_type: ComponentType::MusicDevice,
            subtype,
            manufacturer,
        }
    }
}

impl std::fmt::Display for ComponentDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.component_type.as_str(),
            self.subtype,
            self.manufacturer
        )
    }
}

/// Instrument configuration.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Instrument name.
    pub name: &'static str,

    /// Vendor/company name.
    pub vendor: &'static str,

    /// Component to register and instantiate.
    pub component: ComponentDescription,

    /// Ramp time in seconds pushed to the unit once it is ready.
    pub ramp_time: f64,

    /// Sample count used when generating default waveform tables.
    pub waveform_size: usize,
}

impl SynthConfig {
    /// Create a new configuration with default values.
    pub const fn new(name: &'static str, component: ComponentDescription) -> Self {
        Self {
            name,
            vendor: "Unknown Vendor",
            component,
            ramp_time: DEFAULT_RAMP_TIME,
            waveform_size: DEFAULT_WAVEFORM_SIZE,
        }
    }

    /// Set the vendor name.
    pub const fn with_vendor(mut self, vendor: &'static str) -> Self {
        self.vendor = vendor;
        self
    }

    /// Set the default ramp time in seconds.
    pub const fn with_ramp_time(mut self, seconds: f64) -> Self {
        self.ramp_time = seconds;
        self
    }

    /// Set the generated waveform table size.
    pub const fn with_waveform_size(mut self, size: usize) -> Self {
        self.waveform_size = size;
        self
    }
}

/// The pulse-width-modulating oscillator bank.
pub static DEFAULT_CONFIG: SynthConfig = SynthConfig::new(
    "Oscillator Bank",
    ComponentDescription::instrument(FourCharCode::new(b"aks1"), FourCharCode::new(b"AuKt")),
)
.with_vendor("oscbank");
