//! # oscbank-host
//!
//! The audio unit side of oscbank.
//!
//! This crate provides everything the bridge talks to:
//!
//! - [`SynthUnit`] - The unit interface (parameters, notes, waveforms, reset)
//! - [`ParameterTree`] - Live parameter values with token-based observers
//! - [`ComponentRegistry`] - Component registration and async instantiation
//! - [`OscillatorBankUnit`] - In-process unit implementation
//!
//! ## Architecture
//!
//! ```text
//! ParameterSyncBridge (oscbank-bridge)
//!        ↓
//! ComponentRegistry::instantiate (worker thread)
//!        ↓
//! Arc<dyn SynthUnit> + Arc<ParameterTree>
//!        ↓
//! OscillatorBankUnit (or a platform unit wrapper)
//! ```

pub mod error;
pub mod oscillator_bank;
pub mod parameters;
pub mod registry;
pub mod tree;
pub mod unit;

pub use error::{HostError, HostResult};
pub use oscillator_bank::{ActiveNote, OscillatorBankUnit};
pub use parameters::{build_parameter_tree, map_parameter_unit, AuParameterUnit};
pub use registry::{ComponentRegistry, UnitFactory};
pub use tree::{ObserverToken, ParameterObserver, ParameterTree, TreeParameter};
pub use unit::SynthUnit;
