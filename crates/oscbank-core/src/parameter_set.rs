//! Ordered parameter values keyed by [`SynthParameter`].
//!
//! A [`ParameterSet`] always holds exactly [`SynthParameter::COUNT`] values.
//! It is what application code reads and writes before the unit exists, and
//! what gets pushed into the unit's storage once it does.

use crate::error::{SynthError, SynthResult};
use crate::parameters::SynthParameter;
use crate::types::ParameterValue;

/// Fixed-size, index-ordered collection of parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    values: Vec<ParameterValue>,
}

impl ParameterSet {
    /// Create a set holding every parameter's default value.
    pub fn defaults() -> Self {
        Self {
            values: SynthParameter::ALL.iter().map(|p| p.default_value()).collect(),
        }
    }

    /// Create a set from a slice of raw values, one per parameter index.
    pub fn from_slice(values: &[ParameterValue]) -> SynthResult<Self> {
        Self::check_len(values.len())?;
        Ok(Self {
            values: values.to_vec(),
        })
    }

    /// Verify that `len` matches the parameter count.
    pub fn check_len(len: usize) -> SynthResult<()> {
        if len == SynthParameter::COUNT {
            Ok(())
        } else {
            Err(SynthError::ParameterCountMismatch {
                expected: SynthParameter::COUNT,
                actual: len,
            })
        }
    }

    /// Get the value of one parameter.
    pub fn get(&self, parameter: SynthParameter) -> ParameterValue {
        self.values[parameter.index()]
    }

    /// Set the value of one parameter.
    pub fn set(&mut self, parameter: SynthParameter, value: ParameterValue) {
        self.values[parameter.index()] = value;
    }

    /// Number of parameters (always [`SynthParameter::COUNT`]).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in index order.
    pub fn as_slice(&self) -> &[ParameterValue] {
        &self.values
    }

    /// Values converted to the unit's single-precision storage format.
    pub fn to_tree_values(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }

    /// Iterate `(parameter, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SynthParameter, ParameterValue)> + '_ {
        SynthParameter::ALL.iter().copied().zip(self.values.iter().copied())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parameter_info() {
        let set = ParameterSet::defaults();
        assert_eq!(set.len(), SynthParameter::COUNT);
        assert_eq!(set.get(SynthParameter::Cutoff), 1000.0);
        assert_eq!(set.get(SynthParameter::DetuningMultiplier), 1.0);
        assert_eq!(set.get(SynthParameter::DelayMix), 0.125);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = ParameterSet::from_slice(&[0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            SynthError::ParameterCountMismatch {
                expected: SynthParameter::COUNT,
                actual: 3
            }
        );
        assert!(ParameterSet::from_slice(&[0.0; SynthParameter::COUNT + 1]).is_err());
    }

    #[test]
    fn test_set_and_iter() {
        let mut set = ParameterSet::defaults();
        set.set(SynthParameter::Resonance, 0.7);
        let (p, v) = set.iter().nth(SynthParameter::Resonance.index()).unwrap();
        assert_eq!(p, SynthParameter::Resonance);
        assert_eq!(v, 0.7);
    }
}
