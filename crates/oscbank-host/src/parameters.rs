//! Parameter tree construction for the oscillator bank.
//!
//! This module builds a [`ParameterTree`] from the fixed
//! [`SynthParameter`](oscbank_core::SynthParameter) enumeration. Each parameter's address is its index,
//! its range and default come from [`ParameterInfo`], and its unit label is
//! mapped to an [`AuParameterUnit`] for host display.

use oscbank_core::{ParameterAddress, ParameterInfo, ParameterSet};

use crate::tree::{ParameterTree, TreeParameter};

/// Audio unit parameter unit types.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuParameterUnit {
    Generic = 0,
    Indexed = 1,
    Boolean = 2,
    Percent = 3,
    Seconds = 4,
    Hertz = 8,
    RelativeSemiTones = 10,
    Ratio = 25,
}

/// Map unit labels to audio unit units.
pub fn map_parameter_unit(units: &str) -> AuParameterUnit {
    match units.to_lowercase().as_str() {
        "hz" | "hertz" => AuParameterUnit::Hertz,
        "s" | "seconds" => AuParameterUnit::Seconds,
        "%" | "percent" => AuParameterUnit::Percent,
        "st" | "semitones" => AuParameterUnit::RelativeSemiTones,
        "ratio" => AuParameterUnit::Ratio,
        _ => AuParameterUnit::Generic,
    }
}

/// Unit for a parameter, taking step count into account.
fn unit_for(info: &ParameterInfo) -> AuParameterUnit {
    match info.step_count {
        1 => AuParameterUnit::Boolean,
        n if n > 1 => AuParameterUnit::Indexed,
        _ => map_parameter_unit(info.units()),
    }
}

/// Build a tree node for one parameter at `address`, holding `value`.
pub fn create_tree_parameter(
    address: ParameterAddress,
    info: &'static ParameterInfo,
    value: f32,
) -> TreeParameter {
    TreeParameter::new(
        address,
        info.identifier,
        info.name,
        info.min as f32,
        info.max as f32,
        value,
    )
    .with_unit(unit_for(info))
}

/// Build the oscillator bank's parameter tree seeded from `values`.
pub fn build_parameter_tree(values: &ParameterSet) -> ParameterTree {
    let parameters = values
        .iter()
        .map(|(p, v)| create_tree_parameter(p.address(), p.info(), v as f32))
        .collect();
    ParameterTree::new(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oscbank_core::SynthParameter;

    #[test]
    fn test_default_tree_matches_enumeration() {
        let tree = build_parameter_tree(&ParameterSet::defaults());
        assert_eq!(tree.len(), SynthParameter::COUNT);
        for p in SynthParameter::ALL {
            let node = tree.parameter(p.address()).unwrap();
            assert_eq!(node.identifier, p.info().identifier);
            assert_eq!(node.value(), p.default_value() as f32);
        }
    }

    #[test]
    fn test_unit_mapping() {
        assert_eq!(map_parameter_unit("Hz"), AuParameterUnit::Hertz);
        assert_eq!(map_parameter_unit("%"), AuParameterUnit::Percent);
        assert_eq!(map_parameter_unit("furlongs"), AuParameterUnit::Generic);

        let tree = build_parameter_tree(&ParameterSet::defaults());
        let unit = |p: SynthParameter| tree.parameter(p.address()).unwrap().unit;
        assert_eq!(unit(SynthParameter::Cutoff), AuParameterUnit::Hertz);
        assert_eq!(unit(SynthParameter::ReverbOn), AuParameterUnit::Boolean);
        assert_eq!(unit(SynthParameter::LfoIndex), AuParameterUnit::Indexed);
        assert_eq!(unit(SynthParameter::Morph1PitchOffset), AuParameterUnit::RelativeSemiTones);
    }
}
