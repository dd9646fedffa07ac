//! Parameter metadata types.
//!
//! [`ParameterInfo`] describes one entry of the oscillator bank's parameter
//! set: its display names, plain-value range, default and how it is shown
//! to the user.

use crate::parameter_format::Formatter;
use crate::types::ParameterValue;

/// Metadata describing a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Stable identifier used when building the parameter tree (e.g., "cutoff").
    pub identifier: &'static str,
    /// Full parameter name (e.g., "Filter Cutoff").
    pub name: &'static str,
    /// Short parameter name for constrained UIs (e.g., "Cut").
    pub short_name: &'static str,
    /// Minimum plain value.
    pub min: ParameterValue,
    /// Maximum plain value.
    pub max: ParameterValue,
    /// Default plain value.
    pub default: ParameterValue,
    /// Number of discrete steps. 0 = continuous, 1 = toggle, >1 = discrete.
    pub step_count: i32,
    /// Display formatter.
    pub formatter: Formatter,
}

impl ParameterInfo {
    /// Create a new continuous parameter spanning `min..=max`.
    pub const fn new(
        identifier: &'static str,
        name: &'static str,
        min: ParameterValue,
        max: ParameterValue,
        default: ParameterValue,
    ) -> Self {
        Self {
            identifier,
            name,
            short_name: name,
            min,
            max,
            default,
            step_count: 0,
            formatter: Formatter::Float { precision: 2 },
        }
    }

    /// Create a toggle parameter (0 = off, 1 = on).
    pub const fn toggle(identifier: &'static str, name: &'static str, default_on: bool) -> Self {
        Self {
            identifier,
            name,
            short_name: name,
            min: 0.0,
            max: 1.0,
            default: if default_on { 1.0 } else { 0.0 },
            step_count: 1,
            formatter: Formatter::Boolean,
        }
    }

    /// Set the short name.
    pub const fn with_short_name(mut self, short_name: &'static str) -> Self {
        self.short_name = short_name;
        self
    }

    /// Set the step count (0 = continuous).
    pub const fn with_steps(mut self, steps: i32) -> Self {
        self.step_count = steps;
        self
    }

    /// Set the display formatter.
    pub const fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Unit label derived from the formatter (e.g., "Hz", "%").
    pub fn units(&self) -> &'static str {
        self.formatter.units()
    }

    /// Convert a plain value to normalized form (0.0 to 1.0).
    pub fn normalize(&self, value: ParameterValue) -> ParameterValue {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// Format a plain value for display.
    pub fn display(&self, value: ParameterValue) -> String {
        self.formatter.format(value)
    }
}
