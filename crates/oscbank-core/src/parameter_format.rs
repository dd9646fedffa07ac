//! Parameter value formatting.
//!
//! This module provides the [`Formatter`] enum for converting between
//! plain parameter values and the display text shown next to a knob.
//! Each variant handles one kind of value (percent, Hz, seconds, ...).
//!
//! # Example
//!
//! ```
//! use oscbank_core::Formatter;
//!
//! let percent = Formatter::Percent { precision: 0 };
//! assert_eq!(percent.format(0.75), "75%");
//!
//! let hz = Formatter::Frequency;
//! assert_eq!(hz.format(440.0), "440 Hz");
//! assert_eq!(hz.format(1500.0), "1.50 kHz");
//! ```

/// Parameter value formatter.
///
/// Defines how plain parameter values are converted to display strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formatter {
    /// Generic float with configurable precision (e.g., "1.23").
    Float {
        /// Number of decimal places.
        precision: usize,
    },

    /// Whole number, rounded for display (e.g., "24").
    Integer,

    /// Percentage formatter.
    ///
    /// Input is 0.0-1.0, display is 0%-100%.
    Percent {
        /// Number of decimal places.
        precision: usize,
    },

    /// Frequency formatter with automatic Hz/kHz scaling.
    ///
    /// Display: "0.25 Hz", "440 Hz", "1.50 kHz"
    Frequency,

    /// Seconds formatter, switching to milliseconds below one second.
    ///
    /// Display: "1.50 s", "100 ms"
    Seconds {
        /// Number of decimal places used for the seconds form.
        precision: usize,
    },

    /// Semitones formatter for pitch offsets.
    ///
    /// Display: "+12 st", "-7 st", "0 st"
    Semitones,

    /// Multiplier formatter for detune ratios.
    ///
    /// Display: "x1.50"
    Ratio {
        /// Number of decimal places.
        precision: usize,
    },

    /// Boolean formatter.
    ///
    /// Display: "On", "Off"
    Boolean,
}

impl Formatter {
    /// Format a plain value to a display string.
    pub fn format(&self, value: f64) -> String {
        match self {
            Formatter::Float { precision } => {
                format!("{:.prec$}", value, prec = *precision)
            }

            Formatter::Integer => format!("{}", value.round() as i64),

            Formatter::Percent { precision } => {
                format!("{:.prec$}%", value * 100.0, prec = *precision)
            }

            Formatter::Frequency => {
                if value >= 1000.0 {
                    format!("{:.2} kHz", value / 1000.0)
                } else if value >= 100.0 {
                    format!("{:.0} Hz", value)
                } else if value >= 10.0 {
                    format!("{:.1} Hz", value)
                } else {
                    format!("{:.2} Hz", value)
                }
            }

            Formatter::Seconds { precision } => {
                if value.abs() < 1.0 {
                    format!("{:.0} ms", value * 1000.0)
                } else {
                    format!("{:.prec$} s", value, prec = *precision)
                }
            }

            Formatter::Semitones => {
                let st = value.round() as i64;
                if st > 0 {
                    format!("+{} st", st)
                } else {
                    format!("{} st", st)
                }
            }

            Formatter::Ratio { precision } => {
                format!("x{:.prec$}", value, prec = *precision)
            }

            Formatter::Boolean => {
                if value > 0.5 {
                    "On".to_string()
                } else {
                    "Off".to_string()
                }
            }
        }
    }

    /// Get the unit string for this formatter (for [`ParameterInfo`](crate::ParameterInfo)).
    pub fn units(&self) -> &'static str {
        match self {
            Formatter::Float { .. } => "",
            Formatter::Integer => "",
            Formatter::Percent { .. } => "%",
            Formatter::Frequency => "Hz",
            Formatter::Seconds { .. } => "s",
            Formatter::Semitones => "st",
            Formatter::Ratio { .. } => "ratio",
            Formatter::Boolean => "",
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::Float { precision: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_scaling() {
        let f = Formatter::Frequency;
        assert_eq!(f.format(0.25), "0.25 Hz");
        assert_eq!(f.format(12.0), "12.0 Hz");
        assert_eq!(f.format(440.0), "440 Hz");
        assert_eq!(f.format(22050.0), "22.05 kHz");
    }

    #[test]
    fn test_seconds_switches_to_ms() {
        let f = Formatter::Seconds { precision: 2 };
        assert_eq!(f.format(0.1), "100 ms");
        assert_eq!(f.format(1.5), "1.50 s");
    }

    #[test]
    fn test_semitones_sign() {
        let f = Formatter::Semitones;
        assert_eq!(f.format(12.0), "+12 st");
        assert_eq!(f.format(-7.2), "-7 st");
        assert_eq!(f.format(0.0), "0 st");
    }

    #[test]
    fn test_percent_and_boolean() {
        assert_eq!(Formatter::Percent { precision: 0 }.format(0.5), "50%");
        assert_eq!(Formatter::Boolean.format(1.0), "On");
        assert_eq!(Formatter::Boolean.format(0.0), "Off");
    }

    #[test]
    fn test_ratio_text() {
        let f = Formatter::Ratio { precision: 2 };
        assert_eq!(f.format(1.5), "x1.50");
    }
}
