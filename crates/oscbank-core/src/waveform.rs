//! Waveform tables uploaded into the oscillator bank's slots.
//!
//! The unit morphs between the tables it holds, so the bridge uploads them
//! sample by sample once the unit has been instantiated. The default bank
//! holds four single-cycle tables: triangle, square, sine and sawtooth.

use std::f64::consts::PI;

use crate::error::{SynthError, SynthResult};
use crate::types::{DEFAULT_WAVEFORM_SIZE, WAVEFORM_SLOTS};

/// Shape of a generated single-cycle waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformKind {
    Triangle,
    Square,
    Sine,
    Sawtooth,
}

impl WaveformKind {
    /// Sample value at `phase` in `[0, 1)`.
    fn sample(&self, phase: f64) -> f64 {
        match self {
            // Starts at -1, peaks at +1 halfway through the cycle.
            Self::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            Self::Square => {
                if phase < 0.5 {
                    -1.0
                } else {
                    1.0
                }
            }
            Self::Sine => (2.0 * PI * phase).sin(),
            Self::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

/// A single-cycle waveform table.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformTable {
    samples: Vec<f32>,
}

impl WaveformTable {
    /// Generate a table of the given shape with [`DEFAULT_WAVEFORM_SIZE`] samples.
    pub fn new(kind: WaveformKind) -> Self {
        Self::with_size(kind, DEFAULT_WAVEFORM_SIZE)
    }

    /// Generate a table of the given shape and size.
    ///
    /// A size of zero is bumped to one sample so the table is never empty.
    pub fn with_size(kind: WaveformKind, size: usize) -> Self {
        let size = size.max(1);
        let samples = (0..size)
            .map(|i| kind.sample(i as f64 / size as f64) as f32)
            .collect();
        Self { samples }
    }

    /// Wrap caller-provided samples (e.g., a custom drawn wave).
    pub fn from_samples(samples: Vec<f32>) -> SynthResult<Self> {
        if samples.is_empty() {
            return Err(SynthError::EmptyWaveform);
        }
        Ok(Self { samples })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: tables hold at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate samples in order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }
}

/// Ordered collection of waveform tables; position = unit slot.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformBank {
    tables: Vec<WaveformTable>,
}

impl WaveformBank {
    /// Build a bank from explicit tables.
    ///
    /// Tables beyond [`WAVEFORM_SLOTS`] are kept here but the oscillator bank
    /// unit ignores the extra slots.
    pub fn new(tables: Vec<WaveformTable>) -> Self {
        Self { tables }
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the bank holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Whether the bank fits the unit's slot count.
    pub fn fits_slots(&self) -> bool {
        self.tables.len() <= WAVEFORM_SLOTS
    }

    /// Iterate `(slot, table)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &WaveformTable)> + '_ {
        self.tables.iter().enumerate().map(|(i, t)| (i as u32, t))
    }

    /// The standard four tables (triangle, square, sine, sawtooth) at `size` samples.
    pub fn standard(size: usize) -> Self {
        Self::new(
            [
                WaveformKind::Triangle,
                WaveformKind::Square,
                WaveformKind::Sine,
                WaveformKind::Sawtooth,
            ]
            .into_iter()
            .map(|kind| WaveformTable::with_size(kind, size))
            .collect(),
        )
    }
}

impl Default for WaveformBank {
    fn default() -> Self {
        Self::standard(DEFAULT_WAVEFORM_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_bank_layout() {
        let bank = WaveformBank::default();
        assert_eq!(bank.len(), 4);
        assert!(bank.fits_slots());
        for (_, table) in bank.iter() {
            assert_eq!(table.len(), DEFAULT_WAVEFORM_SIZE);
        }
    }

    #[test]
    fn test_standard_bank_size() {
        let bank = WaveformBank::standard(64);
        assert_eq!(bank.len(), 4);
        assert!(bank.iter().all(|(_, t)| t.len() == 64));
        assert_eq!(bank.iter().map(|(slot, _)| slot).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_shapes_stay_in_range() {
        for kind in [
            WaveformKind::Triangle,
            WaveformKind::Square,
            WaveformKind::Sine,
            WaveformKind::Sawtooth,
        ] {
            let table = WaveformTable::with_size(kind, 256);
            assert!(table.iter().all(|s| (-1.0..=1.0).contains(&s)), "{:?}", kind);
        }
    }

    #[test]
    fn test_shape_key_points() {
        let samples = |kind, size| WaveformTable::with_size(kind, size).iter().collect::<Vec<f32>>();

        let tri = samples(WaveformKind::Triangle, 8);
        assert_relative_eq!(tri[0], -1.0);
        assert_relative_eq!(tri[4], 1.0);

        let sine = samples(WaveformKind::Sine, 4);
        assert_relative_eq!(sine[1], 1.0, epsilon = 1e-6);

        assert_eq!(samples(WaveformKind::Square, 4), vec![-1.0, -1.0, 1.0, 1.0]);
        assert_eq!(samples(WaveformKind::Sawtooth, 4), vec![-1.0, -0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_empty_custom_table_rejected() {
        assert_eq!(WaveformTable::from_samples(Vec::new()), Err(SynthError::EmptyWaveform));
        assert_eq!(WaveformTable::with_size(WaveformKind::Sine, 0).len(), 1);
    }
}
