//! Note event types forwarded to the unit.

use crate::error::{SynthError, SynthResult};

/// MIDI note number (0-127).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteNumber(u8);

impl NoteNumber {
    /// Middle C.
    pub const MIDDLE_C: NoteNumber = NoteNumber(60);

    /// Concert A (440 Hz).
    pub const A4: NoteNumber = NoteNumber(69);

    /// Create a note number, rejecting values above 127.
    pub fn new(note: u8) -> SynthResult<Self> {
        if note <= 127 {
            Ok(Self(note))
        } else {
            Err(SynthError::MidiValueOutOfRange(note as u32))
        }
    }

    /// Raw note number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Equal-temperament frequency in Hz (A4 = 440 Hz).
    pub fn frequency(self) -> f64 {
        440.0 * 2.0_f64.powf((self.0 as f64 - 69.0) / 12.0)
    }
}

impl TryFrom<u8> for NoteNumber {
    type Error = SynthError;

    fn try_from(value: u8) -> SynthResult<Self> {
        Self::new(value)
    }
}

impl std::fmt::Display for NoteNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
        let octave = self.0 as i32 / 12 - 1;
        write!(f, "{}{}", NAMES[(self.0 % 12) as usize], octave)
    }
}

/// MIDI velocity (0-127).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Velocity(u8);

impl Velocity {
    /// Full velocity.
    pub const MAX: Velocity = Velocity(127);

    /// Create a velocity, rejecting values above 127.
    pub fn new(velocity: u8) -> SynthResult<Self> {
        if velocity <= 127 {
            Ok(Self(velocity))
        } else {
            Err(SynthError::MidiValueOutOfRange(velocity as u32))
        }
    }

    /// Raw velocity.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Velocity {
    type Error = SynthError;

    fn try_from(value: u8) -> SynthResult<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frequency() {
        assert_relative_eq!(NoteNumber::A4.frequency(), 440.0);
        assert_relative_eq!(NoteNumber::new(81).unwrap().frequency(), 880.0, epsilon = 1e-9);
        assert_relative_eq!(NoteNumber::MIDDLE_C.frequency(), 261.6255653, epsilon = 1e-6);
    }

    #[test]
    fn test_range_checks() {
        assert!(NoteNumber::new(127).is_ok());
        assert_eq!(NoteNumber::new(128), Err(SynthError::MidiValueOutOfRange(128)));
        assert!(Velocity::try_from(200).is_err());
        assert_eq!(Velocity::MAX.get(), 127);
    }

    #[test]
    fn test_note_names() {
        assert_eq!(NoteNumber::MIDDLE_C.to_string(), "C4");
        assert_eq!(NoteNumber::A4.to_string(), "A4");
        assert_eq!(NoteNumber::new(0).unwrap().to_string(), "C-1");
    }
}
