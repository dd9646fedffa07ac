//! The oscillator bank's fixed parameter enumeration.
//!
//! [`SynthParameter`] defines the index ↔ identity mapping shared by the
//! parameter set, the parameter tree (address = index) and UI listeners.
//! The order is part of the unit's contract and never changes at runtime.

use crate::parameter_format::Formatter;
use crate::parameter_info::ParameterInfo;
use crate::types::{ParameterAddress, ParameterValue};

/// Every parameter exposed by the oscillator bank, in address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SynthParameter {
    Index1 = 0,
    Index2,
    MorphBalance,
    Morph1PitchOffset,
    Morph2PitchOffset,
    Morph1Mix,
    Morph2Mix,
    SubOscMix,
    SubOscOctavesDown,
    SubOscIsSquare,
    FmMix,
    FmMod,
    NoiseMix,
    LfoIndex,
    LfoAmplitude,
    LfoRate,
    Cutoff,
    Resonance,
    FilterMix,
    FilterAdsrMix,
    IsMono,
    Glide,
    FilterAttackDuration,
    FilterDecayDuration,
    FilterSustainLevel,
    FilterReleaseDuration,
    AttackDuration,
    DecayDuration,
    SustainLevel,
    ReleaseDuration,
    DetuningOffset,
    DetuningMultiplier,
    MasterVolume,
    BitCrushDepth,
    BitCrushSampleRate,
    AutoPanOn,
    AutoPanFrequency,
    ReverbOn,
    ReverbFeedback,
    ReverbHighPass,
    ReverbMix,
    DelayOn,
    DelayFeedback,
    DelayTime,
    DelayMix,
}

const PERCENT: Formatter = Formatter::Percent { precision: 0 };
const SECONDS: Formatter = Formatter::Seconds { precision: 2 };

/// Metadata table, indexed by `SynthParameter as usize`.
static INFOS: [ParameterInfo; SynthParameter::COUNT] = [
    ParameterInfo::new("index1", "Osc 1 Morph", 0.0, 1.0, 0.0).with_short_name("Morph 1"),
    ParameterInfo::new("index2", "Osc 2 Morph", 0.0, 1.0, 0.0).with_short_name("Morph 2"),
    ParameterInfo::new("morphBalance", "Osc Mix", 0.0, 1.0, 0.5).with_short_name("Mix"),
    ParameterInfo::new("morph1PitchOffset", "Osc 1 Semitones", -12.0, 12.0, 0.0)
        .with_short_name("Semi 1")
        .with_formatter(Formatter::Semitones),
    ParameterInfo::new("morph2PitchOffset", "Osc 2 Semitones", -12.0, 12.0, 0.0)
        .with_short_name("Semi 2")
        .with_formatter(Formatter::Semitones),
    ParameterInfo::new("morph1Mix", "Osc 1 Volume", 0.0, 1.0, 0.5)
        .with_short_name("Vol 1")
        .with_formatter(PERCENT),
    ParameterInfo::new("morph2Mix", "Osc 2 Volume", 0.0, 1.0, 0.5)
        .with_short_name("Vol 2")
        .with_formatter(PERCENT),
    ParameterInfo::new("subOscMix", "Sub Osc Mix", 0.0, 1.0, 0.0)
        .with_short_name("Sub")
        .with_formatter(PERCENT),
    ParameterInfo::new("subOscOctavesDown", "Sub Osc Octaves Down", 1.0, 2.0, 1.0)
        .with_short_name("Sub Oct")
        .with_steps(2)
        .with_formatter(Formatter::Integer),
    ParameterInfo::toggle("subOscIsSquare", "Sub Osc Square", false).with_short_name("Sub Sq"),
    ParameterInfo::new("fmMix", "FM Mix", 0.0, 1.0, 0.0)
        .with_short_name("FM")
        .with_formatter(PERCENT),
    ParameterInfo::new("fmMod", "FM Modulation", 0.0, 15.0, 0.0).with_short_name("FM Mod"),
    ParameterInfo::new("noiseMix", "Noise Mix", 0.0, 1.0, 0.0)
        .with_short_name("Noise")
        .with_formatter(PERCENT),
    ParameterInfo::new("lfoIndex", "LFO Shape", 0.0, 3.0, 0.0)
        .with_short_name("LFO")
        .with_steps(3)
        .with_formatter(Formatter::Integer),
    ParameterInfo::new("lfoAmplitude", "LFO Amount", 0.0, 1.0, 0.0)
        .with_short_name("LFO Amt")
        .with_formatter(PERCENT),
    ParameterInfo::new("lfoRate", "LFO Rate", 0.0, 10.0, 0.0)
        .with_short_name("LFO Rate")
        .with_formatter(Formatter::Frequency),
    ParameterInfo::new("cutoff", "Filter Cutoff", 0.0, 22050.0, 1000.0)
        .with_short_name("Cutoff")
        .with_formatter(Formatter::Frequency),
    ParameterInfo::new("resonance", "Filter Resonance", 0.0, 0.99, 0.1)
        .with_short_name("Rez")
        .with_formatter(PERCENT),
    ParameterInfo::new("filterMix", "Filter Mix", 0.0, 1.0, 1.0)
        .with_short_name("Flt Mix")
        .with_formatter(PERCENT),
    ParameterInfo::new("filterADSRMix", "Filter Envelope Amount", 0.0, 1.2, 0.0)
        .with_short_name("Flt Env"),
    ParameterInfo::toggle("isMono", "Mono", false),
    ParameterInfo::new("glide", "Glide", 0.0, 0.2, 0.0).with_formatter(SECONDS),
    ParameterInfo::new("filterAttackDuration", "Filter Attack", 0.0005, 2.0, 0.1)
        .with_short_name("F Atk")
        .with_formatter(SECONDS),
    ParameterInfo::new("filterDecayDuration", "Filter Decay", 0.005, 2.0, 0.1)
        .with_short_name("F Dec")
        .with_formatter(SECONDS),
    ParameterInfo::new("filterSustainLevel", "Filter Sustain", 0.0, 1.0, 1.0)
        .with_short_name("F Sus")
        .with_formatter(PERCENT),
    ParameterInfo::new("filterReleaseDuration", "Filter Release", 0.0, 2.0, 0.1)
        .with_short_name("F Rel")
        .with_formatter(SECONDS),
    ParameterInfo::new("attackDuration", "Attack", 0.0005, 2.0, 0.1)
        .with_short_name("Atk")
        .with_formatter(SECONDS),
    ParameterInfo::new("decayDuration", "Decay", 0.005, 2.0, 0.1)
        .with_short_name("Dec")
        .with_formatter(SECONDS),
    ParameterInfo::new("sustainLevel", "Sustain", 0.0, 1.0, 1.0)
        .with_short_name("Sus")
        .with_formatter(PERCENT),
    ParameterInfo::new("releaseDuration", "Release", 0.004, 2.0, 0.1)
        .with_short_name("Rel")
        .with_formatter(SECONDS),
    ParameterInfo::new("detuningOffset", "Detune Offset", -4.0, 4.0, 0.0)
        .with_short_name("Detune")
        .with_formatter(Formatter::Frequency),
    ParameterInfo::new("detuningMultiplier", "Osc 2 Detune", 0.5, 2.0, 1.0)
        .with_short_name("Detune 2")
        .with_formatter(Formatter::Ratio { precision: 2 }),
    ParameterInfo::new("masterVolume", "Master Volume", 0.0, 2.0, 0.5).with_short_name("Vol"),
    ParameterInfo::new("bitCrushDepth", "Bit Depth", 1.0, 24.0, 24.0)
        .with_short_name("Bits")
        .with_steps(23)
        .with_formatter(Formatter::Integer),
    ParameterInfo::new("bitCrushSampleRate", "Crush Sample Rate", 4096.0, 48000.0, 48000.0)
        .with_short_name("Crush")
        .with_formatter(Formatter::Frequency),
    ParameterInfo::toggle("autoPanOn", "Auto Pan", false).with_short_name("Pan"),
    ParameterInfo::new("autoPanFrequency", "Auto Pan Rate", 0.0, 10.0, 0.25)
        .with_short_name("Pan Rate")
        .with_formatter(Formatter::Frequency),
    ParameterInfo::toggle("reverbOn", "Reverb", false).with_short_name("Verb"),
    ParameterInfo::new("reverbFeedback", "Reverb Size", 0.0, 1.0, 0.5)
        .with_short_name("Size")
        .with_formatter(PERCENT),
    ParameterInfo::new("reverbHighPass", "Reverb Low Cut", 80.0, 900.0, 80.0)
        .with_short_name("Low Cut")
        .with_formatter(Formatter::Frequency),
    ParameterInfo::new("reverbMix", "Reverb Mix", 0.0, 1.0, 0.0)
        .with_short_name("Verb Mix")
        .with_formatter(PERCENT),
    ParameterInfo::toggle("delayOn", "Delay", false).with_short_name("Dly"),
    ParameterInfo::new("delayFeedback", "Delay Feedback", 0.0, 0.9, 0.1)
        .with_short_name("Fdbk")
        .with_formatter(PERCENT),
    ParameterInfo::new("delayTime", "Delay Time", 0.1, 1.5, 0.5)
        .with_short_name("Time")
        .with_formatter(SECONDS),
    ParameterInfo::new("delayMix", "Delay Mix", 0.0, 1.0, 0.125)
        .with_short_name("Dly Mix")
        .with_formatter(PERCENT),
];

impl SynthParameter {
    /// Number of parameters in the set.
    pub const COUNT: usize = 45;

    /// All parameters in address order.
    pub const ALL: [SynthParameter; Self::COUNT] = [
        Self::Index1,
        Self::Index2,
        Self::MorphBalance,
        Self::Morph1PitchOffset,
        Self::Morph2PitchOffset,
        Self::Morph1Mix,
        Self::Morph2Mix,
        Self::SubOscMix,
        Self::SubOscOctavesDown,
        Self::SubOscIsSquare,
        Self::FmMix,
        Self::FmMod,
        Self::NoiseMix,
        Self::LfoIndex,
        Self::LfoAmplitude,
        Self::LfoRate,
        Self::Cutoff,
        Self::Resonance,
        Self::FilterMix,
        Self::FilterAdsrMix,
        Self::IsMono,
        Self::Glide,
        Self::FilterAttackDuration,
        Self::FilterDecayDuration,
        Self::FilterSustainLevel,
        Self::FilterReleaseDuration,
        Self::AttackDuration,
        Self::DecayDuration,
        Self::SustainLevel,
        Self::ReleaseDuration,
        Self::DetuningOffset,
        Self::DetuningMultiplier,
        Self::MasterVolume,
        Self::BitCrushDepth,
        Self::BitCrushSampleRate,
        Self::AutoPanOn,
        Self::AutoPanFrequency,
        Self::ReverbOn,
        Self::ReverbFeedback,
        Self::ReverbHighPass,
        Self::ReverbMix,
        Self::DelayOn,
        Self::DelayFeedback,
        Self::DelayTime,
        Self::DelayMix,
    ];

    /// Resolve a parameter tree address.
    ///
    /// Returns `None` for addresses outside the enumeration.
    pub fn from_address(address: ParameterAddress) -> Option<Self> {
        usize::try_from(address).ok().and_then(Self::from_index)
    }

    /// Resolve a parameter set index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Look up a parameter by its tree identifier (e.g., "cutoff").
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.info().identifier == identifier)
    }

    /// Index of this parameter in the parameter set.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Address of this parameter in the parameter tree.
    pub const fn address(self) -> ParameterAddress {
        self as ParameterAddress
    }

    /// Metadata for this parameter.
    pub fn info(self) -> &'static ParameterInfo {
        &INFOS[self.index()]
    }

    /// Default plain value.
    pub fn default_value(self) -> ParameterValue {
        self.info().default
    }

    /// Format a plain value the way a knob label shows it.
    pub fn display(self, value: ParameterValue) -> String {
        self.info().display(value)
    }
}

impl std::fmt::Display for SynthParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_address_order() {
        for (i, p) in SynthParameter::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(SynthParameter::from_address(i as u64), Some(*p));
        }
    }

    #[test]
    fn test_unknown_address() {
        assert_eq!(SynthParameter::from_address(SynthParameter::COUNT as u64), None);
        assert_eq!(SynthParameter::from_address(u64::MAX), None);
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = SynthParameter::ALL.iter().map(|p| p.info().identifier).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SynthParameter::COUNT);
    }

    #[test]
    fn test_defaults_within_range() {
        for p in SynthParameter::ALL {
            let info = p.info();
            assert!(info.min <= info.default && info.default <= info.max, "{}", p);
        }
    }

    #[test]
    fn test_lookup_by_identifier() {
        assert_eq!(SynthParameter::from_identifier("cutoff"), Some(SynthParameter::Cutoff));
        assert_eq!(SynthParameter::from_identifier("delayMix"), Some(SynthParameter::DelayMix));
        assert_eq!(SynthParameter::from_identifier("nope"), None);
    }

    #[test]
    fn test_display_uses_formatter() {
        assert_eq!(SynthParameter::Morph1PitchOffset.display(7.0), "+7 st");
        assert_eq!(SynthParameter::Resonance.display(0.5), "50%");
        assert_eq!(SynthParameter::ReverbOn.display(1.0), "On");
        assert_eq!(SynthParameter::Cutoff.display(1000.0), "1.00 kHz");
    }
}
