//! In-process oscillator bank unit.
//!
//! [`OscillatorBankUnit`] implements [`SynthUnit`] without a platform audio
//! framework. It keeps the state a rendering engine would consume (raw
//! parameter array, waveform slots, held notes, ramp time) but renders no
//! audio itself.
//!
//! The raw parameter array mirrors the parameter tree: the unit installs an
//! implementor observer on its tree, so every tree write (host automation,
//! bridge writes) lands in the array as well.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use oscbank_core::{
    NoteNumber, ParameterSet, TreeValue, Velocity, DEFAULT_RAMP_TIME, WAVEFORM_SLOTS,
};

use crate::error::HostResult;
use crate::parameters::build_parameter_tree;
use crate::registry::UnitFactory;
use crate::tree::ParameterTree;
use crate::unit::SynthUnit;

/// A held note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveNote {
    pub velocity: Velocity,
    pub frequency: f32,
}

/// Raw parameter storage shared with the tree's implementor observer.
struct ParameterMirror {
    values: Vec<AtomicU32>,
}

impl ParameterMirror {
    fn new(values: &[TreeValue]) -> Self {
        Self {
            values: values.iter().map(|v| AtomicU32::new(v.to_bits())).collect(),
        }
    }

    fn get(&self, index: usize) -> Option<TreeValue> {
        self.values
            .get(index)
            .map(|v| TreeValue::from_bits(v.load(Ordering::Acquire)))
    }

    fn set(&self, index: usize, value: TreeValue) -> bool {
        match self.values.get(index) {
            Some(slot) => {
                slot.store(value.to_bits(), Ordering::Release);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> Vec<TreeValue> {
        self.values
            .iter()
            .map(|v| TreeValue::from_bits(v.load(Ordering::Acquire)))
            .collect()
    }
}

/// In-process oscillator bank audio unit.
pub struct OscillatorBankUnit {
    tree: Arc<ParameterTree>,
    mirror: Arc<ParameterMirror>,
    waveforms: Mutex<Vec<Option<Vec<f32>>>>,
    notes: Mutex<BTreeMap<NoteNumber, ActiveNote>>,
    ramp_time: AtomicU64,
}

impl OscillatorBankUnit {
    /// Create a unit holding default parameter values.
    pub fn new() -> Self {
        Self::with_parameters(&ParameterSet::defaults())
    }

    /// Create a unit seeded with `values`.
    pub fn with_parameters(values: &ParameterSet) -> Self {
        let tree = Arc::new(build_parameter_tree(values));
        let mirror = Arc::new(ParameterMirror::new(&values.to_tree_values()));

        {
            let mirror = Arc::clone(&mirror);
            tree.set_implementor_value_observer(move |address, value| {
                if let Ok(index) = usize::try_from(address) {
                    mirror.set(index, value);
                }
            });
        }

        Self {
            tree,
            mirror,
            waveforms: Mutex::new(vec![None; WAVEFORM_SLOTS]),
            notes: Mutex::new(BTreeMap::new()),
            ramp_time: AtomicU64::new(DEFAULT_RAMP_TIME.to_bits()),
        }
    }

    /// Factory suitable for [`ComponentRegistry::register`](crate::ComponentRegistry::register).
    pub fn factory() -> UnitFactory {
        Arc::new(|| -> HostResult<Arc<dyn SynthUnit>> { Ok(Arc::new(OscillatorBankUnit::new())) })
    }

    /// Currently held notes, in note order.
    pub fn active_notes(&self) -> Vec<(NoteNumber, ActiveNote)> {
        self.notes.lock().iter().map(|(n, a)| (*n, *a)).collect()
    }

    /// Copy of the samples loaded into `slot`, if it has been set up.
    pub fn waveform(&self, slot: usize) -> Option<Vec<f32>> {
        self.waveforms.lock().get(slot).cloned().flatten()
    }

    /// Number of waveform slots that have been set up.
    pub fn loaded_waveform_count(&self) -> usize {
        self.waveforms.lock().iter().filter(|w| w.is_some()).count()
    }

    /// One raw parameter value.
    pub fn parameter(&self, index: usize) -> Option<TreeValue> {
        self.mirror.get(index)
    }
}

impl Default for OscillatorBankUnit {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthUnit for OscillatorBankUnit {
    fn parameter_tree(&self) -> Arc<ParameterTree> {
        Arc::clone(&self.tree)
    }

    fn is_set_up(&self) -> bool {
        self.loaded_waveform_count() > 0
    }

    fn parameters(&self) -> Vec<TreeValue> {
        self.mirror.snapshot()
    }

    fn set_parameters(&self, values: &[TreeValue]) {
        if values.len() != self.mirror.values.len() {
            log::trace!(
                "raw parameter write with {} values for {} parameters",
                values.len(),
                self.mirror.values.len()
            );
        }
        for (index, &value) in values.iter().enumerate() {
            if self.mirror.set(index, value) {
                self.tree.store_value(index as u64, value);
            }
        }
    }

    fn set_parameter(&self, index: usize, value: TreeValue) {
        if self.mirror.set(index, value) {
            self.tree.store_value(index as u64, value);
        }
    }

    fn start_note(&self, note: NoteNumber, velocity: Velocity, frequency: f32) {
        self.notes.lock().insert(note, ActiveNote { velocity, frequency });
    }

    fn stop_note(&self, note: NoteNumber) {
        self.notes.lock().remove(&note);
    }

    fn reset(&self) {
        self.notes.lock().clear();
    }

    fn setup_waveform(&self, slot: u32, size: usize) {
        let mut waveforms = self.waveforms.lock();
        match waveforms.get_mut(slot as usize) {
            Some(entry) => *entry = Some(vec![0.0; size]),
            None => log::trace!("ignoring waveform slot {} (unit has {})", slot, WAVEFORM_SLOTS),
        }
    }

    fn set_waveform(&self, slot: u32, value: f32, index: usize) {
        let mut waveforms = self.waveforms.lock();
        if let Some(Some(table)) = waveforms.get_mut(slot as usize) {
            if let Some(sample) = table.get_mut(index) {
                *sample = value;
            }
        }
    }

    fn ramp_time(&self) -> f64 {
        f64::from_bits(self.ramp_time.load(Ordering::Relaxed))
    }

    fn set_ramp_time(&self, seconds: f64) {
        self.ramp_time.store(seconds.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oscbank_core::SynthParameter;

    fn note(n: u8) -> NoteNumber {
        NoteNumber::new(n).unwrap()
    }

    #[test]
    fn test_defaults_in_mirror_and_tree() {
        let unit = OscillatorBankUnit::new();
        let values = unit.parameters();
        assert_eq!(values.len(), SynthParameter::COUNT);
        assert_eq!(values[SynthParameter::Cutoff.index()], 1000.0);
        assert_eq!(unit.parameter_tree().value(SynthParameter::Cutoff.address()), Some(1000.0));
        assert!(!unit.is_set_up());
    }

    #[test]
    fn test_tree_writes_reach_mirror() {
        let unit = OscillatorBankUnit::new();
        let tree = unit.parameter_tree();
        tree.set_value(SynthParameter::Resonance.address(), 0.6, None);
        assert_eq!(unit.parameter(SynthParameter::Resonance.index()), Some(0.6));
    }

    #[test]
    fn test_raw_writes_update_tree_silently() {
        let unit = OscillatorBankUnit::new();
        let tree = unit.parameter_tree();
        let hits = Arc::new(AtomicU32::new(0));
        {
            let hits = Arc::clone(&hits);
            tree.add_observer(move |_, _| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        let values = vec![0.25; SynthParameter::COUNT];
        unit.set_parameters(&values);
        assert_eq!(unit.parameters(), values);
        assert_eq!(tree.value(SynthParameter::DelayMix.address()), Some(0.25));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_short_raw_write_leaves_tail() {
        let unit = OscillatorBankUnit::new();
        unit.set_parameters(&[0.9, 0.9]);
        assert_eq!(unit.parameter(0), Some(0.9));
        assert_eq!(unit.parameter(SynthParameter::Cutoff.index()), Some(1000.0));
    }

    #[test]
    fn test_notes_and_reset() {
        let unit = OscillatorBankUnit::new();
        unit.start_note(note(60), Velocity::MAX, 261.63);
        unit.start_note(note(64), Velocity::new(90).unwrap(), 329.63);
        assert_eq!(unit.active_notes().len(), 2);

        unit.stop_note(note(60));
        let held: Vec<NoteNumber> = unit.active_notes().into_iter().map(|(n, _)| n).collect();
        assert_eq!(held, vec![note(64)]);

        unit.reset();
        assert!(unit.active_notes().is_empty());
    }

    #[test]
    fn test_waveform_upload() {
        let unit = OscillatorBankUnit::new();
        unit.setup_waveform(1, 4);
        for (i, v) in [0.1, 0.2, 0.3, 0.4].into_iter().enumerate() {
            unit.set_waveform(1, v, i);
        }
        // Out-of-range writes are dropped.
        unit.set_waveform(1, 9.0, 4);
        unit.set_waveform(2, 9.0, 0);
        unit.setup_waveform(WAVEFORM_SLOTS as u32, 4);

        assert_eq!(unit.waveform(1), Some(vec![0.1, 0.2, 0.3, 0.4]));
        assert_eq!(unit.waveform(2), None);
        assert_eq!(unit.loaded_waveform_count(), 1);
        assert!(unit.is_set_up());
    }

    #[test]
    fn test_ramp_time() {
        let unit = OscillatorBankUnit::new();
        assert_eq!(unit.ramp_time(), DEFAULT_RAMP_TIME);
        unit.set_ramp_time(0.05);
        assert_eq!(unit.ramp_time(), 0.05);
    }
}
