//! Knob Panel - console demo of the oscbank parameter bridge.
//!
//! This demo shows how to:
//! 1. Register a custom component and build a bridge with custom waveforms
//! 2. Render parameter updates from a listener that owns a few "knobs"
//! 3. Push a parameter array from application code (no UI echo)
//! 4. Simulate host automation from another thread (UI updates arrive)
//! 5. Play and release notes
//!
//! Preset overrides are taken from the command line as `identifier=value`:
//!
//! ```text
//! cargo run -p knob-panel -- cutoff=1200 resonance=0.7
//! ```
//!
//! Run with `RUST_LOG=debug` to see the bridge lifecycle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use oscbank::prelude::*;

/// The panel's own registration of the oscillator bank.
static PANEL_CONFIG: SynthConfig = SynthConfig::new(
    "Knob Panel Bank",
    ComponentDescription::instrument(fourcc!(b"knob"), fourcc!(b"Demo")),
)
.with_vendor("knob-panel")
.with_ramp_time(0.01)
.with_waveform_size(512);

// =============================================================================
// Knob Panel
// =============================================================================

/// The controls shown on screen.
const KNOBS: [SynthParameter; 6] = [
    SynthParameter::Cutoff,
    SynthParameter::Resonance,
    SynthParameter::MorphBalance,
    SynthParameter::ReverbMix,
    SynthParameter::DelayTime,
    SynthParameter::MasterVolume,
];

struct KnobPanel {
    name: &'static str,
}

impl ParameterListener for KnobPanel {
    fn renders(&self, parameter: SynthParameter) -> bool {
        KNOBS.contains(&parameter)
    }

    fn render_parameter_update(&self, update: &ParameterUpdate) {
        let info = update.parameter.info();
        let fill = (info.normalize(update.value) * 20.0).round() as usize;
        println!(
            "[{}] {:<16} [{:<20}] {}",
            self.name,
            info.short_name,
            "#".repeat(fill.min(20)),
            update.display
        );
    }
}

/// Triangle, square and sine, with a 25% pulse in place of the sawtooth.
fn panel_waveforms(size: usize) -> SynthResult<WaveformBank> {
    let pulse = (0..size)
        .map(|i| if i < size / 4 { 1.0 } else { -1.0 })
        .collect();
    Ok(WaveformBank::new(vec![
        WaveformTable::with_size(WaveformKind::Triangle, size),
        WaveformTable::with_size(WaveformKind::Square, size),
        WaveformTable::with_size(WaveformKind::Sine, size),
        WaveformTable::from_samples(pulse)?,
    ]))
}

/// Apply `identifier=value` overrides to `preset`, skipping malformed ones.
fn apply_overrides(preset: &mut ParameterSet, args: impl Iterator<Item = String>) {
    for arg in args {
        let Some((identifier, value)) = arg.split_once('=') else {
            log::warn!("ignoring '{}': expected identifier=value", arg);
            continue;
        };
        let Some(parameter) = SynthParameter::from_identifier(identifier) else {
            log::warn!("unknown parameter '{}'", identifier);
            continue;
        };
        match value.parse::<f64>() {
            Ok(value) => {
                log::info!(
                    "{}: {} -> {}",
                    parameter,
                    parameter.display(preset.get(parameter)),
                    parameter.display(value)
                );
                preset.set(parameter, value);
            }
            Err(err) => log::warn!("bad value for {}: {}", identifier, err),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let waveforms = match panel_waveforms(PANEL_CONFIG.waveform_size) {
        Ok(waveforms) => waveforms,
        Err(err) => {
            log::error!("cannot build waveforms: {}", err);
            return;
        }
    };

    let registry = ComponentRegistry::global();
    registry.register(PANEL_CONFIG.component, OscillatorBankUnit::factory());

    let (queue, ui) = UiQueue::new();
    let bridge = Arc::new(ParameterSyncBridge::with_registry(
        registry,
        &PANEL_CONFIG,
        waveforms,
        Arc::new(queue),
    ));
    let panel: SharedListener = Arc::new(KnobPanel { name: "panel" });
    bridge.add_listener(Arc::clone(&panel));

    if !bridge.wait_ready(Duration::from_secs(2)) {
        log::error!("{} did not become ready ({})", bridge.config().name, bridge.status());
        return;
    }
    log::info!(
        "{} by {} ready, ramp {} s",
        bridge.config().name,
        bridge.config().vendor,
        bridge.ramp_time()
    );
    if let Some(tree) = bridge.parameter_tree() {
        for parameter in tree.all_parameters() {
            log::debug!(
                "  {:>2} {:<14} [{}, {}] {}",
                parameter.address,
                parameter.identifier,
                parameter.min,
                parameter.max,
                parameter.value()
            );
        }
    }

    // Application-side preset: goes to the unit, not back to the panel.
    let mut preset = ParameterSet::defaults();
    preset.set(SynthParameter::Cutoff, 3200.0);
    preset.set(SynthParameter::Resonance, 0.4);
    preset.set(SynthParameter::ReverbOn, 1.0);
    apply_overrides(&mut preset, std::env::args().skip(1));
    let edited = preset
        .iter()
        .filter(|(parameter, value)| *value != parameter.default_value())
        .count();
    log::debug!("preset differs from defaults in {} of {} values", edited, preset.len());
    if let Err(err) = bridge.set_parameters(preset.as_slice()) {
        log::error!("preset rejected: {}", err);
        return;
    }
    log::info!("preset applied, {} UI updates queued", ui.len());

    bridge.play_note(NoteNumber::MIDDLE_C, Velocity::MAX);

    // Host automation sweeping the filter from another thread.
    let automation = match bridge.parameter_tree() {
        Some(tree) => std::thread::spawn(move || {
            for step in 0..8 {
                let cutoff = 500.0 + step as f32 * 750.0;
                tree.set_value(SynthParameter::Cutoff.address(), cutoff, None);
                tree.set_value(SynthParameter::MorphBalance.address(), step as f32 / 7.0, None);
                std::thread::sleep(Duration::from_millis(25));
            }
        }),
        None => return,
    };

    // UI loop.
    let rendered = ui.run_until(Instant::now() + Duration::from_millis(400));
    if automation.join().is_err() {
        log::error!("automation thread panicked");
    }
    let rendered = rendered + ui.run_pending();
    log::info!("rendered {} updates", rendered);

    bridge.stop(NoteNumber::MIDDLE_C);
    bridge.reset();
    if bridge.remove_listener(&panel) {
        log::debug!("panel detached, {} listeners left", bridge.listeners().len());
    }
}
