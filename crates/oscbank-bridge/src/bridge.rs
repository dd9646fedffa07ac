//! The parameter synchronization bridge.
//!
//! [`ParameterSyncBridge`] owns the link between application code, the
//! synth unit and on-screen controls:
//!
//! - Application writes go through the unit's parameter tree tagged with the
//!   bridge's own observer token, so they never echo back to the UI.
//! - Writes from anywhere else (host automation, another controller) reach
//!   the bridge's tree observer, possibly on a realtime thread. The observer
//!   only queues a task on the injected [`UiDispatch`] sink; listeners run
//!   there.
//! - Until the unit is instantiated, writes are buffered and applied once it
//!   is ready.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use oscbank_core::{
    NoteNumber, ParameterAddress, ParameterSet, ParameterValue, SynthConfig, SynthParameter,
    SynthResult, TreeValue, Velocity, WaveformBank, DEFAULT_CONFIG,
};
use oscbank_host::{
    ComponentRegistry, HostResult, OscillatorBankUnit, ParameterTree, SynthUnit,
};

use crate::dispatch::UiDispatch;
use crate::listener::{ListenerRegistry, ParameterUpdate, SharedListener};
use crate::state::{BridgeState, BridgeStatus, ReadyUnit};

/// Queue delivery of a tree change to the listeners.
///
/// Runs on the tree's notification context. Unknown addresses are dropped.
fn relay_parameter_change(
    listeners: &Arc<ListenerRegistry>,
    dispatch: &dyn UiDispatch,
    address: ParameterAddress,
    value: TreeValue,
) {
    let Some(parameter) = SynthParameter::from_address(address) else {
        return;
    };
    let listeners = Arc::clone(listeners);
    dispatch.dispatch(Box::new(move || {
        let update = ParameterUpdate::new(parameter, ParameterValue::from(value));
        listeners.deliver(&update);
    }));
}

struct BridgeInner {
    config: &'static SynthConfig,
    state: Mutex<BridgeState>,
    ready: Condvar,
    listeners: Arc<ListenerRegistry>,
    dispatch: Arc<dyn UiDispatch>,
    ramp_time: AtomicU64,
}

impl BridgeInner {
    fn ready_unit(&self) -> Option<ReadyUnit> {
        self.state.lock().ready().cloned()
    }

    fn ramp_time(&self) -> f64 {
        f64::from_bits(self.ramp_time.load(Ordering::Acquire))
    }

    /// Instantiation callback body: load waveforms, subscribe, go Ready.
    fn finish_setup(&self, unit: Arc<dyn SynthUnit>, waveforms: &WaveformBank) {
        if !waveforms.fits_slots() {
            log::warn!(
                "{} waveform tables supplied; the unit keeps the ones that fit its slots",
                waveforms.len()
            );
        }
        for (slot, table) in waveforms.iter() {
            unit.setup_waveform(slot, table.len());
            for (index, sample) in table.iter().enumerate() {
                unit.set_waveform(slot, sample, index);
            }
        }

        if !unit.is_set_up() {
            log::error!(
                "{} did not finish setup after waveform upload; staying {}",
                self.config.name,
                BridgeStatus::Initializing
            );
            return;
        }

        let tree = unit.parameter_tree();
        let mut state = self.state.lock();

        let token = {
            let listeners = Arc::clone(&self.listeners);
            let dispatch = Arc::clone(&self.dispatch);
            tree.add_observer(move |address, value| {
                relay_parameter_change(&listeners, dispatch.as_ref(), address, value);
            })
        };

        let ready = ReadyUnit {
            unit: Arc::clone(&unit),
            tree: Arc::clone(&tree),
            token,
        };
        match state.become_ready(ready) {
            Ok(pending) => {
                unit.set_parameters(&pending.to_tree_values());
                unit.set_ramp_time(self.ramp_time());
                self.ready.notify_all();
                log::debug!("{} ready ({} parameters)", self.config.name, tree.len());
            }
            Err(_) => {
                tree.remove_observer(token);
                log::warn!(
                    "{} instantiated while {}; discarding unit",
                    self.config.name,
                    state.status()
                );
            }
        }
    }
}

impl Drop for BridgeInner {
    fn drop(&mut self) {
        if let Some(ready) = self.state.get_mut().ready() {
            ready.tree.remove_observer(ready.token);
            log::debug!("{} bridge released", self.config.name);
        }
    }
}

/// Keeps a synth unit's parameters and the UI in step.
///
/// All methods take `&self` and may be called from any non-realtime thread.
/// Share the bridge with `Arc` if several threads need it; dropping the last
/// handle unsubscribes from the tree and releases the unit.
pub struct ParameterSyncBridge {
    inner: Arc<BridgeInner>,
}

impl ParameterSyncBridge {
    /// Bridge to the default oscillator bank with the standard waveforms.
    ///
    /// Registers [`OscillatorBankUnit`] in the global registry if nothing is
    /// registered for [`DEFAULT_CONFIG`] yet.
    pub fn new(dispatch: Arc<dyn UiDispatch>) -> Self {
        Self::with_waveforms(
            WaveformBank::standard(DEFAULT_CONFIG.waveform_size),
            dispatch,
        )
    }

    /// Bridge to the default oscillator bank with custom waveforms.
    pub fn with_waveforms(waveforms: WaveformBank, dispatch: Arc<dyn UiDispatch>) -> Self {
        let registry = ComponentRegistry::global();
        registry.register(DEFAULT_CONFIG.component, OscillatorBankUnit::factory());
        Self::with_registry(registry, &DEFAULT_CONFIG, waveforms, dispatch)
    }

    /// Bridge to the component `config` describes, looked up in `registry`.
    ///
    /// If no factory is registered the bridge stays
    /// [`BridgeStatus::Uninitialized`] and buffers writes. The registry is
    /// only consulted here: registering the component afterwards does not
    /// start this bridge, so register before constructing it.
    pub fn with_registry(
        registry: Arc<ComponentRegistry>,
        config: &'static SynthConfig,
        waveforms: WaveformBank,
        dispatch: Arc<dyn UiDispatch>,
    ) -> Self {
        let inner = Arc::new(BridgeInner {
            config,
            state: Mutex::new(BridgeState::new()),
            ready: Condvar::new(),
            listeners: Arc::new(ListenerRegistry::new()),
            dispatch,
            ramp_time: AtomicU64::new(config.ramp_time.to_bits()),
        });

        if registry.is_registered(&config.component) {
            // Hold the state lock across the request so the completion cannot
            // observe Uninitialized.
            let mut state = inner.state.lock();
            let weak: Weak<BridgeInner> = Arc::downgrade(&inner);
            let result = registry.instantiate(
                &config.component,
                move |result: HostResult<Arc<dyn SynthUnit>>| {
                    let Some(inner) = weak.upgrade() else {
                        log::debug!("bridge dropped before instantiation finished");
                        return;
                    };
                    match result {
                        Ok(unit) => inner.finish_setup(unit, &waveforms),
                        Err(err) => log::error!("failed to instantiate {}: {}", inner.config.name, err),
                    }
                },
            );
            match result {
                Ok(()) => {
                    state.begin_initializing();
                    log::debug!("instantiating {} ({})", config.name, config.component);
                }
                Err(err) => log::warn!("cannot instantiate {}: {}", config.name, err),
            }
        } else {
            log::debug!(
                "{} is not registered; parameter writes will be buffered",
                config.component
            );
        }

        Self { inner }
    }

    /// The configuration this bridge was created for.
    pub fn config(&self) -> &'static SynthConfig {
        self.inner.config
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Current lifecycle state.
    pub fn status(&self) -> BridgeStatus {
        self.inner.state.lock().status()
    }

    /// Whether the unit is instantiated and set up.
    pub fn is_ready(&self) -> bool {
        self.status() == BridgeStatus::Ready
    }

    /// Block until the unit is ready or `timeout` elapses.
    ///
    /// Returns whether the bridge is ready. A `timeout` too large to add to
    /// the current instant waits without a deadline.
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let mut state = self.inner.state.lock();
        if state.ready().is_some() {
            return true;
        }
        match Instant::now().checked_add(timeout) {
            Some(deadline) => {
                while state.ready().is_none() {
                    if self.inner.ready.wait_until(&mut state, deadline).timed_out() {
                        return state.ready().is_some();
                    }
                }
            }
            None => {
                while state.ready().is_none() {
                    self.inner.ready.wait(&mut state);
                }
            }
        }
        true
    }

    /// The live unit, once ready.
    pub fn unit(&self) -> Option<Arc<dyn SynthUnit>> {
        self.inner.ready_unit().map(|ready| ready.unit)
    }

    /// The unit's parameter tree, once ready.
    pub fn parameter_tree(&self) -> Option<Arc<ParameterTree>> {
        self.inner.ready_unit().map(|ready| ready.tree)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Push a full parameter array, one value per [`SynthParameter`] in
    /// index order.
    ///
    /// When ready, only values that differ from the tree are written. Before
    /// that the array replaces the buffered values.
    pub fn set_parameters(&self, values: &[ParameterValue]) -> SynthResult<()> {
        ParameterSet::check_len(values.len())?;

        let ready = {
            let mut state = self.inner.state.lock();
            if let Some(pending) = state.pending_mut() {
                *pending = ParameterSet::from_slice(values)?;
                log::trace!("buffered {} parameter values", values.len());
                return Ok(());
            }
            state.ready().cloned()
        };

        if let Some(ready) = ready {
            for (index, &value) in values.iter().enumerate() {
                write_if_changed(&ready, index, value as TreeValue);
            }
        }
        Ok(())
    }

    /// The unit's raw parameter array, or empty if there is no unit yet.
    pub fn parameters(&self) -> Vec<ParameterValue> {
        match self.inner.ready_unit() {
            Some(ready) => ready
                .unit
                .parameters()
                .into_iter()
                .map(ParameterValue::from)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Write a single parameter through the same path as
    /// [`set_parameters`](Self::set_parameters).
    pub fn set_parameter(&self, parameter: SynthParameter, value: ParameterValue) {
        let ready = {
            let mut state = self.inner.state.lock();
            if let Some(pending) = state.pending_mut() {
                pending.set(parameter, value);
                log::trace!("buffered {} = {}", parameter, value);
                return;
            }
            state.ready().cloned()
        };

        if let Some(ready) = ready {
            write_if_changed(&ready, parameter.index(), value as TreeValue);
        }
    }

    /// Current tree value of `parameter`, or `None` if there is no unit yet.
    pub fn parameter(&self, parameter: SynthParameter) -> Option<ParameterValue> {
        self.inner
            .ready_unit()
            .and_then(|ready| ready.tree.value(parameter.address()))
            .map(ParameterValue::from)
    }

    /// Tree observer entry point.
    ///
    /// Queues delivery of `value` to every listener that renders the
    /// parameter at `address`. Unknown addresses are ignored. Never calls a
    /// listener on the current thread.
    pub fn on_parameter_changed(&self, address: ParameterAddress, value: TreeValue) {
        relay_parameter_change(
            &self.inner.listeners,
            self.inner.dispatch.as_ref(),
            address,
            value,
        );
    }

    /// Registered UI listeners.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.inner.listeners
    }

    /// Register a UI listener. Returns `false` if it is already registered.
    pub fn add_listener(&self, listener: SharedListener) -> bool {
        self.inner.listeners.add(listener)
    }

    /// Unregister a UI listener. Returns `false` if it was not registered.
    ///
    /// Queued updates that have not run yet no longer reach it.
    pub fn remove_listener(&self, listener: &SharedListener) -> bool {
        self.inner.listeners.remove(listener)
    }

    // =========================================================================
    // Ramp time
    // =========================================================================

    /// Set the parameter ramp time in seconds.
    ///
    /// Applied to the unit now if ready, otherwise when it becomes ready.
    pub fn set_ramp_time(&self, seconds: f64) {
        self.inner.ramp_time.store(seconds.to_bits(), Ordering::Release);
        if let Some(ready) = self.inner.ready_unit() {
            ready.unit.set_ramp_time(seconds);
        }
    }

    /// Last ramp time set, in seconds.
    pub fn ramp_time(&self) -> f64 {
        self.inner.ramp_time()
    }

    // =========================================================================
    // Notes
    // =========================================================================

    /// Start a note at an explicit frequency. No-op without a unit.
    pub fn play(&self, note: NoteNumber, velocity: Velocity, frequency: f64) {
        match self.inner.ready_unit() {
            Some(ready) => ready.unit.start_note(note, velocity, frequency as f32),
            None => log::trace!("play {} ignored: no unit", note),
        }
    }

    /// Start a note at its equal-tempered frequency.
    pub fn play_note(&self, note: NoteNumber, velocity: Velocity) {
        self.play(note, velocity, note.frequency());
    }

    /// Release a note. No-op without a unit.
    pub fn stop(&self, note: NoteNumber) {
        match self.inner.ready_unit() {
            Some(ready) => ready.unit.stop_note(note),
            None => log::trace!("stop {} ignored: no unit", note),
        }
    }

    /// Reset the unit. No-op without a unit.
    pub fn reset(&self) {
        match self.inner.ready_unit() {
            Some(ready) => ready.unit.reset(),
            None => log::trace!("reset ignored: no unit"),
        }
    }
}

impl std::fmt::Debug for ParameterSyncBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterSyncBridge")
            .field("component", &self.inner.config.component)
            .field("status", &self.status())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}

/// Write one value through the tree if it differs from the stored one.
fn write_if_changed(ready: &ReadyUnit, index: usize, value: TreeValue) {
    let address = index as ParameterAddress;
    match ready.tree.value(address) {
        Some(current) if current != value => {
            ready.tree.set_value(address, value, Some(ready.token));
            ready.unit.set_parameter(index, value);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::UiQueue;
    use crate::listener::CallbackListener;
    use oscbank_core::{fourcc, ComponentDescription};

    static UNREGISTERED: SynthConfig = SynthConfig::new(
        "Missing",
        ComponentDescription::instrument(fourcc!(b"none"), fourcc!(b"Test")),
    );

    fn ready_bridge() -> (ParameterSyncBridge, crate::dispatch::UiQueueReceiver) {
        let registry = Arc::new(ComponentRegistry::new());
        registry.register(DEFAULT_CONFIG.component, OscillatorBankUnit::factory());
        let (queue, ui) = UiQueue::new();
        let bridge = ParameterSyncBridge::with_registry(
            registry,
            &DEFAULT_CONFIG,
            WaveformBank::standard(64),
            Arc::new(queue),
        );
        assert!(bridge.wait_ready(Duration::from_secs(5)));
        (bridge, ui)
    }

    #[test]
    fn test_unregistered_stays_uninitialized() {
        let (queue, _ui) = UiQueue::new();
        let bridge = ParameterSyncBridge::with_registry(
            Arc::new(ComponentRegistry::new()),
            &UNREGISTERED,
            WaveformBank::default(),
            Arc::new(queue),
        );
        assert_eq!(bridge.status(), BridgeStatus::Uninitialized);
        assert!(!bridge.wait_ready(Duration::from_millis(20)));
        assert!(bridge.parameters().is_empty());
        assert_eq!(bridge.parameter(SynthParameter::Cutoff), None);
        assert!(bridge.unit().is_none());
    }

    #[test]
    fn test_wait_ready_without_deadline() {
        let (bridge, _ui) = ready_bridge();
        assert!(bridge.wait_ready(Duration::MAX));
        assert!(bridge.is_ready());
    }

    #[test]
    fn test_late_registration_does_not_start_bridge() {
        let registry = Arc::new(ComponentRegistry::new());
        let (queue, _ui) = UiQueue::new();
        let bridge = ParameterSyncBridge::with_registry(
            Arc::clone(&registry),
            &UNREGISTERED,
            WaveformBank::default(),
            Arc::new(queue),
        );
        bridge.set_parameter(SynthParameter::Cutoff, 880.0);

        registry.register(UNREGISTERED.component, OscillatorBankUnit::factory());
        assert!(!bridge.wait_ready(Duration::from_millis(20)));
        assert_eq!(bridge.status(), BridgeStatus::Uninitialized);
        assert!(bridge.parameters().is_empty());
    }

    #[test]
    fn test_single_parameter_round_trip() {
        let (bridge, ui) = ready_bridge();
        bridge.set_parameter(SynthParameter::Cutoff, 2500.0);
        assert_eq!(bridge.parameter(SynthParameter::Cutoff), Some(2500.0));
        assert_eq!(bridge.parameters()[SynthParameter::Cutoff.index()], 2500.0);
        assert_eq!(ui.run_pending(), 0);
    }

    #[test]
    fn test_external_write_reaches_listener() {
        let (bridge, ui) = ready_bridge();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            bridge.add_listener(Arc::new(CallbackListener::for_parameters(
                &[SynthParameter::Cutoff],
                move |u| seen.lock().push(u.display.clone()),
            )));
        }

        let tree = bridge.parameter_tree().unwrap();
        tree.set_value(SynthParameter::Cutoff.address(), 5000.0, None);
        tree.set_value(SynthParameter::Resonance.address(), 0.2, None);
        assert!(seen.lock().is_empty());

        assert_eq!(ui.run_pending(), 2);
        assert_eq!(*seen.lock(), vec!["5.00 kHz".to_string()]);
    }

    #[test]
    fn test_ramp_time_forwarded() {
        let (bridge, _ui) = ready_bridge();
        assert_eq!(bridge.ramp_time(), DEFAULT_CONFIG.ramp_time);
        assert_eq!(bridge.unit().unwrap().ramp_time(), DEFAULT_CONFIG.ramp_time);
        bridge.set_ramp_time(0.01);
        assert_eq!(bridge.unit().unwrap().ramp_time(), 0.01);
    }

    #[test]
    fn test_drop_releases_observer() {
        let (bridge, _ui) = ready_bridge();
        let tree = bridge.parameter_tree().unwrap();
        assert_eq!(tree.observer_count(), 1);
        drop(bridge);

        // The instantiation thread may still hold the last handle briefly.
        let deadline = Instant::now() + Duration::from_secs(5);
        while tree.observer_count() != 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(tree.observer_count(), 0);
    }
}
