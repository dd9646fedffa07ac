//! UI listeners and their registry.
//!
//! Listeners are looked up by parameter identity: each listener says which
//! [`SynthParameter`]s it renders, and only those updates reach it.

use std::sync::Arc;

use parking_lot::RwLock;

use oscbank_core::{ParameterValue, SynthParameter};

/// A parameter change on its way to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterUpdate {
    pub parameter: SynthParameter,
    pub value: ParameterValue,
    /// Display text, e.g. "1.00 kHz".
    pub display: String,
}

impl ParameterUpdate {
    pub fn new(parameter: SynthParameter, value: ParameterValue) -> Self {
        Self {
            parameter,
            value,
            display: parameter.display(value),
        }
    }
}

/// Something on screen that renders parameter values.
///
/// Methods are only ever called on the UI dispatch context.
pub trait ParameterListener: Send + Sync {
    /// Whether this listener has a control for `parameter`.
    fn renders(&self, parameter: SynthParameter) -> bool;

    /// Show a new value.
    fn render_parameter_update(&self, update: &ParameterUpdate);
}

/// Shared listener handle.
pub type SharedListener = Arc<dyn ParameterListener>;

/// Closure-backed listener for a fixed set of parameters.
pub struct CallbackListener {
    parameters: Option<Vec<SynthParameter>>,
    callback: Box<dyn Fn(&ParameterUpdate) + Send + Sync>,
}

impl CallbackListener {
    /// Listener for every parameter.
    pub fn all<F>(callback: F) -> Self
    where
        F: Fn(&ParameterUpdate) + Send + Sync + 'static,
    {
        Self {
            parameters: None,
            callback: Box::new(callback),
        }
    }

    /// Listener for `parameters` only.
    pub fn for_parameters<F>(parameters: &[SynthParameter], callback: F) -> Self
    where
        F: Fn(&ParameterUpdate) + Send + Sync + 'static,
    {
        Self {
            parameters: Some(parameters.to_vec()),
            callback: Box::new(callback),
        }
    }
}

impl ParameterListener for CallbackListener {
    fn renders(&self, parameter: SynthParameter) -> bool {
        match &self.parameters {
            Some(parameters) => parameters.contains(&parameter),
            None => true,
        }
    }

    fn render_parameter_update(&self, update: &ParameterUpdate) {
        (self.callback)(update);
    }
}

fn same_listener(a: &SharedListener, b: &SharedListener) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

/// Set of listeners, safe to modify while deliveries are in flight.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<SharedListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Returns `false` if it is already registered.
    pub fn add(&self, listener: SharedListener) -> bool {
        let mut listeners = self.listeners.write();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&self, listener: &SharedListener) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| !same_listener(l, listener));
        listeners.len() != before
    }

    pub fn contains(&self, listener: &SharedListener) -> bool {
        self.listeners.read().iter().any(|l| same_listener(l, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Current membership.
    pub fn snapshot(&self) -> Vec<SharedListener> {
        self.listeners.read().clone()
    }

    /// Deliver `update` to every listener that renders its parameter.
    ///
    /// Membership is snapshotted first, so listeners may add or remove
    /// listeners from inside `render_parameter_update`. Returns the number
    /// of listeners reached.
    pub fn deliver(&self, update: &ParameterUpdate) -> usize {
        let mut delivered = 0;
        for listener in self.snapshot() {
            if listener.renders(update.parameter) {
                listener.render_parameter_update(update);
                delivered += 1;
            }
        }
        delivered
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}
