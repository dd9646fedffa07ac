//! Component registration and asynchronous instantiation.
//!
//! Components are registered under their [`ComponentDescription`] with a
//! factory function. [`ComponentRegistry::instantiate`] runs the factory on a
//! worker thread and reports the result through a completion callback, the
//! way a platform audio unit is handed back asynchronously.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use oscbank_core::ComponentDescription;

use crate::error::{HostError, HostResult};
use crate::unit::SynthUnit;

/// Factory function type for creating unit instances.
pub type UnitFactory = Arc<dyn Fn() -> HostResult<Arc<dyn SynthUnit>> + Send + Sync>;

/// Process-wide registry (see [`ComponentRegistry::global`]).
static GLOBAL_REGISTRY: OnceLock<Arc<ComponentRegistry>> = OnceLock::new();

/// Registry of component factories keyed by description.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: RwLock<HashMap<ComponentDescription, UnitFactory>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<ComponentRegistry> {
        Arc::clone(GLOBAL_REGISTRY.get_or_init(|| Arc::new(ComponentRegistry::new())))
    }

    /// Register a factory for `description`.
    ///
    /// Registration is idempotent: if a factory is already registered the
    /// existing one is kept and `false` is returned.
    pub fn register(&self, description: ComponentDescription, factory: UnitFactory) -> bool {
        let mut factories = self.factories.write();
        if factories.contains_key(&description) {
            return false;
        }
        factories.insert(description, factory);
        log::debug!("component registered: {}", description);
        true
    }

    /// Check if a factory has been registered for `description`.
    pub fn is_registered(&self, description: &ComponentDescription) -> bool {
        self.factories.read().contains_key(description)
    }

    fn factory(&self, description: &ComponentDescription) -> HostResult<UnitFactory> {
        self.factories
            .read()
            .get(description)
            .cloned()
            .ok_or(HostError::ComponentNotRegistered(*description))
    }

    /// Instantiate a unit on a worker thread.
    ///
    /// Returns an error immediately (without calling `completion`) if the
    /// component is not registered or the worker cannot be started.
    /// Otherwise `completion` is called exactly once from the worker thread
    /// with the factory's result.
    pub fn instantiate<F>(&self, description: &ComponentDescription, completion: F) -> HostResult<()>
    where
        F: FnOnce(HostResult<Arc<dyn SynthUnit>>) + Send + 'static,
    {
        let factory = self.factory(description)?;
        let description = *description;

        std::thread::Builder::new()
            .name(format!("oscbank-instantiate-{}", description.subtype))
            .spawn(move || {
                log::debug!("instantiating {}", description);
                completion(factory());
            })?;

        Ok(())
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.factories.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillator_bank::OscillatorBankUnit;
    use oscbank_core::{fourcc, SynthParameter, DEFAULT_CONFIG};
    use std::time::Duration;

    #[test]
    fn test_register_is_idempotent() {
        let registry = ComponentRegistry::new();
        let desc = DEFAULT_CONFIG.component;
        assert!(!registry.is_registered(&desc));
        assert!(registry.register(desc, OscillatorBankUnit::factory()));
        assert!(!registry.register(desc, OscillatorBankUnit::factory()));
        assert!(registry.is_registered(&desc));
        assert!(!registry.is_registered(&ComponentDescription::instrument(
            fourcc!(b"aks2"),
            fourcc!(b"AuKt")
        )));
    }

    #[test]
    fn test_instantiate_unregistered() {
        let registry = ComponentRegistry::new();
        let desc = ComponentDescription::instrument(fourcc!(b"none"), fourcc!(b"Test"));
        let result = registry.instantiate(&desc, |_| panic!("completion must not run"));
        assert!(matches!(result, Err(HostError::ComponentNotRegistered(d)) if d == desc));
    }

    #[test]
    fn test_instantiate_async_completion() {
        let registry = ComponentRegistry::new();
        registry.register(DEFAULT_CONFIG.component, OscillatorBankUnit::factory());

        let (tx, rx) = crossbeam_channel::bounded(1);
        registry
            .instantiate(&DEFAULT_CONFIG.component, move |result| {
                let _ = tx.send(result.map(|unit| unit.parameters().len()));
            })
            .unwrap();

        let count = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(count, SynthParameter::COUNT);
    }

    #[test]
    fn test_factory_error_is_delivered() {
        let registry = ComponentRegistry::new();
        let desc = ComponentDescription::instrument(fourcc!(b"fail"), fourcc!(b"Test"));
        registry.register(
            desc,
            Arc::new(move || -> HostResult<Arc<dyn SynthUnit>> {
                Err(HostError::InstantiationFailed {
                    description: desc,
                    reason: "no waveforms".to_string(),
                })
            }),
        );

        let (tx, rx) = crossbeam_channel::bounded(1);
        registry
            .instantiate(&desc, move |result| {
                let _ = tx.send(result.is_err());
            })
            .unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    }

    #[test]
    fn test_global_is_shared() {
        let a = ComponentRegistry::global();
        let b = ComponentRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
