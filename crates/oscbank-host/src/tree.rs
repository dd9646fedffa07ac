//! Observable parameter tree.
//!
//! The [`ParameterTree`] is the live, addressable set of values a unit
//! exposes. It follows the audio unit model:
//!
//! - **Observers** subscribe with [`ParameterTree::add_observer`] and receive
//!   an [`ObserverToken`]. A write made with `originator = Some(token)` is
//!   delivered to every observer *except* the one holding that token, so a
//!   client can write without hearing its own change back.
//! - **Implementor observer**: the unit's own hook, called for every write
//!   regardless of originator. The unit uses it to keep its DSP-side state
//!   in sync with host and UI writes.
//!
//! # Thread Safety
//!
//! Values are stored as atomic bit patterns, so reads and writes never block.
//! Observers run synchronously on the writing thread, which may be a
//! realtime thread; they must hand any heavy work off elsewhere. The observer
//! list is snapshotted before delivery, so observers may add or remove
//! observers from inside a callback.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use oscbank_core::{ParameterAddress, TreeValue};

use crate::parameters::AuParameterUnit;

/// Callback invoked with `(address, value)` when a parameter changes.
pub type ParameterObserver = Arc<dyn Fn(ParameterAddress, TreeValue) + Send + Sync>;

/// Handle identifying one observer subscription.
///
/// Tokens are unique per tree. Passing a token as the originator of a write
/// suppresses delivery to that observer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverToken(u64);

impl ObserverToken {
    /// Raw token id (for logging).
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// One node of the parameter tree.
#[derive(Debug)]
pub struct TreeParameter {
    /// Address used for lookups and notifications.
    pub address: ParameterAddress,
    /// Stable identifier (e.g., "cutoff").
    pub identifier: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Minimum value.
    pub min: TreeValue,
    /// Maximum value.
    pub max: TreeValue,
    /// Unit for host display.
    pub unit: AuParameterUnit,
    value: AtomicU32,
}

impl TreeParameter {
    /// Create a tree parameter holding `value`.
    pub fn new(
        address: ParameterAddress,
        identifier: &'static str,
        name: &'static str,
        min: TreeValue,
        max: TreeValue,
        value: TreeValue,
    ) -> Self {
        Self {
            address,
            identifier,
            name,
            min,
            max,
            unit: AuParameterUnit::Generic,
            value: AtomicU32::new(value.to_bits()),
        }
    }

    /// Set the display unit.
    pub fn with_unit(mut self, unit: AuParameterUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Current value.
    pub fn value(&self) -> TreeValue {
        TreeValue::from_bits(self.value.load(Ordering::Acquire))
    }

    fn store(&self, value: TreeValue) {
        self.value.store(value.to_bits(), Ordering::Release);
    }
}

/// Live parameter tree with token-based observers.
pub struct ParameterTree {
    parameters: Vec<TreeParameter>,
    observers: RwLock<Vec<(ObserverToken, ParameterObserver)>>,
    implementor: RwLock<Option<ParameterObserver>>,
    next_token: AtomicU64,
}

impl ParameterTree {
    /// Create a tree from its parameters.
    pub fn new(parameters: Vec<TreeParameter>) -> Self {
        Self {
            parameters,
            observers: RwLock::new(Vec::new()),
            implementor: RwLock::new(None),
            next_token: AtomicU64::new(1),
        }
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the tree holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// All parameters in tree order.
    pub fn all_parameters(&self) -> &[TreeParameter] {
        &self.parameters
    }

    /// Find a parameter by address.
    pub fn parameter(&self, address: ParameterAddress) -> Option<&TreeParameter> {
        // Dense trees store address N at index N.
        let direct = usize::try_from(address)
            .ok()
            .and_then(|i| self.parameters.get(i))
            .filter(|p| p.address == address);

        direct.or_else(|| self.parameters.iter().find(|p| p.address == address))
    }

    /// Current value of a parameter, or `None` for unknown addresses.
    pub fn value(&self, address: ParameterAddress) -> Option<TreeValue> {
        self.parameter(address).map(TreeParameter::value)
    }

    /// Write a parameter value and notify observers.
    ///
    /// The implementor observer always runs. Every other observer runs unless
    /// its token equals `originator`. Returns `false` for unknown addresses.
    pub fn set_value(
        &self,
        address: ParameterAddress,
        value: TreeValue,
        originator: Option<ObserverToken>,
    ) -> bool {
        let Some(parameter) = self.parameter(address) else {
            return false;
        };
        parameter.store(value);

        let implementor = self.implementor.read().clone();
        if let Some(implementor) = implementor {
            implementor(address, value);
        }

        let observers: Vec<(ObserverToken, ParameterObserver)> = self.observers.read().clone();
        for (token, observer) in observers {
            if Some(token) != originator {
                observer(address, value);
            }
        }
        true
    }

    /// Store a value coming from the unit itself, without notifying anyone.
    ///
    /// Used when the unit's internal state is pushed wholesale (e.g., a
    /// deferred parameter array applied at setup).
    pub fn store_value(&self, address: ParameterAddress, value: TreeValue) -> bool {
        match self.parameter(address) {
            Some(parameter) => {
                parameter.store(value);
                true
            }
            None => false,
        }
    }

    /// Subscribe to value changes.
    pub fn add_observer<F>(&self, observer: F) -> ObserverToken
    where
        F: Fn(ParameterAddress, TreeValue) + Send + Sync + 'static,
    {
        let token = ObserverToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((token, Arc::new(observer)));
        log::trace!("parameter tree observer {} added", token.id());
        token
    }

    /// Cancel a subscription. Returns `false` if the token was not active.
    pub fn remove_observer(&self, token: ObserverToken) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(t, _)| *t != token);
        let removed = observers.len() != before;
        if removed {
            log::trace!("parameter tree observer {} removed", token.id());
        }
        removed
    }

    /// Number of active observer subscriptions.
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Install the unit-side hook that sees every write.
    pub fn set_implementor_value_observer<F>(&self, observer: F)
    where
        F: Fn(ParameterAddress, TreeValue) + Send + Sync + 'static,
    {
        *self.implementor.write() = Some(Arc::new(observer));
    }
}

impl std::fmt::Debug for ParameterTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterTree")
            .field("parameters", &self.parameters.len())
            .field("observers", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn two_parameter_tree() -> ParameterTree {
        ParameterTree::new(vec![
            TreeParameter::new(0, "a", "A", 0.0, 1.0, 0.0),
            TreeParameter::new(1, "b", "B", 0.0, 1.0, 0.5),
        ])
    }

    #[test]
    fn test_set_and_read() {
        let tree = two_parameter_tree();
        assert_eq!(tree.value(1), Some(0.5));
        assert!(tree.set_value(1, 0.25, None));
        assert_eq!(tree.value(1), Some(0.25));
        assert!(!tree.set_value(7, 0.25, None));
        assert_eq!(tree.value(7), None);
    }

    #[test]
    fn test_originator_is_skipped() {
        let tree = two_parameter_tree();
        let a_hits = Arc::new(AtomicUsize::new(0));
        let b_hits = Arc::new(AtomicUsize::new(0));

        let a = {
            let hits = Arc::clone(&a_hits);
            tree.add_observer(move |_, _| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        let _b = {
            let hits = Arc::clone(&b_hits);
            tree.add_observer(move |_, _| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        tree.set_value(0, 1.0, Some(a));
        assert_eq!(a_hits.load(Ordering::SeqCst), 0);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);

        tree.set_value(0, 0.5, None);
        assert_eq!(a_hits.load(Ordering::SeqCst), 1);
        assert_eq!(b_hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_implementor_sees_every_write() {
        let tree = two_parameter_tree();
        let seen = Arc::new(AtomicUsize::new(0));
        {
            let seen = Arc::clone(&seen);
            tree.set_implementor_value_observer(move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
            });
        }
        let token = tree.add_observer(|_, _| {});
        tree.set_value(0, 0.1, Some(token));
        tree.set_value(1, 0.2, None);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_store_value_is_silent() {
        let tree = two_parameter_tree();
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&hits);
            tree.add_observer(move |_, _| {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert!(tree.store_value(0, 0.9));
        assert_eq!(tree.value(0), Some(0.9));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_observer() {
        let tree = two_parameter_tree();
        let token = tree.add_observer(|_, _| {});
        assert_eq!(tree.observer_count(), 1);
        assert!(tree.remove_observer(token));
        assert!(!tree.remove_observer(token));
        assert_eq!(tree.observer_count(), 0);
    }

    #[test]
    fn test_observer_may_unsubscribe_itself() {
        let tree = Arc::new(two_parameter_tree());
        let weak = Arc::downgrade(&tree);
        let slot: Arc<parking_lot::Mutex<Option<ObserverToken>>> = Arc::default();
        let token = {
            let slot = Arc::clone(&slot);
            tree.add_observer(move |_, _| {
                if let (Some(tree), Some(token)) = (weak.upgrade(), *slot.lock()) {
                    tree.remove_observer(token);
                }
            })
        };
        *slot.lock() = Some(token);
        tree.set_value(0, 0.3, None);
        assert_eq!(tree.observer_count(), 0);
    }

    #[test]
    fn test_sparse_addresses() {
        let tree = ParameterTree::new(vec![TreeParameter::new(40, "x", "X", 0.0, 1.0, 0.0)]);
        assert!(tree.parameter(40).is_some());
        assert!(tree.parameter(0).is_none());
    }
}
