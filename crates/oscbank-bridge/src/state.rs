//! Bridge lifecycle state.
//!
//! ```text
//! Uninitialized ──► Initializing ──► Ready
//! ```
//!
//! There are no reverse transitions. The unit handle, its tree and the
//! bridge's observer token only exist together, in `Ready`.

use std::sync::Arc;

use oscbank_core::ParameterSet;
use oscbank_host::{ObserverToken, ParameterTree, SynthUnit};

/// Public view of the bridge lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    /// No component available; writes are buffered.
    Uninitialized,
    /// Instantiation requested; writes are buffered.
    Initializing,
    /// Unit, tree and observer subscription in place.
    Ready,
}

impl BridgeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeStatus::Uninitialized => "uninitialized",
            BridgeStatus::Initializing => "initializing",
            BridgeStatus::Ready => "ready",
        }
    }
}

impl std::fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handles held once the unit is live.
#[derive(Clone)]
pub(crate) struct ReadyUnit {
    pub unit: Arc<dyn SynthUnit>,
    pub tree: Arc<ParameterTree>,
    pub token: ObserverToken,
}

pub(crate) enum BridgeState {
    Uninitialized { pending: ParameterSet },
    Initializing { pending: ParameterSet },
    Ready(ReadyUnit),
}

impl BridgeState {
    pub fn new() -> Self {
        BridgeState::Uninitialized {
            pending: ParameterSet::defaults(),
        }
    }

    pub fn status(&self) -> BridgeStatus {
        match self {
            BridgeState::Uninitialized { .. } => BridgeStatus::Uninitialized,
            BridgeState::Initializing { .. } => BridgeStatus::Initializing,
            BridgeState::Ready(_) => BridgeStatus::Ready,
        }
    }

    pub fn ready(&self) -> Option<&ReadyUnit> {
        match self {
            BridgeState::Ready(ready) => Some(ready),
            _ => None,
        }
    }

    /// Buffered values while the unit is unavailable.
    pub fn pending_mut(&mut self) -> Option<&mut ParameterSet> {
        match self {
            BridgeState::Uninitialized { pending } | BridgeState::Initializing { pending } => {
                Some(pending)
            }
            BridgeState::Ready(_) => None,
        }
    }

    /// Uninitialized → Initializing. Returns `false` from any other state.
    pub fn begin_initializing(&mut self) -> bool {
        match self {
            BridgeState::Uninitialized { pending } => {
                let pending = std::mem::take(pending);
                *self = BridgeState::Initializing { pending };
                true
            }
            _ => false,
        }
    }

    /// Initializing → Ready, handing back the buffered values.
    ///
    /// Returns `Err(ready)` unchanged from any other state.
    pub fn become_ready(&mut self, ready: ReadyUnit) -> Result<ParameterSet, ReadyUnit> {
        match self {
            BridgeState::Initializing { pending } => {
                let pending = std::mem::take(pending);
                *self = BridgeState::Ready(ready);
                Ok(pending)
            }
            _ => Err(ready),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oscbank_core::SynthParameter;
    use oscbank_host::OscillatorBankUnit;

    fn ready_unit() -> ReadyUnit {
        let unit: Arc<dyn SynthUnit> = Arc::new(OscillatorBankUnit::new());
        let tree = unit.parameter_tree();
        let token = tree.add_observer(|_, _| {});
        ReadyUnit { unit, tree, token }
    }

    #[test]
    fn test_forward_transitions_carry_pending() {
        let mut state = BridgeState::new();
        assert_eq!(state.status(), BridgeStatus::Uninitialized);

        state.pending_mut().unwrap().set(SynthParameter::Cutoff, 300.0);
        assert!(state.begin_initializing());
        assert_eq!(state.status(), BridgeStatus::Initializing);

        let pending = state.become_ready(ready_unit()).ok().unwrap();
        assert_eq!(pending.get(SynthParameter::Cutoff), 300.0);
        assert_eq!(state.status(), BridgeStatus::Ready);
        assert!(state.ready().is_some());
        assert!(state.pending_mut().is_none());
    }

    #[test]
    fn test_no_skipping_or_reversing() {
        let mut state = BridgeState::new();
        assert!(state.become_ready(ready_unit()).is_err());
        assert_eq!(state.status(), BridgeStatus::Uninitialized);

        state.begin_initializing();
        assert!(!state.begin_initializing());
        assert!(state.become_ready(ready_unit()).is_ok());
        assert!(!state.begin_initializing());
        assert!(state.become_ready(ready_unit()).is_err());
        assert_eq!(state.status(), BridgeStatus::Ready);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(BridgeStatus::Initializing.to_string(), "initializing");
    }
}
