//! Host error types.

use oscbank_core::ComponentDescription;
use thiserror::Error;

/// Errors raised while registering or instantiating audio unit components.
#[derive(Debug, Error)]
pub enum HostError {
    /// No factory has been registered for the component.
    #[error("component '{0}' is not registered")]
    ComponentNotRegistered(ComponentDescription),

    /// The component factory failed to build a unit.
    #[error("failed to instantiate '{description}': {reason}")]
    InstantiationFailed {
        description: ComponentDescription,
        reason: String,
    },

    /// The instantiation worker thread could not be started.
    #[error("failed to spawn instantiation thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type alias for host operations.
pub type HostResult<T> = Result<T, HostError>;
