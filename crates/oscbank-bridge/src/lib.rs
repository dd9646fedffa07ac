//! # oscbank-bridge
//!
//! Keeps an oscillator bank unit's parameters and on-screen controls in step.
//!
//! - [`ParameterSyncBridge`] - Owns the unit lifecycle and the sync paths
//! - [`UiDispatch`] - Ordered hand-off to the UI context ([`UiQueue`],
//!   [`ThreadExecutor`])
//! - [`ParameterListener`] - Controls that render parameter values
//!
//! ## Data flow
//!
//! ```text
//! app ── set_parameters ──► ParameterTree (originator = bridge token)
//!                                │
//! host automation ──────────────►│
//!                                ▼
//!                       bridge observer (any thread)
//!                                │ UiDispatch
//!                                ▼
//!                      ListenerRegistry::deliver (UI context)
//! ```

pub mod bridge;
pub mod dispatch;
pub mod listener;
mod state;

pub use bridge::ParameterSyncBridge;
pub use dispatch::{ThreadExecutor, UiDispatch, UiQueue, UiQueueReceiver, UiTask};
pub use listener::{
    CallbackListener, ListenerRegistry, ParameterListener, ParameterUpdate, SharedListener,
};
pub use state::BridgeStatus;
