//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits balance fetches and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod amount;
pub mod balance;
pub mod selection;

pub use state::{AppState, BridgeContext};
pub use actor::AppActor;
pub use amount::{AmountInput, InputUnavailable};
pub use balance::{BalanceStatus, BalanceSync};
pub use selection::{SelectionBlocked, SelectionGate, Surface};
