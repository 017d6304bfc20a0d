//! # Bridge TUI
//!
//! The "from" side of a token bridge in the terminal: pick a source token,
//! watch its wallet balance and enter the amount to bridge.
//!
//! ## Features
//! - Token picker gated on wallet connection and network
//! - Balance refresh on token, account or receipt change
//! - Amount field with live parsing into smallest units and a Max shortcut
//! - Native and ERC-20 balances over JSON-RPC
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod codec;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use codec::{format_value, parse_value};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Network, Receipt, Token, WalletContext};
pub use network::{BalanceFetcher, NetworkActor, RpcBalanceFetcher};
