//! Network layer - balance fetching against JSON-RPC nodes
//!
//! The Network actor receives fetch commands and sends back tagged results.

pub mod actor;
pub mod client;
pub mod fetcher;

pub use actor::NetworkActor;
pub use client::RpcBalanceFetcher;
pub use fetcher::{BalanceFetcher, FetchError};
