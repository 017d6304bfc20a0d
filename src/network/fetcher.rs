//! Balance fetching abstraction, so the network actor can run against a
//! real node or an in-process fake.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::models::Token;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("node returned error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("invalid node response: {0}")]
    InvalidResponse(String),
    #[error("invalid token address {0:?}")]
    InvalidTokenAddress(String),
    #[error("no RPC endpoint configured for chain {0}")]
    UnknownChain(u64),
}

#[async_trait]
pub trait BalanceFetcher: Send + Sync + 'static {
    /// Current balance of `account` in `token`, in smallest units
    async fn fetch(&self, token: &Token, account: Address) -> Result<U256, FetchError>;
}
