//! Network messages - communication between App and Network layers

use alloy_primitives::U256;

use crate::models::BalanceKey;

/// A balance fetch tagged with the trigger it was issued for
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRequest {
    pub id: u64,
    pub key: BalanceKey,
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the balance of `key.account` in `key.token`
    FetchBalance(BalanceRequest),

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A balance fetch finished, successfully or not
    Balance {
        id: u64,
        key: BalanceKey,
        result: Result<U256, String>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Balance { id, .. } => *id,
        }
    }
}
