use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A network the bridge operates on
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
}

impl Network {
    pub fn new(name: impl Into<String>, chain_id: u64, rpc_url: impl Into<String>) -> Self {
        Network {
            name: name.into(),
            chain_id,
            rpc_url: rpc_url.into(),
        }
    }
}

/// A fungible token that can be bridged
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub chain_id: u64,
    /// Contract address; empty or all-zero for the chain's native coin
    #[serde(default)]
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub logo_uri: Option<String>,
}

impl Token {
    pub fn new(
        chain_id: u64,
        address: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Token {
            chain_id,
            address: address.into(),
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            logo_uri: None,
        }
    }

    /// Whether this token is the chain's native coin rather than a contract
    pub fn is_native(&self) -> bool {
        let address = self.address.trim();
        address.is_empty() || Address::from_str(address).is_ok_and(|a| a == Address::ZERO)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.chain_id)
    }
}

/// Marker for a bridge transfer that just completed.
///
/// Only compared for change; its contents are never consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: String,
    pub completed_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(tx_hash: impl Into<String>) -> Self {
        Receipt {
            tx_hash: tx_hash.into(),
            completed_at: Utc::now(),
        }
    }
}

/// The (token, account) pair a balance belongs to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceKey {
    pub token: Token,
    pub account: Address,
}

/// Wallet connectivity as seen by the bridge
#[derive(Clone, Debug)]
pub struct WalletContext {
    /// Connected account, `None` when no wallet is connected
    pub account: Option<Address>,
    /// Chain the wallet is currently on
    pub chain_id: Option<u64>,
    /// Network the bridge expects the wallet to be on
    pub network: Network,
}

impl WalletContext {
    pub fn new(network: Network) -> Self {
        WalletContext {
            account: None,
            chain_id: None,
            network,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// True when a connected wallet sits on a different chain than expected
    pub fn network_mismatch(&self) -> bool {
        self.is_connected() && self.chain_id != Some(self.network.chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_token_detection() {
        assert!(Token::new(1, "", "Ether", "ETH", 18).is_native());
        assert!(Token::new(1, "0x0000000000000000000000000000000000000000", "Ether", "ETH", 18).is_native());
        assert!(!Token::new(1, "0x6B175474E89094C44Da98b954EedeAC495271d0F", "Dai", "DAI", 18).is_native());
    }

    #[test]
    fn test_network_mismatch_requires_connection() {
        let mut wallet = WalletContext::new(Network::new("Mainnet", 1, "http://localhost:8545"));
        assert!(!wallet.network_mismatch());

        wallet.account = Some(Address::ZERO);
        wallet.chain_id = Some(100);
        assert!(wallet.network_mismatch());

        wallet.chain_id = Some(1);
        assert!(!wallet.network_mismatch());
    }
}
