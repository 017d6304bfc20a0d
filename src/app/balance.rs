//! Balance sync - refetches the from-token balance whenever its inputs change
//!
//! Every fetch carries the id it was issued with. Only the most recently
//! issued request may publish a balance, so a slow response for a token the
//! user has already moved away from is dropped on arrival.

use alloy_primitives::{Address, U256};

use crate::messages::network::BalanceRequest;
use crate::models::{BalanceKey, Receipt, Token};

/// Where the balance currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BalanceStatus {
    /// No token or no account selected
    Idle,
    /// A fetch is outstanding for the current selection
    Loading,
    /// The latest fetch finished; the balance may still be unknown
    Loaded,
}

/// Inputs the balance depends on, as last observed
#[derive(Clone, Debug, PartialEq)]
struct Trigger {
    key: Option<BalanceKey>,
    receipt: Option<Receipt>,
}

/// Owner of the balance and the loading flag
#[derive(Debug)]
pub struct BalanceSync {
    balance: Option<U256>,
    status: BalanceStatus,
    pending: Option<BalanceRequest>,
    observed: Option<Trigger>,
    next_request_id: u64,
}

impl Default for BalanceSync {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceSync {
    pub fn new() -> Self {
        BalanceSync {
            balance: None,
            status: BalanceStatus::Idle,
            pending: None,
            observed: None,
            next_request_id: 1,
        }
    }

    pub fn balance(&self) -> Option<U256> {
        self.balance
    }

    pub fn status(&self) -> BalanceStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == BalanceStatus::Loading
    }

    /// Id of the request whose result would currently be accepted
    pub fn pending_id(&self) -> Option<u64> {
        self.pending.as_ref().map(|request| request.id)
    }

    /// Re-evaluate the balance inputs.
    ///
    /// Returns a request to issue when the (token, account, receipt) triple
    /// changed since the previous call and both token and account are set.
    pub fn observe(
        &mut self,
        token: Option<&Token>,
        account: Option<Address>,
        receipt: Option<&Receipt>,
    ) -> Option<BalanceRequest> {
        let key = match (token, account) {
            (Some(token), Some(account)) => Some(BalanceKey {
                token: token.clone(),
                account,
            }),
            _ => None,
        };
        let trigger = Trigger {
            key,
            receipt: receipt.cloned(),
        };
        if self.observed.as_ref() == Some(&trigger) {
            return None;
        }
        self.observed = Some(trigger.clone());
        self.balance = None;

        let Some(key) = trigger.key else {
            self.status = BalanceStatus::Idle;
            self.pending = None;
            return None;
        };

        let request = BalanceRequest {
            id: self.next_request_id,
            key,
        };
        self.next_request_id += 1;

        if let Some(previous) = self.pending.replace(request.clone()) {
            tracing::debug!(superseded = previous.id, id = request.id, "Superseding balance fetch");
        }
        self.status = BalanceStatus::Loading;
        Some(request)
    }

    /// Apply a finished fetch. Returns false when the result was stale.
    pub fn apply(&mut self, id: u64, key: &BalanceKey, result: Result<U256, String>) -> bool {
        let current = self.observed.as_ref().and_then(|trigger| trigger.key.as_ref());
        let is_current = self.pending_id() == Some(id) && current == Some(key);
        if !is_current {
            tracing::debug!(id, pending = ?self.pending_id(), "Discarding stale balance");
            return false;
        }

        self.balance = match result {
            Ok(balance) => {
                tracing::info!(id, token = %key.token, account = %key.account, %balance, "Balance loaded");
                Some(balance)
            }
            Err(error) => {
                tracing::warn!(id, token = %key.token, account = %key.account, %error, "Balance fetch failed");
                None
            }
        };
        self.pending = None;
        self.status = BalanceStatus::Loaded;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str) -> Token {
        Token::new(1, "", symbol, symbol, 18)
    }

    fn account() -> Address {
        Address::repeat_byte(0x11)
    }

    #[test]
    fn test_idle_without_account() {
        let mut sync = BalanceSync::new();
        assert!(sync.observe(Some(&token("ETH")), None, None).is_none());
        assert_eq!(sync.status(), BalanceStatus::Idle);
        assert_eq!(sync.balance(), None);
        assert!(!sync.is_loading());
    }

    #[test]
    fn test_loading_then_loaded() {
        let mut sync = BalanceSync::new();
        let request = sync.observe(Some(&token("ETH")), Some(account()), None).unwrap();
        assert!(sync.is_loading());

        assert!(sync.apply(request.id, &request.key, Ok(U256::from(7u64))));
        assert!(!sync.is_loading());
        assert_eq!(sync.status(), BalanceStatus::Loaded);
        assert_eq!(sync.balance(), Some(U256::from(7u64)));
    }

    #[test]
    fn test_unchanged_inputs_do_not_refetch() {
        let mut sync = BalanceSync::new();
        let eth = token("ETH");
        assert!(sync.observe(Some(&eth), Some(account()), None).is_some());
        assert!(sync.observe(Some(&eth), Some(account()), None).is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut sync = BalanceSync::new();
        let first = sync.observe(Some(&token("T1")), Some(account()), None).unwrap();
        let second = sync.observe(Some(&token("T2")), Some(account()), None).unwrap();

        assert!(!sync.apply(first.id, &first.key, Ok(U256::from(1u64))));
        assert!(sync.is_loading());
        assert_eq!(sync.balance(), None);

        assert!(sync.apply(second.id, &second.key, Ok(U256::from(2u64))));
        assert_eq!(sync.balance(), Some(U256::from(2u64)));

        // Arriving after the newer result changes nothing
        assert!(!sync.apply(first.id, &first.key, Ok(U256::from(1u64))));
        assert_eq!(sync.balance(), Some(U256::from(2u64)));
    }

    #[test]
    fn test_receipt_supersedes_same_pair() {
        let mut sync = BalanceSync::new();
        let eth = token("ETH");
        let before = sync.observe(Some(&eth), Some(account()), None).unwrap();
        let receipt = Receipt::new("0xabc");
        let after = sync.observe(Some(&eth), Some(account()), Some(&receipt)).unwrap();
        assert_eq!(before.key, after.key);

        assert!(!sync.apply(before.id, &before.key, Ok(U256::from(1u64))));
        assert!(sync.apply(after.id, &after.key, Ok(U256::from(2u64))));
    }

    #[test]
    fn test_failure_is_unknown_balance() {
        let mut sync = BalanceSync::new();
        let request = sync.observe(Some(&token("ETH")), Some(account()), None).unwrap();
        assert!(sync.apply(request.id, &request.key, Err("connection refused".into())));
        assert!(!sync.is_loading());
        assert_eq!(sync.balance(), None);
    }

    #[test]
    fn test_deselect_while_loading_goes_idle() {
        let mut sync = BalanceSync::new();
        let request = sync.observe(Some(&token("ETH")), Some(account()), None).unwrap();
        assert!(sync.observe(None, Some(account()), None).is_none());
        assert_eq!(sync.status(), BalanceStatus::Idle);
        assert!(!sync.apply(request.id, &request.key, Ok(U256::from(3u64))));
        assert_eq!(sync.balance(), None);
    }
}
