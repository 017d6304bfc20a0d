//! Amount input - raw text of the amount field plus its parsed value

use alloy_primitives::U256;
use thiserror::Error;

use crate::codec::{format_value, parse_value};
use crate::models::Token;

/// Returned when the amount field is used before a token is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount input is disabled until a token is selected")]
pub struct InputUnavailable;

/// The amount field. `parsed` always follows `raw` for the selected token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountInput {
    raw: String,
    parsed: Option<U256>,
}

impl AmountInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text exactly as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Amount in smallest units, `None` when the text does not parse
    pub fn parsed(&self) -> Option<U256> {
        self.parsed
    }

    /// Replace the text and publish its parsed amount in the same step
    pub fn on_text_changed(
        &mut self,
        token: Option<&Token>,
        text: impl Into<String>,
    ) -> Result<(), InputUnavailable> {
        let token = token.ok_or(InputUnavailable)?;
        self.raw = text.into();
        self.parsed = parse_value(&self.raw, token.decimals);
        Ok(())
    }

    /// Snap the field to the given balance; an unknown balance counts as zero
    pub fn on_max_requested(
        &mut self,
        token: Option<&Token>,
        balance: Option<U256>,
    ) -> Result<(), InputUnavailable> {
        let token = token.ok_or(InputUnavailable)?;
        let balance = balance.unwrap_or(U256::ZERO);
        self.raw = format_value(Some(balance), token.decimals);
        self.parsed = Some(balance);
        Ok(())
    }

    /// Recompute the parsed amount after the selected token changed
    pub fn rederive(&mut self, token: Option<&Token>) {
        self.parsed = token.and_then(|token| parse_value(&self.raw, token.decimals));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc() -> Token {
        Token::new(1, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USD Coin", "USDC", 6)
    }

    #[test]
    fn test_text_change_publishes_parsed_amount() {
        let mut input = AmountInput::new();
        input.on_text_changed(Some(&usdc()), "2.5").unwrap();
        assert_eq!(input.raw(), "2.5");
        assert_eq!(input.parsed(), Some(U256::from(2_500_000u64)));
    }

    #[test]
    fn test_unparsable_text_is_kept() {
        let mut input = AmountInput::new();
        input.on_text_changed(Some(&usdc()), "2.5x").unwrap();
        assert_eq!(input.raw(), "2.5x");
        assert_eq!(input.parsed(), None);

        input.on_text_changed(Some(&usdc()), "").unwrap();
        assert_eq!(input.parsed(), None);
    }

    #[test]
    fn test_unavailable_without_token() {
        let mut input = AmountInput::new();
        assert_eq!(input.on_text_changed(None, "1"), Err(InputUnavailable));
        assert_eq!(input.on_max_requested(None, Some(U256::from(1u64))), Err(InputUnavailable));
        assert_eq!(input.raw(), "");
    }

    #[test]
    fn test_max_is_idempotent() {
        let mut input = AmountInput::new();
        let balance = Some(U256::from(1_234_500u64));
        input.on_max_requested(Some(&usdc()), balance).unwrap();
        let first = input.clone();
        input.on_max_requested(Some(&usdc()), balance).unwrap();
        assert_eq!(input, first);
        assert_eq!(input.raw(), "1.2345");
        assert_eq!(input.parsed(), balance);
    }

    #[test]
    fn test_max_with_unknown_balance_is_zero() {
        let mut input = AmountInput::new();
        input.on_max_requested(Some(&usdc()), None).unwrap();
        assert_eq!(input.raw(), "0");
        assert_eq!(input.parsed(), Some(U256::ZERO));
    }

    #[test]
    fn test_rederive_follows_new_decimals() {
        let mut input = AmountInput::new();
        input.on_text_changed(Some(&usdc()), "1").unwrap();
        let dai = Token::new(1, "0x6B175474E89094C44Da98b954EedeAC495271d0F", "Dai", "DAI", 18);
        input.rederive(Some(&dai));
        assert_eq!(input.parsed(), Some(U256::from(1_000_000_000_000_000_000u128)));

        input.rederive(None);
        assert_eq!(input.raw(), "1");
        assert_eq!(input.parsed(), None);
    }
}
