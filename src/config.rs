use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::models::{Network, Token};

/// User configuration, read from `~/.bridge-tui/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Networks the bridge can expect the wallet on; the first is the default
    pub networks: Vec<Network>,
    /// Tokens offered in the picker, filtered by the expected network
    pub tokens: Vec<Token>,
    /// Account adopted when the wallet is connected
    pub account: Option<Address>,
    /// Chain the wallet reports; defaults to the first network
    pub wallet_chain_id: Option<u64>,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            networks: vec![
                Network::new("Mainnet", 1, "https://eth.llamarpc.com"),
                Network::new("Gnosis", 100, "https://rpc.gnosischain.com"),
            ],
            tokens: vec![
                Token::new(1, "", "Ether", "ETH", 18),
                Token::new(1, "0x6B175474E89094C44Da98b954EedeAC495271d0F", "Dai Stablecoin", "DAI", 18),
                Token::new(1, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USD Coin", "USDC", 6),
                Token::new(100, "", "xDai", "XDAI", 18),
                Token::new(100, "0xDDAfbb505ad214D7b80b1f830fcCc89B60fb7A83", "USD Coin on xDai", "USDC", 6),
            ],
            account: None,
            wallet_chain_id: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Default config file location, when a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to built-in defaults
    pub fn load() -> Result<Config> {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load `path` if it exists; a missing file yields the defaults
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }
        Self::load_from(path)
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.networks.is_empty() {
            bail!("config must list at least one network");
        }
        if let Some(token) = self
            .tokens
            .iter()
            .find(|token| !self.networks.iter().any(|n| n.chain_id == token.chain_id))
        {
            bail!("token {} refers to unknown chain {}", token.symbol, token.chain_id);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Tokens that live on `chain_id`
    pub fn tokens_for(&self, chain_id: u64) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|token| token.chain_id == chain_id)
            .cloned()
            .collect()
    }
}
