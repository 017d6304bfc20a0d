//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Placeholder shown in an empty amount field
pub const AMOUNT_PLACEHOLDER: &str = "0.000";

/// Shown in place of the balance while a fetch is outstanding
pub const BALANCE_LOADING: &str = "Balance: ...";

/// Timeout applied to balance RPC calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "bridge-tui.log";

/// Directory under $HOME holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".bridge-tui";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Advisory shown when token selection is attempted without a wallet
pub const CONNECT_WALLET_MESSAGE: &str = "Please connect wallet";

/// Application name
pub const APP_NAME: &str = "Bridge TUI";
