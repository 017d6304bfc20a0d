//! App state - pure data structure with no I/O logic

use crate::app::amount::AmountInput;
use crate::app::balance::BalanceSync;
use crate::app::selection::{SelectionGate, Surface};
use crate::codec::format_value;
use crate::config::Config;
use crate::constants::BALANCE_LOADING;
use crate::messages::ui_events::InputMode;
use crate::messages::RenderState;
use crate::models::{Network, Receipt, Token, WalletContext};

/// Bridge transaction state shared by the from-token panel
#[derive(Debug, Default)]
pub struct BridgeContext {
    pub from_token: Option<Token>,
    /// Last completed transfer, used only to trigger a balance refresh
    pub receipt: Option<Receipt>,
    pub balance: BalanceSync,
    pub amount: AmountInput,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub config: Config,
    pub wallet: WalletContext,
    pub bridge: BridgeContext,
    pub selection: SelectionGate,

    // Amount field editing
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let network = config
            .networks
            .first()
            .cloned()
            .unwrap_or_else(|| Network::new("Mainnet", 1, ""));
        AppState {
            config,
            wallet: WalletContext::new(network),
            bridge: BridgeContext::default(),
            selection: SelectionGate::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        }
    }

    /// Tokens offered on the bridge's expected network
    pub fn tokens(&self) -> Vec<Token> {
        self.config.tokens_for(self.wallet.network.chain_id)
    }

    /// Balance line as displayed under the token name
    pub fn balance_text(&self) -> String {
        match &self.bridge.from_token {
            None => String::new(),
            Some(_) if self.bridge.balance.is_loading() => BALANCE_LOADING.to_string(),
            Some(token) => format!(
                "Balance: {}",
                format_value(self.bridge.balance.balance(), token.decimals)
            ),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let selected_token = match self.selection.surface() {
            Some(Surface::TokenList { selected }) => *selected,
            _ => 0,
        };
        RenderState {
            network_name: self.wallet.network.name.clone(),
            account: self.wallet.account.map(|account| account.to_string()),
            network_mismatch: self.wallet.network_mismatch(),
            token: self.bridge.from_token.clone(),
            balance_text: self.balance_text(),
            is_loading: self.bridge.balance.is_loading(),
            amount_input: self.bridge.amount.raw().to_string(),
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            surface: self.selection.kind(),
            advisory: self.selection.message().map(str::to_string),
            tokens: self.tokens(),
            selected_token,
        }
    }
}
