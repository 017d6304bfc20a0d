//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Receipt, Token};

impl AppState {
    // ========================
    // Wallet
    // ========================

    /// Adopt the configured account as the connected wallet
    pub fn connect_wallet(&mut self) {
        let Some(account) = self.config.account else {
            tracing::warn!("No account configured, wallet stays disconnected");
            return;
        };
        let chain_id = self
            .config
            .wallet_chain_id
            .or_else(|| self.config.networks.first().map(|n| n.chain_id));
        tracing::info!(%account, ?chain_id, "Wallet connected");
        self.wallet.account = Some(account);
        self.wallet.chain_id = chain_id;
    }

    pub fn disconnect_wallet(&mut self) {
        if self.wallet.account.take().is_some() {
            tracing::info!("Wallet disconnected");
        }
        self.wallet.chain_id = None;
    }

    /// Move the bridge to the next configured network
    pub fn cycle_network(&mut self) {
        let networks = &self.config.networks;
        if networks.is_empty() {
            return;
        }
        let current = networks
            .iter()
            .position(|n| n.chain_id == self.wallet.network.chain_id)
            .unwrap_or(0);
        self.wallet.network = networks[(current + 1) % networks.len()].clone();
        tracing::info!(network = %self.wallet.network.name, chain_id = self.wallet.network.chain_id, "Network changed");

        let stale_token = self
            .bridge
            .from_token
            .as_ref()
            .is_some_and(|token| token.chain_id != self.wallet.network.chain_id);
        if stale_token {
            self.clear_token();
        }
        self.selection.close();
    }

    // ========================
    // Token selection
    // ========================

    pub fn open_token_selection(&mut self) {
        self.selection.open(&self.wallet);
    }

    pub fn close_surface(&mut self) {
        self.selection.close();
    }

    pub fn next_token(&mut self) {
        let len = self.tokens().len();
        self.selection.next(len);
    }

    pub fn prev_token(&mut self) {
        let len = self.tokens().len();
        self.selection.prev(len);
    }

    pub fn choose_token(&mut self) {
        let tokens = self.tokens();
        if let Some(token) = self.selection.choose(&tokens) {
            self.set_token(token);
        }
    }

    /// Replace the selected token wholesale
    pub fn set_token(&mut self, token: Token) {
        tracing::info!(token = %token, "From token selected");
        self.bridge.from_token = Some(token);
        self.bridge.amount.rederive(self.bridge.from_token.as_ref());
    }

    fn clear_token(&mut self) {
        self.bridge.from_token = None;
        self.bridge.amount.rederive(None);
        self.input_mode = InputMode::Normal;
    }

    /// Record a completed transfer.
    ///
    /// Entry point for the transfer layer, which lives outside this crate;
    /// reached at runtime through `UiEvent::TransferCompleted`.
    pub fn set_receipt(&mut self, receipt: Receipt) {
        self.bridge.receipt = Some(receipt);
    }

    // ========================
    // Amount editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.bridge.from_token.is_some() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.bridge.amount.raw().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    fn set_amount_text(&mut self, text: String) -> bool {
        match self.bridge.amount.on_text_changed(self.bridge.from_token.as_ref(), text) {
            Ok(()) => true,
            Err(unavailable) => {
                tracing::debug!(%unavailable, "Ignoring amount edit");
                false
            }
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let mut text = self.bridge.amount.raw().to_string();
        let cursor_pos = self.cursor_position.min(text.len());
        text.insert(cursor_pos, c);
        if self.set_amount_text(text) {
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        let mut text = self.bridge.amount.raw().to_string();
        let cursor_pos = self.cursor_position.min(text.len());
        if cursor_pos == 0 {
            return;
        }
        let prev_pos = text[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        text.remove(prev_pos);
        if self.set_amount_text(text) {
            self.cursor_position = prev_pos;
        }
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.bridge.amount.raw();
        if self.cursor_position > 0 {
            self.cursor_position = input[..self.cursor_position.min(input.len())]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.bridge.amount.raw();
        if self.cursor_position < input.len() {
            self.cursor_position = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
        }
    }

    /// Fill the amount field with the whole balance
    pub fn max_amount(&mut self) {
        let balance = self.bridge.balance.balance();
        if let Err(unavailable) = self
            .bridge
            .amount
            .on_max_requested(self.bridge.from_token.as_ref(), balance)
        {
            tracing::debug!(%unavailable, "Ignoring max request");
            return;
        }
        self.cursor_position = self.bridge.amount.raw().len();
    }

    // ========================
    // Balance
    // ========================

    /// Run the balance effect; yields a fetch when its inputs changed
    pub fn sync_balance(&mut self) -> Option<NetworkCommand> {
        self.bridge
            .balance
            .observe(
                self.bridge.from_token.as_ref(),
                self.wallet.account,
                self.bridge.receipt.as_ref(),
            )
            .map(NetworkCommand::FetchBalance)
    }

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::Balance { id, key, result } => {
                self.bridge.balance.apply(id, &key, result);
            }
        }
    }
}
