//! Selection gate - decides whether opening the token picker is allowed

use thiserror::Error;

use crate::constants::CONNECT_WALLET_MESSAGE;
use crate::messages::ui_events::SurfaceKind;
use crate::models::{Token, WalletContext};

/// Why the token picker cannot be shown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionBlocked {
    #[error("{}", CONNECT_WALLET_MESSAGE)]
    WalletNotConnected,
    #[error("Please switch wallet to {network}")]
    NetworkMismatch { network: String },
}

/// Check the wallet preconditions for token selection
pub fn check(wallet: &WalletContext) -> Result<(), SelectionBlocked> {
    if !wallet.is_connected() {
        Err(SelectionBlocked::WalletNotConnected)
    } else if wallet.network_mismatch() {
        Err(SelectionBlocked::NetworkMismatch {
            network: wallet.network.name.clone(),
        })
    } else {
        Ok(())
    }
}

/// The overlay currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    Advisory(String),
    TokenList { selected: usize },
}

/// Holds at most one overlay, so an advisory always replaces the picker
#[derive(Debug, Default)]
pub struct SelectionGate {
    surface: Option<Surface>,
}

impl SelectionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn kind(&self) -> SurfaceKind {
        match self.surface {
            None => SurfaceKind::None,
            Some(Surface::Advisory(_)) => SurfaceKind::Advisory,
            Some(Surface::TokenList { .. }) => SurfaceKind::TokenList,
        }
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    /// Advisory text, if the last open attempt was blocked
    pub fn message(&self) -> Option<&str> {
        match &self.surface {
            Some(Surface::Advisory(message)) => Some(message),
            _ => None,
        }
    }

    /// Open the picker, or an advisory when the wallet is not ready
    pub fn open(&mut self, wallet: &WalletContext) {
        self.surface = Some(match check(wallet) {
            Ok(()) => Surface::TokenList { selected: 0 },
            Err(blocked) => {
                tracing::info!(reason = %blocked, "Token selection blocked");
                Surface::Advisory(blocked.to_string())
            }
        });
    }

    pub fn close(&mut self) {
        self.surface = None;
    }

    pub fn next(&mut self, len: usize) {
        if let Some(Surface::TokenList { selected }) = &mut self.surface {
            if len > 0 {
                *selected = (*selected + 1) % len;
            }
        }
    }

    pub fn prev(&mut self, len: usize) {
        if let Some(Surface::TokenList { selected }) = &mut self.surface {
            if len > 0 {
                *selected = (*selected + len - 1) % len;
            }
        }
    }

    /// Take the highlighted token and close the picker
    pub fn choose(&mut self, tokens: &[Token]) -> Option<Token> {
        let Some(Surface::TokenList { selected }) = &self.surface else {
            return None;
        };
        let token = tokens.get(*selected).cloned()?;
        self.close();
        Some(token)
    }
}
