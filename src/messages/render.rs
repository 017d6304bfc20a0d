//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, SurfaceKind};
use crate::models::Token;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Wallet
    pub network_name: String,
    pub account: Option<String>,
    pub network_mismatch: bool,

    // From token
    pub token: Option<Token>,
    pub balance_text: String,
    pub is_loading: bool,

    // Amount field
    pub amount_input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Popups
    pub surface: SurfaceKind,
    pub advisory: Option<String>,
    pub tokens: Vec<Token>,
    pub selected_token: usize,
}
