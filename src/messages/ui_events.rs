//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Receipt;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Token selection
    OpenTokenSelection,
    CloseSurface,
    NextToken,
    PrevToken,
    ChooseToken,

    // Amount editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    MaxAmount,

    // Wallet
    ConnectWallet,
    DisconnectWallet,
    CycleNetwork,

    // Bridge
    /// Sent by the transfer layer once a bridge transfer finalizes
    TransferCompleted(Receipt),

    /// A raw key press, mapped by the app layer against its current mode
    Key(KeyEvent),

    // System
    Quit,
}

/// Input mode of the amount field
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Which overlay, if any, currently captures keys
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum SurfaceKind {
    #[default]
    None,
    Advisory,
    TokenList,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode, surface: SurfaceKind) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match surface {
        // Any key dismisses an advisory
        SurfaceKind::Advisory => return Some(UiEvent::CloseSurface),
        SurfaceKind::TokenList => {
            return match key.code {
                KeyCode::Esc => Some(UiEvent::CloseSurface),
                KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevToken),
                KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextToken),
                KeyCode::Enter => Some(UiEvent::ChooseToken),
                _ => None,
            };
        }
        SurfaceKind::None => {}
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('t') | KeyCode::Enter => Some(UiEvent::OpenTokenSelection),
            KeyCode::Char('e') => Some(UiEvent::StartEditing),
            KeyCode::Char('m') => Some(UiEvent::MaxAmount),
            KeyCode::Char('c') => Some(UiEvent::ConnectWallet),
            KeyCode::Char('d') => Some(UiEvent::DisconnectWallet),
            KeyCode::Char('n') => Some(UiEvent::CycleNetwork),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
