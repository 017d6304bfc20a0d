//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::ui_events::key_to_ui_event;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        self.publish();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.publish();
                }
                else => break,
            }
        }
    }

    /// Run the balance effect, then send the new render state
    fn publish(&mut self) {
        if let Some(cmd) = self.state.sync_balance() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Token selection
            UiEvent::OpenTokenSelection => self.state.open_token_selection(),
            UiEvent::CloseSurface => self.state.close_surface(),
            UiEvent::NextToken => self.state.next_token(),
            UiEvent::PrevToken => self.state.prev_token(),
            UiEvent::ChooseToken => self.state.choose_token(),

            // Amount editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::MaxAmount => self.state.max_amount(),

            // Wallet
            UiEvent::ConnectWallet => self.state.connect_wallet(),
            UiEvent::DisconnectWallet => self.state.disconnect_wallet(),
            UiEvent::CycleNetwork => self.state.cycle_network(),

            // Bridge
            UiEvent::TransferCompleted(receipt) => self.state.set_receipt(receipt),

            // Keys are mapped here so the mode is never stale
            UiEvent::Key(key) => {
                let mapped = key_to_ui_event(key, self.state.input_mode, self.state.selection.kind());
                return mapped.is_some_and(|event| self.handle_ui_event(event));
            }

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
