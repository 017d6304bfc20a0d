//! Network actor - runs balance fetches in the Tokio async runtime

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::fetcher::BalanceFetcher;

/// Network actor that processes balance fetch commands.
///
/// Fetches are never cancelled; the app layer decides whether a result
/// still matters when it arrives.
pub struct NetworkActor {
    fetcher: Arc<dyn BalanceFetcher>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(fetcher: Arc<dyn BalanceFetcher>, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            fetcher,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchBalance(request)) => {
                            let response_tx = self.response_tx.clone();
                            let fetcher = Arc::clone(&self.fetcher);

                            self.active_requests.spawn(async move {
                                let id = request.id;
                                let key = request.key;
                                tracing::info!(id, token = %key.token, account = %key.account, "Fetching balance");
                                let result = fetcher
                                    .fetch(&key.token, key.account)
                                    .await
                                    .map_err(|e| e.to_string());
                                tracing::info!(id, ok = result.is_ok(), "Balance fetch completed");
                                let _ = response_tx.send(NetworkResponse::Balance { id, key, result });
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
