//! JSON-RPC balance client - asks a node for native or ERC-20 balances

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{hex, Address, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::{Network, Token};
use crate::network::fetcher::{BalanceFetcher, FetchError};

/// `balanceOf(address)` selector
const BALANCE_OF_SELECTOR: &str = "70a08231";

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// ABI-encoded `balanceOf(account)` call data
pub fn balance_of_calldata(account: Address) -> String {
    format!("0x{}{:0>64}", BALANCE_OF_SELECTOR, hex::encode(account.as_slice()))
}

/// Decode a hex quantity or 32-byte word returned by the node
pub fn parse_quantity(value: &str) -> Result<U256, FetchError> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.is_empty() {
        return Err(FetchError::InvalidResponse(format!("empty result {value:?}")));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| FetchError::InvalidResponse(format!("{value:?}: {e}")))
}

/// Fetches balances over JSON-RPC, picking the node by the token's chain
pub struct RpcBalanceFetcher {
    client: reqwest::Client,
    endpoints: HashMap<u64, String>,
}

impl RpcBalanceFetcher {
    pub fn new(networks: &[Network], timeout: Duration) -> Self {
        RpcBalanceFetcher {
            client: create_client(timeout),
            endpoints: networks
                .iter()
                .map(|network| (network.chain_id, network.rpc_url.clone()))
                .collect(),
        }
    }

    async fn call(&self, url: &str, method: &str, params: serde_json::Value) -> Result<String, FetchError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response: RpcResponse = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(FetchError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| FetchError::InvalidResponse("missing result".to_string()))
    }
}

#[async_trait]
impl BalanceFetcher for RpcBalanceFetcher {
    async fn fetch(&self, token: &Token, account: Address) -> Result<U256, FetchError> {
        let url = self
            .endpoints
            .get(&token.chain_id)
            .ok_or(FetchError::UnknownChain(token.chain_id))?;

        let (method, params) = if token.is_native() {
            ("eth_getBalance", json!([account, "latest"]))
        } else {
            let contract = Address::from_str(token.address.trim())
                .map_err(|_| FetchError::InvalidTokenAddress(token.address.clone()))?;
            (
                "eth_call",
                json!([{ "to": contract, "data": balance_of_calldata(account) }, "latest"]),
            )
        };

        tracing::debug!(%url, method, token = %token, %account, "Calling node");
        let result = self.call(url, method, params).await?;
        parse_quantity(&result)
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single JSON-RPC reply and hand back the request body
    async fn serve_once(reply: &'static str) -> (String, oneshot::Receiver<serde_json::Value>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (body_tx, body_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let body = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if buf.len() >= header_end + 4 + length {
                        break text[header_end + 4..header_end + 4 + length].to_string();
                    }
                }
                if n == 0 {
                    panic!("connection closed before full request");
                }
            };
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let _ = body_tx.send(serde_json::from_str(&body).unwrap());
        });

        (url, body_rx)
    }

    fn fetcher(url: &str) -> RpcBalanceFetcher {
        RpcBalanceFetcher::new(&[Network::new("Local", 1337, url)], Duration::from_secs(5))
    }

    #[test]
    fn test_balance_of_calldata() {
        let data = balance_of_calldata(Address::repeat_byte(0xab));
        assert_eq!(data.len(), 2 + 8 + 64);
        assert!(data.starts_with("0x70a08231000000000000000000000000abab"));
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x14d1120d7b160000").unwrap(), U256::from(1_500_000_000_000_000_000u128));
        assert!(matches!(parse_quantity("0x"), Err(FetchError::InvalidResponse(_))));
        assert!(matches!(parse_quantity("0xzz"), Err(FetchError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unknown_chain() {
        let token = Token::new(5, "", "Goerli Ether", "GETH", 18);
        let result = fetcher("http://127.0.0.1:1").fetch(&token, Address::ZERO).await;
        assert!(matches!(result, Err(FetchError::UnknownChain(5))));
    }

    #[tokio::test]
    async fn test_invalid_token_address() {
        let token = Token::new(1337, "not-an-address", "Broken", "BRK", 18);
        let result = fetcher("http://127.0.0.1:1").fetch(&token, Address::ZERO).await;
        assert!(matches!(result, Err(FetchError::InvalidTokenAddress(_))));
    }

    #[tokio::test]
    async fn test_native_balance_uses_get_balance() {
        let (url, body) = serve_once(r#"{"jsonrpc":"2.0","id":1,"result":"0x2a"}"#).await;
        let token = Token::new(1337, "", "Ether", "ETH", 18);

        let balance = fetcher(&url).fetch(&token, Address::repeat_byte(0x01)).await.unwrap();
        assert_eq!(balance, U256::from(42u64));

        let body = body.await.unwrap();
        assert_eq!(body["method"], "eth_getBalance");
        assert_eq!(body["params"][1], "latest");
    }

    #[tokio::test]
    async fn test_erc20_balance_uses_balance_of() {
        let (url, body) = serve_once(
            r#"{"jsonrpc":"2.0","id":1,"result":"0x00000000000000000000000000000000000000000000000000000000000f4240"}"#,
        )
        .await;
        let token = Token::new(1337, "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", "USD Coin", "USDC", 6);

        let balance = fetcher(&url).fetch(&token, Address::repeat_byte(0x01)).await.unwrap();
        assert_eq!(balance, U256::from(1_000_000u64));

        let body = body.await.unwrap();
        assert_eq!(body["method"], "eth_call");
        assert!(body["params"][0]["data"].as_str().unwrap().starts_with("0x70a08231"));
    }

    #[tokio::test]
    async fn test_node_error_is_reported() {
        let (url, _body) =
            serve_once(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#).await;
        let token = Token::new(1337, "", "Ether", "ETH", 18);

        let result = fetcher(&url).fetch(&token, Address::ZERO).await;
        assert!(matches!(result, Err(FetchError::Rpc { code: -32000, .. })));
    }
}
