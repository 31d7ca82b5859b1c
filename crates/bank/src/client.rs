//! Monobank personal API client.
//!
//! Fetches today's statement for an account and registers the statement
//! webhook. Both calls authenticate with the `X-Token` header.

use crate::{BankError, BankResult, StatementSource, WebhookRegistrar};
use async_trait::async_trait;
use expense_core::{StatementWindow, Transaction};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Header carrying the personal API token.
const TOKEN_HEADER: &str = "X-Token";

#[derive(Debug, Serialize)]
struct WebhookRequest<'a> {
    #[serde(rename = "webHookUrl")]
    web_hook_url: &'a str,
}

/// HTTP client for the Monobank personal API.
#[derive(Clone)]
pub struct MonobankClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl MonobankClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.monobank.ua";

    /// Create a client against the public API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Point the client at another base URL (trailing slashes are dropped).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn statement_url(&self, account: &str, window: StatementWindow) -> String {
        format!(
            "{}/personal/statement/{}/{}/{}",
            self.base_url, account, window.from, window.to
        )
    }

    fn webhook_url(&self) -> String {
        format!("{}/personal/webhook", self.base_url)
    }
}

impl fmt::Debug for MonobankClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonobankClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl StatementSource for MonobankClient {
    async fn fetch_statement(
        &self,
        account: &str,
        window: StatementWindow,
    ) -> BankResult<Vec<Transaction>> {
        let url = self.statement_url(account, window);
        debug!(from = window.from, to = window.to, "Fetching statement");

        let response = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BankError::from_status(status));
        }

        let body = response.bytes().await?;
        let transactions: Vec<Transaction> = serde_json::from_slice(&body)?;

        debug!("Statement returned {} transactions", transactions.len());
        Ok(transactions)
    }
}

#[async_trait]
impl WebhookRegistrar for MonobankClient {
    async fn register_webhook(&self, url: &str) -> BankResult<()> {
        let response = self
            .http
            .post(self.webhook_url())
            .header(TOKEN_HEADER, &self.token)
            .json(&WebhookRequest { web_hook_url: url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BankError::from_status(status));
        }

        info!("Statement webhook registered: {}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expense_core::MinorUnits;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WINDOW: StatementWindow = StatementWindow {
        from: 1718398800,
        to: 1718451000,
    };

    async fn client(server: &MockServer) -> MonobankClient {
        MonobankClient::new("test-token").with_base_url(server.uri())
    }

    #[test]
    fn test_statement_url() {
        let client = MonobankClient::new("t").with_base_url("http://bank.local/");
        assert_eq!(
            client.statement_url("acc-1", WINDOW),
            "http://bank.local/personal/statement/acc-1/1718398800/1718451000"
        );
        assert_eq!(client.webhook_url(), "http://bank.local/personal/webhook");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = MonobankClient::new("secret-token");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains(MonobankClient::DEFAULT_BASE_URL));
    }

    #[tokio::test]
    async fn test_fetch_statement() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/personal/statement/acc-1/1718398800/1718451000"))
            .and(header("X-Token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "a", "time": 1718440000, "description": "Coffee", "amount": -1550, "mcc": 5814},
                {"id": "b", "time": 1718441000, "description": "Refund", "amount": 2000}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let txs = client(&server)
            .await
            .fetch_statement("acc-1", WINDOW)
            .await
            .unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, MinorUnits(-1550));
        assert_eq!(txs[0].description.as_deref(), Some("Coffee"));
        assert_eq!(txs[1].id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_fetch_statement_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .fetch_statement("acc-1", WINDOW)
            .await
            .unwrap_err();

        match err {
            BankError::Status { code, reason } => {
                assert_eq!(code, 429);
                assert_eq!(reason, "Too Many Requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_statement_bad_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .fetch_statement("acc-1", WINDOW)
            .await
            .unwrap_err();
        assert!(matches!(err, BankError::Decode(_)));
    }

    #[tokio::test]
    async fn test_register_webhook() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/personal/webhook"))
            .and(header("X-Token", "test-token"))
            .and(body_json(json!({"webHookUrl": "https://example.com/webhook"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .register_webhook("https://example.com/webhook")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_webhook_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/personal/webhook"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .register_webhook("https://example.com/webhook")
            .await
            .unwrap_err();
        assert!(matches!(err, BankError::Status { code: 400, .. }));
    }
}
