//! In-memory fakes for the banking and Telegram APIs.

use async_trait::async_trait;
use expense_alerts::{ChatApi, Delivery, OutgoingMessage, TelegramError};
use expense_bank::{BankError, BankResult, StatementSource, WebhookRegistrar};
use expense_core::{StatementWindow, Transaction};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use teloxide::types::Update;
use tokio::sync::Notify;

/// Statement source answering every request the same way.
pub struct FakeSource {
    transactions: Vec<Transaction>,
    fail_status: Option<u16>,
    requests: Mutex<Vec<(String, StatementWindow)>>,
}

impl FakeSource {
    pub fn returning(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            fail_status: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            transactions: Vec::new(),
            fail_status: Some(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, StatementWindow)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatementSource for FakeSource {
    async fn fetch_statement(
        &self,
        account: &str,
        window: StatementWindow,
    ) -> BankResult<Vec<Transaction>> {
        self.requests
            .lock()
            .unwrap()
            .push((account.to_string(), window));
        match self.fail_status {
            Some(code) => Err(BankError::Status {
                code,
                reason: status_reason(code),
            }),
            None => Ok(self.transactions.clone()),
        }
    }
}

fn status_reason(code: u16) -> String {
    match code {
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
    .to_string()
}

/// Statement source that blocks inside the fetch until released.
pub struct BlockingSource {
    calls: AtomicUsize,
    entered: Notify,
    release: Notify,
}

impl BlockingSource {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wait until a fetch is in progress.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let the pending fetch return an empty statement.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl StatementSource for BlockingSource {
    async fn fetch_statement(&self, _: &str, _: StatementWindow) -> BankResult<Vec<Transaction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Vec::new())
    }
}

/// Webhook registrar with a fixed answer.
pub struct FakeRegistrar {
    succeed: bool,
    urls: Mutex<Vec<String>>,
}

impl FakeRegistrar {
    pub fn succeeding() -> Self {
        Self {
            succeed: true,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookRegistrar for FakeRegistrar {
    async fn register_webhook(&self, url: &str) -> BankResult<()> {
        self.urls.lock().unwrap().push(url.to_string());
        if self.succeed {
            Ok(())
        } else {
            Err(BankError::Status {
                code: 400,
                reason: "Bad Request".to_string(),
            })
        }
    }
}

/// Chat API recording every call.
pub struct RecordingChat {
    reply: Delivery,
    sent: Mutex<Vec<OutgoingMessage>>,
    answers: Mutex<Vec<(String, String)>>,
}

impl RecordingChat {
    pub fn sending() -> Self {
        Self::replying(Delivery::Sent { text: None })
    }

    pub fn replying(reply: Delivery) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// `(callback_query_id, text)` pairs.
    pub fn answers(&self) -> Vec<(String, String)> {
        self.answers.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for RecordingChat {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<Delivery, TelegramError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(self.reply.clone())
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: &str,
    ) -> Result<Delivery, TelegramError> {
        self.answers
            .lock()
            .unwrap()
            .push((callback_query_id.to_string(), text.to_string()));
        Ok(self.reply.clone())
    }
}

/// Private-chat message update from chat 42.
pub fn text_update(text: &str) -> Update {
    // teloxide's `Update` deserializer needs a string source, not a `Value`.
    serde_json::from_str(&json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "date": 1718440000,
            "from": {"id": 42, "is_bot": false, "first_name": "A"},
            "chat": {"id": 42, "type": "private", "first_name": "A"},
            "text": text
        }
    })
    .to_string())
    .unwrap()
}

/// Button press `cb-1` carrying `data`, optionally on a message in chat 42.
pub fn callback_update(data: &str, with_message: bool) -> Update {
    let mut query = json!({
        "id": "cb-1",
        "from": {"id": 42, "is_bot": false, "first_name": "A"},
        "chat_instance": "1",
        "data": data
    });
    if with_message {
        query["message"] = json!({
            "message_id": 11,
            "date": 1718440000,
            "chat": {"id": 42, "type": "private", "first_name": "A"},
            "text": "Press the button to re-register the statement webhook."
        });
    }
    serde_json::from_str(&json!({"update_id": 2, "callback_query": query}).to_string()).unwrap()
}
