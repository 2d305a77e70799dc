//! Scriptable delivery service used by the relay tests
#![allow(dead_code)] // Test utility module - not all methods used in every test

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use courier::{RelayBackend, RelayConfig};
use courier_delivery::{DeliveryError, Mailer, Message, SendResponse};
use courier_metrics::Registry;
use tokio::time::Instant;

/// How the fake answers for a given recipient
#[derive(Debug, Clone)]
pub enum Reply {
    Accept,
    Reject { status: u16, message: String },
    Stall(Duration),
}

#[derive(Debug, Default)]
struct Inner {
    replies: HashMap<String, Reply>,
    received: Vec<Message>,
}

/// Records every message it is given; accepts unless told otherwise
#[derive(Debug, Clone, Default)]
pub struct FakeMailer {
    inner: Arc<Mutex<Inner>>,
}

impl FakeMailer {
    pub fn reply(self, recipient: &str, reply: Reply) -> Self {
        self.inner
            .lock()
            .expect("lock")
            .replies
            .insert(recipient.to_string(), reply);
        self
    }

    pub fn reject(self, recipient: &str) -> Self {
        self.reply(
            recipient,
            Reply::Reject {
                status: 400,
                message: format!("{recipient} is not a valid address"),
            },
        )
    }

    pub fn received(&self) -> Vec<Message> {
        self.inner.lock().expect("lock").received.clone()
    }

    pub fn attempts(&self) -> usize {
        self.inner.lock().expect("lock").received.len()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(
        &self,
        message: Message,
        _deadline: Instant,
    ) -> Result<SendResponse, DeliveryError> {
        let reply = {
            let mut inner = self.inner.lock().expect("lock");
            let reply = inner
                .replies
                .get(message.recipient())
                .cloned()
                .unwrap_or(Reply::Accept);
            inner.received.push(message.clone());
            reply
        };

        match reply {
            Reply::Accept => Ok(SendResponse {
                id: format!("<{}@mg.example.com>", message.recipient()),
                message: "Queued. Thank you.".to_string(),
            }),
            Reply::Reject { status, message } => Err(DeliveryError::Rejected { status, message }),
            Reply::Stall(duration) => {
                tokio::time::sleep(duration).await;
                Ok(SendResponse {
                    id: "<late@mg.example.com>".to_string(),
                    message: "Queued. Thank you.".to_string(),
                })
            }
        }
    }
}

pub fn config() -> RelayConfig {
    RelayConfig::new("mg.example.com", "key-123").expect("valid config")
}

pub fn backend(mailer: FakeMailer) -> RelayBackend<FakeMailer> {
    RelayBackend::with_mailer(config(), mailer, Registry::new()).expect("backend")
}

pub fn recipients(addresses: &[&str]) -> Vec<String> {
    addresses.iter().map(|a| (*a).to_string()).collect()
}

pub const BODY: &[u8] =
    b"From: sender@example.com\r\nSubject: Relay test\r\n\r\nThe quick brown fox\r\n";
