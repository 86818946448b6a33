#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use irys_checker::errors::LookupError;
use irys_checker::models::rpc::{JsonRpcRequest, RawResponse};
use irys_checker::rpc::RpcTransport;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Clone)]
pub enum Reply {
    Http { status: u16, status_text: &'static str, body: String },
    Fail(String),
    Panic,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Reply::Http {
            status: 200,
            status_text: "OK",
            body: body.to_string(),
        }
    }
}

/// Canned transport that records every request it is handed.
#[derive(Debug)]
pub struct MockTransport {
    reply: Reply,
    calls: AtomicUsize,
    last_request: std::sync::Mutex<Option<JsonRpcRequest>>,
}

impl MockTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<JsonRpcRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn post(&self, request: &JsonRpcRequest) -> Result<RawResponse, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.reply {
            Reply::Http {
                status,
                status_text,
                body,
            } => Ok(RawResponse {
                status: *status,
                status_text: status_text.to_string(),
                body: body.clone(),
            }),
            Reply::Fail(message) => Err(LookupError::Transport(message.clone())),
            Reply::Panic => panic!("transport blew up"),
        }
    }
}
