//! Test doubles shared by the unit tests.

use crate::error::Error;
use crate::request::ApiRequest;
use crate::response::RawResponse;
use crate::transport::Transport;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// How the stub answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Always answer with this response.
    Fixed(RawResponse),
    /// Answer 200 with the request body, or `{}` for body-less requests.
    Echo,
    /// Answer 200 with `{}` after a delay (async only).
    Slow(Duration),
}

/// Transport that records requests and answers from a script.
#[derive(Debug)]
pub struct StubTransport {
    reply: Reply,
    sent: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(status: u16, body: &str) -> Self {
        Self::new(Reply::Fixed(RawResponse::new(status, body)))
    }

    /// Requests received so far.
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// The last request received.
    pub fn last(&self) -> ApiRequest {
        self.sent().pop().expect("no request was sent")
    }

    fn answer(&self, request: &ApiRequest) -> RawResponse {
        self.sent.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Fixed(raw) => raw.clone(),
            Reply::Echo => RawResponse::new(200, request.body.clone().unwrap_or_else(|| "{}".into())),
            Reply::Slow(_) => RawResponse::new(200, "{}"),
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, Error> {
        Ok(self.answer(request))
    }

    async fn send_async(&self, request: &ApiRequest) -> Result<RawResponse, Error> {
        if let Reply::Slow(delay) = &self.reply {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.answer(request))
    }
}
