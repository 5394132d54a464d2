//! In-memory stand-ins for the OpenAI capability, shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;

use super::{CapabilityProvider, CompletionProvider, CompletionRequest, LlmError};

/// What the fake completion should do when called.
#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    NetworkError(String),
}

/// Records every connect/complete and answers with a canned reply.
#[derive(Clone)]
pub struct FakeCapability {
    reply: Arc<Mutex<FakeReply>>,
    available: bool,
    connects: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl FakeCapability {
    pub fn replying(text: &str) -> Self {
        Self::new(FakeReply::Text(text.to_string()), true)
    }

    pub fn failing(message: &str) -> Self {
        Self::new(FakeReply::NetworkError(message.to_string()), true)
    }

    pub fn unavailable() -> Self {
        Self::new(FakeReply::Text(String::new()), false)
    }

    fn new(reply: FakeReply, available: bool) -> Self {
        Self {
            reply: Arc::new(Mutex::new(reply)),
            available,
            connects: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_reply(&self, reply: FakeReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl CapabilityProvider for FakeCapability {
    fn connect(&self, _api_key: &SecretString) -> Result<Arc<dyn CompletionProvider>, LlmError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.available {
            return Err(LlmError::Unavailable(
                "The OpenAI client is not available in this build.".to_string(),
            ));
        }
        Ok(Arc::new(self.clone()))
    }
}

#[async_trait]
impl CompletionProvider for FakeCapability {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.reply.lock().unwrap().clone() {
            FakeReply::Text(text) => Ok(text),
            FakeReply::NetworkError(message) => Err(LlmError::Api {
                status: 503,
                message,
            }),
        }
    }
}
