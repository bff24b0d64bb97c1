//! In-memory [`ChatCompleter`] that replays canned replies in order.
//!
//! Used by the test suites of this crate and, through the `test-util`
//! feature, the API crate, so handler and repair-loop behaviour can be
//! exercised without network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::completer::ChatCompleter;
use crate::error::LlmError;
use crate::messages::ChatRequest;

enum Reply {
    Content(Option<String>),
    Failure { status: u16, message: String },
}

/// Replays queued replies and records every request it receives.
///
/// Once the queue is exhausted every call fails with a 500 `Api` error.
#[derive(Default)]
pub struct ScriptedCompleter {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedCompleter {
    /// Queue content replies; `None` simulates a choice without content.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let replies = replies
            .into_iter()
            .map(|r| Reply::Content(r.map(Into::into)))
            .collect();
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::default(),
        }
    }

    /// A completer whose first call fails with a provider error.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        let script = Self::default();
        script.lock_replies().push_back(Reply::Failure {
            status,
            message: message.into(),
        });
        script
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ChatCompleter for ScriptedCompleter {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match self.lock_replies().pop_front() {
            Some(Reply::Content(content)) => Ok(content),
            Some(Reply::Failure { status, message }) => Err(LlmError::Api { status, message }),
            None => Err(LlmError::Api {
                status: 500,
                message: "scripted replies exhausted".to_string(),
            }),
        }
    }
}
