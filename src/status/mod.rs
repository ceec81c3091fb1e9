//! Transient single-line status messages

/// How long a notice stays visible (ms)
pub const DEFAULT_NOTICE_TIMEOUT_MS: u64 = 1000;

/// Identifies one posted notice; a clear for a stale token is ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeToken(u64);

/// Holds at most one message at a time
#[derive(Debug, Clone)]
pub struct StatusBar {
    message: Option<String>,
    generation: u64,
    timeout_ms: u64,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TIMEOUT_MS)
    }
}

impl StatusBar {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            message: None,
            generation: 0,
            timeout_ms,
        }
    }

    /// Show `message`, replacing the current one and its pending clear
    pub fn post(&mut self, message: impl Into<String>) -> NoticeToken {
        self.generation += 1;
        self.message = Some(message.into());
        NoticeToken(self.generation)
    }

    /// Clear the message if `token` is still the newest; returns whether it cleared
    pub fn expire(&mut self, token: NoticeToken) -> bool {
        if token.0 != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Token of the visible message, if any
    pub fn active_token(&self) -> Option<NoticeToken> {
        self.message.as_ref().map(|_| NoticeToken(self.generation))
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}
