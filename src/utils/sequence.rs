use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Issues monotonically increasing request tokens.
///
/// Only the most recently issued token is current. A response carrying any
/// older token belongs to a superseded request and must be dropped.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every earlier one
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the token is still the latest issued
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Supersede every outstanding token without starting a request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
