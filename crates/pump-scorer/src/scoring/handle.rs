use std::sync::{Arc, OnceLock};

use super::{ScoringError, TokenScorer};

/// Shared slot the host fills once at startup; requests before that see `NotReady`.
#[derive(Debug, Clone, Default)]
pub struct ScorerHandle {
    slot: Arc<OnceLock<TokenScorer>>,
}

impl ScorerHandle {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ready(scorer: TokenScorer) -> Self {
        let handle = Self::empty();
        handle.install(scorer);
        handle
    }

    /// Returns `false` if a scorer was already installed; the first one wins.
    pub fn install(&self, scorer: TokenScorer) -> bool {
        self.slot.set(scorer).is_ok()
    }

    pub fn get(&self) -> Result<&TokenScorer, ScoringError> {
        self.slot.get().ok_or(ScoringError::NotReady)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}
