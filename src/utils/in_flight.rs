// src/utils/in_flight.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::AppError;

/// Tracks sessions that have a submit outstanding.
///
/// A session holds at most one `SubmitPermit`; the slot frees when the
/// permit is dropped, whether the submit succeeded or failed.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    active: Arc<Mutex<HashSet<String>>>,
}

/// Proof that a session's submit slot is taken.
#[derive(Debug)]
pub struct SubmitPermit {
    session_id: String,
    active: Arc<Mutex<HashSet<String>>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, session_id: &str) -> Result<SubmitPermit, AppError> {
        let mut active = self
            .active
            .lock()
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        if !active.insert(session_id.to_string()) {
            return Err(AppError::Conflict(
                "A submission for this session is already in progress".to_string(),
            ));
        }

        Ok(SubmitPermit {
            session_id: session_id.to_string(),
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self, session_id: &str) -> bool {
        self.active
            .lock()
            .map(|active| active.contains(session_id))
            .unwrap_or(false)
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        // A poisoned set still has to release the slot.
        let mut active = match self.active.lock() {
            Ok(active) => active,
            Err(poisoned) => poisoned.into_inner(),
        };
        active.remove(&self.session_id);
    }
}
