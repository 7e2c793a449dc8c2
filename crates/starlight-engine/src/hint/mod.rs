//! Hint advisor contract and the local fallback phrases.
//!
//! Every tap applies a fallback phrase synchronously. If an advisor is wired
//! in, its answer arrives later as [`Action::SetHint`] through the
//! [`ActionSender`] it was handed, overwriting the fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::queue::ActionSender;
use crate::progression::Action;

/// What the advisor is told about a tap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub was_correct: bool,
    pub letter_index: usize,
    /// Star index the user was asked to tap.
    pub star_index: usize,
    pub total_stars_in_letter: usize,
}

/// Advisor answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintResponse {
    pub hint: String,
}

impl HintResponse {
    /// Parse an advisor reply body.
    pub fn from_json(json: &str) -> Result<Self, HintError> {
        let response: HintResponse = serde_json::from_str(json)?;
        if response.hint.trim().is_empty() {
            return Err(HintError::Empty);
        }
        Ok(response)
    }
}

/// Ways a remote hint can fail. None of them reach the user.
#[derive(Debug, Error)]
pub enum HintError {
    #[error("hint transport failed: {0}")]
    Transport(String),
    #[error("hint service answered with status {0}")]
    Status(u16),
    #[error("hint response is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("hint response is empty")]
    Empty,
}

/// Source of asynchronous encouragement.
pub trait HintAdvisor {
    /// Start a hint request. The answer, if any, must come back as
    /// `Action::SetHint` through `reply`. Must not block.
    fn request(&self, request: HintRequest, reply: ActionSender);
}

/// Advisor that never answers; the fallback phrases stand.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdvisor;

impl HintAdvisor for NoAdvisor {
    fn request(&self, _request: HintRequest, _reply: ActionSender) {}
}

/// Advisor answering immediately from a closure. Handy for tests and offline builds.
pub struct FnAdvisor<F>(pub F);

impl<F> HintAdvisor for FnAdvisor<F>
where
    F: Fn(&HintRequest) -> Result<String, HintError>,
{
    fn request(&self, request: HintRequest, reply: ActionSender) {
        match (self.0)(&request) {
            Ok(hint) => {
                reply.send(Action::SetHint(hint));
            }
            Err(e) => log::warn!("hint advisor failed: {e}"),
        }
    }
}

/// Fixed pools of encouraging and corrective phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackHints {
    pub positive: Vec<String>,
    pub corrective: Vec<String>,
}

impl Default for FallbackHints {
    fn default() -> Self {
        let owned = |xs: &[&str]| -> Vec<String> { xs.iter().map(|s| s.to_string()).collect() };
        Self {
            positive: owned(&[
                "Beautiful!",
                "Lovely, keep going.",
                "The sky is taking shape.",
                "Just like that.",
            ]),
            corrective: owned(&[
                "Almost. Try the glowing star.",
                "Look for the star that shimmers.",
                "Not that one, follow the glow.",
            ]),
        }
    }
}

impl FallbackHints {
    /// Deterministic pick for a tap outcome and position.
    pub fn pick(&self, was_correct: bool, letter_index: usize, star_index: usize) -> &str {
        let pool = if was_correct { &self.positive } else { &self.corrective };
        if pool.is_empty() {
            return "";
        }
        &pool[(letter_index + star_index) % pool.len()]
    }
}
