use serde::{Deserialize, Serialize};

/// Game state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Intro,
    Playing,
    Finale,
    FreeRoam,
}

/// Where an open message card came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MessageSource {
    /// Unlock message of a letter occurrence.
    #[serde(rename_all = "camelCase")]
    Letter { letter_index: usize, key: String },
    /// The note shown once the whole name is spelled.
    Finale,
}

/// A message card currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpenMessage {
    pub source: MessageSource,
    pub text: String,
}

/// Transient marker on a mistakenly tapped star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WrongTap {
    pub star_index: usize,
}

/// Complete progression snapshot. Every transition produces a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GameState {
    pub phase: Phase,
    /// Active letter occurrence, `0..=len`. Equals `len` once the name is spelled.
    pub letter_index: usize,
    /// Next star to tap in the active letter.
    pub star_index: usize,
    /// One flag per letter occurrence.
    pub completed_letters: Vec<bool>,
    pub message: Option<OpenMessage>,
    pub hint_text: String,
    pub wrong_tap: Option<WrongTap>,
}

impl GameState {
    /// Fresh state on the intro screen.
    pub fn new(letters: usize, hint: impl Into<String>) -> Self {
        Self {
            phase: Phase::Intro,
            letter_index: 0,
            star_index: 0,
            completed_letters: vec![false; letters],
            message: None,
            hint_text: hint.into(),
            wrong_tap: None,
        }
    }

    /// Fresh state already past the intro, as after a full replay.
    pub fn replayed(letters: usize, hint: impl Into<String>) -> Self {
        Self { phase: Phase::Playing, ..Self::new(letters, hint) }
    }

    pub fn is_message_open(&self) -> bool {
        self.message.is_some()
    }

    /// Text of the open message card, or `""`.
    pub fn current_message(&self) -> &str {
        self.message.as_ref().map_or("", |m| m.text.as_str())
    }

    pub fn all_completed(&self) -> bool {
        self.completed_letters.iter().all(|&done| done)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_letters.iter().filter(|&&done| done).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_intro() {
        let s = GameState::new(3, "hello");
        assert_eq!(s.phase, Phase::Intro);
        assert_eq!(s.completed_letters, vec![false; 3]);
        assert_eq!(s.hint_text, "hello");
        assert!(!s.is_message_open());
        assert_eq!(s.current_message(), "");
    }

    #[test]
    fn replayed_state_is_playing() {
        let s = GameState::replayed(2, "again");
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.letter_index, 0);
        assert_eq!(s.completed_count(), 0);
    }

    #[test]
    fn serializes_camel_case() {
        let mut s = GameState::new(1, "h");
        s.message = Some(OpenMessage {
            source: MessageSource::Letter { letter_index: 0, key: "N".to_string() },
            text: "hi".to_string(),
        });
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["phase"], "intro");
        assert_eq!(json["letterIndex"], 0);
        assert_eq!(json["message"]["source"]["kind"], "letter");
        assert_eq!(json["message"]["source"]["key"], "N");
        assert!(json["wrongTap"].is_null());
    }
}
