use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// The name being spelled plus the message unlocked by each letter occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameSpec {
    /// Letters in spelling order. Repeats allowed.
    pub letters: Vec<char>,
    /// Message key -> unlock message.
    pub messages: HashMap<String, String>,
    /// Shown once after every letter is complete.
    #[serde(default)]
    pub finale: Option<String>,
}

impl NameSpec {
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn letter_at(&self, occurrence: usize) -> Option<char> {
        self.letters.get(occurrence).copied()
    }

    /// Message key for the letter occurrence at `occurrence`.
    ///
    /// A letter that appears once keys on itself ("P"). A letter that repeats
    /// keys on itself plus its 1-based occurrence count ("A1", "A2", ...).
    pub fn message_key(&self, occurrence: usize) -> Option<String> {
        let letter = self.letter_at(occurrence)?;
        let total = self.letters.iter().filter(|&&c| c == letter).count();
        if total <= 1 {
            return Some(letter.to_string());
        }
        let nth = self.letters[..=occurrence]
            .iter()
            .filter(|&&c| c == letter)
            .count();
        Some(format!("{letter}{nth}"))
    }

    /// Unlock message for the letter occurrence at `occurrence`.
    pub fn message_for(&self, occurrence: usize) -> Option<&str> {
        let key = self.message_key(occurrence)?;
        self.messages.get(&key).map(String::as_str)
    }

    pub fn finale_note(&self) -> Option<&str> {
        self.finale.as_deref()
    }

    /// The spelled name as a string.
    pub fn word(&self) -> String {
        self.letters.iter().collect()
    }
}
