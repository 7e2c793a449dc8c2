use serde::Serialize;

/// One-shot notification from the engine to the renderer.
/// Collected per session and drained by the UI layer, so flourishes
/// (shooting stars, chimes) don't have to diff state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    /// A letter occurrence was traced to the end.
    #[serde(rename_all = "camelCase")]
    LetterCompleted { letter_index: usize, key: String },
    /// A star other than the glowing one was tapped.
    #[serde(rename_all = "camelCase")]
    WrongTap { star_index: usize },
    /// An unlock message card opened.
    #[serde(rename_all = "camelCase")]
    MessageOpened { text: String },
    /// The whole name is spelled.
    FinaleReached,
    /// The finale cards are dismissed; replay and exploration are available.
    FreeRoamEntered,
    /// Progress was reset.
    Replayed,
}
