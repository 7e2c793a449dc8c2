use crate::api::types::GameEvent;
use crate::core::time::TimerKind;
use crate::hint::HintRequest;

/// Everything that can move the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Intro delay elapsed.
    AdvanceIntro,
    /// The renderer resolved a tap to star `index`.
    /// `letter` names the letter occurrence the star belongs to, when known.
    TapPoint { index: usize, letter: Option<usize> },
    /// Dismiss the open message card.
    CloseMessage,
    /// Start over.
    Replay,
    /// Advisor text arrived.
    SetHint(String),
    /// Wrong-tap marker timeout elapsed.
    ClearWrongTap,
}

impl Action {
    /// Tap on the active letter's star `index`.
    pub fn tap(index: usize) -> Self {
        Action::TapPoint { index, letter: None }
    }

    /// Tap on star `index` of letter occurrence `letter`.
    pub fn tap_in(index: usize, letter: usize) -> Self {
        Action::TapPoint { index, letter: Some(letter) }
    }

    /// The action a fired timer stands for.
    pub fn for_timer(kind: TimerKind) -> Self {
        match kind {
            TimerKind::Intro => Action::AdvanceIntro,
            TimerKind::WrongTap => Action::ClearWrongTap,
            TimerKind::MessageDismiss => Action::CloseMessage,
        }
    }
}

/// Side effect requested by a transition, interpreted by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RequestHint(HintRequest),
    ArmTimer(TimerKind),
    CancelTimer(TimerKind),
    CancelAllTimers,
    /// Delete the persisted snapshot instead of saving.
    ClearSnapshot,
    Emit(GameEvent),
}
