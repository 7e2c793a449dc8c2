//! The progression state machine: `Intro -> Playing -> Finale -> FreeRoam`.

pub mod action;
pub mod reducer;
pub mod state;

pub use action::{Action, Effect};
pub use reducer::{reduce, Transition};
pub use state::{GameState, MessageSource, OpenMessage, Phase, WrongTap};
