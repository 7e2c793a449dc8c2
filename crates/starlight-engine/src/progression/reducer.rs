use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::catalog::Catalog;
use crate::core::time::TimerKind;
use crate::hint::HintRequest;

use super::action::{Action, Effect};
use super::state::{GameState, MessageSource, OpenMessage, Phase, WrongTap};

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub effects: Vec<Effect>,
    /// Whether `state` differs from the state the action was applied to.
    pub changed: bool,
}

impl Transition {
    fn identity(state: &GameState) -> Self {
        Self { state: state.clone(), effects: Vec::new(), changed: false }
    }

    fn to(before: &GameState, state: GameState, effects: Vec<Effect>) -> Self {
        let changed = state != *before;
        Self { state, effects, changed }
    }
}

/// The progression state machine.
///
/// Total over its action space: every action in every phase yields a
/// transition, most of the invalid ones being the identity.
pub fn reduce(catalog: &Catalog, config: &GameConfig, state: &GameState, action: &Action) -> Transition {
    match action {
        Action::AdvanceIntro => advance_intro(config, state),
        Action::TapPoint { index, letter } => tap_point(catalog, config, state, *index, *letter),
        Action::CloseMessage => close_message(catalog, state),
        Action::Replay => replay(catalog, config, state),
        Action::SetHint(text) => {
            let mut next = state.clone();
            next.hint_text = text.clone();
            Transition::to(state, next, Vec::new())
        }
        Action::ClearWrongTap => {
            let mut next = state.clone();
            next.wrong_tap = None;
            Transition::to(state, next, Vec::new())
        }
    }
}

fn advance_intro(config: &GameConfig, state: &GameState) -> Transition {
    if state.phase != Phase::Intro {
        return Transition::identity(state);
    }
    let mut next = state.clone();
    next.phase = Phase::Playing;
    next.hint_text = config.welcome_hint.clone();
    Transition::to(state, next, vec![Effect::CancelTimer(TimerKind::Intro)])
}

fn tap_point(
    catalog: &Catalog,
    config: &GameConfig,
    state: &GameState,
    index: usize,
    letter: Option<usize>,
) -> Transition {
    // The open card is modal.
    if state.is_message_open() {
        return Transition::identity(state);
    }
    match state.phase {
        Phase::Playing => playing_tap(catalog, config, state, index, letter),
        Phase::FreeRoam => match letter {
            Some(occurrence) => reopen_message(catalog, state, occurrence),
            None => Transition::identity(state),
        },
        Phase::Intro | Phase::Finale => Transition::identity(state),
    }
}

fn playing_tap(
    catalog: &Catalog,
    config: &GameConfig,
    state: &GameState,
    index: usize,
    letter: Option<usize>,
) -> Transition {
    let letter_index = state.letter_index;
    if letter.is_some_and(|l| l != letter_index) {
        return Transition::identity(state);
    }
    let total = catalog.stars_in(letter_index);
    if index >= total {
        return Transition::identity(state);
    }

    let was_correct = index == state.star_index;
    let mut next = state.clone();
    next.hint_text = config
        .fallback_hints
        .pick(was_correct, letter_index, state.star_index)
        .to_string();
    let mut effects = vec![Effect::RequestHint(HintRequest {
        was_correct,
        letter_index,
        star_index: state.star_index,
        total_stars_in_letter: total,
    })];

    if !was_correct {
        next.wrong_tap = Some(WrongTap { star_index: index });
        effects.push(Effect::ArmTimer(TimerKind::WrongTap));
        effects.push(Effect::Emit(GameEvent::WrongTap { star_index: index }));
        return Transition::to(state, next, effects);
    }

    next.star_index += 1;
    if next.star_index < total {
        return Transition::to(state, next, effects);
    }

    // Letter complete.
    let key = catalog.message_key(letter_index).unwrap_or_default();
    let text = catalog.message_for(letter_index).unwrap_or_default().to_string();
    next.completed_letters[letter_index] = true;
    next.star_index = 0;
    next.letter_index += 1;
    // A marker belongs to the finished glyph, not the next one.
    if next.wrong_tap.take().is_some() {
        effects.push(Effect::CancelTimer(TimerKind::WrongTap));
    }
    next.message = Some(OpenMessage {
        source: MessageSource::Letter { letter_index, key: key.clone() },
        text: text.clone(),
    });
    effects.push(Effect::Emit(GameEvent::LetterCompleted { letter_index, key }));
    effects.push(Effect::Emit(GameEvent::MessageOpened { text }));
    effects.push(Effect::ArmTimer(TimerKind::MessageDismiss));

    if next.letter_index >= catalog.len() {
        next.phase = Phase::Finale;
        effects.push(Effect::Emit(GameEvent::FinaleReached));
    }
    Transition::to(state, next, effects)
}

fn reopen_message(catalog: &Catalog, state: &GameState, occurrence: usize) -> Transition {
    let (Some(key), Some(text)) = (catalog.message_key(occurrence), catalog.message_for(occurrence)) else {
        return Transition::identity(state);
    };
    let mut next = state.clone();
    next.message = Some(OpenMessage {
        source: MessageSource::Letter { letter_index: occurrence, key },
        text: text.to_string(),
    });
    let effects = vec![
        Effect::Emit(GameEvent::MessageOpened { text: text.to_string() }),
        Effect::ArmTimer(TimerKind::MessageDismiss),
    ];
    Transition::to(state, next, effects)
}

fn close_message(catalog: &Catalog, state: &GameState) -> Transition {
    let Some(message) = &state.message else {
        return Transition::identity(state);
    };
    let mut next = state.clone();
    next.message = None;
    let mut effects = vec![Effect::CancelTimer(TimerKind::MessageDismiss)];

    if state.phase == Phase::Finale {
        let note = match message.source {
            MessageSource::Letter { .. } => catalog.finale_note(),
            MessageSource::Finale => None,
        };
        match note {
            Some(note) => {
                next.message = Some(OpenMessage {
                    source: MessageSource::Finale,
                    text: note.to_string(),
                });
                effects.push(Effect::Emit(GameEvent::MessageOpened { text: note.to_string() }));
                effects.push(Effect::ArmTimer(TimerKind::MessageDismiss));
            }
            None => {
                next.phase = Phase::FreeRoam;
                next.completed_letters.iter_mut().for_each(|done| *done = true);
                next.letter_index = catalog.len();
                next.star_index = 0;
                effects.push(Effect::Emit(GameEvent::FreeRoamEntered));
            }
        }
    }
    Transition::to(state, next, effects)
}

fn replay(catalog: &Catalog, config: &GameConfig, state: &GameState) -> Transition {
    if state.phase == Phase::Intro {
        return Transition::identity(state);
    }
    let next = GameState::replayed(catalog.len(), config.welcome_hint.clone());
    let effects = vec![
        Effect::CancelAllTimers,
        Effect::ClearSnapshot,
        Effect::Emit(GameEvent::Replayed),
    ];
    Transition::to(state, next, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn playing(catalog: &Catalog) -> GameState {
        GameState::replayed(catalog.len(), "go")
    }

    fn step(catalog: &Catalog, state: &GameState, action: Action) -> Transition {
        reduce(catalog, &GameConfig::default(), state, &action)
    }

    /// Tap every star of every letter in order, closing each card.
    fn play_through(catalog: &Catalog) -> GameState {
        let mut state = playing(catalog);
        for letter in 0..catalog.len() {
            for star in 0..catalog.stars_in(letter) {
                state = step(catalog, &state, Action::tap(star)).state;
            }
            if letter + 1 < catalog.len() {
                state = step(catalog, &state, Action::CloseMessage).state;
            }
        }
        state
    }

    #[test]
    fn advance_intro_starts_play() {
        let catalog = fixtures::na();
        let state = GameState::new(catalog.len(), "intro");
        let t = step(&catalog, &state, Action::AdvanceIntro);
        assert_eq!(t.state.phase, Phase::Playing);
        assert_eq!(t.state.hint_text, GameConfig::default().welcome_hint);
        assert!(t.changed);

        let again = step(&catalog, &t.state, Action::AdvanceIntro);
        assert!(!again.changed);
        assert!(again.effects.is_empty());
    }

    #[test]
    fn tracing_n_completes_letter() {
        let catalog = fixtures::na();
        let mut state = playing(&catalog);
        for (tap, expected) in [(0, 1), (1, 2), (2, 3)] {
            state = step(&catalog, &state, Action::tap(tap)).state;
            assert_eq!(state.star_index, expected);
            assert_eq!(state.letter_index, 0);
        }

        let t = step(&catalog, &state, Action::tap(3));
        assert_eq!(t.state.star_index, 0);
        assert_eq!(t.state.letter_index, 1);
        assert_eq!(t.state.completed_letters, vec![true, false]);
        let message = t.state.message.as_ref().unwrap();
        assert_eq!(
            message.source,
            MessageSource::Letter { letter_index: 0, key: "N".to_string() }
        );
        assert_eq!(message.text, "the n");
        assert!(t.effects.contains(&Effect::Emit(GameEvent::LetterCompleted {
            letter_index: 0,
            key: "N".to_string()
        })));
        assert!(t.effects.contains(&Effect::ArmTimer(TimerKind::MessageDismiss)));
    }

    #[test]
    fn wrong_tap_marks_without_moving() {
        let catalog = fixtures::na();
        let state = playing(&catalog);
        let t = step(&catalog, &state, Action::tap(2));
        assert_eq!(t.state.star_index, 0);
        assert_eq!(t.state.letter_index, 0);
        assert_eq!(t.state.completed_letters, state.completed_letters);
        assert_eq!(t.state.wrong_tap, Some(WrongTap { star_index: 2 }));
        assert_eq!(t.state.hint_text, GameConfig::default().fallback_hints.pick(false, 0, 0));
        assert!(t.effects.contains(&Effect::ArmTimer(TimerKind::WrongTap)));

        let cleared = step(&catalog, &t.state, Action::ClearWrongTap).state;
        assert_eq!(cleared.wrong_tap, None);
        assert_eq!(GameState { hint_text: state.hint_text.clone(), ..cleared }, state);
    }

    #[test]
    fn completing_letter_drops_wrong_tap_marker() {
        let catalog = fixtures::na();
        let mut state = playing(&catalog);
        for tap in [0, 1, 2, 3] {
            state = step(&catalog, &state, Action::tap(tap)).state;
        }
        state = step(&catalog, &state, Action::CloseMessage).state;
        // On "A" (5 stars): mark star 4, then finish the letter.
        state = step(&catalog, &state, Action::tap(4)).state;
        assert_eq!(state.wrong_tap, Some(WrongTap { star_index: 4 }));
        for tap in [0, 1, 2, 3] {
            state = step(&catalog, &state, Action::tap(tap)).state;
        }
        assert_eq!(state.wrong_tap, Some(WrongTap { star_index: 4 }));

        let t = step(&catalog, &state, Action::tap(4));
        assert_eq!(t.state.letter_index, 2);
        assert_eq!(t.state.wrong_tap, None);
        assert!(t.effects.contains(&Effect::CancelTimer(TimerKind::WrongTap)));
    }

    #[test]
    fn taps_request_hints_with_position() {
        let catalog = fixtures::na();
        let state = step(&catalog, &playing(&catalog), Action::tap(0)).state;
        let t = step(&catalog, &state, Action::tap(3));
        assert!(t.effects.contains(&Effect::RequestHint(HintRequest {
            was_correct: false,
            letter_index: 0,
            star_index: 1,
            total_stars_in_letter: 4,
        })));
    }

    #[test]
    fn wrong_taps_never_move_position_in_any_phase() {
        let catalog = fixtures::apa();
        let mut states = vec![GameState::new(catalog.len(), "i"), playing(&catalog)];
        let finale = play_through(&catalog);
        states.push(finale.clone());
        let mut roam = finale;
        while roam.phase != Phase::FreeRoam {
            roam = step(&catalog, &roam, Action::CloseMessage).state;
        }
        states.push(roam);

        for state in states {
            let wrong = state.star_index + 1;
            let t = step(&catalog, &state, Action::tap(wrong));
            assert_eq!(t.state.star_index, state.star_index);
            assert_eq!(t.state.letter_index, state.letter_index);
            assert_eq!(t.state.completed_letters, state.completed_letters);
        }
    }

    #[test]
    fn tap_with_open_card_is_identity() {
        let catalog = fixtures::na();
        let mut state = playing(&catalog);
        for star in 0..4 {
            state = step(&catalog, &state, Action::tap(star)).state;
        }
        assert!(state.is_message_open());
        for action in [Action::tap(0), Action::tap(3), Action::tap_in(0, 1)] {
            let t = step(&catalog, &state, action);
            assert_eq!(t.state, state);
            assert!(!t.changed);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn out_of_range_tap_is_identity() {
        let catalog = fixtures::na();
        let state = playing(&catalog);
        let t = step(&catalog, &state, Action::tap(99));
        assert!(!t.changed);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn tap_on_other_letter_is_silent() {
        let catalog = fixtures::na();
        let state = playing(&catalog);
        let t = step(&catalog, &state, Action::tap_in(0, 1));
        assert!(!t.changed);
        assert!(t.effects.is_empty());

        let t = step(&catalog, &state, Action::tap_in(0, 0));
        assert_eq!(t.state.star_index, 1);
    }

    #[test]
    fn taps_ignored_in_intro_and_finale() {
        let catalog = fixtures::na();
        let intro = GameState::new(catalog.len(), "i");
        assert!(!step(&catalog, &intro, Action::tap(0)).changed);

        let mut finale = play_through(&catalog);
        assert_eq!(finale.phase, Phase::Finale);
        finale.message = None;
        assert!(!step(&catalog, &finale, Action::tap(0)).changed);
    }

    #[test]
    fn full_playthrough_reaches_finale() {
        for catalog in [fixtures::apa(), fixtures::na()] {
            let state = play_through(&catalog);
            assert_eq!(state.phase, Phase::Finale);
            assert!(state.all_completed());
            assert_eq!(state.letter_index, catalog.len());
            assert_eq!(state.star_index, 0);
        }
    }

    #[test]
    fn repeated_letters_unlock_numbered_messages() {
        let catalog = fixtures::apa();
        let mut state = playing(&catalog);
        let mut texts = Vec::new();
        for letter in 0..catalog.len() {
            for star in 0..catalog.stars_in(letter) {
                state = step(&catalog, &state, Action::tap(star)).state;
            }
            texts.push(state.current_message().to_string());
            state = step(&catalog, &state, Action::CloseMessage).state;
        }
        assert_eq!(texts, vec!["first a", "the p", "second a"]);
    }

    #[test]
    fn finale_note_follows_last_letter_card() {
        let catalog = fixtures::apa();
        let state = play_through(&catalog);
        assert_eq!(state.current_message(), "second a");

        let t = step(&catalog, &state, Action::CloseMessage);
        assert_eq!(t.state.phase, Phase::Finale);
        assert_eq!(t.state.message.as_ref().unwrap().source, MessageSource::Finale);
        assert_eq!(t.state.current_message(), "all done");

        let t = step(&catalog, &t.state, Action::CloseMessage);
        assert_eq!(t.state.phase, Phase::FreeRoam);
        assert!(!t.state.is_message_open());
        assert!(t.state.all_completed());
        assert!(t.effects.contains(&Effect::Emit(GameEvent::FreeRoamEntered)));
    }

    #[test]
    fn without_finale_note_closing_enters_free_roam() {
        let catalog = fixtures::na();
        let state = play_through(&catalog);
        let t = step(&catalog, &state, Action::CloseMessage);
        assert_eq!(t.state.phase, Phase::FreeRoam);
    }

    #[test]
    fn free_roam_reopens_messages_without_progress() {
        let catalog = fixtures::apa();
        let mut state = play_through(&catalog);
        while state.phase != Phase::FreeRoam {
            state = step(&catalog, &state, Action::CloseMessage).state;
        }
        let t = step(&catalog, &state, Action::tap_in(1, 2));
        assert_eq!(t.state.current_message(), "second a");
        assert_eq!(t.state.letter_index, state.letter_index);
        assert_eq!(t.state.star_index, state.star_index);
        assert_eq!(t.state.completed_letters, state.completed_letters);

        let closed = step(&catalog, &t.state, Action::CloseMessage).state;
        assert_eq!(closed.phase, Phase::FreeRoam);
        assert!(!closed.is_message_open());

        assert!(!step(&catalog, &state, Action::tap(0)).changed);
        assert!(!step(&catalog, &state, Action::tap_in(0, 7)).changed);
    }

    #[test]
    fn close_without_card_is_identity() {
        let catalog = fixtures::na();
        let t = step(&catalog, &playing(&catalog), Action::CloseMessage);
        assert!(!t.changed);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn replay_resets_everything() {
        let catalog = fixtures::apa();
        let state = play_through(&catalog);
        let t = step(&catalog, &state, Action::Replay);
        assert_eq!(t.state.phase, Phase::Playing);
        assert_eq!(t.state.letter_index, 0);
        assert_eq!(t.state.star_index, 0);
        assert_eq!(t.state.completed_letters, vec![false; 3]);
        assert!(!t.state.is_message_open());
        assert!(t.effects.contains(&Effect::ClearSnapshot));
        assert!(t.effects.contains(&Effect::CancelAllTimers));
    }

    #[test]
    fn replay_ignored_during_intro() {
        let catalog = fixtures::na();
        let intro = GameState::new(catalog.len(), "i");
        assert!(!step(&catalog, &intro, Action::Replay).changed);
    }

    #[test]
    fn set_hint_touches_only_hint() {
        let catalog = fixtures::na();
        let state = step(&catalog, &playing(&catalog), Action::tap(0)).state;
        let t = step(&catalog, &state, Action::SetHint("remote".to_string()));
        assert_eq!(t.state.hint_text, "remote");
        assert_eq!(GameState { hint_text: state.hint_text.clone(), ..t.state }, state);
    }
}
