use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::catalog::Catalog;
use crate::core::time::{TimerKind, Timers};
use crate::hint::HintAdvisor;
use crate::input::queue::{ActionQueue, ActionSender};
use crate::persistence::{self, SnapshotStore};
use crate::progression::{reduce, Action, Effect, GameState, Phase};
use crate::view::{self, ConstellationView, RibbonEntry};
use crate::wallpaper::{self, WallpaperScene};

/// One running greeting.
///
/// Owns the progression state and everything around it: the timers, the
/// queue advisor replies come back through, the snapshot store and the
/// hint advisor. Hosts feed it taps and frame time, and read back state,
/// view models and events.
pub struct Session<S: SnapshotStore, H: HintAdvisor> {
    catalog: Catalog,
    config: GameConfig,
    state: GameState,
    timers: Timers,
    queue: ActionQueue,
    store: S,
    advisor: H,
    events: Vec<GameEvent>,
    torn_down: bool,
}

impl<S: SnapshotStore, H: HintAdvisor> Session<S, H> {
    /// Restore saved progress (or start on the intro screen) and arm the
    /// timers the restored state needs.
    pub fn start(catalog: Catalog, config: GameConfig, store: S, advisor: H) -> Self {
        let state = persistence::load(&store, &catalog)
            .unwrap_or_else(|| GameState::new(catalog.len(), config.intro_hint.clone()));

        let mut session = Self {
            catalog,
            config,
            state,
            timers: Timers::new(),
            queue: ActionQueue::new(),
            store,
            advisor,
            events: Vec::new(),
            torn_down: false,
        };

        if session.state.phase == Phase::Intro {
            session.arm(TimerKind::Intro);
        }
        if session.state.wrong_tap.is_some() {
            session.arm(TimerKind::WrongTap);
        }
        if session.state.is_message_open() {
            session.arm(TimerKind::MessageDismiss);
        }
        log::info!(
            "Session started: {:?}, letter {}/{}",
            session.state.phase,
            session.state.letter_index,
            session.catalog.len()
        );
        session
    }

    /// Apply one action. Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if self.torn_down {
            log::debug!("Ignoring {action:?} after teardown");
            return false;
        }

        let transition = reduce(&self.catalog, &self.config, &self.state, &action);
        log::debug!("{action:?} -> changed: {}", transition.changed);
        if transition.state.phase != self.state.phase {
            log::info!("Phase {:?} -> {:?}", self.state.phase, transition.state.phase);
        }
        self.state = transition.state;

        let mut cleared = false;
        for effect in transition.effects {
            match effect {
                Effect::RequestHint(request) => self.advisor.request(request, self.queue.sender()),
                Effect::ArmTimer(kind) => self.arm(kind),
                Effect::CancelTimer(kind) => self.timers.cancel(kind),
                Effect::CancelAllTimers => self.timers.cancel_all(),
                Effect::ClearSnapshot => {
                    persistence::clear(&mut self.store);
                    cleared = true;
                }
                Effect::Emit(event) => self.events.push(event),
            }
        }

        // Replay leaves the slot empty until the next change.
        if transition.changed && !cleared && self.state.phase != Phase::Intro {
            persistence::save(&mut self.store, &self.state);
        }
        transition.changed
    }

    /// Advance timers by `dt_ms`, then apply queued advisor replies in arrival order.
    pub fn tick(&mut self, dt_ms: f32) {
        if self.torn_down {
            return;
        }
        for kind in self.timers.advance(dt_ms) {
            self.dispatch(Action::for_timer(kind));
        }
        for action in self.queue.drain() {
            self.dispatch(action);
        }
    }

    /// Tap star `index`, optionally naming the letter occurrence it belongs to.
    pub fn tap(&mut self, index: usize, letter: Option<usize>) -> bool {
        self.dispatch(Action::TapPoint { index, letter })
    }

    /// Tap the glowing star of the active letter.
    pub fn tap_next(&mut self) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }
        self.dispatch(Action::tap_in(self.state.star_index, self.state.letter_index))
    }

    pub fn close_message(&mut self) -> bool {
        self.dispatch(Action::CloseMessage)
    }

    pub fn replay(&mut self) -> bool {
        self.dispatch(Action::Replay)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle for pushing actions from outside the tap path.
    pub fn sender(&self) -> ActionSender {
        self.queue.sender()
    }

    pub fn view(&self) -> ConstellationView {
        ConstellationView::build(&self.catalog, &self.state)
    }

    pub fn ribbon(&self) -> Vec<RibbonEntry> {
        view::ribbon(&self.catalog, &self.state)
    }

    /// Wallpaper of the whole name, independent of progress.
    pub fn wallpaper(&self) -> WallpaperScene {
        wallpaper::compose(&self.catalog, &self.config.wallpaper)
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Stop the session: cancel timers and refuse late advisor replies.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.timers.cancel_all();
        self.queue.close();
        self.torn_down = true;
        log::info!("Session torn down");
    }

    fn arm(&mut self, kind: TimerKind) {
        let delay = match kind {
            TimerKind::Intro => Some(self.config.intro_delay_ms),
            TimerKind::WrongTap => Some(self.config.wrong_tap_clear_ms),
            TimerKind::MessageDismiss => self.config.message_dismiss_ms,
        };
        if let Some(delay) = delay {
            self.timers.arm(kind, delay);
        }
    }
}

impl<S: SnapshotStore, H: HintAdvisor> Drop for Session<S, H> {
    fn drop(&mut self) {
        self.queue.close();
    }
}
