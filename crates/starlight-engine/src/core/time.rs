/// The single-shot timers a session can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Leaves the intro screen.
    Intro,
    /// Clears the wrong-tap marker.
    WrongTap,
    /// Auto-dismisses an open message card.
    MessageDismiss,
}

impl TimerKind {
    const ALL: [TimerKind; 3] = [TimerKind::Intro, TimerKind::WrongTap, TimerKind::MessageDismiss];

    fn slot(self) -> usize {
        match self {
            TimerKind::Intro => 0,
            TimerKind::WrongTap => 1,
            TimerKind::MessageDismiss => 2,
        }
    }
}

/// Independent single-shot countdowns, advanced by frame time.
/// At most one timer of each kind is pending; arming again restarts it.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    /// Remaining milliseconds per kind, `None` when idle.
    remaining: [Option<f32>; 3],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a timer.
    pub fn arm(&mut self, kind: TimerKind, delay_ms: f32) {
        self.remaining[kind.slot()] = Some(delay_ms.max(0.0));
    }

    /// Drop a pending timer. No-op if it isn't armed.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.remaining[kind.slot()] = None;
    }

    /// Drop every pending timer.
    pub fn cancel_all(&mut self) {
        self.remaining = [None; 3];
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.remaining[kind.slot()].is_some()
    }

    /// Milliseconds left on a pending timer.
    pub fn remaining(&self, kind: TimerKind) -> Option<f32> {
        self.remaining[kind.slot()]
    }

    /// Advance all pending timers. Returns the kinds that fired, in declaration order.
    /// A fired timer is disarmed.
    pub fn advance(&mut self, dt_ms: f32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for kind in TimerKind::ALL {
            let slot = &mut self.remaining[kind.slot()];
            if let Some(left) = slot {
                *left -= dt_ms;
                if *left <= 0.0 {
                    *slot = None;
                    fired.push(kind);
                }
            }
        }
        fired
    }
}
