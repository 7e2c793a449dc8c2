use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::progression::Action;

#[derive(Debug, Default)]
struct Mailbox {
    actions: VecDeque<Action>,
    closed: bool,
}

/// A queue of pending actions.
/// Asynchronous collaborators write into it through an [`ActionSender`];
/// the session drains it on every tick, in arrival order.
#[derive(Debug, Default)]
pub struct ActionQueue {
    inner: Rc<RefCell<Mailbox>>,
}

/// Cloneable handle for pushing actions into a session's queue.
/// Handed to the hint advisor so its replies rejoin the session as actions.
#[derive(Debug, Clone)]
pub struct ActionSender {
    inner: Rc<RefCell<Mailbox>>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new handle feeding this queue.
    pub fn sender(&self) -> ActionSender {
        ActionSender { inner: Rc::clone(&self.inner) }
    }

    /// Push an action directly.
    pub fn push(&self, action: Action) {
        self.sender().send(action);
    }

    /// Drain all pending actions. Returns them in arrival order and clears the queue.
    pub fn drain(&self) -> Vec<Action> {
        self.inner.borrow_mut().actions.drain(..).collect()
    }

    /// Stop accepting actions and drop anything still pending.
    /// Late replies from detached work are discarded from now on.
    pub fn close(&self) {
        let mut mailbox = self.inner.borrow_mut();
        mailbox.closed = true;
        mailbox.actions.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    /// Check if there are pending actions.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().actions.is_empty()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.inner.borrow().actions.len()
    }
}

impl ActionSender {
    /// Enqueue an action. Returns `false` if the owning session is gone.
    pub fn send(&self, action: Action) -> bool {
        let mut mailbox = self.inner.borrow_mut();
        if mailbox.closed {
            log::debug!("action queue closed, dropping {:?}", action);
            return false;
        }
        mailbox.actions.push_back(action);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }
}
