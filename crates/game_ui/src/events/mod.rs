//! Deferred command queue
//!
//! Widget callbacks never mutate the component tree they are dispatched from.
//! They push an intent onto a [`CommandQueue`]; the owner drains the queue
//! once per frame, after all input has been dispatched, and applies the
//! intents to the tree.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Single-threaded FIFO of staged commands
///
/// Cloning yields another handle onto the same queue, so a callback can own a
/// sender while the game loop keeps the receiving end.
#[derive(Debug)]
pub struct CommandQueue<C> {
    pending: Rc<RefCell<VecDeque<C>>>,
}

impl<C> CommandQueue<C> {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            pending: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Stage a command for the next drain
    pub fn send(&self, command: C) {
        self.pending.borrow_mut().push_back(command);
    }

    /// Take every staged command in the order it was sent
    pub fn drain(&self) -> Vec<C> {
        self.pending.borrow_mut().drain(..).collect()
    }

    /// Number of staged commands
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Whether nothing is staged
    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl<C> Clone for CommandQueue<C> {
    fn clone(&self) -> Self {
        Self {
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<C> Default for CommandQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_queue() {
        let queue = CommandQueue::new();
        let sender = queue.clone();

        sender.send(1);
        sender.send(2);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.drain(), vec![1, 2]);
        assert!(sender.is_empty());
    }
}
