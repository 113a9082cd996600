//! Bounded FIFO of recent turns.

use crate::turn::Turn;
use munglog_core::message::Message;
use std::collections::VecDeque;

/// The most recent turns of one conversation, oldest first.
///
/// `len() <= capacity()` always holds. Appending to a full memory evicts the
/// oldest turn. None of the operations can fail.
#[derive(Debug, Clone)]
pub struct SessionMemory {
    turns: VecDeque<Turn>,
    capacity: usize,
    /// Bumped on every `clear()`.
    epoch: u64,
}

impl SessionMemory {
    /// Create an empty memory holding at most `capacity` turns.
    ///
    /// A capacity of zero is accepted and keeps nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
            epoch: 0,
        }
    }

    /// Record a new exchange at the tail.
    pub fn append(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.push(Turn::answered(question, answer));
    }

    /// Record an already-built turn at the tail, evicting the oldest if full.
    pub fn push(&mut self, turn: Turn) {
        if self.capacity == 0 {
            return;
        }
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Replay stored turns as alternating user/assistant messages, oldest first.
    pub fn to_prompt_messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() * 2);
        for turn in &self.turns {
            messages.push(Message::user(turn.question()));
            messages.push(Message::assistant(turn.answer()));
        }
        messages
    }

    /// Drop every stored turn. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.turns.len();
        self.turns.clear();
        self.epoch = self.epoch.wrapping_add(1);
        removed
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of `clear()` calls so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Stored turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}
