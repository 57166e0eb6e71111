//! Ordered in-memory log of conversation turns.

use taxmitra_types::chat::Turn;

/// Ordered sequence of turns; insertion order is display order.
///
/// Turns are never reordered or edited in place. The store is created empty
/// or rehydrated from persisted state at startup.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from persisted turns, preserving their stored order.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Append a turn to the end. No dedup, no size cap.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Drop the history, retaining only the leading welcome turn.
    ///
    /// Retention keys off the `is_welcome` tag rather than position: after a
    /// corrupt-state fallback the first turn can be an ordinary user turn,
    /// which must not survive a clear.
    pub fn clear(&mut self) {
        let welcome = self.turns.first().filter(|t| t.is_welcome).cloned();
        self.turns.clear();
        if let Some(turn) = welcome {
            self.turns.push(turn);
        }
    }

    /// Full ordered view for read-only iteration.
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
