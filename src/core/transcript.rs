//! Append-only transcript store.
//!
//! The transcript grows only by `append`; the single permitted mutation is
//! replacing the final element while it is pending. Insertion order is
//! display order. There is no deletion and no persistence across sessions.

use std::collections::VecDeque;

use crate::core::message::Turn;

#[derive(Debug, Default)]
pub struct Transcript {
    turns: VecDeque<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a turn at the end. This is the only way to add a turn.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push_back(turn);
    }

    /// Overwrite the element at the final index. Errors on an empty
    /// transcript; no other index is ever mutated.
    pub fn replace_last(&mut self, turn: Turn) -> Result<(), ReplaceLastError> {
        match self.turns.back_mut() {
            Some(last) => {
                *last = turn;
                Ok(())
            }
            None => Err(ReplaceLastError::Empty),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReplaceLastError {
    Empty,
}

impl std::fmt::Display for ReplaceLastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplaceLastError::Empty => write!(f, "cannot replace last turn of an empty transcript"),
        }
    }
}

impl std::error::Error for ReplaceLastError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::resolved("first", "a"));
        transcript.append(Turn::resolved("second", "b"));

        let users: Vec<&str> = transcript.iter().map(|t| t.user.as_str()).collect();
        assert_eq!(users, ["first", "second"]);
    }

    #[test]
    fn replace_last_only_touches_the_final_index() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::resolved("first", "a"));
        transcript.append(Turn::pending("second"));

        transcript
            .replace_last(Turn::resolved("second", "b"))
            .unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.iter().next().unwrap().bot, "a");
        assert_eq!(transcript.last().unwrap().bot, "b");
    }

    #[test]
    fn replace_last_on_empty_transcript_is_an_error() {
        let mut transcript = Transcript::new();
        assert_eq!(
            transcript.replace_last(Turn::resolved("x", "y")),
            Err(ReplaceLastError::Empty)
        );
        assert!(transcript.is_empty());
    }
}
