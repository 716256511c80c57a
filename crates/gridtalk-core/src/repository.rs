//! Persistence collaborator boundary.
//!
//! The engine never talks to storage directly; the hosting application
//! provides a [`BoardRepository`]. [`MemoryRepository`] is the in-memory
//! implementation used by tests and the CLI.

use std::collections::BTreeMap;

use gridtalk_model::{Board, BoardError, BoardId, BoardSummary, Result};

pub trait BoardRepository {
    fn load_board(&self, id: &BoardId) -> Result<Board>;
    /// Persist a board and return the stored version. A real backend may
    /// rewrite provisional ids here, which is why the persisted board
    /// flows back to the caller.
    fn save_board(&mut self, board: Board) -> Result<Board>;
    fn list_boards(&self) -> Result<Vec<BoardSummary>>;
    fn delete_board(&mut self, id: &BoardId) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    boards: BTreeMap<String, Board>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl BoardRepository for MemoryRepository {
    fn load_board(&self, id: &BoardId) -> Result<Board> {
        self.boards
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| BoardError::UnknownBoard(id.clone()))
    }

    fn save_board(&mut self, board: Board) -> Result<Board> {
        board.check_invariants()?;
        self.boards.insert(board.id.to_string(), board.clone());
        Ok(board)
    }

    fn list_boards(&self) -> Result<Vec<BoardSummary>> {
        Ok(self.boards.values().map(BoardSummary::of).collect())
    }

    fn delete_board(&mut self, id: &BoardId) -> Result<()> {
        self.boards
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| BoardError::UnknownBoard(id.clone()))
    }
}
