use thiserror::Error;

use crate::ids::{ButtonId, PageId, RegionId};

/// Errors raised at the board mutation boundary.
///
/// Every variant is recoverable: the mutation that produced it is rejected
/// as a whole and the in-memory board is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u32, col: u32 },
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
    #[error("invalid grid {rows}x{cols}: rows and cols must be positive")]
    InvalidGrid { rows: u32, cols: u32 },
    #[error("a board must keep at least one page")]
    LastPage,
    #[error("no free cell left on the page")]
    NoSpace,
    #[error("page {0} does not belong to this board")]
    UnknownPage(PageId),
    #[error("button {0} does not belong to this page")]
    UnknownButton(ButtonId),
    #[error("video region {0} does not belong to this page")]
    UnknownRegion(RegionId),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    #[error("board has no pages")]
    EmptyBoard,
    #[error("operation is only valid in edit mode")]
    NotInEditMode,
    #[error("no board is loaded")]
    NoBoardLoaded,
    #[error("board has unsaved changes; save or discard them first")]
    UnsavedChanges,
    #[error("a save is already in flight")]
    SaveInProgress,
    #[error("no save is in flight")]
    NoSaveInFlight,
    #[error("save failed: {0}")]
    SaveFailed(String),
    #[error("board {0} does not exist")]
    UnknownBoard(crate::ids::BoardId),
}

pub type Result<T> = std::result::Result<T, BoardError>;
