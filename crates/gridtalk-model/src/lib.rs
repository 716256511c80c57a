pub mod action;
pub mod audit;
pub mod board;
pub mod button;
pub mod error;
pub mod grid;
pub mod ids;
pub mod page;

pub use action::{Action, ActionKind};
pub use audit::{AuditIssue, BoardAudit, IssueSeverity, audit_board};
pub use board::{Board, BoardSummary, CoverImage};
pub use button::{Button, ButtonPatch, VideoPlayer};
pub use error::{BoardError, Result};
pub use grid::Grid;
pub use ids::{BoardId, ButtonId, PageId, RegionId};
pub use page::{CellOccupant, Page};
