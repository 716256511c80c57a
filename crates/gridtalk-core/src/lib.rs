//! Editor engine for grid-based AAC boards.
//!
//! [`EditorSession`] owns the board during an edit session and funnels
//! every mutation through the model's invariant checks; the interpreter
//! turns preview-mode button activations into navigation and [`Effect`]
//! commands for the hosting application's collaborators.

pub mod history;
pub mod interpreter;
pub mod repository;
pub mod session;

pub use history::{NAV_HISTORY_CAP, NavigationHistory};
pub use interpreter::Effect;
pub use repository::{BoardRepository, MemoryRepository};
pub use session::{EditorSession, SessionState};

// Re-export the model so hosts depend on one crate.
pub use gridtalk_model as model;
