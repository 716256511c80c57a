//! The editor session: single owner of the board being edited.
//!
//! Every mutation funnels through this type. Operations validate before
//! they touch the board, so a rejected edit leaves the in-memory board
//! unchanged and the specific [`BoardError`] is surfaced to the host.
//!
//! The session is a small state machine: `NoBoard` until a board is
//! loaded, then `Editing` or `Previewing` depending on the edit-mode flag.
//! Selection only exists while editing; the navigation history only grows
//! while previewing.

use tracing::{debug, info, warn};

use gridtalk_model::{
    Board, BoardError, Button, ButtonId, ButtonPatch, CoverImage, Grid, Page, PageId, RegionId,
    Result, VideoPlayer,
};

use crate::history::NavigationHistory;
use crate::repository::BoardRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoBoard,
    Editing,
    Previewing,
}

/// Owns the current board, page pointer, selection, mode and dirty flag
/// for the duration of an edit session.
#[derive(Debug, Default)]
pub struct EditorSession {
    board: Option<Board>,
    current_page: Option<PageId>,
    selected_button: Option<ButtonId>,
    edit_mode: bool,
    dirty: bool,
    history: NavigationHistory,
    pending_save: Option<PendingSave>,
    /// Bumped on every applied mutation; lets a completing save tell
    /// whether edits landed while it was in flight.
    generation: u64,
}

#[derive(Debug)]
struct PendingSave {
    generation: u64,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Load a board and enter edit mode on its home page.
    ///
    /// Refuses to replace a dirty board (`UnsavedChanges`): the host must
    /// save or [`discard`](Self::discard) first, so the session can never
    /// be made to silently drop edits. A board with zero pages or broken
    /// layout invariants is rejected up front.
    pub fn load_board(&mut self, board: Board) -> Result<()> {
        if self.board.is_some() && self.dirty {
            return Err(BoardError::UnsavedChanges);
        }
        board.check_invariants()?;
        let home = board
            .home_page()
            .map(|page| page.id.clone())
            .ok_or(BoardError::EmptyBoard)?;
        info!(board = %board.id, pages = board.pages.len(), "board loaded");
        self.board = Some(board);
        self.current_page = Some(home);
        self.selected_button = None;
        self.edit_mode = true;
        self.dirty = false;
        self.history.clear();
        self.pending_save = None;
        Ok(())
    }

    /// Explicit teardown that drops the board regardless of unsaved edits.
    pub fn discard(&mut self) {
        if self.dirty {
            info!("discarding board with unsaved changes");
        }
        *self = Self::default();
    }

    /// Teardown that refuses while unsaved edits exist.
    pub fn unload_board(&mut self) -> Result<()> {
        if self.dirty {
            return Err(BoardError::UnsavedChanges);
        }
        *self = Self::default();
        Ok(())
    }

    // ------------------------------------------------------------------
    // State inspection
    // ------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        match (&self.board, self.edit_mode) {
            (None, _) => SessionState::NoBoard,
            (Some(_), true) => SessionState::Editing,
            (Some(_), false) => SessionState::Previewing,
        }
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn current_page_id(&self) -> Option<&PageId> {
        self.current_page.as_ref()
    }

    pub fn current_page(&self) -> Option<&Page> {
        let board = self.board.as_ref()?;
        board.page(self.current_page.as_ref()?)
    }

    pub fn selected_button(&self) -> Option<&ButtonId> {
        self.selected_button.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.board.is_some() && self.edit_mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ------------------------------------------------------------------
    // Mode and navigation
    // ------------------------------------------------------------------

    /// Switch between `Editing` and `Previewing`.
    ///
    /// Entering preview clears the selection (it has no meaning outside
    /// edit mode) and restarts the navigation history at the current page.
    /// Leaving preview drops the history so it can never drive navigation
    /// in edit mode.
    pub fn set_edit_mode(&mut self, edit: bool) -> Result<()> {
        if self.board.is_none() {
            return Err(BoardError::NoBoardLoaded);
        }
        if self.edit_mode == edit {
            return Ok(());
        }
        self.edit_mode = edit;
        if edit {
            self.history.clear();
        } else {
            self.selected_button = None;
            if let Some(current) = self.current_page.clone() {
                self.history.reset(current);
            }
        }
        Ok(())
    }

    /// Navigate to a page of the loaded board.
    ///
    /// In preview the navigation is recorded in the back-history; in edit
    /// mode (the "manage pages" flow) it is direct and history is
    /// untouched.
    pub fn set_current_page(&mut self, page_id: &PageId) -> Result<()> {
        let board = self.board.as_ref().ok_or(BoardError::NoBoardLoaded)?;
        if !board.contains_page(page_id) {
            return Err(BoardError::UnknownPage(page_id.clone()));
        }
        if !self.edit_mode && self.current_page.as_ref() != Some(page_id) {
            self.history.push(page_id.clone());
        }
        self.current_page = Some(page_id.clone());
        Ok(())
    }

    /// Pop the navigation history. Returns true if a navigation happened;
    /// outside preview, or with fewer than two entries, this is a no-op.
    pub fn back(&mut self) -> bool {
        if self.board.is_none() || self.edit_mode {
            return false;
        }
        match self.history.pop() {
            Some(previous) => {
                self.current_page = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Jump to the board's home page.
    pub fn home(&mut self) -> Result<()> {
        let home = self
            .board
            .as_ref()
            .ok_or(BoardError::NoBoardLoaded)?
            .home_page()
            .map(|page| page.id.clone())
            .ok_or(BoardError::EmptyBoard)?;
        self.set_current_page(&home)
    }

    /// Select a button for editing. Only meaningful in edit mode; a silent
    /// no-op while previewing.
    pub fn select_button(&mut self, button_id: Option<ButtonId>) -> Result<()> {
        let board = self.board.as_ref().ok_or(BoardError::NoBoardLoaded)?;
        if !self.edit_mode {
            return Ok(());
        }
        if let Some(id) = &button_id {
            if board.find_button(id).is_none() {
                return Err(BoardError::UnknownButton(id.clone()));
            }
        }
        self.selected_button = button_id;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutations (edit mode only; all set the dirty flag on success)
    // ------------------------------------------------------------------

    /// Add a button to the current page.
    pub fn add_button(&mut self, button: Button) -> Result<ButtonId> {
        let (grid, current) = self.edit_target()?;
        let id = button.id.clone();
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let page = board
            .page_mut(&current)
            .ok_or(BoardError::UnknownPage(current.clone()))?;
        let outcome = page.add_button(&grid, button);
        self.apply("add_button", outcome)?;
        Ok(id)
    }

    /// Convenience: create a fresh label-speaking button at a cell of the
    /// current page.
    pub fn add_button_at(&mut self, row: u32, col: u32, label: &str) -> Result<ButtonId> {
        let board = self.board.as_ref().ok_or(BoardError::NoBoardLoaded)?;
        let id = board.next_button_id()?;
        let button = Button::new(id, row, col, label);
        self.add_button(button)
    }

    /// Patch a button on the current page.
    pub fn update_button(&mut self, button_id: &ButtonId, patch: &ButtonPatch) -> Result<()> {
        let (grid, current) = self.edit_target()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let page = board
            .page_mut(&current)
            .ok_or(BoardError::UnknownPage(current.clone()))?;
        let outcome = page.update_button(&grid, button_id, patch);
        self.apply("update_button", outcome)
    }

    /// Remove a button from the current page, dropping a stale selection.
    pub fn delete_button(&mut self, button_id: &ButtonId) -> Result<()> {
        let (_, current) = self.edit_target()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let page = board
            .page_mut(&current)
            .ok_or(BoardError::UnknownPage(current.clone()))?;
        let outcome = page.remove_button(button_id).map(|_| ());
        self.apply("delete_button", outcome)?;
        if self.selected_button.as_ref() == Some(button_id) {
            self.selected_button = None;
        }
        Ok(())
    }

    /// Copy a button on the current page into the nearest free cell.
    pub fn duplicate_button(&mut self, button_id: &ButtonId) -> Result<ButtonId> {
        let (_, current) = self.edit_target()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let outcome = board.duplicate_button(&current, button_id);
        self.apply("duplicate_button", outcome)
    }

    /// Add a video region to the current page.
    pub fn add_video_player(&mut self, region: VideoPlayer) -> Result<()> {
        let (grid, current) = self.edit_target()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let page = board
            .page_mut(&current)
            .ok_or(BoardError::UnknownPage(current.clone()))?;
        let outcome = page.add_video_player(&grid, region);
        self.apply("add_video_player", outcome)
    }

    /// Remove a video region from the current page.
    pub fn remove_video_player(&mut self, region_id: &RegionId) -> Result<()> {
        let (_, current) = self.edit_target()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let page = board
            .page_mut(&current)
            .ok_or(BoardError::UnknownPage(current.clone()))?;
        let outcome = page.remove_video_player(region_id).map(|_| ());
        self.apply("remove_video_player", outcome)
    }

    /// Append a new empty page and return its id.
    pub fn add_page(&mut self) -> Result<PageId> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let outcome = board.add_page();
        self.apply("add_page", outcome)
    }

    pub fn rename_page(&mut self, page_id: &PageId, name: &str) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let outcome = board.rename_page(page_id, name);
        self.apply("rename_page", outcome)
    }

    /// Delete a page. When the current page is deleted the session
    /// reselects the new first page; a selection on the deleted page is
    /// dropped.
    pub fn delete_page(&mut self, page_id: &PageId) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let outcome = board.delete_page(page_id).map(|_| ());
        self.apply("delete_page", outcome)?;
        if self.current_page.as_ref() == Some(page_id) {
            let home = self
                .board
                .as_ref()
                .and_then(|board| board.home_page())
                .map(|page| page.id.clone());
            self.current_page = home;
        }
        if let Some(selected) = self.selected_button.clone() {
            let still_there = self
                .board
                .as_ref()
                .is_some_and(|board| board.find_button(&selected).is_some());
            if !still_there {
                self.selected_button = None;
            }
        }
        Ok(())
    }

    /// Move a page within board order. Out-of-range or equal indices are a
    /// silent no-op and do not dirty the session.
    pub fn reorder_pages(&mut self, from: usize, to: usize) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        if from == to || from >= board.pages.len() || to >= board.pages.len() {
            return Ok(());
        }
        board.reorder_pages(from, to);
        self.mark_dirty("reorder_pages");
        Ok(())
    }

    /// Resize the board grid (lossy shrink applies to every page).
    pub fn resize_grid(&mut self, grid: Grid) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let outcome = board.resize_grid(grid);
        self.apply("resize_grid", outcome)?;
        if let Some(selected) = self.selected_button.clone() {
            let still_there = self
                .board
                .as_ref()
                .is_some_and(|board| board.find_button(&selected).is_some());
            if !still_there {
                self.selected_button = None;
            }
        }
        Ok(())
    }

    pub fn rename_board(&mut self, name: &str) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        board.name = name.to_string();
        self.mark_dirty("rename_board");
        Ok(())
    }

    pub fn set_cover_image(&mut self, cover: Option<CoverImage>) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        board.cover_image = cover;
        self.mark_dirty("set_cover_image");
        Ok(())
    }

    /// Merge pages produced by the board-generation collaborator through
    /// the same invariant checks as manual edits.
    pub fn merge_generated_pages(&mut self, pages: Vec<Page>) -> Result<()> {
        self.require_edit()?;
        let board = self.board.as_mut().ok_or(BoardError::NoBoardLoaded)?;
        let outcome = board.merge_generated_pages(pages);
        self.apply("merge_generated_pages", outcome)
    }

    // ------------------------------------------------------------------
    // Save protocol
    // ------------------------------------------------------------------

    /// Begin a save: returns the snapshot to hand to the persistence
    /// collaborator. Only one save may be in flight at a time.
    pub fn begin_save(&mut self) -> Result<Board> {
        let board = self.board.as_ref().ok_or(BoardError::NoBoardLoaded)?;
        if self.pending_save.is_some() {
            return Err(BoardError::SaveInProgress);
        }
        self.pending_save = Some(PendingSave {
            generation: self.generation,
        });
        info!(board = %board.id, "save started");
        Ok(board.clone())
    }

    /// Finish a save with the collaborator's outcome.
    ///
    /// On success the persisted board (which may carry newly assigned ids)
    /// is adopted and the dirty flag cleared - unless edits landed while
    /// the save was in flight, in which case the current board and the
    /// dirty flag are kept so the host prompts again. On failure the dirty
    /// flag stays set and `SaveFailed` is surfaced.
    pub fn complete_save(
        &mut self,
        outcome: std::result::Result<Board, String>,
    ) -> Result<()> {
        let pending = self.pending_save.take().ok_or(BoardError::NoSaveInFlight)?;
        match outcome {
            Ok(saved) => {
                if pending.generation == self.generation {
                    self.adopt_saved_board(saved)?;
                    self.dirty = false;
                    info!("save completed");
                } else {
                    debug!("save completed but edits landed in flight; board stays dirty");
                }
                Ok(())
            }
            Err(message) => {
                warn!(error = %message, "save failed");
                Err(BoardError::SaveFailed(message))
            }
        }
    }

    /// Run both phases of the save protocol against a repository.
    pub fn save_with(&mut self, repository: &mut dyn BoardRepository) -> Result<()> {
        let snapshot = self.begin_save()?;
        let outcome = repository
            .save_board(snapshot)
            .map_err(|error| error.to_string());
        self.complete_save(outcome)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Replace the in-memory board with the persisted one, remapping the
    /// page pointer, selection and navigation history when their ids were
    /// rewritten.
    fn adopt_saved_board(&mut self, saved: Board) -> Result<()> {
        saved.check_invariants()?;
        let current_still_there = self
            .current_page
            .as_ref()
            .is_some_and(|id| saved.contains_page(id));
        if !current_still_there {
            self.current_page = saved.home_page().map(|page| page.id.clone());
        }
        if let Some(selected) = self.selected_button.clone() {
            if saved.find_button(&selected).is_none() {
                self.selected_button = None;
            }
        }
        let history_stale = self
            .history
            .pages()
            .iter()
            .any(|id| !saved.contains_page(id));
        self.board = Some(saved);
        if history_stale {
            if let Some(current) = self.current_page.clone() {
                self.history.reset(current);
            }
        }
        Ok(())
    }

    fn require_edit(&self) -> Result<()> {
        if self.board.is_none() {
            return Err(BoardError::NoBoardLoaded);
        }
        if !self.edit_mode {
            return Err(BoardError::NotInEditMode);
        }
        Ok(())
    }

    /// Grid and current page id for a mutation on the current page.
    fn edit_target(&self) -> Result<(Grid, PageId)> {
        self.require_edit()?;
        let board = self.board.as_ref().ok_or(BoardError::NoBoardLoaded)?;
        let current = self
            .current_page
            .clone()
            .ok_or(BoardError::NoBoardLoaded)?;
        Ok((board.grid, current))
    }

    fn apply<T>(&mut self, op: &'static str, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                self.mark_dirty(op);
                Ok(value)
            }
            Err(error) => {
                warn!(op, error = %error, "mutation rejected");
                Err(error)
            }
        }
    }

    fn mark_dirty(&mut self, op: &'static str) {
        self.dirty = true;
        self.generation += 1;
        debug!(op, generation = self.generation, "board mutated");
    }
}
