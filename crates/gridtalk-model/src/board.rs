//! The top-level editable unit: a named, ordered collection of pages
//! sharing one grid size.
//!
//! The first page in board order is the home page. There is no flag for it,
//! so every page-list mutation here is written to preserve index-0
//! semantics deliberately: `delete_page` refuses to empty the board and
//! `reorder_pages` moves whole entries, never leaving a hole at the front.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::button::Button;
use crate::error::{BoardError, Result};
use crate::grid::Grid;
use crate::ids::{BoardId, ButtonId, PageId, RegionId};
use crate::page::Page;

/// Cover artwork shown in board listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    pub symbol_path: String,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub grid: Grid,
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
}

impl Board {
    /// New board with a single empty starter page.
    pub fn new(id: BoardId, name: impl Into<String>, grid: Grid) -> Result<Self> {
        if !grid.is_valid() {
            return Err(BoardError::InvalidGrid {
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        let home = Page::new(PageId::new("page-1")?, "Page 1");
        Ok(Self {
            id,
            name: name.into(),
            grid,
            pages: vec![home],
            cover_image: None,
        })
    }

    /// The home page. Valid boards always have at least one page.
    pub fn home_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|page| &page.id == id)
    }

    pub fn page_mut(&mut self, id: &PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|page| &page.id == id)
    }

    pub fn contains_page(&self, id: &PageId) -> bool {
        self.page(id).is_some()
    }

    /// Locate a button anywhere on the board.
    pub fn find_button(&self, id: &ButtonId) -> Option<(&Page, &Button)> {
        self.pages
            .iter()
            .find_map(|page| page.button(id).map(|button| (page, button)))
    }

    /// Append a page with an auto-generated name and a fresh local id,
    /// inheriting the board grid. Returns the new page's id.
    pub fn add_page(&mut self) -> Result<PageId> {
        let id = self.next_page_id()?;
        let name = format!("Page {}", self.pages.len() + 1);
        self.pages.push(Page::new(id.clone(), name));
        Ok(id)
    }

    pub fn rename_page(&mut self, id: &PageId, name: impl Into<String>) -> Result<()> {
        let page = self
            .page_mut(id)
            .ok_or_else(|| BoardError::UnknownPage(id.clone()))?;
        page.name = name.into();
        Ok(())
    }

    /// Plain array move. Silent no-op when indices are equal or out of
    /// range.
    pub fn reorder_pages(&mut self, from: usize, to: usize) {
        if from == to || from >= self.pages.len() || to >= self.pages.len() {
            return;
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
    }

    /// Delete a page. A board must always retain at least one page so there
    /// is always a valid home page.
    pub fn delete_page(&mut self, id: &PageId) -> Result<Page> {
        if self.pages.len() == 1 {
            return Err(BoardError::LastPage);
        }
        let index = self
            .pages
            .iter()
            .position(|page| &page.id == id)
            .ok_or_else(|| BoardError::UnknownPage(id.clone()))?;
        Ok(self.pages.remove(index))
    }

    /// Resize the shared grid, applying the lossy-shrink policy to every
    /// page. Atomic: an invalid grid leaves the board untouched.
    pub fn resize_grid(&mut self, grid: Grid) -> Result<()> {
        if !grid.is_valid() {
            return Err(BoardError::InvalidGrid {
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        self.grid = grid;
        for page in &mut self.pages {
            page.resize(&grid);
        }
        Ok(())
    }

    /// Copy a button to the nearest free cell, scanning row-major from the
    /// original position and wrapping. Returns the new button's id.
    pub fn duplicate_button(&mut self, page_id: &PageId, button_id: &ButtonId) -> Result<ButtonId> {
        let new_id = self.next_button_id()?;
        let grid = self.grid;
        let page = self
            .page_mut(page_id)
            .ok_or_else(|| BoardError::UnknownPage(page_id.clone()))?;
        let source = page
            .button(button_id)
            .ok_or_else(|| BoardError::UnknownButton(button_id.clone()))?;
        let (row, col) = page
            .first_free_cell_from(&grid, source.row, source.col)
            .ok_or(BoardError::NoSpace)?;
        let mut copy = source.clone();
        copy.id = new_id.clone();
        copy.row = row;
        copy.col = col;
        page.buttons.push(copy);
        Ok(new_id)
    }

    /// Append externally generated pages through the same validation as
    /// manual edits. The whole batch is rejected on the first violation.
    pub fn merge_generated_pages(&mut self, pages: Vec<Page>) -> Result<()> {
        let mut page_ids: BTreeSet<&str> = self.pages.iter().map(|p| p.id.as_str()).collect();
        let mut button_ids: BTreeSet<&str> = self
            .pages
            .iter()
            .flat_map(|p| p.buttons.iter())
            .map(|b| b.id.as_str())
            .collect();
        let mut region_ids: BTreeSet<&str> = self
            .pages
            .iter()
            .flat_map(|p| p.video_players.iter())
            .map(|r| r.id.as_str())
            .collect();
        for page in &pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(BoardError::DuplicateId(page.id.to_string()));
            }
            for button in &page.buttons {
                if !button_ids.insert(button.id.as_str()) {
                    return Err(BoardError::DuplicateId(button.id.to_string()));
                }
            }
            for region in &page.video_players {
                if !region_ids.insert(region.id.as_str()) {
                    return Err(BoardError::DuplicateId(region.id.to_string()));
                }
            }
            check_page_layout(&self.grid, page)?;
        }
        self.pages.extend(pages);
        Ok(())
    }

    /// Full invariant sweep: at least one page, valid grid, every occupant
    /// in bounds, no two occupants sharing a cell, unique ids throughout.
    /// Run at load time and after generated-page merges; unreachable
    /// through the mutation API.
    pub fn check_invariants(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(BoardError::EmptyBoard);
        }
        if !self.grid.is_valid() {
            return Err(BoardError::InvalidGrid {
                rows: self.grid.rows,
                cols: self.grid.cols,
            });
        }
        let mut page_ids = BTreeSet::new();
        let mut button_ids = BTreeSet::new();
        let mut region_ids = BTreeSet::new();
        for page in &self.pages {
            if !page_ids.insert(page.id.as_str()) {
                return Err(BoardError::DuplicateId(page.id.to_string()));
            }
            for button in &page.buttons {
                if !button_ids.insert(button.id.as_str()) {
                    return Err(BoardError::DuplicateId(button.id.to_string()));
                }
            }
            for region in &page.video_players {
                if !region_ids.insert(region.id.as_str()) {
                    return Err(BoardError::DuplicateId(region.id.to_string()));
                }
            }
            check_page_layout(&self.grid, page)?;
        }
        Ok(())
    }

    /// Smallest unused `page-N` id on this board.
    pub fn next_page_id(&self) -> Result<PageId> {
        let used: BTreeSet<&str> = self.pages.iter().map(|p| p.id.as_str()).collect();
        next_numbered_id("page", &used, |s| PageId::new(s))
    }

    /// Smallest unused `btn-N` id across all pages.
    pub fn next_button_id(&self) -> Result<ButtonId> {
        let used: BTreeSet<&str> = self
            .pages
            .iter()
            .flat_map(|p| p.buttons.iter())
            .map(|b| b.id.as_str())
            .collect();
        next_numbered_id("btn", &used, |s| ButtonId::new(s))
    }

    /// Smallest unused `vid-N` id across all pages.
    pub fn next_region_id(&self) -> Result<RegionId> {
        let used: BTreeSet<&str> = self
            .pages
            .iter()
            .flat_map(|p| p.video_players.iter())
            .map(|r| r.id.as_str())
            .collect();
        next_numbered_id("vid", &used, |s| RegionId::new(s))
    }
}

fn next_numbered_id<T>(
    prefix: &str,
    used: &BTreeSet<&str>,
    make: impl Fn(String) -> Result<T>,
) -> Result<T> {
    let mut n = used.len() as u64 + 1;
    loop {
        let candidate = format!("{prefix}-{n}");
        if !used.contains(candidate.as_str()) {
            return make(candidate);
        }
        n += 1;
    }
}

/// Bounds and overlap checks for a single page against a grid.
fn check_page_layout(grid: &Grid, page: &Page) -> Result<()> {
    let mut cells: BTreeSet<(u32, u32)> = BTreeSet::new();
    for button in &page.buttons {
        if !grid.contains(button.row, button.col) {
            return Err(grid.out_of_bounds(button.row, button.col));
        }
        if !cells.insert((button.row, button.col)) {
            return Err(BoardError::CellOccupied {
                row: button.row,
                col: button.col,
            });
        }
    }
    for region in &page.video_players {
        if !region.fits(grid) {
            return Err(grid.out_of_bounds(region.row, region.col));
        }
        for row in region.row..region.row + region.row_span {
            for col in region.col..region.col + region.col_span {
                if !cells.insert((row, col)) {
                    return Err(BoardError::CellOccupied { row, col });
                }
            }
        }
    }
    Ok(())
}

/// Lightweight listing entry returned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub page_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
}

impl BoardSummary {
    pub fn of(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            name: board.name.clone(),
            page_count: board.pages.len(),
            cover_image: board.cover_image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{BoardId, ButtonId};

    fn make_board() -> Board {
        Board::new(
            BoardId::new("board-1").unwrap(),
            "Daily needs",
            Grid::new(3, 3).unwrap(),
        )
        .unwrap()
    }

    fn make_button(id: &str, row: u32, col: u32) -> Button {
        Button::new(ButtonId::new(id).unwrap(), row, col, id.to_string())
    }

    #[test]
    fn new_board_has_a_home_page() {
        let board = make_board();
        assert_eq!(board.pages.len(), 1);
        assert_eq!(board.home_page().unwrap().id.as_str(), "page-1");
        board.check_invariants().unwrap();
    }

    #[test]
    fn add_page_generates_fresh_ids() {
        let mut board = make_board();
        let second = board.add_page().unwrap();
        assert_eq!(second.as_str(), "page-2");
        assert_eq!(board.pages[1].name, "Page 2");
        let third = board.add_page().unwrap();
        assert_eq!(third.as_str(), "page-3");
    }

    #[test]
    fn delete_last_page_is_rejected() {
        let mut board = make_board();
        let home = board.pages[0].id.clone();
        assert_eq!(board.delete_page(&home).unwrap_err(), BoardError::LastPage);
        assert_eq!(board.pages.len(), 1);
    }

    #[test]
    fn delete_page_with_two_pages_keeps_the_other() {
        let mut board = make_board();
        let second = board.add_page().unwrap();
        board.delete_page(&second).unwrap();
        assert_eq!(board.pages.len(), 1);
        assert_eq!(board.pages[0].id.as_str(), "page-1");
    }

    #[test]
    fn reorder_pages_ignores_bad_indices() {
        let mut board = make_board();
        board.add_page().unwrap();
        board.reorder_pages(0, 5);
        assert_eq!(board.pages[0].id.as_str(), "page-1");
        board.reorder_pages(1, 0);
        assert_eq!(board.pages[0].id.as_str(), "page-2");
    }

    #[test]
    fn resize_rejects_invalid_grid_atomically() {
        let mut board = make_board();
        let page_id = board.pages[0].id.clone();
        let grid = board.grid;
        board
            .page_mut(&page_id)
            .unwrap()
            .add_button(&grid, make_button("btn-1", 2, 2))
            .unwrap();
        let err = board.resize_grid(Grid { rows: 0, cols: 3 }).unwrap_err();
        assert!(matches!(err, BoardError::InvalidGrid { .. }));
        assert_eq!(board.grid, grid);
        assert_eq!(board.pages[0].buttons.len(), 1);
    }

    #[test]
    fn duplicate_button_lands_in_next_free_cell() {
        let mut board = make_board();
        let page_id = board.pages[0].id.clone();
        let grid = board.grid;
        board
            .page_mut(&page_id)
            .unwrap()
            .add_button(&grid, make_button("btn-1", 0, 0))
            .unwrap();
        let new_id = board
            .duplicate_button(&page_id, &ButtonId::new("btn-1").unwrap())
            .unwrap();
        let copy = board.page(&page_id).unwrap().button(&new_id).unwrap();
        assert_eq!((copy.row, copy.col), (0, 1));
        assert_eq!(copy.label, "btn-1");
    }

    #[test]
    fn duplicate_on_full_page_reports_no_space() {
        let mut board = Board::new(
            BoardId::new("board-1").unwrap(),
            "Tiny",
            Grid::new(1, 1).unwrap(),
        )
        .unwrap();
        let page_id = board.pages[0].id.clone();
        let grid = board.grid;
        board
            .page_mut(&page_id)
            .unwrap()
            .add_button(&grid, make_button("btn-1", 0, 0))
            .unwrap();
        let err = board
            .duplicate_button(&page_id, &ButtonId::new("btn-1").unwrap())
            .unwrap_err();
        assert_eq!(err, BoardError::NoSpace);
    }

    #[test]
    fn merge_rejects_colliding_page_ids() {
        let mut board = make_board();
        let clash = Page::new(PageId::new("page-1").unwrap(), "Generated");
        let err = board.merge_generated_pages(vec![clash]).unwrap_err();
        assert_eq!(err, BoardError::DuplicateId("page-1".to_string()));
        assert_eq!(board.pages.len(), 1);
    }

    #[test]
    fn merge_validates_generated_layout() {
        let mut board = make_board();
        let mut generated = Page::new(PageId::new("page-gen").unwrap(), "Generated");
        generated.buttons.push(make_button("btn-out", 5, 5));
        let err = board.merge_generated_pages(vec![generated]).unwrap_err();
        assert!(matches!(err, BoardError::OutOfBounds { row: 5, col: 5, .. }));
        assert_eq!(board.pages.len(), 1);
    }

    #[test]
    fn merge_appends_valid_pages() {
        let mut board = make_board();
        let mut generated = Page::new(PageId::new("page-gen").unwrap(), "Generated");
        generated.buttons.push(make_button("btn-gen", 1, 1));
        board.merge_generated_pages(vec![generated]).unwrap();
        assert_eq!(board.pages.len(), 2);
        board.check_invariants().unwrap();
    }
}
