//! One grid-full of buttons and video regions.
//!
//! All mutating operations validate first and only then touch the page, so
//! a rejected edit leaves the page exactly as it was.

use serde::{Deserialize, Serialize};

use crate::button::{Button, ButtonPatch, VideoPlayer};
use crate::error::{BoardError, Result};
use crate::grid::Grid;
use crate::ids::{ButtonId, PageId, RegionId};

/// What holds a given cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellOccupant<'a> {
    Button(&'a Button),
    Video(&'a VideoPlayer),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    #[serde(default)]
    pub buttons: Vec<Button>,
    #[serde(default)]
    pub video_players: Vec<VideoPlayer>,
}

impl Page {
    pub fn new(id: PageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            buttons: Vec::new(),
            video_players: Vec::new(),
        }
    }

    /// Scan buttons for an exact match, then video regions for rectangle
    /// containment. Out-of-range positions simply yield `None`.
    pub fn occupant(&self, row: u32, col: u32) -> Option<CellOccupant<'_>> {
        if let Some(button) = self
            .buttons
            .iter()
            .find(|button| button.row == row && button.col == col)
        {
            return Some(CellOccupant::Button(button));
        }
        self.video_players
            .iter()
            .find(|region| region.covers(row, col))
            .map(CellOccupant::Video)
    }

    pub fn button(&self, id: &ButtonId) -> Option<&Button> {
        self.buttons.iter().find(|button| &button.id == id)
    }

    /// Add a button, rejecting out-of-grid positions and occupied cells.
    pub fn add_button(&mut self, grid: &Grid, button: Button) -> Result<()> {
        if !grid.contains(button.row, button.col) {
            return Err(grid.out_of_bounds(button.row, button.col));
        }
        if self.occupant(button.row, button.col).is_some() {
            return Err(BoardError::CellOccupied {
                row: button.row,
                col: button.col,
            });
        }
        if self.button(&button.id).is_some() {
            return Err(BoardError::DuplicateId(button.id.to_string()));
        }
        self.buttons.push(button);
        Ok(())
    }

    pub fn remove_button(&mut self, id: &ButtonId) -> Result<Button> {
        let index = self
            .buttons
            .iter()
            .position(|button| &button.id == id)
            .ok_or_else(|| BoardError::UnknownButton(id.clone()))?;
        Ok(self.buttons.remove(index))
    }

    /// Apply a patch to a button, re-checking bounds and occupancy when the
    /// position changes. The occupancy check ignores the button itself.
    pub fn update_button(&mut self, grid: &Grid, id: &ButtonId, patch: &ButtonPatch) -> Result<()> {
        let index = self
            .buttons
            .iter()
            .position(|button| &button.id == id)
            .ok_or_else(|| BoardError::UnknownButton(id.clone()))?;
        let updated = patch.apply_to(&self.buttons[index]);
        if !grid.contains(updated.row, updated.col) {
            return Err(grid.out_of_bounds(updated.row, updated.col));
        }
        let occupied_by_other = match self.occupant(updated.row, updated.col) {
            Some(CellOccupant::Button(other)) => other.id != *id,
            Some(CellOccupant::Video(_)) => true,
            None => false,
        };
        if occupied_by_other {
            return Err(BoardError::CellOccupied {
                row: updated.row,
                col: updated.col,
            });
        }
        self.buttons[index] = updated;
        Ok(())
    }

    /// Add a video region, rejecting rectangles that overflow the grid or
    /// overlap any existing occupant.
    pub fn add_video_player(&mut self, grid: &Grid, region: VideoPlayer) -> Result<()> {
        if !region.fits(grid) {
            return Err(grid.out_of_bounds(region.row, region.col));
        }
        if self
            .video_players
            .iter()
            .any(|existing| existing.id == region.id)
        {
            return Err(BoardError::DuplicateId(region.id.to_string()));
        }
        for row in region.row..region.row + region.row_span {
            for col in region.col..region.col + region.col_span {
                if self.occupant(row, col).is_some() {
                    return Err(BoardError::CellOccupied { row, col });
                }
            }
        }
        self.video_players.push(region);
        Ok(())
    }

    pub fn remove_video_player(&mut self, id: &RegionId) -> Result<VideoPlayer> {
        let index = self
            .video_players
            .iter()
            .position(|region| &region.id == id)
            .ok_or_else(|| BoardError::UnknownRegion(id.clone()))?;
        Ok(self.video_players.remove(index))
    }

    /// Resize to a new grid, silently dropping buttons outside the new
    /// bounds and video regions that no longer fit entirely. This is the
    /// product's lossy-shrink policy, not an error.
    pub fn resize(&mut self, grid: &Grid) {
        self.buttons
            .retain(|button| grid.contains(button.row, button.col));
        self.video_players.retain(|region| region.fits(grid));
    }

    /// Row-major scan for the first free cell, starting just after
    /// `(row, col)` and wrapping around to the page origin. `None` when the
    /// page is completely full.
    pub fn first_free_cell_from(&self, grid: &Grid, row: u32, col: u32) -> Option<(u32, u32)> {
        let cells = grid.cell_count();
        if cells == 0 {
            return None;
        }
        let start = u64::from(row) * u64::from(grid.cols) + u64::from(col);
        for offset in 1..=cells {
            let linear = (start + offset) % cells;
            let candidate_row = u32::try_from(linear / u64::from(grid.cols)).ok()?;
            let candidate_col = u32::try_from(linear % u64::from(grid.cols)).ok()?;
            if self.occupant(candidate_row, candidate_col).is_none() {
                return Some((candidate_row, candidate_col));
            }
        }
        None
    }

    pub fn is_full(&self, grid: &Grid) -> bool {
        self.first_free_cell_from(grid, 0, 0).is_none() && self.occupant(0, 0).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ButtonId, PageId, RegionId};

    fn make_page() -> Page {
        Page::new(PageId::new("page-1").unwrap(), "Home")
    }

    fn make_button(id: &str, row: u32, col: u32) -> Button {
        Button::new(ButtonId::new(id).unwrap(), row, col, id.to_string())
    }

    #[test]
    fn add_button_rejects_occupied_cell() {
        let grid = Grid::new(2, 2).unwrap();
        let mut page = make_page();
        page.add_button(&grid, make_button("btn-1", 0, 0)).unwrap();
        let err = page.add_button(&grid, make_button("btn-2", 0, 0)).unwrap_err();
        assert_eq!(err, BoardError::CellOccupied { row: 0, col: 0 });
        assert_eq!(page.buttons.len(), 1);
    }

    #[test]
    fn add_button_rejects_out_of_bounds() {
        let grid = Grid::new(2, 2).unwrap();
        let mut page = make_page();
        let err = page.add_button(&grid, make_button("btn-1", 2, 0)).unwrap_err();
        assert!(matches!(err, BoardError::OutOfBounds { row: 2, col: 0, .. }));
    }

    #[test]
    fn update_button_may_keep_its_own_cell() {
        let grid = Grid::new(2, 2).unwrap();
        let mut page = make_page();
        page.add_button(&grid, make_button("btn-1", 0, 0)).unwrap();
        let patch = ButtonPatch::new().label("renamed");
        page.update_button(&grid, &ButtonId::new("btn-1").unwrap(), &patch)
            .unwrap();
        assert_eq!(page.buttons[0].label, "renamed");
    }

    #[test]
    fn update_button_rejects_move_onto_other_button() {
        let grid = Grid::new(2, 2).unwrap();
        let mut page = make_page();
        page.add_button(&grid, make_button("btn-1", 0, 0)).unwrap();
        page.add_button(&grid, make_button("btn-2", 1, 1)).unwrap();
        let patch = ButtonPatch::new().position(0, 0);
        let err = page
            .update_button(&grid, &ButtonId::new("btn-2").unwrap(), &patch)
            .unwrap_err();
        assert_eq!(err, BoardError::CellOccupied { row: 0, col: 0 });
        assert_eq!(page.button(&ButtonId::new("btn-2").unwrap()).unwrap().row, 1);
    }

    #[test]
    fn video_region_blocks_every_covered_cell() {
        let grid = Grid::new(3, 3).unwrap();
        let mut page = make_page();
        page.add_video_player(
            &grid,
            VideoPlayer::new(RegionId::new("vid-1").unwrap(), 0, 0, 2, 2, "abc", "Song"),
        )
        .unwrap();
        let err = page.add_button(&grid, make_button("btn-1", 1, 1)).unwrap_err();
        assert_eq!(err, BoardError::CellOccupied { row: 1, col: 1 });
        page.add_button(&grid, make_button("btn-2", 2, 2)).unwrap();
    }

    #[test]
    fn resize_drops_overflowing_occupants() {
        let grid = Grid::new(5, 5).unwrap();
        let mut page = make_page();
        page.add_button(&grid, make_button("btn-keep", 1, 2)).unwrap();
        page.add_button(&grid, make_button("btn-drop", 4, 4)).unwrap();
        page.add_video_player(
            &grid,
            VideoPlayer::new(RegionId::new("vid-1").unwrap(), 2, 2, 2, 2, "abc", "Song"),
        )
        .unwrap();

        let smaller = Grid::new(3, 3).unwrap();
        page.resize(&smaller);
        assert_eq!(page.buttons.len(), 1);
        assert_eq!(page.buttons[0].id.as_str(), "btn-keep");
        // The 2x2 region anchored at (2, 2) no longer fits a 3x3 grid.
        assert!(page.video_players.is_empty());
    }

    #[test]
    fn free_cell_scan_wraps_around() {
        let grid = Grid::new(2, 2).unwrap();
        let mut page = make_page();
        page.add_button(&grid, make_button("btn-1", 0, 1)).unwrap();
        page.add_button(&grid, make_button("btn-2", 1, 0)).unwrap();
        page.add_button(&grid, make_button("btn-3", 1, 1)).unwrap();
        // Only (0, 0) is free; scanning from (1, 0) must wrap to find it.
        assert_eq!(page.first_free_cell_from(&grid, 1, 0), Some((0, 0)));
    }

    #[test]
    fn full_page_has_no_free_cell() {
        let grid = Grid::new(1, 2).unwrap();
        let mut page = make_page();
        page.add_button(&grid, make_button("btn-1", 0, 0)).unwrap();
        page.add_button(&grid, make_button("btn-2", 0, 1)).unwrap();
        assert!(page.is_full(&grid));
        assert_eq!(page.first_free_cell_from(&grid, 0, 0), None);
    }
}
