use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::grid::Grid;
use crate::ids::{ButtonId, RegionId};

/// A symbol button occupying exactly one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub id: ButtonId,
    pub row: u32,
    pub col: u32,
    pub label: String,
    /// Text spoken on activation when it differs from the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoken_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_path: Option<String>,
    pub action: Action,
    /// A self-closing button triggers an implicit Back after its action.
    #[serde(default)]
    pub self_closing: bool,
}

impl Button {
    /// New button defaulting to speaking its own label.
    pub fn new(id: ButtonId, row: u32, col: u32, label: impl Into<String>) -> Self {
        let label = label.into();
        let action = Action::Speak {
            text: label.clone(),
        };
        Self {
            id,
            row,
            col,
            label,
            spoken_text: None,
            color: None,
            icon_ref: None,
            symbol_path: None,
            action,
            self_closing: false,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn with_spoken_text(mut self, text: impl Into<String>) -> Self {
        self.spoken_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_self_closing(mut self, self_closing: bool) -> Self {
        self.self_closing = self_closing;
        self
    }

    /// What the speech collaborator should utter for this button.
    pub fn speech_text(&self) -> &str {
        self.spoken_text.as_deref().unwrap_or(&self.label)
    }
}

/// Partial update applied through `update_button`.
///
/// `None` leaves a field untouched; the double-`Option` fields distinguish
/// "leave as is" from "clear the value".
#[derive(Debug, Clone, Default)]
pub struct ButtonPatch {
    pub row: Option<u32>,
    pub col: Option<u32>,
    pub label: Option<String>,
    pub spoken_text: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub icon_ref: Option<Option<String>>,
    pub symbol_path: Option<Option<String>>,
    pub action: Option<Action>,
    pub self_closing: Option<bool>,
}

impl ButtonPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(mut self, row: u32, col: u32) -> Self {
        self.row = Some(row);
        self.col = Some(col);
        self
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn spoken_text(mut self, text: Option<String>) -> Self {
        self.spoken_text = Some(text);
        self
    }

    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn self_closing(mut self, self_closing: bool) -> Self {
        self.self_closing = Some(self_closing);
        self
    }

    /// Apply this patch to a copy of `button`.
    pub fn apply_to(&self, button: &Button) -> Button {
        let mut updated = button.clone();
        if let Some(row) = self.row {
            updated.row = row;
        }
        if let Some(col) = self.col {
            updated.col = col;
        }
        if let Some(label) = &self.label {
            updated.label = label.clone();
        }
        if let Some(spoken_text) = &self.spoken_text {
            updated.spoken_text = spoken_text.clone();
        }
        if let Some(color) = &self.color {
            updated.color = color.clone();
        }
        if let Some(icon_ref) = &self.icon_ref {
            updated.icon_ref = icon_ref.clone();
        }
        if let Some(symbol_path) = &self.symbol_path {
            updated.symbol_path = symbol_path.clone();
        }
        if let Some(action) = &self.action {
            updated.action = action.clone();
        }
        if let Some(self_closing) = self.self_closing {
            updated.self_closing = self_closing;
        }
        updated
    }
}

/// An embedded video region covering a rectangular block of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPlayer {
    pub id: RegionId,
    pub row: u32,
    pub col: u32,
    pub row_span: u32,
    pub col_span: u32,
    pub video_id: String,
    pub title: String,
}

impl VideoPlayer {
    pub fn new(
        id: RegionId,
        row: u32,
        col: u32,
        row_span: u32,
        col_span: u32,
        video_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id,
            row,
            col,
            row_span,
            col_span,
            video_id: video_id.into(),
            title: title.into(),
        }
    }

    /// Returns true if `(row, col)` lies within the spanned rectangle.
    pub fn covers(&self, row: u32, col: u32) -> bool {
        row >= self.row
            && col >= self.col
            && row - self.row < self.row_span
            && col - self.col < self.col_span
    }

    /// Returns true if the whole rectangle lies within the grid.
    pub fn fits(&self, grid: &Grid) -> bool {
        self.row_span > 0
            && self.col_span > 0
            && self
                .row
                .checked_add(self.row_span)
                .is_some_and(|end| end <= grid.rows)
            && self
                .col
                .checked_add(self.col_span)
                .is_some_and(|end| end <= grid.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_button_speaks_its_label() {
        let button = Button::new(ButtonId::new("btn-1").unwrap(), 0, 0, "water");
        assert_eq!(
            button.action,
            Action::Speak {
                text: "water".to_string()
            }
        );
        assert_eq!(button.speech_text(), "water");
    }

    #[test]
    fn spoken_text_overrides_label() {
        let button =
            Button::new(ButtonId::new("btn-1").unwrap(), 0, 0, "water").with_spoken_text("I want water");
        assert_eq!(button.speech_text(), "I want water");
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let button = Button::new(ButtonId::new("btn-1").unwrap(), 0, 0, "water")
            .with_spoken_text("I want water");
        let updated = ButtonPatch::new().spoken_text(None).apply_to(&button);
        assert_eq!(updated.spoken_text, None);
        assert_eq!(updated.label, "water");
    }

    #[test]
    fn video_region_rectangle_containment() {
        let region = VideoPlayer::new(RegionId::new("vid-1").unwrap(), 1, 1, 2, 3, "abc", "Song");
        assert!(region.covers(1, 1));
        assert!(region.covers(2, 3));
        assert!(!region.covers(0, 1));
        assert!(!region.covers(3, 1));
        assert!(!region.covers(1, 4));
    }

    #[test]
    fn video_region_grid_fit() {
        let grid = Grid::new(4, 4).unwrap();
        let fits = VideoPlayer::new(RegionId::new("vid-1").unwrap(), 2, 2, 2, 2, "abc", "Song");
        assert!(fits.fits(&grid));
        let overflow = VideoPlayer::new(RegionId::new("vid-2").unwrap(), 3, 0, 2, 1, "abc", "Song");
        assert!(!overflow.fits(&grid));
        let degenerate = VideoPlayer::new(RegionId::new("vid-3").unwrap(), 0, 0, 0, 1, "abc", "Song");
        assert!(!degenerate.fits(&grid));
    }
}
