//! Action dispatch for preview mode.
//!
//! Activating a cell in edit mode selects it; in preview mode the button's
//! action runs. Navigation goes back through the session so history
//! bookkeeping stays uniform, and side effects (speech, video overlay) are
//! returned as [`Effect`] values for the hosting application to hand to
//! its collaborators.

use tracing::debug;

use gridtalk_model::{Action, BoardError, ButtonId, Result};

use crate::session::EditorSession;

/// Side-effect command produced by activating a button in preview mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand text to the speech collaborator.
    Speak { text: String },
    /// Open the video overlay.
    OpenVideo { video_id: String, title: String },
}

impl EditorSession {
    /// Activate a button on the current page.
    ///
    /// Edit mode: the button is selected, no effects. Preview mode: the
    /// action is dispatched per its tag; an unconfigured or dangling link
    /// is inert rather than an error. A self-closing button performs an
    /// implicit Back after its action completes.
    pub fn activate_button(&mut self, button_id: &ButtonId) -> Result<Vec<Effect>> {
        if self.board().is_none() {
            return Err(BoardError::NoBoardLoaded);
        }
        if self.is_edit_mode() {
            self.select_button(Some(button_id.clone()))?;
            return Ok(Vec::new());
        }

        let button = self
            .current_page()
            .and_then(|page| page.button(button_id))
            .cloned()
            .ok_or_else(|| BoardError::UnknownButton(button_id.clone()))?;

        let mut effects = Vec::new();
        match &button.action {
            Action::Speak { .. } => {
                effects.push(Effect::Speak {
                    text: button.speech_text().to_string(),
                });
            }
            Action::Back => {
                self.back();
            }
            Action::Home => {
                self.home()?;
            }
            Action::Link { to_page_id } => {
                // An unconfigured link, or one pointing at a deleted page,
                // is inert in preview.
                if let Some(target) = to_page_id {
                    let exists = self
                        .board()
                        .is_some_and(|board| board.contains_page(target));
                    if exists {
                        self.set_current_page(target)?;
                    } else {
                        debug!(target = %target, "link target missing; ignoring");
                    }
                }
            }
            Action::Youtube { video_id, title } => {
                effects.push(Effect::OpenVideo {
                    video_id: video_id.clone(),
                    title: title.clone(),
                });
            }
            Action::Bookmark => {
                // Declared but not wired to any behavior.
            }
        }

        if button.self_closing {
            self.back();
        }
        Ok(effects)
    }
}
