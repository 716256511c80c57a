//! Non-failing board audit.
//!
//! [`crate::Board::check_invariants`] stops at the first violation because
//! it guards the mutation boundary. The audit is its reporting sibling: it
//! walks the whole board and collects every finding, so the CLI validator
//! can show a caregiver everything that needs attention in one pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::board::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A single finding from a board audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditIssue {
    pub severity: IssueSeverity,
    /// Page the finding concerns, when it is page-scoped.
    pub page_id: Option<String>,
    pub message: String,
}

/// Audit report for one board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardAudit {
    pub board_id: String,
    pub issues: Vec<AuditIssue>,
}

impl BoardAudit {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Walk the board and report every invariant violation (errors) plus the
/// soft findings a caregiver should know about (warnings): unconfigured
/// links and links to pages that no longer exist.
pub fn audit_board(board: &Board) -> BoardAudit {
    let mut issues = Vec::new();

    if board.pages.is_empty() {
        issues.push(AuditIssue {
            severity: IssueSeverity::Error,
            page_id: None,
            message: "board has no pages".to_string(),
        });
    }
    if !board.grid.is_valid() {
        issues.push(AuditIssue {
            severity: IssueSeverity::Error,
            page_id: None,
            message: format!(
                "invalid grid {}x{}: rows and cols must be positive",
                board.grid.rows, board.grid.cols
            ),
        });
    }

    let mut page_ids = BTreeSet::new();
    let mut button_ids = BTreeSet::new();
    for page in &board.pages {
        if !page_ids.insert(page.id.as_str()) {
            issues.push(AuditIssue {
                severity: IssueSeverity::Error,
                page_id: Some(page.id.to_string()),
                message: format!("duplicate page id {}", page.id),
            });
        }

        let mut cells: BTreeSet<(u32, u32)> = BTreeSet::new();
        for button in &page.buttons {
            if !button_ids.insert(button.id.as_str()) {
                issues.push(AuditIssue {
                    severity: IssueSeverity::Error,
                    page_id: Some(page.id.to_string()),
                    message: format!("duplicate button id {}", button.id),
                });
            }
            if !board.grid.contains(button.row, button.col) {
                issues.push(AuditIssue {
                    severity: IssueSeverity::Error,
                    page_id: Some(page.id.to_string()),
                    message: format!(
                        "button {} at ({}, {}) is outside the {}x{} grid",
                        button.id, button.row, button.col, board.grid.rows, board.grid.cols
                    ),
                });
            } else if !cells.insert((button.row, button.col)) {
                issues.push(AuditIssue {
                    severity: IssueSeverity::Error,
                    page_id: Some(page.id.to_string()),
                    message: format!(
                        "cell ({}, {}) holds more than one occupant",
                        button.row, button.col
                    ),
                });
            }

            match &button.action {
                Action::Link { to_page_id: None } => {
                    issues.push(AuditIssue {
                        severity: IssueSeverity::Warning,
                        page_id: Some(page.id.to_string()),
                        message: format!("button {} has an unconfigured link", button.id),
                    });
                }
                Action::Link {
                    to_page_id: Some(target),
                } if !board.contains_page(target) => {
                    issues.push(AuditIssue {
                        severity: IssueSeverity::Warning,
                        page_id: Some(page.id.to_string()),
                        message: format!("button {} links to unknown page {target}", button.id),
                    });
                }
                _ => {}
            }
        }

        for region in &page.video_players {
            if !region.fits(&board.grid) {
                issues.push(AuditIssue {
                    severity: IssueSeverity::Error,
                    page_id: Some(page.id.to_string()),
                    message: format!(
                        "video region {} does not fit the {}x{} grid",
                        region.id, board.grid.rows, board.grid.cols
                    ),
                });
                continue;
            }
            for row in region.row..region.row + region.row_span {
                for col in region.col..region.col + region.col_span {
                    if !cells.insert((row, col)) {
                        issues.push(AuditIssue {
                            severity: IssueSeverity::Error,
                            page_id: Some(page.id.to_string()),
                            message: format!("cell ({row}, {col}) holds more than one occupant"),
                        });
                    }
                }
            }
        }
    }

    BoardAudit {
        board_id: board.id.to_string(),
        issues,
    }
}
