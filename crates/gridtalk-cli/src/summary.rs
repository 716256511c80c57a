//! Terminal output helpers for board listings and audit reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gridtalk_model::{Action, Board, BoardAudit, IssueSeverity};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

/// Board overview: name, grid, one row per button/video region.
pub fn print_board(board: &Board) {
    println!("Board: {} ({})", board.name, board.id);
    println!("Grid: {}x{}", board.grid.rows, board.grid.cols);
    println!("Pages: {}", board.pages.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Page"),
        header_cell("Cell"),
        header_cell("Label"),
        header_cell("Action"),
        header_cell("Detail"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);

    for (index, page) in board.pages.iter().enumerate() {
        let page_name = if index == 0 {
            format!("{} (home)", page.name)
        } else {
            page.name.clone()
        };
        for button in &page.buttons {
            table.add_row(vec![
                Cell::new(&page_name),
                Cell::new(format!("({}, {})", button.row, button.col)),
                Cell::new(&button.label),
                Cell::new(button.action.kind().as_str()),
                Cell::new(action_detail(&button.action)),
            ]);
        }
        for region in &page.video_players {
            table.add_row(vec![
                Cell::new(&page_name),
                Cell::new(format!(
                    "({}, {})+{}x{}",
                    region.row, region.col, region.row_span, region.col_span
                )),
                Cell::new(&region.title),
                Cell::new("video"),
                Cell::new(&region.video_id),
            ]);
        }
    }
    println!("{table}");
}

fn action_detail(action: &Action) -> String {
    match action {
        Action::Speak { text } => text.clone(),
        Action::Back | Action::Home | Action::Bookmark => String::new(),
        Action::Link { to_page_id } => to_page_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "(unconfigured)".to_string()),
        Action::Youtube { video_id, title } => format!("{title} [{video_id}]"),
    }
}

/// Audit report: one row per finding, then the counts.
pub fn print_audit(audit: &BoardAudit) {
    if audit.issues.is_empty() {
        println!("Board {} is valid: no issues found", audit.board_id);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Page"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);

    for issue in &audit.issues {
        let severity = match issue.severity {
            IssueSeverity::Error => Cell::new("error").fg(Color::Red),
            IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
        };
        table.add_row(vec![
            severity,
            Cell::new(issue.page_id.as_deref().unwrap_or("-")),
            Cell::new(&issue.message),
        ]);
    }
    println!("{table}");
    println!(
        "{} error(s), {} warning(s)",
        audit.error_count(),
        audit.warning_count()
    );
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
