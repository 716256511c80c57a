use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use gridtalk_core::EditorSession;
use gridtalk_model::{Board, BoardAudit, BoardId, Grid, audit_board};

use crate::cli::{InspectArgs, NewArgs, ValidateArgs};
use crate::summary::{print_audit, print_board};

/// Scaffold a starter single-page board file.
pub fn run_new(args: &NewArgs) -> Result<()> {
    let span = info_span!("new", path = %args.path.display());
    let _guard = span.enter();

    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }
    let grid = Grid::new(args.rows, args.cols).context("invalid grid")?;
    let id = BoardId::new(default_board_id(&args.path)).context("derive board id")?;
    let board = Board::new(id, &args.name, grid).context("create board")?;

    let json = serde_json::to_string_pretty(&board).context("serialize board")?;
    fs::write(&args.path, json)
        .with_context(|| format!("write {}", args.path.display()))?;
    info!(board = %board.id, "board written");
    println!("Wrote {}", args.path.display());
    Ok(())
}

/// Load a board through the editor engine (which enforces the layout
/// invariants) and print its contents.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let span = info_span!("inspect", path = %args.path.display());
    let _guard = span.enter();

    let board = read_board(&args.path)?;
    let mut session = EditorSession::new();
    session
        .load_board(board)
        .context("board violates layout invariants")?;
    let board = session.board().context("board just loaded")?;
    print_board(board);
    Ok(())
}

/// Audit a board file. The returned report drives the process exit code.
pub fn run_validate(args: &ValidateArgs) -> Result<BoardAudit> {
    let span = info_span!("validate", path = %args.path.display());
    let _guard = span.enter();

    let board = read_board(&args.path)?;
    let audit = audit_board(&board);
    debug!(
        errors = audit.error_count(),
        warnings = audit.warning_count(),
        "audit finished"
    );
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&audit).context("serialize audit")?
        );
    } else {
        print_audit(&audit);
    }
    Ok(audit)
}

fn read_board(path: &Path) -> Result<Board> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let board: Board =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(board)
}

/// Derive a provisional board id from the file stem.
fn default_board_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.trim().is_empty())
        .map(|stem| stem.to_lowercase().replace(' ', "-"))
        .unwrap_or_else(|| "board-1".to_string())
}
