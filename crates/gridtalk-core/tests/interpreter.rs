//! Preview-mode dispatch and navigation history tests.

use gridtalk_core::{EditorSession, Effect};
use gridtalk_model::{
    Action, ActionKind, Board, BoardId, Button, ButtonId, ButtonPatch, Grid, PageId,
};

/// Board with three pages. The home page carries one button per action
/// kind; page ids are page-1 (home), page-2, page-3.
fn session_with_three_pages() -> EditorSession {
    let board = Board::new(
        BoardId::new("board-1").unwrap(),
        "Daily needs",
        Grid::new(4, 4).unwrap(),
    )
    .unwrap();
    let mut session = EditorSession::new();
    session.load_board(board).unwrap();
    session.add_page().unwrap();
    session.add_page().unwrap();
    session
}

fn page(n: usize) -> PageId {
    PageId::new(format!("page-{n}")).unwrap()
}

fn add_action_button(session: &mut EditorSession, row: u32, col: u32, action: Action) -> ButtonId {
    let id = session.add_button_at(row, col, "cell").unwrap();
    session
        .update_button(&id, &ButtonPatch::new().action(action))
        .unwrap();
    id
}

#[test]
fn activation_in_edit_mode_selects_instead_of_dispatching() {
    let mut session = session_with_three_pages();
    let id = session.add_button_at(0, 0, "water").unwrap();
    let effects = session.activate_button(&id).unwrap();
    assert!(effects.is_empty());
    assert_eq!(session.selected_button(), Some(&id));
    // Still on the home page, nothing navigated.
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn speak_uses_spoken_text_over_label() {
    let mut session = session_with_three_pages();
    let id = session.add_button_at(0, 0, "water").unwrap();
    session
        .update_button(&id, &ButtonPatch::new().spoken_text(Some("I want water".to_string())))
        .unwrap();
    session.set_edit_mode(false).unwrap();

    let effects = session.activate_button(&id).unwrap();
    assert_eq!(
        effects,
        vec![Effect::Speak {
            text: "I want water".to_string()
        }]
    );
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn history_round_trip_through_back() {
    let mut session = session_with_three_pages();
    session.set_edit_mode(false).unwrap();

    session.set_current_page(&page(2)).unwrap();
    session.set_current_page(&page(3)).unwrap();
    assert_eq!(session.current_page_id(), Some(&page(3)));

    assert!(session.back());
    assert_eq!(session.current_page_id(), Some(&page(2)));
    assert!(session.back());
    assert_eq!(session.current_page_id(), Some(&page(1)));
    // Third Back has nowhere to go.
    assert!(!session.back());
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn back_button_pops_the_history() {
    let mut session = session_with_three_pages();
    let back = add_action_button(&mut session, 0, 0, Action::Back);
    session.set_edit_mode(false).unwrap();
    session.set_current_page(&page(2)).unwrap();
    session.set_current_page(&page(1)).unwrap();

    let effects = session.activate_button(&back).unwrap();
    assert!(effects.is_empty());
    assert_eq!(session.current_page_id(), Some(&page(2)));
}

#[test]
fn home_button_jumps_to_the_first_page() {
    let mut session = session_with_three_pages();
    session.set_current_page(&page(3)).unwrap();
    let home = add_action_button(&mut session, 0, 0, Action::Home);
    session.set_edit_mode(false).unwrap();

    session.activate_button(&home).unwrap();
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn link_navigates_when_the_target_exists() {
    let mut session = session_with_three_pages();
    let link = add_action_button(
        &mut session,
        0,
        0,
        Action::Link {
            to_page_id: Some(page(2)),
        },
    );
    session.set_edit_mode(false).unwrap();

    session.activate_button(&link).unwrap();
    assert_eq!(session.current_page_id(), Some(&page(2)));
    // Link navigation is on the history like any other navigation.
    assert!(session.back());
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn unconfigured_or_dangling_links_are_inert() {
    let mut session = session_with_three_pages();
    let unconfigured = add_action_button(&mut session, 0, 0, Action::Link { to_page_id: None });
    let dangling = add_action_button(
        &mut session,
        0,
        1,
        Action::Link {
            to_page_id: Some(PageId::new("page-deleted").unwrap()),
        },
    );
    session.set_edit_mode(false).unwrap();

    assert!(session.activate_button(&unconfigured).unwrap().is_empty());
    assert_eq!(session.current_page_id(), Some(&page(1)));
    assert!(session.activate_button(&dangling).unwrap().is_empty());
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn youtube_opens_the_overlay_without_navigating() {
    let mut session = session_with_three_pages();
    let video = add_action_button(
        &mut session,
        0,
        0,
        Action::Youtube {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Morning song".to_string(),
        },
    );
    session.set_edit_mode(false).unwrap();

    let effects = session.activate_button(&video).unwrap();
    assert_eq!(
        effects,
        vec![Effect::OpenVideo {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "Morning song".to_string()
        }]
    );
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn bookmark_is_a_no_op() {
    let mut session = session_with_three_pages();
    let bookmark = add_action_button(&mut session, 0, 0, Action::Bookmark);
    session.set_edit_mode(false).unwrap();

    let effects = session.activate_button(&bookmark).unwrap();
    assert!(effects.is_empty());
    assert_eq!(session.current_page_id(), Some(&page(1)));
    assert_eq!(session.history_len(), 1);
}

#[test]
fn self_closing_speak_returns_to_the_previous_page() {
    let mut session = session_with_three_pages();
    // Put a self-closing "yes" leaf on page 2.
    session.set_current_page(&page(2)).unwrap();
    let yes = session.add_button_at(0, 0, "yes").unwrap();
    session
        .update_button(&yes, &ButtonPatch::new().self_closing(true))
        .unwrap();
    session.set_current_page(&page(1)).unwrap();
    session.set_edit_mode(false).unwrap();

    session.set_current_page(&page(2)).unwrap();
    let effects = session.activate_button(&yes).unwrap();
    assert_eq!(
        effects,
        vec![Effect::Speak {
            text: "yes".to_string()
        }]
    );
    // The implicit Back lands on the page we navigated from.
    assert_eq!(session.current_page_id(), Some(&page(1)));
}

#[test]
fn retargeted_action_behaves_like_its_new_kind() {
    let mut session = session_with_three_pages();
    let id = add_action_button(
        &mut session,
        0,
        0,
        Action::Youtube {
            video_id: "x".to_string(),
            title: "y".to_string(),
        },
    );
    let current = session
        .current_page()
        .unwrap()
        .button(&id)
        .unwrap()
        .action
        .clone();
    let retargeted = current.retarget(ActionKind::Speak, "cell");
    session
        .update_button(&id, &ButtonPatch::new().action(retargeted))
        .unwrap();
    session.set_edit_mode(false).unwrap();

    let effects = session.activate_button(&id).unwrap();
    assert_eq!(
        effects,
        vec![Effect::Speak {
            text: "cell".to_string()
        }]
    );
}
