use scoreline_terminal::state::{AppState, BoardView, EditField, parse_score};
use scoreline_terminal::summary::TieBreak;

fn fresh_state() -> AppState {
    AppState::new(TieBreak::Kickoff)
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        state.edit_push(c);
    }
}

#[test]
fn starting_a_match_creates_a_blank_entry_and_a_fresh_form() {
    let mut state = fresh_state();
    state.start_match();

    assert_eq!(state.board.len(), 1);
    let m = &state.board.matches()[0];
    assert_eq!(m.home_team, "");
    assert_eq!(m.away_team, "");
    assert_eq!(m.home_score, 0);
    assert_eq!(m.away_score, 0);

    let buf = state.buffers.get(&m.id).expect("form created");
    assert_eq!(buf.home_team, "");
    assert_eq!(buf.away_team, "");
    assert_eq!(buf.home_score, "0");
    assert_eq!(buf.away_score, "0");
    assert_eq!(state.selected, 0);
}

#[test]
fn starting_jumps_selection_to_the_new_match() {
    let mut state = fresh_state();
    state.start_match();
    state.start_match();
    state.start_match();

    assert_eq!(state.selected, 2);
}

#[test]
fn committing_typed_teams_and_scores_updates_the_board() {
    let mut state = fresh_state();
    state.start_match();
    state.begin_edit();

    type_text(&mut state, "Uruguay");
    state.cycle_edit_next();
    state.edit_backspace();
    state.edit_push('2');
    state.cycle_edit_next();
    type_text(&mut state, "Italy");
    state.cycle_edit_next();
    state.edit_backspace();
    state.edit_push('1');
    state.commit_selected();

    let m = &state.board.matches()[0];
    assert_eq!(m.score_line(), "Uruguay 2 - Italy 1");
    assert!(state.logs.iter().any(|line| line.starts_with("[INFO] Updated")));
}

#[test]
fn a_non_numeric_score_rejects_the_whole_commit() {
    let mut state = fresh_state();
    state.start_match();
    let id = state.selected_id().expect("match selected");
    state.begin_edit();

    type_text(&mut state, "Ghana");
    state.cycle_edit_next();
    state.edit_push('x');
    state.commit_selected();

    let m = state.board.get(id).expect("still on the board");
    assert_eq!(m.home_team, "");
    assert_eq!(m.home_score, 0);
    assert!(state.logs.iter().any(|line| line.starts_with("[WARN]")));

    let buf = state.buffers.get(&id).expect("form kept");
    assert_eq!(buf.home_team, "Ghana");
    assert_eq!(buf.home_score, "0x");
}

#[test]
fn committing_leaves_the_form_text_alone() {
    let mut state = fresh_state();
    state.start_match();
    let id = state.selected_id().expect("match selected");
    state.begin_edit();
    state.edit_push('A');
    state.commit_selected();

    let buf = state.buffers.get(&id).expect("form kept");
    assert_eq!(buf.home_team, "A");
    assert_eq!(buf.home_score, "0");
}

#[test]
fn finishing_removes_the_match_its_form_and_logs_full_time() {
    let mut state = fresh_state();
    state.start_match();
    state.finish_selected();

    assert!(state.board.is_empty());
    assert!(state.buffers.is_empty());
    assert!(
        state
            .logs
            .iter()
            .any(|line| line.starts_with("[ALERT] Full time:"))
    );
}

#[test]
fn finishing_an_earlier_match_keeps_the_selection_on_the_same_match() {
    let mut state = fresh_state();
    state.start_match();
    let first = state.selected_id().expect("match selected");
    state.start_match();
    let second = state.selected_id().expect("match selected");
    assert_eq!(state.selected, 1);

    state.finish(first);

    assert_eq!(state.selected, 0);
    assert_eq!(state.selected_id(), Some(second));
}

#[test]
fn finishing_with_nothing_selected_is_a_logged_no_op() {
    let mut state = fresh_state();
    state.finish_selected();

    assert!(state.board.is_empty());
    assert!(state.logs.iter().any(|line| line.contains("No match selected")));
}

#[test]
fn board_gestures_are_ignored_in_the_summaries_view() {
    let mut state = fresh_state();
    state.start_match();
    state.toggle_summaries();

    state.start_match();
    assert_eq!(state.board.len(), 1);

    state.begin_edit();
    assert_eq!(state.editing, None);

    state.finish_selected();
    assert_eq!(state.board.len(), 1);
    assert!(!state.logs.iter().any(|line| line.starts_with("[ALERT]")));

    state.toggle_summaries();
    state.start_match();
    assert_eq!(state.board.len(), 2);
}

#[test]
fn toggling_summaries_flips_the_view_and_back() {
    let mut state = fresh_state();
    assert_eq!(state.view, BoardView::Matches);
    state.toggle_summaries();
    assert_eq!(state.view, BoardView::Summaries);
    state.toggle_summaries();
    assert_eq!(state.view, BoardView::Matches);
}

#[test]
fn selection_wraps_around_the_board() {
    let mut state = fresh_state();
    state.start_match();
    state.start_match();
    state.start_match();
    assert_eq!(state.selected, 2);

    state.select_next();
    assert_eq!(state.selected, 0);
    state.select_prev();
    assert_eq!(state.selected, 2);
}

#[test]
fn edit_focus_cycles_through_all_four_fields() {
    let mut state = fresh_state();
    state.start_match();
    state.begin_edit();

    assert_eq!(state.editing, Some(EditField::HomeTeam));
    state.cycle_edit_next();
    assert_eq!(state.editing, Some(EditField::HomeScore));
    state.cycle_edit_next();
    assert_eq!(state.editing, Some(EditField::AwayTeam));
    state.cycle_edit_next();
    assert_eq!(state.editing, Some(EditField::AwayScore));
    state.cycle_edit_next();
    assert_eq!(state.editing, Some(EditField::HomeTeam));
    state.cycle_edit_prev();
    assert_eq!(state.editing, Some(EditField::AwayScore));
}

#[test]
fn editing_needs_a_selected_match() {
    let mut state = fresh_state();
    state.begin_edit();
    assert_eq!(state.editing, None);
}

#[test]
fn score_text_parses_only_plain_non_negative_integers() {
    assert_eq!(parse_score("2"), Some(2));
    assert_eq!(parse_score(" 10 "), Some(10));
    assert_eq!(parse_score("0"), Some(0));
    assert_eq!(parse_score(""), None);
    assert_eq!(parse_score("   "), None);
    assert_eq!(parse_score("abc"), None);
    assert_eq!(parse_score("-1"), None);
    assert_eq!(parse_score("2.5"), None);
}

#[test]
fn console_log_keeps_only_the_newest_two_hundred_lines() {
    let mut state = fresh_state();
    for i in 0..250 {
        state.push_log(format!("[INFO] line {i}"));
    }

    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] line 249"));
}
