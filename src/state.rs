use std::collections::{HashMap, VecDeque};

use crate::board::{Match, MatchId, Scoreboard};
use crate::summary::TieBreak;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardView {
    Matches,
    Summaries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    HomeTeam,
    HomeScore,
    AwayTeam,
    AwayScore,
}

// Form text lives here until an explicit commit parses it; a commit never
// writes back into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub home_team: String,
    pub away_team: String,
    pub home_score: String,
    pub away_score: String,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditBuffer {
    pub fn new() -> Self {
        Self {
            home_team: String::new(),
            away_team: String::new(),
            home_score: "0".to_string(),
            away_score: "0".to_string(),
        }
    }

    pub fn field_mut(&mut self, field: EditField) -> &mut String {
        match field {
            EditField::HomeTeam => &mut self.home_team,
            EditField::HomeScore => &mut self.home_score,
            EditField::AwayTeam => &mut self.away_team,
            EditField::AwayScore => &mut self.away_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub board: Scoreboard,
    pub view: BoardView,
    pub selected: usize,
    pub editing: Option<EditField>,
    pub buffers: HashMap<MatchId, EditBuffer>,
    pub tie_break: TieBreak,
    pub summary_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TieBreak::default())
    }
}

impl AppState {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            board: Scoreboard::new(),
            view: BoardView::Matches,
            selected: 0,
            editing: None,
            buffers: HashMap::with_capacity(16),
            tie_break,
            summary_scroll: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn selected_match(&self) -> Option<&Match> {
        self.board.matches().get(self.selected)
    }

    pub fn selected_id(&self) -> Option<MatchId> {
        self.selected_match().map(|m| m.id)
    }

    pub fn start_match(&mut self) {
        if self.view != BoardView::Matches {
            return;
        }
        let id = self.board.start_match();
        self.buffers.insert(id, EditBuffer::new());
        self.selected = self.board.len() - 1;
        self.push_log(format!("[INFO] Match {id} started"));
    }

    pub fn commit_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.push_log("[INFO] No match selected");
            return;
        };
        let Some(buf) = self.buffers.get(&id).cloned() else {
            self.push_log(format!("[WARN] No edit form for {id}"));
            return;
        };
        // either score failing to parse rejects the whole commit
        let Some(home_score) = parse_score(&buf.home_score) else {
            self.push_log(format!(
                "[WARN] Home score is not a number: '{}'",
                buf.home_score
            ));
            return;
        };
        let Some(away_score) = parse_score(&buf.away_score) else {
            self.push_log(format!(
                "[WARN] Away score is not a number: '{}'",
                buf.away_score
            ));
            return;
        };
        match self
            .board
            .update_match(id, home_score, away_score, &buf.home_team, &buf.away_team)
        {
            Ok(()) => {
                let line = self
                    .board
                    .get(id)
                    .map(|m| m.score_line())
                    .unwrap_or_default();
                self.push_log(format!("[INFO] Updated {id}: {line}"));
            }
            Err(err) => self.push_log(format!("[WARN] Update failed: {err}")),
        }
    }

    pub fn finish_selected(&mut self) {
        if self.view != BoardView::Matches {
            return;
        }
        let Some(id) = self.selected_id() else {
            self.push_log("[INFO] No match selected");
            return;
        };
        self.finish(id);
    }

    pub fn finish(&mut self, id: MatchId) {
        // re-find the selection by id once the rows below shift up
        let keep = self.selected_id().filter(|sel| *sel != id);
        match self.board.finish_match(id) {
            Ok(m) => {
                self.buffers.remove(&id);
                if keep.is_none() {
                    self.editing = None;
                }
                if let Some(keep) = keep
                    && let Some(pos) = self.board.position_of(keep)
                {
                    self.selected = pos;
                }
                self.clamp_selection();
                self.push_log(format!("[ALERT] Full time: {} ({id})", m.score_line()));
            }
            Err(err) => self.push_log(format!("[WARN] Finish failed: {err}")),
        }
    }

    pub fn toggle_summaries(&mut self) {
        self.view = match self.view {
            BoardView::Matches => BoardView::Summaries,
            BoardView::Summaries => BoardView::Matches,
        };
        self.summary_scroll = 0;
        self.editing = None;
    }

    pub fn begin_edit(&mut self) {
        if self.view == BoardView::Matches && self.selected_id().is_some() {
            self.editing = Some(EditField::HomeTeam);
        }
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn cycle_edit_next(&mut self) {
        self.editing = match self.editing {
            Some(EditField::HomeTeam) => Some(EditField::HomeScore),
            Some(EditField::HomeScore) => Some(EditField::AwayTeam),
            Some(EditField::AwayTeam) => Some(EditField::AwayScore),
            Some(EditField::AwayScore) => Some(EditField::HomeTeam),
            None => None,
        };
    }

    pub fn cycle_edit_prev(&mut self) {
        self.editing = match self.editing {
            Some(EditField::HomeTeam) => Some(EditField::AwayScore),
            Some(EditField::HomeScore) => Some(EditField::HomeTeam),
            Some(EditField::AwayTeam) => Some(EditField::HomeScore),
            Some(EditField::AwayScore) => Some(EditField::AwayTeam),
            None => None,
        };
    }

    pub fn edit_push(&mut self, c: char) {
        let Some(field) = self.editing else { return };
        let Some(id) = self.selected_id() else { return };
        if let Some(buf) = self.buffers.get_mut(&id) {
            buf.field_mut(field).push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        let Some(field) = self.editing else { return };
        let Some(id) = self.selected_id() else { return };
        if let Some(buf) = self.buffers.get_mut(&id) {
            buf.field_mut(field).pop();
        }
    }

    pub fn select_next(&mut self) {
        if self.view == BoardView::Summaries {
            self.scroll_summary_down();
            return;
        }
        let total = self.board.len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        if self.view == BoardView::Summaries {
            self.scroll_summary_up();
            return;
        }
        let total = self.board.len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.board.len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    fn scroll_summary_down(&mut self) {
        let max_lines = self.board.len();
        if max_lines == 0 {
            self.summary_scroll = 0;
            return;
        }
        let max_scroll = (max_lines - 1).min(u16::MAX as usize) as u16;
        if self.summary_scroll < max_scroll {
            self.summary_scroll += 1;
        }
    }

    fn scroll_summary_up(&mut self) {
        self.summary_scroll = self.summary_scroll.saturating_sub(1);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn parse_score(raw: &str) -> Option<u32> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<u32>().ok()
}
