use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use scoreline_terminal::board::Match;
use scoreline_terminal::config::AppConfig;
use scoreline_terminal::state::{AppState, BoardView, EditBuffer, EditField};
use scoreline_terminal::summary::{rank, summary_lines, TieBreak};

struct App {
    state: AppState,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config.tie_break),
            tick_rate: config.tick_rate,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.editing.is_some() {
            self.on_edit_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            // start/edit/finish only act on the board view; the state guards them
            KeyCode::Char('s') => self.state.start_match(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('e') | KeyCode::Enter => self.state.begin_edit(),
            KeyCode::Char('f') => self.state.finish_selected(),
            KeyCode::Char('v') | KeyCode::Char('V') => self.state.toggle_summaries(),
            KeyCode::Char('b') | KeyCode::Esc => {
                if self.state.view == BoardView::Summaries {
                    self.state.toggle_summaries();
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn on_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.end_edit(),
            KeyCode::Enter => {
                self.state.commit_selected();
                self.state.end_edit();
            }
            KeyCode::Tab => self.state.cycle_edit_next(),
            KeyCode::BackTab => self.state.cycle_edit_prev(),
            KeyCode::Backspace => self.state.edit_backspace(),
            KeyCode::Char(c) => self.state.edit_push(c),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = app
            .tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.view {
        BoardView::Matches => render_board(frame, chunks[1], &app.state),
        BoardView::Summaries => render_summaries(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = format!(
        "SCORELINE | {} | {} in play | Tie-break: {}",
        view_label(state.view),
        state.board.len(),
        tie_break_label(state.tie_break)
    );
    let line1 = format!("  ,--.  {}", title);
    let line2 = " ( () )".to_string();
    let line3 = "  `--'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.editing.is_some() {
        return "Tab/Shift-Tab Field | Enter Commit | Esc Cancel | type to edit".to_string();
    }
    match state.view {
        BoardView::Matches => {
            "s Start | Enter/e Edit | f Finish | v Summary | j/k/↑/↓ Move | ? Help | q Quit"
                .to_string()
        }
        BoardView::Summaries => "v/b/Esc Board | j/k/↑/↓ Scroll | ? Help | q Quit".to_string(),
    }
}

fn render_board(frame: &mut Frame, area: Rect, state: &AppState) {
    let matches = state.board.matches();
    if matches.is_empty() {
        let empty = Paragraph::new("No matches in play. Press s to start one.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    const CARD_HEIGHT: u16 = 5;
    if area.height < CARD_HEIGHT {
        let empty = Paragraph::new("Board needs more height")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let visible = (area.height / CARD_HEIGHT) as usize;
    let (start, end) = visible_range(state.selected, matches.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let card_area = Rect {
            x: area.x,
            y: area.y + (i as u16) * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        };

        let m = &matches[idx];
        let selected = idx == state.selected;
        let border_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(card_title(m))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(card_area);
        frame.render_widget(block, card_area);
        if inner.height == 0 || inner.width == 0 {
            continue;
        }

        let editing = if selected { state.editing } else { None };
        let text = card_text(m, state.buffers.get(&m.id), editing);
        frame.render_widget(Paragraph::new(text), inner);
    }
}

fn card_title(m: &Match) -> String {
    if m.home_team.is_empty() && m.away_team.is_empty() {
        format!(" {} ", m.id)
    } else {
        format!(" {} {} vs {} ", m.id, m.home_team, m.away_team)
    }
}

fn card_text(m: &Match, buffer: Option<&EditBuffer>, editing: Option<EditField>) -> String {
    let score = m.score_line();
    let edit = match buffer {
        Some(buf) => edit_line(buf, editing),
        None => String::new(),
    };
    let kicked = format!("kicked off {}", m.kicked_off.format("%H:%M:%S"));
    format!("{score}\n{edit}\n{kicked}")
}

fn edit_line(buf: &EditBuffer, editing: Option<EditField>) -> String {
    let field = |f: EditField, text: &str| -> String {
        if editing == Some(f) {
            format!("[{text}_]")
        } else {
            format!("[{text}]")
        }
    };
    format!(
        "home {} {}  away {} {}",
        field(EditField::HomeTeam, &buf.home_team),
        field(EditField::HomeScore, &buf.home_score),
        field(EditField::AwayTeam, &buf.away_team),
        field(EditField::AwayScore, &buf.away_score),
    )
}

fn render_summaries(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Match Summaries")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let ranked = rank(state.board.matches(), state.tie_break);
    if ranked.is_empty() {
        let empty = Paragraph::new("No summaries yet").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let lines = summary_lines(&ranked);
    let visible = inner.height as usize;
    let total = lines.len();
    let max_start = total.saturating_sub(visible);
    let start = (state.summary_scroll as usize).min(max_start);
    let end = (start + visible).min(total);
    let text = lines[start..end].join("\n");
    frame.render_widget(Paragraph::new(text), inner);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn view_label(view: BoardView) -> &'static str {
    match view {
        BoardView::Matches => "LIVE BOARD",
        BoardView::Summaries => "SUMMARY",
    }
}

fn tie_break_label(tie_break: TieBreak) -> &'static str {
    match tie_break {
        TieBreak::Kickoff => "KICKOFF",
        TieBreak::Stable => "STABLE",
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total <= visible {
        return (0, total);
    }
    let start = selected.saturating_sub(visible / 2).min(total - visible);
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Scoreline - Help",
        "",
        "Board:",
        "  s            Start a match",
        "  Enter / e    Edit selected match",
        "  f            Finish selected match",
        "  v            Toggle summaries",
        "  j/k or ↑/↓   Move selection",
        "",
        "Edit form:",
        "  Tab / S-Tab  Next / previous field",
        "  Enter        Commit teams and scores",
        "  Esc          Leave the form",
        "",
        "Summaries:",
        "  j/k or ↑/↓   Scroll",
        "  v / b / Esc  Back to board",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
