use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flagquiz_core::{
    engine::{StdRandom, MAX_HINTS},
    provider::PoolEvent,
    storage::FileStore,
    timer::{RoundTick, RoundTimer, TICK_PERIOD},
    Country, GameSession, GuessOutcome, HintOutcome, SaveOutcome, TickOutcome,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_NAME_LEN: usize = 32;
const MAX_GUESS_LEN: usize = 64;

type Session = GameSession<FileStore, StdRandom>;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Guess,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PoolStatus {
    Loading,
    Ready(usize),
    Failed(String),
}

/// Blocking message shown over the game until a key is pressed.
#[derive(Debug, Clone)]
struct Notice {
    title: String,
    lines: Vec<String>,
}

/// What the front-end should do with its round timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    Stop,
    Keep,
    Start(u64),
}

/// Decide the timer for the current frame. Only a ready, unpaused round gets
/// a timer, and a new round id always replaces the running one.
fn timer_action(ready: bool, paused: bool, running: Option<u64>, round_id: u64) -> TimerAction {
    if !ready || paused {
        TimerAction::Stop
    } else if running == Some(round_id) {
        TimerAction::Keep
    } else {
        TimerAction::Start(round_id)
    }
}

enum AppEvent {
    Input(Event),
    Redraw,
    Round(RoundTick),
}

impl From<RoundTick> for AppEvent {
    fn from(tick: RoundTick) -> Self {
        AppEvent::Round(tick)
    }
}

/// Terminal front-end for a [`GameSession`].
pub struct FlagQuizApp {
    session: Session,
    state: UiState,
    theme: Theme,
    timer: Option<RoundTimer>,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    pool_rx: Option<mpsc::Receiver<PoolEvent>>,
    notice: Option<Notice>,
}

impl FlagQuizApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: UiState::default(),
            theme: Theme::default(),
            timer: None,
            event_tx: None,
            pool_rx: None,
            notice: None,
        }
    }

    pub fn attach_pool(&mut self, receiver: mpsc::Receiver<PoolEvent>) {
        self.pool_rx = Some(receiver);
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Loading countries... {} saved scores",
            self.session.leaderboard().len()
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        let mut pool_rx = self.pool_rx.take();

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            if let Some(rx) = pool_rx.as_mut() {
                let mut pool_closed = false;
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        if !self.process_app_event(maybe_event) {
                            break;
                        }
                    }
                    maybe_pool = rx.recv() => {
                        if let Some(event) = maybe_pool {
                            self.handle_pool_event(event);
                        }
                        pool_closed = true;
                    }
                }
                if pool_closed {
                    pool_rx = None;
                }
            } else {
                let maybe_event = event_rx.recv().await;
                if !self.process_app_event(maybe_event) {
                    break;
                }
            }

            self.sync_timer();
            if self.state.should_quit {
                break;
            }
        }

        self.timer = None;
        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    /// Keep exactly one live timer, bound to the current round, while play is
    /// possible. The welcome screen and notices pause the clock.
    fn sync_timer(&mut self) {
        let engine = self.session.engine();
        let paused = self.state.welcome || self.notice.is_some();
        let running = self.timer.as_ref().map(RoundTimer::round_id);
        match timer_action(engine.is_ready(), paused, running, engine.round_id()) {
            TimerAction::Stop => self.timer = None,
            TimerAction::Keep => {}
            TimerAction::Start(round_id) => {
                if let Some(sender) = self.event_tx.clone() {
                    // Assigning drops, and thereby cancels, the previous round's timer.
                    self.timer = Some(RoundTimer::start(round_id, TICK_PERIOD, sender));
                }
            }
        }
    }

    fn handle_pool_event(&mut self, event: PoolEvent) {
        match event {
            PoolEvent::Loaded(countries) => {
                let kept = self.session.load_pool(countries);
                if kept == 0 {
                    warn!("Provider returned no playable countries");
                    self.state.pool = PoolStatus::Failed("no playable countries".to_string());
                    self.state
                        .set_status("No playable countries were returned".to_string());
                } else {
                    self.state.pool = PoolStatus::Ready(kept);
                    self.state
                        .set_status(format!("Loaded {kept} countries. Guess the flag!"));
                }
            }
            PoolEvent::Failed(err) => {
                error!(%err, "Country pool unavailable");
                self.state.pool = PoolStatus::Failed(err.to_string());
                self.state
                    .set_status(format!("Failed to load countries: {err}"));
            }
        }
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    error!(?err, "Input handling failed");
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Round(tick)) => {
                self.handle_round_tick(tick);
                true
            }
            Some(AppEvent::Redraw) => true,
            None => false,
        }
    }

    fn handle_round_tick(&mut self, tick: RoundTick) {
        match self.session.tick(tick.round_id) {
            TickOutcome::Expired { answer } => {
                self.state
                    .set_status(format!("Time's up! That was {}", answer.display_name()));
            }
            TickOutcome::Stale => {
                debug!(round_id = tick.round_id, "Dropped tick from a finished round");
            }
            TickOutcome::Running { .. } | TickOutcome::NotReady => {}
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.state.welcome {
            let quit = key.code == KeyCode::Esc
                || (key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL);
            if quit {
                self.state.should_quit = true;
            } else {
                self.state.welcome = false;
            }
            return Ok(());
        }

        if self.notice.is_some() {
            self.notice = None;
            return Ok(());
        }

        if key.modifiers == KeyModifiers::CONTROL {
            return self.handle_control_key(key);
        }

        match key.code {
            KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.state.toggle_focus(),
            KeyCode::Up => self.state.move_board_cursor(-1, self.session.leaderboard().len()),
            KeyCode::Down => self.state.move_board_cursor(1, self.session.leaderboard().len()),
            KeyCode::Enter => match self.state.focus {
                Focus::Guess => self.submit_guess(),
                Focus::Name => self.save_score()?,
            },
            KeyCode::Backspace => match self.state.focus {
                Focus::Guess => self.session.engine_mut().pop_guess_char(),
                Focus::Name => self.session.pop_name_char(),
            },
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    self.insert_char(ch);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_control_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('c') => self.state.should_quit = true,
            KeyCode::Char('t') => self.request_hint(),
            KeyCode::Char('r') => {
                self.session.restart();
                info!("Game restarted");
                self.state.set_status("Game restarted".to_string());
            }
            KeyCode::Char('s') => self.save_score()?,
            KeyCode::Char('d') => self.delete_selected()?,
            _ => {}
        }
        Ok(())
    }

    fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        match self.state.focus {
            Focus::Guess => {
                let engine = self.session.engine_mut();
                if engine.is_ready()
                    && !engine.round().is_locked()
                    && engine.round().guess().chars().count() < MAX_GUESS_LEN
                {
                    engine.push_guess_char(ch);
                }
            }
            Focus::Name => {
                if self.session.player_name().chars().count() < MAX_NAME_LEN {
                    self.session.push_name_char(ch);
                }
            }
        }
    }

    fn submit_guess(&mut self) {
        match self.session.guess() {
            GuessOutcome::Correct { answer } => {
                self.state.set_status(format!(
                    "Correct! {} (+10). Next flag.",
                    answer.display_name()
                ));
            }
            GuessOutcome::Incorrect => {
                self.state.set_status("Not quite (-1). Try again.".to_string());
            }
            GuessOutcome::NotReady | GuessOutcome::Locked => {}
        }
    }

    fn request_hint(&mut self) {
        match self.session.hint() {
            HintOutcome::Revealed { hint, hints_left } => {
                self.state
                    .set_status(format!("Hint: {hint} ({hints_left} left, -2s)"));
            }
            HintOutcome::FullyRevealed => {
                self.state
                    .set_status("The whole name is already revealed".to_string());
            }
            HintOutcome::Exhausted { hint, answer } => {
                self.notice = Some(Notice {
                    title: "No more hints".to_string(),
                    lines: vec![
                        "No more hints available. You can't guess now.".to_string(),
                        format!("Last hint: {hint}"),
                        format!("The answer was {}.", answer.display_name()),
                        String::new(),
                        "Press any key for the next flag".to_string(),
                    ],
                });
                self.state.set_status("Round forfeited".to_string());
            }
            HintOutcome::NotReady => {}
        }
    }

    fn save_score(&mut self) -> Result<()> {
        match self.session.save_score()? {
            SaveOutcome::Saved { player_name, score } => {
                self.state
                    .set_status(format!("Saved {score} points for {player_name}"));
                self.state.focus = Focus::Guess;
            }
            SaveOutcome::EmptyName => {}
        }
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        let standings = self.session.standings();
        let Some(entry) = standings.get(self.state.board_cursor) else {
            return Ok(());
        };
        let removed = self.session.delete_score(&entry.player_name)?;
        self.state
            .set_status(format!("Deleted {removed} score(s) for {}", entry.player_name));
        self.state
            .move_board_cursor(0, self.session.leaderboard().len());
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        if self.state.welcome {
            self.render_welcome(frame, area);
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_title(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        self.render_game(frame, body[0]);
        self.render_leaderboard(frame, body[1]);
        self.render_status(frame, chunks[2]);

        if let Some(notice) = &self.notice {
            self.render_notice(frame, notice);
        }
    }

    fn render_welcome(&self, frame: &mut Frame, area: Rect) {
        let start_line = match &self.state.pool {
            PoolStatus::Loading => "Fetching countries... press any key to start".to_string(),
            PoolStatus::Ready(count) => format!("{count} countries ready. Press any key to start"),
            PoolStatus::Failed(reason) => format!("Countries unavailable: {reason}"),
        };
        let lines = vec![
            Line::from(Span::styled(
                "Welcome to Guess the Flag!",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Can you tell which country each flag belongs to?"),
            Line::from(""),
            Line::from(Span::styled(start_line, Style::default().fg(self.theme.muted))),
        ];
        let height = (lines.len() as u16 + 2).min(area.height);
        let width = 60_u16.min(area.width);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, centered_rect(width, height, area));
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            "Guess the Flag",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn render_game(&self, frame: &mut Frame, area: Rect) {
        let engine = self.session.engine();
        let Some(country) = engine.round().selected() else {
            let message = match &self.state.pool {
                PoolStatus::Loading => "Fetching countries...".to_string(),
                PoolStatus::Ready(count) => {
                    format!("{count} countries loaded, waiting for the first round")
                }
                PoolStatus::Failed(reason) => format!("Game unavailable: {reason}"),
            };
            let paragraph = Paragraph::new(message)
                .block(Block::default().borders(Borders::ALL).title("Flag"))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        };

        let round = engine.round();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_flag(frame, chunks[0], country);

        let timer_color = if round.remaining_seconds() <= 5 {
            self.theme.danger
        } else {
            self.theme.success
        };
        let mut stats = vec![
            Span::raw("Score: "),
            Span::styled(
                engine.score().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Timer: "),
            Span::styled(
                format!("{}s", round.remaining_seconds()),
                Style::default().fg(timer_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   Hints: {}/{}", round.hints_consumed(), MAX_HINTS)),
            Span::styled(
                format!("   Flags: {}", engine.pool().len()),
                Style::default().fg(self.theme.muted),
            ),
        ];
        if !round.hint().is_empty() {
            stats.push(Span::raw("   Hint: "));
            stats.push(Span::styled(
                round.hint().to_string(),
                Style::default().fg(self.theme.warning),
            ));
        }
        let stats = Paragraph::new(Line::from(stats))
            .block(Block::default().borders(Borders::ALL).title("Round"));
        frame.render_widget(stats, chunks[1]);

        let guess_title = if round.is_locked() {
            "Guess (locked)"
        } else {
            "Guess"
        };
        self.render_input(
            frame,
            chunks[2],
            guess_title,
            round.guess(),
            self.state.focus == Focus::Guess,
        );
        self.render_input(
            frame,
            chunks[3],
            "Your name",
            self.session.player_name(),
            self.state.focus == Focus::Name,
        );

        self.render_help(frame, chunks[4]);
    }

    fn render_flag(&self, frame: &mut Frame, area: Rect, country: &Country) {
        let mut lines = Vec::new();
        if let Some(glyph) = country.iso2.as_deref().and_then(flag_glyph) {
            lines.push(Line::from(Span::styled(
                glyph,
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(Line::from(Span::styled(
            country.flag_url.clone(),
            Style::default().fg(self.theme.accent),
        )));
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Flag"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
        let border = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::styled(value.to_string(), Style::default().fg(self.theme.primary_fg)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title.to_string()),
        );
        frame.render_widget(input, area);

        if focused && self.notice.is_none() {
            let offset = 2 + value.chars().count() as u16;
            let cursor_x = (area.x + 1 + offset).min(area.x + area.width.saturating_sub(2));
            frame.set_cursor(cursor_x, area.y + 1);
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let key = |label: &'static str| {
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
        };
        let lines = vec![
            Line::from(vec![
                key("Enter"),
                Span::raw(" guess/save  "),
                key("Tab"),
                Span::raw(" switch field  "),
                key("^T"),
                Span::raw(" hint  "),
                key("^S"),
                Span::raw(" save score"),
            ]),
            Line::from(vec![
                key("^R"),
                Span::raw(" restart  "),
                key("↑/↓"),
                Span::raw(" select  "),
                key("^D"),
                Span::raw(" delete  "),
                key("Esc"),
                Span::raw(" quit"),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Keys"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_leaderboard(&self, frame: &mut Frame, area: Rect) {
        let standings = self.session.standings();
        let title = match self.session.leaderboard().best() {
            Some(best) => format!("Top Scores (best: {} by {})", best.score, best.player_name),
            None => "Top Scores".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        if standings.is_empty() {
            let paragraph = Paragraph::new("No scores yet!")
                .style(Style::default().fg(self.theme.muted))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = standings
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>2}. ", idx + 1),
                        Style::default().fg(self.theme.muted),
                    ),
                    Span::raw(format!("{:<20}", entry.player_name)),
                    Span::styled(
                        format!("{:>6}", entry.score),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(self.theme.selection_bg)
                .fg(self.theme.selection_fg),
        );
        let mut list_state = ListState::default();
        list_state.select(Some(self.state.board_cursor.min(standings.len() - 1)));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let paragraph = Paragraph::new(Line::from(self.state.status.clone()))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_notice(&self, frame: &mut Frame, notice: &Notice) {
        let frame_area = frame.size();
        let width = 56_u16.min(frame_area.width.saturating_sub(4)).max(24);
        let height = (notice.lines.len() as u16 + 2).min(frame_area.height);
        let area = centered_rect(width, height, frame_area);

        frame.render_widget(Clear, area);
        let lines: Vec<Line> = notice.lines.iter().cloned().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.warning))
                    .title(notice.title.clone()),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Redraw).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    status: String,
    focus: Focus,
    pool: PoolStatus,
    board_cursor: usize,
    welcome: bool,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            focus: Focus::Guess,
            pool: PoolStatus::Loading,
            board_cursor: 0,
            welcome: true,
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Guess => Focus::Name,
            Focus::Name => Focus::Guess,
        };
    }

    fn move_board_cursor(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.board_cursor = 0;
            return;
        }
        let max = total as isize - 1;
        let next = (self.board_cursor as isize + delta).clamp(0, max);
        self.board_cursor = next as usize;
    }
}

/// Regional-indicator emoji for an ISO 3166-1 alpha-2 code.
fn flag_glyph(iso2: &str) -> Option<String> {
    let code = iso2.trim();
    if code.len() != 2 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    code.to_ascii_uppercase()
        .chars()
        .map(|ch| char::from_u32(0x1F1E6 + (ch as u32 - 'A' as u32)))
        .collect()
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_glyph_maps_regional_indicators() {
        assert_eq!(flag_glyph("fr").as_deref(), Some("🇫🇷"));
        assert_eq!(flag_glyph("FRA"), None);
        assert_eq!(flag_glyph("1A"), None);
    }

    #[test]
    fn board_cursor_stays_in_range() {
        let mut state = UiState::default();
        state.move_board_cursor(5, 3);
        assert_eq!(state.board_cursor, 2);
        state.move_board_cursor(-9, 3);
        assert_eq!(state.board_cursor, 0);
        state.board_cursor = 4;
        state.move_board_cursor(0, 2);
        assert_eq!(state.board_cursor, 1);
        state.move_board_cursor(1, 0);
        assert_eq!(state.board_cursor, 0);
    }

    #[test]
    fn timer_runs_only_for_a_ready_unpaused_round() {
        assert_eq!(timer_action(false, false, None, 0), TimerAction::Stop);
        assert_eq!(timer_action(false, false, Some(3), 3), TimerAction::Stop);
        assert_eq!(timer_action(true, true, Some(3), 3), TimerAction::Stop);
        assert_eq!(timer_action(true, false, None, 3), TimerAction::Start(3));
    }

    #[test]
    fn new_round_replaces_the_running_timer() {
        assert_eq!(timer_action(true, false, Some(3), 3), TimerAction::Keep);
        assert_eq!(timer_action(true, false, Some(3), 4), TimerAction::Start(4));
        // Resuming after a pause restarts the clock for the same round.
        assert_eq!(timer_action(true, false, None, 4), TimerAction::Start(4));
    }

    #[test]
    fn play_starts_behind_the_welcome_screen() {
        let state = UiState::default();
        assert!(state.welcome);
        assert_eq!(timer_action(true, state.welcome, None, 1), TimerAction::Stop);
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, area), area);
    }
}
