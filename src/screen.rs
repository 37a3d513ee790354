//! Interactive "Start a New Game!" screen.
//!
//! This module is the terminal half of the start screen. `start.rs` decides
//! what each action does to the data; this module decides which action a key
//! press means, keeps track of which control has focus, draws the result, and
//! runs the event loop.
//!
//! Layout, top to bottom:
//!
//! ```text
//!            Start a New Game!
//!  ┌──────────────────────────────────┐
//!  │         Select a Number          │
//!  │               42_                │
//!  │                                  │
//!  │  RESET                  CONFIRM  │
//!  └──────────────────────────────────┘
//!  ┌──────────────────────────────────┐   only once a number
//!  │           You selected           │   has been confirmed
//!  │             ┌────┐               │
//!  │             │ 42 │               │
//!  │             └────┘               │
//!  │            START GAME            │
//!  └──────────────────────────────────┘
//! ```

use anyhow::{Context, Result};
use crossterm::{
    // `Event as TermEvent` renames crossterm's `Event` at the import so it
    // can't be confused with `StartEvent`.
    event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use n0_future::StreamExt;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::time::{Duration, interval};
use tracing::{debug, info};

use crate::alert::{AlertKey, AlertModal};
use crate::start::{StartEvent, StartState, reduce};
use crate::theme::Theme;

/// Width of the centered column holding both cards.
const COLUMN_WIDTH: u16 = 40;
/// Minimum width of the numeric input field, in cells.
const FIELD_WIDTH: usize = 6;
/// Width of the number badge in the summary card, borders included.
const BADGE_WIDTH: u16 = 8;

// ── Focus ───────────────────────────────────────────────────────────────────

/// Which control receives Enter / Space.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Focus {
    Input,
    Reset,
    Confirm,
    StartGame,
}

impl Focus {
    /// The next control in tab order. "START GAME" only joins the ring once a
    /// number is confirmed.
    fn next(self, confirmed: bool) -> Self {
        match self {
            Focus::Input => Focus::Reset,
            Focus::Reset => Focus::Confirm,
            Focus::Confirm if confirmed => Focus::StartGame,
            Focus::Confirm | Focus::StartGame => Focus::Input,
        }
    }

    fn prev(self, confirmed: bool) -> Self {
        match self {
            Focus::Input if confirmed => Focus::StartGame,
            Focus::Input => Focus::Confirm,
            Focus::Reset => Focus::Input,
            Focus::Confirm => Focus::Reset,
            Focus::StartGame => Focus::Confirm,
        }
    }
}

// ── Screen ──────────────────────────────────────────────────────────────────

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    /// The player quit without starting a game.
    Quit,
    /// "START GAME" was pressed with this number.
    Started(u32),
}

/// How the screen ended, returned to the caller of `run_start_screen`.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Started(u32),
    Quit,
}

/// The start screen: reducer state plus everything only the terminal needs.
///
/// `F` is the parent's `on_start_game` callback. It is stored in an `Option`
/// and moved out with `take()` when "START GAME" is pressed, so the type
/// system guarantees it runs at most once.
pub struct StartScreen<F: FnOnce(u32)> {
    state: StartState,
    alert: AlertModal,
    focus: Focus,
    theme: Theme,
    on_start_game: Option<F>,
}

impl<F: FnOnce(u32)> StartScreen<F> {
    pub fn new(theme: Theme, on_start_game: F) -> Self {
        Self {
            state: StartState::default(),
            alert: AlertModal::default(),
            focus: Focus::Input,
            theme,
            on_start_game: Some(on_start_game),
        }
    }

    pub fn state(&self) -> &StartState {
        &self.state
    }

    /// Run one event through the reducer, then bring focus in line with the
    /// new state.
    fn dispatch(&mut self, event: StartEvent) {
        let confirming = event == StartEvent::Confirm;
        let resetting = event == StartEvent::Reset;
        debug!(?event, "dispatch");
        self.state = reduce(&self.state, event, &mut self.alert);

        if confirming && self.state.confirmed && !self.alert.is_open() {
            // Accepted: the keyboard was released, so move to the next step.
            self.focus = Focus::StartGame;
        } else if resetting {
            self.focus = Focus::Input;
            self.state = reduce(&self.state, StartEvent::FocusInput, &mut self.alert);
        } else if self.focus == Focus::StartGame && !self.state.confirmed {
            self.focus = Focus::Input;
        }
    }

    /// Move focus, taking or releasing the keyboard to match.
    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        let event = if focus == Focus::Input {
            StartEvent::FocusInput
        } else {
            StartEvent::DismissKeyboard
        };
        self.dispatch(event);
    }

    /// Press whichever control currently has focus.
    fn activate(&mut self) -> Flow {
        match self.focus {
            // Submitting the field is the same as pressing Confirm.
            Focus::Input | Focus::Confirm => self.dispatch(StartEvent::Confirm),
            Focus::Reset => self.dispatch(StartEvent::Reset),
            Focus::StartGame => return self.start_game(),
        }
        Flow::Continue
    }

    fn start_game(&mut self) -> Flow {
        let Some(number) = self.state.start_game() else {
            return Flow::Continue;
        };
        // Only the first press reaches the parent.
        if let Some(on_start_game) = self.on_start_game.take() {
            info!(number, "starting game");
            on_start_game(number);
        }
        Flow::Started(number)
    }

    /// Replace the buffer with `edit` applied to the current text.
    ///
    /// Edits go through `InputChanged`, so the result is filtered by the
    /// reducer just like text arriving from the keyboard.
    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        if self.focus != Focus::Input {
            self.focus = Focus::Input;
        }
        let mut raw = self.state.input.clone();
        edit(&mut raw);
        self.dispatch(StartEvent::InputChanged(raw));
    }

    /// Handle a key press.
    ///
    /// An open alert gets first refusal on every key. Global shortcuts come
    /// next, then keys that depend on the focused control.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        match self.alert.handle(key) {
            AlertKey::Dismissed(continuation) => {
                self.dispatch(continuation);
                return Flow::Continue;
            }
            AlertKey::Blocked => return Flow::Continue,
            AlertKey::NotOpen => {}
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('t') if ctrl => self.theme.toggle(),
            KeyCode::Char('r') if ctrl => self.dispatch(StartEvent::Reset),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.set_focus(self.focus.prev(self.state.confirmed));
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                self.set_focus(self.focus.prev(self.state.confirmed));
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                self.set_focus(self.focus.next(self.state.confirmed));
            }
            KeyCode::Esc => {
                if self.focus == Focus::Input && self.state.keyboard {
                    // Like tapping outside the field.
                    self.dispatch(StartEvent::DismissKeyboard);
                } else {
                    return Flow::Quit;
                }
            }
            KeyCode::Enter => return self.activate(),
            KeyCode::Char(' ') if self.focus != Focus::Input => return self.activate(),
            KeyCode::Backspace => self.edit_input(|raw| {
                raw.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit_input(|raw| raw.push(c)),
            _ => {}
        }
        Flow::Continue
    }

    // ── Rendering ────────────────────────────────────────────────────────

    /// Draw the whole screen into a frame. Reads state, never changes it.
    pub fn render(&self, f: &mut ratatui::Frame) {
        let theme = &self.theme;
        let area = f.area();
        f.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

        let [main, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let col_w = COLUMN_WIDTH.min(main.width);
        let column = Rect::new(
            main.x + main.width.saturating_sub(col_w) / 2,
            main.y,
            col_w,
            main.height,
        );
        let [title_area, input_area, summary_area, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Min(0),
        ])
        .areas(column);

        let title = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Start a New Game!",
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(title, title_area);

        self.render_input_card(f, input_area);
        if self.state.confirmed && summary_area.height > 1 {
            // Leave one blank row above the summary card.
            let summary = Rect {
                y: summary_area.y + 1,
                height: summary_area.height - 1,
                ..summary_area
            };
            self.render_summary_card(f, summary);
        }
        f.render_widget(Paragraph::new(hints(theme)), hint_area);

        // The alert goes last so it sits on top of everything else.
        self.alert.render(f, theme);
    }

    fn render_input_card(&self, f: &mut ratatui::Frame, area: Rect) {
        let theme = &self.theme;
        let block = card(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [label_row, field_row, _, button_row] = Layout::vertical([Constraint::Length(1); 4]).areas(inner);

        f.render_widget(
            Paragraph::new(Span::styled("Select a Number", Style::default().fg(theme.text)))
                .alignment(Alignment::Center),
            label_row,
        );

        let typing = self.focus == Focus::Input && self.state.keyboard && !self.alert.is_open();
        let (field, cursor_offset) = input_field(&self.state.input, typing, theme);
        let field_width = field.width() as u16;
        f.render_widget(Paragraph::new(field).alignment(Alignment::Center), field_row);
        if typing {
            let field_x = field_row.x + field_row.width.saturating_sub(field_width) / 2;
            let x = (field_x + cursor_offset).min(field_row.right().saturating_sub(1));
            f.set_cursor_position((x, field_row.y));
        }

        let [reset_area, confirm_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(button_row);
        f.render_widget(
            Paragraph::new(button("Reset", theme.primary, self.focus == Focus::Reset, theme))
                .alignment(Alignment::Left),
            reset_area,
        );
        f.render_widget(
            Paragraph::new(button("Confirm", theme.accent, self.focus == Focus::Confirm, theme))
                .alignment(Alignment::Right),
            confirm_area,
        );
    }

    fn render_summary_card(&self, f: &mut ratatui::Frame, area: Rect) {
        let theme = &self.theme;
        let Some(number) = self.state.selected else {
            return;
        };
        let block = card(theme);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [label_row, badge_row, button_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        f.render_widget(
            Paragraph::new(Span::styled("You selected", Style::default().fg(theme.text)))
                .alignment(Alignment::Center),
            label_row,
        );

        let badge_w = BADGE_WIDTH.min(badge_row.width);
        let badge_area = Rect {
            x: badge_row.x + badge_row.width.saturating_sub(badge_w) / 2,
            width: badge_w,
            ..badge_row
        };
        f.render_widget(number_badge(number, theme), badge_area);

        f.render_widget(
            Paragraph::new(button(
                "Start Game",
                theme.accent,
                self.focus == Focus::StartGame,
                theme,
            ))
            .alignment(Alignment::Center),
            button_row,
        );
    }
}

// ── Presentational helpers ──────────────────────────────────────────────────
//
// Small builders for the three visual building blocks: a bordered card, the
// numeric field, and the number badge. Plus buttons and the hint line.

/// A bordered container for a group of controls.
fn card(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
}

/// The numeric field as a styled line, plus the cursor's column inside it.
///
/// The digits are centered in a field at least `FIELD_WIDTH` cells wide and
/// underlined so the empty field is still visible.
fn input_field<'a>(input: &str, typing: bool, theme: &Theme) -> (Line<'a>, u16) {
    let width = input.len().max(FIELD_WIDTH);
    let pad_left = (width - input.len()) / 2;
    let pad_right = width - input.len() - pad_left;
    let text = format!("{}{}{}", " ".repeat(pad_left), input, " ".repeat(pad_right));

    let underline = if typing { theme.accent } else { theme.input_underline };
    let line = Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.text)
            .underline_color(underline)
            .add_modifier(Modifier::UNDERLINED),
    ));
    (line, (pad_left + input.len()) as u16)
}

/// The accepted number in a small bordered box.
fn number_badge(number: u32, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Span::styled(
        number.to_string(),
        Style::default()
            .fg(theme.badge)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.badge_border)),
    )
}

/// A button label. Focused buttons are filled with their color.
fn button(label: &str, color: ratatui::style::Color, focused: bool, theme: &Theme) -> Span<'static> {
    let text = format!(" {} ", label.to_uppercase());
    if focused {
        Span::styled(
            text,
            Style::default()
                .fg(theme.on_button)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(text, Style::default().fg(color))
    }
}

/// Key hints for the bottom row.
fn hints(theme: &Theme) -> Line<'static> {
    let key = Style::default()
        .fg(theme.hint_key)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.hint_text);
    Line::from(vec![
        Span::styled(" Tab", key),
        Span::styled(" focus  ", text),
        Span::styled("Enter", key),
        Span::styled(" press  ", text),
        Span::styled("Esc", key),
        Span::styled(" hide/quit  ", text),
        Span::styled("^T", key),
        Span::styled(" theme", text),
    ])
}

// ── Public entry point ──────────────────────────────────────────────────────

/// Drive a screen until it finishes, drawing to `terminal` and reading keys
/// from `events`.
///
/// Split from `run_start_screen` so terminal setup and teardown wrap this in
/// one place, and an error here still restores the terminal.
async fn event_loop<B, F>(
    terminal: &mut ratatui::Terminal<B>,
    screen: &mut StartScreen<F>,
) -> Result<Outcome>
where
    B: Backend,
    F: FnOnce(u32),
{
    let mut events = EventStream::new();
    // Redraw every 50ms even without input, e.g. after a terminal resize.
    let mut tick = interval(Duration::from_millis(50));

    loop {
        terminal.draw(|f| screen.render(f))?;

        tokio::select! {
            ev = events.next() => {
                match ev {
                    Some(Ok(TermEvent::Key(key))) => match screen.handle_key(key) {
                        Flow::Continue => {}
                        Flow::Quit => return Ok(Outcome::Quit),
                        Flow::Started(number) => return Ok(Outcome::Started(number)),
                    },
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err).context("reading terminal events"),
                    // The input stream closed; there is nobody left to play.
                    None => return Ok(Outcome::Quit),
                }
            }
            _ = tick.tick() => {}
        }
    }
}

/// Run the interactive start screen.
///
/// `on_start_game` is invoked once with the chosen number when the player
/// presses "START GAME". Returns how the screen ended, or an error on
/// terminal I/O failures. The terminal is restored in every case.
pub async fn run_start_screen<F: FnOnce(u32)>(theme: Theme, on_start_game: F) -> Result<Outcome> {
    enable_raw_mode().context("enabling raw mode")?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    let mut terminal = ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(
        std::io::stdout(),
    ))?;

    info!(theme = ?theme.mode, "start screen opened");
    let mut screen = StartScreen::new(theme, on_start_game);
    let outcome = event_loop(&mut terminal, &mut screen).await;
    debug!(state = ?screen.state(), "final screen state");

    // Restore before looking at `outcome`, so an error still leaves a usable
    // terminal behind.
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let outcome = outcome?;
    info!(?outcome, "start screen closed");
    Ok(outcome)
}

// ── Tests ────────────────────────────────────────────────────────────────────
