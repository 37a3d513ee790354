//! Modal alert overlay.
//!
//! Presents a centered card with a title, a message and one action button,
//! drawn on top of the start screen with the same `Clear` pattern the screen
//! uses for its cards. While an alert is open it swallows every key, which is
//! what makes it blocking: the screen underneath sees nothing until the player
//! presses the action.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::start::{Alert, AlertPresenter, StartEvent};
use crate::theme::Theme;

// ── Types ────────────────────────────────────────────────────────────────────

/// The result of routing a key to the modal.
#[derive(Debug, PartialEq)]
pub enum AlertKey {
    /// No alert is open; the key belongs to the screen.
    NotOpen,
    /// An alert is open and the key was swallowed.
    Blocked,
    /// The player pressed the action. Run this continuation.
    Dismissed(StartEvent),
}

// ── AlertModal ───────────────────────────────────────────────────────────────

/// Holds the alert currently on screen, if any.
///
/// Only one alert can be open. Presenting a second one replaces the first;
/// the reducer never does that because a rejected Confirm is the only source.
#[derive(Debug, Default)]
pub struct AlertModal {
    open: Option<Alert>,
}

impl AlertPresenter for AlertModal {
    fn present(&mut self, alert: Alert) {
        self.open = Some(alert);
    }
}

impl AlertModal {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Route a key press to the modal.
    ///
    /// - Enter, Space or Esc → `Dismissed(on_dismiss)` and the modal closes
    /// - anything else while open → `Blocked`
    pub fn handle(&mut self, key: KeyEvent) -> AlertKey {
        if self.open.is_none() {
            return AlertKey::NotOpen;
        }
        if key.kind != KeyEventKind::Press {
            return AlertKey::Blocked;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Esc => {
                // `Option::take` moves the alert out and leaves `None` behind,
                // closing the modal and handing us ownership in one step.
                match self.open.take() {
                    Some(alert) => AlertKey::Dismissed(alert.on_dismiss),
                    None => AlertKey::NotOpen,
                }
            }
            _ => AlertKey::Blocked,
        }
    }

    /// Render the alert as a centered overlay, if one is open.
    pub fn render(&self, f: &mut ratatui::Frame, theme: &Theme) {
        let Some(alert) = &self.open else {
            return;
        };
        let area = f.area();

        // Centered card: 40 wide, 8 tall, clamped to the terminal.
        let card_w: u16 = 40.min(area.width);
        let card_h: u16 = 8.min(area.height);
        let x = area.width.saturating_sub(card_w) / 2;
        let y = area.height.saturating_sub(card_h) / 2;
        let card = Rect::new(x, y, card_w, card_h);

        f.render_widget(Clear, card);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(Span::styled(
                format!(" {} ", alert.title),
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(alert.message, Style::default().fg(theme.text))),
            Line::from(""),
            Line::from(Span::styled(
                format!(" {} ", alert.action.to_uppercase()),
                Style::default()
                    .fg(theme.on_button)
                    .bg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        let body = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(body, card);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn opened() -> AlertModal {
        let mut modal = AlertModal::default();
        modal.present(Alert::invalid_number());
        modal
    }

    #[test]
    fn closed_modal_passes_keys_through() {
        let mut modal = AlertModal::default();
        assert!(!modal.is_open());
        assert_eq!(modal.handle(key(KeyCode::Enter)), AlertKey::NotOpen);
    }

    #[test]
    fn open_modal_blocks_other_keys() {
        let mut modal = opened();
        assert_eq!(modal.handle(key(KeyCode::Char('5'))), AlertKey::Blocked);
        assert_eq!(modal.handle(key(KeyCode::Tab)), AlertKey::Blocked);
        assert!(modal.is_open());
    }

    #[test]
    fn action_keys_dismiss_with_reset() {
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Esc] {
            let mut modal = opened();
            assert_eq!(modal.handle(key(code)), AlertKey::Dismissed(StartEvent::Reset));
            assert!(!modal.is_open());
        }
    }

    #[test]
    fn render_shows_title_message_and_action() {
        let modal = opened();
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| modal.render(f, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Invalid number!"));
        assert!(text.contains("Number has to be 1 and 99"));
        assert!(text.contains("OKAY"));
    }

    #[test]
    fn render_when_closed_draws_nothing() {
        let modal = AlertModal::default();
        let theme = Theme::dark();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|f| modal.render(f, &theme)).unwrap();

        let buffer = terminal.backend().buffer();
        assert!(buffer.content().iter().all(|c| c.symbol() == " "));
    }
}
