//! State machine for the "Start a New Game!" screen.
//!
//! The screen's data is an immutable `StartState` record. Every user action is
//! a `StartEvent`, and `reduce()` maps `(state, event)` to the next state. The
//! terminal loop in `screen.rs` owns the current record and swaps it for the
//! reducer's output after each event.
//!
//! There are two states:
//!
//! - **Editing** (`confirmed == false`): keystrokes update the buffer, Confirm
//!   either accepts the buffer or raises the invalid-number alert.
//! - **Confirmed** (`confirmed == true`, `selected` set): Reset returns to
//!   Editing, and "Start Game" hands the number to the parent.
//!
//! The alert is not drawn here. `reduce()` receives an `AlertPresenter` and
//! asks it to show an `Alert`, which carries the event to run once the player
//! dismisses it. That keeps this module free of any terminal code.

use tracing::{debug, info, warn};

use crate::number::{filter_digits, parse_choice};

// ── Alert capability ────────────────────────────────────────────────────────

/// A blocking message with a single action.
///
/// `on_dismiss` is the continuation: whoever presents the alert must feed it
/// back into `reduce()` when the player presses the action.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
    pub on_dismiss: StartEvent,
}

impl Alert {
    /// The alert shown when Confirm is pressed with an invalid buffer.
    pub fn invalid_number() -> Self {
        Self {
            title: "Invalid number!",
            message: "Number has to be 1 and 99",
            action: "Okay",
            on_dismiss: StartEvent::Reset,
        }
    }
}

/// Something that can put an `Alert` in front of the player.
///
/// Implemented by `alert::AlertModal` for the terminal, and by a recording
/// stub in the tests below.
pub trait AlertPresenter {
    fn present(&mut self, alert: Alert);
}

// ── State and events ────────────────────────────────────────────────────────

/// Everything the screen remembers between events.
///
/// `Default` gives the mount-time values: empty buffer, not confirmed, no
/// selected number, keyboard focused on the input.
#[derive(Debug, Clone, PartialEq)]
pub struct StartState {
    /// Digits the player is currently editing. Always ASCII `0`-`9`.
    pub input: String,
    /// `true` only after a successful Confirm since the last Reset.
    pub confirmed: bool,
    /// The accepted number. `Some` exactly when `confirmed` is `true`, and
    /// kept after `input` is cleared so the summary can show it.
    pub selected: Option<u32>,
    /// Whether the input field holds keyboard focus.
    pub keyboard: bool,
}

impl Default for StartState {
    fn default() -> Self {
        Self {
            input: String::new(),
            confirmed: false,
            selected: None,
            keyboard: true,
        }
    }
}

impl StartState {
    /// The "Start Game" press.
    ///
    /// Returns the number to hand to the parent, or `None` when nothing has
    /// been confirmed yet (the button isn't on screen in that case).
    pub fn start_game(&self) -> Option<u32> {
        if self.confirmed { self.selected } else { None }
    }
}

/// A discrete user action on the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum StartEvent {
    /// The text field now contains this raw text. It is filtered to digits
    /// before it is stored.
    InputChanged(String),
    /// The "Confirm" button.
    Confirm,
    /// The "Reset" button, and the alert's dismissal action.
    Reset,
    /// Tapping outside the field: release keyboard focus.
    DismissKeyboard,
    /// Tapping the field: take keyboard focus.
    FocusInput,
}

// ── Reducer ─────────────────────────────────────────────────────────────────

/// Compute the state that follows `event`.
///
/// Pure apart from `alerts`, which is only touched when Confirm rejects the
/// buffer. The old state is borrowed, never mutated.
pub fn reduce(state: &StartState, event: StartEvent, alerts: &mut impl AlertPresenter) -> StartState {
    match event {
        StartEvent::InputChanged(raw) => {
            let input = filter_digits(&raw);
            debug!(raw = %raw, input = %input, "input changed");
            StartState {
                input,
                keyboard: true,
                ..state.clone()
            }
        }
        StartEvent::Confirm => confirm(state, alerts),
        StartEvent::Reset => {
            debug!("input reset");
            StartState {
                input: String::new(),
                confirmed: false,
                selected: None,
                ..state.clone()
            }
        }
        StartEvent::DismissKeyboard => StartState {
            keyboard: false,
            ..state.clone()
        },
        StartEvent::FocusInput => StartState {
            keyboard: true,
            ..state.clone()
        },
    }
}

/// The Confirm transition.
///
/// The parsed number is bound to `chosen` before the new record is built, so
/// clearing `input` can never affect what ends up in `selected`.
fn confirm(state: &StartState, alerts: &mut impl AlertPresenter) -> StartState {
    let chosen = match parse_choice(&state.input) {
        Ok(n) => n,
        Err(err) => {
            warn!(input = %state.input, %err, "rejected number");
            alerts.present(Alert::invalid_number());
            // Nothing changes until the alert is dismissed and its
            // `Reset` continuation runs.
            return state.clone();
        }
    };

    info!(number = chosen, "number confirmed");
    StartState {
        input: String::new(),
        confirmed: true,
        selected: Some(chosen),
        keyboard: false,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects every alert instead of drawing it.
    #[derive(Default)]
    struct Recorder {
        shown: Vec<Alert>,
    }

    impl AlertPresenter for Recorder {
        fn present(&mut self, alert: Alert) {
            self.shown.push(alert);
        }
    }

    /// Run a sequence of events from the initial state.
    fn run(events: impl IntoIterator<Item = StartEvent>, alerts: &mut Recorder) -> StartState {
        events
            .into_iter()
            .fold(StartState::default(), |s, e| reduce(&s, e, alerts))
    }

    /// Dismiss the most recent alert by running its continuation.
    fn dismiss(state: &StartState, alerts: &mut Recorder) -> StartState {
        let alert = alerts.shown.last().cloned().expect("an alert was shown");
        reduce(state, alert.on_dismiss, alerts)
    }

    fn typed(text: &str) -> StartEvent {
        StartEvent::InputChanged(text.to_string())
    }

    #[test]
    fn initial_state_is_editing() {
        let state = StartState::default();
        assert!(state.input.is_empty());
        assert!(!state.confirmed);
        assert_eq!(state.selected, None);
        assert!(state.keyboard);
        assert_eq!(state.start_game(), None);
    }

    #[test]
    fn typing_filters_to_digits() {
        let mut alerts = Recorder::default();
        let state = run([typed("abc123")], &mut alerts);
        assert_eq!(state.input, "123");
        assert!(alerts.shown.is_empty());
    }

    #[test]
    fn confirm_five_then_start_game() {
        let mut alerts = Recorder::default();
        let state = run([typed("5")], &mut alerts);
        assert_eq!(state.input, "5");

        let state = reduce(&state, StartEvent::Confirm, &mut alerts);
        assert!(state.confirmed);
        assert_eq!(state.selected, Some(5));
        assert_eq!(state.input, "");
        assert!(!state.keyboard);
        assert_eq!(state.start_game(), Some(5));
        assert!(alerts.shown.is_empty());
    }

    #[test]
    fn every_valid_number_confirms() {
        for n in 1..=99u32 {
            let mut alerts = Recorder::default();
            let state = run([typed(&n.to_string()), StartEvent::Confirm], &mut alerts);
            assert!(state.confirmed, "{n} should confirm");
            assert_eq!(state.selected, Some(n));
            assert!(state.input.is_empty());
        }
    }

    #[test]
    fn out_of_range_shows_alert_then_resets() {
        for text in ["", "0", "100", "123", "abc123", "999999"] {
            let mut alerts = Recorder::default();
            let state = run([typed(text), StartEvent::Confirm], &mut alerts);
            assert_eq!(alerts.shown, vec![Alert::invalid_number()], "input {text:?}");
            // Still editing while the alert is up.
            assert!(!state.confirmed);

            let state = dismiss(&state, &mut alerts);
            assert_eq!(state.input, "");
            assert!(!state.confirmed);
            assert_eq!(state.selected, None);
        }
    }

    #[test]
    fn invalid_number_alert_texts() {
        let alert = Alert::invalid_number();
        assert_eq!(alert.title, "Invalid number!");
        assert_eq!(alert.message, "Number has to be 1 and 99");
        assert_eq!(alert.action, "Okay");
        assert_eq!(alert.on_dismiss, StartEvent::Reset);
    }

    #[test]
    fn reset_from_confirmed_returns_to_editing() {
        let mut alerts = Recorder::default();
        let state = run([typed("42"), StartEvent::Confirm, StartEvent::Reset], &mut alerts);
        assert_eq!(state.input, "");
        assert!(!state.confirmed);
        assert_eq!(state.selected, None);
        assert_eq!(state.start_game(), None);
    }

    #[test]
    fn reset_is_idempotent_from_any_state() {
        let mut alerts = Recorder::default();
        let starts = [
            StartState::default(),
            run([typed("7")], &mut alerts),
            run([typed("7"), StartEvent::Confirm], &mut alerts),
            run([typed("7"), StartEvent::Confirm, typed("88")], &mut alerts),
        ];
        for start in starts {
            let once = reduce(&start, StartEvent::Reset, &mut alerts);
            let twice = reduce(&once, StartEvent::Reset, &mut alerts);
            assert_eq!(once, twice);
            assert_eq!(once.input, "");
            assert!(!once.confirmed);
        }
    }

    #[test]
    fn typing_after_confirm_keeps_selection() {
        // The summary stays up while the player edits; a new Confirm replaces it.
        let mut alerts = Recorder::default();
        let state = run([typed("12"), StartEvent::Confirm, typed("34")], &mut alerts);
        assert!(state.confirmed);
        assert_eq!(state.selected, Some(12));
        assert_eq!(state.input, "34");

        let state = reduce(&state, StartEvent::Confirm, &mut alerts);
        assert_eq!(state.selected, Some(34));
    }

    #[test]
    fn keyboard_focus_follows_events() {
        let mut alerts = Recorder::default();
        let state = run([StartEvent::DismissKeyboard], &mut alerts);
        assert!(!state.keyboard);
        let state = reduce(&state, StartEvent::FocusInput, &mut alerts);
        assert!(state.keyboard);
        let state = reduce(&state, StartEvent::DismissKeyboard, &mut alerts);
        let state = reduce(&state, typed("3"), &mut alerts);
        assert!(state.keyboard);
    }

    #[test]
    fn reduce_does_not_mutate_previous_state() {
        let mut alerts = Recorder::default();
        let before = run([typed("9")], &mut alerts);
        let snapshot = before.clone();
        let _after = reduce(&before, StartEvent::Confirm, &mut alerts);
        assert_eq!(before, snapshot);
    }
}
