//! Centralized color theme for the start screen.
//!
//! Defines a `Theme` struct with named color slots for every role the screen
//! draws: the two button colors (`primary` for Reset, `accent` for Confirm),
//! card borders, the number badge, and the alert. Two palettes are provided —
//! dark (default) and light — and Ctrl+T switches between them at runtime.

use ratatui::style::Color;
use serde::Deserialize;

/// Which palette is currently active.
///
/// Also the value of the `theme` key in the config file and of `--theme` on
/// the command line, hence the serde and clap derives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// A complete color palette.
///
/// Every color used by the UI is looked up here, so swapping palettes at
/// runtime is a single assignment.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,

    // ── Brand colors ─────────────────────────────────────────────────────
    /// Reset button.
    pub primary: Color,
    /// Confirm and Start Game buttons, underline of the active field.
    pub accent: Color,
    /// Text drawn on top of a `primary`/`accent` background.
    pub on_button: Color,

    // ── Surfaces / borders ───────────────────────────────────────────────
    pub bg: Color,
    pub border: Color,
    pub title: Color,

    // ── Text ─────────────────────────────────────────────────────────────
    pub text: Color,

    // ── Number badge ─────────────────────────────────────────────────────
    pub badge: Color,
    pub badge_border: Color,

    // ── Status / hints ───────────────────────────────────────────────────
    pub error: Color,
    pub hint_key: Color,
    pub hint_text: Color,

    // ── Input ────────────────────────────────────────────────────────────
    pub input_underline: Color,
}

impl Theme {
    /// Build the palette for `mode`.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Dark theme — near-black background, magenta primary, amber accent.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,

            primary: Color::Rgb(230, 70, 150),
            accent: Color::Rgb(255, 195, 0),
            on_button: Color::Rgb(20, 15, 30),

            bg: Color::Rgb(25, 20, 35),
            border: Color::Rgb(100, 80, 140),
            title: Color::Rgb(220, 220, 220),

            text: Color::Rgb(220, 220, 220),

            badge: Color::Rgb(255, 195, 0),
            badge_border: Color::Rgb(255, 195, 0),

            error: Color::Rgb(255, 100, 100),
            hint_key: Color::Rgb(140, 200, 140),
            hint_text: Color::Rgb(120, 115, 130),

            input_underline: Color::Rgb(120, 115, 130),
        }
    }

    /// Light theme — off-white background, deeper primary and accent.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,

            primary: Color::Rgb(196, 0, 100),
            accent: Color::Rgb(200, 130, 0),
            on_button: Color::Rgb(255, 255, 255),

            bg: Color::Rgb(240, 236, 245),
            border: Color::Rgb(180, 160, 200),
            title: Color::Rgb(50, 50, 60),

            text: Color::Rgb(50, 50, 60),

            badge: Color::Rgb(200, 130, 0),
            badge_border: Color::Rgb(200, 130, 0),

            error: Color::Rgb(200, 40, 40),
            hint_key: Color::Rgb(30, 140, 30),
            hint_text: Color::Rgb(140, 130, 150),

            input_underline: Color::Rgb(140, 130, 150),
        }
    }

    /// Toggle between dark and light palettes.
    pub fn toggle(&mut self) {
        *self = match self.mode {
            ThemeMode::Dark => Self::light(),
            ThemeMode::Light => Self::dark(),
        };
    }
}
