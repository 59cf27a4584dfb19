//! Theme and styling definitions for the frontdesk TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(130, 170, 255);

    // Author colors
    pub const USER: Color = Color::Rgb(240, 200, 100);
    pub const ASSISTANT: Color = Color::Rgb(130, 220, 130);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(45, 45, 60);
    pub const STATUS_KEY_BG: Color = Color::Rgb(70, 90, 140);

    pub const WARNING: Color = Color::Rgb(240, 200, 100);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(130, 170, 255);
}

/// Indicator symbols.
pub struct Symbols;

impl Symbols {
    /// Typing indicator frames, advanced once per tick.
    pub const TYPING: [&'static str; 4] = ["   ", ".  ", ".. ", "..."];
    /// Cursor block in the input bar.
    pub const CURSOR: &'static str = "█";
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Author label of a user message.
    pub fn user_label() -> Style {
        Style::default()
            .fg(Palette::USER)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Author label of an assistant message.
    pub fn assistant_label() -> Style {
        Style::default()
            .fg(Palette::ASSISTANT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Suggested action chip.
    pub fn chip() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::STATUS_BG)
    }

    /// Suggested action chip that is selected.
    pub fn chip_selected() -> Style {
        Style::default()
            .fg(Palette::BG)
            .bg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Follow-up hint.
    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::BG)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Typing indicator frame for a given tick.
pub fn typing_frame(tick: usize) -> &'static str {
    Symbols::TYPING[tick % Symbols::TYPING.len()]
}
