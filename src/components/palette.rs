use ratatui::style::{Color, Modifier, Style};

use crate::state::Theme;

/// Colours every component draws with. Built from the active [`Theme`] and
/// handed down through props.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub error: Color,
    pub selection_bg: Color,
    /// RGB endpoints of the title gradient
    pub title_gradient: [(u8, u8, u8); 2],
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(17, 24, 39),
                surface: Color::Rgb(30, 41, 82),
                text: Color::Rgb(229, 231, 235),
                dim: Color::Rgb(148, 163, 184),
                accent: Color::Rgb(96, 165, 250),
                accent_alt: Color::Rgb(192, 132, 252),
                border: Color::Rgb(59, 89, 152),
                error: Color::Rgb(248, 113, 113),
                selection_bg: Color::Rgb(49, 46, 129),
                title_gradient: [(96, 165, 250), (192, 132, 252)],
            },
            Theme::Light => Self {
                bg: Color::Rgb(239, 246, 255),
                surface: Color::Rgb(219, 234, 254),
                text: Color::Rgb(31, 41, 55),
                dim: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(37, 99, 235),
                accent_alt: Color::Rgb(126, 34, 206),
                border: Color::Rgb(147, 197, 253),
                error: Color::Rgb(185, 28, 28),
                selection_bg: Color::Rgb(191, 219, 254),
                title_gradient: [(37, 99, 235), (126, 34, 206)],
            },
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn heading(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label(&self) -> Style {
        Style::default()
            .fg(self.accent_alt)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }
}
