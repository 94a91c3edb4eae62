//! Shared rendering for a query page's outcome area

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::DataResource;

use super::Palette;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Which of the mutually exclusive outcomes to draw
pub enum ResultView<'a, T> {
    Error(&'a str),
    Ready(&'a T),
    Loading,
    Empty,
}

impl<'a, T> ResultView<'a, T> {
    pub fn of(resource: &'a DataResource<T>) -> Self {
        match resource {
            DataResource::Failed(error) => ResultView::Error(error),
            DataResource::Loaded(data) => ResultView::Ready(data),
            DataResource::Loading => ResultView::Loading,
            DataResource::Empty => ResultView::Empty,
        }
    }
}

/// `23.5, 24, 19` in source order
pub fn join_series(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_error(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon + "Error"
        Constraint::Min(1),    // message
    ])
    .flex(Flex::Start)
    .split(area);

    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::raw(format!("{ERROR_ICON} ")),
                Span::styled("Error", palette.error()),
            ])
            .centered(),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(message.to_string(), palette.text())).centered())
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

pub fn render_loading(frame: &mut Frame, area: Rect, spinner: &str, palette: &Palette) {
    let line = Line::from(vec![
        Span::styled(format!("{spinner} "), palette.label()),
        Span::styled("Loading...", palette.dim()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), area);
}

/// "Press e to <action>" shown before the first submission
pub fn render_hint(frame: &mut Frame, area: Rect, action: &str, palette: &Palette) {
    let hint = Line::from(vec![
        Span::styled("Press ", palette.dim()),
        Span::styled("e", palette.label()),
        Span::styled(format!(" to {action}"), palette.dim()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), area);
}
