use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::result_view::{render_error, render_hint, render_loading, ResultView};
use super::{Component, Palette};
use crate::action::Action;
use crate::state::Submission;

/// Rows reserved for the FIGlet value (terminus height)
const VALUE_HEIGHT: u16 = 6;

pub struct ExtremePage;

pub struct ExtremePageProps<'a> {
    pub extreme: &'a Submission<f64>,
    pub spinner: &'a str,
    pub palette: Palette,
}

/// Two decimals, as the backend's score is shown everywhere
pub fn format_prediction(value: f64) -> String {
    format!("{value:.2}")
}

/// Calm greens for low scores through to red for severe ones
fn severity_fill(value: f64) -> Fill {
    let (start, end) = match value {
        v if v < 0.25 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(150, 220, 200)),
        v if v < 0.5 => (ArtColor::rgb(255, 220, 100), ArtColor::rgb(255, 180, 80)),
        v if v < 0.75 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

impl Component<Action> for ExtremePage {
    type Props<'a> = ExtremePageProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        match ResultView::of(&props.extreme.result) {
            ResultView::Ready(&value) => {
                let text = format_prediction(value);
                let chunks = Layout::vertical([
                    Constraint::Length(1),         // Heading
                    Constraint::Length(1),         // Plain value
                    Constraint::Max(VALUE_HEIGHT), // FIGlet value
                ])
                .flex(Flex::Start)
                .split(area);

                frame.render_widget(
                    Paragraph::new(
                        Line::from(Span::styled(
                            "Prediction for Extreme Weather:",
                            palette.heading(),
                        ))
                        .centered(),
                    ),
                    chunks[0],
                );
                let plain = Line::from(Span::styled(text.clone(), palette.label())).centered();
                frame.render_widget(Paragraph::new(plain), chunks[1]);
                let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
                    .with_plain_fallback()
                    .with_alignment(ArtAlignment::Center)
                    .with_fill(severity_fill(value));
                frame.render_widget(ArtBox::new(&renderer, &text), chunks[2]);
            }
            ResultView::Error(message) => render_error(frame, area, message, &palette),
            ResultView::Loading => render_loading(frame, area, props.spinner, &palette),
            ResultView::Empty => render_hint(frame, area, "enter a location", &palette),
        }
    }
}
