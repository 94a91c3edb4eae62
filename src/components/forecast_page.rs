use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::image_view::{ImageSlot, ImageView, ImageViewProps};
use super::result_view::{join_series, render_error, render_hint, render_loading, ResultView};
use super::{Component, Palette};
use crate::action::Action;
use crate::state::{ForecastReport, LocationHistory, Submission};

const HISTORY_WIDTH: u16 = 30;
/// Shown timestamps before collapsing to `first … last`
const TIMESTAMP_LIMIT: usize = 3;

/// Quantum forecaster results: numeric series, plot and location history
#[derive(Default)]
pub struct ForecastPage {
    plot: ImageSlot,
}

pub struct ForecastPageProps<'a> {
    pub forecast: &'a Submission<ForecastReport>,
    pub history: &'a LocationHistory,
    pub spinner: &'a str,
    pub palette: Palette,
}

impl ForecastPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the plot image when leaving the page
    pub fn leave(&mut self) {
        self.plot.release();
    }

    pub fn plot_key(&self) -> Option<&str> {
        self.plot.key()
    }

    pub fn plot_is_placeholder(&self) -> bool {
        self.plot.is_placeholder()
    }
}

fn timestamps_summary(timestamps: &[String]) -> String {
    match timestamps {
        [] => "none".to_string(),
        few if few.len() <= TIMESTAMP_LIMIT => few.join(", "),
        [first, .., last] => format!("{first} \u{2026} {last} ({} points)", timestamps.len()),
        _ => String::new(),
    }
}

/// Text lines for a successful forecast
pub fn report_lines(report: &ForecastReport, palette: &Palette) -> Vec<Line<'static>> {
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), palette.label()),
            Span::styled(value, palette.text()),
        ])
    };
    let series = &report.weather_data;
    vec![
        Line::from(Span::styled(report.location.address.clone(), palette.heading())),
        Line::from(Span::styled(
            format!("{:.4}, {:.4}", report.location.lat, report.location.lon),
            palette.dim(),
        )),
        Line::raw(""),
        field("Temperature", format!("{}°C", join_series(&series.temperature))),
        field("Humidity", format!("{}%", join_series(&series.humidity))),
        field(
            "Thunderstorm Chance",
            format!("{}%", join_series(&series.thunderstorm_chance)),
        ),
        field("Timestamps", timestamps_summary(&report.timestamps)),
    ]
}

fn history_lines(history: &LocationHistory, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(history.len() + 2);
    for (index, location) in history.entries.iter().enumerate() {
        let selected = index == history.selected;
        let style = if selected {
            Style::default()
                .fg(palette.text)
                .bg(palette.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            palette.text()
        };
        let marker = if selected { "\u{25b8} " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.accent)),
            Span::styled(location.address.clone(), style),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "\u{2191}\u{2193} select  \u{23ce} forecast",
        palette.dim(),
    )));
    lines
}

impl Component<Action> for ForecastPage {
    type Props<'a> = ForecastPageProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let (results_area, history_area) = if props.history.is_empty() {
            (area, None)
        } else {
            let columns =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(HISTORY_WIDTH)])
                    .split(area);
            (columns[0], Some(columns[1]))
        };

        if let Some(history_area) = history_area {
            let block = Block::default()
                .borders(Borders::LEFT)
                .border_style(palette.border(false))
                .title(Span::styled(" Previous Locations ", palette.heading()));
            let inner = block.inner(history_area);
            frame.render_widget(block, history_area);
            frame.render_widget(Paragraph::new(history_lines(props.history, &palette)), inner);
        }

        match ResultView::of(&props.forecast.result) {
            ResultView::Ready(report) => {
                let lines = report_lines(report, &palette);
                let chunks = Layout::vertical([
                    Constraint::Length(lines.len() as u16),
                    Constraint::Length(1), // Spacer
                    Constraint::Length(1), // Plot heading
                    Constraint::Fill(1),   // Plot
                ])
                .split(results_area);
                frame.render_widget(Paragraph::new(lines), chunks[0]);

                match report.plot_image.as_deref() {
                    Some(payload) => {
                        frame.render_widget(
                            Paragraph::new(Line::from(Span::styled(
                                "Weather Forecast Visualization",
                                palette.label(),
                            ))),
                            chunks[2],
                        );
                        let key = format!("forecast-{}", props.forecast.request_id);
                        let image = self.plot.acquire(&key, Some(payload));
                        ImageView.render(
                            frame,
                            chunks[3],
                            ImageViewProps {
                                image,
                                background: palette.bg,
                            },
                        );
                    }
                    None => self.plot.release(),
                }
            }
            ResultView::Error(message) => {
                self.plot.release();
                render_error(frame, results_area, message, &palette);
            }
            ResultView::Loading => {
                self.plot.release();
                render_loading(frame, results_area, props.spinner, &palette);
            }
            ResultView::Empty => {
                self.plot.release();
                render_hint(frame, results_area, "enter a location", &palette);
            }
        }
    }
}
