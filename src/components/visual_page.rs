use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::image_view::{ImageSlot, ImageView, ImageViewProps};
use super::result_view::{render_error, render_hint, render_loading, ResultView};
use super::{Component, Palette};
use crate::action::Action;
use crate::state::{PlotImage, Submission};

/// Generated plot for a city
#[derive(Default)]
pub struct VisualPage {
    image: ImageSlot,
}

pub struct VisualPageProps<'a> {
    pub visualization: &'a Submission<PlotImage>,
    pub spinner: &'a str,
    pub palette: Palette,
}

impl VisualPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the held plot when leaving the page
    pub fn leave(&mut self) {
        self.image.release();
    }

    pub fn image_key(&self) -> Option<&str> {
        self.image.key()
    }
}

impl Component<Action> for VisualPage {
    type Props<'a> = VisualPageProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        match ResultView::of(&props.visualization.result) {
            ResultView::Ready(plot) => {
                let chunks = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)])
                    .split(area);
                frame.render_widget(
                    Paragraph::new(
                        Line::from(Span::styled("Weather Visualization", palette.label()))
                            .centered(),
                    ),
                    chunks[0],
                );
                let key = format!("visualization-{}", props.visualization.request_id);
                let image = self.image.acquire(&key, Some(plot.payload.as_str()));
                ImageView.render(
                    frame,
                    chunks[1],
                    ImageViewProps {
                        image,
                        background: palette.bg,
                    },
                );
            }
            ResultView::Error(message) => {
                self.image.release();
                render_error(frame, area, message, &palette);
            }
            ResultView::Loading => {
                self.image.release();
                render_loading(frame, area, props.spinner, &palette);
            }
            ResultView::Empty => {
                self.image.release();
                render_hint(frame, area, "enter a city name", &palette);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Theme;
    use tui_dispatch::testing::RenderHarness;
    use tui_dispatch::DataResource;

    fn render(page: &mut VisualPage, visualization: &Submission<PlotImage>) -> String {
        let mut render = RenderHarness::new(40, 12);
        render.render_to_string_plain(|frame| {
            page.render(
                frame,
                frame.area(),
                VisualPageProps {
                    visualization,
                    spinner: "|",
                    palette: Palette::for_theme(Theme::Dark),
                },
            );
        })
    }

    #[test]
    fn test_new_result_replaces_held_image() {
        let mut page = VisualPage::new();
        let mut cycle = Submission {
            query: "Paris".into(),
            result: DataResource::Loaded(PlotImage {
                payload: "broken".into(),
            }),
            request_id: 1,
        };
        render(&mut page, &cycle);
        assert_eq!(page.image_key(), Some("visualization-1"));

        cycle.request_id = 2;
        render(&mut page, &cycle);
        assert_eq!(page.image_key(), Some("visualization-2"));

        cycle.result = DataResource::Loading;
        let output = render(&mut page, &cycle);
        assert_eq!(page.image_key(), None);
        assert!(output.contains("Loading..."));
    }

    #[test]
    fn test_leave_releases_image() {
        let mut page = VisualPage::new();
        let cycle = Submission {
            query: "Paris".into(),
            result: DataResource::Loaded(PlotImage {
                payload: "broken".into(),
            }),
            request_id: 7,
        };
        render(&mut page, &cycle);
        page.leave();
        assert_eq!(page.image_key(), None);
    }
}
