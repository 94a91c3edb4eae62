use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::image_view::{ImageSlot, ImageView, ImageViewProps};
use super::{Component, Palette};
use crate::action::Action;
use crate::content::Story;
use crate::state::Thumbnail;

/// Story card with artwork. Artwork that failed to download shows the placeholder.
#[derive(Default)]
pub struct NewsBanner {
    artwork: ImageSlot,
}

pub struct NewsBannerProps<'a> {
    pub story: &'a Story,
    pub thumbnail: Option<&'a Thumbnail>,
    pub palette: Palette,
}

impl NewsBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&mut self) {
        self.artwork.release();
    }

    pub fn is_showing_placeholder(&self) -> bool {
        self.artwork.is_placeholder()
    }
}

impl Component<Action> for NewsBanner {
    type Props<'a> = NewsBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let NewsBannerProps {
            story,
            thumbnail,
            palette,
        } = props;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border(false))
            .style(Style::default().bg(palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Artwork
            Constraint::Length(1), // Title
            Constraint::Length(2), // Description
            Constraint::Length(1), // Read more
        ])
        .split(inner);

        match thumbnail {
            Some(Thumbnail::Ready(payload)) => {
                let image = self.artwork.acquire(story.image_url, Some(payload.as_str()));
                ImageView.render(
                    frame,
                    chunks[0],
                    ImageViewProps {
                        image,
                        background: palette.surface,
                    },
                );
            }
            Some(Thumbnail::Failed) => {
                let key = format!("{}#placeholder", story.image_url);
                let image = self.artwork.acquire(&key, None);
                ImageView.render(
                    frame,
                    chunks[0],
                    ImageViewProps {
                        image,
                        background: palette.surface,
                    },
                );
            }
            Some(Thumbnail::Loading) | None => {
                self.artwork.release();
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled("loading image...", palette.dim())))
                        .centered(),
                    chunks[0],
                );
            }
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(story.title, palette.heading()))),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(story.description, palette.dim()))
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Read more \u{203a}",
                Style::default().fg(palette.accent),
            ))),
            chunks[3],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NEWS;
    use crate::state::Theme;
    use tui_dispatch::testing::RenderHarness;

    fn render_with(banner: &mut NewsBanner, thumbnail: Option<&Thumbnail>) -> String {
        let mut render = RenderHarness::new(40, 14);
        render.render_to_string_plain(|frame| {
            banner.render(
                frame,
                frame.area(),
                NewsBannerProps {
                    story: &NEWS[0],
                    thumbnail,
                    palette: Palette::for_theme(Theme::Dark),
                },
            );
        })
    }

    #[test]
    fn test_failed_artwork_uses_placeholder() {
        let mut banner = NewsBanner::new();
        let output = render_with(&mut banner, Some(&Thumbnail::Failed));
        assert!(banner.is_showing_placeholder());
        assert!(output.contains("Quantum Weather Prediction"));
        assert!(output.contains("Read more"));
    }

    #[test]
    fn test_corrupt_artwork_uses_placeholder() {
        let mut banner = NewsBanner::new();
        render_with(&mut banner, Some(&Thumbnail::Ready("%%%".into())));
        assert!(banner.is_showing_placeholder());
    }

    #[test]
    fn test_loading_artwork_holds_nothing() {
        let mut banner = NewsBanner::new();
        render_with(&mut banner, Some(&Thumbnail::Failed));
        let output = render_with(&mut banner, Some(&Thumbnail::Loading));
        assert!(!banner.is_showing_placeholder());
        assert!(output.contains("loading image"));
    }
}
