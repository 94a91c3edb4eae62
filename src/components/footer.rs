use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, Palette};
use crate::action::Action;
use crate::content::{FOOTER_COPYRIGHT, FOOTER_EMAIL, FOOTER_TEAM};

pub struct Footer;

pub struct FooterProps {
    pub palette: Palette,
}

impl Component<Action> for Footer {
    type Props<'a> = FooterProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let line = Line::from(vec![
            Span::styled(FOOTER_TEAM, palette.dim()),
            Span::styled("  \u{2022}  ", palette.dim()),
            Span::styled(FOOTER_EMAIL, Style::default().fg(palette.accent)),
            Span::styled("  \u{2022}  ", palette.dim()),
            Span::styled(FOOTER_COPYRIGHT, palette.dim()),
        ])
        .centered();
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(palette.surface)),
            area,
        );
    }
}
