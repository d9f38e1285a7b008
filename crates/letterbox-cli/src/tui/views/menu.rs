use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

use super::{RenderContext, centered, render_help, screen_chrome};
use crate::tui::effect::Feature;
use crate::tui::navigator::QuoteLine;
use crate::tui::screens::MenuScreen;

const LOGO: [&str; 3] = [
    "▌   ▗ ▗     ▌        ▌ ▘",
    "▌ █▌▜▘▜▘█▌▛▘▛▌▛▌▚▘▄▖▛▘▐ ▌",
    "▙▖▙▖▐▖▐▖▙▖▌ ▙▌▙▌▞▖  ▙▖▐▖▌",
];

const HELP_KEYS: [(&str, &str); 7] = [
    ("↑ / k", "Navigate Up"),
    ("↓ / j", "Navigate Down"),
    ("1-5", "Quick Select Item"),
    ("enter", "Confirm Selection"),
    ("?", "Toggle This Help Menu"),
    ("esc", "Close Help Menu / Go Back"),
    ("q / ctrl+c", "Quit"),
];

pub struct MenuView<'a> {
    screen: &'a MenuScreen,
    quote: &'a QuoteLine,
    ctx: &'a RenderContext<'a>,
}

impl<'a> MenuView<'a> {
    pub fn new(screen: &'a MenuScreen, quote: &'a QuoteLine, ctx: &'a RenderContext<'a>) -> Self {
        Self { screen, quote, ctx }
    }

    fn quote_lines(&self) -> Vec<Line<'a>> {
        let theme = self.ctx.theme;
        match self.quote {
            QuoteLine::Loading => vec![Line::from(Span::styled("Loading quote...", theme.muted))],
            QuoteLine::Loaded(quote) => vec![
                Line::from(Span::styled(format!("\"{}\"", quote.text), theme.text)),
                Line::from(Span::styled(format!("- {}", quote.source()), theme.muted))
                    .alignment(Alignment::Right),
            ],
            QuoteLine::Failed(reason) => vec![
                Line::from(Span::styled("Failed to load quote.", theme.muted)),
                Line::from(Span::styled(reason.as_str(), theme.muted)),
            ],
        }
    }

    fn render_help_overlay(&self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let popup = centered(area, 48, HELP_KEYS.len() as u16 + 6);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme.border)
            .title(Span::styled(" Help / Keybindings ", theme.title));
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = HELP_KEYS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{:<14}", key), theme.key),
                    Span::styled(*desc, theme.text),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "(Press '?' or 'esc' to close)",
            theme.muted,
        )));
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for MenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let (body, footer) = screen_chrome(area, buf, "letterbox", theme);

        let [logo_area, items_area, quote_area] = Layout::vertical([
            Constraint::Length(LOGO.len() as u16 + 2),
            Constraint::Length(Feature::ALL.len() as u16 + 2),
            Constraint::Min(2),
        ])
        .areas(body);

        let mut logo: Vec<Line> = LOGO
            .iter()
            .map(|l| Line::from(Span::styled(*l, theme.title)))
            .collect();
        logo.push(Line::from(Span::styled("Letterboxd in your terminal", theme.muted)));
        Paragraph::new(logo)
            .alignment(Alignment::Center)
            .render(logo_area, buf);

        let items: Vec<Line> = Feature::ALL
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                let label = format!("{}. {}", i + 1, feature.label());
                if i == self.screen.selected() {
                    Line::from(Span::styled(format!("> {}", label), theme.accent))
                } else {
                    Line::from(Span::styled(format!("  {}", label), theme.text))
                }
            })
            .collect();
        Paragraph::new(items).render(
            Rect {
                x: items_area.x + 2,
                width: items_area.width.saturating_sub(2),
                ..items_area
            },
            buf,
        );

        Paragraph::new(self.quote_lines())
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    x: quote_area.x + 2,
                    width: quote_area.width.saturating_sub(4),
                    ..quote_area
                },
                buf,
            );

        render_help(
            footer,
            buf,
            &[("↑/↓", "navigate"), ("enter", "select"), ("?", "help"), ("q", "quit")],
            theme,
        );

        if self.screen.showing_help() {
            self.render_help_overlay(area, buf);
        }
    }
}
