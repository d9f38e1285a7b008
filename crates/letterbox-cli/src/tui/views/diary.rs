use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table, Widget},
};

use super::{
    RenderContext, page_dots, render_error, render_export, render_help, render_input,
    render_loading, screen_chrome,
};
use crate::tui::format::{stars, year};
use crate::tui::screens::DiaryScreen;
use crate::tui::screens::diary::DiaryPhase;

pub struct DiaryView<'a> {
    screen: &'a DiaryScreen,
    ctx: &'a RenderContext<'a>,
}

impl<'a> DiaryView<'a> {
    pub fn new(screen: &'a DiaryScreen, ctx: &'a RenderContext<'a>) -> Self {
        Self { screen, ctx }
    }
}

impl Widget for DiaryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let (body, footer) = screen_chrome(area, buf, "diary", theme);
        let username = self.screen.input().value();

        match self.screen.phase() {
            DiaryPhase::Input => {
                render_input(body, buf, "username:", self.screen.input(), theme);
                render_help(footer, buf, &[("enter", "load diary"), ("esc", "menu")], theme);
            }
            DiaryPhase::Loading { .. } => {
                render_loading(body, buf, &format!("Fetching diary for '{}'...", username), self.ctx);
                render_help(footer, buf, &[("esc", "menu"), ("q", "quit")], theme);
            }
            DiaryPhase::Results { entries, pager } => {
                let [title_area, table_area, pages_area, export_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(body);

                Span::styled(
                    format!("{}'s diary ({} entries)", username, entries.len()),
                    theme.title,
                )
                .render(title_area, buf);

                let rows = pager.slice(entries).iter().map(|e| {
                    Row::new(vec![
                        Cell::from(e.watch_date.clone()),
                        Cell::from(e.title.clone()),
                        Cell::from(year(e.year)),
                        Cell::from(Span::styled(stars(e.rating), theme.star)),
                        Cell::from(if e.rewatch { "✔" } else { "" }),
                    ])
                });
                Table::new(
                    rows,
                    [
                        Constraint::Length(12),
                        Constraint::Fill(1),
                        Constraint::Length(6),
                        Constraint::Length(7),
                        Constraint::Length(7),
                    ],
                )
                .header(
                    Row::new(vec!["WatchDate", "Title", "Year", "Rating", "Rewatch"])
                        .style(theme.header),
                )
                .render(table_area, buf);

                Paragraph::new(page_dots(pager, theme)).render(pages_area, buf);
                render_export(export_area, buf, self.screen.export(), self.ctx);

                if self.screen.export().is_prompting() {
                    render_help(footer, buf, &[("enter", "save"), ("esc", "cancel")], theme);
                } else {
                    render_help(
                        footer,
                        buf,
                        &[("←/→ h/l", "page"), ("e", "export CSV"), ("esc", "back"), ("q", "quit")],
                        theme,
                    );
                }
            }
            DiaryPhase::Error { message } => {
                render_error(body, buf, message, theme);
                render_help(footer, buf, &[("esc", "back"), ("q", "quit")], theme);
            }
        }
    }
}
