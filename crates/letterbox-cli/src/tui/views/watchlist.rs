use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{Row, StatefulWidget, Table, TableState, Widget},
};

use super::{
    RenderContext, render_error, render_export, render_help, render_input, render_loading,
    screen_chrome,
};
use crate::tui::format::year;
use crate::tui::screens::WatchlistScreen;
use crate::tui::screens::watchlist::WatchlistPhase;

pub struct WatchlistView<'a> {
    screen: &'a WatchlistScreen,
    ctx: &'a RenderContext<'a>,
}

impl<'a> WatchlistView<'a> {
    pub fn new(screen: &'a WatchlistScreen, ctx: &'a RenderContext<'a>) -> Self {
        Self { screen, ctx }
    }
}

impl Widget for WatchlistView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let (body, footer) = screen_chrome(area, buf, "watchlist", theme);
        let username = self.screen.input().value();

        match self.screen.phase() {
            WatchlistPhase::Input => {
                render_input(body, buf, "username:", self.screen.input(), theme);
                render_help(footer, buf, &[("enter", "load watchlist"), ("esc", "menu")], theme);
            }
            WatchlistPhase::Loading { .. } => {
                render_loading(
                    body,
                    buf,
                    &format!("Fetching watchlist for '{}'...", username),
                    self.ctx,
                );
                render_help(footer, buf, &[("esc", "menu"), ("q", "quit")], theme);
            }
            WatchlistPhase::Results { movies, selected } => {
                let [title_area, table_area, export_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .areas(body);

                Span::styled(
                    format!("{}'s watchlist ({} films)", username, movies.len()),
                    theme.title,
                )
                .render(title_area, buf);

                let rows = movies.iter().map(|m| {
                    Row::new(vec![m.title.clone(), year(m.year), m.director.clone()])
                });
                let table = Table::new(
                    rows,
                    [
                        Constraint::Percentage(55),
                        Constraint::Length(6),
                        Constraint::Fill(1),
                    ],
                )
                .header(Row::new(vec!["Title", "Year", "Director"]).style(theme.header))
                .row_highlight_style(theme.selected);
                let mut state = TableState::default().with_selected(Some(*selected));
                StatefulWidget::render(table, table_area, buf, &mut state);

                render_export(export_area, buf, self.screen.export(), self.ctx);
                if self.screen.export().is_prompting() {
                    render_help(footer, buf, &[("enter", "save"), ("esc", "cancel")], theme);
                } else {
                    render_help(
                        footer,
                        buf,
                        &[("↑/↓", "move"), ("e", "export CSV"), ("esc", "back"), ("q", "quit")],
                        theme,
                    );
                }
            }
            WatchlistPhase::Error { message } => {
                render_error(body, buf, message, theme);
                render_help(footer, buf, &[("esc", "back"), ("q", "quit")], theme);
            }
        }
    }
}
