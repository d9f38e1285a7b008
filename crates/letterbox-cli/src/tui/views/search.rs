use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{Row, StatefulWidget, Table, TableState, Widget},
};

use super::movie::MovieDetailsView;
use super::{RenderContext, render_error, render_help, render_input, render_loading, screen_chrome};
use crate::tui::format::year;
use crate::tui::screens::SearchScreen;
use crate::tui::screens::search::SearchPhase;

pub struct SearchView<'a> {
    screen: &'a SearchScreen,
    ctx: &'a RenderContext<'a>,
}

impl<'a> SearchView<'a> {
    pub fn new(screen: &'a SearchScreen, ctx: &'a RenderContext<'a>) -> Self {
        Self { screen, ctx }
    }
}

impl Widget for SearchView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let (body, footer) = screen_chrome(area, buf, "search movie", theme);
        let query = self.screen.input().value();

        match self.screen.phase() {
            SearchPhase::Input => {
                render_input(body, buf, "query:", self.screen.input(), theme);
                render_help(footer, buf, &[("enter", "search"), ("esc", "menu")], theme);
            }
            SearchPhase::Loading { .. } => {
                render_loading(body, buf, &format!("Searching for '{}'...", query), self.ctx);
                render_help(footer, buf, &[("esc", "menu"), ("q", "quit")], theme);
            }
            SearchPhase::Results { movies, selected } => {
                let [count_area, table_area] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(body);
                Span::styled(
                    format!("{} results for '{}'", movies.len(), query),
                    theme.muted,
                )
                .render(count_area, buf);

                let rows = movies.iter().enumerate().map(|(i, m)| {
                    Row::new(vec![
                        (i + 1).to_string(),
                        m.title.clone(),
                        year(m.year),
                        m.director.clone(),
                    ])
                });
                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(4),
                        Constraint::Percentage(50),
                        Constraint::Length(6),
                        Constraint::Fill(1),
                    ],
                )
                .header(Row::new(vec!["No", "Title", "Year", "Director"]).style(theme.header))
                .row_highlight_style(theme.selected);
                let mut state = TableState::default().with_selected(Some(*selected));
                StatefulWidget::render(table, table_area, buf, &mut state);

                render_help(
                    footer,
                    buf,
                    &[("↑/↓", "move"), ("enter", "details"), ("esc", "back"), ("q", "quit")],
                    theme,
                );
            }
            SearchPhase::LoadingDetails {
                movies, selected, ..
            } => {
                let title = movies.get(*selected).map(|m| m.title.as_str()).unwrap_or("");
                render_loading(body, buf, &format!("Loading details for {}...", title), self.ctx);
                render_help(footer, buf, &[("q", "quit")], theme);
            }
            SearchPhase::Details {
                details,
                tab,
                similar,
                ..
            } => {
                MovieDetailsView::new(details, *tab, similar, theme).render(body, buf);
                render_help(
                    footer,
                    buf,
                    &[("tab", "switch tab"), ("←/→", "tab / page"), ("esc", "back"), ("q", "quit")],
                    theme,
                );
            }
            SearchPhase::Error { message } => {
                render_error(body, buf, message, theme);
                render_help(footer, buf, &[("esc", "back"), ("q", "quit")], theme);
            }
        }
    }
}
