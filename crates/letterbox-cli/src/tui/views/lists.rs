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
use crate::tui::screens::ListsScreen;
use crate::tui::screens::lists::ListsPhase;

pub struct ListsView<'a> {
    screen: &'a ListsScreen,
    ctx: &'a RenderContext<'a>,
}

impl<'a> ListsView<'a> {
    pub fn new(screen: &'a ListsScreen, ctx: &'a RenderContext<'a>) -> Self {
        Self { screen, ctx }
    }
}

impl Widget for ListsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let (body, footer) = screen_chrome(area, buf, "view lists", theme);
        let query = self.screen.input().value();

        match self.screen.phase() {
            ListsPhase::Input => {
                render_input(body, buf, "list query:", self.screen.input(), theme);
                render_help(footer, buf, &[("enter", "search"), ("esc", "menu")], theme);
            }
            ListsPhase::Loading { .. } => {
                render_loading(body, buf, &format!("Searching lists for '{}'...", query), self.ctx);
                render_help(footer, buf, &[("esc", "menu"), ("q", "quit")], theme);
            }
            ListsPhase::Results { lists, selected } => {
                let rows = lists
                    .iter()
                    .map(|l| Row::new(vec![l.name.clone(), l.owner.clone()]));
                let table = Table::new(rows, [Constraint::Percentage(65), Constraint::Fill(1)])
                    .header(Row::new(vec!["List Name", "Owner"]).style(theme.header))
                    .row_highlight_style(theme.selected);
                let mut state = TableState::default().with_selected(Some(*selected));
                StatefulWidget::render(table, body, buf, &mut state);

                render_help(
                    footer,
                    buf,
                    &[("↑/↓", "move"), ("enter", "open list"), ("esc", "back"), ("q", "quit")],
                    theme,
                );
            }
            ListsPhase::LoadingDetails { .. } => {
                let name = self
                    .screen
                    .current_list()
                    .map(|l| l.name.as_str())
                    .unwrap_or_default();
                render_loading(body, buf, &format!("Loading '{}'...", name), self.ctx);
                render_help(footer, buf, &[("q", "quit")], theme);
            }
            ListsPhase::Details {
                movies,
                movie_selected,
                ..
            } => {
                let [title_area, table_area, export_area] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .areas(body);

                if let Some(list) = self.screen.current_list() {
                    Span::styled(
                        format!("{} by {} ({} films)", list.name, list.owner, movies.len()),
                        theme.title,
                    )
                    .render(title_area, buf);
                }

                let rows = movies
                    .iter()
                    .map(|m| Row::new(vec![m.title.clone(), year(m.year)]));
                let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(6)])
                    .header(Row::new(vec!["Title", "Year"]).style(theme.header))
                    .row_highlight_style(theme.selected);
                let mut state = TableState::default().with_selected(Some(*movie_selected));
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
            ListsPhase::Error { message } => {
                render_error(body, buf, message, theme);
                render_help(footer, buf, &[("esc", "back"), ("q", "quit")], theme);
            }
        }
    }
}
