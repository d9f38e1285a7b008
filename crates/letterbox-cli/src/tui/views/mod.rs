//! Ratatui widgets for each screen.
//!
//! Views borrow screen state and never mutate it. All colours come from one
//! [`Theme`] built at startup.

mod diary;
mod lists;
mod menu;
mod movie;
mod profile;
mod search;
mod watchlist;

pub use diary::DiaryView;
pub use lists::ListsView;
pub use menu::MenuView;
pub use profile::ProfileView;
pub use search::SearchView;
pub use watchlist::WatchlistView;

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Tabs, Widget, Wrap},
};

use super::navigator::{Navigator, ScreenState};
use super::widgets::{ExportFlow, Pager, TextInput};

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Style,
    pub title: Style,
    pub header: Style,
    pub selected: Style,
    pub text: Style,
    pub muted: Style,
    pub value: Style,
    pub star: Style,
    pub success: Style,
    pub error: Style,
    pub key: Style,
    pub tab: Style,
    pub tab_active: Style,
    pub border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        let green = Color::Rgb(0x00, 0xA8, 0x6B);
        let gold = Color::Rgb(0xFF, 0xD7, 0x00);
        let gray = Color::Indexed(242);
        Self {
            accent: Style::default().fg(green),
            title: Style::default().fg(green).add_modifier(Modifier::BOLD),
            header: Style::default()
                .fg(Color::Indexed(229))
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Indexed(229))
                .bg(Color::Indexed(57))
                .add_modifier(Modifier::BOLD),
            text: Style::default(),
            muted: Style::default().fg(gray),
            value: Style::default()
                .fg(Color::Indexed(229))
                .add_modifier(Modifier::BOLD),
            star: Style::default().fg(gold),
            success: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            key: Style::default().fg(Color::Yellow),
            tab: Style::default().fg(gray),
            tab_active: Style::default()
                .fg(green)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            border: Style::default().fg(Color::Indexed(39)),
        }
    }
}

/// Per-frame inputs shared by every view.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub now: Instant,
    pub tick: usize,
}

impl RenderContext<'_> {
    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()]
    }
}

/// Draw whichever screen is active.
pub fn draw(frame: &mut Frame, navigator: &Navigator, ctx: &RenderContext) {
    let area = frame.area();
    match navigator.screen() {
        ScreenState::Menu(screen) => {
            frame.render_widget(MenuView::new(screen, navigator.quote(), ctx), area)
        }
        ScreenState::Search(screen) => frame.render_widget(SearchView::new(screen, ctx), area),
        ScreenState::Diary(screen) => frame.render_widget(DiaryView::new(screen, ctx), area),
        ScreenState::Watchlist(screen) => {
            frame.render_widget(WatchlistView::new(screen, ctx), area)
        }
        ScreenState::Lists(screen) => frame.render_widget(ListsView::new(screen, ctx), area),
        ScreenState::Profile(screen) => frame.render_widget(ProfileView::new(screen, ctx), area),
    }
}

/// Outer frame with a title; returns the body and footer areas.
pub(crate) fn screen_chrome(area: Rect, buf: &mut Buffer, title: &str, theme: &Theme) -> (Rect, Rect) {
    let [main, footer] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.border)
        .title(Span::styled(format!(" {} ", title), theme.title));
    let body = block.inner(main);
    block.render(main, buf);
    (body, footer)
}

/// `label` on one line, the field with a block cursor below it.
pub(crate) fn render_input(
    area: Rect,
    buf: &mut Buffer,
    label: &str,
    input: &TextInput,
    theme: &Theme,
) {
    let mut field = Vec::new();
    if input.is_empty() {
        field.push(Span::styled(" ", theme.text.add_modifier(Modifier::REVERSED)));
        field.push(Span::styled(input.placeholder(), theme.muted));
    } else {
        let (before, after) = input.split_at_cursor();
        let mut rest = after.chars();
        let under_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        field.push(Span::styled(before, theme.text));
        field.push(Span::styled(
            under_cursor,
            theme.text.add_modifier(Modifier::REVERSED),
        ));
        field.push(Span::styled(rest.collect::<String>(), theme.text));
    }

    let width = area.width.saturating_sub(2).min(40) as usize;
    let lines = vec![
        Line::from(Span::styled(label, theme.muted)),
        Line::from(field),
        Line::from(Span::styled("─".repeat(width), theme.border)),
    ];
    Paragraph::new(lines).render(area, buf);
}

pub(crate) fn render_loading(area: Rect, buf: &mut Buffer, message: &str, ctx: &RenderContext) {
    let line = Line::from(vec![
        Span::styled(ctx.spinner(), ctx.theme.accent),
        Span::raw(" "),
        Span::styled(message, ctx.theme.text),
    ]);
    Paragraph::new(vec![Line::default(), line]).render(area, buf);
}

pub(crate) fn render_error(area: Rect, buf: &mut Buffer, message: &str, theme: &Theme) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled("Error", theme.error)),
        Line::default(),
        Line::from(Span::styled(message, theme.text)),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

/// Footer line of `[key] description` pairs.
pub(crate) fn render_help(area: Rect, buf: &mut Buffer, keys: &[(&str, &str)], theme: &Theme) {
    let mut spans = Vec::new();
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("[{}]", key), theme.key));
        spans.push(Span::styled(format!(" {}", desc), theme.muted));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);
}

pub(crate) fn render_tabs(area: Rect, buf: &mut Buffer, titles: &[&str], active: usize, theme: &Theme) {
    Tabs::new(titles.iter().map(|t| format!("→ {}", t)))
        .select(active)
        .style(theme.tab)
        .highlight_style(theme.tab_active)
        .divider(" ")
        .render(area, buf);
}

/// Export prompt, in-flight notice or recent result; nothing otherwise.
pub(crate) fn render_export(area: Rect, buf: &mut Buffer, flow: &ExportFlow, ctx: &RenderContext) {
    let theme = ctx.theme;
    let line = if let Some(prompt) = flow.prompt() {
        let (before, after) = prompt.split_at_cursor();
        Line::from(vec![
            Span::styled("Export to: ", theme.key),
            Span::styled(before, theme.text),
            Span::styled("▏", theme.accent),
            Span::styled(after, theme.text),
            Span::styled("  (enter to save, esc to cancel)", theme.muted),
        ])
    } else if flow.is_pending() {
        Line::from(vec![
            Span::styled(ctx.spinner(), theme.accent),
            Span::styled(" Exporting...", theme.muted),
        ])
    } else if let Some(status) = flow.visible_status(ctx.now) {
        let style = if status.success { theme.success } else { theme.error };
        Line::from(Span::styled(status.message.as_str(), style))
    } else {
        return;
    };
    Paragraph::new(line).render(area, buf);
}

/// `• • •` page dots with the current page highlighted, plus a count.
pub(crate) fn page_dots(pager: &Pager, theme: &Theme) -> Line<'static> {
    if pager.total_pages() <= 1 {
        return Line::default();
    }
    let mut spans = Vec::new();
    for page in 0..pager.total_pages() {
        let style = if page == pager.page() { theme.value } else { theme.muted };
        spans.push(Span::styled("• ", style));
    }
    spans.push(Span::styled(
        format!(" {}/{}", pager.page() + 1, pager.total_pages()),
        theme.muted,
    ));
    Line::from(spans)
}

pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
