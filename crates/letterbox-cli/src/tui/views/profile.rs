use letterbox_types::UserDetails;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{
    RenderContext, Theme, page_dots, render_error, render_help, render_input, render_loading,
    render_tabs, screen_chrome,
};
use crate::tui::format::{compact_count, rating_label, year};
use crate::tui::screens::ProfileScreen;
use crate::tui::screens::profile::{ProfilePhase, ProfileTab, RECENT_LIMIT};
use crate::tui::widgets::Pager;

pub struct ProfileView<'a> {
    screen: &'a ProfileScreen,
    ctx: &'a RenderContext<'a>,
}

impl<'a> ProfileView<'a> {
    pub fn new(screen: &'a ProfileScreen, ctx: &'a RenderContext<'a>) -> Self {
        Self { screen, ctx }
    }
}

impl Widget for ProfileView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let (body, footer) = screen_chrome(area, buf, "user profile", theme);

        match self.screen.phase() {
            ProfilePhase::Input => {
                render_input(body, buf, "username:", self.screen.input(), theme);
                render_help(footer, buf, &[("enter", "load profile"), ("esc", "menu")], theme);
            }
            ProfilePhase::Loading { .. } => {
                render_loading(
                    body,
                    buf,
                    &format!("Fetching profile for '{}'...", self.screen.input().value()),
                    self.ctx,
                );
                render_help(footer, buf, &[("esc", "menu"), ("q", "quit")], theme);
            }
            ProfilePhase::Details {
                user,
                tab,
                reviews,
                social,
            } => {
                let [tabs_area, content_area] =
                    Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(body);
                let titles: Vec<&str> = ProfileTab::ALL.iter().map(|t| t.title()).collect();
                let active = ProfileTab::ALL.iter().position(|t| t == tab).unwrap_or(0);
                render_tabs(tabs_area, buf, &titles, active, theme);

                let tabs = ProfileTabs { user, theme };
                match tab {
                    ProfileTab::Social => tabs.social(social, content_area, buf),
                    other => {
                        let lines = match other {
                            ProfileTab::Profile => tabs.profile(),
                            ProfileTab::Favorites => tabs.favorites(),
                            ProfileTab::Recent => tabs.recent(),
                            _ => tabs.reviews(reviews),
                        };
                        Paragraph::new(lines)
                            .wrap(Wrap { trim: false })
                            .render(content_area, buf);
                    }
                }

                let keys: &[(&str, &str)] = if tab.is_paged() {
                    &[("tab", "switch tab"), ("←/→", "page"), ("esc", "back"), ("q", "quit")]
                } else {
                    &[("tab / ←/→", "switch tab"), ("esc", "back"), ("q", "quit")]
                };
                render_help(footer, buf, keys, theme);
            }
            ProfilePhase::Error { message } => {
                render_error(body, buf, message, theme);
                render_help(footer, buf, &[("esc", "back"), ("q", "quit")], theme);
            }
        }
    }
}

struct ProfileTabs<'a> {
    user: &'a UserDetails,
    theme: &'a Theme,
}

impl<'a> ProfileTabs<'a> {
    fn profile(&self) -> Vec<Line<'a>> {
        let u = self.user;
        let t = self.theme;
        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<14}", label), t.muted),
                Span::styled(value, t.value),
            ])
        };

        let mut lines = vec![
            Line::from(Span::styled(format!("@{}", u.username), t.title)),
            Line::default(),
            field("Films Watched", compact_count(u.films_watched)),
            field("This Year", u.this_year.to_string()),
        ];
        if !u.last_watched.is_empty() {
            lines.push(field("Last Watched", u.last_watched.clone()));
        }
        if !u.website.is_empty() {
            lines.push(field("Website", u.website.clone()));
        }
        if !u.location.is_empty() {
            lines.push(field("Location", u.location.clone()));
        }
        if !u.bio.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(u.bio.as_str(), t.text.italic())));
        }
        lines
    }

    fn favorites(&self) -> Vec<Line<'a>> {
        if self.user.favorites.is_empty() {
            return vec![Line::from(Span::styled(
                "No favorite films listed.",
                self.theme.muted,
            ))];
        }
        self.user
            .favorites
            .iter()
            .map(|name| Line::from(Span::styled(format!("♥ {}", name), self.theme.text)))
            .collect()
    }

    fn recent(&self) -> Vec<Line<'a>> {
        if self.user.recent.is_empty() {
            return vec![Line::from(Span::styled(
                "No recent activity found.",
                self.theme.muted,
            ))];
        }
        self.user
            .recent
            .iter()
            .take(RECENT_LIMIT)
            .map(|name| Line::from(Span::styled(format!("• {}", name), self.theme.text)))
            .collect()
    }

    fn reviews(&self, pager: &Pager) -> Vec<Line<'a>> {
        let t = self.theme;
        if self.user.reviews.is_empty() {
            return vec![Line::from(Span::styled("No reviews found.", t.muted))];
        }
        let mut lines = Vec::new();
        for review in pager.slice(&self.user.reviews) {
            let mut heading = vec![Span::styled(review.movie_name.as_str(), t.value)];
            if review.movie_year > 0 {
                heading.push(Span::styled(format!(" ({})", year(review.movie_year)), t.muted));
            }
            heading.push(Span::raw("  "));
            heading.push(Span::styled(rating_label(review.rating_out_of_five()), t.star));
            lines.push(Line::from(heading));
            if !review.review_text.is_empty() {
                lines.push(Line::from(Span::styled(review.review_text.as_str(), t.text)));
            }
            lines.push(Line::from(Span::styled(review.review_date.as_str(), t.muted)));
            lines.push(Line::default());
        }
        lines.push(page_dots(pager, t));
        lines
    }

    fn social(&self, pager: &Pager, area: Rect, buf: &mut Buffer) {
        let [columns_area, dots_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        let [following_area, followers_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(columns_area);

        self.social_column("Following", &self.user.following, pager, following_area, buf);
        self.social_column("Followers", &self.user.followers, pager, followers_area, buf);
        Paragraph::new(page_dots(pager, self.theme)).render(dots_area, buf);
    }

    fn social_column(&self, title: &str, names: &[String], pager: &Pager, area: Rect, buf: &mut Buffer) {
        let t = self.theme;
        let mut lines = vec![Line::from(Span::styled(
            format!("{} ({})", title, names.len()),
            t.header,
        ))];
        if names.is_empty() {
            lines.push(Line::from(Span::styled("Nobody yet.", t.muted)));
        }
        let range = pager.range();
        let start = range.start.min(names.len());
        let end = range.end.min(names.len());
        lines.extend(
            names[start..end]
                .iter()
                .map(|name| Line::from(Span::styled(format!("• {}", name), t.text))),
        );
        Paragraph::new(lines).render(area, buf);
    }
}
