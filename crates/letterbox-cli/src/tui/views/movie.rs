//! Tab bodies for a movie's details.

use letterbox_types::MovieDetails;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{Theme, page_dots, render_tabs};
use crate::tui::format::{compact_count, rating_label, year};
use crate::tui::screens::search::DetailsTab;
use crate::tui::widgets::Pager;

pub struct MovieDetailsView<'a> {
    details: &'a MovieDetails,
    tab: DetailsTab,
    similar: &'a Pager,
    theme: &'a Theme,
}

impl<'a> MovieDetailsView<'a> {
    pub fn new(details: &'a MovieDetails, tab: DetailsTab, similar: &'a Pager, theme: &'a Theme) -> Self {
        Self {
            details,
            tab,
            similar,
            theme,
        }
    }

    fn information(&self) -> Vec<Line<'a>> {
        let d = self.details;
        let t = self.theme;
        let mut heading = vec![Span::styled(d.title.as_str(), t.title)];
        if d.year > 0 {
            heading.push(Span::styled(format!(" ({})", year(d.year)), t.muted));
        }
        heading.push(Span::raw("  "));
        heading.push(Span::styled(rating_label(d.rating), t.star));
        let mut lines = vec![Line::from(heading)];
        if !d.tagline.is_empty() {
            lines.push(Line::from(Span::styled(d.tagline.as_str(), t.muted.italic())));
        }

        let mut facts = Vec::new();
        if !d.runtime.is_empty() {
            facts.push(d.runtime.clone());
        }
        if !d.genres.is_empty() {
            facts.push(d.genres.join(", "));
        }
        if !facts.is_empty() {
            lines.push(Line::from(Span::styled(facts.join("  |  "), t.text)));
        }

        lines.push(Line::default());
        let stats = [
            ("Members", d.members),
            ("Fans", d.fans),
            ("Likes", d.likes),
            ("Reviews", d.review_count),
            ("Lists", d.lists),
        ];
        let mut stat_spans = Vec::new();
        for (label, n) in stats {
            stat_spans.push(Span::styled(format!("{} ", label), t.muted));
            stat_spans.push(Span::styled(compact_count(n), t.value));
            stat_spans.push(Span::raw("   "));
        }
        lines.push(Line::from(stat_spans));
        lines.push(Line::default());

        if !d.director.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Director  ", t.muted),
                Span::styled(d.director.as_str(), t.value),
            ]));
        }
        if !d.cast.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Cast      ", t.muted),
                Span::styled(d.cast.join(", "), t.text),
            ]));
        }
        if !d.description.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Synopsis", t.header)));
            lines.push(Line::from(Span::styled(d.description.as_str(), t.text)));
        }
        lines
    }

    fn reviews(&self) -> Vec<Line<'a>> {
        let t = self.theme;
        if self.details.reviews.is_empty() {
            return vec![Line::from(Span::styled("No reviews yet.", t.muted))];
        }
        let mut lines = Vec::new();
        for review in &self.details.reviews {
            lines.push(Line::from(vec![
                Span::styled(review.author.as_str(), t.value),
                Span::raw("  "),
                Span::styled(rating_label(review.rating), t.star),
            ]));
            lines.push(Line::from(Span::styled(review.text.as_str(), t.muted.italic())));
            lines.push(Line::default());
        }
        lines
    }

    fn similar(&self) -> Vec<Line<'a>> {
        let t = self.theme;
        if self.details.similar.is_empty() {
            return vec![Line::from(Span::styled("No similar films found.", t.muted))];
        }
        let mut lines: Vec<Line> = self
            .similar
            .slice(&self.details.similar)
            .iter()
            .map(|movie| {
                Line::from(vec![
                    Span::styled(format!("• {}", movie.name), t.text),
                    Span::raw("  "),
                    Span::styled(rating_label(movie.rating), t.star),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(page_dots(self.similar, t));
        lines
    }

    fn where_to_watch(&self) -> Vec<Line<'a>> {
        let t = self.theme;
        if self.details.providers.is_empty() {
            return vec![Line::from(Span::styled(
                "Not available on any streaming service.",
                t.muted,
            ))];
        }
        self.details
            .providers
            .iter()
            .flat_map(|p| {
                [
                    Line::from(vec![
                        Span::styled(p.name.as_str(), t.value),
                        Span::styled(format!("  ({})", p.kind), t.muted),
                    ]),
                    Line::from(Span::styled(format!("  {}", p.link), t.accent)),
                ]
            })
            .collect()
    }
}

impl Widget for MovieDetailsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [tabs_area, content_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);

        let titles: Vec<&str> = DetailsTab::ALL.iter().map(|t| t.title()).collect();
        let active = DetailsTab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0);
        render_tabs(tabs_area, buf, &titles, active, self.theme);

        let lines = match self.tab {
            DetailsTab::Information => self.information(),
            DetailsTab::Reviews => self.reviews(),
            DetailsTab::Similar => self.similar(),
            DetailsTab::WhereToWatch => self.where_to_watch(),
        };
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(content_area, buf);
    }
}
