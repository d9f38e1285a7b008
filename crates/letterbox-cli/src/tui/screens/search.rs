use crossterm::event::{KeyCode, KeyEvent};
use letterbox_runtime::{Error, Payload, Request};
use letterbox_types::{Movie, MovieDetails};

use super::{QUERY_LIMIT, is_quit, move_selection, unexpected_payload};
use crate::tui::effect::{Effect, RequestId, RequestIds};
use crate::tui::widgets::{Pager, TextInput, cycle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsTab {
    Information,
    Reviews,
    Similar,
    WhereToWatch,
}

impl DetailsTab {
    pub const ALL: [DetailsTab; 4] = [
        DetailsTab::Information,
        DetailsTab::Reviews,
        DetailsTab::Similar,
        DetailsTab::WhereToWatch,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DetailsTab::Information => "Information",
            DetailsTab::Reviews => "Reviews",
            DetailsTab::Similar => "Similar",
            DetailsTab::WhereToWatch => "Where to Watch",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn step(self, forward: bool) -> Self {
        Self::ALL[cycle(self.index(), Self::ALL.len(), forward)]
    }
}

#[derive(Debug)]
pub enum SearchPhase {
    Input,
    Loading {
        id: RequestId,
    },
    Results {
        movies: Vec<Movie>,
        selected: usize,
    },
    LoadingDetails {
        id: RequestId,
        movies: Vec<Movie>,
        selected: usize,
    },
    Details {
        movies: Vec<Movie>,
        selected: usize,
        details: Box<MovieDetails>,
        tab: DetailsTab,
        similar: Pager,
    },
    Error {
        message: String,
    },
}

/// Movie search with drill-down into a tabbed details view.
#[derive(Debug)]
pub struct SearchScreen {
    input: TextInput,
    phase: SearchPhase,
    similar_per_page: usize,
}

impl SearchScreen {
    pub fn new(similar_per_page: usize) -> Self {
        Self {
            input: TextInput::new(QUERY_LIMIT, "Search for a movie..."),
            phase: SearchPhase::Input,
            similar_per_page,
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn handle_key(&mut self, key: KeyEvent, ids: &mut RequestIds) -> Effect {
        match &mut self.phase {
            SearchPhase::Input => match key.code {
                KeyCode::Esc => Effect::Menu,
                KeyCode::Enter => {
                    let id = ids.next_id();
                    self.phase = SearchPhase::Loading { id };
                    Effect::Fetch {
                        id,
                        request: Request::SearchMovies {
                            query: self.input.value(),
                        },
                    }
                }
                _ => {
                    self.input.handle_key(key);
                    Effect::None
                }
            },
            SearchPhase::Loading { .. } => match key.code {
                KeyCode::Esc => Effect::Menu,
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
            SearchPhase::Results { movies, selected } => {
                if move_selection(selected, movies.len(), &key) {
                    return Effect::None;
                }
                match key.code {
                    KeyCode::Esc => {
                        self.phase = SearchPhase::Input;
                        Effect::None
                    }
                    KeyCode::Enter => self.open_selected(ids),
                    _ if is_quit(&key) => Effect::Quit,
                    _ => Effect::None,
                }
            }
            // Details cannot be abandoned half-loaded.
            SearchPhase::LoadingDetails { .. } => {
                if is_quit(&key) {
                    Effect::Quit
                } else {
                    Effect::None
                }
            }
            SearchPhase::Details { tab, similar, .. } => {
                match key.code {
                    KeyCode::Esc => self.close_details(),
                    KeyCode::Tab => *tab = tab.step(true),
                    KeyCode::BackTab => *tab = tab.step(false),
                    KeyCode::Right | KeyCode::Char('l') if *tab == DetailsTab::Similar => {
                        similar.next()
                    }
                    KeyCode::Left | KeyCode::Char('h') if *tab == DetailsTab::Similar => {
                        similar.prev()
                    }
                    KeyCode::Right | KeyCode::Char('l') => *tab = tab.step(true),
                    KeyCode::Left | KeyCode::Char('h') => *tab = tab.step(false),
                    _ if is_quit(&key) => return Effect::Quit,
                    _ => {}
                }
                Effect::None
            }
            SearchPhase::Error { .. } => match key.code {
                KeyCode::Esc => {
                    self.phase = SearchPhase::Input;
                    Effect::None
                }
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
        }
    }

    /// Apply the result of fetch `id`. Returns false if this screen was not
    /// waiting for it.
    pub fn handle_fetched(&mut self, id: RequestId, result: Result<Payload, Error>) -> bool {
        match &self.phase {
            SearchPhase::Loading { id: want } if *want == id => {
                self.phase = match result {
                    Ok(Payload::Movies(movies)) => SearchPhase::Results {
                        movies,
                        selected: 0,
                    },
                    Ok(other) => SearchPhase::Error {
                        message: unexpected_payload("movies", &other),
                    },
                    Err(err) => SearchPhase::Error {
                        message: err.to_string(),
                    },
                };
                true
            }
            SearchPhase::LoadingDetails { id: want, .. } if *want == id => {
                let SearchPhase::LoadingDetails {
                    movies, selected, ..
                } = std::mem::replace(&mut self.phase, SearchPhase::Input)
                else {
                    return false;
                };
                self.phase = match result {
                    Ok(Payload::MovieDetails(details)) => SearchPhase::Details {
                        similar: Pager::new(details.similar.len(), self.similar_per_page),
                        movies,
                        selected,
                        details,
                        tab: DetailsTab::Information,
                    },
                    Ok(other) => SearchPhase::Error {
                        message: unexpected_payload("movie details", &other),
                    },
                    Err(err) => SearchPhase::Error {
                        message: err.to_string(),
                    },
                };
                true
            }
            _ => false,
        }
    }

    fn open_selected(&mut self, ids: &mut RequestIds) -> Effect {
        let SearchPhase::Results { movies, selected } =
            std::mem::replace(&mut self.phase, SearchPhase::Input)
        else {
            return Effect::None;
        };
        let Some(slug) = movies.get(selected).map(|m| m.slug.clone()) else {
            self.phase = SearchPhase::Results { movies, selected };
            return Effect::None;
        };

        let id = ids.next_id();
        self.phase = SearchPhase::LoadingDetails {
            id,
            movies,
            selected,
        };
        Effect::Fetch {
            id,
            request: Request::MovieDetails { slug },
        }
    }

    fn close_details(&mut self) {
        if let SearchPhase::Details {
            movies, selected, ..
        } = std::mem::replace(&mut self.phase, SearchPhase::Input)
        {
            self.phase = SearchPhase::Results { movies, selected };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{ch, key, type_text};
    use letterbox_types::SimilarMovie;

    fn movies() -> Vec<Movie> {
        vec![
            Movie {
                title: "Alien".to_string(),
                year: 1979,
                slug: "alien".to_string(),
                director: "Ridley Scott".to_string(),
            },
            Movie {
                title: "Aliens".to_string(),
                year: 1986,
                slug: "aliens".to_string(),
                director: "James Cameron".to_string(),
            },
        ]
    }

    fn details_with_similar(n: usize) -> MovieDetails {
        MovieDetails {
            title: "Aliens".to_string(),
            similar: (0..n)
                .map(|i| SimilarMovie {
                    name: format!("Film {}", i),
                    rating: 3.0,
                })
                .collect(),
            ..MovieDetails::default()
        }
    }

    fn submit(screen: &mut SearchScreen, ids: &mut RequestIds, query: &str) -> RequestId {
        type_text(|k, ids| screen.handle_key(k, ids), ids, query);
        match screen.handle_key(key(KeyCode::Enter), ids) {
            Effect::Fetch {
                id,
                request: Request::SearchMovies { query: q },
            } => {
                assert_eq!(q, query);
                id
            }
            other => panic!("expected search fetch, got {:?}", other),
        }
    }

    fn to_details(screen: &mut SearchScreen, ids: &mut RequestIds, similar: usize) {
        let id = submit(screen, ids, "alien");
        assert!(screen.handle_fetched(id, Ok(Payload::Movies(movies()))));
        screen.handle_key(key(KeyCode::Down), ids);
        let Effect::Fetch { id, request } = screen.handle_key(key(KeyCode::Enter), ids) else {
            panic!("expected details fetch");
        };
        assert_eq!(
            request,
            Request::MovieDetails {
                slug: "aliens".to_string()
            }
        );
        let details = Box::new(details_with_similar(similar));
        assert!(screen.handle_fetched(id, Ok(Payload::MovieDetails(details))));
    }

    #[test]
    fn test_second_enter_while_loading_issues_no_fetch() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        let id = submit(&mut screen, &mut ids, "alien");

        assert_eq!(screen.handle_key(key(KeyCode::Enter), &mut ids), Effect::None);
        assert!(matches!(screen.phase(), SearchPhase::Loading { id: w } if *w == id));

        assert!(screen.handle_fetched(id, Ok(Payload::Movies(movies()))));
        assert!(matches!(screen.phase(), SearchPhase::Results { movies, .. } if movies.len() == 2));
    }

    #[test]
    fn test_empty_query_is_submitted() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        let effect = screen.handle_key(key(KeyCode::Enter), &mut ids);
        assert!(matches!(
            effect,
            Effect::Fetch { request: Request::SearchMovies { ref query }, .. } if query.is_empty()
        ));
    }

    #[test]
    fn test_remote_error_then_resubmit_uses_second_response() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        let first = submit(&mut screen, &mut ids, "x");

        assert!(screen.handle_fetched(first, Err(Error::RemoteError("no such film".into()))));
        assert!(matches!(screen.phase(), SearchPhase::Error { message } if message == "no such film"));

        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(matches!(screen.phase(), SearchPhase::Input));

        let Effect::Fetch { id: second, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids)
        else {
            panic!("expected resubmit");
        };
        assert!(!screen.handle_fetched(first, Ok(Payload::Movies(Vec::new()))));
        assert!(screen.handle_fetched(second, Ok(Payload::Movies(movies()))));
        match screen.phase() {
            SearchPhase::Results { movies, .. } => assert_eq!(movies[0].title, "Alien"),
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[test]
    fn test_esc_ignored_while_details_load() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        let id = submit(&mut screen, &mut ids, "alien");
        screen.handle_fetched(id, Ok(Payload::Movies(movies())));
        screen.handle_key(key(KeyCode::Enter), &mut ids);

        assert_eq!(screen.handle_key(key(KeyCode::Esc), &mut ids), Effect::None);
        assert!(matches!(screen.phase(), SearchPhase::LoadingDetails { .. }));
    }

    #[test]
    fn test_details_tabs_and_similar_paging() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        to_details(&mut screen, &mut ids, 7);

        screen.handle_key(key(KeyCode::Right), &mut ids);
        screen.handle_key(key(KeyCode::Tab), &mut ids);
        match screen.phase() {
            SearchPhase::Details { tab, similar, .. } => {
                assert_eq!(*tab, DetailsTab::Similar);
                assert_eq!(similar.total_pages(), 2);
            }
            other => panic!("expected details, got {:?}", other),
        }

        // On Similar, arrows page instead of switching tabs.
        screen.handle_key(key(KeyCode::Right), &mut ids);
        screen.handle_key(key(KeyCode::Right), &mut ids);
        match screen.phase() {
            SearchPhase::Details { tab, similar, .. } => {
                assert_eq!(*tab, DetailsTab::Similar);
                assert_eq!(similar.page(), 1);
            }
            other => panic!("expected details, got {:?}", other),
        }

        screen.handle_key(key(KeyCode::BackTab), &mut ids);
        screen.handle_key(key(KeyCode::BackTab), &mut ids);
        screen.handle_key(key(KeyCode::BackTab), &mut ids);
        assert!(matches!(
            screen.phase(),
            SearchPhase::Details { tab: DetailsTab::WhereToWatch, .. }
        ));
    }

    #[test]
    fn test_back_from_details_keeps_results() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        to_details(&mut screen, &mut ids, 0);

        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(matches!(screen.phase(), SearchPhase::Results { selected: 1, .. }));
        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(matches!(screen.phase(), SearchPhase::Input));
        assert_eq!(screen.handle_key(key(KeyCode::Esc), &mut ids), Effect::Menu);
    }

    #[test]
    fn test_q_is_typed_in_input_but_quits_in_results() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        assert_eq!(screen.handle_key(ch('q'), &mut ids), Effect::None);
        assert_eq!(screen.input().value(), "q");

        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected fetch");
        };
        screen.handle_fetched(id, Ok(Payload::Movies(Vec::new())));
        assert_eq!(screen.handle_key(ch('q'), &mut ids), Effect::Quit);
    }

    #[test]
    fn test_enter_on_empty_results_does_nothing() {
        let mut ids = RequestIds::new();
        let mut screen = SearchScreen::new(5);
        let id = submit(&mut screen, &mut ids, "zzz");
        screen.handle_fetched(id, Ok(Payload::Movies(Vec::new())));

        assert_eq!(screen.handle_key(key(KeyCode::Enter), &mut ids), Effect::None);
        assert!(matches!(screen.phase(), SearchPhase::Results { .. }));
    }
}
