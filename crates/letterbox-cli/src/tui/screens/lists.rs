use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use letterbox_runtime::{Error, ExportReport, ExportRows, Payload, Request};
use letterbox_types::{ListSearchResult, Movie};

use super::{QUERY_LIMIT, is_quit, move_selection, unexpected_payload};
use crate::tui::effect::{Effect, RequestId, RequestIds};
use crate::tui::format::list_export_path;
use crate::tui::widgets::{ExportFlow, TextInput};

#[derive(Debug)]
pub enum ListsPhase {
    Input,
    Loading {
        id: RequestId,
    },
    Results {
        lists: Vec<ListSearchResult>,
        selected: usize,
    },
    LoadingDetails {
        id: RequestId,
        lists: Vec<ListSearchResult>,
        selected: usize,
    },
    Details {
        lists: Vec<ListSearchResult>,
        selected: usize,
        movies: Vec<Movie>,
        movie_selected: usize,
    },
    Error {
        message: String,
    },
}

/// List search; a selected list opens its films, which can be exported.
#[derive(Debug)]
pub struct ListsScreen {
    input: TextInput,
    phase: ListsPhase,
    export: ExportFlow,
}

impl Default for ListsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ListsScreen {
    pub fn new() -> Self {
        Self {
            input: TextInput::new(QUERY_LIMIT, "Search for a list..."),
            phase: ListsPhase::Input,
            export: ExportFlow::new(),
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn phase(&self) -> &ListsPhase {
        &self.phase
    }

    pub fn export(&self) -> &ExportFlow {
        &self.export
    }

    pub fn handle_key(&mut self, key: KeyEvent, ids: &mut RequestIds) -> Effect {
        match &mut self.phase {
            ListsPhase::Input => match key.code {
                KeyCode::Esc => Effect::Menu,
                KeyCode::Enter => {
                    let id = ids.next_id();
                    self.phase = ListsPhase::Loading { id };
                    Effect::Fetch {
                        id,
                        request: Request::SearchLists {
                            query: self.input.value(),
                        },
                    }
                }
                _ => {
                    self.input.handle_key(key);
                    Effect::None
                }
            },
            ListsPhase::Loading { .. } => match key.code {
                KeyCode::Esc => Effect::Menu,
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
            ListsPhase::Results { lists, selected } => {
                if move_selection(selected, lists.len(), &key) {
                    return Effect::None;
                }
                match key.code {
                    KeyCode::Esc => {
                        self.phase = ListsPhase::Input;
                        Effect::None
                    }
                    KeyCode::Enter => self.open_selected(ids),
                    _ if is_quit(&key) => Effect::Quit,
                    _ => Effect::None,
                }
            }
            ListsPhase::LoadingDetails { .. } => {
                if is_quit(&key) {
                    Effect::Quit
                } else {
                    Effect::None
                }
            }
            ListsPhase::Details {
                lists,
                selected,
                movies,
                movie_selected,
            } => {
                if self.export.is_prompting() {
                    return self
                        .export
                        .handle_key(key, ids, || ExportRows::List(movies.clone()));
                }
                if move_selection(movie_selected, movies.len(), &key) {
                    return Effect::None;
                }
                match key.code {
                    KeyCode::Char('e') => {
                        if let Some(list) = lists.get(*selected) {
                            self.export.open(&list_export_path(&list.owner, &list.name));
                        }
                        Effect::None
                    }
                    KeyCode::Esc => {
                        self.close_details();
                        Effect::None
                    }
                    _ if is_quit(&key) => Effect::Quit,
                    _ => Effect::None,
                }
            }
            ListsPhase::Error { .. } => match key.code {
                KeyCode::Esc => {
                    self.phase = ListsPhase::Input;
                    Effect::None
                }
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
        }
    }

    pub fn handle_fetched(&mut self, id: RequestId, result: Result<Payload, Error>) -> bool {
        match &self.phase {
            ListsPhase::Loading { id: want } if *want == id => {
                self.phase = match result {
                    Ok(Payload::Lists(lists)) => ListsPhase::Results { lists, selected: 0 },
                    Ok(other) => ListsPhase::Error {
                        message: unexpected_payload("lists", &other),
                    },
                    Err(err) => ListsPhase::Error {
                        message: err.to_string(),
                    },
                };
                true
            }
            ListsPhase::LoadingDetails { id: want, .. } if *want == id => {
                let ListsPhase::LoadingDetails {
                    lists, selected, ..
                } = std::mem::replace(&mut self.phase, ListsPhase::Input)
                else {
                    return false;
                };
                self.phase = match result {
                    Ok(Payload::Movies(movies)) => ListsPhase::Details {
                        lists,
                        selected,
                        movies,
                        movie_selected: 0,
                    },
                    Ok(other) => ListsPhase::Error {
                        message: unexpected_payload("list films", &other),
                    },
                    Err(err) => ListsPhase::Error {
                        message: err.to_string(),
                    },
                };
                true
            }
            _ => false,
        }
    }

    pub fn handle_exported(&mut self, id: RequestId, result: Result<ExportReport, Error>) -> bool {
        self.export.finish(id, result, Instant::now())
    }

    /// The list whose films are loading or shown.
    pub fn current_list(&self) -> Option<&ListSearchResult> {
        match &self.phase {
            ListsPhase::LoadingDetails {
                lists, selected, ..
            }
            | ListsPhase::Details {
                lists, selected, ..
            } => lists.get(*selected),
            _ => None,
        }
    }

    fn open_selected(&mut self, ids: &mut RequestIds) -> Effect {
        let ListsPhase::Results { lists, selected } =
            std::mem::replace(&mut self.phase, ListsPhase::Input)
        else {
            return Effect::None;
        };
        let Some(request) = lists.get(selected).map(|list| Request::ListDetails {
            owner: list.owner.clone(),
            slug: list.slug.clone(),
        }) else {
            self.phase = ListsPhase::Results { lists, selected };
            return Effect::None;
        };

        let id = ids.next_id();
        self.phase = ListsPhase::LoadingDetails {
            id,
            lists,
            selected,
        };
        Effect::Fetch { id, request }
    }

    /// Back to the result table; the list's export status goes with it.
    fn close_details(&mut self) {
        if let ListsPhase::Details {
            lists, selected, ..
        } = std::mem::replace(&mut self.phase, ListsPhase::Input)
        {
            self.phase = ListsPhase::Results { lists, selected };
        }
        self.export = ExportFlow::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{ch, key, type_text};

    fn lists() -> Vec<ListSearchResult> {
        vec![
            ListSearchResult {
                name: "Best of 1979".to_string(),
                owner: "dave".to_string(),
                slug: "best-of-1979".to_string(),
            },
            ListSearchResult {
                name: "Space horror".to_string(),
                owner: "a/b c".to_string(),
                slug: "space-horror".to_string(),
            },
        ]
    }

    fn films() -> Vec<Movie> {
        vec![Movie {
            title: "Alien".to_string(),
            year: 1979,
            slug: "alien".to_string(),
            director: String::new(),
        }]
    }

    fn open_second_list(screen: &mut ListsScreen, ids: &mut RequestIds) {
        type_text(|k, ids| screen.handle_key(k, ids), ids, "horror");
        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), ids) else {
            panic!("expected search fetch");
        };
        assert!(screen.handle_fetched(id, Ok(Payload::Lists(lists()))));
        screen.handle_key(ch('j'), ids);

        let Effect::Fetch { id, request } = screen.handle_key(key(KeyCode::Enter), ids) else {
            panic!("expected details fetch");
        };
        assert_eq!(
            request,
            Request::ListDetails {
                owner: "a/b c".to_string(),
                slug: "space-horror".to_string(),
            }
        );
        assert!(screen.handle_fetched(id, Ok(Payload::Movies(films()))));
    }

    #[test]
    fn test_details_use_owner_and_slug_of_selection() {
        let mut ids = RequestIds::new();
        let mut screen = ListsScreen::new();
        open_second_list(&mut screen, &mut ids);

        assert_eq!(screen.current_list().map(|l| l.slug.as_str()), Some("space-horror"));
        assert!(matches!(screen.phase(), ListsPhase::Details { movies, .. } if movies.len() == 1));
    }

    #[test]
    fn test_default_export_name_is_path_safe() {
        let mut ids = RequestIds::new();
        let mut screen = ListsScreen::new();
        open_second_list(&mut screen, &mut ids);

        screen.handle_key(ch('e'), &mut ids);
        let value = screen.export().prompt().map(|p| p.value()).unwrap();
        assert!(value.contains("a_b_c"));
        assert_eq!(value, "exports/list_a_b_c_Space_horror.csv");
    }

    #[test]
    fn test_back_from_details_clears_export_status() {
        let mut ids = RequestIds::new();
        let mut screen = ListsScreen::new();
        open_second_list(&mut screen, &mut ids);

        screen.handle_key(ch('e'), &mut ids);
        let Effect::Export { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected export");
        };
        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(matches!(screen.phase(), ListsPhase::Results { selected: 1, .. }));
        assert!(!screen.export().is_pending());

        // The abandoned export's completion no longer belongs to anyone.
        let late = Err(Error::RemoteError("late".into()));
        assert!(!screen.handle_exported(id, late));
        assert!(screen.export().visible_status(Instant::now()).is_none());
    }

    #[test]
    fn test_details_error_goes_to_error_then_input() {
        let mut ids = RequestIds::new();
        let mut screen = ListsScreen::new();
        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected fetch");
        };
        screen.handle_fetched(id, Ok(Payload::Lists(lists())));
        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected details fetch");
        };

        assert!(screen.handle_fetched(id, Err(Error::RemoteError("List not found".into()))));
        assert!(matches!(screen.phase(), ListsPhase::Error { message } if message == "List not found"));
        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(matches!(screen.phase(), ListsPhase::Input));
    }
}
