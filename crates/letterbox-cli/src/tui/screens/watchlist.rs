use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use letterbox_runtime::{Error, ExportReport, ExportRows, Payload, Request};
use letterbox_types::Movie;

use super::{USERNAME_LIMIT, is_quit, move_selection, unexpected_payload};
use crate::tui::effect::{Effect, RequestId, RequestIds};
use crate::tui::format::watchlist_export_path;
use crate::tui::widgets::{ExportFlow, TextInput};

#[derive(Debug)]
pub enum WatchlistPhase {
    Input,
    Loading { id: RequestId },
    Results { movies: Vec<Movie>, selected: usize },
    Error { message: String },
}

#[derive(Debug)]
pub struct WatchlistScreen {
    input: TextInput,
    phase: WatchlistPhase,
    export: ExportFlow,
}

impl Default for WatchlistScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchlistScreen {
    pub fn new() -> Self {
        Self {
            input: TextInput::new(USERNAME_LIMIT, "Enter a Letterboxd username..."),
            phase: WatchlistPhase::Input,
            export: ExportFlow::new(),
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn phase(&self) -> &WatchlistPhase {
        &self.phase
    }

    pub fn export(&self) -> &ExportFlow {
        &self.export
    }

    pub fn handle_key(&mut self, key: KeyEvent, ids: &mut RequestIds) -> Effect {
        match &mut self.phase {
            WatchlistPhase::Input => match key.code {
                KeyCode::Esc => Effect::Menu,
                KeyCode::Enter => {
                    let id = ids.next_id();
                    self.phase = WatchlistPhase::Loading { id };
                    Effect::Fetch {
                        id,
                        request: Request::Watchlist {
                            username: self.input.value(),
                        },
                    }
                }
                _ => {
                    self.input.handle_key(key);
                    Effect::None
                }
            },
            WatchlistPhase::Loading { .. } => match key.code {
                KeyCode::Esc => Effect::Menu,
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
            WatchlistPhase::Results { movies, selected } => {
                if self.export.is_prompting() {
                    return self
                        .export
                        .handle_key(key, ids, || ExportRows::Watchlist(movies.clone()));
                }
                if move_selection(selected, movies.len(), &key) {
                    return Effect::None;
                }
                match key.code {
                    KeyCode::Char('e') => {
                        self.export.open(&watchlist_export_path(&self.input.value()));
                        Effect::None
                    }
                    KeyCode::Esc => {
                        self.phase = WatchlistPhase::Input;
                        self.export = ExportFlow::new();
                        Effect::None
                    }
                    _ if is_quit(&key) => Effect::Quit,
                    _ => Effect::None,
                }
            }
            WatchlistPhase::Error { .. } => match key.code {
                KeyCode::Esc => {
                    self.phase = WatchlistPhase::Input;
                    Effect::None
                }
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
        }
    }

    pub fn handle_fetched(&mut self, id: RequestId, result: Result<Payload, Error>) -> bool {
        match &self.phase {
            WatchlistPhase::Loading { id: want } if *want == id => {
                self.phase = match result {
                    Ok(Payload::Movies(movies)) => WatchlistPhase::Results {
                        movies,
                        selected: 0,
                    },
                    Ok(other) => WatchlistPhase::Error {
                        message: unexpected_payload("movies", &other),
                    },
                    Err(err) => WatchlistPhase::Error {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{ch, key, type_text};
    use std::path::PathBuf;

    fn movies() -> Vec<Movie> {
        ["Heat", "Thief", "Collateral"]
            .iter()
            .map(|t| Movie {
                title: t.to_string(),
                year: 1995,
                slug: t.to_lowercase(),
                director: "Michael Mann".to_string(),
            })
            .collect()
    }

    fn load(screen: &mut WatchlistScreen, ids: &mut RequestIds) {
        type_text(|k, ids| screen.handle_key(k, ids), ids, "dave");
        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), ids) else {
            panic!("expected fetch");
        };
        assert!(screen.handle_fetched(id, Ok(Payload::Movies(movies()))));
    }

    #[test]
    fn test_export_round_trip_shows_success_status() {
        let mut ids = RequestIds::new();
        let mut screen = WatchlistScreen::new();
        load(&mut screen, &mut ids);

        screen.handle_key(ch('e'), &mut ids);
        let Effect::Export {
            id,
            rows,
            destination,
        } = screen.handle_key(key(KeyCode::Enter), &mut ids)
        else {
            panic!("expected export");
        };
        assert_eq!(destination, "exports/watchlist_dave.csv");
        assert!(matches!(rows, ExportRows::Watchlist(ref m) if m.len() == 3));

        // A second 'e' while the first export runs is ignored.
        screen.handle_key(ch('e'), &mut ids);
        assert!(!screen.export().is_prompting());

        let report = ExportReport {
            path: PathBuf::from("/home/dave/exports/watchlist_dave.csv"),
            rows_written: 3,
            rows_failed: 0,
        };
        assert!(screen.handle_exported(id, Ok(report)));
        let status = screen.export().visible_status(Instant::now()).unwrap();
        assert!(status.success);
        assert!(status.message.contains("watchlist_dave.csv"));
    }

    #[test]
    fn test_selection_and_back() {
        let mut ids = RequestIds::new();
        let mut screen = WatchlistScreen::new();
        load(&mut screen, &mut ids);

        screen.handle_key(key(KeyCode::Down), &mut ids);
        screen.handle_key(key(KeyCode::Down), &mut ids);
        screen.handle_key(key(KeyCode::Down), &mut ids);
        assert!(matches!(screen.phase(), WatchlistPhase::Results { selected: 2, .. }));

        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(matches!(screen.phase(), WatchlistPhase::Input));
        assert_eq!(screen.input().value(), "dave");
    }
}
