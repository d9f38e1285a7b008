use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use letterbox_runtime::{Error, ExportReport, ExportRows, Payload, Request};
use letterbox_types::DiaryEntry;

use super::{USERNAME_LIMIT, is_quit, unexpected_payload};
use crate::tui::effect::{Effect, RequestId, RequestIds};
use crate::tui::format::diary_export_path;
use crate::tui::widgets::{ExportFlow, Pager, TextInput};

#[derive(Debug)]
pub enum DiaryPhase {
    Input,
    Loading { id: RequestId },
    Results { entries: Vec<DiaryEntry>, pager: Pager },
    Error { message: String },
}

/// A user's diary, paged in memory and exportable to CSV.
#[derive(Debug)]
pub struct DiaryScreen {
    input: TextInput,
    phase: DiaryPhase,
    export: ExportFlow,
    page_size: usize,
}

impl DiaryScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            input: TextInput::new(USERNAME_LIMIT, "Enter a Letterboxd username..."),
            phase: DiaryPhase::Input,
            export: ExportFlow::new(),
            page_size,
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn phase(&self) -> &DiaryPhase {
        &self.phase
    }

    pub fn export(&self) -> &ExportFlow {
        &self.export
    }

    pub fn handle_key(&mut self, key: KeyEvent, ids: &mut RequestIds) -> Effect {
        match &mut self.phase {
            DiaryPhase::Input => match key.code {
                KeyCode::Esc => Effect::Menu,
                KeyCode::Enter => {
                    let id = ids.next_id();
                    self.phase = DiaryPhase::Loading { id };
                    Effect::Fetch {
                        id,
                        request: Request::Diary {
                            username: self.input.value(),
                        },
                    }
                }
                _ => {
                    self.input.handle_key(key);
                    Effect::None
                }
            },
            DiaryPhase::Loading { .. } => match key.code {
                KeyCode::Esc => Effect::Menu,
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
            DiaryPhase::Results { entries, pager } => {
                if self.export.is_prompting() {
                    return self
                        .export
                        .handle_key(key, ids, || ExportRows::Diary(entries.clone()));
                }
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => pager.prev(),
                    KeyCode::Right | KeyCode::Char('l') => pager.next(),
                    KeyCode::Char('e') => self.export.open(&diary_export_path(&self.input.value())),
                    KeyCode::Esc => {
                        self.phase = DiaryPhase::Input;
                        self.export = ExportFlow::new();
                    }
                    _ if is_quit(&key) => return Effect::Quit,
                    _ => {}
                }
                Effect::None
            }
            DiaryPhase::Error { .. } => match key.code {
                KeyCode::Esc => {
                    self.phase = DiaryPhase::Input;
                    Effect::None
                }
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
        }
    }

    pub fn handle_fetched(&mut self, id: RequestId, result: Result<Payload, Error>) -> bool {
        match &self.phase {
            DiaryPhase::Loading { id: want } if *want == id => {
                self.phase = match result {
                    Ok(Payload::Diary(entries)) => DiaryPhase::Results {
                        pager: Pager::new(entries.len(), self.page_size),
                        entries,
                    },
                    Ok(other) => DiaryPhase::Error {
                        message: unexpected_payload("diary entries", &other),
                    },
                    Err(err) => DiaryPhase::Error {
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

    fn entries(n: usize) -> Vec<DiaryEntry> {
        (0..n)
            .map(|i| DiaryEntry {
                title: format!("Film {}", i),
                year: 2000 + i as i32,
                rating: 3.5,
                watch_date: "2024-01-01".to_string(),
                rewatch: i % 2 == 0,
                slug: format!("film-{}", i),
            })
            .collect()
    }

    fn load(screen: &mut DiaryScreen, ids: &mut RequestIds, user: &str, n: usize) {
        type_text(|k, ids| screen.handle_key(k, ids), ids, user);
        let Effect::Fetch { id, request } = screen.handle_key(key(KeyCode::Enter), ids) else {
            panic!("expected fetch");
        };
        assert_eq!(
            request,
            Request::Diary {
                username: user.to_string()
            }
        );
        assert!(screen.handle_fetched(id, Ok(Payload::Diary(entries(n)))));
    }

    #[test]
    fn test_empty_diary_has_one_empty_page() {
        let mut ids = RequestIds::new();
        let mut screen = DiaryScreen::new(15);
        load(&mut screen, &mut ids, "dave", 0);

        match screen.phase() {
            DiaryPhase::Results { entries, pager } => {
                assert!(entries.is_empty());
                assert_eq!(pager.total_pages(), 1);
                assert!(pager.slice(entries).is_empty());
            }
            other => panic!("expected results, got {:?}", other),
        }
    }

    #[test]
    fn test_paging_with_arrows_and_hl() {
        let mut ids = RequestIds::new();
        let mut screen = DiaryScreen::new(15);
        load(&mut screen, &mut ids, "dave", 40);

        screen.handle_key(key(KeyCode::Right), &mut ids);
        screen.handle_key(ch('l'), &mut ids);
        screen.handle_key(ch('l'), &mut ids);
        match screen.phase() {
            DiaryPhase::Results { entries, pager } => {
                assert_eq!(pager.page(), 2);
                assert_eq!(pager.slice(entries).len(), 10);
            }
            other => panic!("expected results, got {:?}", other),
        }

        screen.handle_key(ch('h'), &mut ids);
        assert!(matches!(screen.phase(), DiaryPhase::Results { pager, .. } if pager.page() == 1));
    }

    #[test]
    fn test_export_prompt_prefills_safe_username() {
        let mut ids = RequestIds::new();
        let mut screen = DiaryScreen::new(15);
        load(&mut screen, &mut ids, "a/b c", 3);

        screen.handle_key(ch('e'), &mut ids);
        assert_eq!(
            screen.export().prompt().map(|p| p.value()),
            Some("exports/diary_a_b_c.csv".to_string())
        );

        match screen.handle_key(key(KeyCode::Enter), &mut ids) {
            Effect::Export {
                rows, destination, ..
            } => {
                assert_eq!(rows.len(), 3);
                assert_eq!(destination, "exports/diary_a_b_c.csv");
            }
            other => panic!("expected export, got {:?}", other),
        }
    }

    #[test]
    fn test_keys_go_to_prompt_while_open() {
        let mut ids = RequestIds::new();
        let mut screen = DiaryScreen::new(15);
        load(&mut screen, &mut ids, "dave", 20);

        screen.handle_key(ch('e'), &mut ids);
        // 'l' is typed into the path, not used for paging
        screen.handle_key(ch('l'), &mut ids);
        assert!(matches!(screen.phase(), DiaryPhase::Results { pager, .. } if pager.page() == 0));
        assert_eq!(
            screen.export().prompt().map(|p| p.value()),
            Some("exports/diary_dave.csvl".to_string())
        );

        screen.handle_key(key(KeyCode::Esc), &mut ids);
        assert!(!screen.export().is_prompting());
        assert!(matches!(screen.phase(), DiaryPhase::Results { .. }));
    }

    #[test]
    fn test_export_failure_keeps_entries() {
        let mut ids = RequestIds::new();
        let mut screen = DiaryScreen::new(15);
        load(&mut screen, &mut ids, "dave", 2);

        screen.handle_key(ch('e'), &mut ids);
        let Effect::Export { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected export");
        };
        assert!(screen.handle_exported(id, Err(Error::PermissionDenied(PathBuf::from("/x")))));

        assert!(matches!(screen.phase(), DiaryPhase::Results { entries, .. } if entries.len() == 2));
        let status = screen.export().visible_status(Instant::now()).unwrap();
        assert!(!status.success);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut ids = RequestIds::new();
        let mut screen = DiaryScreen::new(15);
        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected fetch");
        };
        let other = ids.next_id();

        assert!(!screen.handle_fetched(other, Ok(Payload::Diary(entries(1)))));
        assert!(matches!(screen.phase(), DiaryPhase::Loading { .. }));
        assert!(screen.handle_fetched(id, Err(Error::RemoteError("private".into()))));
        assert!(matches!(screen.phase(), DiaryPhase::Error { .. }));
    }
}
