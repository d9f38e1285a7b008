//! Holds the one active screen and routes keys and completions to it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use letterbox_runtime::{PaginationConfig, Quote};

use super::effect::{Effect, Feature, RequestId, RequestIds};
use super::screens::{
    DiaryScreen, ListsScreen, MenuScreen, ProfileScreen, SearchScreen, WatchlistScreen,
};
use super::worker::{Completion, Outcome};

#[derive(Debug)]
pub enum ScreenState {
    Menu(MenuScreen),
    Search(SearchScreen),
    Diary(DiaryScreen),
    Watchlist(WatchlistScreen),
    Lists(ListsScreen),
    Profile(ProfileScreen),
}

impl ScreenState {
    pub fn name(&self) -> &'static str {
        match self {
            ScreenState::Menu(_) => "menu",
            ScreenState::Search(_) => "search",
            ScreenState::Diary(_) => "diary",
            ScreenState::Watchlist(_) => "watchlist",
            ScreenState::Lists(_) => "lists",
            ScreenState::Profile(_) => "profile",
        }
    }
}

/// Menu quote line; loaded once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteLine {
    Loading,
    Loaded(Quote),
    Failed(String),
}

pub struct Navigator {
    screen: ScreenState,
    ids: RequestIds,
    pagination: PaginationConfig,
    quote: QuoteLine,
    quote_request: Option<RequestId>,
}

impl Navigator {
    pub fn new(pagination: PaginationConfig) -> Self {
        Self {
            screen: ScreenState::Menu(MenuScreen::new()),
            ids: RequestIds::new(),
            pagination,
            quote: QuoteLine::Loading,
            quote_request: None,
        }
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn quote(&self) -> &QuoteLine {
        &self.quote
    }

    /// Tag for the startup quote load.
    pub fn begin_quote_load(&mut self) -> RequestId {
        let id = self.ids.next_id();
        self.quote_request = Some(id);
        self.quote = QuoteLine::Loading;
        id
    }

    /// Route a key press. Screen switches are applied here; only effects
    /// that need the worker or the event loop are returned.
    pub fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Effect::Quit;
        }

        let ids = &mut self.ids;
        let effect = match &mut self.screen {
            ScreenState::Menu(screen) => screen.handle_key(key),
            ScreenState::Search(screen) => screen.handle_key(key, ids),
            ScreenState::Diary(screen) => screen.handle_key(key, ids),
            ScreenState::Watchlist(screen) => screen.handle_key(key, ids),
            ScreenState::Lists(screen) => screen.handle_key(key, ids),
            ScreenState::Profile(screen) => screen.handle_key(key, ids),
        };

        match effect {
            Effect::Open(feature) => {
                self.screen = self.build(feature);
                tracing::debug!(screen = self.screen.name(), "opened screen");
                Effect::None
            }
            Effect::Menu => {
                self.screen = ScreenState::Menu(MenuScreen::new());
                tracing::debug!("returned to menu");
                Effect::None
            }
            other => other,
        }
    }

    pub fn handle_completion(&mut self, completion: Completion) {
        let Completion { id, outcome } = completion;

        let accepted = match outcome {
            Outcome::Quote(result) => {
                if self.quote_request != Some(id) {
                    false
                } else {
                    self.quote_request = None;
                    self.quote = match result {
                        Ok(quote) => QuoteLine::Loaded(quote),
                        Err(err) => {
                            tracing::warn!(error = %err, "quote unavailable");
                            QuoteLine::Failed(err.to_string())
                        }
                    };
                    true
                }
            }
            Outcome::Fetched(result) => match &mut self.screen {
                ScreenState::Search(screen) => screen.handle_fetched(id, result),
                ScreenState::Diary(screen) => screen.handle_fetched(id, result),
                ScreenState::Watchlist(screen) => screen.handle_fetched(id, result),
                ScreenState::Lists(screen) => screen.handle_fetched(id, result),
                ScreenState::Profile(screen) => screen.handle_fetched(id, result),
                ScreenState::Menu(_) => false,
            },
            Outcome::Exported(result) => match &mut self.screen {
                ScreenState::Diary(screen) => screen.handle_exported(id, result),
                ScreenState::Watchlist(screen) => screen.handle_exported(id, result),
                ScreenState::Lists(screen) => screen.handle_exported(id, result),
                _ => false,
            },
        };

        if !accepted {
            tracing::debug!(%id, screen = self.screen.name(), "discarding stale result");
        }
    }

    fn build(&self, feature: Feature) -> ScreenState {
        match feature {
            Feature::SearchMovie => {
                ScreenState::Search(SearchScreen::new(self.pagination.details_page_size))
            }
            Feature::UserProfile => {
                ScreenState::Profile(ProfileScreen::new(self.pagination.details_page_size))
            }
            Feature::Diary => ScreenState::Diary(DiaryScreen::new(self.pagination.diary_page_size)),
            Feature::Watchlist => ScreenState::Watchlist(WatchlistScreen::new()),
            Feature::Lists => ScreenState::Lists(ListsScreen::new()),
        }
    }
}
