use crossterm::event::{KeyCode, KeyEvent};
use letterbox_runtime::{Error, Payload, Request};
use letterbox_types::UserDetails;

use super::{USERNAME_LIMIT, is_quit, unexpected_payload};
use crate::tui::effect::{Effect, RequestId, RequestIds};
use crate::tui::widgets::{Pager, TextInput, cycle};

/// Recent activity shows at most this many films.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTab {
    Profile,
    Favorites,
    Recent,
    Reviews,
    Social,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 5] = [
        ProfileTab::Profile,
        ProfileTab::Favorites,
        ProfileTab::Recent,
        ProfileTab::Reviews,
        ProfileTab::Social,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ProfileTab::Profile => "Profile",
            ProfileTab::Favorites => "Favorites",
            ProfileTab::Recent => "Recent",
            ProfileTab::Reviews => "Reviews",
            ProfileTab::Social => "Social",
        }
    }

    /// Reviews and Social use left/right for paging.
    pub fn is_paged(self) -> bool {
        matches!(self, ProfileTab::Reviews | ProfileTab::Social)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn step(self, forward: bool) -> Self {
        Self::ALL[cycle(self.index(), Self::ALL.len(), forward)]
    }
}

#[derive(Debug)]
pub enum ProfilePhase {
    Input,
    Loading {
        id: RequestId,
    },
    Details {
        user: Box<UserDetails>,
        tab: ProfileTab,
        reviews: Pager,
        social: Pager,
    },
    Error {
        message: String,
    },
}

#[derive(Debug)]
pub struct ProfileScreen {
    input: TextInput,
    phase: ProfilePhase,
    per_page: usize,
}

impl ProfileScreen {
    pub fn new(per_page: usize) -> Self {
        Self {
            input: TextInput::new(USERNAME_LIMIT, "Enter a Letterboxd username..."),
            phase: ProfilePhase::Input,
            per_page,
        }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn phase(&self) -> &ProfilePhase {
        &self.phase
    }

    pub fn handle_key(&mut self, key: KeyEvent, ids: &mut RequestIds) -> Effect {
        match &mut self.phase {
            ProfilePhase::Input => match key.code {
                KeyCode::Esc => Effect::Menu,
                KeyCode::Enter => {
                    let id = ids.next_id();
                    self.phase = ProfilePhase::Loading { id };
                    Effect::Fetch {
                        id,
                        request: Request::UserDetails {
                            username: self.input.value(),
                        },
                    }
                }
                _ => {
                    self.input.handle_key(key);
                    Effect::None
                }
            },
            ProfilePhase::Loading { .. } => match key.code {
                KeyCode::Esc => Effect::Menu,
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
            ProfilePhase::Details {
                tab,
                reviews,
                social,
                ..
            } => {
                let pager = match tab {
                    ProfileTab::Reviews => Some(reviews),
                    ProfileTab::Social => Some(social),
                    _ => None,
                };
                match (key.code, pager) {
                    (KeyCode::Esc, _) => self.phase = ProfilePhase::Input,
                    (KeyCode::Tab, _) => *tab = tab.step(true),
                    (KeyCode::BackTab, _) => *tab = tab.step(false),
                    (KeyCode::Right | KeyCode::Char('l'), Some(pager)) => pager.next(),
                    (KeyCode::Left | KeyCode::Char('h'), Some(pager)) => pager.prev(),
                    (KeyCode::Right | KeyCode::Char('l'), None) => *tab = tab.step(true),
                    (KeyCode::Left | KeyCode::Char('h'), None) => *tab = tab.step(false),
                    _ if is_quit(&key) => return Effect::Quit,
                    _ => {}
                }
                Effect::None
            }
            ProfilePhase::Error { .. } => match key.code {
                KeyCode::Esc => {
                    self.phase = ProfilePhase::Input;
                    Effect::None
                }
                _ if is_quit(&key) => Effect::Quit,
                _ => Effect::None,
            },
        }
    }

    pub fn handle_fetched(&mut self, id: RequestId, result: Result<Payload, Error>) -> bool {
        match &self.phase {
            ProfilePhase::Loading { id: want } if *want == id => {
                self.phase = match result {
                    Ok(Payload::User(mut user)) => {
                        user.sort_reviews_newest_first();
                        ProfilePhase::Details {
                            reviews: Pager::new(user.reviews.len(), self.per_page),
                            social: Pager::new(user.social_len(), self.per_page),
                            user,
                            tab: ProfileTab::Profile,
                        }
                    }
                    Ok(other) => ProfilePhase::Error {
                        message: unexpected_payload("a user profile", &other),
                    },
                    Err(err) => ProfilePhase::Error {
                        message: err.to_string(),
                    },
                };
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::test_support::{ch, key, type_text};
    use letterbox_types::UserReview;

    fn user() -> UserDetails {
        UserDetails {
            username: "dave".to_string(),
            following: (0..12).map(|i| format!("f{}", i)).collect(),
            followers: vec!["parker".to_string()],
            reviews: vec![
                UserReview {
                    movie_name: "Old".to_string(),
                    review_date: "2023-01-01".to_string(),
                    ..UserReview::default()
                },
                UserReview {
                    movie_name: "Undated".to_string(),
                    review_date: "sometime".to_string(),
                    ..UserReview::default()
                },
                UserReview {
                    movie_name: "New".to_string(),
                    review_date: "2024-06-01".to_string(),
                    ..UserReview::default()
                },
            ],
            ..UserDetails::default()
        }
    }

    fn load(screen: &mut ProfileScreen, ids: &mut RequestIds) {
        type_text(|k, ids| screen.handle_key(k, ids), ids, "dave");
        let Effect::Fetch { id, request } = screen.handle_key(key(KeyCode::Enter), ids) else {
            panic!("expected fetch");
        };
        assert_eq!(
            request,
            Request::UserDetails {
                username: "dave".to_string()
            }
        );
        assert!(screen.handle_fetched(id, Ok(Payload::User(Box::new(user())))));
    }

    fn tab(screen: &ProfileScreen) -> ProfileTab {
        match screen.phase() {
            ProfilePhase::Details { tab, .. } => *tab,
            other => panic!("expected details, got {:?}", other),
        }
    }

    #[test]
    fn test_reviews_sorted_newest_first_on_load() {
        let mut ids = RequestIds::new();
        let mut screen = ProfileScreen::new(5);
        load(&mut screen, &mut ids);

        match screen.phase() {
            ProfilePhase::Details { user, social, .. } => {
                let names: Vec<&str> = user.reviews.iter().map(|r| r.movie_name.as_str()).collect();
                assert_eq!(names, vec!["New", "Old", "Undated"]);
                assert_eq!(social.total_pages(), 3);
            }
            other => panic!("expected details, got {:?}", other),
        }
    }

    #[test]
    fn test_arrows_switch_tabs_until_paged_tab() {
        let mut ids = RequestIds::new();
        let mut screen = ProfileScreen::new(5);
        load(&mut screen, &mut ids);

        screen.handle_key(key(KeyCode::Right), &mut ids);
        screen.handle_key(ch('l'), &mut ids);
        screen.handle_key(key(KeyCode::Right), &mut ids);
        assert_eq!(tab(&screen), ProfileTab::Reviews);

        // Paged tabs: arrows move the page, tab key moves the tab.
        screen.handle_key(key(KeyCode::Right), &mut ids);
        assert_eq!(tab(&screen), ProfileTab::Reviews);
        screen.handle_key(key(KeyCode::Tab), &mut ids);
        assert_eq!(tab(&screen), ProfileTab::Social);

        screen.handle_key(key(KeyCode::Right), &mut ids);
        screen.handle_key(key(KeyCode::Right), &mut ids);
        match screen.phase() {
            ProfilePhase::Details { social, reviews, .. } => {
                assert_eq!(social.page(), 2);
                assert_eq!(reviews.page(), 0);
            }
            other => panic!("expected details, got {:?}", other),
        }

        screen.handle_key(key(KeyCode::Tab), &mut ids);
        assert_eq!(tab(&screen), ProfileTab::Profile);
        screen.handle_key(key(KeyCode::Left), &mut ids);
        assert_eq!(tab(&screen), ProfileTab::Social);
    }

    #[test]
    fn test_back_returns_to_input() {
        let mut ids = RequestIds::new();
        let mut screen = ProfileScreen::new(5);
        load(&mut screen, &mut ids);

        assert_eq!(screen.handle_key(key(KeyCode::Esc), &mut ids), Effect::None);
        assert!(matches!(screen.phase(), ProfilePhase::Input));
        assert_eq!(screen.handle_key(key(KeyCode::Esc), &mut ids), Effect::Menu);
    }

    #[test]
    fn test_wrong_payload_is_an_error() {
        let mut ids = RequestIds::new();
        let mut screen = ProfileScreen::new(5);
        let Effect::Fetch { id, .. } = screen.handle_key(key(KeyCode::Enter), &mut ids) else {
            panic!("expected fetch");
        };
        assert!(screen.handle_fetched(id, Ok(Payload::Movies(Vec::new()))));
        assert!(matches!(screen.phase(), ProfilePhase::Error { .. }));
    }
}
