//! Screen navigation state machine.
//!
//! [`App`] is the single context object every front-end drives: it owns the
//! profile store, the current [`Screen`], and the running game session.
//! Screens that need a selected profile carry its id, so a dashboard or game
//! without a profile cannot be represented.

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::error::EngineError;
use crate::model::{Avatar, GameMode, Profile};
use crate::session::GameSession;
use crate::store::ProfileStore;
use crate::timeline::Timings;

/// The active screen and the data it renders.
#[derive(Debug)]
pub enum Screen {
    Welcome,
    ProfilePicker,
    CreateProfile,
    ProfileDashboard { profile: Uuid },
    GameSelect { profile: Uuid },
    Game { profile: Uuid, session: GameSession },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Welcome => "welcome",
            Screen::ProfilePicker => "profile picker",
            Screen::CreateProfile => "create profile",
            Screen::ProfileDashboard { .. } => "profile dashboard",
            Screen::GameSelect { .. } => "game select",
            Screen::Game { .. } => "game",
        }
    }

    /// The profile selected on this screen, if the screen has one.
    pub fn profile_id(&self) -> Option<Uuid> {
        match self {
            Screen::ProfileDashboard { profile }
            | Screen::GameSelect { profile }
            | Screen::Game { profile, .. } => Some(*profile),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A user action that may move between screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the welcome screen.
    Start,
    /// Open the create-profile form.
    CreateNew,
    /// Submit the create-profile form.
    SaveProfile {
        name: String,
        age: Option<u32>,
        avatar: Avatar,
    },
    SelectProfile(Uuid),
    /// Go from the dashboard to the game menu.
    StartGame,
    SelectGame(GameMode),
    Back,
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::CreateNew => "create a new profile",
            Action::SaveProfile { .. } => "save a profile",
            Action::SelectProfile(_) => "select a profile",
            Action::StartGame => "start a game",
            Action::SelectGame(_) => "select a game",
            Action::Back => "go back",
        }
    }
}

/// The application context.
pub struct App {
    screen: Screen,
    store: ProfileStore,
    timings: Timings,
    rng: StdRng,
}

impl App {
    pub fn new(store: ProfileStore, timings: Timings) -> Self {
        Self::with_rng(store, timings, StdRng::from_entropy())
    }

    /// Seeded app, so every game session it starts is reproducible.
    pub fn with_seed(store: ProfileStore, timings: Timings, seed: u64) -> Self {
        Self::with_rng(store, timings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: ProfileStore, timings: Timings, rng: StdRng) -> Self {
        Self {
            screen: Screen::Welcome,
            store,
            timings,
            rng,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn profiles(&self) -> &[Profile] {
        self.store.profiles()
    }

    pub fn selected_profile(&self) -> Option<&Profile> {
        self.screen.profile_id().and_then(|id| self.store.get(id))
    }

    pub fn session(&self) -> Option<&GameSession> {
        match &self.screen {
            Screen::Game { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        match &mut self.screen {
            Screen::Game { session, .. } => Some(session),
            _ => None,
        }
    }

    /// Apply `action` to the current screen.
    ///
    /// On error the screen is left unchanged.
    pub fn dispatch(&mut self, action: Action) -> Result<&Screen, EngineError> {
        let next = match (&self.screen, action) {
            (Screen::Welcome, Action::Start) => Screen::ProfilePicker,
            (Screen::ProfilePicker, Action::CreateNew) => Screen::CreateProfile,
            (Screen::ProfilePicker, Action::SelectProfile(id)) => {
                if self.store.get(id).is_none() {
                    return Err(EngineError::UnknownProfile(id));
                }
                Screen::ProfileDashboard { profile: id }
            }
            (Screen::CreateProfile, Action::Back) => Screen::ProfilePicker,
            (Screen::CreateProfile, Action::SaveProfile { name, age, avatar }) => {
                let profile = self.store.create_profile(&name, age, avatar)?;
                Screen::ProfileDashboard {
                    profile: profile.id,
                }
            }
            (Screen::ProfileDashboard { .. }, Action::Back) => Screen::ProfilePicker,
            (Screen::ProfileDashboard { profile }, Action::StartGame) => Screen::GameSelect {
                profile: *profile,
            },
            (Screen::GameSelect { profile }, Action::SelectGame(mode)) => {
                let profile = *profile;
                self.store.increment_stat(profile, mode);
                let session =
                    GameSession::new(mode, self.timings, StdRng::seed_from_u64(self.rng.gen()));
                Screen::Game { profile, session }
            }
            (Screen::GameSelect { profile }, Action::Back) => Screen::ProfileDashboard {
                profile: *profile,
            },
            (Screen::Game { profile, .. }, Action::Back) => Screen::GameSelect {
                profile: *profile,
            },
            (screen, action) => {
                return Err(EngineError::InvalidTransition {
                    screen: screen.name(),
                    action: action.describe(),
                })
            }
        };
        tracing::debug!(from = %self.screen, to = %next, "screen transition");
        self.screen = next;
        Ok(&self.screen)
    }

    /// Forward time to the running game, if any.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.session_mut().map_or(0, |s| s.advance(by))
    }

    /// Time until the running game's next scheduled callback.
    pub fn time_to_next_deadline(&self) -> Option<Duration> {
        let session = self.session()?;
        let deadline = session.next_deadline()?;
        Some(deadline.saturating_sub(session.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_seed(ProfileStore::in_memory(), Timings::default(), 9)
    }

    fn save(name: &str, age: Option<u32>) -> Action {
        Action::SaveProfile {
            name: name.into(),
            age,
            avatar: Avatar::Star,
        }
    }

    #[test]
    fn starts_on_welcome_and_never_returns() {
        let mut app = app();
        assert!(matches!(app.screen(), Screen::Welcome));
        assert!(app.dispatch(Action::Back).is_err());
        app.dispatch(Action::Start).unwrap();
        assert!(matches!(app.screen(), Screen::ProfilePicker));
        assert!(app.dispatch(Action::Start).is_err());
        assert!(app.dispatch(Action::Back).is_err());
    }

    #[test]
    fn create_back_discards_input() {
        let mut app = app();
        app.dispatch(Action::Start).unwrap();
        app.dispatch(Action::CreateNew).unwrap();
        app.dispatch(Action::Back).unwrap();
        assert!(matches!(app.screen(), Screen::ProfilePicker));
        assert!(app.profiles().is_empty());
    }

    #[test]
    fn failed_save_stays_on_form() {
        let mut app = app();
        app.dispatch(Action::Start).unwrap();
        app.dispatch(Action::CreateNew).unwrap();
        assert_eq!(
            app.dispatch(save(" ", Some(4))).unwrap_err(),
            EngineError::EmptyName
        );
        assert_eq!(
            app.dispatch(save("Mia", None)).unwrap_err(),
            EngineError::MissingAge
        );
        assert!(matches!(app.screen(), Screen::CreateProfile));
        assert!(app.profiles().is_empty());
    }

    #[test]
    fn save_selects_new_profile() {
        let mut app = app();
        app.dispatch(Action::Start).unwrap();
        app.dispatch(Action::CreateNew).unwrap();
        app.dispatch(save("Mia", Some(4))).unwrap();
        let selected = app.selected_profile().unwrap();
        assert_eq!(selected.name, "Mia");
        assert!(matches!(app.screen(), Screen::ProfileDashboard { .. }));
    }

    #[test]
    fn select_unknown_profile_fails() {
        let mut app = app();
        app.dispatch(Action::Start).unwrap();
        let id = Uuid::new_v4();
        assert_eq!(
            app.dispatch(Action::SelectProfile(id)).unwrap_err(),
            EngineError::UnknownProfile(id)
        );
        assert!(matches!(app.screen(), Screen::ProfilePicker));
    }

    #[test]
    fn selecting_a_game_counts_a_play() {
        let mut app = app();
        app.dispatch(Action::Start).unwrap();
        app.dispatch(Action::CreateNew).unwrap();
        app.dispatch(save("Mia", Some(4))).unwrap();
        app.dispatch(Action::StartGame).unwrap();
        app.dispatch(Action::SelectGame(GameMode::TapCount)).unwrap();

        let profile = app.selected_profile().unwrap();
        assert_eq!(profile.game_stats.tap_count, 1);
        assert_eq!(profile.game_stats.total(), 1);
        assert_eq!(app.session().unwrap().mode(), GameMode::TapCount);

        // Back to the menu and in again: another play.
        app.dispatch(Action::Back).unwrap();
        assert!(app.session().is_none());
        app.dispatch(Action::SelectGame(GameMode::TapCount)).unwrap();
        assert_eq!(app.selected_profile().unwrap().game_stats.tap_count, 2);
    }

    #[test]
    fn back_chain_returns_to_picker_and_clears_selection() {
        let mut app = app();
        app.dispatch(Action::Start).unwrap();
        app.dispatch(Action::CreateNew).unwrap();
        app.dispatch(save("Mia", Some(4))).unwrap();
        app.dispatch(Action::StartGame).unwrap();
        app.dispatch(Action::SelectGame(GameMode::Counting)).unwrap();

        app.dispatch(Action::Back).unwrap();
        assert!(matches!(app.screen(), Screen::GameSelect { .. }));
        app.dispatch(Action::Back).unwrap();
        assert!(matches!(app.screen(), Screen::ProfileDashboard { .. }));
        app.dispatch(Action::Back).unwrap();
        assert!(matches!(app.screen(), Screen::ProfilePicker));
        assert!(app.selected_profile().is_none());
    }

    #[test]
    fn time_only_flows_into_a_running_game() {
        let mut app = app();
        assert_eq!(app.advance(Duration::from_secs(10)), 0);
        assert_eq!(app.time_to_next_deadline(), None);

        app.dispatch(Action::Start).unwrap();
        app.dispatch(Action::CreateNew).unwrap();
        app.dispatch(save("Mia", Some(4))).unwrap();
        app.dispatch(Action::StartGame).unwrap();
        app.dispatch(Action::SelectGame(GameMode::Counting)).unwrap();

        assert_eq!(
            app.time_to_next_deadline(),
            Some(Duration::from_millis(400))
        );
        assert_eq!(app.advance(Duration::from_millis(400)), 1);
        assert_eq!(app.time_to_next_deadline(), None);
    }
}
