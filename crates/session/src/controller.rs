//! Session state machine: main menu, playing, paused and game over.
//!
//! The controller is the single dispatch point for the two external stimuli,
//! key presses and gravity ticks. It runs every call to completion on the
//! caller's thread and assumes the caller serializes dispatch (one key or tick
//! at a time), which a normal event loop does.
//!
//! Each call returns an [`Effect`] telling the adapter what to do next: redraw,
//! restart or stop its gravity timer, show credits, or quit.

use log::{debug, info};

use crate::core::{GameEngine, GameSnapshot};
use crate::menu::MenuCursor;
use crate::types::{Difficulty, Key, MainMenuItem, PauseMenuItem, SessionMode};

/// Number of main menu entries
pub const MAIN_MENU_LEN: usize = MainMenuItem::ALL.len();

/// Number of pause menu entries
pub const PAUSE_MENU_LEN: usize = PauseMenuItem::ALL.len();

/// Instruction for the adapter after a stimulus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stimulus ignored; nothing changed
    None,
    /// State changed; repaint
    Redraw,
    /// A fresh gravity timer is armed; drop any pending deadline and repaint
    TimerRestarted { interval_ms: u32, epoch: u32 },
    /// The gravity timer must stop; repaint
    TimerStopped,
    /// Open the credits view
    ShowCredits,
    /// Terminate the application
    Quit,
}

/// The gravity timer the adapter should be running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    pub interval_ms: u32,
    /// Changes every time a new timer is armed
    pub epoch: u32,
}

/// Everything a renderer needs, copied out of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub mode: SessionMode,
    pub main_selection: Option<MainMenuItem>,
    pub main_enabled: [bool; MAIN_MENU_LEN],
    pub pause_selection: PauseMenuItem,
    pub difficulty: Difficulty,
    pub game: GameSnapshot,
}

#[derive(Debug, Clone)]
pub struct SessionController {
    mode: SessionMode,
    engine: GameEngine,
    main_menu: MenuCursor<MAIN_MENU_LEN>,
    pause_menu: MenuCursor<PAUSE_MENU_LEN>,
    difficulty: Difficulty,
    timer_epoch: u32,
    /// Space fired a hard drop and has not been released since
    hard_drop_latched: bool,
}

impl SessionController {
    /// Start at the main menu with every entry available
    pub fn new(seed: u32) -> Self {
        Self::with_disabled_main_items(seed, [false; MAIN_MENU_LEN])
    }

    /// Start at the main menu; `disabled[i]` hides main menu entry `i` from navigation
    pub fn with_disabled_main_items(seed: u32, disabled: [bool; MAIN_MENU_LEN]) -> Self {
        let mut pause_menu = MenuCursor::new();
        pause_menu.select(PauseMenuItem::DEFAULT.index());
        Self {
            mode: SessionMode::MainMenu,
            engine: GameEngine::new(seed),
            main_menu: MenuCursor::with_enabled(disabled.map(|d| !d)),
            pause_menu,
            difficulty: Difficulty::default(),
            timer_epoch: 0,
            hard_drop_latched: false,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn main_selection(&self) -> Option<MainMenuItem> {
        self.main_menu.selected().and_then(MainMenuItem::from_index)
    }

    pub fn pause_selection(&self) -> PauseMenuItem {
        self.pause_menu
            .selected()
            .and_then(PauseMenuItem::from_index)
            .unwrap_or(PauseMenuItem::DEFAULT)
    }

    /// Gravity timer that should be running, `None` unless playing
    pub fn timer(&self) -> Option<TimerSpec> {
        (self.mode == SessionMode::Playing).then_some(TimerSpec {
            interval_ms: self.difficulty.tick_ms(),
            epoch: self.timer_epoch,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            main_selection: self.main_selection(),
            main_enabled: self.main_menu.enabled(),
            pause_selection: self.pause_selection(),
            difficulty: self.difficulty,
            game: self.engine.snapshot(),
        }
    }

    /// Start a game directly, as if `difficulty` were confirmed in the main menu
    pub fn start(&mut self, difficulty: Difficulty) -> Effect {
        self.difficulty = difficulty;
        info!("starting {} game", difficulty.as_str());
        self.new_game()
    }

    /// Dispatch a key press
    pub fn on_key(&mut self, key: Key) -> Effect {
        match self.mode {
            SessionMode::MainMenu => self.main_menu_key(key),
            SessionMode::Playing => self.playing_key(key),
            SessionMode::Paused => self.paused_key(key),
            SessionMode::GameOver => self.game_over_key(key),
        }
    }

    /// Dispatch a key release (re-arms the hard drop)
    pub fn on_key_release(&mut self, key: Key) {
        if key == Key::Space {
            self.hard_drop_latched = false;
        }
    }

    /// Periodic gravity tick; a no-op unless playing
    pub fn on_tick(&mut self) -> Effect {
        if self.mode != SessionMode::Playing {
            return Effect::None;
        }
        self.engine.gravity_tick();
        self.after_engine_step()
    }

    fn main_menu_key(&mut self, key: Key) -> Effect {
        match key {
            Key::Up => redraw_if(self.main_menu.prev()),
            Key::Down => redraw_if(self.main_menu.next()),
            Key::Enter => self.confirm_main(),
            _ => Effect::None,
        }
    }

    fn confirm_main(&mut self) -> Effect {
        let Some(item) = self.main_selection() else {
            debug!("main menu confirm with no enabled entry");
            return Effect::None;
        };
        match item {
            MainMenuItem::Easy | MainMenuItem::Medium | MainMenuItem::Hard => {
                let difficulty = item.difficulty().unwrap_or_default();
                self.start(difficulty)
            }
            MainMenuItem::Credits => Effect::ShowCredits,
            MainMenuItem::Quit => {
                info!("quit selected");
                Effect::Quit
            }
        }
    }

    fn playing_key(&mut self, key: Key) -> Effect {
        match key {
            Key::Left => redraw_if(self.engine.try_move(-1, 0)),
            Key::Right => redraw_if(self.engine.try_move(1, 0)),
            Key::Up => redraw_if(self.engine.try_rotate()),
            Key::Down => {
                self.engine.soft_drop();
                self.after_engine_step()
            }
            Key::Space => {
                if self.hard_drop_latched {
                    return Effect::None;
                }
                self.hard_drop_latched = true;
                self.engine.hard_drop();
                self.after_engine_step()
            }
            Key::Pause => self.pause(),
            Key::Escape => self.to_main_menu(),
            Key::Enter => Effect::None,
        }
    }

    fn paused_key(&mut self, key: Key) -> Effect {
        match key {
            Key::Up => redraw_if(self.pause_menu.prev()),
            Key::Down => redraw_if(self.pause_menu.next()),
            Key::Enter => match self.pause_selection() {
                PauseMenuItem::MainMenu => self.to_main_menu(),
                PauseMenuItem::NewGame => self.new_game(),
                PauseMenuItem::Resume => self.resume(),
            },
            Key::Pause | Key::Escape => self.resume(),
            _ => Effect::None,
        }
    }

    fn game_over_key(&mut self, key: Key) -> Effect {
        match key {
            Key::Enter => self.to_main_menu(),
            _ => Effect::None,
        }
    }

    fn new_game(&mut self) -> Effect {
        self.engine.start_new_game();
        self.transition(SessionMode::Playing);
        if self.engine.game_over() {
            return self.finish_game();
        }
        self.arm_timer()
    }

    fn pause(&mut self) -> Effect {
        self.pause_menu.select(PauseMenuItem::DEFAULT.index());
        self.transition(SessionMode::Paused);
        Effect::TimerStopped
    }

    fn resume(&mut self) -> Effect {
        self.transition(SessionMode::Playing);
        self.arm_timer()
    }

    fn to_main_menu(&mut self) -> Effect {
        let had_timer = self.mode == SessionMode::Playing;
        self.engine.stop();
        self.main_menu.reset();
        self.transition(SessionMode::MainMenu);
        if had_timer {
            Effect::TimerStopped
        } else {
            Effect::Redraw
        }
    }

    /// Leave Playing for GameOver if the last engine call ended the game
    fn after_engine_step(&mut self) -> Effect {
        if self.engine.game_over() {
            self.finish_game()
        } else {
            Effect::Redraw
        }
    }

    fn finish_game(&mut self) -> Effect {
        info!(
            "game over: score {}, lines {}, pieces {}",
            self.engine.score(),
            self.engine.lines(),
            self.engine.pieces_locked()
        );
        self.transition(SessionMode::GameOver);
        Effect::TimerStopped
    }

    fn arm_timer(&mut self) -> Effect {
        self.timer_epoch = self.timer_epoch.wrapping_add(1);
        Effect::TimerRestarted {
            interval_ms: self.difficulty.tick_ms(),
            epoch: self.timer_epoch,
        }
    }

    fn transition(&mut self, to: SessionMode) {
        if self.mode != to {
            info!("session {} -> {}", self.mode.as_str(), to.as_str());
        }
        self.mode = to;
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }
}

fn redraw_if(changed: bool) -> Effect {
    if changed {
        Effect::Redraw
    } else {
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivePiece, Board};
    use crate::types::{PieceKind, GRID_ROWS};

    fn playing() -> SessionController {
        let mut session = SessionController::new(12345);
        assert!(matches!(
            session.on_key(Key::Enter),
            Effect::TimerRestarted { .. }
        ));
        session
    }

    #[test]
    fn test_starts_in_main_menu() {
        let session = SessionController::new(1);
        assert_eq!(session.mode(), SessionMode::MainMenu);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Easy));
        assert!(session.timer().is_none());
    }

    #[test]
    fn test_difficulty_sets_tick_interval() {
        let mut session = SessionController::new(1);
        session.on_key(Key::Down);
        session.on_key(Key::Down);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Hard));
        let effect = session.on_key(Key::Enter);
        assert_eq!(
            effect,
            Effect::TimerRestarted {
                interval_ms: 100,
                epoch: 1
            }
        );
        assert_eq!(session.mode(), SessionMode::Playing);
        assert_eq!(session.timer().unwrap().interval_ms, 100);
    }

    #[test]
    fn test_credits_and_quit_are_effects() {
        let mut session = SessionController::new(1);
        session.on_key(Key::Up);
        session.on_key(Key::Up);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Credits));
        assert_eq!(session.on_key(Key::Enter), Effect::ShowCredits);
        assert_eq!(session.mode(), SessionMode::MainMenu);
        session.on_key(Key::Down);
        assert_eq!(session.on_key(Key::Enter), Effect::Quit);
    }

    #[test]
    fn test_disabled_items_are_skipped() {
        let mut session =
            SessionController::with_disabled_main_items(1, [true, false, true, true, false]);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Medium));
        session.on_key(Key::Down);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Quit));
        session.on_key(Key::Down);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Medium));
    }

    #[test]
    fn test_all_disabled_ignores_confirm() {
        let mut session = SessionController::with_disabled_main_items(1, [true; 5]);
        assert_eq!(session.main_selection(), None);
        assert_eq!(session.on_key(Key::Enter), Effect::None);
        assert_eq!(session.mode(), SessionMode::MainMenu);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut session = SessionController::new(1);
        assert_eq!(session.on_tick(), Effect::None);

        let mut session = playing();
        session.on_key(Key::Pause);
        let before = session.snapshot();
        for _ in 0..100 {
            assert_eq!(session.on_tick(), Effect::None);
        }
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_tick_applies_gravity() {
        let mut session = playing();
        let y = session.engine().active().unwrap().y;
        assert_eq!(session.on_tick(), Effect::Redraw);
        assert_eq!(session.engine().active().unwrap().y, y + 1);
    }

    #[test]
    fn test_pause_defaults_to_resume_and_resume_rearms_timer() {
        let mut session = playing();
        assert_eq!(session.on_key(Key::Pause), Effect::TimerStopped);
        assert_eq!(session.mode(), SessionMode::Paused);
        assert_eq!(session.pause_selection(), PauseMenuItem::Resume);
        assert!(session.timer().is_none());

        session.on_key(Key::Down);
        assert_eq!(session.pause_selection(), PauseMenuItem::MainMenu);
        session.on_key(Key::Up);
        assert_eq!(session.pause_selection(), PauseMenuItem::Resume);

        let effect = session.on_key(Key::Enter);
        assert_eq!(
            effect,
            Effect::TimerRestarted {
                interval_ms: 1000,
                epoch: 2
            }
        );
        assert_eq!(session.mode(), SessionMode::Playing);
    }

    #[test]
    fn test_pause_key_toggles_back() {
        let mut session = playing();
        session.on_key(Key::Pause);
        assert!(matches!(
            session.on_key(Key::Pause),
            Effect::TimerRestarted { .. }
        ));
        assert_eq!(session.mode(), SessionMode::Playing);
    }

    #[test]
    fn test_pause_new_game_resets_and_rearms() {
        let mut session = playing();
        session.on_key(Key::Space);
        assert!(session.engine().score() > 0);
        session.on_key(Key::Pause);
        session.on_key(Key::Up);
        assert_eq!(session.pause_selection(), PauseMenuItem::NewGame);
        let effect = session.on_key(Key::Enter);
        assert!(matches!(effect, Effect::TimerRestarted { epoch: 2, .. }));
        assert_eq!(session.engine().score(), 0);
        assert_eq!(session.mode(), SessionMode::Playing);
    }

    #[test]
    fn test_pause_main_menu_stops_engine() {
        let mut session = playing();
        session.on_key(Key::Pause);
        session.on_key(Key::Down);
        assert_eq!(session.on_key(Key::Enter), Effect::Redraw);
        assert_eq!(session.mode(), SessionMode::MainMenu);
        assert!(!session.engine().is_running());
        assert_eq!(session.main_selection(), Some(MainMenuItem::Easy));
    }

    #[test]
    fn test_escape_while_playing_returns_to_menu() {
        let mut session = playing();
        assert_eq!(session.on_key(Key::Escape), Effect::TimerStopped);
        assert_eq!(session.mode(), SessionMode::MainMenu);
        assert!(session.timer().is_none());
    }

    #[test]
    fn test_hard_drop_is_edge_triggered() {
        let mut session = playing();
        assert_eq!(session.on_key(Key::Space), Effect::Redraw);
        let locked = session.engine().pieces_locked();
        assert_eq!(session.on_key(Key::Space), Effect::None);
        assert_eq!(session.engine().pieces_locked(), locked);

        session.on_key_release(Key::Space);
        session.on_key(Key::Space);
        assert_eq!(session.engine().pieces_locked(), locked + 1);
    }

    #[test]
    fn test_blocked_spawn_moves_to_game_over() {
        let mut session = playing();
        // Block the spawn columns of row 0, leave the rest empty.
        let mut board = Board::new();
        for x in 3..7 {
            board.set(x, 0, 1);
        }
        *session.engine_mut().board_mut() = board;
        session.engine_mut().set_active(ActivePiece {
            kind: PieceKind::O,
            rotation: 0,
            x: 0,
            y: GRID_ROWS as i8 - 2,
        });
        assert_eq!(session.on_key(Key::Down), Effect::TimerStopped);
        assert_eq!(session.mode(), SessionMode::GameOver);
        assert!(session.timer().is_none());
        assert_eq!(session.on_tick(), Effect::None);

        assert_eq!(session.on_key(Key::Space), Effect::None);
        assert_eq!(session.on_key(Key::Enter), Effect::Redraw);
        assert_eq!(session.mode(), SessionMode::MainMenu);
        assert_eq!(session.main_selection(), Some(MainMenuItem::Easy));
    }

    #[test]
    fn test_soft_drop_moves_down() {
        let mut session = playing();
        let y = session.engine().active().unwrap().y;
        session.on_key(Key::Down);
        assert_eq!(session.engine().active().unwrap().y, y + 1);
        assert!(y + 1 < GRID_ROWS as i8);
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let mut session = SessionController::new(1);
        assert_eq!(session.on_key(Key::Space), Effect::None);
        assert_eq!(session.on_key(Key::Left), Effect::None);
        let mut session = playing();
        assert_eq!(session.on_key(Key::Enter), Effect::None);
    }
}
