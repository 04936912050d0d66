//! Core types module - shared data structures and constants
//!
//! Pure data types with no external dependencies, usable from the game core,
//! the session state machine, and any presentation adapter.
//!
//! # Grid Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//!
//! # Difficulty Presets
//!
//! Gravity is one cell per tick; the tick interval is fixed per difficulty:
//!
//! | Difficulty | Interval |
//! |------------|----------|
//! | Easy | 1000ms |
//! | Medium | 300ms |
//! | Hard | 100ms |
//!
//! # Examples
//!
//! ```
//! use russian_blocks_types::{Difficulty, PieceKind, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(PieceKind::from_id(PieceKind::T.id()), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_str("z"), Some(PieceKind::Z));
//! assert_eq!(Difficulty::Medium.tick_ms(), 300);
//! assert_eq!((GRID_ROWS, GRID_COLS), (20, 10));
//! ```

/// Number of rows in the play grid
pub const GRID_ROWS: u8 = 20;

/// Number of columns in the play grid
pub const GRID_COLS: u8 = 10;

/// Cell value of an empty grid cell
pub const EMPTY_CELL: u8 = 0;

/// Gravity tick interval for [`Difficulty::Easy`]
pub const EASY_TICK_MS: u32 = 1000;

/// Gravity tick interval for [`Difficulty::Medium`]
pub const MEDIUM_TICK_MS: u32 = 300;

/// Gravity tick interval for [`Difficulty::Hard`]
pub const HARD_TICK_MS: u32 = 100;

/// Points awarded every time a piece locks
pub const LOCK_BONUS: u32 = 10;

/// Points awarded per cleared line
pub const LINE_BONUS: u32 = 100;

/// The seven tetromino piece kinds
///
/// Board cells store [`PieceKind::id`] so renderers can pick a colour per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Non-zero cell value written into the board when this kind locks (1-7)
    pub fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]
    ///
    /// ```
    /// use russian_blocks_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Gravity speed preset chosen from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Milliseconds between gravity ticks
    pub fn tick_ms(self) -> u32 {
        match self {
            Difficulty::Easy => EASY_TICK_MS,
            Difficulty::Medium => MEDIUM_TICK_MS,
            Difficulty::Hard => HARD_TICK_MS,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Discrete key stimuli understood by the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Pause,
    Escape,
}

/// Top-level session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionMode {
    #[default]
    MainMenu,
    Playing,
    Paused,
    GameOver,
}

impl SessionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::MainMenu => "main_menu",
            SessionMode::Playing => "playing",
            SessionMode::Paused => "paused",
            SessionMode::GameOver => "game_over",
        }
    }
}

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainMenuItem {
    Easy,
    Medium,
    Hard,
    Credits,
    Quit,
}

impl MainMenuItem {
    pub const ALL: [MainMenuItem; 5] = [
        MainMenuItem::Easy,
        MainMenuItem::Medium,
        MainMenuItem::Hard,
        MainMenuItem::Credits,
        MainMenuItem::Quit,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Difficulty started by this entry, if it starts a game
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            MainMenuItem::Easy => Some(Difficulty::Easy),
            MainMenuItem::Medium => Some(Difficulty::Medium),
            MainMenuItem::Hard => Some(Difficulty::Hard),
            MainMenuItem::Credits | MainMenuItem::Quit => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MainMenuItem::Easy => "EASY",
            MainMenuItem::Medium => "MEDIUM",
            MainMenuItem::Hard => "HARD",
            MainMenuItem::Credits => "CREDITS",
            MainMenuItem::Quit => "QUIT",
        }
    }
}

/// Entries of the pause menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseMenuItem {
    MainMenu,
    NewGame,
    Resume,
}

impl PauseMenuItem {
    pub const ALL: [PauseMenuItem; 3] = [
        PauseMenuItem::MainMenu,
        PauseMenuItem::NewGame,
        PauseMenuItem::Resume,
    ];

    /// Entry selected whenever the pause menu opens
    pub const DEFAULT: PauseMenuItem = PauseMenuItem::Resume;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            PauseMenuItem::MainMenu => "MAIN MENU",
            PauseMenuItem::NewGame => "NEW GAME",
            PauseMenuItem::Resume => "RESUME",
        }
    }
}
