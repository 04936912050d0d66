//! Held-key tracking for terminal environments.
//!
//! Turns crossterm press/repeat/release events into [`KeyInput`] values.
//! Terminals that report key releases are handled directly. For terminals that
//! never do, a key counts as released once no press or auto-repeat for it has
//! arrived within the release timeout; call [`KeyTracker::expire`] from the
//! event loop to collect those synthesized releases.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::Key;

/// Longer than the usual initial auto-repeat delay (roughly 500ms), so a held
/// key is not released between the first press and the first repeat.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 600;

/// Keys tracked at once; further simultaneous keys are not tracked
pub const MAX_HELD_KEYS: usize = 8;

/// A key transition for the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Pressed(Key),
    Released(Key),
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    key: Key,
    last_seen_ms: u64,
}

#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: ArrayVec<HeldKey, MAX_HELD_KEYS>,
    release_timeout_ms: u32,
    /// The terminal has sent at least one real release event
    reports_releases: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::with_release_timeout_ms(DEFAULT_KEY_RELEASE_TIMEOUT_MS)
    }

    pub fn with_release_timeout_ms(release_timeout_ms: u32) -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout_ms,
            reports_releases: false,
        }
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|h| h.key == key)
    }

    /// Feed one terminal key event observed at `now_ms`.
    ///
    /// Presses and auto-repeats both yield `Pressed`; downstream decides which
    /// keys act on repeats.
    pub fn handle_event(&mut self, event: KeyEvent, now_ms: u64) -> Option<KeyInput> {
        let key = map_key(event)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.touch(key, now_ms);
                Some(KeyInput::Pressed(key))
            }
            KeyEventKind::Release => {
                self.reports_releases = true;
                self.forget(key);
                Some(KeyInput::Released(key))
            }
        }
    }

    /// Release keys that have gone quiet for longer than the timeout.
    ///
    /// Does nothing on terminals that report real releases.
    pub fn expire(&mut self, now_ms: u64) -> ArrayVec<Key, MAX_HELD_KEYS> {
        let mut released = ArrayVec::new();
        if self.reports_releases {
            return released;
        }
        let timeout = self.release_timeout_ms as u64;
        self.held.retain(|h| {
            let stale = now_ms.saturating_sub(h.last_seen_ms) >= timeout;
            if stale {
                released.push(h.key);
            }
            !stale
        });
        released
    }

    fn touch(&mut self, key: Key, now_ms: u64) {
        if let Some(h) = self.held.iter_mut().find(|h| h.key == key) {
            h.last_seen_ms = now_ms;
        } else if !self.held.is_full() {
            self.held.push(HeldKey {
                key,
                last_seen_ms: now_ms,
            });
        }
    }

    fn forget(&mut self, key: Key) {
        self.held.retain(|h| h.key != key);
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
