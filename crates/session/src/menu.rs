//! Menu cursor with wraparound and disabled entries.

/// Selection state of an `N`-entry menu.
///
/// Disabled entries are never selected; moving the cursor skips over them.
/// When every entry is disabled the selection is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor<const N: usize> {
    enabled: [bool; N],
    selected: Option<usize>,
}

impl<const N: usize> MenuCursor<N> {
    /// All entries enabled, first entry selected
    pub fn new() -> Self {
        Self::with_enabled([true; N])
    }

    pub fn with_enabled(enabled: [bool; N]) -> Self {
        let mut cursor = Self {
            enabled,
            selected: None,
        };
        cursor.reset();
        cursor
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        self.enabled.get(index).copied().unwrap_or(false)
    }

    pub fn enabled(&self) -> [bool; N] {
        self.enabled
    }

    /// Select the first enabled entry
    pub fn reset(&mut self) {
        self.selected = (0..N).find(|&i| self.enabled[i]);
    }

    /// Select `index` if it is enabled; returns whether it was
    pub fn select(&mut self, index: usize) -> bool {
        if self.is_enabled(index) {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Move to the next enabled entry, wrapping past the end
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Move to the previous enabled entry, wrapping past the start
    pub fn prev(&mut self) -> bool {
        self.step(N - 1)
    }

    /// Returns whether the selection changed.
    fn step(&mut self, stride: usize) -> bool {
        let Some(current) = self.selected else {
            self.reset();
            return self.selected.is_some();
        };
        let mut candidate = current;
        for _ in 1..N {
            candidate = (candidate + stride) % N;
            if self.enabled[candidate] {
                self.selected = Some(candidate);
                return true;
            }
        }
        false
    }
}

impl<const N: usize> Default for MenuCursor<N> {
    fn default() -> Self {
        Self::new()
    }
}
