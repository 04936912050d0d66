//! Scoring: a flat bonus per locked piece plus a flat bonus per cleared line.

use crate::types::{LINE_BONUS, LOCK_BONUS};

/// Points for one lock that cleared `lines_cleared` rows
pub fn lock_score(lines_cleared: usize) -> u32 {
    LOCK_BONUS + LINE_BONUS * lines_cleared as u32
}
