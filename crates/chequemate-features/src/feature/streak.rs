//! Momentum streak.
//!
//! Games are scanned from the most recent one, at most `max_checks` of them:
//!
//! - a win moves the counter to `counter + 1`, or to `+1` if it was negative
//! - a loss (checkmated, timeout, resigned) moves it to `counter - 1`, or to `-1` if it
//!   was positive
//! - any other result ends the scan; that game does not contribute
//!
//! ```text
//! [win, win, draw, loss]  ->  2
//! [loss, loss, win]       ->  1
//! [draw, win, win]        ->  0
//! ```

use chequemate_history::GameResult;

use crate::GameWindow;

/// Default number of games the streak scan looks at.
pub const DEFAULT_STREAK_LOOKBACK: usize = 10;

#[must_use]
pub fn streak(window: &GameWindow, max_checks: usize) -> i32 {
    streak_of(window.iter().map(|game| game.result), max_checks)
}

fn streak_of<I>(results: I, max_checks: usize) -> i32
where
    I: IntoIterator<Item = GameResult>,
{
    let mut streak = 0;
    for result in results.into_iter().take(max_checks) {
        if result.is_win() {
            streak = if streak >= 0 { streak + 1 } else { 1 };
        } else if result.is_loss() {
            streak = if streak <= 0 { streak - 1 } else { -1 };
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use chequemate_history::GameResult::{Checkmated, DrawOrOther, Resigned, Timeout, Win};

    use super::*;

    #[test]
    fn test_draw_stops_scan() {
        assert_eq!(streak_of([Win, Win, DrawOrOther, Resigned], 10), 2);
        assert_eq!(streak_of([DrawOrOther, Win, Win], 10), 0);
        assert_eq!(streak_of([Timeout, DrawOrOther, Timeout, Timeout], 10), -1);
    }

    #[test]
    fn test_direction_flips() {
        assert_eq!(streak_of([Checkmated, Checkmated, Win], 10), 1);
        assert_eq!(streak_of([Win, Win, Win, Resigned], 10), -1);
        assert_eq!(streak_of([Win, Timeout, Win], 10), 1);
    }

    #[test]
    fn test_lookback_bound() {
        let wins = [Win; 15];
        assert_eq!(streak_of(wins, 10), 10);
        assert_eq!(streak_of(wins, 3), 3);
        assert_eq!(streak_of(wins, 0), 0);
        assert_eq!(streak_of([Resigned; 4], 10), -4);
    }

    #[test]
    fn test_empty() {
        assert_eq!(streak(&GameWindow::default(), DEFAULT_STREAK_LOOKBACK), 0);
    }
}
