use chequemate_history::ECO_CODE_COUNT;

use crate::{GameWindow, StyleVector};

/// Normalized opening histogram over the whole window.
///
/// Games without an opening code are left out of both the counts and the divisor. With
/// no coded games at all the result is the zero vector.
#[must_use]
pub fn style_vector(window: &GameWindow) -> StyleVector {
    let mut counts = vec![0_u32; ECO_CODE_COUNT];
    for code in window.iter().filter_map(|game| game.opening) {
        counts[code.index()] += 1;
    }
    StyleVector::from_counts(&counts)
}
