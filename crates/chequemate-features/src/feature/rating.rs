use crate::GameWindow;

/// Own rating in the most recent game, or `None` for an empty window.
#[must_use]
pub fn current_rating(window: &GameWindow) -> Option<u32> {
    window.latest().map(|game| game.own_rating)
}

#[cfg(test)]
mod tests {
    use chequemate_history::{GameRecord, GameResult, PlayerColor};

    use super::*;

    fn game(own_rating: u32) -> GameRecord {
        GameRecord {
            color: PlayerColor::Black,
            own_rating,
            opponent_rating: 1000,
            result: GameResult::Win,
            time_control: "600".to_owned(),
            opening: None,
        }
    }

    #[test]
    fn test_uses_most_recent_game() {
        let window = GameWindow::from_chronological(vec![game(1400), game(1450), game(1432)]);
        assert_eq!(current_rating(&window), Some(1432));
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(current_rating(&GameWindow::default()), None);
    }
}
