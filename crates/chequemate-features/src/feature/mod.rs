//! The four feature groups computed from a [`GameWindow`](crate::GameWindow).
//!
//! Each group is independent and reads the window (most recent game first) without
//! modifying it.
//!
//! | group                | module               | output                | window used        |
//! |----------------------|----------------------|-----------------------|--------------------|
//! | rating               | [`rating`]           | `Option<u32>`         | index 0 only       |
//! | streak               | [`streak`]           | `i32`                 | first N games      |
//! | time preference      | [`time_preference`]  | [`TimePreference`]    | all games          |
//! | style vector         | [`style`]            | [`StyleVector`]       | all coded games    |
//!
//! [`TimePreference`]: crate::TimePreference
//! [`StyleVector`]: crate::StyleVector

pub use self::{
    rating::current_rating, streak::streak, style::style_vector,
    time_preference::time_preference,
};

pub mod rating;
pub mod streak;
pub mod style;
pub mod time_preference;
