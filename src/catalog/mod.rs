//! Process-wide, read-only content: the meditation library, the pathway and
//! the moods the picker offers.

mod meditations;
mod pathways;

pub use meditations::{meditation, DEFAULT_MEDITATION, DEFAULT_MEDITATION_ID, MEDITATIONS, MOOD_OPTIONS};
pub use pathways::VOID_PATH;
