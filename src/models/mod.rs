mod meditation;
mod session;
mod stage;

pub use meditation::{MeditationEntry, MoodOption};
pub use session::{ActiveSession, Screen, SessionState};
pub use stage::{Pathway, Stage};
