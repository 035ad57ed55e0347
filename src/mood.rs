use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{DEFAULT_MEDITATION, MEDITATIONS};
use crate::models::MeditationEntry;
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

/// Picks a meditation for a declared mood by loose tag matching.
#[derive(Debug, Clone, Copy)]
pub struct MoodSelector {
    entries: &'static [MeditationEntry],
    fallback: &'static MeditationEntry,
}

impl Default for MoodSelector {
    fn default() -> Self {
        Self::new(&MEDITATIONS, DEFAULT_MEDITATION)
    }
}

impl MoodSelector {
    pub fn new(entries: &'static [MeditationEntry], fallback: &'static MeditationEntry) -> Self {
        Self { entries, fallback }
    }

    /// Every entry with a tag that contains the mood or is contained in it,
    /// ignoring case. A blank mood matches nothing.
    pub fn candidates(&self, mood: &str) -> Vec<&'static MeditationEntry> {
        let mood = normalize(mood);
        if mood.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| {
                entry.tags.iter().any(|tag| {
                    let tag = tag.to_lowercase();
                    tag.contains(&mood) || mood.contains(&tag)
                })
            })
            .collect()
    }

    /// Uniform pick among [`candidates`](Self::candidates), or the fallback
    /// entry when there are none.
    pub fn select_for<R: Rng + ?Sized>(&self, mood: &str, rng: &mut R) -> &'static MeditationEntry {
        match self.candidates(mood).choose(rng) {
            Some(entry) => {
                log_debug!("mood '{}' matched meditation '{}'", mood, entry.id);
                *entry
            }
            None => {
                log_info!(
                    "no meditation matches mood '{}', using '{}'",
                    mood,
                    self.fallback.id
                );
                self.fallback
            }
        }
    }
}

fn normalize(mood: &str) -> String {
    mood.trim().to_lowercase()
}
