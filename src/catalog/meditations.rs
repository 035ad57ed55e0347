use crate::models::{MeditationEntry, MoodOption};

pub const DEFAULT_MEDITATION_ID: &str = "shunya";

const TEN_MINUTES: u32 = 600;

pub static MEDITATIONS: [MeditationEntry; 5] = [
    MeditationEntry {
        id: "trataka",
        title: "Trataka",
        source: "Hatha Yoga Pradipika",
        tags: &["focus", "distracted", "clarity"],
        instructions: "Gaze steadily at a single point (candle flame, dot, or center of the polyhedron) without blinking. When tears form or eyes tire, close them and visualize the afterimage in your mind's eye.",
        duration_seconds: TEN_MINUTES,
    },
    MeditationEntry {
        id: "neti-neti",
        title: "Neti Neti",
        source: "Advaita Vedanta",
        tags: &["clarity", "seeking clarity", "distracted"],
        instructions: "Observe each thought that arises and mentally declare \"not this, not that\" to disidentify from it. Rest in the awareness that remains when all mental objects are negated.",
        duration_seconds: TEN_MINUTES,
    },
    MeditationEntry {
        id: "box-breathing",
        title: "Box Breathing",
        source: "Pranayama / Navy SEALs",
        tags: &["anxious", "anxiety", "stress"],
        instructions: "Inhale for 4 counts, hold for 4, exhale for 4, hold empty for 4. Repeat this square pattern, syncing with the geometric collapse before you.",
        duration_seconds: TEN_MINUTES,
    },
    MeditationEntry {
        id: "the-gap",
        title: "The Gap",
        source: "Vigyan Bhairava Tantra",
        tags: &["tired", "deep rest", "sleep", "clarity"],
        instructions: "Notice the brief silence between the end of one thought and the beginning of the next. Sink into that gap, it is the doorway to pure consciousness.",
        duration_seconds: TEN_MINUTES,
    },
    MeditationEntry {
        id: DEFAULT_MEDITATION_ID,
        title: "Shunya",
        source: "Vigyan Bhairava Tantra",
        tags: &["seeking clarity", "clarity", "focus", "void"],
        instructions: "Place awareness in the void space at the center of your heart. As the polyhedron collapses to singularity, feel yourself merging with the infinite emptiness within.",
        duration_seconds: TEN_MINUTES,
    },
];

/// Fallback when no tag matches the declared mood.
pub static DEFAULT_MEDITATION: &MeditationEntry = &MEDITATIONS[4];

pub static MOOD_OPTIONS: [MoodOption; 4] = [
    MoodOption {
        label: "Anxious",
        value: "anxious",
    },
    MoodOption {
        label: "Distracted",
        value: "distracted",
    },
    MoodOption {
        label: "Tired",
        value: "tired",
    },
    MoodOption {
        label: "Seeking Clarity",
        value: "seeking clarity",
    },
];

pub fn meditation(id: &str) -> Option<&'static MeditationEntry> {
    MEDITATIONS.iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_points_at_shunya() {
        assert_eq!(DEFAULT_MEDITATION.id, DEFAULT_MEDITATION_ID);
        assert_eq!(meditation("shunya"), Some(DEFAULT_MEDITATION));
    }

    #[test]
    fn ids_are_unique_and_durations_positive() {
        let ids: HashSet<_> = MEDITATIONS.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), MEDITATIONS.len());
        assert!(MEDITATIONS.iter().all(|m| m.duration_seconds > 0));
    }

    #[test]
    fn every_mood_option_has_a_matching_meditation() {
        for option in &MOOD_OPTIONS {
            assert!(
                MEDITATIONS.iter().any(|m| m.has_tag(option.value)),
                "no meditation tagged {}",
                option.value
            );
        }
    }
}
