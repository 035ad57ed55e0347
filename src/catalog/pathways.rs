use crate::models::{Pathway, Stage};

static VOID_STAGES: [Stage; 7] = [
    Stage {
        id: 1,
        title: "The Pause",
        technique: "Breath Awareness",
        instruction: "Focus only on the gap between your inhale and exhale. The void exists in that split second of silence.",
        duration_seconds: 300,
        ordinal: 1,
    },
    Stage {
        id: 2,
        title: "The Turning",
        technique: "Retrograde Attention",
        instruction: "As you breathe in, feel the breath turn down. As you breathe out, feel it turn up. Be the turning point.",
        duration_seconds: 480,
        ordinal: 2,
    },
    Stage {
        id: 3,
        title: "The Skin of Nothingness",
        technique: "Dissolution",
        instruction: "Imagine your skin is just a thin shell separating the infinite void outside from the infinite void inside. Pop the shell.",
        duration_seconds: 600,
        ordinal: 3,
    },
    Stage {
        id: 4,
        title: "The Silent Sound",
        technique: "Anahata",
        instruction: "Cover your ears. Listen to the sound of silence within. It is a hum that has no source. Dive into it.",
        duration_seconds: 600,
        ordinal: 4,
    },
    Stage {
        id: 5,
        title: "The Dark Mirror",
        technique: "Trataka",
        instruction: "Close your eyes. Stare into the darkness. Do not look for light. Accept the darkness as the mother of all light.",
        duration_seconds: 720,
        ordinal: 5,
    },
    Stage {
        id: 6,
        title: "The Sky Mind",
        technique: "Expansion",
        instruction: "Go outside or imagine the sky. Your mind is not in your head. Your mind is the blue sky. It has no walls.",
        duration_seconds: 900,
        ordinal: 6,
    },
    Stage {
        id: 7,
        title: "SHUNYA",
        technique: "Total Abandonment",
        instruction: "Drop all techniques. Drop the observer. Be the zero point.",
        duration_seconds: 1200,
        ordinal: 7,
    },
];

/// Seven techniques from the Vigyan Bhairava Tantra, taken in order.
pub static VOID_PATH: Pathway = Pathway {
    id: "path-void",
    title: "The Path of the Void",
    description: "Ancient techniques from the Vigyan Bhairava Tantra to dissolve the ego.",
    stages: &VOID_STAGES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_path_is_well_formed() {
        assert_eq!(VOID_PATH.len(), 7);
        assert_eq!(VOID_PATH.validate(), Ok(()));
    }

    #[test]
    fn durations_match_the_published_schedule() {
        let minutes: Vec<u32> = VOID_PATH
            .stages()
            .iter()
            .map(|s| s.duration_seconds / 60)
            .collect();
        assert_eq!(minutes, vec![5, 8, 10, 10, 12, 15, 20]);
    }
}
