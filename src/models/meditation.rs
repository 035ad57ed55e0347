use serde::Serialize;

/// One entry of the meditation library. Loaded once, never mutated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeditationEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub source: &'static str,
    pub tags: &'static [&'static str],
    pub instructions: &'static str,
    pub duration_seconds: u32,
}

impl MeditationEntry {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// A mood the picker offers as a one-tap choice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MoodOption {
    pub label: &'static str,
    pub value: &'static str,
}
