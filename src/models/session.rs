use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{MeditationEntry, Stage};
use crate::timer::TimerPhase;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Menu,
    MoodPick,
    PathwaySelect,
    StageIntro,
    Session,
    Complete,
}

/// What the current session is playing: a mood-picked meditation or a pathway stage.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind", content = "entry")]
pub enum ActiveSession {
    Meditation(&'static MeditationEntry),
    Stage(&'static Stage),
}

impl ActiveSession {
    pub fn title(&self) -> &'static str {
        match self {
            ActiveSession::Meditation(entry) => entry.title,
            ActiveSession::Stage(stage) => stage.title,
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            ActiveSession::Meditation(entry) => entry.instructions,
            ActiveSession::Stage(stage) => stage.instruction,
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        match self {
            ActiveSession::Meditation(entry) => entry.duration_seconds,
            ActiveSession::Stage(stage) => stage.duration_seconds,
        }
    }

    pub fn stage_id(&self) -> Option<u32> {
        match self {
            ActiveSession::Meditation(_) => None,
            ActiveSession::Stage(stage) => Some(stage.id),
        }
    }

    pub fn meditation(&self) -> Option<&'static MeditationEntry> {
        match self {
            ActiveSession::Meditation(entry) => Some(*entry),
            ActiveSession::Stage(_) => None,
        }
    }
}

/// Read-only view of one running session, handed to the UI and render loops.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_id: String,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub phase: TimerPhase,
    pub active_meditation: Option<&'static MeditationEntry>,
    pub active_stage_id: Option<u32>,
    pub started_at: DateTime<Utc>,
}
