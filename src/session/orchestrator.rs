use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

use crate::audio::AudioCue;
use crate::models::{ActiveSession, Screen, SessionState, Stage};
use crate::mood::MoodSelector;
use crate::pathway::{DerivedStageView, PathwayProgress};
use crate::settings::AppConfig;
use crate::timer::{SessionTimer, TimerEvent};
use crate::visual::{map_progress, VisualFrame};
use crate::{log_error, log_info};

const ENABLE_LOGS: bool = true;

/// Commands the UI collaborator can issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    OpenMoodPick,
    OpenPathway,
    SelectMood(String),
    PreviewStage(u32),
    SelectStage(u32),
    Start,
    Pause,
    ResetSession,
    ExitToMenu,
    ReturnToMenu,
    Back,
    ResetAllProgress,
}

/// Side effects the orchestrator asks its host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartClock,
    StopClock,
    Audio(AudioCue),
    StageCompleted(u32),
    SessionFinished {
        session_id: String,
        stage_id: Option<u32>,
    },
    /// Call [`SessionOrchestrator::return_after`] with this id once `after` has elapsed.
    ScheduleReturn {
        session_id: String,
        after: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    pub return_delay: Duration,
    pub vertex_count: usize,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            return_delay: Duration::from_secs(5),
            vertex_count: 12,
        }
    }
}

impl From<&AppConfig> for OrchestratorOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            return_delay: config.return_to_menu_delay(),
            vertex_count: config.vertex_count,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveRun {
    id: String,
    active: ActiveSession,
    started_at: DateTime<Utc>,
}

/// Everything a UI or render loop reads, captured at one instant.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorSnapshot {
    pub screen: Screen,
    pub session: Option<SessionState>,
    pub active: Option<ActiveSession>,
    pub preview: Option<&'static Stage>,
    pub stages: Vec<DerivedStageView>,
    pub frame: VisualFrame,
}

/// Screen flow over the timer and pathway progress.
///
/// Synchronous and free of I/O apart from the progress write on stage
/// completion. Clock, audio and delayed returns come back as [`Effect`]s.
/// Commands that make no sense on the current screen return no effects.
pub struct SessionOrchestrator<R = StdRng> {
    screen: Screen,
    timer: SessionTimer,
    run: Option<ActiveRun>,
    preview: Option<&'static Stage>,
    mood: MoodSelector,
    progress: PathwayProgress,
    rng: R,
    options: OrchestratorOptions,
}

impl SessionOrchestrator<StdRng> {
    pub fn new(progress: PathwayProgress, options: OrchestratorOptions) -> Self {
        Self::with_rng(progress, options, StdRng::from_entropy())
    }
}

impl<R: Rng> SessionOrchestrator<R> {
    pub fn with_rng(progress: PathwayProgress, options: OrchestratorOptions, rng: R) -> Self {
        Self {
            screen: Screen::Menu,
            timer: SessionTimer::new(),
            run: None,
            preview: None,
            mood: MoodSelector::default(),
            progress,
            rng,
            options,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn progress(&self) -> &PathwayProgress {
        &self.progress
    }

    pub fn active(&self) -> Option<ActiveSession> {
        self.run.as_ref().map(|run| run.active)
    }

    pub fn active_stage_id(&self) -> Option<u32> {
        self.run.as_ref().and_then(|run| run.active.stage_id())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.run.as_ref().map(|run| run.id.as_str())
    }

    pub fn session_state(&self) -> Option<SessionState> {
        self.run.as_ref().map(|run| SessionState {
            session_id: run.id.clone(),
            total_seconds: self.timer.total_seconds(),
            remaining_seconds: self.timer.remaining_seconds(),
            phase: self.timer.phase(),
            active_meditation: run.active.meditation(),
            active_stage_id: run.active.stage_id(),
            started_at: run.started_at,
        })
    }

    pub fn visual_frame(&self) -> VisualFrame {
        if self.run.is_none() {
            return VisualFrame::at_rest(self.options.vertex_count);
        }
        map_progress(
            self.timer.total_seconds(),
            self.timer.remaining_seconds(),
            self.options.vertex_count,
        )
    }

    pub fn snapshot(&self) -> OrchestratorSnapshot {
        OrchestratorSnapshot {
            screen: self.screen,
            session: self.session_state(),
            active: self.active(),
            preview: self.preview,
            stages: self.progress.unlocked_and_completed_view(),
            frame: self.visual_frame(),
        }
    }

    pub fn handle(&mut self, command: UiCommand) -> Vec<Effect> {
        match (self.screen, command) {
            (Screen::Menu, UiCommand::OpenMoodPick) => {
                self.screen = Screen::MoodPick;
                Vec::new()
            }
            (Screen::Menu, UiCommand::OpenPathway) => {
                self.screen = Screen::PathwaySelect;
                Vec::new()
            }
            (Screen::MoodPick, UiCommand::SelectMood(mood)) => {
                let entry = self.mood.select_for(&mood, &mut self.rng);
                self.begin(ActiveSession::Meditation(entry))
            }
            (Screen::PathwaySelect, UiCommand::PreviewStage(stage_id)) => {
                if let Some(stage) = self.unlocked_stage(stage_id) {
                    self.preview = Some(stage);
                    self.screen = Screen::StageIntro;
                }
                Vec::new()
            }
            (Screen::PathwaySelect | Screen::StageIntro, UiCommand::SelectStage(stage_id)) => {
                match self.unlocked_stage(stage_id) {
                    Some(stage) => {
                        self.preview = None;
                        self.begin(ActiveSession::Stage(stage))
                    }
                    None => Vec::new(),
                }
            }
            (Screen::Session, UiCommand::Start) => self.with_phase_edge(|timer| {
                if let Err(err) = timer.start() {
                    log_error!("Cannot resume session: {err}");
                }
            }),
            (Screen::Session, UiCommand::Pause) => self.with_phase_edge(SessionTimer::pause),
            (Screen::Session, UiCommand::ResetSession) => {
                self.with_phase_edge(|timer| timer.reset(None))
            }
            (Screen::Complete, UiCommand::ReturnToMenu) => self.leave_to_menu(),
            (Screen::Menu, UiCommand::ExitToMenu) => Vec::new(),
            (_, UiCommand::ExitToMenu) => self.leave_to_menu(),
            (Screen::MoodPick | Screen::PathwaySelect, UiCommand::Back) => self.leave_to_menu(),
            (Screen::StageIntro, UiCommand::Back) => {
                self.preview = None;
                self.screen = Screen::PathwaySelect;
                Vec::new()
            }
            (
                Screen::Menu | Screen::MoodPick | Screen::PathwaySelect | Screen::StageIntro,
                UiCommand::ResetAllProgress,
            ) => {
                // write failures are already logged; memory is reset regardless
                let _ = self.progress.reset_all();
                if let Some(stage) = self.preview {
                    if !self.progress.is_unlocked(stage.id) {
                        self.preview = None;
                        self.screen = Screen::PathwaySelect;
                    }
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// One clock second. Only does something while a session is running.
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Session {
            return Vec::new();
        }
        let was_running = self.timer.is_running();
        match self.timer.tick() {
            Some(TimerEvent::Finished) => self.finish(was_running),
            None => Vec::new(),
        }
    }

    /// Delayed Complete -> Menu. Ignored unless `session_id` is still the session on screen.
    pub fn return_after(&mut self, session_id: &str) -> Vec<Effect> {
        let current = self.run.as_ref().map(|run| run.id.as_str());
        if self.screen == Screen::Complete && current == Some(session_id) {
            return self.leave_to_menu();
        }
        Vec::new()
    }

    fn unlocked_stage(&self, stage_id: u32) -> Option<&'static Stage> {
        let view = self.progress.view(stage_id)?;
        view.unlocked.then_some(view.stage)
    }

    fn begin(&mut self, active: ActiveSession) -> Vec<Effect> {
        if let Err(err) = self.timer.configure(active.duration_seconds()) {
            log_error!("Cannot configure session '{}': {err}", active.title());
            return Vec::new();
        }

        let run = ActiveRun {
            id: Uuid::new_v4().to_string(),
            active,
            started_at: Utc::now(),
        };
        log_info!(
            "Session {} started: '{}' for {}s",
            run.id,
            active.title(),
            active.duration_seconds()
        );
        self.run = Some(run);
        self.screen = Screen::Session;

        self.with_phase_edge(|timer| {
            if let Err(err) = timer.start() {
                log_error!("Cannot start session: {err}");
            }
        })
    }

    fn finish(&mut self, was_running: bool) -> Vec<Effect> {
        let Some(run) = self.run.as_ref() else {
            return Vec::new();
        };
        let session_id = run.id.clone();
        let stage_id = run.active.stage_id();

        let mut effects = Vec::new();
        if let Some(stage_id) = stage_id {
            // a failed write is logged by the progress layer; completion still counts in memory
            let _ = self.progress.complete_stage(stage_id);
            effects.push(Effect::StageCompleted(stage_id));
        }

        self.screen = Screen::Complete;
        log_info!("Session {session_id} finished");

        effects.extend(phase_edge(was_running, self.timer.is_running()));
        effects.push(Effect::SessionFinished {
            session_id: session_id.clone(),
            stage_id,
        });
        effects.push(Effect::ScheduleReturn {
            session_id,
            after: self.options.return_delay,
        });
        effects
    }

    fn leave_to_menu(&mut self) -> Vec<Effect> {
        let effects = self.with_phase_edge(|timer| timer.reset(None));
        if let Some(run) = self.run.take() {
            log_info!("Session {} closed", run.id);
        }
        self.preview = None;
        self.screen = Screen::Menu;
        effects
    }

    fn with_phase_edge(&mut self, change: impl FnOnce(&mut SessionTimer)) -> Vec<Effect> {
        let was_running = self.timer.is_running();
        change(&mut self.timer);
        phase_edge(was_running, self.timer.is_running())
    }
}

/// Clock and audio follow the Running edge and nothing else.
fn phase_edge(was_running: bool, is_running: bool) -> Vec<Effect> {
    match (was_running, is_running) {
        (false, true) => vec![Effect::StartClock, Effect::Audio(AudioCue::FadeIn)],
        (true, false) => vec![Effect::StopClock, Effect::Audio(AudioCue::FadeOut)],
        _ => Vec::new(),
    }
}

impl<R> std::fmt::Debug for SessionOrchestrator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOrchestrator")
            .field("screen", &self.screen)
            .field("phase", &self.timer.phase())
            .field("remaining_seconds", &self.timer.remaining_seconds())
            .field("session_id", &self.run.as_ref().map(|run| &run.id))
            .finish()
    }
}
