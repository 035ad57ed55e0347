use std::{
    sync::{Arc, Mutex as StdMutex},
    time::Duration,
};

use serde::Serialize;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use super::orchestrator::{Effect, OrchestratorSnapshot, SessionOrchestrator, UiCommand};
use crate::audio::AudioEngineHandle;
use crate::settings::AppConfig;
use crate::{log_debug, log_error, log_info};

const ENABLE_LOGS: bool = true;
const EVENT_CAPACITY: usize = 64;

pub const DEBUG_ENV: &str = "SHUNYA_DEBUG";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type", content = "payload")]
pub enum ControllerEvent {
    StateChanged(Box<OrchestratorSnapshot>),
    Heartbeat {
        session_id: String,
        remaining_seconds: u32,
        progress: f32,
    },
    SessionCompleted {
        session_id: String,
        stage_id: Option<u32>,
    },
}

struct Clock {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Drives a [`SessionOrchestrator`] from real time: owns the one-second
/// clock, forwards audio cues and runs the delayed return to the menu.
#[derive(Clone)]
pub struct SessionController {
    orchestrator: Arc<Mutex<SessionOrchestrator>>,
    clock: Arc<StdMutex<Option<Clock>>>,
    events: broadcast::Sender<ControllerEvent>,
    audio: Option<Arc<AudioEngineHandle>>,
    tick_interval: Duration,
    heartbeat_every_ticks: u32,
}

impl SessionController {
    pub fn new(
        orchestrator: SessionOrchestrator,
        config: &AppConfig,
        audio: Option<AudioEngineHandle>,
    ) -> Self {
        let debug_mode = std::env::var(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            clock: Arc::new(StdMutex::new(None)),
            events,
            audio: audio.map(Arc::new),
            tick_interval: config.tick_interval(),
            heartbeat_every_ticks: if debug_mode {
                1
            } else {
                config.heartbeat_every_ticks.max(1)
            },
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> OrchestratorSnapshot {
        self.orchestrator.lock().await.snapshot()
    }

    pub async fn dispatch(&self, command: UiCommand) -> OrchestratorSnapshot {
        log_debug!("dispatch {command:?}");
        let (effects, snapshot) = {
            let mut guard = self.orchestrator.lock().await;
            let effects = guard.handle(command);
            (effects, guard.snapshot())
        };
        self.apply(effects);
        self.emit(ControllerEvent::StateChanged(Box::new(snapshot.clone())));
        snapshot
    }

    pub fn is_clock_running(&self) -> bool {
        self.lock_clock()
            .as_ref()
            .is_some_and(|clock| !clock.token.is_cancelled() && !clock.handle.is_finished())
    }

    /// Stops the clock and the audio thread. Used on quit.
    pub fn shutdown(&self) {
        self.stop_clock();
        if let Some(audio) = &self.audio {
            if let Err(err) = audio.stop() {
                log_error!("Failed to stop audio: {err}");
            }
        }
    }

    async fn on_tick(&self, ticks: u32) {
        let (effects, snapshot) = {
            let mut guard = self.orchestrator.lock().await;
            let effects = guard.tick();
            (effects, guard.snapshot())
        };

        if let Some(session) = snapshot.session.as_ref() {
            if ticks % self.heartbeat_every_ticks == 0 {
                self.emit(ControllerEvent::Heartbeat {
                    session_id: session.session_id.clone(),
                    remaining_seconds: session.remaining_seconds,
                    progress: snapshot.frame.progress,
                });
            }
        }

        if !effects.is_empty() {
            self.apply(effects);
            self.emit(ControllerEvent::StateChanged(Box::new(snapshot)));
        }
    }

    async fn return_after(&self, session_id: String) {
        let (effects, snapshot) = {
            let mut guard = self.orchestrator.lock().await;
            let before = guard.screen();
            let effects = guard.return_after(&session_id);
            if guard.screen() == before {
                return;
            }
            (effects, guard.snapshot())
        };
        log_info!("Returned to menu after session {session_id}");
        self.apply(effects);
        self.emit(ControllerEvent::StateChanged(Box::new(snapshot)));
    }

    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartClock => self.start_clock(),
                Effect::StopClock => self.stop_clock(),
                Effect::Audio(cue) => {
                    if let Some(audio) = &self.audio {
                        if let Err(err) = audio.cue(cue) {
                            log_error!("Audio cue {cue:?} failed: {err}");
                        }
                    }
                }
                Effect::StageCompleted(stage_id) => {
                    log_info!("Stage {stage_id} marked complete");
                }
                Effect::SessionFinished {
                    session_id,
                    stage_id,
                } => self.emit(ControllerEvent::SessionCompleted {
                    session_id,
                    stage_id,
                }),
                Effect::ScheduleReturn { session_id, after } => {
                    let controller = self.clone();
                    tokio::spawn(async move {
                        time::sleep(after).await;
                        controller.return_after(session_id).await;
                    });
                }
            }
        }
    }

    fn start_clock(&self) {
        let mut slot = self.lock_clock();
        if let Some(clock) = slot.as_ref() {
            if !clock.token.is_cancelled() && !clock.handle.is_finished() {
                return;
            }
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let controller = self.clone();
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            // first tick lands one full period after start
            let mut interval = time::interval_at(Instant::now() + period, period);
            let mut ticks: u32 = 0;
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {}
                }
                ticks = ticks.wrapping_add(1);
                controller.on_tick(ticks).await;
            }
            log_debug!("clock stopped after {ticks} ticks");
        });

        *slot = Some(Clock { token, handle });
    }

    fn stop_clock(&self) {
        if let Some(clock) = self.lock_clock().take() {
            clock.token.cancel();
        }
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, Option<Clock>> {
        match self.clock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, event: ControllerEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}
