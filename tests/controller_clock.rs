use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shunya_lib::catalog::VOID_PATH;
use shunya_lib::models::Screen;
use shunya_lib::pathway::{PathwayProgress, PROGRESS_KEY};
use shunya_lib::session::{
    ControllerEvent, OrchestratorOptions, SessionController, SessionOrchestrator, UiCommand,
};
use shunya_lib::settings::AppConfig;
use shunya_lib::store::{KeyValueStore, MemoryStore};
use shunya_lib::timer::TimerPhase;
use tokio::sync::broadcast;
use tokio::time;

fn controller(store: Arc<MemoryStore>, config: &AppConfig) -> SessionController {
    let orchestrator = SessionOrchestrator::with_rng(
        PathwayProgress::load(&VOID_PATH, store),
        OrchestratorOptions::from(config),
        StdRng::seed_from_u64(5),
    );
    SessionController::new(orchestrator, config, None)
}

fn drain(events: &mut broadcast::Receiver<ControllerEvent>) -> Vec<ControllerEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

async fn remaining(controller: &SessionController) -> u32 {
    controller
        .snapshot()
        .await
        .session
        .map(|s| s.remaining_seconds)
        .unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn stage_runs_down_completes_and_returns_to_menu() {
    let store = Arc::new(MemoryStore::new());
    let controller = controller(store.clone(), &AppConfig::default());
    let mut events = controller.subscribe();

    controller.dispatch(UiCommand::OpenPathway).await;
    let snapshot = controller.dispatch(UiCommand::SelectStage(1)).await;
    assert_eq!(snapshot.screen, Screen::Session);
    assert!(controller.is_clock_running());

    time::sleep(Duration::from_millis(10_500)).await;
    assert_eq!(remaining(&controller).await, 290);

    controller.dispatch(UiCommand::Pause).await;
    assert!(!controller.is_clock_running());
    time::sleep(Duration::from_secs(30)).await;
    assert_eq!(remaining(&controller).await, 290);

    controller.dispatch(UiCommand::Start).await;
    time::sleep(Duration::from_millis(290_500)).await;

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Complete);
    assert_eq!(snapshot.session.as_ref().map(|s| s.phase), Some(TimerPhase::Finished));
    assert!(snapshot.frame.singularity);
    assert!(!controller.is_clock_running());
    assert!(store.get(PROGRESS_KEY).unwrap().is_some());

    let completed: Vec<_> = drain(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            ControllerEvent::SessionCompleted { stage_id, .. } => Some(stage_id),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![Some(1)]);

    time::sleep(Duration::from_secs(6)).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Menu);
    assert!(snapshot.session.is_none());
    assert!(snapshot.stages[1].unlocked);
}

#[tokio::test(start_paused = true)]
async fn heartbeat_follows_configured_cadence() {
    let config = AppConfig {
        heartbeat_every_ticks: 2,
        ..AppConfig::default()
    };
    let controller = controller(Arc::new(MemoryStore::new()), &config);
    let mut events = controller.subscribe();

    controller.dispatch(UiCommand::OpenMoodPick).await;
    controller
        .dispatch(UiCommand::SelectMood("anxious".into()))
        .await;
    time::sleep(Duration::from_millis(6_500)).await;

    let beats: Vec<u32> = drain(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            ControllerEvent::Heartbeat {
                remaining_seconds, ..
            } => Some(remaining_seconds),
            _ => None,
        })
        .collect();
    assert_eq!(beats, vec![598, 596, 594]);
}

#[tokio::test(start_paused = true)]
async fn leaving_early_stops_the_clock_without_completion() {
    let store = Arc::new(MemoryStore::new());
    let controller = controller(store.clone(), &AppConfig::default());

    controller.dispatch(UiCommand::OpenPathway).await;
    controller.dispatch(UiCommand::SelectStage(1)).await;
    time::sleep(Duration::from_millis(3_500)).await;

    let snapshot = controller.dispatch(UiCommand::ExitToMenu).await;
    assert_eq!(snapshot.screen, Screen::Menu);
    assert!(!controller.is_clock_running());

    time::sleep(Duration::from_secs(600)).await;
    assert_eq!(controller.snapshot().await.screen, Screen::Menu);
    assert_eq!(store.get(PROGRESS_KEY).unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn manual_return_wins_over_the_scheduled_one() {
    let config = AppConfig {
        return_to_menu_secs: 5,
        ..AppConfig::default()
    };
    let controller = controller(Arc::new(MemoryStore::new()), &config);

    controller.dispatch(UiCommand::OpenPathway).await;
    controller.dispatch(UiCommand::SelectStage(1)).await;
    time::sleep(Duration::from_millis(300_500)).await;
    assert_eq!(controller.snapshot().await.screen, Screen::Complete);

    controller.dispatch(UiCommand::ReturnToMenu).await;
    controller.dispatch(UiCommand::OpenPathway).await;
    controller.dispatch(UiCommand::SelectStage(2)).await;

    time::sleep(Duration::from_secs(6)).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Session);
    assert_eq!(snapshot.session.map(|s| s.active_stage_id), Some(Some(2)));
}
