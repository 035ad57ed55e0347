use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shunya_lib::catalog::VOID_PATH;
use shunya_lib::db::Database;
use shunya_lib::models::Screen;
use shunya_lib::pathway::{PathwayProgress, PROGRESS_KEY};
use shunya_lib::session::{Effect, OrchestratorOptions, SessionOrchestrator, UiCommand};
use shunya_lib::store::{JsonFileStore, KeyValueStore};
use tempfile::TempDir;

fn orchestrator(store: Arc<dyn KeyValueStore>) -> SessionOrchestrator {
    SessionOrchestrator::with_rng(
        PathwayProgress::load(&VOID_PATH, store),
        OrchestratorOptions::default(),
        StdRng::seed_from_u64(11),
    )
}

fn complete_stage(o: &mut SessionOrchestrator, stage_id: u32) {
    o.handle(UiCommand::OpenPathway);
    let effects = o.handle(UiCommand::SelectStage(stage_id));
    assert_eq!(effects.first(), Some(&Effect::StartClock), "stage {stage_id} should be open");
    while o.screen() == Screen::Session {
        o.tick();
    }
    assert_eq!(o.screen(), Screen::Complete);
    o.handle(UiCommand::ReturnToMenu);
}

fn unlocked_ids(o: &SessionOrchestrator) -> Vec<u32> {
    o.snapshot()
        .stages
        .iter()
        .filter(|view| view.unlocked)
        .map(|view| view.stage.id)
        .collect()
}

#[test]
fn progress_survives_restart_with_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("progress.json");

    {
        let store = Arc::new(JsonFileStore::open(path.clone()).unwrap());
        let mut o = orchestrator(store);
        complete_stage(&mut o, 1);
        complete_stage(&mut o, 2);
        assert_eq!(unlocked_ids(&o), vec![1, 2, 3]);
    }

    let store = Arc::new(JsonFileStore::open(path).unwrap());
    let o = orchestrator(store);
    assert_eq!(unlocked_ids(&o), vec![1, 2, 3]);
    assert_eq!(o.progress().next_stage().map(|s| s.id), Some(3));
}

#[test]
fn progress_survives_restart_with_sqlite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shunya.sqlite3");

    {
        let db = Database::open(path.clone()).unwrap();
        let mut o = orchestrator(Arc::new(db));
        complete_stage(&mut o, 1);
    }

    let db = Database::open(path).unwrap();
    assert_eq!(
        db.get(PROGRESS_KEY).unwrap().as_deref(),
        Some(r#"{"1":true}"#)
    );
    let o = orchestrator(Arc::new(db));
    assert_eq!(unlocked_ids(&o), vec![1, 2]);
}

#[test]
fn corrupt_record_starts_fresh_and_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path().join("progress.json")).unwrap());
    store.set(PROGRESS_KEY, "{not json").unwrap();

    let mut o = orchestrator(store.clone());
    assert_eq!(unlocked_ids(&o), vec![1]);

    complete_stage(&mut o, 1);
    assert_eq!(
        store.get(PROGRESS_KEY).unwrap().as_deref(),
        Some(r#"{"1":true}"#)
    );
}

#[test]
fn legacy_id_array_is_read() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path().join("progress.json")).unwrap());
    store.set(PROGRESS_KEY, "[1, 2, 3]").unwrap();

    let o = orchestrator(store);
    assert_eq!(unlocked_ids(&o), vec![1, 2, 3, 4]);
}

#[test]
fn mood_sessions_never_touch_progress() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path().join("progress.json")).unwrap());
    let mut o = orchestrator(store.clone());

    o.handle(UiCommand::OpenMoodPick);
    o.handle(UiCommand::SelectMood("restless".into()));
    let mut stage_effects = 0;
    while o.screen() == Screen::Session {
        stage_effects += o
            .tick()
            .iter()
            .filter(|e| matches!(e, Effect::StageCompleted(_)))
            .count();
    }

    assert_eq!(stage_effects, 0);
    assert_eq!(store.get(PROGRESS_KEY).unwrap(), None);
}
