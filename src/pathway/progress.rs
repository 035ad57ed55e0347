use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Deserialize;

use super::view::{project, DerivedStageView};
use crate::error::{ProgressError, StoreError};
use crate::models::{Pathway, Stage};
use crate::store::KeyValueStore;
use crate::{log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Storage key of the progress record.
pub const PROGRESS_KEY: &str = "shunya_pathway_progress";

/// Completed stage ids. Grows one id at a time; only [`PathwayProgress::reset_all`] shrinks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    pub completed_stage_ids: BTreeSet<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProgress {
    Ids(Vec<u32>),
    Flags(BTreeMap<String, bool>),
}

impl ProgressRecord {
    /// Accepts `{"1": true, ...}` or `[1, ...]`.
    pub fn decode(raw: &str) -> Result<Self, StoreError> {
        let completed_stage_ids = match serde_json::from_str::<StoredProgress>(raw)? {
            StoredProgress::Ids(ids) => ids.into_iter().collect(),
            StoredProgress::Flags(flags) => flags
                .into_iter()
                .filter(|(_, done)| *done)
                .filter_map(|(id, _)| id.trim().parse::<u32>().ok())
                .collect(),
        };
        Ok(Self { completed_stage_ids })
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        let flags: BTreeMap<String, bool> = self
            .completed_stage_ids
            .iter()
            .map(|id| (id.to_string(), true))
            .collect();
        Ok(serde_json::to_string(&flags)?)
    }
}

/// Owns the progress record and its durable mirror.
///
/// Completion is not checked against lock state; callers that care must
/// consult [`is_unlocked`](Self::is_unlocked) first.
pub struct PathwayProgress {
    pathway: &'static Pathway,
    record: ProgressRecord,
    store: Arc<dyn KeyValueStore>,
}

impl PathwayProgress {
    /// Never fails: missing or unreadable storage means no progress yet.
    pub fn load(pathway: &'static Pathway, store: Arc<dyn KeyValueStore>) -> Self {
        let record = match Self::read_record(store.as_ref()) {
            Ok(record) => record,
            Err(err) => {
                log_warn!("{err}; starting from empty progress");
                ProgressRecord::default()
            }
        };
        log_info!(
            "Loaded pathway progress: {} of {} stages completed",
            record.completed_stage_ids.len(),
            pathway.len()
        );
        Self {
            pathway,
            record,
            store,
        }
    }

    pub fn read_record(store: &dyn KeyValueStore) -> Result<ProgressRecord, ProgressError> {
        match store.get(PROGRESS_KEY).map_err(ProgressError::Read)? {
            Some(raw) => ProgressRecord::decode(&raw).map_err(ProgressError::Read),
            None => Ok(ProgressRecord::default()),
        }
    }

    pub fn pathway(&self) -> &'static Pathway {
        self.pathway
    }

    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    pub fn completed_stage_ids(&self) -> &BTreeSet<u32> {
        &self.record.completed_stage_ids
    }

    pub fn unlocked_and_completed_view(&self) -> Vec<DerivedStageView> {
        project(self.pathway, &self.record.completed_stage_ids)
    }

    pub fn view(&self, stage_id: u32) -> Option<DerivedStageView> {
        self.unlocked_and_completed_view()
            .into_iter()
            .find(|view| view.stage.id == stage_id)
    }

    pub fn is_unlocked(&self, stage_id: u32) -> bool {
        self.view(stage_id).is_some_and(|view| view.unlocked)
    }

    pub fn is_completed(&self, stage_id: u32) -> bool {
        self.record.completed_stage_ids.contains(&stage_id)
    }

    pub fn next_stage(&self) -> Option<&'static Stage> {
        self.unlocked_and_completed_view()
            .into_iter()
            .find(DerivedStageView::is_next)
            .map(|view| view.stage)
    }

    /// Marks a stage done and writes the record. Completing a stage twice is
    /// a no-op. On a write error the in-memory record keeps the stage.
    pub fn complete_stage(&mut self, stage_id: u32) -> Result<(), ProgressError> {
        if !self.record.completed_stage_ids.insert(stage_id) {
            return Ok(());
        }
        log_info!("Stage {stage_id} completed");
        self.persist()
    }

    /// Forgets every completion. Stage 1 becomes the only unlocked stage.
    pub fn reset_all(&mut self) -> Result<(), ProgressError> {
        self.record.completed_stage_ids.clear();
        log_info!("Pathway progress reset");
        self.persist()
    }

    fn persist(&self) -> Result<(), ProgressError> {
        let result = self
            .record
            .encode()
            .and_then(|encoded| self.store.set(PROGRESS_KEY, &encoded))
            .map_err(ProgressError::Write);
        if let Err(err) = &result {
            log_error!("{err}");
        }
        result
    }
}
