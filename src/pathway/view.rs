use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Pathway, Stage};

/// Lock state of one stage, derived from the completed set on every read.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStageView {
    pub stage: &'static Stage,
    pub completed: bool,
    pub unlocked: bool,
}

impl DerivedStageView {
    /// The stage the user should take next: open but not yet done.
    pub fn is_next(&self) -> bool {
        self.unlocked && !self.completed
    }
}

/// Stage 1 is always unlocked; stage `n` unlocks when stage `n - 1` is completed.
pub fn project(pathway: &Pathway, completed: &BTreeSet<u32>) -> Vec<DerivedStageView> {
    pathway
        .stages()
        .iter()
        .map(|stage| {
            let unlocked = stage.ordinal == 1
                || pathway
                    .stage_at(stage.ordinal - 1)
                    .is_some_and(|previous| completed.contains(&previous.id));
            DerivedStageView {
                stage,
                completed: completed.contains(&stage.id),
                unlocked,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VOID_PATH;

    fn unlocked_ids(views: &[DerivedStageView]) -> Vec<u32> {
        views
            .iter()
            .filter(|v| v.unlocked)
            .map(|v| v.stage.id)
            .collect()
    }

    #[test]
    fn fresh_progress_unlocks_only_the_first_stage() {
        let views = project(&VOID_PATH, &BTreeSet::new());
        assert_eq!(views.len(), 7);
        assert_eq!(unlocked_ids(&views), vec![1]);
        assert!(views.iter().all(|v| !v.completed));
    }

    #[test]
    fn completing_stage_one_unlocks_stage_two_only() {
        let views = project(&VOID_PATH, &BTreeSet::from([1]));
        assert_eq!(unlocked_ids(&views), vec![1, 2]);
        assert!(views[2..].iter().all(|v| !v.unlocked));
        assert!(views[1].is_next());
        assert!(!views[0].is_next());
    }

    #[test]
    fn unlock_follows_predecessor_not_history() {
        // stage 3 done without stage 2: only stage 4 opens beyond stage 1
        let views = project(&VOID_PATH, &BTreeSet::from([3]));
        assert_eq!(unlocked_ids(&views), vec![1, 4]);
        assert!(views[2].completed);
        assert!(!views[2].unlocked);
    }

    #[test]
    fn stage_k_unlocked_iff_k_minus_one_completed() {
        let completed = BTreeSet::from([1, 2, 5]);
        let views = project(&VOID_PATH, &completed);
        for view in &views[1..] {
            let previous = view.stage.ordinal - 1;
            assert_eq!(view.unlocked, completed.contains(&previous));
        }
        assert!(views[0].unlocked);
    }
}
