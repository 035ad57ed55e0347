use serde::Serialize;

use crate::error::PathwayError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: u32,
    pub title: &'static str,
    pub technique: &'static str,
    pub instruction: &'static str,
    pub duration_seconds: u32,
    /// 1-based position in the pathway. Stage `n` unlocks once stage `n - 1` is completed.
    pub ordinal: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pathway {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Stored in ordinal order.
    pub stages: &'static [Stage],
}

impl Pathway {
    pub fn stages(&self) -> &'static [Stage] {
        self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage(&self, id: u32) -> Option<&'static Stage> {
        self.stages.iter().find(|stage| stage.id == id)
    }

    pub fn stage_at(&self, ordinal: u32) -> Option<&'static Stage> {
        let index = usize::try_from(ordinal.checked_sub(1)?).ok()?;
        self.stages.get(index).filter(|stage| stage.ordinal == ordinal)
    }

    /// Checks that ordinals run 1, 2, 3, ... in storage order and that ids are unique.
    pub fn validate(&self) -> Result<(), PathwayError> {
        for (index, stage) in self.stages.iter().enumerate() {
            let expected = index as u32 + 1;
            if stage.ordinal != expected {
                return Err(PathwayError::OrdinalGap {
                    expected,
                    found: stage.ordinal,
                });
            }
            if stage.duration_seconds == 0 {
                return Err(PathwayError::ZeroDuration(stage.id));
            }
            if self.stages[..index].iter().any(|other| other.id == stage.id) {
                return Err(PathwayError::DuplicateId(stage.id));
            }
        }
        Ok(())
    }
}
