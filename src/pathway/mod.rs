mod progress;
mod view;

pub use progress::{PathwayProgress, ProgressRecord, PROGRESS_KEY};
pub use view::{project, DerivedStageView};
