pub mod controller;
pub mod orchestrator;

pub use controller::{ControllerEvent, SessionController};
pub use orchestrator::{
    Effect, OrchestratorOptions, OrchestratorSnapshot, SessionOrchestrator, UiCommand,
};
