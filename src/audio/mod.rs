//! Audio collaborator. It only hears about the timer's Running edge and
//! answers with a fade in or a fade out of the binaural drone.

pub mod binaural;
pub mod envelope;

#[cfg(feature = "audio")]
mod engine;
#[cfg(not(feature = "audio"))]
mod silent;

#[cfg(feature = "audio")]
pub use engine::AudioEngineHandle;
#[cfg(not(feature = "audio"))]
pub use silent::AudioEngineHandle;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AudioCue {
    FadeIn,
    FadeOut,
}
