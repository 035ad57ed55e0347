use log::debug;

use super::AudioCue;
use crate::settings::AudioSettings;

/// Stand-in used when the crate is built without the `audio` feature.
pub struct AudioEngineHandle {
    settings: AudioSettings,
}

impl AudioEngineHandle {
    pub fn new(settings: AudioSettings) -> Self {
        Self { settings }
    }

    pub fn cue(&self, cue: AudioCue) -> Result<(), String> {
        let ramp = match cue {
            AudioCue::FadeIn => self.settings.fade_in(),
            AudioCue::FadeOut => self.settings.fade_out(),
        };
        debug!("audio output not compiled in; ignoring {cue:?} over {ramp:?}");
        Ok(())
    }

    pub fn stop(&self) -> Result<(), String> {
        Ok(())
    }
}
