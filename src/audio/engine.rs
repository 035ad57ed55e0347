use rodio::{OutputStream, Sink};
use std::sync::{
    mpsc::{self, RecvTimeoutError, Sender},
    Arc, Mutex,
};
use std::thread;
use std::time::{Duration, Instant};

use super::binaural::BinauralBeats;
use super::envelope::EnvelopeControl;
use super::AudioCue;
use crate::log_error;
use crate::settings::AudioSettings;

const ENABLE_LOGS: bool = true;

/// How often the audio thread wakes to retire a faded-out sink.
const IDLE_POLL: Duration = Duration::from_millis(250);

enum AudioCommand {
    FadeIn,
    FadeOut,
    Stop,
}

pub struct AudioEngineHandle {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
    settings: AudioSettings,
}

impl AudioEngineHandle {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            settings,
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        let mut guard = self.tx.lock().map_err(|e| e.to_string())?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let settings = self.settings.clone();

        // Dedicated thread: rodio output objects are not Send
        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let envelope = Arc::new(EnvelopeControl::new());
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;
                let mut retire_at: Option<Instant> = None;

                fn open_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                    settings: &AudioSettings,
                    envelope: &Arc<EnvelopeControl>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        new_sink.append(BinauralBeats::with_beat(
                            settings.base_frequency,
                            settings.beat_frequency,
                            Arc::clone(envelope),
                        ));
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                loop {
                    let command = match rx.recv_timeout(IDLE_POLL) {
                        Ok(command) => Some(command),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    };

                    match command {
                        Some(AudioCommand::FadeIn) => {
                            retire_at = None;
                            if let Err(err) =
                                open_sink(&mut _stream, &mut sink, &settings, &envelope)
                            {
                                log_error!("{err}");
                                continue;
                            }
                            envelope.ramp_to(settings.volume, settings.fade_in());
                        }
                        Some(AudioCommand::FadeOut) => {
                            if sink.is_some() {
                                envelope.ramp_to(0.0, settings.fade_out());
                                retire_at = Some(Instant::now() + settings.fade_out());
                            }
                        }
                        Some(AudioCommand::Stop) => {
                            envelope.ramp_to(0.0, Duration::ZERO);
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                            retire_at = None;
                        }
                        None => {}
                    }

                    if retire_at.is_some_and(|at| Instant::now() >= at) {
                        if let Some(s_old) = sink.take() {
                            s_old.stop();
                        }
                        _stream = None;
                        retire_at = None;
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }

    pub fn cue(&self, cue: AudioCue) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        let command = match cue {
            AudioCue::FadeIn => AudioCommand::FadeIn,
            AudioCue::FadeOut => AudioCommand::FadeOut,
        };
        tx.send(command).map_err(|e| e.to_string())
    }

    pub fn stop(&self) -> Result<(), String> {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AudioCommand::Stop);
        }
        Ok(())
    }
}
