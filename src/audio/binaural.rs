use std::f32::consts::PI;
use std::sync::Arc;
#[cfg(feature = "audio")]
use std::time::Duration;

use super::envelope::{EnvelopeControl, GainRamp};

const SAMPLE_RATE: u32 = 44_100;
const CHANNELS: u16 = 2;

/// Two sine oscillators, one per ear, whose frequency difference is heard
/// as a beat. Output is interleaved stereo scaled by a shared gain envelope.
pub struct BinauralBeats {
    left_freq: f32,
    right_freq: f32,
    sample_rate: u32,
    num_sample: usize,
    envelope: Arc<EnvelopeControl>,
    ramp: GainRamp,
}

impl BinauralBeats {
    pub fn new(left_freq: f32, right_freq: f32, envelope: Arc<EnvelopeControl>) -> Self {
        Self {
            left_freq,
            right_freq,
            sample_rate: SAMPLE_RATE,
            num_sample: 0,
            envelope,
            ramp: GainRamp::new(SAMPLE_RATE, CHANNELS),
        }
    }

    /// Left ear at `base`, right ear at `base + beat`.
    pub fn with_beat(base: f32, beat: f32, envelope: Arc<EnvelopeControl>) -> Self {
        Self::new(base, base + beat, envelope)
    }
}

impl Iterator for BinauralBeats {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.num_sample / usize::from(CHANNELS);
        let t = frame as f32 / self.sample_rate as f32;

        let freq = if self.num_sample % 2 == 0 {
            self.left_freq
        } else {
            self.right_freq
        };
        self.num_sample = self.num_sample.wrapping_add(1);

        let gain = self.ramp.next_gain(&self.envelope);
        Some((2.0 * PI * freq * t).sin() * gain)
    }
}

#[cfg(feature = "audio")]
impl rodio::Source for BinauralBeats {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        CHANNELS
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_the_envelope_opens() {
        let envelope = Arc::new(EnvelopeControl::new());
        let mut beats = BinauralBeats::with_beat(110.0, 7.0, envelope);
        assert!(beats.by_ref().take(1_000).all(|s| s == 0.0));
    }

    #[test]
    fn channels_carry_their_own_frequency() {
        let envelope = Arc::new(EnvelopeControl::new());
        envelope.ramp_to(1.0, std::time::Duration::ZERO);
        let beats = BinauralBeats::with_beat(110.0, 7.0, envelope);
        assert_eq!(beats.left_freq, 110.0);
        assert_eq!(beats.right_freq, 117.0);

        let samples: Vec<f32> = beats.take(2 * 100).collect();
        let expected_left = (2.0 * PI * 110.0 * (50.0 / SAMPLE_RATE as f32)).sin();
        let expected_right = (2.0 * PI * 117.0 * (50.0 / SAMPLE_RATE as f32)).sin();
        assert!((samples[100] - expected_left).abs() < 1e-4);
        assert!((samples[101] - expected_right).abs() < 1e-4);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
    }
}
