use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

/// Gain target shared between the audio thread and a playing source.
///
/// The control side only publishes `(target, ramp)`; the source picks the
/// change up on its next sample and walks there linearly.
#[derive(Debug, Default)]
pub struct EnvelopeControl {
    target_bits: AtomicU32,
    ramp_ms: AtomicU32,
    generation: AtomicU64,
}

impl EnvelopeControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ramp_to(&self, target: f32, over: Duration) {
        let ramp_ms = u32::try_from(over.as_millis()).unwrap_or(u32::MAX);
        self.target_bits
            .store(target.clamp(0.0, 1.0).to_bits(), Ordering::SeqCst);
        self.ramp_ms.store(ramp_ms, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn target(&self) -> f32 {
        f32::from_bits(self.target_bits.load(Ordering::SeqCst))
    }

    fn snapshot(&self) -> (u64, f32, u32) {
        (
            self.generation.load(Ordering::SeqCst),
            self.target(),
            self.ramp_ms.load(Ordering::SeqCst),
        )
    }
}

/// Per-sample linear gain ramp driven by an [`EnvelopeControl`].
#[derive(Debug)]
pub struct GainRamp {
    current: f32,
    target: f32,
    step: f32,
    seen_generation: u64,
    /// Interleaved samples per second (sample rate * channels).
    samples_per_second: u32,
}

impl GainRamp {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            step: 0.0,
            seen_generation: 0,
            samples_per_second: sample_rate.saturating_mul(u32::from(channels)),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn next_gain(&mut self, control: &EnvelopeControl) -> f32 {
        let (generation, target, ramp_ms) = control.snapshot();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.target = target;
            let ramp_samples = u64::from(self.samples_per_second) * u64::from(ramp_ms) / 1000;
            self.step = if ramp_samples == 0 {
                f32::INFINITY
            } else {
                (target - self.current).abs() / ramp_samples as f32
            };
        }

        if self.current < self.target {
            self.current = (self.current + self.step).min(self.target);
        } else if self.current > self.target {
            self.current = (self.current - self.step).max(self.target);
        }
        self.current
    }
}
