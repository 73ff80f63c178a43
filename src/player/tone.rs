use std::f32::consts::TAU;

use crate::player::SampleSource;

const BLOCK_FRAMES: usize = 512;

/// Endless sine tone, same signal on every channel.
pub struct ToneSource {
    sample_rate: u32,
    channels: u16,
    step: f32,
    phase: f32,
    amplitude: f32,
}

impl ToneSource {
    pub fn new(sample_rate: u32, channels: u16, frequency: f32) -> Self {
        let step = if sample_rate == 0 {
            0.0
        } else {
            TAU * frequency / sample_rate as f32
        };
        Self {
            sample_rate,
            channels,
            step,
            phase: 0.0,
            amplitude: 0.25,
        }
    }
}

impl SampleSource for ToneSource {
    fn next_block(&mut self) -> Option<Vec<f32>> {
        let channels = self.channels.max(1) as usize;
        let mut block = Vec::with_capacity(BLOCK_FRAMES * channels);
        for _ in 0..BLOCK_FRAMES {
            let sample = self.phase.sin() * self.amplitude;
            block.extend(std::iter::repeat(sample).take(channels));
            self.phase = (self.phase + self.step) % TAU;
        }
        Some(block)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }
}
