use cpal::Sample;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sound_out::{AudioSink, SampleFormat, Token};

use crate::player::buffer::SampleConsumer;

/// Drains the sample queue into PCM blocks. Whatever the queue cannot supply
/// stays silent and counts as an underrun.
pub struct PcmSink {
    consumer: SampleConsumer,
    format: SampleFormat,
    scratch: Vec<f32>,
    underruns: Arc<AtomicU64>,
}

impl PcmSink {
    pub fn new(consumer: SampleConsumer, format: SampleFormat) -> Self {
        Self {
            consumer,
            format,
            scratch: Vec::new(),
            underruns: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Shared count of blocks that could not be filled completely.
    pub fn underruns(&self) -> Arc<AtomicU64> {
        self.underruns.clone()
    }
}

impl AudioSink for PcmSink {
    fn fill(&mut self, buffer: &mut [u8], _token: Token) {
        let wanted = buffer.len() / self.format.bytes_per_sample();
        self.scratch.resize(wanted, 0.0);
        let got = self.consumer.pop_slice(&mut self.scratch[..wanted]);
        if got < wanted {
            self.underruns.fetch_add(1, Ordering::Relaxed);
        }

        let samples = &self.scratch[..got];
        match self.format {
            SampleFormat::U8 => {
                for (out, &sample) in buffer.iter_mut().zip(samples) {
                    *out = u8::from_sample(sample);
                }
            }
            SampleFormat::S16 => {
                for (out, &sample) in buffer.chunks_exact_mut(2).zip(samples) {
                    out.copy_from_slice(&i16::from_sample(sample).to_ne_bytes());
                }
            }
        }
    }
}
