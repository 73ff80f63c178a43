//! Demo host for the sound output layer: a producer thread feeding decoded
//! or synthesized samples through a ring buffer into a PCM sink.

pub mod buffer;
pub mod decoder;
pub mod feeder;
pub mod pcm_sink;
pub mod tone;

/// A stream of interleaved `f32` samples in `[-1.0, 1.0]`.
pub trait SampleSource: Send {
    /// Next block of interleaved samples, or `None` at end of stream.
    fn next_block(&mut self) -> Option<Vec<f32>>;

    fn sample_rate(&self) -> u32;

    fn channels(&self) -> u16;

    /// Total length in seconds, if known.
    fn duration(&self) -> Option<f64> {
        None
    }
}
