pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod output;
pub mod sink;

pub use config::SoundConfig;
pub use engine::SoundOut;
pub use error::{Result, SoundError, SUCCESS};
pub use format::{DeviceFormat, SampleFormat, SoundMode};
pub use output::{cpal_backend::CpalHost, AudioHost, AudioOutput};
pub use sink::{AudioSink, FillAdapter, Token};
