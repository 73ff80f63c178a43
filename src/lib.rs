//! Sound output layer: opens one playback device at a time, feeds it from a
//! caller-supplied [`AudioSink`](engine::AudioSink) and exposes pause, resume
//! and teardown over an injectable [`AudioHost`](engine::AudioHost).

#![allow(clippy::module_inception)]

pub mod engine;

pub use engine::{
    AudioHost, AudioOutput, AudioSink, CpalHost, DeviceFormat, SampleFormat, SoundConfig, SoundError,
    SoundMode, SoundOut, Token,
};
