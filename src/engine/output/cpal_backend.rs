use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, BuildStreamError, FromSample, Sample, SizedSample, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::engine::error::{Result, SoundError};
use crate::engine::format::{DeviceFormat, SampleFormat};
use crate::engine::output::{AudioHost, AudioOutput};
use crate::engine::sink::FillAdapter;

/// Audio host backed by the platform's default cpal host.
#[derive(Default)]
pub struct CpalHost {
    host: Option<cpal::Host>,
}

impl CpalHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioHost for CpalHost {
    fn init(&mut self) -> Result<()> {
        let host = cpal::default_host();
        debug!(host = ?host.id(), "audio host initialized");
        self.host = Some(host);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.host.is_some()
    }

    fn quit(&mut self) {
        if self.host.take().is_some() {
            debug!("audio host shut down");
        }
    }

    fn open(&mut self, format: &DeviceFormat, adapter: FillAdapter) -> Result<Box<dyn AudioOutput>> {
        let host = self
            .host
            .as_ref()
            .ok_or_else(|| SoundError::NoDevice("audio host not initialized".into()))?;
        Ok(Box::new(CpalBackend::new(host, format, adapter)?))
    }

    fn name(&self) -> &'static str {
        "cpal"
    }
}

pub struct CpalBackend {
    stream: Stream,
    device_id: String,
    paused: bool,
    is_healthy: Arc<AtomicBool>,
}

impl CpalBackend {
    pub fn new(host: &cpal::Host, format: &DeviceFormat, adapter: FillAdapter) -> Result<Self> {
        let device = host
            .default_output_device()
            .ok_or_else(|| SoundError::NoDevice("no output device available".into()))?;

        let device_id = device.name().unwrap_or_else(|_| "unknown".to_string());

        let config = StreamConfig {
            channels: format.channels,
            sample_rate: format.sample_rate,
            buffer_size: BufferSize::Default,
        };

        let is_healthy = Arc::new(AtomicBool::new(true));
        let adapter = Arc::new(Mutex::new(adapter));

        let native = match format.sample_format {
            SampleFormat::U8 => cpal::SampleFormat::U8,
            SampleFormat::S16 => cpal::SampleFormat::I16,
        };

        // Devices that only take float still get the caller's PCM, converted per block.
        let stream = match build_stream(&device, &config, native, format.sample_format, &adapter, &is_healthy) {
            Err(BuildStreamError::StreamConfigNotSupported) => {
                debug!(device = %device_id, ?native, "native format rejected, using f32 stream");
                build_stream(
                    &device,
                    &config,
                    cpal::SampleFormat::F32,
                    format.sample_format,
                    &adapter,
                    &is_healthy,
                )
            }
            other => other,
        }
        .map_err(|e| SoundError::NoDevice(format!("failed to open {}: {}", device_id, e)))?;

        info!(
            device = %device_id,
            sample_rate = format.sample_rate,
            bits = format.sample_format.bits(),
            channels = format.channels,
            "opened output device"
        );

        Ok(Self {
            stream,
            device_id,
            paused: true,
            is_healthy,
        })
    }
}

impl AudioOutput for CpalBackend {
    fn resume(&mut self) -> Result<()> {
        self.stream
            .play()
            .map_err(|e| SoundError::NoDevice(format!("failed to start {}: {}", self.device_id, e)))?;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.stream
            .pause()
            .map_err(|e| SoundError::NoDevice(format!("failed to pause {}: {}", self.device_id, e)))?;
        self.paused = true;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_healthy(&self) -> bool {
        self.is_healthy.load(Ordering::SeqCst)
    }

    fn close(self: Box<Self>) {
        if let Err(err) = self.stream.pause() {
            debug!(device = %self.device_id, "pause before close failed: {}", err);
        }
        info!(device = %self.device_id, "closed output device");
    }
}

fn build_stream(
    device: &cpal::Device,
    config: &StreamConfig,
    stream_format: cpal::SampleFormat,
    pcm: SampleFormat,
    adapter: &Arc<Mutex<FillAdapter>>,
    is_healthy: &Arc<AtomicBool>,
) -> std::result::Result<Stream, BuildStreamError> {
    match stream_format {
        cpal::SampleFormat::U8 => build_typed::<u8>(device, config, pcm, adapter.clone(), is_healthy.clone()),
        cpal::SampleFormat::I16 => build_typed::<i16>(device, config, pcm, adapter.clone(), is_healthy.clone()),
        _ => build_typed::<f32>(device, config, pcm, adapter.clone(), is_healthy.clone()),
    }
}

fn build_typed<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    pcm: SampleFormat,
    adapter: Arc<Mutex<FillAdapter>>,
    is_healthy: Arc<AtomicBool>,
) -> std::result::Result<Stream, BuildStreamError>
where
    T: SizedSample + FromSample<u8> + FromSample<i16>,
{
    let mut scratch = Vec::new();
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            process_audio(data, &mut scratch, pcm, &adapter);
        },
        move |err| {
            error!("output stream error: {}", err);
            is_healthy.store(false, Ordering::SeqCst);
        },
        None,
    )
}

/// Renders one device block: the sink writes PCM bytes into `scratch`, which
/// are then converted to the stream's sample type.
fn process_audio<T>(data: &mut [T], scratch: &mut Vec<u8>, pcm: SampleFormat, adapter: &Mutex<FillAdapter>)
where
    T: Sample + FromSample<u8> + FromSample<i16>,
{
    scratch.resize(data.len() * pcm.bytes_per_sample(), pcm.silence());

    match adapter.lock() {
        Ok(mut adapter) => adapter.fill(scratch),
        // The sink panicked on an earlier block.
        Err(_) => scratch.fill(pcm.silence()),
    }

    match pcm {
        SampleFormat::U8 => {
            for (out, &byte) in data.iter_mut().zip(scratch.iter()) {
                *out = T::from_sample(byte);
            }
        }
        SampleFormat::S16 => {
            for (out, pair) in data.iter_mut().zip(scratch.chunks_exact(2)) {
                *out = T::from_sample(i16::from_ne_bytes([pair[0], pair[1]]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sink::Token;

    fn adapter_writing(samples: Vec<i16>) -> Mutex<FillAdapter> {
        let sink = move |buffer: &mut [u8], _: Token| {
            for (chunk, sample) in buffer.chunks_exact_mut(2).zip(samples.iter()) {
                chunk.copy_from_slice(&sample.to_ne_bytes());
            }
        };
        Mutex::new(FillAdapter::new(Box::new(sink), Token(0), SampleFormat::S16))
    }

    #[test]
    fn s16_passes_through_to_i16_stream() {
        let adapter = adapter_writing(vec![1, -2, 300, i16::MIN]);
        let mut data = [0i16; 4];
        let mut scratch = Vec::new();
        process_audio(&mut data, &mut scratch, SampleFormat::S16, &adapter);
        assert_eq!(data, [1, -2, 300, i16::MIN]);
        assert_eq!(scratch.len(), 8);
    }

    #[test]
    fn s16_converts_to_f32_stream() {
        let adapter = adapter_writing(vec![16384, -16384]);
        let mut data = [1.0f32; 3];
        let mut scratch = Vec::new();
        process_audio(&mut data, &mut scratch, SampleFormat::S16, &adapter);
        assert_eq!(data, [0.5, -0.5, 0.0]);
    }

    #[test]
    fn silent_u8_sink_renders_zero_amplitude() {
        let adapter = Mutex::new(FillAdapter::new(
            Box::new(|_: &mut [u8], _: Token| {}),
            Token(0),
            SampleFormat::U8,
        ));

        let mut floats = [1.0f32; 8];
        process_audio(&mut floats, &mut Vec::new(), SampleFormat::U8, &adapter);
        assert!(floats.iter().all(|&s| s == 0.0));

        let mut bytes = [0u8; 8];
        process_audio(&mut bytes, &mut Vec::new(), SampleFormat::U8, &adapter);
        assert!(bytes.iter().all(|&b| b == 0x80));
    }

    #[test]
    fn host_starts_uninitialized() {
        let mut host = CpalHost::new();
        assert!(!host.is_initialized());
        host.quit();
        assert!(!host.is_initialized());
        assert_eq!(host.name(), "cpal");
    }
}
