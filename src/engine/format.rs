use crate::engine::error::{Result, SoundError};

/// PCM sample encodings the output layer can hand to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned 8-bit, centred on 0x80.
    U8,
    /// Signed 16-bit, native endian.
    S16,
}

impl SampleFormat {
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::U8),
            16 => Some(Self::S16),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::U8 => 8,
            Self::S16 => 16,
        }
    }

    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::S16 => 2,
        }
    }

    /// Byte value that decodes to a zero-amplitude sample.
    pub fn silence(self) -> u8 {
        match self {
            Self::U8 => 0x80,
            Self::S16 => 0x00,
        }
    }
}

/// A requested (or last requested) output mode.
///
/// The buffer-time fields are advisory latency hints in milliseconds and are
/// only stored and reported back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundMode {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
    pub current_buffer_time_ms: u32,
    pub max_buffer_time_ms: u32,
}

impl SoundMode {
    pub fn new(sample_rate: u32, bits_per_sample: u16, channels: u16) -> Self {
        Self {
            sample_rate,
            bits_per_sample,
            channels,
            current_buffer_time_ms: 0,
            max_buffer_time_ms: 0,
        }
    }

    pub fn with_buffer_times(mut self, current_ms: u32, max_ms: u32) -> Self {
        self.current_buffer_time_ms = current_ms;
        self.max_buffer_time_ms = max_ms;
        self
    }
}

/// Validated device format handed to an audio host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceFormat {
    pub sample_rate: u32,
    pub sample_format: SampleFormat,
    pub channels: u16,
}

impl DeviceFormat {
    pub fn bytes_per_frame(&self) -> usize {
        self.sample_format.bytes_per_sample() * self.channels as usize
    }
}

impl TryFrom<&SoundMode> for DeviceFormat {
    type Error = SoundError;

    fn try_from(mode: &SoundMode) -> Result<Self> {
        if !(1..=2).contains(&mode.channels) {
            return Err(SoundError::InvalidFormat(format!(
                "must be 1 or 2 channels, got {}",
                mode.channels
            )));
        }

        let sample_format = SampleFormat::from_bits(mode.bits_per_sample).ok_or_else(|| {
            SoundError::InvalidFormat(format!(
                "format must be 8 or 16 bit, got {}",
                mode.bits_per_sample
            ))
        })?;

        if mode.sample_rate == 0 {
            return Err(SoundError::InvalidFormat("sample rate must be positive".into()));
        }

        Ok(Self {
            sample_rate: mode.sample_rate,
            sample_format,
            channels: mode.channels,
        })
    }
}
