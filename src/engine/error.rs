use thiserror::Error;

/// Compatibility code for a successful call.
pub const SUCCESS: i16 = 0;

/// Errors reported by the sound output layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoundError {
    /// Channel count, bit depth or sample rate outside what the layer supports.
    /// Rejected before any device is touched.
    #[error("invalid sound format: {0}")]
    InvalidFormat(String),
    /// The audio host is unavailable, disabled by configuration, or the device
    /// failed to open.
    #[error("no sound device: {0}")]
    NoDevice(String),
}

impl SoundError {
    /// Numeric code for callers that still speak the old integer convention.
    pub fn code(&self) -> i16 {
        match self {
            Self::InvalidFormat(_) => -1,
            Self::NoDevice(_) => -2,
        }
    }
}

pub type Result<T> = std::result::Result<T, SoundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_and_non_zero() {
        let invalid = SoundError::InvalidFormat("12 bits".into());
        let missing = SoundError::NoDevice("disabled".into());
        assert_ne!(invalid.code(), SUCCESS);
        assert_ne!(missing.code(), SUCCESS);
        assert_ne!(invalid.code(), missing.code());
    }

    #[test]
    fn display_carries_reason() {
        let err = SoundError::NoDevice("no output device available".into());
        assert_eq!(err.to_string(), "no sound device: no output device available");
    }
}
