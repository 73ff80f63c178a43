pub mod cpal_backend;

use crate::engine::error::Result;
use crate::engine::format::DeviceFormat;
use crate::engine::sink::FillAdapter;

/// An open playback device.
pub trait AudioOutput {
    /// Starts (or restarts) delivery of fill callbacks.
    fn resume(&mut self) -> Result<()>;

    /// Stops delivery of fill callbacks without releasing the device.
    fn pause(&mut self) -> Result<()>;

    fn is_paused(&self) -> bool;

    /// Enters the critical section shared with the fill callback. Only called
    /// when the owning host reports [`AudioHost::supports_explicit_locking`].
    fn lock(&mut self) {}

    fn unlock(&mut self) {}

    /// False once the host reported a stream error for this device.
    fn is_healthy(&self) -> bool {
        true
    }

    /// Releases the device. Future fill callbacks stop; one already running
    /// on the audio thread may still complete.
    fn close(self: Box<Self>);
}

/// The platform audio subsystem a `SoundOut` drives.
pub trait AudioHost {
    fn init(&mut self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    /// Shuts the subsystem down. The next `init` starts from scratch.
    fn quit(&mut self);

    /// Opens the default playback device. The returned device starts paused
    /// or running depending on the platform; callers resume it explicitly.
    fn open(&mut self, format: &DeviceFormat, adapter: FillAdapter) -> Result<Box<dyn AudioOutput>>;

    /// Whether lock/unlock around shared callback state is meaningful.
    fn supports_explicit_locking(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}
