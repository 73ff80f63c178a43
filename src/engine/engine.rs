use tracing::{debug, info, warn};

use crate::engine::config::SoundConfig;
use crate::engine::error::{Result, SoundError};
use crate::engine::format::{DeviceFormat, SoundMode};
use crate::engine::output::cpal_backend::CpalHost;
use crate::engine::output::{AudioHost, AudioOutput};
use crate::engine::sink::{AudioSink, FillAdapter, Token};

/// Owner of the single playback session.
///
/// All control calls come from the owning thread. The sink handed to
/// [`SoundOut::configure`] is the only thing that runs elsewhere, on the
/// host's audio thread.
pub struct SoundOut<H: AudioHost = CpalHost> {
    host: H,
    config: SoundConfig,
    mode: SoundMode,
    token: Token,
    device: Option<Box<dyn AudioOutput>>,
}

impl SoundOut<CpalHost> {
    pub fn with_default_host(config: SoundConfig) -> Self {
        Self::new(CpalHost::new(), config)
    }
}

impl<H: AudioHost> SoundOut<H> {
    pub fn new(host: H, config: SoundConfig) -> Self {
        Self {
            host,
            config,
            mode: SoundMode::default(),
            token: Token::default(),
            device: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// Opens the default playback device in `mode` and starts calling `sink`.
    ///
    /// A bad format is rejected before anything else happens, leaving an open
    /// session open. Otherwise any open session is closed first, and the
    /// request is remembered for [`SoundOut::query_mode`] even if the device
    /// then fails to open.
    pub fn configure<S>(&mut self, mode: SoundMode, sink: S, token: Token) -> Result<()>
    where
        S: AudioSink + 'static,
    {
        let format = DeviceFormat::try_from(&mode).map_err(|err| {
            warn!("rejected sound mode {:?}: {}", mode, err);
            err
        })?;

        if self.is_open() {
            self.teardown();
        }

        self.mode = mode;
        self.token = token;

        if self.config.no_sound {
            warn!("sound disabled by configuration");
            return Err(SoundError::NoDevice("sound disabled by configuration".into()));
        }

        if !self.host.is_initialized() {
            self.host.init().map_err(|err| {
                warn!(host = self.host.name(), "audio host failed to initialize: {}", err);
                err
            })?;
        }

        let adapter = FillAdapter::new(Box::new(sink), token, format.sample_format);
        let mut device = match self.host.open(&format, adapter) {
            Ok(device) => device,
            Err(err) => {
                warn!(host = self.host.name(), "failed to open output device: {}", err);
                self.host.quit();
                return Err(err);
            }
        };

        if let Err(err) = device.resume() {
            warn!("failed to start output device: {}", err);
            device.close();
            return Err(err);
        }

        info!(?format, token = token.0, "sound session open");
        self.device = Some(device);
        Ok(())
    }

    /// Last requested mode, whether or not a device is currently open.
    pub fn query_mode(&self) -> SoundMode {
        self.mode
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn set_current_buffer_time(&mut self, ms: u32) {
        self.mode.current_buffer_time_ms = ms;
    }

    /// Pauses and closes the device if one is open.
    pub fn teardown(&mut self) {
        if let Some(mut device) = self.device.take() {
            if let Err(err) = device.pause() {
                debug!("pause before close failed: {}", err);
            }
            device.close();
            info!("sound session closed");
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        match self.device.as_mut() {
            Some(device) => device.pause(),
            None => Ok(()),
        }
    }

    pub fn resume(&mut self) -> Result<()> {
        match self.device.as_mut() {
            Some(device) => device.resume(),
            None => Ok(()),
        }
    }

    /// A closed session counts as paused.
    pub fn is_paused(&self) -> bool {
        self.device.as_ref().map_or(true, |device| device.is_paused())
    }

    pub fn is_healthy(&self) -> bool {
        self.device.as_ref().map_or(false, |device| device.is_healthy())
    }

    /// Output position in bytes. The host delivers audio on its own thread and
    /// does not report a position, so this is always zero.
    pub fn position(&self) -> u64 {
        0
    }

    /// Output position in milliseconds. Always zero, see [`SoundOut::position`].
    pub fn time_position(&self) -> u64 {
        0
    }

    /// Nothing to pump: fills are driven by the host's audio thread.
    pub fn pump(&mut self) -> Result<()> {
        Ok(())
    }

    pub fn lock_audio(&mut self) {
        if !self.host.supports_explicit_locking() {
            return;
        }
        if let Some(device) = self.device.as_mut() {
            device.lock();
        }
    }

    pub fn unlock_audio(&mut self) {
        if !self.host.supports_explicit_locking() {
            return;
        }
        if let Some(device) = self.device.as_mut() {
            device.unlock();
        }
    }
}

impl<H: AudioHost> Drop for SoundOut<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
