use crate::engine::format::SampleFormat;

/// Opaque value supplied at configure time and handed back on every fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Token(pub u32);

/// Producer of PCM bytes for the output device.
///
/// `fill` runs on the audio host's own thread, concurrently with control
/// calls on the owning thread. Implementations must not block and must only
/// write into `buffer`. The buffer arrives pre-filled with silence, so
/// leaving it untouched outputs nothing audible.
pub trait AudioSink: Send {
    fn fill(&mut self, buffer: &mut [u8], token: Token);
}

impl<F> AudioSink for F
where
    F: FnMut(&mut [u8], Token) + Send,
{
    fn fill(&mut self, buffer: &mut [u8], token: Token) {
        self(buffer, token)
    }
}

/// Binds a sink to its token and format. Audio hosts call [`FillAdapter::fill`]
/// whenever the device needs another block.
pub struct FillAdapter {
    sink: Box<dyn AudioSink>,
    token: Token,
    format: SampleFormat,
}

impl FillAdapter {
    pub fn new(sink: Box<dyn AudioSink>, token: Token, format: SampleFormat) -> Self {
        Self { sink, token, format }
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn fill(&mut self, buffer: &mut [u8]) {
        buffer.fill(self.format.silence());
        self.sink.fill(buffer, self.token);
    }
}
