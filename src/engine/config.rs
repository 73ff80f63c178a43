/// Process-level switches that affect the sound layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoundConfig {
    /// Refuse to open any device. `configure` reports `NoDevice` without
    /// touching the audio host, which lets a host run headless.
    pub no_sound: bool,
}

impl SoundConfig {
    pub fn headless() -> Self {
        Self { no_sound: true }
    }

    /// Scans a command line for a `nosound` switch (`nosound`, `-nosound` or
    /// `--nosound`, any case).
    pub fn from_command_line<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let no_sound = args.into_iter().any(|arg| {
            arg.as_ref()
                .trim_start_matches('-')
                .eq_ignore_ascii_case("nosound")
        });
        Self { no_sound }
    }
}
